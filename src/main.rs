mod diagnostics;
mod emu_core;
mod error;
mod platform;
mod settings;
mod shutdown;
mod system;
mod ui;

use crate::system::bootstrap;
use crate::system::cli::{APP_NAME, VERSION};
use crate::system::environment::LaunchEnvironment;
use crate::ui::sdl_window::SdlFrontend;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The only read of the process environment for configuration
    let env = LaunchEnvironment::from_process();

    log::debug!("[MAIN] {} {} starting", APP_NAME, VERSION);

    let mut frontend = SdlFrontend;
    let code = bootstrap::run(&env, std::env::args_os(), &mut frontend);
    std::process::exit(code);
}
