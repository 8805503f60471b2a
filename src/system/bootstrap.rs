//! Startup sequence: from a raw invocation to a running event loop.
//!
//! The order below is load-bearing. Diagnostics and signal handlers go in
//! before SDL exists, the surface configuration must be in the environment
//! before the application object starts SDL video, and the command line is
//! only parsed once the application object and window exist. The only fatal
//! path is a failed window initialization (exit code 1).

use crate::diagnostics::{self, DiagnosticPolicy};
use crate::emu_core::{self, Core, CorePaths, CoreSettings, MessageKind, PathKind};
use crate::error::{BootError, Result};
use crate::platform::{self, SurfaceSettings};
use crate::settings::{self, Settings};
use crate::shutdown::{self, QuitRequest};
use crate::system::cli::{self, BootstrapConfig, PathOverrides};
use crate::system::environment::LaunchEnvironment;
use crate::ui::{InitOptions, MainWindow, RomLaunch};
use std::ffi::OsString;

/// Exit code when the application object or the main window cannot start.
pub const EXIT_INIT_FAILURE: i32 = 1;

/// Factory for the collaborators the bootstrap drives.
pub trait Frontend {
    type Core: Core;
    type Window: MainWindow;

    /// Build the application object and its (not yet initialized) main window.
    fn create_window(&mut self, surface: SurfaceSettings, quit: QuitRequest) -> Result<Self::Window>;

    fn create_core(&mut self, settings: &Settings, portable: bool) -> Self::Core;

    fn load_settings(&mut self, portable: bool) -> Settings {
        settings::load_settings(portable)
    }

    fn portable_directory_mode(&self) -> bool {
        emu_core::portable_directory_mode()
    }

    /// Steps 1 to 3. Writes process-wide state: the SDL log hook, signal
    /// handlers and the environment exports.
    fn prepare_process(&mut self, env: &LaunchEnvironment) -> ProcessSetup {
        prepare_process(env)
    }
}

/// Process-wide state fixed before the application object exists.
#[derive(Debug, Clone)]
pub struct ProcessSetup {
    pub diagnostics: DiagnosticPolicy,
    pub quit: QuitRequest,
    pub surface: SurfaceSettings,
}

/// Install diagnostics and signal handlers, then configure the platform surface.
pub fn prepare_process(env: &LaunchEnvironment) -> ProcessSetup {
    let diagnostics = diagnostics::install(env);

    let quit = QuitRequest::new();
    if let Err(e) = shutdown::install(&quit) {
        log::warn!("[BOOT] Failed to register signal handlers: {}", e);
    }

    let surface = platform::configure(env);

    ProcessSetup {
        diagnostics,
        quit,
        surface,
    }
}

/// Pin the working directory to the executable's directory.
pub fn pin_portable_directory() -> Result<()> {
    let dir = emu_core::executable_dir().ok_or_else(|| BootError::Portable("unknown executable path".to_string()))?;
    std::env::set_current_dir(&dir).map_err(|e| BootError::Portable(format!("{}: {}", dir.display(), e)))?;
    log::debug!("[BOOT] Portable mode, working directory {}", dir.display());
    Ok(())
}

/// Apply each non-empty override on its own; empty or absent ones keep the default.
pub fn apply_path_overrides<C: Core>(core: &mut C, overrides: &PathOverrides) {
    let entries = [
        (PathKind::Library, &overrides.library),
        (PathKind::Core, &overrides.core),
        (PathKind::Plugin, &overrides.plugin),
        (PathKind::SharedData, &overrides.shared_data),
    ];

    for (kind, path) in entries {
        if let Some(path) = path.as_deref().filter(|path| !path.is_empty()) {
            core.set_path_override(kind, path);
        }
    }
}

/// The open-ROM request for `config`, if a ROM was given.
pub fn rom_launch(config: &BootstrapConfig) -> Option<RomLaunch> {
    let rom_path = config.rom_path.clone()?;
    Some(RomLaunch {
        rom_path,
        disk_path: config.disk_path.clone().unwrap_or_default(),
        fullscreen: config.fullscreen,
        quit_after_emulation: config.quit_after_emulation,
        save_state_slot: config.save_state_slot,
    })
}

/// Run the whole startup sequence and the event loop; returns the exit code.
pub fn run<F, I, T>(env: &LaunchEnvironment, argv: I, frontend: &mut F) -> i32
where
    F: Frontend,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let setup = frontend.prepare_process(env);
    log::debug!(
        "[BOOT] Low-priority SDL messages {}",
        if setup.diagnostics.show_low_priority { "shown" } else { "hidden" }
    );

    let mut window = match frontend.create_window(setup.surface, setup.quit.clone()) {
        Ok(window) => window,
        Err(e) => {
            log::error!("[BOOT] {}", e);
            return EXIT_INIT_FAILURE;
        }
    };

    let portable = cfg!(feature = "portable-install") && frontend.portable_directory_mode();
    if portable {
        if let Err(e) = pin_portable_directory() {
            log::warn!("[BOOT] {}", e);
        }
    }

    let config = cli::parse(argv);
    let settings = frontend.load_settings(portable);
    let mut core = frontend.create_core(&settings, portable);
    apply_path_overrides(&mut core, &config.overrides);

    core.set_print_debug_callback(config.debug_messages);

    core.add_callback_message(MessageKind::Info, &format!("Initializing on {}", window.platform_name()));

    let options = InitOptions {
        show_chrome: !config.no_gui,
        has_rom: config.has_rom(),
        window: settings.window.clone(),
    };
    if let Err(e) = window.init(&options) {
        core.add_callback_message(MessageKind::Error, &format!("Main window initialization failed: {}", e));
        return EXIT_INIT_FAILURE;
    }

    if let Some(launch) = rom_launch(&config) {
        if let Err(e) = window.open_rom(launch) {
            core.add_callback_message(MessageKind::Error, &e.to_string());
        }
    }

    window.show();
    window.exec()
}

/// Core defaults for a real install: built-in layout, then the settings file.
pub fn default_core(settings: &Settings, portable: bool) -> CoreSettings {
    let mut paths = CorePaths::builtin(portable);
    paths.merge_settings(&settings.paths);
    CoreSettings::new(paths)
}
