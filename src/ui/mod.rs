//! Main window contract and the event loop driver.
//!
//! The bootstrap only talks to the UI through [`MainWindow`]; the SDL
//! implementation lives in `sdl_window`.

pub mod sdl_window;

use crate::error::Result;
use crate::settings::WindowSettings;
use crate::shutdown::QuitRequest;

/// Arguments for [`MainWindow::init`].
#[derive(Debug, Clone, PartialEq)]
pub struct InitOptions {
    /// Draw menu, tool and status bars
    pub show_chrome: bool,
    /// A ROM will be opened right after init
    pub has_rom: bool,
    pub window: WindowSettings,
}

/// Request to open a ROM once the window is initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomLaunch {
    pub rom_path: String,
    /// Empty when no 64DD disk was given
    pub disk_path: String,
    pub fullscreen: bool,
    pub quit_after_emulation: bool,
    /// `-1` or a slot in `0..=9`
    pub save_state_slot: i32,
}

pub trait MainWindow {
    /// Name of the windowing backend actually in use.
    fn platform_name(&self) -> String;

    fn init(&mut self, options: &InitOptions) -> Result<()>;

    /// Start a session for `launch`. A failed open ends the session, and with
    /// quit-after-emulation set it also requests the application to quit.
    fn open_rom(&mut self, launch: RomLaunch) -> Result<()>;

    fn show(&mut self);

    /// Run until the window closes or a quit is requested; returns the exit code.
    fn exec(&mut self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit(i32),
}

/// Drive `step` until it asks to exit or `quit` is requested.
///
/// `step` is expected to wait for events with a short timeout so a quit
/// request posted from a signal handler is noticed promptly.
pub fn run_event_loop<F>(quit: &QuitRequest, mut step: F) -> i32
where
    F: FnMut() -> LoopControl,
{
    loop {
        if quit.is_requested() {
            log::info!("[UI] Quit requested, leaving event loop");
            return 0;
        }

        if let LoopControl::Exit(code) = step() {
            return code;
        }
    }
}
