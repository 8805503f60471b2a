//! Cooperative shutdown on SIGINT / SIGTERM.
//!
//! The signal handler never runs application code. signal-hook's flag handler
//! only stores `true` into an `AtomicBool`; the UI event loop polls that flag
//! between frames and performs the real teardown on the main thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Idempotent request for the event loop to terminate.
#[derive(Debug, Clone, Default)]
pub struct QuitRequest {
    flag: Arc<AtomicBool>,
}

impl QuitRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the event loop to exit. Calling this more than once has no extra effect.
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// The shared flag, as registered with the signal handlers.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

/// Register SIGINT and SIGTERM so that they post a quit request.
#[cfg(not(target_os = "windows"))]
pub fn install(quit: &QuitRequest) -> std::io::Result<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};

    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, quit.flag())?;
    }
    log::debug!("[SIGNAL] Registered quit handlers for SIGINT, SIGTERM");
    Ok(())
}

/// No POSIX signals to hook on this platform.
#[cfg(target_os = "windows")]
pub fn install(_quit: &QuitRequest) -> std::io::Result<()> {
    Ok(())
}
