//! Error type shared by the bootstrap, the settings layer and the SDL front-end.

use thiserror::Error;

/// Everything that can go wrong while bringing the launcher up.
///
/// User-input mistakes (a bad save-state slot, an empty path override) are not
/// errors: they are normalized during parsing and never reach this type.
#[derive(Debug, Error)]
pub enum BootError {
    /// SDL or one of its subsystems refused to initialize.
    #[error("SDL initialization failed: {0}")]
    Sdl(String),

    /// The main window or its renderer could not be created.
    #[error("failed to create main window: {0}")]
    Window(String),

    /// The main window was asked to do something before `init` succeeded.
    #[error("main window is not initialized")]
    NotInitialized,

    /// A ROM (or its 64DD disk image) could not be opened.
    #[error("failed to open ROM {path}: {reason}")]
    RomOpen { path: String, reason: String },

    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform config/data directory could be determined.
    #[error("failed to determine {0} directory")]
    NoDirectory(&'static str),

    /// Portable mode is on but the executable's directory is unknown.
    #[error("failed to pin working directory for portable mode: {0}")]
    Portable(String),
}

pub type Result<T> = std::result::Result<T, BootError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts_with_question_mark() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/a/real/rmg/file")?)
        }
        let err = read_missing().unwrap_err();
        assert!(matches!(err, BootError::Io(_)));
        assert!(err.to_string().starts_with("settings I/O error"));
    }

    #[test]
    fn test_display_names_the_failing_part() {
        assert_eq!(BootError::NoDirectory("config").to_string(), "failed to determine config directory");
        assert_eq!(BootError::Window("no renderer".into()).to_string(), "failed to create main window: no renderer");
        let rom = BootError::RomOpen {
            path: "game.z64".into(),
            reason: "file not found".into(),
        };
        assert_eq!(rom.to_string(), "failed to open ROM game.z64: file not found");
    }
}
