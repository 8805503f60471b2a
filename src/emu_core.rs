//! Emulator core configuration as seen by the launcher.
//!
//! The launcher never runs the core; it only tells it where its libraries,
//! plugins and shared data live, and whether its debug callback should be
//! echoed to stdout. [`Core`] is that narrow contract and [`CoreSettings`]
//! the in-process implementation the binary uses.

use crate::settings::PathSettings;
use directories::ProjectDirs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Marker file next to the executable that turns on portable mode.
pub const PORTABLE_MARKER: &str = "portable.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Library,
    Core,
    Plugin,
    SharedData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Info,
}

impl MessageKind {
    fn label(self) -> &'static str {
        match self {
            MessageKind::Error => "ERROR",
            MessageKind::Info => "INFO",
        }
    }

    fn level(self) -> log::Level {
        match self {
            MessageKind::Error => log::Level::Error,
            MessageKind::Info => log::Level::Info,
        }
    }
}

/// What the bootstrap needs from the emulator core.
pub trait Core {
    /// Replace the default location for `kind`. Only called with non-empty paths.
    fn set_path_override(&mut self, kind: PathKind, path: &str);

    /// Echo debug callback messages to stdout.
    fn set_print_debug_callback(&mut self, enabled: bool);

    fn add_callback_message(&mut self, kind: MessageKind, message: &str);
}

/// Resolved core locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorePaths {
    pub library: PathBuf,
    pub core: PathBuf,
    pub plugin: PathBuf,
    pub shared_data: PathBuf,
}

impl CorePaths {
    /// Relative layout used by portable installs (the working directory is
    /// pinned to the executable's directory first).
    pub fn portable() -> Self {
        Self {
            library: PathBuf::from("."),
            core: PathBuf::from("Core"),
            plugin: PathBuf::from("Plugin"),
            shared_data: PathBuf::from("Data"),
        }
    }

    /// Built-in defaults when neither the settings file nor the command line
    /// name a location.
    pub fn builtin(portable: bool) -> Self {
        if portable {
            return Self::portable();
        }

        match ProjectDirs::from("", "", "rmg") {
            Some(dirs) => {
                let library = dirs.data_local_dir().join("lib");
                Self {
                    core: library.join("Core"),
                    plugin: library.join("Plugin"),
                    library,
                    shared_data: dirs.data_dir().to_path_buf(),
                }
            }
            None => Self::portable(),
        }
    }

    fn get_mut(&mut self, kind: PathKind) -> &mut PathBuf {
        match kind {
            PathKind::Library => &mut self.library,
            PathKind::Core => &mut self.core,
            PathKind::Plugin => &mut self.plugin,
            PathKind::SharedData => &mut self.shared_data,
        }
    }

    /// Take every non-empty path from the settings file.
    pub fn merge_settings(&mut self, settings: &PathSettings) {
        let entries = [
            (PathKind::Library, &settings.library),
            (PathKind::Core, &settings.core),
            (PathKind::Plugin, &settings.plugin),
            (PathKind::SharedData, &settings.shared_data),
        ];
        for (kind, path) in entries {
            if !path.is_empty() {
                *self.get_mut(kind) = PathBuf::from(path);
            }
        }
    }
}

#[derive(Debug)]
pub struct CoreSettings {
    paths: CorePaths,
    print_debug_callback: bool,
}

impl CoreSettings {
    pub fn new(paths: CorePaths) -> Self {
        Self {
            paths,
            print_debug_callback: false,
        }
    }

    pub fn paths(&self) -> &CorePaths {
        &self.paths
    }

    /// Echo a callback message to `out` when debug printing is on.
    fn echo_message<W: Write>(&self, out: &mut W, kind: MessageKind, message: &str) -> std::io::Result<()> {
        if self.print_debug_callback {
            writeln!(out, "[CORE] [{}] {}", kind.label(), message)?;
        }
        Ok(())
    }
}

impl Core for CoreSettings {
    fn set_path_override(&mut self, kind: PathKind, path: &str) {
        log::debug!("[CORE] {:?} path override: {}", kind, path);
        *self.paths.get_mut(kind) = PathBuf::from(path);
    }

    fn set_print_debug_callback(&mut self, enabled: bool) {
        self.print_debug_callback = enabled;
    }

    fn add_callback_message(&mut self, kind: MessageKind, message: &str) {
        log::log!(kind.level(), "[CORE] {}", message);
        if let Err(e) = self.echo_message(&mut std::io::stdout().lock(), kind, message) {
            log::warn!("[CORE] Failed to echo message to stdout: {}", e);
        }
    }
}

/// Directory containing the running executable.
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe().ok()?.parent().map(Path::to_path_buf)
}

/// Portable mode is on when [`PORTABLE_MARKER`] sits next to the executable.
pub fn portable_directory_mode() -> bool {
    executable_dir().is_some_and(|dir| dir.join(PORTABLE_MARKER).exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_replaces_only_its_path() {
        let mut core = CoreSettings::new(CorePaths::portable());
        core.set_path_override(PathKind::Plugin, "/opt/rmg/plugins");

        let expected = CorePaths {
            plugin: PathBuf::from("/opt/rmg/plugins"),
            ..CorePaths::portable()
        };
        assert_eq!(core.paths(), &expected);
    }

    #[test]
    fn test_settings_paths_merge_when_non_empty() {
        let mut paths = CorePaths::portable();
        paths.merge_settings(&PathSettings {
            library: String::new(),
            core: "/srv/core".into(),
            plugin: String::new(),
            shared_data: "/srv/data".into(),
        });

        assert_eq!(paths.library, PathBuf::from("."));
        assert_eq!(paths.core, PathBuf::from("/srv/core"));
        assert_eq!(paths.plugin, PathBuf::from("Plugin"));
        assert_eq!(paths.shared_data, PathBuf::from("/srv/data"));
    }

    #[test]
    fn test_builtin_layout_nests_core_and_plugin_under_library() {
        let paths = CorePaths::builtin(false);
        assert_eq!(paths.core, paths.library.join("Core"));
        assert_eq!(paths.plugin, paths.library.join("Plugin"));
        assert_eq!(CorePaths::builtin(true), CorePaths::portable());
    }

    #[test]
    fn test_debug_callback_echo_follows_toggle() {
        let mut core = CoreSettings::new(CorePaths::portable());
        let mut out = Vec::new();
        core.echo_message(&mut out, MessageKind::Info, "Initializing on x11").unwrap();
        assert!(out.is_empty());

        core.set_print_debug_callback(true);
        core.echo_message(&mut out, MessageKind::Info, "Initializing on x11").unwrap();
        core.echo_message(&mut out, MessageKind::Error, "failed to open ROM a.z64: file not found")
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[CORE] [INFO] Initializing on x11\n[CORE] [ERROR] failed to open ROM a.z64: file not found\n"
        );
    }

    #[test]
    fn test_message_kinds_map_to_log_levels() {
        assert_eq!(MessageKind::Error.level(), log::Level::Error);
        assert_eq!(MessageKind::Info.level(), log::Level::Info);
    }
}
