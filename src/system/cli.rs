//! Command-line interface handling.
//!
//! Declares every option the launcher understands and turns argv into an
//! immutable [`BootstrapConfig`]. `--help`, `--version` and usage errors end
//! the process from inside [`parse`]; that is the only early exit the
//! bootstrap has before the UI is initialized.

use clap::Parser;
use std::ffi::OsString;

pub const APP_NAME: &str = "IceHace's Modded Mupen GUI";

/// `<package version> (<git hash>, built <date>)`
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ", built ", env!("BUILD_DATE"), ")");

/// Slot value meaning "do not load a save state".
pub const NO_SLOT: i32 = -1;
pub const MAX_SLOT: i32 = 9;

/// Raw command line as declared to clap.
#[derive(Debug, Parser)]
#[command(name = "RMG", version = VERSION, about = APP_NAME)]
pub struct CliArgs {
    /// Changes the path where the libraries are stored
    #[cfg(not(feature = "portable-install"))]
    #[arg(long = "lib-path", value_name = "path", hide = true)]
    pub lib_path: Option<String>,

    /// Changes the path where the core library is stored
    #[cfg(not(feature = "portable-install"))]
    #[arg(long = "core-path", value_name = "path", hide = true)]
    pub core_path: Option<String>,

    /// Changes the path where the plugins are stored
    #[cfg(not(feature = "portable-install"))]
    #[arg(long = "plugin-path", value_name = "path", hide = true)]
    pub plugin_path: Option<String>,

    /// Changes the path where the shared data is stored
    #[cfg(not(feature = "portable-install"))]
    #[arg(long = "shared-data-path", value_name = "path", hide = true)]
    pub shared_data_path: Option<String>,

    /// Prints debug callback messages to stdout
    #[arg(short = 'd', long = "debug-messages")]
    pub debug_messages: bool,

    /// Launches ROM in fullscreen mode
    #[arg(short = 'f', long = "fullscreen")]
    pub fullscreen: bool,

    /// Hides GUI elements (menubar, toolbar, statusbar)
    #[arg(short = 'n', long = "nogui")]
    pub nogui: bool,

    /// Quits RMG when emulation has finished
    #[arg(short = 'q', long = "quit-after-emulation")]
    pub quit_after_emulation: bool,

    /// Loads save state slot when launching the ROM
    #[arg(long = "load-state-slot", value_name = "Slot Number", allow_hyphen_values = true)]
    pub load_state_slot: Option<String>,

    /// 64DD Disk to open ROM in combination with
    #[arg(long = "disk", value_name = "64DD Disk")]
    pub disk: Option<String>,

    /// ROM to open
    #[arg(value_name = "ROM")]
    pub rom: Vec<String>,
}

/// Path overrides. `None` and empty strings both mean "keep the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverrides {
    pub library: Option<String>,
    pub core: Option<String>,
    pub plugin: Option<String>,
    pub shared_data: Option<String>,
}

/// Validated launch configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub overrides: PathOverrides,
    pub debug_messages: bool,
    pub fullscreen: bool,
    pub no_gui: bool,
    pub quit_after_emulation: bool,
    /// Always `-1` or within `0..=9`.
    pub save_state_slot: i32,
    pub disk_path: Option<String>,
    pub rom_path: Option<String>,
}

impl BootstrapConfig {
    pub fn has_rom(&self) -> bool {
        self.rom_path.is_some()
    }
}

impl From<CliArgs> for BootstrapConfig {
    fn from(args: CliArgs) -> Self {
        #[cfg(not(feature = "portable-install"))]
        let overrides = PathOverrides {
            library: args.lib_path,
            core: args.core_path,
            plugin: args.plugin_path,
            shared_data: args.shared_data_path,
        };
        #[cfg(feature = "portable-install")]
        let overrides = PathOverrides::default();

        Self {
            overrides,
            debug_messages: args.debug_messages,
            fullscreen: args.fullscreen,
            no_gui: args.nogui,
            quit_after_emulation: args.quit_after_emulation,
            save_state_slot: parse_slot(args.load_state_slot.as_deref()),
            disk_path: args.disk,
            // Extra positionals are accepted and ignored
            rom_path: args.rom.into_iter().next(),
        }
    }
}

/// Normalize a raw `--load-state-slot` value.
///
/// Surrounding whitespace is ignored. Empty, blank, non-integer and
/// out-of-range values all become [`NO_SLOT`] without any diagnostic; a bad
/// slot is treated exactly like no slot.
pub fn parse_slot(raw: Option<&str>) -> i32 {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return NO_SLOT,
    };

    match raw.parse::<i32>() {
        Ok(slot) if (0..=MAX_SLOT).contains(&slot) => slot,
        _ => NO_SLOT,
    }
}

/// Parse argv (including the program name) without exiting.
pub fn parse_from<I, T>(argv: I) -> Result<BootstrapConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(argv).map(BootstrapConfig::from)
}

/// Parse argv; prints help, version or usage and exits when clap asks to.
pub fn parse<I, T>(argv: I) -> BootstrapConfig
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match parse_from(argv) {
        Ok(config) => config,
        Err(e) => e.exit(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse_ok(args: &[&str]) -> BootstrapConfig {
        let argv = std::iter::once("rmg").chain(args.iter().copied());
        parse_from(argv).unwrap()
    }

    #[test]
    fn test_slot_invalid_inputs_become_sentinel() {
        for raw in ["", "   ", "abc", "-1", "10", "9.5", "3a", "3 4", "99999999999"] {
            assert_eq!(parse_slot(Some(raw)), NO_SLOT, "{:?}", raw);
        }
        assert_eq!(parse_slot(None), NO_SLOT);
    }

    #[test]
    fn test_slot_ignores_surrounding_whitespace() {
        assert_eq!(parse_slot(Some(" 3")), 3);
        assert_eq!(parse_slot(Some("3 ")), 3);
        assert_eq!(parse_slot(Some("\t7\n")), 7);
        assert_eq!(parse_slot(Some(" 10 ")), NO_SLOT);
    }

    #[test]
    fn test_slot_valid_range() {
        for slot in 0..=9 {
            assert_eq!(parse_slot(Some(&slot.to_string())), slot);
        }
    }

    #[test]
    fn test_defaults_without_arguments() {
        let config = parse_ok(&[]);
        assert_eq!(config.overrides, PathOverrides::default());
        assert!(!config.debug_messages && !config.fullscreen && !config.no_gui && !config.quit_after_emulation);
        assert_eq!(config.save_state_slot, NO_SLOT);
        assert_eq!(config.disk_path, None);
        assert!(!config.has_rom());
    }

    #[test]
    fn test_rom_with_slot_and_fullscreen() {
        let config = parse_ok(&["game.rom", "--load-state-slot", "3", "-f"]);
        assert_eq!(config.rom_path.as_deref(), Some("game.rom"));
        assert_eq!(config.save_state_slot, 3);
        assert!(config.fullscreen);
        assert!(!config.quit_after_emulation);
    }

    #[test]
    fn test_short_and_long_flags() {
        let config = parse_ok(&["-d", "-n", "-q"]);
        assert!(config.debug_messages && config.no_gui && config.quit_after_emulation);

        let config = parse_ok(&["--debug-messages", "--fullscreen", "--nogui", "--quit-after-emulation"]);
        assert!(config.debug_messages && config.fullscreen && config.no_gui && config.quit_after_emulation);
    }

    #[test]
    fn test_negative_slot_is_taken_as_value() {
        let config = parse_ok(&["--load-state-slot", "-1", "game.z64"]);
        assert_eq!(config.save_state_slot, NO_SLOT);
        assert_eq!(config.rom_path.as_deref(), Some("game.z64"));
    }

    #[test]
    fn test_first_positional_wins() {
        let config = parse_ok(&["first.z64", "second.z64", "--disk", "expansion.ndd"]);
        assert_eq!(config.rom_path.as_deref(), Some("first.z64"));
        assert_eq!(config.disk_path.as_deref(), Some("expansion.ndd"));
    }

    #[cfg(not(feature = "portable-install"))]
    #[test]
    fn test_hidden_path_overrides_parse() {
        let config = parse_ok(&["--lib-path", "/opt/rmg/lib", "--core-path", "", "--plugin-path=/opt/rmg/plugins"]);
        assert_eq!(config.overrides.library.as_deref(), Some("/opt/rmg/lib"));
        assert_eq!(config.overrides.core.as_deref(), Some(""));
        assert_eq!(config.overrides.plugin.as_deref(), Some("/opt/rmg/plugins"));
        assert_eq!(config.overrides.shared_data, None);
    }

    #[cfg(not(feature = "portable-install"))]
    #[test]
    fn test_path_overrides_hidden_from_help() {
        use clap::CommandFactory;
        let help = CliArgs::command().render_help().to_string();
        assert!(!help.contains("--lib-path"));
        assert!(!help.contains("--shared-data-path"));
        assert!(help.contains("--load-state-slot"));
    }

    #[test]
    fn test_help_and_version_are_parser_exits() {
        assert_eq!(parse_from(["rmg", "--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_from(["rmg", "--version"]).unwrap_err().kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_unknown_option_and_missing_value_are_usage_errors() {
        assert_eq!(parse_from(["rmg", "--bogus"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert!(parse_from(["rmg", "--disk"]).is_err());
    }
}
