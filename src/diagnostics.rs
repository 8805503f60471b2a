//! Filtering of SDL's own log output.
//!
//! SDL reports through a single process-wide output callback that may run on
//! any of its internal threads. Low-severity messages are noise for users, so
//! they are dropped unless `RMG_SHOW_DEBUG_SDL_MESSAGES=1`; errors and
//! critical messages always reach stderr.

use crate::system::environment::{self, LaunchEnvironment};
use std::io::Write;
use std::sync::OnceLock;

static POLICY: OnceLock<DiagnosticPolicy> = OnceLock::new();

/// Severity classes a windowing-library message can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Warning,
    Info,
    Critical,
    Fatal,
}

impl Severity {
    /// Debug, warning and info messages are only shown on request.
    pub fn is_low_priority(self) -> bool {
        matches!(self, Severity::Debug | Severity::Warning | Severity::Info)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Severity::Debug => "[SDL DEBUG] ",
            Severity::Warning => "[SDL WARNING] ",
            Severity::Info => "[SDL INFO] ",
            Severity::Critical => "[SDL CRITICAL] ",
            Severity::Fatal => "[SDL FATAL] ",
        }
    }
}

impl From<sdl3::log::Priority> for Severity {
    fn from(priority: sdl3::log::Priority) -> Self {
        use sdl3::log::Priority;
        match priority {
            Priority::Warn => Severity::Warning,
            Priority::Info => Severity::Info,
            Priority::Error => Severity::Critical,
            Priority::Critical => Severity::Fatal,
            // verbose, debug and anything newer SDL versions add
            _ => Severity::Debug,
        }
    }
}

/// Whether low-severity messages are forwarded. Fixed once at install time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticPolicy {
    pub show_low_priority: bool,
}

impl DiagnosticPolicy {
    pub fn from_env(env: &LaunchEnvironment) -> Self {
        Self {
            show_low_priority: environment::is_enabled(env.show_debug_sdl_messages.as_deref()),
        }
    }

    /// Returns the line to write to stderr, or `None` if the message is dropped.
    pub fn filter(&self, severity: Severity, message: &str) -> Option<String> {
        if severity.is_low_priority() && !self.show_low_priority {
            return None;
        }
        Some(format!("{}{}", severity.tag(), message))
    }
}

/// Install the SDL output callback with the policy derived from `env`.
///
/// The policy can only be set once per process; later calls keep the first
/// policy and simply re-register the same callback.
pub fn install(env: &LaunchEnvironment) -> DiagnosticPolicy {
    let policy = *POLICY.get_or_init(|| DiagnosticPolicy::from_env(env));
    sdl3::log::set_output_function(forward_sdl_message);
    policy
}

fn forward_sdl_message(priority: sdl3::log::Priority, _category: sdl3::log::Category, message: &str) {
    let policy = POLICY.get().copied().unwrap_or_default();
    if let Some(line) = policy.filter(Severity::from(priority), message) {
        // A closed stderr must not take the process down from inside SDL
        let _ = writeln!(std::io::stderr(), "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(value: Option<&str>) -> LaunchEnvironment {
        LaunchEnvironment {
            show_debug_sdl_messages: value.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_policy_only_enabled_by_exact_one() {
        assert!(DiagnosticPolicy::from_env(&env_with(Some("1"))).show_low_priority);
        for value in [Some("true"), Some("yes"), Some("0"), Some(""), None] {
            assert!(!DiagnosticPolicy::from_env(&env_with(value)).show_low_priority, "{:?}", value);
        }
    }

    #[test]
    fn test_low_priority_dropped_by_default() {
        let policy = DiagnosticPolicy::default();
        assert_eq!(policy.filter(Severity::Debug, "probing drivers"), None);
        assert_eq!(policy.filter(Severity::Warning, "no joystick"), None);
        assert_eq!(policy.filter(Severity::Info, "hello"), None);
    }

    #[test]
    fn test_low_priority_forwarded_when_enabled() {
        let policy = DiagnosticPolicy { show_low_priority: true };
        assert_eq!(policy.filter(Severity::Debug, "a").as_deref(), Some("[SDL DEBUG] a"));
        assert_eq!(policy.filter(Severity::Warning, "b").as_deref(), Some("[SDL WARNING] b"));
        assert_eq!(policy.filter(Severity::Info, "c").as_deref(), Some("[SDL INFO] c"));
    }

    #[test]
    fn test_critical_and_fatal_always_forwarded() {
        for policy in [DiagnosticPolicy::default(), DiagnosticPolicy { show_low_priority: true }] {
            assert_eq!(
                policy.filter(Severity::Critical, "GL context lost").as_deref(),
                Some("[SDL CRITICAL] GL context lost")
            );
            assert_eq!(policy.filter(Severity::Fatal, "out of memory").as_deref(), Some("[SDL FATAL] out of memory"));
        }
    }

    #[test]
    fn test_sdl_priority_mapping() {
        use sdl3::log::Priority;
        assert_eq!(Severity::from(Priority::Verbose), Severity::Debug);
        assert_eq!(Severity::from(Priority::Debug), Severity::Debug);
        assert_eq!(Severity::from(Priority::Info), Severity::Info);
        assert_eq!(Severity::from(Priority::Warn), Severity::Warning);
        assert_eq!(Severity::from(Priority::Error), Severity::Critical);
        assert_eq!(Severity::from(Priority::Critical), Severity::Fatal);
    }
}
