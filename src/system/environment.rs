//! Snapshot of the environment variables the launcher consults.
//!
//! The process environment is read exactly once, in `main`, and the resulting
//! [`LaunchEnvironment`] is handed to every component that needs it. Nothing
//! else in the crate calls `std::env::var` for configuration, so each toggle
//! has a single, fixed value for the lifetime of the process.

/// Shows low-severity SDL log messages when set to exactly `"1"`.
pub const SHOW_DEBUG_SDL_MESSAGES_ENV: &str = "RMG_SHOW_DEBUG_SDL_MESSAGES";

/// Selects the Wayland video driver when set to exactly `"1"`.
pub const WAYLAND_ENV: &str = "RMG_WAYLAND";

/// Vulkan loader path read by SDL itself.
pub const VULKAN_LIBRARY_ENV: &str = "SDL_VULKAN_LIBRARY";

/// Video driver selection read by SDL itself.
pub const VIDEO_DRIVER_ENV: &str = "SDL_VIDEO_DRIVER";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchEnvironment {
    pub show_debug_sdl_messages: Option<String>,
    pub wayland: Option<String>,
    pub vulkan_library: Option<String>,
}

impl LaunchEnvironment {
    /// Read the real process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary lookup, used by tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            show_debug_sdl_messages: lookup(SHOW_DEBUG_SDL_MESSAGES_ENV),
            wayland: lookup(WAYLAND_ENV),
            vulkan_library: lookup(VULKAN_LIBRARY_ENV),
        }
    }
}

/// The only value that turns an environment toggle on.
pub fn is_enabled(value: Option<&str>) -> bool {
    value == Some("1")
}
