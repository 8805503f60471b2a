//! Windowing backend selection and graphics surface negotiation.
//!
//! Everything here must happen before SDL's video subsystem starts. Some of
//! the decisions are consumed by SDL itself through the process environment
//! (`SDL_VIDEO_DRIVER`, `SDL_VULKAN_LIBRARY`); those are written as explicit
//! [`EnvExport`]s so the side channel stays visible. The GL attributes in
//! [`SurfaceSettings`] are installed by the application object before the
//! first window is created.

use crate::system::environment::{self, LaunchEnvironment, VIDEO_DRIVER_ENV, VULKAN_LIBRARY_ENV};

/// Desktop entry identifier used for icon and taskbar grouping.
pub const APP_ID: &str = "com.github.Rosalie241.RMG";

pub const DEFAULT_VULKAN_LIBRARY: &str = "libvulkan.so.1";

/// Swap interval 0: presentation never waits for vertical sync.
pub const SWAP_INTERVAL: i32 = 0;
pub const GL_MAJOR_VERSION: u8 = 3;
pub const GL_MINOR_VERSION: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowingBackend {
    X11,
    Wayland,
    /// Whatever the platform provides (Windows, macOS)
    Native,
}

impl WindowingBackend {
    /// SDL video driver name, if the backend has to be forced.
    pub fn driver_name(self) -> Option<&'static str> {
        match self {
            WindowingBackend::X11 => Some("x11"),
            WindowingBackend::Wayland => Some("wayland"),
            WindowingBackend::Native => None,
        }
    }
}

/// Surface attributes every window inherits. Built once, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSettings {
    pub backend: WindowingBackend,
    pub swap_interval: i32,
    pub gl_major: u8,
    pub gl_minor: u8,
}

impl SurfaceSettings {
    pub fn for_backend(backend: WindowingBackend) -> Self {
        Self {
            backend,
            swap_interval: SWAP_INTERVAL,
            gl_major: GL_MAJOR_VERSION,
            gl_minor: GL_MINOR_VERSION,
        }
    }
}

/// An environment variable this process writes for a library to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvExport {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfacePlan {
    pub settings: SurfaceSettings,
    pub exports: Vec<EnvExport>,
}

/// `RMG_WAYLAND=1` selects Wayland, anything else X11.
pub fn select_backend(env: &LaunchEnvironment) -> WindowingBackend {
    if environment::is_enabled(env.wayland.as_deref()) {
        WindowingBackend::Wayland
    } else {
        WindowingBackend::X11
    }
}

/// The backend this build forces. Only Linux chooses between X11 and
/// Wayland; every other target keeps the platform's own video driver.
pub fn platform_backend(env: &LaunchEnvironment) -> WindowingBackend {
    if cfg!(target_os = "linux") {
        select_backend(env)
    } else {
        WindowingBackend::Native
    }
}

/// Decide the surface configuration without touching the process.
pub fn plan(env: &LaunchEnvironment) -> SurfacePlan {
    plan_for(platform_backend(env), env)
}

/// Exports for a chosen backend. A native backend exports nothing.
pub fn plan_for(backend: WindowingBackend, env: &LaunchEnvironment) -> SurfacePlan {
    let mut exports = Vec::new();

    if let Some(driver) = backend.driver_name() {
        exports.push(EnvExport {
            key: VIDEO_DRIVER_ENV,
            value: driver.to_string(),
        });

        // An operator-provided loader path always wins
        if env.vulkan_library.is_none() {
            exports.push(EnvExport {
                key: VULKAN_LIBRARY_ENV,
                value: DEFAULT_VULKAN_LIBRARY.to_string(),
            });
        }
    }

    SurfacePlan {
        settings: SurfaceSettings::for_backend(backend),
        exports,
    }
}

/// Apply the plan to the process: environment exports and SDL hints.
///
/// Must run before the application object initializes SDL video.
pub fn configure(env: &LaunchEnvironment) -> SurfaceSettings {
    let plan = plan(env);

    for export in &plan.exports {
        log::debug!("[SURFACE] {}={}", export.key, export.value);
        std::env::set_var(export.key, &export.value);
    }

    // SDL must not install its own SIGINT/SIGTERM handlers over ours
    sdl3::hint::set("SDL_NO_SIGNAL_HANDLERS", "1");

    sdl3::hint::set("SDL_APP_ID", APP_ID);
    sdl3::hint::set("SDL_VIDEO_X11_WMCLASS", APP_ID);
    sdl3::hint::set("SDL_VIDEO_WAYLAND_WMCLASS", APP_ID);

    log::debug!(
        "[SURFACE] backend={:?} swap_interval={} gl={}.{}",
        plan.settings.backend,
        plan.settings.swap_interval,
        plan.settings.gl_major,
        plan.settings.gl_minor
    );

    plan.settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_toggle_requires_exact_one() {
        let wayland = LaunchEnvironment {
            wayland: Some("1".into()),
            ..Default::default()
        };
        assert_eq!(select_backend(&wayland), WindowingBackend::Wayland);

        for value in [None, Some("0"), Some("true"), Some("wayland")] {
            let env = LaunchEnvironment {
                wayland: value.map(str::to_string),
                ..Default::default()
            };
            assert_eq!(select_backend(&env), WindowingBackend::X11, "{:?}", value);
        }
    }

    #[test]
    fn test_surface_attributes_are_pinned() {
        let settings = plan(&LaunchEnvironment::default()).settings;
        assert_eq!(settings.swap_interval, 0);
        assert_eq!((settings.gl_major, settings.gl_minor), (3, 3));
    }

    #[test]
    fn test_native_backend_forces_no_driver() {
        let plan = plan_for(WindowingBackend::Native, &LaunchEnvironment::default());
        assert_eq!(plan.settings.backend, WindowingBackend::Native);
        assert!(plan.exports.is_empty());
        assert_eq!(plan.settings.swap_interval, SWAP_INTERVAL);
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_plan_off_linux_keeps_platform_driver() {
        let env = LaunchEnvironment {
            wayland: Some("1".into()),
            ..Default::default()
        };
        let plan = plan(&env);
        assert_eq!(plan.settings.backend, WindowingBackend::Native);
        assert_eq!(plan.settings.backend.driver_name(), None);
        assert!(plan.exports.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_plan_exports_driver_and_vulkan_default() {
        let plan = plan(&LaunchEnvironment::default());
        assert_eq!(plan.settings.backend, WindowingBackend::X11);
        assert_eq!(
            plan.exports,
            vec![
                EnvExport {
                    key: VIDEO_DRIVER_ENV,
                    value: "x11".into()
                },
                EnvExport {
                    key: VULKAN_LIBRARY_ENV,
                    value: DEFAULT_VULKAN_LIBRARY.into()
                },
            ]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_plan_keeps_operator_vulkan_library() {
        let env = LaunchEnvironment {
            wayland: Some("1".into()),
            vulkan_library: Some("/opt/vulkan/libvulkan.so".into()),
            ..Default::default()
        };
        let plan = plan(&env);
        assert_eq!(plan.settings.backend, WindowingBackend::Wayland);
        assert_eq!(
            plan.exports,
            vec![EnvExport {
                key: VIDEO_DRIVER_ENV,
                value: "wayland".into()
            }]
        );
    }
}
