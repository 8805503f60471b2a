//! SDL3 application object and main window.
//!
//! [`Application`] owns the SDL context and installs the negotiated GL
//! attributes before any window exists. [`SdlMainWindow`] is the concrete
//! [`MainWindow`] the binary hands to the bootstrap.

use super::{run_event_loop, InitOptions, LoopControl, MainWindow, RomLaunch};
use crate::emu_core::CoreSettings;
use crate::error::{BootError, Result};
use crate::platform::SurfaceSettings;
use crate::settings::Settings;
use crate::shutdown::QuitRequest;
use crate::system::bootstrap::{self, Frontend};
use crate::system::cli::APP_NAME;
use sdl3::event::Event;
use sdl3::pixels::Color;
use sdl3::rect::Rect;
use sdl3::render::Canvas;
use sdl3::video::{GLProfile, Window};
use std::path::Path;

const BG_DARK: Color = Color::RGB(30, 30, 30);
const BG_MEDIUM: Color = Color::RGB(40, 40, 40);
const BG_LIGHT: Color = Color::RGB(50, 50, 50);

const MENU_BAR_HEIGHT: u32 = 24;
const TOOL_BAR_HEIGHT: u32 = 32;
const STATUS_BAR_HEIGHT: u32 = 22;

/// Event wait per frame, in milliseconds.
const FRAME_WAIT_MS: u32 = 16;

/// SDL context plus the process-wide surface defaults.
pub struct Application {
    sdl: sdl3::Sdl,
    video: sdl3::VideoSubsystem,
    surface: SurfaceSettings,
    quit: QuitRequest,
}

impl Application {
    /// Start SDL video and install the GL attributes every window inherits.
    pub fn new(surface: SurfaceSettings, quit: QuitRequest) -> Result<Self> {
        let sdl = sdl3::init().map_err(|e| BootError::Sdl(e.to_string()))?;
        let video = sdl.video().map_err(|e| BootError::Sdl(e.to_string()))?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(surface.gl_major, surface.gl_minor);

        Ok(Self { sdl, video, surface, quit })
    }

    pub fn platform_name(&self) -> String {
        self.video.current_video_driver().to_string()
    }

    pub fn quit_request(&self) -> &QuitRequest {
        &self.quit
    }
}

pub struct SdlMainWindow {
    app: Application,
    canvas: Option<Canvas<Window>>,
    event_pump: Option<sdl3::EventPump>,
    show_chrome: bool,
    launch: Option<RomLaunch>,
}

impl SdlMainWindow {
    pub fn new(app: Application) -> Self {
        Self {
            app,
            canvas: None,
            event_pump: None,
            show_chrome: true,
            launch: None,
        }
    }

    fn set_title(&mut self, title: &str) {
        if let Some(canvas) = self.canvas.as_mut() {
            if let Err(e) = canvas.window_mut().set_title(title) {
                log::warn!("[UI] Failed to set window title: {}", e);
            }
        }
    }

    /// A failed open ends the session; with quit-after-emulation that ends the app.
    fn fail_launch(&mut self, launch: &RomLaunch, reason: impl Into<String>) -> Result<()> {
        if launch.quit_after_emulation {
            self.app.quit_request().request();
        }
        Err(BootError::RomOpen {
            path: launch.rom_path.clone(),
            reason: reason.into(),
        })
    }
}

impl MainWindow for SdlMainWindow {
    fn platform_name(&self) -> String {
        self.app.platform_name()
    }

    fn init(&mut self, options: &InitOptions) -> Result<()> {
        let mut builder = self.app.video.window(APP_NAME, options.window.width, options.window.height);
        builder.position_centered().resizable().high_pixel_density().hidden();
        if options.window.maximized {
            builder.maximized();
        }
        let window = builder.build().map_err(|e| BootError::Window(e.to_string()))?;

        let canvas = window.into_canvas();

        let vsync = self.app.surface.swap_interval;
        // SAFETY: the renderer pointer is owned by `canvas` and valid for this call
        let vsync_ok = unsafe { sdl3::sys::render::SDL_SetRenderVSync(canvas.raw(), vsync) };
        if !vsync_ok {
            log::warn!("[UI] Failed to set swap interval {}", vsync);
        }

        let event_pump = self.app.sdl.event_pump().map_err(|e| BootError::Sdl(e.to_string()))?;

        self.show_chrome = options.show_chrome;
        self.canvas = Some(canvas);
        self.event_pump = Some(event_pump);
        log::debug!(
            "[UI] Main window ready ({}x{}, chrome={}, rom={})",
            options.window.width,
            options.window.height,
            options.show_chrome,
            options.has_rom
        );
        Ok(())
    }

    fn open_rom(&mut self, launch: RomLaunch) -> Result<()> {
        if self.canvas.is_none() {
            return self.fail_launch(&launch, BootError::NotInitialized.to_string());
        }
        if !Path::new(&launch.rom_path).is_file() {
            return self.fail_launch(&launch, "file not found");
        }
        if !launch.disk_path.is_empty() && !Path::new(&launch.disk_path).is_file() {
            return self.fail_launch(&launch, format!("disk {} not found", launch.disk_path));
        }

        let rom_name = Path::new(&launch.rom_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| launch.rom_path.clone());
        self.set_title(&format!("{} - {}", APP_NAME, rom_name));

        if launch.fullscreen {
            if let Some(canvas) = self.canvas.as_mut() {
                if let Err(e) = canvas.window_mut().set_fullscreen(true) {
                    log::warn!("[UI] Failed to enter fullscreen: {}", e);
                }
            }
        }

        log::info!(
            "[UI] Opening ROM {} (disk: {}, slot: {}, quit after emulation: {})",
            launch.rom_path,
            if launch.disk_path.is_empty() { "none" } else { &launch.disk_path },
            launch.save_state_slot,
            launch.quit_after_emulation
        );
        self.launch = Some(launch);
        Ok(())
    }

    fn show(&mut self) {
        let show_chrome = self.show_chrome;
        if let Some(canvas) = self.canvas.as_mut() {
            if !canvas.window_mut().show() {
                log::warn!("[UI] Failed to show main window");
            }
            if let Err(e) = draw_frame(canvas, show_chrome) {
                log::warn!("[UI] Initial draw failed: {}", e);
            }
        }
    }

    fn exec(&mut self) -> i32 {
        let quit = self.app.quit_request().clone();
        let show_chrome = self.show_chrome;
        let (canvas, event_pump) = match (self.canvas.as_mut(), self.event_pump.as_mut()) {
            (Some(canvas), Some(event_pump)) => (canvas, event_pump),
            _ => {
                log::error!("[UI] {}", BootError::NotInitialized);
                return 1;
            }
        };

        let code = run_event_loop(&quit, || {
            let mut events = Vec::new();
            if let Some(event) = event_pump.wait_event_timeout(FRAME_WAIT_MS) {
                events.push(event);
            }
            events.extend(event_pump.poll_iter());

            if events.iter().any(|event| matches!(event, Event::Quit { .. })) {
                return LoopControl::Exit(0);
            }

            if !events.is_empty() {
                if let Err(e) = draw_frame(canvas, show_chrome) {
                    log::warn!("[UI] Draw failed: {}", e);
                }
            }
            LoopControl::Continue
        });

        if let Some(launch) = &self.launch {
            log::info!("[UI] Closing session for {}", launch.rom_path);
        }
        code
    }
}

/// Clear the window and draw the menu, tool and status bar bands.
fn draw_frame(canvas: &mut Canvas<Window>, show_chrome: bool) -> std::result::Result<(), String> {
    let (width, height) = canvas.window().size_in_pixels();

    canvas.set_draw_color(BG_DARK);
    canvas.clear();

    if show_chrome && height > MENU_BAR_HEIGHT + TOOL_BAR_HEIGHT + STATUS_BAR_HEIGHT {
        canvas.set_draw_color(BG_LIGHT);
        canvas.fill_rect(Rect::new(0, 0, width, MENU_BAR_HEIGHT)).map_err(|e| e.to_string())?;

        canvas.set_draw_color(BG_MEDIUM);
        canvas
            .fill_rect(Rect::new(0, MENU_BAR_HEIGHT as i32, width, TOOL_BAR_HEIGHT))
            .map_err(|e| e.to_string())?;

        canvas.set_draw_color(BG_LIGHT);
        canvas
            .fill_rect(Rect::new(0, (height - STATUS_BAR_HEIGHT) as i32, width, STATUS_BAR_HEIGHT))
            .map_err(|e| e.to_string())?;
    }

    canvas.present();
    Ok(())
}

/// Production collaborators: the SDL main window and in-process core settings.
#[derive(Debug, Default)]
pub struct SdlFrontend;

impl Frontend for SdlFrontend {
    type Core = CoreSettings;
    type Window = SdlMainWindow;

    fn create_window(&mut self, surface: SurfaceSettings, quit: QuitRequest) -> Result<SdlMainWindow> {
        Ok(SdlMainWindow::new(Application::new(surface, quit)?))
    }

    fn create_core(&mut self, settings: &Settings, portable: bool) -> CoreSettings {
        let core = bootstrap::default_core(settings, portable);
        log::debug!("[CORE] Default paths: {:?}", core.paths());
        core
    }
}
