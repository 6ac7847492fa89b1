//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it creates the
//! window and GPU renderer on resume, builds the [`Orrery`], and forwards
//! keyboard and pointer input to it. [`run`] drives the event loop.

use std::sync::Arc;
use std::time::Instant;

use orrery_config::Config;
use orrery_input::{KeyBindings, KeyboardState, PointerEvent, PointerTranslator};
use orrery_render::{
    RenderContextError, SurfaceError, SurfaceWrapper, ViewportSize, WgpuSceneRenderer,
    init_render_context_blocking,
};
use orrery_scene::{BodyId, BuildOptions, DirectoryTextureSource};
use orrery_view::{Orrery, ViewSettings};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::hud::{FpsCounter, HudStatus, format_hud, format_info_panel};
use crate::tick_loop::TickLoop;

/// Fatal failures of the application shell.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Render(#[from] RenderContextError),

    #[error("surface out of memory")]
    OutOfMemory,
}

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Scene build parameters from the config. Without a configured seed every
/// launch gets a fresh layout.
pub fn build_options_from_config(config: &Config) -> BuildOptions {
    BuildOptions {
        globe_segments: config.render.globe_segments,
        body_segments: config.render.body_segments,
        star_count: config.scene.star_count,
        star_half_extent: config.scene.star_half_extent,
        star_size: config.scene.star_size,
        seed: config.scene.seed.unwrap_or_else(rand::random),
    }
}

/// Everything created once the window exists.
struct Session {
    window: Arc<Window>,
    renderer: WgpuSceneRenderer,
    orrery: Orrery,
}

pub struct AppState {
    config: Config,
    /// Body to focus once the scene exists.
    focus: Option<BodyId>,
    session: Option<Session>,
    surface_wrapper: SurfaceWrapper,
    tick_loop: TickLoop,
    keyboard: KeyboardState,
    bindings: KeyBindings,
    pointer: PointerTranslator,
    fps: FpsCounter,
    last_title: String,
    fatal: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config, focus: Option<BodyId>) -> Self {
        let bindings = KeyBindings::with_overrides(&config.input.keybindings);
        let surface_wrapper = SurfaceWrapper::new(config.window.width, config.window.height);
        Self {
            last_title: config.window.title.clone(),
            config,
            focus,
            session: None,
            surface_wrapper,
            tick_loop: TickLoop::new(),
            keyboard: KeyboardState::new(),
            bindings,
            pointer: PointerTranslator::new(),
            fps: FpsCounter::new(Instant::now()),
            fatal: None,
        }
    }

    fn start_session(&mut self, event_loop: &ActiveEventLoop) -> Result<Session, AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);

        let inner_size = window.inner_size();
        let scale_factor = window.scale_factor();
        self.surface_wrapper = SurfaceWrapper::new(inner_size.width, inner_size.height);
        info!(
            "Surface initialized: {}x{} (scale: {:.2})",
            inner_size.width, inner_size.height, scale_factor
        );

        let context = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let renderer = WgpuSceneRenderer::new(context, self.config.render.clear_color);

        let textures = DirectoryTextureSource::new(
            self.config.assets.texture_dir.clone(),
            DirectoryTextureSource::default_worker_count(),
        );
        info!(dir = %textures.root().display(), "loading textures");
        let options = build_options_from_config(&self.config);
        debug!(seed = options.seed, stars = options.star_count, "building scene");
        let mut orrery = Orrery::new(
            &options,
            Box::new(textures),
            ViewSettings::from_config(&self.config),
            self.surface_wrapper.size(),
        );
        if let Some(body) = self.focus.take() {
            orrery.view_body(body);
            log_info_panel(&orrery);
        }

        Ok(Session {
            window,
            renderer,
            orrery,
        })
    }

    fn resize(&mut self, size: ViewportSize) {
        if let Some(session) = &mut self.session {
            session.renderer.resize(size.width, size.height);
            session.orrery.resize(size.width, size.height);
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(session) = &mut self.session else {
            return;
        };
        let before = session.orrery.selected_body();
        session.orrery.handle_pointer(event);
        if session.orrery.selected_body() != before {
            log_info_panel(&session.orrery);
        }
    }

    fn dispatch_key_presses(&mut self) {
        let presses = self.keyboard.take_presses();
        let Some(session) = &mut self.session else {
            return;
        };
        for key in presses {
            let Some(command) = self.bindings.command_for(key) else {
                continue;
            };
            let before = session.orrery.selected_body();
            session.orrery.execute(command);
            if session.orrery.selected_body() != before {
                log_info_panel(&session.orrery);
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatch_key_presses();

        let Some(session) = &mut self.session else {
            return;
        };
        session.orrery.poll_textures();
        let orrery = &mut session.orrery;
        self.tick_loop.tick(|| orrery.advance());

        match session.orrery.draw(&mut session.renderer) {
            Ok(()) => {}
            Err(SurfaceError::Lost) => {
                let size = self.surface_wrapper.size();
                warn!("Surface lost, reconfiguring at {}x{}", size.width, size.height);
                session.renderer.resize(size.width, size.height);
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, shutting down");
                self.fatal = Some(AppError::OutOfMemory);
                event_loop.exit();
                return;
            }
            Err(SurfaceError::Timeout) => warn!("Surface timeout, frame skipped"),
        }

        self.fps.frame(Instant::now());
        let fps = self.config.debug.show_fps.then(|| self.fps.fps()).flatten();
        let title = format_hud(
            &self.config.window.title,
            &HudStatus::from_orrery(&session.orrery, fps),
        );
        if title != self.last_title {
            session.window.set_title(&title);
            self.last_title = title;
        }

        session.window.request_redraw();
    }
}

fn log_info_panel(orrery: &Orrery) {
    if let Some(facts) = orrery.selected_facts() {
        info!("\n{}", format_info_panel(facts));
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.start_session(event_loop) {
            Ok(session) => {
                session.window.request_redraw();
                self.session = Some(session);
            }
            Err(err) => {
                error!("{err}");
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(size) = self
                    .surface_wrapper
                    .handle_resize(new_size.width, new_size.height)
                {
                    debug!("Window resized to {}x{}", size.width, size.height);
                    self.resize(size);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let Some(inner) = self.session.as_ref().map(|s| s.window.inner_size()) else {
                    return;
                };
                if let Some(size) = self.surface_wrapper.handle_resize(inner.width, inner.height) {
                    debug!(
                        "Scale factor changed to {:.2}, resized to {}x{}",
                        scale_factor, size.width, size.height
                    );
                    self.resize(size);
                }
            }
            WindowEvent::Focused(false) => {
                self.keyboard.reset();
                if let Some(session) = &mut self.session {
                    session.orrery.cancel_pointer();
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let event = self.pointer.cursor_moved(position.x, position.y);
                self.handle_pointer(event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = self.pointer.button(button, state) {
                    self.handle_pointer(event);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.pointer.wheel(delta);
                self.handle_pointer(event);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open the window and run until it closes.
///
/// # Errors
///
/// Returns the first fatal error: event loop creation, window or GPU setup,
/// or running out of GPU memory.
#[instrument(skip(config))]
pub fn run(config: Config, focus: Option<BodyId>) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, focus);
    event_loop.run_app(&mut app)?;
    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_surface_size_follows_config() {
        let mut config = Config::default();
        config.window.width = 1600;
        config.window.height = 900;
        let state = AppState::new(config, None);
        assert_eq!(state.surface_wrapper.size(), ViewportSize::new(1600, 900));
        assert!(state.session.is_none());
    }

    #[test]
    fn test_build_options_follow_config() {
        let mut config = Config::default();
        config.scene.seed = Some(9);
        config.scene.star_count = 500;
        config.render.globe_segments = 48;
        let options = build_options_from_config(&config);
        assert_eq!(options.seed, 9);
        assert_eq!(options.star_count, 500);
        assert_eq!(options.globe_segments, 48);
        assert_eq!(options.body_segments, config.render.body_segments);
    }

    #[test]
    fn test_window_attributes_do_not_panic() {
        let mut config = Config::default();
        config.window.fullscreen = true;
        let _attrs = window_attributes_from_config(&config);
    }
}
