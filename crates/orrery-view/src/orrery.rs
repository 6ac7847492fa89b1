//! The owning controller: scene, camera, view mode and display flags.

use glam::{Vec2, Vec3};
use orrery_input::{Command, PointerEvent};
use orrery_render::{Camera, SceneRenderer, ViewportSize};
use orrery_scene::{BodyFacts, BodyId, BuildOptions, Scene, SolarScene, TextureSource, build_scene};
use tracing::{debug, info};

use crate::camera::{CameraController, OVERVIEW_EYE};
use crate::input::{InputRouter, PointerAction};
use crate::mode::ViewMode;
use crate::picking::pick_body;
use crate::settings::ViewSettings;

/// Extra yaw of the cloud shell over the globe.
pub const CLOUD_PARALLAX: f32 = 0.0005;
/// Spin of each orbiting body per tick while orbits animate.
pub const SELF_ROTATION_STEP: f32 = 0.01;
/// Spin of the star per tick in the solar-system modes.
pub const STAR_SPIN_STEP: f32 = -0.0005;

/// Everything the viewer mutates, behind one set of methods.
///
/// Exactly one of the Earth group and the solar-system group is visible at
/// any time; every transition flips both together.
pub struct Orrery {
    solar: SolarScene,
    textures: Box<dyn TextureSource>,
    camera: CameraController,
    mode: ViewMode,
    input: InputRouter,
    settings: ViewSettings,
    viewport: ViewportSize,
    auto_rotate: bool,
    orbiting: bool,
    clouds_enabled: bool,
    selected: Option<BodyId>,
}

impl Orrery {
    /// Build the scene, issuing every texture request, and start in the
    /// Earth view.
    pub fn new(
        options: &BuildOptions,
        mut textures: Box<dyn TextureSource>,
        settings: ViewSettings,
        viewport: ViewportSize,
    ) -> Self {
        let solar = build_scene(options, textures.as_mut());
        let camera = Camera::perspective(
            settings.fov_degrees.to_radians(),
            viewport.aspect_ratio(),
            settings.near,
            settings.far,
        );
        Self {
            solar,
            textures,
            camera: CameraController::new(camera),
            mode: ViewMode::EarthFocus,
            input: InputRouter::new(settings.click_slop_px),
            settings,
            viewport,
            auto_rotate: true,
            orbiting: true,
            clouds_enabled: true,
            selected: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn solar(&self) -> &SolarScene {
        &self.solar
    }

    /// Direct access to bodies and nodes, e.g. to retune orbit speeds.
    pub fn solar_mut(&mut self) -> &mut SolarScene {
        &mut self.solar
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.solar.scene
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.camera.camera()
    }

    #[must_use]
    pub fn camera_controller(&self) -> &CameraController {
        &self.camera
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    #[must_use]
    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    #[must_use]
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    #[must_use]
    pub fn clouds_enabled(&self) -> bool {
        self.clouds_enabled
    }

    #[must_use]
    pub fn stars_visible(&self) -> bool {
        self.solar.scene.node(self.solar.handles.starfield).visible
    }

    /// Globe and clouds are shown.
    #[must_use]
    pub fn earth_visible(&self) -> bool {
        self.solar.scene.node(self.solar.handles.earth_group).visible
    }

    /// Bodies, rings and orbit paths are shown.
    #[must_use]
    pub fn solar_visible(&self) -> bool {
        self.solar.scene.node(self.solar.handles.solar_group).visible
    }

    #[must_use]
    pub fn selected_body(&self) -> Option<BodyId> {
        self.selected
    }

    /// Facts for the info panel, if a body is selected.
    #[must_use]
    pub fn selected_facts(&self) -> Option<&'static BodyFacts> {
        self.selected.map(BodyId::facts)
    }

    pub fn close_info(&mut self) {
        self.selected = None;
    }

    /// Zoom level for display, 0 to 100.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.camera.zoom_percent(self.mode.zoom_range()).round() as u32
    }

    /// Pause or resume what moves in the current view: orbits in the
    /// solar-system modes, idle spin in the Earth view.
    pub fn toggle_rotation(&mut self) {
        if self.mode.is_solar() {
            self.orbiting = !self.orbiting;
        } else {
            self.auto_rotate = !self.auto_rotate;
        }
    }

    pub fn toggle_orbits(&mut self) {
        self.orbiting = !self.orbiting;
    }

    pub fn toggle_stars(&mut self) {
        let starfield = self.solar.handles.starfield;
        let visible = !self.solar.scene.node(starfield).visible;
        self.solar.scene.set_visible(starfield, visible);
    }

    pub fn toggle_clouds(&mut self) {
        self.clouds_enabled = !self.clouds_enabled;
        self.solar
            .scene
            .set_visible(self.solar.handles.clouds, self.clouds_enabled);
    }

    pub fn toggle_solar_system_view(&mut self) {
        if self.mode.is_solar() {
            self.return_to_earth();
        } else {
            self.enter_overview();
        }
    }

    /// Focus `id` and show its facts. Earth means the Earth view: from the
    /// solar-system modes this switches back, in the Earth view it re-centers.
    pub fn view_body(&mut self, id: BodyId) {
        match (self.mode, id) {
            (ViewMode::EarthFocus, BodyId::Earth) => self.reset_view(),
            (_, BodyId::Earth) => self.return_to_earth(),
            _ => {
                if !self.mode.is_solar() {
                    self.enter_overview();
                }
                let target = self.solar.body_position(id);
                let offset = id.spec().radius * 3.0 + 5.0;
                let eye = Vec3::new(target.x, offset * 0.5, target.z + offset);
                self.camera.place(eye, target);
                self.orbiting = false;
                self.mode = ViewMode::PlanetFocus(id);
            }
        }
        self.selected = Some(id);
        info!(body = %id, mode = %self.mode, "body selected");
    }

    pub fn zoom_in(&mut self) {
        self.camera.dolly(-self.mode.zoom_step(), !self.mode.is_solar());
    }

    pub fn zoom_out(&mut self) {
        self.camera.dolly(self.mode.zoom_step(), !self.mode.is_solar());
    }

    /// Back to the Earth view baseline: default camera pose looking at the
    /// origin, rotation targets cleared and orbits running. From the
    /// solar-system modes this is the same as toggling back to the Earth view.
    pub fn reset_view(&mut self) {
        if self.mode.is_solar() {
            self.return_to_earth();
            return;
        }
        self.reset_earth_camera();
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let Some(action) = self.input.handle(event) else {
            return;
        };
        match action {
            PointerAction::Rotate(delta) => self
                .camera
                .rotate_target(delta * self.settings.rotate_sensitivity),
            PointerAction::Pan(delta) => self.camera.pan(delta, self.settings.pan_sensitivity),
            PointerAction::Zoom(delta_y) => {
                let travel = delta_y * self.settings.wheel_sensitivity * self.mode.wheel_scale();
                self.camera.dolly(travel, !self.mode.is_solar());
            }
            PointerAction::Click(position) => self.click(position),
        }
    }

    /// Drop any drag in progress.
    pub fn cancel_pointer(&mut self) {
        self.input.cancel();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = ViewportSize::new(width, height);
        self.camera
            .set_viewport(self.viewport.width as f32, self.viewport.height as f32);
    }

    /// Apply finished texture loads. Returns how many nodes were upgraded.
    pub fn poll_textures(&mut self) -> usize {
        let events = self.textures.poll();
        if events.is_empty() {
            return 0;
        }
        self.solar.apply_texture_events(events)
    }

    pub fn execute(&mut self, command: Command) {
        debug!(?command, "command");
        match command {
            Command::ToggleRotation => self.toggle_rotation(),
            Command::ToggleOrbits => self.toggle_orbits(),
            Command::ToggleStars => self.toggle_stars(),
            Command::ToggleClouds => self.toggle_clouds(),
            Command::ToggleSolarSystem => self.toggle_solar_system_view(),
            Command::ResetView => self.reset_view(),
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::ViewBody(index) => {
                if let Some(id) = BodyId::from_index(index) {
                    self.view_body(id);
                }
            }
            Command::CloseInfo => self.close_info(),
        }
    }

    /// Advance the animation by one tick.
    pub fn advance(&mut self) {
        if self.mode.is_solar() {
            self.advance_orbits();
        } else {
            self.advance_globe();
        }
    }

    /// Upload newly loaded textures, then draw. Pixel data leaves the scene
    /// here.
    pub fn draw<R: SceneRenderer>(&mut self, renderer: &mut R) -> Result<(), R::Error> {
        for (key, image) in self.solar.scene.take_staged_textures() {
            renderer.upload_texture(&key, &image);
        }
        renderer.draw(&self.solar.scene, self.camera.camera())
    }

    /// Poll textures, advance one tick and draw.
    pub fn tick<R: SceneRenderer>(&mut self, renderer: &mut R) -> Result<(), R::Error> {
        self.poll_textures();
        self.advance();
        self.draw(renderer)
    }

    fn enter_overview(&mut self) {
        self.show_solar_system(true);
        self.camera.place(OVERVIEW_EYE, Vec3::ZERO);
        self.orbiting = true;
        self.mode = ViewMode::SolarSystemOverview;
        debug!("entered solar system overview");
    }

    fn return_to_earth(&mut self) {
        self.show_solar_system(false);
        self.camera.reset_rotation();
        self.mode = ViewMode::EarthFocus;
        self.reset_earth_camera();
        debug!("returned to earth view");
    }

    fn reset_earth_camera(&mut self) {
        self.camera.reset_target_rotation();
        self.camera.place(crate::camera::DEFAULT_EYE, Vec3::ZERO);
        self.orbiting = true;
    }

    fn show_solar_system(&mut self, solar: bool) {
        let handles = self.solar.handles;
        self.solar.scene.set_visible(handles.solar_group, solar);
        self.solar.scene.set_visible(handles.earth_group, !solar);
    }

    fn click(&mut self, position: Vec2) {
        if !self.mode.is_solar() {
            return;
        }
        let ray = self
            .camera
            .camera()
            .ray_through_ndc(self.viewport.to_ndc(position));
        if let Some(id) = pick_body(&self.solar, &ray) {
            self.view_body(id);
        }
    }

    fn advance_orbits(&mut self) {
        if self.orbiting {
            for id in BodyId::ALL {
                let body = self.solar.body_mut(id);
                if !body.orbits() {
                    continue;
                }
                body.angle += f64::from(body.orbit_speed);
                let (node, position) = (body.node, body.orbit_position());
                let transform = &mut self.solar.scene.node_mut(node).transform;
                transform.translation = position;
                transform.rotation.y += SELF_ROTATION_STEP;
            }
        }
        let sun = self.solar.body(BodyId::Sun).node;
        self.solar.scene.node_mut(sun).transform.rotation.y += STAR_SPIN_STEP;
    }

    fn advance_globe(&mut self) {
        self.camera.smooth();
        let rotation = self.camera.rotation();
        let handles = self.solar.handles;
        self.solar.scene.node_mut(handles.globe).transform.rotation =
            Vec3::new(rotation.x, rotation.y, 0.0);
        if self.clouds_enabled {
            self.solar.scene.node_mut(handles.clouds).transform.rotation =
                Vec3::new(rotation.x, rotation.y + CLOUD_PARALLAX, 0.0);
        }
        if self.auto_rotate && !self.input.is_dragging() {
            self.camera.auto_rotate();
        }
    }
}
