//! Window-title HUD and the text info panel.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use orrery_scene::{BodyFacts, BodyId};
use orrery_view::{Orrery, ViewMode};

/// What the title bar shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStatus {
    pub mode: ViewMode,
    pub zoom_percent: u32,
    pub selected: Option<BodyId>,
    pub fps: Option<f32>,
}

impl HudStatus {
    pub fn from_orrery(orrery: &Orrery, fps: Option<f32>) -> Self {
        Self {
            mode: orrery.mode(),
            zoom_percent: orrery.zoom_percent(),
            selected: orrery.selected_body(),
            fps,
        }
    }
}

/// `"<title> | <mode> | Zoom 82%"`, then the selected body and the frame
/// rate when present.
pub fn format_hud(title: &str, status: &HudStatus) -> String {
    let mut hud = format!("{title} | {} | Zoom {}%", status.mode, status.zoom_percent);
    if let Some(body) = status.selected {
        let _ = write!(hud, " | {}", body.facts().title);
    }
    if let Some(fps) = status.fps {
        let _ = write!(hud, " | {fps:.0} fps");
    }
    hud
}

/// Multi-line rendering of a body's facts: the title, then one
/// `Label: value` row per field.
pub fn format_info_panel(facts: &BodyFacts) -> String {
    let mut panel = facts.title.to_string();
    for row in facts.rows() {
        let _ = write!(panel, "\n  {}: {}", row.label, row.value);
    }
    panel
}

/// Frames per second, refreshed once per second.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: Option<f32>,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: None,
        }
    }

    /// Count a presented frame. Returns true when the reading changed.
    pub fn frame(&mut self, now: Instant) -> bool {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Self::WINDOW {
            return false;
        }
        self.fps = Some(self.frames as f32 / elapsed.as_secs_f32());
        self.frames = 0;
        self.window_start = now;
        true
    }

    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(mode: ViewMode) -> HudStatus {
        HudStatus {
            mode,
            zoom_percent: 82,
            selected: None,
            fps: None,
        }
    }

    #[test]
    fn test_hud_shows_mode_and_zoom() {
        assert_eq!(
            format_hud("Orrery", &status(ViewMode::EarthFocus)),
            "Orrery | Earth | Zoom 82%"
        );
        assert_eq!(
            format_hud("Orrery", &status(ViewMode::SolarSystemOverview)),
            "Orrery | Solar System | Zoom 82%"
        );
    }

    #[test]
    fn test_hud_appends_selection_and_fps() {
        let hud = HudStatus {
            selected: Some(BodyId::Mars),
            fps: Some(59.6),
            ..status(ViewMode::PlanetFocus(BodyId::Mars))
        };
        assert_eq!(
            format_hud("Orrery", &hud),
            "Orrery | Solar System: Mars | Zoom 82% | Mars | 60 fps"
        );
    }

    #[test]
    fn test_info_panel_lists_rows_after_title() {
        let facts = BodyId::Sun.facts();
        let panel = format_info_panel(facts);
        let mut lines = panel.lines();
        assert_eq!(lines.next(), Some("The Sun"));
        assert_eq!(lines.clone().count(), facts.rows().len());
        assert!(panel.ends_with(facts.trivia));
        assert!(panel.contains("\n  Interesting Facts: "));
    }

    #[test]
    fn test_fps_counter_reports_after_a_second() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        for i in 1..60 {
            assert!(!counter.frame(start + Duration::from_millis(i * 16)));
        }
        assert_eq!(counter.fps(), None);
        assert!(counter.frame(start + Duration::from_secs(1)));
        let fps = counter.fps().unwrap();
        assert!((fps - 60.0).abs() < 0.01, "fps {fps}");
    }
}
