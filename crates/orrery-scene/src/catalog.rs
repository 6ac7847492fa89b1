//! The nine bodies shown in the solar-system view and their orbital and
//! visual parameters.
//!
//! Distances and radii are display units, not astronomical ones: the sun sits
//! at the origin with radius 4 and Neptune orbits at 52. Angular speeds are
//! radians per tick.

use std::fmt;
use std::str::FromStr;

/// 24-bit sRGB color as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFF_FF_FF);
    pub const BLACK: Rgb = Rgb(0x00_00_00);

    /// Channels in `[0, 1]`, still sRGB encoded.
    #[must_use]
    pub fn to_srgb(self) -> [f32; 3] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    /// Channels converted to linear light.
    #[must_use]
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb().map(srgb_to_linear)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown body `{0}`")]
pub struct ParseBodyError(pub String);

impl BodyId {
    /// All bodies, sun first, then planets outward.
    pub const ALL: [BodyId; 9] = [
        BodyId::Sun,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Uranus,
        BodyId::Neptune,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Position in [`BodyId::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn spec(self) -> &'static BodySpec {
        &CATALOG[self.index()]
    }

    #[must_use]
    pub fn is_star(self) -> bool {
        self.spec().kind == BodyKind::Star
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyId {
    type Err = ParseBodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseBodyError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Unlit, glows, does not orbit.
    Star,
    Planet,
}

/// A flat ring around a body, radii relative to the body radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub inner_scale: f32,
    pub outer_scale: f32,
    pub segments: u32,
    pub color: Rgb,
    pub opacity: f32,
    pub texture: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub id: BodyId,
    pub name: &'static str,
    pub kind: BodyKind,
    /// Orbit radius around the origin.
    pub distance: f32,
    /// Sphere radius.
    pub radius: f32,
    /// Flat color shown until (or instead of) the texture.
    pub color: Rgb,
    /// Radians per tick; zero for bodies that do not orbit.
    pub orbit_speed: f32,
    /// Texture file name, resolved by the texture source.
    pub texture: &'static str,
    pub ring: Option<RingSpec>,
}

/// Day-side texture for the close-up globe.
pub const EARTH_DAY_TEXTURE: &str = "2k_earth_daymap.jpg";
/// Cloud layer texture for the close-up globe.
pub const EARTH_CLOUD_TEXTURE: &str = "2k_earth_clouds.jpg";

/// Glow shell around the star: radius multiplier, color and opacity.
pub const STAR_GLOW_SCALE: f32 = 1.2;
pub const STAR_GLOW_COLOR: Rgb = Rgb(0xFD_B8_13);
pub const STAR_GLOW_OPACITY: f32 = 0.3;

/// Orbit path markers: half-width, segments, color and opacity.
pub const ORBIT_PATH_HALF_WIDTH: f32 = 0.1;
pub const ORBIT_PATH_SEGMENTS: u32 = 128;
pub const ORBIT_PATH_COLOR: Rgb = Rgb(0x44_44_44);
pub const ORBIT_PATH_OPACITY: f32 = 0.2;

pub static CATALOG: [BodySpec; 9] = [
    BodySpec {
        id: BodyId::Sun,
        name: "sun",
        kind: BodyKind::Star,
        distance: 0.0,
        radius: 4.0,
        color: Rgb(0xFD_B8_13),
        orbit_speed: 0.0,
        texture: "8k_sun.jpg",
        ring: None,
    },
    BodySpec {
        id: BodyId::Mercury,
        name: "mercury",
        kind: BodyKind::Planet,
        distance: 8.0,
        radius: 0.4,
        color: Rgb(0x8C_78_53),
        orbit_speed: 0.04,
        texture: "2k_mercury.jpg",
        ring: None,
    },
    BodySpec {
        id: BodyId::Venus,
        name: "venus",
        kind: BodyKind::Planet,
        distance: 11.0,
        radius: 0.9,
        color: Rgb(0xFF_C6_49),
        orbit_speed: 0.015,
        texture: "2k_venus_surface.jpg",
        ring: None,
    },
    BodySpec {
        id: BodyId::Earth,
        name: "earth",
        kind: BodyKind::Planet,
        distance: 15.0,
        radius: 1.0,
        color: Rgb(0x41_69_E1),
        orbit_speed: 0.01,
        texture: EARTH_DAY_TEXTURE,
        ring: None,
    },
    BodySpec {
        id: BodyId::Mars,
        name: "mars",
        kind: BodyKind::Planet,
        distance: 19.0,
        radius: 0.5,
        color: Rgb(0xCD_5C_5C),
        orbit_speed: 0.008,
        texture: "2k_mars.jpg",
        ring: None,
    },
    BodySpec {
        id: BodyId::Jupiter,
        name: "jupiter",
        kind: BodyKind::Planet,
        distance: 28.0,
        radius: 2.5,
        color: Rgb(0xDA_A5_20),
        orbit_speed: 0.002,
        texture: "2k_jupiter.jpg",
        ring: None,
    },
    BodySpec {
        id: BodyId::Saturn,
        name: "saturn",
        kind: BodyKind::Planet,
        distance: 37.0,
        radius: 2.2,
        color: Rgb(0xF4_A4_60),
        orbit_speed: 0.0009,
        texture: "2k_saturn.jpg",
        ring: Some(RingSpec {
            inner_scale: 1.2,
            outer_scale: 2.0,
            segments: 64,
            color: Rgb(0xC9_A8_6A),
            opacity: 0.8,
            texture: "2k_saturn_ring_alpha.png",
        }),
    },
    BodySpec {
        id: BodyId::Uranus,
        name: "uranus",
        kind: BodyKind::Planet,
        distance: 45.0,
        radius: 1.5,
        color: Rgb(0x4F_D0_E0),
        orbit_speed: 0.0004,
        texture: "2k_uranus.jpg",
        ring: None,
    },
    BodySpec {
        id: BodyId::Neptune,
        name: "neptune",
        kind: BodyKind::Planet,
        distance: 52.0,
        radius: 1.4,
        color: Rgb(0x41_69_E1),
        orbit_speed: 0.0001,
        texture: "2k_neptune.jpg",
        ring: None,
    },
];
