//! Scene content for the orrery viewer: the body catalog, descriptive facts,
//! the CPU-side scene graph, the scene builder and asynchronous texture
//! loading.
//!
//! Nothing here touches the GPU. A renderer reads the [`Scene`] each frame;
//! the view layer mutates transforms and visibility through it.

pub mod builder;
pub mod catalog;
pub mod facts;
pub mod graph;
pub mod starfield;
pub mod texture;

pub use builder::{BuildOptions, CelestialBody, SceneHandles, SolarScene, build_scene};
pub use catalog::{BodyId, BodySpec, ParseBodyError, Rgb};
pub use facts::{BodyFacts, FactRow, display_label};
pub use graph::{
    BlendMode, Lighting, Material, Node, NodeId, Primitive, Scene, Transform,
};
pub use starfield::StarfieldGenerator;
pub use texture::{
    DirectoryTextureSource, TextureEvent, TextureImage, TextureLoadError, TextureSource,
};
