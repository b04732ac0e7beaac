pub mod constants;
pub mod curve;
pub mod demo;
pub mod error;
pub mod geo;
pub mod overlay;
pub mod registry;
pub mod state;
pub mod tween;

pub static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");

pub use constants::*;
pub use curve::{sample, CubicBezier};
pub use demo::{DemoConfig, DemoDriver};
pub use error::OverlayError;
pub use geo::{project, GeoCoordinate};
pub use overlay::*;
pub use state::*;
