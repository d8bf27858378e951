use std::f64::consts::PI;

pub mod model;
pub mod view;

pub use model::Scene;
pub use view::draw;

/// Side of the square the numbered wheel is drawn in when no image is configured.
pub const WHEEL_SIZE: f64 = 512.0;
pub const WHEEL_LABEL_RADIUS: f64 = 0.65; // relative to wheel radius
pub const WHEEL_FONT_SIZE: f64 = 48.0;
pub const MARKER_SIZE: f64 = 14.0;
/// Sector 0 is centered straight up; indices grow clockwise.
pub const START_OFFSET: f64 = -PI / 2.0;
