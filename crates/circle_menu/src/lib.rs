//! Host-independent core of a rotatable circular selection menu.
//!
//! The host owns the drawing surface. It reports its size once, forwards pointer events to a
//! [`GestureController`], applies the returned rotation to the displayed circle (see
//! [`VisualTransform`]) and reacts to the [`MenuEvent`] emitted when a gesture ends.

pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod settings;
pub mod state;
pub mod transform;

pub use error::MenuError;
pub use events::{MenuEvent, MenuListener};
pub use geometry::{Point, Size, ThirdQuadrant};
pub use gesture::{DeltaMode, GestureController, GestureOutcome};
pub use settings::MenuSettings;
pub use state::{DivisionCount, RotationState};
pub use transform::VisualTransform;
