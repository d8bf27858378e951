use crate::error::MenuError;
use crate::geometry::ThirdQuadrant;
use crate::gesture::DeltaMode;
use crate::state::DivisionCount;
use serde::{Deserialize, Serialize};

/// Tunables of one circle menu, as read from configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuSettings {
    pub divisions: u32,
    pub initial_top: Option<usize>,
    pub snap: bool,
    pub delta_mode: DeltaMode,
    pub third_quadrant: ThirdQuadrant,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            divisions: 4,
            initial_top: None,
            snap: true,
            delta_mode: DeltaMode::Raw,
            third_quadrant: ThirdQuadrant::Reflected,
        }
    }
}

impl MenuSettings {
    pub fn division_count(&self) -> Result<DivisionCount, MenuError> {
        DivisionCount::new(self.divisions)
    }
}
