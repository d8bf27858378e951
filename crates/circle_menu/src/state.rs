use crate::error::MenuError;
use derive_more::{Deref, Display, Into};

/// Number of sectors the circle is split into.
///
/// Counts that do not divide 360 are accepted; the sector angle is truncated and the
/// remainder is absorbed by the last sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deref, Into)]
pub struct DivisionCount(u32);

impl DivisionCount {
    pub const MAX: u32 = 360;

    pub fn new(count: u32) -> Result<Self, MenuError> {
        if (1..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(MenuError::InvalidDivisionCount(count))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Width of one sector in whole degrees.
    pub fn sector_angle(self) -> u32 {
        360 / self.0
    }
}

impl TryFrom<u32> for DivisionCount {
    type Error = MenuError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

#[derive(Debug, Clone)]
pub struct RotationState {
    division_count: DivisionCount,
    division_angle: u32,
    top_division: usize,
    accumulated_rotation: f64,
    selected_index: usize,
    snap_enabled: bool,
}

impl RotationState {
    pub fn new(divisions: DivisionCount) -> Self {
        let division_angle = divisions.sector_angle();
        Self {
            division_count: divisions,
            division_angle,
            top_division: 0,
            accumulated_rotation: -((division_angle / 2) as f64),
            selected_index: 0,
            snap_enabled: true,
        }
    }

    /// Starts the circle over with sector 0 centered on angle 0.
    pub fn set_division_count(&mut self, divisions: DivisionCount) {
        self.division_count = divisions;
        self.division_angle = divisions.sector_angle();
        self.top_division = 0;
        self.accumulated_rotation = -self.half_angle();
        self.selected_index = 0;
    }

    /// Out-of-range indices are ignored.
    pub fn set_alternate_top(&mut self, index: usize) {
        if index >= self.sector_count() {
            log::debug!(
                "Ignoring top division {} for {} divisions",
                index,
                self.division_count
            );
            return;
        }
        self.top_division = index;
        self.selected_index = index;
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
    }

    pub fn apply_rotation_delta(&mut self, degrees: f64) {
        self.accumulated_rotation += degrees;
    }

    pub(crate) fn restore_rotation(&mut self, degrees: f64) {
        self.accumulated_rotation = degrees;
    }

    /// Converts the accumulated rotation into whole sectors and moves the top accordingly.
    ///
    /// Leaves the residual offset inside the new top sector in the accumulator. With snapping
    /// enabled the residual is replaced by the sector center and the correction the visual
    /// must still rotate by is returned.
    pub fn settle(&mut self) -> Option<f64> {
        let angle = self.division_angle as f64;
        let count = self.sector_count() as i64;

        let mut total = self.accumulated_rotation % 360.0;
        if total < 0.0 {
            total += 360.0;
        }

        let crossed = (total / angle).floor() as i64;
        self.top_division = (count + self.top_division as i64 - crossed).rem_euclid(count) as usize;
        self.accumulated_rotation = total % angle;

        let leftover = self.snap_enabled.then(|| {
            let leftover = self.half_angle() - self.accumulated_rotation;
            self.accumulated_rotation = self.half_angle();
            leftover
        });

        self.selected_index = match self.top_division {
            0 => self.sector_count() - 1,
            top => top - 1,
        };

        leftover
    }

    pub fn division_count(&self) -> DivisionCount {
        self.division_count
    }

    pub fn division_angle(&self) -> u32 {
        self.division_angle
    }

    /// Half a sector, truncated to whole degrees.
    pub fn half_angle(&self) -> f64 {
        (self.division_angle / 2) as f64
    }

    pub fn top_division(&self) -> usize {
        self.top_division
    }

    pub fn accumulated_rotation(&self) -> f64 {
        self.accumulated_rotation
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    fn sector_count(&self) -> usize {
        self.division_count.get() as usize
    }
}
