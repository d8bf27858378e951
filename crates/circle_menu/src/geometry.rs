use crate::state::DivisionCount;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// The circle is assumed to fill the view vertically.
    pub fn radius(&self) -> f64 {
        self.height / 2.0
    }

    /// Moves a view-space point (origin top-left, y down) into a frame centered on the view
    /// with the y axis pointing up.
    pub fn recenter(&self, point: Point) -> Point {
        Point::new(
            point.x - self.width / 2.0,
            self.height - point.y - self.height / 2.0,
        )
    }
}

/// Dimensions of the host surface, captured once.
///
/// The host may report its size many times during layout; only the first report with real
/// (non-zero) dimensions is kept. Later resizes are not supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    size: Size,
    known: bool,
}

impl Viewport {
    /// Returns `true` if this report initialized the viewport.
    pub fn report(&mut self, width: f64, height: f64) -> bool {
        if self.known {
            log::debug!("Ignoring viewport resize to {}x{}", width, height);
            return false;
        }
        // also rejects NaN
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.size = Size::new(width, height);
        self.known = true;
        true
    }

    pub fn is_known(&self) -> bool {
        self.known
    }

    pub fn size(&self) -> Option<Size> {
        self.known.then_some(self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    /// Classifies a recentered point. Points on an axis belong to the quadrant on the
    /// non-negative side; the exact origin has no quadrant.
    pub fn classify(point: Point) -> Option<Self> {
        if point.x == 0.0 && point.y == 0.0 {
            return None;
        }
        Some(match (point.x >= 0.0, point.y >= 0.0) {
            (true, true) => Self::First,
            (false, true) => Self::Second,
            (false, false) => Self::Third,
            (true, false) => Self::Fourth,
        })
    }
}

/// Reduction used for points in the third quadrant.
///
/// `Reflected` shares the second quadrant's `180 - asin` expression and is the historical
/// behavior of the widget. `Direct` uses `180 + asin` and must be opted into.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ThirdQuadrant {
    #[default]
    #[strum(serialize = "reflected")]
    Reflected,
    #[strum(serialize = "direct")]
    Direct,
}

/// Angle of a view-space point around the view center, in degrees within `[0, 360)`.
///
/// Zero points right, angles grow counter-clockwise. The exact center maps to 0.
pub fn angle_of_point(point: Point, size: Size, third: ThirdQuadrant) -> f64 {
    let p = size.recenter(point);
    let Some(quadrant) = Quadrant::classify(p) else {
        return 0.0;
    };

    let raw = (p.y / p.x.hypot(p.y)).asin().to_degrees();
    let angle = match quadrant {
        Quadrant::First => raw,
        Quadrant::Second => 180.0 - raw,
        Quadrant::Third => match third {
            ThirdQuadrant::Reflected => 180.0 + (-raw),
            ThirdQuadrant::Direct => 180.0 + raw,
        },
        Quadrant::Fourth => 360.0 + raw,
    };

    // 360 + a tiny negative asin rounds up to 360 just below the axis
    if angle.is_finite() && angle < 360.0 {
        angle
    } else {
        0.0
    }
}

/// Tests whether a view-space point lies in the wedge of the topmost sector.
///
/// The wedge opens upward from the center with a half-width of half a sector. Its mirror
/// below the center is accepted on the right-hand side only.
pub fn is_in_top_region(point: Point, size: Size, divisions: DivisionCount) -> bool {
    let p = size.recenter(point);
    let half_angle = divisions.sector_angle() as f64 / 2.0;
    let max_abs_x = p.y.abs() * half_angle.to_radians().tan();

    let outside = p.y.abs() > size.radius() || p.x.abs() > max_abs_x || (p.x < 0.0 && p.y < 0.0);
    !outside
}

/// Wraps a rotation delta to the shortest signed distance, in `(-180, 180]`.
///
/// Non-finite input yields 0 so a bad sample cannot poison the accumulated rotation.
pub fn shortest_delta(delta: f64) -> f64 {
    if !delta.is_finite() {
        return 0.0;
    }
    let wrapped = delta.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
