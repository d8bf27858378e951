use crate::geometry::{Point, Size};
use crate::gesture::GestureOutcome;

/// Placement of the circle image on the host surface.
///
/// The image is scaled to the shorter side of the viewport, centered, then rotated about the
/// viewport center. Positive rotation is clockwise on screen (y down), matching the sign of
/// the deltas produced by the gesture controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    center: Point,
    offset: Point,
    scale_x: f64,
    scale_y: f64,
    rotation: f64,
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self {
            center: Point::default(),
            offset: Point::default(),
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl VisualTransform {
    /// Fits an image into the viewport. Safe to call again when the image is replaced; the
    /// rotation shown so far is kept.
    pub fn fit(&mut self, image: Size, viewport: Size) {
        if !(image.width > 0.0 && image.height > 0.0) {
            log::warn!("Refusing to fit an empty image ({:?})", image);
            return;
        }
        let side = viewport.width.min(viewport.height);
        self.scale_x = side / image.width;
        self.scale_y = side / image.height;

        let scaled = Size::new(image.width * self.scale_x, image.height * self.scale_y);
        self.offset = Point::new(
            viewport.width / 2.0 - scaled.width / 2.0,
            viewport.height / 2.0 - scaled.height / 2.0,
        );
        self.center = viewport.center();
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
    }

    pub fn apply(&mut self, outcome: &GestureOutcome) {
        if let Some(degrees) = outcome.rotation {
            self.rotate(degrees);
        }
    }

    /// Maps a point of the unscaled image onto the viewport.
    pub fn map_point(&self, image_point: Point) -> Point {
        let x = self.offset.x + image_point.x * self.scale_x - self.center.x;
        let y = self.offset.y + image_point.y * self.scale_y - self.center.y;
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Point::new(
            self.center.x + x * cos - y * sin,
            self.center.y + x * sin + y * cos,
        )
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    #[test]
    fn test_fit_scales_to_short_side_and_centers() {
        let mut t = VisualTransform::default();
        t.fit(Size::new(500.0, 250.0), Size::new(300.0, 200.0));

        assert_eq!(t.scale(), (0.4, 0.8));
        assert_point(t.offset(), 50.0, 0.0);
        assert_point(t.center(), 150.0, 100.0);
        assert_point(t.map_point(Point::new(0.0, 0.0)), 50.0, 0.0);
        assert_point(t.map_point(Point::new(500.0, 250.0)), 250.0, 200.0);
    }

    #[test]
    fn test_rotation_is_clockwise_about_center() {
        let mut t = VisualTransform::default();
        t.fit(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
        t.rotate(90.0);

        // top middle of the image swings to the right edge
        assert_point(t.map_point(Point::new(50.0, 0.0)), 100.0, 50.0);
        assert_point(t.map_point(Point::new(50.0, 50.0)), 50.0, 50.0);
    }

    #[test]
    fn test_refit_keeps_rotation() {
        let mut t = VisualTransform::default();
        t.fit(Size::new(100.0, 100.0), Size::new(200.0, 200.0));
        t.apply(&GestureOutcome {
            rotation: Some(-30.0),
            event: None,
        });
        t.fit(Size::new(400.0, 400.0), Size::new(200.0, 200.0));

        assert_eq!(t.rotation(), 330.0);
        assert_eq!(t.scale(), (0.5, 0.5));
    }

    #[test]
    fn test_set_rotation_normalizes() {
        let mut t = VisualTransform::default();
        t.set_rotation(-90.0);
        assert_eq!(t.rotation(), 270.0);
        t.rotate(450.0);
        assert_eq!(t.rotation(), 0.0);
    }

    #[test]
    fn test_empty_image_is_ignored() {
        let mut t = VisualTransform::default();
        t.fit(Size::new(0.0, 100.0), Size::new(200.0, 200.0));

        assert_eq!(t, VisualTransform::default());
    }
}
