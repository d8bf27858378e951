use super::WHEEL_SIZE;
use crate::config::ImagePath;
use circle_menu::{DivisionCount, GestureOutcome, Size, VisualTransform};
use gdk_pixbuf::Pixbuf;

/// Everything the draw function needs, shared between the component and GTK's draw callback.
pub struct Scene {
    pub transform: VisualTransform,
    pub image: Option<Pixbuf>,
    pub viewport: Option<Size>,
    pub divisions: DivisionCount,
    pub selected: usize,
}

impl Scene {
    pub fn new(divisions: DivisionCount, selected: usize) -> Self {
        let mut scene = Self {
            transform: VisualTransform::default(),
            image: None,
            viewport: None,
            divisions,
            selected,
        };
        scene.reset(divisions, selected);
        scene
    }

    pub fn load_image(path: &ImagePath) -> Option<Pixbuf> {
        Pixbuf::from_file(path.as_path())
            .inspect_err(|e| log::warn!("Failed to load circle image '{}': {}", path, e))
            .ok()
    }

    /// Turns the circle so the selected sector sits on top.
    pub fn reset(&mut self, divisions: DivisionCount, selected: usize) {
        self.divisions = divisions;
        self.selected = selected;
        self.transform
            .set_rotation(-((selected as u32 * divisions.sector_angle()) as f64));
    }

    pub fn image_size(&self) -> Size {
        self.image
            .as_ref()
            .map(|p| Size::new(p.width() as f64, p.height() as f64))
            .unwrap_or(Size::new(WHEEL_SIZE, WHEEL_SIZE))
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
        self.refit();
    }

    pub fn set_image(&mut self, image: Option<Pixbuf>) {
        self.image = image;
        self.refit();
    }

    pub fn apply(&mut self, outcome: &GestureOutcome) -> bool {
        self.transform.apply(outcome);
        outcome.rotation.is_some()
    }

    fn refit(&mut self) {
        if let Some(viewport) = self.viewport {
            let image = self.image_size();
            self.transform.fit(image, viewport);
        }
    }
}
