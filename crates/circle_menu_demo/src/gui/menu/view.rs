use super::model::Scene;
use super::{MARKER_SIZE, START_OFFSET, WHEEL_FONT_SIZE, WHEEL_LABEL_RADIUS, WHEEL_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use circle_menu::{Size, VisualTransform};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

/// Draws the numbered wheel used when no circle image is configured, in wheel space.
struct WheelRenderer<'a> {
    scene: &'a Scene,
    colors: &'a ThemeColors,
}

impl<'a> WheelRenderer<'a> {
    fn new(scene: &'a Scene, colors: &'a ThemeColors) -> Self {
        Self { scene, colors }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let count = self.scene.divisions.get() as usize;
        for index in 0..count {
            self.draw_sector(cr, index, count)?;
        }
        for index in 0..count {
            self.draw_label(cr, index)?;
        }
        Ok(())
    }

    fn step(&self) -> f64 {
        (self.scene.divisions.sector_angle() as f64).to_radians()
    }

    /// The last sector takes up whatever the truncated sector angle leaves over.
    fn sector_span(&self, index: usize, count: usize) -> (f64, f64) {
        let step = self.step();
        let start = START_OFFSET + (index as f64 - 0.5) * step;
        let end = if index + 1 == count {
            START_OFFSET - 0.5 * step + 2.0 * PI
        } else {
            start + step
        };
        (start, end)
    }

    fn sector_color(&self, index: usize) -> Srgba<f64> {
        if index == self.scene.selected {
            self.colors.selected
        } else if index % 2 == 0 {
            self.colors.sector
        } else {
            self.colors.sector_alt
        }
    }

    fn draw_sector(&self, cr: &Context, index: usize, count: usize) -> Result<(), cairo::Error> {
        let (start, end) = self.sector_span(index, count);
        let c = WHEEL_SIZE / 2.0;

        set_source(cr, self.sector_color(index));
        cr.move_to(c, c);
        cr.arc(c, c, c, start, end);
        cr.close_path();
        cr.fill()
    }

    fn draw_label(&self, cr: &Context, index: usize) -> Result<(), cairo::Error> {
        let c = WHEEL_SIZE / 2.0;
        let angle = START_OFFSET + index as f64 * self.step();
        let (x, y) = (
            c + c * WHEEL_LABEL_RADIUS * angle.cos(),
            c + c * WHEEL_LABEL_RADIUS * angle.sin(),
        );
        let text = index.to_string();

        set_source(cr, self.colors.text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(WHEEL_FONT_SIZE);
        if let Ok(ext) = cr.text_extents(&text) {
            cr.move_to(x - ext.width() / 2.0, y + ext.height() / 2.0);
            cr.show_text(&text)?;
        }
        Ok(())
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Maps image space onto the viewport: scale, center, then rotate about the viewport center.
fn apply_transform(cr: &Context, transform: &VisualTransform) {
    let center = transform.center();
    let offset = transform.offset();
    let (sx, sy) = transform.scale();

    cr.translate(center.x, center.y);
    cr.rotate(transform.rotation().to_radians());
    cr.translate(-center.x, -center.y);
    cr.translate(offset.x, offset.y);
    cr.scale(sx, sy);
}

fn draw_image(cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()
}

/// Small arrow at the top edge pointing at the selected sector.
fn draw_marker(cr: &Context, viewport: Size, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let side = viewport.width.min(viewport.height);
    let x = viewport.width / 2.0;
    let y = viewport.height / 2.0 - side / 2.0;

    set_source(cr, colors.marker);
    cr.move_to(x - MARKER_SIZE, y);
    cr.line_to(x + MARKER_SIZE, y);
    cr.line_to(x, y + MARKER_SIZE * 1.5);
    cr.close_path();
    cr.fill()
}

pub fn draw(cr: &Context, scene: &Scene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let Some(viewport) = scene.viewport else {
        return Ok(());
    };

    cr.save()?;
    apply_transform(cr, &scene.transform);
    match &scene.image {
        Some(pixbuf) => draw_image(cr, pixbuf)?,
        None => WheelRenderer::new(scene, colors).draw(cr)?,
    }
    cr.restore()?;

    draw_marker(cr, viewport, colors)
}
