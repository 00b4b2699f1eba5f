use super::model::{ItemGeometry, WheelView};
use super::{
    CENTER_CIRCLE_RADIUS, FONT_SIZE, ITEM_IDLE_ALPHA, ITEM_RADIUS, MARKER_RADIUS, NEEDLE_LENGTH,
    NEEDLE_WIDTH, RING_RADIUS,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::{Srgb, Srgba, WithAlpha};
use rotary::Item;
use rotary::angle::polar;
use std::f64::consts::PI;
use std::iter::zip;

struct ItemRenderer<'a> {
    item: &'a Item,
    geometry: &'a ItemGeometry,
    color: Srgb<f64>,
    state: ItemState,
}

impl<'a> ItemRenderer<'a> {
    fn new(
        item: &'a Item,
        geometry: &'a ItemGeometry,
        color: Srgb<f64>,
        state: ItemState,
    ) -> Self {
        Self {
            item,
            geometry,
            color,
            state,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr, colors)?;
        self.draw_label(cr, colors)
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = self.state.fill(self.color).into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.arc(
            self.geometry.center.x,
            self.geometry.center.y,
            self.geometry.radius,
            0.0,
            2.0 * PI,
        );
        cr.fill()?;

        if self.state == ItemState::Selected {
            let (r, g, b, a) = colors.selected.into_components();
            cr.set_source_rgba(r, g, b, a);
            cr.set_line_width(4.0 * self.geometry.scale);
            cr.arc(
                self.geometry.center.x,
                self.geometry.center.y,
                self.geometry.radius,
                0.0,
                2.0 * PI,
            );
            cr.stroke()?;
        }
        Ok(())
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.text.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(FONT_SIZE * self.geometry.radius / ITEM_RADIUS);
        let text = self.item.label.as_str();
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(
                self.geometry.center.x - ext.width() / 2.0 - ext.x_bearing(),
                self.geometry.center.y - ext.height() / 2.0 - ext.y_bearing(),
            );
            cr.show_text(text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemState {
    Selected,
    Idle,
}

impl ItemState {
    fn fill(&self, color: Srgb<f64>) -> Srgba<f64> {
        match self {
            Self::Selected => color.with_alpha(1.0),
            Self::Idle => color.with_alpha(ITEM_IDLE_ALPHA),
        }
    }
}

pub fn draw(cr: &Context, view: &WheelView, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let selected = view.selected_index();

    let slots = zip(zip(&view.items, &view.geometries), &view.colors);
    for (i, ((item, geometry), color)) in slots.enumerate() {
        let state = if selected == Some(i) {
            ItemState::Selected
        } else {
            ItemState::Idle
        };
        ItemRenderer::new(item, geometry, *color, state).draw(cr, colors)?;
    }

    draw_reference_marker(cr, view, colors)?;
    draw_needle(cr, view, colors)?;
    draw_center_circle(cr, view, colors)
}

/// Small dot just outside the ring where the selection is read.
fn draw_reference_marker(
    cr: &Context,
    view: &WheelView,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let outer = (RING_RADIUS + ITEM_RADIUS * 1.8) * view.scale_factor;
    let at = polar(view.center, outer, view.reference_offset, view.rotation_offset);
    let (r, g, b, a) = colors.needle.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.arc(at.x, at.y, MARKER_RADIUS * view.scale_factor, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_needle(cr: &Context, view: &WheelView, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let tip = view.needle_tip(NEEDLE_LENGTH);
    let (r, g, b, a) = colors.needle.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(NEEDLE_WIDTH * view.scale_factor);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.move_to(view.center.x, view.center.y);
    cr.line_to(tip.x, tip.y);
    cr.stroke()
}

fn draw_center_circle(
    cr: &Context,
    view: &WheelView,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.center_circle.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.arc(
        view.center.x,
        view.center.y,
        CENTER_CIRCLE_RADIUS * view.scale_factor,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}
