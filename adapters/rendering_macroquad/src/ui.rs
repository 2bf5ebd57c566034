//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter
//! stays agnostic of Macroquad's UI types. The control bar currently holds a
//! single button whose label follows the session lifecycle.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use snake_game_rendering::ControlLabel;

/// Layout and data for the control bar during the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlBarUiContext {
    /// Top-left corner of the bar in screen coordinates.
    pub origin: Vec2,
    /// Bar dimensions in screen space.
    pub size: Vec2,
    /// Background color applied to the window skin so the UI matches the
    /// adapter's solid rectangle.
    pub background: Color,
    /// Label the session asked the backend to render on the button.
    pub label: ControlLabel,
}

/// Renders the control bar and reports whether its button was pressed.
pub(crate) fn draw_control_bar_ui(ui: &mut Ui, context: ControlBarUiContext) -> bool {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(8.0, 8.0, 8.0, 8.0))
        .build();
    skin.window_style = window_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .margin(RectOffset::new(12.0, 12.0, 4.0, 4.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut button_pressed = false;
    let _ = ui.window(hash!("control_bar"), context.origin, context.size, |ui| {
        button_pressed = ui.button(None, context.label.text());
    });

    ui.pop_skin();

    button_pressed
}
