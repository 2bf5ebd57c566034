#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the Snake game.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The backend replays the retained display list it receives from the frame
//! closure on every display frame, so the window stays responsive even though
//! the simulation repaints only once per tick. All UI-specific calls live in
//! the local `ui` module to avoid leaking Macroquad UI types throughout the
//! adapter.

pub mod input;
mod ui;

use self::input::{resolve_direction, MOVEMENT_KEYS};
use self::ui::{draw_control_bar_ui, ControlBarUiContext};
use anyhow::Result;
use glam::Vec2;
use macroquad::input::{get_last_key_pressed, is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use snake_game_core::Direction;
use snake_game_rendering::{
    DisplayList, DrawOp, FrameInput, FrameOutput, Presentation, RenderingBackend,
};
use std::time::Duration;

/// Height in pixels of the control bar above the play area.
const CONTROL_BAR_HEIGHT: f32 = 48.0;

/// Tracks UI-sourced button presses so they can be merged with physical input
/// on the next frame.
#[derive(Clone, Copy, Debug, Default)]
struct ControlInputState {
    press_latched: bool,
}

impl ControlInputState {
    /// Returns whether the UI button was pressed and clears the latch so the
    /// action fires only once.
    fn take_press(&mut self) -> bool {
        let latched = self.press_latched;
        self.press_latched = false;
        latched
    }

    /// Records that the control button was pressed this frame.
    fn register_press(&mut self) {
        self.press_latched = true;
    }
}

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardSnapshot {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Latest recognized movement key pressed this frame.
    direction: Option<Direction>,
}

impl KeyboardSnapshot {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let direction = resolve_direction(
            get_last_key_pressed(),
            MOVEMENT_KEYS.into_iter().filter(|key| is_key_pressed(*key)),
        );

        Self {
            quit_requested,
            direction,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = if enabled { Some(1) } else { Some(0) };
        self
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut frame: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut DisplayList) -> FrameOutput + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            grid,
        } = presentation;

        let surface_length = grid.surface_length();
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: surface_length.ceil() as i32,
            window_height: (surface_length + CONTROL_BAR_HEIGHT).ceil() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let background = to_macroquad_color(clear_color);
            let mut display_list = DisplayList::new();
            let mut control_input = ControlInputState::default();
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardSnapshot::poll();

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let metrics = SurfaceMetrics::fit(
                    surface_length,
                    screen_width,
                    screen_height,
                    CONTROL_BAR_HEIGHT,
                );

                let frame_input = FrameInput {
                    control_pressed: control_input.take_press(),
                    direction: keyboard.direction,
                    quit_requested: keyboard.quit_requested,
                };

                let output = frame(frame_dt, frame_input, &mut display_list);

                replay_display_list(&display_list, &metrics);

                if let Some(notice) = &output.notice {
                    draw_notice(&notice.text, &metrics, surface_length);
                }

                {
                    let mut control_ui = macroquad::ui::root_ui();
                    let pressed = draw_control_bar_ui(
                        &mut control_ui,
                        ControlBarUiContext {
                            origin: MacroquadVec2::new(0.0, 0.0),
                            size: MacroquadVec2::new(screen_width, CONTROL_BAR_HEIGHT),
                            background,
                            label: output.control,
                        },
                    );
                    if pressed {
                        control_input.register_press();
                    }
                }

                if output.exit {
                    break;
                }

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Maps display-list coordinates onto the window, keeping the board square.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SurfaceMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SurfaceMetrics {
    /// Fits a square surface into the window area below the control bar,
    /// centred along both axes.
    fn fit(surface_length: f32, screen_width: f32, screen_height: f32, bar_height: f32) -> Self {
        let available_height = (screen_height - bar_height).max(0.0);
        let scale = if surface_length <= f32::EPSILON {
            1.0
        } else {
            (screen_width / surface_length).min(available_height / surface_length)
        };

        let scaled = surface_length * scale;
        let offset_x = ((screen_width - scaled) * 0.5).max(0.0);
        let offset_y = bar_height + ((available_height - scaled) * 0.5).max(0.0);

        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    fn project(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + point.x * self.scale,
            self.offset_y + point.y * self.scale,
        )
    }
}

fn replay_display_list(list: &DisplayList, metrics: &SurfaceMetrics) {
    for op in list.ops() {
        match op {
            // The window background is cleared at the top of every frame.
            DrawOp::Clear => {}
            DrawOp::Line { from, to, color } => {
                let from = metrics.project(*from);
                let to = metrics.project(*to);
                macroquad::shapes::draw_line(
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    1.0,
                    to_macroquad_color(*color),
                );
            }
            DrawOp::Rect {
                origin,
                size,
                color,
            } => {
                let origin = metrics.project(*origin);
                macroquad::shapes::draw_rectangle(
                    origin.x,
                    origin.y,
                    size.x * metrics.scale,
                    size.y * metrics.scale,
                    to_macroquad_color(*color),
                );
            }
        }
    }
}

fn draw_notice(text: &str, metrics: &SurfaceMetrics, surface_length: f32) {
    let scaled = surface_length * metrics.scale;
    let dim = macroquad::color::Color::new(0.0, 0.0, 0.0, 0.55);
    macroquad::shapes::draw_rectangle(metrics.offset_x, metrics.offset_y, scaled, scaled, dim);

    let font_size = 32.0;
    let dimensions = macroquad::text::measure_text(text, None, font_size as u16, 1.0);
    macroquad::text::draw_text(
        text,
        metrics.offset_x + (scaled - dimensions.width) * 0.5,
        metrics.offset_y + scaled * 0.5,
        font_size,
        macroquad::color::WHITE,
    );
}

fn to_macroquad_color(color: snake_game_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
