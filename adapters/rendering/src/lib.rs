#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake game adapters.
//!
//! The renderer is a pure function from a [`Scene`] to draw operations on a
//! [`RasterSurface`]. The session controller paints into a retained
//! [`DisplayList`] once per tick; windowed backends replay that list every
//! display frame, and tests inspect it directly.

use anyhow::Result as AnyResult;
use glam::Vec2;
use snake_game_core::{CellIndex, Direction, GridWidth};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Color assignments for every element of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneColors {
    /// Color used when stroking grid lines.
    pub grid_line: Color,
    /// Fill color of the snake's head cell.
    pub snake_head: Color,
    /// Fill color of the remaining snake body cells.
    pub snake_body: Color,
    /// Fill color of the reward cell.
    pub reward: Color,
}

impl Default for SceneColors {
    fn default() -> Self {
        Self {
            grid_line: Color::from_rgb_u8(0x00, 0x00, 0x00),
            snake_head: Color::from_rgb_u8(0x78, 0x78, 0xdb),
            snake_body: Color::from_rgb_u8(0x00, 0x00, 0x00),
            reward: Color::from_rgb_u8(0xee, 0x00, 0x00),
        }
    }
}

/// Describes the square cell grid that composes the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of cells along each side of the grid.
    pub width: GridWidth,
    /// Side length of a single cell expressed in surface units.
    pub cell_length: f32,
    /// Color used when stroking grid lines.
    pub line_color: Color,
}

impl GridPresentation {
    /// Creates a new grid descriptor.
    ///
    /// Returns an error unless `cell_length` is strictly positive and
    /// finite.
    pub fn new(
        width: GridWidth,
        cell_length: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            width,
            cell_length,
            line_color,
        })
    }

    /// Side length of the whole square surface in surface units.
    #[must_use]
    pub fn surface_length(&self) -> f32 {
        self.width.get() as f32 * self.cell_length
    }
}

/// Snake body prepared for drawing, head first.
///
/// The cell sequence is carried verbatim from the engine; overlapping cells
/// produced by freshly grown segments are suppressed at draw time.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakePresentation {
    /// Ordered body cells, head first.
    pub cells: Vec<CellIndex>,
    /// Fill color of the head cell.
    pub head_color: Color,
    /// Fill color of the remaining body cells.
    pub body_color: Color,
}

impl SnakePresentation {
    /// Creates a new snake presentation descriptor.
    #[must_use]
    pub const fn new(cells: Vec<CellIndex>, head_color: Color, body_color: Color) -> Self {
        Self {
            cells,
            head_color,
            body_color,
        }
    }
}

/// Reward cell prepared for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardPresentation {
    /// Cell the reward occupies.
    pub cell: CellIndex,
    /// Fill color of the reward.
    pub color: Color,
}

impl RewardPresentation {
    /// Creates a new reward presentation descriptor.
    #[must_use]
    pub const fn new(cell: CellIndex, color: Color) -> Self {
        Self { cell, color }
    }
}

/// Scene description combining the grid, the snake, and the reward.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Cell grid that composes the play area.
    pub grid: GridPresentation,
    /// Snake body to draw on top of the grid.
    pub snake: SnakePresentation,
    /// Reward cell, absent while the engine reports the win sentinel.
    pub reward: Option<RewardPresentation>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(
        grid: GridPresentation,
        snake: SnakePresentation,
        reward: Option<RewardPresentation>,
    ) -> Self {
        Self {
            grid,
            snake,
            reward,
        }
    }
}

/// Raster surface that draw passes mutate.
///
/// A single owned render target is passed by reference to each paint call
/// and explicitly cleared before every pass; no double buffering is assumed.
pub trait RasterSurface {
    /// Erases the whole surface.
    fn clear(&mut self);

    /// Strokes a one-unit line between two surface positions.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
}

/// Single draw operation recorded by a [`DisplayList`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawOp {
    /// Erase the whole surface.
    Clear,
    /// Stroke a line between two surface positions.
    Line {
        /// Start of the line.
        from: Vec2,
        /// End of the line.
        to: Vec2,
        /// Stroke color.
        color: Color,
    },
    /// Fill an axis-aligned rectangle.
    Rect {
        /// Upper-left corner of the rectangle.
        origin: Vec2,
        /// Width and height of the rectangle.
        size: Vec2,
        /// Fill color.
        color: Color,
    },
}

/// Retained draw list replayed by windowed backends once per display frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    /// Creates an empty display list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations in draw order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl RasterSurface for DisplayList {
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.ops.push(DrawOp::Line { from, to, color });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.ops.push(DrawOp::Rect {
            origin,
            size,
            color,
        });
    }
}

/// Renders the scene onto the surface: clear, grid lines, snake, reward.
///
/// Later draws may overlap earlier ones at the same cell. Duplicate snake
/// cells are painted at most once per frame.
pub fn paint<S>(scene: &Scene, surface: &mut S)
where
    S: RasterSurface + ?Sized,
{
    surface.clear();

    let grid = &scene.grid;
    let width = grid.width;
    let cell = grid.cell_length;
    let span = grid.surface_length();

    for line in 0..=width.get() {
        let offset = line as f32 * cell;
        surface.stroke_line(
            Vec2::new(offset, 0.0),
            Vec2::new(offset, span),
            grid.line_color,
        );
    }
    for line in 0..=width.get() {
        let offset = line as f32 * cell;
        surface.stroke_line(
            Vec2::new(0.0, offset),
            Vec2::new(span, offset),
            grid.line_color,
        );
    }

    let mut filled: Vec<CellIndex> = Vec::with_capacity(scene.snake.cells.len());
    for (position, &body_cell) in scene.snake.cells.iter().enumerate() {
        if filled.contains(&body_cell) {
            continue;
        }
        filled.push(body_cell);

        let color = if position == 0 {
            scene.snake.head_color
        } else {
            scene.snake.body_color
        };
        fill_cell(surface, body_cell, width, cell, color);
    }

    if let Some(reward) = &scene.reward {
        fill_cell(surface, reward.cell, width, cell, reward.color);
    }
}

fn fill_cell<S>(surface: &mut S, index: CellIndex, width: GridWidth, cell_length: f32, color: Color)
where
    S: RasterSurface + ?Sized,
{
    let origin = Vec2::new(
        index.column(width) as f32 * cell_length,
        index.row(width) as f32 * cell_length,
    );
    surface.fill_rect(origin, Vec2::splat(cell_length), color);
}

/// Input snapshot gathered by a backend before running the frame closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the control button was pressed on this frame.
    pub control_pressed: bool,
    /// Latest recognized directional intent observed on this frame.
    pub direction: Option<Direction>,
    /// Whether the player asked to quit the application.
    pub quit_requested: bool,
}

/// Label displayed on the single control button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlLabel {
    /// The session has not started yet.
    Start,
    /// The session is running or finished; pressing resets it.
    Reload,
}

impl ControlLabel {
    /// Text rendered on the control button.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Reload => "Reload",
        }
    }
}

/// Blocking notice surfaced over the play area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticePresentation {
    /// Text of the notice.
    pub text: String,
}

impl NoticePresentation {
    /// Creates a new notice descriptor.
    pub fn new<T>(text: T) -> Self
    where
        T: Into<String>,
    {
        Self { text: text.into() }
    }
}

/// Per-frame instructions returned by the frame closure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameOutput {
    /// Label the backend should render on the control button.
    pub control: ControlLabel,
    /// Notice to display over the play area, if any.
    pub notice: Option<NoticePresentation>,
    /// Whether the backend should exit its loop.
    pub exit: bool,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Grid geometry the window is sized around.
    pub grid: GridPresentation,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, grid: GridPresentation) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            grid,
        }
    }
}

/// Rendering backend capable of presenting Snake game frames.
pub trait RenderingBackend {
    /// Runs the backend until the frame closure requests an exit.
    ///
    /// The closure receives the frame delta, the input captured by the
    /// backend, and the retained display list it may repaint; the backend
    /// replays the list after the closure returns.
    fn run<F>(self, presentation: Presentation, frame: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut DisplayList) -> FrameOutput + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cell length must be positive to avoid a zero-sized surface.
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: u32, cell_length: f32) -> GridPresentation {
        GridPresentation::new(
            GridWidth::new(width),
            cell_length,
            Color::from_rgb_u8(0, 0, 0),
        )
        .expect("valid grid presentation")
    }

    fn scene_with_snake(cells: Vec<CellIndex>, reward: Option<CellIndex>) -> Scene {
        let colors = SceneColors::default();
        Scene::new(
            grid(4, 10.0),
            SnakePresentation::new(cells, colors.snake_head, colors.snake_body),
            reward.map(|cell| RewardPresentation::new(cell, colors.reward)),
        )
    }

    fn rect_count_at(list: &DisplayList, origin: Vec2) -> usize {
        list.ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { origin: o, .. } if *o == origin))
            .count()
    }

    #[test]
    fn grid_presentation_rejects_non_positive_cell_length() {
        let error = GridPresentation::new(GridWidth::new(8), 0.0, Color::from_rgb_u8(0, 0, 0))
            .expect_err("zero cell_length must be rejected");
        assert!(matches!(error, RenderingError::InvalidCellLength { .. }));
    }

    #[test]
    fn grid_presentation_rejects_non_finite_cell_length() {
        for cell_length in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let error =
                GridPresentation::new(GridWidth::new(8), cell_length, Color::from_rgb_u8(0, 0, 0))
                    .expect_err("non-finite cell_length must be rejected");
            assert!(matches!(error, RenderingError::InvalidCellLength { .. }));
        }
    }

    #[test]
    fn paint_begins_with_a_clear() {
        let scene = scene_with_snake(vec![CellIndex::new(5)], Some(CellIndex::new(9)));
        let mut list = DisplayList::new();
        paint(&scene, &mut list);
        assert_eq!(list.ops().first(), Some(&DrawOp::Clear));
    }

    #[test]
    fn paint_strokes_one_more_line_than_cells_per_axis() {
        let scene = scene_with_snake(vec![CellIndex::new(5)], None);
        let mut list = DisplayList::new();
        paint(&scene, &mut list);

        let lines = list
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count();
        assert_eq!(lines, 2 * (4 + 1));
    }

    #[test]
    fn paint_orders_grid_then_snake_then_reward() {
        let scene = scene_with_snake(vec![CellIndex::new(5)], Some(CellIndex::new(9)));
        let mut list = DisplayList::new();
        paint(&scene, &mut list);

        let last_line = list
            .ops()
            .iter()
            .rposition(|op| matches!(op, DrawOp::Line { .. }))
            .expect("grid lines recorded");
        let first_rect = list
            .ops()
            .iter()
            .position(|op| matches!(op, DrawOp::Rect { .. }))
            .expect("fills recorded");
        assert!(last_line < first_rect, "grid precedes fills");

        let colors = SceneColors::default();
        let last = list.ops().last().expect("non-empty list");
        assert!(
            matches!(last, DrawOp::Rect { color, .. } if *color == colors.reward),
            "reward painted last"
        );
    }

    #[test]
    fn paint_suppresses_duplicate_snake_cells() {
        // A freshly grown segment duplicates the neck cell.
        let scene = scene_with_snake(
            vec![CellIndex::new(6), CellIndex::new(5), CellIndex::new(5)],
            None,
        );
        let mut list = DisplayList::new();
        paint(&scene, &mut list);

        assert_eq!(rect_count_at(&list, Vec2::new(10.0, 10.0)), 1);
    }

    #[test]
    fn paint_colors_the_head_distinctly() {
        let scene = scene_with_snake(vec![CellIndex::new(6), CellIndex::new(5)], None);
        let mut list = DisplayList::new();
        paint(&scene, &mut list);

        let colors = SceneColors::default();
        let rects: Vec<_> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { origin, color, .. } => Some((*origin, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], (Vec2::new(20.0, 10.0), colors.snake_head));
        assert_eq!(rects[1], (Vec2::new(10.0, 10.0), colors.snake_body));
    }

    #[test]
    fn sentinel_reward_is_not_painted() {
        let scene = scene_with_snake(vec![CellIndex::new(5)], None);
        let mut list = DisplayList::new();
        paint(&scene, &mut list);

        let colors = SceneColors::default();
        assert!(!list
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Rect { color, .. } if *color == colors.reward)));
    }

    #[test]
    fn repainting_replaces_the_previous_frame() {
        let scene = scene_with_snake(vec![CellIndex::new(5)], None);
        let mut list = DisplayList::new();
        paint(&scene, &mut list);
        let first_len = list.ops().len();
        paint(&scene, &mut list);
        assert_eq!(list.ops().len(), first_len, "list does not accumulate");
    }
}
