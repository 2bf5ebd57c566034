#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake game.
//!
//! This crate defines the message surface that connects the session
//! controller, the authoritative world, and the rendering adapters. Callers
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for observers. State is inspected exclusively through read-only
//! query views.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Snake.";

/// Pending movement intent for the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

/// Engine-internal lifecycle status reported by the world.
///
/// The world reports `Option<GameStatus>` with `None` meaning the session has
/// not begun. `Lost` is part of the interface contract; the current rules
/// never produce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// A session is in progress.
    Running,
    /// The snake covered the whole board.
    Won,
    /// Reserved terminal failure state.
    Lost,
}

/// Number of cells along each side of the square grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridWidth(u32);

impl GridWidth {
    /// Largest supported width; its cell count still fits in a `u32`.
    ///
    /// `World` construction rejects anything wider, so `cell_count` never
    /// overflows for a validated width.
    pub const MAX: Self = Self(u16::MAX as u32);

    /// Creates a new grid width wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the number of cells per side.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.0 * self.0
    }
}

/// Linear index of a single grid cell.
///
/// Indices map to positions via `column = index mod width` and
/// `row = index / width`. An index equal to or beyond
/// [`GridWidth::cell_count`] is the reward sentinel, not a grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Creates a new cell index with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Zero-based column of the cell within a grid of the given width.
    #[must_use]
    pub const fn column(&self, width: GridWidth) -> u32 {
        self.0 % width.get()
    }

    /// Zero-based row of the cell within a grid of the given width.
    #[must_use]
    pub const fn row(&self, width: GridWidth) -> u32 {
        self.0 / width.get()
    }

    /// Reports whether the index lies outside the grid, signalling the win
    /// sentinel when observed as the reward cell.
    #[must_use]
    pub const fn is_sentinel(&self, width: GridWidth) -> bool {
        self.0 >= width.cell_count()
    }
}

/// Read-only, borrowed view over the snake body, head first.
///
/// The view borrows the world's own storage without copying; it stays valid
/// only until the next mutating call into the world, which the borrow
/// checker enforces for us.
#[derive(Clone, Copy, Debug)]
pub struct SnakeBodyView<'a> {
    cells: &'a [CellIndex],
}

impl<'a> SnakeBodyView<'a> {
    /// Captures a new body view backed by the provided cell slice.
    #[must_use]
    pub const fn new(cells: &'a [CellIndex]) -> Self {
        Self { cells }
    }

    /// Cell occupied by the snake's head.
    #[must_use]
    pub fn head(&self) -> Option<CellIndex> {
        self.cells.first().copied()
    }

    /// Number of cells composing the body.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the body contains no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Ordered body cells, head first.
    #[must_use]
    pub const fn cells(&self) -> &'a [CellIndex] {
        self.cells
    }

    /// Reports whether the body covers the provided cell.
    #[must_use]
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.contains(&cell)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Begins the session, transitioning the engine status to running.
    Begin,
    /// Buffers the next-step movement intent.
    SetDirection {
        /// Direction the snake should travel on the next step.
        direction: Direction,
    },
    /// Advances the simulation by one step, consuming any buffered intent.
    Step,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the session began.
    SessionStarted,
    /// Confirms that the snake advanced one cell.
    SnakeAdvanced {
        /// Cell occupied by the head after the step.
        head: CellIndex,
    },
    /// Reports that the snake consumed the reward.
    RewardConsumed {
        /// Cell the reward occupied when it was eaten.
        cell: CellIndex,
    },
    /// Reports that a fresh reward was placed on the board.
    RewardPlaced {
        /// Cell the new reward occupies.
        cell: CellIndex,
    },
    /// Announces that the snake covered the whole board.
    BoardCompleted,
}

#[cfg(test)]
mod tests {
    use super::{CellIndex, Direction, GameStatus, GridWidth, SnakeBodyView};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn cell_index_maps_to_row_and_column() {
        let width = GridWidth::new(8);
        let cell = CellIndex::new(27);
        assert_eq!(cell.column(width), 3);
        assert_eq!(cell.row(width), 3);
    }

    #[test]
    fn maximum_width_cell_count_fits_in_u32() {
        assert_eq!(GridWidth::MAX.get(), 65_535);
        assert_eq!(GridWidth::MAX.cell_count(), 4_294_836_225);
    }

    #[test]
    fn sentinel_detection_matches_cell_count() {
        let width = GridWidth::new(8);
        assert!(!CellIndex::new(63).is_sentinel(width));
        assert!(CellIndex::new(64).is_sentinel(width));
        assert!(CellIndex::new(100).is_sentinel(width));
    }

    #[test]
    fn body_view_exposes_head_first_order() {
        let cells = [CellIndex::new(27), CellIndex::new(26)];
        let view = SnakeBodyView::new(&cells);
        assert_eq!(view.head(), Some(CellIndex::new(27)));
        assert_eq!(view.len(), 2);
        assert!(view.contains(CellIndex::new(26)));
        assert!(!view.contains(CellIndex::new(25)));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::Left);
    }

    #[test]
    fn game_status_round_trips_through_bincode() {
        assert_round_trip(&GameStatus::Won);
    }

    #[test]
    fn cell_index_round_trips_through_bincode() {
        assert_round_trip(&CellIndex::new(42));
    }
}
