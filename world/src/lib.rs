#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation engine for the Snake game.
//!
//! The world owns the snake body, the reward cell, and the session status.
//! All mutation flows through [`apply`]; read access flows through the
//! [`query`] module. Movement wraps toroidally at every grid edge, and a
//! reward cell equal to the total cell count is the win sentinel rather than
//! a board position.

use std::{error::Error, fmt};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_game_core::{
    CellIndex, Command, Direction, Event, GameStatus, GridWidth, WELCOME_BANNER,
};

const INITIAL_SNAKE_LENGTH: u32 = 2;

#[derive(Debug)]
struct Snake {
    body: Vec<CellIndex>,
    direction: Direction,
    next_cell: Option<CellIndex>,
}

impl Snake {
    fn new(start: CellIndex, width: GridWidth) -> Self {
        let cell_count = width.cell_count();
        let body = (0..INITIAL_SNAKE_LENGTH)
            .map(|offset| CellIndex::new((start.get() + cell_count - offset) % cell_count))
            .collect();

        Self {
            body,
            direction: Direction::Right,
            next_cell: None,
        }
    }

    fn head(&self) -> CellIndex {
        self.body[0]
    }

    fn neck(&self) -> CellIndex {
        self.body[1]
    }
}

/// Represents the authoritative Snake world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    width: GridWidth,
    snake: Snake,
    reward_cell: CellIndex,
    status: Option<GameStatus>,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a new world with a two-cell snake whose head occupies the
    /// provided start cell.
    ///
    /// The trailing body cell wraps modulo the cell count, so a start index
    /// of zero is valid. Reward placement draws from a ChaCha8 stream seeded
    /// with `seed`, keeping sessions reproducible.
    pub fn new(width: GridWidth, start: CellIndex, seed: u64) -> Result<Self, WorldError> {
        // Checked before any cell arithmetic; wider grids overflow u32.
        if width > GridWidth::MAX {
            return Err(WorldError::WidthTooLarge { width });
        }
        if width.cell_count() <= INITIAL_SNAKE_LENGTH {
            return Err(WorldError::WidthTooSmall { width });
        }
        if start.is_sentinel(width) {
            return Err(WorldError::StartOutOfBounds { start, width });
        }

        let snake = Snake::new(start, width);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let reward_cell = generate_reward_cell(&mut rng, width, &snake.body);

        Ok(Self {
            banner: WELCOME_BANNER,
            width,
            snake,
            reward_cell,
            status: None,
            rng,
        })
    }

    /// Pins the reward cell for deterministic tests.
    ///
    /// A cell at or beyond the grid raises the win sentinel directly.
    #[cfg(any(test, feature = "reward_scaffolding"))]
    pub fn place_reward_at(&mut self, cell: CellIndex) {
        self.reward_cell = cell;
    }

    fn next_cell_toward(&self, direction: Direction) -> CellIndex {
        let width = self.width.get();
        let cell_count = self.width.cell_count();
        let head = self.snake.head().get();
        let row = head / width;
        let column = head % width;

        let next = match direction {
            Direction::Right => {
                if column + 1 == width {
                    head + 1 - width
                } else {
                    head + 1
                }
            }
            Direction::Left => {
                if column == 0 {
                    head + width - 1
                } else {
                    head - 1
                }
            }
            Direction::Up => {
                if row == 0 {
                    cell_count - width + column
                } else {
                    head - width
                }
            }
            Direction::Down => {
                if row + 1 == width {
                    column
                } else {
                    head + width
                }
            }
        };

        CellIndex::new(next)
    }

    fn advance_one_step(&mut self, out_events: &mut Vec<Event>) {
        let next_head = match self.snake.next_cell.take() {
            Some(cell) => cell,
            None => self.next_cell_toward(self.snake.direction),
        };

        let previous = self.snake.body.clone();
        self.snake.body[0] = next_head;
        for index in 1..previous.len() {
            self.snake.body[index] = previous[index - 1];
        }

        if self.reward_cell != next_head {
            out_events.push(Event::SnakeAdvanced { head: next_head });
            return;
        }

        out_events.push(Event::RewardConsumed {
            cell: self.reward_cell,
        });

        if (self.snake.body.len() as u32) < self.width.cell_count() {
            // Grown segment overlaps an existing cell until the body
            // unfolds; the renderer suppresses the duplicate.
            self.snake.body.push(self.snake.neck());
            self.reward_cell = generate_reward_cell(&mut self.rng, self.width, &self.snake.body);
            out_events.push(Event::RewardPlaced {
                cell: self.reward_cell,
            });
        } else {
            self.reward_cell = CellIndex::new(self.width.cell_count());
            self.status = Some(GameStatus::Won);
            out_events.push(Event::BoardCompleted);
        }
    }
}

fn generate_reward_cell(rng: &mut ChaCha8Rng, width: GridWidth, body: &[CellIndex]) -> CellIndex {
    loop {
        let candidate = CellIndex::new(rng.gen_range(0..width.cell_count()));
        if !body.contains(&candidate) {
            return candidate;
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Begin => {
            world.status = Some(GameStatus::Running);
            out_events.push(Event::SessionStarted);
        }
        Command::SetDirection { direction } => {
            let next_cell = world.next_cell_toward(direction);
            // Reversing into the neck is engine policy: the intent is dropped.
            if next_cell == world.snake.neck() {
                return;
            }
            world.snake.direction = direction;
            world.snake.next_cell = Some(next_cell);
        }
        Command::Step => {
            if world.status == Some(GameStatus::Running) {
                world.advance_one_step(out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use snake_game_core::{CellIndex, GameStatus, GridWidth, SnakeBodyView};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of cells along each side of the grid.
    #[must_use]
    pub fn width(world: &World) -> GridWidth {
        world.width
    }

    /// Current engine status; `None` before the session begins.
    #[must_use]
    pub fn game_status(world: &World) -> Option<GameStatus> {
        world.status
    }

    /// Cell currently holding the reward, or the win sentinel.
    #[must_use]
    pub fn reward_cell(world: &World) -> CellIndex {
        world.reward_cell
    }

    /// Borrowed head-first view over the snake body.
    ///
    /// Valid only until the next mutating call into the world.
    #[must_use]
    pub fn snake_body(world: &World) -> SnakeBodyView<'_> {
        SnakeBodyView::new(&world.snake.body)
    }

    /// Cell occupied by the snake's head.
    #[must_use]
    pub fn snake_head(world: &World) -> CellIndex {
        world.snake.head()
    }

    /// Number of cells composing the snake body.
    #[must_use]
    pub fn snake_length(world: &World) -> usize {
        world.snake.body.len()
    }
}

/// Errors reported when constructing a world.
#[derive(Debug, PartialEq, Eq)]
pub enum WorldError {
    /// The grid must hold more cells than the initial snake body.
    WidthTooSmall {
        /// Width provided by the caller.
        width: GridWidth,
    },
    /// The grid is wider than [`GridWidth::MAX`], so its cell count would
    /// not fit in a `u32`.
    WidthTooLarge {
        /// Width provided by the caller.
        width: GridWidth,
    },
    /// The snake start cell lies outside the grid.
    StartOutOfBounds {
        /// Start cell provided by the caller.
        start: CellIndex,
        /// Width of the rejected grid.
        width: GridWidth,
    },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidthTooSmall { width } => {
                write!(
                    f,
                    "grid width {} leaves no room for the snake",
                    width.get()
                )
            }
            Self::WidthTooLarge { width } => {
                write!(
                    f,
                    "grid width {} exceeds the supported maximum {}",
                    width.get(),
                    GridWidth::MAX.get()
                )
            }
            Self::StartOutOfBounds { start, width } => {
                write!(
                    f,
                    "start cell {} lies outside the {}x{} grid",
                    start.get(),
                    width.get(),
                    width.get()
                )
            }
        }
    }
}

impl Error for WorldError {}
