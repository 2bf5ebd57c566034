#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller driving the Snake game loop.
//!
//! The controller owns the finite lifecycle of a single play-through:
//! `NotStarted -> Running -> Won`. It translates lifecycle operations into
//! world commands, renders the scene after every tick, and tells its caller
//! when to run the next tick through [`Schedule`] directives. Illegal
//! transitions are rejected with typed errors instead of silently ignored so
//! that the contract stays testable.

use std::{error::Error, fmt, time::Duration};

use snake_game_core::{Command, Direction, Event, GridWidth};
use snake_game_rendering::{
    paint, GridPresentation, RasterSurface, RewardPresentation, Scene, SceneColors,
    SnakePresentation,
};
use snake_game_world::{apply, query, World};

/// Lifecycle state of one play-through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// No ticking yet; only the static first frame has been rendered.
    NotStarted,
    /// The tick loop is active.
    Running,
    /// Terminal state; no further ticks are scheduled.
    Won,
}

/// Scheduling directive returned after lifecycle operations.
///
/// The two variants mirror the two scheduling primitives of the original
/// loop: the first tick after start aligns with the display-refresh
/// callback, every later tick fires after a fixed delay measured from the
/// completion of the previous tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Run the next tick on the next display frame.
    NextFrame,
    /// Run the next tick once the interval has elapsed from now.
    AfterInterval(Duration),
    /// The session reached a terminal state; schedule nothing.
    Stop,
}

/// Fixed configuration captured when a session is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    ticks_per_second: u32,
    grid: GridPresentation,
    colors: SceneColors,
}

impl SessionConfig {
    /// Creates a session configuration.
    ///
    /// Returns an error when the tick rate is zero.
    pub fn new(ticks_per_second: u32, grid: GridPresentation) -> Result<Self, SessionError> {
        if ticks_per_second == 0 {
            return Err(SessionError::ZeroTickRate);
        }

        Ok(Self {
            ticks_per_second,
            grid,
            colors: SceneColors::default(),
        })
    }

    /// Overrides the default scene colors.
    #[must_use]
    pub const fn with_colors(mut self, colors: SceneColors) -> Self {
        self.colors = colors;
        self
    }

    /// Delay between consecutive ticks.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second
    }
}

/// Drives the game from start to terminal state at a fixed cadence.
#[derive(Debug)]
pub struct SessionController {
    status: SessionStatus,
    frame_interval: Duration,
    grid: GridPresentation,
    colors: SceneColors,
    renders: u64,
}

impl SessionController {
    /// Creates the controller and renders the static first frame so the
    /// initial snake and reward layout is visible before the session starts.
    pub fn new<S>(
        config: SessionConfig,
        world: &World,
        surface: &mut S,
    ) -> Result<Self, SessionError>
    where
        S: RasterSurface + ?Sized,
    {
        let world_width = query::width(world);
        if config.grid.width != world_width {
            return Err(SessionError::GridMismatch {
                grid: config.grid.width,
                world: world_width,
            });
        }

        let mut controller = Self {
            status: SessionStatus::NotStarted,
            frame_interval: config.frame_interval(),
            grid: config.grid,
            colors: config.colors,
            renders: 0,
        };
        controller.render(world, surface);
        Ok(controller)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Delay between consecutive ticks.
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Number of render passes performed, including the initial frame.
    #[must_use]
    pub const fn renders_performed(&self) -> u64 {
        self.renders
    }

    /// Starts the session: begins the engine session, renders immediately,
    /// and requests the first tick on the next display frame.
    ///
    /// Rejected unless the session is in `NotStarted`.
    pub fn start<S>(
        &mut self,
        world: &mut World,
        surface: &mut S,
        out_events: &mut Vec<Event>,
    ) -> Result<Schedule, SessionError>
    where
        S: RasterSurface + ?Sized,
    {
        if self.status != SessionStatus::NotStarted {
            return Err(SessionError::AlreadyStarted {
                status: self.status,
            });
        }

        apply(world, Command::Begin, out_events);
        self.status = SessionStatus::Running;
        self.render(world, surface);
        Ok(Schedule::NextFrame)
    }

    /// Advances the simulation one step, re-renders the frame, and evaluates
    /// the terminal condition.
    ///
    /// Rejected unless the session is in `Running`.
    pub fn tick<S>(
        &mut self,
        world: &mut World,
        surface: &mut S,
        out_events: &mut Vec<Event>,
    ) -> Result<Schedule, SessionError>
    where
        S: RasterSurface + ?Sized,
    {
        if self.status != SessionStatus::Running {
            return Err(SessionError::NotRunning {
                status: self.status,
            });
        }

        apply(world, Command::Step, out_events);
        self.render(world, surface);

        if query::reward_cell(world).is_sentinel(query::width(world)) {
            self.status = SessionStatus::Won;
            return Ok(Schedule::Stop);
        }

        Ok(Schedule::AfterInterval(self.frame_interval))
    }

    /// Paints the current world into the surface without advancing the
    /// session.
    ///
    /// Callers use this when a backend adopts a fresh display list, for
    /// example on the first window frame.
    pub fn repaint<S>(&mut self, world: &World, surface: &mut S)
    where
        S: RasterSurface + ?Sized,
    {
        self.render(world, surface);
    }

    /// Forwards a movement intent to the engine's pending-direction slot.
    ///
    /// Callable in any state; the intent stays inert until a tick consumes
    /// it. Whether a reversal is accepted is engine policy.
    pub fn set_direction(&self, world: &mut World, direction: Direction) {
        let mut events = Vec::new();
        apply(world, Command::SetDirection { direction }, &mut events);
    }

    fn render<S>(&mut self, world: &World, surface: &mut S)
    where
        S: RasterSurface + ?Sized,
    {
        let scene = self.build_scene(world);
        paint(&scene, surface);
        self.renders = self.renders.saturating_add(1);
    }

    fn build_scene(&self, world: &World) -> Scene {
        let width = query::width(world);
        let snake = SnakePresentation::new(
            query::snake_body(world).cells().to_vec(),
            self.colors.snake_head,
            self.colors.snake_body,
        );
        let reward_cell = query::reward_cell(world);
        let reward = if reward_cell.is_sentinel(width) {
            None
        } else {
            Some(RewardPresentation::new(reward_cell, self.colors.reward))
        };

        Scene::new(self.grid, snake, reward)
    }
}

/// Errors reported by the session controller.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The configured tick rate was zero.
    ZeroTickRate,
    /// The configured grid does not match the world's grid.
    GridMismatch {
        /// Width carried by the grid presentation.
        grid: GridWidth,
        /// Width reported by the world.
        world: GridWidth,
    },
    /// `start` was invoked outside `NotStarted`.
    AlreadyStarted {
        /// State the session was in when the call arrived.
        status: SessionStatus,
    },
    /// `tick` was invoked outside `Running`.
    NotRunning {
        /// State the session was in when the call arrived.
        status: SessionStatus,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTickRate => write!(formatter, "tick rate must be at least one per second"),
            Self::GridMismatch { grid, world } => write!(
                formatter,
                "grid presentation width {} does not match world width {}",
                grid.get(),
                world.get()
            ),
            Self::AlreadyStarted { status } => write!(
                formatter,
                "session can only start from NotStarted, current state is {status:?}"
            ),
            Self::NotRunning { status } => write!(
                formatter,
                "session can only tick while Running, current state is {status:?}"
            ),
        }
    }
}

impl Error for SessionError {}
