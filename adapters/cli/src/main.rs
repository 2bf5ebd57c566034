#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Snake game window.
//!
//! The binary resolves display settings from flags and an optional TOML
//! file, builds the world and session controller, and hands a frame closure
//! to the Macroquad backend. The closure owns the scheduling latch that
//! turns [`Schedule`] directives into actual tick timing.

mod config;

use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_game_core::{CellIndex, Event, GridWidth};
use snake_game_rendering::{
    Color, ControlLabel, DisplayList, FrameInput, FrameOutput, GridPresentation,
    NoticePresentation, Presentation, RenderingBackend, SceneColors,
};
use snake_game_rendering_macroquad::MacroquadBackend;
use snake_game_system_session::{Schedule, SessionConfig, SessionController, SessionStatus};
use snake_game_world::{query, World};

use crate::config::{DisplayConfig, Overrides, Settings};

/// Command-line arguments accepted by the Snake game binary.
#[derive(Debug, Parser)]
#[command(name = "snake-game", about = "Grid snake game")]
struct Args {
    /// Path to a TOML display configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of cells along each side of the square grid.
    #[arg(long)]
    width: Option<u32>,

    /// Side length of a single cell in pixels.
    #[arg(long)]
    cell_length: Option<f32>,

    /// Simulation steps per second.
    #[arg(long)]
    ticks_per_second: Option<u32>,

    /// Seed for reproducible sessions; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Render without waiting for the display refresh rate.
    #[arg(long)]
    no_vsync: bool,
}

/// When the next simulation tick should run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingTick {
    /// No tick is due.
    Idle,
    /// Run a tick on the current display frame.
    OnNextFrame,
    /// Run a tick once the deadline passes.
    At(Instant),
}

/// Per-window state driven by the backend's frame closure.
struct App {
    world: World,
    controller: SessionController,
    session_config: SessionConfig,
    width: GridWidth,
    rng: ChaCha8Rng,
    pending: PendingTick,
    events: Vec<Event>,
}

impl App {
    fn frame(&mut self, input: FrameInput, list: &mut DisplayList) -> FrameOutput {
        if list.ops().is_empty() {
            // The backend starts its retained list empty on the first frame.
            self.controller.repaint(&self.world, list);
        }

        if let Some(direction) = input.direction {
            self.controller.set_direction(&mut self.world, direction);
        }

        if input.control_pressed {
            match self.controller.status() {
                SessionStatus::NotStarted => {
                    if let Ok(schedule) =
                        self.controller.start(&mut self.world, list, &mut self.events)
                    {
                        self.apply_schedule(schedule);
                    }
                }
                SessionStatus::Running | SessionStatus::Won => self.reset(list),
            }
        }

        let due = match self.pending {
            PendingTick::Idle => false,
            PendingTick::OnNextFrame => true,
            PendingTick::At(deadline) => Instant::now() >= deadline,
        };
        if due && self.controller.status() == SessionStatus::Running {
            self.pending = PendingTick::Idle;
            if let Ok(schedule) = self.controller.tick(&mut self.world, list, &mut self.events) {
                self.apply_schedule(schedule);
            }
        }

        for event in self.events.drain(..) {
            if event == Event::BoardCompleted {
                println!("You won");
            }
        }

        let control = if self.controller.status() == SessionStatus::NotStarted {
            ControlLabel::Start
        } else {
            ControlLabel::Reload
        };
        let notice = (self.controller.status() == SessionStatus::Won)
            .then(|| NoticePresentation::new("You won"));

        FrameOutput {
            control,
            notice,
            exit: input.quit_requested,
        }
    }

    /// Replaces the world and controller with a fresh session.
    fn reset(&mut self, list: &mut DisplayList) {
        let start = CellIndex::new(self.rng.gen_range(0..self.width.cell_count()));
        // The same width and tick rate were validated at startup.
        if let Ok(world) = World::new(self.width, start, self.rng.gen()) {
            if let Ok(controller) = SessionController::new(self.session_config, &world, list) {
                self.world = world;
                self.controller = controller;
                self.pending = PendingTick::Idle;
                self.events.clear();
            }
        }
    }

    fn apply_schedule(&mut self, schedule: Schedule) {
        self.pending = match schedule {
            Schedule::NextFrame => PendingTick::OnNextFrame,
            Schedule::AfterInterval(interval) => PendingTick::At(Instant::now() + interval),
            Schedule::Stop => PendingTick::Idle,
        };
    }
}

/// Entry point for the Snake game command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let file = args.config.as_deref().map(DisplayConfig::load).transpose()?;
    let settings = Settings::resolve(
        Overrides {
            width: args.width,
            cell_length: args.cell_length,
            ticks_per_second: args.ticks_per_second,
        },
        file,
    );

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    // Bounded here because the start cell is drawn from 0..width² below,
    // before the world gets a chance to reject the width itself.
    anyhow::ensure!(
        (1..=GridWidth::MAX.get()).contains(&settings.width),
        "grid width must be between 1 and {}",
        GridWidth::MAX.get()
    );
    let width = GridWidth::new(settings.width);
    let colors = SceneColors::default();
    let grid = GridPresentation::new(width, settings.cell_length, colors.grid_line)?;
    let session_config =
        SessionConfig::new(settings.ticks_per_second, grid)?.with_colors(colors);

    let start = CellIndex::new(rng.gen_range(0..width.cell_count()));
    let world = World::new(width, start, rng.gen())?;
    println!("{}", query::welcome_banner(&world));

    let mut bootstrap_list = DisplayList::new();
    let controller = SessionController::new(session_config, &world, &mut bootstrap_list)?;

    let mut app = App {
        world,
        controller,
        session_config,
        width,
        rng,
        pending: PendingTick::Idle,
        events: Vec::new(),
    };

    let presentation = Presentation::new("Snake", Color::from_rgb_u8(0xff, 0xff, 0xff), grid);
    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);
    backend.run(presentation, move |_dt, input, list| app.frame(input, list))
}
