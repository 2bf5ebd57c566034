//! End-to-end lifecycle coverage for the session controller.

use std::time::Duration;

use snake_game_core::{CellIndex, Direction, Event, GridWidth};
use snake_game_rendering::{Color, DisplayList, DrawOp, GridPresentation, SceneColors};
use snake_game_system_session::{
    Schedule, SessionConfig, SessionController, SessionError, SessionStatus,
};
use snake_game_world::World;

const SEED: u64 = 0x5eed_cafe_f00d_0002;
const TICKS_PER_SECOND: u32 = 5;

fn grid(width: u32) -> GridPresentation {
    GridPresentation::new(GridWidth::new(width), 10.0, Color::from_rgb_u8(0, 0, 0))
        .expect("valid grid presentation")
}

fn session(width: u32, start: u32) -> (World, SessionController, DisplayList) {
    let world = World::new(GridWidth::new(width), CellIndex::new(start), SEED)
        .expect("valid world configuration");
    let mut surface = DisplayList::new();
    let config =
        SessionConfig::new(TICKS_PER_SECOND, grid(width)).expect("valid session configuration");
    let controller =
        SessionController::new(config, &world, &mut surface).expect("matching grid and world");
    (world, controller, surface)
}

fn rect_count(surface: &DisplayList) -> usize {
    surface
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::Rect { .. }))
        .count()
}

#[test]
fn zero_tick_rate_is_rejected() {
    let error = SessionConfig::new(0, grid(8)).expect_err("zero tick rate must be rejected");
    assert_eq!(error, SessionError::ZeroTickRate);
}

#[test]
fn mismatched_grid_is_rejected() {
    let world = World::new(GridWidth::new(8), CellIndex::new(27), SEED)
        .expect("valid world configuration");
    let mut surface = DisplayList::new();
    let config = SessionConfig::new(TICKS_PER_SECOND, grid(4)).expect("valid configuration");
    let error = SessionController::new(config, &world, &mut surface)
        .expect_err("grid narrower than the world must be rejected");
    assert_eq!(
        error,
        SessionError::GridMismatch {
            grid: GridWidth::new(4),
            world: GridWidth::new(8),
        }
    );
}

#[test]
fn construction_renders_the_static_first_frame() {
    let (_, controller, surface) = session(8, 27);

    assert_eq!(controller.status(), SessionStatus::NotStarted);
    assert_eq!(controller.renders_performed(), 1);
    assert_eq!(
        controller.frame_interval(),
        Duration::from_millis(1000 / u64::from(TICKS_PER_SECOND))
    );
    assert_eq!(surface.ops().first(), Some(&DrawOp::Clear));
    // Two snake cells plus one reward cell.
    assert_eq!(rect_count(&surface), 3);
}

#[test]
fn start_schedules_the_first_tick_on_the_next_frame() {
    let (mut world, mut controller, mut surface) = session(8, 27);
    let mut events = Vec::new();

    let schedule = controller
        .start(&mut world, &mut surface, &mut events)
        .expect("first start succeeds");

    assert_eq!(schedule, Schedule::NextFrame);
    assert_eq!(events, vec![Event::SessionStarted]);
    assert_eq!(controller.status(), SessionStatus::Running);
    assert_eq!(controller.renders_performed(), 2);
}

#[test]
fn repeated_start_is_rejected() {
    let (mut world, mut controller, mut surface) = session(8, 27);
    let mut events = Vec::new();
    let _ = controller
        .start(&mut world, &mut surface, &mut events)
        .expect("first start succeeds");

    let error = controller
        .start(&mut world, &mut surface, &mut events)
        .expect_err("second start must be rejected");

    assert_eq!(
        error,
        SessionError::AlreadyStarted {
            status: SessionStatus::Running,
        }
    );
    assert_eq!(controller.renders_performed(), 2, "no render on rejection");
}

#[test]
fn tick_before_start_is_rejected() {
    let (mut world, mut controller, mut surface) = session(8, 27);
    let mut events = Vec::new();

    let error = controller
        .tick(&mut world, &mut surface, &mut events)
        .expect_err("tick outside Running must be rejected");

    assert_eq!(
        error,
        SessionError::NotRunning {
            status: SessionStatus::NotStarted,
        }
    );
    assert!(events.is_empty());
    assert_eq!(controller.renders_performed(), 1, "no render on rejection");
}

#[test]
fn each_tick_renders_once_and_reschedules() {
    let (mut world, mut controller, mut surface) = session(8, 27);
    let mut events = Vec::new();
    let _ = controller
        .start(&mut world, &mut surface, &mut events)
        .expect("first start succeeds");
    // Keep the reward off the snake's path so no tick regenerates it.
    world.place_reward_at(CellIndex::new(0));

    for _ in 0..5 {
        let schedule = controller
            .tick(&mut world, &mut surface, &mut events)
            .expect("running session ticks");
        assert_eq!(
            schedule,
            Schedule::AfterInterval(controller.frame_interval())
        );
    }

    assert_eq!(controller.status(), SessionStatus::Running);
    assert_eq!(controller.renders_performed(), 2 + 5);
}

#[test]
fn buffered_direction_applies_on_the_following_tick() {
    let (mut world, mut controller, mut surface) = session(8, 27);
    let mut events = Vec::new();
    let _ = controller
        .start(&mut world, &mut surface, &mut events)
        .expect("first start succeeds");
    world.place_reward_at(CellIndex::new(0));

    controller.set_direction(&mut world, Direction::Up);
    controller.set_direction(&mut world, Direction::Down);
    events.clear();
    let _ = controller
        .tick(&mut world, &mut surface, &mut events)
        .expect("running session ticks");

    assert_eq!(
        events,
        vec![Event::SnakeAdvanced {
            head: CellIndex::new(35)
        }],
        "the latest accepted intent wins"
    );
}

#[test]
fn sentinel_reward_stops_the_loop_and_wins_once() {
    let (mut world, mut controller, mut surface) = session(8, 27);
    let mut events = Vec::new();
    let _ = controller
        .start(&mut world, &mut surface, &mut events)
        .expect("first start succeeds");
    world.place_reward_at(CellIndex::new(64));

    let schedule = controller
        .tick(&mut world, &mut surface, &mut events)
        .expect("running session ticks");

    assert_eq!(schedule, Schedule::Stop);
    assert_eq!(controller.status(), SessionStatus::Won);
    assert_eq!(controller.renders_performed(), 3);

    // The terminal frame was rendered and the sentinel left no reward fill.
    let colors = SceneColors::default();
    assert!(!surface
        .ops()
        .iter()
        .any(|op| matches!(op, DrawOp::Rect { color, .. } if *color == colors.reward)));

    let error = controller
        .tick(&mut world, &mut surface, &mut events)
        .expect_err("won session must stop ticking");
    assert_eq!(
        error,
        SessionError::NotRunning {
            status: SessionStatus::Won,
        }
    );
    assert_eq!(controller.renders_performed(), 3, "no render after the win");

    let error = controller
        .start(&mut world, &mut surface, &mut events)
        .expect_err("won session must not restart in place");
    assert_eq!(
        error,
        SessionError::AlreadyStarted {
            status: SessionStatus::Won,
        }
    );
}
