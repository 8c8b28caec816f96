//! Per-frame simulation tick
//!
//! Core game loop: physics, hazards and the phase clock, the ghost, then
//! animation.

use super::phase::direct_phase;
use super::physics::step_player;
use super::state::{GameState, Outcome, SessionStatus};
use crate::consts::CANVAS_HEIGHT;

/// Delta-time for a tick at `now_ms`, in reference frames.
///
/// The first tick after a (re)start has no previous timestamp and counts as
/// one frame. Long stalls are clamped so nothing tunnels through a platform.
pub fn delta_time(state: &mut GameState, now_ms: f64) -> f32 {
    let dt = match state.last_tick_ms {
        Some(last) => ((now_ms - last) / state.tuning.frame_ms()) as f32,
        None => 1.0,
    };
    state.last_tick_ms = Some(now_ms);
    dt.max(0.0).min(state.tuning.max_delta_frames)
}

/// Advance the game by one tick at wall-clock time `now_ms`.
///
/// Returns the outcome on the tick the session ends; afterwards the state is
/// frozen and further ticks do nothing.
pub fn tick(state: &mut GameState, now_ms: f64) -> Option<Outcome> {
    if state.is_over() {
        return None;
    }

    let dt = delta_time(state, now_ms);
    state.delta = dt;
    state.time_ticks += 1;

    step_player(
        &mut state.player,
        &mut state.intents,
        &state.platforms,
        &state.tuning,
        CANVAS_HEIGHT,
        dt,
    );

    if let Some(outcome) = direct_phase(state, now_ms, dt) {
        finish(state, outcome);
        return Some(outcome);
    }

    if state.phase == state.tuning.ghost_phase {
        record_ghost(state);
    }

    state.player.animation.update(dt);
    state.gift_sparkle.update(dt);

    None
}

fn record_ghost(state: &mut GameState) {
    let Some(hazards) = state.hazard_sets.get_mut(state.phase) else {
        return;
    };
    state.ghost.step(&state.player, &state.tuning.ghost, hazards);
}

fn finish(state: &mut GameState, outcome: Outcome) {
    state.status = SessionStatus::Over(outcome);
    match outcome {
        Outcome::Victory => log::info!("Victory after {} ticks", state.time_ticks),
        Outcome::Defeat { phases_survived } => log::info!(
            "Defeat in phase {} ({} survived)",
            state.phase,
            phases_survived
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::input::{Button, press};
    use crate::sim::state::{Hazard, HazardLook};
    use crate::sim::transform::Transform;

    const FRAME: f64 = 1000.0 / 60.0;

    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning {
            phase_durations: vec![2000, 20000],
            gift_phase: 1,
            sled_phase: 1,
            ghost_phase: 1,
            ..Default::default()
        };
        tuning.gifts.count = 0;
        tuning.sled.passes = 0;
        tuning
    }

    #[test]
    fn test_delta_time_scales_to_reference_frame() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start(0.0);
        assert_eq!(delta_time(&mut state, 0.0), 1.0);
        let dt = delta_time(&mut state, 2.0 * FRAME);
        assert!((dt - 2.0).abs() < 1e-4);
        // A long stall is clamped
        assert_eq!(delta_time(&mut state, 10_000.0), 3.0);
        // Clock going backwards never yields negative time
        assert_eq!(delta_time(&mut state, 5_000.0), 0.0);
    }

    #[test]
    fn test_phase_scenario_wins() {
        let mut state = GameState::new(quiet_tuning(), 1).unwrap();
        state.start(0.0);

        assert_eq!(tick(&mut state, 0.0), None);
        assert_eq!(tick(&mut state, 2000.0), None);
        assert_eq!(state.phase, 1);
        assert_eq!(tick(&mut state, 21_999.0), None);
        assert_eq!(state.phase, 1);
        assert_eq!(tick(&mut state, 22_000.0), Some(Outcome::Victory));
        assert_eq!(state.phase, 2);
        assert_eq!(state.outcome(), Some(Outcome::Victory));

        // Frozen afterwards
        let ticks = state.time_ticks;
        assert_eq!(tick(&mut state, 30_000.0), None);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_overlap_scenario_loses() {
        let mut state = GameState::with_platforms(quiet_tuning(), 1, Vec::new()).unwrap();
        state.start(0.0);
        state.phase = 1;
        state.player.body = Transform::new(100.0, 100.0, 50.0, 50.0);
        state.hazard_sets[1].push(Hazard::new(
            Transform::new(120.0, 120.0, 50.0, 50.0),
            HazardLook::Sled,
        ));

        let outcome = tick(&mut state, 0.0);
        assert_eq!(outcome, Some(Outcome::Defeat { phases_survived: 0 }));
        assert!(state.is_over());
    }

    #[test]
    fn test_player_falls_to_canvas_floor() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start(0.0);
        // Spawned inside the middle ledge's column with nothing below
        let mut now = 0.0;
        for _ in 0..120 {
            tick(&mut state, now);
            now += FRAME;
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.body.bottom(), CANVAS_HEIGHT);
    }

    #[test]
    fn test_jump_through_tick() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start(0.0);
        let mut now = 0.0;
        for _ in 0..120 {
            tick(&mut state, now);
            now += FRAME;
        }
        let ground_y = state.player.body.pos.y;
        press(&mut state, Button::Jump);
        tick(&mut state, now);
        assert!(!state.intents.jump);
        assert!(state.player.body.pos.y < ground_y);
        assert_eq!(state.player.animation.name(), crate::sim::AnimationName::Jump);
    }

    #[test]
    fn test_ghost_only_records_in_its_phase() {
        let mut state = GameState::new(quiet_tuning(), 1).unwrap();
        state.start(0.0);
        tick(&mut state, 0.0);
        assert_eq!(state.ghost.spawn_counter(), 0);
        tick(&mut state, 2000.0);
        assert_eq!(state.phase, 1);
        tick(&mut state, 2000.0 + FRAME);
        assert_eq!(state.ghost.spawn_counter(), 2);
    }

    #[test]
    fn test_ghost_catches_idle_player() {
        let mut tuning = Tuning {
            phase_durations: vec![1_000_000],
            gift_phase: 0,
            sled_phase: 0,
            ghost_phase: 0,
            ..Default::default()
        };
        tuning.gifts.count = 0;
        tuning.sled.passes = 0;
        let mut state = GameState::new(tuning, 1).unwrap();
        state.start(0.0);

        let mut outcome = None;
        for k in 0..2000u64 {
            outcome = tick(&mut state, k as f64 * FRAME);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(Outcome::Defeat { phases_survived: 0 }));
        // 999 ticks to fill the buffer, 60 harmless replay ticks, then contact
        assert_eq!(state.time_ticks, 1060);
        assert_eq!(state.ghost.cursor(), 61);
    }

    #[test]
    fn test_gift_sparkle_advances() {
        let mut state = GameState::new(Tuning::default(), 1).unwrap();
        state.start(0.0);
        let mut now = 0.0;
        for _ in 0..7 {
            tick(&mut state, now);
            now += FRAME;
        }
        assert_eq!(state.gift_sparkle.frame(), 1);
    }
}
