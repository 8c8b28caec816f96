//! Phase timing and hazard choreography
//!
//! Each phase owns a hazard set. Hazards of the current phase walk their
//! waypoints every tick; touching a lethal one loses the session at once.
//! Outliving the last phase wins it.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Hazard, HazardLook, Outcome};
use super::transform::Transform;
use crate::Tuning;
use crate::consts::*;
use crate::tuning::{GiftTuning, SledTuning};

/// How far past the canvas edge the sled turns around
const SLED_TURN_MARGIN: f32 = 50.0;

/// Build one hazard set per phase from the tuning.
pub fn build_hazard_sets<R: Rng>(tuning: &Tuning, rng: &mut R) -> Vec<Vec<Hazard>> {
    let mut sets = vec![Vec::new(); tuning.phase_count()];

    for (phase, hazards) in [
        (tuning.gift_phase, spawn_gifts(&tuning.gifts, rng)),
        (tuning.sled_phase, spawn_sled(&tuning.sled, rng)),
    ] {
        match sets.get_mut(phase) {
            Some(set) => {
                log::debug!("Phase {}: {} hazards added", phase, hazards.len());
                set.extend(hazards);
            }
            None => log::warn!("Hazards for phase {} dropped: no such phase", phase),
        }
    }

    sets
}

/// Gifts rain from above the canvas straight down past its bottom edge.
pub fn spawn_gifts<R: Rng>(gifts: &GiftTuning, rng: &mut R) -> Vec<Hazard> {
    (0..gifts.count)
        .map(|_| {
            let x = rng.random::<f32>() * (CANVAS_WIDTH - gifts.size);
            let y = -rng.random::<f32>() * gifts.spawn_y_range - gifts.size;
            let target = Vec2::new(x, CANVAS_HEIGHT + gifts.size);
            let body = Transform::with_legs(x, y, gifts.size, gifts.size, vec![(target, gifts.speed)]);
            let look = HazardLook::Gift {
                variant: rng.random_range(0..gifts.variants.max(1)),
                frame_offset: rng.random_range(0..gifts.frames.max(1)),
            };
            Hazard::new(body, look)
        })
        .collect()
}

/// One sled sweeping across the canvas `passes` times, changing height
/// while off-screen between sweeps.
pub fn spawn_sled<R: Rng>(sled: &SledTuning, rng: &mut R) -> Vec<Hazard> {
    if sled.passes == 0 {
        return Vec::new();
    }

    let off_left = -sled.width - SLED_TURN_MARGIN;
    let off_right = CANVAS_WIDTH + SLED_TURN_MARGIN;

    let start_y = rng.random_range(sled.min_y..=sled.max_y);
    let mut legs = Vec::with_capacity(sled.passes * 2);
    let mut x = off_left;
    for pass in 0..sled.passes {
        let speed = rng.random_range(sled.min_speed..=sled.max_speed);
        let y = if pass == 0 {
            start_y
        } else {
            let y = rng.random_range(sled.min_y..=sled.max_y);
            legs.push((Vec2::new(x, y), speed));
            y
        };
        x = if x == off_left { off_right } else { off_left };
        legs.push((Vec2::new(x, y), speed));
    }

    let body = Transform::with_legs(off_left, start_y, sled.width, sled.height, legs);
    vec![Hazard::new(body, HazardLook::Sled)]
}

/// Move the current phase's hazards, check them against the player, then
/// run the phase clock. Returns the outcome if the session ended.
pub fn direct_phase(state: &mut GameState, now_ms: f64, dt: f32) -> Option<Outcome> {
    let player = &state.player.body;
    let mut hit = false;
    if let Some(hazards) = state.hazard_sets.get_mut(state.phase) {
        for hazard in hazards.iter_mut() {
            hazard.body.follow_path(dt);
            if hazard.lethal && hazard.body.overlaps(player) {
                hit = true;
            }
        }
    }

    if hit {
        return Some(Outcome::Defeat {
            phases_survived: state.phase.saturating_sub(1),
        });
    }

    advance_clock(state, now_ms)
}

/// Step to the next phase once the current one has run its course.
pub fn advance_clock(state: &mut GameState, now_ms: f64) -> Option<Outcome> {
    let durations = &state.tuning.phase_durations;
    let Some(&duration) = durations.get(state.phase) else {
        return Some(Outcome::Victory);
    };

    if now_ms - state.phase_started_ms >= duration as f64 {
        state.phase_started_ms = now_ms;
        state.phase += 1;
        if state.phase >= durations.len() {
            return Some(Outcome::Victory);
        }
        log::info!("Phase {} begins", state.phase);
    }
    None
}
