//! Player physics against static platforms
//!
//! Runs once per tick before hazards move. Gaps are measured once at the
//! start of the tick and every clamp uses those values.

use super::animation::{AnimationName, Facing};
use super::collision::{Gaps, directional_gaps};
use super::state::{Intents, Player};
use super::transform::Transform;
use crate::Tuning;

/// Advance the player by one tick: gravity, landing, jumping, then walking.
pub fn step_player(
    player: &mut Player,
    intents: &mut Intents,
    platforms: &[Transform],
    tuning: &Tuning,
    world_height: f32,
    dt: f32,
) -> Gaps {
    let gaps = directional_gaps(&player.body, platforms, world_height);
    apply_vertical(player, intents, &gaps, tuning, dt);
    apply_horizontal(player, intents, &gaps, tuning, dt);
    gaps
}

fn apply_vertical(player: &mut Player, intents: &mut Intents, gaps: &Gaps, tuning: &Tuning, dt: f32) {
    if gaps.is_grounded() {
        player.grounded = true;
        player.y_velocity = 0.0;
    } else {
        player.grounded = false;
        player.y_velocity += tuning.gravity * dt;

        if player.y_velocity > 0.0 && gaps.ground < player.y_velocity * dt {
            // Landing this tick
            player.body.pos.y += gaps.ground;
            player.y_velocity = 0.0;
            player.grounded = true;
            let name = if intents.any_horizontal() {
                AnimationName::Walk
            } else {
                AnimationName::Idle
            };
            player.request_animation(name);
        } else if player.y_velocity < 0.0 {
            clamp_to_ceiling(player, gaps, dt);
        }
    }

    if player.grounded {
        player.jump_charges = tuning.max_jump_charges;
    }

    if intents.jump && player.jump_charges > 0 {
        intents.jump = false;

        // Leaving the ground is free; only air jumps spend a charge
        let name = if player.grounded {
            AnimationName::Jump
        } else {
            player.jump_charges -= 1;
            AnimationName::DoubleJump
        };
        player.request_animation(name);

        player.y_velocity = -tuning.jump_force;
        clamp_to_ceiling(player, gaps, dt);
    }

    player.body.pos.y += player.y_velocity * dt;
}

/// Stop a rising player at the ceiling if it would be crossed this tick
fn clamp_to_ceiling(player: &mut Player, gaps: &Gaps, dt: f32) {
    if gaps.ceiling < -player.y_velocity * dt {
        player.body.pos.y -= gaps.ceiling;
        player.y_velocity = 0.0;
    }
}

fn apply_horizontal(player: &mut Player, intents: &Intents, gaps: &Gaps, tuning: &Tuning, dt: f32) {
    let Some(direction) = intents.horizontal() else {
        return;
    };

    let step = tuning.player_speed * dt;
    let gap = match direction {
        Facing::Left => gaps.left,
        Facing::Right => gaps.right,
    };
    let distance = match gap {
        Some(gap) if gap < step => {
            player.request_animation(AnimationName::Idle);
            gap
        }
        _ => step,
    };

    player.body.pos.x += match direction {
        Facing::Left => -distance,
        Facing::Right => distance,
    };
    player.facing = direction;
}
