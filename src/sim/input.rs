//! Press/release handling for the three logical buttons
//!
//! Events arrive between ticks. They only touch intent flags and request
//! animation switches; geometry is left to the tick.

use serde::{Deserialize, Serialize};

use super::animation::AnimationName;
use super::state::GameState;

/// Logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Left,
    Right,
    Jump,
}

/// Held state of the jump button, so a held key fires only one jump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTracker {
    jump_held: bool,
}

/// Handle a button going down. Repeats while held are ignored.
pub fn press(state: &mut GameState, button: Button) {
    let intents = &mut state.intents;
    match button {
        Button::Left if !intents.left => {
            intents.left = true;
            state.player.request_animation(AnimationName::Walk);
        }
        Button::Right if !intents.right => {
            intents.right = true;
            state.player.request_animation(AnimationName::Walk);
        }
        Button::Jump if !state.input.jump_held => {
            state.input.jump_held = true;
            intents.jump = true;
        }
        _ => {}
    }
}

/// Handle a button going up.
pub fn release(state: &mut GameState, button: Button) {
    let intents = &mut state.intents;
    match button {
        Button::Left => {
            intents.left = false;
            if !intents.right {
                state.player.request_animation(AnimationName::Idle);
            }
        }
        Button::Right => {
            intents.right = false;
            if !intents.left {
                state.player.request_animation(AnimationName::Idle);
            }
        }
        Button::Jump => {
            state.input.jump_held = false;
            intents.jump = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    fn grounded_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 0).unwrap();
        state.player.grounded = true;
        state
    }

    #[test]
    fn test_press_left_walks() {
        let mut state = grounded_state();
        press(&mut state, Button::Left);
        assert!(state.intents.left);
        assert_eq!(state.player.animation.name(), AnimationName::Walk);
    }

    #[test]
    fn test_repeat_press_keeps_animation_running() {
        let mut state = grounded_state();
        press(&mut state, Button::Right);
        for _ in 0..3 {
            state.player.animation.update(3.0);
        }
        let frame = state.player.animation.frame();
        assert!(frame > 0);
        press(&mut state, Button::Right);
        assert_eq!(state.player.animation.frame(), frame);
    }

    #[test]
    fn test_release_one_of_two_keeps_walking() {
        let mut state = grounded_state();
        press(&mut state, Button::Left);
        press(&mut state, Button::Right);
        release(&mut state, Button::Left);
        assert_eq!(state.player.animation.name(), AnimationName::Walk);
        release(&mut state, Button::Right);
        assert_eq!(state.player.animation.name(), AnimationName::Idle);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut state = grounded_state();
        press(&mut state, Button::Jump);
        assert!(state.intents.jump);
        // Consumed by a tick
        state.intents.jump = false;
        press(&mut state, Button::Jump);
        assert!(!state.intents.jump, "held key does not re-fire");
        release(&mut state, Button::Jump);
        press(&mut state, Button::Jump);
        assert!(state.intents.jump);
    }

    #[test]
    fn test_release_jump_clears_pending() {
        let mut state = grounded_state();
        press(&mut state, Button::Jump);
        release(&mut state, Button::Jump);
        assert!(!state.intents.jump);
    }

    #[test]
    fn test_events_do_not_move_player() {
        let mut state = grounded_state();
        let pos = state.player.body.pos;
        press(&mut state, Button::Left);
        press(&mut state, Button::Jump);
        release(&mut state, Button::Left);
        assert_eq!(state.player.body.pos, pos);
        assert_eq!(state.player.y_velocity, 0.0);
    }
}
