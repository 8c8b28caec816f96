//! The ghost: a delayed replay of the player
//!
//! During its phase the recorder snapshots the player every tick, starting a
//! little before the spawn delay runs out. Once enough snapshots are buffered
//! the ghost replays them one per tick, trailing the player by a fixed lag,
//! and joins the phase's hazard set.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::SpriteKey;
use super::state::{Hazard, HazardLook, Player};
use super::transform::Transform;
use crate::tuning::GhostTuning;

/// What is needed to show a player as it was on one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostSnapshot {
    pub is_main: bool,
    pub pos: Vec2,
    pub size: Vec2,
    pub sprite: SpriteKey,
}

impl GhostSnapshot {
    pub fn capture(player: &Player) -> Self {
        Self {
            is_main: player.is_main,
            pos: player.body.pos,
            size: player.body.size,
            sprite: player.sprite_key(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GhostRecorder {
    /// Ticks since the ghost phase began
    spawn_counter: u32,
    /// Append-only
    history: Vec<GhostSnapshot>,
    /// Next snapshot to replay
    cursor: usize,
    displayed: Option<GhostSnapshot>,
}

impl GhostRecorder {
    pub fn spawn_counter(&self) -> u32 {
        self.spawn_counter
    }

    pub fn history(&self) -> &[GhostSnapshot] {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The ghost as currently shown, once replay has begun
    pub fn displayed(&self) -> Option<&GhostSnapshot> {
        self.displayed.as_ref()
    }

    /// Fade-in from 0 at phase start to 1 at the spawn delay
    pub fn opacity(&self, tuning: &GhostTuning) -> f32 {
        if tuning.spawn_delay == 0 {
            return 1.0;
        }
        (self.spawn_counter as f32 / tuning.spawn_delay as f32).clamp(0.0, 1.0)
    }

    /// Record this tick and advance the replay; keeps the ghost hazard in
    /// `hazards` in sync with what is displayed.
    pub fn step(&mut self, player: &Player, tuning: &GhostTuning, hazards: &mut Vec<Hazard>) {
        self.spawn_counter += 1;

        let record_from = tuning.spawn_delay.saturating_sub(tuning.capture_offset);
        if self.spawn_counter >= record_from {
            self.history.push(GhostSnapshot::capture(player));
        }

        let primed = self.history.len() >= tuning.capture_offset as usize;
        let Some(&snapshot) = self.history.get(self.cursor).filter(|_| primed) else {
            return;
        };
        self.cursor += 1;

        let shown = GhostSnapshot {
            is_main: false,
            ..snapshot
        };
        if self.displayed.is_none() {
            log::info!("Ghost spawned ({} snapshots buffered)", self.history.len());
        }
        self.displayed = Some(shown);

        let look = HazardLook::Ghost {
            sprite: shown.sprite,
            opacity: self.opacity(tuning),
        };
        let lethal = self.cursor > tuning.no_damage_ticks as usize;

        match hazards
            .iter_mut()
            .find(|h| matches!(h.look, HazardLook::Ghost { .. }))
        {
            Some(ghost) => {
                ghost.body.pos = shown.pos;
                ghost.body.size = shown.size;
                ghost.look = look;
                ghost.lethal = lethal;
            }
            None => {
                let body = Transform::new(shown.pos.x, shown.pos.y, shown.size.x, shown.size.y);
                hazards.push(Hazard {
                    body,
                    look,
                    lethal,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn tuning() -> GhostTuning {
        GhostTuning {
            spawn_delay: 1000,
            capture_offset: 150,
            no_damage_ticks: 60,
        }
    }

    fn player_at(x: f32) -> Player {
        Player::new(Transform::new(x, 100.0, PLAYER_WIDTH, PLAYER_HEIGHT), 1)
    }

    #[test]
    fn test_recording_and_replay_start() {
        let tuning = tuning();
        let mut recorder = GhostRecorder::default();
        let mut hazards = Vec::new();

        for tick in 1..=849u32 {
            recorder.step(&player_at(tick as f32), &tuning, &mut hazards);
        }
        assert!(recorder.history().is_empty());

        // Tick 850: first snapshot
        recorder.step(&player_at(850.0), &tuning, &mut hazards);
        assert_eq!(recorder.history().len(), 1);
        assert_eq!(recorder.history()[0].pos.x, 850.0);

        for tick in 851..=998u32 {
            recorder.step(&player_at(tick as f32), &tuning, &mut hazards);
        }
        assert_eq!(recorder.history().len(), 149);
        assert_eq!(recorder.cursor(), 0);
        assert!(recorder.displayed().is_none());
        assert!(hazards.is_empty());

        // 150th snapshot primes the buffer: replay starts this tick
        recorder.step(&player_at(999.0), &tuning, &mut hazards);
        assert_eq!(recorder.history().len(), 150);
        assert_eq!(recorder.cursor(), 1);
        let shown = recorder.displayed().unwrap();
        assert_eq!(shown.pos.x, 850.0);
        assert!(!shown.is_main);
        assert!(recorder.history()[0].is_main, "history keeps is_main");

        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].body.pos.x, 850.0);
        assert!(!hazards[0].lethal);
    }

    #[test]
    fn test_snapshots_are_copies() {
        let tuning = GhostTuning {
            spawn_delay: 1,
            capture_offset: 1,
            no_damage_ticks: 0,
        };
        let mut recorder = GhostRecorder::default();
        let mut hazards = Vec::new();
        let mut player = player_at(10.0);
        recorder.step(&player, &tuning, &mut hazards);
        player.body.pos.x = 500.0;
        assert_eq!(recorder.history()[0].pos.x, 10.0);
    }

    #[test]
    fn test_ghost_becomes_lethal_after_grace() {
        let tuning = GhostTuning {
            spawn_delay: 10,
            capture_offset: 5,
            no_damage_ticks: 3,
        };
        let mut recorder = GhostRecorder::default();
        let mut hazards = Vec::new();
        let player = player_at(0.0);
        for _ in 0..9 {
            recorder.step(&player, &tuning, &mut hazards);
        }
        // Replay began on tick 9
        assert_eq!(recorder.cursor(), 1);
        assert!(!hazards[0].lethal);
        for _ in 0..2 {
            recorder.step(&player, &tuning, &mut hazards);
        }
        assert!(!hazards[0].lethal);
        recorder.step(&player, &tuning, &mut hazards);
        assert!(hazards[0].lethal);
        assert_eq!(hazards.len(), 1);
    }

    #[test]
    fn test_opacity_fades_in() {
        let tuning = tuning();
        let mut recorder = GhostRecorder::default();
        assert_eq!(recorder.opacity(&tuning), 0.0);
        let mut hazards = Vec::new();
        let player = player_at(0.0);
        for _ in 0..500 {
            recorder.step(&player, &tuning, &mut hazards);
        }
        assert!((recorder.opacity(&tuning) - 0.5).abs() < 1e-6);
        for _ in 0..1000 {
            recorder.step(&player, &tuning, &mut hazards);
        }
        assert_eq!(recorder.opacity(&tuning), 1.0);
        assert!(matches!(hazards[0].look, HazardLook::Ghost { opacity, .. } if opacity == 1.0));
    }
}
