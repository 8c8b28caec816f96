//! Page switching and end-of-game reporting
//!
//! A `Session` owns the game state and tracks which page is open. The
//! simulation only runs while the game page is shown; leaving it freezes the
//! state without resetting it.

use crate::sim::{self, Button, GameState, Outcome};
use crate::{GameError, Tuning};

/// The three screens of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Game,
    End,
}

impl Page {
    /// DOM id of the page container
    pub fn id(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Game => "game",
            Page::End => "end",
        }
    }
}

/// Presentation side of the session: shows pages and the end screen.
pub trait SessionController {
    fn show_page(&mut self, page: Page);
    fn end_game(&mut self, outcome: Outcome);
}

/// Title and body of the end screen. A loss keeps the page's own title.
pub fn end_text(outcome: Outcome) -> (Option<&'static str>, String) {
    match outcome {
        Outcome::Victory => (Some("You won!"), "You survived every wave".to_string()),
        Outcome::Defeat { phases_survived } => {
            let waves = if phases_survived == 1 { "wave" } else { "waves" };
            (None, format!("You survived {} {}", phases_survived, waves))
        }
    }
}

pub struct Session<C> {
    page: Page,
    state: GameState,
    controller: C,
}

impl<C: SessionController> Session<C> {
    /// New session on the home page
    pub fn new(tuning: Tuning, seed: u64, mut controller: C) -> Result<Self, GameError> {
        let state = GameState::new(tuning, seed)?;
        controller.show_page(Page::Home);
        Ok(Self {
            page: Page::Home,
            state,
            controller,
        })
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    fn open(&mut self, page: Page) {
        self.page = page;
        self.controller.show_page(page);
    }

    /// Open the game page and restart the phase clock at `now_ms`.
    pub fn start_game(&mut self, now_ms: f64) {
        self.state.start(now_ms);
        self.open(Page::Game);
    }

    /// Fresh layout from `seed`, then straight into the game.
    pub fn restart(&mut self, seed: u64, now_ms: f64) -> Result<(), GameError> {
        let tuning = self.state.tuning.clone();
        self.state = GameState::new(tuning, seed)?;
        self.start_game(now_ms);
        Ok(())
    }

    /// One animation-frame callback. Does nothing unless the game page is
    /// open; hands the outcome to the controller when the session ends.
    pub fn tick(&mut self, now_ms: f64) -> Option<Outcome> {
        if self.page != Page::Game {
            return None;
        }
        let outcome = sim::tick(&mut self.state, now_ms)?;
        self.controller.end_game(outcome);
        self.open(Page::End);
        Some(outcome)
    }

    pub fn press(&mut self, button: Button) {
        sim::press(&mut self.state, button);
    }

    pub fn release(&mut self, button: Button) {
        sim::release(&mut self.state, button);
    }
}
