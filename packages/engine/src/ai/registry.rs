//! Session-scoped registry of AI-controlled seats.
//!
//! Explicitly owned by whatever orchestrates a session; there is no
//! ambient global. Dropping the registry (or the session) releases every
//! registered player.

use std::collections::HashMap;

use crate::domain::state::PlayerIndex;

use super::AiPlayer;

/// Maps AI-controlled seats to their decision-makers for one session.
#[derive(Default)]
pub struct AiRegistry {
    players: HashMap<PlayerIndex, Box<dyn AiPlayer>>,
}

impl AiRegistry {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
        }
    }

    /// Register an AI for a seat, replacing any previous one.
    pub fn register(&mut self, seat: PlayerIndex, player: Box<dyn AiPlayer>) {
        self.players.insert(seat, player);
    }

    /// Remove the AI for a seat (e.g. when a human takes over).
    pub fn unregister(&mut self, seat: PlayerIndex) -> Option<Box<dyn AiPlayer>> {
        self.players.remove(&seat)
    }

    pub fn is_ai(&self, seat: PlayerIndex) -> bool {
        self.players.contains_key(&seat)
    }

    pub fn get_mut<'a>(&'a mut self, seat: PlayerIndex) -> Option<&'a mut (dyn AiPlayer + 'a)> {
        self.players.get_mut(&seat).map(|boxed| boxed.as_mut() as &mut (dyn AiPlayer + 'a))
    }

    /// Release every registered AI at session end.
    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
