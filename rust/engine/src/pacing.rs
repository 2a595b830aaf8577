//! Presentation pacing for dealt cards.
//!
//! The engine resolves rounds instantly and queues [`DealEvent`]s; a front
//! end replays them through a [`Pacer`] to get the dealing cadence. Nothing in
//! the engine reads these delays.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::{DealEvent, GameKind};

const BLACKJACK_DEAL: Duration = Duration::from_millis(400);
const POKER_DEAL: Duration = Duration::from_millis(250);

/// Dealing speed multiplier, cycled 1 -> 2 -> 3 -> 1.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GameSpeed {
    #[default]
    Normal,
    Fast,
    Fastest,
}

impl GameSpeed {
    pub fn from_multiplier(m: u8) -> Option<Self> {
        match m {
            1 => Some(GameSpeed::Normal),
            2 => Some(GameSpeed::Fast),
            3 => Some(GameSpeed::Fastest),
            _ => None,
        }
    }

    pub fn multiplier(self) -> u8 {
        match self {
            GameSpeed::Normal => 1,
            GameSpeed::Fast => 2,
            GameSpeed::Fastest => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            GameSpeed::Normal => GameSpeed::Fast,
            GameSpeed::Fast => GameSpeed::Fastest,
            GameSpeed::Fastest => GameSpeed::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameSpeed::Normal => ">",
            GameSpeed::Fast => ">>",
            GameSpeed::Fastest => ">>>",
        }
    }
}

impl TryFrom<u8> for GameSpeed {
    type Error = String;

    fn try_from(m: u8) -> Result<Self, Self::Error> {
        GameSpeed::from_multiplier(m).ok_or_else(|| format!("game speed must be 1..=3, got {m}"))
    }
}

impl From<GameSpeed> for u8 {
    fn from(s: GameSpeed) -> u8 {
        s.multiplier()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pacer {
    speed: GameSpeed,
}

impl Pacer {
    pub fn new(speed: GameSpeed) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> GameSpeed {
        self.speed
    }

    /// Advances to the next speed and returns it.
    pub fn cycle_speed(&mut self) -> GameSpeed {
        self.speed = self.speed.next();
        self.speed
    }

    /// Pause before each dealt card of `game`.
    pub fn delay(&self, game: GameKind) -> Duration {
        let base = match game {
            GameKind::Blackjack => BLACKJACK_DEAL,
            GameKind::Poker => POKER_DEAL,
        };
        base / u32::from(self.speed.multiplier())
    }

    /// Pairs each event with the delay that precedes it.
    pub fn schedule(&self, game: GameKind, events: Vec<DealEvent>) -> Vec<(Duration, DealEvent)> {
        let d = self.delay(game);
        events.into_iter().map(|e| (d, e)).collect()
    }
}
