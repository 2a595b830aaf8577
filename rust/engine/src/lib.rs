//! # casino-engine: Weighted Card Table Core
//!
//! A deterministic engine for two single-player table games, Blackjack and
//! five-card draw Poker, dealt from a deck whose cards carry adjustable draw
//! weights per perspective (player or dealer).
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`catalog`] - The 52 reference cards and their player/dealer weights
//! - [`deck`] - Weighted sampling without replacement with ChaCha20 RNG
//! - [`blackjack`] - Dual-bound hand scoring, dealer policy and resolution
//! - [`poker`] - Hand classification and pay table
//! - [`game`] - Shared round state machine, snapshots and deal events
//! - [`session`] - Catalog + ledger + table ownership and configuration surface
//! - [`ledger`] - Ledger trait and the in-memory account
//! - [`rules`] - Bet units and bet validation
//! - [`pacing`] - Presentation delays for deal events
//! - [`logger`] - RoundRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use casino_engine::catalog::Catalog;
//! use casino_engine::game::{GameKind, GameStep};
//! use casino_engine::ledger::Account;
//! use casino_engine::session::{Session, SessionConfig};
//!
//! let mut session = Session::new(
//!     GameKind::Blackjack,
//!     SessionConfig::default(),
//!     Catalog::standard(),
//!     Account::default(),
//! );
//! session.deal().unwrap();
//! assert_eq!(session.table().step(), GameStep::PlayerTurn);
//! let resolution = session.stand().unwrap();
//! println!("{} pays {}", resolution.label, resolution.payout);
//! ```
//!
//! ## Weighted Draws
//!
//! Each draw expands the remaining cards by their weight and samples
//! uniformly, so a card with weight 3 is three times as likely as one with
//! weight 1, and a card with weight 0 is never drawn:
//!
//! ```rust
//! use casino_engine::cards::{Card, Rank, Suit};
//! use casino_engine::catalog::{Catalog, Perspective};
//! use casino_engine::deck::WeightedDeck;
//!
//! let mut catalog = Catalog::standard();
//! catalog.set_all_weights(Perspective::Dealer, 0);
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! catalog.set_weight(ace, Perspective::Dealer, 1).unwrap();
//!
//! let mut deck = WeightedDeck::new_with_seed(42);
//! deck.reset(&catalog);
//! assert_eq!(deck.draw(&catalog, Perspective::Dealer), Ok(ace));
//! assert!(deck.draw(&catalog, Perspective::Dealer).is_err());
//! assert_eq!(deck.remaining(), 51);
//! ```

pub mod blackjack;
pub mod cards;
pub mod catalog;
pub mod deck;
pub mod errors;
pub mod game;
pub mod ledger;
pub mod logger;
pub mod pacing;
pub mod poker;
pub mod rules;
pub mod session;
