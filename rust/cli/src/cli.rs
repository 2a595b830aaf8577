//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "casino",
    version,
    about = "Weighted-deck Blackjack and five-card draw Poker"
)]
pub struct CasinoCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// List the card catalog with draw weights and chances
    Catalog {
        /// Weight override, e.g. `AS:dealer=3` or `10h=0` (repeatable)
        #[arg(long = "set", value_name = "CARD[:player|dealer]=N")]
        set: Vec<String>,
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play Blackjack interactively
    Blackjack(PlayArgs),
    /// Play five-card draw Poker interactively
    Poker(PlayArgs),
    /// Play rounds with a fixed strategy and report the results
    Sim {
        #[arg(long, value_enum)]
        game: GameArg,
        #[arg(long, default_value_t = 100)]
        rounds: u64,
        #[arg(long)]
        seed: Option<u64>,
        /// Bet in units
        #[arg(long, default_value_t = 1)]
        bet: u32,
        /// Append each resolved round to this JSONL file
        #[arg(long)]
        log: Option<String>,
    },
    /// Aggregate a JSONL round log
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Compare observed draw frequencies with the catalog weights
    Freq {
        #[arg(long, value_enum, default_value_t = PerspectiveArg::Player)]
        perspective: PerspectiveArg,
        #[arg(long, default_value_t = 10_000)]
        trials: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Stop after this many resolved rounds
    #[arg(long)]
    pub rounds: Option<u32>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Starting bet in units
    #[arg(long)]
    pub bet: Option<u32>,
    /// Dealing speed multiplier
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub speed: Option<u8>,
    /// Append each resolved round to this JSONL file
    #[arg(long)]
    pub log: Option<String>,
    /// Print dealt cards without pausing
    #[arg(long)]
    pub no_pacing: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GameArg {
    Blackjack,
    Poker,
}

impl From<GameArg> for casino_engine::game::GameKind {
    fn from(g: GameArg) -> Self {
        match g {
            GameArg::Blackjack => casino_engine::game::GameKind::Blackjack,
            GameArg::Poker => casino_engine::game::GameKind::Poker,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PerspectiveArg {
    Player,
    Dealer,
}

impl From<PerspectiveArg> for casino_engine::catalog::Perspective {
    fn from(p: PerspectiveArg) -> Self {
        match p {
            PerspectiveArg::Player => casino_engine::catalog::Perspective::Player,
            PerspectiveArg::Dealer => casino_engine::catalog::Perspective::Dealer,
        }
    }
}
