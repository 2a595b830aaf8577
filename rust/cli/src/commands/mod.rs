//! Command handler modules for the casino CLI.
//!
//! Each CLI subcommand is implemented in its own module file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers: Helper functions specific to that command
//! - Dependency injection: Output streams (`&mut dyn Write`) and stdin passed as parameters
//! - Error propagation: All errors propagated via `CliError` enum
//!
//! # Example
//!
//! ```rust,no_run
//! use casino_cli::commands::handle_cfg_command;
//! use std::io;
//!
//! let mut out = io::stdout();
//! let mut err = io::stderr();
//! handle_cfg_command(&mut out, &mut err).expect("Command failed");
//! ```

pub mod catalog;
pub mod cfg;
pub mod freq;
pub mod play;
pub mod sim;
pub mod stats;

pub use catalog::handle_catalog_command;
pub use cfg::handle_cfg_command;
pub use freq::handle_freq_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
