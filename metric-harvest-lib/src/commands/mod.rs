//! Command-line interface for metric-harvest
//!
//! # Commands
//!
//! - **list**: Show the registered adapters with their category, confidence, and
//!   extraction method
//! - **extract**: Run adapters through the [`Harvester`](crate::harvest::Harvester),
//!   optionally enrich the result against the semantic conventions, and write the
//!   catalog as JSON
//! - **init**: Write the default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! handlers. All output goes through a [`Host`], so commands can be driven in tests with
//! in-memory buffers.
//!
//! Configuration comes from `harvest.toml` in the working directory, or the file named
//! with `--config`. Command-line options take precedence over it.

mod common;
mod config;
mod extract;
mod host;
mod init;
mod list;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use extract::{ExtractArgs, extract};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use list::{ListArgs, list_adapters};
pub use progress_reporter::ProgressReporter;
pub use run::run;
