//! Command dispatch logic for metric-harvest

use super::{ExtractArgs, InitArgs, ListArgs, extract, init_config, list_adapters};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "metric-harvest", version, author, long_about = None)]
#[command(about = "Harvest observability metric definitions from upstream sources into a uniform catalog")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: HarvestSubcommand,
}

#[derive(Subcommand, Debug)]
enum HarvestSubcommand {
    /// List the registered adapters
    List(ListArgs),
    /// Fetch sources and write the metric catalog as JSON
    Extract(Box<ExtractArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        HarvestSubcommand::List(list_args) => list_adapters(host, list_args),
        HarvestSubcommand::Extract(extract_args) => extract(host, extract_args).await,
        HarvestSubcommand::Init(init_args) => init_config(host, init_args),
    }
}
