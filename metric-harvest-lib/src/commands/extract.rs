use super::common::{CommonArgs, LogLevel, init_logging};
use super::{Host, ProgressReporter};
use crate::Result;
use crate::adapters::{Adapter, FetchOptions, Registry, SemconvAdapter};
use crate::context::Context;
use crate::fetch::GitFetcher;
use crate::harvest::{HarvestOptions, HarvestReport, Harvester, Progress};
use crate::normalize::SemconvEnricher;
use camino::Utf8PathBuf;
use clap::Parser;
use core::time::Duration;
use ohno::{IntoAppError, bail};
use owo_colors::OwoColorize;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

const LOG_TARGET: &str = "   extract";

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Adapters to run (default is the configured list, or every adapter)
    #[arg(value_name = "ADAPTER")]
    pub adapters: Vec<String>,

    /// Run every registered adapter
    #[arg(long, conflicts_with = "adapters")]
    pub all: bool,

    /// Pin the snapshot to this commit (requires a single adapter)
    #[arg(long, value_name = "SHA")]
    pub commit: Option<String>,

    /// Discard cached snapshots and fetch again
    #[arg(long)]
    pub force: bool,

    /// Write the catalog to a file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Annotate entries with their semantic-convention match
    #[arg(long)]
    pub enrich: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn extract<H: Host>(host: &mut H, args: &ExtractArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let config = args.common.load_config()?;
    let cache_root = args.common.cache_root(&config)?;
    let registry = Registry::with_defaults(&cache_root);
    config.validate(&registry.names())?;

    let requested = if args.all {
        Vec::new()
    } else if args.adapters.is_empty() {
        config.adapters.clone()
    } else {
        args.adapters.clone()
    };
    let adapters = select(&registry, &requested)?;

    if args.commit.is_some() && adapters.len() != 1 {
        bail!("--commit requires exactly one adapter, but {} were selected", adapters.len());
    }

    let options = HarvestOptions {
        fetch: FetchOptions {
            commit: args.commit.clone(),
            force: args.force,
            depth: config.shallow_depth,
        },
        fetch_timeout: Some(config.fetch_timeout),
        max_parallel: config.max_parallel_adapters,
    };

    let delay = if args.common.log_level == LogLevel::None {
        Duration::from_millis(300)
    } else {
        Duration::from_hours(365 * 24)
    };
    let use_colors = args.common.color.for_stderr();
    let progress = ProgressReporter::new(delay, use_colors);

    let ctx = Context::new();
    let harvester = Harvester::new(Arc::new(progress) as Arc<dyn Progress>);
    let mut report = harvester.run(&ctx, adapters, &options).await;

    let mut failed = report.has_failures();

    if args.enrich {
        match build_enricher(&ctx, &cache_root, &options).await {
            Ok(enricher) => {
                log::info!(target: LOG_TARGET, "Enriching {} entries against {} conventions", report.entries.len(), enricher.len());
                enricher.enrich_all(&mut report.entries);
            }
            Err(e) => {
                let _ = writeln!(host.error(), "Could not enrich the catalog: {e:#}");
                failed = true;
            }
        }
    }

    let json = serde_json::to_string_pretty(&report.entries).into_app_err("serializing the catalog")?;
    if let Some(path) = &args.output {
        fs::write(path, format!("{json}\n")).into_app_err_with(|| format!("writing the catalog to '{path}'"))?;
    } else {
        let _ = writeln!(host.output(), "{json}");
    }

    let _ = write!(host.error(), "{}", format_summary(&report, use_colors));

    if failed {
        host.exit(1);
    }

    Ok(())
}

/// Resolve adapter names against the registry. An empty list selects every adapter, sorted by name.
fn select(registry: &Registry, names: &[String]) -> Result<Vec<Arc<dyn Adapter>>> {
    if names.is_empty() {
        return Ok(registry.sorted_names().into_iter().filter_map(|name| registry.get(name)).collect());
    }

    let mut selected: Vec<Arc<dyn Adapter>> = Vec::with_capacity(names.len());
    for name in names {
        let Some(adapter) = registry.get(name) else {
            bail!("unknown adapter '{name}', known adapters are: {}", registry.sorted_names().join(", "));
        };

        if !selected.iter().any(|existing| existing.name() == adapter.name()) {
            selected.push(adapter);
        }
    }

    Ok(selected)
}

/// Fetch the semantic conventions, reusing the cached snapshot when there is one.
async fn build_enricher(ctx: &Context, cache_root: &Path, options: &HarvestOptions) -> Result<SemconvEnricher> {
    let adapter = SemconvAdapter::new(GitFetcher::new(cache_root));
    let fetch = FetchOptions {
        commit: None,
        ..options.fetch.clone()
    };

    let fetch_ctx = options.fetch_timeout.map_or_else(|| ctx.clone(), |timeout| ctx.with_timeout(timeout));
    let snapshot = adapter.fetch(&fetch_ctx, &fetch).await?;
    let conventions = adapter.conventions(ctx, &snapshot).await?;

    Ok(SemconvEnricher::new(conventions))
}

/// One line per adapter: status, name, commit, metric count, and elapsed time.
fn format_summary(report: &HarvestReport, use_colors: bool) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        let commit = outcome.commit.as_deref().map_or("-", short_commit);
        let elapsed = format!("{:.1}s", outcome.duration.as_secs_f64());

        let (status, detail) = match &outcome.error {
            None => {
                let mut detail = format!("{} metrics", outcome.kept);
                if outcome.dropped() > 0 {
                    detail.push_str(&format!(" ({} dropped)", outcome.dropped()));
                }
                ("ok", detail)
            }
            Some(e) => ("FAILED", message_chain(&e.to_string())),
        };

        let status = format!("{status:>6}");
        let status = match (use_colors, outcome.error.is_some()) {
            (false, _) => status,
            (true, false) => status.green().bold().to_string(),
            (true, true) => status.red().bold().to_string(),
        };

        out.push_str(&format!("{status} {:<24}{commit:<12}{elapsed:>8}  {detail}\n", outcome.adapter));
    }

    out.push_str(&format!(
        "{} entries from {} adapters, {} failed\n",
        report.entries.len(),
        report.outcomes.len(),
        report.failures().count()
    ));

    out
}

/// Collapse a rendered error onto one line, dropping any captured backtrace and
/// the source locations attached to context messages.
fn message_chain(rendered: &str) -> String {
    let head = rendered.split_once("\n\nBacktrace:").map_or(rendered, |(head, _)| head);

    head.lines()
        .map(|line| match line.strip_prefix("> ") {
            Some(context) => context.rsplit_once(" (at ").map_or(context, |(message, _)| message),
            None => line,
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(": ")
}

/// Git hashes are shortened. Literal-table dates are kept whole.
fn short_commit(commit: &str) -> &str {
    if commit.len() == 40 && commit.bytes().all(|b| b.is_ascii_hexdigit()) {
        commit.get(..10).unwrap_or(commit)
    } else {
        commit
    }
}
