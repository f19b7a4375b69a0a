use super::Host;
use super::common::{ColorMode, default_cache_root};
use crate::Result;
use crate::adapters::{Adapter, Registry};
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,
}

pub fn list_adapters<H: Host>(host: &mut H, args: &ListArgs) -> Result<()> {
    let registry = Registry::with_defaults(&default_cache_root()?);
    let table = format_table(&registry, args.color.for_stdout());
    let _ = write!(host.output(), "{table}");
    Ok(())
}

/// One line per adapter, sorted by name: name, category, confidence, and extraction method.
fn format_table(registry: &Registry, use_colors: bool) -> String {
    let mut out = String::new();

    for name in registry.sorted_names() {
        let Some(adapter) = registry.get(name) else {
            continue;
        };

        let padded = format!("{name:<24}");
        if use_colors {
            out.push_str(&padded.bold().to_string());
        } else {
            out.push_str(&padded);
        }

        out.push_str(&describe(adapter.as_ref()));
        out.push('\n');
    }

    out
}

fn describe(adapter: &dyn Adapter) -> String {
    format!(
        "{:<25}{:<15}{}",
        adapter.source_category().to_string(),
        adapter.confidence().to_string(),
        adapter.extraction_method()
    )
}
