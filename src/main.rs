//! Forecast Chart - command-line entry point
//!
//! Reads a JSON table (`[[header...], [row...], ...]`), builds the chart
//! specification and writes it as JSON.
//!
//! Usage:
//! ```bash
//! forecast_chart --input forecast.json [--kind forecast|income] [--title "..."] \
//!     [--output spec.json] [--set name=value ...] [--labels]
//! ```
//!
//! `--set` overrides any property declared in chart.json. Log level comes from
//! `RUST_LOG` (default: info).

use anyhow::{bail, Context, Result};
use forecast_chart::chart::properties::registry;
use forecast_chart::config::ChartConfig;
use forecast_chart::pipeline::generate_chart;
use forecast_chart::series::TracingObserver;
use forecast_chart::table::RawTable;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    properties: HashMap<String, String>,
    labels: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let Some(input) = args.input else {
        bail!("missing --input <table.json>");
    };

    let json = std::fs::read_to_string(&input)
        .with_context(|| format!("could not read table {}", input.display()))?;
    let table = RawTable::from_json_str(&json)
        .with_context(|| format!("could not parse table {}", input.display()))?;

    let config = ChartConfig::from_properties(&args.properties);
    info!(kind = ?config.kind, title = %config.title, "configuration loaded");

    let spec = generate_chart(&table, &config, Some(&TracingObserver))
        .context("could not build chart specification")?;

    if args.labels {
        for (series, label) in spec.end_labels() {
            info!(series = %series, "end label: {}", label);
        }
    }

    let out = spec.to_json_pretty()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, out)
                .with_context(|| format!("could not write {}", path.display()))?;
            info!(path = %path.display(), "chart specification written");
        }
        None => println!("{}", out),
    }

    Ok(())
}

/// Parse command-line arguments
///
/// `--kind` and `--title` are shorthands for `--set chart.kind=...` and
/// `--set chart.title=...`.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .with_context(|| format!("{} requires a value", flag))
        };

        match arg.as_str() {
            "--input" | "-i" => parsed.input = Some(PathBuf::from(value(&arg)?)),
            "--output" | "-o" => parsed.output = Some(PathBuf::from(value(&arg)?)),
            "--kind" => {
                parsed
                    .properties
                    .insert("chart.kind".to_string(), value(&arg)?);
            }
            "--title" => {
                parsed
                    .properties
                    .insert("chart.title".to_string(), value(&arg)?);
            }
            "--set" => {
                let pair = value(&arg)?;
                let Some((name, v)) = pair.split_once('=') else {
                    bail!("--set expects name=value, got '{}'\n{}", pair, property_help());
                };
                let name = name.trim();
                if registry().get_property(name).is_none() {
                    bail!("unknown property '{}'\n{}", name, property_help());
                }
                parsed.properties.insert(name.to_string(), v.to_string());
            }
            "--labels" => parsed.labels = true,
            other => bail!("unknown argument '{}'", other),
        }
    }

    Ok(parsed)
}

/// One line per chart.json property: name, description and default
fn property_help() -> String {
    let mut help = String::from("properties:");
    for def in registry().properties() {
        help.push_str(&format!(
            "\n  {:<22} {} (default: '{}')",
            def.name, def.description, def.default_value
        ));
    }
    help
}
