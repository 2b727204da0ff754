//! Command-line front end.
//!
//! ```text
//! venuefee rank <dataset.json> [volume_m] [day_basis]
//! venuefee chart <dataset.json> <maker|taker> [day_basis]
//! venuefee update <dataset.json> <replacement.json>
//! ```
//!
//! `rank` prints maker and taker rankings of the perp venues, normalized to a
//! common day basis. `chart` prints the sampled fee curves of the same venues
//! as JSON. `update` runs the replacement through the same handler
//! the HTTP route uses and prints its JSON response.

use std::num::NonZeroU32;

use anyhow::{Context, bail};
use venuefee_core::chart::{
    chart_domains, chart_series, format_cumulative_fees, format_fee, format_volume,
};
use venuefee_core::{FeeSide, Product, RankingEntry, rank_at_volume};
use venuefee_infra::telemetry::{self, LoggingConfig};
use venuefee_infra::{DashboardConfig, DatasetStore, handle_update_dataset};

const USAGE: &str = "usage:\n  venuefee rank <dataset.json> [volume_m] [day_basis]\n  venuefee chart <dataset.json> <maker|taker> [day_basis]\n  venuefee update <dataset.json> <replacement.json>";

fn main() -> anyhow::Result<()> {
    let logging = LoggingConfig {
        json_output: std::env::var("VENUEFEE_LOG_JSON").is_ok_and(|v| v == "1"),
        ..LoggingConfig::default()
    };
    telemetry::init_logging(&logging).context("installing tracing subscriber")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("rank") => rank(&args[1..]),
        Some("chart") => chart(&args[1..]),
        Some("update") => update(&args[1..]),
        _ => bail!(USAGE),
    }
}

fn rank(args: &[String]) -> anyhow::Result<()> {
    let Some(path) = args.first() else {
        bail!(USAGE);
    };
    let config = DashboardConfig::from_env()?;

    let volume = match args.get(1) {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("volume '{raw}' is not a number"))?,
        None => config.default_hover_volume_m,
    };
    let day_basis = day_basis_arg(args.get(2), &config)?;

    let store = DatasetStore::open(path).with_context(|| format!("loading {path}"))?;
    let venues = store.snapshot().normalized(Product::Perp, day_basis);
    let rankings = rank_at_volume(&venues, volume);

    println!(
        "Rankings at {} ({day_basis}-day basis)",
        format_volume(volume)
    );
    println!("\nMaker");
    print_entries(&rankings.maker, |entry| {
        (entry.maker_fee, entry.maker_cumulative_fees)
    });
    println!("\nTaker");
    print_entries(&rankings.taker, |entry| {
        (entry.taker_fee, entry.taker_cumulative_fees)
    });
    Ok(())
}

fn chart(args: &[String]) -> anyhow::Result<()> {
    let (Some(path), Some(side)) = (args.first(), args.get(1)) else {
        bail!(USAGE);
    };
    let side = match side.as_str() {
        "maker" => FeeSide::Maker,
        "taker" => FeeSide::Taker,
        other => bail!("fee side '{other}' is not 'maker' or 'taker'"),
    };
    let config = DashboardConfig::from_env()?;
    let day_basis = day_basis_arg(args.get(2), &config)?;

    let store = DatasetStore::open(path).with_context(|| format!("loading {path}"))?;
    let venues = store.snapshot().normalized(Product::Perp, day_basis);
    let domains = chart_domains(&venues, &config.domains);
    let series = chart_series(&venues, side, domains.volume);

    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}

fn day_basis_arg(raw: Option<&String>, config: &DashboardConfig) -> anyhow::Result<NonZeroU32> {
    match raw {
        Some(raw) => raw
            .parse::<NonZeroU32>()
            .with_context(|| format!("day basis '{raw}' is not a positive integer")),
        None => Ok(config.default_day_basis),
    }
}

fn print_entries(entries: &[RankingEntry], side: impl Fn(&RankingEntry) -> (f64, f64)) {
    for (rank, entry) in entries.iter().enumerate() {
        let (fee, cumulative) = side(entry);
        println!(
            "{:>3}. {:<20} {:<5} {:>10}  ({})",
            rank + 1,
            entry.exchange,
            entry.venue_type.as_str(),
            format_fee(fee),
            format_cumulative_fees(cumulative)
        );
    }
}

fn update(args: &[String]) -> anyhow::Result<()> {
    let (Some(path), Some(body_path)) = (args.first(), args.get(1)) else {
        bail!(USAGE);
    };
    let store = DatasetStore::open(path).with_context(|| format!("loading {path}"))?;
    let body = std::fs::read(body_path).with_context(|| format!("reading {body_path}"))?;

    let response = handle_update_dataset(&store, &body);
    println!("{}", response.body_json());
    if !response.is_success() {
        bail!("update failed with status {}", response.status);
    }
    Ok(())
}
