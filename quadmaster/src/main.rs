/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{error, info, warn};

use quadmaster::config::{RosterManager, Tournament};
use quadmaster::entrant::SeedPosition;
use quadmaster::matches::{self, MatchSheet};
use quadmaster::report;
use quadmaster::scheduler::{schedule_for, QuadPlan, QuadScheduler};

// ── CLI argument definition ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Yaml,
}

/// QuadMaster – build quads and pairing sheets from a tournament roster.
///
/// Example:
///   quadmaster --roster demos/roster.yaml --page 1
///   quadmaster --position 3
#[derive(Debug, Parser)]
#[command(
    name = "quadmaster",
    about = "QuadMaster – quad assignment and round-robin pairing",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML tournament roster.
    #[arg(short = 'r', long = "roster")]
    roster: Option<PathBuf>,

    /// Only print quads on this display page (1-based).
    #[arg(short = 'p', long = "page")]
    page: Option<usize>,

    /// Print the three-round schedule for a seed position (1-4) and exit.
    #[arg(short = 's', long = "position")]
    position: Option<u8>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Show sheets even for a completed or cancelled tournament.
    #[arg(long = "force", default_value_t = false)]
    force: bool,
}

/// Everything written by `--format yaml`.
#[derive(Serialize)]
struct Export<'a> {
    tournament: &'a Tournament,
    plan: &'a QuadPlan,
    sheets: &'a [MatchSheet],
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        roster   = ?cli.roster,
        page     = ?cli.page,
        position = ?cli.position,
        format   = ?cli.format,
        force    = cli.force,
        "Configuration"
    );

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ── Single position lookup ────────────────────────────────────────────────
    if let Some(raw) = cli.position {
        let position = SeedPosition::try_from(raw)?;
        let schedule = schedule_for(position);
        match cli.format {
            Format::Text => println!("{}", report::render_schedule(&schedule)),
            Format::Yaml => print!("{}", serde_yaml::to_string(&schedule)?),
        }
        return Ok(());
    }

    let Some(path) = &cli.roster else {
        bail!("either --roster or --position is required");
    };

    // ── Load roster ───────────────────────────────────────────────────────────
    let mut roster = RosterManager::new();
    roster.load_from_file(path)?;
    let tournament = roster.tournament();
    tournament.ensure_sheets_available(cli.force)?;

    // ── Build quads ───────────────────────────────────────────────────────────
    let scheduler = QuadScheduler::with_quads_per_group(tournament.quads_per_page);
    let plan = scheduler.build_quads(roster.entrants().to_vec());

    info!(
        tournament = %tournament.name,
        quads = plan.quads.len(),
        pages = plan.total_pages(),
        leftover = plan.leftover.len(),
        "Quads built"
    );

    // ── Match sheets + recorded results ───────────────────────────────────────
    let mut sheets = plan
        .quads
        .iter()
        .map(MatchSheet::new)
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to generate match sheets")?;

    let rejected = matches::apply_results(&mut sheets, roster.results());
    if !rejected.is_empty() {
        warn!(rejected = rejected.len(), "Some recorded results were ignored");
    }

    // ── Output ────────────────────────────────────────────────────────────────
    let shown = match cli.page {
        Some(page) => plan.for_page(page)?,
        None => plan,
    };
    sheets.retain(|s| shown.quads.iter().any(|q| q.id == s.quad));

    match cli.format {
        Format::Text => {
            println!("{}", tournament.name);
            for (quad, sheet) in shown.quads.iter().zip(&sheets) {
                println!();
                println!("{}", report::render_sheet(sheet, quad.group_number));
            }
            println!();
            println!("{}", report::render_leftover(&shown.leftover));
        }
        Format::Yaml => {
            let export = Export {
                tournament,
                plan: &shown,
                sheets: &sheets,
            };
            print!("{}", serde_yaml::to_string(&export)?);
        }
    }

    Ok(())
}
