/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Plain-text pairing sheets for the command line.

use crate::entrant::Entrant;
use crate::matches::{MatchSheet, Score};
use crate::scheduler::RoundSchedule;

/// One line per round, e.g. `"Round 1: W v 4 at table 1"`.
pub fn render_schedule(schedule: &RoundSchedule) -> String {
    let mut lines = vec![format!("Seed position {}", schedule.position)];
    lines.extend(
        schedule
            .iter()
            .map(|r| format!("  Round {}: {} at table {}", r.round, r, r.table)),
    );
    lines.join("\n")
}

/// Seat-by-seat sheet: pairing label, table and score per round, then total.
pub fn render_sheet(sheet: &MatchSheet, group_number: u32) -> String {
    let mut lines = vec![
        format!("{} (page {})", sheet.title, group_number),
        format!(
            "  {:<3} {:<24} {:>6}  {:<13} {:<13} {:<13} {:>5}",
            "Pos", "Name", "Rating", "Round 1", "Round 2", "Round 3", "Total"
        ),
    ];

    let standings = sheet.standings();

    for seat in &sheet.seats {
        let id = seat.entrant.id;
        let cells: Vec<String> = seat
            .schedule()
            .iter()
            .map(|r| {
                let score = sheet
                    .game(r.round, r.table)
                    .and_then(|m| m.score_for(id))
                    .map_or_else(|| "-".to_string(), |s| s.to_string());
                format!("{r} T{} {score:>3}", r.table)
            })
            .collect();
        let total = standings
            .iter()
            .find(|s| s.entrant == id)
            .map_or(Score::ZERO, |s| s.total);

        lines.push(format!(
            "  {:<3} {:<24} {:>6}  {:<13} {:<13} {:<13} {:>5}",
            seat.position,
            seat.entrant.name,
            seat.entrant.rating,
            cells[0],
            cells[1],
            cells[2],
            total.to_string()
        ));
    }

    lines.join("\n")
}

/// Entrants without a quad, or a note that everybody was seated.
pub fn render_leftover(leftover: &[Entrant]) -> String {
    if leftover.is_empty() {
        return String::from("All entrants seated.");
    }
    let mut lines = vec![format!("Unassigned ({}):", leftover.len())];
    lines.extend(leftover.iter().map(|e| format!("  {e}")));
    lines.join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
