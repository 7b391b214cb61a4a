/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Fixed three-round round-robin schedule for a quad of four.
//!
//! Every quad plays the same schedule.  A member's seed position alone
//! determines whom it meets, with which color, and at which table:
//!
//! | Position | Round 1      | T | Round 2      | T | Round 3      | T |
//! |---|---|---|---|---|---|---|
//! | 1 | White vs 4 | 1 | Black vs 3 | 1 | White vs 2 | 1 |
//! | 2 | White vs 3 | 2 | Black vs 4 | 2 | Black vs 1 | 1 |
//! | 3 | Black vs 2 | 2 | White vs 1 | 1 | White vs 4 | 2 |
//! | 4 | Black vs 1 | 1 | White vs 2 | 2 | Black vs 3 | 2 |
//!
//! Round 1 pairs {1-4, 2-3}, round 2 pairs {1-3, 2-4}, round 3 pairs
//! {1-2, 3-4}, so each of the six pairs meets exactly once.
//!
//! The table is data, not an algorithm: nothing here is computed at runtime
//! beyond indexing it.

use std::fmt;

use serde::Serialize;

use super::SchedulerError;
use crate::entrant::{Color, SeedPosition};

use crate::entrant::Color::{Black as B, White as W};
use crate::entrant::SeedPosition::{Four as P4, One as P1, Three as P3, Two as P2};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Rounds played inside one quad.
pub const ROUNDS: u8 = 3;

/// Boards used by one quad in every round.
pub const TABLES_PER_ROUND: u8 = 2;

/// `PAIRING_TABLE[position - 1][round - 1] = (opponent, color, table)`.
const PAIRING_TABLE: [[(SeedPosition, Color, u8); ROUNDS as usize]; 4] = [
    [(P4, W, 1), (P3, B, 1), (P2, W, 1)],
    [(P3, W, 2), (P4, B, 2), (P1, B, 1)],
    [(P2, B, 2), (P1, W, 1), (P4, W, 2)],
    [(P1, B, 1), (P2, W, 2), (P3, B, 2)],
];

// ── RoundPairing ──────────────────────────────────────────────────────────────

/// One entrant's assignment for a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundPairing {
    /// Round number, 1-based.
    pub round: u8,
    pub opponent: SeedPosition,
    pub color: Color,
    /// Table number within the quad, 1-based.
    pub table: u8,
}

impl fmt::Display for RoundPairing {
    /// Pairing-sheet form, e.g. `"W v 4"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v {}", self.color.abbrev(), self.opponent)
    }
}

// ── RoundSchedule ─────────────────────────────────────────────────────────────

/// The complete three-round schedule for one seed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSchedule {
    pub position: SeedPosition,
    pub rounds: [RoundPairing; ROUNDS as usize],
}

impl RoundSchedule {
    /// Pairing for `round` (1-based).
    ///
    /// # Errors
    /// [`SchedulerError::InvalidRound`] when `round` is not in `1..=3`.
    pub fn round(&self, round: u8) -> Result<&RoundPairing, SchedulerError> {
        round_index(round).map(|i| &self.rounds[i])
    }

    /// Iterate the three rounds in order.
    pub fn iter(&self) -> impl Iterator<Item = &RoundPairing> {
        self.rounds.iter()
    }
}

// ── Table pairing ─────────────────────────────────────────────────────────────

/// Both sides of one board in one round, as seen by the tournament director.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TablePairing {
    pub round: u8,
    pub table: u8,
    pub white: SeedPosition,
    pub black: SeedPosition,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Returns the fixed schedule for `position`.
///
/// Total over [`SeedPosition`]; an out-of-range raw position has to be
/// rejected earlier by `SeedPosition::try_from`.
pub fn schedule_for(position: SeedPosition) -> RoundSchedule {
    let row = &PAIRING_TABLE[position.index()];
    let pairing = |i: usize| {
        let (opponent, color, table) = row[i];
        RoundPairing {
            round: i as u8 + 1,
            opponent,
            color,
            table,
        }
    };

    RoundSchedule {
        position,
        rounds: [pairing(0), pairing(1), pairing(2)],
    }
}

/// The two boards played in `round`, ordered by table number.
///
/// Derived from the White side of [`PAIRING_TABLE`], so it can never disagree
/// with [`schedule_for`].
///
/// # Errors
/// [`SchedulerError::InvalidRound`] when `round` is not in `1..=3`.
pub fn pairings_for_round(round: u8) -> Result<Vec<TablePairing>, SchedulerError> {
    let i = round_index(round)?;

    let mut boards: Vec<TablePairing> = SeedPosition::ALL
        .iter()
        .filter_map(|&position| {
            let (opponent, color, table) = PAIRING_TABLE[position.index()][i];
            (color == Color::White).then_some(TablePairing {
                round,
                table,
                white: position,
                black: opponent,
            })
        })
        .collect();

    boards.sort_by_key(|b| b.table);
    Ok(boards)
}

fn round_index(round: u8) -> Result<usize, SchedulerError> {
    if (1..=ROUNDS).contains(&round) {
        Ok(usize::from(round - 1))
    } else {
        Err(SchedulerError::InvalidRound(round))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pos(v: u8) -> SeedPosition {
        SeedPosition::try_from(v).unwrap()
    }

    // ── Literal table ─────────────────────────────────────────────────────────

    #[test]
    fn schedule_matches_published_table() {
        // (position, [(color, opponent, table); 3])
        let expected: [(u8, [(Color, u8, u8); 3]); 4] = [
            (1, [(W, 4, 1), (B, 3, 1), (W, 2, 1)]),
            (2, [(W, 3, 2), (B, 4, 2), (B, 1, 1)]),
            (3, [(B, 2, 2), (W, 1, 1), (W, 4, 2)]),
            (4, [(B, 1, 1), (W, 2, 2), (B, 3, 2)]),
        ];

        for (p, rounds) in expected {
            let sched = schedule_for(pos(p));
            assert_eq!(sched.position, pos(p));
            for (i, (color, opp, table)) in rounds.into_iter().enumerate() {
                let r = &sched.rounds[i];
                assert_eq!(r.round, i as u8 + 1);
                assert_eq!(r.color, color, "position {p} round {}", i + 1);
                assert_eq!(r.opponent, pos(opp), "position {p} round {}", i + 1);
                assert_eq!(r.table, table, "position {p} round {}", i + 1);
            }
        }
    }

    #[test]
    fn pairing_display_uses_sheet_format() {
        let sched = schedule_for(SeedPosition::Two);
        let labels: Vec<String> = sched.iter().map(|r| r.to_string()).collect();
        assert_eq!(labels, vec!["W v 3", "B v 4", "B v 1"]);
    }

    // ── Round-robin properties ────────────────────────────────────────────────

    #[test]
    fn every_position_meets_the_other_three_exactly_once() {
        for p in SeedPosition::ALL {
            let opponents: Vec<SeedPosition> =
                schedule_for(p).iter().map(|r| r.opponent).collect();
            let unique: HashSet<SeedPosition> = opponents.iter().copied().collect();
            assert_eq!(opponents.len(), 3);
            assert_eq!(unique.len(), 3, "position {p} repeats an opponent");
            assert!(!unique.contains(&p), "position {p} plays itself");
        }
    }

    #[test]
    fn opponents_name_each_other_with_opposite_colors_and_same_table() {
        for p in SeedPosition::ALL {
            for r in schedule_for(p).iter() {
                let other = schedule_for(r.opponent).rounds[usize::from(r.round - 1)];
                assert_eq!(other.opponent, p, "round {} asymmetry for {p}", r.round);
                assert_eq!(other.color, r.color.opposite());
                assert_eq!(other.table, r.table);
            }
        }
    }

    #[test]
    fn every_pair_meets_exactly_once_across_rounds() {
        let mut pairs = HashSet::new();
        for round in 1..=ROUNDS {
            for b in pairings_for_round(round).unwrap() {
                let key = (b.white.min(b.black), b.white.max(b.black));
                assert!(pairs.insert(key), "pair {key:?} repeated");
            }
        }
        assert_eq!(pairs.len(), 6);
    }

    // ── pairings_for_round ────────────────────────────────────────────────────

    #[test]
    fn round_boards_follow_table() {
        let r1 = pairings_for_round(1).unwrap();
        assert_eq!(
            r1,
            vec![
                TablePairing {
                    round: 1,
                    table: 1,
                    white: P1,
                    black: P4,
                },
                TablePairing {
                    round: 1,
                    table: 2,
                    white: P2,
                    black: P3,
                },
            ]
        );

        let r2 = pairings_for_round(2).unwrap();
        assert_eq!(
            r2,
            vec![
                TablePairing {
                    round: 2,
                    table: 1,
                    white: P3,
                    black: P1,
                },
                TablePairing {
                    round: 2,
                    table: 2,
                    white: P4,
                    black: P2,
                },
            ]
        );

        let r3 = pairings_for_round(3).unwrap();
        assert_eq!(
            r3,
            vec![
                TablePairing {
                    round: 3,
                    table: 1,
                    white: P1,
                    black: P2,
                },
                TablePairing {
                    round: 3,
                    table: 2,
                    white: P3,
                    black: P4,
                },
            ]
        );
    }

    #[test]
    fn each_round_uses_both_tables_once() {
        for round in 1..=ROUNDS {
            let tables: Vec<u8> = pairings_for_round(round)
                .unwrap()
                .iter()
                .map(|b| b.table)
                .collect();
            assert_eq!(tables, (1..=TABLES_PER_ROUND).collect::<Vec<_>>());
        }
    }

    #[test]
    fn invalid_round_is_rejected() {
        assert_eq!(pairings_for_round(0), Err(SchedulerError::InvalidRound(0)));
        assert_eq!(pairings_for_round(4), Err(SchedulerError::InvalidRound(4)));
        assert!(schedule_for(P1).round(4).is_err());
        assert_eq!(schedule_for(P1).round(3).unwrap().opponent, P2);
    }
}
