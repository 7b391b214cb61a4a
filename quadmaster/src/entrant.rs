/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core entrant data structures for the QuadMaster scheduler.
//!
//! Three small types carry the whole input side of the pipeline:
//!
//! ```text
//! roster.yaml ──(RosterManager)──►  Entrant  ──(QuadScheduler)──►  Assignment { SeedPosition }
//!                                    ↑ input                          ↑ output
//!                                    immutable                        fixed per quad
//! ```
//!
//! # Ownership model
//! The caller moves `Vec<Entrant>` into [`QuadScheduler::build_quads`].  Each
//! entrant ends up owned by exactly one place: an [`Assignment`] inside a
//! quad, or the plan's leftover list.
//!
//! [`QuadScheduler::build_quads`]: crate::scheduler::QuadScheduler::build_quads
//! [`Assignment`]: crate::scheduler::Assignment

use std::fmt;

use serde::Serialize;

use crate::scheduler::SchedulerError;

/// Stable identifier of a player registered to a tournament.
pub type EntrantId = u32;

// ── Entrant ───────────────────────────────────────────────────────────────────

/// A player registered to a tournament.
///
/// `rating` is an opaque ordering key; it is never validated, and negative or
/// zero values are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
    pub rating: i32,
}

impl Entrant {
    pub fn new(id: EntrantId, name: impl Into<String>, rating: i32) -> Self {
        Self {
            id,
            name: name.into(),
            rating,
        }
    }
}

impl fmt::Display for Entrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rating)
    }
}

// ── Seed position ─────────────────────────────────────────────────────────────

/// Rank (1–4) of an entrant inside its quad.
///
/// Position 1 is the highest-rated member.  The position alone determines the
/// entrant's opponents, colors and tables for all three rounds (see
/// [`schedule_for`](crate::scheduler::pairing::schedule_for)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum SeedPosition {
    One,
    Two,
    Three,
    Four,
}

impl SeedPosition {
    /// All four positions in seed order.
    pub const ALL: [SeedPosition; 4] = [
        SeedPosition::One,
        SeedPosition::Two,
        SeedPosition::Three,
        SeedPosition::Four,
    ];

    /// 1-based numeric value.
    pub fn get(self) -> u8 {
        match self {
            SeedPosition::One => 1,
            SeedPosition::Two => 2,
            SeedPosition::Three => 3,
            SeedPosition::Four => 4,
        }
    }

    /// 0-based slot inside a quad.
    pub fn index(self) -> usize {
        usize::from(self.get() - 1)
    }
}

impl TryFrom<u8> for SeedPosition {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SeedPosition::One),
            2 => Ok(SeedPosition::Two),
            3 => Ok(SeedPosition::Three),
            4 => Ok(SeedPosition::Four),
            other => Err(SchedulerError::InvalidSeedPosition(other)),
        }
    }
}

impl From<SeedPosition> for u8 {
    fn from(position: SeedPosition) -> Self {
        position.get()
    }
}

impl fmt::Display for SeedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// ── Color ─────────────────────────────────────────────────────────────────────

/// Piece color an entrant plays with in a given round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The color the opponent plays with.
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Single-letter form used on printed pairing sheets (`"W"` / `"B"`).
    pub fn abbrev(self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Black => "B",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── SeedPosition ──────────────────────────────────────────────────────────

    #[test]
    fn seed_position_accepts_one_through_four() {
        for v in 1..=4u8 {
            let p = SeedPosition::try_from(v).unwrap();
            assert_eq!(p.get(), v);
        }
    }

    #[test]
    fn seed_position_rejects_out_of_range_values() {
        assert!(matches!(
            SeedPosition::try_from(0),
            Err(SchedulerError::InvalidSeedPosition(0))
        ));
        assert!(matches!(
            SeedPosition::try_from(5),
            Err(SchedulerError::InvalidSeedPosition(5))
        ));
    }

    #[test]
    fn seed_position_serializes_as_number() {
        let yaml = serde_yaml::to_string(&SeedPosition::Three).unwrap();
        assert_eq!(yaml.trim(), "3");
    }

    // ── Color ─────────────────────────────────────────────────────────────────

    #[test]
    fn color_opposite_flips() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn color_abbrev_matches_pairing_sheet_letters() {
        assert_eq!(Color::White.abbrev(), "W");
        assert_eq!(Color::Black.abbrev(), "B");
    }

    // ── Entrant ───────────────────────────────────────────────────────────────

    #[test]
    fn entrant_accepts_negative_rating() {
        let e = Entrant::new(7, "Newcomer", -15);
        assert_eq!(e.rating, -15);
        assert_eq!(e.to_string(), "Newcomer (-15)");
    }
}
