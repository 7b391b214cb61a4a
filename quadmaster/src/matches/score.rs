/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Game scores in half-point units.
//!
//! A game is worth one point: `1`, `0.5` or `0` to each side.  Storing the
//! count of half points keeps totals exact without floating point.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::Serialize;

use super::MatchError;

/// Points scored, counted in halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "f64")]
pub struct Score(u32);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const HALF: Score = Score(1);
    pub const ONE: Score = Score(2);

    pub fn from_half_points(half_points: u32) -> Self {
        Score(half_points)
    }

    pub fn half_points(self) -> u32 {
        self.0
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::ZERO, Add::add)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> f64 {
        f64::from(score.0) / 2.0
    }
}

impl fmt::Display for Score {
    /// `"0"`, `"0.5"`, `"1"`, `"2.5"`, …
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 2;
        if self.0 % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

// ── MatchResult ───────────────────────────────────────────────────────────────

/// Outcome of one game, from the board's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl MatchResult {
    /// `(white, black)` scores for this outcome.
    pub fn scores(self) -> (Score, Score) {
        match self {
            MatchResult::WhiteWins => (Score::ONE, Score::ZERO),
            MatchResult::BlackWins => (Score::ZERO, Score::ONE),
            MatchResult::Draw => (Score::HALF, Score::HALF),
        }
    }
}

impl FromStr for MatchResult {
    type Err = MatchError;

    /// Accepts the usual scoresheet notations: `1-0`, `0-1`, `1/2-1/2`,
    /// `½-½`, `0.5-0.5` and `draw`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1-0" => Ok(MatchResult::WhiteWins),
            "0-1" => Ok(MatchResult::BlackWins),
            "1/2-1/2" | "½-½" | "0.5-0.5" | "draw" => Ok(MatchResult::Draw),
            _ => Err(MatchError::InvalidResult(s.to_string())),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::WhiteWins => write!(f, "1-0"),
            MatchResult::BlackWins => write!(f, "0-1"),
            MatchResult::Draw => write!(f, "1/2-1/2"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_decimal_halves() {
        assert_eq!(Score::ZERO.to_string(), "0");
        assert_eq!(Score::HALF.to_string(), "0.5");
        assert_eq!(Score::ONE.to_string(), "1");
        assert_eq!(Score::from_half_points(5).to_string(), "2.5");
    }

    #[test]
    fn sum_of_three_games() {
        let total: Score = [Score::ONE, Score::HALF, Score::ONE].into_iter().sum();
        assert_eq!(total.half_points(), 5);
        assert_eq!(f64::from(total), 2.5);
    }

    #[test]
    fn every_result_awards_one_point_in_total() {
        for r in [MatchResult::WhiteWins, MatchResult::BlackWins, MatchResult::Draw] {
            let (w, b) = r.scores();
            assert_eq!(w + b, Score::ONE, "{r}");
        }
    }

    #[test]
    fn parses_common_notations() {
        assert_eq!("1-0".parse::<MatchResult>().unwrap(), MatchResult::WhiteWins);
        assert_eq!(" 0-1 ".parse::<MatchResult>().unwrap(), MatchResult::BlackWins);
        assert_eq!("½-½".parse::<MatchResult>().unwrap(), MatchResult::Draw);
        assert_eq!("Draw".parse::<MatchResult>().unwrap(), MatchResult::Draw);
    }

    #[test]
    fn rejects_unknown_notation() {
        let err = "2-0".parse::<MatchResult>().unwrap_err();
        assert_eq!(err, MatchError::InvalidResult("2-0".into()));
    }
}
