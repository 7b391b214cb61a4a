//! Match sheets, result recording and standings for a single quad.
//!
//! A [`MatchSheet`] expands a seated [`Quad`] into its six games (three rounds
//! × two tables) using the fixed pairing table, then collects results and
//! totals them per entrant.
//!
//! Player one of every [`QuadMatch`] is the White player.  Names and ratings
//! are copied onto the match so the sheet stays readable even if the roster
//! changes afterwards.

pub mod score;

pub use score::{MatchResult, Score};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::entrant::{Color, Entrant, EntrantId, SeedPosition};
use crate::scheduler::pairing::{pairings_for_round, ROUNDS, TABLES_PER_ROUND};
use crate::scheduler::{Assignment, Quad, QuadId, SchedulerError};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Match sheets only exist for full quads.
    #[error("quad {quad} has {members} member(s), a match sheet needs 4")]
    QuadIncomplete { quad: QuadId, members: usize },

    #[error("no quad {0} in this plan")]
    UnknownQuad(QuadId),

    #[error("quad {quad} has no game at round {round}, table {table}")]
    UnknownPairing { quad: QuadId, round: u8, table: u8 },

    #[error("result already recorded for quad {quad}, round {round}, table {table}")]
    ResultAlreadyRecorded { quad: QuadId, round: u8, table: u8 },

    #[error("unrecognised result '{0}' (expected 1-0, 0-1 or 1/2-1/2)")]
    InvalidResult(String),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

// ── QuadMatch ─────────────────────────────────────────────────────────────────

/// One game inside a quad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuadMatch {
    pub quad: QuadId,
    pub round: u8,
    pub table: u8,

    pub player_one: EntrantId,
    pub player_two: EntrantId,
    pub player_one_name: String,
    pub player_two_name: String,
    pub player_one_rating: i32,
    pub player_two_rating: i32,
    pub player_one_color: Color,

    pub player_one_score: Option<Score>,
    pub player_two_score: Option<Score>,
    pub is_complete: bool,
}

impl QuadMatch {
    fn new(quad: QuadId, round: u8, table: u8, white: &Entrant, black: &Entrant) -> Self {
        Self {
            quad,
            round,
            table,
            player_one: white.id,
            player_two: black.id,
            player_one_name: white.name.clone(),
            player_two_name: black.name.clone(),
            player_one_rating: white.rating,
            player_two_rating: black.rating,
            player_one_color: Color::White,
            player_one_score: None,
            player_two_score: None,
            is_complete: false,
        }
    }

    /// Record the outcome of this game.
    ///
    /// # Errors
    /// [`MatchError::ResultAlreadyRecorded`] if a result is already set.
    /// Corrections are made by rebuilding the sheet.
    pub fn record_result(&mut self, result: MatchResult) -> Result<(), MatchError> {
        if self.is_complete {
            return Err(MatchError::ResultAlreadyRecorded {
                quad: self.quad,
                round: self.round,
                table: self.table,
            });
        }

        let (white, black) = result.scores();
        let (one, two) = match self.player_one_color {
            Color::White => (white, black),
            Color::Black => (black, white),
        };
        self.player_one_score = Some(one);
        self.player_two_score = Some(two);
        self.is_complete = true;
        Ok(())
    }

    /// Score earned by `entrant` in this game, if it played and a result is in.
    pub fn score_for(&self, entrant: EntrantId) -> Option<Score> {
        if entrant == self.player_one {
            self.player_one_score
        } else if entrant == self.player_two {
            self.player_two_score
        } else {
            None
        }
    }

    pub fn involves(&self, entrant: EntrantId) -> bool {
        entrant == self.player_one || entrant == self.player_two
    }
}

/// Build the six games of a full quad, ordered by round then table.
///
/// # Errors
/// [`MatchError::QuadIncomplete`] unless the quad has exactly four members.
pub fn generate_matches(quad: &Quad) -> Result<Vec<QuadMatch>, MatchError> {
    if !quad.is_full() {
        return Err(MatchError::QuadIncomplete {
            quad: quad.id,
            members: quad.assignments.len(),
        });
    }

    let mut matches = Vec::with_capacity(usize::from(ROUNDS * TABLES_PER_ROUND));
    for round in 1..=ROUNDS {
        for board in pairings_for_round(round)? {
            let (Some(white), Some(black)) = (quad.at(board.white), quad.at(board.black))
            else {
                return Err(MatchError::UnknownPairing {
                    quad: quad.id,
                    round,
                    table: board.table,
                });
            };
            matches.push(QuadMatch::new(
                quad.id,
                round,
                board.table,
                &white.entrant,
                &black.entrant,
            ));
        }
    }

    debug!(quad = quad.id, games = matches.len(), "match sheet generated");
    Ok(matches)
}

// ── Standings ─────────────────────────────────────────────────────────────────

/// One row of a quad's crosstable summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub position: SeedPosition,
    pub entrant: EntrantId,
    pub name: String,
    pub rating: i32,
    pub total: Score,
    /// Games with a recorded result.
    pub played: u8,
}

// ── Recorded results ──────────────────────────────────────────────────────────

/// A result entered for one game, addressed by quad, round and table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedResult {
    pub quad: QuadId,
    pub round: u8,
    pub table: u8,
    pub result: MatchResult,
}

// ── MatchSheet ────────────────────────────────────────────────────────────────

/// All games of one quad plus the seats they were derived from.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSheet {
    pub quad: QuadId,
    pub title: String,
    pub seats: Vec<Assignment>,
    pub matches: Vec<QuadMatch>,
}

impl MatchSheet {
    /// Generate a fresh sheet (no results) for `quad`.
    pub fn new(quad: &Quad) -> Result<Self, MatchError> {
        Ok(Self {
            quad: quad.id,
            title: quad.title.clone(),
            seats: quad.assignments.clone(),
            matches: generate_matches(quad)?,
        })
    }

    /// Game played at `table` in `round`.
    pub fn game(&self, round: u8, table: u8) -> Option<&QuadMatch> {
        self.matches
            .iter()
            .find(|m| m.round == round && m.table == table)
    }

    /// Record `result` for the game at `round` / `table`.
    ///
    /// # Errors
    /// * [`MatchError::Scheduler`] for a round outside `1..=3`.
    /// * [`MatchError::UnknownPairing`] if no game sits at that table.
    /// * [`MatchError::ResultAlreadyRecorded`] on a second entry.
    pub fn record(
        &mut self,
        round: u8,
        table: u8,
        result: MatchResult,
    ) -> Result<&QuadMatch, MatchError> {
        if !(1..=ROUNDS).contains(&round) {
            return Err(SchedulerError::InvalidRound(round).into());
        }

        let quad = self.quad;
        let game = self
            .matches
            .iter_mut()
            .find(|m| m.round == round && m.table == table)
            .ok_or(MatchError::UnknownPairing { quad, round, table })?;

        if let Err(e) = game.record_result(result) {
            warn!(quad, round, table, "{e}");
            return Err(e);
        }

        info!(
            quad,
            round,
            table,
            white = %game.player_one_name,
            black = %game.player_two_name,
            result = %result,
            "result recorded"
        );
        Ok(game)
    }

    /// `true` once every game of `round` has a result.
    pub fn round_complete(&self, round: u8) -> bool {
        let mut games = self.matches.iter().filter(|m| m.round == round).peekable();
        games.peek().is_some() && games.all(|m| m.is_complete)
    }

    /// `true` once all six games have a result.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| m.is_complete)
    }

    /// Per-entrant totals, best first; ties keep seed order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .seats
            .iter()
            .map(|seat| {
                let id = seat.entrant.id;
                let scores: Vec<Score> = self
                    .matches
                    .iter()
                    .filter_map(|m| m.score_for(id))
                    .collect();
                Standing {
                    position: seat.position,
                    entrant: id,
                    name: seat.entrant.name.clone(),
                    rating: seat.entrant.rating,
                    played: scores.len() as u8,
                    total: scores.into_iter().sum(),
                }
            })
            .collect();

        rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.position.cmp(&b.position)));
        rows
    }
}

/// Replay `results` onto `sheets` in order.
///
/// A bad entry does not stop the replay: it is logged, skipped and returned
/// so the caller can report it.  Entries for quads absent from `sheets` come
/// back as [`MatchError::UnknownQuad`].
pub fn apply_results(sheets: &mut [MatchSheet], results: &[RecordedResult]) -> Vec<MatchError> {
    let mut rejected = Vec::new();

    for entry in results {
        let Some(sheet) = sheets.iter_mut().find(|s| s.quad == entry.quad) else {
            warn!(quad = entry.quad, "Result for unknown quad ignored");
            rejected.push(MatchError::UnknownQuad(entry.quad));
            continue;
        };
        if let Err(e) = sheet.record(entry.round, entry.table, entry.result) {
            warn!("Result ignored: {e}");
            rejected.push(e);
        }
    }

    info!(
        results = results.len(),
        rejected = rejected.len(),
        "Recorded results applied"
    );
    rejected
}

// ── Tests ─────────────────────────────────────────────────────────────────────
