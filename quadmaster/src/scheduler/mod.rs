//! Quad scheduler for QuadMaster.
//!
//! [`QuadScheduler`] partitions a tournament's entrants into quads of four,
//! gives each member a seed position 1–4, and leaves the remainder unassigned.
//! The three-round pairing schedule implied by a seed position lives in
//! [`pairing`].
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless `build_quads()`: every run recomputes from scratch |
//! | Ordering | Stable sort by rating descending; ties keep input order |
//! | Failure | None: `build_quads()` is total, the pairing table is indexed by a typed [`SeedPosition`] |
//! | Thread safety | `Send + Sync` (no interior mutability) |
//! | Paging | `group_number` derived from creation order, `quads_per_group` per page |
//!
//! # Example
//! ```rust
//! use quadmaster::entrant::Entrant;
//! use quadmaster::scheduler::QuadScheduler;
//!
//! let entrants = vec![
//!     Entrant::new(1, "A", 2000),
//!     Entrant::new(2, "B", 1900),
//!     Entrant::new(3, "C", 1800),
//!     Entrant::new(4, "D", 1700),
//!     Entrant::new(5, "E", 1600),
//! ];
//!
//! let plan = QuadScheduler::new().build_quads(entrants);
//! assert_eq!(plan.quads.len(), 1);
//! assert_eq!(plan.leftover.len(), 1);
//! ```

pub mod error;
pub mod pairing;

pub use error::SchedulerError;
pub use pairing::{schedule_for, RoundPairing, RoundSchedule, TablePairing};

use serde::Serialize;
use tracing::{debug, info};

use crate::entrant::{Entrant, EntrantId, SeedPosition};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Members of a complete quad.
pub const QUAD_SIZE: usize = 4;

/// Quads shown per display page unless configured otherwise.
pub const DEFAULT_QUADS_PER_GROUP: usize = 4;

/// Sequential quad identifier, 1-based in creation order.
pub type QuadId = u32;

// ── Output types ──────────────────────────────────────────────────────────────

/// One entrant's seat in a quad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub entrant: Entrant,
    pub quad: QuadId,
    pub position: SeedPosition,
}

impl Assignment {
    /// The three-round schedule implied by this seat.
    pub fn schedule(&self) -> RoundSchedule {
        schedule_for(self.position)
    }
}

/// A group of four entrants playing a three-round round-robin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quad {
    pub id: QuadId,
    pub title: String,
    /// Display page this quad belongs to (1-based).
    pub group_number: u32,
    /// Members in seed order: `assignments[j].position == j + 1`.
    pub assignments: Vec<Assignment>,
}

impl Quad {
    /// Member seated at `position`, if any.
    pub fn at(&self, position: SeedPosition) -> Option<&Assignment> {
        self.assignments.get(position.index())
    }

    /// Assignment of `entrant`, if it plays in this quad.
    pub fn find(&self, entrant: EntrantId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.entrant.id == entrant)
    }

    pub fn is_full(&self) -> bool {
        self.assignments.len() == QUAD_SIZE
    }
}

/// Result of one scheduler run for a tournament.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuadPlan {
    pub quads: Vec<Quad>,
    /// Entrants that did not fill a complete quad, in rating order.
    pub leftover: Vec<Entrant>,
    /// Quads per display page.
    pub quads_per_group: usize,
}

impl QuadPlan {
    /// Number of display pages (0 when there are no quads).
    pub fn total_pages(&self) -> usize {
        self.quads.len().div_ceil(self.quads_per_group.max(1))
    }

    /// Quads on display page `page` (1-based).
    ///
    /// Returns an empty slice for page `0` or a page past the end.
    pub fn page(&self, page: usize) -> &[Quad] {
        let per = self.quads_per_group.max(1);
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(per);
        if start >= self.quads.len() {
            return &[];
        }
        let end = (start + per).min(self.quads.len());
        &self.quads[start..end]
    }

    /// The plan restricted to display page `page` (1-based).
    ///
    /// Quads keep their ids and group numbers; `leftover` is carried over
    /// unchanged so every page still lists who was not seated.
    ///
    /// # Errors
    /// * [`SchedulerError::NoQuads`] when the plan has no quads at all.
    /// * [`SchedulerError::PageOutOfRange`] for page `0` or past the end.
    pub fn for_page(&self, page: usize) -> Result<QuadPlan, SchedulerError> {
        let pages = self.total_pages();
        if pages == 0 {
            return Err(SchedulerError::NoQuads(page));
        }
        if page == 0 || page > pages {
            return Err(SchedulerError::PageOutOfRange { page, pages });
        }

        Ok(QuadPlan {
            quads: self.page(page).to_vec(),
            leftover: self.leftover.clone(),
            quads_per_group: self.quads_per_group,
        })
    }

    /// Assignment of `entrant` across all quads, if it was seated.
    pub fn find(&self, entrant: EntrantId) -> Option<&Assignment> {
        self.quads.iter().find_map(|q| q.find(entrant))
    }

    /// Number of entrants that received a seat.
    pub fn assigned_count(&self) -> usize {
        self.quads.iter().map(|q| q.assignments.len()).sum()
    }
}

// ── QuadScheduler ─────────────────────────────────────────────────────────────

/// Builds quads from a tournament's entrants.
///
/// Holds display settings only; all per-run state lives inside
/// [`build_quads`](Self::build_quads).
#[derive(Debug, Clone)]
pub struct QuadScheduler {
    quads_per_group: usize,
}

impl Default for QuadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadScheduler {
    /// Scheduler with the default page size of four quads.
    pub fn new() -> Self {
        Self {
            quads_per_group: DEFAULT_QUADS_PER_GROUP,
        }
    }

    /// Scheduler with a custom page size.  `0` is treated as `1`.
    pub fn with_quads_per_group(quads_per_group: usize) -> Self {
        Self {
            quads_per_group: quads_per_group.max(1),
        }
    }

    pub fn quads_per_group(&self) -> usize {
        self.quads_per_group
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Partition `entrants` into quads and seat each member.
    ///
    /// Entrants are sorted by rating descending with a stable sort, so an
    /// already-sorted list is left untouched and ties keep their input order.
    /// Group `i` takes entrants `[4i, 4i + 4)`; the `len % 4` lowest-rated
    /// entrants come back as [`QuadPlan::leftover`].
    ///
    /// Never fails: an empty list yields an empty plan.
    pub fn build_quads(&self, mut entrants: Vec<Entrant>) -> QuadPlan {
        entrants.sort_by(|a, b| b.rating.cmp(&a.rating));

        let complete = entrants.len() / QUAD_SIZE;
        let leftover = entrants.split_off(complete * QUAD_SIZE);

        info!(
            entrants = entrants.len() + leftover.len(),
            quads = complete,
            leftover = leftover.len(),
            "=== QuadScheduler::build_quads() ==="
        );

        let mut quads = Vec::with_capacity(complete);
        let mut members = entrants.into_iter();

        for i in 0..complete {
            let id = i as QuadId + 1;
            let group_number = (i / self.quads_per_group) as u32 + 1;

            let assignments: Vec<Assignment> = members
                .by_ref()
                .take(QUAD_SIZE)
                .zip(SeedPosition::ALL)
                .map(|(entrant, position)| Assignment {
                    entrant,
                    quad: id,
                    position,
                })
                .collect();

            debug!(
                quad = id,
                group = group_number,
                top = assignments.first().map(|a| a.entrant.rating),
                bottom = assignments.last().map(|a| a.entrant.rating),
                "quad built"
            );

            quads.push(Quad {
                id,
                title: format!("Quad {id}"),
                group_number,
                assignments,
            });
        }

        for e in &leftover {
            debug!(entrant = e.id, rating = e.rating, "unassigned");
        }

        QuadPlan {
            quads,
            leftover,
            quads_per_group: self.quads_per_group,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
