/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the quad scheduler.
//!
//! [`QuadScheduler::build_quads`](super::QuadScheduler::build_quads) and
//! [`schedule_for`](super::pairing::schedule_for) are total over their typed
//! inputs and never return these.  They are produced only where a raw number
//! from outside the crate (CLI flag, roster file, result entry) has to be
//! turned into a [`SeedPosition`](crate::entrant::SeedPosition), a round or a
//! display page.

use thiserror::Error;

/// Rejected raw scheduler input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A seed position outside `1..=4`.
    #[error("invalid seed position {0} (valid: 1-4)")]
    InvalidSeedPosition(u8),

    /// A round number outside `1..=3`.
    #[error("invalid round {0} (valid: 1-3)")]
    InvalidRound(u8),

    /// A display page was requested but no quad was built.
    #[error("no quads were built, page {0} is not available")]
    NoQuads(usize),

    /// A display page outside `1..=pages`.
    #[error("page {page} out of range (1-{pages})")]
    PageOutOfRange { page: usize, pages: usize },
}
