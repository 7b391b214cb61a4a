/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! QuadMaster – quad assignment and round-robin pairing
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── entrant/        – Entrant, SeedPosition, Color
//! ├── config/         – YAML tournament roster
//! ├── scheduler/      – quad building + fixed 3-round pairing table
//! ├── matches/        – match sheets, results, standings
//! └── report/         – plain-text pairing sheets
//! ```

pub mod config;
pub mod entrant;
pub mod matches;
pub mod report;
pub mod scheduler;
