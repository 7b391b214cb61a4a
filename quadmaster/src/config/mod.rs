//! Tournament roster loading and management.
//!
//! The expected YAML structure is:
//! ```yaml
//! tournament:
//!   name: "Chess Masters 2025"
//!   date: "2025-06-14"
//!   venue: "Downtown Chess Club"
//!   status: registration
//!   quads_per_page: 4
//! entrants:
//!   - id: 1
//!     name: "John Smith"
//!     rating: 1840
//! results:
//!   - { quad: 1, round: 1, table: 1, result: "1-0" }
//! ```
//!
//! Only `entrants` is required.  `results` is optional and lets a director
//! keep entered scores next to the roster.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::entrant::{Entrant, EntrantId};
use crate::matches::MatchResult;
use crate::scheduler::{QuadId, DEFAULT_QUADS_PER_GROUP};

pub use crate::matches::RecordedResult;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    tournament: TournamentEntry,
    #[serde(default)]
    entrants: Vec<EntrantEntry>,
    #[serde(default)]
    results: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct TournamentEntry {
    name: Option<String>,
    date: Option<String>,
    venue: Option<String>,
    #[serde(default)]
    status: TournamentStatus,
    #[serde(default = "default_quads_per_page")]
    quads_per_page: usize,
}

fn default_quads_per_page() -> usize {
    DEFAULT_QUADS_PER_GROUP
}

/// Used when the whole `tournament:` section is missing; must agree with the
/// per-field defaults above.
impl Default for TournamentEntry {
    fn default() -> Self {
        Self {
            name: None,
            date: None,
            venue: None,
            status: TournamentStatus::default(),
            quads_per_page: default_quads_per_page(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EntrantEntry {
    id: EntrantId,
    name: String,
    #[serde(default)]
    rating: i32,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    quad: QuadId,
    round: u8,
    table: u8,
    result: String,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Lifecycle of a tournament.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    #[default]
    Registration,
    Active,
    Completed,
    Cancelled,
}

impl TournamentStatus {
    /// Quads are only seeded fresh while entries are still open.
    pub fn allows_quad_generation(self) -> bool {
        self == TournamentStatus::Registration
    }

    /// Rounds are being played and results entered against existing quads.
    pub fn is_in_play(self) -> bool {
        self == TournamentStatus::Active
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TournamentStatus::Registration => "registration",
            TournamentStatus::Active => "active",
            TournamentStatus::Completed => "completed",
            TournamentStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Tournament-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tournament {
    pub name: String,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub status: TournamentStatus,
    pub quads_per_page: usize,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            name: String::from("Untitled tournament"),
            date: None,
            venue: None,
            status: TournamentStatus::default(),
            quads_per_page: DEFAULT_QUADS_PER_GROUP,
        }
    }
}

impl Tournament {
    /// Decide whether pairing sheets may be produced for this tournament.
    ///
    /// Registration and active tournaments always pass: an active tournament
    /// gets the same quads back from its roster, with recorded results
    /// replayed on top.  Completed and cancelled tournaments need `force`.
    ///
    /// # Errors
    /// Returns an error for a closed tournament when `force` is `false`.
    pub fn ensure_sheets_available(&self, force: bool) -> Result<()> {
        let status = self.status;
        if status.allows_quad_generation() {
            debug!(status = %status, "Seeding quads from registration roster");
            return Ok(());
        }
        if status.is_in_play() {
            info!(
                status = %status,
                "Tournament in play, rebuilding sheets with recorded results"
            );
            return Ok(());
        }
        if force {
            warn!(status = %status, "Showing sheets for a closed tournament (--force)");
            return Ok(());
        }
        bail!(
            "tournament '{}' is {}; pairing sheets are closed (use --force to override)",
            self.name,
            status
        );
    }
}

// ── RosterManager ─────────────────────────────────────────────────────────────

/// Loads and holds one tournament's roster from a YAML file.
#[derive(Debug, Default)]
pub struct RosterManager {
    tournament: Tournament,
    /// Entrants in file order.
    entrants: Vec<Entrant>,
    results: Vec<RecordedResult>,

    /// Set to `true` after a successful [`load_from_file`](Self::load_from_file).
    loaded: bool,
}

impl RosterManager {
    /// Creates a new, empty `RosterManager`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `path` and replaces all previously loaded state.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, two entrants share an id, or a result line is malformed.
    /// On error the manager is left empty and not loaded.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading roster from: {}", path.display());

        *self = Self::default();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open roster file: {}", path.display()))?;

        let file: RosterFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let mut seen = HashSet::new();
        let mut entrants = Vec::with_capacity(file.entrants.len());
        for entry in file.entrants {
            if !seen.insert(entry.id) {
                bail!(
                    "Duplicate entrant id {} in roster file: {}",
                    entry.id,
                    path.display()
                );
            }
            debug!(id = entry.id, name = %entry.name, rating = entry.rating, "  entrant");
            entrants.push(Entrant::new(entry.id, entry.name, entry.rating));
        }

        let results = file
            .results
            .into_iter()
            .map(|r| -> Result<RecordedResult> {
                let result = r.result.parse::<MatchResult>().with_context(|| {
                    format!(
                        "Bad result for quad {} round {} table {}",
                        r.quad, r.round, r.table
                    )
                })?;
                Ok(RecordedResult {
                    quad: r.quad,
                    round: r.round,
                    table: r.table,
                    result,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let defaults = Tournament::default();
        let tournament = Tournament {
            name: file.tournament.name.unwrap_or(defaults.name),
            date: file.tournament.date,
            venue: file.tournament.venue,
            status: file.tournament.status,
            quads_per_page: file.tournament.quads_per_page,
        };

        if tournament.quads_per_page == 0 {
            warn!("quads_per_page is 0, pages will hold a single quad");
        }
        if entrants.is_empty() {
            warn!("Roster has no entrants");
        }

        info!(
            tournament = %tournament.name,
            status = %tournament.status,
            entrants = entrants.len(),
            results = results.len(),
            "Roster loaded"
        );

        self.tournament = tournament;
        self.entrants = entrants;
        self.results = results;
        self.loaded = true;

        Ok(())
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    /// Entrants in file order (not yet sorted by rating).
    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn get_entrant(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    pub fn results(&self) -> &[RecordedResult] {
        &self.results
    }

    /// Returns `true` after a successful call to [`load_from_file`](Self::load_from_file).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::QuadScheduler;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn load_full_roster() {
        let yaml = r#"
tournament:
  name: "Spring Chess Tournament"
  date: "2025-05-23"
  venue: "Community Center"
  status: active
  quads_per_page: 2
entrants:
  - id: 1
    name: "John Smith"
    rating: 1840
  - id: 2
    name: "David Johnson"
    rating: 1985
results:
  - { quad: 1, round: 1, table: 2, result: "1/2-1/2" }
"#;
        let f = yaml_tempfile(yaml);
        let mut mgr = RosterManager::new();
        mgr.load_from_file(f.path()).unwrap();

        assert!(mgr.is_loaded());
        let t = mgr.tournament();
        assert_eq!(t.name, "Spring Chess Tournament");
        assert_eq!(t.date.as_deref(), Some("2025-05-23"));
        assert_eq!(t.venue.as_deref(), Some("Community Center"));
        assert_eq!(t.status, TournamentStatus::Active);
        assert_eq!(t.quads_per_page, 2);

        assert_eq!(mgr.entrants().len(), 2);
        assert_eq!(mgr.entrants()[0].name, "John Smith");
        assert_eq!(mgr.get_entrant(2).unwrap().rating, 1985);
        assert!(mgr.get_entrant(3).is_none());

        assert_eq!(
            mgr.results(),
            &[RecordedResult {
                quad: 1,
                round: 1,
                table: 2,
                result: MatchResult::Draw,
            }]
        );
    }

    #[test]
    fn optional_sections_use_defaults_when_absent() {
        let yaml = r#"
entrants:
  - id: 5
    name: "Unrated"
"#;
        let f = yaml_tempfile(yaml);
        let mut mgr = RosterManager::new();
        mgr.load_from_file(f.path()).unwrap();

        let t = mgr.tournament();
        assert_eq!(t.status, TournamentStatus::Registration);
        assert_eq!(t.quads_per_page, DEFAULT_QUADS_PER_GROUP);
        assert!(t.date.is_none());
        assert_eq!(mgr.get_entrant(5).unwrap().rating, 0);
        assert!(mgr.results().is_empty());
    }

    #[test]
    fn negative_ratings_are_accepted() {
        let f = yaml_tempfile("entrants:\n  - { id: 1, name: x, rating: -25 }\n");
        let mut mgr = RosterManager::new();
        mgr.load_from_file(f.path()).unwrap();
        assert_eq!(mgr.entrants()[0].rating, -25);
    }

    #[test]
    fn duplicate_entrant_id_returns_error() {
        let yaml = r#"
entrants:
  - { id: 1, name: a, rating: 1000 }
  - { id: 1, name: b, rating: 1100 }
"#;
        let f = yaml_tempfile(yaml);
        let mut mgr = RosterManager::new();
        let err = mgr.load_from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("Duplicate entrant id 1"));
        assert!(!mgr.is_loaded());
    }

    #[test]
    fn malformed_result_returns_error() {
        let yaml = r#"
entrants: []
results:
  - { quad: 1, round: 1, table: 1, result: "3-0" }
"#;
        let f = yaml_tempfile(yaml);
        let mut mgr = RosterManager::new();
        assert!(mgr.load_from_file(f.path()).is_err());
        assert!(!mgr.is_loaded());
    }

    #[test]
    fn unknown_status_returns_error() {
        let f = yaml_tempfile("tournament:\n  status: postponed\nentrants: []\n");
        let mut mgr = RosterManager::new();
        assert!(mgr.load_from_file(f.path()).is_err());
    }

    #[test]
    fn missing_file_returns_error() {
        let mut mgr = RosterManager::new();
        let result = mgr.load_from_file(Path::new("/nonexistent/path/roster.yaml"));
        assert!(result.is_err());
        assert!(!mgr.is_loaded());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        let mut mgr = RosterManager::new();
        assert!(mgr.load_from_file(f.path()).is_err());
        assert!(!mgr.is_loaded());
    }

    #[test]
    fn reload_replaces_previous_roster() {
        let f1 = yaml_tempfile("entrants:\n  - { id: 1, name: a, rating: 1 }\n");
        let f2 = yaml_tempfile("entrants:\n  - { id: 2, name: b, rating: 2 }\n");

        let mut mgr = RosterManager::new();
        mgr.load_from_file(f1.path()).unwrap();
        assert!(mgr.get_entrant(1).is_some());

        mgr.load_from_file(f2.path()).unwrap();
        assert!(mgr.get_entrant(1).is_none(), "old entrant must be gone");
        assert!(mgr.get_entrant(2).is_some());
    }

    #[test]
    fn demo_roster_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/roster.yaml");
        let mut mgr = RosterManager::new();
        mgr.load_from_file(&path).unwrap();

        assert_eq!(mgr.tournament().name, "Chess Masters 2025");
        assert_eq!(mgr.entrants().len(), 30);
        assert_eq!(mgr.results().len(), 3);
    }

    #[test]
    fn roster_without_tournament_section_groups_four_quads_per_page() {
        let mut yaml = String::from("entrants:\n");
        for id in 1..=32 {
            let rating = 3000 - id;
            yaml.push_str(&format!("  - {{ id: {id}, name: p{id}, rating: {rating} }}\n"));
        }
        let f = yaml_tempfile(&yaml);
        let mut mgr = RosterManager::new();
        mgr.load_from_file(f.path()).unwrap();
        assert_eq!(mgr.tournament().quads_per_page, DEFAULT_QUADS_PER_GROUP);

        let plan = QuadScheduler::with_quads_per_group(mgr.tournament().quads_per_page)
            .build_quads(mgr.entrants().to_vec());
        let groups: Vec<u32> = plan.quads.iter().map(|q| q.group_number).collect();
        assert_eq!(groups, vec![1, 1, 1, 1, 2, 2, 2, 2]);
    }

    // ── Status gate ───────────────────────────────────────────────────────────

    fn tournament(status: TournamentStatus) -> Tournament {
        Tournament {
            name: String::from("Club Quads"),
            status,
            ..Tournament::default()
        }
    }

    #[test]
    fn only_registration_allows_quad_generation() {
        assert!(TournamentStatus::Registration.allows_quad_generation());
        assert!(!TournamentStatus::Active.allows_quad_generation());
        assert!(!TournamentStatus::Completed.allows_quad_generation());
        assert!(!TournamentStatus::Cancelled.allows_quad_generation());
    }

    #[test]
    fn registration_and_active_sheets_need_no_force() {
        for status in [TournamentStatus::Registration, TournamentStatus::Active] {
            let t = tournament(status);
            assert!(t.ensure_sheets_available(false).is_ok(), "{status}");
        }
    }

    #[test]
    fn closed_tournament_needs_force() {
        for status in [TournamentStatus::Completed, TournamentStatus::Cancelled] {
            let t = tournament(status);
            let err = t.ensure_sheets_available(false).unwrap_err();
            assert!(err.to_string().contains(&format!("is {status}")));
            assert!(err.to_string().contains("--force"));
            assert!(t.ensure_sheets_available(true).is_ok());
        }
    }
}
