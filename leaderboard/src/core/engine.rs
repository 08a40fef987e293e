use crate::core::columns::{compute_hidden_columns, Column};
use crate::core::entry::{sort_by_position, DriverEntry, Snapshot};
use crate::core::reconcile::{ReconcileStats, RenderedRowMap};
use crate::core::reference::{annotate_in_place, Reference};
use crate::core::rejoin::predict_rejoin_in_place;
use crate::core::window::{compute_window, WindowMode};
use crate::error::Degradation;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// * `adjacent_cars` - Number of cars shown on either side of the reference driver
/// * `last_lap_absolute` - Show last lap times as absolute times instead of deltas
/// * `best_lap_absolute` - Show best lap times as absolute times instead of deltas
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardPrefs {
    pub adjacent_cars: u32,
    pub last_lap_absolute: bool,
    pub best_lap_absolute: bool,
}

impl Default for DashboardPrefs {
    fn default() -> Self {
        DashboardPrefs {
            adjacent_cars: 2,
            last_lap_absolute: false,
            best_lap_absolute: false,
        }
    }
}

/// Frame summarizes one processed snapshot.
///
/// * `window` - Displayed positions, empty if nothing is displayed
/// * `reference_index` - Car index of the reference driver, if found
/// * `hidden_columns` - Columns to hide for this snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub window: Vec<u32>,
    pub reference_index: Option<u32>,
    pub hidden_columns: BTreeSet<Column>,
    pub stats: ReconcileStats,
    pub degradations: Vec<Degradation>,
}

/// LeaderboardEngine runs the per-snapshot pipeline and owns the rendered rows. `H` is the row
/// handle type of the rendering layer.
#[derive(Debug)]
pub struct LeaderboardEngine<H> {
    prefs: DashboardPrefs,
    rows: RenderedRowMap<H>,
    session_uid: Option<u64>,
    displayed: Vec<DriverEntry>,
    processed: u64,
}

impl<H> LeaderboardEngine<H> {
    pub fn new(prefs: DashboardPrefs) -> LeaderboardEngine<H> {
        LeaderboardEngine {
            prefs,
            rows: RenderedRowMap::new(),
            session_uid: None,
            displayed: Vec::new(),
            processed: 0,
        }
    }

    pub fn with_header(prefs: DashboardPrefs, header: H) -> LeaderboardEngine<H> {
        LeaderboardEngine {
            rows: RenderedRowMap::with_header(header),
            ..LeaderboardEngine::new(prefs)
        }
    }

    pub fn prefs(&self) -> &DashboardPrefs {
        &self.prefs
    }

    /// set_prefs takes effect with the next processed snapshot.
    pub fn set_prefs(&mut self, prefs: DashboardPrefs) {
        self.prefs = prefs;
    }

    pub fn rows(&self) -> &RenderedRowMap<H> {
        &self.rows
    }

    /// Entries of the last processed snapshot that are currently displayed, sorted by position.
    pub fn displayed_entries(&self) -> &[DriverEntry] {
        &self.displayed
    }

    pub fn processed_snapshots(&self) -> u64 {
        self.processed
    }

    /// reset discards every rendered row, e.g. after a reconnect or a session change. The header
    /// row survives.
    pub fn reset(&mut self) -> usize {
        let discarded = self.rows.clear();
        self.displayed.clear();
        self.session_uid = None;
        info!("Leaderboard reset, discarded {} rows", discarded);
        discarded
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHOD ---------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// process runs one synchronous pass over a decoded snapshot: rejoin prediction on the full
    /// grid, window selection around the reference driver, reference annotation of the displayed
    /// entries, row reconciliation and column visibility. It never fails; problems are reported as
    /// degradations in the returned frame.
    pub fn process<F, U>(&mut self, snapshot: Snapshot, factory: F, updater: U) -> Frame
    where
        F: FnMut(u32, &DriverEntry) -> H,
        U: FnMut(&mut H, &DriverEntry),
    {
        self.processed += 1;
        self.check_session(snapshot.session_uid);

        let mut degradations = Vec::new();
        let mode = WindowMode::for_snapshot(&snapshot);
        let reference = Reference::for_snapshot(&snapshot);
        let hidden_columns = compute_hidden_columns(snapshot.is_live, snapshot.session_type);
        let total = snapshot.total_cars();

        // rejoin prediction needs the full field
        let mut entries = sort_by_position(snapshot.table_entries);
        predict_rejoin_in_place(&mut entries, snapshot.estimated_pit_loss_s);

        let reference_entry = reference.and_then(|r| entries.iter().find(|e| r.matches(e)));
        let reference_index = reference_entry.and_then(|e| e.index);
        let reference_position = reference_entry.map(|e| e.position);

        if reference_entry.is_none() {
            degradations.push(Degradation::MissingReference);
        }

        let window = compute_window(
            reference_position.unwrap_or(0),
            total,
            self.prefs.adjacent_cars,
            mode,
        );

        if let (None, Some(position)) = (window, reference_position) {
            degradations.push(Degradation::InvalidWindow { position, total });
        }

        let mut displayed: Vec<DriverEntry> = match (window, mode) {
            (Some(_), WindowMode::FullGrid) => {
                let out_of_range = entries
                    .iter()
                    .filter(|entry| entry.position < 1 || entry.position > total)
                    .count();
                if out_of_range > 0 {
                    warn!(
                        "{} entries have a position outside [1, {}], showing them as sent",
                        out_of_range, total
                    );
                }
                entries
            }
            (Some(window), WindowMode::Adjacent) => entries
                .into_iter()
                .filter(|entry| window.contains(entry.position))
                .collect(),
            (None, _) => Vec::new(),
        };

        // annotation must happen before rows are built
        if let Some(reference) = reference {
            annotate_in_place(&mut displayed, |e| reference.matches(e));
        }

        let stats = self.rows.reconcile(&displayed, factory, updater);
        if stats.orphans > 0 {
            degradations.push(Degradation::OrphanEntries {
                count: stats.orphans,
            });
        }

        debug!(
            "Snapshot {}: {:?} mode, {} of {} cars displayed, {} degradations",
            self.processed,
            mode,
            displayed.len(),
            total,
            degradations.len()
        );

        let window = window
            .map(|window| window.positions().collect())
            .unwrap_or_default();
        self.displayed = displayed;

        Frame {
            window,
            reference_index,
            hidden_columns,
            stats,
            degradations,
        }
    }

    // ---------------------------------------------------------------------------------------------
    // METHODS (HELPERS) ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    fn check_session(&mut self, session_uid: Option<u64>) {
        match (self.session_uid, session_uid) {
            (Some(prev), Some(cur)) if prev != cur => {
                info!("Session changed from {} to {}", prev, cur);
                self.reset();
                self.session_uid = Some(cur);
            }
            (_, Some(cur)) => self.session_uid = Some(cur),
            (_, None) => {}
        }
    }
}
