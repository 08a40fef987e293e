use serde::{Deserialize, Serialize};

/// Session type as reported by the telemetry feed. Unknown tags are mapped to `Unknown` instead
/// of failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Practice,
    Qualifying,
    Race,
    TimeTrial,
    #[serde(other)]
    Unknown,
}

impl Default for SessionType {
    fn default() -> Self {
        SessionType::Unknown
    }
}

impl SessionType {
    pub fn is_race(self) -> bool {
        matches!(self, SessionType::Race)
    }
}

/// Timing metric of a lap record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Lap,
    Sector1,
    Sector2,
    Sector3,
}

/// * `lap_ms` - (ms) Lap time, 0 if unset
/// * `sector1_ms` - (ms) Sector 1 time, 0 if unset
/// * `sector2_ms` - (ms) Sector 2 time, 0 if unset
/// * `sector3_ms` - (ms) Sector 3 time, 0 if unset (may be derived, see `with_derived_sector3`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SectorTimes {
    pub lap_ms: u32,
    pub sector1_ms: u32,
    pub sector2_ms: u32,
    pub sector3_ms: u32,
}

impl SectorTimes {
    pub fn get(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Lap => self.lap_ms,
            Metric::Sector1 => self.sector1_ms,
            Metric::Sector2 => self.sector2_ms,
            Metric::Sector3 => self.sector3_ms,
        }
    }
}

/// LapRecord holds the times of one lap (last or best) together with the reference driver's
/// times for the same record.
///
/// * `times` - Own times of this car
/// * `is_player` - Echo flag, true if this record belongs to the reference driver
/// * `player` - Reference driver's times, written by the reference annotator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LapRecord {
    pub times: SectorTimes,
    pub is_player: bool,
    #[serde(skip_deserializing)]
    pub player: Option<SectorTimes>,
}

/// * `compound` - Visual tyre compound, e.g. "soft"
/// * `age_laps` - Age of the current tyre set in laps
/// * `wear_pct` - (%) Average wear of the current tyre set
/// * `pit_rejoin_position` - Projected position after a pit stop (computed, never transmitted)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TyreInfo {
    pub compound: String,
    pub age_laps: u32,
    pub wear_pct: f32,
    #[serde(skip_deserializing)]
    pub pit_rejoin_position: Option<u32>,
}

/// DriverEntry is the per-snapshot state of one car. `index` is the stable key of the car for the
/// whole session, `position` changes every lap and must not be used as a key. A missing index
/// makes the entry unusable for reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DriverEntry {
    pub index: Option<u32>,
    pub position: u32,
    pub name: String,
    pub team: String,
    pub is_player: bool,
    pub current_lap: u32,
    pub last_lap: LapRecord,
    pub best_lap: LapRecord,
    pub delta_to_leader_ms: u32,
    pub tyre_info: TyreInfo,
    pub fuel_remaining_laps: Option<f32>,
    pub front_wing_damage_pct: Option<u8>,
}

/// Snapshot is one telemetry tick containing the full grid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Snapshot {
    pub session_uid: Option<u64>,
    pub session_type: SessionType,
    pub is_live: bool,
    pub is_spectating: bool,
    pub spectator_index: Option<u32>,
    pub race_ended: bool,
    pub estimated_pit_loss_s: Option<f64>,
    pub table_entries: Vec<DriverEntry>,
}

impl Snapshot {
    pub fn total_cars(&self) -> u32 {
        self.table_entries.len() as u32
    }
}

/// sort_by_position sorts the entries ascending by position. The sort is stable so that entries
/// sharing a position keep their feed order.
pub fn sort_by_position(entries: Vec<DriverEntry>) -> Vec<DriverEntry> {
    let positions: Vec<u32> = entries.iter().map(|entry| entry.position).collect();
    let order = helpers::general::argsort(&positions, helpers::general::SortOrder::Ascending);

    let mut slots: Vec<Option<DriverEntry>> = entries.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}
