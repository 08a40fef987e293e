use crate::core::columns::Column;
use crate::core::engine::DashboardPrefs;
use crate::core::entry::{DriverEntry, Metric};
use crate::core::reference::lap_cell;
use crate::core::sector_times::format_gap_to_leader;

/// TextRow is a plain-text row handle: one formatted cell per column. It is what the command line
/// front end renders, and the reference handle type for the engine outside a GUI toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRow {
    pub index: Option<u32>,
    pub cells: Vec<String>,
    /// Number of in-place updates since the row was created.
    pub revision: u32,
}

impl TextRow {
    pub fn header() -> TextRow {
        TextRow {
            index: None,
            cells: Column::ALL
                .iter()
                .map(|column| column.title().to_owned())
                .collect(),
            revision: 0,
        }
    }

    pub fn new(index: u32, entry: &DriverEntry, prefs: &DashboardPrefs) -> TextRow {
        TextRow {
            index: Some(index),
            cells: format_cells(entry, prefs),
            revision: 0,
        }
    }

    pub fn update(&mut self, entry: &DriverEntry, prefs: &DashboardPrefs) {
        self.cells = format_cells(entry, prefs);
        self.revision += 1;
    }

    /// render joins the cells of the visible columns into one line.
    pub fn render(&self, visible: &[Column]) -> String {
        let mut line = String::new();
        for (column, cell) in Column::ALL.iter().zip(self.cells.iter()) {
            if !visible.contains(column) {
                continue;
            }
            let width = column_width(*column);
            line.push_str(&format!("{:<width$} ", cell, width = width));
        }
        line.trim_end().to_owned()
    }
}

fn column_width(column: Column) -> usize {
    match column {
        Column::Position | Column::CurrentLap | Column::PitRejoin => 4,
        Column::Driver => 18,
        Column::Delta | Column::LastLap | Column::BestLap => 10,
        Column::Tyre => 8,
        Column::Fuel | Column::WearPrediction | Column::WingDamage => 6,
    }
}

/// format_cells formats one cell per column in `Column::ALL` order.
pub fn format_cells(entry: &DriverEntry, prefs: &DashboardPrefs) -> Vec<String> {
    Column::ALL
        .iter()
        .map(|&column| format_cell(entry, column, prefs))
        .collect()
}

/// format_cell formats a single column of an entry.
pub fn format_cell(entry: &DriverEntry, column: Column, prefs: &DashboardPrefs) -> String {
    match column {
        Column::Position => entry.position.to_string(),
        Column::Driver => {
            if entry.name.is_empty() {
                entry
                    .index
                    .map(|index| format!("Car {}", index))
                    .unwrap_or_default()
            } else {
                entry.name.to_owned()
            }
        }
        Column::Delta => format_gap_to_leader(entry.delta_to_leader_ms, entry.position),
        Column::CurrentLap => entry.current_lap.to_string(),
        Column::LastLap => lap_cell(&entry.last_lap, Metric::Lap, prefs.last_lap_absolute).render(),
        Column::BestLap => lap_cell(&entry.best_lap, Metric::Lap, prefs.best_lap_absolute).render(),
        Column::Tyre => {
            if entry.tyre_info.compound.is_empty() {
                String::from("-")
            } else {
                format!("{} ({})", entry.tyre_info.compound, entry.tyre_info.age_laps)
            }
        }
        Column::PitRejoin => entry
            .tyre_info
            .pit_rejoin_position
            .map(|position| format!("P{}", position))
            .unwrap_or_else(|| String::from("-")),
        Column::Fuel => entry
            .fuel_remaining_laps
            .map(|laps| format!("{:+.1}", laps))
            .unwrap_or_else(|| String::from("-")),
        Column::WearPrediction => format!("{:.0}%", entry.tyre_info.wear_pct),
        Column::WingDamage => entry
            .front_wing_damage_pct
            .map(|pct| format!("{}%", pct))
            .unwrap_or_else(|| String::from("-")),
    }
}
