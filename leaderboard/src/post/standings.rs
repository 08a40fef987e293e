use crate::core::columns::Column;
use crate::core::engine::DashboardPrefs;
use crate::core::entry::{DriverEntry, Metric};
use crate::core::reference::lap_cell;
use crate::interfaces::text_row::format_cell;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// StandingsRow is one displayed car in exportable form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StandingsRow {
    pub position: u32,
    pub car_index: u32,
    pub driver: String,
    pub team: String,
    pub gap: String,
    pub last_lap: String,
    pub best_lap: String,
    pub best_sector1: String,
    pub best_sector2: String,
    pub best_sector3: String,
    pub tyre: String,
    pub pit_rejoin_position: Option<u32>,
}

/// Standings contains the displayed leaderboard of the last processed snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Standings {
    pub rows: Vec<StandingsRow>,
}

impl Standings {
    /// from_entries builds the standings from displayed entries. Entries without a car index were
    /// never rendered and are skipped.
    pub fn from_entries(entries: &[DriverEntry], prefs: &DashboardPrefs) -> Standings {
        let rows = entries
            .iter()
            .filter_map(|entry| {
                let car_index = entry.index?;
                let best_sector = |metric| {
                    lap_cell(&entry.best_lap, metric, prefs.best_lap_absolute).render_sector()
                };
                Some(StandingsRow {
                    position: entry.position,
                    car_index,
                    driver: format_cell(entry, Column::Driver, prefs),
                    team: entry.team.to_owned(),
                    gap: format_cell(entry, Column::Delta, prefs),
                    last_lap: format_cell(entry, Column::LastLap, prefs),
                    best_lap: format_cell(entry, Column::BestLap, prefs),
                    best_sector1: best_sector(Metric::Sector1),
                    best_sector2: best_sector(Metric::Sector2),
                    best_sector3: best_sector(Metric::Sector3),
                    tyre: format_cell(entry, Column::Tyre, prefs),
                    pit_rejoin_position: entry.tyre_info.pit_rejoin_position,
                })
            })
            .collect();

        Standings { rows }
    }

    /// write_standings_csv writes the standings to a CSV file with a header line. Returns the path to the
    /// written file.
    pub fn write_standings_csv(&self, path: &Path) -> anyhow::Result<String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// to_table formats the standings as a fixed-width text table.
    pub fn to_table(&self) -> anyhow::Result<String> {
        let mut content = String::new();
        writeln!(
            &mut content,
            "{:>3}  {:<18} {:>10} {:>10} {:>10}  {:<10} {:>4}",
            "Pos", "Driver", "Gap", "Last", "Best", "Tyre", "Pit"
        )?;

        for row in &self.rows {
            let pit = row
                .pit_rejoin_position
                .map(|position| format!("P{}", position))
                .unwrap_or_else(|| String::from("-"));
            writeln!(
                &mut content,
                "{:>3}  {:<18} {:>10} {:>10} {:>10}  {:<10} {:>4}",
                row.position, row.driver, row.gap, row.last_lap, row.best_lap, row.tyre, pit
            )?;
        }

        Ok(content)
    }

    /// print_standings prints the standings to the console output.
    pub fn print_standings(&self) -> anyhow::Result<()> {
        println!("RESULT: Standings");
        print!("{}", self.to_table()?);
        Ok(())
    }
}
