//! Lap, sector and delta time helpers used when building leaderboard cells.

use crate::core::entry::SectorTimes;

/// TimeCell is the display decision for one timing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCell {
    /// No own time available yet.
    Empty,
    /// Own time in ms.
    Absolute(u32),
    /// Own time minus the reference driver's time in ms.
    Delta(i64),
}

impl TimeCell {
    pub fn render(self) -> String {
        match self {
            TimeCell::Empty => String::from("-"),
            TimeCell::Absolute(t_ms) => format_lap_time(t_ms),
            TimeCell::Delta(delta_ms) => format_delta(delta_ms),
        }
    }

    /// render_sector is `render` for sector values: absolute times stay in seconds.
    pub fn render_sector(self) -> String {
        match self {
            TimeCell::Absolute(t_ms) => format_sector_time(t_ms),
            other => other.render(),
        }
    }
}

/// format_lap_time formats a time in ms as `m:ss.mmm`, or `s.mmm` below one minute.
pub fn format_lap_time(t_ms: u32) -> String {
    let minutes = t_ms / 60_000;
    let seconds = (t_ms % 60_000) / 1000;
    let millis = t_ms % 1000;

    if minutes > 0 {
        format!("{}:{:02}.{:03}", minutes, seconds, millis)
    } else {
        format!("{}.{:03}", seconds, millis)
    }
}

/// format_sector_time formats a sector time in ms as `ss.mmm` (seconds are not wrapped into
/// minutes).
pub fn format_sector_time(t_ms: u32) -> String {
    format!("{}.{:03}", t_ms / 1000, t_ms % 1000)
}

/// format_delta formats a signed delta in ms, e.g. `+0.123` or `-1:02.500`.
pub fn format_delta(delta_ms: i64) -> String {
    let sign = if delta_ms < 0 { '-' } else { '+' };
    let abs_ms = delta_ms.unsigned_abs();
    let abs_ms = u32::try_from(abs_ms).unwrap_or(u32::MAX);
    format!("{}{}", sign, format_lap_time(abs_ms))
}

/// format_gap_to_leader formats the gap to the leader. The leader itself has no gap.
pub fn format_gap_to_leader(gap_ms: u32, position: u32) -> String {
    if position == 1 {
        String::from("--")
    } else {
        format!("+{}", format_lap_time(gap_ms))
    }
}

/// derive_sector3 returns the sector 3 time from the lap and the first two sector times. It
/// returns 0 (unset) if any input is unset or inconsistent.
pub fn derive_sector3(lap_ms: u32, sector1_ms: u32, sector2_ms: u32) -> u32 {
    if lap_ms == 0 || sector1_ms == 0 || sector2_ms == 0 {
        return 0;
    }
    lap_ms
        .checked_sub(sector1_ms)
        .and_then(|t| t.checked_sub(sector2_ms))
        .unwrap_or(0)
}

impl SectorTimes {
    /// with_derived_sector3 fills in sector 3 from the lap time if the feed did not send it.
    pub fn with_derived_sector3(mut self) -> SectorTimes {
        if self.sector3_ms == 0 {
            self.sector3_ms = derive_sector3(self.lap_ms, self.sector1_ms, self.sector2_ms);
        }
        self
    }
}

/// delta_ms returns own minus reference time.
pub fn delta_ms(own_ms: u32, reference_ms: u32) -> i64 {
    own_ms as i64 - reference_ms as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_times() {
        assert_eq!(format_lap_time(83_456), "1:23.456");
        assert_eq!(format_lap_time(60_000), "1:00.000");
        assert_eq!(format_lap_time(9_005), "9.005");
        assert_eq!(format_sector_time(74_120), "74.120");
        assert_eq!(TimeCell::Absolute(74_120).render_sector(), "74.120");
        assert_eq!(TimeCell::Delta(-250).render_sector(), "-0.250");
        assert_eq!(TimeCell::Empty.render_sector(), "-");
    }

    #[test]
    fn deltas() {
        assert_eq!(format_delta(123), "+0.123");
        assert_eq!(format_delta(-1500), "-1.500");
        assert_eq!(format_delta(0), "+0.000");
        assert_eq!(format_delta(-62_500), "-1:02.500");
        assert_eq!(delta_ms(90_000, 91_250), -1250);
    }

    #[test]
    fn gap_to_leader() {
        assert_eq!(format_gap_to_leader(0, 1), "--");
        assert_eq!(format_gap_to_leader(2_345, 2), "+2.345");
    }

    #[test]
    fn sector3_is_derived_only_when_consistent() {
        assert_eq!(derive_sector3(90_000, 30_000, 31_000), 29_000);
        assert_eq!(derive_sector3(90_000, 0, 31_000), 0);
        assert_eq!(derive_sector3(50_000, 30_000, 31_000), 0);

        let times = SectorTimes {
            lap_ms: 90_000,
            sector1_ms: 30_000,
            sector2_ms: 31_000,
            sector3_ms: 0,
        };
        assert_eq!(times.with_derived_sector3().sector3_ms, 29_000);
    }

    #[test]
    fn cells_render() {
        assert_eq!(TimeCell::Empty.render(), "-");
        assert_eq!(TimeCell::Absolute(83_456).render(), "1:23.456");
        assert_eq!(TimeCell::Delta(-250).render(), "-0.250");
    }
}
