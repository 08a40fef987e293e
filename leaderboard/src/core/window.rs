use crate::core::entry::Snapshot;
use std::ops::RangeInclusive;

/// WindowMode decides whether the leaderboard shows the cars adjacent to the reference driver or
/// the whole grid. Spectator mode and finished races always show the whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    Adjacent,
    FullGrid,
}

impl WindowMode {
    pub fn for_snapshot(snapshot: &Snapshot) -> WindowMode {
        if snapshot.is_spectating || snapshot.race_ended {
            WindowMode::FullGrid
        } else {
            WindowMode::Adjacent
        }
    }
}

/// DisplayWindow is a closed interval of positions `[lower, upper]` with `1 <= lower <= upper <=
/// total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    lower: u32,
    upper: u32,
}

impl DisplayWindow {
    pub fn lower(&self) -> u32 {
        self.lower
    }

    pub fn upper(&self) -> u32 {
        self.upper
    }

    pub fn contains(&self, position: u32) -> bool {
        self.lower <= position && position <= self.upper
    }

    pub fn positions(&self) -> RangeInclusive<u32> {
        self.lower..=self.upper
    }
}

/// compute_window returns the window of positions to display around the reference position, or
/// None if there is nothing to display.
///
/// In `Adjacent` mode the window spans `adjacent` cars on either side of the reference and is
/// shifted, not shrunk, when it runs over the front or the back of the field. A reference
/// position outside `[1, total]` yields None.
pub fn compute_window(
    reference_position: u32,
    total: u32,
    adjacent: u32,
    mode: WindowMode,
) -> Option<DisplayWindow> {
    if total == 0 {
        return None;
    }

    let full_grid = DisplayWindow {
        lower: 1,
        upper: total,
    };

    if mode == WindowMode::FullGrid {
        return Some(full_grid);
    }

    if reference_position < 1 || reference_position > total {
        return None;
    }

    if adjacent >= total {
        return Some(full_grid);
    }

    // i64 to avoid underflow at the front of the field
    let total = total as i64;
    let mut lower = reference_position as i64 - adjacent as i64;
    let mut upper = reference_position as i64 + adjacent as i64;

    if lower < 1 {
        upper += 1 - lower;
        lower = 1;
    }
    if upper > total {
        lower -= upper - total;
        upper = total;
    }

    Some(DisplayWindow {
        lower: lower.max(1) as u32,
        upper: upper.min(total) as u32,
    })
}

/// select_window returns the ordered positions to display, empty if there is nothing to display.
pub fn select_window(
    reference_position: u32,
    total: u32,
    adjacent: u32,
    mode: WindowMode,
) -> Vec<u32> {
    compute_window(reference_position, total, adjacent, mode)
        .map(|window| window.positions().collect())
        .unwrap_or_default()
}
