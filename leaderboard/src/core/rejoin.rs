use crate::core::entry::{sort_by_position, DriverEntry};
use helpers::general::{count_less, is_sorted_ascending, ms_to_s, s_to_ms};
use log::{debug, warn};

/// rejoin_positions projects the running position of every car after a pit stop.
///
/// `deltas_ms` holds the gap to the leader of every car, ordered by position. For car i the
/// projected gap is `deltas_ms[i] + pit_loss_ms`, and the car rejoins behind every other car whose
/// gap is strictly less than the projected gap. A car projecting exactly onto another car's gap
/// rejoins ahead of that car, and cars with tied gaps keep their place at zero loss. The returned
/// positions are 1-indexed.
pub fn rejoin_positions(deltas_ms: &[u32], pit_loss_ms: i64) -> Vec<u32> {
    let sorted = is_sorted_ascending(deltas_ms);
    if !sorted {
        debug!("Gaps to leader are not monotonic, counting without early exit");
    }

    let gaps: Vec<i64> = deltas_ms.iter().map(|&d| d as i64).collect();

    gaps.iter()
        .map(|&gap| {
            let projected_gap = gap + pit_loss_ms;
            // the pitting car is only counted against itself if its own gap grew
            let self_counted = (gap < projected_gap) as usize;
            let cars_ahead = count_less(&gaps, projected_gap, sorted) - self_counted;
            (cars_ahead + 1) as u32
        })
        .collect()
}

/// predict_rejoin sorts the grid by position and writes the projected post-pit-stop position of
/// every car into `tyre_info.pit_rejoin_position`. Without a pit loss estimate the field is left
/// absent for all cars.
pub fn predict_rejoin(entries: Vec<DriverEntry>, pit_loss_s: Option<f64>) -> Vec<DriverEntry> {
    let mut entries = sort_by_position(entries);
    predict_rejoin_in_place(&mut entries, pit_loss_s);
    entries
}

/// predict_rejoin_in_place expects the entries to be sorted by position already and must run on
/// the full grid.
pub(crate) fn predict_rejoin_in_place(entries: &mut [DriverEntry], pit_loss_s: Option<f64>) {
    let pit_loss_ms = match pit_loss_s.and_then(s_to_ms) {
        Some(t_ms) if t_ms < 0 => {
            warn!(
                "Negative pit loss estimate of {:.3}s, using 0s instead",
                ms_to_s(t_ms)
            );
            0
        }
        Some(t_ms) => t_ms,
        None => {
            for entry in entries.iter_mut() {
                entry.tyre_info.pit_rejoin_position = None;
            }
            return;
        }
    };

    let deltas_ms: Vec<u32> = entries.iter().map(|entry| entry.delta_to_leader_ms).collect();
    let positions = rejoin_positions(&deltas_ms, pit_loss_ms);

    for (entry, rejoin_position) in entries.iter_mut().zip(positions) {
        entry.tyre_info.pit_rejoin_position = Some(rejoin_position);
    }
}
