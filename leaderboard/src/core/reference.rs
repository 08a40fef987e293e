use crate::core::entry::{DriverEntry, LapRecord, Metric, Snapshot};
use crate::core::sector_times::{delta_ms, TimeCell};
use log::debug;

/// Reference selects the driver all relative deltas are computed against. Outside spectator mode
/// this is the entry flagged `is_player`, in spectator mode it is the entry whose index equals the
/// spectated index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Player,
    Spectated(u32),
}

impl Reference {
    /// for_snapshot returns the reference rule of the snapshot's mode. Spectator mode without a
    /// spectated index has no reference.
    pub fn for_snapshot(snapshot: &Snapshot) -> Option<Reference> {
        if snapshot.is_spectating {
            snapshot.spectator_index.map(Reference::Spectated)
        } else {
            Some(Reference::Player)
        }
    }

    pub fn matches(&self, entry: &DriverEntry) -> bool {
        match self {
            Reference::Player => entry.is_player,
            Reference::Spectated(index) => entry.index == Some(*index),
        }
    }
}

/// annotate_reference copies the reference driver's last-lap and best-lap times into the `player`
/// field of every entry, including the reference entry itself. If no entry matches, the entries
/// are returned unchanged.
pub fn annotate_reference<P>(mut entries: Vec<DriverEntry>, is_reference: P) -> Vec<DriverEntry>
where
    P: Fn(&DriverEntry) -> bool,
{
    annotate_in_place(&mut entries, is_reference);
    entries
}

/// annotate_in_place is the in-place variant of `annotate_reference`. It returns false if no
/// reference entry was found.
pub(crate) fn annotate_in_place<P>(entries: &mut [DriverEntry], is_reference: P) -> bool
where
    P: Fn(&DriverEntry) -> bool,
{
    let ref_idx = match entries.iter().position(|entry| is_reference(entry)) {
        Some(idx) => idx,
        None => {
            debug!("No reference driver in {} entries, keeping absolute times", entries.len());
            return false;
        }
    };

    let ref_last = entries[ref_idx].last_lap.times.with_derived_sector3();
    let ref_best = entries[ref_idx].best_lap.times.with_derived_sector3();

    for (i, entry) in entries.iter_mut().enumerate() {
        let is_ref = i == ref_idx;
        entry.last_lap.player = Some(ref_last);
        entry.last_lap.is_player = is_ref;
        entry.best_lap.player = Some(ref_best);
        entry.best_lap.is_player = is_ref;
    }

    true
}

/// lap_cell decides how one timing value of a lap record is displayed. The own time is shown as
/// an absolute time if `absolute` is set, if the record belongs to the reference driver, or if
/// the reference has no time for this metric yet. Otherwise the delta to the reference is shown.
pub fn lap_cell(record: &LapRecord, metric: Metric, absolute: bool) -> TimeCell {
    let own_ms = record.times.with_derived_sector3().get(metric);
    if own_ms == 0 {
        return TimeCell::Empty;
    }
    if absolute || record.is_player {
        return TimeCell::Absolute(own_ms);
    }

    match record.player.map(|times| times.get(metric)) {
        Some(ref_ms) if ref_ms > 0 => TimeCell::Delta(delta_ms(own_ms, ref_ms)),
        _ => TimeCell::Absolute(own_ms),
    }
}
