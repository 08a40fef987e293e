//! Keyed reconciliation of rendered leaderboard rows.
//!
//! Row handles are opaque to this module: they are created and updated through injected closures
//! and released by dropping them. A handle is owned by the [`RenderedRowMap`] for as long as its
//! car stays on the leaderboard, so refreshing a row never replaces the handle.

use crate::core::entry::DriverEntry;
use log::{debug, warn};
use std::collections::HashMap;

/// ReconcileStats counts what one reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub reused: usize,
    pub discarded: usize,
    pub orphans: usize,
}

/// RenderedRowMap owns the rendered rows keyed by `DriverEntry::index` together with their
/// display order. An optional header row is not part of the keyed rows and survives every pass.
#[derive(Debug)]
pub struct RenderedRowMap<H> {
    header: Option<H>,
    order: Vec<u32>,
    rows: HashMap<u32, H>,
}

impl<H> Default for RenderedRowMap<H> {
    fn default() -> Self {
        RenderedRowMap {
            header: None,
            order: Vec::new(),
            rows: HashMap::new(),
        }
    }
}

impl<H> RenderedRowMap<H> {
    pub fn new() -> RenderedRowMap<H> {
        RenderedRowMap::default()
    }

    pub fn with_header(header: H) -> RenderedRowMap<H> {
        RenderedRowMap {
            header: Some(header),
            ..RenderedRowMap::default()
        }
    }

    pub fn header(&self) -> Option<&H> {
        self.header.as_ref()
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Car indices in display order.
    pub fn indices(&self) -> &[u32] {
        &self.order
    }

    pub fn row(&self, index: u32) -> Option<&H> {
        self.rows.get(&index)
    }

    /// Data rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &H)> + '_ {
        self.order.iter().map(move |index| {
            let handle = self
                .rows
                .get(index)
                .expect("Rendered row order refers to a discarded row handle!");
            (*index, handle)
        })
    }

    /// All rendered rows in display order, header first.
    pub fn rendered(&self) -> impl Iterator<Item = &H> + '_ {
        self.header
            .iter()
            .chain(self.rows().map(|(_, handle)| handle))
    }

    /// clear discards every data row and returns how many were discarded. The header is kept.
    pub fn clear(&mut self) -> usize {
        let discarded = self.rows.len();
        self.order.clear();
        self.rows.clear();
        discarded
    }

    /// reconcile brings the rendered rows in line with `entries`.
    ///
    /// All current rows are detached first. Every entry then either reuses the detached row of its
    /// index (overwritten in place by `updater`) or gets a new row from `factory`, and is appended
    /// in entry order. Detached rows that were not picked up again are dropped at the end of the
    /// pass. Entries without an index, and repeated indices, are skipped and counted as orphans.
    pub fn reconcile<F, U>(
        &mut self,
        entries: &[DriverEntry],
        mut factory: F,
        mut updater: U,
    ) -> ReconcileStats
    where
        F: FnMut(u32, &DriverEntry) -> H,
        U: FnMut(&mut H, &DriverEntry),
    {
        let mut stats = ReconcileStats::default();

        let mut detached = std::mem::take(&mut self.rows);
        self.order.clear();
        let mut rows = HashMap::with_capacity(entries.len());

        for entry in entries {
            let index = match entry.index {
                Some(index) => index,
                None => {
                    warn!(
                        "Dropping entry at position {} without a car index",
                        entry.position
                    );
                    stats.orphans += 1;
                    continue;
                }
            };

            if rows.contains_key(&index) {
                warn!(
                    "Dropping entry at position {} with repeated car index {}",
                    entry.position, index
                );
                stats.orphans += 1;
                continue;
            }

            let handle = match detached.remove(&index) {
                Some(mut handle) => {
                    updater(&mut handle, entry);
                    stats.reused += 1;
                    handle
                }
                None => {
                    stats.created += 1;
                    factory(index, entry)
                }
            };

            self.order.push(index);
            rows.insert(index, handle);
        }

        stats.discarded = detached.len();
        drop(detached);
        self.rows = rows;

        debug_assert_eq!(self.order.len(), self.rows.len());
        debug!(
            "Reconciled {} rows: {} created, {} reused, {} discarded, {} orphans",
            self.order.len(),
            stats.created,
            stats.reused,
            stats.discarded,
            stats.orphans
        );

        stats
    }
}

/// reconcile consumes the previous row map and returns the reconciled one.
pub fn reconcile<H, F, U>(
    mut previous: RenderedRowMap<H>,
    entries: &[DriverEntry],
    factory: F,
    updater: U,
) -> RenderedRowMap<H>
where
    F: FnMut(u32, &DriverEntry) -> H,
    U: FnMut(&mut H, &DriverEntry),
{
    previous.reconcile(entries, factory, updater);
    previous
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Test handle with a serial number per created row and a drop log.
    #[derive(Debug)]
    struct Row {
        serial: u32,
        index: u32,
        position: u32,
        updates: u32,
        dropped: Rc<RefCell<Vec<u32>>>,
    }

    impl Drop for Row {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.index);
        }
    }

    struct Harness {
        next_serial: u32,
        dropped: Rc<RefCell<Vec<u32>>>,
    }

    impl Harness {
        fn new() -> Harness {
            Harness {
                next_serial: 0,
                dropped: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn run(&mut self, map: &mut RenderedRowMap<Row>, entries: &[DriverEntry]) -> ReconcileStats {
            let dropped = Rc::clone(&self.dropped);
            let next_serial = &mut self.next_serial;
            map.reconcile(
                entries,
                |index, entry| {
                    *next_serial += 1;
                    Row {
                        serial: *next_serial,
                        index,
                        position: entry.position,
                        updates: 0,
                        dropped: Rc::clone(&dropped),
                    }
                },
                |row, entry| {
                    row.position = entry.position;
                    row.updates += 1;
                },
            )
        }

        fn header(&self) -> Row {
            Row {
                serial: 0,
                index: u32::MAX,
                position: 0,
                updates: 0,
                dropped: Rc::clone(&self.dropped),
            }
        }
    }

    fn entries(indices: &[u32]) -> Vec<DriverEntry> {
        indices
            .iter()
            .enumerate()
            .map(|(i, &index)| DriverEntry {
                index: Some(index),
                position: i as u32 + 1,
                ..Default::default()
            })
            .collect()
    }

    fn serials(map: &RenderedRowMap<Row>) -> Vec<(u32, u32)> {
        map.rows().map(|(index, row)| (index, row.serial)).collect()
    }

    #[test]
    fn rows_are_created_then_reused() {
        let mut harness = Harness::new();
        let mut map = RenderedRowMap::new();

        let stats = harness.run(&mut map, &entries(&[7, 3, 9]));
        assert_eq!(stats.created, 3);
        assert_eq!(map.indices(), &[7, 3, 9]);

        let before = serials(&map);
        let stats = harness.run(&mut map, &entries(&[7, 3, 9]));
        assert_eq!(stats, ReconcileStats { created: 0, reused: 3, discarded: 0, orphans: 0 });
        assert_eq!(serials(&map), before);
        assert!(harness.dropped.borrow().is_empty());
    }

    #[test]
    fn reordering_keeps_identity_and_updates_contents() {
        let mut harness = Harness::new();
        let mut map = RenderedRowMap::new();
        harness.run(&mut map, &entries(&[7, 3, 9]));
        let serial_of_3 = map.row(3).unwrap().serial;

        harness.run(&mut map, &entries(&[3, 9, 7]));
        assert_eq!(map.indices(), &[3, 9, 7]);
        let row = map.row(3).unwrap();
        assert_eq!(row.serial, serial_of_3);
        assert_eq!(row.position, 1);
        assert_eq!(row.updates, 1);
    }

    #[test]
    fn exactly_the_missing_rows_are_discarded() {
        let mut harness = Harness::new();
        let mut map = RenderedRowMap::new();
        harness.run(&mut map, &entries(&[1, 2, 3, 4]));

        let stats = harness.run(&mut map, &entries(&[4, 2, 5]));
        assert_eq!(stats.created, 1);
        assert_eq!(stats.reused, 2);
        assert_eq!(stats.discarded, 2);

        let mut dropped = harness.dropped.borrow().clone();
        dropped.sort_unstable();
        assert_eq!(dropped, vec![1, 3]);
        assert_eq!(map.indices(), &[4, 2, 5]);
    }

    #[test]
    fn header_survives_every_pass() {
        let mut harness = Harness::new();
        let mut map = RenderedRowMap::with_header(harness.header());
        harness.run(&mut map, &entries(&[1, 2]));
        assert_eq!(map.rendered().count(), 3);

        let stats = harness.run(&mut map, &[]);
        assert_eq!(stats.discarded, 2);
        assert!(map.is_empty());
        let rendered: Vec<u32> = map.rendered().map(|row| row.serial).collect();
        assert_eq!(rendered, vec![0]);
        assert!(!harness.dropped.borrow().contains(&u32::MAX));
    }

    #[test]
    fn orphan_entries_are_skipped() {
        let mut harness = Harness::new();
        let mut map = RenderedRowMap::new();
        let mut list = entries(&[1, 2, 3]);
        list[1].index = None;
        list.push(DriverEntry {
            index: Some(3),
            position: 4,
            ..Default::default()
        });

        let stats = harness.run(&mut map, &list);
        assert_eq!(stats.orphans, 2);
        assert_eq!(stats.created, 2);
        assert_eq!(map.indices(), &[1, 3]);
        assert_eq!(map.row(3).unwrap().position, 3);
    }

    #[test]
    fn clear_keeps_the_header() {
        let mut harness = Harness::new();
        let mut map = RenderedRowMap::with_header(harness.header());
        harness.run(&mut map, &entries(&[1, 2]));
        assert_eq!(map.clear(), 2);
        assert!(map.header().is_some());
        assert_eq!(map.rendered().count(), 1);

        let stats = harness.run(&mut map, &entries(&[1]));
        assert_eq!(stats.created, 1);
    }

    #[test]
    fn free_function_returns_the_new_map() {
        let mut created = 0;
        let map = reconcile(
            RenderedRowMap::new(),
            &entries(&[5, 6]),
            |index, _| {
                created += 1;
                index * 2
            },
            |_, _| {},
        );
        assert_eq!(created, 2);
        assert_eq!(map.row(6), Some(&12));
    }
}
