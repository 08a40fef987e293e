pub mod columns;
pub mod engine;
pub mod entry;
pub mod reconcile;
pub mod reference;
pub mod rejoin;
pub mod sector_times;
pub mod window;
