pub mod dash_opts;
pub mod read_prefs;
