use crate::core::engine::DashboardPrefs;
use crate::pre::dash_opts::DashOpts;
use anyhow::Context;
use std::fs::OpenOptions;
use std::path::Path;

/// read_prefs reads the JSON preferences file. Missing fields take their default values.
pub fn read_prefs(filepath: &Path) -> anyhow::Result<DashboardPrefs> {
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .with_context(|| format!("Failed to open preferences file {}!", filepath.display()))?;
    let prefs = serde_json::from_reader(&fh)
        .with_context(|| format!("Failed to parse preferences file {}!", filepath.display()))?;
    Ok(prefs)
}

/// resolve_prefs combines the preferences file (if any) with the command line overrides.
pub fn resolve_prefs(opts: &DashOpts) -> anyhow::Result<DashboardPrefs> {
    let mut prefs = match &opts.prefs_path {
        Some(path) => read_prefs(path)?,
        None => DashboardPrefs::default(),
    };

    if let Some(adjacent_cars) = opts.adjacent_cars {
        prefs.adjacent_cars = adjacent_cars;
    }

    Ok(prefs)
}
