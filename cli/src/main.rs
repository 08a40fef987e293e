use anyhow::Context;
use clap::Parser;
use leaderboard::core::columns::visible_columns;
use leaderboard::core::engine::{DashboardPrefs, Frame, LeaderboardEngine};
use leaderboard::interfaces::feed::{replay_feed, FeedEvent};
use leaderboard::interfaces::text_row::TextRow;
use leaderboard::post::standings::Standings;
use leaderboard::pre::dash_opts::DashOpts;
use leaderboard::pre::read_prefs::resolve_prefs;
use log::{debug, error, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::thread;
use std::time::{Duration, Instant};

fn print_frame(engine: &LeaderboardEngine<TextRow>, frame: &Frame) {
    let visible = visible_columns(&frame.hidden_columns);
    for row in engine.rows().rendered() {
        println!("{}", row.render(&visible));
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get dashboard options from the command line arguments
    let dash_opts: DashOpts = DashOpts::parse();

    let level = if dash_opts.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // get dashboard preferences
    let prefs: DashboardPrefs = resolve_prefs(&dash_opts)?;
    info!(
        "Showing {} cars on either side of the reference driver",
        prefs.adjacent_cars
    );

    let fh = File::open(&dash_opts.feed_path)
        .with_context(|| format!("Failed to open feed file {:?}!", dash_opts.feed_path))?;
    info!("Replaying feed from {:?}", dash_opts.feed_path);

    // EXECUTION -----------------------------------------------------------------------------------
    // the feed is replayed in its own thread, the render loop runs in the main thread
    let (tx, rx) = flume::unbounded();
    let interval = Duration::from_millis(dash_opts.interval_ms);
    let feed_thread = thread::spawn(move || replay_feed(BufReader::new(fh), &tx, interval));

    let mut engine = LeaderboardEngine::with_header(prefs.clone(), TextRow::header());
    let t_start = Instant::now();

    while let Ok(event) = rx.recv() {
        match event {
            FeedEvent::Snapshot(snapshot) => {
                let frame = engine.process(
                    *snapshot,
                    |index, entry| TextRow::new(index, entry, &prefs),
                    |row, entry| row.update(entry, &prefs),
                );
                for degradation in &frame.degradations {
                    warn!("{}", degradation);
                }
                debug!("{:?}", frame.stats);
                print_frame(&engine, &frame);
            }
            FeedEvent::Reconnected => {
                info!("Feed reconnected");
                engine.reset();
            }
            FeedEvent::SessionEnded => info!("Session ended"),
            FeedEvent::Closed => break,
        }
    }

    match feed_thread.join() {
        Ok(Ok(summary)) => info!(
            "Processed {} snapshots in {}ms ({} feed lines dropped)",
            engine.processed_snapshots(),
            t_start.elapsed().as_millis(),
            summary.dropped
        ),
        Ok(Err(err)) => error!("Feed replay failed: {}", err),
        Err(_) => anyhow::bail!("Feed thread panicked!"),
    }

    // POST-PROCESSING -----------------------------------------------------------------------------
    let standings = Standings::from_entries(engine.displayed_entries(), &prefs);
    standings.print_standings()?;

    if let Some(export_path) = &dash_opts.export_path {
        match standings.write_standings_csv(export_path) {
            Ok(path) => info!("Standings written to {}", path),
            Err(err) => warn!("Could not write standings: {}", err),
        }
    }

    Ok(())
}
