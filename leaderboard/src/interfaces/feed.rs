use crate::core::entry::Snapshot;
use crate::error::FeedError;
use flume::Sender;
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::BufRead;
use std::thread::sleep;
use std::time::{Duration, Instant};

/// FeedMessage is one decoded message of the telemetry feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedMessage {
    Snapshot(Snapshot),
    Reconnect,
    SessionEnded,
}

/// FeedEvent is sent from the feed thread to the render loop.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Snapshot(Box<Snapshot>),
    Reconnected,
    SessionEnded,
    Closed,
}

impl From<FeedMessage> for FeedEvent {
    fn from(message: FeedMessage) -> Self {
        match message {
            FeedMessage::Snapshot(snapshot) => FeedEvent::Snapshot(Box::new(snapshot)),
            FeedMessage::Reconnect => FeedEvent::Reconnected,
            FeedMessage::SessionEnded => FeedEvent::SessionEnded,
        }
    }
}

/// FeedSummary counts what a replay delivered and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub delivered: usize,
    pub dropped: usize,
}

/// decode_message decodes one feed message. Anything that does not decode is rejected here and
/// never reaches the engine.
pub fn decode_message(bytes: &[u8]) -> Result<FeedMessage, FeedError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(FeedError::Empty);
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// replay_feed reads one JSON message per line from `reader` and sends the decoded events to the
/// render loop, waiting `interval` between two snapshots. Lines that fail to decode are logged and
/// dropped. The replay stops early if the receiving side is gone. A `Closed` event is sent at the
/// end.
pub fn replay_feed<R: BufRead>(
    reader: R,
    tx: &Sender<FeedEvent>,
    interval: Duration,
) -> Result<FeedSummary, FeedError> {
    let mut summary = FeedSummary::default();

    for (line_no, line) in reader.lines().enumerate() {
        let t_start = Instant::now();
        let line = line?;

        let message = match decode_message(line.as_bytes()) {
            Ok(message) => message,
            Err(FeedError::Empty) => continue,
            Err(err) => {
                warn!("Dropping feed line {}: {}", line_no + 1, err);
                summary.dropped += 1;
                continue;
            }
        };

        let is_snapshot = matches!(message, FeedMessage::Snapshot(_));
        if tx.send(FeedEvent::from(message)).is_err() {
            info!("Render loop is gone, stopping replay after {} messages", summary.delivered);
            return Ok(summary);
        }
        summary.delivered += 1;

        // sleep until the replay interval is over (snapshots only)
        if is_snapshot {
            if let Some(t_sleep) = interval.checked_sub(t_start.elapsed()) {
                sleep(t_sleep);
            } else {
                debug!("Could not keep up with the replay interval");
            }
        }
    }

    let _ = tx.send(FeedEvent::Closed);
    info!(
        "Feed replay finished: {} messages delivered, {} dropped",
        summary.delivered, summary.dropped
    );
    Ok(summary)
}
