//! Rotation controller: owns the resolved sequence and the interval timer.
//!
//! Idle with fewer than two handles, Rotating with two or more. The ticker
//! is created only when a freshly resolved sequence warrants it and is
//! dropped before a replacement starts and on every exit path, so two
//! tickers can never be alive for one controller instance.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::SequenceResolved;
use crate::handle::ImageHandle;

/// Ordered sequence of resolved handles plus the cursor into it.
#[derive(Debug, Default)]
pub struct RotationState {
    sequence: Vec<Arc<ImageHandle>>,
    current_index: usize,
}

impl RotationState {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Cursor position; 0 when the sequence is empty.
    pub fn position(&self) -> usize {
        self.current_index
    }

    /// Replace the whole sequence and reset the cursor. Handles only
    /// referenced by the outgoing sequence are released here.
    pub fn replace(&mut self, sequence: Vec<Arc<ImageHandle>>) {
        self.sequence = sequence;
        self.current_index = 0;
    }

    /// Advance the cursor modulo the sequence length.
    pub fn advance(&mut self) {
        if self.sequence.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.sequence.len();
    }

    /// The displayed image: `sequence[current_index]`, or nothing at all.
    pub fn current(&self) -> Option<Arc<ImageHandle>> {
        self.sequence.get(self.current_index).cloned()
    }
}

fn rotation_ticker(delay: Duration) -> Interval {
    // First advance happens one full delay after the sequence lands.
    let mut ticker = interval_at(Instant::now() + delay, delay);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Drives the slideshow: installs each resolved sequence as it arrives and
/// advances the cursor on a fixed delay while there is anything to rotate
/// through.
pub async fn run(
    mut sequence_rx: Receiver<SequenceResolved>,
    current_tx: watch::Sender<Option<Arc<ImageHandle>>>,
    delay: Duration,
    cancel: CancellationToken,
) -> Result<()> {
    debug!(delay = %humantime::format_duration(delay), "rotator task started");

    let mut state = RotationState::default();
    let mut ticker: Option<Interval> = None;
    let mut resolver_done = false;

    loop {
        select! {
            _ = cancel.cancelled() => {
                debug!("cancel received; exiting rotator task");
                break;
            }

            maybe_sequence = sequence_rx.recv(), if !resolver_done => {
                match maybe_sequence {
                    Some(SequenceResolved(handles)) => {
                        info!(count = handles.len(), "sequence replaced");
                        state.replace(handles);
                        // Stop the old ticker before a new one may start.
                        ticker = None;
                        if state.len() >= 2 {
                            ticker = Some(rotation_ticker(delay));
                        }
                        let _ = current_tx.send(state.current());
                    }
                    None => {
                        resolver_done = true;
                        if ticker.is_none() {
                            debug!("static sequence and no more fetch passes; rotator going idle");
                            break;
                        }
                    }
                }
            }

            _ = next_tick(&mut ticker) => {
                state.advance();
                debug!(index = state.position(), "rotation tick");
                let _ = current_tx.send(state.current());
            }
        }
    }

    Ok(())
}
