//! One-shot fetch pass feeding the rotator.

use anyhow::Result;
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};

use crate::events::SequenceResolved;
use crate::fetch::Fetcher;
use crate::query::Query;

/// Resolve the query once and hand the result to the rotator.
///
/// This is the orchestration boundary: failures end up in the log, not at
/// the caller, and the sequence simply stays empty. The pass itself is not
/// cancellable mid-flight; teardown during a slow fetch merely discards the
/// result because the rotator side of the channel is gone.
pub async fn run(
    fetcher: Fetcher,
    query: Query,
    to_rotator: Sender<SequenceResolved>,
) -> Result<()> {
    match fetcher.resolve(&query).await {
        Ok(handles) => {
            info!(count = handles.len(), "fetch pass resolved");
            let _ = to_rotator.send(SequenceResolved(handles)).await;
        }
        Err(err) => {
            warn!(error = %err, "fetch pass failed; no backdrop will be shown");
        }
    }
    Ok(())
}
