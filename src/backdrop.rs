//! Mounted backdrop: wires one fetch pass to the rotation controller and
//! exposes the currently displayed image to a presentation shell.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{BackdropConfig, EndpointsConfig};
use crate::fetch::Fetcher;
use crate::handle::ImageHandle;
use crate::query::Query;
use crate::tasks::{resolver, rotator};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(5000);

/// Inline style map in the shape the presentation shell consumes.
pub type Style = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct BackdropOptions {
    /// Time between rotation steps.
    pub delay: Duration,
    pub endpoints: EndpointsConfig,
}

impl Default for BackdropOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            endpoints: EndpointsConfig::default(),
        }
    }
}

/// A mounted backdrop.
///
/// The query is fixed at mount time. One fetch pass resolves the image
/// sequence; afterwards the display only rotates through the already
/// resolved set, it never re-fetches. Dropping the backdrop cancels the
/// rotation timer.
pub struct Backdrop {
    current_rx: watch::Receiver<Option<Arc<ImageHandle>>>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<anyhow::Result<()>>>,
}

impl Backdrop {
    /// Mount a backdrop for the given query. Must be called within a tokio
    /// runtime.
    pub fn mount(query: Query, options: BackdropOptions) -> Self {
        let fetcher = Fetcher::with_bases(
            options.endpoints.source_base.clone(),
            options.endpoints.api_base.clone(),
        );
        let (sequence_tx, sequence_rx) = mpsc::channel(1);
        let (current_tx, current_rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        let tasks = vec![
            tokio::spawn(resolver::run(fetcher, query, sequence_tx)),
            tokio::spawn(rotator::run(
                sequence_rx,
                current_tx,
                options.delay,
                cancel.clone(),
            )),
        ];

        Self {
            current_rx,
            cancel,
            tasks,
        }
    }

    pub fn from_config(config: &BackdropConfig) -> Self {
        Self::mount(
            config.query.clone(),
            BackdropOptions {
                delay: config.delay,
                endpoints: config.endpoints.clone(),
            },
        )
    }

    /// Currently displayed image, if any.
    pub fn current(&self) -> Option<Arc<ImageHandle>> {
        self.current_rx.borrow().clone()
    }

    /// Watch receiver for the displayed image, for shells that await
    /// changes instead of polling.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<ImageHandle>>> {
        self.current_rx.clone()
    }

    /// Merge caller styling under the computed background image.
    ///
    /// The `background-image` key always reflects the current image when one
    /// is displayed; every other key passes through unmodified. With nothing
    /// displayed, no background image is emitted and the caller's map is
    /// returned untouched.
    pub fn style(&self, base: &Style) -> Style {
        let mut style = base.clone();
        if let Some(handle) = self.current() {
            style.insert("background-image".to_string(), handle.background_image());
        }
        style
    }

    /// Tear the backdrop down: cancel the rotation timer and wait for the
    /// tasks to finish.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        // Safe to call twice; unmount already cancelled by the time the
        // consumed self is dropped.
        self.cancel.cancel();
    }
}
