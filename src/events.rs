use std::sync::Arc;

use crate::handle::ImageHandle;

/// Wholesale replacement of the rotation sequence, produced by one fetch
/// pass. An empty sequence means "display nothing".
#[derive(Debug)]
pub struct SequenceResolved(pub Vec<Arc<ImageHandle>>);
