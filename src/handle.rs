use bytes::Bytes;

/// An opaque, displayable image resolved by a fetch pass.
///
/// The handle owns the fetched payload. Sequences share handles behind
/// `Arc`, so a payload is released exactly when the last reference goes
/// away, whether that is a slot in the current rotation sequence or a
/// reader still holding the displayed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    source: String,
    payload: Bytes,
}

impl ImageHandle {
    pub fn new(source: impl Into<String>, payload: Bytes) -> Self {
        Self {
            source: source.into(),
            payload,
        }
    }

    /// Final URL the payload was fetched from, after any redirect.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Raw image bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Value usable as a CSS `background-image`.
    pub fn background_image(&self) -> String {
        format!("url({})", self.source)
    }
}
