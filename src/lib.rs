pub mod backdrop;
pub mod config;
pub mod error;
pub mod events;
pub mod fetch;
pub mod handle;
pub mod query;
pub mod urls;
pub mod tasks {
    pub mod resolver;
    pub mod rotator;
}

pub use backdrop::{Backdrop, BackdropOptions, Style};
pub use error::Error;
pub use handle::ImageHandle;
pub use query::{AuthorizedQuery, ContentFilter, Orientation, Query, SourceQuery};
