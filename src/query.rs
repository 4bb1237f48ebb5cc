use std::fmt;

use serde::Deserialize;

/// Queries resolved through the redirect-style source service, which needs
/// no access key. Exactly one discriminating shape at a time; `keywords`
/// refines every shape except a direct photo lookup, whose id already pins
/// the result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "by", rename_all = "kebab-case")]
pub enum SourceQuery {
    /// A single photo, addressed by its public id.
    Photo {
        #[serde(rename = "photo-id")]
        photo_id: String,
    },
    /// Photos drawn from a public collection.
    Collection {
        #[serde(rename = "collection-id")]
        collection_id: String,
        #[serde(default)]
        keywords: Option<String>,
    },
    /// Photos drawn from a public topic.
    Topic {
        #[serde(rename = "topic-id")]
        topic_id: String,
        #[serde(default)]
        keywords: Option<String>,
    },
    /// Photos by a single user.
    User {
        username: String,
        #[serde(default)]
        keywords: Option<String>,
    },
    /// A random photo, optionally narrowed by keywords.
    Random {
        #[serde(default)]
        keywords: Option<String>,
    },
}

/// Photo orientation filter accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Squarish,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Squarish => "squarish",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content-safety filter accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFilter {
    Low,
    High,
}

impl ContentFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ContentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite query for the authenticated API.
///
/// Explicit `photo_ids` short-circuit the search endpoint entirely: each id
/// is fetched directly. Otherwise `collection_ids` narrows the search;
/// `topics` only applies when no collections are given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuthorizedQuery {
    /// Application access key authorizing the query.
    pub access_key: String,
    #[serde(default)]
    pub photo_ids: Vec<String>,
    #[serde(default)]
    pub collection_ids: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub content_filter: Option<ContentFilter>,
    /// Number of photos to return (default 1, max 30).
    #[serde(default)]
    pub count: Option<u32>,
}

/// Top-level query. The presence of an access key is the sole discriminator
/// between the two families, so the untagged representation tries the
/// authorized shape first and an anonymous mapping can never be mistaken
/// for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Query {
    Authorized(AuthorizedQuery),
    Anonymous(SourceQuery),
}
