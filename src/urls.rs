//! Pure query-to-URL translation.
//!
//! Nothing here performs I/O; both builders are deterministic on their
//! input, which keeps every routing rule unit-testable without a server.

use crate::query::{AuthorizedQuery, SourceQuery};

/// Redirect-style service: a constructed path answers with an image payload.
pub const SOURCE_BASE_URL: &str = "https://source.unsplash.com";

/// Authenticated API root.
pub const API_BASE_URL: &str = "https://api.unsplash.com";

/// Collapse a keyword refinement into the loose grammar the source service
/// accepts: trim, then strip every internal whitespace character. Blank
/// input counts as absent.
fn normalized_keywords(keywords: Option<&str>) -> Option<String> {
    let keywords = keywords?.trim();
    if keywords.is_empty() {
        return None;
    }
    Some(keywords.chars().filter(|c| !c.is_whitespace()).collect())
}

/// Build the path-style URL for the redirect service.
///
/// A topic query has no path shape of its own upstream; it falls through to
/// `random` and relies on the keyword refinement.
pub fn source_url(base: &str, query: &SourceQuery) -> String {
    let mut segments = vec![base.trim_end_matches('/').to_string()];
    let keywords = match query {
        SourceQuery::Photo { photo_id } => {
            segments.push(photo_id.clone());
            None
        }
        SourceQuery::Collection {
            collection_id,
            keywords,
        } => {
            segments.push("collection".to_string());
            segments.push(collection_id.clone());
            keywords.as_deref()
        }
        SourceQuery::User { username, keywords } => {
            segments.push("user".to_string());
            segments.push(username.clone());
            keywords.as_deref()
        }
        SourceQuery::Topic { keywords, .. } | SourceQuery::Random { keywords } => {
            segments.push("random".to_string());
            keywords.as_deref()
        }
    };
    // The keyword segment is path-joined, yielding `.../random/?kw`.
    if let Some(keywords) = normalized_keywords(keywords) {
        segments.push(format!("?{keywords}"));
    }
    segments.join("/")
}

/// Build the authenticated search endpoint URL.
///
/// Parameter order is fixed: `collections` (or else `query` built from
/// topics; collections win when both are present), `username`,
/// `orientation`, `content_filter`, `count` (default 1), and `client_id`
/// last. Absent optional parameters are omitted entirely.
pub fn search_url(base: &str, query: &AuthorizedQuery) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if !query.collection_ids.is_empty() {
        params.push(("collections", query.collection_ids.join(",")));
    } else if !query.topics.is_empty() {
        params.push(("query", query.topics.join(",")));
    }
    if let Some(username) = &query.username {
        params.push(("username", username.clone()));
    }
    if let Some(orientation) = query.orientation {
        params.push(("orientation", orientation.as_str().to_string()));
    }
    if let Some(filter) = query.content_filter {
        params.push(("content_filter", filter.as_str().to_string()));
    }
    params.push(("count", query.count.unwrap_or(1).to_string()));
    params.push(("client_id", query.access_key.clone()));

    let mut url = format!("{}/photos/random", base.trim_end_matches('/'));
    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
    url
}

/// Direct per-id fetch URL on the authenticated API.
pub fn photo_url(base: &str, photo_id: &str, access_key: &str) -> String {
    format!(
        "{}/photos/{photo_id}?client_id={access_key}",
        base.trim_end_matches('/')
    )
}
