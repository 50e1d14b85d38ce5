//! `{count, next, previous, results}` envelopes with absolute page links.

use axum::http::header::HOST;
use axum::http::{HeaderMap, Uri};
use url::form_urlencoded;

use yamdb_domain::pagination::{Page, PageRequest};

use crate::domain::types::Listing;

const DEFAULT_HOST: &str = "localhost";

/// Wrap one listing page, linking to its neighbours on the same URL.
///
/// Query parameters other than `limit`/`offset` are carried over in their
/// original order; `previous` drops `offset` when it would be 0.
pub fn paginate<T, U>(
    listing: Listing<T>,
    page: PageRequest,
    headers: &HeaderMap,
    uri: &Uri,
    f: impl FnMut(T) -> U,
) -> Page<U> {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_HOST);
    let base = format!("http://{host}{}", uri.path());
    let kept: Vec<(String, String)> = form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
        .filter(|(k, _)| k != "limit" && k != "offset")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let link = |offset: Option<u64>| {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &kept {
            query.append_pair(k, v);
        }
        query.append_pair("limit", &page.limit.to_string());
        if let Some(offset) = offset.filter(|&o| o > 0) {
            query.append_pair("offset", &offset.to_string());
        }
        format!("{base}?{}", query.finish())
    };

    Page {
        count: listing.count,
        next: page.next_offset(listing.count).map(|o| link(Some(o))),
        previous: page.previous_offset().map(|o| link(Some(o))),
        results: listing.items.into_iter().map(f).collect(),
    }
}
