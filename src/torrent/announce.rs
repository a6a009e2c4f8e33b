//! Tracker and web seed normalization.
//!
//! Trackers come from `announce-list` (tiers of URLs, flattened in order)
//! and fall back to the single `announce` URL only when the list yields none.

use std::collections::HashSet;

use tracing::warn;

use crate::bencode::{BDict, BValue};

/// Insertion-ordered set of URLs keyed on their raw bytes; the first occurrence wins.
#[derive(Debug, Default)]
pub(crate) struct UrlSet {
    seen: HashSet<Vec<u8>>,
    urls: Vec<String>,
}

impl UrlSet {
    /// Add a URL unless byte-identical to one already present.
    pub(crate) fn insert(&mut self, url: &[u8]) -> bool {
        if !self.seen.insert(url.to_vec()) {
            return false;
        }
        self.urls.push(String::from_utf8_lossy(url).into_owned());
        true
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

/// Trackers read from the root dictionary.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Trackers {
    /// Deduplicated, flattened tracker URLs.
    pub announce: Vec<String>,
    /// `announce-list` tiers with empty tiers dropped.
    pub tiers: Vec<Vec<String>>,
}

fn url_bytes<'a>(value: &'a BValue, field: &str) -> Option<&'a [u8]> {
    let url = value.as_bytes();
    if url.is_none() {
        warn!("Skipping non-string entry in {}", field);
    }
    url
}

fn read_tiers(root: &BDict) -> Vec<Vec<&[u8]>> {
    let Some(list) = root.get(b"announce-list") else {
        return Vec::new();
    };
    let Some(tiers) = list.as_list() else {
        warn!("Ignoring announce-list that is not a list");
        return Vec::new();
    };

    tiers
        .iter()
        .filter_map(|tier| match tier.as_list() {
            Some(urls) => Some(
                urls.iter()
                    .filter_map(|url| url_bytes(url, "announce-list"))
                    .collect::<Vec<_>>(),
            ),
            None => {
                warn!("Skipping announce-list tier that is not a list");
                None
            }
        })
        .filter(|tier| !tier.is_empty())
        .collect()
}

pub(crate) fn read_trackers(root: &BDict) -> Trackers {
    let tiers = read_tiers(root);

    let mut announce = UrlSet::default();
    for url in tiers.iter().flatten() {
        announce.insert(url);
    }

    if announce.is_empty() {
        if let Some(url) = root.get(b"announce").and_then(|v| url_bytes(v, "announce")) {
            announce.insert(url);
        }
    }

    Trackers {
        announce: announce.into_vec(),
        tiers: tiers
            .into_iter()
            .map(|tier| {
                tier.into_iter()
                    .map(|url| String::from_utf8_lossy(url).into_owned())
                    .collect()
            })
            .collect(),
    }
}

/// Web seeds from `url-list`, which holds either one URL or a list of them.
/// Empty entries are placeholders some creators write and are skipped.
pub(crate) fn read_url_list(root: &BDict) -> Vec<String> {
    let mut urls = UrlSet::default();
    let entries: Vec<&[u8]> = match root.get(b"url-list") {
        Some(BValue::List(list)) => list
            .iter()
            .filter_map(|v| url_bytes(v, "url-list"))
            .collect(),
        Some(value) => url_bytes(value, "url-list").into_iter().collect(),
        None => Vec::new(),
    };
    for url in entries.into_iter().filter(|url| !url.is_empty()) {
        urls.insert(url);
    }
    urls.into_vec()
}
