use serde::{Deserialize, Serialize};

use super::post::MetaTags;

/// Result of one SEO refresh run, as stored in `posts.preview_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StagedRefresh {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) meta_tags: MetaTags,
    pub(crate) trends_used: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityLabel {
    Date,
    Cardinal,
    Percent,
    Quantity,
}

/// A recognized span of text. Offsets are byte offsets into the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entity {
    pub(crate) text: String,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) label: EntityLabel,
}

/// An entity flagged as potentially stale.
pub(crate) type OutdatedSpan = Entity;
