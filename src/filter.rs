//! Filter stage: select the rows matching the current criteria.
//!
//! Three predicates, all of which must hold:
//!
//! | Criterion | Neutral value | Matches when |
//! |-----------|---------------|--------------|
//! | `search_text` | empty or blank | lower-cased title contains the trimmed, lower-cased text |
//! | `owner_id` | `None` | the album's `user_id` equals it |
//! | `album_ids` | empty set | the photo's `album_id` is in it |
//!
//! The result is a subsequence of the input: rows are never reordered.

use crate::types::EnrichedPhoto;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active filter values.
///
/// Treated as an immutable value: every change produces a new `Criteria`
/// through the `with_*` methods, so a filter call is reproducible from the
/// value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Criteria {
    pub search_text: String,
    pub owner_id: Option<u32>,
    pub album_ids: BTreeSet<u32>,
}

impl Criteria {
    pub fn with_search_text(self, text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..self
        }
    }

    pub fn with_owner(self, owner_id: Option<u32>) -> Self {
        Self { owner_id, ..self }
    }

    /// Add `album_id` to the selection, or remove it if already selected.
    pub fn toggle_album(self, album_id: u32) -> Self {
        let mut album_ids = self.album_ids;
        if !album_ids.remove(&album_id) {
            album_ids.insert(album_id);
        }
        Self { album_ids, ..self }
    }

    pub fn with_all_albums(self) -> Self {
        Self {
            album_ids: BTreeSet::new(),
            ..self
        }
    }

    /// True when no predicate is active.
    pub fn is_neutral(&self) -> bool {
        self.search_text.trim().is_empty() && self.owner_id.is_none() && self.album_ids.is_empty()
    }

    /// Whether a single row passes all three predicates.
    pub fn matches(&self, record: &EnrichedPhoto) -> bool {
        self.matches_search(record) && self.matches_owner(record) && self.matches_album(record)
    }

    fn matches_search(&self, record: &EnrichedPhoto) -> bool {
        let needle = self.search_text.trim();
        needle.is_empty()
            || record
                .title()
                .to_lowercase()
                .contains(&needle.to_lowercase())
    }

    fn matches_owner(&self, record: &EnrichedPhoto) -> bool {
        self.owner_id.is_none_or(|owner| record.owner_id() == owner)
    }

    fn matches_album(&self, record: &EnrichedPhoto) -> bool {
        self.album_ids.is_empty() || self.album_ids.contains(&record.album_id())
    }
}

/// Keep the rows matching `criteria`, in input order.
pub fn filter<'a>(records: &'a [EnrichedPhoto], criteria: &Criteria) -> Vec<&'a EnrichedPhoto> {
    let visible: Vec<&EnrichedPhoto> = records.iter().filter(|r| criteria.matches(r)).collect();
    log::debug!(
        "filter {:?}: {} of {} rows visible",
        criteria,
        visible.len(),
        records.len()
    );
    visible
}
