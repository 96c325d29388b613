//! Sort stage: order visible rows by the selected column.
//!
//! Always ascending. Uses a stable sort, so rows with equal keys keep the
//! order the filter stage produced. [`SortKey::Unset`] leaves the order
//! untouched.

use crate::collation::locale_compare;
use crate::types::EnrichedPhoto;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Unset,
    Id,
    PhotoName,
    AlbumName,
    UserName,
}

impl SortKey {
    /// The four sortable columns, in table order.
    pub const COLUMNS: [SortKey; 4] = [
        SortKey::Id,
        SortKey::PhotoName,
        SortKey::AlbumName,
        SortKey::UserName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Unset => "unset",
            SortKey::Id => "id",
            SortKey::PhotoName => "photoName",
            SortKey::AlbumName => "albumName",
            SortKey::UserName => "userName",
        }
    }

    /// Column header shown by the views.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Unset => "",
            SortKey::Id => "ID",
            SortKey::PhotoName => "Photo name",
            SortKey::AlbumName => "Album name",
            SortKey::UserName => "User name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort key '{0}' (expected id, photoName, albumName, userName or unset)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    /// Accepts `photoName`, `photo-name`, `photo_name` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "" | "unset" | "none" => Ok(SortKey::Unset),
            "id" => Ok(SortKey::Id),
            "photoname" => Ok(SortKey::PhotoName),
            "albumname" => Ok(SortKey::AlbumName),
            "username" => Ok(SortKey::UserName),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// Return `records` ordered by `key`. The input slice is not modified.
pub fn sort<'a>(records: &[&'a EnrichedPhoto], key: SortKey) -> Vec<&'a EnrichedPhoto> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::Unset => {}
        SortKey::Id => sorted.sort_by_key(|r| r.id()),
        SortKey::PhotoName => sorted.sort_by(|a, b| locale_compare(a.title(), b.title())),
        SortKey::AlbumName => sorted.sort_by(|a, b| locale_compare(&a.album.title, &b.album.title)),
        SortKey::UserName => sorted.sort_by(|a, b| locale_compare(&a.user.name, &b.user.name)),
    }
    log::debug!("sorted {} rows by {}", sorted.len(), key);
    sorted
}
