//! Interaction controller: filter/sort state and the actions that change it.
//!
//! [`ViewState`] is a value. Each [`Action`] produces a new state through
//! [`ViewState::apply`] rather than mutating the old one, and
//! [`TableView::compute`] always re-runs filter then sort over the full
//! joined set. Replaying the same actions therefore reproduces the same
//! table.
//!
//! Actions also have a one-line command form used by the interactive
//! session:
//!
//! ```text
//! search <text>    clear-search
//! owner <id>       owner all
//! album <id>       album all
//! sort <key>       reset
//! ```

use crate::filter::{self, Criteria};
use crate::sort::{self, ParseSortKeyError, SortKey};
use crate::types::EnrichedPhoto;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Everything the user can change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub criteria: Criteria,
    pub sort_key: SortKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetSearch(String),
    ClearSearch,
    SelectOwner(u32),
    AllOwners,
    ToggleAlbum(u32),
    AllAlbums,
    SetSort(SortKey),
    /// Neutral criteria. The sort key is kept.
    ResetFilters,
}

impl ViewState {
    pub fn with_sort(sort_key: SortKey) -> Self {
        Self {
            sort_key,
            ..Self::default()
        }
    }

    pub fn apply(&self, action: Action) -> ViewState {
        let criteria = self.criteria.clone();
        let criteria = match action {
            Action::SetSearch(text) => criteria.with_search_text(text),
            Action::ClearSearch => criteria.with_search_text(""),
            Action::SelectOwner(id) => criteria.with_owner(Some(id)),
            Action::AllOwners => criteria.with_owner(None),
            Action::ToggleAlbum(id) => criteria.toggle_album(id),
            Action::AllAlbums => criteria.with_all_albums(),
            Action::ResetFilters => Criteria::default(),
            Action::SetSort(sort_key) => {
                return ViewState {
                    criteria,
                    sort_key,
                };
            }
        };
        ViewState {
            criteria,
            sort_key: self.sort_key,
        }
    }

    /// Apply a sequence of actions left to right.
    pub fn apply_all(&self, actions: impl IntoIterator<Item = Action>) -> ViewState {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.apply(action))
    }
}

/// Rows to display for a state, in display order.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub rows: Vec<&'a EnrichedPhoto>,
}

impl<'a> TableView<'a> {
    pub fn compute(records: &'a [EnrichedPhoto], state: &ViewState) -> Self {
        let visible = filter::filter(records, &state.criteria);
        let rows = sort::sort(&visible, state.sort_key);
        Self { rows }
    }

    pub fn visible_count(&self) -> usize {
        self.rows.len()
    }

    /// Views show the "no photos matching" notice when this is true.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseActionError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
    #[error("invalid id '{0}'")]
    InvalidId(String),
    #[error(transparent)]
    SortKey(#[from] ParseSortKeyError),
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        // Only the single separator after the command is consumed.
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = rest.trim();
        let require = |expected: &'static str| {
            if arg.is_empty() {
                Err(ParseActionError::MissingArgument {
                    command: command.to_string(),
                    expected,
                })
            } else {
                Ok(arg)
            }
        };

        match command {
            "" => Err(ParseActionError::Empty),
            // Kept as typed; trimming is the filter's job.
            "search" => Ok(Action::SetSearch(rest.to_string())),
            "clear-search" => Ok(Action::ClearSearch),
            "owner" => match require("a user id or 'all'")? {
                "all" => Ok(Action::AllOwners),
                id => parse_id(id).map(Action::SelectOwner),
            },
            "album" => match require("an album id or 'all'")? {
                "all" => Ok(Action::AllAlbums),
                id => parse_id(id).map(Action::ToggleAlbum),
            },
            "sort" => Ok(Action::SetSort(arg.parse()?)),
            "reset" => Ok(Action::ResetFilters),
            other => Err(ParseActionError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_id(s: &str) -> Result<u32, ParseActionError> {
    s.parse()
        .map_err(|_| ParseActionError::InvalidId(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn default_state_shows_everything_in_input_order() {
        let rows = sample_rows();
        let view = TableView::compute(&rows, &ViewState::default());
        let expected: Vec<u32> = rows.iter().map(|r| r.id()).collect();
        assert_eq!(row_ids(&view.rows), expected);
        assert_eq!(view.visible_count(), rows.len());
    }

    #[test]
    fn apply_returns_new_state() {
        let before = ViewState::default();
        let after = before.apply(Action::SetSearch("beach".into()));
        assert_eq!(before, ViewState::default());
        assert_eq!(after.criteria.search_text, "beach");
    }

    #[test]
    fn reselecting_owner_is_a_no_op() {
        let once = ViewState::default().apply(Action::SelectOwner(2));
        assert_eq!(once.apply(Action::SelectOwner(2)), once);
        assert_eq!(once.apply(Action::AllOwners).criteria.owner_id, None);
    }

    #[test]
    fn album_toggle_twice_is_identity() {
        let state = ViewState::default()
            .apply(Action::ToggleAlbum(3))
            .apply(Action::ToggleAlbum(3));
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn reset_keeps_sort_key() {
        let rows = sample_rows();
        let state = ViewState::default().apply_all([
            Action::SetSort(SortKey::PhotoName),
            Action::SetSearch("sun".into()),
            Action::SelectOwner(1),
            Action::ToggleAlbum(1),
        ]);
        let reset = state.apply(Action::ResetFilters);
        assert_eq!(reset.sort_key, SortKey::PhotoName);
        assert!(reset.criteria.is_neutral());

        let view = TableView::compute(&rows, &reset);
        assert_eq!(view.visible_count(), rows.len());
        let expected = sort::sort(&rows.iter().collect::<Vec<_>>(), SortKey::PhotoName);
        assert_eq!(row_ids(&view.rows), row_ids(&expected));
    }

    #[test]
    fn set_sort_keeps_criteria() {
        let state = ViewState::default()
            .apply(Action::SelectOwner(1))
            .apply(Action::SetSort(SortKey::Id));
        assert_eq!(state.criteria.owner_id, Some(1));
        assert_eq!(state.sort_key, SortKey::Id);
    }

    #[test]
    fn compute_filters_then_sorts() {
        let rows = sample_rows();
        let state = ViewState::default().apply_all([
            Action::SelectOwner(1),
            Action::SetSort(SortKey::Id),
        ]);
        let view = TableView::compute(&rows, &state);
        assert_eq!(row_ids(&view.rows), [1, 2, 5, 6, 8]);
        assert_eq!(find_row(&rows, 5).album.title, "Autumn");
    }

    #[test]
    fn empty_view_when_nothing_matches() {
        let rows = bart_and_amy_rows();
        let state = ViewState::default().apply(Action::SetSearch("winter".into()));
        let view = TableView::compute(&rows, &state);
        assert!(view.is_empty());
    }

    #[test]
    fn parse_commands() {
        assert_eq!("search beach day".parse::<Action>(), Ok(Action::SetSearch("beach day".into())));
        assert_eq!("search".parse::<Action>(), Ok(Action::SetSearch(String::new())));
        assert_eq!(
            "search  beach ".parse::<Action>(),
            Ok(Action::SetSearch(" beach ".into()))
        );
        assert_eq!("owner 2 ".parse::<Action>(), Ok(Action::SelectOwner(2)));
        assert_eq!("clear-search".parse::<Action>(), Ok(Action::ClearSearch));
        assert_eq!("owner 2".parse::<Action>(), Ok(Action::SelectOwner(2)));
        assert_eq!("owner all".parse::<Action>(), Ok(Action::AllOwners));
        assert_eq!("album 7".parse::<Action>(), Ok(Action::ToggleAlbum(7)));
        assert_eq!("album all".parse::<Action>(), Ok(Action::AllAlbums));
        assert_eq!("sort userName".parse::<Action>(), Ok(Action::SetSort(SortKey::UserName)));
        assert_eq!("  reset  ".parse::<Action>(), Ok(Action::ResetFilters));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Action>(), Err(ParseActionError::Empty));
        assert!(matches!(
            "owner".parse::<Action>(),
            Err(ParseActionError::MissingArgument { .. })
        ));
        assert_eq!(
            "album x".parse::<Action>(),
            Err(ParseActionError::InvalidId("x".into()))
        );
        assert!(matches!(
            "sort date".parse::<Action>(),
            Err(ParseActionError::SortKey(_))
        ));
        assert_eq!(
            "zoom 2".parse::<Action>(),
            Err(ParseActionError::UnknownCommand("zoom".into()))
        );
    }

    #[test]
    fn state_serializes_for_inspection() {
        let state = ViewState::default().apply_all([
            Action::ToggleAlbum(2),
            Action::SetSort(SortKey::AlbumName),
        ]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["sortKey"], "albumName");
        assert_eq!(json["criteria"]["albumIds"][0], 2);
    }
}
