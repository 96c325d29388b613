//! # Photo Table
//!
//! A filterable, sortable table of photos. Three static collections (users,
//! albums, photos) are joined once into denormalized rows; every user action
//! then re-runs a filter and a sort over those rows.
//!
//! # Architecture: Join Once, Filter and Sort Per Action
//!
//! ```text
//! 1. Load     data/*.json        →  Dataset          (once)
//! 2. Join     Dataset            →  Vec<EnrichedPhoto>  (once, fails on dangling ids)
//! 3. Filter   rows + Criteria    →  visible rows     (per action)
//! 4. Sort     visible + SortKey  →  display order    (per action)
//! ```
//!
//! Every stage is a pure function over borrowed input. The only changing
//! value is the [`controller::ViewState`], which is replaced, never mutated,
//! by each [`controller::Action`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `User`, `Album`, `Photo` and the joined `EnrichedPhoto` |
//! | [`dataset`] | Loads the three collections from a directory or the built-in sample |
//! | [`join`] | Join stage: resolves album and owner per photo, `LookupError` on dangling ids |
//! | [`filter`] | Filter stage: search text, owner and album predicates |
//! | [`sort`] | Sort stage: `SortKey` and the stable ascending sort |
//! | [`collation`] | Locale-aware string comparison used by the name sorts |
//! | [`controller`] | `ViewState`, `Action` and the filter → sort recomputation |
//! | [`config`] | Layered `config.toml` loading and validation |
//! | [`output`] | Terminal table and control listings |
//! | [`render`] | HTML page with filter panel and table, via Maud |
//!
//! # Design Decisions
//!
//! ## Dangling References Are Fatal
//!
//! A photo pointing at a missing album, or an album pointing at a missing
//! user, means the static data is corrupt. The join fails with the missing
//! id instead of skipping the photo, and nothing is rendered.
//!
//! ## Stable Sorts
//!
//! Sorting is stable, so rows with equal keys keep their filtered order and
//! the same state always produces the same table.

pub mod collation;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod filter;
pub mod join;
pub mod output;
pub mod render;
pub mod sort;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
