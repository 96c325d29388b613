//! Terminal output for the CLI.
//!
//! Each view has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper writing to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Table
//!
//! ```text
//! ID  Photo name         Album name   User name
//! --  -----------------  -----------  ---------
//! 1   Beach Day          Summer       Bart (m)
//! 2   Picnic             Spring       Amy (f)
//!
//! 2 photos (sorted by userName)
//! ```
//!
//! ## Controls
//!
//! ```text
//! Users
//!   [ ] all
//! * [x] 1 Bart
//!   [ ] 2 Amy
//! ```

use crate::controller::{TableView, ViewState};
use crate::dataset::Dataset;
use crate::sort::SortKey;
use crate::types::{Album, EnrichedPhoto, Sex, User};

fn sex_code(sex: Sex) -> &'static str {
    match sex {
        Sex::M => "m",
        Sex::F => "f",
    }
}

fn cells(row: &EnrichedPhoto) -> [String; 4] {
    [
        row.id().to_string(),
        row.title().to_string(),
        row.album.title.clone(),
        format!("{} ({})", row.user.name, sex_code(row.user.sex)),
    ]
}

/// Left-align `cells` into columns of `widths`, trimming trailing padding.
fn pad_row(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

// ============================================================================
// Table
// ============================================================================

/// Format the visible rows as an aligned table.
///
/// Sort markers: the active column header gets a `^`.
pub fn format_table(view: &TableView<'_>, sort_key: SortKey, no_results: &str) -> Vec<String> {
    if view.is_empty() {
        return vec![no_results.to_string()];
    }

    let header: Vec<String> = SortKey::COLUMNS
        .iter()
        .map(|&key| {
            if key == sort_key {
                format!("{} ^", key.label())
            } else {
                key.label().to_string()
            }
        })
        .collect();
    let body: Vec<[String; 4]> = view.rows.iter().map(|row| cells(row)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let mut lines = vec![pad_row(&header, &widths), pad_row(&rule, &widths)];
    lines.extend(body.iter().map(|row| pad_row(row, &widths)));

    lines.push(String::new());
    let noun = if view.visible_count() == 1 { "photo" } else { "photos" };
    match sort_key {
        SortKey::Unset => lines.push(format!("{} {}", view.visible_count(), noun)),
        key => lines.push(format!("{} {} (sorted by {})", view.visible_count(), noun, key)),
    }
    lines
}

pub fn print_table(view: &TableView<'_>, sort_key: SortKey, no_results: &str) {
    for line in format_table(view, sort_key, no_results) {
        println!("{}", line);
    }
}

// ============================================================================
// Filter controls
// ============================================================================

/// Format the owner tabs: "all" plus one entry per user.
pub fn format_users(users: &[User], owner_id: Option<u32>) -> Vec<String> {
    let mut lines = vec!["Users".to_string()];
    lines.push(format!("  {} all", checkbox(owner_id.is_none())));
    for user in users {
        lines.push(format!(
            "  {} {} {}",
            checkbox(owner_id == Some(user.id)),
            user.id,
            user.name
        ));
    }
    lines
}

/// Format the album buttons with the owner's name next to each album.
pub fn format_albums<'a>(
    albums: impl IntoIterator<Item = &'a Album>,
    users: &[User],
    state: &ViewState,
) -> Vec<String> {
    let selected = &state.criteria.album_ids;
    let mut lines = vec!["Albums".to_string()];
    lines.push(format!("  {} all", checkbox(selected.is_empty())));
    for album in albums {
        let owner = users
            .iter()
            .find(|u| u.id == album.user_id)
            .map(|u| u.name.as_str())
            .unwrap_or("?");
        lines.push(format!(
            "  {} {} {} ({})",
            checkbox(selected.contains(&album.id)),
            album.id,
            album.title,
            owner
        ));
    }
    lines
}

/// Format the current criteria as a one-line summary.
pub fn format_state(state: &ViewState) -> String {
    let criteria = &state.criteria;
    let search = criteria.search_text.trim();
    let mut parts = Vec::new();
    if !search.is_empty() {
        parts.push(format!("search \"{}\"", search));
    }
    if let Some(owner) = criteria.owner_id {
        parts.push(format!("owner {}", owner));
    }
    if !criteria.album_ids.is_empty() {
        let ids: Vec<String> = criteria.album_ids.iter().map(u32::to_string).collect();
        parts.push(format!("albums {}", ids.join(",")));
    }
    if state.sort_key != SortKey::Unset {
        parts.push(format!("sort {}", state.sort_key));
    }
    if parts.is_empty() {
        "no filters".to_string()
    } else {
        parts.join(", ")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summarize a dataset that loaded and joined successfully.
pub fn format_check(dataset: &Dataset, joined: usize) -> Vec<String> {
    let mut lines = vec![
        format!("Users:  {}", dataset.users.len()),
        format!("Albums: {}", dataset.albums.len()),
        format!("Photos: {}", dataset.photos.len()),
        format!("Joined: {}", joined),
    ];
    for user in &dataset.users {
        let albums = dataset.albums_of(Some(user.id)).count();
        let photos = dataset
            .albums_of(Some(user.id))
            .map(|a| dataset.photos.iter().filter(|p| p.album_id == a.id).count())
            .sum::<usize>();
        lines.push(format!(
            "    {} {}: {} albums, {} photos",
            user.id, user.name, albums, photos
        ));
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
