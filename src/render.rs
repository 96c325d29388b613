//! HTML page rendering.
//!
//! Renders the filter panel and the photo table for one [`ViewState`] as a
//! standalone page. Markup uses Bulma class names; the stylesheet is linked
//! from a CDN and is not required for the page to be readable.
//!
//! ## Page Structure
//!
//! ```text
//! h1.title                       page title from config
//! nav.panel
//! ├── p.panel-tabs               owner tabs: All + one per user
//! ├── div.panel-block            search input (+ clear button when non-empty)
//! ├── div.panel-block            album buttons: All + one per album
//! └── div.panel-block            "Reset all filters"
//! div.box.table-container
//! ├── p[data-cy=NoMatchingMessage]  filled only when no row matches
//! └── table                      ID | Photo name | Album name | User name
//!                                (header always present, body may be empty)
//! ```
//!
//! Controls carry `data-action` attributes holding the command each one
//! triggers (`owner 2`, `album all`, `sort photoName`, ...), the same command
//! language the interactive session accepts.
//!
//! Uses [maud](https://maud.lambda.xyz/): templates are Rust code and every
//! interpolated string is escaped.

use crate::config::ViewConfig;
use crate::controller::{TableView, ViewState};
use crate::dataset::Dataset;
use crate::sort::SortKey;
use crate::types::{EnrichedPhoto, Sex};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const BULMA_CSS: &str = "https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css";
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

/// Render the page and write it to `output`, creating parent directories.
pub fn write_page(
    output: &Path,
    dataset: &Dataset,
    state: &ViewState,
    view: &TableView<'_>,
    config: &ViewConfig,
) -> Result<(), RenderError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let markup = render_page(dataset, state, view, config);
    fs::write(output, markup.into_string())?;
    log::info!(
        "wrote {} rows to {}",
        view.visible_count(),
        output.display()
    );
    Ok(())
}

/// Render the whole page.
pub fn render_page(
    dataset: &Dataset,
    state: &ViewState,
    view: &TableView<'_>,
    config: &ViewConfig,
) -> Markup {
    let content = html! {
        div.section {
            div.container {
                h1.title { (config.title) }
                div.block {
                    (filter_panel(dataset, state))
                }
                div."box"."table-container" {
                    p data-cy="NoMatchingMessage" {
                        @if view.is_empty() {
                            (config.no_results_message)
                        }
                    }
                    (photo_table(view, state.sort_key))
                }
            }
        }
    };
    base_document(&config.title, content)
}

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(BULMA_CSS);
                link rel="stylesheet" href=(FONT_AWESOME_CSS);
            }
            body {
                (content)
            }
        }
    }
}

// ============================================================================
// Filter panel
// ============================================================================

fn filter_panel(dataset: &Dataset, state: &ViewState) -> Markup {
    let criteria = &state.criteria;
    html! {
        nav.panel {
            p."panel-heading" { "Filters" }

            p."panel-tabs"."has-text-weight-bold" {
                a."is-active"[criteria.owner_id.is_none()] href="#/" data-action="owner all" {
                    "All"
                }
                @for user in &dataset.users {
                    a."is-active"[criteria.owner_id == Some(user.id)]
                        href="#/" data-action={ "owner " (user.id) } {
                        (user.name)
                    }
                }
            }

            div."panel-block" {
                p.control."has-icons-left"."has-icons-right" {
                    input.input type="text" placeholder="Search" value=(criteria.search_text);
                    span.icon."is-left" {
                        i.fas."fa-search" aria-hidden="true" {}
                    }
                    @if !criteria.search_text.is_empty() {
                        span.icon."is-right" {
                            button.delete type="button" data-action="clear-search" {}
                        }
                    }
                }
            }

            div."panel-block"."is-flex-wrap-wrap" {
                a.button."is-success"."mr-6"."is-outlined"[!criteria.album_ids.is_empty()]
                    href="#/" data-action="album all" {
                    "All"
                }
                @for album in &dataset.albums {
                    @let selected = criteria.album_ids.contains(&album.id);
                    a.button."mr-2"[selected]."my-1"[selected]."is-info"[selected]
                        href="#/" data-action={ "album " (album.id) } {
                        (album.title)
                    }
                }
            }

            div."panel-block" {
                a.button."is-link"."is-outlined"."is-fullwidth" href="#/" data-action="reset" {
                    "Reset all filters"
                }
            }
        }
    }
}

// ============================================================================
// Table
// ============================================================================

fn sort_icon(column: SortKey, active: SortKey) -> &'static str {
    if column == active { "fa-sort-up" } else { "fa-sort" }
}

fn user_class(sex: Sex) -> &'static str {
    match sex {
        Sex::M => "has-text-link",
        Sex::F => "has-text-danger",
    }
}

fn photo_table(view: &TableView<'_>, sort_key: SortKey) -> Markup {
    html! {
        table.table."is-striped"."is-narrow"."is-fullwidth" {
            thead {
                tr {
                    @for column in SortKey::COLUMNS {
                        th {
                            span."is-flex"."is-flex-wrap-nowrap" {
                                (column.label())
                                a href="#/" data-action={ "sort " (column.as_str()) } {
                                    span.icon {
                                        i data-cy="SortIcon" class={ "fas " (sort_icon(column, sort_key)) } {}
                                    }
                                }
                            }
                        }
                    }
                }
            }
            tbody {
                @for row in &view.rows {
                    (photo_row(row))
                }
            }
        }
    }
}

fn photo_row(row: &EnrichedPhoto) -> Markup {
    html! {
        tr data-photo-id=(row.id()) {
            td."has-text-weight-bold" { (row.id()) }
            td { (row.title()) }
            td { (row.album.title) }
            td class=(user_class(row.user.sex)) { (row.user.name) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
