//! Shared test utilities for the photo-table test suite.
//!
//! Provides terse record constructors, a small fixture dataset that
//! exercises every predicate and sort key, and lookup helpers that panic
//! with a clear message on miss.
//!
//! # Fixture dataset
//!
//! ```text
//! users   1 Bart (m)     2 Amy (f)      3 Émile (m)
//! albums  1 Summer → 1   2 winter trip → 2   3 Autumn → 1   4 Études → 3
//! photos  in input order: 5, 2, 8, 1, 3, 7, 4, 6 (ids deliberately shuffled)
//! ```

use crate::dataset::Dataset;
use crate::types::{Album, EnrichedPhoto, Photo, Sex, User};

// =========================================================================
// Record constructors
// =========================================================================

pub fn user(id: u32, name: &str) -> User {
    user_with_sex(id, name, Sex::M)
}

pub fn user_with_sex(id: u32, name: &str, sex: Sex) -> User {
    User {
        id,
        name: name.to_string(),
        sex,
    }
}

pub fn album(id: u32, title: &str, user_id: u32) -> Album {
    Album {
        id,
        title: title.to_string(),
        user_id,
    }
}

pub fn photo(id: u32, title: &str, album_id: u32) -> Photo {
    Photo {
        id,
        title: title.to_string(),
        album_id,
        url: format!("https://example.test/{id}.jpg"),
    }
}

// =========================================================================
// Fixtures
// =========================================================================

pub fn sample_dataset() -> Dataset {
    Dataset {
        users: vec![
            user(1, "Bart"),
            user_with_sex(2, "Amy", Sex::F),
            user(3, "Émile"),
        ],
        albums: vec![
            album(1, "Summer", 1),
            album(2, "winter trip", 2),
            album(3, "Autumn", 1),
            album(4, "Études", 3),
        ],
        photos: vec![
            photo(5, "Leaves", 3),
            photo(2, "beach day", 1),
            photo(8, "Sunrise", 1),
            photo(1, "Sunset pier", 1),
            photo(3, "Snowman", 2),
            photo(7, "Bach score", 4),
            photo(4, "sunny slope", 2),
            photo(6, "apple harvest", 3),
        ],
    }
}

pub fn sample_rows() -> Vec<EnrichedPhoto> {
    sample_dataset().join().unwrap()
}

/// Bart owns "Beach Day" in "Summer"; Amy owns "Picnic" in "Spring".
pub fn bart_and_amy_dataset() -> Dataset {
    Dataset {
        users: vec![user(1, "Bart"), user_with_sex(2, "Amy", Sex::F)],
        albums: vec![album(1, "Summer", 1), album(2, "Spring", 2)],
        photos: vec![photo(1, "Beach Day", 1), photo(2, "Picnic", 2)],
    }
}

pub fn bart_and_amy_rows() -> Vec<EnrichedPhoto> {
    bart_and_amy_dataset().join().unwrap()
}

// =========================================================================
// Lookups
// =========================================================================

/// Find a row by photo id. Panics if not found.
pub fn find_row(rows: &[EnrichedPhoto], id: u32) -> &EnrichedPhoto {
    rows.iter().find(|r| r.id() == id).unwrap_or_else(|| {
        let ids: Vec<u32> = rows.iter().map(|r| r.id()).collect();
        panic!("photo {id} not found. Available: {ids:?}")
    })
}

/// Photo ids in row order.
pub fn row_ids(rows: &[&EnrichedPhoto]) -> Vec<u32> {
    rows.iter().map(|r| r.id()).collect()
}
