//! Join stage: attach each photo's album and owner.
//!
//! Runs once after loading. Albums and users are indexed by id, so the
//! join is a single pass over the photos. Output order is photo order and
//! output length is photo count; a dangling reference fails the whole join
//! instead of dropping the photo.

use crate::types::{Album, EnrichedPhoto, Photo, User};
use std::collections::HashMap;
use thiserror::Error;

/// A photo or album references an id that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("photo {photo_id} references missing album {album_id}")]
    MissingAlbum { photo_id: u32, album_id: u32 },
    #[error("album {album_id} references missing user {user_id}")]
    MissingUser { album_id: u32, user_id: u32 },
}

/// Denormalize photos into [`EnrichedPhoto`] rows.
pub fn join(
    photos: &[Photo],
    albums: &[Album],
    users: &[User],
) -> Result<Vec<EnrichedPhoto>, LookupError> {
    let albums_by_id: HashMap<u32, &Album> = albums.iter().map(|a| (a.id, a)).collect();
    let users_by_id: HashMap<u32, &User> = users.iter().map(|u| (u.id, u)).collect();

    let rows = photos
        .iter()
        .map(|photo| -> Result<EnrichedPhoto, LookupError> {
            let album = albums_by_id
                .get(&photo.album_id)
                .ok_or(LookupError::MissingAlbum {
                    photo_id: photo.id,
                    album_id: photo.album_id,
                })?;
            let user = users_by_id
                .get(&album.user_id)
                .ok_or(LookupError::MissingUser {
                    album_id: album.id,
                    user_id: album.user_id,
                })?;
            Ok(EnrichedPhoto {
                photo: photo.clone(),
                album: (*album).clone(),
                user: (*user).clone(),
            })
        })
        .collect::<Result<Vec<_>, LookupError>>()?;

    log::debug!(
        "joined {} photos against {} albums and {} users",
        rows.len(),
        albums.len(),
        users.len()
    );
    Ok(rows)
}
