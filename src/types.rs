//! Entity types shared by every stage.
//!
//! The three source collections (users, albums, photos) are loaded once and
//! never mutated. [`EnrichedPhoto`] is the denormalized row produced by the
//! join stage and consumed by filtering, sorting and the views.
//!
//! Field names on the wire follow the source JSON (`albumId`, `userId`).

use serde::{Deserialize, Serialize};

/// Sex of a user, used by the views to style the owner column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    M,
    F,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub sex: Sex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: u32,
    pub title: String,
    /// Owner of the album. Must reference an existing [`User`].
    pub user_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: u32,
    pub title: String,
    /// Containing album. Must reference an existing [`Album`].
    pub album_id: u32,
    #[serde(default)]
    pub url: String,
}

/// A photo with its album and the album's owner resolved.
///
/// Serializes flat: the photo fields at the top level, with `album` and
/// `user` as nested objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedPhoto {
    #[serde(flatten)]
    pub photo: Photo,
    pub album: Album,
    pub user: User,
}

impl EnrichedPhoto {
    pub fn id(&self) -> u32 {
        self.photo.id
    }

    pub fn title(&self) -> &str {
        &self.photo.title
    }

    pub fn album_id(&self) -> u32 {
        self.photo.album_id
    }

    /// Id of the user owning this photo's album.
    pub fn owner_id(&self) -> u32 {
        self.album.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_reads_camel_case_fields() {
        let photo: Photo =
            serde_json::from_str(r#"{"id": 3, "title": "Dunes", "albumId": 7, "url": "u"}"#)
                .unwrap();
        assert_eq!(photo.album_id, 7);
        assert_eq!(photo.url, "u");
    }

    #[test]
    fn photo_url_is_optional() {
        let photo: Photo = serde_json::from_str(r#"{"id": 3, "title": "Dunes", "albumId": 7}"#)
            .unwrap();
        assert_eq!(photo.url, "");
    }

    #[test]
    fn sex_uses_single_letter_codes() {
        let user: User = serde_json::from_str(r#"{"id": 1, "name": "Bart", "sex": "m"}"#).unwrap();
        assert_eq!(user.sex, Sex::M);
        assert_eq!(serde_json::to_string(&Sex::F).unwrap(), r#""f""#);
    }

    #[test]
    fn unknown_sex_is_rejected() {
        let result: Result<User, _> = serde_json::from_str(r#"{"id": 1, "name": "X", "sex": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn enriched_photo_serializes_flat_with_nested_relations() {
        let row = EnrichedPhoto {
            photo: Photo {
                id: 1,
                title: "Beach Day".to_string(),
                album_id: 2,
                url: String::new(),
            },
            album: Album {
                id: 2,
                title: "Summer".to_string(),
                user_id: 5,
            },
            user: User {
                id: 5,
                name: "Bart".to_string(),
                sex: Sex::M,
            },
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["title"], "Beach Day");
        assert_eq!(json["albumId"], 2);
        assert_eq!(json["album"]["title"], "Summer");
        assert_eq!(json["user"]["name"], "Bart");
        assert_eq!(row.owner_id(), 5);
    }
}
