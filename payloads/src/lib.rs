//! Types shared between the catalog REST API and its frontend.

pub mod api_client;
pub mod listing;
pub mod requests;

pub use api_client::{APIClient, ClientError};
pub use listing::{Envelope, Listing};

use derive_more::Display;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SeriesId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EpisodeId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// A collection exposed by the catalog API under `/api/v1/<resource>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Resource {
    #[display("movies")]
    Movies,
    #[display("series")]
    Series,
    #[display("episodes")]
    Episodes,
    #[display("categories")]
    Categories,
    #[display("users")]
    Users,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Movies,
        Resource::Series,
        Resource::Episodes,
        Resource::Categories,
        Resource::Users,
    ];

    /// Path segment of the collection endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::Series => "series",
            Self::Episodes => "episodes",
            Self::Categories => "categories",
            Self::Users => "users",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Number of seasons, if the API reports it
    #[serde(default)]
    pub seasons: Option<u32>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub series_id: SeriesId,
    pub title: String,
    pub season: u32,
    /// Episode number within the season
    pub number: u32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[display("admin")]
    Admin,
    #[display("editor")]
    Editor,
    #[display("viewer")]
    Viewer,
}

/// An account of the admin application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}
