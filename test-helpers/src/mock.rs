//! Sample catalog used by the integration tests.
//!
//! A small but connected dataset: two categories, a movie in each, one
//! series with two episodes, and an admin and an editor account.

use jiff::Timestamp;
use payloads::{
    Category, CategoryId, Episode, EpisodeId, Movie, MovieId, Role, Series,
    SeriesId, User, UserId,
};

use crate::catalog::Catalog;

pub fn drama() -> Category {
    Category {
        id: CategoryId(1),
        name: "Drama".into(),
        description: Some("Historias intensas".into()),
    }
}

pub fn comedy() -> Category {
    Category {
        id: CategoryId(2),
        name: "Comedia".into(),
        description: None,
    }
}

pub fn movie_a() -> Movie {
    Movie {
        id: MovieId(1),
        title: "La casa del lago".into(),
        description: Some("Un misterio junto al agua".into()),
        release_year: Some(2006),
        duration_minutes: Some(99),
        category_id: Some(drama().id),
        poster_url: None,
    }
}

pub fn movie_b() -> Movie {
    Movie {
        id: MovieId(2),
        title: "Casa de risas".into(),
        description: None,
        release_year: Some(2019),
        duration_minutes: Some(87),
        category_id: Some(comedy().id),
        poster_url: Some("https://cdn.example/posters/2.jpg".into()),
    }
}

pub fn series_a() -> Series {
    Series {
        id: SeriesId(10),
        title: "Noches de verano".into(),
        description: Some("Una temporada en la costa".into()),
        release_year: Some(2021),
        seasons: Some(1),
        category_id: Some(drama().id),
        poster_url: None,
    }
}

pub fn episode_a() -> Episode {
    Episode {
        id: EpisodeId(100),
        series_id: series_a().id,
        title: "Llegada".into(),
        season: 1,
        number: 1,
        duration_minutes: Some(45),
        description: None,
    }
}

pub fn episode_b() -> Episode {
    Episode {
        id: EpisodeId(101),
        series_id: series_a().id,
        title: "La tormenta".into(),
        season: 1,
        number: 2,
        duration_minutes: Some(47),
        description: Some("Todo cambia".into()),
    }
}

pub fn admin_user() -> User {
    User {
        id: UserId(1000),
        username: "alice".into(),
        email: "alice@example.com".into(),
        role: Role::Admin,
        created_at: Some(Timestamp::UNIX_EPOCH),
    }
}

pub fn editor_user() -> User {
    User {
        id: UserId(1001),
        username: "bob".into(),
        email: "bob@example.com".into(),
        role: Role::Editor,
        created_at: None,
    }
}

/// Fill every collection of `catalog` with the sample records.
pub fn seed(catalog: &Catalog) {
    catalog.insert(drama());
    catalog.insert(comedy());
    catalog.insert(movie_a());
    catalog.insert(movie_b());
    catalog.insert(series_a());
    catalog.insert(episode_a());
    catalog.insert(episode_b());
    catalog.insert(admin_user());
    catalog.insert(editor_user());
}
