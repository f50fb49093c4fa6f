//! Loaders for each catalog collection.

use payloads::{
    APIClient, Category, Episode, Movie, Resource, Series, User,
};
use serde::de::DeserializeOwned;
use std::rc::Rc;

use crate::resource_loader::ResourceLoader;

/// Loader backed by the list endpoint of `resource`.
pub fn listing_loader<T>(
    client: Rc<APIClient>,
    resource: Resource,
) -> ResourceLoader<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    ResourceLoader::new(resource, move || {
        let client = client.clone();
        async move { client.fetch_listing::<T>(resource).await }
    })
}

pub fn movies_loader(client: Rc<APIClient>) -> ResourceLoader<Movie> {
    listing_loader(client, Resource::Movies)
}

pub fn series_loader(client: Rc<APIClient>) -> ResourceLoader<Series> {
    listing_loader(client, Resource::Series)
}

pub fn episodes_loader(client: Rc<APIClient>) -> ResourceLoader<Episode> {
    listing_loader(client, Resource::Episodes)
}

pub fn categories_loader(client: Rc<APIClient>) -> ResourceLoader<Category> {
    listing_loader(client, Resource::Categories)
}

pub fn users_loader(client: Rc<APIClient>) -> ResourceLoader<User> {
    listing_loader(client, Resource::Users)
}
