use crate::{
    Category, CategoryId, Episode, EpisodeId, Listing, Movie, MovieId,
    Resource, Series, SeriesId, User, UserId, requests,
};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the catalog backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

impl APIClient {
    /// Build a client for the backend at `address`.
    ///
    /// Session cookies are carried on every request: natively through the
    /// client's cookie store, in the browser through
    /// `fetch_credentials_include`.
    pub fn new(address: impl Into<String>) -> Result<Self, ClientError> {
        #[cfg(not(target_arch = "wasm32"))]
        let inner_client = reqwest::Client::builder()
            .cookie_store(true)
            .build()?;

        #[cfg(target_arch = "wasm32")]
        let inner_client = reqwest::Client::new();

        Ok(Self {
            address: address.into(),
            inner_client,
        })
    }
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/v1/{path}", &self.address)
    }

    fn with_credentials(
        &self,
        request: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.with_credentials(request).send().await
    }

    async fn get_with_query(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);
        self.with_credentials(request).send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.put(self.format_url(path)).json(body);
        self.with_credentials(request).send().await
    }

    async fn patch(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.patch(self.format_url(path)).json(body);
        self.with_credentials(request).send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));
        self.with_credentials(request).send().await
    }
}

/// Generic operations shared by every catalog resource.
impl APIClient {
    /// Fetch a collection without resolving its shape.
    pub async fn fetch_listing<T: DeserializeOwned>(
        &self,
        resource: Resource,
    ) -> Result<Listing<T>, ClientError> {
        let response = self.empty_get(resource.path()).await?;
        ok_body(response).await
    }

    /// Search a collection by title without resolving its shape.
    pub async fn search_listing<T: DeserializeOwned>(
        &self,
        resource: Resource,
        title: &str,
    ) -> Result<Listing<T>, ClientError> {
        let query = requests::TitleSearch {
            title: title.to_string(),
        };
        let response = self
            .get_with_query(&format!("{}/search", resource.path()), &query)
            .await?;
        ok_body(response).await
    }

    async fn get_record<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: impl std::fmt::Display,
    ) -> Result<T, ClientError> {
        let response =
            self.empty_get(&format!("{}/{id}", resource.path())).await?;
        ok_body(response).await
    }

    async fn put_record<T: Serialize + DeserializeOwned>(
        &self,
        resource: Resource,
        id: impl std::fmt::Display,
        record: &T,
    ) -> Result<T, ClientError> {
        let response =
            self.put(&format!("{}/{id}", resource.path()), record).await?;
        ok_body(response).await
    }

    async fn delete_record(
        &self,
        resource: Resource,
        id: impl std::fmt::Display,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("{}/{id}", resource.path())).await?;
        ok_empty(response).await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, ClientError> {
        Ok(self.fetch_listing(Resource::Movies).await?.into_collection())
    }

    pub async fn get_movie(
        &self,
        movie_id: &MovieId,
    ) -> Result<Movie, ClientError> {
        self.get_record(Resource::Movies, movie_id).await
    }

    pub async fn search_movies(
        &self,
        title: &str,
    ) -> Result<Vec<Movie>, ClientError> {
        let listing = self.search_listing(Resource::Movies, title).await?;
        Ok(listing.into_collection())
    }

    /// Replace a movie, returning the stored version.
    pub async fn update_movie(
        &self,
        movie: &Movie,
    ) -> Result<Movie, ClientError> {
        self.put_record(Resource::Movies, movie.id, movie).await
    }

    pub async fn delete_movie(
        &self,
        movie_id: &MovieId,
    ) -> Result<(), ClientError> {
        self.delete_record(Resource::Movies, movie_id).await
    }

    pub async fn list_series(&self) -> Result<Vec<Series>, ClientError> {
        Ok(self.fetch_listing(Resource::Series).await?.into_collection())
    }

    pub async fn get_series(
        &self,
        series_id: &SeriesId,
    ) -> Result<Series, ClientError> {
        self.get_record(Resource::Series, series_id).await
    }

    pub async fn search_series(
        &self,
        title: &str,
    ) -> Result<Vec<Series>, ClientError> {
        let listing = self.search_listing(Resource::Series, title).await?;
        Ok(listing.into_collection())
    }

    /// Replace a series, returning the stored version.
    pub async fn update_series(
        &self,
        series: &Series,
    ) -> Result<Series, ClientError> {
        self.put_record(Resource::Series, series.id, series).await
    }

    pub async fn delete_series(
        &self,
        series_id: &SeriesId,
    ) -> Result<(), ClientError> {
        self.delete_record(Resource::Series, series_id).await
    }

    pub async fn list_episodes(&self) -> Result<Vec<Episode>, ClientError> {
        Ok(self
            .fetch_listing(Resource::Episodes)
            .await?
            .into_collection())
    }

    pub async fn get_episode(
        &self,
        episode_id: &EpisodeId,
    ) -> Result<Episode, ClientError> {
        self.get_record(Resource::Episodes, episode_id).await
    }

    pub async fn search_episodes(
        &self,
        title: &str,
    ) -> Result<Vec<Episode>, ClientError> {
        let listing = self.search_listing(Resource::Episodes, title).await?;
        Ok(listing.into_collection())
    }

    /// Replace an episode, returning the stored version.
    pub async fn update_episode(
        &self,
        episode: &Episode,
    ) -> Result<Episode, ClientError> {
        self.put_record(Resource::Episodes, episode.id, episode)
            .await
    }

    pub async fn delete_episode(
        &self,
        episode_id: &EpisodeId,
    ) -> Result<(), ClientError> {
        self.delete_record(Resource::Episodes, episode_id).await
    }

    pub async fn list_categories(
        &self,
    ) -> Result<Vec<Category>, ClientError> {
        Ok(self
            .fetch_listing(Resource::Categories)
            .await?
            .into_collection())
    }

    pub async fn get_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Category, ClientError> {
        self.get_record(Resource::Categories, category_id).await
    }

    pub async fn update_category(
        &self,
        category: &Category,
    ) -> Result<Category, ClientError> {
        self.put_record(Resource::Categories, category.id, category)
            .await
    }

    pub async fn delete_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<(), ClientError> {
        self.delete_record(Resource::Categories, category_id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        Ok(self.fetch_listing(Resource::Users).await?.into_collection())
    }

    pub async fn get_user(&self, user_id: &UserId) -> Result<User, ClientError> {
        self.get_record(Resource::Users, user_id).await
    }

    /// Replace a user account, returning the stored version.
    pub async fn update_user(&self, user: &User) -> Result<User, ClientError> {
        self.put_record(Resource::Users, user.id, user).await
    }

    /// Change only the fields set in `details`.
    pub async fn patch_user(
        &self,
        user_id: &UserId,
        details: &requests::UpdateUser,
    ) -> Result<User, ClientError> {
        let response = self
            .patch(&format!("{}/{user_id}", Resource::Users.path()), details)
            .await?;
        ok_body(response).await
    }

    pub async fn delete_user(
        &self,
        user_id: &UserId,
    ) -> Result<(), ClientError> {
        self.delete_record(Resource::Users, user_id).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response from the server.")]
    Decode(#[from] serde_json::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice::<T>(&bytes)?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let url = response.url().clone();
    match response.text().await {
        Ok(text) => {
            tracing::warn!("{status} from {url}: {text}");
            ClientError::APIError(status, text)
        }
        Err(e) => ClientError::Network(e),
    }
}
