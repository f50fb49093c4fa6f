//! Data layer of the catalog admin frontend.
//!
//! [`ResourceLoader`] fetches a collection from the catalog API and exposes
//! it together with a loading flag and a displayable error message, without
//! depending on any rendering framework.

pub mod config;
pub mod logs;
pub mod messages;
pub mod resource_loader;
pub mod resources;

pub use config::{Config, ConfigError};
pub use messages::Messages;
pub use resource_loader::{
    LoadError, LoadState, ResourceLoader, ResourceSnapshot,
};
pub use resources::{
    categories_loader, episodes_loader, listing_loader, movies_loader,
    series_loader, users_loader,
};

use payloads::{APIClient, ClientError};

/// Build an API client for the configured backend.
pub fn get_api_client(config: &Config) -> Result<APIClient, ClientError> {
    APIClient::new(config.backend_url.clone())
}
