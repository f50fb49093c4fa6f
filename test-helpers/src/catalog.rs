//! In-memory stand-in for the catalog REST API.
//!
//! Serves the same routes as the real backend under `/api/v1`, backed by
//! vectors behind a mutex. Tests can reshape list responses (bare arrays or
//! `{"data": [...]}` envelopes) and make list endpoints fail.

use actix_web::dev::{HttpServiceFactory, Server};
use actix_web::{
    App, HttpResponse, HttpServer, Responder, ResponseError, Scope,
    body::BoxBody, get, web,
};
use payloads::{
    Category, Envelope, Episode, Movie, Resource, Series, User, requests,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// How list and search endpoints wrap their records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListShape {
    #[default]
    Bare,
    Envelope,
}

#[derive(Debug, Default)]
pub struct CatalogData {
    pub movies: Vec<Movie>,
    pub series: Vec<Series>,
    pub episodes: Vec<Episode>,
    pub categories: Vec<Category>,
    pub users: Vec<User>,
    pub list_shape: ListShape,
    /// When set, list and search endpoints answer 500.
    pub fail_lists: bool,
}

/// Shared handle to the stub's data; clones see the same records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    inner: Arc<Mutex<CatalogData>>,
}

impl Catalog {
    pub fn lock(&self) -> MutexGuard<'_, CatalogData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_list_shape(&self, shape: ListShape) {
        self.lock().list_shape = shape;
    }

    pub fn set_fail_lists(&self, fail: bool) {
        self.lock().fail_lists = fail;
    }

    pub fn insert<R: StubRecord>(&self, record: R) {
        R::collection(&mut self.lock()).push(record);
    }

    pub fn records<R: StubRecord>(&self) -> Vec<R> {
        R::collection(&mut self.lock()).clone()
    }

    pub fn clear<R: StubRecord>(&self) {
        R::collection(&mut self.lock()).clear();
    }
}

/// A record type the stub can store and serve.
pub trait StubRecord:
    Clone + Serialize + DeserializeOwned + Send + 'static
{
    const RESOURCE: Resource;

    fn id(&self) -> i64;

    /// Text matched by the search endpoint.
    fn title(&self) -> &str;

    fn collection(data: &mut CatalogData) -> &mut Vec<Self>;
}

impl StubRecord for Movie {
    const RESOURCE: Resource = Resource::Movies;

    fn id(&self) -> i64 {
        self.id.0
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn collection(data: &mut CatalogData) -> &mut Vec<Self> {
        &mut data.movies
    }
}

impl StubRecord for Series {
    const RESOURCE: Resource = Resource::Series;

    fn id(&self) -> i64 {
        self.id.0
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn collection(data: &mut CatalogData) -> &mut Vec<Self> {
        &mut data.series
    }
}

impl StubRecord for Episode {
    const RESOURCE: Resource = Resource::Episodes;

    fn id(&self) -> i64 {
        self.id.0
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn collection(data: &mut CatalogData) -> &mut Vec<Self> {
        &mut data.episodes
    }
}

impl StubRecord for Category {
    const RESOURCE: Resource = Resource::Categories;

    fn id(&self) -> i64 {
        self.id.0
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn collection(data: &mut CatalogData) -> &mut Vec<Self> {
        &mut data.categories
    }
}

impl StubRecord for User {
    const RESOURCE: Resource = Resource::Users;

    fn id(&self) -> i64 {
        self.id.0
    }

    fn title(&self) -> &str {
        &self.username
    }

    fn collection(data: &mut CatalogData) -> &mut Vec<Self> {
        &mut data.users
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StubError {
    #[error("Bad request")]
    BadRequest(String),
    #[error("Not found")]
    NotFound(String),
    #[error("Something went wrong")]
    Unavailable,
}

impl ResponseError for StubError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::Unavailable => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

pub struct Config {
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
}

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, catalog: Catalog) -> std::io::Result<Server> {
    let catalog = web::Data::new(catalog);

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        App::new()
            .service(api_services())
            .app_data(catalog.clone())
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok(server)
}

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api/v1")
        .service(health_check)
        .service(resource_scope::<Movie>())
        .service(resource_scope::<Series>())
        .service(resource_scope::<Episode>())
        .service(resource_scope::<Category>())
        .service(
            resource_scope::<User>()
                .route("/{id}", web::patch().to(patch_user)),
        )
}

fn resource_scope<R: StubRecord>() -> Scope {
    web::scope(&format!("/{}", R::RESOURCE.path()))
        .route("", web::get().to(list_records::<R>))
        .route("/search", web::get().to(search_records::<R>))
        .route("/{id}", web::get().to(get_record::<R>))
        .route("/{id}", web::put().to(put_record::<R>))
        .route("/{id}", web::delete().to(delete_record::<R>))
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

fn listing_response<R: Serialize>(
    shape: ListShape,
    records: Vec<R>,
) -> HttpResponse {
    match shape {
        ListShape::Bare => HttpResponse::Ok().json(records),
        ListShape::Envelope => {
            HttpResponse::Ok().json(Envelope { data: records })
        }
    }
}

fn not_found<R: StubRecord>(id: i64) -> StubError {
    StubError::NotFound(format!("no {} with id {id}", R::RESOURCE))
}

#[tracing::instrument(skip(catalog), fields(resource = %R::RESOURCE))]
async fn list_records<R: StubRecord>(
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, StubError> {
    let mut data = catalog.lock();
    if data.fail_lists {
        return Err(StubError::Unavailable);
    }
    let shape = data.list_shape;
    let records = R::collection(&mut data).clone();
    Ok(listing_response(shape, records))
}

#[tracing::instrument(skip(catalog), fields(resource = %R::RESOURCE))]
async fn search_records<R: StubRecord>(
    catalog: web::Data<Catalog>,
    query: web::Query<requests::TitleSearch>,
) -> Result<HttpResponse, StubError> {
    let mut data = catalog.lock();
    if data.fail_lists {
        return Err(StubError::Unavailable);
    }
    let shape = data.list_shape;
    let needle = query.title.to_lowercase();
    let records: Vec<R> = R::collection(&mut data)
        .iter()
        .filter(|record| record.title().to_lowercase().contains(&needle))
        .cloned()
        .collect();
    Ok(listing_response(shape, records))
}

#[tracing::instrument(skip(catalog), fields(resource = %R::RESOURCE))]
async fn get_record<R: StubRecord>(
    catalog: web::Data<Catalog>,
    id: web::Path<i64>,
) -> Result<HttpResponse, StubError> {
    let id = id.into_inner();
    let mut data = catalog.lock();
    let record = R::collection(&mut data)
        .iter()
        .find(|record| record.id() == id)
        .cloned()
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(skip(catalog, details), fields(resource = %R::RESOURCE))]
async fn put_record<R: StubRecord>(
    catalog: web::Data<Catalog>,
    id: web::Path<i64>,
    details: web::Json<R>,
) -> Result<HttpResponse, StubError> {
    let id = id.into_inner();
    let details = details.into_inner();
    if details.id() != id {
        return Err(StubError::BadRequest(format!(
            "body id {} does not match path id {id}",
            details.id()
        )));
    }
    let mut data = catalog.lock();
    let record = R::collection(&mut data)
        .iter_mut()
        .find(|record| record.id() == id)
        .ok_or_else(|| not_found::<R>(id))?;
    *record = details.clone();
    Ok(HttpResponse::Ok().json(details))
}

#[tracing::instrument(skip(catalog), fields(resource = %R::RESOURCE))]
async fn delete_record<R: StubRecord>(
    catalog: web::Data<Catalog>,
    id: web::Path<i64>,
) -> Result<HttpResponse, StubError> {
    let id = id.into_inner();
    let mut data = catalog.lock();
    let records = R::collection(&mut data);
    let before = records.len();
    records.retain(|record| record.id() != id);
    if records.len() == before {
        return Err(not_found::<R>(id));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[tracing::instrument(skip(catalog))]
async fn patch_user(
    catalog: web::Data<Catalog>,
    id: web::Path<i64>,
    details: web::Json<requests::UpdateUser>,
) -> Result<HttpResponse, StubError> {
    let id = id.into_inner();
    let details = details.into_inner();
    let mut data = catalog.lock();
    let user = data
        .users
        .iter_mut()
        .find(|user| user.id.0 == id)
        .ok_or_else(|| not_found::<User>(id))?;
    if let Some(username) = details.username {
        user.username = username;
    }
    if let Some(email) = details.email {
        user.email = email;
    }
    if let Some(role) = details.role {
        user.role = role;
    }
    Ok(HttpResponse::Ok().json(user.clone()))
}
