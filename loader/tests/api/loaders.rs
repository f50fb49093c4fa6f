use loader::{
    Config, LoadState, categories_loader, episodes_loader, get_api_client,
    movies_loader, series_loader, users_loader,
};
use payloads::Series;
use std::rc::Rc;
use test_helpers::catalog::ListShape;
use test_helpers::{mock, spawn_app, spawn_seeded_app, unreachable_client};

#[tokio::test]
async fn loads_enveloped_collection() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;
    app.catalog.set_list_shape(ListShape::Envelope);

    let movies = movies_loader(app.shared_client());
    let snapshot = movies.activate().await;

    assert_eq!(snapshot.collection, vec![mock::movie_a(), mock::movie_b()]);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);

    Ok(())
}

#[tokio::test]
async fn loader_from_configured_client() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;

    let config = Config::from_backend_url(format!("{}/", app.address()))?;
    let client = Rc::new(get_api_client(&config)?);
    let snapshot = movies_loader(client).activate().await;

    assert_eq!(snapshot.collection, vec![mock::movie_a(), mock::movie_b()]);
    assert_eq!(snapshot.error, None);

    Ok(())
}

#[tokio::test]
async fn loads_bare_collection() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;

    let episodes = episodes_loader(app.shared_client());
    let snapshot = episodes.activate().await;

    assert_eq!(
        snapshot.collection,
        vec![mock::episode_a(), mock::episode_b()]
    );
    assert_eq!(snapshot.error, None);

    Ok(())
}

#[tokio::test]
async fn empty_collection_shows_guidance() -> anyhow::Result<()> {
    let app = spawn_app().await;

    for shape in [ListShape::Bare, ListShape::Envelope] {
        app.catalog.set_list_shape(shape);
        let snapshot = series_loader(app.shared_client()).activate().await;
        assert!(snapshot.collection.is_empty());
        assert!(!snapshot.loading);
        assert_eq!(
            snapshot.error.as_deref(),
            Some("No hay series disponibles en este momento.")
        );
    }

    Ok(())
}

#[tokio::test]
async fn server_failure_shows_connectivity_message() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;
    app.catalog.set_fail_lists(true);

    let categories = categories_loader(app.shared_client());
    let snapshot = categories.activate().await;

    assert!(snapshot.collection.is_empty());
    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Error al cargar las categorías. Verifica tu conexión.")
    );
    assert!(categories.with_state(|s| matches!(s, LoadState::Failed(_))));

    Ok(())
}

#[tokio::test]
async fn network_failure_shows_connectivity_message() {
    let users = users_loader(unreachable_client());
    let snapshot = users.activate().await;

    assert!(snapshot.collection.is_empty());
    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Error al cargar los usuarios. Verifica tu conexión.")
    );
}

#[tokio::test]
async fn reactivation_reflects_latest_catalog() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;
    let series = series_loader(app.shared_client());

    assert_eq!(series.activate().await.collection, vec![mock::series_a()]);

    app.catalog.clear::<Series>();
    let snapshot = series.activate().await;
    assert!(snapshot.collection.is_empty());
    assert!(snapshot.error.is_some());

    app.catalog.insert(mock::series_a());
    let snapshot = series.activate().await;
    assert_eq!(snapshot.collection, vec![mock::series_a()]);
    assert_eq!(snapshot.error, None);

    Ok(())
}
