use payloads::{MovieId, Resource, Role, UserId, requests};
use reqwest::StatusCode;
use test_helpers::catalog::ListShape;
use test_helpers::{
    assert_status_code, mock, spawn_seeded_app, unreachable_client,
};

#[tokio::test]
async fn list_endpoints_accept_bare_and_enveloped_shapes() -> anyhow::Result<()>
{
    let app = spawn_seeded_app().await;

    let bare = app.client.list_movies().await?;
    assert_eq!(bare, vec![mock::movie_a(), mock::movie_b()]);

    app.catalog.set_list_shape(ListShape::Envelope);
    let enveloped = app.client.list_movies().await?;
    assert_eq!(enveloped, bare);

    let listing = app
        .client
        .fetch_listing::<payloads::Movie>(Resource::Movies)
        .await?;
    assert!(matches!(listing, payloads::Listing::Envelope(_)));

    assert_eq!(app.client.list_series().await?, vec![mock::series_a()]);
    assert_eq!(app.client.list_episodes().await?.len(), 2);
    assert_eq!(app.client.list_categories().await?.len(), 2);
    assert_eq!(app.client.list_users().await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn read_update_delete_movie() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;
    let movie_id = mock::movie_a().id;

    let movie = app.client.get_movie(&movie_id).await?;
    assert_eq!(movie, mock::movie_a());

    let mut updated = movie.clone();
    updated.title = "La casa del lago (remasterizada)".into();
    updated.duration_minutes = Some(101);
    let stored = app.client.update_movie(&updated).await?;
    assert_eq!(stored, updated);
    assert_eq!(app.client.get_movie(&movie_id).await?, updated);

    app.client.delete_movie(&movie_id).await?;
    assert_status_code(
        app.client.get_movie(&movie_id).await,
        StatusCode::NOT_FOUND,
    );
    assert_eq!(app.client.list_movies().await?, vec![mock::movie_b()]);

    Ok(())
}

#[tokio::test]
async fn missing_records_are_not_found() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;

    assert_status_code(
        app.client.get_movie(&MovieId(404)).await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client.delete_series(&payloads::SeriesId(404)).await,
        StatusCode::NOT_FOUND,
    );
    let error = app.client.get_user(&UserId(404)).await.unwrap_err();
    assert!(error.to_string().contains("no users with id 404"));

    Ok(())
}

#[tokio::test]
async fn search_matches_titles_case_insensitively() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;

    let movies = app.client.search_movies("casa").await?;
    assert_eq!(movies.len(), 2);

    let movies = app.client.search_movies("LAGO").await?;
    assert_eq!(movies, vec![mock::movie_a()]);

    app.catalog.set_list_shape(ListShape::Envelope);
    let episodes = app.client.search_episodes("la tormenta").await?;
    assert_eq!(episodes, vec![mock::episode_b()]);

    // Spaces survive query encoding.
    let series = app.client.search_series("noches de verano").await?;
    assert_eq!(series, vec![mock::series_a()]);
    assert!(app.client.search_series("inexistente").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn update_episode_and_category() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;

    let mut episode = mock::episode_a();
    episode.title = "La llegada".into();
    app.client.update_episode(&episode).await?;
    assert_eq!(app.client.get_episode(&episode.id).await?, episode);

    let mut category = mock::comedy();
    category.description = Some("Para reír".into());
    app.client.update_category(&category).await?;
    assert_eq!(app.client.get_category(&category.id).await?, category);

    app.client.delete_category(&category.id).await?;
    assert_eq!(app.client.list_categories().await?, vec![mock::drama()]);

    Ok(())
}

#[tokio::test]
async fn patch_user_changes_only_given_fields() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;
    let user_id = mock::editor_user().id;

    let details = requests::UpdateUser {
        role: Some(Role::Viewer),
        ..Default::default()
    };
    let user = app.client.patch_user(&user_id, &details).await?;
    assert_eq!(user.role, Role::Viewer);
    assert_eq!(user.username, mock::editor_user().username);
    assert_eq!(user.email, mock::editor_user().email);

    let mut replaced = user.clone();
    replaced.email = "roberto@example.com".into();
    app.client.update_user(&replaced).await?;
    assert_eq!(app.client.get_user(&user_id).await?, replaced);

    app.client.delete_user(&user_id).await?;
    assert_eq!(app.client.list_users().await?, vec![mock::admin_user()]);

    Ok(())
}

#[tokio::test]
async fn server_errors_carry_status_and_body() -> anyhow::Result<()> {
    let app = spawn_seeded_app().await;
    app.catalog.set_fail_lists(true);

    let result = app.client.list_movies().await;
    match result {
        Err(payloads::ClientError::APIError(status, body)) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "Something went wrong");
        }
        other => panic!("Expected APIError, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let client = unreachable_client();
    let result = client.list_series().await;
    assert!(matches!(result, Err(payloads::ClientError::Network(_))));
}
