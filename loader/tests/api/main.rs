mod client;
mod loaders;

use test_helpers::{spawn_app, spawn_seeded_app};

#[tokio::test]
async fn stub_answers_health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.client.health_check().await?;

    // A client built separately reaches the same server.
    let seeded = spawn_seeded_app().await;
    let shared = seeded.shared_client();
    shared.health_check().await?;
    assert_eq!(shared.list_movies().await?.len(), 2);
    assert!(app.client.list_movies().await?.is_empty());

    Ok(())
}
