mod call;
mod handle;

use test_helpers::spawn_app;

#[tokio::test]
async fn fixture_server_answers() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get("/okay", None).await;
    assert!(result.has_succeeded());
    assert_eq!(app.hits("/okay"), 1);

    Ok(())
}
