
use client::SharedRequestState;
use test_helpers::mock::HandleEvent;
use test_helpers::{Fields, RecordingHandle, fields_client, spawn_app, unreachable_address};

#[tokio::test]
async fn handle_sees_one_start_and_one_finish() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let handle = RecordingHandle::default();

    let result = app.client.get("/okay", Some(&handle)).await;

    assert_eq!(
        handle.events(),
        vec![HandleEvent::Start, HandleEvent::Finish(result)]
    );

    Ok(())
}

#[tokio::test]
async fn handle_is_finished_on_failure() -> anyhow::Result<()> {
    let client = fields_client(&unreachable_address());
    let handle = RecordingHandle::default();

    let result = client.get("/okay", Some(&handle)).await;

    assert!(!result.has_succeeded());
    assert_eq!(
        handle.events(),
        vec![HandleEvent::Start, HandleEvent::Finish(result)]
    );

    Ok(())
}

#[tokio::test]
async fn shared_state_tracks_loading() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let state = SharedRequestState::<Fields>::new(true);

    let call = app.client.get("/slow/200", Some(&state));
    tokio::pin!(call);
    assert!(futures::poll!(&mut call).is_pending());
    assert!(state.loading());
    assert!(state.result().is_none());

    let result = call.await;

    assert!(!state.loading());
    assert_eq!(state.result().as_deref(), Some(&result));

    Ok(())
}

#[tokio::test]
async fn refresh_keeps_previous_result_when_asked() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let state = SharedRequestState::<Fields>::new(false);

    app.client.get("/okay", Some(&state)).await;

    let call = app.client.get("/slow/200", Some(&state));
    tokio::pin!(call);
    assert!(futures::poll!(&mut call).is_pending());
    assert!(state.loading());
    assert_eq!(
        state.result().and_then(|r| r.extension().date.clone()),
        Some("2024-01-01".to_string())
    );
    call.await;

    assert_eq!(
        state.result().and_then(|r| r.extension().date.clone()),
        Some("slow-200".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn refresh_clears_previous_result_by_default() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let state = SharedRequestState::<Fields>::new(true);

    app.client.get("/okay", Some(&state)).await;

    let call = app.client.get("/slow/200", Some(&state));
    tokio::pin!(call);
    assert!(futures::poll!(&mut call).is_pending());
    assert!(state.result().is_none());
    call.await;

    Ok(())
}

#[tokio::test]
async fn reset_returns_handle_to_idle() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let state = SharedRequestState::<Fields>::new(true);

    app.client.get("/okay", Some(&state)).await;
    state.reset();

    assert!(!state.loading());
    assert!(state.result().is_none());

    Ok(())
}
