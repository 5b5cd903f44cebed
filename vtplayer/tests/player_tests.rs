//! End-to-end tests through the player facade

use std::sync::Arc;

use vtplayer::testing::{EngineScript, ScriptedEngineModule, ScriptedVideoElement};
use vtplayer::*;

async fn wait_until<F: Fn() -> bool>(condition: F) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

async fn build_player(
    module: Arc<ScriptedEngineModule>,
) -> (Arc<ScriptedVideoElement>, Player) {
    let video = Arc::new(ScriptedVideoElement::new(200.0));
    let player = Player::builder()
        .video(video.clone())
        .engine(module)
        .source("https://cdn.example/v1.mpd")
        .viewport_width(1000.0)
        .build()
        .await
        .unwrap();
    (video, player)
}

#[tokio::test]
async fn test_builder_requires_source() {
    let result = Player::builder()
        .video(Arc::new(ScriptedVideoElement::new(10.0)))
        .engine(Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka)))
        .build()
        .await;

    match result {
        Err(PlayerError::InvalidConfiguration { message }) => {
            assert!(message.contains("source"))
        }
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}

#[tokio::test]
async fn test_builder_rejects_negative_start_time() {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let result = Player::builder()
        .video(Arc::new(ScriptedVideoElement::new(10.0)))
        .engine(module.clone())
        .source("a.mpd")
        .start_time(-3.0)
        .build()
        .await;

    assert!(matches!(
        result,
        Err(PlayerError::InvalidConfiguration { .. })
    ));
    assert!(module.engines().is_empty());
}

#[tokio::test]
async fn test_builder_surfaces_unsupported_environment() {
    let result = Player::builder()
        .video(Arc::new(ScriptedVideoElement::new(10.0)))
        .engine(Arc::new(ScriptedEngineModule::unsupported(EngineFlavor::DashJs)))
        .source("a.mpd")
        .build()
        .await;

    let error = result.unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Environment);
    assert!(!error.is_recoverable());
}

#[tokio::test]
async fn test_build_loads_source() {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let (_video, player) = build_player(module.clone()).await;

    assert!(player.is_active());
    assert_eq!(player.engine(), EngineFlavor::Shaka);
    assert_eq!(
        module.last_engine().unwrap().load_calls(),
        vec!["https://cdn.example/v1.mpd"]
    );
    assert_eq!(
        player.adapter().unwrap().loaded_source().as_deref(),
        Some("https://cdn.example/v1.mpd")
    );
}

#[tokio::test]
async fn test_configured_start_time_is_used() {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let mut config = PlayerConfig::default();
    config.adapter.default_start_time = 30.0;

    let mut player = Player::builder()
        .video(Arc::new(ScriptedVideoElement::new(120.0)))
        .engine(module)
        .source("a.mpd")
        .config(config)
        .build()
        .await
        .unwrap();

    assert_eq!(player.config().adapter.default_start_time, 30.0);
    player.shutdown().await;
}

#[tokio::test]
async fn test_click_seek_through_player() {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let (video, mut player) = build_player(module).await;

    let outcome = player.on_click(510.0).unwrap();
    let GestureOutcome::Committed { time: Some(time), .. } = outcome else {
        panic!("Expected a committed seek, got {:?}", outcome);
    };
    assert!((time - 200.0 * 500.0 / 972.5).abs() < 1e-6);
    assert_eq!(video.seeks(), vec![time]);

    player.update_progress().unwrap();
    assert!((player.progress_percentage() - time / 2.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_drag_and_cancel_through_player() {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::DashJs));
    let (video, mut player) = build_player(module).await;

    player.on_mouse_down(400.0).unwrap();
    assert!(player.seek_state().seeking);
    assert_eq!(
        player.on_mouse_move(400.0, -5.0).unwrap(),
        GestureOutcome::Cancelled
    );
    assert_eq!(player.on_mouse_up().unwrap(), GestureOutcome::Ignored);
    assert!(video.seeks().is_empty());
    assert_eq!(player.progress_percentage(), 0.0);
}

#[tokio::test]
async fn test_set_source_reloads() {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let (_video, player) = build_player(module.clone()).await;
    let engine = module.last_engine().unwrap();

    assert!(player.set_source("https://cdn.example/v2.mpd"));
    assert!(!player.set_source("https://cdn.example/v2.mpd"));

    wait_until(|| engine.loaded_source().as_deref() == Some("https://cdn.example/v2.mpd")).await;
    assert_eq!(player.source(), "https://cdn.example/v2.mpd");
}

#[tokio::test]
async fn test_switch_engine_destroys_previous() {
    let shaka = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let dash = Arc::new(ScriptedEngineModule::new(EngineFlavor::DashJs));
    let (_video, mut player) = build_player(shaka.clone()).await;

    player.switch_engine(dash.clone()).await.unwrap();

    assert_eq!(shaka.last_engine().unwrap().destroy_count(), 1);
    assert_eq!(dash.last_engine().unwrap().attach_count(), 1);
    assert_eq!(player.engine(), EngineFlavor::DashJs);
    assert_eq!(player.adapter().unwrap().adapter_type(), AdapterType::DashJs);
}

#[tokio::test]
async fn test_tracks_through_player() {
    let script = EngineScript {
        variant_tracks: vec![VariantTrack {
            id: 1,
            height: Some(1080),
            bandwidth: 4_500_000,
            language: Some("en".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka).with_script(script));
    let (_video, player) = build_player(module).await;

    assert_eq!(player.video_qualities().unwrap()[0].label, "1080p - 4.5 Mbps");
    assert_eq!(player.audio_tracks().unwrap()[0].label, "en");
}

#[tokio::test]
async fn test_snapshot_through_player() {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let (_video, player) = build_player(module).await;

    player.play().unwrap();
    let snapshot = player.snapshot().unwrap();
    assert_eq!(snapshot.adapter_type, AdapterType::Shaka);
    assert_eq!(snapshot.duration, Some(200.0));
}

#[tokio::test]
async fn test_shutdown_is_idempotent() {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let (_video, mut player) = build_player(module.clone()).await;

    player.shutdown().await;
    player.shutdown().await;

    assert!(!player.is_active());
    assert_eq!(module.last_engine().unwrap().destroy_count(), 1);
    assert!(matches!(
        player.on_click(100.0),
        Err(PlayerError::NoActiveAdapter)
    ));
    assert!(matches!(player.play(), Err(PlayerError::NoActiveAdapter)));
}
