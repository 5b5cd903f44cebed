//! Seek-bar gesture tests driven through a real adapter

use std::sync::Arc;

use tokio::sync::watch;
use vtplayer_media::testing::{ScriptedEngineModule, ScriptedVideoElement};
use vtplayer_media::*;

const EPSILON: f64 = 1e-9;

async fn setup(duration: f64) -> (Arc<ScriptedVideoElement>, EngineAdapter, SeekBarController) {
    let module = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka));
    let (_tx, rx) = watch::channel("a.mpd".to_string());
    let video = Arc::new(ScriptedVideoElement::new(duration));
    let adapter = EngineAdapter::create(module, AdapterOptions::new(rx, None, video.clone()))
        .await
        .unwrap();

    let controller = SeekBarController::new(SeekBarConfig {
        viewport_width: 1000.0,
        ..Default::default()
    });
    (video, adapter, controller)
}

fn committed(outcome: GestureOutcome) -> (f64, Option<f64>) {
    match outcome {
        GestureOutcome::Committed { percentage, time } => (percentage, time),
        other => panic!("Expected Committed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_click_seeks_to_pointer_position() {
    let (video, adapter, mut seekbar) = setup(200.0).await;

    let (percentage, time) = committed(seekbar.on_click(&adapter, 510.0));

    let expected = 500.0 / 972.5 * 100.0;
    assert!((percentage - expected).abs() < EPSILON);
    let time = time.unwrap();
    assert!((time - 200.0 * expected / 100.0).abs() < 1e-6);
    assert_eq!(video.seeks(), vec![time]);
    assert!((seekbar.progress_percentage() - expected).abs() < EPSILON);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_press_and_release_commit_same_position() {
    let (video, adapter, mut seekbar) = setup(200.0).await;

    let pressed = match seekbar.on_mouse_down(&adapter, 300.0) {
        GestureOutcome::Preview { percentage } => percentage,
        other => panic!("Expected Preview, got {:?}", other),
    };
    assert!(seekbar.state().seeking);
    assert_eq!(seekbar.gesture(), GestureState::Seeking);
    assert!(video.seeks().is_empty());

    let (percentage, _) = committed(seekbar.on_mouse_up(&adapter));
    assert_eq!(percentage, pressed);
    assert!(!seekbar.state().seeking);
    assert_eq!(seekbar.gesture(), GestureState::Idle);
    assert_eq!(video.seeks().len(), 1);

    // The click that follows the release does not seek twice
    assert_eq!(seekbar.on_click(&adapter, 300.0), GestureOutcome::Ignored);
    assert_eq!(video.seeks().len(), 1);

    // A later plain click works again
    committed(seekbar.on_click(&adapter, 700.0));
    assert_eq!(video.seeks().len(), 2);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_drag_previews_then_commits_last_position() {
    let (video, adapter, mut seekbar) = setup(200.0).await;

    seekbar.on_mouse_down(&adapter, 100.0);
    let outcome = seekbar.on_mouse_move(&adapter, 600.0, 20.0);
    let dragged = seekbar.state().seek_percentage;

    assert_eq!(outcome, GestureOutcome::Preview { percentage: dragged });
    assert_eq!(seekbar.progress_percentage(), dragged);
    assert!(video.seeks().is_empty());

    let (percentage, _) = committed(seekbar.on_mouse_up(&adapter));
    assert_eq!(percentage, dragged);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_hover_never_moves_seek_position() {
    let (video, adapter, mut seekbar) = setup(200.0).await;

    seekbar.on_mouse_enter();
    assert_eq!(seekbar.gesture(), GestureState::Hovering);

    let outcome = seekbar.on_mouse_move(&adapter, 510.0, 20.0);
    assert!(matches!(outcome, GestureOutcome::Hover { .. }));

    let state = seekbar.state();
    assert_eq!(state.seek_percentage, 0.0);
    assert!((state.hover_percentage - 500.0 / 972.5 * 100.0).abs() < EPSILON);
    assert_eq!(state.hover_time, "1:42");
    assert!(video.seeks().is_empty());

    // Release without a press does nothing
    assert_eq!(seekbar.on_mouse_up(&adapter), GestureOutcome::Ignored);

    seekbar.on_mouse_leave();
    assert_eq!(seekbar.gesture(), GestureState::Idle);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_leaving_player_cancels_drag() {
    let (video, adapter, mut seekbar) = setup(200.0).await;

    seekbar.update_progress(50.0, 200.0);
    assert_eq!(seekbar.progress_percentage(), 25.0);

    seekbar.on_mouse_down(&adapter, 800.0);
    assert!(seekbar.progress_percentage() > 25.0);

    assert_eq!(
        seekbar.on_mouse_move(&adapter, 1200.0, 20.0),
        GestureOutcome::Cancelled
    );
    assert_eq!(seekbar.progress_percentage(), 25.0);
    assert!(!seekbar.state().seeking);

    assert_eq!(seekbar.on_mouse_up(&adapter), GestureOutcome::Ignored);
    assert!(video.seeks().is_empty());

    adapter.destroy().await;
}

#[tokio::test]
async fn test_click_after_cancelled_drag_is_ignored() {
    let (video, adapter, mut seekbar) = setup(200.0).await;

    seekbar.on_mouse_down(&adapter, 500.0);
    assert_eq!(
        seekbar.on_mouse_move(&adapter, 500.0, -5.0),
        GestureOutcome::Cancelled
    );
    assert_eq!(seekbar.gesture(), GestureState::Idle);

    // Pointer comes back and is released over the bar
    assert_eq!(seekbar.on_mouse_up(&adapter), GestureOutcome::Ignored);
    assert_eq!(seekbar.on_click(&adapter, 500.0), GestureOutcome::Ignored);
    assert!(video.seeks().is_empty());
    assert_eq!(seekbar.progress_percentage(), 0.0);

    // The next full press/release starts clean
    seekbar.on_mouse_down(&adapter, 500.0);
    committed(seekbar.on_mouse_up(&adapter));
    assert_eq!(video.seeks().len(), 1);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_out_of_bounds_drag_clamps_when_cancel_disabled() {
    let (video, adapter, _) = setup(200.0).await;
    let mut seekbar = SeekBarController::new(SeekBarConfig {
        viewport_width: 1000.0,
        cancel_on_out_of_bounds: false,
        ..Default::default()
    });

    seekbar.on_mouse_down(&adapter, 500.0);
    assert_eq!(
        seekbar.on_mouse_move(&adapter, 1200.0, 20.0),
        GestureOutcome::Preview { percentage: 100.0 }
    );
    assert_eq!(committed(seekbar.on_mouse_up(&adapter)), (100.0, Some(200.0)));
    assert_eq!(video.seeks(), vec![200.0]);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_progress_is_frozen_while_seeking() {
    let (_video, adapter, mut seekbar) = setup(100.0).await;

    seekbar.on_mouse_down(&adapter, 10.0);
    seekbar.update_progress(80.0, 100.0);
    assert_eq!(seekbar.progress_percentage(), 0.0);

    seekbar.on_mouse_up(&adapter);
    seekbar.update_progress(80.0, 100.0);
    assert_eq!(seekbar.progress_percentage(), 80.0);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_touch_requires_visible_overlay() {
    let (video, adapter, mut seekbar) = setup(200.0).await;

    assert_eq!(seekbar.on_touch_start(&adapter, 400.0), GestureOutcome::Ignored);
    assert_eq!(
        seekbar.on_touch_move(&adapter, 400.0, 20.0),
        GestureOutcome::Ignored
    );
    assert!(!seekbar.state().seeking);

    seekbar.set_overlay_visible(true);
    assert!(matches!(
        seekbar.on_touch_start(&adapter, 400.0),
        GestureOutcome::Preview { .. }
    ));
    seekbar.on_touch_move(&adapter, 450.0, 20.0);
    committed(seekbar.on_touch_end(&adapter));

    assert_eq!(video.seeks().len(), 1);
    assert_eq!(seekbar.gesture(), GestureState::Idle);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_unknown_duration_commits_without_seeking() {
    let (video, adapter, mut seekbar) = setup(f64::NAN).await;

    let (percentage, time) = committed(seekbar.on_click(&adapter, 510.0));
    assert!(percentage > 0.0);
    assert_eq!(time, None);
    assert!(video.seeks().is_empty());
    assert_eq!(seekbar.state().hover_time_stamp, 0.0);

    adapter.destroy().await;
}

#[tokio::test]
async fn test_custom_time_formatter() {
    let (_video, adapter, seekbar) = setup(200.0).await;
    let mut seekbar = SeekBarController::new(seekbar.config().clone())
        .with_formatter(|seconds| format!("{:.0}s", seconds));

    seekbar.on_mouse_move(&adapter, 10.0 + 972.5, 20.0);
    assert_eq!(seekbar.state().hover_time, "200s");

    adapter.destroy().await;
}
