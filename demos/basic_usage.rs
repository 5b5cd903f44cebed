//! Basic Usage Demo
//!
//! Builds a player over the in-memory scripted engine, reacts to engine
//! events, seeks with the seek bar and switches engines.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use vtplayer::testing::{EngineScript, ScriptedEngineModule, ScriptedVideoElement};
use vtplayer::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    DebugLogger::init_logging(tracing::Level::INFO)?;

    println!("🎬 vtplayer Basic Usage Demo");
    println!("============================");

    let script = EngineScript {
        variant_tracks: vec![
            VariantTrack {
                id: 1,
                height: Some(1080),
                bandwidth: 4_500_000,
                language: Some("en".to_string()),
                ..Default::default()
            },
            VariantTrack {
                id: 2,
                height: Some(480),
                bandwidth: 900_000,
                language: Some("en".to_string()),
                ..Default::default()
            },
        ],
        video_buffer: Some(14.2),
        ..Default::default()
    };
    let shaka = Arc::new(ScriptedEngineModule::new(EngineFlavor::Shaka).with_script(script));
    let video = Arc::new(ScriptedVideoElement::new(634.0));

    let mut player = Player::builder()
        .video(video.clone())
        .engine(shaka.clone())
        .source("https://cdn.example/watch/abc/manifest.mpd")
        .viewport_width(1280.0)
        .build()
        .await
        .context("building player")?;

    println!("\n📺 Adapter: {}", player.adapter()?.adapter_type().as_str());
    for quality in player.video_qualities()? {
        println!("   • {}", quality.label);
    }

    // Events
    player.adapter()?.on(
        AdapterEvent::PlaybackStarted,
        Arc::new(|_: &EngineEvent| println!("▶️  playback started")),
    );
    if let Some(engine) = shaka.last_engine() {
        engine.emit(&EngineEvent::new("play"));
    }

    // Seek: hover, then click two thirds along the bar
    println!("\n⏩ Seeking");
    player.on_mouse_enter();
    player.on_mouse_move(850.0, 40.0)?;
    println!("   hover readout: {}", player.seek_state().hover_time);
    match player.on_click(850.0)? {
        GestureOutcome::Committed { percentage, time } => println!(
            "   committed {:.1}% -> {}",
            percentage,
            time.map(format_timestamp).unwrap_or_else(|| "?".to_string())
        ),
        other => println!("   unexpected outcome {:?}", other),
    }
    player.update_progress()?;

    // Source change
    println!("\n🔁 Changing source");
    player.set_source("https://cdn.example/watch/def/manifest.mpd");
    tokio::time::sleep(Duration::from_millis(20)).await;
    println!(
        "   loaded: {}",
        player.adapter()?.loaded_source().unwrap_or_default()
    );

    // Engine switch
    println!("\n🔀 Switching to dash.js");
    player
        .switch_engine(Arc::new(ScriptedEngineModule::new(EngineFlavor::DashJs)))
        .await?;

    let snapshot = player.snapshot()?;
    println!("   snapshot: {}", snapshot.to_json()?);

    player.shutdown().await;
    println!("\n✨ Demo completed!");
    Ok(())
}
