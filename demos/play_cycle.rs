use std::sync::Arc;

use blitline::{Animation, SpriteSheet, timeline_from_js_str};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let timeline = timeline_from_js_str(include_str!("../tests/data/pulse_anim.js"))?;
    let extent = timeline.sheet_extent()?;

    // Checkerboard stand-in for the packed sheet PNG.
    let rgba8: Vec<u8> = (0..extent.height)
        .flat_map(|y| (0..extent.width).map(move |x| (x + y) % 2))
        .flat_map(|on| if on == 1 { [230, 230, 230, 255] } else { [25, 25, 25, 255] })
        .collect();
    let sheet = SpriteSheet {
        width: extent.width,
        height: extent.height,
        rgba8: Arc::new(rgba8),
    };

    let anim = Animation::new(timeline, sheet)?;
    let size = anim.surface_size();
    println!(
        "{} frames, {}x{} surface, {} ms per cycle",
        anim.frame_count(),
        size.width,
        size.height,
        anim.timeline().total_duration_ms()
    );

    let mut player = anim.player()?;
    for _ in 0..anim.frame_count() {
        let timing = player.step()?;
        println!("frame {}: hold {} ms", timing.index.0, timing.delay_ms);
    }

    Ok(())
}
