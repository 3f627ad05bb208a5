use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use tracing::debug;

use crate::{
    error::{BlitlineError, BlitlineResult},
    player::Animation,
    surface::Surface,
};

/// Write one composited frame as a PNG.
pub fn write_frame_png(surface: &Surface, path: &Path) -> BlitlineResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        surface.as_rgba8(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Write the whole cycle as a numbered PNG sequence (`frame_0000.png`, ...).
/// Returns the number of frames written.
#[tracing::instrument(skip(anim))]
pub fn export_png_sequence(anim: &Animation, out_dir: &Path) -> BlitlineResult<usize> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let mut written = 0usize;
    for rendered in anim.frames()? {
        let rendered = rendered?;
        let path = sequence_frame_path(out_dir, rendered.index.0);
        image::save_buffer_with_format(
            &path,
            &rendered.rgba8,
            rendered.size.width,
            rendered.size.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        written += 1;
    }

    debug!(frames = written, dir = %out_dir.display(), "exported png sequence");
    Ok(written)
}

/// Re-encode the loop as an infinitely repeating GIF with per-frame delays.
///
/// When the timeline closes its loop (last frame repeats the first), the
/// duplicate closing frame is dropped: the GIF's own wrap already shows
/// frame 0 again, and keeping both would double the first image's hold time.
#[tracing::instrument(skip(anim))]
pub fn encode_gif(anim: &Animation, path: &Path) -> BlitlineResult<()> {
    ensure_parent_dir(path)?;
    let file =
        File::create(path).with_context(|| format!("create gif '{}'", path.display()))?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder
        .set_repeat(Repeat::Infinite)
        .context("set gif repeat")?;

    let mut take = anim.frame_count();
    if anim.timeline().closes_loop() {
        take -= 1;
    }

    for rendered in anim.frames()?.take(take) {
        let rendered = rendered?;
        let buffer = image::RgbaImage::from_raw(
            rendered.size.width,
            rendered.size.height,
            rendered.rgba8,
        )
        .ok_or_else(|| BlitlineError::compose("rendered frame buffer has wrong length"))?;

        let delay = image::Delay::from_numer_denom_ms(rendered.delay_ms, 1);
        let frame = image::Frame::from_parts(buffer, 0, 0, delay);
        encoder
            .encode_frame(frame)
            .with_context(|| format!("encode gif frame {}", rendered.index.0))?;
    }

    debug!(path = %path.display(), "encoded gif");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> BlitlineResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Default path for a frame within a sequence directory.
pub fn sequence_frame_path(out_dir: &Path, index: u64) -> PathBuf {
    out_dir.join(format!("frame_{index:04}.png"))
}
