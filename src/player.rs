use crate::{
    compose::apply_frame,
    core::{FrameIndex, SurfaceSize},
    error::{BlitlineError, BlitlineResult},
    model::Timeline,
    sheet::SpriteSheet,
    surface::Surface,
};

/// A timeline bound to its sheet, validated once at construction.
///
/// Immutable after that; players and iterators borrow it.
#[derive(Clone, Debug)]
pub struct Animation {
    timeline: Timeline,
    sheet: SpriteSheet,
    surface_size: SurfaceSize,
}

impl Animation {
    pub fn new(timeline: Timeline, sheet: SpriteSheet) -> BlitlineResult<Self> {
        let surface_size = timeline.surface_size()?;
        timeline.validate_against(sheet.size(), surface_size)?;
        Ok(Self {
            timeline,
            sheet,
            surface_size,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    pub fn frame_count(&self) -> usize {
        self.timeline.frame_count()
    }

    pub fn player(&self) -> BlitlineResult<Player<'_>> {
        Player::new(self)
    }

    /// One full cycle of composited frames, for export pipelines.
    pub fn frames(&self) -> BlitlineResult<Frames<'_>> {
        Ok(Frames {
            player: self.player()?,
            remaining: self.frame_count(),
        })
    }
}

/// Composite a single frame from scratch.
///
/// Frames are deltas, so seeking replays frames `0..=frame` onto a fresh
/// transparent surface.
#[tracing::instrument(skip(anim))]
pub fn render_frame(anim: &Animation, frame: FrameIndex) -> BlitlineResult<Surface> {
    let count = anim.timeline.frames.len() as u64;
    if frame.0 >= count {
        return Err(BlitlineError::validation(format!(
            "frame {} is out of bounds (timeline has {count} frames)",
            frame.0
        )));
    }

    let mut surface = Surface::new(anim.surface_size)?;
    for f in &anim.timeline.frames[..=frame.0 as usize] {
        apply_frame(&mut surface, &anim.sheet, f)?;
    }
    Ok(surface)
}

/// What a player step produced: which frame is now on the surface and how
/// long to hold it before stepping again. The consumer owns the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTiming {
    pub index: FrameIndex,
    pub delay_ms: u32,
}

/// Stateful looping cursor over an [`Animation`].
///
/// `step()` patches the internal surface with the next frame and returns its
/// timing; after the last frame it wraps back to frame 0. Stopping is just
/// dropping the player.
pub struct Player<'a> {
    anim: &'a Animation,
    surface: Surface,
    next: usize,
}

impl<'a> Player<'a> {
    pub fn new(anim: &'a Animation) -> BlitlineResult<Self> {
        Ok(Self {
            anim,
            surface: Surface::new(anim.surface_size)?,
            next: 0,
        })
    }

    /// The surface as of the last `step()`.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Index of the frame the next `step()` will apply.
    pub fn next_index(&self) -> FrameIndex {
        FrameIndex(self.next as u64)
    }

    /// Apply the next frame and return how long to display it.
    pub fn step(&mut self) -> BlitlineResult<FrameTiming> {
        let frames = &self.anim.timeline.frames;
        let frame = &frames[self.next];
        apply_frame(&mut self.surface, &self.anim.sheet, frame)?;

        let timing = FrameTiming {
            index: FrameIndex(self.next as u64),
            delay_ms: frame.delay_ms,
        };
        self.next = (self.next + 1) % frames.len();
        Ok(timing)
    }

    /// Back to the start: transparent surface, next step applies frame 0.
    pub fn rewind(&mut self) {
        self.surface.clear();
        self.next = 0;
    }
}

/// Owned snapshot of one composited frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFrame {
    pub index: FrameIndex,
    pub delay_ms: u32,
    pub size: SurfaceSize,
    pub rgba8: Vec<u8>,
}

/// Iterator over one full timeline cycle of composited frames.
pub struct Frames<'a> {
    player: Player<'a>,
    remaining: usize,
}

impl Iterator for Frames<'_> {
    type Item = BlitlineResult<RenderedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let timing = match self.player.step() {
            Ok(t) => t,
            Err(e) => {
                self.remaining = 0;
                return Some(Err(e));
            }
        };

        Some(Ok(RenderedFrame {
            index: timing.index,
            delay_ms: timing.delay_ms,
            size: self.player.surface.size(),
            rgba8: self.player.surface.as_rgba8().to_vec(),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
