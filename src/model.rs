use crate::{
    core::SurfaceSize,
    error::{BlitlineError, BlitlineResult},
};

/// One rectangular copy from the packed sheet to the destination surface.
///
/// Wire form is the generated 6-element array
/// `[src_x, src_y, width, height, dst_x, dst_y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u32; 6]", into = "[u32; 6]")]
pub struct Blit {
    pub src_x: u32,
    pub src_y: u32,
    pub width: u32,
    pub height: u32,
    pub dst_x: u32,
    pub dst_y: u32,
}

impl From<[u32; 6]> for Blit {
    fn from(v: [u32; 6]) -> Self {
        Self {
            src_x: v[0],
            src_y: v[1],
            width: v[2],
            height: v[3],
            dst_x: v[4],
            dst_y: v[5],
        }
    }
}

impl From<Blit> for [u32; 6] {
    fn from(b: Blit) -> Self {
        [b.src_x, b.src_y, b.width, b.height, b.dst_x, b.dst_y]
    }
}

impl Blit {
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn checked_extent(x: u32, w: u32, what: &str) -> BlitlineResult<u32> {
        x.checked_add(w)
            .ok_or_else(|| BlitlineError::validation(format!("blit {what} extent overflows u32")))
    }

    pub fn src_right(self) -> BlitlineResult<u32> {
        Self::checked_extent(self.src_x, self.width, "source x")
    }

    pub fn src_bottom(self) -> BlitlineResult<u32> {
        Self::checked_extent(self.src_y, self.height, "source y")
    }

    pub fn dst_right(self) -> BlitlineResult<u32> {
        Self::checked_extent(self.dst_x, self.width, "destination x")
    }

    pub fn dst_bottom(self) -> BlitlineResult<u32> {
        Self::checked_extent(self.dst_y, self.height, "destination y")
    }
}

/// One animation step: apply `blits` in order, then hold the canvas for
/// `delay_ms`. An empty `blits` list is a pure hold frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    #[serde(rename = "delay")]
    pub delay_ms: u32,

    #[serde(rename = "blit", default)]
    pub blits: Vec<Blit>,
}

/// The full frame sequence, in wire form a bare JSON array.
///
/// Frames are deltas: the visual state at frame `i` is the cumulative
/// application of frames `0..=i`. Generated timelines open with a
/// full-surface blit and duplicate the first frame at the end so playback
/// wraps seamlessly.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    pub frames: Vec<Frame>,
}

impl Timeline {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Structural checks that need no sheet or surface: non-empty sequence,
    /// positive delays, non-degenerate rects, extent arithmetic in range.
    pub fn validate(&self) -> BlitlineResult<()> {
        if self.frames.is_empty() {
            return Err(BlitlineError::validation("timeline has no frames"));
        }

        for (i, frame) in self.frames.iter().enumerate() {
            if frame.delay_ms == 0 {
                return Err(BlitlineError::validation(format!(
                    "frame {i} has zero delay (delays must be > 0 ms)"
                )));
            }
            for (j, blit) in frame.blits.iter().enumerate() {
                if blit.is_empty() {
                    return Err(BlitlineError::validation(format!(
                        "frame {i} blit {j} has a zero-size rectangle"
                    )));
                }
                blit.src_right()?;
                blit.src_bottom()?;
                blit.dst_right()?;
                blit.dst_bottom()?;
            }
        }
        Ok(())
    }

    /// Bounds checks against a concrete sheet and destination surface.
    pub fn validate_against(&self, sheet: SurfaceSize, surface: SurfaceSize) -> BlitlineResult<()> {
        self.validate()?;
        for (i, frame) in self.frames.iter().enumerate() {
            for (j, blit) in frame.blits.iter().enumerate() {
                if !sheet.contains_rect(blit.src_x, blit.src_y, blit.width, blit.height) {
                    return Err(BlitlineError::validation(format!(
                        "frame {i} blit {j} reads outside the {}x{} sheet",
                        sheet.width, sheet.height
                    )));
                }
                if !surface.contains_rect(blit.dst_x, blit.dst_y, blit.width, blit.height) {
                    return Err(BlitlineError::validation(format!(
                        "frame {i} blit {j} writes outside the {}x{} surface",
                        surface.width, surface.height
                    )));
                }
            }
        }
        Ok(())
    }

    /// Destination size inferred from blit coverage. The format carries no
    /// header; generated data always opens with a blit covering the full
    /// surface at the origin.
    pub fn surface_size(&self) -> BlitlineResult<SurfaceSize> {
        self.coverage(|b| Ok((b.dst_right()?, b.dst_bottom()?)), "destination")
    }

    /// Union of all source rects; the decoded sheet must be at least this big.
    pub fn sheet_extent(&self) -> BlitlineResult<SurfaceSize> {
        self.coverage(|b| Ok((b.src_right()?, b.src_bottom()?)), "source")
    }

    fn coverage(
        &self,
        extent: impl Fn(&Blit) -> BlitlineResult<(u32, u32)>,
        what: &str,
    ) -> BlitlineResult<SurfaceSize> {
        let mut width = 0u32;
        let mut height = 0u32;
        for frame in &self.frames {
            for blit in &frame.blits {
                let (right, bottom) = extent(blit)?;
                width = width.max(right);
                height = height.max(bottom);
            }
        }
        if width == 0 || height == 0 {
            return Err(BlitlineError::validation(format!(
                "timeline has no blits, cannot infer {what} coverage"
            )));
        }
        SurfaceSize::new(width, height)
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.delay_ms)).sum()
    }

    /// Whether the last frame repeats the first frame's blits, so a wrap from
    /// the end back to frame 0 repaints identical pixels.
    pub fn closes_loop(&self) -> bool {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => self.frames.len() > 1 && first.blits == last.blits,
            _ => false,
        }
    }
}
