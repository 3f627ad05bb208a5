use crate::error::{BlitlineError, BlitlineResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> BlitlineResult<Self> {
        if width == 0 || height == 0 {
            return Err(BlitlineError::validation(
                "SurfaceSize width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Length of a tightly packed RGBA8 buffer for this size.
    pub fn byte_len(self) -> BlitlineResult<usize> {
        self.pixel_count()
            .checked_mul(4)
            .ok_or_else(|| BlitlineError::validation("surface byte length overflows usize"))
    }

    /// Whether `[x, x+w) x [y, y+h)` lies within this size.
    pub fn contains_rect(self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let right = match x.checked_add(w) {
            Some(v) => v,
            None => return false,
        };
        let bottom = match y.checked_add(h) {
            Some(v) => v,
            None => return false,
        };
        right <= self.width && bottom <= self.height
    }
}
