use std::{fs, path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{core::SurfaceSize, error::BlitlineResult};

/// Decoded packed sprite sheet.
///
/// Straight (non-premultiplied) RGBA8, row-major, tightly packed. Blits are
/// raw pixel copies, so no premultiplication is applied.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    pub rgba8: Arc<Vec<u8>>,
}

impl SpriteSheet {
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize {
            width: self.width,
            height: self.height,
        }
    }

    /// RGBA of one pixel, `None` outside the sheet.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

pub fn decode_sheet(bytes: &[u8]) -> BlitlineResult<SpriteSheet> {
    let dyn_img = image::load_from_memory(bytes).context("decode sprite sheet from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(SpriteSheet {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

pub fn load_sheet(path: impl AsRef<Path>) -> BlitlineResult<SpriteSheet> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("read sprite sheet '{}'", path.display()))?;
    decode_sheet(&bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decode_sheet_keeps_straight_rgba() {
        let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
        let img = image::RgbaImage::from_raw(1, 1, src_rgba.clone()).unwrap();

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let sheet = decode_sheet(&buf).unwrap();
        assert_eq!(sheet.width, 1);
        assert_eq!(sheet.height, 1);
        assert_eq!(sheet.rgba8.as_slice(), src_rgba.as_slice());
    }

    #[test]
    fn decode_sheet_rejects_garbage() {
        assert!(decode_sheet(b"not an image").is_err());
    }

    #[test]
    fn pixel_lookup_respects_bounds() {
        let img = image::RgbaImage::from_fn(2, 2, |x, y| {
            image::Rgba([x as u8, y as u8, 0, 255])
        });
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let sheet = decode_sheet(&buf).unwrap();
        assert_eq!(sheet.pixel(1, 0), Some([1, 0, 0, 255]));
        assert_eq!(sheet.pixel(0, 1), Some([0, 1, 0, 255]));
        assert_eq!(sheet.pixel(2, 0), None);
    }
}
