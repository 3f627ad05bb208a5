use crate::{
    error::{BlitlineError, BlitlineResult},
    model::{Blit, Frame},
    sheet::SpriteSheet,
    surface::Surface,
};

/// Copy one rectangle from the sheet onto the surface.
///
/// A raw row-wise copy: no scaling, no blending. Bounds are checked up front
/// so a bad rect never writes partially.
pub fn apply_blit(surface: &mut Surface, sheet: &SpriteSheet, blit: Blit) -> BlitlineResult<()> {
    if blit.is_empty() {
        return Ok(());
    }

    if !sheet
        .size()
        .contains_rect(blit.src_x, blit.src_y, blit.width, blit.height)
    {
        return Err(BlitlineError::compose(format!(
            "blit source {}x{}@({},{}) outside {}x{} sheet",
            blit.width, blit.height, blit.src_x, blit.src_y, sheet.width, sheet.height
        )));
    }
    if !surface
        .size()
        .contains_rect(blit.dst_x, blit.dst_y, blit.width, blit.height)
    {
        return Err(BlitlineError::compose(format!(
            "blit destination {}x{}@({},{}) outside {}x{} surface",
            blit.width,
            blit.height,
            blit.dst_x,
            blit.dst_y,
            surface.width(),
            surface.height()
        )));
    }

    let sheet_stride = sheet.width as usize * 4;
    let surface_stride = surface.width() as usize * 4;
    let row_bytes = blit.width as usize * 4;

    let src = sheet.rgba8.as_slice();
    let dst = surface.as_rgba8_mut();

    for row in 0..blit.height as usize {
        let src_off = (blit.src_y as usize + row) * sheet_stride + blit.src_x as usize * 4;
        let dst_off = (blit.dst_y as usize + row) * surface_stride + blit.dst_x as usize * 4;
        dst[dst_off..dst_off + row_bytes].copy_from_slice(&src[src_off..src_off + row_bytes]);
    }
    Ok(())
}

/// Apply all of a frame's blits in order.
pub fn apply_frame(surface: &mut Surface, sheet: &SpriteSheet, frame: &Frame) -> BlitlineResult<()> {
    for blit in &frame.blits {
        apply_blit(surface, sheet, *blit)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::SurfaceSize;

    /// 4x4 sheet where every pixel encodes its own coordinates.
    fn coord_sheet() -> SpriteSheet {
        let mut rgba8 = Vec::with_capacity(4 * 4 * 4);
        for y in 0..4u8 {
            for x in 0..4u8 {
                rgba8.extend_from_slice(&[x, y, 100, 255]);
            }
        }
        SpriteSheet {
            width: 4,
            height: 4,
            rgba8: Arc::new(rgba8),
        }
    }

    #[test]
    fn blit_copies_exact_rect() {
        let sheet = coord_sheet();
        let mut surface = Surface::new(SurfaceSize::new(3, 3).unwrap()).unwrap();

        apply_blit(&mut surface, &sheet, Blit::from([1, 2, 2, 1, 0, 1])).unwrap();

        assert_eq!(surface.pixel(0, 1), Some([1, 2, 100, 255]));
        assert_eq!(surface.pixel(1, 1), Some([2, 2, 100, 255]));
        // Untouched pixels stay transparent.
        assert_eq!(surface.pixel(2, 1), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn blit_overwrites_previous_content() {
        let sheet = coord_sheet();
        let mut surface = Surface::new(SurfaceSize::new(2, 2).unwrap()).unwrap();

        apply_blit(&mut surface, &sheet, Blit::from([0, 0, 2, 2, 0, 0])).unwrap();
        apply_blit(&mut surface, &sheet, Blit::from([3, 3, 1, 1, 0, 0])).unwrap();

        assert_eq!(surface.pixel(0, 0), Some([3, 3, 100, 255]));
        assert_eq!(surface.pixel(1, 0), Some([1, 0, 100, 255]));
    }

    #[test]
    fn blit_out_of_sheet_bounds_is_an_error() {
        let sheet = coord_sheet();
        let mut surface = Surface::new(SurfaceSize::new(8, 8).unwrap()).unwrap();
        let before = surface.clone();

        let err = apply_blit(&mut surface, &sheet, Blit::from([3, 0, 2, 1, 0, 0])).unwrap_err();
        assert!(err.to_string().contains("sheet"), "{err}");
        assert_eq!(surface, before);
    }

    #[test]
    fn blit_out_of_surface_bounds_is_an_error() {
        let sheet = coord_sheet();
        let mut surface = Surface::new(SurfaceSize::new(2, 2).unwrap()).unwrap();
        let before = surface.clone();

        let err = apply_blit(&mut surface, &sheet, Blit::from([0, 0, 3, 1, 0, 0])).unwrap_err();
        assert!(err.to_string().contains("surface"), "{err}");
        assert_eq!(surface, before);
    }

    #[test]
    fn zero_size_blit_is_a_noop() {
        let sheet = coord_sheet();
        let mut surface = Surface::new(SurfaceSize::new(2, 2).unwrap()).unwrap();
        apply_blit(&mut surface, &sheet, Blit::from([0, 0, 0, 0, 0, 0])).unwrap();
        assert!(surface.as_rgba8().iter().all(|&b| b == 0));
    }

    #[test]
    fn frame_applies_blits_in_order() {
        let sheet = coord_sheet();
        let mut surface = Surface::new(SurfaceSize::new(2, 1).unwrap()).unwrap();

        let frame = Frame {
            delay_ms: 100,
            blits: vec![
                Blit::from([0, 0, 2, 1, 0, 0]),
                // Later blit wins where rects overlap.
                Blit::from([2, 2, 1, 1, 1, 0]),
            ],
        };
        apply_frame(&mut surface, &sheet, &frame).unwrap();

        assert_eq!(surface.pixel(0, 0), Some([0, 0, 100, 255]));
        assert_eq!(surface.pixel(1, 0), Some([2, 2, 100, 255]));
    }
}
