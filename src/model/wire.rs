//! Planar RGB packing for the upscaling service wire format.

use image::{Rgba, RgbaImage};

use crate::error::ResolveError;

/// Pack an image as planar RGB: all red samples, then all green, then all
/// blue, row-major within each plane. The alpha channel is stripped.
pub(crate) fn to_planar_rgb(image: &RgbaImage) -> Vec<u8> {
    let plane = (image.width() * image.height()) as usize;
    let mut data = vec![0u8; plane * 3];
    for (i, pixel) in image.pixels().enumerate() {
        data[i] = pixel[0];
        data[plane + i] = pixel[1];
        data[2 * plane + i] = pixel[2];
    }
    data
}

/// Rebuild an RGBA image from planar RGB data. Alpha comes back fully
/// opaque. Fails if the payload length does not match the dimensions.
pub(crate) fn from_planar_rgb(
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<RgbaImage, ResolveError> {
    let plane = (width * height) as usize;
    if data.len() != plane * 3 {
        return Err(ResolveError::Payload {
            expected: plane * 3,
            actual: data.len(),
        });
    }
    let mut image = RgbaImage::new(width, height);
    for (i, pixel) in image.pixels_mut().enumerate() {
        *pixel = Rgba([data[i], data[plane + i], data[2 * plane + i], 255]);
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_is_planar_and_drops_alpha() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([1, 2, 3, 128]));
        image.put_pixel(1, 0, Rgba([4, 5, 6, 0]));

        // Red plane, then green, then blue; no alpha bytes anywhere.
        assert_eq!(to_planar_rgb(&image), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn unpacking_restores_pixels_with_opaque_alpha() {
        let image = from_planar_rgb(&[1, 4, 2, 5, 3, 6], 2, 1).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([4, 5, 6, 255]));
    }

    #[test]
    fn unpacking_rejects_short_payload() {
        let err = from_planar_rgb(&[0u8; 5], 2, 1).unwrap_err();
        match err {
            ResolveError::Payload { expected, actual } => {
                assert_eq!(expected, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
