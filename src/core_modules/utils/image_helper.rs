// Debug tooling: dumps intermediate pipeline artifacts to PNG so a mask can be
// eyeballed when a category's bounds are being tuned.

use crate::core_modules::segmenter::Mask;
use image::ImageEncoder;
use std::path::Path;

/// Saves a binary mask as an 8-bit grayscale PNG.
pub fn save_mask(path: &Path, mask: &Mask) -> Result<(), image::error::ImageError> {
    let output = std::fs::File::create(path)?;
    let encoder = image::codecs::png::PngEncoder::new(output);
    encoder.write_image(
        mask.data(),
        mask.width(),
        mask.height(),
        image::ExtendedColorType::L8,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::category::default_categories;
    use crate::core_modules::hsv::HsvFrame;
    use crate::core_modules::segmenter::segment;
    use image::{Rgb, RgbImage};

    #[test]
    fn saved_mask_round_trips_through_png() {
        let mut frame = RgbImage::from_pixel(16, 8, Rgb([0, 0, 0]));
        for x in 4..12 {
            for y in 2..6 {
                frame.put_pixel(x, y, Rgb([0, 0, 255]));
            }
        }
        let hsv = HsvFrame::from_rgb(&frame);
        let blue = &default_categories()[1];
        let mask = segment(&hsv, blue);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("blue_mask.png");
        save_mask(&path, &mask).expect("saving mask");

        let reloaded = image::open(&path).expect("reloading mask").into_luma8();
        assert_eq!(reloaded.dimensions(), (16, 8));
        assert_eq!(reloaded.as_raw().as_slice(), mask.data());
    }
}
