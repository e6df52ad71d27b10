// THEORY:
// The `segmenter` module is the first half of the per-frame pipeline. Given a
// frame already converted to HSV and one color category, it produces a binary
// `Mask`: one byte per pixel, 255 where the pixel's HSV value falls inside at
// least one of the category's ranges, 0 everywhere else.
//
// Key architectural principles:
// 1.  **Union Across Ranges**: A category's mask is the pixel-wise OR over all
//     of its ranges. For single-range categories this degenerates to a plain
//     threshold, but for wrap-around categories (red) the union is a
//     correctness requirement — testing only the first range silently drops
//     every match in the second hue band.
// 2.  **Independence**: Masks for different categories are computed separately
//     and never consult each other. A pixel may be set in zero, one, or several
//     category masks; the engine imposes no mutual exclusion.
// 3.  **Pure and Stateless**: Segmentation is a function of (frame, category)
//     and nothing else. Running it twice on the same inputs yields bit-identical
//     masks, and nothing survives into the next frame.

use crate::core_modules::category::ColorCategory;
use crate::core_modules::hsv::HsvFrame;

/// Mask byte for a pixel inside the category.
pub const FOREGROUND: u8 = 255;
/// Mask byte for a pixel outside every range of the category.
pub const BACKGROUND: u8 = 0;

/// A binary membership grid with the same spatial dimensions as its frame.
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw 0/255 bytes in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.data[(y * self.width + x) as usize] == FOREGROUND
    }

    /// Number of foreground pixels in the whole mask.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&b| b == FOREGROUND).count()
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let data = rows
            .iter()
            .flat_map(|row| row.iter().map(|&b| if b != 0 { FOREGROUND } else { BACKGROUND }))
            .collect();
        Self {
            width,
            height,
            data,
        }
    }
}

/// Produces the binary mask for one category: the union, over the category's
/// ranges, of the inclusive per-channel membership test.
pub fn segment(hsv: &HsvFrame, category: &ColorCategory) -> Mask {
    let data = hsv
        .pixels()
        .map(|pixel| {
            let inside = category
                .ranges
                .iter()
                .any(|range| range.contains(pixel[0], pixel[1], pixel[2]));
            if inside { FOREGROUND } else { BACKGROUND }
        })
        .collect();

    Mask {
        width: hsv.width(),
        height: hsv.height(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::category::{ColorCategory, HsvBound, HsvRange, default_categories};
    use image::{Rgb, RgbImage};

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    fn red_category() -> ColorCategory {
        default_categories().into_iter().next().unwrap()
    }

    #[test]
    fn pixels_inside_a_range_are_foreground() {
        let frame = solid_frame(4, 3, [255, 0, 0]); // HSV (0, 255, 255)
        let hsv = HsvFrame::from_rgb(&frame);
        let mask = segment(&hsv, &red_category());
        assert_eq!(mask.foreground_count(), 12);
    }

    #[test]
    fn pixels_outside_every_range_are_background() {
        let frame = solid_frame(4, 3, [0, 0, 0]);
        let hsv = HsvFrame::from_rgb(&frame);
        for category in &default_categories() {
            let mask = segment(&hsv, category);
            assert_eq!(mask.foreground_count(), 0, "category {}", category.name);
        }
    }

    #[test]
    fn wrap_around_union_includes_the_second_range() {
        // RGB (255, 0, 50) lands near hue 174, inside only the second red
        // range. A segmenter that tested just the first range would miss it.
        let frame = solid_frame(2, 2, [255, 0, 50]);
        let hsv = HsvFrame::from_rgb(&frame);
        let red = red_category();
        let pixel = HsvFrame::from_rgb(&solid_frame(1, 1, [255, 0, 50]));
        let sample = pixel.pixels().next().unwrap();
        assert!(!red.ranges[0].contains(sample[0], sample[1], sample[2]));
        assert!(red.ranges[1].contains(sample[0], sample[1], sample[2]));

        let mask = segment(&hsv, &red);
        assert_eq!(mask.foreground_count(), 4);
    }

    #[test]
    fn segmentation_is_idempotent() {
        let mut frame = solid_frame(8, 8, [0, 0, 0]);
        for x in 2..6 {
            frame.put_pixel(x, 3, Rgb([0, 0, 255]));
        }
        let hsv = HsvFrame::from_rgb(&frame);
        let blue = &default_categories()[1];
        let first = segment(&hsv, blue);
        let second = segment(&hsv, blue);
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn editing_one_category_does_not_disturb_another() {
        let frame = solid_frame(3, 3, [0, 255, 0]); // pure green, HSV (60, 255, 255)
        let hsv = HsvFrame::from_rgb(&frame);
        let categories = default_categories();
        let green = &categories[2];
        let baseline = segment(&hsv, green);

        // Narrow Yellow to nothing; Green's mask must not change.
        let crippled_yellow = ColorCategory::new(
            "Yellow",
            vec![HsvRange::new(
                HsvBound::new(25, 255, 255),
                HsvBound::new(25, 255, 255),
            )],
        );
        assert_eq!(segment(&hsv, &crippled_yellow).foreground_count(), 0);
        assert_eq!(segment(&hsv, green).data(), baseline.data());
    }
}
