// THEORY:
// The `hsv` module is the colorspace conversion layer. Everything downstream of
// it (segmentation, region extraction) reasons in hue-saturation-value space,
// because hue isolates color identity from lighting and shading in a way raw
// RGB thresholding cannot.
//
// The conversion follows the 8-bit OpenCV convention so that category bounds
// written against that convention apply bit-for-bit:
// - Hue is half-scale: degrees / 2, giving 0-180 so it fits a byte.
// - Saturation and value span the full 0-255 byte range.
// This compatibility is a hard contract, not a convenience; a different hue
// scale would silently shift every category boundary.
//
// `rgb_to_hsv` is a pure function and `HsvFrame` is a dumb buffer derived from
// a frame exactly once per iteration. Neither holds state between frames.

use image::RgbImage;

pub type Hue = u8;
pub type Saturation = u8;
pub type Value = u8;

/// Converts one RGB pixel to half-scale-hue HSV: H in 0-180, S and V in 0-255.
pub fn rgb_to_hsv(red: u8, green: u8, blue: u8) -> [u8; 3] {
    let r = red as f32 / 255.0;
    let g = green as f32 / 255.0;
    let b = blue as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut hue_degrees = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if hue_degrees < 0.0 {
        hue_degrees += 360.0;
    }

    let hue = (hue_degrees / 2.0).round() as u8;
    let saturation = if max == 0.0 {
        0
    } else {
        (delta / max * 255.0).round() as u8
    };
    let value = (max * 255.0).round() as u8;

    [hue, saturation, value]
}

/// A frame converted to HSV: a flat H,S,V byte buffer with the same spatial
/// dimensions as the source frame.
pub struct HsvFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl HsvFrame {
    /// Converts an RGB frame pixel-by-pixel. Deterministic: the same frame
    /// always produces the same buffer.
    pub fn from_rgb(frame: &RgbImage) -> Self {
        let mut data = Vec::with_capacity((frame.width() * frame.height() * 3) as usize);
        for pixel in frame.pixels() {
            data.extend_from_slice(&rgb_to_hsv(pixel[0], pixel[1], pixel[2]));
        }
        Self {
            width: frame.width(),
            height: frame.height(),
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Iterates pixels in row-major order as [H, S, V] triples.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(3)
    }
}
