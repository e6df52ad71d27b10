// Live front-end for the chroma_vision engine: captures frames from the
// default webcam, runs the per-frame color pipeline, draws the labelled boxes
// back onto the BGR frame with OpenCV, and shows the result in a window until
// the user presses 'q' or the source runs dry.

use anyhow::{Context, Result, bail};
use chroma_vision::core_modules::annotator::{AnnotationStyle, AnnotationSurface};
use chroma_vision::pipeline::{BoundingBox, ColorPipeline, PipelineConfig};
use image::RgbImage;
use log::{info, warn};
use opencv::{
    core::{Point, Rect, Scalar},
    highgui, imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};

const WINDOW_NAME: &str = "Color Detection";
const KEY_POLL_MS: i32 = 10;

/// `AnnotationSurface` implemented over the OpenCV display frame. Drawing
/// primitives come from imgproc; a failed draw is logged and skipped rather
/// than aborting the frame.
struct MatSurface<'a> {
    frame: &'a mut Mat,
}

impl MatSurface<'_> {
    // BGR green, matching the reference annotation color.
    fn color() -> Scalar {
        Scalar::new(0.0, 255.0, 0.0, 0.0)
    }
}

impl AnnotationSurface for MatSurface<'_> {
    fn stroke_rect(&mut self, bounding_box: &BoundingBox, style: &AnnotationStyle) {
        let rect = Rect::new(
            bounding_box.x as i32,
            bounding_box.y as i32,
            bounding_box.width as i32,
            bounding_box.height as i32,
        );
        if let Err(e) = imgproc::rectangle(
            self.frame,
            rect,
            Self::color(),
            style.thickness,
            imgproc::LINE_8,
            0,
        ) {
            warn!("rectangle draw failed: {e}");
        }
    }

    fn draw_label(&mut self, text: &str, x: i32, y: i32, style: &AnnotationStyle) {
        // The anchor may sit above the frame for boxes near the top edge;
        // OpenCV clips such text, which matches the intended behavior.
        if let Err(e) = imgproc::put_text(
            self.frame,
            text,
            Point::new(x, y),
            imgproc::FONT_HERSHEY_SIMPLEX,
            style.font_scale,
            Self::color(),
            style.thickness,
            imgproc::LINE_8,
            false,
        ) {
            warn!("label draw failed: {e}");
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // --- 1. Pipeline Initialization ---
    // The category table is built once, before the loop, and stays immutable
    // for the whole run.
    let pipeline =
        ColorPipeline::new(PipelineConfig::default()).context("building color pipeline")?;

    // --- 2. Video I/O Initialization ---
    let mut cap =
        VideoCapture::new(0, videoio::CAP_ANY).context("opening default capture device")?;
    if !cap.is_opened()? {
        bail!("unable to open default camera");
    }
    highgui::named_window(WINDOW_NAME, highgui::WINDOW_AUTOSIZE)?;

    // --- 3. Main Processing Loop ---
    // Cancellation is a single loop-owned flag, set from the key poll below
    // and checked once per iteration. Setting it never interrupts in-flight
    // processing; it only prevents the next iteration from starting.
    let mut frame = Mat::default();
    let mut stop = false;
    while !stop {
        if !cap.read(&mut frame)? || frame.empty() {
            // Acquisition failure ends the run gracefully; no retry.
            info!("frame source exhausted, stopping");
            break;
        }

        // --- 4. Frame Conversion & Detection ---
        // The engine reasons in RGB; OpenCV delivers BGR.
        let mut rgb = Mat::default();
        imgproc::cvt_color(&frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;
        let size = frame.size()?;
        let buffer = rgb.data_bytes()?.to_vec();
        let rgb_frame = RgbImage::from_raw(size.width as u32, size.height as u32, buffer)
            .context("frame buffer does not match reported dimensions")?;

        // --- 5. Annotation onto the original BGR frame ---
        let mut surface = MatSurface { frame: &mut frame };
        pipeline.process(&rgb_frame, &mut surface);

        // --- 6. Display & Cancellation Poll ---
        highgui::imshow(WINDOW_NAME, &frame)?;
        let key = highgui::wait_key(KEY_POLL_MS)?;
        if key == 'q' as i32 {
            info!("cancellation requested");
            stop = true;
        }
    }

    highgui::destroy_all_windows()?;
    Ok(())
}
