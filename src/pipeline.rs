// THEORY:
// The `pipeline` module is the final, top-level API for the engine. It
// composes the internal layers — colorspace conversion, per-category
// segmentation, region extraction, area filtering, annotation — into a single
// interface: hand it a frame, get back the surviving regions per category, and
// optionally have them drawn onto an output surface.
//
// The pipeline holds *configuration*, never frame state. `detect` is a pure
// function of (frame, category table, threshold): nothing persists between
// calls, no region in frame N has any relationship to frame N+1, and running
// the same frame twice yields identical results. The category table is
// validated once at construction and then shared read-only with every frame.

use crate::core_modules::annotator::{self, AnnotationStyle, AnnotationSurface};
use crate::core_modules::hsv::HsvFrame;
use crate::core_modules::region_detector::region_detector::{filter_regions, find_regions};
use crate::core_modules::segmenter::segment;
use image::RgbImage;
use log::{debug, info};

// Re-export key data structures for the public API.
pub use crate::core_modules::annotator::{LABEL_SUFFIX, LABEL_Y_OFFSET};
pub use crate::core_modules::category::{
    ColorCategory, ConfigError, HsvBound, HsvRange, default_categories,
};
pub use crate::core_modules::region_detector::{BoundingBox, Region};

/// Reference minimum-area threshold: regions must strictly exceed this many
/// pixels to survive.
pub const DEFAULT_MIN_REGION_AREA: usize = 200;

/// Configuration for the ColorPipeline, fixed for the duration of a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The category table, in annotation order.
    pub categories: Vec<ColorCategory>,
    /// Regions with `area <= min_region_area` are discarded.
    pub min_region_area: usize,
    /// Stroke and text parameters used when annotating.
    pub style: AnnotationStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            min_region_area: DEFAULT_MIN_REGION_AREA,
            style: AnnotationStyle::default(),
        }
    }
}

/// The surviving regions for one category in one frame.
#[derive(Debug, Clone)]
pub struct CategoryDetections {
    pub category: String,
    pub regions: Vec<Region>,
}

/// The main, top-level struct for the engine.
pub struct ColorPipeline {
    config: PipelineConfig,
}

impl ColorPipeline {
    /// Validates the category table up front; malformed bounds are rejected
    /// here with a descriptive error, never clamped.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        if config.categories.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        for category in &config.categories {
            category.validate()?;
        }
        info!(
            "color pipeline configured: categories [{}], min region area {}",
            config
                .categories
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            config.min_region_area,
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs segmentation and region extraction for every category, in table
    /// order. Pure and stateless: the frame is only read, and nothing is
    /// carried over to the next call.
    pub fn detect(&self, frame: &RgbImage) -> Vec<CategoryDetections> {
        let hsv = HsvFrame::from_rgb(frame);
        self.config
            .categories
            .iter()
            .map(|category| {
                let mask = segment(&hsv, category);
                let regions = find_regions(&mask);
                let surviving = filter_regions(regions, self.config.min_region_area);
                debug!(
                    "category {}: {} foreground px, {} surviving region(s)",
                    category.name,
                    mask.foreground_count(),
                    surviving.len(),
                );
                CategoryDetections {
                    category: category.name.clone(),
                    regions: surviving,
                }
            })
            .collect()
    }

    /// Draws every detection onto the surface, one labelled box per region,
    /// iterating categories in table order (later categories overdraw earlier
    /// ones where boxes happen to overlap).
    pub fn annotate(&self, detections: &[CategoryDetections], surface: &mut dyn AnnotationSurface) {
        for detection in detections {
            annotator::annotate(
                surface,
                &detection.category,
                &detection.regions,
                &self.config.style,
            );
        }
    }

    /// Convenience for the per-frame loop: detect, then annotate in place.
    pub fn process(
        &self,
        frame: &RgbImage,
        surface: &mut dyn AnnotationSurface,
    ) -> Vec<CategoryDetections> {
        let detections = self.detect(frame);
        self.annotate(&detections, surface);
        detections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_rejected_at_construction() {
        let config = PipelineConfig {
            categories: vec![],
            ..PipelineConfig::default()
        };
        assert!(matches!(
            ColorPipeline::new(config),
            Err(ConfigError::EmptyTable)
        ));
    }

    #[test]
    fn malformed_category_is_rejected_at_construction() {
        let mut config = PipelineConfig::default();
        config.categories.push(ColorCategory::new(
            "Ultraviolet",
            vec![HsvRange::new(
                HsvBound::new(190, 0, 0),
                HsvBound::new(200, 255, 255),
            )],
        ));
        assert!(matches!(
            ColorPipeline::new(config),
            Err(ConfigError::HueOutOfDomain { .. })
        ));
    }

    #[test]
    fn detections_preserve_table_order() {
        let pipeline = ColorPipeline::new(PipelineConfig::default()).unwrap();
        let frame = RgbImage::new(4, 4);
        let detections = pipeline.detect(&frame);
        let names: Vec<&str> = detections.iter().map(|d| d.category.as_str()).collect();
        assert_eq!(names, ["Red", "Blue", "Green", "Yellow"]);
    }
}
