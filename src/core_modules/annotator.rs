// THEORY:
// The `annotator` module turns surviving regions into marks on the output
// frame: a rectangle outline at each bounding box plus a text label just above
// its top-left corner. The actual drawing primitives live behind the
// `AnnotationSurface` trait, because rendering belongs to whatever imaging
// library owns the display frame (the live tester implements the trait over an
// OpenCV Mat; tests implement it with a recorder).
//
// Geometry rules:
// - The label text is the category name plus the fixed "Object" suffix.
// - The label anchor is (box.x, box.y - 10) in *signed* coordinates. It is
//   deliberately not clamped: a box touching the top edge gets a label that is
//   partially or wholly off-frame, matching the reference behavior.
// - Regions are annotated independently and overlapping boxes from different
//   categories are all drawn; overdraw order is simply category order.

use crate::core_modules::region_detector::{BoundingBox, Region};

/// Fixed suffix appended to every category name in labels.
pub const LABEL_SUFFIX: &str = "Object";
/// Vertical offset of the label anchor above the box's top-left corner.
pub const LABEL_Y_OFFSET: i32 = 10;

/// Stroke and text parameters shared by every annotation in a run.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationStyle {
    /// Outline thickness in pixels.
    pub thickness: i32,
    /// Font scale passed through to the surface's text renderer.
    pub font_scale: f64,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            thickness: 2,
            font_scale: 0.5,
        }
    }
}

/// The seam between region geometry and the drawing collaborator.
pub trait AnnotationSurface {
    /// Draws a rectangle outline at the given bounding box.
    fn stroke_rect(&mut self, bounding_box: &BoundingBox, style: &AnnotationStyle);
    /// Draws label text with its baseline anchored at (x, y). Coordinates are
    /// signed and may fall outside the frame.
    fn draw_label(&mut self, text: &str, x: i32, y: i32, style: &AnnotationStyle);
}

/// Draws one box-plus-label pair per region onto the surface.
pub fn annotate(
    surface: &mut dyn AnnotationSurface,
    category_name: &str,
    regions: &[Region],
    style: &AnnotationStyle,
) {
    for region in regions {
        let bounding_box = &region.bounding_box;
        surface.stroke_rect(bounding_box, style);
        let label = format!("{category_name} {LABEL_SUFFIX}");
        surface.draw_label(
            &label,
            bounding_box.x as i32,
            bounding_box.y as i32 - LABEL_Y_OFFSET,
            style,
        );
    }
}
