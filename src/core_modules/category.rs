// THEORY:
// The `category` module defines the configuration vocabulary of the engine: the
// named color classes the segmenter looks for. A category is pure data — a name
// plus an ordered list of inclusive HSV range bounds — and is constructed once,
// before the processing loop begins, then shared read-only across every frame.
//
// Key architectural principles:
// 1.  **Multiple Ranges per Category**: Hue is circular, so a single color class
//     can occupy two disjoint intervals on the hue axis. Red is the canonical
//     case: it lives both near 0 and near 180 (half-scale degrees). A category
//     therefore carries a *list* of ranges, and membership is the union of them.
// 2.  **Validated at the Edge**: Bounds are checked when the configuration is
//     built, never while a frame is being processed. An out-of-domain hue or an
//     inverted bound is a configuration mistake and is rejected with a
//     descriptive error rather than silently clamped — clamping would change
//     detection semantics invisibly.
// 3.  **Dumb Data**: Like every other data container in this crate, a category
//     has no behavior beyond answering "is this HSV value inside me?". It is not
//     a trait hierarchy; all categories are uniform records.

use thiserror::Error;

/// Upper bound of the half-scale hue axis (degrees / 2, OpenCV convention).
pub const HUE_MAX: u8 = 180;

/// Errors produced while validating a category table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("category '{category}' has hue bound {hue} outside the 0-{HUE_MAX} half-scale domain")]
    HueOutOfDomain { category: String, hue: u8 },
    #[error("category '{category}' has an inverted range: lower {lower:?} exceeds upper {upper:?}")]
    InvertedRange {
        category: String,
        lower: [u8; 3],
        upper: [u8; 3],
    },
    #[error("category '{category}' defines no ranges")]
    EmptyRangeList { category: String },
    #[error("the category table is empty")]
    EmptyTable,
}

/// A single HSV triple used as a range bound.
/// Hue is half-scale (0-180); saturation and value span the full byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvBound {
    pub hue: u8,
    pub saturation: u8,
    pub value: u8,
}

impl HsvBound {
    pub const fn new(hue: u8, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    fn as_array(&self) -> [u8; 3] {
        [self.hue, self.saturation, self.value]
    }
}

/// An inclusive [lower, upper] box in HSV space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: HsvBound,
    pub upper: HsvBound,
}

impl HsvRange {
    pub const fn new(lower: HsvBound, upper: HsvBound) -> Self {
        Self { lower, upper }
    }

    /// Inclusive per-channel membership test, matching `inRange` semantics:
    /// every channel must lie within its [lower, upper] interval.
    pub fn contains(&self, hue: u8, saturation: u8, value: u8) -> bool {
        hue >= self.lower.hue
            && hue <= self.upper.hue
            && saturation >= self.lower.saturation
            && saturation <= self.upper.saturation
            && value >= self.lower.value
            && value <= self.upper.value
    }
}

/// A named color class: one or more HSV ranges whose union defines membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCategory {
    /// Display name, also used verbatim in annotation labels.
    pub name: String,
    /// Ordered range list. Categories with wrap-around hues (red) need two.
    pub ranges: Vec<HsvRange>,
}

impl ColorCategory {
    pub fn new(name: impl Into<String>, ranges: Vec<HsvRange>) -> Self {
        Self {
            name: name.into(),
            ranges,
        }
    }

    /// Checks every bound of this category for domain errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ranges.is_empty() {
            return Err(ConfigError::EmptyRangeList {
                category: self.name.clone(),
            });
        }
        for range in &self.ranges {
            for bound in [&range.lower, &range.upper] {
                if bound.hue > HUE_MAX {
                    return Err(ConfigError::HueOutOfDomain {
                        category: self.name.clone(),
                        hue: bound.hue,
                    });
                }
            }
            let lower = range.lower.as_array();
            let upper = range.upper.as_array();
            if lower.iter().zip(&upper).any(|(lo, hi)| lo > hi) {
                return Err(ConfigError::InvertedRange {
                    category: self.name.clone(),
                    lower,
                    upper,
                });
            }
        }
        Ok(())
    }
}

/// The reference category table: Red (wrap-around, two ranges), Blue, Green,
/// and Yellow. Iteration order is the annotation order.
pub fn default_categories() -> Vec<ColorCategory> {
    vec![
        ColorCategory::new(
            "Red",
            vec![
                HsvRange::new(HsvBound::new(0, 120, 70), HsvBound::new(10, 255, 255)),
                HsvRange::new(HsvBound::new(170, 120, 70), HsvBound::new(180, 255, 255)),
            ],
        ),
        ColorCategory::new(
            "Blue",
            vec![HsvRange::new(
                HsvBound::new(100, 150, 0),
                HsvBound::new(140, 255, 255),
            )],
        ),
        ColorCategory::new(
            "Green",
            vec![HsvRange::new(
                HsvBound::new(40, 70, 70),
                HsvBound::new(80, 255, 255),
            )],
        ),
        ColorCategory::new(
            "Yellow",
            vec![HsvRange::new(
                HsvBound::new(20, 100, 100),
                HsvBound::new(30, 255, 255),
            )],
        ),
    ]
}
