// The internal layers of the engine, from configuration vocabulary up to
// annotation. `pipeline` composes them into the public per-frame API.

pub mod annotator;
pub mod category;
pub mod hsv;
pub mod region_detector;
pub mod segmenter;
pub mod utils;
