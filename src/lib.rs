// THEORY:
// This file is the main entry point for the `chroma_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the
// public API exposed to external consumers (like the `live_tester` front-end).
//
// The primary goal is to export the `ColorPipeline` and its associated data
// structures (`PipelineConfig`, `CategoryDetections`, the category table
// types) as the clean, high-level interface for the engine. The internal
// layers live in `core_modules` and are reachable for callers that need the
// individual pieces (e.g. a custom `AnnotationSurface`).

pub mod core_modules;
pub mod pipeline;
