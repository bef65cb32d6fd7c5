//! Feature extractors: pure functions from images to compact descriptors.
//!
//! Every extractor returns freshly owned output; nothing is cached between
//! calls.

pub mod color;
pub mod gradient;
pub mod histogram;
pub mod regions;

pub use color::{rgb_to_hsv, to_hsv, HsvPlanes};
pub use gradient::{abs_saturated, box_blur3, smoothed_gradients, sobel, Gradients, ScalarField};
pub use histogram::{correlation, correlation_distance, Histogram, HistogramSpec};
pub use regions::{grid_cells, Cell};
