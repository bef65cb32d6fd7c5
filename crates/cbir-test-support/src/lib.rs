//! Test support utilities for cbir.
//!
//! Provides mocks, synthetic image builders, and utilities for testing
//! the retrieval pipeline.
//!
//! # Example
//!
//! ```
//! use cbir_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! // Create synthetic candidates
//! let red = SyntheticImageBuilder::red();
//! let stripes = SyntheticImageBuilder::vertical_bars(32, 32, 4);
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![red, stripes]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{MockImageSource, MockProgressSink, MockResultOutput};
