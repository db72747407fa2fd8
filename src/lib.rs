//! # Flowmoments
//!
//! Streaming statistical moments for Rust.
//!
//! Flowmoments keeps the mean, variance, standard deviation, skewness and
//! excess kurtosis of a stream of `f64` observations in constant memory,
//! using numerically stable single-pass updates.
//!
//! ## Features
//!
//! - **Running Moments**: first four central moments with O(1) updates
//! - **Full Mergeability**: accumulators built on disjoint partitions combine
//!   into the accumulator of the whole stream
//! - **Confidence Bounds**: normal-approximation interval for the mean
//!
//! ## Quick Start
//!
//! ```rust
//! use flowmoments::prelude::*;
//!
//! let mut stats = Moments::new();
//! for latency_ms in [12.0, 15.0, 11.0, 40.0, 13.0] {
//!     stats.push(latency_ms);
//! }
//! println!("{}", stats);
//! ```
//!
//! ## Distributed Computing
//!
//! Accumulators implement the [`Sketch`](traits::Sketch) trait which includes
//! a `merge` operation, allowing partial results to be combined across workers:
//!
//! ```rust
//! use flowmoments::statistics::Moments;
//! use flowmoments::traits::Sketch;
//!
//! let mut worker1 = Moments::new();
//! let mut worker2 = Moments::new();
//!
//! // Each worker processes its partition
//! worker1.push(1.0);
//! worker2.push(3.0);
//!
//! // Merge results
//! worker1.merge(&worker2);
//! assert_eq!(worker1.mean(), 2.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `statistics` (default): running moments
//! - `full`: Enable all algorithm families
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization
//! - `tracing`: Emit `trace` events from merges

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub(crate) mod math;

// Core traits always available
pub mod traits;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

pub mod prelude {
    pub use crate::traits::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::Moments;
}

#[cfg(feature = "statistics")]
pub use statistics::Moments;
