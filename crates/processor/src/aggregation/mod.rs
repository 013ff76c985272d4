//! Aggregation over feedback records
//!
//! - [`counts_for`]: number of records per satisfaction level
//! - [`percent`]: whole-number share, rounded half up
//! - [`SatisfactionCounter`]: mergeable incremental counter
//!
//! # Examples
//!
//! ```rust
//! use processor::aggregation::{percent, SatisfactionCounts};
//!
//! let counts = SatisfactionCounts { very_satisfied: 101, satisfied: 99, unsatisfied: 0 };
//! assert_eq!(counts.total(), 200);
//! assert_eq!(percent(counts.very_satisfied, counts.total()), 51);
//! ```

mod counts;
mod percent;

pub use counts::{counts_for, SatisfactionCounter, SatisfactionCounts, SatisfactionPercentages};
pub use percent::percent;
