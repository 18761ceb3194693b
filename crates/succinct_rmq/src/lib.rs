//! Constant-time range minimum queries in linear space.
//!
//! [`SuccinctRmq`] answers "where is the minimum of `a[i..=j]`?" in `O(1)`
//! after an `O(n)` build, storing a handful of bits per element on top of
//! the array: microblock shapes are shared through Cartesian tree types, and
//! only block and superblock minima get sparse tables. This is the classic
//! building block for longest-common-prefix queries over suffix arrays.
//!
//! ```
//! use succinct_rmq::SuccinctRmq;
//!
//! let values: Vec<i64> = (0..300).map(|i| (i * 37 % 101) - 50).collect();
//! let rmq = SuccinctRmq::new(values.clone()).unwrap();
//! let k = rmq.query(10, 250);
//! assert_eq!(values[k], *values[10..=250].iter().min().unwrap());
//! ```
//!
//! The partition sizes are fixed per structure ([`RmqConfig`]); arrays
//! shorter than [`RmqConfig::min_len`] are rejected at construction.

mod bits;
mod catalan;
mod config;
mod error;
mod microblock;
mod persist;
mod sparse;
mod sparse_table;
mod succinct;

use std::ops::Range;

pub use config::{MAX_MICROBLOCK_SIZE, MAX_SUPERBLOCK_SIZE, RmqConfig};
pub use error::{Error, Result};
pub use sparse_table::SparseTableRmq;
pub use succinct::SuccinctRmq;

/// Static RMQ (Range Minimum Query) interface.
///
/// - Query ranges are half-open: `[l, r)`.
/// - The answer is `Some(argmin_index)` when the range is valid and non-empty.
/// - Which minimum is returned on ties is up to the implementation:
///   [`SparseTableRmq`] returns the leftmost one, [`SuccinctRmq`] any one.
pub trait StaticRmq: Sized {
    fn build(values: Vec<i64>) -> Result<Self>;
    fn argmin(&self, range: Range<usize>) -> Option<usize>;
}
