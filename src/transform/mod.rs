//! # Data Transformation Pipeline
//!
//! Composable strategies shaping raw fetched payloads into the typed
//! view-models the dashboard renders. Every strategy implements
//! [`TransformStrategy`]; combinators build pipelines out of leaves:
//!
//! - [`IdentityTransform`] - pass-through
//! - [`ChainTransform`] / [`TransformStrategyExt::then`] - typed two-step
//!   composition (associative)
//! - [`ComposedTransform`] - ordered pipeline of same-type stages
//! - [`ArrayTransform`] - element-wise lift over a collection
//! - [`FilteringTransform`] - drop-then-transform over a collection
//! - [`ConditionalTransform`] - whole-input branch on a predicate
//! - [`MemoizedTransform`] - cache outputs by structural key
//!
//! ## Example
//!
//! ```rust
//! use rti_data::transform::{FilteringTransform, FnTransform, TransformStrategy};
//!
//! let evens_doubled = FilteringTransform::new(
//!     |n: &u32| n % 2 == 0,
//!     FnTransform::new(|n: u32| n * 2),
//! );
//!
//! assert_eq!(evens_doubled.transform(vec![1, 2, 3, 4]), vec![4, 8]);
//! ```

pub mod combinators;
pub mod memoized;
pub mod strategy;

pub use combinators::{
    ArrayTransform, ChainTransform, ComposedTransform, ConditionalTransform, FilteringTransform,
    TransformStrategyExt,
};
pub use memoized::MemoizedTransform;
pub use strategy::{FnTransform, IdentityTransform, TransformStrategy};
