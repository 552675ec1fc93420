//! Common utilities for integration tests

pub mod fixtures;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{
    classic_three_by_three,
    singular_system,
    two_by_two,
    zero_leading_pivot,
    PanickingEngine,
    SlowEngine,
};
pub use test_helpers::{assert_vectors_close, max_residual};
