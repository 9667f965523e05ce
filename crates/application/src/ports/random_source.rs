//! Random source port
//!
//! Abstracts the uniform sampler used for probabilistic fault firing so
//! tests can force or suppress a roll.

use std::fmt;

/// Source of uniform samples in `[0, 1)`
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Draw one sample in `[0, 1)`
    fn next_unit(&self) -> f64;
}
