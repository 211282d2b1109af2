//! Core types for scanner registration.
//!
//! - [`Point`]: integer beacon coordinates with exact distance arithmetic
//! - [`Transform`]: discrete axis-aligned pose (permutation, signs,
//!   translation)

mod point;
mod transform;

pub use point::Point;
pub use transform::Transform;
