//! Geometric primitives for hit testing

pub mod primitives;

pub use primitives::{BoundingSphere, Ray};
