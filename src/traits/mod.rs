//! Core traits consumed by the autowiring passes.

mod resolver;

pub use resolver::{ReferenceResolver, References};
