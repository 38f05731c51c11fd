//! A uniform "process" capability over the DSP primitives.
//!
//! Anything that produces samples is a [`Source`]; anything that transforms
//! them is a [`Processor`]. The `extensions` module adds fluent helpers so
//! units chain without boilerplate.

/// Multiply two sources (amplitude or ring modulation).
pub mod amplify;
/// Fluent combinators (`.through()`, `.amplify()`, `.then()`).
pub mod extensions;
/// Core traits and their impls for every primitive.
pub mod node;
/// Serial chaining of two units.
pub mod through;

pub use extensions::{ProcessorExt, SourceExt};
pub use node::{Processor, Source};
