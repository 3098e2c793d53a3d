//! # spelunk-core
//!
//! Type indexing primitives for the Spelunk debugger.
//!
//! This crate implements the registry that maps named source-language types
//! of an inspected program to canonical descriptors, including:
//! - A catalogue of the C primitive types with word-size-aware fallbacks
//! - Content-addressed interning of pointer and array types
//! - A pluggable finder chain backed by the program's debug info
//! - A member cache that flattens anonymous nested aggregates
//!
//! What it deliberately does not do: parse debug info (that is a finder's
//! job), read target memory, or evaluate expressions. Those layers sit above
//! this crate and consume it through [`TypeIndex`].
//!
//! ## Quick Start
//!
//! ```rust
//! use spelunk_core::types::PrimitiveKind;
//! use spelunk_core::TypeIndex;
//!
//! fn main() -> spelunk_core::SpelunkResult<()>
//! {
//!     let mut index = TypeIndex::new();
//!     index.set_word_size(8)?;
//!
//!     // No debug info registered, so this resolves to the built-in default.
//!     let long = index.find_primitive(PrimitiveKind::Long)?;
//!     assert_eq!(long.size(), Some(8));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod finder;
pub mod index;
pub mod prelude;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorCategory, SpelunkError, SpelunkResult};
pub use finder::TypeFinder;
pub use index::{MemberValue, TypeIndex};
