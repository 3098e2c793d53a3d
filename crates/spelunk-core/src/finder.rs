//! # Type Finders
//!
//! A finder resolves a named type against some backing source: parsed debug
//! info, a synthetic table in tests, or another index. Finders are registered
//! on a [`TypeIndex`] and consulted newest-first (LIFO) until one claims the
//! name or one fails.
//!
//! ## Contract
//!
//! - Return `Ok(None)` to mean "not mine, try the next finder".
//! - Return `Ok(Some(..))` only with a descriptor whose kind equals the
//!   requested `kind`; the index rejects mismatches as a type error.
//! - Treat `filename == None` as "any translation unit". A finder that needs
//!   a filename and was given none should return `Ok(None)`.
//! - Re-entrant *queries* on the index are allowed (for example, interning a
//!   pointer type while building a function type). Mutations are not, and the
//!   signatures enforce that: every mutating index operation takes
//!   `&mut TypeIndex`, which cannot exist while a finder runs.

use crate::error::SpelunkResult;
use crate::index::TypeIndex;
use crate::types::{QualifiedType, TypeKind};

/// Resolves named types from an external backing source.
pub trait TypeFinder
{
    /// Look up `name` as a type of the given `kind`, optionally restricted to
    /// the translation unit `filename`.
    fn find_type(
        &self,
        index: &TypeIndex,
        kind: TypeKind,
        name: &str,
        filename: Option<&str>,
    ) -> SpelunkResult<Option<QualifiedType>>;
}

/// Any matching closure is a finder. Handy for tests and synthetic types.
impl<F> TypeFinder for F
where
    F: Fn(&TypeIndex, TypeKind, &str, Option<&str>) -> SpelunkResult<Option<QualifiedType>>,
{
    fn find_type(
        &self,
        index: &TypeIndex,
        kind: TypeKind,
        name: &str,
        filename: Option<&str>,
    ) -> SpelunkResult<Option<QualifiedType>>
    {
        self(index, kind, name, filename)
    }
}
