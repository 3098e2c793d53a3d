//! Primitive type resolution.
//!
//! The finder chain reflects the inspected program's actual debug info; the
//! static defaults apply when the debug info is silent. `long` and `unsigned
//! long` adapt to the target word size, and `size_t`/`ptrdiff_t` are
//! synthesised as typedefs of whichever debug-info integer type matches the
//! word size.

use std::sync::Arc;

use tracing::debug;

use super::TypeIndex;
use crate::error::{SpelunkError, SpelunkResult};
use crate::types::{default_primitive, long_32bit, PrimitiveKind, QualifiedType, Type};

impl TypeIndex
{
    /// Resolve a C primitive to its canonical descriptor.
    ///
    /// Each primitive is resolved once and cached: the first call consults
    /// the finder chain under every known spelling, validates that the
    /// returned descriptor actually classifies as the requested primitive,
    /// and otherwise falls back to the shared defaults. Subsequent calls
    /// return the identical descriptor.
    ///
    /// ## Errors
    ///
    /// - `InvalidArgument` when resolving `long`, `unsigned long`, `size_t`,
    ///   or `ptrdiff_t` while the word size is unset, or when no integer type
    ///   of the word size exists to synthesise `size_t`/`ptrdiff_t` from.
    /// - Any error a finder reports is propagated unchanged.
    pub fn find_primitive(&self, kind: PrimitiveKind) -> SpelunkResult<Arc<Type>>
    {
        if let Some(ty) = self.primitives.borrow()[kind.index()].clone() {
            return Ok(ty);
        }

        let ty = self.resolve_primitive(kind)?;

        // A re-entrant resolution may have filled the slot first; the first
        // descriptor in wins so repeated calls stay identical.
        let mut primitives = self.primitives.borrow_mut();
        let slot = &mut primitives[kind.index()];
        if let Some(existing) = slot {
            return Ok(existing.clone());
        }
        *slot = Some(ty.clone());
        Ok(ty)
    }

    fn resolve_primitive(&self, kind: PrimitiveKind) -> SpelunkResult<Arc<Type>>
    {
        if kind == PrimitiveKind::Void {
            return Ok(Type::void());
        }

        if let Some(ty) = self.find_primitive_from_finders(kind)? {
            return Ok(ty);
        }

        // long and unsigned long default to the word size.
        if matches!(kind, PrimitiveKind::Long | PrimitiveKind::UnsignedLong) {
            let word_size = self.word_size().ok_or_else(SpelunkError::word_size_unset)?;
            if word_size == 4 {
                if let Some(ty) = long_32bit(kind) {
                    return Ok(ty);
                }
            }
        }

        // size_t and ptrdiff_t become typedefs of whichever debug-info
        // integer type matches the word size.
        if matches!(kind, PrimitiveKind::SizeT | PrimitiveKind::PtrdiffT) {
            return self.synthesise_word_sized_typedef(kind);
        }

        debug!(primitive = kind.spelling(), "falling back to default descriptor");
        default_primitive(kind)
            .ok_or_else(|| SpelunkError::InvalidArgument(format!("no default type for {}", kind.spelling())))
    }

    /// Look up every spelling of `kind` against the finder chain, accepting
    /// only descriptors whose primitive classification matches.
    fn find_primitive_from_finders(&self, kind: PrimitiveKind) -> SpelunkResult<Option<Arc<Type>>>
    {
        for spelling in kind.spellings() {
            if let Some(qualified) = self.find_from_finders(kind.kind(), spelling, None)? {
                if qualified.ty.primitive() == Some(kind) {
                    return Ok(Some(qualified.ty));
                }
            }
        }
        Ok(None)
    }

    fn synthesise_word_sized_typedef(&self, kind: PrimitiveKind) -> SpelunkResult<Arc<Type>>
    {
        const UNSIGNED_CANDIDATES: [PrimitiveKind; 3] = [
            PrimitiveKind::UnsignedLong,
            PrimitiveKind::UnsignedLongLong,
            PrimitiveKind::UnsignedInt,
        ];
        const SIGNED_CANDIDATES: [PrimitiveKind; 3] =
            [PrimitiveKind::Long, PrimitiveKind::LongLong, PrimitiveKind::Int];

        let word_size = self.word_size().ok_or_else(SpelunkError::word_size_unset)?;
        let candidates = if kind == PrimitiveKind::SizeT {
            UNSIGNED_CANDIDATES
        } else {
            SIGNED_CANDIDATES
        };

        for candidate in candidates {
            if let Some(ty) = self.find_primitive_from_finders(candidate)? {
                if ty.size() == Some(word_size) {
                    debug!(primitive = kind.spelling(), aliased = %ty, "synthesising typedef");
                    return Ok(Type::typedef(kind.spelling(), QualifiedType::new(ty)));
                }
            }
        }
        Err(SpelunkError::InvalidArgument(format!(
            "no suitable integer type for {}",
            kind.spelling()
        )))
    }
}
