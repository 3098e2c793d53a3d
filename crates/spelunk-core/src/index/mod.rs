//! # Type Index
//!
//! The in-memory registry that resolves named types of an inspected program
//! to canonical descriptors and constructs derived types on demand.
//!
//! The index owns three caches:
//! - the primitive table, filled lazily by [`TypeIndex::find_primitive`];
//! - the pointer and array intern tables, which guarantee one canonical
//!   descriptor per logical derived type;
//! - the member cache, which flattens anonymous nested aggregates on first
//!   member lookup into a struct or union.
//!
//! ## Usage
//!
//! ```rust
//! use spelunk_core::types::{QualifiedType, Type};
//! use spelunk_core::TypeIndex;
//!
//! fn main() -> spelunk_core::SpelunkResult<()>
//! {
//!     let mut index = TypeIndex::new();
//!     index.set_word_size(8)?;
//!
//!     // Same referenced type, same descriptor.
//!     let int = Type::int("int", 4, true);
//!     let a = index.pointer_type(QualifiedType::new(int.clone()))?;
//!     let b = index.pointer_type(QualifiedType::new(int))?;
//!     assert!(std::sync::Arc::ptr_eq(&a, &b));
//!     Ok(())
//! }
//! ```
//!
//! ## Thread Safety
//!
//! The index is single-threaded: queries take `&self` and use interior
//! mutability for the caches, so a finder callback can issue re-entrant
//! queries, but the type is deliberately not `Sync`. Callers that need
//! concurrent access must serialise above the index.

mod intern;
mod members;
mod primitive;

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

pub use members::MemberValue;

use self::intern::{ArrayKey, IdentityKey, PointerKey};
use crate::error::{SpelunkError, SpelunkResult};
use crate::finder::TypeFinder;
use crate::types::{PrimitiveKind, QualifiedType, Type, TypeKind};

/// The type index for one inspected program image.
///
/// Derived-type descriptors and member-cache entries created through this
/// index live as long as the index. Descriptors returned by finders are owned
/// by the finder's backing store; registering a finder hands the store to the
/// index, so the lifetimes line up by construction.
pub struct TypeIndex
{
    /// Registered finders; the chain is consulted from the back (LIFO).
    finders: Vec<Box<dyn TypeFinder>>,
    /// Target word size in bytes (4 or 8), unset until configured.
    word_size: Option<u64>,
    /// Resolved primitives, indexed by `PrimitiveKind`.
    primitives: RefCell<[Option<Arc<Type>>; PrimitiveKind::COUNT]>,
    /// Canonical pointer descriptors keyed by referenced type identity.
    pointers: RefCell<HashMap<PointerKey, Arc<Type>>>,
    /// Canonical array descriptors keyed by element identity and length.
    arrays: RefCell<HashMap<ArrayKey, Arc<Type>>>,
    /// Flattened member tables keyed by the identity of the underlying
    /// aggregate. Presence of an entry means the aggregate is fully cached
    /// and a missing name is authoritative.
    members: RefCell<HashMap<IdentityKey, HashMap<String, MemberValue>>>,
}

impl TypeIndex
{
    /// Create an empty index: no finders, no cached types, word size unset.
    #[must_use]
    pub fn new() -> Self
    {
        Self {
            finders: Vec::new(),
            word_size: None,
            primitives: RefCell::new(std::array::from_fn(|_| None)),
            pointers: RefCell::new(HashMap::new()),
            arrays: RefCell::new(HashMap::new()),
            members: RefCell::new(HashMap::new()),
        }
    }

    /// The configured word size in bytes, if set.
    #[must_use]
    pub fn word_size(&self) -> Option<u64>
    {
        self.word_size
    }

    /// Set the target word size in bytes.
    ///
    /// The word size determines the size of interned pointer types and the
    /// fallback sizes of `long`, `unsigned long`, `size_t`, and `ptrdiff_t`.
    ///
    /// ## Errors
    ///
    /// `InvalidArgument` unless `bytes` is 4 or 8.
    pub fn set_word_size(&mut self, bytes: u64) -> SpelunkResult<()>
    {
        if bytes != 4 && bytes != 8 {
            return Err(SpelunkError::InvalidArgument(format!(
                "word size must be 4 or 8, not {bytes}"
            )));
        }
        self.word_size = Some(bytes);
        Ok(())
    }

    /// Register a finder. Later registrations take priority over earlier
    /// ones.
    pub fn add_finder(&mut self, finder: impl TypeFinder + 'static)
    {
        self.finders.push(Box::new(finder));
    }

    /// Unregister the most recently added finder. Does nothing if no finder
    /// is registered.
    pub fn remove_finder(&mut self)
    {
        self.finders.pop();
    }

    /// Resolve a named type.
    ///
    /// Consults the finder chain newest-first. `filename`, when given,
    /// restricts the lookup to one translation unit; `None` means any.
    ///
    /// ## Errors
    ///
    /// - `TypeNotFound` when no finder claims the name.
    /// - `KindMismatch` when a finder returns the wrong kind of type.
    /// - Any error a finder reports is propagated unchanged.
    pub fn find(&self, kind: TypeKind, name: &str, filename: Option<&str>) -> SpelunkResult<QualifiedType>
    {
        match self.find_from_finders(kind, name, filename)? {
            Some(qualified) => Ok(qualified),
            None => Err(SpelunkError::type_not_found(kind, name, filename)),
        }
    }

    /// Run the finder chain; `Ok(None)` means no finder claimed the name.
    pub(crate) fn find_from_finders(
        &self,
        kind: TypeKind,
        name: &str,
        filename: Option<&str>,
    ) -> SpelunkResult<Option<QualifiedType>>
    {
        for finder in self.finders.iter().rev() {
            if let Some(qualified) = finder.find_type(self, kind, name, filename)? {
                if qualified.ty.kind() != kind {
                    return Err(SpelunkError::KindMismatch {
                        expected: kind,
                        found: qualified.ty.kind(),
                    });
                }
                return Ok(Some(qualified));
            }
        }
        Ok(None)
    }
}

impl Default for TypeIndex
{
    fn default() -> Self
    {
        Self::new()
    }
}
