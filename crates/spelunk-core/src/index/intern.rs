//! Pointer and array interning.
//!
//! The intern tables compare the referenced type by identity, not by value:
//! every type that can be a referent is itself either a shared primitive, an
//! interned derived type, or a finder-owned named type that the finder
//! canonicalises. Keys embed an `Arc` to the referent, so an identity can
//! never be reused while its table entry exists.

use std::collections::hash_map::Entry;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::trace;

use super::TypeIndex;
use crate::error::{SpelunkError, SpelunkResult};
use crate::types::{QualifiedType, Qualifiers, Type};

/// Hashes and compares by descriptor identity rather than by structure.
#[derive(Debug, Clone)]
pub(crate) struct IdentityKey(Arc<Type>);

impl IdentityKey
{
    pub(crate) fn new(ty: &Arc<Type>) -> Self
    {
        Self(ty.clone())
    }
}

impl PartialEq for IdentityKey
{
    fn eq(&self, other: &Self) -> bool
    {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for IdentityKey {}

impl Hash for IdentityKey
{
    fn hash<H: Hasher>(&self, state: &mut H)
    {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct PointerKey
{
    referenced: IdentityKey,
    qualifiers: Qualifiers,
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct ArrayKey
{
    element: IdentityKey,
    qualifiers: Qualifiers,
    /// `None` for incomplete arrays; all incomplete arrays over the same
    /// element compare equal.
    length: Option<u64>,
}

impl TypeIndex
{
    /// The canonical pointer type referencing `referenced`.
    ///
    /// Returns the existing descriptor when one was already interned for the
    /// same referenced type and qualifiers, and creates an index-owned one
    /// otherwise.
    ///
    /// ## Errors
    ///
    /// `InvalidArgument` if the word size has not been set.
    pub fn pointer_type(&self, referenced: QualifiedType) -> SpelunkResult<Arc<Type>>
    {
        let Some(word_size) = self.word_size() else {
            return Err(SpelunkError::word_size_unset());
        };

        let key = PointerKey {
            referenced: IdentityKey::new(&referenced.ty),
            qualifiers: referenced.qualifiers,
        };
        match self.pointers.borrow_mut().entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                trace!(referenced = %referenced, "interning pointer type");
                Ok(entry.insert(Type::pointer(word_size, referenced)).clone())
            }
        }
    }

    /// The canonical array type of `length` elements of `element`.
    pub fn array_type(&self, length: u64, element: QualifiedType) -> SpelunkResult<Arc<Type>>
    {
        self.intern_array(Some(length), element)
    }

    /// The canonical incomplete array type over `element`.
    ///
    /// An incomplete array has no length and is distinct from every complete
    /// array, including a zero-length one.
    pub fn incomplete_array_type(&self, element: QualifiedType) -> SpelunkResult<Arc<Type>>
    {
        self.intern_array(None, element)
    }

    fn intern_array(&self, length: Option<u64>, element: QualifiedType) -> SpelunkResult<Arc<Type>>
    {
        let key = ArrayKey {
            element: IdentityKey::new(&element.ty),
            qualifiers: element.qualifiers,
            length,
        };
        match self.arrays.borrow_mut().entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                trace!(element = %element, length, "interning array type");
                Ok(entry.insert(Type::array(length, element)).clone())
            }
        }
    }
}
