//! Common module for library exports

pub use crate::error::{ErrorCategory, SpelunkError, SpelunkResult};
pub use crate::finder::TypeFinder;
pub use crate::index::{MemberValue, TypeIndex};
pub use crate::types::{
    underlying, Enumerator, EnumeratorValue, Member, Parameter, PrimitiveKind, QualifiedType, Qualifiers, Type,
    TypeKind,
};
