//! # Error Types
//!
//! Error handling for the type index.
//!
//! Every fallible operation in this crate returns [`SpelunkResult`]. The error
//! enum is deliberately small: consumers that probe for alternative structure
//! shapes (a lookup that may legitimately miss) need to tell a missing name
//! apart from a structural mismatch, and [`SpelunkError::category`] gives them
//! that distinction without matching on individual variants.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::types::{Type, TypeKind};

/// Broad classification of a [`SpelunkError`].
///
/// Lookup errors are the only recoverable ones in practice: a consumer that
/// supports several revisions of an inspected program tries one member name,
/// and on `Lookup` falls back to the next shape. `Type` and `InvalidArgument`
/// indicate a bug or a misconfigured index and should be propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory
{
    /// A named type or member was not found.
    Lookup,
    /// A structural mismatch (wrong kind of type, member access on a scalar).
    Type,
    /// A precondition was violated (word size unset or invalid).
    InvalidArgument,
    /// An I/O failure surfaced by a finder's backing store.
    Io,
}

/// Main error type for type index operations.
#[derive(Error, Debug)]
pub enum SpelunkError
{
    /// No registered finder could resolve the named type.
    ///
    /// Carries the kind spelling ("struct", "union", ...), the name that was
    /// requested, and the translation unit filter if one was supplied.
    #[error("{}", fmt_type_not_found(.kind, .name, .filename))]
    TypeNotFound
    {
        /// The kind of type that was requested.
        kind: TypeKind,
        /// The name that could not be resolved.
        name: String,
        /// The translation unit the lookup was restricted to, if any.
        filename: Option<String>,
    },

    /// A structure or union has no member with the requested name.
    #[error("'{type_name}' has no member '{member}'")]
    MemberNotFound
    {
        /// Rendering of the containing type.
        type_name: String,
        /// The member name that was requested.
        member: String,
    },

    /// A finder returned a descriptor of a different kind than requested.
    #[error("type finder returned {found} when {expected} was requested")]
    KindMismatch
    {
        /// The kind the caller asked for.
        expected: TypeKind,
        /// The kind the finder actually produced.
        found: TypeKind,
    },

    /// A member lookup was attempted on a type that cannot have members.
    #[error("'{type_name}' is not a structure or union")]
    NotAggregate
    {
        /// Rendering of the offending type.
        type_name: String,
    },

    /// A precondition was violated (for example, the word size is unset).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O error from a finder's backing store (debug info files, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SpelunkError
{
    /// Classify this error for fallback decisions.
    #[must_use]
    pub fn category(&self) -> ErrorCategory
    {
        match self {
            SpelunkError::TypeNotFound { .. } | SpelunkError::MemberNotFound { .. } => ErrorCategory::Lookup,
            SpelunkError::KindMismatch { .. } | SpelunkError::NotAggregate { .. } => ErrorCategory::Type,
            SpelunkError::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            SpelunkError::Io(_) => ErrorCategory::Io,
        }
    }

    /// Build the lookup error for a failed named-type resolution.
    #[must_use]
    pub fn type_not_found(kind: TypeKind, name: &str, filename: Option<&str>) -> Self
    {
        SpelunkError::TypeNotFound {
            kind,
            name: name.to_owned(),
            filename: filename.map(str::to_owned),
        }
    }

    /// Build the lookup error for a member that does not exist in `ty`.
    #[must_use]
    pub fn member_not_found(ty: &Arc<Type>, member: &str) -> Self
    {
        SpelunkError::MemberNotFound {
            type_name: ty.to_string(),
            member: member.to_owned(),
        }
    }

    pub(crate) fn word_size_unset() -> Self
    {
        SpelunkError::InvalidArgument("word size has not been set".to_owned())
    }
}

fn fmt_type_not_found(kind: &TypeKind, name: &str, filename: &Option<String>) -> String
{
    match filename {
        Some(filename) => format!("could not find '{} {}' in '{}'", kind.spelling(), name, filename),
        None => format!("could not find '{} {}'", kind.spelling(), name),
    }
}

/// Convenience alias for `Result<T, SpelunkError>`.
pub type SpelunkResult<T> = std::result::Result<T, SpelunkError>;
