//! Tests for error display and classification

use spelunk_core::error::{ErrorCategory, SpelunkError};
use spelunk_core::types::{Type, TypeKind};

#[test]
fn test_type_not_found_display()
{
    let error = SpelunkError::type_not_found(TypeKind::Struct, "task_struct", None);
    assert_eq!(error.to_string(), "could not find 'struct task_struct'");
}

#[test]
fn test_type_not_found_with_filename_display()
{
    let error = SpelunkError::type_not_found(TypeKind::Union, "sigval", Some("signal.c"));
    assert_eq!(error.to_string(), "could not find 'union sigval' in 'signal.c'");
}

#[test]
fn test_member_not_found_display()
{
    let ty = Type::incomplete_struct(Some("pid"));
    let error = SpelunkError::member_not_found(&ty, "numbers");
    assert_eq!(error.to_string(), "'struct pid' has no member 'numbers'");
}

#[test]
fn test_kind_mismatch_display()
{
    let error = SpelunkError::KindMismatch {
        expected: TypeKind::Enum,
        found: TypeKind::Struct,
    };
    let message = error.to_string();
    assert!(message.contains("enum"));
    assert!(message.contains("struct"));
}

#[test]
fn test_not_aggregate_display()
{
    let error = SpelunkError::NotAggregate {
        type_name: "int".to_string(),
    };
    assert_eq!(error.to_string(), "'int' is not a structure or union");
}

#[test]
fn test_invalid_argument_display()
{
    let error = SpelunkError::InvalidArgument("word size has not been set".to_string());
    let message = error.to_string();
    assert!(message.contains("invalid argument"));
    assert!(message.contains("word size"));
}

#[test]
fn test_error_categories()
{
    let ty = Type::incomplete_struct(Some("pid"));

    assert_eq!(
        SpelunkError::type_not_found(TypeKind::Struct, "pid", None).category(),
        ErrorCategory::Lookup
    );
    assert_eq!(
        SpelunkError::member_not_found(&ty, "level").category(),
        ErrorCategory::Lookup
    );
    assert_eq!(
        SpelunkError::KindMismatch {
            expected: TypeKind::Enum,
            found: TypeKind::Struct,
        }
        .category(),
        ErrorCategory::Type
    );
    assert_eq!(
        SpelunkError::NotAggregate {
            type_name: "int".to_string(),
        }
        .category(),
        ErrorCategory::Type
    );
    assert_eq!(
        SpelunkError::InvalidArgument("word size".to_string()).category(),
        ErrorCategory::InvalidArgument
    );
    assert_eq!(
        SpelunkError::from(std::io::Error::other("debug info unreadable")).category(),
        ErrorCategory::Io
    );
}
