//! Tests for type descriptors and their accessors

use std::sync::Arc;

use spelunk_core::types::{underlying, Enumerator, Member, PrimitiveKind, QualifiedType, Qualifiers, Type, TypeKind};

#[test]
fn test_int_type_attributes()
{
    let ty = Type::int("int", 4, true);
    assert_eq!(ty.kind(), TypeKind::Int);
    assert_eq!(ty.name(), Some("int"));
    assert_eq!(ty.size(), Some(4));
    assert_eq!(ty.is_signed(), Some(true));
    assert!(ty.is_complete());
}

#[test]
fn test_unsigned_int_type()
{
    let ty = Type::int("unsigned int", 4, false);
    assert_eq!(ty.is_signed(), Some(false));
    assert_eq!(ty.primitive(), Some(PrimitiveKind::UnsignedInt));
}

#[test]
fn test_bool_and_float_types()
{
    let boolean = Type::boolean("_Bool", 1);
    assert_eq!(boolean.kind(), TypeKind::Bool);
    assert_eq!(boolean.size(), Some(1));
    assert_eq!(boolean.primitive(), Some(PrimitiveKind::Bool));

    let double = Type::float("double", 8);
    assert_eq!(double.kind(), TypeKind::Float);
    assert_eq!(double.size(), Some(8));
    assert_eq!(double.primitive(), Some(PrimitiveKind::Double));
}

#[test]
fn test_primitive_classification_from_name()
{
    assert_eq!(Type::int("long", 8, true).primitive(), Some(PrimitiveKind::Long));
    assert_eq!(Type::int("signed long int", 8, true).primitive(), Some(PrimitiveKind::Long));
    assert_eq!(
        Type::int("unsigned long", 8, false).primitive(),
        Some(PrimitiveKind::UnsignedLong)
    );
    // Not a known spelling of any integer primitive
    assert_eq!(Type::int("u32", 4, false).primitive(), None);
    // Kind matters: "long" names an int primitive, not a float
    assert_eq!(Type::float("long", 8).primitive(), None);
}

#[test]
fn test_typedef_classification()
{
    let ulong = Type::int("unsigned long", 8, false);
    let size_t = Type::typedef("size_t", QualifiedType::new(ulong));
    assert_eq!(size_t.kind(), TypeKind::Typedef);
    assert_eq!(size_t.primitive(), Some(PrimitiveKind::SizeT));

    let other = Type::typedef("u64", QualifiedType::new(Type::int("unsigned long", 8, false)));
    assert_eq!(other.primitive(), None);
}

#[test]
fn test_void_type_is_shared()
{
    let a = Type::void();
    let b = Type::void();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.kind(), TypeKind::Void);
    assert_eq!(a.primitive(), Some(PrimitiveKind::Void));
    assert!(!a.is_complete());
}

#[test]
fn test_struct_type_members()
{
    let int = Type::int("int", 4, true);
    let ty = Type::struct_type(
        Some("point"),
        8,
        vec![
            Member::named("x", QualifiedType::new(int.clone()), 0),
            Member::named("y", QualifiedType::new(int), 32),
        ],
    );
    assert_eq!(ty.kind(), TypeKind::Struct);
    assert_eq!(ty.name(), Some("point"));
    assert_eq!(ty.size(), Some(8));
    assert!(ty.is_complete());
    assert!(ty.has_members());
    assert_eq!(ty.members().len(), 2);
    assert_eq!(ty.members()[1].name.as_deref(), Some("y"));
    assert_eq!(ty.members()[1].bit_offset, 32);
}

#[test]
fn test_incomplete_struct()
{
    let ty = Type::incomplete_struct(Some("opaque"));
    assert!(!ty.is_complete());
    assert_eq!(ty.size(), None);
    assert!(ty.has_members());
    assert!(ty.members().is_empty());
}

#[test]
fn test_union_type()
{
    let int = Type::int("int", 4, true);
    let float = Type::float("float", 4);
    let ty = Type::union_type(
        None,
        4,
        vec![
            Member::named("i", QualifiedType::new(int), 0),
            Member::named("f", QualifiedType::new(float), 0),
        ],
    );
    assert_eq!(ty.kind(), TypeKind::Union);
    assert_eq!(ty.name(), None);
    assert!(ty.has_members());
}

#[test]
fn test_enum_type()
{
    let int = Type::int("int", 4, true);
    let ty = Type::enum_type(
        Some("color"),
        int,
        vec![Enumerator::signed("RED", 0), Enumerator::signed("BLUE", 1)],
    );
    assert_eq!(ty.kind(), TypeKind::Enum);
    assert!(ty.is_complete());
    assert_eq!(ty.size(), Some(4));
    assert_eq!(ty.enumerators().len(), 2);
    assert_eq!(ty.enumerators()[0].name, "RED");

    let incomplete = Type::incomplete_enum(Some("color"));
    assert!(!incomplete.is_complete());
    assert_eq!(incomplete.size(), None);
}

#[test]
fn test_typedef_size_follows_alias()
{
    let long = Type::int("long", 8, true);
    let alias = Type::typedef("word_t", QualifiedType::new(long));
    assert_eq!(alias.size(), Some(8));
}

#[test]
fn test_underlying_follows_typedef_chain()
{
    let int = Type::int("int", 4, true);
    let inner = Type::typedef("s32", QualifiedType::new(int.clone()));
    let outer = Type::typedef("my_s32", QualifiedType::new(inner));

    assert!(Arc::ptr_eq(&underlying(&outer), &int));
    assert!(Arc::ptr_eq(&underlying(&int), &int));
}

#[test]
fn test_function_type()
{
    let void = Type::void();
    let ty = Type::function(QualifiedType::new(void), Vec::new(), true);
    assert_eq!(ty.kind(), TypeKind::Function);
    assert!(ty.is_variadic());
    assert!(ty.parameters().is_empty());
    assert_eq!(ty.return_type().map(|ret| ret.ty.kind()), Some(TypeKind::Void));
}

#[test]
fn test_member_constructors()
{
    let int = Type::int("int", 4, true);
    let named = Member::named("count", QualifiedType::new(int.clone()), 64);
    assert_eq!(named.name.as_deref(), Some("count"));
    assert_eq!(named.bit_offset, 64);
    assert_eq!(named.bit_field_size, 0);

    let field = Member::bit_field("flags", QualifiedType::new(int.clone()), 96, 3);
    assert_eq!(field.bit_field_size, 3);

    let anon = Member::anonymous(QualifiedType::new(int), 128);
    assert_eq!(anon.name, None);
}

#[test]
fn test_qualifiers_display()
{
    assert_eq!(Qualifiers::empty().to_string(), "");
    assert_eq!(Qualifiers::CONST.to_string(), "const");
    assert_eq!((Qualifiers::CONST | Qualifiers::VOLATILE).to_string(), "const volatile");
}

#[test]
fn test_type_display()
{
    let int = Type::int("int", 4, true);
    assert_eq!(int.to_string(), "int");
    assert_eq!(Type::void().to_string(), "void");
    assert_eq!(Type::incomplete_struct(Some("task_struct")).to_string(), "struct task_struct");
    assert_eq!(Type::incomplete_union(None).to_string(), "union <anonymous>");

    let qualified = QualifiedType::with_qualifiers(int, Qualifiers::CONST);
    assert_eq!(qualified.to_string(), "const int");
}

#[test]
fn test_kind_spellings()
{
    assert_eq!(TypeKind::Struct.spelling(), "struct");
    assert_eq!(TypeKind::Enum.to_string(), "enum");
    assert_eq!(TypeKind::Typedef.spelling(), "typedef");
}

#[test]
fn test_primitive_spellings()
{
    assert_eq!(PrimitiveKind::Long.spelling(), "long");
    assert!(PrimitiveKind::Long.spellings().contains(&"signed long int"));
    assert_eq!(PrimitiveKind::SizeT.kind(), TypeKind::Typedef);
    assert_eq!(PrimitiveKind::Bool.kind(), TypeKind::Bool);
    assert_eq!(PrimitiveKind::LongDouble.kind(), TypeKind::Float);
}
