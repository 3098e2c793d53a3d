//! # Type Descriptors
//!
//! Canonical descriptors for source-language (C family) types.
//!
//! A [`Type`] describes one type of the inspected program: its kind (int,
//! struct, pointer, ...) and the kind-specific attributes (byte size, members,
//! referenced type, ...). Descriptors are immutable once constructed and are
//! shared as `Arc<Type>`; two descriptors are "the same type" exactly when the
//! `Arc`s point at the same allocation. The index in [`crate::index`] relies
//! on that identity for O(1) comparisons and for interning derived types.
//!
//! Descriptors are immutable, so a self-referential aggregate (a linked list
//! node) points at the incomplete forward declaration of its own name; the
//! consumer re-resolves that name when it dereferences the pointer, exactly
//! as it would for any other incomplete type in debug info.

mod primitive;

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

pub use primitive::PrimitiveKind;
pub(crate) use primitive::{default_primitive, long_32bit, void_type};

bitflags! {
    /// C type qualifiers attached to one use of a type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Qualifiers: u32 {
        /// `const`
        const CONST = 1 << 0;
        /// `volatile`
        const VOLATILE = 1 << 1;
        /// `restrict`
        const RESTRICT = 1 << 2;
        /// `_Atomic`
        const ATOMIC = 1 << 3;
    }
}

impl fmt::Display for Qualifiers
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        static SPELLINGS: [(Qualifiers, &str); 4] = [
            (Qualifiers::CONST, "const"),
            (Qualifiers::VOLATILE, "volatile"),
            (Qualifiers::RESTRICT, "restrict"),
            (Qualifiers::ATOMIC, "_Atomic"),
        ];

        let mut first = true;
        for (flag, spelling) in SPELLINGS {
            if self.contains(flag) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(spelling)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Top-level category of a [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind
{
    /// `void`
    Void,
    /// Integer types (`int`, `unsigned long`, `char`, ...).
    Int,
    /// `_Bool`
    Bool,
    /// Floating-point types (`float`, `double`, `long double`).
    Float,
    /// Structure types.
    Struct,
    /// Union types.
    Union,
    /// Enumerated types.
    Enum,
    /// Typedefs (aliases of a qualified type).
    Typedef,
    /// Pointer types.
    Pointer,
    /// Array types, complete or incomplete.
    Array,
    /// Function types.
    Function,
}

impl TypeKind
{
    /// The spelling used when naming this kind in messages ("struct", ...).
    #[must_use]
    pub const fn spelling(self) -> &'static str
    {
        match self {
            TypeKind::Void => "void",
            TypeKind::Int => "int",
            TypeKind::Bool => "bool",
            TypeKind::Float => "float",
            TypeKind::Struct => "struct",
            TypeKind::Union => "union",
            TypeKind::Enum => "enum",
            TypeKind::Typedef => "typedef",
            TypeKind::Pointer => "pointer",
            TypeKind::Array => "array",
            TypeKind::Function => "function",
        }
    }
}

impl fmt::Display for TypeKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.spelling())
    }
}

/// A type together with the qualifiers of one particular use of it.
///
/// Qualifiers belong to the *use* of a type, not to the descriptor itself:
/// `const int` and `int` share one `int` descriptor. Two qualified types are
/// interchangeable when their descriptors are identical (`Arc::ptr_eq`) and
/// their qualifier sets are equal.
#[derive(Debug, Clone)]
pub struct QualifiedType
{
    /// The canonical type descriptor.
    pub ty: Arc<Type>,
    /// Qualifiers applied to this use of the type.
    pub qualifiers: Qualifiers,
}

impl QualifiedType
{
    /// Wrap a descriptor with no qualifiers.
    #[must_use]
    pub fn new(ty: Arc<Type>) -> Self
    {
        Self {
            ty,
            qualifiers: Qualifiers::empty(),
        }
    }

    /// Wrap a descriptor with an explicit qualifier set.
    #[must_use]
    pub fn with_qualifiers(ty: Arc<Type>, qualifiers: Qualifiers) -> Self
    {
        Self { ty, qualifiers }
    }

    /// The type reached by following any chain of typedefs.
    #[must_use]
    pub fn underlying(&self) -> Arc<Type>
    {
        underlying(&self.ty)
    }
}

impl fmt::Display for QualifiedType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if self.qualifiers.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.qualifiers, self.ty)
        }
    }
}

/// The type reached from `ty` by following any chain of typedefs.
///
/// Qualifiers on intermediate typedefs are dropped; member lookup and kind
/// checks care about the shape of the type, not how a declaration spelled it.
#[must_use]
pub fn underlying(ty: &Arc<Type>) -> Arc<Type>
{
    let mut ty = ty.clone();
    while let TypeRepr::Typedef { aliased, .. } = &ty.repr {
        let next = aliased.ty.clone();
        ty = next;
    }
    ty
}

/// One member of a structure or union.
///
/// `bit_offset` is relative to the start of the *immediately containing*
/// aggregate; the member cache in [`crate::index`] accumulates offsets when it
/// flattens anonymous members. The member's declared type is kept as-is, so a
/// typedef member stays visible as the typedef.
#[derive(Debug, Clone)]
pub struct Member
{
    /// Member name; `None` for anonymous members (nested anonymous
    /// struct/union, unnamed bit fields).
    pub name: Option<String>,
    /// The member's declared type.
    pub ty: QualifiedType,
    /// Offset in bits from the start of the containing aggregate.
    pub bit_offset: u64,
    /// Width in bits for bit-field members, 0 otherwise.
    pub bit_field_size: u64,
}

impl Member
{
    /// Create a member with every attribute spelled out.
    #[must_use]
    pub fn new(name: Option<String>, ty: QualifiedType, bit_offset: u64, bit_field_size: u64) -> Self
    {
        Self {
            name,
            ty,
            bit_offset,
            bit_field_size,
        }
    }

    /// Create a named, non-bit-field member.
    #[must_use]
    pub fn named(name: &str, ty: QualifiedType, bit_offset: u64) -> Self
    {
        Self::new(Some(name.to_owned()), ty, bit_offset, 0)
    }

    /// Create an anonymous member (an unnamed nested struct or union).
    #[must_use]
    pub fn anonymous(ty: QualifiedType, bit_offset: u64) -> Self
    {
        Self::new(None, ty, bit_offset, 0)
    }

    /// Create a named bit-field member of `bit_field_size` bits.
    #[must_use]
    pub fn bit_field(name: &str, ty: QualifiedType, bit_offset: u64, bit_field_size: u64) -> Self
    {
        Self::new(Some(name.to_owned()), ty, bit_offset, bit_field_size)
    }
}

/// The value of one enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumeratorValue
{
    /// Value of an enumerator with a signed compatible type.
    Signed(i64),
    /// Value of an enumerator with an unsigned compatible type.
    Unsigned(u64),
}

/// One enumerator of an enumerated type.
#[derive(Debug, Clone)]
pub struct Enumerator
{
    /// Enumerator name.
    pub name: String,
    /// Enumerator value in the enum's compatible integer type.
    pub value: EnumeratorValue,
}

impl Enumerator
{
    /// Create an enumerator with a signed value.
    #[must_use]
    pub fn signed(name: &str, value: i64) -> Self
    {
        Self {
            name: name.to_owned(),
            value: EnumeratorValue::Signed(value),
        }
    }

    /// Create an enumerator with an unsigned value.
    #[must_use]
    pub fn unsigned(name: &str, value: u64) -> Self
    {
        Self {
            name: name.to_owned(),
            value: EnumeratorValue::Unsigned(value),
        }
    }
}

/// One parameter of a function type.
#[derive(Debug, Clone)]
pub struct Parameter
{
    /// Parameter name, if the debug info recorded one.
    pub name: Option<String>,
    /// The parameter's declared type.
    pub ty: QualifiedType,
}

/// Kind-specific payload of a descriptor. Private: descriptors are built
/// through the per-kind constructors and inspected through accessors.
#[derive(Debug)]
enum TypeRepr
{
    Void,
    Int
    {
        name: String,
        size: u64,
        is_signed: bool,
        primitive: Option<PrimitiveKind>,
    },
    Bool
    {
        name: String,
        size: u64,
        primitive: Option<PrimitiveKind>,
    },
    Float
    {
        name: String,
        size: u64,
        primitive: Option<PrimitiveKind>,
    },
    Struct
    {
        name: Option<String>,
        size: u64,
        is_complete: bool,
        members: Vec<Member>,
    },
    Union
    {
        name: Option<String>,
        size: u64,
        is_complete: bool,
        members: Vec<Member>,
    },
    Enum
    {
        name: Option<String>,
        compatible: Option<Arc<Type>>,
        enumerators: Vec<Enumerator>,
    },
    Typedef
    {
        name: String,
        aliased: QualifiedType,
        primitive: Option<PrimitiveKind>,
    },
    Pointer
    {
        size: u64, referenced: QualifiedType
    },
    Array
    {
        /// `None` marks an incomplete array.
        length: Option<u64>,
        element: QualifiedType,
    },
    Function
    {
        return_type: QualifiedType,
        parameters: Vec<Parameter>,
        is_variadic: bool,
    },
}

/// A canonical type descriptor.
///
/// See the [module documentation](self) for the identity and sharing rules.
#[derive(Debug)]
pub struct Type
{
    repr: TypeRepr,
}

impl Type
{
    /// The shared `void` descriptor.
    ///
    /// There is exactly one `void` in a process; every call returns the same
    /// descriptor.
    #[must_use]
    pub fn void() -> Arc<Type>
    {
        void_type()
    }

    /// Create an integer type.
    ///
    /// The name is matched against the known spellings of the C integer
    /// primitives to record the descriptor's primitive classification, which
    /// [`crate::index::TypeIndex::find_primitive`] uses to validate finder
    /// results.
    #[must_use]
    pub fn int(name: &str, size: u64, is_signed: bool) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Int {
                name: name.to_owned(),
                size,
                is_signed,
                primitive: PrimitiveKind::from_name(TypeKind::Int, name),
            },
        })
    }

    /// Create a boolean type (`_Bool`).
    #[must_use]
    pub fn boolean(name: &str, size: u64) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Bool {
                name: name.to_owned(),
                size,
                primitive: PrimitiveKind::from_name(TypeKind::Bool, name),
            },
        })
    }

    /// Create a floating-point type.
    #[must_use]
    pub fn float(name: &str, size: u64) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Float {
                name: name.to_owned(),
                size,
                primitive: PrimitiveKind::from_name(TypeKind::Float, name),
            },
        })
    }

    /// Create a complete structure type.
    #[must_use]
    pub fn struct_type(name: Option<&str>, size: u64, members: Vec<Member>) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Struct {
                name: name.map(str::to_owned),
                size,
                is_complete: true,
                members,
            },
        })
    }

    /// Create an incomplete (forward-declared) structure type.
    #[must_use]
    pub fn incomplete_struct(name: Option<&str>) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Struct {
                name: name.map(str::to_owned),
                size: 0,
                is_complete: false,
                members: Vec::new(),
            },
        })
    }

    /// Create a complete union type.
    #[must_use]
    pub fn union_type(name: Option<&str>, size: u64, members: Vec<Member>) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Union {
                name: name.map(str::to_owned),
                size,
                is_complete: true,
                members,
            },
        })
    }

    /// Create an incomplete (forward-declared) union type.
    #[must_use]
    pub fn incomplete_union(name: Option<&str>) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Union {
                name: name.map(str::to_owned),
                size: 0,
                is_complete: false,
                members: Vec::new(),
            },
        })
    }

    /// Create a complete enumerated type with its compatible integer type.
    #[must_use]
    pub fn enum_type(name: Option<&str>, compatible: Arc<Type>, enumerators: Vec<Enumerator>) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Enum {
                name: name.map(str::to_owned),
                compatible: Some(compatible),
                enumerators,
            },
        })
    }

    /// Create an incomplete (forward-declared) enumerated type.
    #[must_use]
    pub fn incomplete_enum(name: Option<&str>) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Enum {
                name: name.map(str::to_owned),
                compatible: None,
                enumerators: Vec::new(),
            },
        })
    }

    /// Create a typedef aliasing `aliased`.
    #[must_use]
    pub fn typedef(name: &str, aliased: QualifiedType) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Typedef {
                name: name.to_owned(),
                aliased,
                primitive: PrimitiveKind::from_name(TypeKind::Typedef, name),
            },
        })
    }

    /// Create a function type.
    #[must_use]
    pub fn function(return_type: QualifiedType, parameters: Vec<Parameter>, is_variadic: bool) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Function {
                return_type,
                parameters,
                is_variadic,
            },
        })
    }

    /// Create a pointer type. Crate-private: canonical pointer descriptors
    /// are minted by [`crate::index::TypeIndex::pointer_type`] so that one
    /// descriptor exists per referenced type.
    pub(crate) fn pointer(size: u64, referenced: QualifiedType) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Pointer { size, referenced },
        })
    }

    /// Create an array type (`length: None` marks an incomplete array).
    /// Crate-private for the same reason as [`Type::pointer`].
    pub(crate) fn array(length: Option<u64>, element: QualifiedType) -> Arc<Type>
    {
        Arc::new(Type {
            repr: TypeRepr::Array { length, element },
        })
    }

    /// The top-level kind of this type.
    #[must_use]
    pub fn kind(&self) -> TypeKind
    {
        match &self.repr {
            TypeRepr::Void => TypeKind::Void,
            TypeRepr::Int { .. } => TypeKind::Int,
            TypeRepr::Bool { .. } => TypeKind::Bool,
            TypeRepr::Float { .. } => TypeKind::Float,
            TypeRepr::Struct { .. } => TypeKind::Struct,
            TypeRepr::Union { .. } => TypeKind::Union,
            TypeRepr::Enum { .. } => TypeKind::Enum,
            TypeRepr::Typedef { .. } => TypeKind::Typedef,
            TypeRepr::Pointer { .. } => TypeKind::Pointer,
            TypeRepr::Array { .. } => TypeKind::Array,
            TypeRepr::Function { .. } => TypeKind::Function,
        }
    }

    /// The declared name, for kinds that carry one. Anonymous struct/union/
    /// enum types return `None`.
    #[must_use]
    pub fn name(&self) -> Option<&str>
    {
        match &self.repr {
            TypeRepr::Int { name, .. }
            | TypeRepr::Bool { name, .. }
            | TypeRepr::Float { name, .. }
            | TypeRepr::Typedef { name, .. } => Some(name),
            TypeRepr::Struct { name, .. } | TypeRepr::Union { name, .. } | TypeRepr::Enum { name, .. } => {
                name.as_deref()
            }
            _ => None,
        }
    }

    /// The size of this type in bytes, when it has one.
    ///
    /// Typedefs answer with the size of the aliased type; arrays multiply the
    /// element size by the length. Incomplete types and function types have
    /// no size.
    #[must_use]
    pub fn size(&self) -> Option<u64>
    {
        match &self.repr {
            TypeRepr::Int { size, .. }
            | TypeRepr::Bool { size, .. }
            | TypeRepr::Float { size, .. }
            | TypeRepr::Pointer { size, .. } => Some(*size),
            TypeRepr::Struct {
                size, is_complete: true, ..
            }
            | TypeRepr::Union {
                size, is_complete: true, ..
            } => Some(*size),
            TypeRepr::Enum {
                compatible: Some(compatible),
                ..
            } => compatible.size(),
            TypeRepr::Typedef { aliased, .. } => aliased.ty.size(),
            TypeRepr::Array {
                length: Some(length),
                element,
            } => element.ty.size().and_then(|size| size.checked_mul(*length)),
            _ => None,
        }
    }

    /// Whether an integer type is signed. `None` for non-integer types.
    #[must_use]
    pub fn is_signed(&self) -> Option<bool>
    {
        match &self.repr {
            TypeRepr::Int { is_signed, .. } => Some(*is_signed),
            _ => None,
        }
    }

    /// Whether this type is complete. Forward-declared aggregates and enums,
    /// incomplete arrays, and `void` are not.
    #[must_use]
    pub fn is_complete(&self) -> bool
    {
        match &self.repr {
            TypeRepr::Void => false,
            TypeRepr::Struct { is_complete, .. } | TypeRepr::Union { is_complete, .. } => *is_complete,
            TypeRepr::Enum { compatible, .. } => compatible.is_some(),
            TypeRepr::Array { length, .. } => length.is_some(),
            _ => true,
        }
    }

    /// Whether this kind of type can have members (struct or union).
    #[must_use]
    pub fn has_members(&self) -> bool
    {
        matches!(&self.repr, TypeRepr::Struct { .. } | TypeRepr::Union { .. })
    }

    /// The members of a struct or union, in source order. Empty for other
    /// kinds and for incomplete aggregates.
    #[must_use]
    pub fn members(&self) -> &[Member]
    {
        match &self.repr {
            TypeRepr::Struct { members, .. } | TypeRepr::Union { members, .. } => members,
            _ => &[],
        }
    }

    /// The enumerators of an enum, in source order. Empty for other kinds.
    #[must_use]
    pub fn enumerators(&self) -> &[Enumerator]
    {
        match &self.repr {
            TypeRepr::Enum { enumerators, .. } => enumerators,
            _ => &[],
        }
    }

    /// The compatible integer type of a complete enum.
    #[must_use]
    pub fn compatible_type(&self) -> Option<&Arc<Type>>
    {
        match &self.repr {
            TypeRepr::Enum { compatible, .. } => compatible.as_ref(),
            _ => None,
        }
    }

    /// The type a pointer references.
    #[must_use]
    pub fn referenced(&self) -> Option<&QualifiedType>
    {
        match &self.repr {
            TypeRepr::Pointer { referenced, .. } => Some(referenced),
            _ => None,
        }
    }

    /// The element type of an array.
    #[must_use]
    pub fn element(&self) -> Option<&QualifiedType>
    {
        match &self.repr {
            TypeRepr::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    /// The length of a complete array. `None` for incomplete arrays and for
    /// every other kind.
    #[must_use]
    pub fn length(&self) -> Option<u64>
    {
        match &self.repr {
            TypeRepr::Array { length, .. } => *length,
            _ => None,
        }
    }

    /// The qualified type a typedef aliases.
    #[must_use]
    pub fn aliased(&self) -> Option<&QualifiedType>
    {
        match &self.repr {
            TypeRepr::Typedef { aliased, .. } => Some(aliased),
            _ => None,
        }
    }

    /// The return type of a function type.
    #[must_use]
    pub fn return_type(&self) -> Option<&QualifiedType>
    {
        match &self.repr {
            TypeRepr::Function { return_type, .. } => Some(return_type),
            _ => None,
        }
    }

    /// The parameters of a function type. Empty for other kinds.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter]
    {
        match &self.repr {
            TypeRepr::Function { parameters, .. } => parameters,
            _ => &[],
        }
    }

    /// Whether a function type is variadic.
    #[must_use]
    pub fn is_variadic(&self) -> bool
    {
        match &self.repr {
            TypeRepr::Function { is_variadic, .. } => *is_variadic,
            _ => false,
        }
    }

    /// The primitive classification of this descriptor, if its name spells
    /// one of the known C primitives.
    #[must_use]
    pub fn primitive(&self) -> Option<PrimitiveKind>
    {
        match &self.repr {
            TypeRepr::Void => Some(PrimitiveKind::Void),
            TypeRepr::Int { primitive, .. }
            | TypeRepr::Bool { primitive, .. }
            | TypeRepr::Float { primitive, .. }
            | TypeRepr::Typedef { primitive, .. } => *primitive,
            _ => None,
        }
    }
}

impl fmt::Display for Type
{
    /// Compact C-flavoured rendering used by error messages and logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match &self.repr {
            TypeRepr::Void => f.write_str("void"),
            TypeRepr::Int { name, .. } | TypeRepr::Bool { name, .. } | TypeRepr::Float { name, .. } => {
                f.write_str(name)
            }
            TypeRepr::Typedef { name, .. } => f.write_str(name),
            TypeRepr::Struct { name, .. } => write!(f, "struct {}", name.as_deref().unwrap_or("<anonymous>")),
            TypeRepr::Union { name, .. } => write!(f, "union {}", name.as_deref().unwrap_or("<anonymous>")),
            TypeRepr::Enum { name, .. } => write!(f, "enum {}", name.as_deref().unwrap_or("<anonymous>")),
            TypeRepr::Pointer { referenced, .. } => write!(f, "{referenced} *"),
            TypeRepr::Array {
                length: Some(length),
                element,
            } => write!(f, "{element} [{length}]"),
            TypeRepr::Array { length: None, element } => write!(f, "{element} []"),
            TypeRepr::Function { return_type, .. } => write!(f, "{return_type} ()"),
        }
    }
}
