//! Catalogue of the canonical C primitive types.
//!
//! Each [`PrimitiveKind`] knows its top-level [`TypeKind`] and the finite,
//! ordered list of spellings a declaration may use for it. The static default
//! descriptors here are process-wide immutable fallbacks handed out when no
//! finder supplies a descriptor from the inspected program's debug info; the
//! word-size-dependent 32-bit `long` pair is kept separately and selected by
//! the primitive resolver.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{Type, TypeKind, TypeRepr};

/// The C primitives the index recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind
{
    /// `char`
    Char,
    /// `signed char`
    SignedChar,
    /// `unsigned char`
    UnsignedChar,
    /// `short`
    Short,
    /// `unsigned short`
    UnsignedShort,
    /// `int`
    Int,
    /// `unsigned int`
    UnsignedInt,
    /// `long`
    Long,
    /// `unsigned long`
    UnsignedLong,
    /// `long long`
    LongLong,
    /// `unsigned long long`
    UnsignedLongLong,
    /// `_Bool`
    Bool,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `long double`
    LongDouble,
    /// `size_t`
    SizeT,
    /// `ptrdiff_t`
    PtrdiffT,
    /// `void`
    Void,
}

impl PrimitiveKind
{
    pub(crate) const COUNT: usize = 18;

    /// Every primitive kind, in declaration order.
    pub const ALL: [PrimitiveKind; PrimitiveKind::COUNT] = [
        PrimitiveKind::Char,
        PrimitiveKind::SignedChar,
        PrimitiveKind::UnsignedChar,
        PrimitiveKind::Short,
        PrimitiveKind::UnsignedShort,
        PrimitiveKind::Int,
        PrimitiveKind::UnsignedInt,
        PrimitiveKind::Long,
        PrimitiveKind::UnsignedLong,
        PrimitiveKind::LongLong,
        PrimitiveKind::UnsignedLongLong,
        PrimitiveKind::Bool,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::LongDouble,
        PrimitiveKind::SizeT,
        PrimitiveKind::PtrdiffT,
        PrimitiveKind::Void,
    ];

    /// The top-level kind a descriptor of this primitive has.
    ///
    /// `size_t` and `ptrdiff_t` are typedefs in every standard library, so
    /// they are looked up (and synthesised) as typedefs.
    #[must_use]
    pub const fn kind(self) -> TypeKind
    {
        match self {
            PrimitiveKind::Bool => TypeKind::Bool,
            PrimitiveKind::Float | PrimitiveKind::Double | PrimitiveKind::LongDouble => TypeKind::Float,
            PrimitiveKind::SizeT | PrimitiveKind::PtrdiffT => TypeKind::Typedef,
            PrimitiveKind::Void => TypeKind::Void,
            _ => TypeKind::Int,
        }
    }

    /// All spellings a declaration may use for this primitive, canonical
    /// spelling first.
    #[must_use]
    pub const fn spellings(self) -> &'static [&'static str]
    {
        match self {
            PrimitiveKind::Char => &["char"],
            PrimitiveKind::SignedChar => &["signed char", "char signed"],
            PrimitiveKind::UnsignedChar => &["unsigned char", "char unsigned"],
            PrimitiveKind::Short => &["short", "signed short", "short int", "signed short int"],
            PrimitiveKind::UnsignedShort => &["unsigned short", "unsigned short int"],
            PrimitiveKind::Int => &["int", "signed", "signed int"],
            PrimitiveKind::UnsignedInt => &["unsigned int", "unsigned"],
            PrimitiveKind::Long => &["long", "signed long", "long int", "signed long int"],
            PrimitiveKind::UnsignedLong => &["unsigned long", "unsigned long int"],
            PrimitiveKind::LongLong => &["long long", "signed long long", "long long int", "signed long long int"],
            PrimitiveKind::UnsignedLongLong => &["unsigned long long", "unsigned long long int"],
            PrimitiveKind::Bool => &["_Bool"],
            PrimitiveKind::Float => &["float"],
            PrimitiveKind::Double => &["double"],
            PrimitiveKind::LongDouble => &["long double", "double long"],
            PrimitiveKind::SizeT => &["size_t"],
            PrimitiveKind::PtrdiffT => &["ptrdiff_t"],
            PrimitiveKind::Void => &["void"],
        }
    }

    /// The canonical spelling of this primitive.
    #[must_use]
    pub const fn spelling(self) -> &'static str
    {
        self.spellings()[0]
    }

    /// Classify a descriptor name: the primitive of top-level kind `kind`
    /// that `name` spells, if any.
    pub(crate) fn from_name(kind: TypeKind, name: &str) -> Option<PrimitiveKind>
    {
        PrimitiveKind::ALL
            .into_iter()
            .find(|primitive| primitive.kind() == kind && primitive.spellings().contains(&name))
    }

    pub(crate) const fn index(self) -> usize
    {
        self as usize
    }
}

static VOID: Lazy<Arc<Type>> = Lazy::new(|| Arc::new(Type { repr: TypeRepr::Void }));

/// Defaults are indexed by `PrimitiveKind`; `void`, `size_t`, and
/// `ptrdiff_t` have no entry (`void` is the singleton above, the other two
/// are synthesised against the word size).
static DEFAULTS: Lazy<[Option<Arc<Type>>; PrimitiveKind::COUNT]> = Lazy::new(|| {
    let mut table: [Option<Arc<Type>>; PrimitiveKind::COUNT] = std::array::from_fn(|_| None);
    let mut set = |kind: PrimitiveKind, ty: Arc<Type>| table[kind.index()] = Some(ty);

    set(PrimitiveKind::Char, Type::int("char", 1, true));
    set(PrimitiveKind::SignedChar, Type::int("signed char", 1, true));
    set(PrimitiveKind::UnsignedChar, Type::int("unsigned char", 1, false));
    set(PrimitiveKind::Short, Type::int("short", 2, true));
    set(PrimitiveKind::UnsignedShort, Type::int("unsigned short", 2, false));
    set(PrimitiveKind::Int, Type::int("int", 4, true));
    set(PrimitiveKind::UnsignedInt, Type::int("unsigned int", 4, false));
    set(PrimitiveKind::Long, Type::int("long", 8, true));
    set(PrimitiveKind::UnsignedLong, Type::int("unsigned long", 8, false));
    set(PrimitiveKind::LongLong, Type::int("long long", 8, true));
    set(PrimitiveKind::UnsignedLongLong, Type::int("unsigned long long", 8, false));
    set(PrimitiveKind::Bool, Type::boolean("_Bool", 1));
    set(PrimitiveKind::Float, Type::float("float", 4));
    set(PrimitiveKind::Double, Type::float("double", 8));
    set(PrimitiveKind::LongDouble, Type::float("long double", 16));

    table
});

/// 32-bit `long`, selected when the index word size is 4.
static LONG_32BIT: Lazy<Arc<Type>> = Lazy::new(|| Type::int("long", 4, true));

/// 32-bit `unsigned long`, selected when the index word size is 4.
static UNSIGNED_LONG_32BIT: Lazy<Arc<Type>> = Lazy::new(|| Type::int("unsigned long", 4, false));

pub(crate) fn void_type() -> Arc<Type>
{
    VOID.clone()
}

/// The shared default descriptor for `kind`, if it has one.
pub(crate) fn default_primitive(kind: PrimitiveKind) -> Option<Arc<Type>>
{
    DEFAULTS[kind.index()].clone()
}

/// The 32-bit variants of `long`/`unsigned long` for 4-byte targets.
pub(crate) fn long_32bit(kind: PrimitiveKind) -> Option<Arc<Type>>
{
    match kind {
        PrimitiveKind::Long => Some(LONG_32BIT.clone()),
        PrimitiveKind::UnsignedLong => Some(UNSIGNED_LONG_32BIT.clone()),
        _ => None,
    }
}
