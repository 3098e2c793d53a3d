//! Example walking a structure layout through the type index
//!
//! This example plays both sides of the index:
//!
//! 1. A finder that stands in for parsed debug info, serving a handful of
//!    synthetic types (the way a DWARF reader would)
//! 2. A consumer that resolves primitives, interns derived types, and looks
//!    up members across an anonymous union
//!
//! Run with `RUST_LOG=trace` to watch the index intern and cache.

use std::sync::Arc;

use spelunk_core::types::{Member, PrimitiveKind, QualifiedType, Type, TypeKind};
use spelunk_core::{SpelunkResult, TypeFinder, TypeIndex};
use spelunk_utils::init_logging;

/// Serves a fixed set of types, like a debug info reader would.
struct DemoDebugInfo
{
    types: Vec<(TypeKind, &'static str, Arc<Type>)>,
}

impl DemoDebugInfo
{
    fn new() -> Self
    {
        let uint = Type::int("unsigned int", 4, false);
        let ulong = Type::int("unsigned long", 8, false);

        // struct packet { unsigned long id; union { unsigned int ipv4; unsigned int ifindex; }; }
        let address = Type::union_type(
            None,
            4,
            vec![
                Member::named("ipv4", QualifiedType::new(uint.clone()), 0),
                Member::named("ifindex", QualifiedType::new(uint.clone()), 0),
            ],
        );
        let packet = Type::struct_type(
            Some("packet"),
            16,
            vec![
                Member::named("id", QualifiedType::new(ulong.clone()), 0),
                Member::anonymous(QualifiedType::new(address), 64),
            ],
        );

        Self {
            types: vec![
                (TypeKind::Int, "unsigned int", uint),
                (TypeKind::Int, "unsigned long", ulong),
                (TypeKind::Struct, "packet", packet),
            ],
        }
    }
}

impl TypeFinder for DemoDebugInfo
{
    fn find_type(
        &self,
        _index: &TypeIndex,
        kind: TypeKind,
        name: &str,
        _filename: Option<&str>,
    ) -> SpelunkResult<Option<QualifiedType>>
    {
        for (entry_kind, entry_name, ty) in &self.types {
            if *entry_kind == kind && *entry_name == name {
                return Ok(Some(QualifiedType::new(ty.clone())));
            }
        }
        Ok(None)
    }
}

fn main() -> SpelunkResult<()>
{
    init_logging().expect("Failed to initialize logging");

    let mut index = TypeIndex::new();
    index.set_word_size(8)?;
    index.add_finder(DemoDebugInfo::new());

    // size_t has no descriptor of its own in our "debug info"; the index
    // synthesises a typedef of the word-sized unsigned integer.
    let size_t = index.find_primitive(PrimitiveKind::SizeT)?;
    tracing::info!(ty = %size_t, aliases = %size_t.aliased().unwrap(), "resolved size_t");

    // Derived types are interned: both pointers are the same descriptor.
    let packet = index.find(TypeKind::Struct, "packet", None)?;
    let a = index.pointer_type(packet.clone())?;
    let b = index.pointer_type(packet.clone())?;
    tracing::info!(ty = %a, interned = Arc::ptr_eq(&a, &b), "built pointer type");

    // Members of the anonymous union are reachable from the struct itself,
    // with offsets measured from the start of the struct.
    for name in ["id", "ipv4", "ifindex"] {
        let member = index.find_member(&packet.ty, name)?;
        println!("packet.{name}: {} at bit offset {}", member.ty, member.bit_offset);
    }

    // Misses stay misses, and they are cheap after the first lookup.
    if let Err(error) = index.find_member(&packet.ty, "checksum") {
        println!("expected miss: {error}");
    }

    Ok(())
}
