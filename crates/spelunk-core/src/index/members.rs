//! Member resolution cache.
//!
//! The first member lookup into a struct or union flattens the aggregate:
//! every member reachable through anonymous nested aggregates lands in one
//! table keyed by name, with its bit offset accumulated from the outer type's
//! base. Later lookups are a single map probe, and once a type's table
//! exists, a missing name is authoritative.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::intern::IdentityKey;
use super::TypeIndex;
use crate::error::{SpelunkError, SpelunkResult};
use crate::types::{underlying, QualifiedType, Type};

/// A resolved member of a struct or union.
#[derive(Debug, Clone)]
pub struct MemberValue
{
    /// The member's declared type (typedefs are not unwrapped).
    pub ty: QualifiedType,
    /// Offset in bits from the start of the outer type.
    pub bit_offset: u64,
    /// Width in bits for bit-field members, 0 otherwise.
    pub bit_field_size: u64,
}

impl TypeIndex
{
    /// Resolve a member of a struct or union by name.
    ///
    /// The lookup keys on the underlying type, so members of `struct X` and
    /// of `typedef struct X X_t` share one cache entry. Members of anonymous
    /// nested aggregates are found under the outer type with their offsets
    /// accumulated; when two anonymous paths produce the same name, the first
    /// in depth-first source order wins.
    ///
    /// ## Errors
    ///
    /// - `NotAggregate` when the underlying type is not a struct or union.
    /// - `MemberNotFound` when the aggregate has no such member.
    pub fn find_member(&self, ty: &Arc<Type>, name: &str) -> SpelunkResult<MemberValue>
    {
        let outer = underlying(ty);

        if let Some(table) = self.members.borrow().get(&IdentityKey::new(&outer)) {
            return match table.get(name) {
                Some(value) => Ok(value.clone()),
                None => Err(SpelunkError::member_not_found(ty, name)),
            };
        }

        if !outer.has_members() {
            return Err(SpelunkError::NotAggregate { type_name: ty.to_string() });
        }

        let mut table = HashMap::new();
        flatten_members(&mut table, &outer, 0);
        debug!(ty = %outer, members = table.len(), "cached member table");

        let value = table.get(name).cloned();
        // A re-entrant lookup may have published a table first; keep the
        // existing one in that case.
        self.members.borrow_mut().entry(IdentityKey::new(&outer)).or_insert(table);

        value.ok_or_else(|| SpelunkError::member_not_found(ty, name))
    }
}

/// Depth-first flattening in source order. Named members are recorded with
/// their accumulated offset; anonymous aggregate members are expanded in
/// place. Anonymous members that cannot have members (unnamed bit fields)
/// contribute nothing.
fn flatten_members(table: &mut HashMap<String, MemberValue>, current: &Arc<Type>, bit_offset: u64)
{
    if !current.has_members() {
        return;
    }
    for member in current.members() {
        match &member.name {
            Some(name) => {
                table.entry(name.clone()).or_insert_with(|| MemberValue {
                    ty: member.ty.clone(),
                    bit_offset: bit_offset + member.bit_offset,
                    bit_field_size: member.bit_field_size,
                });
            }
            None => flatten_members(table, &member.ty.ty, bit_offset + member.bit_offset),
        }
    }
}
