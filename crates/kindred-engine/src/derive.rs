//! Derivation primitives over bitmaps of person ids.
//!
//! Every primitive takes a *set* of people and returns a set, so relations
//! compose without special-casing "one person" versus "several". Absence is
//! always the empty set; nothing here can fail.

use kindred_facts::{FactBase, Gender, ParentRole, PersonId};
use roaring::RoaringBitmap;

/// Intersect with the gender partition; `None` passes `people` through.
///
/// People without a gender entry never survive a filter.
pub fn filter_by_gender(
    facts: &FactBase,
    people: &RoaringBitmap,
    gender: Option<Gender>,
) -> RoaringBitmap {
    match gender {
        None => people.clone(),
        Some(gender) => people & &facts.people_with_gender(gender),
    }
}

/// Direct parents in `role`, keeping only those whose recorded gender matches
/// the role. A father edge pointing at a FEMALE person yields nothing.
pub fn parents_in_role(facts: &FactBase, people: &RoaringBitmap, role: ParentRole) -> RoaringBitmap {
    let mut out = RoaringBitmap::new();
    for child in people.iter() {
        let Some(parent) = facts.parent(PersonId::new(child), role) else {
            continue;
        };
        if facts.gender(parent) == Some(role.expected_gender()) {
            out.insert(parent.raw());
        }
    }
    out
}

/// `Father(S) ∪ Mother(S)`.
pub fn parents(facts: &FactBase, people: &RoaringBitmap) -> RoaringBitmap {
    let mut out = RoaringBitmap::new();
    for role in ParentRole::ALL {
        out |= parents_in_role(facts, people, role);
    }
    out
}

/// Ancestors `level` generations up, ending in `role`.
///
/// Level 1 is the direct role-checked parent. Each extra level first steps to
/// all parents (either role) of the current set. `level <= 0` is empty, and
/// levels deeper than the lineage simply run out of parents.
pub fn ancestors_at_level(
    facts: &FactBase,
    people: &RoaringBitmap,
    role: ParentRole,
    level: i64,
) -> RoaringBitmap {
    if level <= 0 {
        return RoaringBitmap::new();
    }
    let mut current = people.clone();
    for _ in 1..level {
        current = parents(facts, &current);
        if current.is_empty() {
            return current;
        }
    }
    parents_in_role(facts, &current, role)
}

/// Direct children of anyone in `people`, through either parent role.
pub fn children(facts: &FactBase, people: &RoaringBitmap) -> RoaringBitmap {
    let mut out = RoaringBitmap::new();
    for parent in people.iter() {
        out |= facts.children_any(PersonId::new(parent));
    }
    out
}

/// Descendants `level` generations down, optionally filtered by gender.
///
/// Each step hands the whole previous generation forward as one collapsed
/// set, and the gender filter is applied to the final generation only. So a
/// granddaughter may be reached through a son, and the intermediate
/// generation is never filtered. Existing expectations depend on exactly
/// this, so keep it that way.
pub fn descendants_at_level(
    facts: &FactBase,
    people: &RoaringBitmap,
    level: i64,
    gender: Option<Gender>,
) -> RoaringBitmap {
    if level <= 0 {
        return RoaringBitmap::new();
    }
    let mut generation = people.clone();
    for _ in 0..level {
        generation = children(facts, &generation);
        if generation.is_empty() {
            return generation;
        }
    }
    filter_by_gender(facts, &generation, gender)
}

/// `Children(Parent(S)) \ S`: the whole input set is excluded, not just one
/// person.
pub fn siblings(facts: &FactBase, people: &RoaringBitmap) -> RoaringBitmap {
    children(facts, &parents(facts, people)) - people
}

/// First-listed spouse of each person, kept only when recorded with `gender`.
pub fn spouses(facts: &FactBase, people: &RoaringBitmap, gender: Gender) -> RoaringBitmap {
    let mut out = RoaringBitmap::new();
    for person in people.iter() {
        let Some(spouse) = facts.spouse(PersonId::new(person)) else {
            continue;
        };
        if facts.gender(spouse) == Some(gender) {
            out.insert(spouse.raw());
        }
    }
    out
}
