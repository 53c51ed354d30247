//! Parent edges, indexed both ways.
//!
//! Forward columns answer "who is the father/mother of X" in O(1); the
//! backward index answers "whose father/mother is X" as a bitmap, which is
//! what child lookups and sibling derivation are built on.

use ahash::AHashMap;
use roaring::RoaringBitmap;
use serde::Serialize;

use crate::people::ParentRole;
use crate::PersonId;

/// A directed `child -> parent` edge, tagged by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ParentEdge {
    pub child: PersonId,
    pub role: ParentRole,
    pub parent: PersonId,
}

#[derive(Debug, Default)]
pub(crate) struct LineageStore {
    /// Forward column: child -> father
    fathers: Vec<Option<PersonId>>,
    /// Forward column: child -> mother
    mothers: Vec<Option<PersonId>>,
    /// Backward index: father -> children
    children_by_father: AHashMap<PersonId, RoaringBitmap>,
    /// Backward index: mother -> children
    children_by_mother: AHashMap<PersonId, RoaringBitmap>,
}

impl LineageStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn column(&self, role: ParentRole) -> &Vec<Option<PersonId>> {
        match role {
            ParentRole::Father => &self.fathers,
            ParentRole::Mother => &self.mothers,
        }
    }

    fn backward(&self, role: ParentRole) -> &AHashMap<PersonId, RoaringBitmap> {
        match role {
            ParentRole::Father => &self.children_by_father,
            ParentRole::Mother => &self.children_by_mother,
        }
    }

    /// Link `child` to `parent` in `role`. Returns the existing parent if a
    /// different one is already linked; relinking the same parent is a no-op.
    pub(crate) fn set_parent(
        &mut self,
        child: PersonId,
        role: ParentRole,
        parent: PersonId,
    ) -> Result<(), PersonId> {
        let (column, backward) = match role {
            ParentRole::Father => (&mut self.fathers, &mut self.children_by_father),
            ParentRole::Mother => (&mut self.mothers, &mut self.children_by_mother),
        };
        if child.index() >= column.len() {
            column.resize(child.index() + 1, None);
        }
        match column[child.index()] {
            Some(existing) if existing != parent => return Err(existing),
            Some(_) => return Ok(()),
            None => {}
        }
        column[child.index()] = Some(parent);
        backward
            .entry(parent)
            .or_insert_with(RoaringBitmap::new)
            .insert(child.raw());
        Ok(())
    }

    pub(crate) fn parent(&self, child: PersonId, role: ParentRole) -> Option<PersonId> {
        self.column(role).get(child.index()).copied().flatten()
    }

    /// Children linked to `parent` through `role`.
    pub(crate) fn children(&self, parent: PersonId, role: ParentRole) -> Option<&RoaringBitmap> {
        self.backward(role).get(&parent)
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.fathers.iter().flatten().count() + self.mothers.iter().flatten().count()
    }

    /// Every edge, ordered by role and then by child id.
    pub(crate) fn edges(&self) -> Vec<ParentEdge> {
        let mut out = Vec::with_capacity(self.edge_count());
        for role in ParentRole::ALL {
            for (child, parent) in self.column(role).iter().enumerate() {
                if let Some(parent) = parent {
                    out.push(ParentEdge {
                        child: PersonId::new(child as u32),
                        role,
                        parent: *parent,
                    });
                }
            }
        }
        out
    }

    /// Find a person who is their own ancestor, if any.
    ///
    /// Iterative three-colour DFS over `child -> parent` edges; the returned
    /// person lies on the cycle.
    pub(crate) fn find_cycle(&self, people: usize) -> Option<PersonId> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; people];
        for start in 0..people {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            // (person, next role index to explore)
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            marks[start] = Mark::OnStack;

            while let Some(top) = stack.last_mut() {
                let (person, next_role) = *top;
                if next_role >= ParentRole::ALL.len() {
                    marks[person] = Mark::Done;
                    stack.pop();
                    continue;
                }
                top.1 += 1;

                let role = ParentRole::ALL[next_role];
                let Some(parent) = self.parent(PersonId::new(person as u32), role) else {
                    continue;
                };
                let parent = parent.index();
                if parent >= people {
                    continue;
                }
                match marks[parent] {
                    Mark::OnStack => return Some(PersonId::new(parent as u32)),
                    Mark::Done => {}
                    Mark::Unvisited => {
                        marks[parent] = Mark::OnStack;
                        stack.push((parent, 0));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> PersonId {
        PersonId::new(raw)
    }

    #[test]
    fn backward_index_tracks_children_per_role() {
        let mut store = LineageStore::new();
        store.set_parent(id(1), ParentRole::Father, id(0)).unwrap();
        store.set_parent(id(2), ParentRole::Father, id(0)).unwrap();
        store.set_parent(id(2), ParentRole::Mother, id(3)).unwrap();

        let kids = store.children(id(0), ParentRole::Father).unwrap();
        assert_eq!(kids.iter().collect::<Vec<_>>(), vec![1, 2]);
        assert!(store.children(id(0), ParentRole::Mother).is_none());
        assert_eq!(store.parent(id(2), ParentRole::Mother), Some(id(3)));
        assert_eq!(store.edge_count(), 3);
    }

    #[test]
    fn second_parent_in_same_role_is_rejected() {
        let mut store = LineageStore::new();
        store.set_parent(id(1), ParentRole::Mother, id(0)).unwrap();
        assert!(store.set_parent(id(1), ParentRole::Mother, id(0)).is_ok());
        assert_eq!(
            store.set_parent(id(1), ParentRole::Mother, id(2)),
            Err(id(0))
        );
    }

    #[test]
    fn cycle_is_detected() {
        let mut store = LineageStore::new();
        store.set_parent(id(0), ParentRole::Father, id(1)).unwrap();
        store.set_parent(id(1), ParentRole::Father, id(2)).unwrap();
        assert_eq!(store.find_cycle(3), None);

        store.set_parent(id(2), ParentRole::Mother, id(0)).unwrap();
        assert!(store.find_cycle(3).is_some());
    }
}
