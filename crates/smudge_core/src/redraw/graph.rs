//! Symmetric collision adjacency.
//!
//! Each tracked drawable maps to the ordered set of drawables whose rects
//! overlapped it when the edge was last checked. Neighbor order is insertion
//! order so redraw order is deterministic.

use std::collections::HashMap;

use crate::drawable::DrawableId;
use crate::error::{SceneError, SceneResult};

/// Collision graph over tracked drawables.
#[derive(Debug, Default, Clone)]
pub(crate) struct CollisionGraph {
    edges: HashMap<DrawableId, Vec<DrawableId>>,
}

impl CollisionGraph {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts `id` with its freshly computed neighbors and adds `id` to each
    /// neighbor's set.
    pub(crate) fn insert(&mut self, id: DrawableId, neighbors: Vec<DrawableId>) {
        for neighbor in &neighbors {
            if let Some(set) = self.edges.get_mut(neighbor) {
                if !set.contains(&id) {
                    set.push(id);
                }
            }
        }
        self.edges.insert(id, neighbors);
    }

    /// Deletes `id`'s entry and prunes it from every remaining entry.
    pub(crate) fn remove(&mut self, id: DrawableId) -> bool {
        let existed = self.edges.remove(&id).is_some();
        for set in self.edges.values_mut() {
            set.retain(|&n| n != id);
        }
        existed
    }

    /// Adds the edge in both directions. Returns true if it was new.
    pub(crate) fn link(&mut self, a: DrawableId, b: DrawableId) -> bool {
        if a == b || self.contains_edge(a, b) {
            return false;
        }
        self.edges.entry(a).or_default().push(b);
        self.edges.entry(b).or_default().push(a);
        true
    }

    /// Removes the edge in both directions. Returns true if it existed.
    pub(crate) fn unlink(&mut self, a: DrawableId, b: DrawableId) -> bool {
        let mut removed = false;
        if let Some(set) = self.edges.get_mut(&a) {
            let before = set.len();
            set.retain(|&n| n != b);
            removed |= set.len() != before;
        }
        if let Some(set) = self.edges.get_mut(&b) {
            let before = set.len();
            set.retain(|&n| n != a);
            removed |= set.len() != before;
        }
        removed
    }

    pub(crate) fn contains_edge(&self, a: DrawableId, b: DrawableId) -> bool {
        self.edges.get(&a).is_some_and(|set| set.contains(&b))
    }

    pub(crate) fn neighbors(&self, id: DrawableId) -> Option<&[DrawableId]> {
        self.edges.get(&id).map(Vec::as_slice)
    }

    pub(crate) fn contains(&self, id: DrawableId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Number of undirected edges.
    pub(crate) fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Checks symmetry, self-edges and membership against `live`.
    pub(crate) fn validate(&self, live: &[DrawableId]) -> SceneResult<()> {
        for &id in live {
            if !self.edges.contains_key(&id) {
                return Err(SceneError::MissingEntry(id));
            }
        }

        for (&owner, set) in &self.edges {
            for &neighbor in set {
                if neighbor == owner {
                    return Err(SceneError::SelfEdge(owner));
                }
                let Some(reverse) = self.edges.get(&neighbor) else {
                    return Err(SceneError::DanglingEdge {
                        owner,
                        missing: neighbor,
                    });
                };
                if !reverse.contains(&owner) {
                    return Err(SceneError::AsymmetricEdge {
                        a: owner,
                        b: neighbor,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> DrawableId {
        DrawableId::new(raw)
    }

    #[test]
    fn test_insert_is_symmetric() {
        let mut graph = CollisionGraph::default();
        graph.insert(id(1), Vec::new());
        graph.insert(id(2), vec![id(1)]);

        assert_eq!(graph.neighbors(id(1)), Some(&[id(2)][..]));
        assert_eq!(graph.neighbors(id(2)), Some(&[id(1)][..]));
        assert!(graph.validate(&[id(1), id(2)]).is_ok());
    }

    #[test]
    fn test_remove_prunes_everywhere() {
        let mut graph = CollisionGraph::default();
        graph.insert(id(1), Vec::new());
        graph.insert(id(2), vec![id(1)]);
        graph.insert(id(3), vec![id(1), id(2)]);

        assert!(graph.remove(id(1)));
        assert!(!graph.remove(id(1)));
        assert_eq!(graph.neighbors(id(2)), Some(&[id(3)][..]));
        assert_eq!(graph.neighbors(id(3)), Some(&[id(2)][..]));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_link_unlink() {
        let mut graph = CollisionGraph::default();
        graph.insert(id(1), Vec::new());
        graph.insert(id(2), Vec::new());

        assert!(graph.link(id(1), id(2)));
        assert!(!graph.link(id(2), id(1)));
        assert!(!graph.link(id(1), id(1)));
        assert!(graph.unlink(id(2), id(1)));
        assert!(!graph.contains_edge(id(1), id(2)));
        assert!(graph.validate(&[id(1), id(2)]).is_ok());
    }

    #[test]
    fn test_validate_detects_asymmetry() {
        let mut graph = CollisionGraph::default();
        graph.edges.insert(id(1), vec![id(2)]);
        graph.edges.insert(id(2), Vec::new());

        assert_eq!(
            graph.validate(&[id(1), id(2)]),
            Err(SceneError::AsymmetricEdge { a: id(1), b: id(2) })
        );
    }

    #[test]
    fn test_validate_detects_missing_entry() {
        let graph = CollisionGraph::default();
        assert_eq!(graph.validate(&[id(7)]), Err(SceneError::MissingEntry(id(7))));
    }
}
