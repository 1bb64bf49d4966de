//! Compact directed (optionally undirected) weighted adjacency store.
//!
//! Nodes are integers in `[0, node_count)`. Adjacency is kept in hashed sets
//! so insertion, removal, and membership are O(1) amortised; edge weights live
//! in a separate hash keyed on `(source, target)`. Iteration order over
//! neighbour sets is unspecified and callers must not depend on it.
//!
//! A graph is never mutated while a diffusion trial or selection run borrows
//! it; the `&self` borrows taken by every algorithm in this crate enforce the
//! read-only snapshot the simulators assume.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{ImError, Result};

/// Identifier of a node, always in `[0, node_count)` for its graph.
pub type NodeId = usize;

/// A directed or undirected weighted graph.
///
/// Undirected edges are stored bidirectionally but counted once by
/// [`Graph::edge_count`], and the two stored directions carry the same weight
/// under [`Graph::add_edge`] and [`Graph::update_edge_weight`].
///
/// # Examples
/// ```
/// use netim_core::Graph;
///
/// let mut graph = Graph::new(3, true);
/// graph.add_edge(0, 1, 0.5)?;
/// graph.add_edge(1, 2, 1.0)?;
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.edge_weight(0, 1), Some(0.5));
/// assert!(graph.out_neighbours(0).contains(&1));
/// # Ok::<(), netim_core::ImError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Graph {
    node_count: usize,
    directed: bool,
    out_adj: Vec<FxHashSet<NodeId>>,
    in_adj: Vec<FxHashSet<NodeId>>,
    weights: FxHashMap<(NodeId, NodeId), f64>,
    edge_count: usize,
}

impl Graph {
    /// Creates an empty graph with `node_count` nodes and no edges.
    #[must_use]
    pub fn new(node_count: usize, directed: bool) -> Self {
        Self {
            node_count,
            directed,
            out_adj: vec![FxHashSet::default(); node_count],
            in_adj: if directed {
                vec![FxHashSet::default(); node_count]
            } else {
                Vec::new()
            },
            weights: FxHashMap::default(),
            edge_count: 0,
        }
    }

    /// Creates a graph from an edge list, giving every edge weight `1.0`.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] when an endpoint is out of range.
    pub fn from_edges(
        node_count: usize,
        directed: bool,
        edges: &[(NodeId, NodeId)],
    ) -> Result<Self> {
        let mut graph = Self::new(node_count, directed);
        graph.add_edges(edges, None)?;
        Ok(graph)
    }

    /// Creates a graph from parallel edge and weight lists.
    ///
    /// # Errors
    /// Returns [`ImError::LengthMismatch`] when the lists differ in length and
    /// [`ImError::InvalidNode`] when an endpoint is out of range.
    pub fn from_weighted_edges(
        node_count: usize,
        directed: bool,
        edges: &[(NodeId, NodeId)],
        weights: &[f64],
    ) -> Result<Self> {
        let mut graph = Self::new(node_count, directed);
        graph.add_edges(edges, Some(weights))?;
        Ok(graph)
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of logical edges (an undirected edge counts once).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` when the graph is directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Inserts the edge `(source, target)` with the given weight.
    ///
    /// If the edge already exists only its weight is updated and the edge
    /// count is unchanged. For undirected graphs both stored directions are
    /// written.
    ///
    /// # Errors
    /// Returns [`ImError::InvalidNode`] when an endpoint is out of range.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: f64) -> Result<()> {
        self.check_node(source)?;
        self.check_node(target)?;

        if self.weights.contains_key(&(source, target)) {
            self.weights.insert((source, target), weight);
            if !self.directed {
                self.weights.insert((target, source), weight);
            }
            return Ok(());
        }

        self.out_adj[source].insert(target);
        self.weights.insert((source, target), weight);
        self.edge_count += 1;

        if self.directed {
            self.in_adj[target].insert(source);
        } else {
            self.out_adj[target].insert(source);
            self.weights.insert((target, source), weight);
        }
        Ok(())
    }

    /// Inserts a batch of edges, optionally with per-edge weights.
    ///
    /// Edges without weights default to `1.0`.
    ///
    /// # Errors
    /// Returns [`ImError::LengthMismatch`] when `weights` is given with a
    /// different length than `edges`, and [`ImError::InvalidNode`] when an
    /// endpoint is out of range.
    pub fn add_edges(&mut self, edges: &[(NodeId, NodeId)], weights: Option<&[f64]>) -> Result<()> {
        if let Some(weights) = weights {
            if weights.len() != edges.len() {
                return Err(ImError::LengthMismatch {
                    edges: edges.len(),
                    weights: weights.len(),
                });
            }
        }
        for (index, &(source, target)) in edges.iter().enumerate() {
            let weight = weights.map_or(1.0, |weights| weights[index]);
            self.add_edge(source, target, weight)?;
        }
        Ok(())
    }

    /// Replaces the weight of an existing edge.
    ///
    /// # Errors
    /// Returns [`ImError::EdgeNotFound`] when the edge is absent.
    pub fn update_edge_weight(&mut self, source: NodeId, target: NodeId, weight: f64) -> Result<()> {
        if !self.weights.contains_key(&(source, target)) {
            return Err(ImError::EdgeNotFound { edge_source: source, target });
        }
        self.weights.insert((source, target), weight);
        if !self.directed {
            self.weights.insert((target, source), weight);
        }
        Ok(())
    }

    /// Removes the edge `(source, target)` and decrements the edge count.
    ///
    /// # Errors
    /// Returns [`ImError::EdgeNotFound`] when the edge is absent.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        if self.weights.remove(&(source, target)).is_none() {
            return Err(ImError::EdgeNotFound { edge_source: source, target });
        }
        self.out_adj[source].remove(&target);

        if self.directed {
            self.in_adj[target].remove(&source);
        } else {
            self.out_adj[target].remove(&source);
            self.weights.remove(&(target, source));
        }
        self.edge_count -= 1;
        Ok(())
    }

    /// Removes a batch of edges.
    ///
    /// # Errors
    /// Returns [`ImError::EdgeNotFound`] at the first absent edge; edges
    /// removed before the failure stay removed.
    pub fn remove_edges(&mut self, edges: &[(NodeId, NodeId)]) -> Result<()> {
        for &(source, target) in edges {
            self.remove_edge(source, target)?;
        }
        Ok(())
    }

    /// Returns the out-neighbour set of `node`.
    ///
    /// # Panics
    /// Panics when `node >= node_count`, like slice indexing.
    #[must_use]
    pub fn out_neighbours(&self, node: NodeId) -> &FxHashSet<NodeId> {
        &self.out_adj[node]
    }

    /// Returns the in-neighbour set of `node`.
    ///
    /// For undirected graphs this is the same set as
    /// [`Graph::out_neighbours`].
    ///
    /// # Panics
    /// Panics when `node >= node_count`, like slice indexing.
    #[must_use]
    pub fn in_neighbours(&self, node: NodeId) -> &FxHashSet<NodeId> {
        if self.directed {
            &self.in_adj[node]
        } else {
            &self.out_adj[node]
        }
    }

    /// Returns the out-degree of `node`.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_adj[node].len()
    }

    /// Returns the in-degree of `node`.
    #[must_use]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_neighbours(node).len()
    }

    /// Returns the degree of `node` (its out-degree).
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.out_degree(node)
    }

    /// Returns the weight of the edge `(source, target)`, or `None` when the
    /// edge does not exist.
    #[must_use]
    pub fn edge_weight(&self, source: NodeId, target: NodeId) -> Option<f64> {
        self.weights.get(&(source, target)).copied()
    }

    /// Returns `true` when the edge `(source, target)` exists.
    #[must_use]
    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.weights.contains_key(&(source, target))
    }

    /// Iterates over `(target, weight)` pairs for the out-edges of `node`.
    ///
    /// # Panics
    /// Panics when `node >= node_count`, like slice indexing.
    pub fn weighted_out_neighbours(
        &self,
        node: NodeId,
    ) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.out_adj[node]
            .iter()
            .map(move |&target| (target, self.weights[&(node, target)]))
    }

    /// Iterates over `(source, weight)` pairs for the in-edges of `node`.
    ///
    /// # Panics
    /// Panics when `node >= node_count`, like slice indexing.
    pub fn weighted_in_neighbours(
        &self,
        node: NodeId,
    ) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.in_neighbours(node)
            .iter()
            .map(move |&source| (source, self.weights[&(source, node)]))
    }

    /// Iterates over every stored `(source, target)` pair.
    ///
    /// Undirected graphs yield both stored directions of each edge.
    pub(crate) fn stored_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.weights.keys().copied()
    }

    pub(crate) fn set_stored_weight(&mut self, source: NodeId, target: NodeId, weight: f64) {
        self.weights.insert((source, target), weight);
    }

    /// Returns the dense `node_count x node_count` weight matrix.
    ///
    /// Absent edges are `0.0`. This allocates O(n²) memory and is intended
    /// only for small graphs.
    #[must_use]
    pub fn adj_matrix(&self) -> Vec<Vec<f64>> {
        let mut matrix = vec![vec![0.0; self.node_count]; self.node_count];
        for (&(source, target), &weight) in &self.weights {
            matrix[source][target] = weight;
        }
        matrix
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node >= self.node_count {
            return Err(ImError::InvalidNode {
                node,
                node_count: self.node_count,
            });
        }
        Ok(())
    }
}
