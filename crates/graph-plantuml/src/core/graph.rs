//! Graph of declarations read by generators
//!
//! Vertices wrap one [`Declaration`] each, edges point from a declaration to
//! the declaration it extends or implements. Vertices, edges and the graph
//! itself carry an [`Attributes`] bag of layout hints.
//!
//! Recognized keys:
//! - vertex: `id`, `group`, `stereotype`, `label_<format>`
//! - edge: `style` (`dashed` marks a realization)
//! - graph: `graph.bgcolor`, `graph.rankdir`, `cluster.<id>.graph.*`,
//!   `cluster.<id>.node.*`, `cluster.<id>.edge.*`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::metadata::Declaration;

/// Group every vertex without a `group` attribute belongs to
pub const DEFAULT_GROUP: &str = "0";

/// Insertion-ordered string attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key`, or `default` when absent
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attributes whose key starts with `prefix`, with the prefix stripped
    ///
    /// An empty prefix returns a copy of the whole bag.
    ///
    /// # Example
    /// ```
    /// use graph_plantuml::core::Attributes;
    ///
    /// let mut attributes = Attributes::new();
    /// attributes.set("graph.bgcolor", "white");
    /// attributes.set("rankdir", "LR");
    ///
    /// let graph = attributes.prefixed("graph.");
    /// assert_eq!(graph.get("bgcolor"), Some("white"));
    /// assert_eq!(graph.len(), 1);
    /// ```
    pub fn prefixed(&self, prefix: &str) -> Attributes {
        if prefix.is_empty() {
            return self.clone();
        }

        Attributes(
            self.0
                .iter()
                .filter_map(|(key, value)| {
                    key.strip_prefix(prefix)
                        .map(|stripped| (stripped.to_string(), value.clone()))
                })
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Index of a vertex inside its graph
pub type VertexId = usize;

/// A declaration and its layout attributes
#[derive(Debug, Clone)]
pub struct Vertex {
    pub declaration: Declaration,
    pub attributes: Attributes,
}

impl Vertex {
    /// Wrap a declaration, setting `id` to its qualified name
    pub fn new(declaration: Declaration) -> Self {
        let mut attributes = Attributes::new();
        attributes.set("id", declaration.name.clone());
        Self {
            declaration,
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        self.attributes.get_or("id", &self.declaration.name)
    }

    /// Group key, [`DEFAULT_GROUP`] when unset
    pub fn group(&self) -> &str {
        self.attributes.get_or("group", DEFAULT_GROUP)
    }
}

/// A directed relationship between two vertices
#[derive(Debug, Clone)]
pub struct Edge {
    pub start: VertexId,
    pub end: VertexId,
    pub attributes: Attributes,
}

impl Edge {
    pub fn is_dashed(&self) -> bool {
        self.attributes.get("style") == Some("dashed")
    }
}

/// Vertices, edges and graph-level attributes
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    pub attributes: Attributes,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Add an edge from `start` to `end`, returning it for attribute setup
    pub fn add_edge(&mut self, start: VertexId, end: VertexId) -> &mut Edge {
        self.edges.push(Edge {
            start,
            end,
            attributes: Attributes::new(),
        });
        let last = self.edges.len() - 1;
        &mut self.edges[last]
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id)
    }

    /// Find a vertex by its `id` attribute
    pub fn find_vertex(&self, id: &str) -> Option<VertexId> {
        self.vertices.iter().position(|v| v.id() == id)
    }

    /// Returns true if an edge already runs from `start` to `end`
    pub fn has_edge(&self, start: VertexId, end: VertexId) -> bool {
        self.edges.iter().any(|e| e.start == start && e.end == end)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Start and end vertices of an edge
    pub fn endpoints(&self, edge: &Edge) -> Option<(&Vertex, &Vertex)> {
        Some((self.vertex(edge.start)?, self.vertex(edge.end)?))
    }
}
