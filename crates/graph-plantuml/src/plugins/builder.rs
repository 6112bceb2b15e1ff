//! Graph builder feeding generators
//!
//! The builder turns declarations into vertices carrying the attributes a
//! generator reads: `id`, `stereotype`, `group` and the formatted member block
//! under the formatter's label key. Parents and interfaces are added on the
//! way, connected with generalization and realization edges. Extensions get
//! their constants and functions only.

use tracing::{debug, span, trace, Level};

use crate::core::{Declaration, DeclarationKind, Formatter, Generator, Graph, Vertex, VertexId};

/// Builds a [`Graph`] of declarations formatted for one generator
pub struct GraphBuilder<'a, G: Generator> {
    generator: &'a G,
    graph: Graph,
}

impl<'a, G: Generator> GraphBuilder<'a, G> {
    pub fn new(generator: &'a G) -> Self {
        Self {
            generator,
            graph: Graph::new(),
        }
    }

    /// Add a declaration with its ancestors and interfaces
    ///
    /// Declarations are deduplicated by qualified name. Adding a declaration
    /// that is already in the graph, for example one first seen as the parent
    /// of another, replaces that vertex's content with the new declaration.
    /// Parents and interfaces never replace an existing vertex.
    pub fn add_declaration(&mut self, declaration: &Declaration) -> VertexId {
        let add_span = span!(Level::DEBUG, "add_declaration", declaration = %declaration.name);
        let _enter = add_span.enter();

        let vertex = self.vertex_for(declaration);
        let id = match self.graph.find_vertex(&declaration.name) {
            Some(existing) => {
                debug!(declaration = %declaration.name, "Replacing vertex content");
                if let Some(slot) = self.graph.vertex_mut(existing) {
                    *slot = vertex;
                }
                existing
            }
            None => self.graph.add_vertex(vertex),
        };

        self.add_relations(id, declaration);
        id
    }

    /// Vertex of a parent or interface, reusing any existing one
    fn add_related(&mut self, declaration: &Declaration) -> VertexId {
        if let Some(existing) = self.graph.find_vertex(&declaration.name) {
            trace!(declaration = %declaration.name, "Declaration already in graph");
            return existing;
        }

        let vertex = self.vertex_for(declaration);
        let id = self.graph.add_vertex(vertex);
        self.add_relations(id, declaration);
        id
    }

    fn add_relations(&mut self, id: VertexId, declaration: &Declaration) {
        if let Some(parent) = &declaration.parent {
            let parent_id = self.add_related(parent);
            if !self.graph.has_edge(id, parent_id) {
                self.graph.add_edge(id, parent_id);
                debug!(parent = %parent.name, "Added generalization");
            }
        }

        for interface in &declaration.interfaces {
            let interface_id = self.add_related(interface);
            if !self.graph.has_edge(id, interface_id) {
                self.graph
                    .add_edge(id, interface_id)
                    .attributes
                    .set("style", "dashed");
                debug!(interface = %interface.name, "Added realization");
            }
        }
    }

    /// Vertex with the stereotype, group and cached member block of `declaration`
    fn vertex_for(&self, declaration: &Declaration) -> Vertex {
        let formatter = self.generator.formatter();
        let label = match declaration.kind {
            DeclarationKind::Extension => formatter.format_extension_members(declaration),
            _ => formatter.format_class_label(declaration),
        };

        let mut vertex = Vertex::new(declaration.clone());
        vertex.attributes.set("stereotype", vertex_stereotype(declaration));
        if let Some(group) = &declaration.group {
            vertex.attributes.set("group", group.clone());
        }
        vertex.attributes.set(formatter.label_key(), label);
        vertex
    }

    /// Add every declaration of `declarations`, in order
    pub fn add_declarations<'d>(&mut self, declarations: impl IntoIterator<Item = &'d Declaration>) {
        for declaration in declarations {
            self.add_declaration(declaration);
        }
    }

    /// Set a graph-level attribute such as `graph.rankdir`
    pub fn set_graph_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.graph.attributes.set(key, value);
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Build the script of everything added so far
    pub fn build_script(&self, encode: bool) -> String {
        self.generator.build_script(&self.graph, encode)
    }
}

/// PlantUML keyword for a declaration; extensions are drawn as classes
fn vertex_stereotype(declaration: &Declaration) -> &'static str {
    match declaration.kind {
        DeclarationKind::Extension => "class",
        _ => declaration.stereotype(),
    }
}
