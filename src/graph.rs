// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph data structures for the analyzed file's dependency graph

use crate::types::{GraphData, GraphEdge, GraphNode};
use anyhow::{Context, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// The dependency graph with petgraph backing for adjacency queries.
///
/// Node and edge identity comes from the analysis service and is never
/// mutated client-side; selection and scrolling in the viewer are
/// presentation state, not part of this model.
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: DiGraph<String, String>,
    /// Map from node ID to node index
    node_indices: HashMap<String, NodeIndex>,
    /// The node and edge lists as received
    pub data: GraphData,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            data: GraphData::default(),
        }
    }

    /// Build the graph from a service response.
    ///
    /// Edges referencing unknown endpoints are skipped rather than
    /// rejected; the viewer renders what it can.
    #[must_use]
    pub fn from_data(data: GraphData) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in &data.nodes {
            if node_indices.contains_key(&node.id) {
                continue; // duplicate id, first one wins
            }
            let idx = graph.add_node(node.id.clone());
            node_indices.insert(node.id.clone(), idx);
        }

        for edge in &data.edges {
            if let (Some(&from_idx), Some(&to_idx)) = (
                node_indices.get(&edge.source),
                node_indices.get(&edge.target),
            ) {
                graph.add_edge(from_idx, to_idx, edge.id.clone());
            }
        }

        Self {
            graph,
            node_indices,
            data,
        }
    }

    /// Get a node by ID
    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.data.nodes.iter().find(|n| n.id == id)
    }

    /// Get all nodes
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.data.nodes
    }

    /// Get all edges
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.data.edges
    }

    /// Get edges leaving a specific node
    #[must_use]
    pub fn edges_from(&self, node_id: &str) -> Vec<&GraphEdge> {
        self.data
            .edges
            .iter()
            .filter(|e| e.source == node_id)
            .collect()
    }

    /// Get edges arriving at a specific node
    #[must_use]
    pub fn edges_to(&self, node_id: &str) -> Vec<&GraphEdge> {
        self.data
            .edges
            .iter()
            .filter(|e| e.target == node_id)
            .collect()
    }

    /// Nodes directly reachable from `node_id`, in insertion order
    #[must_use]
    pub fn neighbors(&self, node_id: &str) -> Vec<&GraphNode> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors(idx)
            .filter_map(|n| self.get_node(&self.graph[n]))
            .collect()
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.data.nodes.len()
    }

    /// Get edge count (only edges with resolvable endpoints)
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.nodes.is_empty()
    }

    /// Export to DOT format for Graphviz
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph dependencies {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        for node in &self.data.nodes {
            let label = format!("{}\\n{}", node.display_label(), node.node_type);
            dot.push_str(&format!("  \"{}\" [label=\"{}\"];\n", node.id, label));
        }

        dot.push('\n');

        for edge in &self.data.edges {
            let label = edge.label.as_deref().unwrap_or("");
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                edge.source, edge.target, label
            ));
        }

        // Cluster class nodes so containment is visible in the render
        let classes: Vec<_> = self
            .data
            .nodes
            .iter()
            .filter(|n| n.node_type == "class")
            .collect();
        if !classes.is_empty() {
            dot.push_str("\n  subgraph cluster_classes {\n");
            dot.push_str("    label=\"classes\";\n");
            dot.push_str("    style=dashed;\n");
            for node in classes {
                dot.push_str(&format!("    \"{}\";\n", node.id));
            }
            dot.push_str("  }\n");
        }

        dot.push_str("}\n");
        dot
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.data).context("Failed to serialize graph to JSON")
    }
}
