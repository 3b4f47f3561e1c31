use eframe::egui;

use crate::geometry::{distance_to_segment, within_radius};

/// A vertex of the diagram, stored in local (unpanned) coordinates.
///
/// Nodes have no stored identity: a node is addressed by its position in
/// [`Graph::nodes`] and labelled with that position plus one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Node {
    pub x: f32,
    pub y: f32,
}

impl Node {
    pub fn from_pos2(p: egui::Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }
}

/// An undirected link between two distinct nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }

    pub fn touches(&self, node: usize) -> bool {
        self.a == node || self.b == node
    }
}

/// Outcome of a node-edit press: either an existing node was close enough to
/// grab, or a fresh node was appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodePick {
    Grabbed(usize),
    Created(usize),
}

impl NodePick {
    pub fn index(self) -> usize {
        match self {
            NodePick::Grabbed(i) | NodePick::Created(i) => i,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, index: usize) -> Option<Node> {
        self.nodes.get(index).copied()
    }

    pub fn push_node(&mut self, at: egui::Pos2) -> usize {
        self.nodes.push(Node::from_pos2(at));
        self.nodes.len() - 1
    }

    /// Grabs the first node within `grab_radius` of `at`, or appends a new
    /// node there when none is close enough.
    pub fn place_node(&mut self, at: egui::Pos2, grab_radius: f32) -> NodePick {
        match self.find_node_at(at, grab_radius) {
            Some(index) => NodePick::Grabbed(index),
            None => NodePick::Created(self.push_node(at)),
        }
    }

    /// Removes the node at `index` together with every edge touching it.
    /// Edges into later nodes are renumbered to follow the shift.
    pub fn remove_node(&mut self, index: usize) -> Option<Node> {
        if index >= self.nodes.len() {
            return None;
        }
        let node = self.nodes.remove(index);
        self.edges.retain(|e| !e.touches(index));
        for edge in &mut self.edges {
            if edge.a > index {
                edge.a -= 1;
            }
            if edge.b > index {
                edge.b -= 1;
            }
        }
        Some(node)
    }

    pub fn remove_node_at(&mut self, at: egui::Pos2, radius: f32) -> Option<usize> {
        let index = self.find_node_at(at, radius)?;
        self.remove_node(index).map(|_| index)
    }

    pub fn translate_node(&mut self, index: usize, delta: egui::Vec2) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.x += delta.x;
            node.y += delta.y;
        }
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Links `a` and `b`. Self-loops, dangling indices and parallel edges are
    /// refused; the return value says whether an edge was stored.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
        if a == b || a >= self.nodes.len() || b >= self.nodes.len() || self.has_edge(a, b) {
            return false;
        }
        self.edges.push(Edge { a, b });
        true
    }

    pub fn remove_edge(&mut self, index: usize) -> Option<Edge> {
        if index >= self.edges.len() {
            return None;
        }
        Some(self.edges.remove(index))
    }

    pub fn remove_edge_at(&mut self, at: egui::Pos2, radius: f32) -> Option<usize> {
        let index = self.find_edge_at(at, radius)?;
        self.remove_edge(index).map(|_| index)
    }

    /// First node in insertion order whose centre lies strictly within
    /// `radius` of `at`. Overlapping nodes resolve to the oldest one.
    pub fn find_node_at(&self, at: egui::Pos2, radius: f32) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| within_radius(at, n.to_pos2(), radius))
    }

    /// Nearest edge to `at`, provided it is strictly closer than `radius`.
    /// Every edge is measured; this is not a first-match scan.
    pub fn find_edge_at(&self, at: egui::Pos2, radius: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, edge) in self.edges.iter().enumerate() {
            let Some((a, b)) = self.edge_endpoints(edge) else {
                continue;
            };
            let d = distance_to_segment(at, a, b);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best.filter(|(_, d)| *d < radius).map(|(i, _)| i)
    }

    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(egui::Pos2, egui::Pos2)> {
        let a = self.nodes.get(edge.a)?;
        let b = self.nodes.get(edge.b)?;
        Some((a.to_pos2(), b.to_pos2()))
    }
}
