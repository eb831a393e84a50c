// Agent relationship graph construction

use crate::agent::{AgentKind, AgentNode, AgentStatus};
use crate::layout::{LayoutConfig, Point, Size};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Directed link from a child agent to one of its main agents
///
/// Endpoints are copied from node positions when the graph is built; an edge
/// holds no reference back into the node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Child agent id
    pub child_id: String,

    /// Main agent id
    pub parent_id: String,

    /// Child display name
    pub child_name: String,

    /// Main display name
    pub parent_name: String,

    /// Center-top of the child box
    pub from: Point,

    /// Center-bottom of the main box
    pub to: Point,

    /// Both ends are active
    pub active: bool,

    /// Display label
    pub label: String,
}

/// Counts over a built graph
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphStats {
    /// Main agents
    pub main_count: usize,
    /// Child agents
    pub child_count: usize,
    /// Edges
    pub edge_count: usize,
    /// Edges with both ends active
    pub active_edge_count: usize,
    /// Ids of child agents with no resolved parent
    pub orphan_children: Vec<String>,
}

/// Positioned agents and their edges
///
/// Read-only once built: `topology` indexes into `nodes` and `edges`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentGraph {
    nodes: Vec<AgentNode>,

    edges: Vec<Edge>,

    /// Node weight = index into `nodes`, edge weight = index into `edges`
    #[serde(skip)]
    topology: DiGraph<usize, usize>,

    #[serde(skip)]
    layout: LayoutConfig,
}

impl AgentGraph {
    /// Agents in input order, positioned
    pub fn nodes(&self) -> &[AgentNode] {
        &self.nodes
    }

    /// Edges in discovery order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Owned nodes and edges, dropping the topology
    pub fn into_parts(self) -> (Vec<AgentNode>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    /// True if there are no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child agents linked to the main agent(s) with `main_id`, in edge order
    pub fn children_of(&self, main_id: &str) -> Vec<&AgentNode> {
        self.linked(main_id, AgentKind::Main, Direction::Incoming)
    }

    /// Main agents the child agent(s) with `child_id` link to, in edge order
    pub fn parents_of(&self, child_id: &str) -> Vec<&AgentNode> {
        self.linked(child_id, AgentKind::Child, Direction::Outgoing)
    }

    /// Counts and orphan detection
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            edge_count: self.edges.len(),
            active_edge_count: self.edges.iter().filter(|e| e.active).count(),
            ..GraphStats::default()
        };

        for idx in self.topology.node_indices() {
            let node = &self.nodes[self.topology[idx]];
            match node.kind {
                AgentKind::Main => stats.main_count += 1,
                AgentKind::Child => {
                    stats.child_count += 1;
                    let linked = self
                        .topology
                        .edges_directed(idx, Direction::Outgoing)
                        .next()
                        .is_some();
                    if !linked {
                        stats.orphan_children.push(node.id.clone());
                    }
                }
            }
        }

        stats
    }

    /// Extent needed to draw every node box, measured from the origin
    pub fn bounds(&self) -> Size {
        self.nodes.iter().fold(Size::default(), |acc, node| {
            let size = self.layout.size(node.kind);
            Size::new(
                acc.width.max(node.position.x + size.width),
                acc.height.max(node.position.y + size.height),
            )
        })
    }

    fn linked(&self, id: &str, kind: AgentKind, direction: Direction) -> Vec<&AgentNode> {
        let mut hits: Vec<(usize, usize)> = Vec::new();
        for idx in self.topology.node_indices() {
            let node = &self.nodes[self.topology[idx]];
            if node.kind != kind || node.id != id {
                continue;
            }
            for edge in self.topology.edges_directed(idx, direction) {
                let other = match direction {
                    Direction::Incoming => edge.source(),
                    Direction::Outgoing => edge.target(),
                };
                hits.push((*edge.weight(), self.topology[other]));
            }
        }
        hits.sort_unstable();
        hits.into_iter().map(|(_, node)| &self.nodes[node]).collect()
    }
}

/// Builds [`AgentGraph`]s with a fixed layout
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    layout: LayoutConfig,
}

impl GraphBuilder {
    /// Create a builder with the default layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom layout
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Active layout
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Position `agents` and derive child-to-main edges
    ///
    /// Positions follow input order within each row. Each child gets one edge
    /// per main agent whose id it references; references that resolve to no
    /// main agent are skipped.
    pub fn build(&self, agents: &[AgentNode]) -> AgentGraph {
        let mut nodes = agents.to_vec();
        let mut topology = DiGraph::with_capacity(nodes.len(), nodes.len());
        let mut indices: Vec<NodeIndex> = Vec::with_capacity(nodes.len());

        let (mut main_slot, mut child_slot) = (0, 0);
        for (i, node) in nodes.iter_mut().enumerate() {
            let slot = match node.kind {
                AgentKind::Main => &mut main_slot,
                AgentKind::Child => &mut child_slot,
            };
            node.position = self.layout.position(node.kind, *slot);
            *slot += 1;
            indices.push(topology.add_node(i));
        }

        let mains: Vec<usize> = (0..nodes.len()).filter(|&i| nodes[i].is_main()).collect();
        let mut edges = Vec::new();

        for (c, child) in nodes.iter().enumerate() {
            if child.kind != AgentKind::Child {
                continue;
            }

            for &m in &mains {
                let parent = &nodes[m];
                if !child.references(&parent.id) {
                    continue;
                }
                topology.add_edge(indices[c], indices[m], edges.len());
                edges.push(self.edge(child, parent));
            }

            for missing in child
                .parent_refs
                .iter()
                .filter(|r| !mains.iter().any(|&m| nodes[m].id == **r))
            {
                debug!("Child agent {} references unknown main agent {}", child.id, missing);
            }
        }

        debug!("Built agent graph: {} nodes, {} edges", nodes.len(), edges.len());

        AgentGraph {
            nodes,
            edges,
            topology,
            layout: self.layout,
        }
    }

    fn edge(&self, child: &AgentNode, parent: &AgentNode) -> Edge {
        Edge {
            child_id: child.id.clone(),
            parent_id: parent.id.clone(),
            child_name: child.label().to_string(),
            parent_name: parent.label().to_string(),
            from: self.layout.anchor(AgentKind::Child, child.position),
            to: self.layout.anchor(AgentKind::Main, parent.position),
            active: child.status == AgentStatus::Active && parent.status == AgentStatus::Active,
            label: format!("{} → {}", child.label(), parent.label()),
        }
    }
}

/// Build with the default layout
pub fn build(agents: &[AgentNode]) -> AgentGraph {
    GraphBuilder::new().build(agents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_builds_empty_graph() {
        let graph = build(&[]);
        assert!(graph.is_empty());
        assert!(graph.edges().is_empty());
        assert_eq!(graph.bounds(), Size::default());
        assert_eq!(graph.stats(), GraphStats::default());
    }

    #[test]
    fn positions_follow_input_order_per_row() {
        let graph = build(&[
            AgentNode::child("c1", "Writer", ["m1"]),
            AgentNode::main("m1", "Planner"),
            AgentNode::child("c2", "Critic", ["m1"]),
            AgentNode::main("m2", "Router"),
        ]);

        let layout = LayoutConfig::default();
        assert_eq!(graph.nodes()[0].position, layout.position(AgentKind::Child, 0));
        assert_eq!(graph.nodes()[1].position, layout.position(AgentKind::Main, 0));
        assert_eq!(graph.nodes()[2].position, layout.position(AgentKind::Child, 1));
        assert_eq!(graph.nodes()[3].position, layout.position(AgentKind::Main, 1));
    }

    #[test]
    fn edge_snapshots_anchors_and_activity() {
        let graph = build(&[
            AgentNode::main("m1", "Planner").active(),
            AgentNode::child("c1", "Writer", ["m1"]).active(),
            AgentNode::child("c2", "Critic", ["m1"]),
        ]);

        assert_eq!(graph.edges().len(), 2);
        let first = &graph.edges()[0];
        assert_eq!(first.from, Point::new(110.0, 260.0));
        assert_eq!(first.to, Point::new(160.0, 116.0));
        assert!(first.active);
        assert_eq!(first.label, "Writer → Planner");
        assert!(!graph.edges()[1].active);
    }

    #[test]
    fn multi_parent_child_gets_one_edge_per_parent() {
        let graph = build(&[
            AgentNode::main("m1", "Planner"),
            AgentNode::main("m2", "Router"),
            AgentNode::child("c1", "Worker", ["m2", "m1", "m1"]),
        ]);

        let parents: Vec<_> = graph.edges().iter().map(|e| e.parent_id.as_str()).collect();
        assert_eq!(parents, vec!["m1", "m2"]);
    }

    #[test]
    fn duplicate_main_ids_each_receive_an_edge() {
        let graph = build(&[
            AgentNode::main("m1", "Planner A"),
            AgentNode::main("m1", "Planner B"),
            AgentNode::child("c1", "Worker", ["m1"]),
        ]);

        assert_eq!(graph.edges().len(), 2);
        assert_ne!(graph.edges()[0].to, graph.edges()[1].to);
    }

    #[test]
    fn unresolved_reference_is_silently_skipped() {
        let graph = build(&[
            AgentNode::main("m1", "Planner"),
            AgentNode::child("c1", "Lost", ["m9"]),
            AgentNode::child("c2", "Found", ["m1"]),
        ]);

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.edges()[0].child_id, "c2");
        assert_eq!(graph.stats().orphan_children, vec!["c1".to_string()]);
    }

    #[test]
    fn main_agents_never_emit_edges() {
        let mut main = AgentNode::main("m1", "Planner");
        main.parent_refs = vec!["m2".to_string()];
        let graph = build(&[main, AgentNode::main("m2", "Router")]);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn neighbour_queries_follow_edge_order() {
        let graph = build(&[
            AgentNode::main("m1", "Planner"),
            AgentNode::main("m2", "Router"),
            AgentNode::child("c1", "Writer", ["m1", "m2"]),
            AgentNode::child("c2", "Critic", ["m1"]),
        ]);

        let children: Vec<_> = graph.children_of("m1").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(children, vec!["c1", "c2"]);

        let parents: Vec<_> = graph.parents_of("c1").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(parents, vec!["m1", "m2"]);

        assert!(graph.children_of("c1").is_empty());
        assert!(graph.parents_of("nobody").is_empty());
    }

    #[test]
    fn stats_count_kinds_and_active_edges() {
        let graph = build(&[
            AgentNode::main("m1", "Planner").active(),
            AgentNode::main("m2", "Router"),
            AgentNode::child("c1", "Writer", ["m1", "m2"]).active(),
        ]);

        let stats = graph.stats();
        assert_eq!(stats.main_count, 2);
        assert_eq!(stats.child_count, 1);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.active_edge_count, 1);
        assert!(stats.orphan_children.is_empty());
    }

    #[test]
    fn bounds_cover_both_rows() {
        let graph = build(&[
            AgentNode::main("m1", "Planner"),
            AgentNode::child("c1", "Writer", ["m1"]),
            AgentNode::child("c2", "Critic", ["m1"]),
        ]);
        // Second child at x = 200, width 140; lower row at y = 260, height 48.
        assert_eq!(graph.bounds(), Size::new(340.0, 308.0));
    }

    #[test]
    fn queries_survive_edits_to_extracted_parts() {
        let graph = build(&[
            AgentNode::main("m", "Planner"),
            AgentNode::child("c", "Writer", ["m"]),
        ]);

        let (mut nodes, mut edges) = graph.clone().into_parts();
        nodes.pop();
        edges.clear();
        assert_eq!(nodes.len(), 1);

        let stats = graph.stats();
        assert_eq!((stats.main_count, stats.child_count, stats.edge_count), (1, 1, 1));
        assert_eq!(graph.children_of("m").len(), 1);
        assert_eq!(graph.parents_of("c")[0].id, "m");
    }
}
