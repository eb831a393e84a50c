//! legraphe - Agent Relationship Graph
//!
//! *Le Graphe* (The Graph) - Two-tier layout of main and child agents with
//! directed child-to-parent edges and a derived activity feed

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Activity entries derived from edges.
pub mod activity;
/// Agent node data model.
pub mod agent;
/// Two-row layout geometry.
pub mod layout;
/// Graph construction from a flat agent list.
pub mod relationship;

pub use activity::{derive_activity, ActivityEntry, ActivityFeed};
pub use agent::{AgentKind, AgentNode, AgentStatus};
pub use layout::{LayoutConfig, Point, Size};
pub use relationship::{build, AgentGraph, Edge, GraphBuilder, GraphStats};

/// Graph library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
