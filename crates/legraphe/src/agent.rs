// Agent node data model

use crate::layout::Point;
use serde::{Deserialize, Serialize};

/// Tier of an agent in the hierarchy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Top-level agent
    Main,
    /// Agent working under one or more main agents
    Child,
}

/// Whether an agent is currently working
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Processing
    Active,
    /// Waiting
    #[default]
    Idle,
}

impl AgentStatus {
    /// Lowercase label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
        }
    }
}

/// One agent as supplied by the caller and returned positioned by the builder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentNode {
    /// Opaque identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Main or child
    pub kind: AgentKind,

    /// Active or idle
    #[serde(default)]
    pub status: AgentStatus,

    /// Ids of the main agents this child reports to; ignored on main agents
    #[serde(default)]
    pub parent_refs: Vec<String>,

    /// Top-left corner, assigned by layout
    #[serde(default)]
    pub position: Point,
}

impl AgentNode {
    /// A main agent
    pub fn main(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: AgentKind::Main,
            status: AgentStatus::Idle,
            parent_refs: Vec::new(),
            position: Point::default(),
        }
    }

    /// A child agent reporting to `parents`
    pub fn child<I, S>(id: impl Into<String>, name: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            kind: AgentKind::Child,
            status: AgentStatus::Idle,
            parent_refs: parents.into_iter().map(Into::into).collect(),
            position: Point::default(),
        }
    }

    /// Set the status
    pub fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = status;
        self
    }

    /// Shorthand for an active agent
    pub fn active(self) -> Self {
        self.with_status(AgentStatus::Active)
    }

    /// True for main agents
    pub fn is_main(&self) -> bool {
        self.kind == AgentKind::Main
    }

    /// True if `parent_id` is among this agent's parent references
    pub fn references(&self, parent_id: &str) -> bool {
        self.parent_refs.iter().any(|p| p == parent_id)
    }

    /// Name to display, falling back to the id
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
