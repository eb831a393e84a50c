// Activity feed derived from graph edges

use crate::relationship::Edge;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Minutes past midnight of the first entry's time label
pub const FEED_START_MINUTES: usize = 9 * 60;

/// One line of the activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// `HH:MM` label derived from the entry index
    pub time: String,
    /// Human-readable description naming both agents
    pub text: String,
    /// Mirrors the edge's activity
    pub active: bool,
}

impl ActivityEntry {
    fn from_edge(index: usize, edge: &Edge) -> Self {
        let text = if edge.active {
            format!("{} is working with {} (active)", edge.child_name, edge.parent_name)
        } else {
            format!("{} is waiting on {} (idle)", edge.child_name, edge.parent_name)
        };
        Self {
            time: time_label(index),
            text,
            active: edge.active,
        }
    }
}

/// Lazy feed over a slice of edges, one entry per edge in edge order
///
/// Cloning the feed, or calling [`derive_activity`] again, restarts it.
#[derive(Debug, Clone)]
pub struct ActivityFeed<'a> {
    edges: std::iter::Enumerate<std::slice::Iter<'a, Edge>>,
}

impl<'a> Iterator for ActivityFeed<'a> {
    type Item = ActivityEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.edges
            .next()
            .map(|(index, edge)| ActivityEntry::from_edge(index, edge))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}

impl ExactSizeIterator for ActivityFeed<'_> {}

impl FusedIterator for ActivityFeed<'_> {}

/// Feed of activity entries for `edges`
pub fn derive_activity(edges: &[Edge]) -> ActivityFeed<'_> {
    ActivityFeed {
        edges: edges.iter().enumerate(),
    }
}

/// `HH:MM` for the `index`-th entry, one minute apart
///
/// Hours keep counting past 23 so later entries never sort before earlier ones.
fn time_label(index: usize) -> String {
    let minutes = FEED_START_MINUTES + index;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
