// Two-row layout geometry

use crate::agent::AgentKind;
use serde::{Deserialize, Serialize};

/// Canvas coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset
    pub y: f64,
}

impl Point {
    /// Create a point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Box extent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Size {
    /// Create a size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Row and spacing constants for the two-tier layout
///
/// Main agents sit on the upper row, child agents on the lower row with a
/// narrower spacing. Nothing here is derived from the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Upper row y
    pub main_row_y: f64,
    /// x of the leftmost main agent
    pub main_origin_x: f64,
    /// Horizontal step between main agents
    pub main_spacing: f64,
    /// Lower row y
    pub child_row_y: f64,
    /// x of the leftmost child agent
    pub child_origin_x: f64,
    /// Horizontal step between child agents
    pub child_spacing: f64,
    /// Main agent box
    pub main_size: Size,
    /// Child agent box
    pub child_size: Size,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            main_row_y: 60.0,
            main_origin_x: 80.0,
            main_spacing: 220.0,
            child_row_y: 260.0,
            child_origin_x: 40.0,
            child_spacing: 160.0,
            main_size: Size::new(160.0, 56.0),
            child_size: Size::new(140.0, 48.0),
        }
    }
}

impl LayoutConfig {
    /// Top-left corner of the `slot`-th agent of `kind`
    pub fn position(&self, kind: AgentKind, slot: usize) -> Point {
        let slot = slot as f64;
        match kind {
            AgentKind::Main => Point::new(self.main_origin_x + slot * self.main_spacing, self.main_row_y),
            AgentKind::Child => Point::new(self.child_origin_x + slot * self.child_spacing, self.child_row_y),
        }
    }

    /// Box of an agent of `kind`
    pub fn size(&self, kind: AgentKind) -> Size {
        match kind {
            AgentKind::Main => self.main_size,
            AgentKind::Child => self.child_size,
        }
    }

    /// Where edges attach: center-bottom of main agents, center-top of child agents
    pub fn anchor(&self, kind: AgentKind, position: Point) -> Point {
        let size = self.size(kind);
        match kind {
            AgentKind::Main => Point::new(position.x + size.width / 2.0, position.y + size.height),
            AgentKind::Child => Point::new(position.x + size.width / 2.0, position.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_use_their_own_spacing() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.position(AgentKind::Main, 0), Point::new(80.0, 60.0));
        assert_eq!(layout.position(AgentKind::Main, 2), Point::new(520.0, 60.0));
        assert_eq!(layout.position(AgentKind::Child, 0), Point::new(40.0, 260.0));
        assert_eq!(layout.position(AgentKind::Child, 3), Point::new(520.0, 260.0));
    }

    #[test]
    fn anchors_sit_on_box_boundary() {
        let layout = LayoutConfig::default();
        let main = layout.anchor(AgentKind::Main, Point::new(80.0, 60.0));
        assert_eq!(main, Point::new(160.0, 116.0));

        let child = layout.anchor(AgentKind::Child, Point::new(40.0, 260.0));
        assert_eq!(child, Point::new(110.0, 260.0));
    }
}
