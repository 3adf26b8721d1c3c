// Cell - identity-bearing vertex or edge of the diagram

use crate::model::style::AppliedStyle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a cell
///
/// Changes hold a `CellId`, never the cell itself: the model arena is the
/// only owner of cell data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(Uuid);

impl CellId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CellId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Arbitrary user payload attached to a cell (label, business object, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellValue(serde_json::Value);

impl CellValue {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn null() -> Self {
        Self(serde_json::Value::Null)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self(serde_json::Value::String(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self(serde_json::json!(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self(serde_json::Value::Bool(value))
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

/// Which end of an edge a terminal reference describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerminalEnd {
    Source,
    Target,
}

/// A vertex or an edge in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub value: CellValue,
    pub style: AppliedStyle,
    pub visible: bool,
    pub collapsed: bool,
    /// True for edges, false for vertices
    pub edge: bool,
    pub source: Option<CellId>,
    pub target: Option<CellId>,
    pub parent: Option<CellId>,
    pub children: Vec<CellId>,
}

impl Cell {
    /// Create a vertex with a fresh id
    pub fn vertex(value: impl Into<CellValue>) -> Self {
        Self {
            id: CellId::new(),
            value: value.into(),
            style: AppliedStyle::default(),
            visible: true,
            collapsed: false,
            edge: false,
            source: None,
            target: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create an unconnected edge with a fresh id
    pub fn edge(value: impl Into<CellValue>) -> Self {
        Self {
            edge: true,
            ..Self::vertex(value)
        }
    }

    pub fn with_style(mut self, style: AppliedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn terminal(&self, end: TerminalEnd) -> Option<CellId> {
        match end {
            TerminalEnd::Source => self.source,
            TerminalEnd::Target => self.target,
        }
    }

    pub(crate) fn terminal_mut(&mut self, end: TerminalEnd) -> &mut Option<CellId> {
        match end {
            TerminalEnd::Source => &mut self.source,
            TerminalEnd::Target => &mut self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_id_roundtrips_through_display() {
        let id = CellId::new();
        let parsed: CellId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_cell_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<CellId>().is_err());
    }

    #[test]
    fn test_vertex_defaults() {
        let cell = Cell::vertex("A");
        assert!(cell.visible);
        assert!(!cell.collapsed);
        assert!(!cell.edge);
        assert_eq!(cell.value.as_str(), Some("A"));
        assert!(cell.children.is_empty());
    }

    #[test]
    fn test_edge_terminals() {
        let mut edge = Cell::edge(CellValue::null());
        let source = CellId::new();
        assert!(edge.edge);
        *edge.terminal_mut(TerminalEnd::Source) = Some(source);
        assert_eq!(edge.terminal(TerminalEnd::Source), Some(source));
        assert_eq!(edge.terminal(TerminalEnd::Target), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(CellValue::from("label").to_string(), "label");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::null().to_string(), "null");
    }
}
