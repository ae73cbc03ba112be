use serde::{Deserialize, Serialize};

/// Screen coordinates, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl Node {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            icon: None,
            position: None,
        }
    }

    /// Display label: explicit label if present, otherwise the id with
    /// underscores spaced out.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => self.id.replace('_', " "),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: None,
            source: source.to_string(),
            target: target.to_string(),
            label: None,
        }
    }

    /// An edge that leaves and re-enters the same node. Self-loops never
    /// constrain ranking and get a dedicated render path.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// A workflow graph as supplied by the caller. Node order is meaningful:
/// ranking seeds its queue in input order, so two graphs with the same
/// nodes in a different order are different inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// True when every node carries an explicit position, which lets the
    /// layout pass positions through untouched.
    pub fn fully_positioned(&self) -> bool {
        self.nodes.iter().all(|n| n.position.is_some())
    }
}
