use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ir::{Edge, Graph, Node};
use crate::templates::{self, WorkflowKind};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid run state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown workflow type: {0}")]
    UnknownWorkflow(String),
}

/// Lifecycle status of a run or a single step. Anything the upstream
/// service sends that we do not recognize folds into `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RunStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn from_token(token: &str) -> Self {
        match token {
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl From<String> for RunStatus {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

/// Per-step execution record, as reported by the run service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeState {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub duration: Option<f32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A snapshot of one workflow run. The graph itself may arrive three
/// ways: an explicit `graph`, the run's own `nodes` + `edges`, or just a
/// `workflow` type naming a built-in template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub workflow: Option<String>,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub current_node: Option<String>,
    #[serde(default)]
    pub nodes: Vec<NodeState>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub graph: Option<Graph>,
}

impl RunState {
    /// A run with no execution data over a built-in template, used to
    /// preview a workflow shape before anything has executed.
    pub fn for_template(kind: WorkflowKind) -> Self {
        Self {
            workflow: Some(kind.as_token().to_string()),
            ..Self::default()
        }
    }

    /// Resolve the graph to draw. Preference order: explicit `graph`,
    /// the run's own nodes and edges, the template named by `workflow`,
    /// and finally the `daily_agent` template. Unknown workflow names
    /// fall through to the final default rather than failing, matching
    /// the tolerant behavior of the original monitor.
    pub fn resolve_graph(&self) -> Graph {
        if let Some(graph) = &self.graph {
            return graph.clone();
        }
        if !self.nodes.is_empty() && !self.edges.is_empty() {
            let nodes = self
                .nodes
                .iter()
                .map(|state| Node {
                    id: state.id.clone(),
                    label: state.label.clone(),
                    icon: None,
                    position: None,
                })
                .collect();
            return Graph {
                nodes,
                edges: self.edges.clone(),
            };
        }
        let kind = self
            .workflow
            .as_deref()
            .and_then(WorkflowKind::from_token)
            .unwrap_or(WorkflowKind::DailyAgent);
        templates::template(kind).clone()
    }
}

pub fn parse_run_state(input: &str) -> Result<RunState, RunError> {
    Ok(serde_json::from_str(input)?)
}
