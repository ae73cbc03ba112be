//! Render plan: the derived, presentation-ready view of a run. Layout
//! positions, per-edge render kinds, and per-node visuals are all decided
//! here once; the render layer consumes the plan without re-deriving
//! anything.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::{EdgeRouting, LayoutConfig};
use crate::ir::Edge;
use crate::layout::compute_layout;
use crate::run::{NodeState, RunState, RunStatus};
use crate::theme::Theme;

/// How an edge is drawn. Self-loops must visibly leave and return to the
/// same node, so they are a distinct kind rather than a styling flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    Straight,
    Step,
    SelfLoop,
}

impl EdgeKind {
    fn from_routing(routing: EdgeRouting) -> Self {
        match routing {
            EdgeRouting::Straight => Self::Straight,
            EdgeRouting::Step => Self::Step,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgePlan {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub kind: EdgeKind,
    pub is_active: bool,
}

impl EdgePlan {
    pub fn is_self_loop(&self) -> bool {
        self.kind == EdgeKind::SelfLoop
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeVisual {
    pub color: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedNode {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub x: f32,
    pub y: f32,
    pub rank: usize,
    pub status: RunStatus,
    pub duration: Option<f32>,
    pub visual: NodeVisual,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    pub nodes: Vec<PlannedNode>,
    pub edges: Vec<EdgePlan>,
    pub width: f32,
    pub height: f32,
}

impl RenderPlan {
    pub fn node(&self, id: &str) -> Option<&PlannedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Index per-step states by node id for O(1) resolution.
pub fn status_index(states: &[NodeState]) -> HashMap<&str, &NodeState> {
    states.iter().map(|s| (s.id.as_str(), s)).collect()
}

/// Classify every edge once. An edge is active while the current node is
/// its source, which is what animates the outgoing arrows of the step
/// being executed. Ids are generated as `e-{index}` when absent.
pub fn classify_edges(
    edges: &[Edge],
    current_node: Option<&str>,
    routing: EdgeRouting,
) -> Vec<EdgePlan> {
    edges
        .iter()
        .enumerate()
        .map(|(idx, edge)| EdgePlan {
            id: edge.id.clone().unwrap_or_else(|| format!("e-{idx}")),
            source: edge.source.clone(),
            target: edge.target.clone(),
            label: edge.label.clone(),
            kind: if edge.is_self_loop() {
                EdgeKind::SelfLoop
            } else {
                EdgeKind::from_routing(routing)
            },
            is_active: current_node.is_some_and(|current| current == edge.source),
        })
        .collect()
}

/// Map a node to its visual treatment: a status color (defaulting to
/// pending when the status map has no entry), with emphasis overriding
/// the status color while the node is the run's current node.
pub fn resolve_node_visual(
    node_id: &str,
    statuses: &HashMap<&str, &NodeState>,
    current_node: Option<&str>,
    theme: &Theme,
) -> NodeVisual {
    let status = statuses
        .get(node_id)
        .map(|state| state.status)
        .unwrap_or_default();
    NodeVisual {
        color: theme.status_color(status).to_string(),
        emphasized: current_node.is_some_and(|current| current == node_id),
    }
}

/// Build the full render plan for one run snapshot. Pure: the same
/// snapshot, theme, and config always produce the same plan, so callers
/// polling an active run may memoize on the graph and re-plan only when
/// something changed.
pub fn compute_plan(run: &RunState, theme: &Theme, config: &LayoutConfig) -> RenderPlan {
    let graph = run.resolve_graph();
    let layout = compute_layout(&graph, config);
    let statuses = status_index(&run.nodes);
    let current = run.current_node.as_deref();

    let nodes = layout
        .placements
        .iter()
        .map(|placement| {
            let state = statuses.get(placement.id.as_str());
            PlannedNode {
                id: placement.id.clone(),
                label: placement.label.clone(),
                icon: placement.icon.clone(),
                x: placement.x,
                y: placement.y,
                rank: placement.rank,
                status: state.map(|s| s.status).unwrap_or_default(),
                duration: state.and_then(|s| s.duration),
                visual: resolve_node_visual(&placement.id, &statuses, current, theme),
            }
        })
        .collect();

    RenderPlan {
        nodes,
        edges: classify_edges(&graph.edges, current, config.edge_routing),
        width: layout.width,
        height: layout.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::parse_run_state;

    fn state(id: &str, status: RunStatus) -> NodeState {
        NodeState {
            id: id.to_string(),
            label: None,
            status,
            duration: None,
            error: None,
        }
    }

    #[test]
    fn self_loops_are_flagged_and_kept() {
        let edges = vec![Edge::new("review", "review"), Edge::new("review", "post")];
        let plan = classify_edges(&edges, None, EdgeRouting::Step);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].kind, EdgeKind::SelfLoop);
        assert_eq!(plan[1].kind, EdgeKind::Step);
    }

    #[test]
    fn straight_routing_is_honored() {
        let edges = vec![Edge::new("a", "b")];
        let plan = classify_edges(&edges, None, EdgeRouting::Straight);
        assert_eq!(plan[0].kind, EdgeKind::Straight);
    }

    #[test]
    fn activity_follows_the_current_node() {
        let edges = vec![
            Edge::new("compose", "review"),
            Edge::new("review", "post"),
            Edge::new("review", "review"),
        ];
        let plan = classify_edges(&edges, Some("review"), EdgeRouting::Step);
        assert!(!plan[0].is_active);
        assert!(plan[1].is_active);
        assert!(plan[2].is_active);
    }

    #[test]
    fn missing_edge_ids_are_generated() {
        let mut named = Edge::new("a", "b");
        named.id = Some("ab".to_string());
        let plan = classify_edges(&[named, Edge::new("b", "c")], None, EdgeRouting::Step);
        assert_eq!(plan[0].id, "ab");
        assert_eq!(plan[1].id, "e-1");
    }

    #[test]
    fn unknown_node_resolves_to_pending_and_plain() {
        let states = vec![state("other", RunStatus::Running)];
        let index = status_index(&states);
        let theme = Theme::console();
        let visual = resolve_node_visual("fetch", &index, None, &theme);
        assert_eq!(visual.color, theme.status_pending);
        assert!(!visual.emphasized);
    }

    #[test]
    fn emphasis_overrides_status_regardless_of_color() {
        let states = vec![state("fetch", RunStatus::Failed)];
        let index = status_index(&states);
        let theme = Theme::console();
        let visual = resolve_node_visual("fetch", &index, Some("fetch"), &theme);
        assert_eq!(visual.color, theme.status_failed);
        assert!(visual.emphasized);
    }

    #[test]
    fn plan_carries_statuses_and_durations() {
        let run = parse_run_state(
            r#"{
                "workflow": "post_review",
                "status": "running",
                "current_node": "review",
                "nodes": [
                    {"id": "compose", "status": "completed", "duration": 2.5},
                    {"id": "review", "status": "running"}
                ]
            }"#,
        )
        .unwrap();
        let plan = compute_plan(&run, &Theme::console(), &LayoutConfig::default());

        let compose = plan.node("compose").unwrap();
        assert_eq!(compose.status, RunStatus::Completed);
        assert_eq!(compose.duration, Some(2.5));
        assert!(!compose.visual.emphasized);

        let review = plan.node("review").unwrap();
        assert!(review.visual.emphasized);

        let post = plan.node("post").unwrap();
        assert_eq!(post.status, RunStatus::Pending);

        let self_loops: Vec<_> = plan.edges.iter().filter(|e| e.is_self_loop()).collect();
        assert_eq!(self_loops.len(), 1);
        assert!(self_loops[0].is_active);
    }

    #[test]
    fn plan_is_deterministic() {
        let run = parse_run_state(
            r#"{
                "graph": {
                    "nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
                    "edges": [
                        {"source": "a", "target": "b"},
                        {"source": "b", "target": "c"},
                        {"source": "c", "target": "a"}
                    ]
                }
            }"#,
        )
        .unwrap();
        let theme = Theme::console();
        let config = LayoutConfig::default();
        let first = serde_json::to_string(&compute_plan(&run, &theme, &config)).unwrap();
        let second = serde_json::to_string(&compute_plan(&run, &theme, &config)).unwrap();
        assert_eq!(first, second);
    }
}
