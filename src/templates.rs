//! Built-in workflow graph templates, used when a run snapshot names a
//! workflow type but carries no structure of its own. Declarative data,
//! matching the graphs of the workflow service this monitor targets.

use once_cell::sync::Lazy;

use crate::ir::{Edge, Graph, Node, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    DailySchedule,
    PostReview,
    BrowseInteraction,
    DailyAgent,
}

impl WorkflowKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "daily_schedule" => Some(Self::DailySchedule),
            "post_review" => Some(Self::PostReview),
            "browse_interaction" => Some(Self::BrowseInteraction),
            "daily_agent" => Some(Self::DailyAgent),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Self::DailySchedule => "daily_schedule",
            Self::PostReview => "post_review",
            Self::BrowseInteraction => "browse_interaction",
            Self::DailyAgent => "daily_agent",
        }
    }

    pub const ALL: [WorkflowKind; 4] = [
        Self::DailySchedule,
        Self::PostReview,
        Self::BrowseInteraction,
        Self::DailyAgent,
    ];
}

pub fn template(kind: WorkflowKind) -> &'static Graph {
    match kind {
        WorkflowKind::DailySchedule => &DAILY_SCHEDULE,
        WorkflowKind::PostReview => &POST_REVIEW,
        WorkflowKind::BrowseInteraction => &BROWSE_INTERACTION,
        WorkflowKind::DailyAgent => &DAILY_AGENT,
    }
}

fn node(id: &str, label: &str, icon: &str, x: f32, y: f32) -> Node {
    Node {
        id: id.to_string(),
        label: Some(label.to_string()),
        icon: Some(icon.to_string()),
        position: Some(Position { x, y }),
    }
}

fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: Some(id.to_string()),
        source: source.to_string(),
        target: target.to_string(),
        label: None,
    }
}

fn labeled_edge(id: &str, source: &str, target: &str, label: &str) -> Edge {
    Edge {
        label: Some(label.to_string()),
        ..edge(id, source, target)
    }
}

static DAILY_SCHEDULE: Lazy<Graph> = Lazy::new(|| Graph {
    nodes: vec![
        node("fetch_feed", "Fetch Feed", "\u{1F4E5}", 120.0, 40.0),
        node("summarize_trending", "Summarize Trending", "\u{1F4CA}", 120.0, 170.0),
        node("generate_schedule", "Generate Schedule", "\u{1F4C5}", 120.0, 300.0),
    ],
    edges: vec![
        edge("ds-1", "fetch_feed", "summarize_trending"),
        edge("ds-2", "summarize_trending", "generate_schedule"),
    ],
});

static POST_REVIEW: Lazy<Graph> = Lazy::new(|| Graph {
    nodes: vec![
        node("compose", "Compose Draft", "\u{270D}\u{FE0F}", 120.0, 40.0),
        node("review", "Review Draft", "\u{1F441}\u{FE0F}", 120.0, 170.0),
        node("post", "Post Update", "\u{1F680}", 120.0, 300.0),
    ],
    edges: vec![
        edge("pr-1", "compose", "review"),
        labeled_edge("pr-2", "review", "review", "review"),
        labeled_edge("pr-3", "review", "post", "post"),
    ],
});

static BROWSE_INTERACTION: Lazy<Graph> = Lazy::new(|| Graph {
    nodes: vec![
        node("fetch_feed", "Fetch Feed", "\u{1F4E5}", 120.0, 40.0),
        node("decide", "Decide Interactions", "\u{1F914}", 120.0, 170.0),
        node("execute", "Execute Interactions", "\u{1F4AC}", 120.0, 300.0),
    ],
    edges: vec![
        edge("bi-1", "fetch_feed", "decide"),
        edge("bi-2", "decide", "execute"),
    ],
});

static DAILY_AGENT: Lazy<Graph> = Lazy::new(|| Graph {
    nodes: vec![
        node("fetch_feed", "Fetch Feed", "\u{1F4E5}", 80.0, 40.0),
        node("summarize_trending", "Summarize Trending", "\u{1F4CA}", 80.0, 170.0),
        node("generate_schedule", "Generate Schedule", "\u{1F4C5}", 80.0, 300.0),
        node("compose_post", "Compose Post", "\u{270D}\u{FE0F}", 300.0, 40.0),
        node("review_post", "Review Post", "\u{1F441}\u{FE0F}", 300.0, 170.0),
        node("post_update", "Post Update", "\u{1F680}", 300.0, 300.0),
        node("decide_interactions", "Decide Interactions", "\u{1F914}", 520.0, 170.0),
        node("execute_interactions", "Execute Interactions", "\u{1F4AC}", 520.0, 300.0),
    ],
    edges: vec![
        edge("da-1", "fetch_feed", "summarize_trending"),
        edge("da-2", "summarize_trending", "generate_schedule"),
        edge("da-3", "generate_schedule", "compose_post"),
        edge("da-4", "compose_post", "review_post"),
        labeled_edge("da-5", "review_post", "review_post", "review"),
        labeled_edge("da-6", "review_post", "post_update", "post"),
        edge("da-7", "post_update", "decide_interactions"),
        edge("da-8", "decide_interactions", "execute_interactions"),
    ],
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_round_trip() {
        for kind in WorkflowKind::ALL {
            assert_eq!(WorkflowKind::from_token(kind.as_token()), Some(kind));
        }
        assert_eq!(WorkflowKind::from_token("nonsense"), None);
    }

    #[test]
    fn templates_are_well_formed() {
        for kind in WorkflowKind::ALL {
            let graph = template(kind);
            let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
            assert_eq!(ids.len(), graph.nodes.len(), "{:?}: duplicate node id", kind);
            for edge in &graph.edges {
                assert!(ids.contains(edge.source.as_str()), "{:?}: {}", kind, edge.source);
                assert!(ids.contains(edge.target.as_str()), "{:?}: {}", kind, edge.target);
            }
            // Every template ships explicit positions, so rendering a
            // bare template takes the layout fast path.
            assert!(graph.fully_positioned());
        }
    }

    #[test]
    fn review_templates_contain_a_self_loop() {
        let loops: Vec<_> = template(WorkflowKind::PostReview)
            .edges
            .iter()
            .filter(|e| e.is_self_loop())
            .collect();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].source, "review");
    }
}
