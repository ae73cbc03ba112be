mod ranking;

use std::collections::HashMap;

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::ir::Graph;

/// A node with resolved screen coordinates. `rank` is the layout column
/// the layering pass assigned (0 on the fast path, where no ranking is
/// performed).
#[derive(Debug, Clone, Serialize)]
pub struct NodePlacement {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub x: f32,
    pub y: f32,
    pub rank: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub placements: Vec<NodePlacement>,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn placement(&self, id: &str) -> Option<&NodePlacement> {
        self.placements.iter().find(|p| p.id == id)
    }
}

/// Assign coordinates to every node of `graph`.
///
/// When every node already carries an explicit position the positions are
/// passed through unchanged, letting callers override the algorithm per
/// graph. Otherwise nodes are layered by longest path from the roots and
/// placed on a fixed grid: one column per rank, one row per slot within
/// the rank. Deterministic for identical input, pure, and tolerant of
/// cycles and dangling edge endpoints.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Layout {
    if !graph.nodes.is_empty() && graph.fully_positioned() {
        let placements = graph
            .nodes
            .iter()
            .map(|node| {
                let pos = node.position.unwrap_or(crate::ir::Position { x: 0.0, y: 0.0 });
                NodePlacement {
                    id: node.id.clone(),
                    label: node.display_label(),
                    icon: node.icon.clone(),
                    x: pos.x,
                    y: pos.y,
                    rank: 0,
                }
            })
            .collect();
        return with_bounds(placements, config);
    }

    let ranking = ranking::compute_ranks(graph);
    let mut coords: HashMap<&str, (f32, f32)> = HashMap::new();
    for (rank, column) in ranking.columns.iter().enumerate() {
        for (slot, id) in column.iter().enumerate() {
            coords.insert(
                id.as_str(),
                (
                    rank as f32 * config.column_spacing,
                    slot as f32 * config.row_spacing,
                ),
            );
        }
    }

    let placements = graph
        .nodes
        .iter()
        .map(|node| {
            let (x, y) = coords.get(node.id.as_str()).copied().unwrap_or((0.0, 0.0));
            NodePlacement {
                id: node.id.clone(),
                label: node.display_label(),
                icon: node.icon.clone(),
                x,
                y,
                rank: ranking.ranks.get(node.id.as_str()).copied().unwrap_or(0),
            }
        })
        .collect();
    with_bounds(placements, config)
}

fn with_bounds(placements: Vec<NodePlacement>, config: &LayoutConfig) -> Layout {
    let mut width = 0.0f32;
    let mut height = 0.0f32;
    for placement in &placements {
        width = width.max(placement.x + config.node_width);
        height = height.max(placement.y + config.node_height);
    }
    Layout {
        placements,
        width,
        height,
    }
}
