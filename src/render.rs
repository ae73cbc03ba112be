use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::config::LayoutConfig;
use crate::plan::{EdgeKind, EdgePlan, PlannedNode, RenderPlan};
use crate::theme::Theme;

pub fn render_svg(plan: &RenderPlan, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = (plan.width + config.padding * 2.0).max(200.0);
    let height = (plan.height + config.padding * 2.0).max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.edge_color
    ));
    svg.push_str(&format!(
        "<marker id=\"arrow-active\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.edge_active_color
    ));
    svg.push_str(&format!(
        "<linearGradient id=\"active-node\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\"><stop offset=\"0%\" stop-color=\"{}\"/><stop offset=\"100%\" stop-color=\"{}\"/></linearGradient>",
        theme.active_gradient_start, theme.active_gradient_end
    ));
    svg.push_str("</defs>");

    let by_id: HashMap<&str, &PlannedNode> =
        plan.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    for edge in &plan.edges {
        // Edges with a missing endpoint have no geometry to draw; the
        // nodes themselves still render wherever layout put them.
        let (Some(source), Some(target)) =
            (by_id.get(edge.source.as_str()), by_id.get(edge.target.as_str()))
        else {
            continue;
        };
        svg.push_str(&edge_svg(edge, source, target, theme, config));
    }

    for node in &plan.nodes {
        svg.push_str(&node_svg(node, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn edge_svg(
    edge: &EdgePlan,
    source: &PlannedNode,
    target: &PlannedNode,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let pad = config.padding;
    let (w, h) = (config.node_width, config.node_height);
    let stroke = if edge.is_active {
        &theme.edge_active_color
    } else {
        &theme.edge_color
    };
    let marker = if edge.is_active {
        "url(#arrow-active)"
    } else {
        "url(#arrow)"
    };

    let (d, label_anchor) = match edge.kind {
        EdgeKind::SelfLoop => {
            // Up-and-over arc: leave the right side, come back down onto
            // the top edge, offset clear of the node box.
            let off = config.self_loop_offset;
            let (sx, sy) = (pad + source.x + w, pad + source.y + h * 0.3);
            let (ex, ey) = (pad + source.x + w * 0.6, pad + source.y);
            let d = format!(
                "M {sx:.2} {sy:.2} C {:.2} {:.2}, {:.2} {:.2}, {ex:.2} {ey:.2}",
                sx + off,
                sy - off * 0.2,
                ex + off * 0.4,
                ey - off,
            );
            (d, (sx + off * 0.5, sy - off * 0.75))
        }
        EdgeKind::Step => {
            let (sx, sy) = (pad + source.x + w, pad + source.y + h / 2.0);
            let (tx, ty) = (pad + target.x, pad + target.y + h / 2.0);
            let mid = (sx + tx) / 2.0;
            let points = [(sx, sy), (mid, sy), (mid, ty), (tx, ty)];
            (points_to_path(&points), (mid, (sy + ty) / 2.0))
        }
        EdgeKind::Straight => {
            let (sx, sy) = (pad + source.x + w, pad + source.y + h / 2.0);
            let (tx, ty) = (pad + target.x, pad + target.y + h / 2.0);
            let points = [(sx, sy), (tx, ty)];
            (points_to_path(&points), ((sx + tx) / 2.0, (sy + ty) / 2.0))
        }
    };

    let mut out = format!(
        "<path d=\"{d}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"2.2\" marker-end=\"{marker}\"/>",
    );

    if let Some(label) = &edge.label {
        let (lx, ly) = label_anchor;
        let font_size = 10.0;
        let text_width = label.chars().count() as f32 * font_size * 0.62;
        out.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"8\" ry=\"8\" fill=\"{}\" stroke=\"rgba(255,255,255,0.08)\" stroke-width=\"1\"/>",
            lx - text_width / 2.0 - 6.0,
            ly - font_size / 2.0 - 4.0,
            text_width + 12.0,
            font_size + 8.0,
            theme.edge_label_background,
        ));
        out.push_str(&format!(
            "<text x=\"{lx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{font_size}\" fill=\"{}\">{}</text>",
            ly + font_size * 0.35,
            theme.font_family,
            theme.edge_label_color,
            escape_xml(label)
        ));
    }

    out
}

fn node_svg(node: &PlannedNode, theme: &Theme, config: &LayoutConfig) -> String {
    let pad = config.padding;
    let (x, y) = (pad + node.x, pad + node.y);
    let (w, h) = (config.node_width, config.node_height);

    let (fill, stroke, stroke_width) = if node.visual.emphasized {
        ("url(#active-node)".to_string(), theme.active_border.clone(), 2.0)
    } else {
        (node.visual.color.clone(), node.visual.color.clone(), 1.0)
    };

    let mut out = format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"14\" ry=\"14\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{stroke_width}\"/>",
    );

    let center_x = x + w / 2.0;
    let mut text_y = y + h * 0.38;
    if let Some(icon) = &node.icon {
        out.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{:.1}\">{}</text>",
            y + h * 0.34,
            theme.font_size * 1.5,
            escape_xml(icon)
        ));
        text_y = y + h * 0.62;
    } else {
        text_y += h * 0.1;
    }

    out.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{text_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        theme.font_family,
        theme.font_size,
        theme.node_text_color,
        escape_xml(&node.label)
    ));

    if let Some(duration) = node.duration {
        out.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.1}\" fill=\"{}\">{duration:.1}s</text>",
            text_y + theme.font_size * 1.2,
            theme.font_family,
            theme.font_size * 0.75,
            theme.node_muted_text_color,
        ));
    }

    out
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::compute_plan;
    use crate::run::parse_run_state;

    #[test]
    fn render_svg_basic() {
        let run = parse_run_state(
            r#"{
                "workflow": "post_review",
                "status": "running",
                "current_node": "review",
                "nodes": [{"id": "compose", "status": "completed", "duration": 1.2}]
            }"#,
        )
        .unwrap();
        let theme = Theme::console();
        let config = LayoutConfig::default();
        let plan = compute_plan(&run, &theme, &config);
        let svg = render_svg(&plan, &theme, &config);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Review Draft"));
        assert!(svg.contains("1.2s"));
        // The current node gets the gradient fill, and the self-loop is
        // drawn as a curve rather than line segments.
        assert!(svg.contains("url(#active-node)"));
        assert!(svg.contains(" C "));
    }

    #[test]
    fn dangling_edges_do_not_panic_or_draw() {
        let run = parse_run_state(
            r#"{
                "graph": {
                    "nodes": [{"id": "a"}],
                    "edges": [{"source": "a", "target": "ghost"}]
                }
            }"#,
        )
        .unwrap();
        let theme = Theme::console();
        let config = LayoutConfig::default();
        let plan = compute_plan(&run, &theme, &config);
        let svg = render_svg(&plan, &theme, &config);
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("ghost"));
    }

    #[test]
    fn labels_are_xml_escaped() {
        let run = parse_run_state(
            r#"{
                "graph": {
                    "nodes": [{"id": "a", "label": "fetch & <parse>"}],
                    "edges": []
                }
            }"#,
        )
        .unwrap();
        let theme = Theme::console();
        let config = LayoutConfig::default();
        let plan = compute_plan(&run, &theme, &config);
        let svg = render_svg(&plan, &theme, &config);
        assert!(svg.contains("fetch &amp; &lt;parse&gt;"));
    }
}
