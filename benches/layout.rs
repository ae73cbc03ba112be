use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use flowviz::config::LayoutConfig;
use flowviz::ir::{Edge, Graph, Node};
use flowviz::layout::compute_layout;
use flowviz::plan::compute_plan;
use flowviz::render::render_svg;
use flowviz::run::RunState;
use flowviz::templates::WorkflowKind;
use flowviz::theme::Theme;

fn chain_graph(nodes: usize, extra_edges: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 0..nodes {
        graph.nodes.push(Node::new(&format!("n{i}")));
    }
    for i in 0..nodes.saturating_sub(1) {
        graph
            .edges
            .push(Edge::new(&format!("n{i}"), &format!("n{}", i + 1)));
    }
    let mut count = 0usize;
    'outer: for i in 0..nodes {
        for j in (i + 2)..nodes {
            if count >= extra_edges {
                break 'outer;
            }
            graph
                .edges
                .push(Edge::new(&format!("n{i}"), &format!("n{j}")));
            count += 1;
        }
    }
    graph
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for (nodes, extra) in [(10usize, 10usize), (100, 200), (500, 1000)] {
        let graph = chain_graph(nodes, extra);
        let name = format!("chain_{nodes}_{extra}");
        group.bench_with_input(BenchmarkId::from_parameter(name), &graph, |b, graph| {
            b.iter(|| {
                let layout = compute_layout(black_box(graph), &config);
                black_box(layout.placements.len());
            });
        });
    }
    group.finish();
}

fn bench_plan_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_and_render");
    let theme = Theme::console();
    let config = LayoutConfig::default();
    for kind in WorkflowKind::ALL {
        let run = RunState::for_template(kind);
        group.bench_with_input(
            BenchmarkId::from_parameter(kind.as_token()),
            &run,
            |b, run| {
                b.iter(|| {
                    let plan = compute_plan(black_box(run), &theme, &config);
                    let svg = render_svg(&plan, &theme, &config);
                    black_box(svg.len());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_plan_and_render);
criterion_main!(benches);
