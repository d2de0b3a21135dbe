use proptest::prelude::*;
use std::collections::BTreeMap;
use techtree_layout::{LayoutGraph, Node, Point};

const CATEGORIES: [&str; 3] = ["GROWTH", "LEARNING", "PRODUCTION"];

fn tech_name(index: usize) -> String {
    format!("TECH_{index:02}")
}

fn catalog(tech: &str) -> Option<String> {
    let index: usize = tech.strip_prefix("TECH_")?.parse().ok()?;
    Some(CATEGORIES[index % CATEGORIES.len()].to_string())
}

/// Random DAG: edges always go from a lower to a higher index
fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..14).prop_flat_map(|count| {
        let edges = prop::collection::vec((0..count, 0..count), 0..(count * 2));
        (Just(count), edges).prop_map(|(count, pairs)| {
            let edges = pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect();
            (count, edges)
        })
    })
}

fn build(count: usize, edges: &[(usize, usize)]) -> LayoutGraph<fn(&str) -> Option<String>> {
    let mut graph = LayoutGraph::new(catalog as fn(&str) -> Option<String>);
    for index in 0..count {
        let width = 100.0 + (index % 4) as f32 * 10.0;
        graph.add_node(&tech_name(index), width, 40.0).unwrap();
    }
    for &(parent, child) in edges {
        graph.add_edge(&tech_name(parent), &tech_name(child)).unwrap();
    }
    graph.do_layout(200.0, 60.0, 6.0).unwrap();
    graph
}

fn all_nodes<C>(graph: &LayoutGraph<C>) -> Vec<&Node>
where
    C: techtree_layout::TechCatalog,
{
    graph.nodes().chain(graph.placeholders()).collect()
}

fn snapshot<C>(graph: &LayoutGraph<C>) -> Vec<(Option<usize>, Option<usize>, Point, Vec<Vec<Point>>)>
where
    C: techtree_layout::TechCatalog,
{
    all_nodes(graph)
        .into_iter()
        .map(|node| {
            let edges = node
                .out_edges()
                .iter()
                .map(|edge| edge.points().to_vec())
                .collect();
            (node.depth(), node.row(), node.position(), edges)
        })
        .collect()
}

proptest! {
    #[test]
    fn hops_span_exactly_one_column((count, edges) in dag()) {
        let graph = build(count, &edges);

        for node in all_nodes(&graph) {
            let depth = node.depth().unwrap();
            for &child in node.children() {
                let child = graph.node_by_id(child).unwrap();
                prop_assert_eq!(child.depth().unwrap(), depth + 1);
            }
        }
    }

    #[test]
    fn rows_never_overlap((count, edges) in dag()) {
        let graph = build(count, &edges);

        let mut columns: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
        for node in all_nodes(&graph) {
            let row = node.row().unwrap();
            prop_assert!(row >= 1);
            columns
                .entry(node.depth().unwrap())
                .or_default()
                .push((row, row + node.weight()));
        }

        for ranges in columns.values_mut() {
            ranges.sort();
            for pair in ranges.windows(2) {
                prop_assert!(pair[0].1 <= pair[1].0, "{:?} overlaps {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn layout_is_deterministic((count, edges) in dag()) {
        let first = build(count, &edges);
        let second = build(count, &edges);

        prop_assert_eq!(snapshot(&first), snapshot(&second));
        prop_assert_eq!(first.width(), second.width());
        prop_assert_eq!(first.height(), second.height());
    }

    #[test]
    fn relayout_reaches_the_same_fixed_point((count, edges) in dag()) {
        let mut graph = build(count, &edges);
        let first = snapshot(&graph);

        graph.do_layout(200.0, 60.0, 6.0).unwrap();

        prop_assert_eq!(snapshot(&graph), first);
    }

    #[test]
    fn edges_start_and_end_on_borders((count, edges) in dag()) {
        let graph = build(count, &edges);

        let mut total = 0;
        for node in graph.nodes() {
            for edge in node.out_edges() {
                let target = graph.get_node(edge.to()).unwrap();
                let points = edge.points();
                prop_assert_eq!(
                    points[0],
                    Point::new(node.x() + node.width(), node.y() + node.height() / 2.0)
                );
                prop_assert_eq!(
                    points[points.len() - 1],
                    Point::new(target.x(), target.y() + target.height() / 2.0)
                );
                total += 1;
            }
        }

        let mut unique = edges.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(total, unique.len());
    }

    #[test]
    fn layout_covers_every_node((count, edges) in dag()) {
        let graph = build(count, &edges);

        for node in all_nodes(&graph) {
            prop_assert!(node.x() + node.width() <= graph.width());
            prop_assert!(node.y() + node.height() <= graph.height() + 60.0);
            prop_assert!(
                (node.row().unwrap() + node.weight() - 1) as f32 * 30.0 <= graph.height()
            );
        }
        prop_assert_eq!(graph.width(), graph.column_count() as f32 * 200.0);
    }
}
