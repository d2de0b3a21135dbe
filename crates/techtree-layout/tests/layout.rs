use std::collections::HashMap;
use techtree_layout::{LayoutGraph, Point};
use test_log::test;

const COLUMN_WIDTH: f32 = 250.0;
const ROW_HEIGHT: f32 = 80.0;
const X_MARGIN: f32 = 10.0;

fn catalog(techs: &[(&str, &str)]) -> HashMap<String, String> {
    techs
        .iter()
        .map(|(tech, category)| (tech.to_string(), category.to_string()))
        .collect()
}

fn build(
    techs: &[(&str, &str)],
    prerequisites: &[(&str, &str)],
) -> LayoutGraph<HashMap<String, String>> {
    let mut graph = LayoutGraph::new(catalog(techs));
    for (tech, _) in techs {
        graph.add_node(tech, 180.0, 50.0).unwrap();
    }
    for (parent, child) in prerequisites {
        graph.add_edge(parent, child).unwrap();
    }
    graph
}

fn snapshot<C>(graph: &LayoutGraph<C>) -> Vec<(Option<usize>, Option<usize>, Point, Vec<Vec<Point>>)>
where
    C: techtree_layout::TechCatalog,
{
    graph
        .nodes()
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

const SIX: [(&str, &str); 6] = [
    ("A", "LEARNING"),
    ("B", "GROWTH"),
    ("C", "PRODUCTION"),
    ("D", "LEARNING"),
    ("E", "GROWTH"),
    ("F", "PRODUCTION"),
];

#[test]
fn extra_prerequisite_on_f_spans_three_columns() {
    // F also depends on E, which pushes it one column past C
    let mut graph = build(
        &SIX,
        &[("A", "D"), ("A", "E"), ("B", "D"), ("C", "F"), ("E", "F")],
    );
    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();

    for tech in ["A", "B", "C"] {
        assert_eq!(graph.get_node(tech).unwrap().depth(), Some(0));
    }
    for tech in ["D", "E"] {
        assert_eq!(graph.get_node(tech).unwrap().depth(), Some(1));
    }
    assert_eq!(graph.get_node("F").unwrap().depth(), Some(2));
    assert_eq!(graph.column_count(), 3);
    assert_eq!(graph.width(), 3.0 * COLUMN_WIDTH);

    let placeholders: Vec<_> = graph.placeholders().collect();
    assert_eq!(placeholders.len(), 1);
    assert_eq!(placeholders[0].depth(), Some(1));
    assert_eq!(graph.terminal(placeholders[0]).name(), Some("F"));

    // C reaches F through the placeholder: two extra points for the jog
    let edges = graph.get_out_edges("C").unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].to(), "F");
    assert_eq!(edges[0].points().len(), 6);
    assert_eq!(graph.get_out_edges("A").unwrap().len(), 2);
    assert!(graph.get_out_edges("F").unwrap().is_empty());
}

#[test]
fn four_prerequisites_stay_in_two_columns() {
    let mut graph = build(&SIX, &[("A", "D"), ("A", "E"), ("B", "D"), ("C", "F")]);
    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();

    assert_eq!(graph.get_node("F").unwrap().depth(), Some(1));
    assert_eq!(graph.column_count(), 2);
    assert_eq!(graph.placeholders().count(), 0);
}

#[test]
fn isolated_node() {
    let mut graph = build(&[("SHP_GAL_EXPLO", "SHIP_HULLS")], &[]);
    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();

    let node = graph.get_node("SHP_GAL_EXPLO").unwrap();
    assert_eq!(node.depth(), Some(0));
    assert_eq!(node.row(), Some(1));
    assert_eq!(node.position(), Point::new(-0.5 * COLUMN_WIDTH, ROW_HEIGHT / 2.0));
    assert_eq!(graph.width(), COLUMN_WIDTH);
    assert_eq!(graph.height(), ROW_HEIGHT);
    assert!(graph.get_out_edges("SHP_GAL_EXPLO").unwrap().is_empty());
}

#[test]
fn clear_forgets_previous_graph() {
    let mut graph = build(
        &SIX,
        &[("A", "D"), ("A", "E"), ("B", "D"), ("C", "F"), ("E", "F")],
    );
    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();
    assert!(graph.height() > ROW_HEIGHT);

    graph.clear();
    assert_eq!(graph.nodes().count(), 0);
    assert_eq!(graph.width(), 0.0);
    assert!(graph.get_node("A").is_err());

    graph.add_node("D", 180.0, 50.0).unwrap();
    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();

    assert_eq!(graph.placeholders().count(), 0);
    assert_eq!(graph.column_count(), 1);
    assert_eq!(graph.width(), COLUMN_WIDTH);
    assert_eq!(graph.height(), ROW_HEIGHT);
    assert_eq!(graph.get_node("D").unwrap().row(), Some(1));
}

#[test]
fn edges_touch_both_borders() {
    let techs = [
        ("GRO_PLANET_ECOL", "GROWTH"),
        ("GRO_GENETIC_ENG", "GROWTH"),
        ("GRO_SYMBIOTIC_BIO", "GROWTH"),
        ("LRN_ALGO_ELEGANCE", "LEARNING"),
        ("LRN_PHYS_BRAIN", "LEARNING"),
        ("LRN_NASCENT_AI", "LEARNING"),
        ("PRO_ROBOTIC_PROD", "PRODUCTION"),
    ];
    let mut graph = build(
        &techs,
        &[
            ("GRO_PLANET_ECOL", "GRO_GENETIC_ENG"),
            ("GRO_GENETIC_ENG", "GRO_SYMBIOTIC_BIO"),
            ("LRN_ALGO_ELEGANCE", "LRN_PHYS_BRAIN"),
            ("LRN_PHYS_BRAIN", "LRN_NASCENT_AI"),
            ("LRN_NASCENT_AI", "GRO_SYMBIOTIC_BIO"),
            ("GRO_PLANET_ECOL", "GRO_SYMBIOTIC_BIO"),
            ("LRN_ALGO_ELEGANCE", "PRO_ROBOTIC_PROD"),
        ],
    );
    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();

    // GRO_SYMBIOTIC_BIO lands in column 3 behind LRN_NASCENT_AI: the edge
    // from GRO_PLANET_ECOL skips two columns, the one from GRO_GENETIC_ENG one
    assert_eq!(graph.get_node("GRO_SYMBIOTIC_BIO").unwrap().depth(), Some(3));
    assert_eq!(graph.placeholders().count(), 3);

    for node in graph.nodes() {
        for edge in node.out_edges() {
            let target = graph.get_node(edge.to()).unwrap();
            let points = edge.points();
            let first = points[0];
            let last = points[points.len() - 1];

            assert_eq!(edge.from(), node.name().unwrap());
            assert_eq!(
                first,
                Point::new(node.x() + node.width(), node.y() + node.height() / 2.0)
            );
            assert_eq!(last, Point::new(target.x(), target.y() + target.height() / 2.0));
            assert_eq!(points[points.len() - 2], last.shifted_x(-2.0 * X_MARGIN));
            assert_eq!(points[1], first.shifted_x(X_MARGIN));

            let skipped = target.depth().unwrap() - node.depth().unwrap() - 1;
            assert_eq!(points.len(), 4 + 2 * skipped);
        }
    }
}

#[test]
fn relayout_is_idempotent() {
    let mut graph = build(
        &SIX,
        &[("A", "D"), ("A", "E"), ("B", "D"), ("C", "F"), ("E", "F")],
    );
    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();
    let first = snapshot(&graph);
    let crossings = graph.crossings();

    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();

    assert_eq!(snapshot(&graph), first);
    assert_eq!(graph.crossings(), crossings);
    assert_eq!(graph.placeholders().count(), 1);
}

#[test]
fn fan_in_is_laid_out_without_crossings() {
    let techs = [
        ("DEF_DEFENSE_NET_1", "DEFENSE"),
        ("DEF_GARRISON_1", "DEFENSE"),
        ("DEF_ROOT_DEFENSE", "DEFENSE"),
        ("SHP_WEAPON_1_1", "SHIP_WEAPONS"),
        ("SHP_WEAPON_1_2", "SHIP_WEAPONS"),
    ];
    let mut graph = build(
        &techs,
        &[
            ("DEF_ROOT_DEFENSE", "DEF_DEFENSE_NET_1"),
            ("DEF_ROOT_DEFENSE", "DEF_GARRISON_1"),
            ("SHP_WEAPON_1_1", "SHP_WEAPON_1_2"),
        ],
    );
    graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();

    assert_eq!(graph.crossings(), 0);
}

#[test]
fn primary_child_takes_the_row_of_its_parent() {
    // Both children aim for the row of their parent. The one sharing its
    // category is the primary child and gets that row, even though the other
    // sorts first.
    for (parent, category, primary, other) in [
        ("LRN_ROOT", "LEARNING", "LRN_FORCE_FIELD", "GRO_SUBTER_HAB"),
        ("GRO_ROOT", "GROWTH", "GRO_SUBTER_HAB", "LRN_FORCE_FIELD"),
    ] {
        let mut graph = build(
            &[
                (parent, category),
                ("LRN_SPARE", "LEARNING"),
                ("GRO_SUBTER_HAB", "GROWTH"),
                ("LRN_FORCE_FIELD", "LEARNING"),
            ],
            &[(parent, "GRO_SUBTER_HAB"), (parent, "LRN_FORCE_FIELD")],
        );
        graph.do_layout(COLUMN_WIDTH, ROW_HEIGHT, X_MARGIN).unwrap();

        let parent_row = graph.get_node(parent).unwrap().row();
        assert_eq!(graph.get_node(primary).unwrap().row(), parent_row);
        assert_ne!(graph.get_node(other).unwrap().row(), parent_row);
    }
}
