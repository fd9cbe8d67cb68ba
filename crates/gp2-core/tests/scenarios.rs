//! End-to-end scenarios S1–S6.

use gp2_core::validate::validate;
use gp2_core::{Executor, GraphStore};

fn build_chain() -> (GraphStore, Vec<gp2_common::NodeIndex>, Vec<gp2_common::EdgeIndex>) {
    let mut g = GraphStore::new();
    let n0 = g.add_node(true, None, None).unwrap();
    let n1 = g.add_node(false, None, None).unwrap();
    let n2 = g.add_node(false, None, None).unwrap();
    let n3 = g.add_node(false, None, None).unwrap();
    let n4 = g.add_node(false, None, None).unwrap();

    let e0 = g.add_edge(false, None, n0, n1, None).unwrap();
    let e1 = g.add_edge(false, None, n1, n2, None).unwrap();
    let e2 = g.add_edge(false, None, n2, n3, None).unwrap();
    let e3 = g.add_edge(false, None, n3, n4, None).unwrap();

    (g, vec![n0, n1, n2, n3, n4], vec![e0, e1, e2, e3])
}

const S1_TEXT: &str = "[ (n0(R), empty) (n1, empty) (n2, empty) (n3, empty) (n4, empty) \
| (e0, n0, n1, empty) (e1, n1, n2, empty) (e2, n2, n3, empty) (e3, n3, n4, empty) ]";

#[test]
fn s1_build_and_serialise() {
    let (g, _, _) = build_chain();
    assert_eq!(g.to_gp2_text(), S1_TEXT);
}

#[test]
fn s2_slot_reuse() {
    let (mut g, nodes, edges) = build_chain();
    g.remove_edge(edges[1], None).unwrap();
    let reused = g.add_edge(false, None, nodes[1], nodes[3], None).unwrap();

    assert_eq!(reused.index(), 1);
    assert!(validate(&g, None).is_valid());
}

#[test]
fn s3_dangling_incidence_guard() {
    let (mut g, nodes, _) = build_chain();
    let err = g.remove_node(nodes[1], None).unwrap_err();
    assert!(matches!(err, gp2_common::Error::DanglingIncidence { .. }));
    assert_eq!(g.number_of_nodes(), 5);
    assert!(validate(&g, None).is_valid());
}

#[test]
fn s4_relabel_reindexes() {
    let (mut g, nodes, _) = build_chain();
    let n0 = nodes[0];
    assert_eq!(g.get_node(n0).unwrap().class(), gp2_common::LabelClass::Empty);

    let new_label = gp2_common::Label::new(gp2_common::Mark::None, vec![gp2_common::Atom::Int(42)]).unwrap();
    g.relabel_node(n0, Some(new_label), true, false, None).unwrap();

    assert!(!g.nodes_by_class(gp2_common::LabelClass::Empty).any(|n| n == n0));
    assert!(g.nodes_by_class(gp2_common::LabelClass::Int).any(|n| n == n0));
    assert_eq!(g.get_node(n0).unwrap().class(), gp2_common::LabelClass::Int);
}

#[test]
fn s5_snapshot_fidelity() {
    let (g, nodes, edges) = build_chain();
    let mut exec = Executor::new(g);

    exec.copy_graph();
    exec.current_mut().remove_edge(edges[3], None).unwrap();
    exec.current_mut().remove_node(nodes[4], None).unwrap();

    exec.restore_graph().unwrap();
    assert_eq!(exec.current().to_gp2_text(), S1_TEXT);
}

#[test]
fn s6_nested_snapshots_unwind_in_reverse() {
    let (g, nodes, _) = build_chain();
    let mut exec = Executor::new(g);

    let after_build = exec.current().to_gp2_text();

    exec.copy_graph(); // depth 1, snapshot == after_build
    exec.current_mut().add_node(false, None, None).unwrap();
    let after_first_mutation = exec.current().to_gp2_text();

    exec.copy_graph(); // depth 2, snapshot == after_first_mutation
    exec.current_mut().add_node(false, None, None).unwrap();
    assert_eq!(exec.current().number_of_nodes(), 7);
    let _ = nodes.len();

    exec.restore_graph().unwrap();
    assert_eq!(exec.current().to_gp2_text(), after_first_mutation);

    exec.restore_graph().unwrap();
    assert_eq!(exec.current().to_gp2_text(), after_build);
    assert_eq!(exec.snapshot_depth(), 0);
}
