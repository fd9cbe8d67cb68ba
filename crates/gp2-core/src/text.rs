//! Textual graph forms.
//!
//! Plain `String`-producing dump routines: no `Write` target, no file I/O —
//! matching the absence of a persistence layer in this core.

use std::fmt::Write as _;

use crate::graph::GraphStore;

impl GraphStore {
    /// The compact textual form used by tests and the (out of scope)
    /// front-end:
    ///
    /// ```text
    /// [ n0, <label> n1(R), <label> | e0(n0,n1), <label> e1(B)(n1,n0), <label> ]
    /// ```
    ///
    /// `(R)` marks a root node, `(B)` a bidirectional edge; `<label>` is
    /// either `empty` or a colon-separated atom list, with `# <mark>`
    /// appended when the mark is non-none. The empty graph serialises as
    /// `[ | ]`. Nodes and edges are listed in ascending index order.
    #[must_use]
    pub fn to_gp2_text(&self) -> String {
        let mut out = String::from("[ ");

        let mut nodes = self.iter_nodes().collect::<Vec<_>>();
        nodes.sort_by_key(|n| n.index().index());
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let root = if node.is_root() { "(R)" } else { "" };
            let _ = write!(out, "(n{}{root}, {})", node.index().index(), node.label());
        }

        out.push_str(" | ");

        let mut edges = self.iter_edges().collect::<Vec<_>>();
        edges.sort_by_key(|e| e.index().index());
        for (i, edge) in edges.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let bidi = if edge.is_bidirectional() { "(B)" } else { "" };
            let _ = write!(
                out,
                "(e{}{bidi}, n{}, n{}, {})",
                edge.index().index(),
                edge.source().index(),
                edge.target().index(),
                edge.label()
            );
        }

        out.push_str(" ]");
        out
    }

    /// A human-readable dump listing every node's index, root flag, class,
    /// label, and in/out-degrees; every edge's index, bidirectional flag,
    /// class, label, source and target; and finally the root-node list, in
    /// ascending index order.
    #[must_use]
    pub fn to_verbose_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "nodes ({}):", self.number_of_nodes());
        let mut nodes = self.iter_nodes().collect::<Vec<_>>();
        nodes.sort_by_key(|n| n.index().index());
        for node in &nodes {
            let _ = writeln!(
                out,
                "  n{} root={} class={:?} label=({}) in={} out={}",
                node.index().index(),
                node.is_root(),
                node.class(),
                node.label(),
                node.in_degree(),
                node.out_degree(),
            );
        }

        let _ = writeln!(out, "edges ({}):", self.number_of_edges());
        let mut edges = self.iter_edges().collect::<Vec<_>>();
        edges.sort_by_key(|e| e.index().index());
        for edge in &edges {
            let _ = writeln!(
                out,
                "  e{} bidirectional={} class={:?} label=({}) n{} -> n{}",
                edge.index().index(),
                edge.is_bidirectional(),
                edge.class(),
                edge.label(),
                edge.source().index(),
                edge.target().index(),
            );
        }

        let roots: Vec<String> = self.root_nodes().map(|n| format!("n{}", n.index())).collect();
        let _ = writeln!(out, "roots: [{}]", roots.join(", "));

        out
    }
}

#[cfg(test)]
mod tests {
    use gp2_common::{Atom, Label, Mark};

    use super::*;

    #[test]
    fn empty_graph_serialises_to_empty_brackets() {
        assert_eq!(GraphStore::new().to_gp2_text(), "[ | ]");
    }

    #[test]
    fn compact_form_marks_roots_and_bidirectional_edges() {
        let mut g = GraphStore::new();
        let a = g.add_node(true, None, None).unwrap();
        let one = Label::new(Mark::None, vec![Atom::Int(1)]).unwrap();
        let b = g.add_node(false, Some(one), None).unwrap();
        g.add_edge(true, None, a, b, None).unwrap();

        let text = g.to_gp2_text();
        assert_eq!(
            text,
            "[ (n0(R), empty) (n1, 1) | (e0(B), n0, n1, empty) ]"
        );
    }

    #[test]
    fn mark_suffix_appears_only_when_non_none() {
        let mut g = GraphStore::new();
        let label = Label::new(Mark::Red, vec![Atom::Int(7)]).unwrap();
        g.add_node(false, Some(label), None).unwrap();
        assert!(g.to_gp2_text().contains("7 # red"));
    }
}
