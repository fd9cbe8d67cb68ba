//! The GP2 label data model: marks, atoms, labels, and label classes.
//!
//! A [`Label`] is the pair `(mark, list)` carried by every node and edge. Its
//! [`LabelClass`] is a coarse classification derived from the list, used
//! purely as a secondary-index key by `gp2_core::index::ClassIndex` — it has
//! no bearing on label equality or on the value the label actually holds.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Maximum atom-list length a label may carry; lists longer than 5 are
/// rejected.
pub const MAX_LIST_LENGTH: usize = 5;

/// Colour/style tag carried by a label, orthogonal to its atom list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Mark {
    /// No mark (the common case).
    #[default]
    None,
    /// `red`.
    Red,
    /// `green`.
    Green,
    /// `blue`.
    Blue,
    /// `grey`.
    Grey,
    /// `dashed`.
    Dashed,
    /// `any` (rule LHS only; `any+` is represented the same way and
    /// distinguished by the parser that is out of scope for this core).
    Any,
}

impl Mark {
    /// Returns the GP2 mark keyword, or `None` for [`Mark::None`] (which has
    /// no textual representation — §6 only prints `# <mark>` when non-none).
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Mark::None => None,
            Mark::Red => Some("red"),
            Mark::Green => Some("green"),
            Mark::Blue => Some("blue"),
            Mark::Grey => Some("grey"),
            Mark::Dashed => Some("dashed"),
            Mark::Any => Some("any"),
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or(""))
    }
}

/// A single atom in a label's list, or a sub-expression of one.
///
/// Recursive variants (negation, the binary operators) own their operands;
/// they are freed in post-order along with the rest of the label when the
/// owning node or edge is removed.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Atom {
    /// An integer constant.
    Int(i64),
    /// A character constant.
    Char(char),
    /// A string constant.
    Str(String),
    /// A reference to a variable, by name (resolved by the — out of scope —
    /// matcher, not by this core).
    Var(String),
    /// `indeg(node_id)`.
    Indeg(String),
    /// `outdeg(node_id)`.
    Outdeg(String),
    /// `llength(list)`, where `list` names a list-valued variable.
    Llength(String),
    /// `slength(atom)`.
    Slength(Box<Atom>),
    /// Unary negation of an atom.
    Neg(Box<Atom>),
    /// Binary addition.
    Add(Box<Atom>, Box<Atom>),
    /// Binary subtraction.
    Sub(Box<Atom>, Box<Atom>),
    /// Binary multiplication.
    Mul(Box<Atom>, Box<Atom>),
    /// Binary division.
    Div(Box<Atom>, Box<Atom>),
    /// String concatenation (`.`).
    Concat(Box<Atom>, Box<Atom>),
}

impl Atom {
    /// An atom is ground if it contains no variable reference and no
    /// degree/length atom (those depend on a live graph to evaluate).
    #[must_use]
    pub fn is_ground(&self) -> bool {
        match self {
            Atom::Int(_) | Atom::Char(_) | Atom::Str(_) => true,
            Atom::Var(_) | Atom::Indeg(_) | Atom::Outdeg(_) | Atom::Llength(_) => false,
            Atom::Slength(a) | Atom::Neg(a) => a.is_ground(),
            Atom::Add(a, b) | Atom::Sub(a, b) | Atom::Mul(a, b) | Atom::Div(a, b) | Atom::Concat(a, b) => {
                a.is_ground() && b.is_ground()
            }
        }
    }

    fn kind(&self) -> AtomKind {
        match self {
            Atom::Int(_) | Atom::Neg(_) => AtomKind::Int,
            Atom::Char(_) | Atom::Str(_) | Atom::Slength(_) | Atom::Concat(_, _) => AtomKind::Str,
            Atom::Var(_) => AtomKind::Var,
            Atom::Indeg(_) | Atom::Outdeg(_) | Atom::Llength(_) => AtomKind::Var,
            Atom::Add(_, _) | Atom::Sub(_, _) | Atom::Mul(_, _) | Atom::Div(_, _) => AtomKind::Int,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Int(n) => write!(f, "{n}"),
            Atom::Char(c) => write!(f, "'{c}'"),
            Atom::Str(s) => write!(f, "\"{s}\""),
            Atom::Var(v) => write!(f, "{v}"),
            Atom::Indeg(id) => write!(f, "indeg({id})"),
            Atom::Outdeg(id) => write!(f, "outdeg({id})"),
            Atom::Llength(list) => write!(f, "llength({list})"),
            Atom::Slength(a) => write!(f, "slength({a})"),
            Atom::Neg(a) => write!(f, "- {a}"),
            Atom::Add(a, b) => write!(f, "({a} + {b})"),
            Atom::Sub(a, b) => write!(f, "({a} - {b})"),
            Atom::Mul(a, b) => write!(f, "({a} * {b})"),
            Atom::Div(a, b) => write!(f, "({a} / {b})"),
            Atom::Concat(a, b) => write!(f, "({a} . {b})"),
        }
    }
}

/// Rough shape of an atom, used only to derive [`LabelClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AtomKind {
    Int,
    Str,
    Var,
}

/// Coarse classification of a label, derived purely from its atom list and
/// used as a secondary-index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum LabelClass {
    /// The empty list.
    Empty,
    /// A single integer-shaped atom.
    Int,
    /// A single string-shaped atom.
    String,
    /// A single variable reference.
    AtomicVar,
    /// A ground list of exactly 2 atoms.
    List2,
    /// A ground list of exactly 3 atoms.
    List3,
    /// A ground list of exactly 4 atoms.
    List4,
    /// A ground list of exactly 5 atoms.
    List5,
    /// A list whose length is itself variable (a list-length variable
    /// appears somewhere in the label).
    ListVar,
}

impl LabelClass {
    /// Total number of classes; used to size the fixed-size class index
    /// arrays in `gp2_core::index`.
    pub const COUNT: usize = 9;

    /// Dense discriminant in `0..COUNT`, for indexing fixed-size arrays.
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            LabelClass::Empty => 0,
            LabelClass::Int => 1,
            LabelClass::String => 2,
            LabelClass::AtomicVar => 3,
            LabelClass::List2 => 4,
            LabelClass::List3 => 5,
            LabelClass::List4 => 6,
            LabelClass::List5 => 7,
            LabelClass::ListVar => 8,
        }
    }
}

/// A label: a mark plus an ordered list of atoms.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Label {
    /// The label's mark.
    pub mark: Mark,
    /// The label's atom list, at most [`MAX_LIST_LENGTH`] long.
    pub list: SmallVec<[Atom; MAX_LIST_LENGTH]>,
}

impl Label {
    /// The sentinel empty label (`empty` in the textual form), with no mark.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            mark: Mark::None,
            list: SmallVec::new(),
        }
    }

    /// Builds a label from a mark and an atom list, rejecting lists longer
    /// than [`MAX_LIST_LENGTH`].
    pub fn new(mark: Mark, list: impl IntoIterator<Item = Atom>) -> Result<Self> {
        let list: SmallVec<[Atom; MAX_LIST_LENGTH]> = list.into_iter().collect();
        if list.len() > MAX_LIST_LENGTH {
            return Err(Error::LabelTooLong { length: list.len() });
        }
        Ok(Self { mark, list })
    }

    /// A label is ground if it contains no variables and no degree/length
    /// atoms anywhere in its list.
    #[must_use]
    pub fn is_ground(&self) -> bool {
        self.list.iter().all(Atom::is_ground)
    }

    /// Classifies this label's list.
    pub fn class(&self) -> Result<LabelClass> {
        classify(&self.list)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.list.is_empty() {
            write!(f, "empty")?;
        } else {
            for (i, atom) in self.list.iter().enumerate() {
                if i > 0 {
                    write!(f, " : ")?;
                }
                write!(f, "{atom}")?;
            }
        }
        if let Some(kw) = self.mark.keyword() {
            write!(f, " # {kw}")?;
        }
        Ok(())
    }
}

/// Classifies an atom list into a [`LabelClass`].
///
/// Empty list => [`LabelClass::Empty`]. Lists longer than
/// [`MAX_LIST_LENGTH`] are rejected with
/// [`Error::LabelTooLong`]. A length-1 list classifies by its atom's kind
/// (integer/negation => [`LabelClass::Int`]; char/string/concatenation/
/// `slength` => [`LabelClass::String`]; variable => [`LabelClass::AtomicVar`]).
/// A list-length variable (`llength`, `indeg`, `outdeg`) anywhere in the list
/// forces [`LabelClass::ListVar`] regardless of length.
pub fn classify(list: &[Atom]) -> Result<LabelClass> {
    if list.len() > MAX_LIST_LENGTH {
        return Err(Error::LabelTooLong { length: list.len() });
    }

    if list.iter().any(contains_list_length_atom) {
        return Ok(LabelClass::ListVar);
    }

    match list.len() {
        0 => Ok(LabelClass::Empty),
        1 => Ok(match list[0].kind() {
            AtomKind::Int => LabelClass::Int,
            AtomKind::Str => LabelClass::String,
            AtomKind::Var => LabelClass::AtomicVar,
        }),
        2 => Ok(LabelClass::List2),
        3 => Ok(LabelClass::List3),
        4 => Ok(LabelClass::List4),
        5 => Ok(LabelClass::List5),
        n => unreachable!("list length {n} already rejected above"),
    }
}

fn contains_list_length_atom(atom: &Atom) -> bool {
    match atom {
        Atom::Llength(_) => true,
        Atom::Int(_) | Atom::Char(_) | Atom::Str(_) | Atom::Var(_) | Atom::Indeg(_) | Atom::Outdeg(_) => false,
        Atom::Slength(a) | Atom::Neg(a) => contains_list_length_atom(a),
        Atom::Add(a, b) | Atom::Sub(a, b) | Atom::Mul(a, b) | Atom::Div(a, b) | Atom::Concat(a, b) => {
            contains_list_length_atom(a) || contains_list_length_atom(b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_classifies_empty() {
        assert_eq!(classify(&[]).unwrap(), LabelClass::Empty);
    }

    #[test]
    fn single_int_classifies_int() {
        assert_eq!(classify(&[Atom::Int(42)]).unwrap(), LabelClass::Int);
        assert_eq!(
            classify(&[Atom::Neg(Box::new(Atom::Int(1)))]).unwrap(),
            LabelClass::Int
        );
    }

    #[test]
    fn single_string_shaped_classifies_string() {
        assert_eq!(classify(&[Atom::Str("x".into())]).unwrap(), LabelClass::String);
        assert_eq!(classify(&[Atom::Char('c')]).unwrap(), LabelClass::String);
        assert_eq!(
            classify(&[Atom::Concat(
                Box::new(Atom::Str("a".into())),
                Box::new(Atom::Str("b".into()))
            )])
            .unwrap(),
            LabelClass::String
        );
    }

    #[test]
    fn single_var_classifies_atomic_var() {
        assert_eq!(classify(&[Atom::Var("x".into())]).unwrap(), LabelClass::AtomicVar);
    }

    #[test]
    fn lengths_two_through_five_classify_by_length() {
        let mk = |n| (0..n).map(Atom::Int).collect::<Vec<_>>();
        assert_eq!(classify(&mk(2)).unwrap(), LabelClass::List2);
        assert_eq!(classify(&mk(3)).unwrap(), LabelClass::List3);
        assert_eq!(classify(&mk(4)).unwrap(), LabelClass::List4);
        assert_eq!(classify(&mk(5)).unwrap(), LabelClass::List5);
    }

    #[test]
    fn length_six_is_rejected() {
        let list: Vec<Atom> = (0..6).map(Atom::Int).collect();
        assert!(matches!(classify(&list), Err(Error::LabelTooLong { length: 6 })));
    }

    #[test]
    fn list_length_variable_dominates_classification() {
        let list = vec![Atom::Int(1), Atom::Llength("xs".into())];
        assert_eq!(classify(&list).unwrap(), LabelClass::ListVar);
    }

    #[test]
    fn slot_indices_are_distinct() {
        use std::collections::HashSet;
        let classes = [
            LabelClass::Empty,
            LabelClass::Int,
            LabelClass::String,
            LabelClass::AtomicVar,
            LabelClass::List2,
            LabelClass::List3,
            LabelClass::List4,
            LabelClass::List5,
            LabelClass::ListVar,
        ];
        let slots: HashSet<usize> = classes.iter().copied().map(LabelClass::slot).collect();
        assert_eq!(slots.len(), LabelClass::COUNT);
    }

    #[test]
    fn empty_label_displays_as_empty() {
        assert_eq!(Label::empty().to_string(), "empty");
    }

    #[test]
    fn label_displays_colon_separated_list_and_mark() {
        let label = Label::new(
            Mark::Red,
            vec![Atom::Int(1), Atom::Str("foo".into()), Atom::Var("x".into())],
        )
        .unwrap();
        assert_eq!(label.to_string(), "1 : \"foo\" : x # red");
    }

    #[test]
    fn groundness_follows_variables_and_degree_atoms() {
        assert!(Label::new(Mark::None, vec![Atom::Int(1)]).unwrap().is_ground());
        assert!(!Label::new(Mark::None, vec![Atom::Var("x".into())]).unwrap().is_ground());
        assert!(!Label::new(Mark::None, vec![Atom::Indeg("n".into())])
            .unwrap()
            .is_ground());
    }

    #[test]
    fn label_too_long_is_rejected_before_installation() {
        let list: Vec<Atom> = (0..6).map(Atom::Int).collect();
        assert!(Label::new(Mark::None, list).is_err());
    }
}
