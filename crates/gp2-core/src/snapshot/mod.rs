//! The snapshot/restore stack backing speculative execution.
//!
//! A stack of full-graph copies guards a transactional region, adapted to
//! GP2's control constructs: `try C then P else Q`, `if C then P else Q`,
//! and `P!` (apply `P` as long as possible) all push a copy of the current
//! graph before attempting `C`/`P`, then either discard it (commit) or pop
//! it back onto `current` (roll back).
//!
//! Because [`GraphStore`] is index-based rather than pointer-based, a
//! three-pass pointer-translating deep copy is unnecessary: `GraphStore`'s
//! derived [`Clone`] impl already does the job. Cloning a `SlotMap<T>`
//! clones its backing `Vec<Option<T>>` and free list verbatim, so every
//! `NodeIndex`/`EdgeIndex` in the clone still addresses the same logical
//! entity it did in the source. No translation table is needed.

use gp2_common::{Error, Result};

use crate::graph::GraphStore;

/// Owns the graph under execution and the stack of speculative snapshots
/// taken while evaluating `try`, `if`, and `P!`.
#[derive(Debug, Clone)]
pub struct Executor {
    current: GraphStore,
    stack: Vec<GraphStore>,
}

impl Executor {
    /// Starts executing on `initial`, with an empty snapshot stack.
    #[must_use]
    pub fn new(initial: GraphStore) -> Self {
        Self {
            current: initial,
            stack: Vec::new(),
        }
    }

    /// The graph as it stands right now.
    #[must_use]
    pub fn current(&self) -> &GraphStore {
        &self.current
    }

    /// Mutable access to the graph under execution, for callers applying a
    /// rule or host-graph edit directly.
    pub fn current_mut(&mut self) -> &mut GraphStore {
        &mut self.current
    }

    /// Replaces the graph under execution outright (used when a rule
    /// application engine, out of scope here, commits a match).
    pub fn set_current(&mut self, graph: GraphStore) {
        self.current = graph;
    }

    /// Pushes a deep copy of the current graph onto the snapshot stack,
    /// returning the depth of the stack after the push.
    pub fn copy_graph(&mut self) -> usize {
        self.stack.push(self.current.clone());
        self.stack.len()
    }

    /// Pops the most recent snapshot and installs it as the current graph,
    /// discarding every edit made since the matching [`Self::copy_graph`].
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if the stack is empty.
    pub fn restore_graph(&mut self) -> Result<()> {
        let snapshot = self
            .stack
            .pop()
            .ok_or_else(|| Error::InvariantViolation("restore_graph on empty snapshot stack".into()))?;
        self.current = snapshot;
        Ok(())
    }

    /// Discards the most recent snapshot without restoring it — the
    /// speculative attempt succeeded and its edits are kept. The commit
    /// path: the snapshot is simply dropped, not bubbled further up the
    /// stack.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if the stack is empty.
    pub fn discard_snapshot(&mut self) -> Result<()> {
        self.stack
            .pop()
            .map(drop)
            .ok_or_else(|| Error::InvariantViolation("discard_snapshot on empty snapshot stack".into()))
    }

    /// The current snapshot-stack depth, for diagnostics and tests.
    #[must_use]
    pub fn snapshot_depth(&self) -> usize {
        self.stack.len()
    }

    /// Drops every snapshot on the stack without restoring any of them,
    /// abandoning all pending `try`/`if`/`P!` frames at once. `current` is
    /// left untouched; only the stack is cleared.
    pub fn free_snapshot_stack(&mut self) {
        self.stack.clear();
    }

    /// Runs `attempt` speculatively: snapshots, runs it, and commits on
    /// `Ok(true)` or rolls back on `Ok(false)`, returning whichever branch
    /// of `(then, else_)` GP2's `try C then P else Q` selects.
    ///
    /// `attempt` returns `Ok(true)` if the speculative condition/rule
    /// succeeded (commit its edits), `Ok(false)` if it failed (the host
    /// graph is restored to its pre-attempt state and `attempt`'s partial
    /// edits, if any, are discarded).
    ///
    /// # Errors
    ///
    /// Propagates any error from `attempt`, `then`, or `else_`, and
    /// [`Error::InvariantViolation`] from a malformed snapshot stack.
    pub fn try_then_else<A, T, E, U>(
        &mut self,
        attempt: A,
        then: T,
        else_: E,
    ) -> Result<U>
    where
        A: FnOnce(&mut Executor) -> Result<bool>,
        T: FnOnce(&mut Executor) -> Result<U>,
        E: FnOnce(&mut Executor) -> Result<U>,
    {
        self.copy_graph();
        let succeeded = match attempt(self) {
            Ok(succeeded) => succeeded,
            Err(err) => {
                self.restore_graph()?;
                return Err(err);
            }
        };

        if succeeded {
            self.discard_snapshot()?;
            then(self)
        } else {
            self.restore_graph()?;
            else_(self)
        }
    }

    /// `if C then P else Q`: like [`Self::try_then_else`], but the
    /// condition branch's edits are always rolled back before `then`/
    /// `else_` run, win or lose — `C` is tested for satisfiability only,
    /// never committed.
    ///
    /// # Errors
    ///
    /// Propagates errors from `condition`, `then`, `else_`, or a malformed
    /// snapshot stack.
    pub fn if_then_else<C, T, E, U>(&mut self, condition: C, then: T, else_: E) -> Result<U>
    where
        C: FnOnce(&mut Executor) -> Result<bool>,
        T: FnOnce(&mut Executor) -> Result<U>,
        E: FnOnce(&mut Executor) -> Result<U>,
    {
        self.copy_graph();
        let result = condition(self);
        self.restore_graph()?;
        if result? {
            then(self)
        } else {
            else_(self)
        }
    }

    /// `P!`: applies `step` repeatedly, committing each successful
    /// application, until it reports no further match (`Ok(false)`).
    ///
    /// Each iteration snapshots before `step` runs so a partial/failed
    /// attempt never corrupts `current`. Returns the number of successful
    /// applications.
    ///
    /// # Errors
    ///
    /// Propagates any error from `step` or a malformed snapshot stack.
    pub fn as_long_as_possible<S>(&mut self, mut step: S) -> Result<usize>
    where
        S: FnMut(&mut Executor) -> Result<bool>,
    {
        let mut applications = 0;
        loop {
            self.copy_graph();
            match step(self) {
                Ok(true) => {
                    self.discard_snapshot()?;
                    applications += 1;
                }
                Ok(false) => {
                    self.restore_graph()?;
                    return Ok(applications);
                }
                Err(err) => {
                    self.restore_graph()?;
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_and_restore_round_trips() {
        let mut exec = Executor::new(GraphStore::new());
        exec.current_mut().add_node(false, None, None).unwrap();
        assert_eq!(exec.current().number_of_nodes(), 1);

        exec.copy_graph();
        exec.current_mut().add_node(false, None, None).unwrap();
        assert_eq!(exec.current().number_of_nodes(), 2);

        exec.restore_graph().unwrap();
        assert_eq!(exec.current().number_of_nodes(), 1);
        assert_eq!(exec.snapshot_depth(), 0);
    }

    #[test]
    fn restore_on_empty_stack_is_an_error() {
        let mut exec = Executor::new(GraphStore::new());
        assert!(exec.restore_graph().is_err());
    }

    #[test]
    fn free_snapshot_stack_drops_everything_without_restoring() {
        let mut exec = Executor::new(GraphStore::new());
        exec.current_mut().add_node(false, None, None).unwrap();

        exec.copy_graph();
        exec.current_mut().add_node(false, None, None).unwrap();
        exec.copy_graph();
        exec.current_mut().add_node(false, None, None).unwrap();
        assert_eq!(exec.snapshot_depth(), 2);

        exec.free_snapshot_stack();
        assert_eq!(exec.snapshot_depth(), 0);
        assert_eq!(exec.current().number_of_nodes(), 3, "current graph is untouched by freeing the stack");
    }

    #[test]
    fn try_then_else_commits_on_success() {
        let mut exec = Executor::new(GraphStore::new());
        let result = exec
            .try_then_else(
                |e| {
                    e.current_mut().add_node(false, None, None).unwrap();
                    Ok(true)
                },
                |e| Ok(e.current().number_of_nodes()),
                |_| Ok(999),
            )
            .unwrap();
        assert_eq!(result, 1);
        assert_eq!(exec.snapshot_depth(), 0);
    }

    #[test]
    fn try_then_else_rolls_back_on_failure() {
        let mut exec = Executor::new(GraphStore::new());
        let result = exec
            .try_then_else(
                |e| {
                    e.current_mut().add_node(false, None, None).unwrap();
                    Ok(false)
                },
                |_| Ok(999),
                |e| Ok(e.current().number_of_nodes()),
            )
            .unwrap();
        assert_eq!(result, 0);
        assert_eq!(exec.snapshot_depth(), 0);
    }

    #[test]
    fn if_then_else_never_keeps_condition_edits() {
        let mut exec = Executor::new(GraphStore::new());
        let result = exec
            .if_then_else(
                |e| {
                    e.current_mut().add_node(false, None, None).unwrap();
                    Ok(true)
                },
                |e| Ok(e.current().number_of_nodes()),
                |_| Ok(999),
            )
            .unwrap();
        assert_eq!(result, 0);
    }

    #[test]
    fn as_long_as_possible_counts_applications_and_stops_clean() {
        let mut exec = Executor::new(GraphStore::new());
        let mut remaining = 3;
        let applications = exec
            .as_long_as_possible(|e| {
                if remaining == 0 {
                    return Ok(false);
                }
                remaining -= 1;
                e.current_mut().add_node(false, None, None).unwrap();
                Ok(true)
            })
            .unwrap();

        assert_eq!(applications, 3);
        assert_eq!(exec.current().number_of_nodes(), 3);
        assert_eq!(exec.snapshot_depth(), 0);
    }
}
