//! Topological ordering
//!
//! Topological sort with cycle detection, and the acyclicity check derived
//! from it.

use super::common::GraphView;
use super::error::{AlgoError, AlgoResult};
use rustc_hash::FxHashSet;
use tracing::trace;

struct Frame<'a> {
    node: &'a str,
    predecessors: Vec<&'a str>,
    next: usize,
}

/// Topological sort
///
/// Walks predecessors depth-first starting from every sink, so each node is
/// emitted after all of its predecessors and edge tails precede edge heads.
/// Returns `AlgoError::Cycle` when the walk meets a node already on the
/// current path, or when some nodes are unreachable from any sink (a cycle
/// with no way out).
pub fn topsort<V: GraphView + ?Sized>(view: &V) -> AlgoResult<Vec<String>> {
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut on_path: FxHashSet<&str> = FxHashSet::default();
    let mut result = Vec::with_capacity(view.node_count());

    for sink in view.sinks() {
        if visited.contains(sink) {
            continue;
        }
        visited.insert(sink);
        on_path.insert(sink);
        let mut stack = vec![Frame {
            node: sink,
            predecessors: view.predecessors(sink).unwrap_or_default(),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if let Some(&u) = frame.predecessors.get(frame.next) {
                frame.next += 1;
                if on_path.contains(u) {
                    trace!("Back edge into {} closes a cycle", u);
                    return Err(AlgoError::Cycle);
                }
                if visited.insert(u) {
                    on_path.insert(u);
                    stack.push(Frame {
                        node: u,
                        predecessors: view.predecessors(u).unwrap_or_default(),
                        next: 0,
                    });
                }
            } else if let Some(done) = stack.pop() {
                on_path.remove(done.node);
                result.push(done.node.to_string());
            }
        }
    }

    if visited.len() != view.node_count() {
        return Err(AlgoError::Cycle);
    }
    Ok(result)
}

/// Whether the graph has no directed cycle.
///
/// Only the cycle signal from [`topsort`] is turned into `false`; any other
/// error is passed through.
pub fn is_acyclic<V: GraphView + ?Sized>(view: &V) -> AlgoResult<bool> {
    match topsort(view) {
        Ok(_) => Ok(true),
        Err(AlgoError::Cycle) => Ok(false),
        Err(e) => Err(e),
    }
}
