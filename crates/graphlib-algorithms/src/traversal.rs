//! Depth-first traversal
//!
//! Walks use an explicit frame stack of (node, targets, next-index) so deep
//! graphs cannot exhaust the call stack.

use super::common::GraphView;
use super::error::{AlgoError, AlgoResult};
use rustc_hash::FxHashSet;

/// When a node is emitted relative to the nodes it leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsOrder {
    Pre,
    Post,
}

struct Frame<'a> {
    node: &'a str,
    targets: Vec<&'a str>,
    next: usize,
}

fn targets<'a, V: GraphView + ?Sized>(view: &'a V, v: &str) -> Vec<&'a str> {
    let targets = if view.is_directed() {
        view.successors(v)
    } else {
        view.neighbors(v)
    };
    targets.unwrap_or_default()
}

/// Depth-first search from each of `roots` in turn.
///
/// Directed graphs are walked along successors, undirected graphs along
/// neighbors. Every reachable node appears exactly once. Fails before
/// visiting anything if a root is not in the graph.
pub fn dfs<'a, V>(view: &'a V, roots: &[&'a str], order: DfsOrder) -> AlgoResult<Vec<String>>
where
    V: GraphView + ?Sized,
{
    if let Some(missing) = roots.iter().find(|v| !view.contains_node(v)) {
        return Err(AlgoError::NodeNotFound(missing.to_string()));
    }

    let mut visited: FxHashSet<&'a str> = FxHashSet::default();
    let mut acc = Vec::with_capacity(view.node_count());

    for &root in roots {
        if !visited.insert(root) {
            continue;
        }
        if order == DfsOrder::Pre {
            acc.push(root.to_string());
        }
        let mut stack = vec![Frame {
            node: root,
            targets: targets(view, root),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if let Some(&w) = frame.targets.get(frame.next) {
                frame.next += 1;
                if visited.insert(w) {
                    if order == DfsOrder::Pre {
                        acc.push(w.to_string());
                    }
                    stack.push(Frame {
                        node: w,
                        targets: targets(view, w),
                        next: 0,
                    });
                }
            } else if let Some(done) = stack.pop() {
                if order == DfsOrder::Post {
                    acc.push(done.node.to_string());
                }
            }
        }
    }

    Ok(acc)
}

/// Pre-order depth-first search
pub fn preorder<'a, V: GraphView + ?Sized>(view: &'a V, roots: &[&'a str]) -> AlgoResult<Vec<String>> {
    dfs(view, roots, DfsOrder::Pre)
}

/// Post-order depth-first search
pub fn postorder<'a, V: GraphView + ?Sized>(view: &'a V, roots: &[&'a str]) -> AlgoResult<Vec<String>> {
    dfs(view, roots, DfsOrder::Post)
}
