//! Connectivity algorithms
//!
//! Weakly connected components, Tarjan's strongly connected components and
//! cycle extraction built on top of them.

use super::common::{EdgeKey, GraphView};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Weakly Connected Components (WCC)
///
/// Ignores edge direction: from every unvisited node the walk follows both
/// successors and predecessors. Isolated nodes form singleton components.
pub fn components<V: GraphView + ?Sized>(view: &V) -> Vec<Vec<String>> {
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut result = Vec::new();

    for start in view.node_ids() {
        if visited.contains(start) {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![start];

        while let Some(v) = stack.pop() {
            if !visited.insert(v) {
                continue;
            }
            component.push(v.to_string());

            // Reversed so that successors are explored first
            let preds = view.predecessors(v).unwrap_or_default();
            let succs = view.successors(v).unwrap_or_default();
            stack.extend(preds.into_iter().rev().filter(|w| !visited.contains(w)));
            stack.extend(succs.into_iter().rev().filter(|w| !visited.contains(w)));
        }

        result.push(component);
    }

    debug!("Found {} weakly connected components", result.len());
    result
}

#[derive(Debug, Clone, Copy)]
struct TarjanEntry {
    index: usize,
    lowlink: usize,
    on_stack: bool,
}

struct Frame<'a> {
    node: &'a str,
    successors: Vec<&'a str>,
    next: usize,
}

/// Tarjan's strongly connected components
///
/// Returns every SCC, singletons included, in the order they are completed.
/// Uses an explicit frame stack; when a child frame finishes its lowlink is
/// folded into the parent's.
pub fn tarjan<V: GraphView + ?Sized>(view: &V) -> Vec<Vec<String>> {
    let mut index = 0;
    let mut entries: FxHashMap<&str, TarjanEntry> = FxHashMap::default();
    let mut scc_stack: Vec<&str> = Vec::new();
    let mut result = Vec::new();

    for root in view.node_ids() {
        if entries.contains_key(root) {
            continue;
        }

        entries.insert(root, TarjanEntry { index, lowlink: index, on_stack: true });
        index += 1;
        scc_stack.push(root);
        let mut frames = vec![Frame {
            node: root,
            successors: view.successors(root).unwrap_or_default(),
            next: 0,
        }];

        while let Some(frame) = frames.last_mut() {
            let v = frame.node;
            if let Some(&w) = frame.successors.get(frame.next) {
                frame.next += 1;
                match entries.get(w).copied() {
                    None => {
                        entries.insert(w, TarjanEntry { index, lowlink: index, on_stack: true });
                        index += 1;
                        scc_stack.push(w);
                        frames.push(Frame {
                            node: w,
                            successors: view.successors(w).unwrap_or_default(),
                            next: 0,
                        });
                    }
                    Some(w_entry) if w_entry.on_stack => {
                        if let Some(v_entry) = entries.get_mut(v) {
                            v_entry.lowlink = v_entry.lowlink.min(w_entry.index);
                        }
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            let Some(v_entry) = entries.get(v).copied() else {
                continue;
            };

            if v_entry.lowlink == v_entry.index {
                let mut component = Vec::new();
                while let Some(w) = scc_stack.pop() {
                    if let Some(w_entry) = entries.get_mut(w) {
                        w_entry.on_stack = false;
                    }
                    component.push(w.to_string());
                    if w == v {
                        break;
                    }
                }
                result.push(component);
            }

            if let Some(parent) = frames.last() {
                if let Some(p_entry) = entries.get_mut(parent.node) {
                    p_entry.lowlink = p_entry.lowlink.min(v_entry.lowlink);
                }
            }
        }
    }

    result
}

/// Components that actually contain a cycle.
///
/// That is every SCC with more than one node plus single nodes carrying a
/// self-loop.
pub fn find_cycles<V: GraphView + ?Sized>(view: &V) -> Vec<Vec<String>> {
    let cycles: Vec<Vec<String>> = tarjan(view)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => view
                .out_edges(single)
                .map_or(false, |edges| edges.iter().any(EdgeKey::is_self_loop)),
            _ => true,
        })
        .collect();
    debug!("Found {} cycles", cycles.len());
    cycles
}
