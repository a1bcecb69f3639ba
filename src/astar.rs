//! Generic A* over any hashable node type. Nodes live in an insertion-ordered table and refer to
//! their parents by index into it; the frontier only holds indices and cached costs.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;
use std::time::Instant;

use crate::error::PathError;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

/// Optional bounds on a single search, checked once per expanded node. A search that stays within
/// its limits behaves exactly as an unlimited one.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>,
    pub deadline: Option<Instant>,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    fn check(&self, expanded: usize) -> Result<(), PathError> {
        if let Some(limit) = self.max_expansions {
            if expanded >= limit {
                return Err(PathError::ExpansionLimit { limit });
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(PathError::DeadlineExceeded { expanded });
            }
        }
        if let Some(cancel) = &self.cancel {
            if cancel.load(atomic::Ordering::Relaxed) {
                return Err(PathError::Cancelled { expanded });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct NodeEntry<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then first-in first-out among equal estimates.
        // Reversed because BinaryHeap is a max-heap.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

fn reverse_path<N, C>(nodes: &FxIndexMap<N, NodeEntry<C>>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        nodes.get_index(i).map(|(node, entry)| {
            i = entry.parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until a node satisfying `success` is popped from the frontier and
/// returns the path to it together with its cost, or [None] if the frontier runs dry.
///
/// Expanded nodes are closed for good: they are never re-inserted, even if a cheaper route to
/// them shows up later. With a consistent heuristic this does not affect optimality.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    limits: &SearchLimits,
) -> Result<Option<(Vec<N>, C)>, PathError>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        sequence: 0,
        index: 0,
    });
    let mut sequence = 0;
    let mut expanded = 0;
    let mut nodes: FxIndexMap<N, NodeEntry<C>> = FxIndexMap::default();
    nodes.insert(
        start.clone(),
        NodeEntry {
            parent: NO_PARENT,
            cost: Zero::zero(),
            closed: false,
        },
    );
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, entry)) = nodes.get_index(index) else {
                continue;
            };
            // A node may sit in the heap several times if a cheaper way to it was found while
            // it waited. Only the entry matching the best known cost is live.
            if entry.closed || cost > entry.cost {
                continue;
            }
            if success(node) {
                let path = reverse_path(&nodes, index);
                debug!(
                    "Reached goal after expanding {} nodes, {} discovered",
                    expanded,
                    nodes.len()
                );
                return Ok(Some((path, cost)));
            }
            limits.check(expanded)?;
            successors(node)
        };
        if let Some((_, entry)) = nodes.get_index_mut(index) {
            entry.closed = true;
        }
        expanded += 1;
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match nodes.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeEntry {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    let entry = e.get();
                    if entry.closed || entry.cost <= new_cost {
                        continue;
                    }
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert(NodeEntry {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
            }

            sequence += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                sequence,
                index: n,
            });
        }
    }
    debug!("Frontier exhausted after expanding {} nodes", expanded);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small weighted digraph as adjacency lists.
    fn graph(node: &u8) -> Vec<(u8, u32)> {
        match node {
            0 => vec![(1, 4), (2, 1)],
            1 => vec![(3, 1)],
            2 => vec![(1, 1), (3, 5)],
            _ => vec![],
        }
    }

    #[test]
    fn finds_cheapest_route() {
        let result = astar(&0u8, graph, |_| 0, |n| *n == 3, &SearchLimits::default()).unwrap();
        assert_eq!(result, Some((vec![0, 2, 1, 3], 3)));
    }

    #[test]
    fn start_is_goal() {
        let result = astar(&2u8, graph, |_| 0, |n| *n == 2, &SearchLimits::default()).unwrap();
        assert_eq!(result, Some((vec![2], 0)));
    }

    #[test]
    fn unreachable_goal() {
        let result = astar(&1u8, graph, |_| 0, |n| *n == 0, &SearchLimits::default()).unwrap();
        assert_eq!(result, None);
    }

    /// Equal estimates are expanded in the order they were discovered.
    #[test]
    fn fifo_tie_break() {
        let mut order = Vec::new();
        let result = astar(
            &0u8,
            |n: &u8| {
                order.push(*n);
                match n {
                    0 => vec![(1, 1), (2, 1), (3, 1)],
                    _ => vec![(9, 1)],
                }
            },
            |_| 0u32,
            |n| *n == 9,
            &SearchLimits::default(),
        )
        .unwrap();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(result, Some((vec![0, 1, 9], 2)));
    }

    /// Once expanded, a node keeps its parent even if a cheaper route is found afterwards.
    #[test]
    fn closed_nodes_are_final() {
        // The misleading heuristic makes 1 look closer than 2, so 1 is expanded via the
        // expensive edge. Expanding 2 afterwards finds a cheaper route to 1, which is ignored.
        let result = astar(
            &0u8,
            |n: &u8| match n {
                0 => vec![(1, 5), (2, 1)],
                2 => vec![(1, 1)],
                1 => vec![(3, 1)],
                _ => vec![],
            },
            |n| match n {
                2 => 10u32,
                3 => 20,
                _ => 0,
            },
            |n| *n == 3,
            &SearchLimits::default(),
        )
        .unwrap();
        assert_eq!(result, Some((vec![0, 1, 3], 6)));
    }

    #[test]
    fn expansion_limit() {
        let limits = SearchLimits {
            max_expansions: Some(2),
            ..Default::default()
        };
        let result = astar(&0u8, graph, |_| 0, |n| *n == 3, &limits);
        assert_eq!(result, Err(PathError::ExpansionLimit { limit: 2 }));
    }

    #[test]
    fn cancelled() {
        let limits = SearchLimits {
            cancel: Some(Arc::new(AtomicBool::new(true))),
            ..Default::default()
        };
        let result = astar(&0u8, graph, |_| 0, |n| *n == 3, &limits);
        assert_eq!(result, Err(PathError::Cancelled { expanded: 0 }));
    }

    #[test]
    fn expired_deadline() {
        let limits = SearchLimits {
            deadline: Some(Instant::now()),
            ..Default::default()
        };
        let result = astar(&0u8, graph, |_| 0, |n| *n == 3, &limits);
        assert_eq!(result, Err(PathError::DeadlineExceeded { expanded: 0 }));
    }

    /// Limits are not consulted when the start already satisfies the goal.
    #[test]
    fn limits_ignored_at_goal() {
        let limits = SearchLimits {
            max_expansions: Some(0),
            ..Default::default()
        };
        let result = astar(&3u8, graph, |_| 0, |n| *n == 3, &limits).unwrap();
        assert_eq!(result, Some((vec![3], 0)));
    }
}
