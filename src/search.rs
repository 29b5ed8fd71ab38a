//! Generic A* core used by the [Pathfinder](crate::Pathfinder). Modelled on
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html),
//! but with an explicit closed set, ties on total cost broken by the heuristic, and a hook to
//! abort between expansions.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::{SaturatingAdd, Zero};

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Bookkeeping for one discovered node. `parent` is the arena index of the node it was reached
/// from and is [None] only for the start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode<C> {
    pub cost_from_start: C,
    pub heuristic: C,
    pub parent: Option<usize>,
    pub closed: bool,
}

impl<C: SaturatingAdd + Copy> SearchNode<C> {
    /// Cost from the start plus the heuristic, saturating at the largest value of `C`.
    pub fn total_cost(&self) -> C {
        self.cost_from_start.saturating_add(&self.heuristic)
    }
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    heuristic: K,
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.heuristic.eq(&other.heuristic)
            && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest total cost first, then smallest heuristic,
        // then whichever entered the frontier first
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Per-query state: an arena of [SearchNode]s keyed by node and a frontier ordered by total cost.
/// A node is open while it is in the arena and not closed.
pub struct SearchState<N, C> {
    nodes: FxIndexMap<N, SearchNode<C>>,
    frontier: BinaryHeap<SmallestCostHolder<C>>,
    sequence: usize,
    expanded: usize,
}

impl<N, C> SearchState<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + SaturatingAdd + Ord + Copy,
{
    pub fn new(start: N, heuristic: C) -> Self {
        let mut state = SearchState {
            nodes: FxIndexMap::default(),
            frontier: BinaryHeap::new(),
            sequence: 0,
            expanded: 0,
        };
        let root = SearchNode {
            cost_from_start: Zero::zero(),
            heuristic,
            parent: None,
            closed: false,
        };
        state.nodes.insert(start, root);
        state.push(0, &root);
        state
    }

    fn push(&mut self, index: usize, node: &SearchNode<C>) {
        self.frontier.push(SmallestCostHolder {
            estimated_cost: node.total_cost(),
            heuristic: node.heuristic,
            cost: node.cost_from_start,
            sequence: self.sequence,
            index,
        });
        self.sequence += 1;
    }

    /// Removes the open node with the lowest total cost from the frontier and returns its index.
    pub fn pop_lowest(&mut self) -> Option<usize> {
        while let Some(SmallestCostHolder { cost, index, .. }) = self.frontier.pop() {
            let node = &self.nodes[index];
            // A node is pushed again whenever a cheaper route to it is found; the older
            // entries are stale.
            if node.closed || cost > node.cost_from_start {
                continue;
            }
            return Some(index);
        }
        None
    }

    pub fn get(&self, index: usize) -> Option<(&N, &SearchNode<C>)> {
        self.nodes.get_index(index)
    }

    pub fn node(&self, key: &N) -> Option<&SearchNode<C>> {
        self.nodes.get(key)
    }

    /// Offers `successor` at `cost`, reached from the node at `parent`. Closed nodes and open
    /// nodes already reached at least as cheaply are left alone. Returns whether the node was
    /// opened or improved.
    pub fn relax<FH>(&mut self, successor: N, cost: C, parent: usize, heuristic: FH) -> bool
    where
        FH: FnOnce(&N) -> C,
    {
        let (index, node) = match self.nodes.entry(successor) {
            Vacant(e) => {
                let node = SearchNode {
                    cost_from_start: cost,
                    heuristic: heuristic(e.key()),
                    parent: Some(parent),
                    closed: false,
                };
                let index = e.index();
                e.insert(node);
                (index, node)
            }
            Occupied(mut e) => {
                let existing = e.get();
                if existing.closed || existing.cost_from_start <= cost {
                    return false;
                }
                let h = heuristic(e.key());
                let index = e.index();
                let node = e.get_mut();
                node.cost_from_start = cost;
                node.heuristic = h;
                node.parent = Some(parent);
                (index, *node)
            }
        };
        self.push(index, &node);
        true
    }

    pub fn close(&mut self, index: usize) {
        if let Some((_, node)) = self.nodes.get_index_mut(index) {
            node.closed = true;
            self.expanded += 1;
        }
    }

    /// Number of nodes closed so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Follows parent links back from `index`, returning the nodes after the start up to and
    /// including `index`.
    pub fn retrace(&self, index: usize) -> Vec<N> {
        let mut path = std::iter::successors(Some(index), |&i| self.nodes[i].parent)
            .filter_map(|i| {
                let (key, node) = self.nodes.get_index(i)?;
                node.parent.map(|_| key.clone())
            })
            .collect::<Vec<N>>();
        path.reverse();
        path
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<N, C> {
    /// `path` excludes the start and ends at the node accepted by `success`.
    Found { path: Vec<N>, cost: C },
    /// The frontier emptied without reaching a goal.
    Exhausted,
    /// `abort` returned [true] before the goal was reached.
    Aborted,
}

/// Runs A* from `start`. `successors` yields the enterable neighbours of a node with the cost of
/// entering them, `abort` is consulted with the number of expanded nodes before every expansion.
/// Costs saturate instead of overflowing. Also returns the number of expanded nodes.
pub fn astar<N, C, FN, IN, FH, FS, FA>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    mut abort: FA,
) -> (SearchOutcome<N, C>, usize)
where
    N: Eq + Hash + Clone,
    C: Zero + SaturatingAdd + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
    FA: FnMut(usize) -> bool,
{
    let mut state = SearchState::new(start.clone(), heuristic(start));
    while let Some(index) = state.pop_lowest() {
        if abort(state.expanded()) {
            return (SearchOutcome::Aborted, state.expanded());
        }
        let (node, cost) = match state.get(index) {
            Some((node, n)) => (node.clone(), n.cost_from_start),
            None => break,
        };
        if success(&node) {
            let path = state.retrace(index);
            return (SearchOutcome::Found { path, cost }, state.expanded());
        }
        for (successor, move_cost) in successors(&node) {
            state.relax(successor, cost.saturating_add(&move_cost), index, &mut heuristic);
        }
        state.close(index);
    }
    (SearchOutcome::Exhausted, state.expanded())
}
