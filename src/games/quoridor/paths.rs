//! Standalone graph utilities over a [`CellGraph`]: bridge finding and a
//! greedy best-first reachability search. Neither is used by move
//! generation, which relies on [`CellGraph::reaches`].

use super::graph::CellGraph;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

const UNSEEN: usize = usize::MAX;

/// Cell-to-cell edges whose removal disconnects the component containing
/// `root`, as `(parent, child)` pairs of the DFS tree. Goal sentinels are
/// ignored.
pub fn bridges(graph: &CellGraph, root: usize) -> Vec<(usize, usize)> {
    let n = graph.num_cells();
    let mut disc = vec![UNSEEN; n];
    let mut low = vec![0usize; n];
    let mut parent = vec![UNSEEN; n];
    let mut found = Vec::new();

    // (node, index of the next neighbour to look at)
    let mut stack = vec![(root, 0usize)];
    disc[root] = 0;
    low[root] = 0;
    let mut time = 1;

    while let Some(&(u, next)) = stack.last() {
        if let Some(&v) = graph.neighbors(u).get(next) {
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }
            if v >= n {
                continue;
            }
            if disc[v] == UNSEEN {
                parent[v] = u;
                disc[v] = time;
                low[v] = time;
                time += 1;
                stack.push((v, 0));
            } else if v != parent[u] {
                low[u] = low[u].min(disc[v]);
            }
        } else {
            stack.pop();
            if let Some(&(p, _)) = stack.last() {
                low[p] = low[p].min(low[u]);
                if low[u] > disc[p] {
                    found.push((p, u));
                }
            }
        }
    }
    found
}

/// Best-first search from `start` to the goal sentinel `goal`, expanding
/// the cell closest to `goal_row` first. Equivalent in outcome to a plain
/// reachability test.
pub fn greedy_best_first(graph: &CellGraph, start: usize, goal: usize, goal_row: usize) -> bool {
    let n = graph.num_cells();
    let width = graph.board_size();
    let row_distance = |cell: usize| (cell / width).abs_diff(goal_row);

    let mut queued = vec![false; graph.num_cells() + 2];
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((row_distance(start), start)));
    queued[start] = true;

    while let Some(Reverse((_, cell))) = frontier.pop() {
        for &next in graph.neighbors(cell) {
            if next == goal {
                return true;
            }
            if next < n && !queued[next] {
                queued[next] = true;
                frontier.push(Reverse((row_distance(next), next)));
            }
        }
    }
    false
}

/// Number of steps from `start` to `goal`'s row, or `None` when cut off.
pub fn distance_to_goal(graph: &CellGraph, start: usize, goal: usize) -> Option<usize> {
    let mut dist = vec![UNSEEN; graph.num_cells() + 2];
    let mut queue = VecDeque::from([start]);
    dist[start] = 0;

    while let Some(cell) = queue.pop_front() {
        for &next in graph.neighbors(cell) {
            if next == goal {
                return Some(dist[cell]);
            }
            if dist[next] == UNSEEN {
                dist[next] = dist[cell] + 1;
                queue.push_back(next);
            }
        }
    }
    None
}
