use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Which event of a depth-first search assigns the rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Rank in the order nodes are first reached
    Discover,
    /// Rank in the order the search backtracks out of nodes
    Finish,
}

/// Run an iterative depth-first search from `roots` (in order, skipping roots
/// already reached) and number every reached node by `order`.
///
/// Successors are visited in the order `successors` yields them, so equal
/// inputs always produce equal ranks.
pub fn depth_first_ranks<S, I, F>(roots: I, order: RankOrder, mut successors: F) -> HashMap<S, usize>
where
    S: Copy + Eq + Hash,
    I: IntoIterator<Item = S>,
    F: FnMut(S) -> Vec<S>,
{
    let mut ranks = HashMap::new();
    let mut visited = HashSet::new();
    let mut stack: Vec<(S, std::vec::IntoIter<S>)> = Vec::new();

    for root in roots {
        if !visited.insert(root) {
            continue;
        }
        if order == RankOrder::Discover {
            ranks.insert(root, ranks.len());
        }
        stack.push((root, successors(root).into_iter()));

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.1.next() {
                if visited.insert(child) {
                    if order == RankOrder::Discover {
                        ranks.insert(child, ranks.len());
                    }
                    stack.push((child, successors(child).into_iter()));
                }
            } else if let Some((node, _)) = stack.pop() {
                if order == RankOrder::Finish {
                    ranks.insert(node, ranks.len());
                }
            }
        }
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph<'a>(adjacency: &'a [&'a [u32]]) -> impl Fn(u32) -> Vec<u32> + 'a {
        move |n| adjacency[n as usize].to_vec()
    }

    #[test]
    fn test_discover_and_finish_on_loop() {
        // 0 -> 1 -> 2 -> 1, 2 -> 3
        let adjacency: &[&[u32]] = &[&[1], &[2], &[1, 3], &[]];

        let discover = depth_first_ranks([0], RankOrder::Discover, graph(adjacency));
        assert_eq!(discover[&0], 0);
        assert_eq!(discover[&1], 1);
        assert_eq!(discover[&2], 2);
        assert_eq!(discover[&3], 3);

        let finish = depth_first_ranks([0], RankOrder::Finish, graph(adjacency));
        assert_eq!(finish[&3], 0);
        assert_eq!(finish[&2], 1);
        assert_eq!(finish[&1], 2);
        assert_eq!(finish[&0], 3);
    }

    #[test]
    fn test_unreachable_nodes_get_no_rank() {
        let adjacency: &[&[u32]] = &[&[1], &[], &[0]];
        let discover = depth_first_ranks([0], RankOrder::Discover, graph(adjacency));
        assert_eq!(discover.len(), 2);
        assert!(!discover.contains_key(&2));
    }

    #[test]
    fn test_multiple_roots_continue_numbering() {
        let adjacency: &[&[u32]] = &[&[1], &[], &[1, 3], &[]];
        let discover = depth_first_ranks([0, 2, 0], RankOrder::Discover, graph(adjacency));
        assert_eq!(discover[&0], 0);
        assert_eq!(discover[&1], 1);
        assert_eq!(discover[&2], 2);
        assert_eq!(discover[&3], 3);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 200_000u32;
        let discover = depth_first_ranks([0u32], RankOrder::Finish, |n| {
            if n < depth {
                vec![n + 1]
            } else {
                Vec::new()
            }
        });
        assert_eq!(discover.len(), depth as usize + 1);
        assert_eq!(discover[&depth], 0);
    }
}
