use crate::errors::RouteError;
use super::GraphNodeMap;

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};




/// Returns a full map of the graph, includes all (reachable) nodes and costs
pub fn dijkstra_nodes_full<N, C, IT, NN>(start: N, neighbors: NN) -> Result<GraphNodeMap<N, C>, RouteError>
where
    N: Eq + Hash + Ord + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    {

    let (node_map, _) = dijkstra_search(start, neighbors, |_| false)?;

    Ok(node_map)
}


/// Traverses the graph using Dijkstra's algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Returns a map of every reached node with its best known cost, along with the index of the goal node.
///
/// Nodes leave the queue in ascending cost order; equal costs leave in ascending `N` order,
/// so the chosen path is stable between runs.
pub fn dijkstra_search<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> Result<(GraphNodeMap<N, C>, Option<usize>), RouteError>
where
    N: Eq + Hash + Ord + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest, QueueEntry reverses it
    // Decrease-key is done by pushing a fresh entry; the old one goes stale
    let mut nodes_to_visit: BinaryHeap<QueueEntry<N, C>> = BinaryHeap::new();

    // reached nodes, tuple is (parent_index, cost)
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    // Add start node to the map and queue
    let start_index = nodes_map.insert_full(start.clone(), (usize::MAX, Zero::zero())).0;
    nodes_to_visit.push(QueueEntry {
        index: start_index,
        cost: Zero::zero(),
        node: start,
    });

    // Loop over each node to visit, removing the smallest node
    while let Some(QueueEntry { cost, index, .. }) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            return Err(RouteError::MalformedGraph(format!("queue references unknown slot {index}")));
        };

        // If cost of new node from BinaryHeap is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost > c {
            log::trace!("skipping stale entry for {node:?} ({cost:?} > {c:?})");
            continue;
        }

        // Check if we've reached the goal
        if goal_fn(node) {
            return Ok((nodes_map, Some(index)));
        }

        let node = node.clone();

        // loop over neighbors
        for (neighbor, edge_cost) in neighbors(&node) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = edge_cost + c;

            let neighbor_index;

            match nodes_map.entry(neighbor.clone()) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    neighbor_index = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        // We've found a better path to this neighbor
                        neighbor_index = e.index();
                        e.insert((index, new_cost));
                    } else {
                        // The existing path is better, do nothing
                        continue;
                    }
                }
            }

            // Only add to the queue if we've found a better path
            nodes_to_visit.push(QueueEntry {
                index: neighbor_index,
                cost: new_cost,
                node: neighbor,
            });
        }
    }

    Ok((nodes_map, None))
}


/// Priority queue entry
/// - ordered by cost, then by node so that ties pop in ascending node order
/// - `index` points into the node map
#[derive(Debug)]
struct QueueEntry<N, C> {
    index: usize,
    cost: C,
    node: N,
}

impl<N: Ord, C: Ord> Ord for QueueEntry<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}
impl<N: Ord, C: Ord> PartialOrd for QueueEntry<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<N: Ord, C: Ord> PartialEq for QueueEntry<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<N: Ord, C: Ord> Eq for QueueEntry<N, C> {}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_algos::shortest_path;
    use std::collections::HashMap;

    // Search, then walk predecessors back from the goal
    fn path_to<NN, IT>(start: &str, neighbors: NN, goal: &str) -> Option<Vec<String>>
    where
        NN: Fn(&String) -> IT,
        IT: IntoIterator<Item = (String, u32)>,
    {
        let (node_map, goal_index) = dijkstra_search(start.to_string(), neighbors, |node| node == goal).unwrap();
        goal_index.map(|index| shortest_path(&node_map, index).unwrap())
    }

    // Helper function to create a test graph
    fn create_test_graph() -> HashMap<String, Vec<(String, u32)>> {
        let mut graph = HashMap::new();

        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        graph.insert("A".to_string(), vec![
            ("B".to_string(), 1),
            ("C".to_string(), 3),
        ]);
        graph.insert("B".to_string(), vec![("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 1)]);
        graph.insert("D".to_string(), vec![]);

        graph
    }

    // Helper function to create a neighbor function from a graph
    fn create_neighbor_fn(graph: &HashMap<String, Vec<(String, u32)>>) -> impl Fn(&String) -> Vec<(String, u32)> + '_ {
        move |node: &String| {
            graph.get(node).cloned().unwrap_or_default()
        }
    }

    fn costs_of(map: &GraphNodeMap<String, u32>) -> HashMap<String, u32> {
        map.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect()
    }

    #[test]
    fn test_dijkstra_search_simple() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        let (result, goal) = dijkstra_search(
            "A".to_string(),
            neighbors,
            |node| node == "D"
        ).unwrap();

        let costs = costs_of(&result);
        assert_eq!(costs["A"], 0);
        assert_eq!(costs["B"], 1);
        assert_eq!(costs["C"], 3);
        assert_eq!(costs["D"], 4); // Should be 4 via the A->C->D path
        assert_eq!(result.get_index(goal.unwrap()).unwrap().0, "D");
    }

    #[test]
    fn test_dijkstra_search_with_cycle() {
        // Create a graph with a cycle: A -> B -> C -> A
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("A".to_string(), 1), ("D".to_string(), 2)]);
        graph.insert("D".to_string(), vec![]);

        let neighbors = create_neighbor_fn(&graph);
        let (result, _) = dijkstra_search("A".to_string(), neighbors, |node| node == "D").unwrap();

        let costs = costs_of(&result);
        assert_eq!(costs["A"], 0);
        assert_eq!(costs["B"], 1);
        assert_eq!(costs["C"], 2);
        assert_eq!(costs["D"], 4);
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = create_test_graph();
        let path = path_to("A", create_neighbor_fn(&graph), "D").unwrap();

        // The expected path is A -> C -> D (the cheapest path)
        assert_eq!(path, vec!["A", "C", "D"].into_iter().map(String::from).collect::<Vec<_>>());
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![]);
        graph.insert("D".to_string(), vec![]); // D is not connected

        let result = path_to("A", create_neighbor_fn(&graph), "D");
        assert_eq!(result, None);
    }

    #[test]
    fn test_dijkstra_start_is_goal() {
        let graph = create_test_graph();
        let path = path_to("A", create_neighbor_fn(&graph), "A").unwrap();
        assert_eq!(path, vec!["A".to_string()]);
    }

    #[test]
    fn test_equal_costs_pop_in_ascending_order() {
        // A reaches both Y and X at cost 1, each then reaches Z at cost 1
        // X is popped first, so Z's parent must be X
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("Y".to_string(), 1), ("X".to_string(), 1)]);
        graph.insert("X".to_string(), vec![("Z".to_string(), 1)]);
        graph.insert("Y".to_string(), vec![("Z".to_string(), 1)]);
        graph.insert("Z".to_string(), vec![]);

        let path = path_to("A", create_neighbor_fn(&graph), "Z").unwrap();
        assert_eq!(path, vec!["A", "X", "Z"].into_iter().map(String::from).collect::<Vec<_>>());
    }

    #[test]
    fn test_dijkstra_nodes_full_reaches_everything() {
        let graph = create_test_graph();
        let node_map = dijkstra_nodes_full("B".to_string(), create_neighbor_fn(&graph)).unwrap();

        let costs = costs_of(&node_map);
        assert_eq!(costs.len(), 2);
        assert_eq!(costs["B"], 0);
        assert_eq!(costs["D"], 5);
    }

    #[test]
    fn test_dijkstra_complex_graph() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 4), ("C".to_string(), 2)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1), ("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 8), ("E".to_string(), 10)]);
        graph.insert("D".to_string(), vec![("E".to_string(), 2), ("F".to_string(), 6)]);
        graph.insert("E".to_string(), vec![("F".to_string(), 3)]);
        graph.insert("F".to_string(), vec![]);

        let path = path_to("A", create_neighbor_fn(&graph), "F").unwrap();

        let total_cost: u32 = path.windows(2)
            .map(|pair| {
                graph[&pair[0]].iter()
                    .find(|(node, _)| node == &pair[1])
                    .map(|(_, cost)| *cost)
                    .unwrap()
            })
            .sum();

        // The total cost should be 14 (A->B->D->E->F)
        assert_eq!(total_cost, 14);
    }
}
