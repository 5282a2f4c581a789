use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use nahw_ecs::Combination;
use nahw_protocol::TagRef;
use std::collections::HashMap;

/// Tags as nodes, combinations as edges from the earlier tag to the later one.
///
/// Edge weights index into the combination list the graph was built from.
pub struct TagGraph {
    graph: Graph<TagRef, usize, Directed>,
    index_map: HashMap<TagRef, NodeIndex>,
}

impl TagGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            index_map: HashMap::new(),
        }
    }

    pub fn from_combinations(combinations: &[Combination]) -> Self {
        let mut graph = Self::new();
        for (position, combination) in combinations.iter().enumerate() {
            graph.add_link(combination.first, combination.second, position);
        }
        graph
    }

    pub fn add_link(&mut self, from: TagRef, to: TagRef, position: usize) {
        let from_idx = *self.index_map.entry(from).or_insert_with(|| self.graph.add_node(from));
        let to_idx = *self.index_map.entry(to).or_insert_with(|| self.graph.add_node(to));

        self.graph.add_edge(from_idx, to_idx, position);
    }

    /// Positions of the combinations that start at `tag`, in ascending order.
    pub fn outgoing(&self, tag: TagRef) -> Vec<usize> {
        let mut positions: Vec<usize> = match self.index_map.get(&tag) {
            Some(idx) => self.graph.edges(*idx).map(|edge| *edge.weight()).collect(),
            None => Vec::new(),
        };
        positions.sort_unstable();
        positions
    }
}

impl Default for TagGraph {
    fn default() -> Self {
        Self::new()
    }
}
