//! Connected components (Union-Find).

use ludo_graph::Graph;

#[derive(Debug, Clone, Default)]
pub struct ComponentResult {
    /// node index → component label (label 0 is the largest component)
    pub membership: Vec<usize>,
    /// Components ranked by size (descending); members in node order.
    pub components: Vec<Vec<usize>>,
}

impl ComponentResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn largest_component_size(&self) -> usize {
        self.components.first().map_or(0, Vec::len)
    }

    /// The largest component, or `None` for an empty graph.
    pub fn main_component(&self) -> Option<&[usize]> {
        self.components.first().map(Vec::as_slice)
    }
}

// ── Union-Find ──────────────────────────────────────────────────────────────

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry { return; }
        // union by rank
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
    }
}

/// Partition the nodes into maximal connected sets.
///
/// Components are ranked by size; equal sizes keep the order of their
/// first member.
pub fn connected_components(graph: &Graph) -> ComponentResult {
    let n = graph.node_count();
    let mut uf = UnionFind::new(n);
    for e in graph.edges() {
        uf.union(e.a, e.b);
    }

    // Group by root, in order of first appearance
    let mut root_slot = vec![usize::MAX; n];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for node in 0..n {
        let root = uf.find(node);
        if root_slot[root] == usize::MAX {
            root_slot[root] = components.len();
            components.push(Vec::new());
        }
        components[root_slot[root]].push(node);
    }

    // stable: equal sizes keep first-member order
    components.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut membership = vec![0; n];
    for (label, members) in components.iter().enumerate() {
        for &m in members {
            membership[m] = label;
        }
    }

    ComponentResult { membership, components }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_graph::Entity;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_node(Entity::designer(format!("d{i}")));
        }
        for &(a, b) in edges {
            g.upsert_edge(a, b, 1.0);
        }
        g
    }

    #[test]
    fn empty_graph_has_no_components() {
        let result = connected_components(&Graph::new());
        assert_eq!(result.component_count(), 0);
        assert_eq!(result.largest_component_size(), 0);
        assert!(result.main_component().is_none());
    }

    #[test]
    fn largest_component_comes_first() {
        // {0,1}  {2,3,4}  {5}
        let g = graph(6, &[(0, 1), (2, 3), (3, 4)]);
        let result = connected_components(&g);
        assert_eq!(result.component_count(), 3);
        assert_eq!(result.main_component().unwrap(), &[2, 3, 4]);
        assert_eq!(result.components[1], vec![0, 1]);
        assert_eq!(result.components[2], vec![5]);
        assert_eq!(result.membership, vec![1, 1, 0, 0, 0, 2]);
    }

    #[test]
    fn equal_sizes_keep_first_member_order() {
        let g = graph(4, &[(2, 3), (0, 1)]);
        let result = connected_components(&g);
        assert_eq!(result.components, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn components_partition_nodes() {
        let g = graph(7, &[(0, 6), (1, 5), (5, 2)]);
        let result = connected_components(&g);
        let mut all: Vec<usize> = result.components.concat();
        all.sort();
        assert_eq!(all, (0..7).collect::<Vec<_>>());
    }
}
