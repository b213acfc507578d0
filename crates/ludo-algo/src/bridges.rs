//! Bridge detection: iterative Tarjan lowlink over the undirected graph.

use ludo_graph::Graph;

#[derive(Debug, Clone, Default)]
pub struct BridgeResult {
    /// Bridge edges as canonical `(a, b)` pairs, in edge insertion order.
    pub bridges: Vec<(usize, usize)>,
    /// node index → number of incident bridges
    pub incidence: Vec<usize>,
}

struct Frame {
    node: usize,
    /// Edge used to reach `node`; skipped when scanning back.
    parent_edge: Option<usize>,
    next: usize,
}

/// Find every edge whose removal disconnects its component.
///
/// Uses an explicit DFS stack to avoid recursion depth limits on long chains.
pub fn find_bridges(graph: &Graph) -> BridgeResult {
    const UNVISITED: usize = usize::MAX;

    let n = graph.node_count();
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![UNVISITED; n];
    let mut timer = 0usize;
    let mut bridge_edges: Vec<usize> = Vec::new();

    for root in 0..n {
        if disc[root] != UNVISITED { continue; }

        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        let mut stack = vec![Frame { node: root, parent_edge: None, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            let v = frame.node;
            let parent_edge = frame.parent_edge;
            let entries = graph.entries(v);

            if frame.next < entries.len() {
                let entry = entries[frame.next];
                frame.next += 1;
                if Some(entry.edge_idx) == parent_edge { continue; }

                let w = entry.neighbor;
                if disc[w] == UNVISITED {
                    disc[w] = timer;
                    low[w] = timer;
                    timer += 1;
                    stack.push(Frame { node: w, parent_edge: Some(entry.edge_idx), next: 0 });
                } else {
                    low[v] = low[v].min(disc[w]);
                }
            } else {
                // Done with v's neighbors
                stack.pop();
                if let (Some(parent), Some(edge_idx)) = (stack.last(), parent_edge) {
                    let p = parent.node;
                    low[p] = low[p].min(low[v]);
                    if low[v] > disc[p] {
                        bridge_edges.push(edge_idx);
                    }
                }
            }
        }
    }

    bridge_edges.sort_unstable();

    let mut incidence = vec![0usize; n];
    let bridges = bridge_edges
        .into_iter()
        .map(|i| {
            let e = graph.edge(i);
            incidence[e.a] += 1;
            incidence[e.b] += 1;
            (e.a, e.b)
        })
        .collect();

    BridgeResult { bridges, incidence }
}
