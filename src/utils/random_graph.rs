use crate::error::{ProtocolError, Result};
use crate::graph::{Color, Coloring, Graph, NodeId};
use rand::seq::{index, IndexedRandom, SliceRandom};
use rand::{rng, Rng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceParameters {
    pub nodes: u32,
    pub requested_edges: usize,
    pub edges: usize,
    pub group_sizes: [usize; 3],
}

/// Random graph together with a proper 3-coloring of it.
///
/// Nodes are shuffled and dealt round-robin into three groups, the group index
/// being the color. Edges are sampled without replacement among cross-group
/// pairs. When `edges` is `None` the target is drawn from `[n - 1, n(n-1)/2]`,
/// otherwise it is clamped to that range; either way it is capped by the
/// number of cross-group pairs.
pub fn generate_three_colorable(
    nodes: u32,
    edges: Option<usize>,
    rng: &mut impl Rng,
) -> Result<(Graph, Coloring, InstanceParameters)> {
    if nodes < 3 {
        return Err(ProtocolError::InvalidParameter(
            "a 3-colorable instance needs at least 3 nodes".to_string(),
        ));
    }

    let n = nodes as usize;
    let min_edges = n - 1;
    let max_edges = n * (n - 1) / 2;
    let requested = match edges {
        Some(count) => count.clamp(min_edges, max_edges),
        None => rng.random_range(min_edges..=max_edges),
    };

    let mut order: Vec<NodeId> = (0..nodes).collect();
    order.shuffle(rng);
    let mut groups: [Vec<NodeId>; 3] = Default::default();
    for (position, &node) in order.iter().enumerate() {
        groups[position % 3].push(node);
    }

    let coloring: Coloring = groups
        .iter()
        .zip(Color::ALL)
        .flat_map(|(group, color)| group.iter().map(move |&node| (node, color)))
        .collect();

    let mut candidates = Vec::new();
    for i in 0..3 {
        for j in (i + 1)..3 {
            for &u in &groups[i] {
                for &v in &groups[j] {
                    candidates.push((u, v));
                }
            }
        }
    }

    let amount = requested.min(candidates.len());
    let selected = index::sample(rng, candidates.len(), amount)
        .into_iter()
        .map(|idx| candidates[idx]);
    let graph = Graph::new(0..nodes, selected)?;

    let params = InstanceParameters {
        nodes,
        requested_edges: requested,
        edges: graph.edge_count(),
        group_sizes: [groups[0].len(), groups[1].len(), groups[2].len()],
    };

    Ok((graph, coloring, params))
}

pub fn random_instance(nodes: u32, edges: Option<usize>) -> Result<(Graph, Coloring, InstanceParameters)> {
    generate_three_colorable(nodes, edges, &mut rng())
}

/// Copies `coloring` and forces the endpoints of one random edge to share a color.
pub fn make_invalid_coloring(graph: &Graph, coloring: &Coloring, rng: &mut impl Rng) -> Coloring {
    let mut invalid = coloring.clone();
    if let Some(edge) = graph.edges().choose(rng) {
        if let Some(color) = coloring.get(edge.u) {
            invalid.set(edge.v, color);
        }
    }
    invalid
}
