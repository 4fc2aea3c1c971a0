use crate::graph::gap::LinkageEdge;
use ahash::AHashMap;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;

/// A connected group of contigs and the edges among them.
#[derive(Debug, Clone)]
pub struct LinkageComponent<'e> {
    pub nodes: Vec<String>,
    pub edges: Vec<&'e LinkageEdge>,
}

/// Split the edge set into connected components.
///
/// Nodes are numbered in first-seen order, so components and their node
/// lists come out in a stable order. Parallel edges between one contig pair
/// (different orientations) are all kept in the component's edge list.
pub fn connected_components(edges: &[LinkageEdge]) -> Vec<LinkageComponent<'_>> {
    let mut names: Vec<&str> = Vec::new();
    let mut ids: AHashMap<&str, usize> = AHashMap::new();
    let mut graph: UnGraphMap<usize, ()> = UnGraphMap::new();

    let mut endpoints = Vec::with_capacity(edges.len());

    for edge in edges {
        let a = intern(&edge.seq_a, &mut names, &mut ids);
        let b = intern(&edge.seq_b, &mut names, &mut ids);
        graph.add_edge(a, b, ());
        endpoints.push(a);
    }

    let mut component_of = vec![usize::MAX; names.len()];
    let mut components: Vec<Vec<usize>> = Vec::new();

    for start in 0..names.len() {
        if component_of[start] != usize::MAX {
            continue;
        }
        let label = components.len();
        let mut members = Vec::new();
        let mut dfs = Dfs::new(&graph, start);
        while let Some(n) = dfs.next(&graph) {
            component_of[n] = label;
            members.push(n);
        }
        members.sort_unstable();
        components.push(members);
    }

    let mut result: Vec<LinkageComponent<'_>> = components
        .into_iter()
        .map(|members| LinkageComponent {
            nodes: members.iter().map(|&n| names[n].to_string()).collect(),
            edges: Vec::new(),
        })
        .collect();

    for (edge, &a) in edges.iter().zip(&endpoints) {
        result[component_of[a]].edges.push(edge);
    }

    result
}

fn intern<'a>(name: &'a str, names: &mut Vec<&'a str>, ids: &mut AHashMap<&'a str, usize>) -> usize {
    *ids.entry(name).or_insert_with(|| {
        names.push(name);
        names.len() - 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::gap::GapEstimate;
    use crate::strand::Strand;

    fn edge(a: &str, b: &str, orientation: Strand) -> LinkageEdge {
        LinkageEdge {
            seq_a: a.to_string(),
            seq_b: b.to_string(),
            orientation,
            gap: GapEstimate::Interval { min: 0, max: 100 },
            votes: 2,
        }
    }

    #[test]
    fn test_connected_components() {
        let edges = vec![
            edge("a", "b", Strand::Forward),
            edge("c", "d", Strand::Reverse),
            edge("b", "e", Strand::Forward),
            edge("a", "b", Strand::Reverse),
        ];
        let components = connected_components(&edges);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].nodes, vec!["a", "b", "e"]);
        assert_eq!(components[0].edges.len(), 3);
        assert_eq!(components[1].nodes, vec!["c", "d"]);
        assert_eq!(components[1].edges.len(), 1);
    }

    #[test]
    fn test_no_edges_no_components() {
        assert!(connected_components(&[]).is_empty());
    }
}
