use std::collections::HashMap;
use tracing::info;

use crate::model::{ConceptRelationKind, RelType, SynsetId};
use crate::wordnet::Wordnet;

/// Directed adjacency over synsets, restricted to a chosen set of
/// relation types. Edge order follows the source document.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    edges: HashMap<SynsetId, Vec<SynsetId>>,
    edge_count: usize,
}

impl RelationGraph {
    /// Keep the wordnet relations accepted by `follow`.
    pub fn from_wordnet(wordnet: &Wordnet, follow: impl Fn(&RelType) -> bool) -> Self {
        let mut graph = Self::default();
        for synset in wordnet.synsets() {
            for relation in &synset.relations {
                if follow(&relation.rel_type) {
                    graph.add_edge(synset.id.clone(), relation.target.clone());
                }
            }
        }
        graph
    }

    /// The graph walked when verifying pairs of the given ontology relation.
    pub fn for_relation(wordnet: &Wordnet, kind: ConceptRelationKind) -> Self {
        let graph = Self::from_wordnet(wordnet, |rel| kind.follows(rel));
        info!(
            relation = %kind,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built relation graph"
        );
        graph
    }

    pub fn from_edges(edges: impl IntoIterator<Item = (SynsetId, SynsetId)>) -> Self {
        let mut graph = Self::default();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    fn add_edge(&mut self, from: SynsetId, to: SynsetId) {
        let targets = self.edges.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
            self.edge_count += 1;
        }
    }

    /// Direct successors of `id`, empty for unknown ids.
    pub fn successors(&self, id: &SynsetId) -> &[SynsetId] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of synsets with at least one outgoing edge.
    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PartOfSpeech, Synset, SynsetRelation};

    fn id(s: &str) -> SynsetId {
        SynsetId::new(s)
    }

    #[test]
    fn keeps_only_followed_relations() {
        let mut builder = Wordnet::builder();
        let mut dog = Synset::new(id("dog"), PartOfSpeech::Noun);
        dog.relations = vec![
            SynsetRelation {
                rel_type: RelType::Hypernym,
                target: id("canine"),
            },
            SynsetRelation {
                rel_type: RelType::HoloMember,
                target: id("pack"),
            },
        ];
        builder
            .synset(dog)
            .synset(Synset::new(id("canine"), PartOfSpeech::Noun))
            .synset(Synset::new(id("pack"), PartOfSpeech::Noun));
        let wordnet = builder.finish();

        let is_a = RelationGraph::for_relation(&wordnet, ConceptRelationKind::SubTypeOf);
        assert_eq!(is_a.successors(&id("dog")), &[id("canine")]);
        assert_eq!(is_a.edge_count(), 1);

        let part_of = RelationGraph::for_relation(&wordnet, ConceptRelationKind::PartOf);
        assert_eq!(part_of.successors(&id("dog")), &[id("pack")]);
    }

    #[test]
    fn ignores_repeated_edges() {
        let graph = RelationGraph::from_edges(vec![
            (id("a"), id("b")),
            (id("a"), id("c")),
            (id("a"), id("b")),
        ]);
        assert_eq!(graph.successors(&id("a")), &[id("b"), id("c")]);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.successors(&id("zzz")).is_empty());
    }
}
