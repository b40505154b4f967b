//! Bounded breadth-first search over the wordnet relation graph.
//!
//! A path only proves graph connectivity. When both ends were reached
//! through ambiguous lemmas the path may link the wrong senses; that is
//! reported as-is and left to manual review.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use awn_lexicon::{RelationGraph, SynsetId};

use crate::matcher::MatchResult;

pub const DEFAULT_MAX_HOPS: usize = 8;

/// Shortest path found from a child candidate to a parent candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMatch {
    pub hops: usize,
    /// Child candidate first, parent candidate last.
    pub path: Vec<SynsetId>,
}

impl PathMatch {
    pub fn child(&self) -> &SynsetId {
        &self.path[0]
    }

    pub fn parent(&self) -> &SynsetId {
        &self.path[self.path.len() - 1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Agree,
    Disagree,
    Partial,
    Unmatchable,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Agree,
        Category::Disagree,
        Category::Partial,
        Category::Unmatchable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Agree => "AGREE",
            Category::Disagree => "DISAGREE",
            Category::Partial => "PARTIAL",
            Category::Unmatchable => "UNMATCHABLE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The side that found candidates in a PARTIAL pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedSide {
    ChildOnly,
    ParentOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Agree { path: PathMatch },
    /// `self_match` is set when both sides share a synset; a synset
    /// reaching itself is never evidence of agreement.
    Disagree { self_match: bool },
    Partial { side: MatchedSide },
    Unmatchable,
}

impl Outcome {
    pub fn category(&self) -> Category {
        match self {
            Outcome::Agree { .. } => Category::Agree,
            Outcome::Disagree { .. } => Category::Disagree,
            Outcome::Partial { .. } => Category::Partial,
            Outcome::Unmatchable => Category::Unmatchable,
        }
    }

    pub fn hops(&self) -> Option<usize> {
        match self {
            Outcome::Agree { path } => Some(path.hops),
            _ => None,
        }
    }

    pub fn is_self_match(&self) -> bool {
        matches!(self, Outcome::Disagree { self_match: true })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PathVerifier<'g> {
    graph: &'g RelationGraph,
    max_hops: usize,
}

impl<'g> PathVerifier<'g> {
    pub fn new(graph: &'g RelationGraph, max_hops: usize) -> Self {
        Self { graph, max_hops }
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    pub fn classify(&self, result: &MatchResult) -> Outcome {
        match (result.child.is_matched(), result.parent.is_matched()) {
            (false, false) => Outcome::Unmatchable,
            (true, false) => Outcome::Partial {
                side: MatchedSide::ChildOnly,
            },
            (false, true) => Outcome::Partial {
                side: MatchedSide::ParentOnly,
            },
            (true, true) => {
                match self.shortest_path(&result.child.candidates, &result.parent.candidates) {
                    Some(path) => Outcome::Agree { path },
                    None => Outcome::Disagree {
                        self_match: !result
                            .child
                            .candidates
                            .is_disjoint(&result.parent.candidates),
                    },
                }
            }
        }
    }

    /// Minimum-hop path from any child candidate to any parent candidate.
    ///
    /// Ties go to the earliest child candidate in set order.
    pub fn shortest_path(
        &self,
        children: &BTreeSet<SynsetId>,
        parents: &BTreeSet<SynsetId>,
    ) -> Option<PathMatch> {
        let mut best: Option<PathMatch> = None;
        for start in children {
            let limit = match &best {
                Some(found) if found.hops <= 1 => break,
                Some(found) => found.hops - 1,
                None => self.max_hops,
            };
            if let Some(found) = self.search_from(start, parents, limit) {
                best = Some(found);
            }
        }
        best
    }

    fn search_from(
        &self,
        start: &SynsetId,
        parents: &BTreeSet<SynsetId>,
        limit: usize,
    ) -> Option<PathMatch> {
        let mut visited: HashSet<&SynsetId> = HashSet::from([start]);
        let mut came_from: HashMap<&SynsetId, &SynsetId> = HashMap::new();
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((node, depth)) = queue.pop_front() {
            if depth > 0 && parents.contains(node) {
                return Some(PathMatch {
                    hops: depth,
                    path: trace_back(node, &came_from),
                });
            }
            if depth >= limit {
                continue;
            }
            for next in self.graph.successors(node) {
                if visited.insert(next) {
                    came_from.insert(next, node);
                    queue.push_back((next, depth + 1));
                }
            }
        }
        None
    }
}

/// A relation pair together with its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedPair {
    pub result: MatchResult,
    pub outcome: Outcome,
}

impl ClassifiedPair {
    pub fn category(&self) -> Category {
        self.outcome.category()
    }
}

fn trace_back<'a>(
    end: &'a SynsetId,
    came_from: &HashMap<&'a SynsetId, &'a SynsetId>,
) -> Vec<SynsetId> {
    let mut path = vec![end.clone()];
    let mut current = end;
    while let Some(&previous) = came_from.get(current) {
        path.push(previous.clone());
        current = previous;
    }
    path.reverse();
    path
}
