use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::LexiconError;

/// Identifier of a wordnet synset, e.g. `awn4-00001740-n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynsetId(pub String);

impl SynsetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an ontology concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub String);

impl ConceptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WN-LMF part-of-speech codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
    Phrase,
    Conjunction,
    Adposition,
    Other,
    Unknown,
}

impl PartOfSpeech {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "n" => PartOfSpeech::Noun,
            "v" => PartOfSpeech::Verb,
            "a" => PartOfSpeech::Adjective,
            "s" => PartOfSpeech::AdjectiveSatellite,
            "r" => PartOfSpeech::Adverb,
            "t" => PartOfSpeech::Phrase,
            "c" => PartOfSpeech::Conjunction,
            "p" => PartOfSpeech::Adposition,
            "x" => PartOfSpeech::Other,
            _ => PartOfSpeech::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "n",
            PartOfSpeech::Verb => "v",
            PartOfSpeech::Adjective => "a",
            PartOfSpeech::AdjectiveSatellite => "s",
            PartOfSpeech::Adverb => "r",
            PartOfSpeech::Phrase => "t",
            PartOfSpeech::Conjunction => "c",
            PartOfSpeech::Adposition => "p",
            PartOfSpeech::Other => "x",
            PartOfSpeech::Unknown => "?",
        }
    }

    /// Head adjectives and satellites both count.
    pub fn is_adjective(&self) -> bool {
        matches!(self, PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Synset relation types carried by the wordnet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelType {
    Hypernym,
    Hyponym,
    InstanceHypernym,
    InstanceHyponym,
    MeroMember,
    MeroPart,
    MeroSubstance,
    HoloMember,
    HoloPart,
    HoloSubstance,
    Entails,
    IsEntailedBy,
    Causes,
    IsCausedBy,
    Similar,
    Also,
    Attribute,
    DomainTopic,
    DomainRegion,
    HasDomainTopic,
    HasDomainRegion,
    Exemplifies,
    IsExemplifiedBy,
    Other(String),
}

impl RelType {
    pub fn as_str(&self) -> &str {
        match self {
            RelType::Hypernym => "hypernym",
            RelType::Hyponym => "hyponym",
            RelType::InstanceHypernym => "instance_hypernym",
            RelType::InstanceHyponym => "instance_hyponym",
            RelType::MeroMember => "mero_member",
            RelType::MeroPart => "mero_part",
            RelType::MeroSubstance => "mero_substance",
            RelType::HoloMember => "holo_member",
            RelType::HoloPart => "holo_part",
            RelType::HoloSubstance => "holo_substance",
            RelType::Entails => "entails",
            RelType::IsEntailedBy => "is_entailed_by",
            RelType::Causes => "causes",
            RelType::IsCausedBy => "is_caused_by",
            RelType::Similar => "similar",
            RelType::Also => "also",
            RelType::Attribute => "attribute",
            RelType::DomainTopic => "domain_topic",
            RelType::DomainRegion => "domain_region",
            RelType::HasDomainTopic => "has_domain_topic",
            RelType::HasDomainRegion => "has_domain_region",
            RelType::Exemplifies => "exemplifies",
            RelType::IsExemplifiedBy => "is_exemplified_by",
            RelType::Other(name) => name,
        }
    }

    /// Upward is-a links.
    pub fn is_hypernymy(&self) -> bool {
        matches!(self, RelType::Hypernym | RelType::InstanceHypernym)
    }

    /// Links from a part to its whole.
    pub fn is_holonymy(&self) -> bool {
        matches!(
            self,
            RelType::HoloMember | RelType::HoloPart | RelType::HoloSubstance
        )
    }
}

impl From<&str> for RelType {
    fn from(name: &str) -> Self {
        match name {
            "hypernym" => RelType::Hypernym,
            "hyponym" => RelType::Hyponym,
            "instance_hypernym" => RelType::InstanceHypernym,
            "instance_hyponym" => RelType::InstanceHyponym,
            "mero_member" => RelType::MeroMember,
            "mero_part" => RelType::MeroPart,
            "mero_substance" => RelType::MeroSubstance,
            "holo_member" => RelType::HoloMember,
            "holo_part" => RelType::HoloPart,
            "holo_substance" => RelType::HoloSubstance,
            "entails" => RelType::Entails,
            "is_entailed_by" => RelType::IsEntailedBy,
            "causes" => RelType::Causes,
            "is_caused_by" => RelType::IsCausedBy,
            "similar" => RelType::Similar,
            "also" => RelType::Also,
            "attribute" => RelType::Attribute,
            "domain_topic" => RelType::DomainTopic,
            "domain_region" => RelType::DomainRegion,
            "has_domain_topic" => RelType::HasDomainTopic,
            "has_domain_region" => RelType::HasDomainRegion,
            "exemplifies" => RelType::Exemplifies,
            "is_exemplified_by" => RelType::IsExemplifiedBy,
            other => RelType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RelType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(RelType::from(name.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynsetRelation {
    pub rel_type: RelType,
    pub target: SynsetId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    pub id: SynsetId,
    pub pos: PartOfSpeech,
    /// Inter-Lingual Index link, absent when the source left it blank.
    pub ili: Option<String>,
    /// Written forms of every lexical entry with a sense in this synset.
    pub lemmas: Vec<String>,
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
    pub relations: Vec<SynsetRelation>,
}

impl Synset {
    pub fn new(id: SynsetId, pos: PartOfSpeech) -> Self {
        Self {
            id,
            pos,
            ili: None,
            lemmas: Vec::new(),
            definitions: Vec::new(),
            examples: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn first_definition(&self) -> Option<&str> {
        self.definitions.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub id: String,
    pub synset: SynsetId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalEntry {
    pub id: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub senses: Vec<Sense>,
}

/// A concept row of the ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: ConceptId,
    /// Arabic synonyms with their original diacritics. Never empty.
    pub lemmas: Vec<String>,
    pub english: Option<String>,
    pub gloss: Option<String>,
    pub example: Option<String>,
    pub source: Option<String>,
}

impl Concept {
    /// `[id] lemma|lemma (english)`
    pub fn label(&self) -> String {
        let mut label = format!("[{}] {}", self.id, self.lemmas.join("|"));
        if let Some(english) = &self.english {
            label.push_str(&format!(" ({english})"));
        }
        label
    }
}

/// Parent links of one concept, one per ontology relation column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRelations {
    pub concept: ConceptId,
    pub sub_type_of: Option<ConceptId>,
    pub part_of: Option<ConceptId>,
    pub instance_of: Option<ConceptId>,
}

impl ConceptRelations {
    pub fn parent(&self, kind: ConceptRelationKind) -> Option<&ConceptId> {
        match kind {
            ConceptRelationKind::SubTypeOf => self.sub_type_of.as_ref(),
            ConceptRelationKind::PartOf => self.part_of.as_ref(),
            ConceptRelationKind::InstanceOf => self.instance_of.as_ref(),
        }
    }
}

/// Which ontology relation column is compared against the wordnet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptRelationKind {
    #[default]
    SubTypeOf,
    PartOf,
    InstanceOf,
}

impl ConceptRelationKind {
    pub fn column(&self) -> &'static str {
        match self {
            ConceptRelationKind::SubTypeOf => "subTypeOfID",
            ConceptRelationKind::PartOf => "partOfID",
            ConceptRelationKind::InstanceOf => "instanceOfID",
        }
    }

    /// Whether a wordnet relation walks in the same direction as this
    /// ontology relation, from the child towards the parent.
    pub fn follows(&self, rel: &RelType) -> bool {
        match self {
            ConceptRelationKind::SubTypeOf | ConceptRelationKind::InstanceOf => {
                rel.is_hypernymy()
            }
            ConceptRelationKind::PartOf => rel.is_holonymy(),
        }
    }
}

impl FromStr for ConceptRelationKind {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "subtypeof" | "subtype" => Ok(ConceptRelationKind::SubTypeOf),
            "partof" | "part" => Ok(ConceptRelationKind::PartOf),
            "instanceof" | "instance" => Ok(ConceptRelationKind::InstanceOf),
            _ => Err(LexiconError::UnknownRelationKind(s.to_string())),
        }
    }
}

impl fmt::Display for ConceptRelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().trim_end_matches("ID"))
    }
}

/// Manually assigned confidence of a relation pair mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

impl FromStr for Confidence {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" | "H" => Ok(Confidence::High),
            "MEDIUM" | "MED" | "M" => Ok(Confidence::Medium),
            "LOW" | "L" => Ok(Confidence::Low),
            _ => Err(LexiconError::UnknownConfidence(s.to_string())),
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
