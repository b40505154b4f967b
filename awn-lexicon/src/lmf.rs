//! Streaming WN-LMF reader.
//!
//! Only the parts of the format the comparison needs are kept:
//! `Lexicon` header attributes, `LexicalEntry/{Lemma,Sense}` and
//! `Synset/{Definition,Example,SynsetRelation}`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::model::{LexicalEntry, PartOfSpeech, RelType, Sense, Synset, SynsetId, SynsetRelation};
use crate::wordnet::{LexiconInfo, Wordnet, WordnetBuilder};
use crate::LexiconError;

impl Wordnet {
    /// Load a WN-LMF file.
    pub fn from_lmf_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "parsing wordnet");
        read_lmf(BufReader::new(file))
    }

    /// Load WN-LMF from any buffered reader.
    pub fn from_lmf_reader<R: BufRead>(reader: R) -> Result<Self, LexiconError> {
        read_lmf(reader)
    }

    pub fn from_lmf_str(xml: &str) -> Result<Self, LexiconError> {
        read_lmf(xml.as_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Definition,
    Example,
}

#[derive(Debug)]
struct EntryDraft {
    id: Option<String>,
    lemma: Option<String>,
    pos: PartOfSpeech,
    senses: Vec<Sense>,
}

#[derive(Debug, Default)]
struct LmfCollector {
    builder: WordnetBuilder,
    entry: Option<EntryDraft>,
    synset: Option<Synset>,
    text_field: Option<TextField>,
    text: String,
}

impl LmfCollector {
    fn start(&mut self, element: &BytesStart<'_>) -> quick_xml::Result<()> {
        match element.local_name().as_ref() {
            b"Lexicon" => {
                self.builder.info(LexiconInfo {
                    id: attribute(element, "id")?,
                    label: attribute(element, "label")?,
                    language: attribute(element, "language")?,
                    version: attribute(element, "version")?,
                });
            }
            b"LexicalEntry" => {
                self.entry = Some(EntryDraft {
                    id: attribute(element, "id")?,
                    lemma: None,
                    pos: PartOfSpeech::Unknown,
                    senses: Vec::new(),
                });
            }
            b"Lemma" => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.lemma = attribute(element, "writtenForm")?;
                    if let Some(pos) = attribute(element, "partOfSpeech")? {
                        entry.pos = PartOfSpeech::from_code(&pos);
                    }
                }
            }
            b"Sense" => {
                if let Some(entry) = self.entry.as_mut() {
                    match attribute(element, "synset")? {
                        Some(synset) if !synset.is_empty() => entry.senses.push(Sense {
                            id: attribute(element, "id")?.unwrap_or_default(),
                            synset: SynsetId(synset),
                        }),
                        _ => debug!("skipping sense without synset"),
                    }
                }
            }
            b"Synset" => match attribute(element, "id")? {
                Some(id) if !id.is_empty() => {
                    let pos = attribute(element, "partOfSpeech")?
                        .map(|code| PartOfSpeech::from_code(&code))
                        .unwrap_or(PartOfSpeech::Unknown);
                    let mut synset = Synset::new(SynsetId(id), pos);
                    synset.ili = attribute(element, "ili")?.filter(|ili| !ili.is_empty());
                    self.synset = Some(synset);
                }
                _ => {
                    debug!("skipping synset without id");
                    self.builder.malformed_synset();
                    self.synset = None;
                }
            },
            b"Definition" if self.synset.is_some() => {
                self.text_field = Some(TextField::Definition);
                self.text.clear();
            }
            b"Example" if self.synset.is_some() => {
                self.text_field = Some(TextField::Example);
                self.text.clear();
            }
            b"SynsetRelation" => {
                if let Some(synset) = self.synset.as_mut() {
                    let rel_type = attribute(element, "relType")?.unwrap_or_default();
                    let target = attribute(element, "target")?.unwrap_or_default();
                    if !rel_type.is_empty() && !target.is_empty() {
                        synset.relations.push(SynsetRelation {
                            rel_type: RelType::from(rel_type.as_str()),
                            target: SynsetId(target),
                        });
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"LexicalEntry" => {
                if let Some(draft) = self.entry.take() {
                    match (draft.id, draft.lemma) {
                        (Some(id), Some(lemma)) if !lemma.trim().is_empty() => {
                            self.builder.entry(LexicalEntry {
                                id,
                                lemma,
                                pos: draft.pos,
                                senses: draft.senses,
                            });
                        }
                        _ => {
                            debug!("skipping lexical entry without id or lemma");
                            self.builder.malformed_entry();
                        }
                    }
                }
            }
            b"Synset" => {
                if let Some(synset) = self.synset.take() {
                    self.builder.synset(synset);
                }
            }
            b"Definition" | b"Example" => {
                if let (Some(field), Some(synset)) = (self.text_field.take(), self.synset.as_mut())
                {
                    let text = std::mem::take(&mut self.text);
                    match field {
                        TextField::Definition => synset.definitions.push(text),
                        TextField::Example => synset.examples.push(text),
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.text_field.is_some() {
            self.text.push_str(text);
        }
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> quick_xml::Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn read_lmf<R: BufRead>(source: R) -> Result<Wordnet, LexiconError> {
    let mut reader = Reader::from_reader(source);
    let config = reader.config_mut();
    config.trim_text(true);
    config.expand_empty_elements = true;

    let mut collector = LmfCollector::default();
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf);
        let position = reader.buffer_position();
        let step = match event {
            Ok(Event::Start(element)) => collector.start(&element),
            Ok(Event::End(element)) => {
                collector.end(element.local_name().as_ref());
                Ok(())
            }
            Ok(Event::Text(text)) => text.unescape().map(|text| collector.text(&text)),
            Ok(Event::CData(data)) => {
                collector.text(&String::from_utf8_lossy(&data.into_inner()));
                Ok(())
            }
            Ok(Event::Eof) => break,
            Ok(_) => Ok(()),
            Err(source) => Err(source),
        };
        step.map_err(|source| LexiconError::Xml { position, source })?;
        buf.clear();
    }

    Ok(collector.builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE LexicalResource SYSTEM "http://globalwordnet.github.io/schemas/WN-LMF-1.4.dtd">
<LexicalResource xmlns:dc="https://globalwordnet.github.io/schemas/dc/">
  <Lexicon id="awn4" label="Arabic WordNet 4.0" language="arb" version="4.0">
    <LexicalEntry id="awn4-e1">
      <Lemma writtenForm="كَلْب" partOfSpeech="n" script="Arab"/>
      <Sense id="awn4-s1" synset="awn4-dog-n"/>
    </LexicalEntry>
    <LexicalEntry id="awn4-e2">
      <Lemma writtenForm="حَيَوَان" partOfSpeech="n"/>
      <Sense id="awn4-s2" synset="awn4-animal-n"/>
      <Sense id="awn4-s3" synset="awn4-missing-n"/>
    </LexicalEntry>
    <LexicalEntry id="awn4-e3">
      <Sense id="awn4-s4" synset="awn4-dog-n"/>
    </LexicalEntry>
    <Synset id="awn4-dog-n" ili="i46360" partOfSpeech="n">
      <Definition>حيوان أليف &amp; وفي</Definition>
      <Example>نبح الكلب</Example>
      <SynsetRelation relType="hypernym" target="awn4-animal-n"/>
      <SynsetRelation relType="hypernym" target="awn4-gone-n"/>
    </Synset>
    <Synset id="awn4-animal-n" ili="" partOfSpeech="n">
      <SynsetRelation relType="hyponym" target="awn4-dog-n"></SynsetRelation>
    </Synset>
    <Synset partOfSpeech="n"/>
  </Lexicon>
</LexicalResource>"#;

    #[test]
    fn parses_entries_and_synsets() {
        let wordnet = Wordnet::from_lmf_str(SAMPLE).unwrap();
        assert_eq!(wordnet.info().id.as_deref(), Some("awn4"));
        assert_eq!(wordnet.len(), 2);
        assert_eq!(wordnet.entries().len(), 2);

        let dog = wordnet.synset(&SynsetId::new("awn4-dog-n")).unwrap();
        assert_eq!(dog.ili.as_deref(), Some("i46360"));
        assert_eq!(dog.pos, PartOfSpeech::Noun);
        assert_eq!(dog.first_definition(), Some("حيوان أليف & وفي"));
        assert_eq!(dog.examples, vec!["نبح الكلب".to_string()]);
        assert_eq!(dog.lemmas, vec!["كَلْب".to_string()]);
        assert_eq!(dog.relations.len(), 1);

        let animal = wordnet.synset(&SynsetId::new("awn4-animal-n")).unwrap();
        assert!(animal.ili.is_none());
        assert_eq!(animal.relations[0].rel_type, RelType::Hyponym);
    }

    #[test]
    fn counts_skipped_records() {
        let stats = *Wordnet::from_lmf_str(SAMPLE).unwrap().stats();
        assert_eq!(stats.dangling_relations, 1);
        assert_eq!(stats.dangling_senses, 1);
        assert_eq!(stats.malformed_entries, 1);
        assert_eq!(stats.malformed_synsets, 1);
        assert_eq!(stats.relations, 2);
    }

    #[test]
    fn rejects_broken_markup() {
        let err = Wordnet::from_lmf_str("<LexicalResource><Lexicon></LexicalResource>").unwrap_err();
        assert!(matches!(err, LexiconError::Xml { position, .. } if position > 0));
        assert!(err.to_string().contains("near byte"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = Wordnet::from_lmf_path("/nonexistent/awn4.xml").unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/awn4.xml"));
    }
}
