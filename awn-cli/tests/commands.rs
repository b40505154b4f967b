use std::fs;
use std::path::Path;

use awn_cli::cli::{InputArgs, TuningArgs};
use awn_cli::commands;
use awn_hierarchy::ComparisonConfig;
use awn_text::NormalizerConfig;

const LMF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LexicalResource>
  <Lexicon id="awn4" label="Arabic WordNet" language="arb" version="4.0">
    <LexicalEntry id="e1"><Lemma writtenForm="وَرْدَة" partOfSpeech="n"/><Sense id="s1" synset="rose-n"/></LexicalEntry>
    <LexicalEntry id="e2"><Lemma writtenForm="زَهْرَة" partOfSpeech="n"/><Sense id="s2" synset="flower-n"/></LexicalEntry>
    <LexicalEntry id="e3"><Lemma writtenForm="نَبَات" partOfSpeech="n"/><Sense id="s3" synset="plant-n"/></LexicalEntry>
    <Synset id="rose-n" partOfSpeech="n"><SynsetRelation relType="hypernym" target="flower-n"/></Synset>
    <Synset id="flower-n" partOfSpeech="n"><SynsetRelation relType="hypernym" target="plant-n"/></Synset>
    <Synset id="plant-n" partOfSpeech="n"/>
  </Lexicon>
</LexicalResource>"#;

fn inputs(dir: &Path) -> InputArgs {
    let args = InputArgs {
        wordnet: dir.join("awn4.xml"),
        concepts: dir.join("Concepts.csv"),
        relations: dir.join("Relations.csv"),
        annotations: None,
    };
    fs::write(&args.wordnet, LMF).unwrap();
    fs::write(
        &args.concepts,
        "conceptId,arabicSynset,englishSynset,gloss,example,dataSourceId\n\
         1,وردة,rose,,,1\n\
         2,زهرة|نور,flower,,,1\n\
         3,نبات,plant,,,1\n",
    )
    .unwrap();
    fs::write(
        &args.relations,
        "concept_id,subTypeOfID,partOfID,instanceOfID\n1,3,NULL,NULL\n2,3,NULL,NULL\n3,0,NULL,NULL\n",
    )
    .unwrap();
    args
}

#[test]
fn test_compare_writes_reports_and_summary_line() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path());
    let out_dir = dir.path().join("out");

    let mut stdout = Vec::new();
    commands::compare(
        &inputs,
        &TuningArgs::default(),
        ComparisonConfig::default(),
        &out_dir,
        true,
        &mut stdout,
    )
    .unwrap();

    let printed = String::from_utf8(stdout).unwrap();
    assert!(printed.starts_with("2 pairs: AGREE 2 / DISAGREE 0 / PARTIAL 0 / UNMATCHABLE 0"));
    assert!(printed.contains("| 1 | 1 | 50.0% |"));
    assert!(out_dir.join("hierarchy_comparison_report.txt").exists());
    assert!(out_dir.join("hierarchy_pairs.csv").exists());
}

#[test]
fn test_review_prints_indicators() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path());
    let out_dir = dir.path().join("review");

    let mut stdout = Vec::new();
    commands::review(
        &inputs,
        &TuningArgs::default(),
        ComparisonConfig::default(),
        &out_dir,
        &mut stdout,
    )
    .unwrap();

    let printed = String::from_utf8(stdout).unwrap();
    assert!(printed.contains("POS consistent (child=parent): 2 / 2"));
    assert!(out_dir.join("validation_all_agree.txt").exists());
}

#[test]
fn test_invalid_override_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path());
    let tuning = TuningArgs {
        max_hops: Some(0),
        ..TuningArgs::default()
    };
    let mut stdout = Vec::new();
    let result = commands::compare(
        &inputs,
        &tuning,
        ComparisonConfig::default(),
        &dir.path().join("out"),
        false,
        &mut stdout,
    );
    assert!(result.is_err());
}

#[test]
fn test_matches_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = inputs(dir.path());

    let mut sample = Vec::new();
    commands::matches(&inputs, ComparisonConfig::default(), 35, 42, &mut sample).unwrap();
    let sample = String::from_utf8(sample).unwrap();
    assert!(sample.contains("Selected 3 entries"));

    let mut stats = Vec::new();
    commands::stats(&inputs.wordnet, &mut stats).unwrap();
    let stats = String::from_utf8(stats).unwrap();
    assert!(stats.contains("Lexicon: Arabic WordNet (awn4) version 4.0 [arb]"));
}

#[test]
fn test_normalize_prints_keys() {
    let mut out = Vec::new();
    commands::normalize(
        &["إِسْلَام".to_string(), "مَدْرَسَة".to_string(), "ـــ".to_string()],
        NormalizerConfig::default(),
        &mut out,
    )
    .unwrap();
    let printed = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines, vec!["إِسْلَام\tاسلام", "مَدْرَسَة\tمدرسه", "ـــ\t(empty)"]);
}

#[test]
fn test_missing_config_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = commands::load_config(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
