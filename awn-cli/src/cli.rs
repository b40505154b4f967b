use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use awn_hierarchy::{ComparisonConfig, InputPaths};
use awn_lexicon::ConceptRelationKind;

#[derive(Debug, Parser)]
#[command(
    name = "awn",
    version,
    about = "Compare the Arabic ontology hierarchy with the Arabic WordNet"
)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "AWN_LOG_JSON")]
    pub log_json: bool,

    /// Comparison settings (JSON); command-line flags take precedence
    #[arg(long, global = true, env = "AWN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify every ontology relation pair and write all reports
    Compare {
        #[command(flatten)]
        inputs: InputArgs,
        #[command(flatten)]
        tuning: TuningArgs,
        /// Directory receiving the report files
        #[arg(long, env = "AWN_OUT_DIR", default_value = "reports")]
        out_dir: PathBuf,
        /// Also print the Markdown summary to stdout
        #[arg(long)]
        markdown: bool,
    },
    /// Print review indicators and write the AGREE/DISAGREE dumps
    Review {
        #[command(flatten)]
        inputs: InputArgs,
        #[command(flatten)]
        tuning: TuningArgs,
        #[arg(long, env = "AWN_OUT_DIR", default_value = "reports")]
        out_dir: PathBuf,
    },
    /// Side-by-side sample of concepts that matched wordnet synsets
    Matches {
        #[command(flatten)]
        inputs: InputArgs,
        /// Number of sampled concepts
        #[arg(long)]
        sample: Option<usize>,
        /// Seed of the sample
        #[arg(long)]
        seed: Option<u64>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load a WN-LMF file and print its statistics
    Stats {
        /// WN-LMF XML file
        #[arg(long, env = "AWN_WORDNET")]
        wordnet: PathBuf,
    },
    /// Print the matching key of each argument
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
        /// Also fold alef maqsura into yaa
        #[arg(long)]
        fold_maqsura: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// WN-LMF XML file
    #[arg(long, env = "AWN_WORDNET")]
    pub wordnet: PathBuf,

    /// Ontology concept table
    #[arg(long, env = "AWN_CONCEPTS")]
    pub concepts: PathBuf,

    /// Ontology relation table
    #[arg(long, env = "AWN_RELATIONS")]
    pub relations: PathBuf,

    /// Confidence annotations (child_id,parent_id,confidence)
    #[arg(long, env = "AWN_ANNOTATIONS")]
    pub annotations: Option<PathBuf>,
}

impl InputArgs {
    pub fn paths(&self) -> InputPaths {
        InputPaths {
            wordnet: self.wordnet.clone(),
            concepts: self.concepts.clone(),
            relations: self.relations.clone(),
            annotations: self.annotations.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct TuningArgs {
    /// Ontology relation to verify: subTypeOf, partOf or instanceOf
    #[arg(long)]
    pub relation: Option<ConceptRelationKind>,

    /// Maximum path length searched in the wordnet
    #[arg(long)]
    pub max_hops: Option<usize>,

    /// Classify pairs on all cores
    #[arg(long)]
    pub parallel: bool,
}

impl TuningArgs {
    pub fn apply(&self, config: &mut ComparisonConfig) {
        if let Some(relation) = self.relation {
            config.relation = relation;
        }
        if let Some(max_hops) = self.max_hops {
            config.max_hops = max_hops;
        }
        if self.parallel {
            config.parallel = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compare_with_overrides() {
        let cli = Cli::try_parse_from([
            "awn",
            "compare",
            "--wordnet",
            "awn4.xml",
            "--concepts",
            "Concepts.csv",
            "--relations",
            "Relations.csv",
            "--relation",
            "partOf",
            "--max-hops",
            "5",
        ])
        .unwrap();
        let Command::Compare { inputs, tuning, out_dir, .. } = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(inputs.paths().annotations, None);
        assert_eq!(out_dir, PathBuf::from("reports"));

        let mut config = ComparisonConfig::default();
        tuning.apply(&mut config);
        assert_eq!(config.relation, ConceptRelationKind::PartOf);
        assert_eq!(config.max_hops, 5);
        assert!(!config.parallel);
    }

    #[test]
    fn rejects_unknown_relation() {
        let parsed = Cli::try_parse_from([
            "awn",
            "compare",
            "--wordnet",
            "awn4.xml",
            "--concepts",
            "Concepts.csv",
            "--relations",
            "Relations.csv",
            "--relation",
            "sibling",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn normalize_needs_text() {
        assert!(Cli::try_parse_from(["awn", "normalize"]).is_err());
    }
}
