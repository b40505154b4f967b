use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use awn_hierarchy::report::{self, write_wordnet_stats, Report, SideBySide};
use awn_hierarchy::{Comparison, ComparisonConfig, Resources};
use awn_lexicon::Wordnet;
use awn_text::{ArabicNormalizer, NormalizerConfig};

use crate::cli::{Cli, Command, InputArgs, TuningArgs};

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Compare {
            inputs,
            tuning,
            out_dir,
            markdown,
        } => compare(&inputs, &tuning, config, &out_dir, markdown, &mut stdout),
        Command::Review {
            inputs,
            tuning,
            out_dir,
        } => review(&inputs, &tuning, config, &out_dir, &mut stdout),
        Command::Matches {
            inputs,
            sample,
            seed,
            output,
        } => {
            let size = sample.unwrap_or(config.side_by_side_sample);
            let seed = seed.unwrap_or(config.sample_seed);
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    let mut out = BufWriter::new(file);
                    matches(&inputs, config, size, seed, &mut out)?;
                    out.flush()?;
                    info!(path = %path.display(), "wrote side-by-side sample");
                    Ok(())
                }
                None => matches(&inputs, config, size, seed, &mut stdout),
            }
        }
        Command::Stats { wordnet } => stats(&wordnet, &mut stdout),
        Command::Normalize { text, fold_maqsura } => {
            let mut normalizer_config = config.normalizer;
            normalizer_config.normalize_alef_maqsura |= fold_maqsura;
            normalize(&text, normalizer_config, &mut stdout)
        }
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<ComparisonConfig> {
    match path {
        Some(path) => {
            let config = ComparisonConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            info!(path = %path.display(), "loaded comparison config");
            Ok(config)
        }
        None => Ok(ComparisonConfig::default()),
    }
}

pub fn compare(
    inputs: &InputArgs,
    tuning: &TuningArgs,
    mut config: ComparisonConfig,
    out_dir: &Path,
    markdown: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    tuning.apply(&mut config);
    config.validate()?;
    let resources = Resources::load(&inputs.paths())?;
    let run = Comparison::prepare(&resources, &config).run();

    let report = Report::new(&run, &resources, &config);
    let written = report.write_all(out_dir)?;

    let summary = &run.summary;
    writeln!(
        out,
        "{} pairs: AGREE {} / DISAGREE {} / PARTIAL {} / UNMATCHABLE {}",
        summary.total,
        summary.agree,
        summary.disagree,
        summary.partial(),
        summary.unmatchable
    )?;
    for path in &written {
        writeln!(out, "  {}", path.display())?;
    }
    if markdown {
        writeln!(out)?;
        report.write_markdown(out)?;
    }
    Ok(())
}

pub fn review(
    inputs: &InputArgs,
    tuning: &TuningArgs,
    mut config: ComparisonConfig,
    out_dir: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    tuning.apply(&mut config);
    config.validate()?;
    let resources = Resources::load(&inputs.paths())?;
    let run = Comparison::prepare(&resources, &config).run();
    let report = Report::new(&run, &resources, &config);

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let agree = write_with(out_dir.join(report::AGREE_DUMP), |w| {
        report.write_agree_dump(w)
    })?;
    let disagree = write_with(out_dir.join(report::DISAGREE_DUMP), |w| {
        report.write_disagree_dump(w)
    })?;

    report.write_indicators(out)?;
    writeln!(out)?;
    writeln!(out, "Wrote: {}", agree.display())?;
    writeln!(out, "Wrote: {}", disagree.display())?;
    Ok(())
}

pub fn matches(
    inputs: &InputArgs,
    config: ComparisonConfig,
    size: usize,
    seed: u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let resources = Resources::load(&inputs.paths())?;
    let comparison = Comparison::prepare(&resources, &config);
    let sample = SideBySide::sample(
        &resources.ontology,
        &resources.wordnet,
        comparison.resolved(),
        size,
        seed,
    );
    info!(
        matched = comparison.resolved().matched_count(),
        selected = sample.len(),
        "sampled matched concepts"
    );
    sample.write(out)?;
    Ok(())
}

pub fn stats(wordnet: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let wordnet = Wordnet::from_lmf_path(wordnet)?;
    write_wordnet_stats(out, &wordnet)?;
    Ok(())
}

pub fn normalize(
    text: &[String],
    config: NormalizerConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let normalizer = ArabicNormalizer::with_config(config);
    for item in text {
        match normalizer.key(item) {
            Some(key) => writeln!(out, "{item}\t{key}")?,
            None => writeln!(out, "{item}\t(empty)")?,
        }
    }
    Ok(())
}

fn write_with(
    path: PathBuf,
    render: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> anyhow::Result<PathBuf> {
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    render(&mut out)?;
    out.flush()?;
    Ok(path)
}
