use std::io::{self, Write};

use awn_lexicon::Wordnet;

/// Load counts, part-of-speech and relation distributions of a wordnet.
pub fn write_wordnet_stats<W: Write>(out: &mut W, wordnet: &Wordnet) -> io::Result<()> {
    let info = wordnet.info();
    let stats = wordnet.stats();

    writeln!(
        out,
        "Lexicon: {} ({}) version {} [{}]",
        info.label.as_deref().unwrap_or("?"),
        info.id.as_deref().unwrap_or("?"),
        info.version.as_deref().unwrap_or("?"),
        info.language.as_deref().unwrap_or("?"),
    )?;
    writeln!(out, "  Synsets:      {:>8}", stats.synsets)?;
    writeln!(out, "  Entries:      {:>8}", stats.entries)?;
    writeln!(out, "  Senses:       {:>8}", stats.senses)?;
    writeln!(out, "  Relations:    {:>8}", stats.relations)?;
    writeln!(out)?;

    writeln!(out, "Skipped records:")?;
    writeln!(out, "  Relations to unknown synsets: {:>6}", stats.dangling_relations)?;
    writeln!(out, "  Senses of unknown synsets:    {:>6}", stats.dangling_senses)?;
    writeln!(out, "  Duplicate synsets:            {:>6}", stats.duplicate_synsets)?;
    writeln!(out, "  Malformed entries:            {:>6}", stats.malformed_entries)?;
    writeln!(out, "  Malformed synsets:            {:>6}", stats.malformed_synsets)?;
    writeln!(out)?;

    writeln!(out, "POS distribution:")?;
    for (pos, count) in wordnet.pos_distribution() {
        writeln!(out, "  {pos}: {count:>8}")?;
    }
    writeln!(out)?;

    writeln!(out, "Relation types:")?;
    let mut relations: Vec<(String, usize)> = wordnet.relation_type_counts().into_iter().collect();
    relations.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (rel_type, count) in relations {
        writeln!(out, "  {rel_type:<20} {count:>8}")?;
    }
    Ok(())
}
