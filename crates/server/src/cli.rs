//! CLI argument parsing and subcommand dispatch.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use docubot_analysis::{
    compute_stats, most_common_words, StatRecord, WordCloud, WordCloudConfig, WordCount,
};
use docubot_core::Config;
use docubot_glossary::{Glossary, LookupOutcome};
use tracing::info;

use crate::app_config;

/// Document analysis assistant: stats, summaries, chat and term lookup.
#[derive(Parser, Debug)]
#[command(name = "docubot", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service
    Serve {
        /// Bind address (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Analyze a local .txt, .pdf or .docx file and print a report
    Analyze {
        file: PathBuf,
        /// Also run the summarizer
        #[arg(long)]
        summarize: bool,
        /// Size of the most-common-words table
        #[arg(long, default_value_t = docubot_analysis::stats::DEFAULT_TOP_WORDS)]
        top: usize,
        /// Write the word cloud SVG here
        #[arg(long, value_name = "OUT_SVG")]
        wordcloud: Option<PathBuf>,
        /// Write the stats CSV here
        #[arg(long, value_name = "OUT_CSV")]
        csv: Option<PathBuf>,
    },
    /// Look up a term in the dictionary
    Lookup {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
}

pub async fn run_analyze(
    config: &Config,
    file: &Path,
    summarize: bool,
    top: usize,
    wordcloud: Option<&Path>,
    csv: Option<&Path>,
) -> Result<()> {
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file path: {}", file.display()))?;
    let bytes = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    let document = docubot_ingest::extract_text(&bytes, filename)
        .with_context(|| format!("failed to extract text from {}", file.display()))?
        .into_document();
    info!("Extracted {} chars from {} ({})", document.text.len(), filename, document.format);

    let stats = compute_stats(&document.text);
    let words = most_common_words(&document.text, top);
    print!("{}", render_report(filename, &stats, &words));

    if let Some(path) = csv {
        let body = docubot_analysis::stats_csv(&stats)?;
        std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Stats CSV written to {}", path.display());
    }

    if let Some(path) = wordcloud {
        let svg = WordCloud::generate(&document.text, &WordCloudConfig::default()).to_svg();
        std::fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Word cloud written to {}", path.display());
    }

    if summarize {
        let Some(aggregator) = app_config::build_summarizer(config) else {
            bail!("summarizer is not configured (see SUMMARIZER_BACKEND)");
        };
        let summary = aggregator
            .summarize(&document.text)
            .await
            .context("summarization failed")?;
        println!("\nSummary\n-------\n{summary}");
    }

    Ok(())
}

pub async fn run_lookup(config: &Config, term: &str) -> Result<()> {
    let glossary = Glossary::new(&config.dictionary);
    match glossary.explain(term).await {
        LookupOutcome::Definition { term, definition } => println!("{term}: {definition}"),
        LookupOutcome::NotFound { term, search_url } => {
            println!("Couldn't find a definition for '{term}'.");
            println!("Search: {search_url}");
        }
    }
    Ok(())
}

fn render_report(filename: &str, stats: &StatRecord, words: &[WordCount]) -> String {
    let mut out = format!("Text analysis: {filename}\n");
    for (metric, value) in stats.rows() {
        out.push_str(&format!("  {metric:<18} {value}\n"));
    }
    if !words.is_empty() {
        out.push_str("\nMost common words\n");
        for w in words {
            out.push_str(&format!("  {:<18} {}\n", w.word, w.count));
        }
    }
    out
}
