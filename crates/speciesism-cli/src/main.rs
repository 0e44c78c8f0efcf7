//! Speciesism CLI
//!
//! Command-line interface for speciesist framing measurement.
//!
//! ## Usage
//!
//! ```bash
//! # Score each line of a file
//! speciesism score --input texts.txt
//!
//! # Pipe from stdin, compare against a reference batch
//! cat texts.txt | speciesism score --references baseline.txt --aggregation average
//!
//! # JSON output
//! speciesism score --text "The livestock were processed." --format json
//!
//! # Inspect or validate lexicons
//! speciesism lexicon show speciesist
//! speciesism lexicon validate custom.yaml
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 1: Lexicon validation failed
//! - 3: Error

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use speciesism_core::{
    measurement_info, Aggregation, BatchResult, Lexicon, MatchRecord, TextScore,
};
use speciesism_runtime::{BatchRunner, RuntimeConfig};

/// Speciesism: lexical measurement of speciesist framing
#[derive(Parser)]
#[command(name = "speciesism")]
#[command(version)]
#[command(about = "Score text for speciesist framing", long_about = None)]
struct Cli {
    /// Runtime configuration file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score texts for speciesist framing
    Score {
        /// File with one text per line (reads stdin if neither --input nor --text is given)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Text to score (can be specified multiple times)
        #[arg(short, long)]
        text: Vec<String>,

        /// File with one reference text per line
        #[arg(short, long)]
        references: Option<PathBuf>,

        /// Aggregate the batch instead of reporting every text
        #[arg(short, long)]
        aggregation: Option<AggregationArg>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Detect companion and farmed species mentions
    Detect {
        /// File with one text per line (reads stdin if neither --input nor --text is given)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Text to inspect (can be specified multiple times)
        #[arg(short, long)]
        text: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Lexicon management commands
    Lexicon {
        #[command(subcommand)]
        action: LexiconAction,
    },

    /// Show measurement description and citation
    Info {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum LexiconAction {
    /// Print a lexicon
    Show {
        /// Which configured lexicon to print
        #[arg(default_value = "speciesist")]
        which: LexiconKind,

        /// Print this lexicon file instead
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a lexicon file
    Validate {
        /// Path to the lexicon file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum AggregationArg {
    Average,
    Maximum,
}

impl From<AggregationArg> for Aggregation {
    fn from(arg: AggregationArg) -> Self {
        match arg {
            AggregationArg::Average => Aggregation::Average,
            AggregationArg::Maximum => Aggregation::Maximum,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LexiconKind {
    Speciesist,
    NonSpeciesist,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    match run() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(3)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            input,
            text,
            references,
            aggregation,
            format,
        } => {
            let runner = load_runner(cli.config.as_deref())?;
            score_command(&runner, input, text, references, aggregation, format)
        }

        Commands::Detect {
            input,
            text,
            format,
        } => {
            let runner = load_runner(cli.config.as_deref())?;
            detect_command(&runner, input, text, format)
        }

        Commands::Lexicon { action } => match action {
            LexiconAction::Show {
                which,
                file,
                format,
            } => show_lexicon(cli.config.as_deref(), which, file, format),
            LexiconAction::Validate { path } => validate_lexicon(path),
        },

        Commands::Info { format } => show_info(format),
    }
}

fn load_runner(config_path: Option<&Path>) -> Result<BatchRunner> {
    let config = match config_path {
        Some(path) => RuntimeConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => RuntimeConfig::default(),
    };
    BatchRunner::new(config).context("Failed to initialize runtime")
}

/// Split file or stdin content into texts, one per non-blank line.
fn split_texts(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn read_texts(input: Option<PathBuf>, text: Vec<String>) -> Result<Vec<String>> {
    if !text.is_empty() {
        return Ok(text);
    }

    let content = match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input from {:?}", path))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    Ok(split_texts(&content))
}

fn score_command(
    runner: &BatchRunner,
    input: Option<PathBuf>,
    text: Vec<String>,
    references: Option<PathBuf>,
    aggregation: Option<AggregationArg>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let data = read_texts(input, text)?;
    let references = match references {
        Some(path) => Some(split_texts(
            &std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read references from {:?}", path))?,
        )),
        None => None,
    };

    let result = runner
        .compute(&data, references.as_deref(), aggregation.map(Aggregation::from))
        .context("Scoring failed")?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        OutputFormat::Text => print_batch_result(&result, &data),
    }

    Ok(ExitCode::from(0))
}

fn print_batch_result(result: &BatchResult, data: &[String]) {
    match result {
        BatchResult::Scores { scores, .. } => {
            for (i, (score, text)) in scores.iter().zip(data).enumerate() {
                if i > 0 {
                    println!();
                }
                print_text_score(i, text, score);
            }
        }
        BatchResult::Average {
            speciesist_score,
            num_texts,
            ..
        } => {
            println!("AVERAGE");
            println!();
            println!("Speciesist score: {:.4} over {} texts", speciesist_score, num_texts);
        }
        BatchResult::Maximum {
            speciesist_score,
            max_index,
            ..
        } => {
            println!("MAXIMUM");
            println!();
            println!("Speciesist score: {:.4} (text #{})", speciesist_score, max_index);
            if let Some(text) = data.get(*max_index) {
                println!("Text: {}", text);
            }
        }
    }

    if let Some(comparison) = result.comparison() {
        println!();
        println!("--- Comparison ---");
        println!();
        println!("Data mean:       {:.4}", comparison.data_mean);
        println!("References mean: {:.4}", comparison.references_mean);
        println!("Difference:      {:+.4}", comparison.difference);
    }
}

fn print_text_score(index: usize, text: &str, score: &TextScore) {
    println!("#{}: {}", index, text);
    println!(
        "  Speciesist score: {:.4} (speciesist {:.4} / non-speciesist {:.4})",
        score.speciesist_score, score.speciesist_raw, score.non_speciesist_raw
    );

    print_matches("Speciesist terms", &score.speciesist_terms);
    print_matches("Non-speciesist terms", &score.non_speciesist_terms);

    if !score.companion_species.is_empty() {
        println!("  Companion species: {}", score.companion_species.join(", "));
    }
    if !score.farmed_species.is_empty() {
        println!("  Farmed species: {}", score.farmed_species.join(", "));
    }
}

fn print_matches(label: &str, matches: &[MatchRecord]) {
    if matches.is_empty() {
        return;
    }
    println!("  {}:", label);
    for m in matches {
        println!(
            "    - {} [{}] weight {} x{}",
            m.term, m.category, m.weight, m.count
        );
    }
}

fn detect_command(
    runner: &BatchRunner,
    input: Option<PathBuf>,
    text: Vec<String>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let texts = read_texts(input, text)?;
    let mentions = runner.detect(&texts);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&mentions)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for (i, (found, text)) in mentions.iter().zip(&texts).enumerate() {
                println!("#{}: {}", i, text);
                println!("  Companion: {}", found.companion.join(", "));
                println!("  Farmed: {}", found.farmed.join(", "));
            }
        }
    }

    Ok(ExitCode::from(0))
}

fn show_lexicon(
    config_path: Option<&Path>,
    which: LexiconKind,
    file: Option<PathBuf>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let definition = match file {
        Some(path) => Lexicon::from_file(&path)
            .with_context(|| format!("Failed to load lexicon from {:?}", path))?
            .to_definition(),
        None => {
            let runner = load_runner(config_path)?;
            let scorer = runner.scorer();
            match which {
                LexiconKind::Speciesist => scorer.speciesist_lexicon().to_definition(),
                LexiconKind::NonSpeciesist => scorer.non_speciesist_lexicon().to_definition(),
            }
        }
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&definition)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Lexicon: {}", definition.name);
            for category in &definition.categories {
                println!();
                println!("{} ({} terms)", category.name, category.terms.len());
                for term in &category.terms {
                    println!("  {:<24} {}", term.term, term.weight);
                }
            }
        }
    }

    Ok(ExitCode::from(0))
}

fn validate_lexicon(path: PathBuf) -> Result<ExitCode> {
    match Lexicon::from_file(&path) {
        Ok(lexicon) => {
            println!("Lexicon is valid: {}", lexicon.name());
            println!();
            println!("Categories: {}", lexicon.categories().len());
            println!("Terms: {}", lexicon.term_count());
            Ok(ExitCode::from(0))
        }
        Err(e) => {
            eprintln!("Lexicon validation failed: {}", e);
            Ok(ExitCode::from(1))
        }
    }
}

fn show_info(format: OutputFormat) -> Result<ExitCode> {
    let info = measurement_info();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&info)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", info.description);
            println!();
            println!("{}", info.inputs_description);
            println!();
            println!("Citation:");
            println!("{}", info.citation);
        }
    }

    Ok(ExitCode::from(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_texts_skips_blank_lines() {
        let texts = split_texts("first line\n\n   \n  second line  \n");
        assert_eq!(texts, vec!["first line", "second line"]);
    }

    #[test]
    fn test_text_flags_take_precedence() {
        let texts = read_texts(
            Some(PathBuf::from("/nonexistent")),
            vec!["inline".to_string()],
        )
        .unwrap();
        assert_eq!(texts, vec!["inline"]);
    }

    #[test]
    fn test_cli_parses_score_command() {
        let cli = Cli::try_parse_from([
            "speciesism",
            "score",
            "--text",
            "The livestock were processed.",
            "--aggregation",
            "maximum",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Score {
                aggregation: Some(AggregationArg::Maximum),
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_aggregation() {
        assert!(Cli::try_parse_from(["speciesism", "score", "--aggregation", "median"]).is_err());
    }

    #[test]
    fn test_cli_parses_lexicon_show() {
        let cli =
            Cli::try_parse_from(["speciesism", "lexicon", "show", "non-speciesist"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Lexicon {
                action: LexiconAction::Show {
                    which: LexiconKind::NonSpeciesist,
                    ..
                }
            }
        ));
    }
}
