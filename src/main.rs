use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use grammarchk::checker::dictionary::DictionaryCache;
use grammarchk::cli::output::{self, FileReport, OutputFormat};
use grammarchk::cli::{check_source, collect_files};
use grammarchk::grammar::bridge::GrammarBridge;
use grammarchk::grammar::languagetool::LanguageToolClient;
use grammarchk::report::apply_fixes;
use grammarchk::{CheckConfiguration, Config, TextChecker};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "grammarchk")]
#[command(
    version,
    about = "Spelling, grammar and writing style checks for source code prose",
    long_about = None
)]
struct Cli {
    /// Files or directories to check
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Apply suggested corrections in place
    #[arg(short, long)]
    fix: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if issues are found
    #[arg(long)]
    no_fail: bool,

    /// Language/dictionary to use (e.g., en_US, en_GB)
    #[arg(short, long)]
    language: Option<String>,

    /// Directory holding <lang>.aff and <lang>.dic
    #[arg(long, value_name = "DIR")]
    lang_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (overrides local and global config)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Check whole sentences against a grammar server
    #[arg(long)]
    sentences: bool,

    /// Base URL of a LanguageTool-compatible server
    #[arg(long, value_name = "URL", env = "GRAMMARCHK_GRAMMAR_URL")]
    grammar_url: Option<String>,

    /// Extra words to accept
    #[arg(long, value_name = "WORD")]
    skip_word: Vec<String>,

    /// Skip any text unit matching this regex
    #[arg(long, value_name = "REGEX")]
    skip_if_match: Vec<String>,

    /// Only check words that do not match this regex
    #[arg(long, value_name = "REGEX")]
    skip_word_if_match: Vec<String>,

    /// Minimum word length to check
    #[arg(long)]
    min_length: Option<usize>,

    /// Verbose logging
    #[arg(long)]
    debug: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

impl Cli {
    /// CLI flags win over every config file.
    fn apply_to(&self, config: &mut Config) {
        if let Some(language) = &self.language {
            config.lang = language.clone();
        }
        if let Some(dir) = &self.lang_dir {
            config.lang_dir = Some(dir.clone());
        }
        if self.sentences {
            config.sentences = true;
        }
        if let Some(url) = &self.grammar_url {
            config.grammar_url = Some(url.clone());
        }
        if let Some(min_length) = self.min_length {
            config.min_length = min_length;
        }
        if self.debug {
            config.debug = true;
        }
        config.skip_words.extend(self.skip_word.iter().cloned());
        config.skip_if_match.extend(self.skip_if_match.iter().cloned());
        config
            .skip_word_if_match
            .extend(self.skip_word_if_match.iter().cloned());
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_checker(config: &Config) -> Result<TextChecker> {
    let check_config = CheckConfiguration::from_config(config).context("Invalid configuration")?;
    let dictionary_dir = config
        .dictionary_dir()
        .context("No dictionary directory; set langDir or pass --lang-dir")?;

    let cache = Arc::new(DictionaryCache::new(dictionary_dir));
    let mut checker = TextChecker::new(check_config, cache)
        .with_context(|| format!("Failed to load dictionary {}", config.lang))?;

    if config.sentences {
        match &config.grammar_url {
            Some(url) => {
                let client = LanguageToolClient::new(
                    url.clone(),
                    Duration::from_secs(config.grammar_timeout_secs),
                )?;
                let bridge =
                    GrammarBridge::spawn(client).context("Failed to start grammar worker")?;
                checker = checker.with_grammar(Arc::new(bridge));
            }
            None => tracing::warn!("Sentence checks requested but no grammar URL is configured"),
        }
    }

    Ok(checker)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "grammarchk", &mut io::stdout());
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    init_tracing(config.debug);

    if cli.paths.is_empty() {
        anyhow::bail!("No paths specified. Use --help for usage information.");
    }

    let checker = build_checker(&config)?;
    let files = collect_files(&cli.paths);
    tracing::debug!("Checking {} files", files.len());

    let results: Vec<FileReport> = files
        .par_iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(content) => {
                let reports = check_source(&checker, path, &content);
                Some(FileReport {
                    path: path.clone(),
                    content,
                    reports,
                })
            }
            Err(err) => {
                tracing::warn!("Failed to read {}: {}", path.display(), err);
                None
            }
        })
        .collect();

    let colored = !cli.no_color;

    if cli.fix {
        let mut total_fixed = 0;
        for file in &results {
            let (fixed, applied) = apply_fixes(&file.content, &file.reports);
            if applied > 0 {
                fs::write(&file.path, fixed)
                    .with_context(|| format!("Failed to write {}", file.path.display()))?;
                total_fixed += applied;
            }
        }
        output::print_fix_summary(total_fixed, &files, colored);
        return Ok(());
    }

    output::print_reports(&results, colored, cli.format)?;

    let total_issues: usize = results.iter().map(|f| f.reports.len()).sum();
    if matches!(cli.format, OutputFormat::Text) {
        output::print_check_summary(total_issues, &files, colored);
    }

    if total_issues > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}
