use anyhow::{Context, Result};
use directories::ProjectDirs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::checker::skip::default_skip_words;
use crate::style::StyleToggles;
use crate::SpanKind;

pub const LOCAL_CONFIG_FILE: &str = ".grammarchk.toml";

/// User-facing options after all config layers are merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub comments: bool,
    pub strings: bool,
    pub templates: bool,
    pub identifiers: bool,
    pub sentences: bool,
    pub debug: bool,
    pub min_length: usize,
    pub skip_words: Vec<String>,
    pub skip_if_match: Vec<String>,
    pub skip_word_if_match: Vec<String>,
    pub lang: String,
    pub confidence: Option<f32>,
    pub lang_dir: Option<PathBuf>,

    pub check_weak_words: bool,
    pub check_passive_voice: bool,
    pub check_terminology: bool,
    pub check_contractions: bool,
    pub check_prohibited: bool,
    pub check_gender_neutral: bool,
    pub check_readability: bool,

    /// Base URL of a LanguageTool-compatible server used when `sentences` is on.
    pub grammar_url: Option<String>,
    pub grammar_timeout_secs: u64,
}

/// One config file as written. Keys are camelCase to match the option names
/// hosts already use. Only keys present in the file are `Some`, so a file
/// that restates a default still overrides the layers below it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigFile {
    pub comments: Option<bool>,
    pub strings: Option<bool>,
    pub templates: Option<bool>,
    pub identifiers: Option<bool>,
    pub sentences: Option<bool>,
    pub debug: Option<bool>,
    pub min_length: Option<usize>,
    pub skip_words: Option<Vec<String>>,
    pub skip_if_match: Option<Vec<String>>,
    pub skip_word_if_match: Option<Vec<String>>,
    pub lang: Option<String>,
    pub confidence: Option<f32>,
    pub lang_dir: Option<PathBuf>,

    pub check_weak_words: Option<bool>,
    pub check_passive_voice: Option<bool>,
    pub check_terminology: Option<bool>,
    pub check_contractions: Option<bool>,
    pub check_prohibited: Option<bool>,
    pub check_gender_neutral: Option<bool>,
    pub check_readability: Option<bool>,

    pub grammar_url: Option<String>,
    pub grammar_timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn default_lang() -> String {
    "en_US".to_string()
}

fn default_grammar_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comments: true,
            strings: true,
            templates: true,
            identifiers: true,
            sentences: false,
            debug: false,
            min_length: 1,
            skip_words: Vec::new(),
            skip_if_match: Vec::new(),
            skip_word_if_match: Vec::new(),
            lang: default_lang(),
            confidence: None,
            lang_dir: None,
            check_weak_words: true,
            check_passive_voice: true,
            check_terminology: true,
            check_contractions: true,
            check_prohibited: true,
            check_gender_neutral: true,
            check_readability: true,
            grammar_url: None,
            grammar_timeout_secs: default_grammar_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration with priority: explicit file > local config > global config > defaults.
    /// CLI flags are applied on top by the caller.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = explicit {
            return Ok(config.merge(ConfigFile::from_file(path)?));
        }

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = ConfigFile::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            let local_config = ConfigFile::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        Ok(config)
    }

    /// Every key `file` sets wins.
    fn merge(mut self, file: ConfigFile) -> Self {
        macro_rules! take_if_set {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = file.$field {
                        self.$field = value;
                    }
                )*
            };
        }

        take_if_set!(
            comments,
            strings,
            templates,
            identifiers,
            sentences,
            debug,
            min_length,
            skip_words,
            skip_if_match,
            skip_word_if_match,
            lang,
            check_weak_words,
            check_passive_voice,
            check_terminology,
            check_contractions,
            check_prohibited,
            check_gender_neutral,
            check_readability,
            grammar_timeout_secs,
        );

        if file.confidence.is_some() {
            self.confidence = file.confidence;
        }
        if file.lang_dir.is_some() {
            self.lang_dir = file.lang_dir;
        }
        if file.grammar_url.is_some() {
            self.grammar_url = file.grammar_url;
        }
        self
    }

    /// Directory holding `<lang>.aff` / `<lang>.dic`.
    pub fn dictionary_dir(&self) -> Option<PathBuf> {
        self.lang_dir.clone().or_else(Self::data_dir)
    }

    pub fn style_toggles(&self) -> StyleToggles {
        StyleToggles {
            weak_words: self.check_weak_words,
            passive_voice: self.check_passive_voice,
            terminology: self.check_terminology,
            contractions: self.check_contractions,
            prohibited: self.check_prohibited,
            gender_neutral: self.check_gender_neutral,
            readability: self.check_readability,
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "grammarchk").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "grammarchk").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

/// Compiled, immutable settings for one check invocation.
#[derive(Debug, Clone)]
pub struct CheckConfiguration {
    pub language: String,
    pub min_length: usize,
    /// Case folded; always includes the process-wide default skip words.
    pub skip_words: HashSet<String>,
    pub skip_if_match: Vec<Regex>,
    pub skip_word_if_match: Vec<Regex>,
    pub style: StyleToggles,
    pub sentences: bool,
    pub comments: bool,
    pub strings: bool,
    pub templates: bool,
    pub identifiers: bool,
    /// Grammar matches scoring below this are dropped.
    pub confidence: Option<f32>,
}

impl Default for CheckConfiguration {
    fn default() -> Self {
        Self {
            language: default_lang(),
            min_length: 1,
            skip_words: default_skip_words().clone(),
            skip_if_match: Vec::new(),
            skip_word_if_match: Vec::new(),
            style: StyleToggles::default(),
            sentences: false,
            comments: true,
            strings: true,
            templates: true,
            identifiers: true,
            confidence: None,
        }
    }
}

impl CheckConfiguration {
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        if let Some(confidence) = config.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(crate::Error::config(format!(
                    "confidence must be within [0, 1], got {}",
                    confidence
                )));
            }
        }

        let mut skip_words = default_skip_words().clone();
        skip_words.extend(config.skip_words.iter().map(|w| w.to_lowercase()));

        Ok(Self {
            language: config.lang.clone(),
            min_length: config.min_length,
            skip_words,
            skip_if_match: compile_patterns(&config.skip_if_match)?,
            skip_word_if_match: compile_patterns(&config.skip_word_if_match)?,
            style: config.style_toggles(),
            sentences: config.sentences,
            comments: config.comments,
            strings: config.strings,
            templates: config.templates,
            identifiers: config.identifiers,
            confidence: config.confidence,
        })
    }

    pub fn checks_kind(&self, kind: SpanKind) -> bool {
        match kind {
            SpanKind::Comment => self.comments,
            SpanKind::String => self.strings,
            SpanKind::Template => self.templates,
            SpanKind::Identifier => self.identifiers,
        }
    }
}

fn compile_patterns(patterns: &[String]) -> crate::Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| crate::Error::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
