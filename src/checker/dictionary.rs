use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Error, Result};

/// Word lookup capability. The on-disk format is owned by the implementor.
pub trait SpellDictionary: Send + Sync {
    fn check(&self, word: &str) -> bool;

    /// Spelling suggestions for an unknown word, best first.
    fn suggest(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Hunspell `.aff` / `.dic` pair, parsed by `spellbook`.
pub struct HunspellDictionary {
    inner: spellbook::Dictionary,
}

impl HunspellDictionary {
    /// Load `<language>.aff` and `<language>.dic` from `dir`.
    pub fn load(dir: &Path, language: &str) -> Result<Self> {
        let read = |ext: &str| {
            let path = dir.join(format!("{}.{}", language, ext));
            fs::read_to_string(&path).map_err(|e| Error::Dictionary {
                language: language.to_string(),
                dir: dir.to_path_buf(),
                message: format!("cannot read {}: {}", path.display(), e),
            })
        };

        let aff = read("aff")?;
        let dic = read("dic")?;
        Self::from_sources(&aff, &dic).map_err(|message| Error::Dictionary {
            language: language.to_string(),
            dir: dir.to_path_buf(),
            message,
        })
    }

    pub fn from_sources(aff: &str, dic: &str) -> std::result::Result<Self, String> {
        spellbook::Dictionary::new(aff, dic)
            .map(|inner| Self { inner })
            .map_err(|e| e.to_string())
    }
}

impl SpellDictionary for HunspellDictionary {
    fn check(&self, word: &str) -> bool {
        self.inner.check(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let mut suggestions = Vec::new();
        self.inner.suggest(word, &mut suggestions);
        suggestions
    }
}

type Loader = dyn Fn(&str) -> Result<Arc<dyn SpellDictionary>> + Send + Sync;

struct Loaded {
    language: String,
    dictionary: Arc<dyn SpellDictionary>,
}

/// Holds the single active dictionary.
///
/// The dictionary for a language is loaded on first use and replaced as a
/// whole when a different language is requested; it is never updated in
/// place. Swaps take the write lock, so the cache can be shared between
/// threads.
pub struct DictionaryCache {
    loader: Box<Loader>,
    active: RwLock<Option<Loaded>>,
}

impl DictionaryCache {
    /// Cache backed by Hunspell files in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::with_loader(move |language| {
            let dictionary = HunspellDictionary::load(&dir, language)?;
            Ok(Arc::new(dictionary) as Arc<dyn SpellDictionary>)
        })
    }

    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn SpellDictionary>> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            active: RwLock::new(None),
        }
    }

    /// The dictionary for `language`, loading it if another one is active.
    pub fn get(&self, language: &str) -> Result<Arc<dyn SpellDictionary>> {
        if let Some(loaded) = self.active.read().as_ref() {
            if loaded.language == language {
                return Ok(Arc::clone(&loaded.dictionary));
            }
        }

        let mut active = self.active.write();
        // Another thread may have loaded it while we waited for the lock.
        if let Some(loaded) = active.as_ref() {
            if loaded.language == language {
                return Ok(Arc::clone(&loaded.dictionary));
            }
        }
        let dictionary = self.load(language)?;
        *active = Some(Loaded {
            language: language.to_string(),
            dictionary: Arc::clone(&dictionary),
        });
        Ok(dictionary)
    }

    /// Load `language` again even if it is already active.
    pub fn reload(&self, language: &str) -> Result<Arc<dyn SpellDictionary>> {
        let dictionary = self.load(language)?;
        *self.active.write() = Some(Loaded {
            language: language.to_string(),
            dictionary: Arc::clone(&dictionary),
        });
        Ok(dictionary)
    }

    pub fn active_language(&self) -> Option<String> {
        self.active.read().as_ref().map(|l| l.language.clone())
    }

    fn load(&self, language: &str) -> Result<Arc<dyn SpellDictionary>> {
        tracing::debug!("Loading dictionary for {}", language);
        (self.loader)(language)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    /// In-memory dictionary for tests across the crate.
    pub(crate) struct WordSet(pub HashSet<String>);

    impl WordSet {
        pub(crate) fn new(words: &[&str]) -> Self {
            Self(words.iter().map(|w| w.to_lowercase()).collect())
        }
    }

    impl SpellDictionary for WordSet {
        fn check(&self, word: &str) -> bool {
            self.0.contains(&word.to_lowercase())
        }
    }

    #[test]
    fn test_load_hunspell_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en_US.aff"), "SET UTF-8\n").unwrap();
        fs::write(dir.path().join("en_US.dic"), "3\nhello\nworld\ntest\n").unwrap();

        let dict = HunspellDictionary::load(dir.path(), "en_US").unwrap();
        assert!(dict.check("hello"));
        assert!(dict.check("world"));
        assert!(!dict.check("wrold"));
    }

    #[test]
    fn test_missing_files_are_a_setup_error() {
        let dir = tempdir().unwrap();
        let err = HunspellDictionary::load(dir.path(), "xx_XX").err().unwrap();
        assert!(matches!(err, Error::Dictionary { .. }));
    }

    #[test]
    fn test_cache_loads_once_per_language() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let cache = DictionaryCache::with_loader(move |language| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(WordSet::new(&[language])) as Arc<dyn SpellDictionary>)
        });

        assert!(cache.get("en_US").unwrap().check("en_US"));
        assert!(cache.get("en_US").unwrap().check("en_US"));
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        let gb = cache.get("en_GB").unwrap();
        assert!(gb.check("en_GB"));
        assert!(!gb.check("en_US"));
        assert_eq!(cache.active_language().as_deref(), Some("en_GB"));
        assert_eq!(loads.load(Ordering::SeqCst), 2);

        cache.reload("en_GB").unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_failed_load_keeps_previous_dictionary() {
        let cache = DictionaryCache::with_loader(|language| {
            if language == "broken" {
                Err(Error::config("no such dictionary"))
            } else {
                Ok(Arc::new(WordSet::new(&["ok"])) as Arc<dyn SpellDictionary>)
            }
        });

        cache.get("en_US").unwrap();
        assert!(cache.get("broken").is_err());
        assert_eq!(cache.active_language().as_deref(), Some("en_US"));
    }
}
