//! Definitions for words the lexical database does not cover.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::data;
use crate::error::Result;
use crate::resolver::SenseEntry;

/// Looks up a word, with its Penn tag, in some other dictionary.
pub trait DictionaryFallback {
    fn lookup(&self, word : &str, tag : &str) -> Result<Vec<SenseEntry>>;
}

/// Knows no words.
#[derive(Debug,Clone,Copy,Default)]
pub struct NoFallback;

impl DictionaryFallback for NoFallback {
    fn lookup(&self, _word : &str, _tag : &str) -> Result<Vec<SenseEntry>> {
        Ok(Vec::new())
    }
}

/// Definitions read from a JSON file of the form
/// `{"word": {"TAG": [{"definition": "...", "example": "..."}]}}`.
/// A tag key also matches longer tags it prefixes, so `PRP` covers `PRP$`.
#[derive(Debug,Clone,Default,Serialize,Deserialize)]
pub struct StaticDictionary(HashMap<String, HashMap<String, Vec<SenseEntry>>>);

impl StaticDictionary {
    pub fn from_file<P : AsRef<Path>>(path : P) -> Result<StaticDictionary> {
        let dict : StaticDictionary = data::read_json(path.as_ref())?;
        info!(words = dict.0.len(), "Loaded fallback dictionary from {}", path.as_ref().display());
        Ok(dict)
    }

    pub fn insert(&mut self, word : &str, tag : &str, entry : SenseEntry) {
        self.0.entry(word.to_string()).or_insert_with(HashMap::new)
            .entry(tag.to_string()).or_insert_with(Vec::new)
            .push(entry);
    }
}

impl DictionaryFallback for StaticDictionary {
    fn lookup(&self, word : &str, tag : &str) -> Result<Vec<SenseEntry>> {
        let by_tag = match self.0.get(word) {
            Some(t) => t,
            None => return Ok(Vec::new())
        };
        let mut keys : Vec<&String> = by_tag.keys().filter(|k| tag.starts_with(k.as_str())).collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()));
        Ok(keys.first().map(|k| by_tag[*k].clone()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_tag_prefix() {
        let mut d = StaticDictionary::default();
        d.insert("seven", "CD", SenseEntry::new("the cardinal number after six", Some("seven dwarfs")));
        d.insert("mine", "PRP", SenseEntry::new("that which belongs to me", None));
        d.insert("mine", "NN", SenseEntry::new("excavation in the earth", None));

        assert_eq!(d.lookup("seven", "CD").unwrap()[0].example.as_ref().unwrap(), "seven dwarfs");
        let mine = d.lookup("mine", "PRP$").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].definition, "that which belongs to me");
        assert!(d.lookup("mine", "DT").unwrap().is_empty());
        assert!(d.lookup("eight", "CD").unwrap().is_empty());
    }

    #[test]
    fn no_fallback_is_empty() {
        assert!(NoFallback.lookup("seven", "CD").unwrap().is_empty());
    }
}
