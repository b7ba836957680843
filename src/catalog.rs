use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::data;
use crate::error::Result;
use crate::idiom::{IdiomPattern, MatchSpan, SentenceToken};
use crate::preprocess::{analyze, Preprocessor};

pub const IDIOM_CATEGORY : &str = "Idiomatic phrase";

/// One entry of the idiom definition file.
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct IdiomRecord {
    pub name : String,
    pub definition : String,
    #[serde(default)]
    pub example : String,
    pub kind : String
}

/// All known idioms, grouped by name in the order they were added.
#[derive(Debug,Clone,Default)]
pub struct IdiomCatalog {
    names : Vec<String>,
    idioms : HashMap<String, Vec<IdiomPattern>>
}

/// The idiom occurrence chosen for a token.
#[derive(Debug,Clone,PartialEq)]
pub struct IdiomMatch<'a> {
    pub span : MatchSpan,
    pub patterns : Vec<&'a IdiomPattern>
}

impl<'a> IdiomMatch<'a> {
    pub fn name(&self) -> &str {
        &self.patterns[0].name
    }
}

impl IdiomCatalog {
    pub fn new() -> IdiomCatalog {
        IdiomCatalog::default()
    }

    pub fn from_file<P : AsRef<Path>, Q : Preprocessor + ?Sized>(path : P, pre : &Q) -> Result<IdiomCatalog> {
        let records : Vec<IdiomRecord> = data::read_json(path.as_ref())?;
        let catalog = IdiomCatalog::from_records(&records, pre)?;
        info!(idioms = catalog.len(), "Loaded idioms from {}", path.as_ref().display());
        Ok(catalog)
    }

    /// Builds the catalog, lemmatizing every idiom name. Names are kept as
    /// written. Fails on the first record with an unknown kind.
    pub fn from_records<Q : Preprocessor + ?Sized>(records : &[IdiomRecord], pre : &Q) -> Result<IdiomCatalog> {
        let mut catalog = IdiomCatalog::new();
        for record in records {
            let lemmas = analyze(pre, &record.name.trim().to_lowercase()).into_iter()
                .map(|t| t.lemma)
                .collect();
            catalog.add(IdiomPattern::new(&record.name, lemmas, &record.definition, &record.example, &record.kind)?);
        }
        Ok(catalog)
    }

    pub fn add(&mut self, idiom : IdiomPattern) {
        if !self.idioms.contains_key(&idiom.name) {
            self.names.push(idiom.name.clone());
        }
        self.idioms.entry(idiom.name.clone()).or_insert_with(Vec::new).push(idiom);
    }

    pub fn get(&self, name : &str) -> &[IdiomPattern] {
        self.idioms.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Number of distinct idiom names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a IdiomPattern> + 'a {
        self.names.iter().flat_map(move |n| self.idioms[n].iter())
    }

    /// Every span of the sentence matched by some idiom, with the idioms that
    /// matched it. Spans are listed in the order they were first found.
    pub fn find_matches(&self, sentence : &[SentenceToken]) -> Vec<(MatchSpan, Vec<&IdiomPattern>)> {
        let mut found : Vec<(MatchSpan, Vec<&IdiomPattern>)> = Vec::new();
        for idiom in self.iter() {
            if let Some(span) = idiom.find(sentence) {
                match found.iter_mut().find(|entry| entry.0 == span) {
                    Some(entry) => entry.1.push(idiom),
                    None => found.push((span, vec![idiom]))
                }
            }
        }
        found
    }

    /// The idiom covering token `index`: the widest matching span, then the
    /// one starting earliest, then the first one found.
    pub fn resolve(&self, sentence : &[SentenceToken], index : usize) -> Option<IdiomMatch<'_>> {
        let mut covering : Vec<(MatchSpan, Vec<&IdiomPattern>)> = self.find_matches(sentence)
            .into_iter()
            .filter(|&(ref span, _)| span.contains(index))
            .collect();
        covering.sort_by(|a, b| b.0.width().cmp(&a.0.width()).then(a.0.start().cmp(&b.0.start())));
        let (span, patterns) = covering.into_iter().next()?;
        debug!(span = ?span.0, idiom = %patterns[0].name, "Resolved idiom");
        Some(IdiomMatch { span : span, patterns : patterns })
    }
}
