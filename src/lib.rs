//! Word sense and idiom resolution over a WordNet-style lexical database.
//!
//! A request names a sentence, a word and which occurrence of the word is
//! meant. The [`SenseResolver`] answers with the literal senses of the word,
//! ranked by a random-walk over the relation graph of the sentence, and with
//! the idiom covering the word, if the sentence contains one.

#[macro_use]
extern crate serde_derive;

pub mod error;
pub mod pos;
pub mod data;
pub mod wordnet;
pub mod preprocess;
pub mod graph;
pub mod builder;
pub mod ranker;
pub mod idiom;
pub mod catalog;
pub mod fallback;
pub mod resolver;

#[cfg(test)]
mod test_utils;

pub use crate::catalog::{IdiomCatalog, IdiomRecord};
pub use crate::error::{Error, Result};
pub use crate::fallback::{DictionaryFallback, NoFallback, StaticDictionary};
pub use crate::pos::Pos;
pub use crate::preprocess::{Analyzer, Preprocessor, TagLexicon};
pub use crate::ranker::{RankerConfig, SelectionOrder};
pub use crate::resolver::{Request, Resolution, ResolverConfig, SenseEntry, SenseResolver, SenseSet, Senses};
pub use crate::wordnet::{LexicalDatabase, WordNet};
