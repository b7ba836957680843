//! Decides what a word means in a sentence.
//!
//! Every request is answered twice: once for the literal sense of the word,
//! found by ranking a relation graph built around the senses of the sentence's
//! content words, and once for an idiom covering the word, if there is one.

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::builder::GraphBuilder;
use crate::catalog::{IdiomCatalog, IDIOM_CATEGORY};
use crate::error::{Error, Result};
use crate::fallback::{DictionaryFallback, NoFallback};
use crate::graph::{AuxVertex, Vertex};
use crate::idiom::SentenceToken;
use crate::pos::penn_label;
use crate::preprocess::{analyze, context_lemmas, occurrence, Preprocessor, TaggedToken};
use crate::ranker::{RankRoot, Ranker, RankerConfig};
use crate::wordnet::LexicalDatabase;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SenseEntry {
    pub definition : String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example : Option<String>
}

impl SenseEntry {
    pub fn new(definition : &str, example : Option<&str>) -> SenseEntry {
        SenseEntry {
            definition : definition.to_string(),
            example : example.map(|e| e.to_string())
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Senses {
    /// Resolved lemma, or the idiom's name.
    pub name : String,
    pub category : String,
    pub definitions : Vec<SenseEntry>
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SenseSet {
    pub word_sense : Option<Senses>,
    pub idiom_sense : Option<Senses>
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Resolution {
    pub senses : SenseSet,
    pub word : String
}

/// One request of a batch, as sent by clients of the resolver.
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Request {
    pub sentence : String,
    pub word : String,
    #[serde(default)]
    pub word_order : usize
}

/// Written in place of a resolution when a batch line cannot be answered.
#[derive(Debug,Clone,Serialize,Deserialize)]
struct Failure {
    line : usize,
    error : String
}

#[derive(Debug,Clone)]
pub struct ResolverConfig {
    /// How many literal senses (and ranked idiom senses) to return.
    pub top_n : usize,
    /// Order the definitions of an idiom by how well they fit the sentence.
    pub rank_idiom_senses : bool,
    pub ranker : RankerConfig
}

impl Default for ResolverConfig {
    fn default() -> ResolverConfig {
        ResolverConfig {
            top_n : 3,
            rank_idiom_senses : false,
            ranker : RankerConfig::default()
        }
    }
}

pub struct SenseResolver<'a, D : LexicalDatabase + ?Sized, P : Preprocessor + ?Sized> {
    db : &'a D,
    pre : &'a P,
    catalog : Arc<IdiomCatalog>,
    fallback : Box<dyn DictionaryFallback + 'a>,
    config : ResolverConfig
}

impl<'a, D : LexicalDatabase + ?Sized, P : Preprocessor + ?Sized> SenseResolver<'a, D, P> {
    pub fn new(db : &'a D, pre : &'a P, catalog : Arc<IdiomCatalog>) -> SenseResolver<'a, D, P> {
        SenseResolver {
            db : db,
            pre : pre,
            catalog : catalog,
            fallback : Box::new(NoFallback),
            config : ResolverConfig::default()
        }
    }

    pub fn with_fallback<F : DictionaryFallback + 'a>(mut self, fallback : F) -> SenseResolver<'a, D, P> {
        self.fallback = Box::new(fallback);
        self
    }

    pub fn with_config(mut self, config : ResolverConfig) -> SenseResolver<'a, D, P> {
        self.config = config;
        self
    }

    /// Resolves the `word_order`-th (zero based) occurrence of `word`.
    pub fn resolve(&self, sentence : &str, word : &str, word_order : usize) -> Result<Resolution> {
        let sentence = sentence.trim().to_lowercase();
        let word = word.trim().to_lowercase();
        let tokens = analyze(self.pre, &sentence);
        let index = match occurrence(&tokens, &word, word_order) {
            Some(i) => i,
            None => {
                warn!("`{}` does not occur {} time(s) in `{}`", word, word_order + 1, sentence);
                return Ok(Resolution {
                    senses : SenseSet { word_sense : None, idiom_sense : None },
                    word : word
                });
            }
        };
        let idiom_sense = self.idiom_sense(&tokens, index)?;
        let word_sense = self.word_sense(&tokens, index)?;
        let resolved = match word_sense {
            Some(ref s) => s.name.clone(),
            None => tokens[index].lemma.clone()
        };
        Ok(Resolution {
            senses : SenseSet { word_sense : word_sense, idiom_sense : idiom_sense },
            word : resolved
        })
    }

    /// Answers JSON-lines requests, writing one JSON line per request. A line
    /// that cannot be parsed or resolved gets an `{"line", "error"}` object and
    /// the batch goes on. Returns the number of requests resolved.
    pub fn resolve_batch<R : BufRead, W : Write>(&self, input : R, mut output : W) -> Result<usize> {
        let mut answered = 0;
        for (n, line) in input.lines().enumerate() {
            let line = line.map_err(|e| Error::Io { path : "<input>".to_string(), source : e })?;
            if line.trim().is_empty() {
                continue;
            }
            let answer = serde_json::from_str::<Request>(&line)
                .map_err(|e| Error::Json { what : format!("request on line {}", n + 1), source : e })
                .and_then(|r| self.resolve(&r.sentence, &r.word, r.word_order));
            let json = match answer {
                Ok(resolution) => {
                    answered += 1;
                    serde_json::to_string(&resolution)
                },
                Err(e) => {
                    warn!("Skipping line {}: {}", n + 1, e);
                    serde_json::to_string(&Failure { line : n + 1, error : e.to_string() })
                }
            }.map_err(|e| Error::Json { what : "response".to_string(), source : e })?;
            writeln!(output, "{}", json)
                .map_err(|e| Error::Io { path : "<output>".to_string(), source : e })?;
        }
        Ok(answered)
    }

    /// The literal senses of the token at `index`, or `None` when the
    /// database knows no sense for it.
    pub fn word_sense(&self, tokens : &[TaggedToken], index : usize) -> Result<Option<Senses>> {
        let token = &tokens[index];
        let pos = match token.pos() {
            Some(p) => p,
            None => {
                let definitions = self.fallback.lookup(&token.text, &token.tag)?;
                return Ok(Some(Senses {
                    name : token.text.clone(),
                    category : penn_label(&token.tag).to_string(),
                    definitions : definitions
                }));
            }
        };

        let context = context_lemmas(tokens, Some(token.text.as_str()));
        let mut graph = GraphBuilder::new(self.db).build(&context, None, 0)?;
        if graph.is_empty() {
            warn!("No sense found for `{}` ({})", token.lemma, pos);
            return Ok(None);
        }
        graph.finalize();
        let root = RankRoot::Lemma { lemma : token.lemma.clone(), pos : Some(pos) };
        let ranked = Ranker::new(self.db, self.config.ranker.clone())
            .rank(&graph, &root, self.config.top_n)?;
        if ranked.is_empty() {
            warn!("No sense found for `{}` ({})", token.lemma, pos);
            return Ok(None);
        }
        let definitions = ranked.into_iter()
            .filter_map(|v| match v {
                Vertex::Sense(s) => Some(SenseEntry {
                    definition : self.db.gloss(s).to_string(),
                    example : self.db.examples(s).first().cloned()
                }),
                Vertex::Aux(_) => None
            })
            .collect();
        Ok(Some(Senses {
            name : token.lemma.clone(),
            category : pos.label().to_string(),
            definitions : definitions
        }))
    }

    /// The idiom covering the token at `index`, if any.
    pub fn idiom_sense(&self, tokens : &[TaggedToken], index : usize) -> Result<Option<Senses>> {
        let sentence : Vec<SentenceToken> = tokens.iter()
            .map(|t| SentenceToken::new(&t.lemma, &t.tag))
            .collect();
        let found = match self.catalog.resolve(&sentence, index) {
            Some(m) => m,
            None => return Ok(None)
        };
        let mut definitions : Vec<SenseEntry> = found.patterns.iter()
            .map(|p| SenseEntry::new(&p.definition, Some(p.example.as_str())))
            .collect();
        if self.config.rank_idiom_senses && definitions.len() > 1 {
            definitions = self.rank_idiom_senses(tokens, definitions)?;
        }
        Ok(Some(Senses {
            name : found.name().to_string(),
            category : IDIOM_CATEGORY.to_string(),
            definitions : definitions
        }))
    }

    /// Orders candidate definitions by ranking one tag vertex per definition,
    /// each wired to the senses of its definition and example text, inside
    /// the graph of the sentence.
    pub fn rank_idiom_senses(&self, tokens : &[TaggedToken], definitions : Vec<SenseEntry>)
            -> Result<Vec<SenseEntry>> {
        let builder = GraphBuilder::new(self.db);
        let mut graph = builder.build(&context_lemmas(tokens, None), None, 0)?;
        let root = Vertex::Aux(AuxVertex::Root);
        graph.add_vertex(root);
        for (i, entry) in definitions.iter().enumerate() {
            let tag = Vertex::Aux(AuxVertex::Tag(i));
            graph.add_vertex(tag);
            graph.add_edge(root, tag)?;

            let lemmas = context_lemmas(&analyze(self.pre, &entry.definition.to_lowercase()), None);
            graph.merge(&builder.build(&lemmas, Some(&tag), 1)?);
            if let Some(ref example) = entry.example {
                let lemmas = context_lemmas(&analyze(self.pre, &example.to_lowercase()), None);
                graph.merge(&builder.build(&lemmas, Some(&tag), 0)?);
            }
        }
        graph.finalize();
        debug!(vertices = graph.len(), "Ranking {} idiom senses", definitions.len());

        let ranked = Ranker::new(self.db, self.config.ranker.clone())
            .rank(&graph, &RankRoot::Anchored(root), self.config.top_n)?;
        Ok(ranked.into_iter()
            .filter_map(|v| match v {
                Vertex::Aux(AuxVertex::Tag(i)) => definitions.get(i).cloned(),
                _ => None
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IdiomRecord;
    use crate::fallback::StaticDictionary;
    use crate::preprocess::Analyzer;
    use crate::ranker::SelectionOrder;
    use crate::test_utils::{analyzer, catalog, wordnet};
    use crate::wordnet::WordNet;

    #[test]
    fn idiom_and_literal_sense_together() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a)));
        let r = resolver.resolve("He woke up early", "woke", 0).unwrap();
        assert_eq!(r.word, "wake");
        let idiom = r.senses.idiom_sense.unwrap();
        assert_eq!(idiom.name, "wake up");
        assert_eq!(idiom.category, "Idiomatic phrase");
        assert_eq!(idiom.definitions, vec![SenseEntry::new("stop sleeping", Some("she woke up early"))]);
        let literal = r.senses.word_sense.unwrap();
        assert_eq!(literal.category, "Verb");
        assert_eq!(literal.definitions[0].definition, "stop sleeping");
        assert_eq!(literal.definitions[0].example.as_ref().unwrap(), "she woke up every morning at 7 AM");
    }

    #[test]
    fn literal_sense_ranks_database_senses() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a)));
        let r = resolver.resolve("I deposited money in the bank", "bank", 0).unwrap();
        assert!(r.senses.idiom_sense.is_none());
        let literal = r.senses.word_sense.unwrap();
        assert_eq!(literal.name, "bank");
        assert_eq!(literal.category, "Noun");
        let mut defs : Vec<String> = literal.definitions.into_iter().map(|d| d.definition).collect();
        defs.sort();
        assert_eq!(defs, vec!["a financial institution that accepts deposits",
                              "sloping land beside a body of water"]);
    }

    #[test]
    fn top_n_limits_senses() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let config = ResolverConfig { top_n : 1, ..ResolverConfig::default() };
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a))).with_config(config);
        let r = resolver.resolve("I deposited money in the bank", "bank", 0).unwrap();
        assert_eq!(r.senses.word_sense.unwrap().definitions.len(), 1);
    }

    #[test]
    fn resolution_is_deterministic() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a)));
        let first = resolver.resolve("turn the light off and wake up", "light", 0).unwrap();
        for _ in 0..5 {
            assert_eq!(resolver.resolve("turn the light off and wake up", "light", 0).unwrap(), first);
        }
    }

    #[test]
    fn separated_idiom_covers_its_anchors_only() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a)));
        let r = resolver.resolve("turn the light off", "off", 0).unwrap();
        let idiom = r.senses.idiom_sense.unwrap();
        assert_eq!(idiom.name, "turn off");
        assert_eq!(idiom.definitions.len(), 2);
        let r = resolver.resolve("turn the light off", "light", 0).unwrap();
        assert!(r.senses.idiom_sense.is_none());
    }

    #[test]
    fn missing_occurrence_reports_nothing() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a)));
        let r = resolver.resolve("he woke up early", "woke", 1).unwrap();
        assert_eq!(r.word, "woke");
        assert!(r.senses.idiom_sense.is_none());
        assert!(r.senses.word_sense.is_none());
    }

    #[test]
    fn unknown_lemma_has_no_sense() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a)));
        let r = resolver.resolve("the florp", "florp", 0).unwrap();
        assert!(r.senses.word_sense.is_none());
        let r = resolver.resolve("a florp on the bank", "florp", 0).unwrap();
        assert!(r.senses.word_sense.is_none());
    }

    #[test]
    fn words_outside_the_database_use_the_fallback() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let mut dict = StaticDictionary::default();
        dict.insert("7", "CD", SenseEntry::new("the cardinal number after six", None));
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a))).with_fallback(dict);
        let r = resolver.resolve("7 lamps and seven lights", "7", 0).unwrap();
        assert_eq!(r.word, "7");
        let sense = r.senses.word_sense.unwrap();
        assert_eq!(sense.category, "Numeral");
        assert_eq!(sense.definitions, vec![SenseEntry::new("the cardinal number after six", None)]);

        let r = resolver.resolve("7 lamps and seven lights", "and", 0).unwrap();
        let sense = r.senses.word_sense.unwrap();
        assert_eq!(sense.category, "Conjuction");
        assert!(sense.definitions.is_empty());
    }

    /// Three readings of "turn off" whose definitions reach two, one and no
    /// senses of the database respectively.
    fn graded_catalog(a : &Analyzer<WordNet>) -> IdiomCatalog {
        let record = |definition : &str| IdiomRecord {
            name : "turn off".to_string(),
            definition : definition.to_string(),
            example : String::new(),
            kind : "separable [optional]".to_string()
        };
        let records = vec![record("release energy as radiation"),
                           record("use less energy"),
                           record("leave abruptly")];
        IdiomCatalog::from_records(&records, a).unwrap()
    }

    fn idiom_definitions(resolver : &SenseResolver<WordNet, Analyzer<WordNet>>) -> Vec<String> {
        resolver.resolve("turn the light off", "turn", 0).unwrap()
            .senses.idiom_sense.unwrap()
            .definitions.into_iter().map(|d| d.definition).collect()
    }

    #[test]
    fn idiom_senses_keep_catalog_order_unless_ranked() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(graded_catalog(&a)));
        assert_eq!(idiom_definitions(&resolver),
                   vec!["release energy as radiation", "use less energy", "leave abruptly"]);
    }

    #[test]
    fn idiom_senses_are_ranked_by_connectivity() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let config = ResolverConfig { rank_idiom_senses : true, ..ResolverConfig::default() };
        let resolver = SenseResolver::new(&wn, &a, Arc::new(graded_catalog(&a))).with_config(config);
        assert_eq!(idiom_definitions(&resolver),
                   vec!["leave abruptly", "use less energy", "release energy as radiation"]);

        let mut config = ResolverConfig { rank_idiom_senses : true, ..ResolverConfig::default() };
        config.ranker.order = SelectionOrder::HighestFirst;
        let resolver = SenseResolver::new(&wn, &a, Arc::new(graded_catalog(&a))).with_config(config);
        assert_eq!(idiom_definitions(&resolver),
                   vec!["release energy as radiation", "use less energy", "leave abruptly"]);
    }

    #[test]
    fn ranked_idiom_senses_are_truncated() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let config = ResolverConfig { rank_idiom_senses : true, top_n : 2, ..ResolverConfig::default() };
        let resolver = SenseResolver::new(&wn, &a, Arc::new(graded_catalog(&a))).with_config(config);
        assert_eq!(idiom_definitions(&resolver), vec!["leave abruptly", "use less energy"]);
    }

    #[test]
    fn batch_survives_bad_lines() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a)));
        let input = concat!(
            r#"{"sentence": "He woke up early", "word": "woke", "word_order": 0}"#, "\n",
            "{not json\n",
            "\n",
            r#"{"sentence": "I deposited money in the bank", "word": "bank"}"#, "\n");
        let mut output = Vec::new();
        let answered = resolver.resolve_batch(std::io::Cursor::new(input), &mut output).unwrap();
        assert_eq!(answered, 2);

        let lines : Vec<serde_json::Value> = String::from_utf8(output).unwrap().lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["word"], "wake");
        assert_eq!(lines[1]["line"], 2);
        assert!(lines[1]["error"].as_str().unwrap().contains("line 2"));
        assert_eq!(lines[2]["word"], "bank");
    }

    #[test]
    fn serializes_like_the_http_payload() {
        let wn = wordnet();
        let a = analyzer(&wn);
        let resolver = SenseResolver::new(&wn, &a, Arc::new(catalog(&a)));
        let r = resolver.resolve("I deposited money in the bank", "bank", 0).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["word"], "bank");
        assert!(v["senses"]["idiom_sense"].is_null());
        assert_eq!(v["senses"]["word_sense"]["category"], "Noun");
        assert!(v["senses"]["word_sense"]["definitions"].as_array().unwrap().len() == 2);
    }
}
