//! Tokenization, part-of-speech tagging and lemmatization.
//!
//! The resolver only depends on the [`Preprocessor`] trait. [`Analyzer`] is a
//! small deterministic implementation: a regex tokenizer, a Penn Treebank
//! tagger driven by a tag lexicon with suffix heuristics for unseen words,
//! and a lemmatizer built on the lexical database's base forms.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use tracing::info;

use crate::data;
use crate::error::Result;
use crate::pos::Pos;
use crate::wordnet::LexicalDatabase;

pub trait Preprocessor {
    fn tokenize(&self, text : &str) -> Vec<String>;

    fn tag(&self, tokens : &[String]) -> Vec<(String, String)>;

    fn lemmatize(&self, token : &str, tag : &str) -> String;
}

#[derive(Debug,Clone,PartialEq,Eq)]
pub struct TaggedToken {
    pub text : String,
    pub tag : String,
    pub lemma : String
}

impl TaggedToken {
    pub fn pos(&self) -> Option<Pos> {
        Pos::from_penn(&self.tag)
    }
}

/// Tokenizes, tags and lemmatizes a text.
pub fn analyze<P : Preprocessor + ?Sized>(pre : &P, text : &str) -> Vec<TaggedToken> {
    let tokens = pre.tokenize(text);
    pre.tag(&tokens).into_iter()
        .map(|(text, tag)| {
            let lemma = pre.lemmatize(&text, &tag);
            TaggedToken { text : text, tag : tag, lemma : lemma }
        })
        .collect()
}

/// Position of the `order`-th (zero based) occurrence of `word`.
pub fn occurrence(tokens : &[TaggedToken], word : &str, order : usize) -> Option<usize> {
    tokens.iter().enumerate()
        .filter(|&(_, t)| t.text == word)
        .map(|(i, _)| i)
        .nth(order)
}

pub fn is_punctuation(token : &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_punctuation())
}

/// The distinct (lemma, part of speech) pairs of the content words of a
/// sentence, in sentence order. Occurrences of `keep` are included even when
/// they are stop words.
pub fn context_lemmas(tokens : &[TaggedToken], keep : Option<&str>) -> Vec<(String, Option<Pos>)> {
    let stop = stop_words();
    let mut seen = HashSet::new();
    let mut lemmas = Vec::new();
    for token in tokens {
        let content = !(is_punctuation(&token.text) || stop.contains(token.text.as_str()));
        if content || keep == Some(token.text.as_str()) {
            let pair = (token.lemma.clone(), token.pos());
            if seen.insert(pair.clone()) {
                lemmas.push(pair);
            }
        }
    }
    lemmas
}

/// English stop words.
pub fn stop_words() -> HashSet<&'static str> {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves",
        "you", "you're", "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves",
        "he", "him", "his", "himself", "she", "she's", "her", "hers", "herself",
        "it", "it's", "its", "itself", "they", "them", "their", "theirs", "themselves",
        "what", "which", "who", "whom", "this", "that", "that'll", "these", "those",
        "am", "is", "are", "was", "were", "be", "been", "being",
        "have", "has", "had", "having", "do", "does", "did", "doing",
        "a", "an", "the", "and", "but", "if", "or", "because", "as", "until", "while",
        "of", "at", "by", "for", "with", "about", "against", "between", "into", "through",
        "during", "before", "after", "above", "below", "to", "from", "up", "down", "in",
        "out", "on", "off", "over", "under", "again", "further", "then", "once",
        "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
        "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
        "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
        "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y",
        "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't",
        "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma",
        "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
        "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
        "wouldn", "wouldn't",
    ]
    .iter()
    .cloned()
    .collect()
}

static CLOSED_CLASS : &[(&str, &str)] = &[
    ("a", "DT"), ("an", "DT"), ("the", "DT"), ("this", "DT"), ("that", "DT"),
    ("these", "DT"), ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"),
    ("any", "DT"), ("no", "DT"), ("all", "DT"), ("both", "DT"), ("another", "DT"),
    ("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"),
    ("we", "PRP"), ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("us", "PRP"),
    ("them", "PRP"), ("myself", "PRP"), ("yourself", "PRP"), ("himself", "PRP"),
    ("herself", "PRP"), ("itself", "PRP"), ("themselves", "PRP"),
    ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("her", "PRP$"), ("its", "PRP$"),
    ("our", "PRP$"), ("their", "PRP$"),
    ("someone", "NN"), ("somebody", "NN"), ("something", "NN"), ("anyone", "NN"),
    ("anything", "NN"), ("nothing", "NN"), ("everyone", "NN"), ("everything", "NN"),
    ("and", "CC"), ("or", "CC"), ("but", "CC"), ("nor", "CC"),
    ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"), ("for", "IN"),
    ("with", "IN"), ("from", "IN"), ("into", "IN"), ("about", "IN"), ("as", "IN"),
    ("if", "IN"), ("because", "IN"), ("than", "IN"), ("through", "IN"), ("over", "IN"),
    ("under", "IN"), ("between", "IN"), ("after", "IN"), ("before", "IN"), ("during", "IN"),
    ("while", "IN"), ("until", "IN"), ("against", "IN"), ("without", "IN"),
    ("to", "TO"), ("up", "RP"), ("off", "RP"), ("out", "RP"), ("down", "RP"), ("away", "RP"),
    ("is", "VBZ"), ("are", "VBP"), ("am", "VBP"), ("was", "VBD"), ("were", "VBD"),
    ("be", "VB"), ("been", "VBN"), ("being", "VBG"), ("has", "VBZ"), ("have", "VBP"),
    ("had", "VBD"), ("do", "VBP"), ("does", "VBZ"), ("did", "VBD"),
    ("can", "MD"), ("could", "MD"), ("will", "MD"), ("would", "MD"), ("shall", "MD"),
    ("should", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"),
    ("not", "RB"), ("n't", "RB"), ("very", "RB"), ("too", "RB"), ("also", "RB"),
    ("just", "RB"), ("maybe", "RB"), ("soon", "RB"), ("now", "RB"), ("then", "RB"),
    ("here", "RB"), ("there", "EX"), ("so", "RB"), ("again", "RB"),
    ("what", "WP"), ("who", "WP"), ("whom", "WP"), ("which", "WDT"), ("when", "WRB"),
    ("where", "WRB"), ("why", "WRB"), ("how", "WRB"),
    ("'s", "VBZ"), ("'re", "VBP"), ("'ve", "VBP"), ("'m", "VBP"), ("'ll", "MD"), ("'d", "MD"),
    ("oh", "UH"), ("yes", "UH"), ("hello", "UH"), ("wow", "UH"),
];

/// Word → Penn tag table consulted before any heuristic.
#[derive(Debug,Clone,Default,Serialize,Deserialize)]
pub struct TagLexicon(HashMap<String, String>);

impl TagLexicon {
    pub fn from_file<P : AsRef<Path>>(path : P) -> Result<TagLexicon> {
        let lexicon : TagLexicon = data::read_json(path.as_ref())?;
        info!(entries = lexicon.0.len(), "Loaded tag lexicon from {}", path.as_ref().display());
        Ok(lexicon)
    }

    pub fn insert(&mut self, word : &str, tag : &str) {
        self.0.insert(word.to_string(), tag.to_string());
    }

    pub fn get(&self, word : &str) -> Option<&str> {
        self.0.get(word).map(|s| s.as_str())
    }
}

pub struct Analyzer<'a, D : LexicalDatabase> {
    db : &'a D,
    lexicon : TagLexicon,
    closed : HashMap<&'static str, &'static str>,
    word_regex : Regex
}

impl<'a, D : LexicalDatabase> Analyzer<'a, D> {
    pub fn new(db : &'a D, lexicon : TagLexicon) -> Analyzer<'a, D> {
        Analyzer {
            db : db,
            lexicon : lexicon,
            closed : CLOSED_CLASS.iter().cloned().collect(),
            word_regex : Regex::new(r"\w+(?:[-'’]\w+)*|[^\w\s]")
                .expect("Token regex did not compile")
        }
    }

    fn guess_tag(&self, word : &str, previous : Option<&str>) -> String {
        if is_punctuation(word) {
            return match word {
                "." | "!" | "?" => ".",
                "," => ",",
                "(" => "(",
                ")" => ")",
                _ => ":"
            }.to_string();
        }
        if word.chars().next().map_or(false, |c| c.is_ascii_digit()) {
            return "CD".to_string();
        }
        let is = |pos : Pos| !self.db.base_forms(word, pos).is_empty();
        if previous == Some("TO") || previous == Some("MD") {
            if is(Pos::Verb) {
                return "VB".to_string();
            }
        }
        let n = word.chars().count();
        let tag = if n > 4 && word.ends_with("ing") {
            "VBG"
        } else if n > 3 && word.ends_with("ed") {
            "VBD"
        } else if n > 3 && word.ends_with("ly") {
            "RB"
        } else if n > 4 && word.ends_with("est") && is(Pos::Adj) {
            "JJS"
        } else if n > 3 && word.ends_with('s') && !word.ends_with("ss") && is(Pos::Noun) {
            "NNS"
        } else if is(Pos::Noun) {
            "NN"
        } else if is(Pos::Verb) {
            "VB"
        } else if is(Pos::Adj) {
            "JJ"
        } else if is(Pos::Adv) {
            "RB"
        } else {
            "NN"
        };
        tag.to_string()
    }
}

impl<'a, D : LexicalDatabase> Preprocessor for Analyzer<'a, D> {
    fn tokenize(&self, text : &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for m in self.word_regex.find_iter(text) {
            let word = m.as_str().replace('’', "'");
            if word.ends_with("n't") && word.len() > 3 {
                tokens.push(word[..word.len() - 3].to_string());
                tokens.push("n't".to_string());
            } else if let Some(i) = word.rfind('\'') {
                if i > 0 {
                    tokens.push(word[..i].to_string());
                }
                tokens.push(word[i..].to_string());
            } else {
                tokens.push(word);
            }
        }
        tokens
    }

    fn tag(&self, tokens : &[String]) -> Vec<(String, String)> {
        let mut tagged : Vec<(String, String)> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let tag = match self.lexicon.get(token).or_else(|| self.closed.get(token.as_str()).cloned()) {
                Some(t) => t.to_string(),
                None => {
                    let previous = tagged.last().map(|&(_, ref t)| t.as_str());
                    self.guess_tag(token, previous)
                }
            };
            tagged.push((token.clone(), tag));
        }
        tagged
    }

    fn lemmatize(&self, token : &str, tag : &str) -> String {
        let candidates = Pos::from_penn(tag)
            .map(|pos| self.db.base_forms(token, pos))
            .unwrap_or_default();
        let lemma = if candidates.len() == 1 {
            candidates[0].clone()
        } else {
            let changed = match tag {
                "VB" | "VBD" | "VBN" => candidates.iter().find(|w| *w != token).cloned(),
                _ => None
            };
            match changed {
                Some(w) => w,
                None => self.db.base_forms(token, Pos::Noun).into_iter()
                    .min_by_key(|w| w.len())
                    .unwrap_or_else(|| token.to_string())
            }
        };
        lemma.trim_matches(|c| c == '-' || c == '–').to_string()
    }
}
