use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Pattern words that stand for any word of the sentence.
static WILDCARDS : [&str; 5] = ["you", "your", "someone", "something", "somebody"];

/// Smallest and largest distance between the two anchors of a separated idiom.
const MIN_GAP : usize = 2;
const MAX_GAP : usize = 7;

/// How the words of an idiom may be laid out in a sentence.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Shape {
    Inseparable,
    Intransitive,
    SeparableOptional,
    SeparableObligatory
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s : &str) -> Result<Shape, String> {
        match s.trim() {
            "inseparable" => Ok(Shape::Inseparable),
            "intransitive" => Ok(Shape::Intransitive),
            "separable [optional]" => Ok(Shape::SeparableOptional),
            "separable [obligatory]" => Ok(Shape::SeparableObligatory),
            other => Err(other.to_string())
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            Shape::Inseparable => "inseparable",
            Shape::Intransitive => "intransitive",
            Shape::SeparableOptional => "separable [optional]",
            Shape::SeparableObligatory => "separable [obligatory]"
        };
        write!(f, "{}", s)
    }
}

/// One lemmatized sentence token together with its Penn tag.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct SentenceToken {
    pub lemma : String,
    pub tag : String
}

impl SentenceToken {
    pub fn new(lemma : &str, tag : &str) -> SentenceToken {
        SentenceToken { lemma : lemma.to_string(), tag : tag.to_string() }
    }
}

/// The token positions an idiom occupies in a sentence, in order. For a
/// separated idiom the object between the two anchors is not part of it.
#[derive(Debug,Clone,PartialEq,Eq,Hash)]
pub struct MatchSpan(pub Vec<usize>);

impl MatchSpan {
    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn start(&self) -> usize {
        self.0.first().cloned().unwrap_or(0)
    }

    pub fn contains(&self, i : usize) -> bool {
        self.0.contains(&i)
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct IdiomPattern {
    pub name : String,
    pub lemmas : Vec<String>,
    pub definition : String,
    pub example : String,
    pub shape : Shape
}

impl IdiomPattern {
    pub fn new(name : &str, lemmas : Vec<String>, definition : &str, example : &str, kind : &str)
            -> Result<IdiomPattern, Error> {
        let shape = kind.parse::<Shape>().map_err(|k| Error::UnknownIdiomKind {
            name : name.to_string(),
            kind : k
        })?;
        Ok(IdiomPattern {
            name : name.to_string(),
            lemmas : lemmas,
            definition : definition.to_string(),
            example : example.to_string(),
            shape : shape
        })
    }

    /// Finds the first occurrence of this idiom in the sentence. Later
    /// occurrences are never reported, so a token inside a second occurrence
    /// is not covered by this idiom.
    pub fn find(&self, sentence : &[SentenceToken]) -> Option<MatchSpan> {
        if self.lemmas.is_empty() {
            return None;
        }
        let anchors = match self.shape {
            Shape::Inseparable | Shape::Intransitive => self.find_inseparable(sentence),
            Shape::SeparableOptional => self.find_inseparable(sentence)
                .or_else(|| self.find_separable(sentence)),
            Shape::SeparableObligatory => self.find_separable(sentence)
        };
        anchors.map(|(first, second)| self.span(first, second))
    }

    /// Expands a pair of anchors to every occupied position.
    pub fn span(&self, first : usize, second : usize) -> MatchSpan {
        let n = self.lemmas.len();
        if first == second {
            MatchSpan((first..first + n).collect())
        } else {
            let mut positions = vec![first];
            positions.extend(second..second + n - 1);
            MatchSpan(positions)
        }
    }

    fn find_inseparable(&self, sentence : &[SentenceToken]) -> Option<(usize, usize)> {
        let n = self.lemmas.len();
        let starts = sentence.iter().enumerate()
            .filter(|&(_, t)| t.lemma == self.lemmas[0])
            .map(|(i, _)| i);
        for start in starts {
            if start + n > sentence.len() {
                return None;
            }
            let matched = self.lemmas.iter().zip(&sentence[start..start + n])
                .all(|(p, t)| WILDCARDS.contains(&p.as_str()) || *p == t.lemma);
            if matched {
                return Some((start, start));
            }
        }
        None
    }

    fn find_separable(&self, sentence : &[SentenceToken]) -> Option<(usize, usize)> {
        if self.lemmas.len() < 2 {
            return None;
        }
        let position = |lemma : &str, from : usize| {
            sentence.iter().skip(from).position(|t| t.lemma == lemma).map(|i| i + from)
        };
        let mut from = 0;
        while let Some(first) = position(self.lemmas[0].as_str(), from) {
            from = first + 1;
            let second = position(self.lemmas[1].as_str(), first + 1)?;
            let gap = second - first;
            if gap < MIN_GAP || gap > MAX_GAP {
                continue;
            }
            let tail_aligned = self.lemmas[2..].iter().enumerate()
                .all(|(i, p)| sentence.get(second + 1 + i).map_or(false, |t| t.lemma == *p));
            if !tail_aligned {
                continue;
            }
            let verb_between = sentence[first + 1..second].iter()
                .any(|t| t.tag.starts_with("VB") || t.tag.starts_with('R'));
            if !verb_between {
                return Some((first, second));
            }
        }
        None
    }
}

impl fmt::Display for IdiomPattern {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Idiom: {}: {}: {}>", self.name, self.definition, self.shape)
    }
}
