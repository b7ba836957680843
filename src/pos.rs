use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// WordNet part of speech.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
pub enum Pos {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "a")]
    Adj,
    #[serde(rename = "s")]
    AdjSat,
    #[serde(rename = "r")]
    Adv
}

/// Order in which senses are listed when no part of speech is given.
pub static ALL_POS : [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

impl Pos {
    pub fn code(&self) -> &'static str {
        match *self {
            Pos::Noun => "n",
            Pos::Verb => "v",
            Pos::Adj => "a",
            Pos::AdjSat => "s",
            Pos::Adv => "r"
        }
    }

    /// Maps a Penn Treebank tag onto WordNet, if WordNet covers it.
    pub fn from_penn(tag : &str) -> Option<Pos> {
        match tag {
            "NN" | "NNS" | "NNP" | "NNPS" => Some(Pos::Noun),
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => Some(Pos::Verb),
            "RB" | "RBR" | "RBS" => Some(Pos::Adv),
            "JJ" | "JJR" | "JJS" => Some(Pos::Adj),
            _ => None
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            Pos::Noun => "Noun",
            Pos::Verb => "Verb",
            Pos::Adj | Pos::AdjSat => "Adjective",
            Pos::Adv => "Adverb"
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Pos {
    type Err = Error;

    fn from_str(s : &str) -> Result<Pos, Error> {
        match s {
            "n" => Ok(Pos::Noun),
            "v" => Ok(Pos::Verb),
            "a" => Ok(Pos::Adj),
            "s" => Ok(Pos::AdjSat),
            "r" => Ok(Pos::Adv),
            _ => Err(Error::UnknownPos(s.to_string()))
        }
    }
}

/// Human readable category for a Penn tag outside WordNet's coverage.
pub fn penn_label(tag : &str) -> &'static str {
    let table = [("JJ", "Adjective"), ("RB", "Adverb"), ("CC", "Conjuction"),
                 ("DT", "Determiner"), ("UH", "Interjection"), ("NN", "Noun"),
                 ("CD", "Numeral"), ("IN", "Preposition"), ("PRP", "Pronoun"),
                 ("VB", "Verb")];
    table.iter()
        .find(|&&(prefix, _)| tag.starts_with(prefix))
        .map(|&(_, label)| label)
        .unwrap_or("Other")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penn_tags_map_to_wordnet() {
        assert_eq!(Pos::from_penn("VBD"), Some(Pos::Verb));
        assert_eq!(Pos::from_penn("NNS"), Some(Pos::Noun));
        assert_eq!(Pos::from_penn("JJR"), Some(Pos::Adj));
        assert_eq!(Pos::from_penn("RB"), Some(Pos::Adv));
        assert_eq!(Pos::from_penn("IN"), None);
        assert_eq!(Pos::from_penn("PRP$"), None);
    }

    #[test]
    fn labels() {
        assert_eq!(Pos::AdjSat.label(), "Adjective");
        assert_eq!(penn_label("PRP$"), "Pronoun");
        assert_eq!(penn_label("CD"), "Numeral");
        assert_eq!(penn_label("WDT"), "Other");
    }

    #[test]
    fn parses_codes() {
        assert_eq!("s".parse::<Pos>().unwrap(), Pos::AdjSat);
        assert!("x".parse::<Pos>().is_err());
    }
}
