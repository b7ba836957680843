use crate::catalog::{IdiomCatalog, IdiomRecord};
use crate::preprocess::{Analyzer, TagLexicon};
use crate::wordnet::WordNet;

pub const WORDNET_JSON : &str = r#"{
  "synsets": {
    "light.n.01": {"pos": "n", "lemmas": ["light", "visible_light"],
                   "defn": "electromagnetic radiation that can produce a visual sensation",
                   "examples": ["the light was bright"],
                   "relations": {"hypernym": ["radiation.n.01"]}},
    "light.n.02": {"pos": "n", "lemmas": ["light", "light_source"],
                   "defn": "any device serving as a source of illumination",
                   "examples": ["he stopped the car and turned off the lights"],
                   "relations": {"hypernym": ["source.n.01"], "hyponym": ["lamp.n.01"]}},
    "light.v.01": {"pos": "v", "lemmas": ["light", "illume"],
                   "defn": "make lighter or brighter",
                   "examples": ["this lamp lightens the room"]},
    "light.a.01": {"pos": "a", "lemmas": ["light"],
                   "defn": "of comparatively little physical weight or density"},
    "radiation.n.01": {"pos": "n", "lemmas": ["radiation"],
                       "defn": "energy that is radiated or transmitted in the form of rays",
                       "relations": {"hypernym": ["energy.n.01"]}},
    "energy.n.01": {"pos": "n", "lemmas": ["energy"],
                    "defn": "the capacity of a physical system to do work"},
    "source.n.01": {"pos": "n", "lemmas": ["source"],
                    "defn": "a device that provides a quantity of something",
                    "relations": {"hyponym": ["lamp.n.01"]}},
    "lamp.n.01": {"pos": "n", "lemmas": ["lamp"],
                  "defn": "an artificial source of visible illumination",
                  "relations": {"hypernym": ["source.n.01"], "antonym": ["source.n.01"]}},
    "bank.n.01": {"pos": "n", "lemmas": ["bank"],
                  "defn": "sloping land beside a body of water",
                  "examples": ["they pulled the canoe up on the bank"],
                  "relations": {"hypernym": ["slope.n.01"]}},
    "bank.n.02": {"pos": "n", "lemmas": ["bank", "depository_financial_institution"],
                  "defn": "a financial institution that accepts deposits",
                  "examples": ["he cashed a check at the bank"],
                  "relations": {"hypernym": ["institution.n.01"]}},
    "slope.n.01": {"pos": "n", "lemmas": ["slope", "incline"],
                   "defn": "an elevated geological formation"},
    "institution.n.01": {"pos": "n", "lemmas": ["institution"],
                         "defn": "an organization founded for a specific purpose"},
    "money.n.01": {"pos": "n", "lemmas": ["money"],
                   "defn": "the most common medium of exchange",
                   "examples": ["he deposited money in the bank"]},
    "deposit.v.01": {"pos": "v", "lemmas": ["deposit"],
                     "defn": "put into a bank account"},
    "turn.v.01": {"pos": "v", "lemmas": ["turn"],
                  "defn": "change orientation or direction"},
    "wake.v.01": {"pos": "v", "lemmas": ["wake", "wake_up"],
                  "defn": "stop sleeping",
                  "examples": ["she woke up every morning at 7 AM"]},
    "early.r.01": {"pos": "r", "lemmas": ["early"],
                   "defn": "at or near the beginning of a period of time"},
    "give.v.01": {"pos": "v", "lemmas": ["give"],
                  "defn": "transfer possession of something concrete or abstract to somebody"},
    "hand.n.01": {"pos": "n", "lemmas": ["hand"],
                  "defn": "the prehensile extremity of the superior limb",
                  "relations": {"part_holonym": ["arm.n.01"]}},
    "arm.n.01": {"pos": "n", "lemmas": ["arm"],
                 "defn": "a human limb",
                 "relations": {"part_meronym": ["hand.n.01"]}}
  },
  "exceptions": {"v": {"woke": ["wake"], "gave": ["give"]}}
}"#;

pub fn wordnet() -> WordNet {
    WordNet::from_json(WORDNET_JSON).expect("test WordNet is valid")
}

pub fn analyzer(wn : &WordNet) -> Analyzer<WordNet> {
    let mut lexicon = TagLexicon::default();
    lexicon.insert("woke", "VBD");
    lexicon.insert("went", "VBD");
    Analyzer::new(wn, lexicon)
}

pub fn idiom_records() -> Vec<IdiomRecord> {
    let record = |name : &str, definition : &str, example : &str, kind : &str| IdiomRecord {
        name : name.to_string(),
        definition : definition.to_string(),
        example : example.to_string(),
        kind : kind.to_string()
    };
    vec![
        record("wake up", "stop sleeping", "she woke up early", "intransitive"),
        record("turn off", "cause to stop operating by turning a switch",
               "turn off the stereo", "separable [optional]"),
        record("turn off", "cause to lose interest", "the speech turned me off",
               "separable [obligatory]"),
        record("give someone a hand", "help someone", "can you give me a hand", "inseparable"),
    ]
}

pub fn catalog(analyzer : &Analyzer<WordNet>) -> IdiomCatalog {
    IdiomCatalog::from_records(&idiom_records(), analyzer).expect("test idioms are valid")
}
