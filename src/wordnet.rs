use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::data;
use crate::error::{Error, Result};
use crate::pos::{Pos, ALL_POS};

/// Dense identifier of a synset within one loaded `WordNet`.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct SenseId(pub u32);

/// The lexical relations followed when expanding a relation graph.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Relation {
    MemberHolonym,
    MemberMeronym,
    Hypernym,
    Hyponym,
    PartHolonym,
    PartMeronym
}

pub static RELATIONS : [Relation; 6] = [
    Relation::MemberHolonym, Relation::MemberMeronym,
    Relation::Hypernym, Relation::Hyponym,
    Relation::PartHolonym, Relation::PartMeronym];

impl Relation {
    fn slot(&self) -> usize {
        match *self {
            Relation::MemberHolonym => 0,
            Relation::MemberMeronym => 1,
            Relation::Hypernym => 2,
            Relation::Hyponym => 3,
            Relation::PartHolonym => 4,
            Relation::PartMeronym => 5
        }
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s : &str) -> std::result::Result<Relation, String> {
        match s {
            "member_holonym" => Ok(Relation::MemberHolonym),
            "member_meronym" => Ok(Relation::MemberMeronym),
            "hypernym" => Ok(Relation::Hypernym),
            "hyponym" => Ok(Relation::Hyponym),
            "part_holonym" => Ok(Relation::PartHolonym),
            "part_meronym" => Ok(Relation::PartMeronym),
            _ => Err(s.to_string())
        }
    }
}

/// Read-only access to a lexical database of word senses.
pub trait LexicalDatabase {
    /// Ordered senses of a lemma; every part of speech when `pos` is `None`.
    fn senses_of(&self, lemma : &str, pos : Option<Pos>) -> Vec<SenseId>;

    fn related(&self, sense : SenseId, relation : Relation) -> &[SenseId];

    fn gloss(&self, sense : SenseId) -> &str;

    fn examples(&self, sense : SenseId) -> &[String];

    /// Candidate base forms of an inflected word that exist as lemmas.
    fn base_forms(&self, word : &str, pos : Pos) -> Vec<String>;
}

#[derive(Debug,Serialize,Deserialize)]
pub struct WordNetEntry {
    pos : String,
    lemmas : Vec<String>,
    defn : String,
    #[serde(default)]
    examples : Vec<String>,
    #[serde(default)]
    relations : BTreeMap<String, Vec<String>>
}

/// On-disk layout of the lexical database.
#[derive(Debug,Default,Serialize,Deserialize)]
pub struct WordNetData {
    synsets : BTreeMap<String, WordNetEntry>,
    #[serde(default)]
    index : BTreeMap<String, BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    exceptions : BTreeMap<String, HashMap<String, Vec<String>>>
}

#[derive(Debug)]
struct Synset {
    name : String,
    pos : Pos,
    lemmas : Vec<String>,
    defn : String,
    examples : Vec<String>,
    relations : [Vec<SenseId>; 6]
}

#[derive(Debug)]
pub struct WordNet {
    synsets : Vec<Synset>,
    by_name : HashMap<String, SenseId>,
    index : HashMap<(String, Pos), Vec<SenseId>>,
    exceptions : HashMap<Pos, HashMap<String, Vec<String>>>
}

/// Satellites share the adjective index.
fn index_pos(pos : Pos) -> Pos {
    match pos {
        Pos::AdjSat => Pos::Adj,
        p => p
    }
}

fn substitutions(pos : Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => &[("s", ""), ("ses", "s"), ("ves", "f"), ("xes", "x"), ("zes", "z"),
                       ("ches", "ch"), ("shes", "sh"), ("men", "man"), ("ies", "y")],
        Pos::Verb => &[("s", ""), ("ies", "y"), ("es", "e"), ("es", ""),
                       ("ed", "e"), ("ed", ""), ("ing", "e"), ("ing", "")],
        Pos::Adj | Pos::AdjSat => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        Pos::Adv => &[]
    }
}

impl WordNet {
    pub fn from_file<P : AsRef<Path>>(path : P) -> Result<WordNet> {
        let data : WordNetData = data::read_json(path.as_ref())?;
        let wn = WordNet::from_data(data)?;
        info!(synsets = wn.len(), lemmas = wn.index.len(), "Loaded WordNet from {}", path.as_ref().display());
        Ok(wn)
    }

    pub fn from_json(json : &str) -> Result<WordNet> {
        let data : WordNetData = serde_json::from_str(json)
            .map_err(|e| Error::Json { what: "WordNet".to_string(), source: e })?;
        WordNet::from_data(data)
    }

    pub fn from_data(data : WordNetData) -> Result<WordNet> {
        let mut by_name = HashMap::new();
        for (i, name) in data.synsets.keys().enumerate() {
            by_name.insert(name.clone(), SenseId(i as u32));
        }
        let lookup = |from : &str, to : &str| -> Result<SenseId> {
            by_name.get(to).cloned().ok_or_else(|| Error::DanglingRelation {
                from: from.to_string(),
                to: to.to_string()
            })
        };

        let mut synsets = Vec::with_capacity(data.synsets.len());
        for (name, entry) in data.synsets.iter() {
            let pos = entry.pos.parse::<Pos>()?;
            let mut relations : [Vec<SenseId>; 6] = Default::default();
            for (rel_name, targets) in entry.relations.iter() {
                // Other pointer types (antonyms, entailments...) are not followed
                let rel = match rel_name.parse::<Relation>() {
                    Ok(r) => r,
                    Err(_) => continue
                };
                for target in targets {
                    relations[rel.slot()].push(lookup(name, target)?);
                }
            }
            synsets.push(Synset {
                name : name.clone(),
                pos : pos,
                lemmas : entry.lemmas.iter().map(|l| l.to_lowercase()).collect(),
                defn : entry.defn.clone(),
                examples : entry.examples.clone(),
                relations : relations
            });
        }

        let mut index : HashMap<(String, Pos), Vec<SenseId>> = HashMap::new();
        if data.index.is_empty() {
            for (i, synset) in synsets.iter().enumerate() {
                for lemma in synset.lemmas.iter() {
                    let senses = index.entry((lemma.clone(), index_pos(synset.pos)))
                        .or_insert_with(Vec::new);
                    if !senses.contains(&SenseId(i as u32)) {
                        senses.push(SenseId(i as u32));
                    }
                }
            }
        } else {
            for (pos_code, lemmas) in data.index.iter() {
                let pos = index_pos(pos_code.parse::<Pos>()?);
                for (lemma, names) in lemmas.iter() {
                    let mut senses = Vec::new();
                    for name in names {
                        senses.push(lookup(lemma, name)?);
                    }
                    index.insert((lemma.to_lowercase(), pos), senses);
                }
            }
        }

        let mut exceptions = HashMap::new();
        for (pos_code, forms) in data.exceptions.into_iter() {
            let pos = index_pos(pos_code.parse::<Pos>()?);
            exceptions.insert(pos, forms);
        }

        Ok(WordNet {
            synsets : synsets,
            by_name : by_name,
            index : index,
            exceptions : exceptions
        })
    }

    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    pub fn id(&self, name : &str) -> Option<SenseId> {
        self.by_name.get(name).cloned()
    }

    pub fn name(&self, sense : SenseId) -> &str {
        &self.synsets[sense.0 as usize].name
    }

    fn has_lemma(&self, lemma : &str, pos : Pos) -> bool {
        self.index.contains_key(&(lemma.to_string(), index_pos(pos)))
    }

    /// Detaches inflectional suffixes until a known lemma is found, checking
    /// the exception lists first.
    fn morphy(&self, form : &str, pos : Pos) -> Vec<String> {
        let pos = index_pos(pos);
        let rules = substitutions(pos);
        let apply_rules = |forms : &[String]| -> Vec<String> {
            let mut out = Vec::new();
            for form in forms {
                for &(old, new) in rules {
                    if form.ends_with(old) {
                        out.push(format!("{}{}", &form[..form.len() - old.len()], new));
                    }
                }
            }
            out
        };
        let filter_forms = |forms : &[String]| -> Vec<String> {
            let mut seen = HashSet::new();
            let mut out = Vec::new();
            for form in forms {
                if self.has_lemma(form, pos) && seen.insert(form.clone()) {
                    out.push(form.clone());
                }
            }
            out
        };

        if let Some(bases) = self.exceptions.get(&pos).and_then(|e| e.get(form)) {
            let mut forms = vec![form.to_string()];
            forms.extend(bases.iter().cloned());
            return filter_forms(&forms);
        }

        let mut forms = apply_rules(&[form.to_string()]);
        let mut first = vec![form.to_string()];
        first.extend(forms.iter().cloned());
        let results = filter_forms(&first);
        if !results.is_empty() {
            return results;
        }
        while !forms.is_empty() {
            forms = apply_rules(&forms);
            let results = filter_forms(&forms);
            if !results.is_empty() {
                return results;
            }
        }
        Vec::new()
    }
}

impl LexicalDatabase for WordNet {
    fn senses_of(&self, lemma : &str, pos : Option<Pos>) -> Vec<SenseId> {
        let lemma = lemma.to_lowercase();
        match pos {
            Some(p) => self.index.get(&(lemma, index_pos(p))).cloned().unwrap_or_default(),
            None => {
                let mut senses = Vec::new();
                for p in ALL_POS.iter() {
                    if let Some(s) = self.index.get(&(lemma.clone(), *p)) {
                        senses.extend(s.iter().cloned());
                    }
                }
                senses
            }
        }
    }

    fn related(&self, sense : SenseId, relation : Relation) -> &[SenseId] {
        &self.synsets[sense.0 as usize].relations[relation.slot()]
    }

    fn gloss(&self, sense : SenseId) -> &str {
        &self.synsets[sense.0 as usize].defn
    }

    fn examples(&self, sense : SenseId) -> &[String] {
        &self.synsets[sense.0 as usize].examples
    }

    fn base_forms(&self, word : &str, pos : Pos) -> Vec<String> {
        self.morphy(&word.to_lowercase(), pos)
    }
}
