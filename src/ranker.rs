use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{RelationGraph, Vertex};
use crate::pos::Pos;
use crate::wordnet::LexicalDatabase;

/// Which end of the score ordering the top-N selection is taken from.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum SelectionOrder {
    /// Lowest scores first. This is what the resolver has always returned.
    LowestFirst,
    HighestFirst
}

impl SelectionOrder {
    fn compare(&self, a : f64, b : f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match *self {
            SelectionOrder::LowestFirst => ord,
            SelectionOrder::HighestFirst => ord.reverse()
        }
    }
}

impl Default for SelectionOrder {
    fn default() -> SelectionOrder { SelectionOrder::LowestFirst }
}

#[derive(Debug,Clone)]
pub struct RankerConfig {
    pub iterations : usize,
    pub damping : f64,
    pub order : SelectionOrder
}

impl Default for RankerConfig {
    fn default() -> RankerConfig {
        RankerConfig {
            iterations : 20,
            damping : 0.85,
            order : SelectionOrder::LowestFirst
        }
    }
}

/// Where the senses of interest come from.
#[derive(Debug,Clone,PartialEq)]
pub enum RankRoot {
    /// The neighbours of a vertex inside the graph.
    Anchored(Vertex),
    /// The database senses of a lemma.
    Lemma { lemma : String, pos : Option<Pos> }
}

pub struct Ranker<'a, D : LexicalDatabase + ?Sized> {
    db : &'a D,
    config : RankerConfig
}

impl<'a, D : LexicalDatabase + ?Sized> Ranker<'a, D> {
    pub fn new(db : &'a D, config : RankerConfig) -> Ranker<'a, D> {
        Ranker { db : db, config : config }
    }

    /// Random-walk importance of every vertex, indexed by vertex index.
    ///
    /// Each pass reads only the previous pass's scores.
    pub fn scores(&self, graph : &RelationGraph) -> Result<Vec<f64>> {
        if graph.is_empty() {
            return Err(Error::EmptyGraph);
        }
        if !graph.is_finalized() {
            return Err(Error::NotFinalized);
        }
        let n = graph.len();
        let teleport = self.config.damping / n as f64;
        let walk = 1.0 - self.config.damping;
        let mut current = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];
        for _ in 0..self.config.iterations {
            for v in 0..n {
                let mass : f64 = graph.neighbours(v).iter()
                    .map(|&j| graph.degree(j).map_or(0.0, |d| current[j] / d as f64))
                    .sum();
                next[v] = teleport + walk * mass;
            }
            std::mem::swap(&mut current, &mut next);
        }
        Ok(current)
    }

    /// The `top_n` senses of interest ordered by the configured selection order.
    pub fn rank(&self, graph : &RelationGraph, root : &RankRoot, top_n : usize) -> Result<Vec<Vertex>> {
        let senses : HashSet<Vertex> = match *root {
            RankRoot::Anchored(ref v) => {
                if !graph.contains(v) {
                    return Err(Error::UnknownRoot(format!("{:?}", v)));
                }
                graph.adjacent(v).into_iter().collect()
            },
            RankRoot::Lemma { ref lemma, pos } => self.db.senses_of(lemma, pos).into_iter()
                .map(Vertex::Sense)
                .collect()
        };
        let scores = self.scores(graph)?;

        let mut candidates : Vec<(f64, usize)> = (0..graph.len())
            .filter(|&i| senses.contains(&graph.vertex(i)))
            .map(|i| (scores[i], i))
            .collect();
        let order = self.config.order;
        candidates.sort_by(|a, b| order.compare(a.0, b.0).then(a.1.cmp(&b.1)));
        debug!(candidates = candidates.len(), "Ranked senses: {:?}", candidates);
        Ok(candidates.into_iter().take(top_n).map(|(_, i)| graph.vertex(i)).collect())
    }
}
