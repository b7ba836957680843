use std::collections::{BTreeSet, HashMap};

use crate::error::{Error, Result};
use crate::wordnet::SenseId;

/// Synthetic vertices that anchor candidates inside a single graph.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum AuxVertex {
    Root,
    Tag(usize)
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Vertex {
    Sense(SenseId),
    Aux(AuxVertex)
}

impl From<SenseId> for Vertex {
    fn from(s : SenseId) -> Vertex { Vertex::Sense(s) }
}

impl From<AuxVertex> for Vertex {
    fn from(a : AuxVertex) -> Vertex { Vertex::Aux(a) }
}

/// Undirected relation graph. Vertices live in an arena indexed in insertion
/// order; adjacency is kept as ordered sets of arena indices.
#[derive(Debug,Clone,Default)]
pub struct RelationGraph {
    vertices : Vec<Vertex>,
    index : HashMap<Vertex, usize>,
    edges : Vec<BTreeSet<usize>>,
    degrees : Vec<usize>,
    finalized : bool
}

impl RelationGraph {
    pub fn new() -> RelationGraph {
        RelationGraph::default()
    }

    pub fn add_vertex(&mut self, v : Vertex) -> usize {
        if let Some(&i) = self.index.get(&v) {
            return i;
        }
        let i = self.vertices.len();
        self.vertices.push(v);
        self.index.insert(v, i);
        self.edges.push(BTreeSet::new());
        self.finalized = false;
        i
    }

    pub fn add_edge(&mut self, a : Vertex, b : Vertex) -> Result<()> {
        let i = self.index_of(&a).ok_or_else(|| Error::MissingVertex(format!("{:?}", a)))?;
        let j = self.index_of(&b).ok_or_else(|| Error::MissingVertex(format!("{:?}", b)))?;
        self.edges[i].insert(j);
        self.edges[j].insert(i);
        self.finalized = false;
        Ok(())
    }

    /// Unions the adjacency of every vertex of `other` into this graph.
    pub fn merge(&mut self, other : &RelationGraph) {
        for v in other.vertices.iter() {
            self.add_vertex(*v);
        }
        for (i, adjacent) in other.edges.iter().enumerate() {
            let here = self.index[&other.vertices[i]];
            for &j in adjacent {
                let there = self.index[&other.vertices[j]];
                self.edges[here].insert(there);
            }
        }
        self.finalized = false;
    }

    /// Recomputes the degree cache. Indices are arena positions and never
    /// move, so only degrees need refreshing.
    pub fn finalize(&mut self) {
        self.degrees = self.edges.iter().map(|e| e.len()).collect();
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, v : &Vertex) -> bool {
        self.index.contains_key(v)
    }

    pub fn index_of(&self, v : &Vertex) -> Option<usize> {
        self.index.get(v).cloned()
    }

    pub fn vertex(&self, i : usize) -> Vertex {
        self.vertices[i]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn neighbours(&self, i : usize) -> &BTreeSet<usize> {
        &self.edges[i]
    }

    pub fn adjacent(&self, v : &Vertex) -> Vec<Vertex> {
        match self.index_of(v) {
            Some(i) => self.edges[i].iter().map(|&j| self.vertices[j]).collect(),
            None => Vec::new()
        }
    }

    /// Cached degree, or `None` if the graph changed since `finalize`.
    pub fn degree(&self, i : usize) -> Option<usize> {
        if self.finalized {
            self.degrees.get(i).cloned()
        } else {
            None
        }
    }

    pub fn edge_count(&self) -> usize {
        let loops = self.edges.iter().enumerate().filter(|&(i, e)| e.contains(&i)).count();
        (self.edges.iter().map(|e| e.len()).sum::<usize>() + loops) / 2
    }

    pub fn has_edge(&self, a : &Vertex, b : &Vertex) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => self.edges[i].contains(&j),
            _ => false
        }
    }
}
