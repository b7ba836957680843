use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::error::Result;
use crate::graph::{RelationGraph, Vertex};
use crate::pos::Pos;
use crate::wordnet::{LexicalDatabase, SenseId, RELATIONS};

/// Relation expansion never goes past this depth, whatever depth it starts at.
pub const MAX_DEPTH : usize = 3;

/// Expands context lemmas into a relation graph over their senses.
pub struct GraphBuilder<'a, D : LexicalDatabase + ?Sized> {
    db : &'a D
}

impl<'a, D : LexicalDatabase + ?Sized> GraphBuilder<'a, D> {
    pub fn new(db : &'a D) -> GraphBuilder<'a, D> {
        GraphBuilder { db : db }
    }

    /// Builds the graph for `context`. When `root` is given it is added and
    /// wired to the first sense of every lemma. `depth` is the depth the
    /// candidate senses are expanded at.
    pub fn build(&self, context : &[(String, Option<Pos>)], root : Option<&Vertex>, depth : usize)
            -> Result<RelationGraph> {
        let mut graph = RelationGraph::new();
        if let Some(r) = root {
            graph.add_vertex(*r);
        }
        let mut expanded : HashMap<SenseId, usize> = HashMap::new();
        for &(ref lemma, pos) in context {
            let candidates = self.db.senses_of(lemma, pos);
            let primary = match candidates.first() {
                Some(&s) => Vertex::Sense(s),
                None => continue
            };
            graph.add_vertex(primary);
            if let Some(r) = root {
                graph.add_edge(*r, primary)?;
            }
            for &sense in candidates.iter() {
                graph.add_vertex(Vertex::Sense(sense));
                graph.add_edge(primary, Vertex::Sense(sense))?;
                self.expand(&mut graph, sense, depth, &mut expanded)?;
            }
        }
        debug!(vertices = graph.len(), edges = graph.edge_count(), "Built relation graph");
        Ok(graph)
    }

    /// Breadth-first expansion over the lexical relations of `start`. A sense
    /// already expanded at a depth no greater than the current one is skipped,
    /// since that expansion reached at least as far.
    fn expand(&self, graph : &mut RelationGraph, start : SenseId, depth : usize,
              expanded : &mut HashMap<SenseId, usize>) -> Result<()> {
        let mut queue = VecDeque::new();
        queue.push_back((start, depth));
        while let Some((sense, d)) = queue.pop_front() {
            if expanded.get(&sense).map_or(false, |&seen| seen <= d) {
                continue;
            }
            expanded.insert(sense, d);
            for relation in RELATIONS.iter() {
                for &other in self.db.related(sense, *relation) {
                    graph.add_vertex(Vertex::Sense(other));
                    graph.add_edge(Vertex::Sense(sense), Vertex::Sense(other))?;
                    if d < MAX_DEPTH {
                        queue.push_back((other, d + 1));
                    }
                }
            }
        }
        Ok(())
    }
}
