use std::io;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not open {path}: {source}")]
    Io {
        path : String,
        #[source]
        source : io::Error
    },

    #[error("Could not parse {what}: {source}")]
    Json {
        what : String,
        #[source]
        source : serde_json::Error
    },

    #[error("Bad part of speech `{0}`")]
    UnknownPos(String),

    #[error("Synset {from} points to unknown synset {to}")]
    DanglingRelation {
        from : String,
        to : String
    },

    #[error("Idiom `{name}` has unknown kind `{kind}`")]
    UnknownIdiomKind {
        name : String,
        kind : String
    },

    #[error("Vertex {0} is not in the graph")]
    MissingVertex(String),

    #[error("Cannot rank an empty graph")]
    EmptyGraph,

    #[error("Graph changed since it was last finalized")]
    NotFinalized,

    #[error("Root vertex {0} is not in the graph")]
    UnknownRoot(String),

    #[error("Dictionary lookup failed for `{word}`: {msg}")]
    Lookup {
        word : String,
        msg : String
    }
}
