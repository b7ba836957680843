use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bzip2::read::BzDecoder;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Opens a data file, decompressing it on the fly if it ends in `.bz2`.
pub fn open(path : &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)
        .map_err(|e| Error::Io { path: path.display().to_string(), source: e })?;
    let compressed = path.extension().map_or(false, |ext| ext == "bz2");
    if compressed {
        Ok(Box::new(BufReader::new(BzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads a JSON document from a (possibly compressed) file.
pub fn read_json<T : DeserializeOwned>(path : &Path) -> Result<T> {
    let reader = open(path)?;
    serde_json::from_reader(reader)
        .map_err(|e| Error::Json { what: path.display().to_string(), source: e })
}
