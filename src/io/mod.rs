//! Readers and writers for the file formats the scaffolder touches.

pub mod agp;
pub mod bed;
pub mod glm;
pub mod links;
pub mod ordering;
pub mod sizes;

use crate::error::{Result, ScaffoldError};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

/// Open a text file for reading, handles gzipped files automatically
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| ScaffoldError::io(e, path))?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| ScaffoldError::io(e, path))?;
    Ok(BufWriter::new(file))
}
