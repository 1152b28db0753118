use anyhow::{Context, Result};
use niffler::get_reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Opens an input file, transparently decompressing gzip, bzip2 or xz.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("No such file: {}", path.display()))?;
    let (reader, _compression) = get_reader(Box::new(BufReader::new(file)))
        .with_context(|| format!("Could not detect compression of {}", path.display()))?;
    Ok(reader)
}

pub fn read_to_string(path: &Path) -> Result<String> {
    let mut contents = String::new();
    open_input(path)?
        .read_to_string(&mut contents)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(contents)
}
