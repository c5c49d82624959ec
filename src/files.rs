//! File adapter used by the `encode` and `decode` binaries: reads text from
//! disk, hands it to the core, writes the results next to each other.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{HuffmanError, Result};
use crate::key::{clean_payload, table_from_json, table_to_json};
use crate::{Compressed, compress, decompress};

pub const PAYLOAD_SUFFIX: &str = ".bin";
pub const KEY_SUFFIX: &str = "-key.txt";
pub const DECOMPRESSED_SUFFIX: &str = "-decompressed.txt";

/// Output paths derived from a source file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub base: String,
    pub dir: PathBuf,
}

impl OutputNames {
    /// `base` is the file name up to its first `.`; outputs go to `out_dir`
    /// or, if absent, the source's directory.
    pub fn new(source: &Path, out_dir: Option<&Path>) -> Result<Self> {
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                HuffmanError::MissingInput(format!("no file name in {}", source.display()))
            })?;
        let base = file_name.split('.').next().unwrap_or_default();
        if base.is_empty() {
            return Err(HuffmanError::MissingInput(format!(
                "cannot derive an output name from {}",
                source.display()
            )));
        }

        let dir = match out_dir {
            Some(dir) => dir.to_path_buf(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        Ok(OutputNames {
            base: base.to_string(),
            dir,
        })
    }

    pub fn payload(&self) -> PathBuf {
        self.dir.join(format!("{}{}", self.base, PAYLOAD_SUFFIX))
    }

    pub fn key(&self) -> PathBuf {
        self.dir.join(format!("{}{}", self.base, KEY_SUFFIX))
    }

    pub fn decompressed(&self) -> PathBuf {
        self.dir.join(format!("{}{}", self.base, DECOMPRESSED_SUFFIX))
    }
}

fn read_required(path: &Path, what: &str) -> Result<String> {
    if !path.is_file() {
        return Err(HuffmanError::MissingInput(format!(
            "{} file {} does not exist",
            what,
            path.display()
        )));
    }
    info!("Reading {} file: {}", what, path.display());
    Ok(fs::read_to_string(path)?)
}

/// Refuses to write `output` when it resolves to one of `inputs`.
fn ensure_distinct(output: &Path, inputs: &[&Path]) -> Result<()> {
    let Ok(resolved) = fs::canonicalize(output) else {
        // not there yet, so it cannot be an existing input
        return Ok(());
    };
    for input in inputs {
        if fs::canonicalize(input).is_ok_and(|i| i == resolved) {
            return Err(HuffmanError::OutputCollision {
                output: output.display().to_string(),
                input: input.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Writes the payload, then the key. A payload is never left behind without
/// its key.
fn write_outputs(names: &OutputNames, compressed: &Compressed) -> Result<()> {
    let payload = names.payload();
    fs::write(&payload, &compressed.payload)?;
    if let Err(e) = fs::write(names.key(), table_to_json(&compressed.table)) {
        if let Err(cleanup) = fs::remove_file(&payload) {
            warn!("Could not remove {}: {}", payload.display(), cleanup);
        }
        return Err(e.into());
    }
    Ok(())
}

/// Compresses `input`, writing the payload and key files. Returns the result
/// alongside the names written.
pub fn compress_file(input: &Path, out_dir: Option<&Path>) -> Result<(Compressed, OutputNames)> {
    let names = OutputNames::new(input, out_dir)?;
    let text = read_required(input, "input")?;
    ensure_distinct(&names.payload(), &[input])?;
    ensure_distinct(&names.key(), &[input])?;
    let compressed = compress(&text)?;

    write_outputs(&names, &compressed)?;
    debug!(
        "Wrote {} and {}",
        names.payload().display(),
        names.key().display()
    );
    Ok((compressed, names))
}

/// Decodes `payload` with `key`, writing the decompressed text. Output is
/// named after the payload file.
pub fn decompress_files(payload: &Path, key: &Path, out_dir: Option<&Path>) -> Result<PathBuf> {
    let names = OutputNames::new(payload, out_dir)?;
    let digits = read_required(payload, "payload")?;
    let table = table_from_json(&read_required(key, "key")?)?;

    let text = decompress(clean_payload(&digits), &table)?;
    let output = names.decompressed();
    ensure_distinct(&output, &[payload, key])?;
    fs::write(&output, text)?;
    debug!("Wrote {}", output.display());
    Ok(output)
}
