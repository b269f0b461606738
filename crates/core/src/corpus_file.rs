//! File-backed JSONL level corpus with a SHA-256 hash chain.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version`, `build_id`, `seed`, `target_count`.
//! - Lines 2+: one record per level in corpus order, each carrying a SHA-256
//!   hash chain (`prev_sha256_hex`, `sha256_hex`) for corruption detection.
//!
//! Writing flushes each record immediately so a partial run still leaves a
//! loadable prefix. Loading validates every line's JSON shape, index
//! sequence, and SHA-256 chain, stopping at the first bad line.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// File format structs
// ---------------------------------------------------------------------------

/// First line of the JSONL corpus file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    build_id: String,
    seed: u64,
    target_count: u64,
}

/// Fields used to compute the canonical SHA-256 for a record.
/// Serialized to JSON as the hash input (concatenated with `prev_sha256_hex`).
#[derive(Serialize)]
struct RecordBody<'a> {
    index: u64,
    level: &'a str,
}

/// Full record line written to the JSONL file.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    index: u64,
    level: String,
    prev_sha256_hex: String,
    sha256_hex: String,
}

// ---------------------------------------------------------------------------
// SHA-256 helpers
// ---------------------------------------------------------------------------

/// The initial previous-hash used for the first record in a chain.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Compute `hex(SHA-256(body_json || prev_sha256_hex))`.
fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    let result = hasher.finalize();
    format!("{result:064x}")
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Appends levels to a JSONL corpus file with a SHA-256 hash chain.
pub struct CorpusWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_index: u64,
}

impl CorpusWriter {
    /// Create a new corpus file, writing the header line immediately.
    pub fn create(path: &Path, seed: u64, build_id: &str, target_count: u64) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let header = FileHeader {
            format_version: 1,
            build_id: build_id.to_string(),
            seed,
            target_count,
        };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_index: 0 })
    }

    /// Resume appending to an existing corpus after loading it.
    /// `last_sha256_hex` and `next_index` come from `LoadedCorpus`.
    pub fn resume(path: &Path, last_sha256_hex: String, next_index: u64) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        let writer = BufWriter::new(file);
        Ok(Self { writer, last_sha256_hex, next_index })
    }

    /// Append one level and flush immediately.
    pub fn append(&mut self, level: &str) -> io::Result<()> {
        let body = RecordBody { index: self.next_index, level };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &self.last_sha256_hex);

        let record = FileRecord {
            index: self.next_index,
            level: level.to_string(),
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };

        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{record_json}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_index += 1;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Successfully loaded corpus with metadata needed for resuming appends.
#[derive(Debug)]
pub struct LoadedCorpus {
    pub levels: Vec<String>,
    pub seed: u64,
    pub build_id: String,
    pub target_count: u64,
    /// SHA-256 hex of the last valid record (or the initial hash if empty).
    pub last_sha256_hex: String,
    /// Index for the next record to be appended.
    pub next_index: u64,
}

/// Describes why a corpus file could not be fully loaded.
#[derive(Debug)]
pub enum CorpusFileError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The file contains no lines at all.
    EmptyFile,
    /// The header line could not be parsed as valid JSON.
    InvalidHeader { line: usize, message: String },
    /// A record line could not be parsed or its fields are inconsistent.
    InvalidRecord { line: usize, message: String },
    /// A line is incomplete (for example, file ended without trailing newline).
    IncompleteLine { line: usize },
    /// The SHA-256 chain is broken (prev hash mismatch or recomputed hash
    /// does not match stored hash).
    HashChainBroken { line: usize },
}

impl fmt::Display for CorpusFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "corpus I/O error: {e}"),
            Self::EmptyFile => write!(f, "corpus file is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid corpus header at line {line}: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid corpus record at line {line}: {message}")
            }
            Self::IncompleteLine { line } => {
                write!(f, "incomplete corpus line at line {line}")
            }
            Self::HashChainBroken { line } => {
                write!(f, "SHA-256 hash chain broken at line {line}")
            }
        }
    }
}

/// Load and validate a JSONL corpus file.
///
/// Returns the ordered levels plus metadata for resuming appends. Stops at
/// the first invalid, incomplete, or hash-broken line and returns an error
/// describing the problem.
pub fn load_corpus_from_file(path: &Path) -> Result<LoadedCorpus, CorpusFileError> {
    let content = fs::read_to_string(path).map_err(CorpusFileError::Io)?;
    if content.is_empty() {
        return Err(CorpusFileError::EmptyFile);
    }
    let has_trailing_newline = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(CorpusFileError::EmptyFile);
    }
    if !has_trailing_newline {
        return Err(CorpusFileError::IncompleteLine { line: lines.len() });
    }

    // --- header (line 1) ---
    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| CorpusFileError::InvalidHeader { line: 1, message: e.to_string() })?;

    let mut levels = Vec::new();
    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    let mut next_index: u64 = 0;

    // --- records (lines 2+) ---
    for (line_index, line) in lines.iter().skip(1).enumerate() {
        let line_number = line_index + 2; // 1-indexed; header is line 1

        if line.is_empty() {
            return Err(CorpusFileError::InvalidRecord {
                line: line_number,
                message: "empty line".to_string(),
            });
        }

        let record: FileRecord = serde_json::from_str(line).map_err(|e| {
            CorpusFileError::InvalidRecord { line: line_number, message: e.to_string() }
        })?;

        if record.index != next_index {
            return Err(CorpusFileError::InvalidRecord {
                line: line_number,
                message: format!("expected index {next_index}, found {}", record.index),
            });
        }

        // Verify prev_sha256 link
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(CorpusFileError::HashChainBroken { line: line_number });
        }

        // Recompute canonical hash and verify
        let body = RecordBody { index: record.index, level: &record.level };
        let body_json = serde_json::to_string(&body).map_err(|e| {
            CorpusFileError::InvalidRecord { line: line_number, message: e.to_string() }
        })?;
        let expected_sha256 = compute_record_sha256(&body_json, &prev_sha256_hex);

        if record.sha256_hex != expected_sha256 {
            return Err(CorpusFileError::HashChainBroken { line: line_number });
        }

        levels.push(record.level);

        prev_sha256_hex = record.sha256_hex;
        next_index += 1;
    }

    Ok(LoadedCorpus {
        levels,
        seed: header.seed,
        build_id: header.build_id,
        target_count: header.target_count,
        last_sha256_hex: prev_sha256_hex,
        next_index,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
