//! Manifest reader and writer.
//!
//! A manifest is a semicolon-delimited table with a two-column header:
//!
//! ```text
//! absolute_path;relative_path
//! /data/out/range_0/000001.jpg;range_0/000001.jpg
//! ```
//!
//! The semicolon keeps paths that contain commas intact. There is no quoting
//! or escaping, so fields containing the delimiter cannot be represented.
//!
//! # Strict write, lenient read
//!
//! The writer validates every row before touching the output file and
//! rejects rows with fewer than two fields, empty fields, or fields holding
//! the delimiter or a line break. The reader accepts hand-edited files: the
//! header is optional, and rows that are too short or do not form a valid
//! [`AssetPathPair`] are skipped with a warning.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::AssetPathPair;
use crate::error::DatecrawlError;

/// Field delimiter.
pub const MANIFEST_DELIMITER: u8 = b';';

/// Header labels, matched case-insensitively on read.
pub const MANIFEST_HEADER: [&str; 2] = ["absolute_path", "relative_path"];

/// File extension a cursor source must carry to be read as a manifest.
pub const MANIFEST_EXTENSION: &str = "csv";

/// True if `path` has the manifest extension, in any letter case.
pub fn is_manifest_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
}

/// Writes `pairs` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_manifest(path: &Path, pairs: &[AssetPathPair]) -> Result<(), DatecrawlError> {
    write_manifest_rows(
        path,
        pairs
            .iter()
            .map(|pair| [pair.absolute_path(), pair.relative_path()]),
    )?;
    Ok(())
}

/// Writes raw rows to `path`. Only the first two fields of each row are kept.
///
/// Returns the number of data rows written.
///
/// # Errors
/// Returns [`DatecrawlError::ManifestRowInvalid`] (before the file is
/// created) if any row has fewer than two fields or an unrepresentable field.
pub fn write_manifest_rows<I, R, S>(path: &Path, rows: I) -> Result<usize, DatecrawlError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let records = validate_rows(rows)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path).map_err(DatecrawlError::Io)?;
    let mut writer = writer_builder().from_writer(BufWriter::new(file));
    write_records(&mut writer, &records, path)?;

    writer
        .into_inner()
        .map_err(|e| DatecrawlError::Io(e.into_error()))?
        .flush()
        .map_err(DatecrawlError::Io)?;

    tracing::info!(path = %path.display(), rows = records.len(), "wrote manifest");
    Ok(records.len())
}

/// Reads a manifest file.
pub fn read_manifest(path: &Path) -> Result<Vec<AssetPathPair>, DatecrawlError> {
    let file = File::open(path).map_err(DatecrawlError::Io)?;
    parse_manifest(BufReader::new(file), path)
}

/// Reads a manifest from a string.
///
/// Useful for testing without file I/O.
pub fn from_manifest_str(manifest: &str) -> Result<Vec<AssetPathPair>, DatecrawlError> {
    from_manifest_slice(manifest.as_bytes())
}

/// Reads a manifest from raw bytes.
///
/// Useful for fuzzing; rows that are not valid UTF-8 are skipped.
pub fn from_manifest_slice(bytes: &[u8]) -> Result<Vec<AssetPathPair>, DatecrawlError> {
    parse_manifest(bytes, Path::new("<bytes>"))
}

/// Writes pairs to a manifest string.
pub fn to_manifest_string(pairs: &[AssetPathPair]) -> Result<String, DatecrawlError> {
    let dummy_path = Path::new("<string>");
    let records = validate_rows(
        pairs
            .iter()
            .map(|pair| [pair.absolute_path(), pair.relative_path()]),
    )?;

    let mut writer = writer_builder().from_writer(Vec::new());
    write_records(&mut writer, &records, dummy_path)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| DatecrawlError::Io(e.into_error()))?;

    // Every field came from a &str, so the output is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(MANIFEST_DELIMITER)
        .quote_style(csv::QuoteStyle::Never)
        .has_headers(false);
    builder
}

fn write_records<W: Write>(
    writer: &mut csv::Writer<W>,
    records: &[[String; 2]],
    path: &Path,
) -> Result<(), DatecrawlError> {
    let to_write_err = |source| DatecrawlError::ManifestWrite {
        path: path.to_path_buf(),
        source,
    };

    writer.write_record(MANIFEST_HEADER).map_err(to_write_err)?;
    for record in records {
        writer.write_record(record).map_err(to_write_err)?;
    }
    Ok(())
}

fn validate_rows<I, R, S>(rows: I) -> Result<Vec<[String; 2]>, DatecrawlError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut records = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row_num = index + 1;
        let fields = row.as_ref();

        if fields.len() < 2 {
            return Err(DatecrawlError::ManifestRowInvalid {
                row: row_num,
                message: format!(
                    "expected at least 2 fields [absolute, relative], found {}",
                    fields.len()
                ),
            });
        }

        let absolute = fields[0].as_ref();
        let relative = fields[1].as_ref();
        for (label, value) in MANIFEST_HEADER.iter().zip([absolute, relative]) {
            check_field(row_num, label, value)?;
        }

        records.push([absolute.to_string(), relative.to_string()]);
    }

    Ok(records)
}

fn check_field(row: usize, label: &str, value: &str) -> Result<(), DatecrawlError> {
    let problem = if value.is_empty() {
        Some("is empty")
    } else if value.as_bytes().contains(&MANIFEST_DELIMITER) {
        Some("contains the ';' delimiter")
    } else if value.contains(['\n', '\r']) {
        Some("contains a line break")
    } else {
        None
    };

    match problem {
        Some(problem) => Err(DatecrawlError::ManifestRowInvalid {
            row,
            message: format!("{} '{}' {}", label, value, problem),
        }),
        None => Ok(()),
    }
}

fn parse_manifest<R: Read>(reader: R, path: &Path) -> Result<Vec<AssetPathPair>, DatecrawlError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(MANIFEST_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut pairs = Vec::new();
    let mut first = true;

    for result in csv_reader.byte_records() {
        let record = result.map_err(|source| DatecrawlError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        if std::mem::take(&mut first) && is_header(&record) {
            continue;
        }

        if record.len() < 2 {
            continue;
        }

        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let (Ok(absolute), Ok(relative)) = (
            std::str::from_utf8(&record[0]),
            std::str::from_utf8(&record[1]),
        ) else {
            tracing::warn!(path = %path.display(), line, "skipping manifest row with invalid UTF-8");
            continue;
        };

        match AssetPathPair::new(absolute, relative) {
            Ok(pair) => pairs.push(pair),
            Err(err) => {
                tracing::warn!(path = %path.display(), line, error = %err, "skipping manifest row");
            }
        }
    }

    Ok(pairs)
}

fn is_header(record: &csv::ByteRecord) -> bool {
    record.len() >= 2
        && MANIFEST_HEADER
            .iter()
            .zip(record.iter())
            .all(|(label, field)| {
                std::str::from_utf8(field)
                    .map(|field| field.trim().eq_ignore_ascii_case(label))
                    .unwrap_or(false)
            })
}
