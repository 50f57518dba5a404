//! Provides deserializer of par file.
//!
//! The TKY2JGD par file is line-oriented ASCII text;
//! a header followed by the records
//!
//! ```text
//! JGD2000-TokyoDatum Ver.2.1.2
//! MeshCode   dB(sec)   dL(sec)
//! 46303582  12.79799  -8.13354
//! 46303583  12.79879  -8.13749
//! ...
//! ```
//!
//! We take the first three whitespace-separated fields of each line as
//! meshcode, `db` and `dl`. The lines which do not yield them are skipped,
//! the lines before the first record become the description.
use std::fs;
use std::path::Path;

use crate::table::MAX_PARAMS;
use crate::{Error, ParamRecord, ParamTable, Result};

/// Deserialize par-formatted [`&str`] into a [`ParamTable`].
///
/// See [`Parser`] for detail.
///
/// # Errors
///
/// Returns [`Err`] only when the record buffer cannot be allocated,
/// malformed lines are skipped.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # use tky2jgd::*;
/// #
/// let s = r"JGD2000-TokyoDatum Ver.2.1.2
/// MeshCode   dB(sec)   dL(sec)
/// 54401037  11.48732 -11.80198
/// 54401027  11.49105 -11.80078";
/// let table = par::from_str(s)?;
///
/// assert_eq!(
///     table.records(),
///     &[
///         ParamRecord::new(54401027, 11.49105, -11.80078),
///         ParamRecord::new(54401037, 11.48732, -11.80198),
///     ]
/// );
/// assert_eq!(
///     table.description(),
///     Some("JGD2000-TokyoDatum Ver.2.1.2\nMeshCode   dB(sec)   dL(sec)")
/// );
/// # Ok::<(), Box<dyn Error>>(())
/// ```
#[inline]
pub fn from_str(s: &str) -> Result<ParamTable> {
    Parser::new().parse(s)
}

/// Parses a single line of par-formatted data.
///
/// Returns [`None`] when the line does not start with an integer meshcode
/// and two finite numbers. Trailing fields are ignored.
///
/// # Example
///
/// ```
/// # use tky2jgd::*;
/// assert_eq!(
///     par::parse_line("54401027  11.49105 -11.80078"),
///     Some(ParamRecord::new(54401027, 11.49105, -11.80078))
/// );
/// assert_eq!(par::parse_line("MeshCode   dB(sec)   dL(sec)"), None);
/// assert_eq!(par::parse_line("54401027  11.49105"), None);
/// ```
pub fn parse_line(line: &str) -> Option<ParamRecord> {
    let mut fields = line.split_whitespace();

    let code: u32 = fields.next()?.parse().ok()?;
    let db: f64 = fields.next()?.parse().ok()?;
    let dl: f64 = fields.next()?.parse().ok()?;

    if db.is_finite() && dl.is_finite() {
        Some(ParamRecord::new(code, db, dl))
    } else {
        None
    }
}

/// The parser of par-formatted data.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # use tky2jgd::*;
/// # use tky2jgd::par::Parser;
/// #
/// let s = r"MeshCode   dB(sec)   dL(sec)
/// 54401027  11.49105 -11.80078
/// 54401037  11.48732 -11.80198
/// 54401028  11.49096 -11.80476";
///
/// // Accepts the first two records only
/// let table = Parser::new().max_records(2).parse(s)?;
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(54401028), None);
/// # Ok::<(), Box<dyn Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    max_records: usize,
}

impl Default for Parser {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Makes a parser accepting at most [`MAX_PARAMS`] records.
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_records: MAX_PARAMS,
        }
    }

    /// Updates the max count of accepted records.
    ///
    /// `n` is clamped to [`MAX_PARAMS`],
    /// the records after the `n`-th one are dropped.
    #[inline]
    pub const fn max_records(mut self, n: usize) -> Self {
        self.max_records = if n < MAX_PARAMS { n } else { MAX_PARAMS };
        self
    }

    /// Deserialize par-formatted [`&str`] into a [`ParamTable`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] when the record buffer cannot be allocated.
    pub fn parse(&self, s: &str) -> Result<ParamTable> {
        let capacity = self.max_records.min(s.lines().count());

        let mut records = Vec::new();
        records
            .try_reserve_exact(capacity)
            .map_err(|source| Error::OutOfMemory { capacity, source })?;

        let mut header = Vec::new();
        let mut skipped = 0_usize;
        let mut truncated = false;

        for line in s.lines() {
            match parse_line(line) {
                Some(_) if records.len() == self.max_records => {
                    truncated = true;
                    break;
                }
                Some(record) => records.push(record),
                None if records.is_empty() => header.push(line),
                None => skipped += 1,
            }
        }

        if truncated {
            tracing::warn!(
                max_records = self.max_records,
                "records beyond the limit are dropped"
            );
        }

        let accepted = records.len();
        let table = if header.is_empty() {
            ParamTable::new(records)
        } else {
            ParamTable::with_description(records, header.join("\n"))
        };

        tracing::debug!(
            records = table.len(),
            skipped,
            duplicates = accepted - table.len(),
            "parsed parameter table"
        );

        Ok(table)
    }

    /// Reads the par file at `path` and deserialize it into a [`ParamTable`].
    ///
    /// The file is read as bytes, invalid UTF-8 sequences never match a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read,
    /// and [`Error::OutOfMemory`] when the record buffer cannot be allocated.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<ParamTable> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "cannot read parameter file");
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        self.parse(&String::from_utf8_lossy(&bytes))
    }
}
