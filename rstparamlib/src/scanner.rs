//! Grid table scanner.
//!
//! This module holds the line-oriented state machine that walks a
//! reStructuredText document and collects one [`ParamRecord`] per parameter
//! row group of a four column grid table:
//!
//! ```text
//! **Cimager** prefix
//!
//! +-----------+--------+---------+------------------------+
//! |Parameter  |Type    |Default  |Description             |
//! +===========+========+=========+========================+
//! |nchan      |int     |1        |Number of channels      |
//! +-----------+--------+---------+------------------------+
//! |gridder    |string  |WProject |Name of the gridder,    |
//! |           |        |         |see the gridder docs    |
//! +-----------+--------+---------+------------------------+
//!
//! ```
//!
//! A row separator alone does not say whether another row or the end of the
//! table follows, so the scanner decides one line later, in
//! [`TableState::FieldEnding`], and still parses that line as a row.

use std::fs;
use std::mem;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::RstParamError;
use crate::record::ParamRecord;
use crate::Result;

static RE_TABLE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+=+){4}\+").unwrap());

static RE_ROW_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+-+){4}\+").unwrap());

static RE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*+.*\*+ prefix").unwrap());

/// Where the scanner is relative to a grid table.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TableState {
    /// Outside any table
    #[default]
    Free,
    /// Inside the body of a table, reading row lines
    Field,
    /// Just saw a row separator; the next line decides what it was
    FieldEnding,
}

/// Cell fragments gathered for the parameter currently being read.
#[derive(Debug, Default)]
struct Fragments {
    name: Vec<String>,
    ty: Vec<String>,
    default: Vec<String>,
    description: Vec<String>,
}

impl Fragments {
    /// Append the non-blank cells of a `|`-delimited row.
    ///
    /// Segments are paired positionally with name, type, default and
    /// description. Rows with fewer cells fill fewer fields and extra cells
    /// are ignored; neither is an error.
    fn push_row(&mut self, line: &str) {
        let segments: Vec<&str> = line.split('|').collect();
        if segments.len() < 2 {
            return;
        }

        let targets = [
            &mut self.name,
            &mut self.ty,
            &mut self.default,
            &mut self.description,
        ];
        for (cell, target) in segments[1..segments.len() - 1].iter().zip(targets) {
            let cell = cell.trim();
            if !cell.is_empty() {
                target.push(cell.to_string());
            }
        }
    }

    fn into_record(self, prefix: &str) -> ParamRecord {
        ParamRecord {
            name: self.name,
            ty: self.ty,
            default: self.default,
            description: self.description.join(" "),
            prefix: prefix.to_string(),
        }
    }
}

/// A scanner that turns document lines into parameter records.
///
/// Feed lines in order with [`Scanner::feed`] and collect the result with
/// [`Scanner::finish`]. The prefix set by a `**Name** prefix` annotation is
/// part of the scanner and applies to every record finalized after it.
#[derive(Debug, Default)]
pub struct Scanner {
    state: TableState,
    fragments: Fragments,
    prefix: String,
    records: Vec<ParamRecord>,
    line_no: usize,
}

impl Scanner {
    /// Create a scanner in the [`TableState::Free`] state with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current table state.
    pub fn state(&self) -> TableState {
        self.state
    }

    /// Prefix that will be attached to the next finalized record.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Records finalized so far.
    pub fn records(&self) -> &[ParamRecord] {
        &self.records
    }

    /// Process one line of input.
    pub fn feed(&mut self, line: &str) {
        self.line_no += 1;
        let line = line.trim();

        match self.state {
            TableState::Free => self.visit_free(line),
            TableState::Field => self.visit_field(line),
            TableState::FieldEnding => self.visit_field_ending(line),
        }
    }

    /// Finish scanning and return every record in source order.
    ///
    /// A record is only finalized by the line that follows its closing row
    /// separator, so fragments still pending at end of input are dropped. A
    /// document whose last line is a row separator loses that last parameter.
    pub fn finish(self) -> Vec<ParamRecord> {
        if self.state != TableState::Free {
            debug!(line = self.line_no, state = ?self.state, "input ended inside a table");
        }
        self.records
    }

    fn visit_free(&mut self, line: &str) {
        if RE_TABLE_HEADER.is_match(line) {
            self.transition(TableState::Field);
        }

        if let Some(found) = RE_PREFIX.find(line) {
            let prefix = found
                .as_str()
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .replace('*', "");
            debug!(line = self.line_no, %prefix, "changing prefix");
            self.prefix = prefix;
        }
    }

    fn visit_field(&mut self, line: &str) {
        self.fragments.push_row(line);

        if RE_ROW_SEPARATOR.is_match(line) {
            self.transition(TableState::FieldEnding);
        }
    }

    fn visit_field_ending(&mut self, line: &str) {
        if line.is_empty() {
            self.transition(TableState::Free);
        } else {
            self.transition(TableState::Field);
        }

        self.finalize();
        self.fragments.push_row(line);
    }

    /// Emit the pending record if it is complete, then start a new one.
    fn finalize(&mut self) {
        let record = mem::take(&mut self.fragments).into_record(&self.prefix);
        if record.is_complete() {
            trace!(line = self.line_no, name = ?record.name, "parameter finalized");
            self.records.push(record);
        }
    }

    fn transition(&mut self, next: TableState) {
        if self.state != next {
            debug!(line = self.line_no, from = ?self.state, to = ?next, "table state change");
        }
        self.state = next;
    }
}

/// Scan a sequence of lines and return the parameter records they contain.
pub fn scan_lines<I, S>(lines: I) -> Vec<ParamRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new();
    for line in lines {
        scanner.feed(line.as_ref());
    }
    scanner.finish()
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`.
///
/// Terminators are not part of the yielded lines and a trailing terminator
/// does not produce an extra empty line.
fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    let mut rest = source;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let line = match rest.find(['\r', '\n']) {
            Some(end) => {
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                let line = &rest[..end];
                rest = &rest[end + skip..];
                line
            }
            None => mem::take(&mut rest),
        };
        Some(line)
    })
}

/// Scan a whole document held in memory.
///
/// Lines may end in `\n`, `\r\n` or a lone `\r`.
///
/// # Example
///
/// ```rust
/// use rstparamlib::scan_str;
///
/// let doc = "\
/// +------+------+---------+-------------+
/// |Name  |Type  |Default  |Description  |
/// +======+======+=========+=============+
/// |nchan |int   |1        |Channels     |
/// +------+------+---------+-------------+
///
/// ";
///
/// let records = scan_str(doc);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name, vec!["nchan"]);
/// ```
pub fn scan_str(source: &str) -> Vec<ParamRecord> {
    scan_lines(split_lines(source))
}

/// Read a document from disk and scan it.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn scan_file(path: impl AsRef<Path>) -> Result<Vec<ParamRecord>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| RstParamError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "scanning document");

    Ok(scan_str(&String::from_utf8_lossy(&bytes)))
}
