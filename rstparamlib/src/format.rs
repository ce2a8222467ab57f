//! Output formatting for parameter records.
//!
//! The default [`OutputFormat::Param`] renders the `# @param[in]` line read by
//! the component documentation tooling:
//!
//! ```text
//! # @param[in] param/{prefix}{name}/{prefix}{name}/{default}/{type}/readwrite/False/{description}
//! ```
//!
//! Field order and the `readwrite` and `False` tokens are fixed.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::RstParamError;
use crate::record::ParamRecord;
use crate::Result;

/// How records are rendered on output.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `# @param[in]` line per record
    #[default]
    Param,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    /// Names accepted by [`OutputFormat::from_str`].
    pub const NAMES: [&'static str; 2] = ["param", "json"];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Param => "param",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = RstParamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "param" => Ok(OutputFormat::Param),
            "json" => Ok(OutputFormat::Json),
            other => Err(RstParamError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render a record as a `# @param[in]` line, trailing newline included.
///
/// # Example
///
/// ```rust
/// use rstparamlib::{format_record, ParamRecord};
///
/// let record = ParamRecord {
///     name: vec!["myparam".into()],
///     ty: vec!["string".into()],
///     default: vec!["abc".into()],
///     description: "a description".into(),
///     prefix: String::new(),
/// };
///
/// assert_eq!(
///     format_record(&record),
///     "# @param[in] param/myparam/myparam/abc/string/readwrite/False/a description\n"
/// );
/// ```
pub fn format_record(record: &ParamRecord) -> String {
    let param = record.normalize();
    let qualified = param.qualified_name();
    format!(
        "# @param[in] param/{qualified}/{qualified}/{}/{}/readwrite/False/{}\n",
        param.default, param.ty, param.description
    )
}

/// Writes records to any [`Write`] in a chosen [`OutputFormat`].
pub struct RecordWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            written: 0,
        }
    }

    /// Write one record.
    pub fn write_record(&mut self, record: &ParamRecord) -> Result<()> {
        match self.format {
            OutputFormat::Param => self.writer.write_all(format_record(record).as_bytes())?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, &record.normalize())?;
                self.writer.write_all(b"\n")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Write every record in order.
    pub fn write_all(&mut self, records: &[ParamRecord]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Append records to the file at `path`, creating it if needed.
///
/// Existing content is never truncated, so running the extraction several
/// times against one destination accumulates records. Returns the number of
/// records written.
pub fn append_records(
    path: impl AsRef<Path>,
    records: &[ParamRecord],
    format: OutputFormat,
) -> Result<usize> {
    let path = path.as_ref();
    let write_error = |source| RstParamError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error)?;

    let mut writer = RecordWriter::new(BufWriter::new(file), format);
    writer
        .write_all(records)
        .and_then(|()| writer.flush())
        .map_err(|e| match e {
            RstParamError::Io(source) => write_error(source),
            other => other,
        })?;

    debug!(path = %path.display(), count = writer.written(), %format, "records appended");
    Ok(writer.written())
}
