//! High-level extraction API.
//!
//! Ties the scanner and the formatter together: read a document, collect its
//! parameter records, append them to a destination file.

use std::path::Path;

use tracing::info;

use crate::format::{append_records, OutputFormat};
use crate::record::ParamRecord;
use crate::scanner::scan_file;
use crate::Result;

/// Options for extracting parameters.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Format used when appending records
    pub format: OutputFormat,
}

impl ExtractOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    /// Records found in the input, in source order
    pub records: Vec<ParamRecord>,
    /// Number of records appended to the output
    pub written: usize,
}

/// Extract every parameter from `input` and append it to `output`.
///
/// # Example
///
/// ```rust
/// use rstparamlib::{extract_file, ExtractOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let input = dir.path().join("cimager.rst");
/// let output = dir.path().join("params.txt");
/// fs::write(&input, "\
/// **Cimager** prefix
///
/// +------+------+---------+-------------+
/// |Name  |Type  |Default  |Description  |
/// +======+======+=========+=============+
/// |nchan |int   |1        |Channels     |
/// +------+------+---------+-------------+
///
/// ").unwrap();
///
/// let result = extract_file(&input, &output, ExtractOptions::new()).unwrap();
/// assert_eq!(result.written, 1);
/// assert_eq!(
///     fs::read_to_string(&output).unwrap(),
///     "# @param[in] param/Cimager.nchan/Cimager.nchan/1/int/readwrite/False/Channels\n"
/// );
/// ```
pub fn extract_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: ExtractOptions,
) -> Result<ExtractResult> {
    let input = input.as_ref();
    let output = output.as_ref();

    let records = scan_file(input)?;
    let written = append_records(output, &records, options.format)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        count = written,
        "parameters extracted"
    );

    Ok(ExtractResult { records, written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RstParamError;
    use std::fs;
    use tempfile::tempdir;

    const DOC: &str = "\
Imager parameters
=================

Parameters are given with the **Cimager** prefix.

+-----------+--------+-----------+---------------------------+
|Parameter  |Type    |Default    |Description                |
+===========+========+===========+===========================+
|nchan      |int     |1          |Number of channels         |
+-----------+--------+-----------+---------------------------+
|gridder    |string  |           |Gridder to use             |
+-----------+--------+-----------+---------------------------+
|visweights |string  |\"\"         |Visibility weighting, see  |
|           |        |           |the weighting section      |
+-----------+--------+-----------+---------------------------+

Solver parameters use the **Csolver** prefix.

+-----------+--------+-----------+---------------------------+
|Parameter  |Type    |Default    |Description                |
+===========+========+===========+===========================+
|solver     |string  |Clean      |Solver name                |
+-----------+--------+-----------+---------------------------+

";

    #[test]
    fn extracts_document() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("doc.rst");
        let output = dir.path().join("out.txt");
        fs::write(&input, DOC).unwrap();

        let result = extract_file(&input, &output, ExtractOptions::new()).unwrap();

        assert_eq!(result.written, 3);
        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            [
                "# @param[in] param/Cimager.nchan/Cimager.nchan/1/int/readwrite/False/Number of channels",
                "# @param[in] param/Cimager.visweights/Cimager.visweights/\"\"/string/readwrite/False/Visibility weighting, see the weighting section",
                "# @param[in] param/Csolver.solver/Csolver.solver/Clean/string/readwrite/False/Solver name",
            ]
        );
    }

    #[test]
    fn repeated_runs_accumulate() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("doc.rst");
        let output = dir.path().join("out.txt");
        fs::write(&input, DOC).unwrap();

        extract_file(&input, &output, ExtractOptions::new()).unwrap();
        extract_file(&input, &output, ExtractOptions::new()).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 6);
    }

    #[test]
    fn json_format() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("doc.rst");
        let output = dir.path().join("out.jsonl");
        fs::write(&input, DOC).unwrap();

        let options = ExtractOptions::new().format(OutputFormat::Json);
        extract_file(&input, &output, options).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let values: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(values.len(), 3);
        assert_eq!(values[2]["prefix"], "Csolver.");
        assert_eq!(values[2]["name"], "solver");
    }

    #[test]
    fn missing_input_leaves_output_untouched() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.txt");

        let err = extract_file(dir.path().join("nope.rst"), &output, ExtractOptions::new())
            .unwrap_err();

        assert!(matches!(err, RstParamError::FileRead { .. }));
        assert!(!output.exists());
    }
}
