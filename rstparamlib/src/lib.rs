//! # rstparamlib
//!
//! Extract component parameter metadata from reStructuredText grid tables.
//!
//! ## Overview
//!
//! Component documentation describes its configuration parameters in four
//! column grid tables (name, type, default, description), optionally preceded
//! by a `**Component** prefix` annotation naming the parameter namespace. This
//! library walks such a document line by line and produces one
//! [`ParamRecord`] per parameter, then renders each record as a
//! `# @param[in]` line for downstream tooling.
//!
//! - **Scanner**: a three state machine (free text, table row, row ending)
//!   that follows rows split over several lines
//! - **Formatter**: the fixed `param/.../readwrite/False/...` line, or JSON
//! - **Append-only output**: destinations are never truncated
//!
//! ## Example
//!
//! ```rust
//! use rstparamlib::{format_record, scan_str};
//!
//! let doc = "\
//! Use the **Cimager** prefix for these.
//!
//! +========+========+=========+====================+
//! |nchan   |int     |1        |Number of channels  |
//! +--------+--------+---------+--------------------+
//! |gridder |string  |         |Gridder name, see   |
//! |        |        |         |the gridding docs   |
//! +--------+--------+---------+--------------------+
//!
//! ";
//!
//! let records = scan_str(doc);
//! // `gridder` has no default, so only `nchan` is complete
//! assert_eq!(records.len(), 1);
//! assert_eq!(
//!     format_record(&records[0]),
//!     "# @param[in] param/Cimager.nchan/Cimager.nchan/1/int/readwrite/False/Number of channels\n"
//! );
//! ```

pub mod error;
pub mod extract;
pub mod format;
pub mod record;
pub mod scanner;

pub use error::RstParamError;
pub use extract::{extract_file, ExtractOptions, ExtractResult};
pub use format::{append_records, format_record, OutputFormat, RecordWriter};
pub use record::{NormalizedParam, ParamRecord, NONE_DEFAULT};
pub use scanner::{scan_file, scan_lines, scan_str, Scanner, TableState};

/// Result type for rstparamlib operations
pub type Result<T> = std::result::Result<T, RstParamError>;
