//! CSV emission: the `#` header block followed by data rows.
//!
//! Tables are written to a temporary file next to the destination and
//! renamed into place once complete, so a failed run never leaves a partial
//! table behind.

use std::borrow::Cow;
use std::io::{BufWriter, Write};
use std::path::Path;

use cvm_common::NumberFormat;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, TableError};
use crate::types::Row;

/// Field delimiter of the emitted tables.
pub const DELIMITER: char = ',';

/// Comment lines written before the table body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    lines: Vec<String>,
}

impl HeaderBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `# key: value`.
    pub fn field(&mut self, key: &str, value: impl std::fmt::Display) -> &mut Self {
        self.lines.push(format!("# {}: {}", key, value));
        self
    }

    /// Append `# key:value`.
    pub fn compact_field(&mut self, key: &str, value: impl std::fmt::Display) -> &mut Self {
        self.lines.push(format!("# {}:{}", key, value));
        self
    }

    /// Append `# text`.
    pub fn line(&mut self, text: impl std::fmt::Display) -> &mut Self {
        self.lines.push(format!("# {}", text));
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines, each newline terminated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Display for HeaderBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Quote a field if it contains the delimiter, a quote or a line break.
pub fn csv_field(text: &str) -> Cow<'_, str> {
    if text.contains([DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(text)
    }
}

/// Render one row as a CSV line without the terminator.
pub fn format_row(row: &Row, format: NumberFormat) -> String {
    let fields: Vec<String> = row
        .cells
        .iter()
        .map(|cell| csv_field(&cell.render(format)).into_owned())
        .collect();
    fields.join(",")
}

/// Write a header block, an optional column-name row and the data rows.
///
/// Returns the number of data rows written.
pub fn write_table<W, I>(
    writer: &mut W,
    header: &HeaderBlock,
    columns: Option<&[String]>,
    rows: I,
    format: NumberFormat,
) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Row>,
{
    writer.write_all(header.render().as_bytes())?;

    if let Some(columns) = columns {
        let names: Vec<Cow<'_, str>> = columns.iter().map(|c| csv_field(c)).collect();
        writeln!(writer, "{}", names.join(","))?;
    }

    let mut count = 0;
    for row in rows {
        writeln!(writer, "{}", format_row(&row, format))?;
        count += 1;
    }
    Ok(count)
}

/// Write a table to `path`, replacing it only once the table is complete.
pub fn write_table_file<I>(
    path: &Path,
    header: &HeaderBlock,
    columns: Option<&[String]>,
    rows: I,
    format: NumberFormat,
) -> Result<usize>
where
    I: IntoIterator<Item = Row>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_err = |e| TableError::io(path, e);

    let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
    let count = {
        let mut writer = BufWriter::new(staged.as_file_mut());
        let count = write_table(&mut writer, header, columns, rows, format).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        count
    };

    // Staged files are created owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(io_err)?;
    }

    staged.persist(path).map_err(|e| TableError::io(path, e.error))?;
    debug!(path = %path.display(), rows = count, "Wrote table");
    Ok(count)
}
