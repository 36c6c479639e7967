use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

/// Append-only destination for finished log lines.
///
/// Implementations receive lines without their terminator and must write the
/// line plus `\n` as one unit.
pub trait LineSink: Send {
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Flushes anything buffered. Called once when the owning logger closes.
    fn close(&mut self) -> io::Result<()>;
}

/// A log file opened in create+append mode.
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Opens (creating if absent) `path` for appending.
    pub fn open_append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl LineSink for FileSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        self.file.write_all(buf.as_bytes())
    }

    fn close(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
