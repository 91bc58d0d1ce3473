//! Line-oriented text channels for the query console

use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// A bidirectional text channel read and written one line at a time
pub trait LineChannel {
    /// Read the next line without its terminator; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write one response line
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// [`LineChannel`] over any buffered reader and writer
#[derive(Debug)]
pub struct IoChannel<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> IoChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl IoChannel<StdinLock<'static>, Stdout> {
    /// Channel over the process's standard input and output
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LineChannel for IoChannel<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_lines_without_terminators() {
        let mut channel = IoChannel::new(Cursor::new("1\r\n  20 \nlast"), Vec::new());
        assert_eq!(channel.read_line().unwrap().as_deref(), Some("1"));
        assert_eq!(channel.read_line().unwrap().as_deref(), Some("  20 "));
        assert_eq!(channel.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(channel.read_line().unwrap(), None);
    }

    #[test]
    fn test_writes_one_line_per_call() {
        let mut channel = IoChannel::new(Cursor::new(""), Vec::new());
        channel.write_line("first").unwrap();
        channel.write_line("second").unwrap();
        let (_, output) = channel.into_parts();
        assert_eq!(String::from_utf8(output).unwrap(), "first\nsecond\n");
    }
}
