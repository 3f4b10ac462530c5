use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bstr::BStr;

use crate::bytes::until_terminator;
use crate::config::Config;

/// Write text up to its terminator, then flush
///
/// Absent text writes nothing.
pub fn print<W: Write>(mut writer: W, text: Option<&BStr>) -> io::Result<()> {
    if let Some(text) = text {
        writer.write_all(until_terminator(text))?;
    }
    writer.flush()
}

/// Like [`print`], followed by a newline
pub fn println<W: Write>(mut writer: W, text: Option<&BStr>) -> io::Result<()> {
    if let Some(text) = text {
        writer.write_all(until_terminator(text))?;
    }
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Replace the file at `path` with `text` up to its terminator
pub fn write_file<P: AsRef<Path>>(path: P, text: &BStr) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(until_terminator(text))?;
    writer.flush()
}

/// Write a raw byte span unchanged
pub fn write_bytes<W: Write>(writer: W, bytes: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writer.write_all(bytes)?;
    writer.flush()
}

/// Open output file or return stdout
pub fn open_output(config: &Config) -> io::Result<Box<dyn Write>> {
    match &config.output_file {
        Some(path) => {
            let file = File::create(path)?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
