use std::fs;
use std::io::{self, Read};
use std::path::Path;

use bstr::ByteVec;

use crate::alloc::{acquire, checked_total};
use crate::bytes::{Bytes, Text};
use crate::concat::bytes_to_text;
use crate::error::{AllocError, Result};

/// Separator placed between consecutive process arguments
pub const ARG_SEPARATOR: u8 = b'\n';

/// Join arguments into one heap-owned span, one separator between
/// consecutive entries and none after the last
pub fn encode_args<I, S>(args: I) -> std::result::Result<Bytes<'static>, AllocError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let args: Vec<S> = args.into_iter().collect();

    let mut total = 0usize;
    for (i, arg) in args.iter().enumerate() {
        total = checked_total(total, arg.as_ref().len())?;
        if i + 1 < args.len() {
            total = checked_total(total, 1)?;
        }
    }

    let mut out = acquire(None, total)?;
    let buf = out.as_mut_slice();
    let mut off = 0;
    for (i, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        buf[off..off + arg.len()].copy_from_slice(arg);
        off += arg.len();
        if i + 1 < args.len() {
            buf[off] = ARG_SEPARATOR;
            off += 1;
        }
    }
    Ok(out)
}

/// Encode this process's arguments, program name included
///
/// Arguments that are not valid UTF-8 are converted lossily.
pub fn args() -> std::result::Result<Bytes<'static>, AllocError> {
    let args: Vec<Vec<u8>> = std::env::args_os()
        .map(|arg| <Vec<u8>>::from_os_str_lossy(&arg).into_owned())
        .collect();
    encode_args(args)
}

/// Read a whole file as raw bytes; `-` reads stdin
pub fn read_bytes(path: &str) -> io::Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path)
    }
}

/// Read a whole file into heap-owned text
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Text<'static>> {
    let contents = fs::read(path)?;
    Ok(bytes_to_text(&contents)?)
}

/// Read everything from `reader` into heap-owned text
pub fn read_text<R: Read>(mut reader: R) -> Result<Text<'static>> {
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents)?;
    Ok(bytes_to_text(&contents)?)
}
