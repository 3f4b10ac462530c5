use std::io::{self, Write};

use crate::arena::Arena;
use crate::bytes::Bytes;

/// Arena usage line
///
/// Format: `arena: <used>/<capacity> bytes used, <remaining> free`
pub fn debug_arena<W: Write>(writer: &mut W, arena: &Arena<'_>) -> io::Result<()> {
    if !arena.is_usable() {
        return writeln!(writer, "arena: disabled");
    }
    writeln!(
        writer,
        "arena: {}/{} bytes used, {} free",
        arena.offset(),
        arena.capacity(),
        arena.remaining()
    )
}

/// One line per result span: label, length, and ownership mode
pub fn debug_span<W: Write>(writer: &mut W, label: &str, bytes: &Bytes<'_>) -> io::Result<()> {
    writeln!(
        writer,
        "{}: {} bytes ({})",
        label,
        bytes.len(),
        bytes.ownership()
    )
}
