//! String and byte-buffer concatenation.
//!
//! Each family has a fallible core (`try_*`, taking an optional arena)
//! and two value-returning entry points: `*_in` allocates through an
//! arena, the bare name allocates on the heap. The value-returning forms
//! report failure only as an absent or zero-length result.

use bstr::BStr;

use crate::alloc::{acquire, checked_total};
use crate::arena::Arena;
use crate::bytes::{Bytes, TERMINATOR, Text, until_terminator};
use crate::error::AllocError;

/// Concatenate two texts into a new terminated [`Text`].
///
/// Absent inputs count as empty, and each input ends at its first
/// terminator byte. The result is arena-owned when the arena had room
/// for `len(a) + len(b) + 1` bytes and heap-owned otherwise.
pub fn try_concat<'a>(
    arena: Option<&'a Arena<'_>>,
    a: Option<&BStr>,
    b: Option<&BStr>,
) -> Result<Text<'a>, AllocError> {
    let a = a.map_or(&[][..], |s| until_terminator(s));
    let b = b.map_or(&[][..], |s| until_terminator(s));
    let body = checked_total(a.len(), b.len())?;
    let total = checked_total(body, 1)?;

    let mut out = acquire(arena, total)?;
    let buf = out.as_mut_slice();
    buf[..a.len()].copy_from_slice(a);
    buf[a.len()..body].copy_from_slice(b);
    buf[body] = TERMINATOR;
    Ok(Text::from_terminated(out))
}

/// [`try_concat`] through `arena`, absent on allocation failure.
pub fn concat_in<'a>(arena: &'a Arena<'_>, a: Option<&BStr>, b: Option<&BStr>) -> Option<Text<'a>> {
    silent_text(try_concat(Some(arena), a, b))
}

/// [`try_concat`] on the heap, absent on allocation failure.
pub fn concat(a: Option<&BStr>, b: Option<&BStr>) -> Option<Text<'static>> {
    silent_text(try_concat(None, a, b))
}

/// Concatenate two raw byte spans. No terminator is appended.
///
/// Absent inputs count as empty. A zero total yields [`Bytes::Empty`]
/// without allocating.
pub fn try_concat_bytes<'a>(
    arena: Option<&'a Arena<'_>>,
    a: Option<&[u8]>,
    b: Option<&[u8]>,
) -> Result<Bytes<'a>, AllocError> {
    let a = a.unwrap_or_default();
    let b = b.unwrap_or_default();
    let total = checked_total(a.len(), b.len())?;
    if total == 0 {
        return Ok(Bytes::Empty);
    }

    let mut out = acquire(arena, total)?;
    let buf = out.as_mut_slice();
    buf[..a.len()].copy_from_slice(a);
    buf[a.len()..].copy_from_slice(b);
    Ok(out)
}

/// [`try_concat_bytes`] through `arena`; failure yields [`Bytes::Empty`].
pub fn concat_bytes_in<'a>(arena: &'a Arena<'_>, a: Option<&[u8]>, b: Option<&[u8]>) -> Bytes<'a> {
    silent_bytes(try_concat_bytes(Some(arena), a, b))
}

/// [`try_concat_bytes`] on the heap; failure yields [`Bytes::Empty`].
pub fn concat_bytes(a: Option<&[u8]>, b: Option<&[u8]>) -> Bytes<'static> {
    silent_bytes(try_concat_bytes(None, a, b))
}

/// Copy `bytes` into a new heap-owned [`Text`], whatever their origin.
pub fn bytes_to_text(bytes: &[u8]) -> Result<Text<'static>, AllocError> {
    let total = checked_total(bytes.len(), 1)?;
    let mut out = acquire(None, total)?;
    let buf = out.as_mut_slice();
    buf[..bytes.len()].copy_from_slice(bytes);
    buf[bytes.len()] = TERMINATOR;
    Ok(Text::from_terminated(out))
}

fn silent_text(result: Result<Text<'_>, AllocError>) -> Option<Text<'_>> {
    result
        .map_err(|e| log::debug!("text concatenation failed: {}", e))
        .ok()
}

fn silent_bytes(result: Result<Bytes<'_>, AllocError>) -> Bytes<'_> {
    result.unwrap_or_else(|e| {
        log::debug!("byte concatenation failed: {}", e);
        Bytes::Empty
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Option<&BStr> {
        Some(text.into())
    }

    fn b(bytes: &[u8]) -> Option<&[u8]> {
        Some(bytes)
    }

    #[test]
    fn concat_foo_bar_in_arena() {
        let mut buf = [0u8; 16];
        let arena = Arena::new(&mut buf);
        let text = concat_in(&arena, s("foo"), s("bar")).unwrap();
        assert_eq!(text, "foobar");
        assert_eq!(text.as_bytes_with_nul(), b"foobar\0");
        assert!(text.is_arena_owned());
        assert_eq!(arena.offset(), 7);
    }

    #[test]
    fn concat_falls_back_to_heap() {
        let mut buf = [0u8; 6];
        let arena = Arena::new(&mut buf);
        let text = concat_in(&arena, s("foo"), s("bar")).unwrap();
        assert_eq!(text, "foobar");
        assert!(text.is_heap_owned());
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn concat_absent_inputs_are_empty() {
        let text = concat(None, None).unwrap();
        assert!(text.is_empty());
        assert_eq!(text.as_bytes_with_nul(), b"\0");

        let text = concat(None, s("x")).unwrap();
        assert_eq!(text, "x");
        let text = concat(s("y"), None).unwrap();
        assert_eq!(text, "y");
    }

    #[test]
    fn concat_stops_inputs_at_terminator() {
        let text = concat(Some(BStr::new(b"ab\0zz")), s("cd")).unwrap();
        assert_eq!(text, "abcd");
    }

    #[test]
    fn concat_bytes_keeps_interior_nuls() {
        let out = concat_bytes(b(b"a\0"), b(b"\0b"));
        assert_eq!(out, *b"a\0\0b");
        assert!(out.is_heap_owned());
    }

    #[test]
    fn concat_bytes_has_no_terminator() {
        let mut buf = [0u8; 8];
        let arena = Arena::new(&mut buf);
        let out = concat_bytes_in(&arena, b(b"ab"), b(b"cd"));
        assert_eq!(out, *b"abcd");
        assert!(out.is_arena_owned());
        assert_eq!(arena.offset(), 4);
    }

    #[test]
    fn concat_bytes_zero_total_allocates_nothing() {
        let mut buf = [0u8; 8];
        let arena = Arena::new(&mut buf);
        let out = concat_bytes_in(&arena, None, b(b""));
        assert!(matches!(out, Bytes::Empty));
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn concat_bytes_one_side_absent() {
        let out = concat_bytes(None, b(b"xyz"));
        assert_eq!(out, *b"xyz");
    }

    #[test]
    fn failed_byte_concat_is_zero_length() {
        let out = silent_bytes(Err(AllocError::OutOfMemory { requested: 1 }));
        assert!(matches!(out, Bytes::Empty));
        assert_eq!(out.len(), 0);

        let out = silent_bytes(Err(AllocError::LengthOverflow { left: usize::MAX, right: 1 }));
        assert!(out.is_empty());
    }

    #[test]
    fn failed_text_concat_is_absent() {
        assert!(silent_text(Err(AllocError::OutOfMemory { requested: 7 })).is_none());
        assert!(silent_text(Err(AllocError::LengthOverflow { left: 1, right: usize::MAX })).is_none());
    }

    #[test]
    fn bytes_to_text_is_heap_owned() {
        let text = bytes_to_text(b"hello").unwrap();
        assert_eq!(text, "hello");
        assert!(text.is_heap_owned());

        let empty = bytes_to_text(b"").unwrap();
        assert!(empty.is_empty());
    }
}
