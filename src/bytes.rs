//! Byte spans and terminated text returned by the allocation policy.

use std::fmt;
use std::ops::Deref;

use bstr::BStr;

/// Byte terminating every [`Text`].
pub const TERMINATOR: u8 = 0;

/// A span of bytes in one of two ownership modes.
///
/// `Arena` spans borrow the arena scope they were allocated in. `Heap`
/// spans belong to the caller and outlive any arena.
#[derive(Default)]
pub enum Bytes<'a> {
    /// Zero-length result; nothing was allocated.
    #[default]
    Empty,
    Arena(&'a mut [u8]),
    Heap(Box<[u8]>),
}

impl<'a> Bytes<'a> {
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            Bytes::Empty => &[],
            Bytes::Arena(span) => &span[..],
            Bytes::Heap(span) => &span[..],
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Bytes::Empty => &mut [],
            Bytes::Arena(span) => &mut span[..],
            Bytes::Heap(span) => &mut span[..],
        }
    }

    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_slice())
    }

    pub fn is_arena_owned(&self) -> bool {
        matches!(self, Bytes::Arena(_))
    }

    pub fn is_heap_owned(&self) -> bool {
        matches!(self, Bytes::Heap(_))
    }

    /// Copy the contents out so they survive the arena scope.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            Bytes::Empty => Vec::new(),
            Bytes::Arena(span) => span.to_vec(),
            Bytes::Heap(span) => span.into_vec(),
        }
    }

    /// Short ownership label used by debug output.
    pub fn ownership(&self) -> &'static str {
        match self {
            Bytes::Empty => "empty",
            Bytes::Arena(_) => "arena",
            Bytes::Heap(_) => "heap",
        }
    }
}

impl Deref for Bytes<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Bytes<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for Bytes<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Bytes<'_> {}

impl PartialEq<[u8]> for Bytes<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Bytes<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl fmt::Debug for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes::{}({:?})", self.ownership(), self.as_bstr())
    }
}

/// Terminated text: non-empty bytes whose last byte is [`TERMINATOR`].
pub struct Text<'a> {
    bytes: Bytes<'a>,
}

impl<'a> Text<'a> {
    /// Caller guarantees `bytes` is non-empty and ends with the terminator.
    pub(crate) fn from_terminated(bytes: Bytes<'a>) -> Self {
        debug_assert_eq!(bytes.last(), Some(&TERMINATOR));
        Self { bytes }
    }

    /// Length without the terminator.
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bstr(&self) -> &BStr {
        BStr::new(&self.bytes[..self.len()])
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.as_bstr())
    }

    pub fn is_arena_owned(&self) -> bool {
        self.bytes.is_arena_owned()
    }

    pub fn is_heap_owned(&self) -> bool {
        self.bytes.is_heap_owned()
    }

    /// The underlying span, terminator included.
    pub fn span(&self) -> &Bytes<'a> {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes<'a> {
        self.bytes
    }
}

impl PartialEq for Text<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bstr() == other.as_bstr()
    }
}

impl Eq for Text<'_> {}

impl PartialEq<str> for Text<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bstr() == other
    }
}

impl PartialEq<&str> for Text<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bstr() == *other
    }
}

impl fmt::Debug for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text::{}({:?})", self.bytes.ownership(), self.as_bstr())
    }
}

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

/// Prefix of `text` up to (not including) its first terminator.
pub fn until_terminator(text: &[u8]) -> &[u8] {
    match text.iter().position(|&b| b == TERMINATOR) {
        Some(end) => &text[..end],
        None => text,
    }
}
