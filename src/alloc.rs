//! Arena-first, heap-fallback allocation policy.
//!
//! Every construction primitive allocates through [`acquire`]; none of
//! them carries fallback logic of its own.

use crate::arena::Arena;
use crate::bytes::Bytes;
use crate::error::AllocError;

/// Obtain `size` bytes, preferring `arena` and falling back to the heap.
///
/// - `size == 0` yields [`Bytes::Empty`] without touching the arena.
/// - An exhausted or unusable arena is not an error: the request is
///   served from the heap instead and the arena cursor is unchanged.
/// - Only a failed heap allocation is reported.
pub fn acquire<'a>(arena: Option<&'a Arena<'_>>, size: usize) -> Result<Bytes<'a>, AllocError> {
    if size == 0 {
        return Ok(Bytes::Empty);
    }
    if let Some(arena) = arena {
        if let Some(span) = arena.alloc(size) {
            return Ok(Bytes::Arena(span));
        }
        log::trace!(
            "arena exhausted ({} of {} bytes free), {} byte request served from heap",
            arena.remaining(),
            arena.capacity(),
            size
        );
    }
    heap(size).map(Bytes::Heap)
}

/// Heap-only allocation of `size` zeroed bytes.
pub fn heap(size: usize) -> Result<Box<[u8]>, AllocError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| AllocError::OutOfMemory { requested: size })?;
    buf.resize(size, 0);
    Ok(buf.into_boxed_slice())
}

/// `left + right`, or [`AllocError::LengthOverflow`].
pub fn checked_total(left: usize, right: usize) -> Result<usize, AllocError> {
    left.checked_add(right)
        .ok_or(AllocError::LengthOverflow { left, right })
}
