//! Fixed-capacity bump arena over a caller-supplied buffer.
//!
//! The arena never owns its memory: it borrows a byte buffer for its
//! whole lifetime and hands out disjoint slices of it by advancing a
//! single cursor. Memory is reclaimed only in bulk, by rolling the
//! cursor back to a [`Scope`] mark.
//!
//! Allocation takes `&self` so several live spans can coexist, while
//! rollback takes `&mut self`. The borrow checker therefore rejects any
//! arena-owned span that would survive the scope it was allocated in.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

use crate::scope::{Scope, ScopeGuard};

/// Arena size reserved by generated programs.
pub const DEFAULT_ARENA_CAPACITY: usize = 65_536;

pub struct Arena<'buf> {
    /// Start of the borrowed buffer.
    base: NonNull<u8>,
    /// Length of the borrowed buffer.
    capacity: usize,
    /// Allocation cursor, always `<= capacity`.
    offset: Cell<usize>,
    _buf: PhantomData<&'buf mut [u8]>,
}

impl<'buf> Arena<'buf> {
    /// Wrap `buffer` without copying it. An empty buffer gives an arena
    /// that fails every allocation.
    pub fn new(buffer: &'buf mut [u8]) -> Self {
        let capacity = buffer.len();
        Self {
            base: NonNull::from(buffer).cast::<u8>(),
            capacity,
            offset: Cell::new(0),
            _buf: PhantomData,
        }
    }

    /// An arena with no backing buffer.
    pub fn unusable() -> Self {
        Self {
            base: NonNull::dangling(),
            capacity: 0,
            offset: Cell::new(0),
            _buf: PhantomData,
        }
    }

    /// Whether the arena has any backing storage at all.
    pub fn is_usable(&self) -> bool {
        self.capacity > 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes handed out since the arena was created or last rolled back.
    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.offset.get()
    }

    /// Bump-allocate `size` bytes.
    ///
    /// Returns `None` when the arena is unusable or fewer than `size`
    /// bytes remain; the cursor is left untouched in that case. The
    /// returned bytes are not zeroed and may hold data from allocations
    /// that were rolled back.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc(&self, size: usize) -> Option<&mut [u8]> {
        if !self.is_usable() {
            return None;
        }
        let start = self.offset.get();
        let end = start.checked_add(size).filter(|&end| end <= self.capacity)?;
        self.offset.set(end);
        // SAFETY: `start..end` lies within the borrowed buffer. The cursor
        // only moves backwards through `leave_scope`/`reset`, which need
        // `&mut self`, so no slice returned from an earlier `&self` borrow
        // can still be alive when this range is handed out again.
        Some(unsafe { slice::from_raw_parts_mut(self.base.as_ptr().add(start), size) })
    }

    /// Snapshot the cursor. Unusable arenas always report mark 0.
    pub fn enter_scope(&self) -> Scope {
        if self.is_usable() {
            Scope::new(self.offset.get())
        } else {
            Scope::new(0)
        }
    }

    /// Roll the cursor back to `scope`, clamping marks past the end of
    /// the buffer to `capacity`. Scopes taken from other arenas are not
    /// rejected.
    pub fn leave_scope(&mut self, scope: Scope) {
        if !self.is_usable() {
            return;
        }
        self.offset.set(scope.mark().min(self.capacity));
    }

    /// Enter a scope that is left when the returned guard is dropped.
    pub fn scope(&mut self) -> ScopeGuard<'_, 'buf> {
        ScopeGuard::new(self)
    }

    /// Discard every allocation.
    pub fn reset(&mut self) {
        self.offset.set(0);
    }
}

impl Default for Arena<'_> {
    fn default() -> Self {
        Self::unusable()
    }
}

impl<'buf> From<&'buf mut [u8]> for Arena<'buf> {
    fn from(buffer: &'buf mut [u8]) -> Self {
        Self::new(buffer)
    }
}

impl fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("offset", &self.offset.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_arena_starts_empty() {
        let mut buf = [0u8; 16];
        let arena = Arena::new(&mut buf);
        assert_eq!(arena.capacity(), 16);
        assert_eq!(arena.offset(), 0);
        assert_eq!(arena.remaining(), 16);
    }

    #[test]
    fn alloc_advances_offset() {
        let mut buf = [0u8; 16];
        let arena = Arena::new(&mut buf);
        let a = arena.alloc(5).unwrap();
        assert_eq!(a.len(), 5);
        assert_eq!(arena.offset(), 5);
        let b = arena.alloc(3).unwrap();
        assert_eq!(b.len(), 3);
        assert_eq!(arena.offset(), 8);
    }

    #[test]
    fn allocations_are_disjoint_and_ordered() {
        let mut buf = [0u8; 16];
        let arena = Arena::new(&mut buf);
        let a = arena.alloc(4).unwrap();
        let b = arena.alloc(4).unwrap();
        a.fill(0xAA);
        b.fill(0xBB);
        assert_eq!(b.as_ptr() as usize - a.as_ptr() as usize, 4);
        assert!(a.iter().all(|&x| x == 0xAA));
        assert!(b.iter().all(|&x| x == 0xBB));
    }

    #[test]
    fn exact_fit_succeeds_one_more_fails() {
        let mut buf = [0u8; 8];
        let arena = Arena::new(&mut buf);
        assert!(arena.alloc(3).is_some());
        assert!(arena.alloc(6).is_none());
        assert_eq!(arena.offset(), 3);
        assert!(arena.alloc(5).is_some());
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn huge_request_does_not_wrap() {
        let mut buf = [0u8; 8];
        let arena = Arena::new(&mut buf);
        arena.alloc(2).unwrap();
        assert!(arena.alloc(usize::MAX).is_none());
        assert!(arena.alloc(usize::MAX - 1).is_none());
        assert_eq!(arena.offset(), 2);
    }

    #[test]
    fn unusable_arena_never_allocates() {
        let arena = Arena::unusable();
        assert!(!arena.is_usable());
        assert!(arena.alloc(1).is_none());
        assert!(arena.alloc(0).is_none());

        let mut empty: [u8; 0] = [];
        let arena = Arena::new(&mut empty);
        assert!(arena.alloc(1).is_none());

        let arena = Arena::default();
        assert_eq!(arena.capacity(), 0);
        assert!(arena.alloc(1).is_none());
    }

    #[test]
    fn from_slice_wraps_without_copy() {
        let mut buf = [7u8; 6];
        let ptr = buf.as_ptr();
        let arena = Arena::from(&mut buf[..]);
        assert_eq!(arena.capacity(), 6);
        let span = arena.alloc(2).unwrap();
        assert_eq!(span.as_ptr(), ptr);
        assert_eq!(&span[..], &[7u8, 7][..]);
    }

    #[test]
    fn leave_scope_restores_mark() {
        let mut buf = [0u8; 16];
        let mut arena = Arena::new(&mut buf);
        arena.alloc(3).unwrap();
        let scope = arena.enter_scope();
        arena.alloc(7).unwrap();
        arena.leave_scope(scope);
        assert_eq!(arena.offset(), 3);
    }

    #[test]
    fn leave_scope_clamps_foreign_mark() {
        let mut big = [0u8; 64];
        let large = Arena::new(&mut big);
        large.alloc(40).unwrap();
        let scope = large.enter_scope();

        let mut small = [0u8; 8];
        let mut arena = Arena::new(&mut small);
        arena.leave_scope(scope);
        assert_eq!(arena.offset(), 8);
        assert!(arena.alloc(1).is_none());
    }

    #[test]
    fn unusable_arena_ignores_scopes() {
        let mut arena = Arena::unusable();
        let scope = arena.enter_scope();
        assert_eq!(scope.mark(), 0);
        arena.leave_scope(Scope::new(12));
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn reset_discards_everything() {
        let mut buf = [0u8; 4];
        let mut arena = Arena::new(&mut buf);
        arena.alloc(4).unwrap();
        arena.reset();
        assert_eq!(arena.remaining(), 4);
    }
}
