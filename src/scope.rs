//! Scope marks for bulk rollback of an [`Arena`].

use std::ops::{Deref, DerefMut};

use crate::arena::Arena;

/// Saved arena cursor.
///
/// A scope only means something for the arena it was taken from. It is
/// not tagged with that arena; applying it elsewhere clamps to the other
/// arena's capacity instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Scope {
    mark: usize,
}

impl Scope {
    pub(crate) fn new(mark: usize) -> Self {
        Self { mark }
    }

    pub fn mark(&self) -> usize {
        self.mark
    }
}

/// Snapshot `arena`, or mark 0 when there is no arena.
pub fn enter_scope(arena: Option<&Arena<'_>>) -> Scope {
    arena.map_or(Scope::new(0), Arena::enter_scope)
}

/// Roll `arena` back to `scope`. No-op when there is no arena.
pub fn leave_scope(arena: Option<&mut Arena<'_>>, scope: Scope) {
    if let Some(arena) = arena {
        arena.leave_scope(scope);
    }
}

/// Scope that is left on drop.
///
/// Derefs to the arena, so allocations made through the guard borrow it
/// and cannot outlive it. Calling [`Arena::scope`] on a guard opens a
/// nested scope.
#[must_use]
pub struct ScopeGuard<'a, 'buf> {
    arena: &'a mut Arena<'buf>,
    scope: Scope,
}

impl<'a, 'buf> ScopeGuard<'a, 'buf> {
    pub(crate) fn new(arena: &'a mut Arena<'buf>) -> Self {
        let scope = arena.enter_scope();
        Self { arena, scope }
    }

    /// The mark this guard restores on drop.
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

impl<'buf> Deref for ScopeGuard<'_, 'buf> {
    type Target = Arena<'buf>;

    fn deref(&self) -> &Self::Target {
        self.arena
    }
}

impl DerefMut for ScopeGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.arena
    }
}

impl Drop for ScopeGuard<'_, '_> {
    fn drop(&mut self) {
        self.arena.leave_scope(self.scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_without_arena_is_zero() {
        assert_eq!(enter_scope(None).mark(), 0);
    }

    #[test]
    fn leave_without_arena_is_noop() {
        leave_scope(None, Scope::new(5));
    }

    #[test]
    fn free_functions_round_trip() {
        let mut buf = [0u8; 10];
        let mut arena = Arena::new(&mut buf);
        arena.alloc(2).unwrap();
        let scope = enter_scope(Some(&arena));
        assert_eq!(scope.mark(), 2);
        arena.alloc(6).unwrap();
        leave_scope(Some(&mut arena), scope);
        assert_eq!(arena.offset(), 2);
    }

    #[test]
    fn scope_can_be_reapplied() {
        let mut buf = [0u8; 10];
        let mut arena = Arena::new(&mut buf);
        let scope = arena.enter_scope();
        arena.alloc(4).unwrap();
        arena.leave_scope(scope);
        arena.alloc(9).unwrap();
        arena.leave_scope(scope);
        assert_eq!(arena.offset(), 0);
    }

    #[test]
    fn guard_rolls_back_on_drop() {
        let mut buf = [0u8; 32];
        let mut arena = Arena::new(&mut buf);
        arena.alloc(3).unwrap();
        {
            let guard = arena.scope();
            assert_eq!(guard.scope().mark(), 3);
            guard.alloc(10).unwrap();
            assert_eq!(guard.offset(), 13);
        }
        assert_eq!(arena.offset(), 3);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut buf = [0u8; 32];
        let mut arena = Arena::new(&mut buf);
        {
            let mut outer = arena.scope();
            outer.alloc(4).unwrap();
            {
                let inner = Arena::scope(&mut outer);
                inner.alloc(8).unwrap();
                assert_eq!(inner.offset(), 12);
            }
            assert_eq!(outer.offset(), 4);
        }
        assert_eq!(arena.offset(), 0);
    }
}
