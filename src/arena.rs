//! Slot allocator backing the splay tree's nodes.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object allocated in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle(usize);

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object.
///
/// Freed blocks are chained into a free list and reused by later allocations, so a tree that
/// repeatedly inserts and deletes does not grow its storage. All objects are dropped together
/// with the arena.
pub struct TypedArena<T> {
    head: Option<Handle>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    pub fn new() -> Self {
        TypedArena {
            head: None,
            blocks: Vec::new(),
            len: 0,
        }
    }

    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Handle(self.blocks.len() - 1)
            },
            Some(handle) => {
                let vacant_block = mem::replace(&mut self.blocks[handle.0], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next) => self.head = next,
                    Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
                }
                handle
            },
        }
    }

    /// Deallocates an object and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of bounds or refers to a vacant block.
    pub fn free(&mut self, handle: Handle) -> T {
        let next = self.head;
        let old_block = match self.blocks.get_mut(handle.0) {
            Some(block) => mem::replace(block, Block::Vacant(next)),
            None => panic!("Error: attempting to free invalid block."),
        };
        match old_block {
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
            Block::Vacant(_) => panic!("Error: attempting to free vacant block."),
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.blocks.get(handle.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.0) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.head = None;
        self.blocks.clear();
        self.len = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<i32> = TypedArena::new();
        arena.free(Handle(0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new();
        let handle = arena.allocate(0);
        arena.free(handle);
        arena.free(handle);
    }

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new();
        assert_eq!(arena.allocate(0), Handle(0));
        assert_eq!(arena.allocate(1), Handle(1));
        assert_eq!(arena.allocate(2), Handle(2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_block() {
        let mut arena = TypedArena::new();
        let first = arena.allocate(0);
        let second = arena.allocate(1);
        assert_eq!(arena.free(first), 0);
        assert_eq!(arena.free(second), 1);
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.allocate(2), second);
        assert_eq!(arena.allocate(3), first);
        assert_eq!(arena.allocate(4), Handle(2));
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new();
        let handle = arena.allocate(0);
        arena.free(handle);
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.get(Handle(7)), None);
    }

    #[test]
    fn test_index_mut() {
        let mut arena = TypedArena::new();
        let handle = arena.allocate(0);
        arena[handle] += 1;
        assert_eq!(arena[handle], 1);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new();
        let handle = arena.allocate(0);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(handle), None);
    }
}
