use alloc::boxed::Box;
use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

/// An owning heap indirection that lets a variant contain itself.
///
/// A type like `struct Node { next: Variant![(), Node] }` has infinite size.
/// Declaring the alternative as `rec Node` stores it as `Recursive<Node>`
/// instead, which is one pointer wide.
///
/// Cloning allocates a deep copy of the payload. Assignment through
/// [`assign`](Recursive::assign) or [`Clone::clone_from`] writes into the
/// existing allocation. Comparison, hashing and formatting delegate to the
/// payload.
///
/// # Examples
///
/// ```rust
/// use tvariant::Recursive;
///
/// let mut a = Recursive::new(vec![1, 2]);
/// let b = a.clone();
/// a.get_mut().push(3);
///
/// assert_eq!(*b, [1, 2]);
/// assert_eq!(*a, [1, 2, 3]);
/// ```
pub struct Recursive<T> {
    item: Box<T>,
}

impl<T> Recursive<T> {
    pub fn new(value: T) -> Self {
        Recursive {
            item: Box::new(value),
        }
    }

    pub fn get(&self) -> &T {
        &self.item
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.item
    }

    pub fn into_inner(self) -> T {
        *self.item
    }

    /// Replaces the payload without reallocating.
    pub fn assign(&mut self, value: T) -> &mut Self {
        *self.item = value;
        self
    }
}

impl<T> From<T> for Recursive<T> {
    fn from(value: T) -> Self {
        Recursive::new(value)
    }
}

impl<T> Deref for Recursive<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> DerefMut for Recursive<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: Clone> Clone for Recursive<T> {
    fn clone(&self) -> Self {
        Recursive::new(T::clone(&self.item))
    }

    fn clone_from(&mut self, source: &Self) {
        self.item.as_mut().clone_from(&source.item);
    }
}

impl<T: Default> Default for Recursive<T> {
    fn default() -> Self {
        Recursive::new(T::default())
    }
}

impl<T: PartialEq> PartialEq for Recursive<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.item == *other.item
    }
}

impl<T: Eq> Eq for Recursive<T> {}

impl<T: PartialOrd> PartialOrd for Recursive<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.item.as_ref().partial_cmp(other.item.as_ref())
    }
}

impl<T: Ord> Ord for Recursive<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.item.as_ref().cmp(other.item.as_ref())
    }
}

impl<T: Hash> Hash for Recursive<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item.as_ref().hash(state)
    }
}

impl<T: fmt::Debug> fmt::Debug for Recursive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.item.as_ref(), f)
    }
}

impl<T: fmt::Display> fmt::Display for Recursive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.item.as_ref(), f)
    }
}

#[cfg(test)]
mod tests {
    use core::ptr;
    use std::string::{String, ToString};

    use super::*;

    #[test]
    fn assign_keeps_allocation() {
        let mut r = Recursive::new("one".to_string());
        let slot = ptr::from_ref(r.get());

        r.assign("two".to_string());
        assert_eq!(ptr::from_ref(r.get()), slot);

        let source = Recursive::new("three".to_string());
        r.clone_from(&source);
        assert_eq!(ptr::from_ref(r.get()), slot);
        assert_eq!(*r, "three");
    }

    #[test]
    fn clone_is_deep() {
        let a = Recursive::new(String::from("left"));
        let mut b = a.clone();
        assert_ne!(ptr::from_ref(a.get()), ptr::from_ref(b.get()));

        b.push_str("-changed");
        assert_eq!(*a, "left");
        assert_eq!(*b, "left-changed");
    }

    #[test]
    fn move_keeps_heap_slot() {
        let a = Recursive::new(7u64);
        let slot = ptr::from_ref(a.get());
        let b = a;
        assert_eq!(ptr::from_ref(b.get()), slot);
    }

    #[test]
    fn comparisons_delegate() {
        let a = Recursive::new(1);
        let b = Recursive::new(2);
        assert!(a < b);
        assert_eq!(a, Recursive::from(1));
        assert_eq!(a.cmp(&b), 1.cmp(&2));
        assert_eq!(std::format!("{a:?} {b}"), "1 2");
    }
}
