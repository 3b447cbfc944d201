#![doc = include_str!("../README.md")]
#![no_std]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]

extern crate alloc;
#[cfg(test)]
extern crate std;

// Derive expansions name `tvariant::...`; in-crate tests need the alias.
#[cfg(test)]
extern crate self as tvariant;

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr,
};

pub mod derive;
pub mod dispatch;
mod discriminant;
mod error;
pub mod index;
mod macros;
mod recursive;
pub mod repr;
pub mod visit;

pub use tvariant_macros::Discriminant;

pub use self::{
    discriminant::Discriminant,
    error::VariantError,
    recursive::Recursive,
    visit::{
        Expose, apply_visitor, apply_visitor_mut, apply_visitor2, apply_visitor3, get, get_mut,
        is, visit, which,
    },
};
use self::{
    derive::{
        VariantClone, VariantDebug, VariantDefault, VariantDisplay, VariantEq, VariantHash,
        VariantOrd, VariantPartialEq, VariantPartialOrd,
    },
    dispatch::{Dispatch, DispatchMut, DispatchOwned, DispatchUnwrapped, DispatchUnwrappedMut},
    index::Index,
    repr::{Node, Split, SplitInner, VariantList},
    visit::Visitor,
};

/// A tagged union holding exactly one value of one of the alternatives in the
/// type list `L`.
///
/// `K` is the tag type reported by [`which`](Variant::which); any
/// [`Discriminant`] works, `usize` by default. Types are usually spelled with
/// the [`Variant!`] macro.
///
/// # Examples
///
/// ```rust
/// use tvariant::Variant;
///
/// let mut v: Variant![usize; i32, String] = Variant::default();
/// assert_eq!(v.which(), 0);
/// assert_eq!(v.get::<i32, _>(), Some(&0));
///
/// v.set(String::from("hi"));
/// assert_eq!(v.which(), 1);
/// assert_eq!(v.get::<String, _>().map(String::as_str), Some("hi"));
/// assert_eq!(v.get::<i32, _>(), None);
/// ```
///
/// Conversion picks the alternative by type at compile time, so a value that
/// matches no alternative, or more than one, does not compile:
///
/// ```rust,compile_fail
/// use tvariant::Variant;
///
/// let v: Variant![i32, i32, String] = Variant::new(1i32);
/// ```
///
/// So does a variant with a single alternative:
///
/// ```rust,compile_fail
/// use tvariant::Variant;
///
/// let v: Variant![u8] = Variant::new(1u8);
/// ```
pub struct Variant<L: VariantList, K = usize> {
    tag: u8,
    data: ManuallyDrop<L::Repr>,
    marker: PhantomData<fn() -> K>,
}

impl<L: VariantList, K> Variant<L, K> {
    fn from_raw(tag: u8, data: L::Repr) -> Self {
        Variant {
            tag,
            data: ManuallyDrop::new(data),
            marker: PhantomData,
        }
    }

    /// Validates the tag before it is used to index a dispatch table.
    fn active(&self) -> usize {
        let index = usize::from(self.tag);
        assert!(
            index < usize::from(L::LEN),
            "variant tag {index} is out of range for {} alternatives",
            L::LEN
        );
        index
    }

    fn storage(&self) -> *const () {
        ptr::from_ref::<L::Repr>(&self.data).cast()
    }

    fn storage_mut(&mut self) -> *mut () {
        ptr::from_mut::<L::Repr>(&mut self.data).cast()
    }

    /// Installs a new member, then drops the old one.
    fn emplace(&mut self, tag: u8, data: L::Repr) {
        let index = self.active();
        let mut old = mem::replace(&mut self.data, ManuallyDrop::new(data));
        self.tag = tag;
        unsafe { (L::DESTROY[index])(ptr::from_mut::<L::Repr>(&mut old).cast()) }
    }

    /// The position of the active alternative.
    pub fn index(&self) -> usize {
        self.active()
    }

    /// The name of the active alternative's type, as declared.
    pub fn type_name(&self) -> &'static str {
        (L::TYPE_NAMES[self.active()])()
    }
}

impl<L: VariantList, K: Discriminant> Variant<L, K> {
    /// The tag of the active alternative.
    pub fn which(&self) -> K {
        const { assert!(K::COUNT >= L::LEN as usize, "the tag type cannot name every alternative") };
        match K::from_index(self.active()) {
            Some(tag) => tag,
            None => unreachable!("tag type rejected an index below its count"),
        }
    }

    /// Default-constructs the alternative named by `tag`.
    ///
    /// # Panics
    ///
    /// Panics if `tag` names no alternative. See [`try_make`] for a fallible
    /// version.
    ///
    /// [`try_make`]: Variant::try_make
    pub fn make(tag: K) -> Self
    where
        L: VariantDefault,
    {
        match Self::try_make(tag) {
            Ok(this) => this,
            Err(err) => panic!("{err}"),
        }
    }

    /// Default-constructs the alternative named by `tag`.
    pub fn try_make(tag: K) -> Result<Self, VariantError>
    where
        L: VariantDefault,
    {
        const { assert!(L::LEN >= 2, "a variant needs at least two alternatives") };
        let index = tag.index();
        if index >= usize::from(L::LEN) {
            return Err(VariantError::TagOutOfRange {
                index,
                len: usize::from(L::LEN),
            });
        }

        let mut data = MaybeUninit::<L::Repr>::uninit();
        unsafe {
            (L::DEFAULT[index])(data.as_mut_ptr().cast());
            Ok(Self::from_raw(index as u8, data.assume_init()))
        }
    }
}

impl<L: VariantList, K> Variant<L, K> {
    /// Constructs a variant holding `value`.
    ///
    /// The alternative is found by type; the index `U` is left to inference.
    pub fn new<T, U>(value: T) -> Self
    where
        L: Split<T, U>,
        U: Index,
    {
        const { assert!(L::LEN >= 2, "a variant needs at least two alternatives") };
        Self::from_raw(U::TAG, L::from_data(value))
    }

    /// Constructs a variant from the payload of a `rec` alternative, boxing
    /// it. Plain alternatives are accepted as well.
    pub fn new_unwrapped<T, U>(value: T) -> Self
    where
        L: SplitInner<T, U>,
        U: Index,
    {
        const { assert!(L::LEN >= 2, "a variant needs at least two alternatives") };
        Self::from_raw(U::TAG, L::from_inner(value))
    }

    pub fn get<T, U>(&self) -> Option<&T>
    where
        L: Split<T, U>,
        U: Index,
    {
        (self.tag == U::TAG).then(|| unsafe { &*L::as_ptr(&self.data) })
    }

    pub fn get_mut<T, U>(&mut self) -> Option<&mut T>
    where
        L: Split<T, U>,
        U: Index,
    {
        (self.tag == U::TAG).then(|| unsafe { &mut *L::as_mut_ptr(&mut self.data) })
    }

    /// Like [`get`](Variant::get), but a `rec T` alternative is returned as
    /// `&T`.
    pub fn get_unwrapped<T, U>(&self) -> Option<&T>
    where
        L: SplitInner<T, U>,
        U: Index,
    {
        (self.tag == U::TAG).then(|| unsafe { L::inner_ref(&self.data) })
    }

    pub fn get_unwrapped_mut<T, U>(&mut self) -> Option<&mut T>
    where
        L: SplitInner<T, U>,
        U: Index,
    {
        (self.tag == U::TAG).then(|| unsafe { L::inner_mut(&mut self.data) })
    }

    /// Like [`get`](Variant::get), but reports which alternative is active
    /// instead.
    pub fn try_get<T, U>(&self) -> Result<&T, VariantError>
    where
        L: Split<T, U>,
        U: Index,
    {
        self.get().ok_or_else(|| VariantError::WrongAlternative {
            expected: core::any::type_name::<T>(),
            found: self.type_name(),
        })
    }

    pub fn is<T, U>(&self) -> bool
    where
        L: Split<T, U>,
        U: Index,
    {
        self.tag == U::TAG
    }

    /// Moves the active member out if it is the alternative `T`, or gives the
    /// variant back.
    pub fn try_unwrap<T, U>(self) -> Result<T, Self>
    where
        L: Split<T, U>,
        U: Index,
    {
        if self.tag != U::TAG {
            return Err(self);
        }
        let mut this = ManuallyDrop::new(self);
        Ok(unsafe { L::into_data_unchecked(ManuallyDrop::take(&mut this.data)) })
    }

    /// Like [`try_unwrap`](Variant::try_unwrap), but a `rec T` alternative
    /// is unboxed.
    pub fn try_unwrap_inner<T, U>(self) -> Result<T, Self>
    where
        L: SplitInner<T, U>,
        U: Index,
    {
        if self.tag != U::TAG {
            return Err(self);
        }
        let mut this = ManuallyDrop::new(self);
        Ok(unsafe { L::into_inner_unchecked(ManuallyDrop::take(&mut this.data)) })
    }

    /// Assigns `value`, switching alternatives if needed.
    ///
    /// If `T` is already active the member is assigned in place; otherwise
    /// the old member is destroyed and `value` takes its place.
    pub fn set<T, U>(&mut self, value: T) -> &mut Self
    where
        L: Split<T, U>,
        U: Index,
    {
        if self.tag == U::TAG {
            unsafe { *L::as_mut_ptr(&mut self.data) = value };
        } else {
            self.emplace(U::TAG, L::from_data(value));
        }
        self
    }

    /// Move-assigns `source` into `self`.
    ///
    /// With equal tags the member is move-assigned in place; otherwise the
    /// old member is destroyed and replaced.
    pub fn assign(&mut self, source: Self) -> &mut Self {
        if self.tag == source.tag {
            let index = self.active();
            let mut source = ManuallyDrop::new(source);
            unsafe { (L::MOVE_ASSIGN[index])(source.storage_mut(), self.storage_mut()) };
        } else {
            *self = source;
        }
        self
    }

    /// Applies `visitor` to the active member, as declared.
    pub fn visit<V>(&self, mut visitor: V) -> V::Output
    where
        V: Visitor,
        L: Dispatch<V>,
    {
        let thunk = <L as Dispatch<V>>::TABLE[self.active()];
        unsafe { thunk(self.storage(), &mut visitor) }
    }

    pub fn visit_mut<V>(&mut self, mut visitor: V) -> V::Output
    where
        V: Visitor,
        L: DispatchMut<V>,
    {
        let thunk = <L as DispatchMut<V>>::TABLE[self.active()];
        unsafe { thunk(self.storage_mut(), &mut visitor) }
    }

    /// Consumes the variant, handing its active member to `visitor`.
    pub fn into_visit<V>(self, visitor: V) -> V::Output
    where
        V: Visitor,
        L: DispatchOwned<V>,
    {
        let thunk = <L as DispatchOwned<V>>::TABLE[self.active()];
        let mut this = ManuallyDrop::new(self);
        unsafe { thunk(this.storage_mut(), visitor) }
    }

    /// Applies `visitor` to the active member, with `rec T` alternatives
    /// seen as `T`.
    pub fn visit_unwrapped<V>(&self, mut visitor: V) -> V::Output
    where
        V: Visitor,
        L: DispatchUnwrapped<V>,
    {
        let thunk = <L as DispatchUnwrapped<V>>::TABLE[self.active()];
        unsafe { thunk(self.storage(), &mut visitor) }
    }

    pub fn visit_unwrapped_mut<V>(&mut self, mut visitor: V) -> V::Output
    where
        V: Visitor,
        L: DispatchUnwrappedMut<V>,
    {
        let thunk = <L as DispatchUnwrappedMut<V>>::TABLE[self.active()];
        unsafe { thunk(self.storage_mut(), &mut visitor) }
    }
}

impl<L, K> Default for Variant<L, K>
where
    L: Node,
    L::Head: Default,
{
    /// Default-constructs the first alternative.
    fn default() -> Self {
        const { assert!(L::LEN >= 2, "a variant needs at least two alternatives") };
        Self::from_raw(0, L::from_head(L::Head::default()))
    }
}

impl<L: VariantList, K> Drop for Variant<L, K> {
    fn drop(&mut self) {
        let index = self.active();
        unsafe { (L::DESTROY[index])(self.storage_mut()) }
    }
}

impl<L: VariantClone, K> Clone for Variant<L, K> {
    fn clone(&self) -> Self {
        let index = self.active();
        let mut data = MaybeUninit::<L::Repr>::uninit();
        unsafe {
            (L::CLONE[index])(self.storage(), data.as_mut_ptr().cast());
            Self::from_raw(self.tag, data.assume_init())
        }
    }

    /// Clones in place when both sides hold the same alternative; otherwise
    /// clones `source` into a temporary that replaces the current member.
    fn clone_from(&mut self, source: &Self) {
        if self.tag == source.tag {
            let index = self.active();
            unsafe { (L::CLONE_FROM[index])(source.storage(), self.storage_mut()) }
        } else {
            *self = source.clone();
        }
    }
}

impl<L: VariantPartialEq, K> PartialEq for Variant<L, K> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && unsafe { (L::EQ[self.active()])(self.storage(), other.storage()) }
    }
}

impl<L: VariantEq, K> Eq for Variant<L, K> {}

impl<L: VariantPartialOrd, K> PartialOrd for Variant<L, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.tag.cmp(&other.tag) {
            Ordering::Equal => unsafe {
                (L::PARTIAL_CMP[self.active()])(self.storage(), other.storage())
            },
            other => Some(other),
        }
    }
}

impl<L: VariantOrd, K> Ord for Variant<L, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag
            .cmp(&other.tag)
            .then_with(|| unsafe { (L::CMP[self.active()])(self.storage(), other.storage()) })
    }
}

/// Hashes the active member alone, so a variant hashes like the value it
/// holds.
impl<L: VariantHash, K> Hash for Variant<L, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        unsafe { (L::HASH[self.active()])(self.storage(), state) }
    }
}

impl<L: VariantDebug, K> fmt::Debug for Variant<L, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        unsafe { (L::DEBUG[self.active()])(self.storage(), f) }
    }
}

impl<L: VariantDisplay, K> fmt::Display for Variant<L, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        unsafe { (L::DISPLAY[self.active()])(self.storage(), f) }
    }
}

#[cfg(test)]
mod tests {
    use core::{cell::Cell, hash::BuildHasher};
    use std::{
        collections::hash_map::RandomState,
        format,
        string::{String, ToString},
        vec,
        vec::Vec,
    };

    use super::*;
    use crate::visit::{Visit, VisitMut, VisitOwned};

    std::thread_local! {
        static CREATED: Cell<usize> = const { Cell::new(0) };
        static DROPPED: Cell<usize> = const { Cell::new(0) };
        static CLONED: Cell<usize> = const { Cell::new(0) };
        static CLONED_FROM: Cell<usize> = const { Cell::new(0) };
    }

    fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) {
        counter.with(|c| c.set(c.get() + 1));
    }

    fn count(counter: &'static std::thread::LocalKey<Cell<usize>>) -> usize {
        counter.with(Cell::get)
    }

    /// An alternative that counts its constructions and destructions.
    #[derive(Debug, PartialEq)]
    struct Probe<const N: u8>(u32);

    impl<const N: u8> Probe<N> {
        fn new(value: u32) -> Self {
            bump(&CREATED);
            Probe(value)
        }
    }

    impl<const N: u8> Clone for Probe<N> {
        fn clone(&self) -> Self {
            bump(&CLONED);
            Probe::new(self.0)
        }

        fn clone_from(&mut self, source: &Self) {
            bump(&CLONED_FROM);
            self.0 = source.0;
        }
    }

    impl<const N: u8> Drop for Probe<N> {
        fn drop(&mut self) {
            bump(&DROPPED);
        }
    }

    type Probes = Variant![Probe<0>, Probe<1>, Probe<2>];

    #[test]
    fn default_then_set_string() {
        let mut v: Variant![usize; i32, String] = Variant::default();
        assert_eq!(v.which(), 0);
        assert_eq!(v.get::<i32, _>(), Some(&0));

        v.set(String::from("hi"));
        assert_eq!(v.which(), 1);
        assert_eq!(v.get::<String, _>().unwrap(), "hi");
        assert_eq!(v.get::<i32, _>(), None);
    }

    #[test]
    fn which_tracks_last_assignment() {
        let mut v: Variant![u8, char, String, ()] = Variant::new('x');
        assert_eq!(v.which(), 1);
        v.set(());
        assert_eq!(v.which(), 3);
        v.set(String::new());
        assert_eq!(v.which(), 2);
        v.set(3u8);
        assert_eq!(v.which(), 0);
        assert!(v.which() < 4);
    }

    #[test]
    fn round_trip() {
        let v: Variant![u8, char, String] = Variant::new(String::from("abc"));
        assert_eq!(v.get::<String, _>().map(String::as_str), Some("abc"));
        assert!(v.get::<u8, _>().is_none());
        assert!(v.get::<char, _>().is_none());
        assert!(v.is::<String, _>());
        assert!(!v.is::<char, _>());
    }

    #[test]
    fn duplicate_alternatives_by_index() {
        use crate::index::{U0, U1};

        let mut v: Variant![i32, i32, String] = Variant::new::<i32, U1>(5);
        assert_eq!(v.index(), 1);
        assert_eq!(v.get::<i32, U0>(), None);
        assert_eq!(v.get::<i32, U1>(), Some(&5));

        v.set::<i32, U0>(6);
        assert_eq!(v.index(), 0);
    }

    #[test]
    fn copy_is_independent() {
        let a: Variant![u8, Vec<u8>] = Variant::new(vec![1, 2]);
        let mut b = a.clone();
        b.get_mut::<Vec<u8>, _>().unwrap().push(3);

        assert_eq!(a.get::<Vec<u8>, _>().unwrap(), &[1, 2]);
        assert_eq!(b.get::<Vec<u8>, _>().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn move_transfers_tag_and_value() {
        let a: Variant![u8, String] = Variant::new(String::from("moved"));
        let b = a;
        assert_eq!(b.index(), 1);
        assert_eq!(b.get::<String, _>().unwrap(), "moved");

        let mut c: Variant![u8, String] = Variant::new(1u8);
        c.assign(b);
        assert_eq!(c.get::<String, _>().unwrap(), "moved");
    }

    #[test]
    fn cross_type_assignment_balances() {
        let created = count(&CREATED);
        let dropped = count(&DROPPED);

        {
            let mut v: Probes = Variant::new(Probe::<0>::new(0));
            for i in 0..30 {
                match i % 3 {
                    0 => v.set(Probe::<1>::new(i)),
                    1 => v.set(Probe::<2>::new(i)),
                    _ => v.set(Probe::<0>::new(i)),
                };
            }
            assert_eq!(count(&CREATED) - created, 31);
            assert_eq!(count(&DROPPED) - dropped, 30);
        }

        assert_eq!(count(&CREATED) - created, count(&DROPPED) - dropped);
    }

    #[test]
    fn same_tag_clone_from_is_in_place() {
        let a: Probes = Variant::new(Probe::<1>::new(10));
        let mut b: Probes = Variant::new(Probe::<1>::new(20));

        let (created, dropped, cloned) = (count(&CREATED), count(&DROPPED), count(&CLONED));
        b.clone_from(&a);
        assert_eq!(count(&CREATED), created);
        assert_eq!(count(&DROPPED), dropped);
        assert_eq!(count(&CLONED), cloned);
        assert_eq!(b.get::<Probe<1>, _>(), Some(&Probe(10)));
    }

    #[test]
    fn cross_tag_clone_from_replaces() {
        let a: Probes = Variant::new(Probe::<2>::new(1));
        let mut b: Probes = Variant::new(Probe::<0>::new(2));

        let (cloned, cloned_from, dropped) =
            (count(&CLONED), count(&CLONED_FROM), count(&DROPPED));
        b.clone_from(&a);
        assert_eq!(count(&CLONED), cloned + 1);
        assert_eq!(count(&CLONED_FROM), cloned_from);
        assert_eq!(count(&DROPPED), dropped + 1);
        assert_eq!(b, a);
    }

    #[test]
    fn same_tag_set_and_assign_keep_alternative() {
        let mut v: Variant![u8, String] = Variant::new(String::from("a"));
        v.set(String::from("b")).set(String::from("c"));
        assert_eq!(v.get::<String, _>().unwrap(), "c");

        let source: Variant![u8, String] = Variant::new(String::from("d"));
        assert_eq!(v.assign(source).get::<String, _>().unwrap(), "d");
    }

    #[test]
    fn same_tag_set_and_assign_drop_only_the_old_member() {
        let (created, dropped) = (count(&CREATED), count(&DROPPED));
        {
            let mut v: Probes = Variant::new(Probe::<1>::new(1));
            v.set(Probe::<1>::new(2));
            assert_eq!(count(&CREATED) - created, 2);
            assert_eq!(count(&DROPPED) - dropped, 1);

            let source: Probes = Variant::new(Probe::<1>::new(3));
            v.assign(source);
            assert_eq!(count(&CREATED) - created, 3);
            assert_eq!(count(&DROPPED) - dropped, 2, "moved-in source must not be dropped");
            assert_eq!(v.get::<Probe<1>, _>().map(|p| p.0), Some(3));
            assert_eq!(v.index(), 1);
        }
        assert_eq!(count(&CREATED) - created, 3);
        assert_eq!(count(&DROPPED) - dropped, 3);
    }

    #[test]
    fn equality_and_order() {
        type V = Variant![u8, String];
        let a: V = Variant::new(3u8);
        let b: V = Variant::new(200u8);
        let s: V = Variant::new(String::from("a"));

        assert_eq!(a, Variant::new(3u8));
        assert_ne!(a, b);
        assert_ne!(a, s);
        assert!(a < b);
        assert!(b < s, "tag decides before member");
        assert_eq!(s.cmp(&Variant::new(String::from("b"))), Ordering::Less);

        let mut all = vec![s.clone(), b.clone(), a.clone()];
        all.sort();
        assert_eq!(all, [a, b, s]);
    }

    #[test]
    fn partial_order_with_nan() {
        let a: Variant![f64, u8] = Variant::new(f64::NAN);
        assert_eq!(a.partial_cmp(&a.clone()), None);
        assert_ne!(a, a.clone());
    }

    #[test]
    fn hash_matches_member() {
        let state = RandomState::new();

        let v: Variant![u64, String] = Variant::new(5u64);
        assert_eq!(state.hash_one(&v), state.hash_one(5u64));

        let v: Variant![u64, String] = Variant::new(String::from("hash"));
        assert_eq!(state.hash_one(&v), state.hash_one("hash"));

        let w: Variant![char, String, rec String] = Variant::new(String::from("hash"));
        assert_eq!(state.hash_one(&v), state.hash_one(&w));
    }

    #[test]
    fn formatting() {
        let v: Variant![u8, String] = Variant::new(String::from("x"));
        assert_eq!(format!("{v:?}"), "\"x\"");
        assert_eq!(v.to_string(), "x");
    }

    #[test]
    fn factory_by_tag() {
        let v: Variant![u8, String, Vec<u8>] = Variant::make(1);
        assert_eq!(v.get::<String, _>().unwrap(), "");

        let err = <Variant![u8, String]>::try_make(2).unwrap_err();
        assert_eq!(err, VariantError::TagOutOfRange { index: 2, len: 2 });
    }

    #[test]
    #[should_panic(expected = "does not name any")]
    fn factory_rejects_bad_tag() {
        let _ = <Variant![u8, String]>::make(9);
    }

    #[test]
    fn try_get_names_types() {
        let v: Variant![u8, String] = Variant::new(1u8);
        assert_eq!(v.type_name(), "u8");
        let err = v.try_get::<String, _>().unwrap_err();
        assert!(matches!(
            err,
            VariantError::WrongAlternative { found: "u8", .. }
        ));
        assert!(err.to_string().contains("String"));
        assert_eq!(v.try_get::<u8, _>(), Ok(&1));
    }

    #[test]
    fn try_unwrap() {
        let v: Variant![u8, String] = Variant::new(String::from("out"));
        let v = v.try_unwrap::<u8, _>().unwrap_err();
        assert_eq!(v.try_unwrap::<String, _>().unwrap(), "out");
    }

    #[test]
    fn try_unwrap_does_not_double_drop() {
        let dropped = count(&DROPPED);
        let v: Probes = Variant::new(Probe::<2>::new(4));
        let probe = v.try_unwrap::<Probe<2>, _>().unwrap();
        assert_eq!(count(&DROPPED), dropped);
        drop(probe);
        assert_eq!(count(&DROPPED), dropped + 1);
    }

    struct Grow;

    impl Visitor for Grow {
        type Output = usize;
    }

    impl VisitMut<String> for Grow {
        fn visit_mut(&mut self, value: &mut String) -> usize {
            value.push('!');
            value.len()
        }
    }

    impl VisitMut<u8> for Grow {
        fn visit_mut(&mut self, value: &mut u8) -> usize {
            *value += 1;
            1
        }
    }

    impl VisitMut<Vec<u8>> for Grow {
        fn visit_mut(&mut self, value: &mut Vec<u8>) -> usize {
            value.push(0);
            value.len()
        }
    }

    struct IntoLen;

    impl Visitor for IntoLen {
        type Output = usize;
    }

    impl VisitOwned<String> for IntoLen {
        fn visit_owned(self, value: String) -> usize {
            value.len()
        }
    }

    impl VisitOwned<Vec<u8>> for IntoLen {
        fn visit_owned(self, value: Vec<u8>) -> usize {
            value.len()
        }
    }

    impl<const N: u8> VisitOwned<Probe<N>> for IntoLen {
        fn visit_owned(self, value: Probe<N>) -> usize {
            value.0 as usize
        }
    }

    #[test]
    fn visit_mut_and_owned() {
        let mut v: Variant![String, Vec<u8>] = Variant::new(String::from("hey"));
        assert_eq!(v.visit_mut(Grow), 4);
        assert_eq!(v.get::<String, _>().unwrap(), "hey!");
        assert_eq!(v.into_visit(IntoLen), 4);

        let dropped = count(&DROPPED);
        let p: Probes = Variant::new(Probe::<0>::new(8));
        assert_eq!(p.into_visit(IntoLen), 8);
        assert_eq!(count(&DROPPED), dropped + 1);
    }

    struct Name;

    impl Visitor for Name {
        type Output = &'static str;
    }

    impl Visit<u8> for Name {
        fn visit(&mut self, _: &u8) -> &'static str {
            "u8"
        }
    }

    impl Visit<Recursive<String>> for Name {
        fn visit(&mut self, _: &Recursive<String>) -> &'static str {
            "boxed"
        }
    }

    impl Visit<String> for Name {
        fn visit(&mut self, _: &String) -> &'static str {
            "string"
        }
    }

    #[test]
    fn raw_and_unwrapped_visitation() {
        let v: Variant![u8, rec String] = Variant::new_unwrapped(String::from("r"));
        assert_eq!(v.visit(Name), "boxed");
        assert_eq!(v.visit_unwrapped(Name), "string");
        assert_eq!(v.get::<Recursive<String>, _>().map(|r| r.as_str()), Some("r"));
        assert_eq!(v.get_unwrapped::<String, _>().unwrap(), "r");
        assert_eq!(v.to_string(), "r");
        assert_eq!(v.try_unwrap_inner::<String, _>().unwrap(), "r");
    }

    #[test]
    fn unwrapped_mutation() {
        let mut v: Variant![u8, rec String] = Variant::new(Recursive::new(String::from("a")));
        v.get_unwrapped_mut::<String, _>().unwrap().push('b');
        assert_eq!(v.visit_unwrapped_mut(Grow), 3);
        assert_eq!(v.get_unwrapped::<String, _>().unwrap(), "ab!");
        assert!(v.get_unwrapped::<u8, _>().is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn corrupted_tag_is_caught() {
        let mut v: ManuallyDrop<Variant![u8, u16]> = ManuallyDrop::new(Variant::new(1u8));
        v.tag = 7;
        let _ = v.index();
    }
}
