//! Constant function-pointer tables that resolve the active tag to a typed
//! operation.
//!
//! Every operation on a [`Variant`] (dropping, cloning, comparing, hashing,
//! user visitation) is a table of [`MAX_ALTERNATIVES`] function pointers, one
//! per alternative, computed at compile time for each list and operation. A
//! list `(Head, Tail)` builds its table by [`shift`]ing the entry for `Head` in
//! front of the table of `Tail`; the empty list contributes [`vacant`] entries
//! that are never called. Looking up the active entry is a single index, no
//! matter how many alternatives there are.
//!
//! The traits here cover user visitors. Two families exist:
//!
//! - [`Dispatch`], [`DispatchMut`] and [`DispatchOwned`] hand the visitor each
//!   alternative exactly as declared, so a `rec T` alternative is seen as
//!   [`Recursive<T>`](crate::Recursive).
//! - [`DispatchUnwrapped`] and [`DispatchUnwrappedMut`] hand the visitor the
//!   payload of a `rec T` alternative instead.
//!
//! [`Variant`]: crate::Variant

use crate::{
    repr::{Node, VariantList, unwrap_head},
    visit::{Visit, VisitMut, VisitOwned, Visitor},
};

/// The largest number of alternatives a single variant can declare.
pub const MAX_ALTERNATIVES: usize = 16;

/// A per-alternative operation table, indexed by tag.
pub type Table<F> = [F; MAX_ALTERNATIVES];

/// Prepends `head` to `tail`, dropping the last (vacant) slot.
pub const fn shift<F: Copy>(head: F, tail: &Table<F>) -> Table<F> {
    let t = tail;
    [
        head, t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7], t[8], t[9], t[10], t[11], t[12],
        t[13], t[14],
    ]
}

/// A table whose every slot is `entry`.
pub const fn vacant<F: Copy>(entry: F) -> Table<F> {
    [entry; MAX_ALTERNATIVES]
}

pub type RefThunk<V> = unsafe fn(*const (), &mut V) -> <V as Visitor>::Output;
pub type MutThunk<V> = unsafe fn(*mut (), &mut V) -> <V as Visitor>::Output;
pub type OwnedThunk<V> = unsafe fn(*mut (), V) -> <V as Visitor>::Output;

/// Lists whose every alternative can be visited by shared reference with `V`.
pub trait Dispatch<V: Visitor>: VariantList {
    #[doc(hidden)]
    const TABLE: Table<RefThunk<V>>;
}

/// Lists whose every alternative can be visited by mutable reference with `V`.
pub trait DispatchMut<V: Visitor>: VariantList {
    #[doc(hidden)]
    const TABLE: Table<MutThunk<V>>;
}

/// Lists whose every alternative can be consumed by `V`.
pub trait DispatchOwned<V: Visitor>: VariantList {
    #[doc(hidden)]
    const TABLE: Table<OwnedThunk<V>>;
}

/// Like [`Dispatch`], with `rec T` alternatives seen as `T`.
pub trait DispatchUnwrapped<V: Visitor>: VariantList {
    #[doc(hidden)]
    const TABLE: Table<RefThunk<V>>;
}

/// Like [`DispatchMut`], with `rec T` alternatives seen as `T`.
pub trait DispatchUnwrappedMut<V: Visitor>: VariantList {
    #[doc(hidden)]
    const TABLE: Table<MutThunk<V>>;
}

unsafe fn visit_ref<T, V: Visit<T>>(ptr: *const (), visitor: &mut V) -> V::Output {
    visitor.visit(unsafe { &*ptr.cast::<T>() })
}

unsafe fn visit_mut<T, V: VisitMut<T>>(ptr: *mut (), visitor: &mut V) -> V::Output {
    visitor.visit_mut(unsafe { &mut *ptr.cast::<T>() })
}

unsafe fn visit_owned<T, V: VisitOwned<T>>(ptr: *mut (), visitor: V) -> V::Output {
    visitor.visit_owned(unsafe { ptr.cast::<T>().read() })
}

unsafe fn visit_unwrapped<L, V>(ptr: *const (), visitor: &mut V) -> V::Output
where
    L: Node,
    V: Visit<L::Inner>,
{
    visitor.visit(unsafe { unwrap_head::<L>(ptr) })
}

unsafe fn visit_unwrapped_mut<L, V>(ptr: *mut (), visitor: &mut V) -> V::Output
where
    L: Node,
    V: VisitMut<L::Inner>,
{
    visitor.visit_mut(L::inner_mut(unsafe { &mut *ptr.cast::<L::Head>() }))
}

unsafe fn vacant_ref<V: Visitor>(_: *const (), _: &mut V) -> V::Output {
    unreachable!("dispatch past the last alternative")
}

unsafe fn vacant_mut<V: Visitor>(_: *mut (), _: &mut V) -> V::Output {
    unreachable!("dispatch past the last alternative")
}

unsafe fn vacant_owned<V: Visitor>(_: *mut (), _: V) -> V::Output {
    unreachable!("dispatch past the last alternative")
}

impl<V: Visitor> Dispatch<V> for () {
    const TABLE: Table<RefThunk<V>> = vacant(vacant_ref::<V> as RefThunk<V>);
}

impl<V, L> Dispatch<V> for L
where
    V: Visit<L::Head>,
    L: Node,
    L::Tail: Dispatch<V>,
{
    const TABLE: Table<RefThunk<V>> = shift(
        visit_ref::<L::Head, V> as RefThunk<V>,
        &<L::Tail as Dispatch<V>>::TABLE,
    );
}

impl<V: Visitor> DispatchMut<V> for () {
    const TABLE: Table<MutThunk<V>> = vacant(vacant_mut::<V> as MutThunk<V>);
}

impl<V, L> DispatchMut<V> for L
where
    V: VisitMut<L::Head>,
    L: Node,
    L::Tail: DispatchMut<V>,
{
    const TABLE: Table<MutThunk<V>> = shift(
        visit_mut::<L::Head, V> as MutThunk<V>,
        &<L::Tail as DispatchMut<V>>::TABLE,
    );
}

impl<V: Visitor> DispatchOwned<V> for () {
    const TABLE: Table<OwnedThunk<V>> = vacant(vacant_owned::<V> as OwnedThunk<V>);
}

impl<V, L> DispatchOwned<V> for L
where
    V: VisitOwned<L::Head>,
    L: Node,
    L::Tail: DispatchOwned<V>,
{
    const TABLE: Table<OwnedThunk<V>> = shift(
        visit_owned::<L::Head, V> as OwnedThunk<V>,
        &<L::Tail as DispatchOwned<V>>::TABLE,
    );
}

impl<V: Visitor> DispatchUnwrapped<V> for () {
    const TABLE: Table<RefThunk<V>> = vacant(vacant_ref::<V> as RefThunk<V>);
}

impl<V, L> DispatchUnwrapped<V> for L
where
    V: Visit<L::Inner>,
    L: Node,
    L::Tail: DispatchUnwrapped<V>,
{
    const TABLE: Table<RefThunk<V>> = shift(
        visit_unwrapped::<L, V> as RefThunk<V>,
        &<L::Tail as DispatchUnwrapped<V>>::TABLE,
    );
}

impl<V: Visitor> DispatchUnwrappedMut<V> for () {
    const TABLE: Table<MutThunk<V>> = vacant(vacant_mut::<V> as MutThunk<V>);
}

impl<V, L> DispatchUnwrappedMut<V> for L
where
    V: VisitMut<L::Inner>,
    L: Node,
    L::Tail: DispatchUnwrappedMut<V>,
{
    const TABLE: Table<MutThunk<V>> = shift(
        visit_unwrapped_mut::<L, V> as MutThunk<V>,
        &<L::Tail as DispatchUnwrappedMut<V>>::TABLE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_prepends() {
        let tail = vacant(0u8);
        let table = shift(2, &shift(1, &tail));
        assert_eq!(table[..3], [2, 1, 0]);
        assert_eq!(table.len(), MAX_ALTERNATIVES);
    }

    #[test]
    fn shift_drops_last_slot() {
        let mut tail = vacant(0u8);
        tail[MAX_ALTERNATIVES - 1] = 9;
        let table = shift(1, &tail);
        assert!(!table.contains(&9));
    }
}
