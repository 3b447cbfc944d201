//! The module dealing with the underlying representation of the [`Variant`]
//! type.
//!
//! # Implementation details
//!
//! Alternatives are declared as a type list: `()` is the empty list,
//! `(T, Tail)` prepends `T`, and [`Rec<T, Tail>`] prepends `T` stored behind a
//! [`Recursive`] box. Each list maps to a hand-written union in which every
//! alternative starts at offset 0:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::ManuallyDrop;
//!
//! struct Nil(Infallible);
//! #[repr(C)]
//! union Cons<T, Next> {
//!     data: ManuallyDrop<T>,
//!     next: ManuallyDrop<Next>,
//! }
//!
//! // For example only. Not actually defined.
//! struct RawVariant2<T1, T2> {
//!     tag: u8,
//!     data: Cons<T1, Cons<T2, Nil>>,
//! }
//! ```
//!
//! Because the storage address is the address of every alternative, the
//! dispatch tables in [`crate::dispatch`] pass it around as an erased pointer
//! and each table entry casts it back to its own alternative type.
//!
//! [`Variant`]: crate::Variant

use core::{any, convert::Infallible, marker::PhantomData, mem::ManuallyDrop, ptr};

use crate::{
    Recursive,
    dispatch::{MAX_ALTERNATIVES, Table, shift, vacant},
    index::{Index, UInt, UTerm},
};

/// The terminator type of the underlying union of the [`Variant`] type.
///
/// [`Variant`]: crate::Variant
pub struct Nil(pub(crate) Infallible);

/// The accumulator type of the underlying union of the [`Variant`] type.
///
/// [`Variant`]: crate::Variant
#[repr(C)]
pub union Cons<T, U> {
    pub(crate) data: ManuallyDrop<T>,
    pub(crate) next: ManuallyDrop<U>,
}

/// A type list node whose alternative `T` is stored as [`Recursive<T>`].
///
/// Never instantiated; it only appears in type lists, usually spelled
/// `rec T` inside [`Variant!`](crate::Variant!) or [`Alts!`](crate::Alts!).
pub struct Rec<T, Tail>(Infallible, PhantomData<(T, Tail)>);

pub type DestroyFn = unsafe fn(*mut ());
pub type MoveAssignFn = unsafe fn(*mut (), *mut ());
pub type TypeNameFn = fn() -> &'static str;

/// The trait that type lists implement to support its corresponding tagged
/// union representation for the [`Variant`] type.
///
/// [`Variant`]: crate::Variant
pub trait VariantList {
    /// The underlying representation of the `Variant` type.
    type Repr;

    /// The number of alternatives in the list.
    const LEN: u8;

    #[doc(hidden)]
    const DESTROY: Table<DestroyFn>;

    #[doc(hidden)]
    const MOVE_ASSIGN: Table<MoveAssignFn>;

    #[doc(hidden)]
    const TYPE_NAMES: Table<TypeNameFn>;
}

const fn grow(len: u8) -> u8 {
    assert!(
        (len as usize) < MAX_ALTERNATIVES,
        "a variant holds at most 16 alternatives"
    );
    len + 1
}

unsafe fn destroy<T>(ptr: *mut ()) {
    unsafe { ptr::drop_in_place(ptr.cast::<T>()) }
}

unsafe fn move_assign<T>(src: *mut (), dst: *mut ()) {
    unsafe { *dst.cast::<T>() = src.cast::<T>().read() }
}

unsafe fn vacant_destroy(_: *mut ()) {
    unreachable!("dispatch past the last alternative")
}

unsafe fn vacant_move_assign(_: *mut (), _: *mut ()) {
    unreachable!("dispatch past the last alternative")
}

fn vacant_type_name() -> &'static str {
    unreachable!("dispatch past the last alternative")
}

impl VariantList for () {
    type Repr = Nil;

    const LEN: u8 = 0;
    const DESTROY: Table<DestroyFn> = vacant(vacant_destroy as DestroyFn);
    const MOVE_ASSIGN: Table<MoveAssignFn> = vacant(vacant_move_assign as MoveAssignFn);
    const TYPE_NAMES: Table<TypeNameFn> = vacant(vacant_type_name as TypeNameFn);
}

impl<Head, Tail> VariantList for (Head, Tail)
where
    Tail: VariantList,
{
    type Repr = Cons<Head, Tail::Repr>;

    const LEN: u8 = grow(Tail::LEN);
    const DESTROY: Table<DestroyFn> = shift(destroy::<Head> as DestroyFn, &Tail::DESTROY);
    const MOVE_ASSIGN: Table<MoveAssignFn> =
        shift(move_assign::<Head> as MoveAssignFn, &Tail::MOVE_ASSIGN);
    const TYPE_NAMES: Table<TypeNameFn> =
        shift(any::type_name::<Head> as TypeNameFn, &Tail::TYPE_NAMES);
}

impl<Head, Tail> VariantList for Rec<Head, Tail>
where
    Tail: VariantList,
{
    type Repr = Cons<Recursive<Head>, Tail::Repr>;

    const LEN: u8 = grow(Tail::LEN);
    const DESTROY: Table<DestroyFn> =
        shift(destroy::<Recursive<Head>> as DestroyFn, &Tail::DESTROY);
    const MOVE_ASSIGN: Table<MoveAssignFn> = shift(
        move_assign::<Recursive<Head>> as MoveAssignFn,
        &Tail::MOVE_ASSIGN,
    );
    const TYPE_NAMES: Table<TypeNameFn> = shift(
        any::type_name::<Recursive<Head>> as TypeNameFn,
        &Tail::TYPE_NAMES,
    );
}

/// A non-empty type list, viewed as its first alternative and the rest.
///
/// `Head` is the type stored in the union; `Inner` is what the unwrapped
/// entry points see. They differ only for [`Rec`] nodes.
pub trait Node: VariantList {
    type Head;
    type Inner;
    type Tail: VariantList;

    #[doc(hidden)]
    fn from_head(head: Self::Head) -> Self::Repr;

    fn inner(head: &Self::Head) -> &Self::Inner;

    fn inner_mut(head: &mut Self::Head) -> &mut Self::Inner;
}

impl<Head, Tail: VariantList> Node for (Head, Tail) {
    type Head = Head;
    type Inner = Head;
    type Tail = Tail;

    fn from_head(head: Head) -> Self::Repr {
        Cons {
            data: ManuallyDrop::new(head),
        }
    }

    fn inner(head: &Head) -> &Head {
        head
    }

    fn inner_mut(head: &mut Head) -> &mut Head {
        head
    }
}

impl<Head, Tail: VariantList> Node for Rec<Head, Tail> {
    type Head = Recursive<Head>;
    type Inner = Head;
    type Tail = Tail;

    fn from_head(head: Recursive<Head>) -> Self::Repr {
        Cons {
            data: ManuallyDrop::new(head),
        }
    }

    fn inner(head: &Recursive<Head>) -> &Head {
        head.get()
    }

    fn inner_mut(head: &mut Recursive<Head>) -> &mut Head {
        head.get_mut()
    }
}

/// Reinterprets erased storage as the unwrapped head of `L`.
///
/// # Safety
///
/// `ptr` must point to a live `L::Head` that outlives `'a`.
pub(crate) unsafe fn unwrap_head<'a, L: Node>(ptr: *const ()) -> &'a L::Inner
where
    L::Head: 'a,
{
    L::inner(unsafe { &*ptr.cast::<L::Head>() })
}

/// The trait that type lists implement to support manipulating a specified
/// alternative marked by a specified index in the [`Variant`] type.
///
/// An alternative declared as `rec T` is addressed here as `Recursive<T>`;
/// see [`SplitInner`] for the unwrapped view.
///
/// [`Variant`]: crate::Variant
pub trait Split<T, U: Index>: VariantList {
    #[doc(hidden)]
    fn from_data(data: T) -> Self::Repr;

    #[doc(hidden)]
    unsafe fn into_data_unchecked(this: Self::Repr) -> T;

    #[doc(hidden)]
    fn as_ptr(this: &Self::Repr) -> *const T;

    #[doc(hidden)]
    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T;
}

impl<Head, Tail> Split<Head, UTerm> for (Head, Tail)
where
    Tail: VariantList,
{
    fn from_data(data: Head) -> Self::Repr {
        Cons {
            data: ManuallyDrop::new(data),
        }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> Head {
        unsafe { ManuallyDrop::into_inner(this.data) }
    }

    fn as_ptr(this: &Self::Repr) -> *const Head {
        let ptr = ptr::addr_of!(this.data).cast::<Head>();
        debug_assert_eq!(ptr.cast::<Self::Repr>(), ptr::from_ref(this));
        ptr
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut Head {
        ptr::addr_of_mut!(this.data).cast::<Head>()
    }
}

impl<Head, Tail> Split<Recursive<Head>, UTerm> for Rec<Head, Tail>
where
    Tail: VariantList,
{
    fn from_data(data: Recursive<Head>) -> Self::Repr {
        Cons {
            data: ManuallyDrop::new(data),
        }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> Recursive<Head> {
        unsafe { ManuallyDrop::into_inner(this.data) }
    }

    fn as_ptr(this: &Self::Repr) -> *const Recursive<Head> {
        ptr::addr_of!(this.data).cast()
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut Recursive<Head> {
        ptr::addr_of_mut!(this.data).cast()
    }
}

impl<Head, Tail, T, U: Index> Split<T, UInt<U>> for (Head, Tail)
where
    Tail: Split<T, U>,
{
    fn from_data(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_data(data)),
        }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> T {
        unsafe { Tail::into_data_unchecked(ManuallyDrop::into_inner(this.next)) }
    }

    fn as_ptr(this: &Self::Repr) -> *const T {
        let ptr = Tail::as_ptr(unsafe { &this.next });
        debug_assert_eq!(ptr.cast::<Self::Repr>(), ptr::from_ref(this));
        ptr
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T {
        Tail::as_mut_ptr(unsafe { &mut this.next })
    }
}

impl<Head, Tail, T, U: Index> Split<T, UInt<U>> for Rec<Head, Tail>
where
    Tail: Split<T, U>,
{
    fn from_data(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_data(data)),
        }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> T {
        unsafe { Tail::into_data_unchecked(ManuallyDrop::into_inner(this.next)) }
    }

    fn as_ptr(this: &Self::Repr) -> *const T {
        Tail::as_ptr(unsafe { &this.next })
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T {
        Tail::as_mut_ptr(unsafe { &mut this.next })
    }
}

/// Like [`Split`], but addresses a `rec T` alternative by its payload `T`.
///
/// For plain alternatives both traits address the same value.
pub trait SplitInner<T, U: Index>: VariantList {
    #[doc(hidden)]
    fn from_inner(data: T) -> Self::Repr;

    #[doc(hidden)]
    unsafe fn into_inner_unchecked(this: Self::Repr) -> T;

    #[doc(hidden)]
    unsafe fn inner_ref(this: &Self::Repr) -> &T;

    #[doc(hidden)]
    unsafe fn inner_mut(this: &mut Self::Repr) -> &mut T;
}

impl<Head, Tail> SplitInner<Head, UTerm> for (Head, Tail)
where
    Tail: VariantList,
{
    fn from_inner(data: Head) -> Self::Repr {
        <Self as Split<Head, UTerm>>::from_data(data)
    }

    unsafe fn into_inner_unchecked(this: Self::Repr) -> Head {
        unsafe { <Self as Split<Head, UTerm>>::into_data_unchecked(this) }
    }

    unsafe fn inner_ref(this: &Self::Repr) -> &Head {
        unsafe { &this.data }
    }

    unsafe fn inner_mut(this: &mut Self::Repr) -> &mut Head {
        unsafe { &mut this.data }
    }
}

impl<Head, Tail> SplitInner<Head, UTerm> for Rec<Head, Tail>
where
    Tail: VariantList,
{
    fn from_inner(data: Head) -> Self::Repr {
        <Self as Split<Recursive<Head>, UTerm>>::from_data(Recursive::new(data))
    }

    unsafe fn into_inner_unchecked(this: Self::Repr) -> Head {
        unsafe { ManuallyDrop::into_inner(this.data) }.into_inner()
    }

    unsafe fn inner_ref(this: &Self::Repr) -> &Head {
        unsafe { this.data.get() }
    }

    unsafe fn inner_mut(this: &mut Self::Repr) -> &mut Head {
        unsafe { this.data.get_mut() }
    }
}

impl<Head, Tail, T, U: Index> SplitInner<T, UInt<U>> for (Head, Tail)
where
    Tail: SplitInner<T, U>,
{
    fn from_inner(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_inner(data)),
        }
    }

    unsafe fn into_inner_unchecked(this: Self::Repr) -> T {
        unsafe { Tail::into_inner_unchecked(ManuallyDrop::into_inner(this.next)) }
    }

    unsafe fn inner_ref(this: &Self::Repr) -> &T {
        unsafe { Tail::inner_ref(&this.next) }
    }

    unsafe fn inner_mut(this: &mut Self::Repr) -> &mut T {
        unsafe { Tail::inner_mut(&mut this.next) }
    }
}

impl<Head, Tail, T, U: Index> SplitInner<T, UInt<U>> for Rec<Head, Tail>
where
    Tail: SplitInner<T, U>,
{
    fn from_inner(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_inner(data)),
        }
    }

    unsafe fn into_inner_unchecked(this: Self::Repr) -> T {
        unsafe { Tail::into_inner_unchecked(ManuallyDrop::into_inner(this.next)) }
    }

    unsafe fn inner_ref(this: &Self::Repr) -> &T {
        unsafe { Tail::inner_ref(&this.next) }
    }

    unsafe fn inner_mut(this: &mut Self::Repr) -> &mut T {
        unsafe { Tail::inner_mut(&mut this.next) }
    }
}

#[cfg(test)]
mod tests {
    use core::mem;
    use std::string::String;

    use super::*;
    use crate::Alts;

    #[test]
    fn lengths() {
        assert_eq!(<() as VariantList>::LEN, 0);
        assert_eq!(<Alts![u8, String] as VariantList>::LEN, 2);
        assert_eq!(<Alts![u8, rec String, ()] as VariantList>::LEN, 3);
    }

    #[test]
    fn storage_fits_largest_alternative() {
        type Repr = <Alts![u8, [u64; 4], u16] as VariantList>::Repr;
        assert_eq!(mem::size_of::<Repr>(), mem::size_of::<[u64; 4]>());
        assert_eq!(mem::align_of::<Repr>(), mem::align_of::<u64>());

        type Boxed = <Alts![u8, rec [u64; 64]] as VariantList>::Repr;
        assert_eq!(mem::size_of::<Boxed>(), mem::size_of::<usize>());
    }

    #[test]
    fn type_names() {
        type L = Alts![u8, rec String];
        assert_eq!((L::TYPE_NAMES[0])(), "u8");
        assert!((L::TYPE_NAMES[1])().contains("Recursive"));
    }
}
