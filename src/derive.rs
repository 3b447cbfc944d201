//! Operation tables backing the standard trait implementations of
//! [`Variant`].
//!
//! Each trait here is implemented by a type list when every alternative
//! supports the corresponding standard trait. Clone and default construction
//! work on the alternatives as stored (a `rec T` alternative is cloned as its
//! [`Recursive`](crate::Recursive) box); comparison, hashing and formatting
//! see through the box to the payload.
//!
//! [`Variant`]: crate::Variant

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use crate::{
    dispatch::{Table, shift, vacant},
    repr::{Node, VariantList, unwrap_head},
};

pub type CloneFn = unsafe fn(*const (), *mut ());
pub type DefaultFn = unsafe fn(*mut ());
pub type EqFn = unsafe fn(*const (), *const ()) -> bool;
pub type PartialCmpFn = unsafe fn(*const (), *const ()) -> Option<Ordering>;
pub type CmpFn = unsafe fn(*const (), *const ()) -> Ordering;
pub type HashFn = unsafe fn(*const (), &mut dyn Hasher);
pub type FmtFn = unsafe fn(*const (), &mut fmt::Formatter<'_>) -> fmt::Result;

macro_rules! vacant_fn {
    ($name:ident($($arg:ty),*) $(-> $ret:ty)?) => {
        unsafe fn $name($(_: $arg),*) $(-> $ret)? {
            unreachable!("dispatch past the last alternative")
        }
    };
}

vacant_fn!(vacant_clone(*const (), *mut ()));
vacant_fn!(vacant_default(*mut ()));
vacant_fn!(vacant_eq(*const (), *const ()) -> bool);
vacant_fn!(vacant_partial_cmp(*const (), *const ()) -> Option<Ordering>);
vacant_fn!(vacant_cmp(*const (), *const ()) -> Ordering);
vacant_fn!(vacant_hash(*const (), &mut dyn Hasher));
vacant_fn!(vacant_fmt(*const (), &mut fmt::Formatter<'_>) -> fmt::Result);

pub trait VariantClone: VariantList {
    #[doc(hidden)]
    const CLONE: Table<CloneFn>;

    #[doc(hidden)]
    const CLONE_FROM: Table<CloneFn>;
}

unsafe fn clone<T: Clone>(src: *const (), dst: *mut ()) {
    unsafe { dst.cast::<T>().write((*src.cast::<T>()).clone()) }
}

unsafe fn clone_from<T: Clone>(src: *const (), dst: *mut ()) {
    unsafe { (*dst.cast::<T>()).clone_from(&*src.cast::<T>()) }
}

impl VariantClone for () {
    const CLONE: Table<CloneFn> = vacant(vacant_clone as CloneFn);
    const CLONE_FROM: Table<CloneFn> = vacant(vacant_clone as CloneFn);
}

impl<L> VariantClone for L
where
    L: Node,
    L::Head: Clone,
    L::Tail: VariantClone,
{
    const CLONE: Table<CloneFn> = shift(
        clone::<L::Head> as CloneFn,
        &<L::Tail as VariantClone>::CLONE,
    );
    const CLONE_FROM: Table<CloneFn> =
        shift(clone_from::<L::Head> as CloneFn, &<L::Tail as VariantClone>::CLONE_FROM);
}

pub trait VariantDefault: VariantList {
    #[doc(hidden)]
    const DEFAULT: Table<DefaultFn>;
}

unsafe fn default<T: Default>(dst: *mut ()) {
    unsafe { dst.cast::<T>().write(T::default()) }
}

impl VariantDefault for () {
    const DEFAULT: Table<DefaultFn> = vacant(vacant_default as DefaultFn);
}

impl<L> VariantDefault for L
where
    L: Node,
    L::Head: Default,
    L::Tail: VariantDefault,
{
    const DEFAULT: Table<DefaultFn> = shift(
        default::<L::Head> as DefaultFn,
        &<L::Tail as VariantDefault>::DEFAULT,
    );
}

pub trait VariantPartialEq: VariantList {
    #[doc(hidden)]
    const EQ: Table<EqFn>;
}

unsafe fn eq<L>(a: *const (), b: *const ()) -> bool
where
    L: Node,
    L::Inner: PartialEq,
{
    unsafe { unwrap_head::<L>(a) == unwrap_head::<L>(b) }
}

impl VariantPartialEq for () {
    const EQ: Table<EqFn> = vacant(vacant_eq as EqFn);
}

impl<L> VariantPartialEq for L
where
    L: Node,
    L::Inner: PartialEq,
    L::Tail: VariantPartialEq,
{
    const EQ: Table<EqFn> = shift(eq::<L> as EqFn, &<L::Tail as VariantPartialEq>::EQ);
}

/// Marks lists whose every alternative is [`Eq`].
pub trait VariantEq: VariantPartialEq {}

impl VariantEq for () {}

impl<L> VariantEq for L
where
    L: Node + VariantPartialEq,
    L::Inner: Eq,
    L::Tail: VariantEq,
{
}

pub trait VariantPartialOrd: VariantPartialEq {
    #[doc(hidden)]
    const PARTIAL_CMP: Table<PartialCmpFn>;
}

unsafe fn partial_cmp<L>(a: *const (), b: *const ()) -> Option<Ordering>
where
    L: Node,
    L::Inner: PartialOrd,
{
    unsafe { unwrap_head::<L>(a).partial_cmp(unwrap_head::<L>(b)) }
}

impl VariantPartialOrd for () {
    const PARTIAL_CMP: Table<PartialCmpFn> = vacant(vacant_partial_cmp as PartialCmpFn);
}

impl<L> VariantPartialOrd for L
where
    L: Node + VariantPartialEq,
    L::Inner: PartialOrd,
    L::Tail: VariantPartialOrd,
{
    const PARTIAL_CMP: Table<PartialCmpFn> =
        shift(partial_cmp::<L> as PartialCmpFn, &<L::Tail as VariantPartialOrd>::PARTIAL_CMP);
}

pub trait VariantOrd: VariantPartialOrd + VariantEq {
    #[doc(hidden)]
    const CMP: Table<CmpFn>;
}

unsafe fn cmp<L>(a: *const (), b: *const ()) -> Ordering
where
    L: Node,
    L::Inner: Ord,
{
    unsafe { unwrap_head::<L>(a).cmp(unwrap_head::<L>(b)) }
}

impl VariantOrd for () {
    const CMP: Table<CmpFn> = vacant(vacant_cmp as CmpFn);
}

impl<L> VariantOrd for L
where
    L: Node + VariantPartialOrd + VariantEq,
    L::Inner: Ord,
    L::Tail: VariantOrd,
{
    const CMP: Table<CmpFn> = shift(cmp::<L> as CmpFn, &<L::Tail as VariantOrd>::CMP);
}

pub trait VariantHash: VariantList {
    #[doc(hidden)]
    const HASH: Table<HashFn>;
}

unsafe fn hash<L>(ptr: *const (), mut state: &mut dyn Hasher)
where
    L: Node,
    L::Inner: Hash,
{
    unsafe { unwrap_head::<L>(ptr) }.hash(&mut state)
}

impl VariantHash for () {
    const HASH: Table<HashFn> = vacant(vacant_hash as HashFn);
}

impl<L> VariantHash for L
where
    L: Node,
    L::Inner: Hash,
    L::Tail: VariantHash,
{
    const HASH: Table<HashFn> = shift(hash::<L> as HashFn, &<L::Tail as VariantHash>::HASH);
}

pub trait VariantDebug: VariantList {
    #[doc(hidden)]
    const DEBUG: Table<FmtFn>;
}

unsafe fn debug<L>(ptr: *const (), f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    L: Node,
    L::Inner: fmt::Debug,
{
    fmt::Debug::fmt(unsafe { unwrap_head::<L>(ptr) }, f)
}

impl VariantDebug for () {
    const DEBUG: Table<FmtFn> = vacant(vacant_fmt as FmtFn);
}

impl<L> VariantDebug for L
where
    L: Node,
    L::Inner: fmt::Debug,
    L::Tail: VariantDebug,
{
    const DEBUG: Table<FmtFn> = shift(debug::<L> as FmtFn, &<L::Tail as VariantDebug>::DEBUG);
}

pub trait VariantDisplay: VariantList {
    #[doc(hidden)]
    const DISPLAY: Table<FmtFn>;
}

unsafe fn display<L>(ptr: *const (), f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    L: Node,
    L::Inner: fmt::Display,
{
    fmt::Display::fmt(unsafe { unwrap_head::<L>(ptr) }, f)
}

impl VariantDisplay for () {
    const DISPLAY: Table<FmtFn> = vacant(vacant_fmt as FmtFn);
}

impl<L> VariantDisplay for L
where
    L: Node,
    L::Inner: fmt::Display,
    L::Tail: VariantDisplay,
{
    const DISPLAY: Table<FmtFn> = shift(
        display::<L> as FmtFn,
        &<L::Tail as VariantDisplay>::DISPLAY,
    );
}
