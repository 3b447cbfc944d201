//! Visitors and the free-function visitation API.
//!
//! A visitor is a value with one result type ([`Visitor::Output`]) and one
//! method per alternative it can handle. Rust closures cannot be generic, so
//! the per-alternative handling is expressed by implementing [`Visit<T>`] (or
//! [`VisitMut<T>`], [`VisitOwned<T>`]) once for each alternative type `T`.
//!
//! ```rust
//! use tvariant::{Variant, visit::{Visit, Visitor}};
//!
//! struct Width;
//!
//! impl Visitor for Width {
//!     type Output = usize;
//! }
//!
//! impl Visit<u32> for Width {
//!     fn visit(&mut self, value: &u32) -> usize {
//!         value.to_string().len()
//!     }
//! }
//!
//! impl Visit<String> for Width {
//!     fn visit(&mut self, value: &String) -> usize {
//!         value.len()
//!     }
//! }
//!
//! let v: Variant![u32, String] = Variant::new(12345u32);
//! assert_eq!(tvariant::apply_visitor(Width, &v), 5);
//! ```
//!
//! Visitors over several variants at once implement [`Visit2`] or [`Visit3`]
//! for every combination of alternatives. A missing combination is a compile
//! error:
//!
//! ```rust,compile_fail
//! use tvariant::{Variant, visit::{Visit2, Visitor}};
//!
//! struct Same;
//!
//! impl Visitor for Same {
//!     type Output = bool;
//! }
//!
//! impl Visit2<u8, u8> for Same {
//!     fn visit2(&mut self, _: &u8, _: &u8) -> bool {
//!         true
//!     }
//! }
//!
//! let a: Variant![u8, char] = Variant::new(1u8);
//! let b: Variant![u8, char] = Variant::new('x');
//! tvariant::apply_visitor2(Same, &a, &b);
//! ```

use core::ptr::NonNull;

use crate::{
    Variant,
    dispatch::{Dispatch, DispatchMut},
    discriminant::Discriminant,
    index::Index,
    repr::{Split, VariantList},
};

/// The common part of every visitor: the type each handler returns.
pub trait Visitor {
    type Output;
}

/// Handles an alternative of type `T` by shared reference.
pub trait Visit<T>: Visitor {
    fn visit(&mut self, value: &T) -> Self::Output;
}

/// Handles an alternative of type `T` by mutable reference.
pub trait VisitMut<T>: Visitor {
    fn visit_mut(&mut self, value: &mut T) -> Self::Output;
}

/// Handles an alternative of type `T` by value.
pub trait VisitOwned<T>: Visitor {
    fn visit_owned(self, value: T) -> Self::Output;
}

/// Handles the active alternatives `A` and `B` of two variants.
pub trait Visit2<A, B>: Visitor {
    fn visit2(&mut self, first: &A, second: &B) -> Self::Output;
}

/// Handles the active alternatives `A`, `B` and `C` of three variants.
pub trait Visit3<A, B, C>: Visitor {
    fn visit3(&mut self, first: &A, second: &B, third: &C) -> Self::Output;
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Output = V::Output;
}

impl<T, V: Visit<T> + ?Sized> Visit<T> for &mut V {
    fn visit(&mut self, value: &T) -> Self::Output {
        (**self).visit(value)
    }
}

impl<T, V: VisitMut<T> + ?Sized> VisitMut<T> for &mut V {
    fn visit_mut(&mut self, value: &mut T) -> Self::Output {
        (**self).visit_mut(value)
    }
}

impl<A, B, V: Visit2<A, B> + ?Sized> Visit2<A, B> for &mut V {
    fn visit2(&mut self, first: &A, second: &B) -> Self::Output {
        (**self).visit2(first, second)
    }
}

impl<A, B, C, V: Visit3<A, B, C> + ?Sized> Visit3<A, B, C> for &mut V {
    fn visit3(&mut self, first: &A, second: &B, third: &C) -> Self::Output {
        (**self).visit3(first, second, third)
    }
}

/// Lets a type that wraps a variant be used with the free functions of this
/// module ([`visit`], [`get`], [`is`], [`which`], ...).
///
/// # Examples
///
/// ```rust
/// use tvariant::{Variant, visit::Expose};
///
/// struct Setting {
///     name: &'static str,
///     value: Variant![bool, i64],
/// }
///
/// impl Expose for Setting {
///     type List = tvariant::Alts![bool, i64];
///     type Tag = usize;
///
///     fn expose(&self) -> &Variant<Self::List> {
///         &self.value
///     }
///
///     fn expose_mut(&mut self) -> &mut Variant<Self::List> {
///         &mut self.value
///     }
/// }
///
/// let s = Setting { name: "retries", value: Variant::new(3i64) };
/// assert_eq!(s.name, "retries");
/// assert_eq!(tvariant::get::<i64, _, _>(&s), Some(&3));
/// assert!(!tvariant::is::<bool, _, _>(&s));
/// assert_eq!(tvariant::which(&s), 1);
/// ```
pub trait Expose {
    type List: VariantList;
    type Tag;

    fn expose(&self) -> &Variant<Self::List, Self::Tag>;

    fn expose_mut(&mut self) -> &mut Variant<Self::List, Self::Tag>;
}

impl<L: VariantList, K> Expose for Variant<L, K> {
    type List = L;
    type Tag = K;

    fn expose(&self) -> &Self {
        self
    }

    fn expose_mut(&mut self) -> &mut Self {
        self
    }
}

/// Applies `visitor` to the active member of `variant`, as declared.
pub fn apply_visitor<V, L, K>(visitor: V, variant: &Variant<L, K>) -> V::Output
where
    V: Visitor,
    L: Dispatch<V>,
{
    variant.visit(visitor)
}

/// Applies `visitor` to the active member of `variant` by mutable reference.
pub fn apply_visitor_mut<V, L, K>(visitor: V, variant: &mut Variant<L, K>) -> V::Output
where
    V: Visitor,
    L: DispatchMut<V>,
{
    variant.visit_mut(visitor)
}

/// A binary visitor with its first argument already resolved.
#[doc(hidden)]
pub struct Bound<A, V> {
    first: NonNull<A>,
    visitor: NonNull<V>,
}

impl<A, V: Visitor> Visitor for Bound<A, V> {
    type Output = V::Output;
}

impl<A, B, V: Visit2<A, B>> Visit<B> for Bound<A, V> {
    fn visit(&mut self, second: &B) -> V::Output {
        // SAFETY: `Bound` is only built by `Curry::visit`, which outlives it
        // and holds both borrows for its whole lifetime.
        unsafe { self.visitor.as_mut().visit2(self.first.as_ref(), second) }
    }
}

/// Turns a binary visitor into a unary one over the first variant.
#[doc(hidden)]
pub struct Curry<'s, V, L2: VariantList, K2> {
    visitor: V,
    second: &'s Variant<L2, K2>,
}

impl<V: Visitor, L2: VariantList, K2> Visitor for Curry<'_, V, L2, K2> {
    type Output = V::Output;
}

impl<A, V, L2, K2> Visit<A> for Curry<'_, V, L2, K2>
where
    V: Visitor,
    L2: Dispatch<Bound<A, V>>,
{
    fn visit(&mut self, first: &A) -> V::Output {
        self.second.visit(Bound {
            first: NonNull::from(first),
            visitor: NonNull::from(&mut self.visitor),
        })
    }
}

/// Applies a binary visitor to the active members of two variants.
///
/// The active member of `first` is fixed first, leaving a unary visitor that
/// is then applied to `second`.
pub fn apply_visitor2<'s, V, L1, K1, L2, K2>(
    visitor: V,
    first: &Variant<L1, K1>,
    second: &'s Variant<L2, K2>,
) -> V::Output
where
    V: Visitor,
    L1: Dispatch<Curry<'s, V, L2, K2>>,
    L2: VariantList,
{
    first.visit(Curry { visitor, second })
}

/// A ternary visitor with its first argument already resolved.
#[doc(hidden)]
pub struct Bound3<A, V> {
    first: NonNull<A>,
    visitor: NonNull<V>,
}

impl<A, V: Visitor> Visitor for Bound3<A, V> {
    type Output = V::Output;
}

impl<A, B, C, V: Visit3<A, B, C>> Visit2<B, C> for Bound3<A, V> {
    fn visit2(&mut self, second: &B, third: &C) -> V::Output {
        // SAFETY: `Bound3` is only built by `Curry3::visit`, which outlives it
        // and holds both borrows for its whole lifetime.
        unsafe {
            self.visitor
                .as_mut()
                .visit3(self.first.as_ref(), second, third)
        }
    }
}

/// Turns a ternary visitor into a unary one over the first variant.
#[doc(hidden)]
pub struct Curry3<'s, V, L2: VariantList, K2, L3: VariantList, K3> {
    visitor: V,
    second: &'s Variant<L2, K2>,
    third: &'s Variant<L3, K3>,
}

impl<V: Visitor, L2: VariantList, K2, L3: VariantList, K3> Visitor
    for Curry3<'_, V, L2, K2, L3, K3>
{
    type Output = V::Output;
}

impl<'s, A, V, L2, K2, L3, K3> Visit<A> for Curry3<'s, V, L2, K2, L3, K3>
where
    V: Visitor,
    L2: Dispatch<Curry<'s, Bound3<A, V>, L3, K3>>,
    L3: VariantList,
{
    fn visit(&mut self, first: &A) -> V::Output {
        let bound = Bound3 {
            first: NonNull::from(first),
            visitor: NonNull::from(&mut self.visitor),
        };
        apply_visitor2(bound, self.second, self.third)
    }
}

/// Applies a ternary visitor to the active members of three variants.
pub fn apply_visitor3<'s, V, L1, K1, L2, K2, L3, K3>(
    visitor: V,
    first: &Variant<L1, K1>,
    second: &'s Variant<L2, K2>,
    third: &'s Variant<L3, K3>,
) -> V::Output
where
    V: Visitor,
    L1: Dispatch<Curry3<'s, V, L2, K2, L3, K3>>,
    L2: VariantList,
    L3: VariantList,
{
    first.visit(Curry3 {
        visitor,
        second,
        third,
    })
}

/// Applies `visitor` to the active member of anything that exposes a variant.
pub fn visit<V, E>(visitor: V, visitable: &E) -> V::Output
where
    V: Visitor,
    E: Expose,
    E::List: Dispatch<V>,
{
    visitable.expose().visit(visitor)
}

/// [`apply_visitor2`] through [`Expose`].
pub fn visit2<'s, V, E1, E2>(visitor: V, first: &E1, second: &'s E2) -> V::Output
where
    V: Visitor,
    E1: Expose,
    E2: Expose,
    E1::List: Dispatch<Curry<'s, V, E2::List, E2::Tag>>,
{
    apply_visitor2(visitor, first.expose(), second.expose())
}

/// [`apply_visitor3`] through [`Expose`].
pub fn visit3<'s, V, E1, E2, E3>(
    visitor: V,
    first: &E1,
    second: &'s E2,
    third: &'s E3,
) -> V::Output
where
    V: Visitor,
    E1: Expose,
    E2: Expose,
    E3: Expose,
    E1::List: Dispatch<Curry3<'s, V, E2::List, E2::Tag, E3::List, E3::Tag>>,
{
    apply_visitor3(visitor, first.expose(), second.expose(), third.expose())
}

/// Returns the active member if it is the alternative `T`.
///
/// Never fails; an inactive alternative yields `None`.
pub fn get<T, U, E>(visitable: &E) -> Option<&T>
where
    U: Index,
    E: Expose,
    E::List: Split<T, U>,
{
    visitable.expose().get()
}

/// Mutable version of [`get`].
pub fn get_mut<T, U, E>(visitable: &mut E) -> Option<&mut T>
where
    U: Index,
    E: Expose,
    E::List: Split<T, U>,
{
    visitable.expose_mut().get_mut()
}

/// Whether the alternative `T` is the active one.
pub fn is<T, U, E>(visitable: &E) -> bool
where
    U: Index,
    E: Expose,
    E::List: Split<T, U>,
{
    get::<T, U, E>(visitable).is_some()
}

/// The tag of the active alternative.
pub fn which<E>(visitable: &E) -> E::Tag
where
    E: Expose,
    E::Tag: Discriminant,
{
    visitable.expose().which()
}
