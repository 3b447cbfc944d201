/// Constructs a [`struct@Variant`] type from a list of alternative types.
///
/// Prefix an alternative with `rec` to store it behind a
/// [`Recursive`](crate::Recursive) box, which is what allows the alternative to
/// contain the variant itself. Put a tag type and `;` in front of the list to
/// replace the default `usize` tag.
///
/// # Examples
///
/// ```rust
/// use tvariant::Variant;
///
/// type Number = Variant![i32, u32, f64];
/// let n: Number = Variant::new(42u32);
/// assert_eq!(n.index(), 1);
///
/// struct Tree {
///     children: Vec<Variant![u8, rec Tree]>,
/// }
///
/// type Small = Variant![u8; bool, char];
/// let s: Small = Variant::new('c');
/// assert_eq!(s.which(), 1u8);
/// ```
#[macro_export]
macro_rules! Variant {
    [$tag:ty; $($t:tt)*] => [$crate::Variant::<$crate::Alts![$($t)*], $tag>];
    [$($t:tt)*] => [$crate::Variant::<$crate::Alts![$($t)*]>];
}

/// Constructs a type list of alternatives, as used by [`struct@Variant`].
///
/// # Examples
///
/// ```rust
/// use tvariant::{Alts, repr::Rec};
///
/// type Plain = Alts![i32, u32];
/// let _: Option<(i32, (u32, ()))> = None::<Plain>;
///
/// type Boxed = Alts![i32, rec String];
/// let _: Option<(i32, Rec<String, ()>)> = None::<Boxed>;
/// ```
#[macro_export]
macro_rules! Alts {
    [] => [()];
    [rec $head:ty $(, $($rest:tt)*)?] => [$crate::repr::Rec<$head, $crate::Alts![$($($rest)*)?]>];
    [$head:ty $(, $($rest:tt)*)?] => [($head, $crate::Alts![$($($rest)*)?])];
}

/// Applies a visitor to one, two or three variants, picking
/// [`apply_visitor`](crate::apply_visitor),
/// [`apply_visitor2`](crate::apply_visitor2) or
/// [`apply_visitor3`](crate::apply_visitor3) by arity.
///
/// Visitation over more than three variants at once is not supported; like
/// the 16-alternative limit of a single variant, it is fixed at compile time.
#[macro_export]
macro_rules! apply_visitor {
    ($visitor:expr, $a:expr $(,)?) => {
        $crate::visit::apply_visitor($visitor, $a)
    };
    ($visitor:expr, $a:expr, $b:expr $(,)?) => {
        $crate::visit::apply_visitor2($visitor, $a, $b)
    };
    ($visitor:expr, $a:expr, $b:expr, $c:expr $(,)?) => {
        $crate::visit::apply_visitor3($visitor, $a, $b, $c)
    };
}

/// Like [`apply_visitor!`], but accepts anything implementing
/// [`Expose`](crate::visit::Expose).
#[macro_export]
macro_rules! visit {
    ($visitor:expr, $a:expr $(,)?) => {
        $crate::visit::visit($visitor, $a)
    };
    ($visitor:expr, $a:expr, $b:expr $(,)?) => {
        $crate::visit::visit2($visitor, $a, $b)
    };
    ($visitor:expr, $a:expr, $b:expr, $c:expr $(,)?) => {
        $crate::visit::visit3($visitor, $a, $b, $c)
    };
}
