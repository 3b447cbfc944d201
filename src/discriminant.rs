/// A tag type naming the alternatives of a variant by position.
///
/// Implemented for the unsigned integer types. Fieldless enums get an
/// implementation from `#[derive(Discriminant)]`, which requires the variants
/// to count up from zero. The derive refers to this crate as `tvariant`, so
/// it does not work if the dependency is renamed.
///
/// ```rust
/// use tvariant::{Discriminant, Variant};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Discriminant)]
/// enum Kind {
///     Count,
///     Name,
/// }
///
/// let mut v: Variant![Kind; u32, String] = Variant::default();
/// assert_eq!(v.which(), Kind::Count);
///
/// v.set(String::from("x"));
/// assert_eq!(v.which(), Kind::Name);
/// assert_eq!(Kind::from_index(2), None);
/// ```
///
/// A tag type that cannot name every alternative is rejected at compile time:
///
/// ```rust,compile_fail
/// use tvariant::{Discriminant, Variant};
///
/// #[derive(Clone, Copy, Discriminant)]
/// enum Only {
///     One,
/// }
///
/// let v: Variant![Only; u32, String] = Variant::default();
/// v.which();
/// ```
pub trait Discriminant: Copy {
    /// How many distinct tags this type can express.
    const COUNT: usize;

    fn from_index(index: usize) -> Option<Self>;

    fn index(self) -> usize;
}

macro_rules! unsigned_discriminant {
    ($($t:ty),*) => {$(
        impl Discriminant for $t {
            const COUNT: usize = if <$t>::BITS >= usize::BITS {
                usize::MAX
            } else {
                1 << <$t>::BITS
            };

            fn from_index(index: usize) -> Option<Self> {
                <$t>::try_from(index).ok()
            }

            fn index(self) -> usize {
                usize::try_from(self).unwrap_or(usize::MAX)
            }
        }
    )*};
}

unsigned_discriminant!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, crate::Discriminant)]
    enum Shape {
        Circle,
        Square,
        Triangle,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, crate::Discriminant)]
    enum Explicit {
        Zero = 0,
        One = 1,
    }

    #[test]
    fn unsigned() {
        assert_eq!(u8::COUNT, 256);
        assert_eq!(usize::COUNT, usize::MAX);
        assert_eq!(u8::from_index(255), Some(255));
        assert_eq!(u8::from_index(256), None);
        assert_eq!(7u16.index(), 7);
    }

    #[test]
    fn derived() {
        assert_eq!(Shape::COUNT, 3);
        assert_eq!(Shape::from_index(0), Some(Shape::Circle));
        assert_eq!(Shape::from_index(2), Some(Shape::Triangle));
        assert_eq!(Shape::from_index(3), None);
        assert_eq!(Shape::Square.index(), 1);

        assert_eq!(Explicit::COUNT, 2);
        assert_eq!(Explicit::One.index(), 1);
        assert_eq!(Explicit::from_index(0), Some(Explicit::Zero));
    }

    #[test]
    fn derived_tag_on_variant() {
        let mut v: crate::Variant![Shape; u8, char, ()] = crate::Variant::make(Shape::Triangle);
        assert_eq!(v.which(), Shape::Triangle);
        assert_eq!(v.get::<(), _>(), Some(&()));

        v.set('c');
        assert_eq!(v.which(), Shape::Square);
    }
}
