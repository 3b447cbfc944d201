//! Type-level positions of alternatives inside a type list.
//!
//! An index is a Peano number: [`UTerm`] is position 0 and [`UInt<U>`] is the
//! position after `U`. Methods like [`Variant::new`] and [`Variant::get`] take
//! an index parameter that is almost always left to inference (`_`), which is
//! how an alternative is picked out by its type alone.
//!
//! [`Variant::new`]: crate::Variant::new
//! [`Variant::get`]: crate::Variant::get
#![allow(missing_docs)]

use core::marker::PhantomData;

pub struct UTerm;

pub struct UInt<U>(PhantomData<U>);

pub trait Index {
    const TAG: u8;
}

impl Index for UTerm {
    const TAG: u8 = 0;
}

impl<U: Index> Index for UInt<U> {
    const TAG: u8 = 1 + U::TAG;
}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
pub type U6 = UInt<U5>;
pub type U7 = UInt<U6>;
pub type U8 = UInt<U7>;
pub type U9 = UInt<U8>;

pub type U10 = UInt<U9>;
pub type U11 = UInt<U10>;
pub type U12 = UInt<U11>;
pub type U13 = UInt<U12>;
pub type U14 = UInt<U13>;
pub type U15 = UInt<U14>;
