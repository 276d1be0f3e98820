use std::fmt::{Debug, Display};

/// Capability bound for element types stored in [`Sequence`] and [`Grid`].
///
/// `num::Num` brings equality, zero/one and the closed arithmetic operators;
/// `Default` is what fresh containers are filled with. Any primitive integer
/// or float satisfies the bound, as do user types implementing `num::Num`.
///
/// [`Sequence`]: crate::sequence::Sequence
/// [`Grid`]: crate::grid::Grid
pub trait Numeric: num::Num + Copy + Default + Debug + Display + 'static {}

impl<T> Numeric for T where T: num::Num + Copy + Default + Debug + Display + 'static {}
