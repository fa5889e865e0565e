//! Formal derivatives of polynomials given as coefficient lists.
//!
//! A polynomial is a list of numbers where the n-th entry is the coefficient of the degree n term,
//! so `[1, 0, 3]` is `3x^2 + 1`. Run without arguments, the binary checks a fixed set of
//! polynomials against their known derivatives. Given a JSON challenge definition, it answers each
//! testcase in it instead.
pub mod challenge;
pub mod common;
pub mod settings;
