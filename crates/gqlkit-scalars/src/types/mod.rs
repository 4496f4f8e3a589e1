//! Custom scalar types.
//!
//! Each scalar is a unit-like type implementing [`CustomScalar`]:
//!
//! - Opaque: `CodeScalar`, `TokenScalar`
//! - Strings: `EmailScalar`, `UriScalar`, `PasswordScalar`, `TimeScalar`,
//!   `SemanticVersionScalar`
//! - Tokens: `JwtScalar` (with an optional verifier)
//! - Numbers: `UIntScalar`, `PageSizeScalar`, `TimestampScalar`
//! - Dates: `DateScalar`, `CalendarDateScalar`, `MultiFormatDateScalar`
//!
//! [`CustomScalar`]: crate::CustomScalar

mod jwt;
mod numeric;
mod strings;
mod temporal;

pub use jwt::JwtScalar;
pub use numeric::{PAGE_SIZE_MAX, PageSizeScalar, TimestampScalar, UIntScalar};
pub use strings::{
    CodeScalar, EmailScalar, PASSWORD_MIN_LENGTH, PasswordScalar, SemanticVersionScalar,
    TimeScalar, TokenScalar, UriScalar,
};
pub use temporal::{CalendarDateScalar, DateScalar, MultiFormatDateScalar};
