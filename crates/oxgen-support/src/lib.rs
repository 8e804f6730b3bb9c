//! Runtime support for oxgen-generated services.
//!
//! Generated code calls into this crate for field validation
//! ([`validate`]), extended string-format predicates ([`format`]), and
//! serde skip helpers ([`ser`]). Nothing here is used by the generator
//! itself at generation time.

pub mod format;
pub mod ser;
pub mod validate;

pub use validate::Validation;
