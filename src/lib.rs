//! A type-safe core argument-parsing engine: signature-driven parameter binding for command
//! line interfaces.
//!
//! The pieces compose in one direction: describe the parameters a command takes as a
//! [`CliSignature`] (built directly, or derived from a callee's own parameter list via
//! [`SignatureConverter`]), then [`parse`] an input against it to get back [`BoundArguments`].
#![deny(missing_docs)]
mod bound;
mod convert;
mod error;
mod model;
mod parameter;
mod parser;
#[allow(missing_docs)]
pub mod prelude;
mod signature;
mod value;

pub use bound::BoundArguments;
pub use convert::{
    Annotation, CalleeDefault, CalleeParameter, CalleeParameterKind, ParamFlag, ParameterConverter,
    SignatureConverter,
};
pub use error::{ArgumentError, ConfigError};
pub use model::Nargs;
pub use parameter::Parameter;
pub use parser::parse;
pub use signature::CliSignature;
pub use value::{Converter, Value, ValueConverter, ValueError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
