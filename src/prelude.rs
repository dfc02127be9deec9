//! Traits which, typically, may be imported without concern: `use cliparse_core::prelude::*`.

pub use crate::convert::ParameterConverter;
pub use crate::value::Converter;
