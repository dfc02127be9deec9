//! Value conversion: turning a raw token `&str` into a typed [`Value`].
use std::fmt;

/// A typed value produced by converting a raw command line token.
///
/// The core only needs to round-trip a handful of primitive shapes; anything
/// richer is the caller's business once [`crate::bound::BoundArguments`] comes back out.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer value, as produced by the `INT` converter.
    Int(i64),
    /// A floating point value, as produced by the `FLOAT` converter.
    Float(f64),
    /// A boolean value, as produced by the `BOOL` converter or a [`crate::parameter::Parameter::Flag`].
    Bool(bool),
    /// A string value, as produced by the identity `STR` converter.
    Str(String),
    /// A byte-string value, as produced by the identity `BYTES` converter.
    Bytes(Vec<u8>),
    /// A sequence of values, produced by a multi-valued named parameter (§4.2 Option, collect bound)
    /// or collected for [`crate::parameter::Parameter::ExtraPositional`].
    List(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Bytes(v) => write!(f, "{v:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A value could not be converted from its raw token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{token}' cannot convert to {type_name}.")]
pub struct ValueError {
    pub(crate) token: String,
    pub(crate) type_name: &'static str,
}

/// Behaviour that converts a raw token into a [`Value`], carrying a display name for help text.
///
/// A converter is either one of the built-ins returned by [`ValueConverter::int`] etc, or a
/// user-tagged converter constructed with [`ValueConverter::custom`].
pub trait Converter: fmt::Debug {
    /// Convert `token` into a [`Value`], or fail with a [`ValueError`].
    fn convert(&self, token: &str) -> Result<Value, ValueError>;

    /// The CLI-facing type name, used in help and in [`ValueError`] messages.
    fn type_name(&self) -> &'static str;
}

/// The built-in value converters: integer, floating-point, boolean, text, and bytes.
///
/// `ValueConverter` is the concrete type most callers use; implement [`Converter`] directly
/// only to supply a user-defined (tagged) converter to the signature converter (§4.1, §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueConverter {
    /// Converts via `i64::from_str`.
    Int,
    /// Converts via `f64::from_str`.
    Float,
    /// Converts via a small set of recognized boolean spellings.
    Bool,
    /// Identity conversion to a `String`.
    Str,
    /// Identity conversion to raw bytes.
    Bytes,
}

impl ValueConverter {
    /// Look up the built-in converter whose type name matches `name`, if any.
    pub fn by_type_name(name: &str) -> Option<Self> {
        match name {
            "INT" => Some(Self::Int),
            "FLOAT" => Some(Self::Float),
            "BOOL" => Some(Self::Bool),
            "STR" => Some(Self::Str),
            "BYTES" => Some(Self::Bytes),
            _ => None,
        }
    }
}

impl Converter for ValueConverter {
    fn convert(&self, token: &str) -> Result<Value, ValueError> {
        match self {
            ValueConverter::Int => token
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ValueError {
                    token: token.to_string(),
                    type_name: "INT",
                }),
            ValueConverter::Float => token
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| ValueError {
                    token: token.to_string(),
                    type_name: "FLOAT",
                }),
            ValueConverter::Bool => match token.to_ascii_lowercase().as_str() {
                "1" | "y" | "yes" | "t" | "true" => Ok(Value::Bool(true)),
                "0" | "n" | "no" | "f" | "false" => Ok(Value::Bool(false)),
                _ => Err(ValueError {
                    token: token.to_string(),
                    type_name: "BOOL",
                }),
            },
            ValueConverter::Str => Ok(Value::Str(token.to_string())),
            ValueConverter::Bytes => Ok(Value::Bytes(token.as_bytes().to_vec())),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ValueConverter::Int => "INT",
            ValueConverter::Float => "FLOAT",
            ValueConverter::Bool => "BOOL",
            ValueConverter::Str => "STR",
            ValueConverter::Bytes => "BYTES",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ValueConverter::Int, "5", Value::Int(5))]
    #[case(ValueConverter::Int, "-5", Value::Int(-5))]
    #[case(ValueConverter::Float, "1.5", Value::Float(1.5))]
    #[case(ValueConverter::Bool, "true", Value::Bool(true))]
    #[case(ValueConverter::Bool, "n", Value::Bool(false))]
    #[case(ValueConverter::Str, "anything", Value::Str("anything".to_string()))]
    #[case(ValueConverter::Bytes, "ab", Value::Bytes(vec![b'a', b'b']))]
    fn convert_ok(#[case] converter: ValueConverter, #[case] token: &str, #[case] expected: Value) {
        assert_eq!(converter.convert(token).unwrap(), expected);
    }

    #[rstest]
    #[case(ValueConverter::Int, "bad")]
    #[case(ValueConverter::Float, "bad")]
    #[case(ValueConverter::Bool, "bad")]
    fn convert_err(#[case] converter: ValueConverter, #[case] token: &str) {
        let error = converter.convert(token).unwrap_err();
        assert_eq!(error.token, token);
        assert_eq!(error.type_name, converter.type_name());
    }

    #[test]
    fn by_type_name() {
        assert_eq!(ValueConverter::by_type_name("INT"), Some(ValueConverter::Int));
        assert_eq!(ValueConverter::by_type_name("nonsense"), None);
    }
}
