//! The error taxonomy: construction-time [`ConfigError`] and parse-time [`ArgumentError`].
use thiserror::Error;

use crate::value::ValueError;

/// Raised eagerly while building a [`crate::signature::CliSignature`], before any tokens are read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two parameters in the same signature share an alias.
    #[error("duplicate alias '{alias}'.")]
    DuplicateAlias {
        /// The alias that was declared more than once.
        alias: String,
    },

    /// An alias contains whitespace, which can never appear on the command line as one token.
    #[error("alias '{alias}' may not contain whitespace.")]
    AliasWhitespace {
        /// The offending alias.
        alias: String,
    },

    /// A parameter's annotations specified more than one value converter.
    #[error("parameter '{parameter}' specifies more than one value converter.")]
    MultipleConverters {
        /// The name of the over-specified parameter.
        parameter: String,
    },

    /// A parameter converter annotation appeared somewhere other than first.
    #[error("parameter converter for '{parameter}' must be the only annotation.")]
    MisplacedParameterConverter {
        /// The name of the offending parameter.
        parameter: String,
    },

    /// No converter could be derived for a parameter and none was supplied.
    #[error("cannot determine a value converter for parameter '{parameter}'.")]
    UnconvertibleParameter {
        /// The name of the parameter lacking a converter.
        parameter: String,
    },

    /// A var-keyword callee parameter was present but no var-keyword factory was configured.
    #[error("no factory configured for variadic keyword parameter '{parameter}'.")]
    MissingVarKeywordFactory {
        /// The name of the var-keyword callee parameter.
        parameter: String,
    },
}

/// Raised while consuming tokens against a [`crate::signature::CliSignature`].
///
/// Every variant carries the contextual fields attached during the parse (§4.3): the input
/// position and, where applicable, the offending token and/or parameter name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    /// A token looked like an option but matched no alias in the signature.
    #[error("unknown option '{option}'.")]
    UnknownOption {
        /// The input position of the offending token.
        pos: usize,
        /// The unrecognized option text.
        option: String,
    },

    /// A named parameter expected a following value but the input ended.
    #[error("missing a value for '{parameter}'.")]
    MissingValue {
        /// The input position of the named parameter's token.
        pos: usize,
        /// The name of the parameter that needed a value.
        parameter: String,
    },

    /// The value converter rejected a token.
    #[error("{source}")]
    BadArgumentFormat {
        /// The input position of the offending token.
        pos: usize,
        /// The name of the parameter the value was destined for.
        parameter: String,
        /// The underlying conversion failure.
        #[source]
        source: ValueError,
    },

    /// The same named parameter was supplied more than once.
    #[error("'{parameter}' was specified more than once.")]
    DuplicateNamedArgument {
        /// The input position of the duplicate token.
        pos: usize,
        /// The name of the repeated parameter.
        parameter: String,
    },

    /// There are more positional tokens than positional parameters to receive them.
    #[error("too many positional arguments; unexpected '{}' onward.", overflow.first().map(String::as_str).unwrap_or(""))]
    TooManyArguments {
        /// The input position of the first unexpected token.
        pos: usize,
        /// The unexpected tokens, starting with the one at `pos`.
        overflow: Vec<String>,
    },

    /// A multi-valued parameter received more values than its declared maximum.
    #[error("too many values provided for '{parameter}' (expected at most {expected}).")]
    TooManyValues {
        /// The input position of the first excess token.
        pos: usize,
        /// The name of the over-filled parameter.
        parameter: String,
        /// The declared maximum.
        expected: usize,
    },

    /// A multi-valued parameter received fewer values than its declared minimum.
    #[error("not enough values provided for '{parameter}' (expected at least {expected}, got {provided}).")]
    NotEnoughValues {
        /// The name of the under-filled parameter.
        parameter: String,
        /// The declared minimum.
        expected: usize,
        /// The number of values actually provided.
        provided: usize,
    },

    /// One or more required parameters were never satisfied.
    #[error("missing required arguments: {}.", parameters.join(", "))]
    MissingRequiredArguments {
        /// The names of every required parameter that was never satisfied.
        parameters: Vec<String>,
    },

    /// An alternate command appeared somewhere other than the very first token.
    #[error("'{parameter}' must be the first argument.")]
    ArgsBeforeAlternateCommand {
        /// The input position the alternate command actually appeared at.
        pos: usize,
        /// The name of the alternate command.
        parameter: String,
    },
}

impl ArgumentError {
    /// The input position this error is anchored to, used by fallback recovery (§4.4) to scan
    /// `in_args[pos + 1..]` for a rescuing alternate command.
    pub fn pos(&self) -> usize {
        match self {
            ArgumentError::UnknownOption { pos, .. }
            | ArgumentError::MissingValue { pos, .. }
            | ArgumentError::BadArgumentFormat { pos, .. }
            | ArgumentError::DuplicateNamedArgument { pos, .. }
            | ArgumentError::TooManyArguments { pos, .. }
            | ArgumentError::TooManyValues { pos, .. }
            | ArgumentError::ArgsBeforeAlternateCommand { pos, .. } => *pos,
            ArgumentError::NotEnoughValues { .. } | ArgumentError::MissingRequiredArguments { .. } => {
                usize::MAX
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_extraction() {
        let error = ArgumentError::UnknownOption {
            pos: 3,
            option: "--bogus".to_string(),
        };
        assert_eq!(error.pos(), 3);
    }

    #[test]
    fn missing_required_message() {
        let error = ArgumentError::MissingRequiredArguments {
            parameters: vec!["par".to_string(), "other".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "missing required arguments: par, other."
        );
    }
}
