//! The two pieces of parse state (§5): the terminal [`BoundArguments`] returned to the caller,
//! and the transient [`ParseState`] the engine threads through a single parse.
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::parameter::Parameter;
use crate::signature::CliSignature;
use crate::value::Value;

/// The result of successfully binding an input against a [`CliSignature`].
///
/// `func` names the callee the input resolved to -- either the signature's own label, or the
/// target of an [`crate::parameter::Parameter::alternate_command`]/
/// [`crate::parameter::Parameter::fallback_command`] that fired during the parse. Dispatching on
/// that name is the caller's business (§9 "What does `func` mean in Rust").
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    /// The callee this input resolved to.
    pub func: Option<String>,
    /// Tokens consumed by an alternate/fallback command, in the order they fired.
    pub post_name: Vec<String>,
    /// Values bound to positional parameters, in declaration order.
    pub args: Vec<Value>,
    /// Values bound to named parameters, keyed by argument name.
    pub kwargs: HashMap<String, Value>,
    /// The program name the input was parsed under (the signature's label).
    pub name: String,
    /// The raw input tokens this parse is running over.
    pub(crate) in_args: Vec<String>,
}

impl BoundArguments {
    /// A fresh, empty result over `in_args`, labelled `name`.
    ///
    /// `func` starts unset: it is only assigned mid-parse when an alternate/fallback command
    /// fires, or at the very end of a successful parse that never hit one (§4.4). Its presence
    /// mid-parse is exactly what gates the termination checks in §4.3.
    pub(crate) fn new(name: impl Into<String>, in_args: Vec<String>) -> Self {
        BoundArguments {
            func: None,
            post_name: Vec::new(),
            args: Vec::new(),
            kwargs: HashMap::new(),
            name: name.into(),
            in_args,
        }
    }
}

/// Transient state threaded through a single parse, discarded once parsing finishes (§5).
pub(crate) struct ParseState {
    /// Index of the next positional parameter to match, into `signature.positional`.
    pub(crate) posparam: usize,
    /// The variadic positional parameter installed to receive further positional tokens, once
    /// `posparam` has been exhausted or an alternate/fallback command has fired.
    pub(crate) sticky: Option<Rc<Parameter>>,
    /// Once set, every remaining token is treated as positional regardless of its shape.
    pub(crate) posarg_only: bool,
    /// The number of upcoming input tokens the engine should skip (consumed as a named
    /// parameter's value on the previous token).
    pub(crate) skip: usize,
    /// Indices into `signature.parameters` of every required parameter not yet satisfied.
    pub(crate) unsatisfied: HashSet<usize>,
}

impl ParseState {
    /// A fresh state for a parse against `signature`: every required parameter starts
    /// unsatisfied.
    pub(crate) fn new(signature: &CliSignature) -> Self {
        ParseState {
            posparam: 0,
            sticky: None,
            posarg_only: false,
            skip: 0,
            unsatisfied: signature.initial_unsatisfied.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_arguments_starts_with_no_func() {
        let ba = BoundArguments::new("prog", vec!["a".to_string()]);
        assert_eq!(ba.func, None);
        assert_eq!(ba.name, "prog");
        assert!(ba.args.is_empty());
        assert!(ba.kwargs.is_empty());
    }
}
