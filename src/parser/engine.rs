//! The single-pass token classification loop (§4.3).
use std::rc::Rc;

use crate::bound::{BoundArguments, ParseState};
use crate::error::ArgumentError;
use crate::signature::CliSignature;

use super::recovery;

/// Drive `ba.in_args` to completion against `signature`, returning the bound result or the
/// first unrecovered [`ArgumentError`].
pub(crate) fn run(signature: &CliSignature, mut ba: BoundArguments) -> Result<BoundArguments, ArgumentError> {
    let mut state = ParseState::new(signature);
    let len = ba.in_args.len();
    let mut i = 0;
    while i < len {
        if state.skip > 0 {
            state.skip -= 1;
            i += 1;
            continue;
        }

        #[cfg(feature = "tracing_debug")]
        tracing::debug!("classifying token {i}: '{}'", ba.in_args[i]);

        if let Err(err) = step(signature, &mut ba, &mut state, i) {
            match recovery::try_recover(signature, &mut ba, &mut state, &err) {
                Ok(true) => {
                    #[cfg(feature = "tracing_debug")]
                    tracing::debug!("recovered from '{err}' via an alternate/fallback command");
                }
                Ok(false) => return Err(err),
                Err(recover_err) => return Err(recover_err),
            }
        }
        i += 1;
    }
    terminate(signature, &mut ba, &state)?;
    Ok(ba)
}

/// Classify and dispatch the single token at position `i`.
fn step(
    signature: &CliSignature,
    ba: &mut BoundArguments,
    state: &mut ParseState,
    i: usize,
) -> Result<(), ArgumentError> {
    let token = ba.in_args[i].clone();

    if !state.posarg_only && token == "--" {
        state.posarg_only = true;
        return Ok(());
    }

    if !state.posarg_only && looks_named(&token) {
        let key = alias_key(&token);
        let idx = signature
            .alias_index(&key)
            .ok_or_else(|| ArgumentError::UnknownOption {
                pos: i,
                option: key.clone(),
            })?;
        return dispatch(signature, ba, state, Some(idx), i);
    }

    dispatch_positional(signature, ba, state, i)
}

/// A token looks like an option if it starts with `-`, has more than one character, and isn't
/// the `--` terminator (handled separately).
fn looks_named(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && token != "--"
}

/// Extract the alias a token resolves under: the option name up to `=` for long options, or the
/// dash plus the first character for short options (the rest may be a glued value or a chained
/// short-flag tail, resolved by the parameter's own `read_argument`).
pub(super) fn alias_key(token: &str) -> String {
    if let Some(stripped) = token.strip_prefix("--") {
        match stripped.find('=') {
            Some(eq) => token[..2 + eq].to_string(),
            None => token.to_string(),
        }
    } else {
        token[..token.len().min(2)].to_string()
    }
}

fn dispatch_positional(
    signature: &CliSignature,
    ba: &mut BoundArguments,
    state: &mut ParseState,
    i: usize,
) -> Result<(), ArgumentError> {
    if let Some(sticky) = state.sticky.clone() {
        let own_idx = if sticky.is_ephemeral() {
            None
        } else {
            signature.extra_positional
        };
        sticky.read_argument(own_idx, signature, ba, state, i)?;
        sticky.apply_generic_flags(&sticky, own_idx, state);
        return Ok(());
    }
    if state.posparam < signature.positional.len() {
        let idx = signature.positional[state.posparam];
        state.posparam += 1;
        return dispatch(signature, ba, state, Some(idx), i);
    }
    if signature.extra_positional.is_some() {
        return dispatch(signature, ba, state, signature.extra_positional, i);
    }
    Err(ArgumentError::TooManyArguments {
        pos: i,
        overflow: ba.in_args[i..].to_vec(),
    })
}

/// Run a real (signature-indexed) parameter's `read_argument` followed by `apply_generic_flags`.
pub(super) fn dispatch(
    signature: &CliSignature,
    ba: &mut BoundArguments,
    state: &mut ParseState,
    idx: Option<usize>,
    i: usize,
) -> Result<(), ArgumentError> {
    let idx = idx.expect("dispatch is only called with a real parameter index");
    let rc_param = Rc::clone(&signature.parameters[idx]);
    rc_param.read_argument(Some(idx), signature, ba, state, i)?;
    rc_param.apply_generic_flags(&rc_param, Some(idx), state);
    Ok(())
}

/// §4.3 Termination: once every token is consumed, check for unsatisfied required parameters
/// and run `post_parse` -- but only if no alternate/fallback command already set `ba.func`.
fn terminate(
    signature: &CliSignature,
    ba: &mut BoundArguments,
    state: &ParseState,
) -> Result<(), ArgumentError> {
    if ba.func.is_some() {
        return Ok(());
    }

    let mut missing = Vec::new();
    for idx in &state.unsatisfied {
        let parameter = &signature.parameters[*idx];
        if parameter.unsatisfied(ba, state)? {
            missing.push(parameter.display_name().to_string());
        }
    }
    if !missing.is_empty() {
        missing.sort();
        return Err(ArgumentError::MissingRequiredArguments { parameters: missing });
    }

    for parameter in &signature.parameters {
        parameter.post_parse(ba);
    }
    ba.func = Some(ba.name.clone());
    Ok(())
}
