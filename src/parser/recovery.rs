//! §4.4 Fallback recovery: rescuing an otherwise-fatal error by finding a later alternate or
//! fallback command token.
use crate::bound::{BoundArguments, ParseState};
use crate::error::ArgumentError;
use crate::signature::CliSignature;

use super::engine::{alias_key, dispatch};

/// Attempt to rescue `err`: scan `ba.in_args[err.pos() + 1..]` for a token aliasing an
/// alternate/fallback command. If one is found, fire it (which always sets `ba.func`, clearing
/// `unsatisfied` and discarding anything bound so far) and return `Ok(true)`. `Ok(false)` means
/// no rescuer was found (or every candidate's own `read_argument` itself failed, e.g. an
/// `AlternateCommand` found past position 0 rejecting itself) and the original error should
/// propagate -- mirroring `original_source/clize/parser.py`'s `_SeekFallbackCommand`, which
/// catches `ArgumentError` from a candidate and keeps scanning rather than aborting on it.
///
/// [`ArgumentError::NotEnoughValues`] and [`ArgumentError::MissingRequiredArguments`] carry no
/// real position (`pos()` returns `usize::MAX`) and are never eligible: both arise only at
/// termination, after every token -- including any rescuer -- has already been considered.
pub(crate) fn try_recover(
    signature: &CliSignature,
    ba: &mut BoundArguments,
    state: &mut ParseState,
    err: &ArgumentError,
) -> Result<bool, ArgumentError> {
    let pos = err.pos();
    if pos == usize::MAX {
        return Ok(false);
    }
    let scan_from = pos + 1;
    if scan_from >= ba.in_args.len() {
        return Ok(false);
    }

    for offset in 0..(ba.in_args.len() - scan_from) {
        let i = scan_from + offset;
        let key = alias_key(&ba.in_args[i]);
        let Some(idx) = signature.alias_index(&key) else {
            continue;
        };
        if !signature.parameters[idx].is_alternate_or_fallback() {
            continue;
        }

        #[cfg(feature = "tracing_debug")]
        tracing::debug!("attempting fallback recovery at token {i} ('{key}') after error at {pos}");

        if dispatch(signature, ba, state, Some(idx), i).is_err() {
            continue;
        }
        state.unsatisfied.clear();
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Parameter;
    use crate::value::ValueConverter;
    use std::rc::Rc;

    #[test]
    fn no_rescuer_returns_false() {
        let signature = CliSignature::new(vec![Parameter::positional(
            "count",
            Rc::new(ValueConverter::Int) as Rc<dyn crate::value::Converter>,
            None,
        )])
        .unwrap();
        let mut ba = BoundArguments::new("prog", vec!["bad".to_string()]);
        let mut state = ParseState::new(&signature);
        let err = ArgumentError::BadArgumentFormat {
            pos: 0,
            parameter: "count".to_string(),
            source: crate::value::ValueError {
                token: "bad".to_string(),
                type_name: "INT",
            },
        };
        assert!(!try_recover(&signature, &mut ba, &mut state, &err).unwrap());
    }

    #[test]
    fn rescuing_fallback_command_clears_unsatisfied() {
        let signature = CliSignature::new(vec![
            Parameter::positional(
                "count",
                Rc::new(ValueConverter::Int) as Rc<dyn crate::value::Converter>,
                None,
            ),
            Parameter::fallback_command(vec!["--help".to_string()], "show_help"),
        ])
        .unwrap();
        let mut ba = BoundArguments::new(
            "prog",
            vec!["bad".to_string(), "--help".to_string()],
        );
        let mut state = ParseState::new(&signature);
        let err = ArgumentError::BadArgumentFormat {
            pos: 0,
            parameter: "count".to_string(),
            source: crate::value::ValueError {
                token: "bad".to_string(),
                type_name: "INT",
            },
        };
        assert!(try_recover(&signature, &mut ba, &mut state, &err).unwrap());
        assert_eq!(ba.func.as_deref(), Some("show_help"));
        assert!(state.unsatisfied.is_empty());
    }
}
