//! The parameter taxonomy (§3, §4.2): a tagged variant dispatched on by the parse engine.
use std::rc::Rc;

use crate::bound::{BoundArguments, ParseState};
use crate::error::ArgumentError;
use crate::model::{MultiBound, Nargs};
use crate::signature::CliSignature;
use crate::value::{Converter, Value, ValueConverter};

/// Values for which `--flag=X` is considered false (case-insensitive).
const FALSE_TRIGGERS: [&str; 5] = ["0", "n", "no", "f", "false"];

/// One CLI parameter.
///
/// Every variant (§3) carries the common fields hoisted onto this struct; variant-specific data
/// lives in [`ParameterKind`]. Operations are dispatched by variant rather than through an
/// inheritance lattice (§9 "Polymorphism across parameter variants").
#[derive(Debug, Clone)]
pub struct Parameter {
    pub(crate) display_name: String,
    pub(crate) undocumented: bool,
    pub(crate) last_option: bool,
    /// Forces `required()` to `false` regardless of the presence of a default value; used by
    /// the signature converter (§4.5) to represent a callee parameter whose default is the
    /// sentinel "no value committed yet" (e.g. an explicit `None` default) rather than a true
    /// missing default.
    pub(crate) force_optional: bool,
    /// Auxiliary parameters this parameter contributes, flattened into the owning signature at
    /// construction time (§4.6).
    pub(crate) extras: Vec<Parameter>,
    pub(crate) kind: ParameterKind,
}

#[derive(Debug, Clone)]
pub(crate) enum ParameterKind {
    Positional {
        conv: Rc<dyn Converter>,
        default: Option<Value>,
        argument_name: String,
    },
    ExtraPositional {
        min: usize,
        max: Option<usize>,
        conv: Rc<dyn Converter>,
        argument_name: String,
    },
    Option {
        aliases: Vec<String>,
        conv: Rc<dyn Converter>,
        default: Option<Value>,
        argument_name: String,
    },
    IntOption {
        aliases: Vec<String>,
        default: Option<Value>,
        argument_name: String,
    },
    Flag {
        aliases: Vec<String>,
        value: Value,
        false_value: Value,
        argument_name: String,
    },
    /// A repeatable named option collecting its values into a `Value::List` under `kwargs`.
    ///
    /// Not part of the original `clize` taxonomy (§4.2 only collects multiple values for
    /// positionals via `ExtraPositional`/`AppendArguments`); this variant generalizes the same
    /// `MultiParameter` collection mechanics the original applies to positionals so that
    /// canonical scenario 2 (§8) -- a repeatable named parameter -- has a home. Grounded on
    /// `original_source/clize/parser.py`'s `MultiParameter`.
    Multi {
        aliases: Vec<String>,
        min: usize,
        max: Option<usize>,
        conv: Rc<dyn Converter>,
        argument_name: String,
    },
    AlternateCommand {
        aliases: Vec<String>,
        target: String,
    },
    FallbackCommand {
        aliases: Vec<String>,
        target: String,
    },
    /// Internal sticky collector installed after a mid-stream alternate/fallback command; routes
    /// remaining positional tokens to `args` unrestricted.
    AppendArguments,
    /// Internal sticky no-op installed after a mid-stream fallback command; discards remaining
    /// tokens.
    IgnoreAllArguments,
}

impl Parameter {
    /// A single positional slot (§4.2 Positional).
    pub fn positional(
        argument_name: impl Into<String>,
        conv: Rc<dyn Converter>,
        default: Option<Value>,
    ) -> Self {
        let argument_name = argument_name.into();
        Parameter {
            display_name: argument_name.clone(),
            undocumented: false,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::Positional {
                conv,
                default,
                argument_name,
            },
        }
    }

    /// The variadic positional collector (§4.2 ExtraPositional); always the last positional.
    pub fn extra_positional(
        argument_name: impl Into<String>,
        conv: Rc<dyn Converter>,
        nargs: Nargs,
    ) -> Self {
        let bound: MultiBound = nargs.into();
        let argument_name = argument_name.into();
        Parameter {
            display_name: argument_name.clone(),
            undocumented: false,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::ExtraPositional {
                min: bound.min,
                max: bound.max,
                conv,
                argument_name,
            },
        }
    }

    /// A named parameter that takes a value (§4.2 Option).
    pub fn option(
        aliases: Vec<String>,
        argument_name: impl Into<String>,
        conv: Rc<dyn Converter>,
        default: Option<Value>,
    ) -> Self {
        let display_name = aliases.first().cloned().unwrap_or_default();
        Parameter {
            display_name,
            undocumented: false,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::Option {
                aliases,
                conv,
                default,
                argument_name: argument_name.into(),
            },
        }
    }

    /// A named integer parameter whose short form supports chained digit tails (§4.2 IntOption).
    pub fn int_option(
        aliases: Vec<String>,
        argument_name: impl Into<String>,
        default: Option<Value>,
    ) -> Self {
        let display_name = aliases.first().cloned().unwrap_or_default();
        Parameter {
            display_name,
            undocumented: false,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::IntOption {
                aliases,
                default,
                argument_name: argument_name.into(),
            },
        }
    }

    /// A named parameter with no value (§4.2 Flag).
    pub fn flag(
        aliases: Vec<String>,
        argument_name: impl Into<String>,
        value: Value,
        false_value: Value,
    ) -> Self {
        let display_name = aliases.first().cloned().unwrap_or_default();
        Parameter {
            display_name,
            undocumented: false,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::Flag {
                aliases,
                value,
                false_value,
                argument_name: argument_name.into(),
            },
        }
    }

    /// A repeatable named parameter collecting its values into a list (see [`ParameterKind::Multi`]).
    pub fn multi(
        aliases: Vec<String>,
        argument_name: impl Into<String>,
        conv: Rc<dyn Converter>,
        nargs: Nargs,
    ) -> Self {
        let bound: MultiBound = nargs.into();
        let display_name = aliases.first().cloned().unwrap_or_default();
        Parameter {
            display_name,
            undocumented: false,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::Multi {
                aliases,
                min: bound.min,
                max: bound.max,
                conv,
                argument_name: argument_name.into(),
            },
        }
    }

    /// A parameter that redirects to an alternate callee; legal only as the first token
    /// (§4.2 AlternateCommand).
    pub fn alternate_command(aliases: Vec<String>, target: impl Into<String>) -> Self {
        let display_name = aliases.first().cloned().unwrap_or_default();
        Parameter {
            display_name,
            undocumented: false,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::AlternateCommand {
                aliases,
                target: target.into(),
            },
        }
    }

    /// A parameter that redirects to an alternate callee, legal anywhere; discards the rest of
    /// the input when triggered after the first token (§4.2 FallbackCommand).
    pub fn fallback_command(aliases: Vec<String>, target: impl Into<String>) -> Self {
        let display_name = aliases.first().cloned().unwrap_or_default();
        Parameter {
            display_name,
            undocumented: false,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::FallbackCommand {
                aliases,
                target: target.into(),
            },
        }
    }

    pub(crate) fn append_arguments() -> Self {
        Parameter {
            display_name: "<internal>".to_string(),
            undocumented: true,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::AppendArguments,
        }
    }

    pub(crate) fn ignore_all_arguments() -> Self {
        Parameter {
            display_name: "<internal>".to_string(),
            undocumented: true,
            last_option: false,
            force_optional: false,
            extras: Vec::new(),
            kind: ParameterKind::IgnoreAllArguments,
        }
    }

    /// Hide this parameter from documentation.
    pub fn undocumented(mut self) -> Self {
        self.undocumented = true;
        self
    }

    /// Mark this parameter as switching the parse into posarg-only mode once matched.
    pub fn last_option(mut self) -> Self {
        self.last_option = true;
        self
    }

    /// Mark this parameter optional regardless of whether it carries a concrete default value.
    ///
    /// Used for a callee parameter whose default is the sentinel "no value committed" (e.g. an
    /// explicit `None`) rather than a genuinely missing default (§4.5).
    pub fn optional(mut self) -> Self {
        self.force_optional = true;
        self
    }

    /// Attach extras (§4.6): auxiliary parameters flattened into the owning signature alongside
    /// this one at construction time.
    pub fn with_extras(mut self, extras: Vec<Parameter>) -> Self {
        self.extras = extras;
        self
    }

    /// The name used to present this parameter (first alias, or the positional's argument name).
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The key this parameter's converted value(s) are stored under in `args`/`kwargs`.
    pub(crate) fn argument_name(&self) -> &str {
        match &self.kind {
            ParameterKind::Positional { argument_name, .. }
            | ParameterKind::ExtraPositional { argument_name, .. }
            | ParameterKind::Option { argument_name, .. }
            | ParameterKind::IntOption { argument_name, .. }
            | ParameterKind::Flag { argument_name, .. }
            | ParameterKind::Multi { argument_name, .. } => argument_name,
            ParameterKind::AlternateCommand { .. } | ParameterKind::FallbackCommand { .. } => {
                &self.display_name
            }
            ParameterKind::AppendArguments | ParameterKind::IgnoreAllArguments => "<internal>",
        }
    }

    /// Every alias that triggers this parameter, ordered for presentation: short forms (fewer
    /// leading dashes) before long forms, source order preserved within a tie (§4.2 "Alias
    /// display ordering"). Grounded on `original_source/clize/parser.py`'s `NamedParameter.alias_key`
    /// / `get_all_names`; consumed by the (out-of-scope, §1) help renderer, not by the parser
    /// itself.
    ///
    /// Sorts by leading-dash count rather than a literal "total length minus leading dashes":
    /// `alias_key` computes `len(name) - len(name.lstrip('-'))`, which is exactly the leading-dash
    /// count (the amount `lstrip` removes), not the stripped name's remaining length. The two
    /// readings diverge for equal-length mixed-dash aliases (`--ab` vs `-xyz`): the literal
    /// "remaining length" key would rank `--ab` (remaining length 2) ahead of `-xyz` (remaining
    /// length 3), putting a long form before a short one and breaking "short form first". Dash
    /// count is the formula clize actually runs, and the one that keeps that guarantee.
    pub fn display_aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.aliases().iter().map(String::as_str).collect();
        aliases.sort_by_key(|alias| alias.chars().take_while(|c| *c == '-').count());
        aliases
    }

    /// Every alias that triggers this parameter, or `&[]` for a positional parameter.
    pub fn aliases(&self) -> &[String] {
        match &self.kind {
            ParameterKind::Option { aliases, .. }
            | ParameterKind::IntOption { aliases, .. }
            | ParameterKind::Flag { aliases, .. }
            | ParameterKind::Multi { aliases, .. }
            | ParameterKind::AlternateCommand { aliases, .. }
            | ParameterKind::FallbackCommand { aliases, .. } => aliases,
            ParameterKind::Positional { .. }
            | ParameterKind::ExtraPositional { .. }
            | ParameterKind::AppendArguments
            | ParameterKind::IgnoreAllArguments => &[],
        }
    }

    pub(crate) fn is_named(&self) -> bool {
        !self.aliases().is_empty()
    }

    pub(crate) fn is_alternate_or_fallback(&self) -> bool {
        matches!(
            self.kind,
            ParameterKind::AlternateCommand { .. } | ParameterKind::FallbackCommand { .. }
        )
    }

    pub(crate) fn is_extra_positional(&self) -> bool {
        matches!(self.kind, ParameterKind::ExtraPositional { .. })
    }

    /// Whether this parameter is an engine-internal sticky helper (never part of a
    /// [`CliSignature`], never required, never looked up by index).
    pub(crate) fn is_ephemeral(&self) -> bool {
        matches!(
            self.kind,
            ParameterKind::AppendArguments | ParameterKind::IgnoreAllArguments
        )
    }

    /// Whether this parameter must be satisfied (Invariant 2: derived, never stored).
    pub fn required(&self) -> bool {
        if self.force_optional {
            return false;
        }
        match &self.kind {
            ParameterKind::Positional { default, .. } => default.is_none(),
            ParameterKind::Option { default, .. } => default.is_none(),
            ParameterKind::IntOption { default, .. } => default.is_none(),
            ParameterKind::ExtraPositional { min, .. } => *min > 0,
            ParameterKind::Multi { min, .. } => *min > 0,
            ParameterKind::Flag { .. }
            | ParameterKind::AlternateCommand { .. }
            | ParameterKind::FallbackCommand { .. }
            | ParameterKind::AppendArguments
            | ParameterKind::IgnoreAllArguments => false,
        }
    }

    /// §4.2 `read_argument`: consume tokens starting at position `i` of the input.
    ///
    /// `own_idx` is this parameter's index in `signature.parameters`, or `None` for the
    /// ephemeral `AppendArguments`/`IgnoreAllArguments` helpers, which are never required and
    /// never indexed.
    pub(crate) fn read_argument(
        &self,
        own_idx: Option<usize>,
        signature: &CliSignature,
        ba: &mut BoundArguments,
        state: &mut ParseState,
        i: usize,
    ) -> Result<(), ArgumentError> {
        match &self.kind {
            ParameterKind::Positional {
                conv, argument_name, ..
            } => {
                let token = ba.in_args[i].clone();
                let value = convert_or_bad_format(conv.as_ref(), &token, i, argument_name)?;
                ba.args.push(value);
                Ok(())
            }
            ParameterKind::ExtraPositional {
                min,
                max,
                conv,
                argument_name,
            } => push_multi_positional(
                ba,
                state,
                own_idx,
                i,
                conv.as_ref(),
                argument_name,
                *min,
                *max,
            ),
            ParameterKind::Option {
                conv, argument_name, ..
            } => {
                if ba.kwargs.contains_key(argument_name) {
                    return Err(ArgumentError::DuplicateNamedArgument {
                        pos: i,
                        parameter: argument_name.clone(),
                    });
                }
                read_named_value(ba, state, i, argument_name, conv.as_ref())
            }
            ParameterKind::IntOption { argument_name, .. } => {
                if ba.kwargs.contains_key(argument_name) {
                    return Err(ArgumentError::DuplicateNamedArgument {
                        pos: i,
                        parameter: argument_name.clone(),
                    });
                }
                read_int_option(signature, ba, state, i, argument_name)
            }
            ParameterKind::Flag {
                value,
                false_value,
                argument_name,
                ..
            } => {
                let arg = ba.in_args[i].clone();
                if arg.starts_with("--") {
                    let activated = match arg.split_once('=') {
                        None => true,
                        Some((_, suffix)) => !FALSE_TRIGGERS
                            .iter()
                            .any(|t| t.eq_ignore_ascii_case(suffix)),
                    };
                    ba.kwargs.insert(
                        argument_name.clone(),
                        if activated {
                            value.clone()
                        } else {
                            false_value.clone()
                        },
                    );
                    Ok(())
                } else {
                    ba.kwargs.insert(argument_name.clone(), value.clone());
                    let rest = arg[2..].to_string();
                    redispatch_short_arg(&rest, signature, ba, state, i)
                }
            }
            ParameterKind::Multi {
                conv,
                min,
                max,
                argument_name,
                ..
            } => {
                let (raw, glued) = named_get_value(ba, i)?;
                state.skip = usize::from(!glued);
                let value = convert_or_bad_format(conv.as_ref(), &raw, i, argument_name)?;
                let entry = ba
                    .kwargs
                    .entry(argument_name.clone())
                    .or_insert_with(|| Value::List(Vec::new()));
                let collected = match entry {
                    Value::List(items) => {
                        items.push(value);
                        items.len()
                    }
                    _ => unreachable!("named multi parameter kwargs entry must be a list"),
                };
                if collected >= *min {
                    if let Some(idx) = own_idx {
                        state.unsatisfied.remove(&idx);
                    }
                }
                if let Some(max) = max {
                    if collected > *max {
                        return Err(ArgumentError::TooManyValues {
                            pos: i,
                            parameter: argument_name.clone(),
                            expected: *max,
                        });
                    }
                }
                Ok(())
            }
            ParameterKind::AlternateCommand { target, .. } => {
                if i != 0 {
                    return Err(ArgumentError::ArgsBeforeAlternateCommand {
                        pos: i,
                        parameter: self.display_name.clone(),
                    });
                }
                fire_command(target, ba, state, i);
                Ok(())
            }
            ParameterKind::FallbackCommand { target, .. } => {
                fire_command(target, ba, state, i);
                Ok(())
            }
            ParameterKind::AppendArguments => {
                let identity: &dyn Converter = &ValueConverter::Str;
                push_multi_positional(ba, state, None, i, identity, "<internal>", 0, None)
            }
            ParameterKind::IgnoreAllArguments => Ok(()),
        }
    }

    /// §4.2 `apply_generic_flags`: runs after a successful `read_argument`.
    pub(crate) fn apply_generic_flags(
        &self,
        rc_self: &Rc<Parameter>,
        own_idx: Option<usize>,
        state: &mut ParseState,
    ) {
        if self.last_option {
            state.posarg_only = true;
        }
        match &self.kind {
            ParameterKind::ExtraPositional { .. } => {
                state.sticky = Some(Rc::clone(rc_self));
            }
            ParameterKind::Multi { .. } => {
                // Satisfaction is tracked by `read_argument`'s own min-count check, not here.
            }
            _ => {
                if let Some(idx) = own_idx {
                    state.unsatisfied.remove(&idx);
                }
            }
        }
    }

    /// §4.3 Termination: called once per still-unsatisfied required parameter.
    pub(crate) fn unsatisfied(
        &self,
        ba: &BoundArguments,
        state: &ParseState,
    ) -> Result<bool, ArgumentError> {
        match &self.kind {
            ParameterKind::ExtraPositional {
                min, argument_name, ..
            } => {
                if ba.args.is_empty() || state.unsatisfied.len() > 1 {
                    Ok(true)
                } else {
                    Err(ArgumentError::NotEnoughValues {
                        parameter: argument_name.clone(),
                        expected: *min,
                        provided: ba.args.len(),
                    })
                }
            }
            ParameterKind::Multi {
                min, argument_name, ..
            } => {
                let provided = match ba.kwargs.get(argument_name) {
                    Some(Value::List(items)) => items.len(),
                    _ => 0,
                };
                if provided == 0 || state.unsatisfied.len() > 1 {
                    Ok(true)
                } else {
                    Err(ArgumentError::NotEnoughValues {
                        parameter: argument_name.clone(),
                        expected: *min,
                        provided,
                    })
                }
            }
            _ => Ok(true),
        }
    }

    /// §4.2 `post_parse`: a hook called once parsing is complete; the base variants have
    /// nothing to do here, kept as an extension point for signature-converter-supplied
    /// parameter instances.
    pub(crate) fn post_parse(&self, _ba: &mut BoundArguments) {}
}

fn convert_or_bad_format(
    conv: &dyn Converter,
    token: &str,
    pos: usize,
    parameter: &str,
) -> Result<Value, ArgumentError> {
    conv.convert(token)
        .map_err(|source| ArgumentError::BadArgumentFormat {
            pos,
            parameter: parameter.to_string(),
            source,
        })
}

/// §4.2 Named "get_value": returns the value text and whether it was glued to the option
/// (`-xVAL`/`--name=V`, no token consumed) or came from the following token (consumes one).
fn named_get_value(ba: &BoundArguments, i: usize) -> Result<(String, bool), ArgumentError> {
    let arg = &ba.in_args[i];
    if let Some(stripped) = arg.strip_prefix("--") {
        match stripped.find('=') {
            Some(eq) => Ok((stripped[eq + 1..].to_string(), true)),
            None => next_token_value(ba, i, arg),
        }
    } else {
        let rest = &arg[1..];
        if rest.len() > 1 {
            Ok((rest[1..].to_string(), true))
        } else {
            next_token_value(ba, i, arg)
        }
    }
}

fn next_token_value(ba: &BoundArguments, i: usize, arg: &str) -> Result<(String, bool), ArgumentError> {
    ba.in_args
        .get(i + 1)
        .cloned()
        .map(|v| (v, false))
        .ok_or_else(|| ArgumentError::MissingValue {
            pos: i,
            parameter: arg.to_string(),
        })
}

fn read_named_value(
    ba: &mut BoundArguments,
    state: &mut ParseState,
    i: usize,
    argument_name: &str,
    conv: &dyn Converter,
) -> Result<(), ArgumentError> {
    let (raw, glued) = named_get_value(ba, i)?;
    state.skip = usize::from(!glued);
    let value = convert_or_bad_format(conv, &raw, i, argument_name)?;
    ba.kwargs.insert(argument_name.to_string(), value);
    Ok(())
}

/// §4.2 IntOption: the short form accepts a digit tail, consumed greedily, with the remainder
/// redispatched as a new short-flag chain.
fn read_int_option(
    signature: &CliSignature,
    ba: &mut BoundArguments,
    state: &mut ParseState,
    i: usize,
    argument_name: &str,
) -> Result<(), ArgumentError> {
    let arg = ba.in_args[i].clone();
    if arg.starts_with("--") {
        return read_named_value(ba, state, i, argument_name, &ValueConverter::Int);
    }
    let tail = &arg[2.min(arg.len())..];
    if tail.is_empty() {
        return read_named_value(ba, state, i, argument_name, &ValueConverter::Int);
    }
    let split_at = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    let (digits, rest) = tail.split_at(split_at);
    let value = convert_or_bad_format(&ValueConverter::Int, digits, i, argument_name)?;
    ba.kwargs.insert(argument_name.to_string(), value);
    redispatch_short_arg(rest, signature, ba, state, i)
}

/// §4.2 `redispatch_short_arg`: rewrites the current input slot to `"-" + rest`, dispatches it
/// to the parameter aliased to `-rest[0]`, then restores the slot. Implements short-flag
/// chaining (`-abc` ≡ `-a -bc`).
///
/// Per the §9 Open Question resolution, a digit-only remainder is an `UnknownOption` rather
/// than an attempted lookup of a (never-registered) numeric alias.
fn redispatch_short_arg(
    rest: &str,
    signature: &CliSignature,
    ba: &mut BoundArguments,
    state: &mut ParseState,
    i: usize,
) -> Result<(), ArgumentError> {
    if rest.is_empty() {
        return Ok(());
    }
    let first = rest.chars().next().expect("non-empty checked above");
    if first.is_ascii_digit() {
        return Err(ArgumentError::UnknownOption {
            pos: i,
            option: format!("-{first}"),
        });
    }
    let key = format!("-{first}");
    let idx = signature
        .alias_index(&key)
        .ok_or_else(|| ArgumentError::UnknownOption {
            pos: i,
            option: key.clone(),
        })?;

    #[cfg(feature = "tracing_debug")]
    tracing::trace!("redispatching short-flag tail '-{rest}' to '{key}' at position {i}");

    let original = ba.in_args[i].clone();
    ba.in_args[i] = format!("-{rest}");
    let rc_param = Rc::clone(&signature.parameters[idx]);
    let result = rc_param.read_argument(Some(idx), signature, ba, state, i);
    ba.in_args[i] = original;
    result?;
    rc_param.apply_generic_flags(&rc_param, Some(idx), state);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn push_multi_positional(
    ba: &mut BoundArguments,
    state: &mut ParseState,
    own_idx: Option<usize>,
    i: usize,
    conv: &dyn Converter,
    argument_name: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), ArgumentError> {
    let token = ba.in_args[i].clone();
    let value = convert_or_bad_format(conv, &token, i, argument_name)?;
    ba.args.push(value);
    let collected = ba.args.len();
    if let Some(idx) = own_idx {
        if min <= collected {
            state.unsatisfied.remove(&idx);
        }
    }
    if let Some(max) = max {
        if collected > max {
            return Err(ArgumentError::TooManyValues {
                pos: i,
                parameter: argument_name.to_string(),
                expected: max,
            });
        }
    }
    Ok(())
}

/// Shared by `AlternateCommand` and `FallbackCommand` (§4.2): clear any bindings collected so
/// far, record the triggering token, swap the target, and enter posarg-only mode with the
/// appropriate sticky collector.
fn fire_command(target: &str, ba: &mut BoundArguments, state: &mut ParseState, i: usize) {
    ba.args.clear();
    ba.kwargs.clear();
    ba.post_name.push(ba.in_args[i].clone());
    ba.func = Some(target.to_string());
    state.posarg_only = true;
    state.sticky = Some(Rc::new(if i == 0 {
        Parameter::append_arguments()
    } else {
        Parameter::ignore_all_arguments()
    }));
}
