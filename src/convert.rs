//! §4.5 The signature converter: turning a callee's own parameter descriptors into a
//! [`CliSignature`]'s worth of [`Parameter`]s.
use std::rc::Rc;

use crate::error::ConfigError;
use crate::model::Nargs;
use crate::parameter::Parameter;
use crate::value::{Converter, Value, ValueConverter};

/// The positional-vs-named-vs-variadic shape of a callee parameter, mirroring
/// `inspect.Parameter.kind` in the system this was distilled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalleeParameterKind {
    /// Bound by position.
    Positional,
    /// Bound by name only.
    KeywordOnly,
    /// Collects any number of excess positional tokens (`*args`).
    VarPositional,
    /// Collects any number of excess named tokens (`**kwargs`).
    VarKeyword,
}

/// A callee parameter's default, distinguishing "no default was given" from "the default is the
/// explicit absence-of-value sentinel" from "the default is this concrete value" (§4.5).
#[derive(Debug, Clone, PartialEq)]
pub enum CalleeDefault {
    /// No default at all; the parameter is required.
    Empty,
    /// An explicit "no value" default (e.g. `None`): the parameter is optional, but no concrete
    /// fallback value is committed.
    Null,
    /// A concrete fallback value.
    Value(Value),
}

/// One flag-style marker annotation (§4.5 step 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFlag {
    /// Equivalent to [`Parameter::last_option`].
    LastOption,
    /// Forces the built parameter to be required, clearing any default (§9).
    Required,
    /// Equivalent to [`Parameter::undocumented`].
    Undocumented,
}

/// Behaviour a caller supplies to take full control of converting one callee parameter.
///
/// If present, a `ParameterConverter` annotation must be the first annotation (§4.5); it fully
/// replaces the default conversion algorithm for that parameter.
pub trait ParameterConverter: std::fmt::Debug {
    /// Convert `callee` into a parameter (or `None` to drop it from the CLI surface entirely).
    fn convert(&self, callee: &CalleeParameter) -> Result<Option<Parameter>, ConfigError>;
}

/// One annotation attached to a callee parameter, consulted in order by [`convert_parameter`].
#[derive(Debug, Clone)]
pub enum Annotation {
    /// Drop this callee parameter from the CLI surface entirely (e.g. a `self` receiver).
    Ignore,
    /// Hand the whole conversion off to a caller-supplied [`ParameterConverter`]; must be first.
    Delegate(Rc<dyn ParameterConverter>),
    /// Use this concrete parameter verbatim, short-circuiting the rest of the algorithm.
    Instance(Parameter),
    /// Convert token values with this converter rather than one inferred from the default.
    Convert(Rc<dyn Converter>),
    /// An additional alias this parameter is reachable under (named parameters only).
    Alias(String),
    /// Build this named parameter as a repeatable collector with the given cardinality, rather
    /// than a single-valued `Option` (§9, not present in the system this was distilled from).
    Multi(Nargs),
    /// A flag-style marker (§4.5 step 6).
    Flag(ParamFlag),
}

/// A callee's own description of one of its parameters, as surfaced to the signature converter.
#[derive(Debug, Clone)]
pub struct CalleeParameter {
    /// The callee-side parameter name (used to derive the CLI argument name and auto-alias).
    pub name: String,
    /// The parameter's positional/named/variadic shape.
    pub kind: CalleeParameterKind,
    /// The parameter's default, with the three-way empty/null/value distinction (§4.5).
    pub default: CalleeDefault,
    /// Annotations attached to the parameter, consulted in declaration order.
    pub annotations: Vec<Annotation>,
}

impl CalleeParameter {
    /// A callee parameter with no annotations and an empty (required) default.
    pub fn new(name: impl Into<String>, kind: CalleeParameterKind) -> Self {
        CalleeParameter {
            name: name.into(),
            kind,
            default: CalleeDefault::Empty,
            annotations: Vec::new(),
        }
    }

    /// Attach a default value.
    pub fn with_default(mut self, default: CalleeDefault) -> Self {
        self.default = default;
        self
    }

    /// Attach annotations, in the order they should be consulted.
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

/// Converts a whole callee signature into [`Parameter`]s (§4.5).
///
/// Only a [`CalleeParameterKind::VarKeyword`] parameter requires `var_keyword_factory`; every
/// other shape converts without one. Leaving it unset while a var-keyword parameter is present
/// raises [`ConfigError::MissingVarKeywordFactory`].
#[derive(Default)]
pub struct SignatureConverter {
    var_keyword_factory: Option<Rc<dyn Fn(&str) -> Parameter>>,
}

impl std::fmt::Debug for SignatureConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureConverter")
            .field("var_keyword_factory", &self.var_keyword_factory.is_some())
            .finish()
    }
}

impl SignatureConverter {
    /// A converter with no var-keyword support.
    pub fn new() -> Self {
        SignatureConverter {
            var_keyword_factory: None,
        }
    }

    /// Supply a factory building the parameter that represents a var-keyword (`**kwargs`)
    /// callee parameter, named `name`.
    pub fn with_var_keyword_factory(mut self, factory: impl Fn(&str) -> Parameter + 'static) -> Self {
        self.var_keyword_factory = Some(Rc::new(factory));
        self
    }

    /// Convert every callee parameter, in order, dropping any that convert to `None` (e.g.
    /// `Annotation::Ignore`).
    pub fn convert_all(&self, callees: &[CalleeParameter]) -> Result<Vec<Parameter>, ConfigError> {
        callees
            .iter()
            .filter_map(|callee| self.convert_parameter(callee).transpose())
            .collect()
    }

    /// §4.5: convert one callee parameter into a [`Parameter`], or `None` if it should not
    /// appear on the CLI at all.
    pub fn convert_parameter(&self, callee: &CalleeParameter) -> Result<Option<Parameter>, ConfigError> {
        if callee
            .annotations
            .iter()
            .any(|a| matches!(a, Annotation::Ignore))
        {
            return Ok(None);
        }

        if let Some(pos) = callee
            .annotations
            .iter()
            .position(|a| matches!(a, Annotation::Delegate(_)))
        {
            if pos != 0 {
                return Err(ConfigError::MisplacedParameterConverter {
                    parameter: callee.name.clone(),
                });
            }
            let delegate = match &callee.annotations[0] {
                Annotation::Delegate(delegate) => Rc::clone(delegate),
                _ => unreachable!("position located via matches! above"),
            };
            return delegate.convert(callee);
        }

        if let Some(Annotation::Instance(parameter)) = callee
            .annotations
            .iter()
            .find(|a| matches!(a, Annotation::Instance(_)))
        {
            return Ok(Some(parameter.clone()));
        }

        let mut explicit_converters = callee
            .annotations
            .iter()
            .filter_map(|a| match a {
                Annotation::Convert(conv) => Some(Rc::clone(conv)),
                _ => None,
            });
        let explicit_converter = explicit_converters.next();
        if explicit_converters.next().is_some() {
            return Err(ConfigError::MultipleConverters {
                parameter: callee.name.clone(),
            });
        }

        let aliases: Vec<String> = callee
            .annotations
            .iter()
            .filter_map(|a| match a {
                Annotation::Alias(alias) => Some(alias.clone()),
                _ => None,
            })
            .collect();

        let multi = callee.annotations.iter().find_map(|a| match a {
            Annotation::Multi(nargs) => Some(*nargs),
            _ => None,
        });

        let mut last_option = false;
        let mut required = false;
        let mut undocumented = false;
        for annotation in &callee.annotations {
            if let Annotation::Flag(flag) = annotation {
                match flag {
                    ParamFlag::LastOption => last_option = true,
                    ParamFlag::Required => required = true,
                    ParamFlag::Undocumented => undocumented = true,
                }
            }
        }

        let default = if required {
            CalleeDefault::Empty
        } else {
            callee.default.clone()
        };

        let conv = match explicit_converter {
            Some(conv) => conv,
            None => infer_converter(&default).ok_or_else(|| ConfigError::UnconvertibleParameter {
                parameter: callee.name.clone(),
            })?,
        };

        let default_value = match &default {
            CalleeDefault::Empty | CalleeDefault::Null => None,
            CalleeDefault::Value(value) => Some(value.clone()),
        };

        let argument_name = translate_name(&callee.name);

        let mut parameter = match callee.kind {
            CalleeParameterKind::VarPositional => {
                Parameter::extra_positional(argument_name, conv, Nargs::Any)
            }
            CalleeParameterKind::VarKeyword => {
                let factory = self.var_keyword_factory.as_ref().ok_or_else(|| {
                    ConfigError::MissingVarKeywordFactory {
                        parameter: callee.name.clone(),
                    }
                })?;
                factory(&argument_name)
            }
            CalleeParameterKind::Positional => {
                Parameter::positional(argument_name, conv, default_value)
            }
            CalleeParameterKind::KeywordOnly => {
                // §4.5 step 3: an explicit alias is *appended* to the alias list, not substituted
                // for the name-derived primary one -- `_use_class` seeds `aliases = [param.name]`
                // before appending (original_source/clize/parser.py:667,715,727).
                let mut keyword_aliases = vec![auto_alias(&argument_name)];
                keyword_aliases.extend(aliases);
                if let Some(nargs) = multi {
                    Parameter::multi(keyword_aliases, argument_name, conv, nargs)
                } else if conv.type_name() == ValueConverter::Bool.type_name()
                    && matches!(default_value, Some(Value::Bool(false)))
                {
                    Parameter::flag(
                        keyword_aliases,
                        argument_name,
                        Value::Bool(true),
                        Value::Bool(false),
                    )
                } else if conv.type_name() == ValueConverter::Int.type_name() {
                    Parameter::int_option(keyword_aliases, argument_name, default_value)
                } else {
                    Parameter::option(keyword_aliases, argument_name, conv, default_value)
                }
            }
        };

        if matches!(default, CalleeDefault::Null) {
            parameter = parameter.optional();
        }
        if last_option {
            parameter = parameter.last_option();
        }
        if undocumented {
            parameter = parameter.undocumented();
        }

        Ok(Some(parameter))
    }
}

/// Infer a converter from a default value's shape; `Value::List` has no singular scalar shape
/// to infer from and is rejected (surfaced as [`ConfigError::UnconvertibleParameter`]).
fn infer_converter(default: &CalleeDefault) -> Option<Rc<dyn Converter>> {
    let converter = match default {
        CalleeDefault::Empty | CalleeDefault::Null => ValueConverter::Str,
        CalleeDefault::Value(Value::Int(_)) => ValueConverter::Int,
        CalleeDefault::Value(Value::Float(_)) => ValueConverter::Float,
        CalleeDefault::Value(Value::Bool(_)) => ValueConverter::Bool,
        CalleeDefault::Value(Value::Str(_)) => ValueConverter::Str,
        CalleeDefault::Value(Value::Bytes(_)) => ValueConverter::Bytes,
        CalleeDefault::Value(Value::List(_)) => return None,
    };
    Some(Rc::new(converter))
}

/// `My_Arg` -> `my-arg`: the conventional callee-name-to-CLI-name translation (§4.5 Name
/// translation): lowercase, underscores mapped to dashes.
fn translate_name(name: &str) -> String {
    name.to_ascii_lowercase().replace('_', "-")
}

/// §4.5 Name translation: named parameters receive a `--` prefix for names of two or more
/// characters, a single `-` for single-character names -- the short/long form is determined by
/// the translated name's length, not by any annotation.
fn auto_alias(argument_name: &str) -> String {
    if argument_name.chars().count() >= 2 {
        format!("--{argument_name}")
    } else {
        format!("-{argument_name}")
    }
}
