//! §4.1 Construction: assembling a validated [`CliSignature`] from a flat list of parameters.
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::ConfigError;
use crate::parameter::Parameter;

/// A validated, immutable set of parameters ready to parse input against.
///
/// Construction is the only place [`ConfigError`] is raised (§7.1): once a `CliSignature`
/// exists, every alias is unique and unambiguous, and extras (§4.6) have been flattened into the
/// top-level parameter list.
#[derive(Debug)]
pub struct CliSignature {
    pub(crate) parameters: Vec<Rc<Parameter>>,
    alias_index: HashMap<String, usize>,
    /// Indices of the plain (non-variadic) positional parameters, in declaration order.
    pub(crate) positional: Vec<usize>,
    /// Index of the variadic positional parameter, if the signature declares one.
    pub(crate) extra_positional: Option<usize>,
    /// Indices of every required parameter, computed once at construction (§4.3 starting state).
    pub(crate) initial_unsatisfied: HashSet<usize>,
}

impl CliSignature {
    /// Flatten extras (§4.6), validate aliases, and index the result.
    pub fn new(parameters: Vec<Parameter>) -> Result<Self, ConfigError> {
        let flattened = flatten_extras(parameters);

        let mut alias_index = HashMap::new();
        for (idx, parameter) in flattened.iter().enumerate() {
            for alias in parameter.aliases() {
                if alias.chars().any(char::is_whitespace) {
                    return Err(ConfigError::AliasWhitespace {
                        alias: alias.clone(),
                    });
                }
                if alias_index.insert(alias.clone(), idx).is_some() {
                    return Err(ConfigError::DuplicateAlias {
                        alias: alias.clone(),
                    });
                }
            }
        }

        let mut positional = Vec::new();
        let mut extra_positional = None;
        for (idx, parameter) in flattened.iter().enumerate() {
            if parameter.is_extra_positional() {
                extra_positional = Some(idx);
            } else if !parameter.is_named() && !parameter.is_alternate_or_fallback() {
                positional.push(idx);
            }
        }

        let initial_unsatisfied = flattened
            .iter()
            .enumerate()
            .filter(|(_, parameter)| parameter.required())
            .map(|(idx, _)| idx)
            .collect();

        Ok(CliSignature {
            parameters: flattened.into_iter().map(Rc::new).collect(),
            alias_index,
            positional,
            extra_positional,
            initial_unsatisfied,
        })
    }

    /// The parameter index an alias resolves to, if any.
    pub(crate) fn alias_index(&self, alias: &str) -> Option<usize> {
        self.alias_index.get(alias).copied()
    }

    /// Whether `alias` names an [`Parameter::alternate_command`]/[`Parameter::fallback_command`]
    /// (§4.4 fallback recovery only ever rescues into one of these).
    pub(crate) fn is_alternate_alias(&self, alias: &str) -> bool {
        self.alias_index(alias)
            .map(|idx| self.parameters[idx].is_alternate_or_fallback())
            .unwrap_or(false)
    }
}

/// §4.6: depth-first flatten of each parameter's `extras`, owner before its extras, mirroring
/// `original_source/clize/parser.py`'s `_develop_extras` generator.
fn flatten_extras(parameters: Vec<Parameter>) -> Vec<Parameter> {
    let mut out = Vec::new();
    for mut parameter in parameters {
        let extras = std::mem::take(&mut parameter.extras);
        out.push(parameter);
        out.extend(flatten_extras(extras));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueConverter;
    use std::rc::Rc as StdRc;

    fn str_conv() -> StdRc<dyn crate::value::Converter> {
        StdRc::new(ValueConverter::Str)
    }

    #[test]
    fn duplicate_alias_rejected() {
        let err = CliSignature::new(vec![
            Parameter::flag(
                vec!["--verbose".to_string()],
                "verbose",
                crate::value::Value::Bool(true),
                crate::value::Value::Bool(false),
            ),
            Parameter::option(vec!["--verbose".to_string()], "other", str_conv(), None),
        ])
        .unwrap_err();
        assert_matches!(err, ConfigError::DuplicateAlias { alias } if alias == "--verbose");
    }

    #[test]
    fn whitespace_alias_rejected() {
        let err = CliSignature::new(vec![Parameter::option(
            vec!["-- bad".to_string()],
            "bad",
            str_conv(),
            None,
        )])
        .unwrap_err();
        assert_matches!(err, ConfigError::AliasWhitespace { .. });
    }

    #[test]
    fn extras_are_flattened() {
        let inner = Parameter::flag(
            vec!["--quiet".to_string()],
            "quiet",
            crate::value::Value::Bool(true),
            crate::value::Value::Bool(false),
        );
        let owner = Parameter::option(vec!["--level".to_string()], "level", str_conv(), None)
            .with_extras(vec![inner]);
        let signature = CliSignature::new(vec![owner]).unwrap();
        assert_eq!(signature.parameters.len(), 2);
        assert!(signature.alias_index("--quiet").is_some());
    }

    #[test]
    fn positional_and_extra_positional_are_indexed() {
        let signature = CliSignature::new(vec![
            Parameter::positional("first", str_conv(), None),
            Parameter::extra_positional("rest", str_conv(), crate::model::Nargs::Any),
        ])
        .unwrap();
        assert_eq!(signature.positional, vec![0]);
        assert_eq!(signature.extra_positional, Some(1));
    }
}
