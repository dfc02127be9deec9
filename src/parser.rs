//! §4.3-4.4: the single-pass parse engine and its fallback recovery path.
mod engine;
mod recovery;

use crate::bound::BoundArguments;
use crate::error::ArgumentError;
use crate::signature::CliSignature;

/// Parse `in_args` against `signature`, labelling the result `name` (the program/callee label
/// assigned to [`BoundArguments::func`] when no alternate/fallback command fires).
pub fn parse(
    signature: &CliSignature,
    name: impl Into<String>,
    in_args: Vec<String>,
) -> Result<BoundArguments, ArgumentError> {
    let ba = BoundArguments::new(name, in_args);
    engine::run(signature, ba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Nargs;
    use crate::parameter::Parameter;
    use crate::value::{Value, ValueConverter};
    use std::rc::Rc;

    fn str_conv() -> Rc<dyn crate::value::Converter> {
        Rc::new(ValueConverter::Str)
    }
    fn int_conv() -> Rc<dyn crate::value::Converter> {
        Rc::new(ValueConverter::Int)
    }

    #[test]
    fn binds_a_single_positional() {
        let signature = CliSignature::new(vec![Parameter::positional("name", str_conv(), None)]).unwrap();
        let ba = parse(&signature, "prog", vec!["alice".to_string()]).unwrap();
        assert_eq!(ba.func.as_deref(), Some("prog"));
        assert_eq!(ba.args, vec![Value::Str("alice".to_string())]);
    }

    #[test]
    fn missing_required_positional_is_reported() {
        let signature = CliSignature::new(vec![Parameter::positional("name", str_conv(), None)]).unwrap();
        let err = parse(&signature, "prog", vec![]).unwrap_err();
        assert_matches!(err, ArgumentError::MissingRequiredArguments { .. });
    }

    #[test]
    fn named_repeatable_multi_collects_values_in_order() {
        let signature = CliSignature::new(vec![Parameter::multi(
            vec!["--tag".to_string()],
            "tag",
            str_conv(),
            Nargs::Any,
        )])
        .unwrap();
        let ba = parse(
            &signature,
            "prog",
            vec![
                "--tag".to_string(),
                "a".to_string(),
                "--tag".to_string(),
                "b".to_string(),
            ],
        )
        .unwrap();
        assert_eq!(
            ba.kwargs.get("tag"),
            Some(&Value::List(vec![
                Value::Str("a".to_string()),
                Value::Str("b".to_string())
            ]))
        );
    }

    #[test]
    fn short_flag_chain_redispatches() {
        let signature = CliSignature::new(vec![
            Parameter::flag(
                vec!["-a".to_string()],
                "a",
                Value::Bool(true),
                Value::Bool(false),
            ),
            Parameter::flag(
                vec!["-b".to_string()],
                "b",
                Value::Bool(true),
                Value::Bool(false),
            ),
        ])
        .unwrap();
        let ba = parse(&signature, "prog", vec!["-ab".to_string()]).unwrap();
        assert_eq!(ba.kwargs.get("a"), Some(&Value::Bool(true)));
        assert_eq!(ba.kwargs.get("b"), Some(&Value::Bool(true)));
    }

    #[test]
    fn int_option_digit_tail_redispatches_to_a_following_flag() {
        let signature = CliSignature::new(vec![
            Parameter::int_option(vec!["-i".to_string()], "i", None),
            Parameter::flag(
                vec!["-v".to_string()],
                "v",
                Value::Bool(true),
                Value::Bool(false),
            ),
        ])
        .unwrap();
        let ba = parse(&signature, "prog", vec!["-i5v".to_string()]).unwrap();
        assert_eq!(ba.kwargs.get("i"), Some(&Value::Int(5)));
        assert_eq!(ba.kwargs.get("v"), Some(&Value::Bool(true)));
    }

    #[test]
    fn int_option_digit_tail_chains_into_another_int_option() {
        let signature = CliSignature::new(vec![
            Parameter::int_option(vec!["-i".to_string()], "i", None),
            Parameter::int_option(vec!["-j".to_string()], "j", None),
        ])
        .unwrap();
        let ba = parse(&signature, "prog", vec!["-i5j6".to_string()]).unwrap();
        assert_eq!(ba.kwargs.get("i"), Some(&Value::Int(5)));
        assert_eq!(ba.kwargs.get("j"), Some(&Value::Int(6)));
    }

    #[test]
    fn int_option_tail_with_no_matching_alias_is_unknown_option() {
        let signature =
            CliSignature::new(vec![Parameter::int_option(vec!["-i".to_string()], "i", None)]).unwrap();
        let err = parse(&signature, "prog", vec!["-i5x".to_string()]).unwrap_err();
        assert_matches!(err, ArgumentError::UnknownOption { option, .. } if option == "-x");
    }

    #[test]
    fn alternate_command_must_be_first() {
        let signature = CliSignature::new(vec![
            Parameter::positional("name", str_conv(), None),
            Parameter::alternate_command(vec!["--version".to_string()], "show_version"),
        ])
        .unwrap();
        let err = parse(
            &signature,
            "prog",
            vec!["alice".to_string(), "--version".to_string()],
        )
        .unwrap_err();
        assert_matches!(err, ArgumentError::ArgsBeforeAlternateCommand { .. });
    }

    #[test]
    fn alternate_command_at_position_zero_redirects() {
        let signature = CliSignature::new(vec![
            Parameter::positional("name", str_conv(), None),
            Parameter::alternate_command(vec!["--version".to_string()], "show_version"),
        ])
        .unwrap();
        let ba = parse(&signature, "prog", vec!["--version".to_string()]).unwrap();
        assert_eq!(ba.func.as_deref(), Some("show_version"));
        assert_eq!(ba.post_name, vec!["--version".to_string()]);
    }

    #[test]
    fn fallback_command_rescues_after_an_argument_error() {
        let signature = CliSignature::new(vec![
            Parameter::positional("count", int_conv(), None),
            Parameter::fallback_command(vec!["--help".to_string()], "show_help"),
        ])
        .unwrap();
        let ba = parse(
            &signature,
            "prog",
            vec!["not-an-int".to_string(), "--help".to_string()],
        )
        .unwrap();
        assert_eq!(ba.func.as_deref(), Some("show_help"));
    }

    #[test]
    fn unrecoverable_error_without_a_rescuer_propagates() {
        let signature = CliSignature::new(vec![Parameter::positional("count", int_conv(), None)]).unwrap();
        let err = parse(&signature, "prog", vec!["not-an-int".to_string()]).unwrap_err();
        assert_matches!(err, ArgumentError::BadArgumentFormat { .. });
    }

    #[test]
    fn extra_positional_collects_the_remainder() {
        let signature = CliSignature::new(vec![
            Parameter::positional("first", str_conv(), None),
            Parameter::extra_positional("rest", str_conv(), Nargs::Any),
        ])
        .unwrap();
        let ba = parse(
            &signature,
            "prog",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .unwrap();
        assert_eq!(
            ba.args,
            vec![
                Value::Str("a".to_string()),
                Value::Str("b".to_string()),
                Value::Str("c".to_string())
            ]
        );
    }

    #[test]
    fn too_many_positional_arguments_without_a_collector() {
        let signature = CliSignature::new(vec![Parameter::positional("first", str_conv(), None)]).unwrap();
        let err = parse(&signature, "prog", vec!["a".to_string(), "b".to_string()]).unwrap_err();
        assert_matches!(err, ArgumentError::TooManyArguments { .. });
    }

    #[test]
    fn double_dash_forces_remaining_tokens_positional() {
        let signature = CliSignature::new(vec![
            Parameter::flag(
                vec!["--verbose".to_string()],
                "verbose",
                Value::Bool(true),
                Value::Bool(false),
            ),
            Parameter::extra_positional("rest", str_conv(), Nargs::Any),
        ])
        .unwrap();
        let ba = parse(
            &signature,
            "prog",
            vec!["--".to_string(), "--verbose".to_string()],
        )
        .unwrap();
        assert_eq!(ba.args, vec![Value::Str("--verbose".to_string())]);
        assert!(!ba.kwargs.contains_key("verbose"));
    }

    // §8 Invariant 4: short-flag chaining preserves semantics, for a randomly generated set of
    // flags and a randomly generated subset/ordering of them, chained into one token.
    #[test]
    fn property_short_flag_chaining_matches_separate_flags() {
        use rand::seq::SliceRandom;
        use rand::Rng;

        let letters = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let take = rng.gen_range(1..=letters.len());
            let mut chosen: Vec<char> = letters.to_vec();
            chosen.shuffle(&mut rng);
            chosen.truncate(take);

            let parameters: Vec<Parameter> = letters
                .iter()
                .map(|c| {
                    Parameter::flag(
                        vec![format!("-{c}")],
                        c.to_string(),
                        Value::Bool(true),
                        Value::Bool(false),
                    )
                })
                .collect();
            let signature = CliSignature::new(parameters).unwrap();

            let chained_token = format!("-{}", chosen.iter().collect::<String>());
            let chained = parse(&signature, "prog", vec![chained_token]).unwrap();

            let separate_tokens: Vec<String> = chosen.iter().map(|c| format!("-{c}")).collect();
            let separate = parse(&signature, "prog", separate_tokens).unwrap();

            for c in &letters {
                let key = c.to_string();
                assert_eq!(
                    chained.kwargs.get(&key),
                    separate.kwargs.get(&key),
                    "flag '{key}' disagreed for chosen set {chosen:?}"
                );
            }
        }
    }

    // §8 Invariant 5: parse is idempotent on its signature -- running the same inputs against
    // the same signature twice yields an equal bound result.
    #[test]
    fn property_parse_is_idempotent_on_its_signature() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let signature = CliSignature::new(vec![
                Parameter::positional("first", str_conv(), None),
                Parameter::option(vec!["--count".to_string()], "count", int_conv(), Some(Value::Int(0))),
                Parameter::flag(
                    vec!["--verbose".to_string()],
                    "verbose",
                    Value::Bool(true),
                    Value::Bool(false),
                ),
            ])
            .unwrap();

            let n: i64 = rng.gen_range(0..1000);
            let inputs = vec![
                "alice".to_string(),
                "--count".to_string(),
                n.to_string(),
                "--verbose".to_string(),
            ];

            let first = parse(&signature, "prog", inputs.clone()).unwrap();
            let second = parse(&signature, "prog", inputs).unwrap();
            assert_eq!(first, second);
        }
    }
}
