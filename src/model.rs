/// The cardinality of values a multi-valued parameter will collect.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#nargs>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    /// `N`: Precisely `N` values.
    Precisely(u8),
    /// `*`: May be any number of values, including `0`.
    Any,
    /// `+`: At least one value must be specified.
    AtLeastOne,
}

impl std::fmt::Display for Nargs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The `(min, max)` bound a multi-valued parameter enforces while collecting.
///
/// `max = None` means unbounded. Derived from [`Nargs`] so callers may build a multi-valued
/// parameter either from an explicit bound or from the more familiar argparse-style cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MultiBound {
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
}

impl From<Nargs> for MultiBound {
    fn from(value: Nargs) -> Self {
        match value {
            Nargs::Precisely(n) => MultiBound {
                min: n as usize,
                max: Some(n as usize),
            },
            Nargs::Any => MultiBound { min: 0, max: None },
            Nargs::AtLeastOne => MultiBound { min: 1, max: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_bound_from_nargs() {
        assert_eq!(
            MultiBound::from(Nargs::Precisely(3)),
            MultiBound {
                min: 3,
                max: Some(3)
            }
        );
        assert_eq!(MultiBound::from(Nargs::Any), MultiBound { min: 0, max: None });
        assert_eq!(
            MultiBound::from(Nargs::AtLeastOne),
            MultiBound { min: 1, max: None }
        );
    }
}
