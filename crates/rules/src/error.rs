use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A candidate rule failed validation. Recovered during index
    /// construction: the rule is dropped and the load continues.
    InvalidRule(String),
    /// The publisher refused to install the new index. The previously
    /// active index stays in place.
    UpdateRejected(String),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRule(msg) => write!(f, "invalid rule: {msg}"),
            Self::UpdateRejected(msg) => write!(f, "update rejected: {msg}"),
        }
    }
}

impl std::error::Error for RuleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let e = RuleError::InvalidRule("negative threshold".into());
        assert_eq!(e.to_string(), "invalid rule: negative threshold");

        let e = RuleError::UpdateRejected("fan-out unavailable".into());
        assert_eq!(e.to_string(), "update rejected: fan-out unavailable");
    }
}
