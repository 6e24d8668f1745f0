use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown pattern type: {0:?}")]
    UnknownPatternType(String),
    #[error("unknown rule kind: {0:?}")]
    UnknownRuleKind(String),
}
