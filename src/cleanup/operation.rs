use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One memory list the external tool can clear.
///
/// The set is closed: the only way to reach the tool is through one of these
/// variants, so an arbitrary mode string can never be passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupOperation {
    ClearModifiedPageList,
    ClearStandbyList,
    ClearPriority0StandbyList,
    ClearWorkingSets,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown cleanup operation '{token}' (expected one of: {expected})")]
pub struct ParseOperationError {
    pub token: String,
    expected: String,
}

impl ParseOperationError {
    fn new(token: &str) -> Self {
        let expected = CleanupOperation::all()
            .iter()
            .map(|op| op.token())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            token: token.to_string(),
            expected,
        }
    }
}

impl CleanupOperation {
    const ALL: [CleanupOperation; 4] = [
        CleanupOperation::ClearModifiedPageList,
        CleanupOperation::ClearStandbyList,
        CleanupOperation::ClearPriority0StandbyList,
        CleanupOperation::ClearWorkingSets,
    ];

    /// Every operation, in canonical order.
    pub fn all() -> &'static [CleanupOperation] {
        &Self::ALL
    }

    /// Mode argument passed to the external tool.
    pub fn token(&self) -> &'static str {
        match self {
            Self::ClearModifiedPageList => "modifiedpagelist",
            Self::ClearStandbyList => "standbylist",
            Self::ClearPriority0StandbyList => "priority0standbylist",
            Self::ClearWorkingSets => "workingsets",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearModifiedPageList => "Clear modified page list",
            Self::ClearStandbyList => "Clear standby list",
            Self::ClearPriority0StandbyList => "Clear priority 0 standby list",
            Self::ClearWorkingSets => "Clear working sets",
        }
    }

    /// Parse user-supplied mode tokens, dropping repeats.
    pub fn parse_selection<I, S>(tokens: I) -> Result<Vec<CleanupOperation>, ParseOperationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = Vec::new();
        for token in tokens {
            let op = token.as_ref().parse::<CleanupOperation>()?;
            if !selected.contains(&op) {
                selected.push(op);
            }
        }
        Ok(selected)
    }

    /// Whether `selected` covers every operation. Running them all at once
    /// can leave the system briefly unresponsive, and callers should warn.
    pub fn is_full_set(selected: &[CleanupOperation]) -> bool {
        Self::all().iter().all(|op| selected.contains(op))
    }
}

impl fmt::Display for CleanupOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CleanupOperation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|op| op.token().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseOperationError::new(s))
    }
}
