use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// What a scan means: clocking in/out of work or in/out of a break.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PunchAction {
    In,
    Out,
    BreakIn,
    BreakOut,
}

impl PunchAction {
    /// Parse user input (case-insensitive).
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "break_in" => Ok(Self::BreakIn),
            "break_out" => Ok(Self::BreakOut),
            _ => Err(AppError::Validation(format!(
                "invalid punch action '{}': expected in, out, break_in or break_out",
                s
            ))),
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchAction::In => "in",
            PunchAction::Out => "out",
            PunchAction::BreakIn => "break_in",
            PunchAction::BreakOut => "break_out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// Label used in reports and user messages (`IN`, `BREAK_OUT`, ...).
    pub fn label(&self) -> String {
        self.to_db_str().to_uppercase()
    }
}

impl fmt::Display for PunchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
