use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::errors::GateError;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateStatus {
    Ok,
    Warn,
    Error,
    #[serde(other)]
    None,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Ok => "OK",
            GateStatus::Warn => "WARN",
            GateStatus::Error => "ERROR",
            GateStatus::None => "NONE",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            GateStatus::Ok => "✅",
            GateStatus::Warn => "⚠️",
            GateStatus::Error => "❌",
            GateStatus::None => "❔",
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateStatus {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OK" => Ok(GateStatus::Ok),
            "WARN" => Ok(GateStatus::Warn),
            "ERROR" => Ok(GateStatus::Error),
            "NONE" => Ok(GateStatus::None),
            other => Err(GateError::config_error(
                &format!("Unknown quality gate status '{}'", other),
                Some("gate.expected_status"),
                Some("Use one of OK, WARN, ERROR, NONE"),
            )),
        }
    }
}
