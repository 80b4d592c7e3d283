use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    // Descriptor errors
    #[error("Malformed report descriptor '{path}' at line {line}: {reason}")]
    DescriptorParse {
        path: String,
        line: usize,
        reason: String,
    },
    #[error("Report descriptor not found at '{path}'")]
    DescriptorMissing {
        path: String,
    },

    // Task / gate errors
    #[error("Timed out after {}s waiting for {operation}", .waited.as_secs())]
    Timeout {
        operation: String,
        waited: Duration,
        last_status: Option<String>,
        last_error: Option<String>,
    },
    #[error("Analysis task {task_id} ended with status {status}")]
    TaskFailed {
        task_id: String,
        status: String,
        reason: Option<String>,
    },
    #[error("Quality gate query rejected: {}", .messages.join("; "))]
    GateQuery {
        messages: Vec<String>,
    },
    #[error("Unable to decode quality gate response: {reason}")]
    GateDecode {
        reason: String,
    },
    #[error("Quality gate status is {observed}, expected {expected}")]
    GateMismatch {
        observed: String,
        expected: String,
    },

    // Ambient errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    #[error("sonar-scanner failed: {reason}")]
    ScannerFailed {
        reason: String,
        exit_code: Option<i32>,
    },
    #[error("Could not trust the certificate of {host}: {reason}")]
    CertificateTrust {
        host: String,
        reason: String,
    },
    #[error("Network error during {operation}: {reason}")]
    Network {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },
    #[error("Failed to write report '{path}': {reason}")]
    ReportWrite {
        path: String,
        reason: String,
    },
    #[error("I/O error during {operation}: {reason}")]
    Io {
        operation: String,
        reason: String,
    },
}

impl GateError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::Configuration {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn descriptor_error(path: &str, line: usize, reason: &str) -> Self {
        Self::DescriptorParse {
            path: path.to_string(),
            line,
            reason: reason.to_string(),
        }
    }

    pub fn decode_error(reason: &str) -> Self {
        Self::GateDecode {
            reason: reason.to_string(),
        }
    }

    pub fn network_error(operation: &str, url: Option<&str>, reason: &str) -> Self {
        Self::Network {
            operation: operation.to_string(),
            url: url.map(|s| s.to_string()),
            status_code: None,
            reason: reason.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GateMismatch { .. } => ErrorSeverity::High,
            Self::TaskFailed { .. } => ErrorSeverity::High,
            Self::ScannerFailed { .. } => ErrorSeverity::High,
            Self::CertificateTrust { .. } => ErrorSeverity::High,
            Self::Timeout { .. } => ErrorSeverity::High,
            Self::DescriptorParse { .. } => ErrorSeverity::Medium,
            Self::DescriptorMissing { .. } => ErrorSeverity::Medium,
            Self::GateQuery { .. } => ErrorSeverity::Medium,
            Self::GateDecode { .. } => ErrorSeverity::Medium,
            Self::Network { .. } => ErrorSeverity::Medium,
            Self::ReportWrite { .. } => ErrorSeverity::Medium,
            Self::Configuration { .. } => ErrorSeverity::Low,
            Self::Io { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::DescriptorMissing { path } => {
                format!("Report descriptor not found at '{}'\n💡 Did sonar-scanner run in this workspace?", path)
            }
            Self::Timeout { operation, waited, last_status, last_error } => {
                let mut msg = format!("Timed out after {}s waiting for {}", waited.as_secs(), operation);
                if let Some(status) = last_status {
                    msg.push_str(&format!("\nLast observed status: {}", status));
                }
                if let Some(error) = last_error {
                    msg.push_str(&format!("\nLast error: {}", error));
                }
                msg
            }
            Self::TaskFailed { task_id, status, reason } => {
                let mut msg = format!("Pipeline aborted: processing of analysis task {} by the Sonar server ended with status {}", task_id, status);
                if let Some(reason) = reason {
                    msg.push_str(&format!("\nServer message: {}", reason));
                }
                msg
            }
            Self::GateMismatch { observed, expected } => {
                format!("Pipeline aborted because quality gate status is {} (expected {})", observed, expected)
            }
            Self::Network { operation, url, status_code, reason } => {
                let mut msg = format!("Network error during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str("\n💡 Check the Sonar host URL and token");
                msg
            }
            Self::ScannerFailed { reason, exit_code } => {
                let mut msg = format!("sonar-scanner failed: {}", reason);
                if let Some(code) = exit_code {
                    msg.push_str(&format!(" (exit code {})", code));
                }
                msg
            }
            other => other.to_string(),
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for sonar-gate operations
pub type GateResult<T> = Result<T, GateError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Log the technical details, then print the operator-facing message
    pub fn handle_error(error: &GateError) {
        let severity = error.severity();
        log::debug!("[{}] {}", severity.name(), error.technical_details());
        log::error!("{} {}", severity.emoji(), error.user_message());
    }

    /// Log a list of validation problems under one heading
    pub fn handle_multiple_errors(errors: &[String], context: &str) {
        if errors.is_empty() {
            return;
        }

        log::error!("❌ {} problem(s) found during {}:", errors.len(), context);
        for (i, error) in errors.iter().enumerate() {
            log::error!("  {}. {}", i + 1, error);
        }
    }
}

impl From<std::io::Error> for GateError {
    fn from(error: std::io::Error) -> Self {
        GateError::Io {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for GateError {
    fn from(error: serde_json::Error) -> Self {
        GateError::GateDecode {
            reason: format!("{} (line {}, column {})", error, error.line(), error.column()),
        }
    }
}

impl From<toml::de::Error> for GateError {
    fn from(error: toml::de::Error) -> Self {
        GateError::Configuration {
            message: error.message().to_string(),
            field: None,
            suggestion: Some("Check the TOML syntax of the configuration file".to_string()),
        }
    }
}

impl From<reqwest::Error> for GateError {
    fn from(error: reqwest::Error) -> Self {
        GateError::Network {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_observed_status() {
        let error = GateError::GateMismatch {
            observed: "ERROR".to_string(),
            expected: "OK".to_string(),
        };
        assert!(error.user_message().contains("ERROR"));
        assert_eq!(error.severity(), ErrorSeverity::High);
    }

    #[test]
    fn timeout_message_includes_last_status() {
        let error = GateError::Timeout {
            operation: "analysis task".to_string(),
            waited: Duration::from_secs(300),
            last_status: Some("IN_PROGRESS".to_string()),
            last_error: None,
        };
        let message = error.user_message();
        assert!(message.contains("300s"));
        assert!(message.contains("IN_PROGRESS"));
    }

    #[test]
    fn severity_orders_by_impact() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert!(ErrorSeverity::Medium > ErrorSeverity::Low);
    }
}
