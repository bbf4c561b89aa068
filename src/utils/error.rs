use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Control variable '{name}' has a degenerate {zone} zone ({from} == {to})")]
    DegenerateZone {
        name: String,
        zone: &'static str,
        from: f64,
        to: f64,
    },

    #[error("{entity} '{name}' has no members")]
    EmptyGroup { entity: &'static str, name: String },

    #[error("Control variable '{label}' not found in data source")]
    VariableNotFound { label: String },

    #[error("Rendering failed: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Model,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlotError {
    pub fn render(message: impl Into<String>) -> Self {
        PlotError::RenderError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlotError::IoError(_) => ErrorCategory::Io,
            PlotError::CsvError(_) | PlotError::VariableNotFound { .. } => ErrorCategory::Data,
            PlotError::SerializationError(_) | PlotError::RenderError { .. } => {
                ErrorCategory::Rendering
            }
            PlotError::ConfigError { .. }
            | PlotError::MissingConfigError { .. }
            | PlotError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlotError::DegenerateZone { .. } | PlotError::EmptyGroup { .. } => ErrorCategory::Model,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Rendering => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration | ErrorCategory::Model => {
                ErrorSeverity::High
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlotError::CsvError(_) => {
                "Check that the data file is valid CSV with a header row".to_string()
            }
            PlotError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            PlotError::SerializationError(_) => "Re-run without --summary".to_string(),
            PlotError::ConfigError { .. } | PlotError::MissingConfigError { .. } => {
                "Review the TOML configuration file".to_string()
            }
            PlotError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            PlotError::DegenerateZone { name, .. } => format!(
                "Give '{}' distinct baseline, boundary and upper limit values",
                name
            ),
            PlotError::EmptyGroup { name, .. } => {
                format!("Add at least one control variable to '{}'", name)
            }
            PlotError::VariableNotFound { label } => format!(
                "Add a row with control_variable = '{}' or remove it from the boundary list",
                label
            ),
            PlotError::RenderError { .. } => "Try the other render backend".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Data => format!("Input data problem: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Model => format!("Invalid boundary model: {}", self),
            ErrorCategory::Rendering => format!("Could not draw the diagram: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_errors_are_high_severity() {
        let err = PlotError::DegenerateZone {
            name: "ozone".to_string(),
            zone: "safe",
            from: 290.0,
            to: 290.0,
        };
        assert_eq!(err.category(), ErrorCategory::Model);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("ozone"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = PlotError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.csv",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("File access failed"));
    }
}
