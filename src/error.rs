//! Error types and handling for the weather-mood application

use thiserror::Error;

/// Fallback message when a failed response carries no `message` field
pub const REQUEST_FAILED_FALLBACK: &str = "Request failed";

/// Main error type for the weather-mood application
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherMoodError {
    /// The response body was not JSON, or the service could not be reached
    #[error("Weather service temporarily unavailable")]
    ServiceUnavailable,

    /// The body parsed as JSON but the HTTP status signalled failure
    #[error("{message}")]
    RequestFailed { message: String },

    /// Input validation errors
    #[error("{message}")]
    InputInvalid { message: String },

    /// JSON parsed but lacked a field the renderer needs
    #[error("Unexpected response: {message}")]
    UnexpectedPayload { message: String },

    /// Geolocation refused or unsupported
    #[error("Location access denied")]
    GeolocationDenied,

    /// Geolocation did not answer in time
    #[error("Location request timed out")]
    GeolocationTimeout,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl WeatherMoodError {
    /// Create a new request-failed error
    pub fn request_failed<S: Into<String>>(message: S) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }

    /// Create a new input validation error
    pub fn input_invalid<S: Into<String>>(message: S) -> Self {
        Self::InputInvalid {
            message: message.into(),
        }
    }

    /// Create a new payload shape error
    pub fn unexpected_payload<S: Into<String>>(message: S) -> Self {
        Self::UnexpectedPayload {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error came from the geolocation capability
    #[must_use]
    pub fn is_geolocation(&self) -> bool {
        matches!(self, Self::GeolocationDenied | Self::GeolocationTimeout)
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherMoodError::ServiceUnavailable => {
                "Weather service temporarily unavailable".to_string()
            }
            WeatherMoodError::RequestFailed { message }
            | WeatherMoodError::InputInvalid { message } => message.clone(),
            WeatherMoodError::UnexpectedPayload { .. } => {
                "The weather service sent data we could not read.".to_string()
            }
            WeatherMoodError::GeolocationDenied => {
                "Location access was denied. Search for a city instead.".to_string()
            }
            WeatherMoodError::GeolocationTimeout => {
                "Finding your location took too long. Search for a city instead.".to_string()
            }
            WeatherMoodError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
