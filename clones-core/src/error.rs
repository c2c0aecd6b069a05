use thiserror::Error;

/// Stable error kinds surfaced to the invoking host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConfigMissing,
    ConfigInvalid,
    InputInvalid,
    AuthorizationMissing,
    AuthorizationInvalid,
    OwnerNotFound,
    ApiRequestFailed,
}

impl ErrorKind {
    /// Error class name used by the host framework for this kind.
    pub fn host_name(self) -> &'static str {
        match self {
            Self::ConfigMissing => "GlobalConfigError",
            Self::ConfigInvalid | Self::InputInvalid => "InputValidationError",
            Self::AuthorizationMissing | Self::AuthorizationInvalid => "AuthorizationError",
            Self::OwnerNotFound | Self::ApiRequestFailed => "APIRequestError",
        }
    }
}

/// Every failure is fatal for the whole `execute` call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PluginError {
    #[error("{0}")]
    ConfigMissing(String),
    #[error("{0}")]
    ConfigInvalid(String),
    #[error("{0}")]
    InputInvalid(String),
    #[error("{0}")]
    AuthorizationMissing(String),
    #[error("{0}")]
    AuthorizationInvalid(String),
    #[error("{0}")]
    OwnerNotFound(String),
    #[error("{0}")]
    ApiRequestFailed(String),
}

impl PluginError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigMissing(_) => ErrorKind::ConfigMissing,
            Self::ConfigInvalid(_) => ErrorKind::ConfigInvalid,
            Self::InputInvalid(_) => ErrorKind::InputInvalid,
            Self::AuthorizationMissing(_) => ErrorKind::AuthorizationMissing,
            Self::AuthorizationInvalid(_) => ErrorKind::AuthorizationInvalid,
            Self::OwnerNotFound(_) => ErrorKind::OwnerNotFound,
            Self::ApiRequestFailed(_) => ErrorKind::ApiRequestFailed,
        }
    }

    pub fn host_name(&self) -> &'static str {
        self.kind().host_name()
    }

    pub fn message(&self) -> &str {
        match self {
            Self::ConfigMissing(message)
            | Self::ConfigInvalid(message)
            | Self::InputInvalid(message)
            | Self::AuthorizationMissing(message)
            | Self::AuthorizationInvalid(message)
            | Self::OwnerNotFound(message)
            | Self::ApiRequestFailed(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, PluginError};

    #[test]
    fn display_is_the_bare_message() {
        let error = PluginError::ConfigMissing("Global config is not provided.".to_owned());
        assert_eq!(error.to_string(), "Global config is not provided.");
        assert_eq!(error.message(), "Global config is not provided.");
    }

    #[test]
    fn host_names_follow_kind() {
        assert_eq!(
            PluginError::ConfigMissing(String::new()).host_name(),
            "GlobalConfigError"
        );
        assert_eq!(
            PluginError::InputInvalid(String::new()).host_name(),
            "InputValidationError"
        );
        assert_eq!(
            PluginError::AuthorizationInvalid(String::new()).host_name(),
            "AuthorizationError"
        );
        assert_eq!(ErrorKind::OwnerNotFound.host_name(), "APIRequestError");
    }
}
