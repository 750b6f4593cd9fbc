use thiserror::Error;

#[derive(Debug, Error)]
pub enum CraftsError {
    /// Any failure talking to the catalog API: transport, HTTP status, or decode.
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CraftsError {
    /// Returns `true` for catalog failures, the only error the storefront
    /// shows to shoppers.
    pub fn is_catalog(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }
}

impl From<reqwest::Error> for CraftsError {
    fn from(e: reqwest::Error) -> Self {
        Self::Catalog(e.to_string())
    }
}

impl From<serde_json::Error> for CraftsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Catalog(format!("invalid response body: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, CraftsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_is_catalog() {
        let err: CraftsError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(err.is_catalog());
        assert!(err.to_string().starts_with("Catalog error: invalid response body"));
    }

    #[test]
    fn test_config_error_is_not_catalog() {
        let err = CraftsError::Config("bad base_url".into());
        assert!(!err.is_catalog());
        assert_eq!(err.to_string(), "Configuration error: bad base_url");
    }
}
