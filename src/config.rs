//! Converter configuration.

/// Default name of the archive produced by [`crate::package::Packager::package_all`].
pub const DEFAULT_ARCHIVE_NAME: &str = "pdf_json_files.zip";

/// Options controlling where conversion and packaging happen.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Conversion service endpoint (`None` = always extract locally)
    pub endpoint: Option<String>,

    /// Whether archives are requested from the service before building locally
    pub remote_packaging: bool,

    /// User agent sent with service requests
    pub user_agent: String,

    /// File name given to archives
    pub archive_name: String,
}

impl ConverterConfig {
    /// Create new options with defaults (local only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conversion service endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let trimmed = endpoint.trim();
        self.endpoint = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Never contact the conversion service.
    pub fn local_only(mut self) -> Self {
        self.endpoint = None;
        self
    }

    /// Enable or disable remote archive building.
    pub fn with_remote_packaging(mut self, enabled: bool) -> Self {
        self.remote_packaging = enabled;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the archive file name.
    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = name.into();
        self
    }

    /// Endpoint to use for archive requests, if any.
    pub fn packaging_endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .filter(|_| self.remote_packaging)
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            remote_packaging: true,
            user_agent: concat!("pdfjson/", env!("CARGO_PKG_VERSION")).to_string(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }
}
