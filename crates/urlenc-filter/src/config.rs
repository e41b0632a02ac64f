use error_stack::{IntoReport, ResultExt};
use urlenc_kernels::EncodingMode;

use crate::Error;

/// The column encoded when no columns are configured.
pub const DEFAULT_COLUMN: &str = "url";

/// Configuration of the url_encode filter.
///
/// Deserializes from the host's configuration:
///
/// ```yaml
/// column: url              # optional, a single column
/// columns: [url, referer]  # optional, additional columns
/// only_non_ascii: false    # optional
/// ```
///
/// Keys not listed here (such as the host's `type`) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawConfig")]
pub struct UrlEncodeConfig {
    /// Names of the columns to encode. Empty means [DEFAULT_COLUMN].
    pub columns: Vec<String>,
    /// Encode only non-ASCII characters (and space).
    pub only_non_ascii: bool,
}

#[derive(serde::Deserialize)]
struct RawConfig {
    #[serde(default)]
    column: Option<String>,
    #[serde(default, alias = "column_names")]
    columns: Vec<String>,
    #[serde(default, alias = "encode_only_non_ascii")]
    only_non_ascii: bool,
}

impl From<RawConfig> for UrlEncodeConfig {
    fn from(raw: RawConfig) -> Self {
        Self {
            columns: raw.column.into_iter().chain(raw.columns).collect(),
            only_non_ascii: raw.only_non_ascii,
        }
    }
}

impl UrlEncodeConfig {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            only_non_ascii: false,
        }
    }

    pub fn with_only_non_ascii(self, only_non_ascii: bool) -> Self {
        Self {
            only_non_ascii,
            ..self
        }
    }

    /// Parse the configuration from a YAML document.
    ///
    /// An empty document yields the default configuration.
    pub fn from_yaml(yaml: &str) -> error_stack::Result<Self, Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .into_report()
            .change_context(Error::InvalidConfig)
    }

    /// The names of the columns to encode, substituting the default if none
    /// were configured.
    pub fn target_columns(&self) -> Vec<&str> {
        if self.columns.is_empty() {
            vec![DEFAULT_COLUMN]
        } else {
            self.columns.iter().map(String::as_str).collect()
        }
    }

    pub fn mode(&self) -> EncodingMode {
        EncodingMode::from_only_non_ascii(self.only_non_ascii)
    }
}
