//! Configuration for boundary validation rules.

/// Tunable limits applied when validating incoming messages.
///
/// # Examples
///
/// ```
/// use postbox::direct_message::validation::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert!(config.max_text_length.is_none());
///
/// let bounded = ValidationConfig::with_max_text_length(2_000);
/// assert_eq!(bounded.max_text_length, Some(2_000));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum message text length in characters. `None` accepts any
    /// non-empty text.
    pub max_text_length: Option<usize>,
}

impl ValidationConfig {
    /// Creates a configuration that caps message text length.
    #[must_use]
    pub const fn with_max_text_length(max: usize) -> Self {
        Self {
            max_text_length: Some(max),
        }
    }
}
