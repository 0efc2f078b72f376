//! Runtime configuration.

use serde::Deserialize;

/// Page length of the character listing, and the threshold below which a
/// page is taken to be the last one.
pub const PAGE_SIZE: u32 = 20;

/// Sizes used when wiring the store and the controllers.
///
/// Every field has a default, so a partial document only overrides what it
/// names:
///
/// ```rust
/// use catalogue_sync::config::CatalogueConfig;
///
/// let config: CatalogueConfig = serde_json::from_str(r#"{ "page_size": 10 }"#).unwrap();
/// assert_eq!(config.page_size, 10);
/// assert_eq!(config.command_buffer, 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Items per page; also the end-of-list threshold.
    pub page_size: u32,
    /// Capacity of each controller's command channel.
    pub command_buffer: usize,
    /// Capacity of the favorite store's request channel.
    pub store_buffer: usize,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            command_buffer: 32,
            store_buffer: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config: CatalogueConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CatalogueConfig::default());
        assert_eq!(config.page_size, 20);
    }
}
