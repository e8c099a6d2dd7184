//! The Issuer: assembles, signs and checks items on behalf of one signer.

use dataitem_core::{
    create_data, validate_tags, verify_item, DataItem, DataItemOptions, ItemId, Signer, Tag,
};

use crate::error::{IssuerError, Result};

/// Configuration for the Issuer.
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// Tags placed ahead of each item's own tags.
    pub default_tags: Vec<Tag>,
    /// Whether to verify every item after signing it.
    pub verify_after_sign: bool,
    /// Reject payloads larger than this many bytes.
    pub max_data_size: Option<usize>,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            default_tags: Vec::new(),
            verify_after_sign: true,
            max_data_size: None,
        }
    }
}

/// Produces signed items with a single signer.
pub struct Issuer<S: Signer> {
    /// The key-holding capability items are signed with.
    signer: S,
    /// Configuration.
    config: IssuerConfig,
}

impl<S: Signer> Issuer<S> {
    /// Create a new issuer.
    pub fn new(signer: S, config: IssuerConfig) -> Self {
        Self { signer, config }
    }

    /// Get the signer.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Get the configuration.
    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Assemble and sign an item.
    ///
    /// Default tags come first, followed by `options.tags` in order.
    pub async fn issue(&self, data: &[u8], options: &DataItemOptions) -> Result<DataItem> {
        if let Some(limit) = self.config.max_data_size {
            if data.len() > limit {
                return Err(IssuerError::PayloadTooLarge {
                    size: data.len(),
                    limit,
                });
            }
        }

        let options = self.merge_options(options);
        validate_tags(&options.tags)?;

        let mut item = create_data(data, &self.signer, &options)?;
        let id = item.sign(&self.signer).await?;

        if self.config.verify_after_sign {
            if let Err(e) = verify_item(&item) {
                tracing::warn!(%id, error = %e, "issued item failed verification");
                return Err(e.into());
            }
        }

        tracing::debug!(
            %id,
            size = item.len(),
            tags = options.tags.len(),
            "issued data item"
        );
        Ok(item)
    }

    /// Sign an item that was assembled elsewhere.
    pub async fn sign(&self, item: &mut DataItem) -> Result<ItemId> {
        let id = item.sign(&self.signer).await?;
        if self.config.verify_after_sign {
            verify_item(item)?;
        }
        Ok(id)
    }

    fn merge_options(&self, options: &DataItemOptions) -> DataItemOptions {
        if self.config.default_tags.is_empty() {
            return options.clone();
        }
        let mut tags = self.config.default_tags.clone();
        tags.extend(options.tags.iter().cloned());
        DataItemOptions {
            tags,
            ..options.clone()
        }
    }
}
