pub mod analyze;
pub mod ask;
pub mod audit;
pub mod extract;

use crate::ProviderArgs;
use bilan_core::config::{clamp_text_length, Config};
use bilan_core::error::BilanError;

/// Merge CLI flags over the environment-sourced configuration.
pub fn resolve_config(args: &ProviderArgs) -> Result<Config, BilanError> {
    let mut config = Config::from_env();

    if let Some(ref provider) = args.provider {
        config.provider = provider.parse()?;
    }
    if let Some(ref model) = args.model {
        config.model = model.clone();
    }
    if let Some(ref api_key) = args.api_key {
        config.api_key = api_key.clone();
    }
    if let Some(ref base_url) = args.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(max_length) = args.max_length {
        config.max_text_length = clamp_text_length(max_length);
    }

    Ok(config)
}
