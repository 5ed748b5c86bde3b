//! Runtime configuration shared with the effect handler

use std::sync::Arc;

use crate::audio::{cry_url, DEFAULT_CRY_BASE};
use crate::gateway::{CatalogGateway, PokeApiGateway, DEFAULT_API_BASE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinderConfig {
    /// Catalog REST root, e.g. `https://pokeapi.co/api/v2`
    pub api_base: String,
    /// Directory holding `<id>.mp3` cries
    pub cry_base: String,
    /// Skip cry playback entirely
    pub muted: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cry_base: DEFAULT_CRY_BASE.to_string(),
            muted: false,
        }
    }
}

impl FinderConfig {
    pub fn gateway(&self) -> Arc<dyn CatalogGateway> {
        Arc::new(PokeApiGateway::new(self.api_base.clone()))
    }

    pub fn cry_url(&self, id: u32) -> String {
        cry_url(&self.cry_base, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_public_endpoints() {
        let config = FinderConfig::default();
        assert_eq!(config.api_base, "https://pokeapi.co/api/v2");
        assert!(!config.muted);
        assert_eq!(config.cry_url(6), "https://pokemoncries.com/cries/6.mp3");
    }
}
