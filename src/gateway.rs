//! PokeAPI lookup gateway

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::state::{CatalogEntry, SpriteSet};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum LookupError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("response parse error: {0}")]
    Parse(String),
}

/// Read access to the catalog. Injected into the app so tests and alternative
/// backends can replace the HTTP client.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn fetch_entry(&self, query: &str) -> Result<CatalogEntry, LookupError>;

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, LookupError>;
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    types: Vec<PokemonTypeSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

impl From<PokemonResponse> for CatalogEntry {
    fn from(response: PokemonResponse) -> Self {
        CatalogEntry {
            id: response.id,
            name: response.name,
            types: response
                .types
                .into_iter()
                .map(|slot| slot.type_info.name)
                .collect(),
            sprites: SpriteSet {
                front: pointer_string(&response.sprites, "/front_default"),
                back: pointer_string(&response.sprites, "/back_default"),
            },
        }
    }
}

/// Lowercases the query for the request path. No trimming happens here.
pub fn normalize_query(query: impl ToString) -> String {
    query.to_string().to_lowercase()
}

pub struct PokeApiGateway {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn entry_url(&self, query: &str) -> String {
        format!(
            "{}/pokemon/{}",
            self.base_url.trim_end_matches('/'),
            normalize_query(query)
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, LookupError> {
        tracing::debug!(%url, "catalog request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| LookupError::Network(err.to_string()))?;
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(LookupError::NotFound(url.to_string())),
            status => Err(LookupError::Network(format!("{url} returned {status}"))),
        }
    }
}

impl Default for PokeApiGateway {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl CatalogGateway for PokeApiGateway {
    async fn fetch_entry(&self, query: &str) -> Result<CatalogEntry, LookupError> {
        let url = self.entry_url(query);
        let response = self.get(&url).await?;
        let body = response
            .bytes()
            .await
            .map_err(|err| LookupError::Network(err.to_string()))?;
        let parsed: PokemonResponse =
            serde_json::from_slice(&body).map_err(|err| LookupError::Parse(err.to_string()))?;
        Ok(parsed.into())
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, LookupError> {
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| LookupError::Network(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
