// Embeddings from an OpenAI compatible `/embeddings` endpoint (vLLM serving
// BAAI/bge-m3 by default).
//
// Blank texts never reach the service; they get a zero vector in place.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::modules::hotspot::core::ports::{EmbeddingError, EmbeddingProvider};

#[derive(Debug, Clone, PartialEq)]
pub struct HttpEmbeddingsConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub dimension: usize,
    pub timeout: Duration,
}

pub struct HttpEmbeddings {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    dimension: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

impl HttpEmbeddings {
    pub fn new(config: &HttpEmbeddingsConfig) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::Transport(e.to_string()))?;
        tracing::info!(model = %config.model, base_url = %config.base_url, "using HTTP embeddings");
        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            dimension: config.dimension,
        })
    }

    async fn request(&self, input: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut request = self.client.post(&self.endpoint).json(&EmbeddingRequest {
            model: &self.model,
            input,
        });
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EmbeddingError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Status { status, body });
        }

        let mut parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;
        if parsed.data.iter().all(|datum| datum.index.is_some()) {
            parsed.data.sort_by_key(|datum| datum.index);
        }
        Ok(parsed.data.into_iter().map(|datum| datum.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddings {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let (positions, input): (Vec<usize>, Vec<String>) = texts
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(position, text)| (position, text.trim().to_string()))
            .unzip();

        let mut vectors = vec![vec![0.0; self.dimension]; texts.len()];
        if input.is_empty() {
            tracing::warn!(count = texts.len(), "all texts blank, returning zero vectors");
            return Ok(vectors);
        }

        let embedded = self.request(&input).await?;
        if embedded.len() != input.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} vectors, got {}",
                input.len(),
                embedded.len()
            )));
        }
        for (position, vector) in positions.into_iter().zip(embedded) {
            if vector.len() != self.dimension {
                return Err(EmbeddingError::InvalidResponse(format!(
                    "expected dimension {}, got {}",
                    self.dimension,
                    vector.len()
                )));
            }
            vectors[position] = vector;
        }
        tracing::debug!(count = input.len(), "embedded texts");
        Ok(vectors)
    }
}
