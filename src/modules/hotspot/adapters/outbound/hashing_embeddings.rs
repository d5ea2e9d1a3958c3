// Deterministic local embedder.
//
// Feature hashing over lowercase words, plus every non ASCII character on its
// own so CJK text without spaces still overlaps on shared characters. Vectors
// are L2 normalised; blank text maps to the zero vector. Used by tests and by
// HOTSPOT_EMBEDDINGS=hashing for local development.

use async_trait::async_trait;

use crate::modules::hotspot::core::ports::{EmbeddingError, EmbeddingProvider};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(text: &str) -> u64 {
    text.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

fn features(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut features: Vec<String> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && word.is_ascii())
        .map(str::to_string)
        .collect();
    features.extend(
        lowered
            .chars()
            .filter(|c| !c.is_ascii() && c.is_alphanumeric())
            .map(String::from),
    );
    features
}

pub struct HashingEmbeddings {
    dimension: usize,
    is_offline: bool,
}

impl HashingEmbeddings {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            is_offline: false,
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        if self.dimension == 0 {
            return vector;
        }
        for feature in features(text) {
            let bucket = (fnv1a(&feature) % self.dimension as u64) as usize;
            vector[bucket] += 1.0;
        }
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddings {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if self.is_offline {
            return Err(EmbeddingError::Transport("Embedding service offline".into()));
        }
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}
