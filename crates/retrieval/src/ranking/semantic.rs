//! Semantic ranking by cosine similarity.

use super::{order_by_score, take_top, RankedChunk};
use crate::embeddings::EmbeddingProvider;
use codemate_core::{AppError, AppResult};

/// Cosine similarity between two vectors.
///
/// Magnitude-invariant. A zero vector scores 0.0 against anything.
///
/// # Errors
/// * `AppError::Embedding` - If lengths differ or a component is not finite
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> AppResult<f32> {
    if a.len() != b.len() {
        return Err(AppError::Embedding(format!(
            "Embedding dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.iter().chain(b.iter()).any(|x| !x.is_finite()) {
        return Err(AppError::Embedding(
            "Embedding contains non-finite values".to_string(),
        ));
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}

/// Score every chunk vector against the query, best first.
pub fn rank(query: &[f32], vectors: &[Vec<f32>]) -> AppResult<Vec<(usize, f32)>> {
    let mut scored = vectors
        .iter()
        .enumerate()
        .map(|(i, v)| cosine_similarity(query, v).map(|score| (i, score)))
        .collect::<AppResult<Vec<_>>>()?;

    order_by_score(&mut scored);
    Ok(scored)
}

/// Embed the chunks and the question, then return the `top_k` closest chunks.
///
/// Every failure inside this call is reported as `AppError::Embedding`, so
/// the caller can fall back for this call only.
pub async fn rank_semantic(
    provider: &dyn EmbeddingProvider,
    question: &str,
    chunks: &[String],
    top_k: usize,
) -> AppResult<Vec<RankedChunk>> {
    let vectors = provider.embed_batch(chunks).await.map_err(as_inference_failure)?;
    if vectors.len() != chunks.len() {
        return Err(AppError::Embedding(format!(
            "Provider returned {} embeddings for {} chunks",
            vectors.len(),
            chunks.len()
        )));
    }

    let query = provider.embed(question).await.map_err(as_inference_failure)?;
    let scored = rank(&query, &vectors)?;

    tracing::debug!(
        provider = provider.provider_name(),
        chunks = chunks.len(),
        best = scored.first().map(|(_, s)| *s),
        "Semantic ranking complete"
    );

    Ok(take_top(&scored, chunks, top_k))
}

fn as_inference_failure(err: AppError) -> AppError {
    match err {
        AppError::Embedding(_) => err,
        other => AppError::Embedding(other.to_string()),
    }
}
