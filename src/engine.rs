//! Speech-to-text engine abstraction
//!
//! The coordinator only needs a stable contract: raw chunk bytes in,
//! (text, confidence) out. The default implementation is a mock that
//! decodes the bytes as UTF-8 text, which is enough for testing the
//! streaming and persistence paths without a real STT backend.

use anyhow::{bail, Result};

/// Emitted in place of real text when the engine fails on a chunk.
pub const FAILED_CHUNK_TEXT: &str = "[Error: Unable to process audio]";

/// Confidence assigned by the mock engine to successfully decoded chunks.
pub const MOCK_CONFIDENCE: f64 = 0.85;

/// Result of transcribing one chunk
#[derive(Debug, Clone)]
pub struct TranscriptionOutput {
    /// Transcribed text for the chunk
    pub text: String,

    /// Confidence score (0.0 to 1.0)
    pub confidence: f64,
}

/// Speech-to-text engine contract
///
/// Implementations may block or be slow; callers must not hold shared
/// locks across `transcribe` and must catch failures rather than let
/// them propagate into the chunk ingestion path.
#[async_trait::async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribe a single raw audio chunk
    async fn transcribe(&self, chunk: &[u8]) -> Result<TranscriptionOutput>;
}

/// Mock engine: decodes chunk bytes as UTF-8 with a fixed confidence
#[derive(Debug, Default)]
pub struct MockTranscriptionEngine;

#[async_trait::async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, chunk: &[u8]) -> Result<TranscriptionOutput> {
        if chunk.is_empty() {
            bail!("empty audio chunk");
        }

        let text = String::from_utf8_lossy(chunk).into_owned();

        Ok(TranscriptionOutput {
            text,
            confidence: MOCK_CONFIDENCE,
        })
    }
}
