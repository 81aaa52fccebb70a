//! Image uploader with progress reporting
//!
//! Single-shot, cancellation-free upload of one file to `POST /upload`. The
//! request body is streamed in chunks; as each chunk is handed to the
//! transport the transferred byte count goes over a channel back to the
//! caller's task, which turns it into progress callbacks. Percentages are
//! rounded to the nearest integer, clamped to 0..=100, and strictly
//! non-decreasing; no callback fires after the terminal result.
//!
//! No retries and no timeout at this layer; both are the caller's call.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tripdesk_core::UploadedImage;

use crate::form::FileSelection;

/// Upload stream chunk size.
const CHUNK_SIZE: usize = 64 * 1024;

/// Transfer percentage, rounded to the nearest integer and clamped.
fn percent(loaded: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (100.0 * loaded as f64 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Filters raw percentages into a non-decreasing sequence without repeats.
struct ProgressTracker {
    last: Option<u8>,
}

impl ProgressTracker {
    fn new() -> Self {
        Self { last: None }
    }

    /// Returns the value to report, or None if it would repeat or regress.
    fn observe(&mut self, pct: u8) -> Option<u8> {
        match self.last {
            Some(last) if pct <= last => None,
            _ => {
                self.last = Some(pct);
                Some(pct)
            }
        }
    }
}

/// Client-side upload orchestration over one file.
#[derive(Clone, Debug)]
pub struct Uploader {
    client: Client,
    base_url: String,
}

impl Uploader {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Upload a file, invoking `on_progress` with 0..=100 percentages.
    ///
    /// Resolves exactly once with the server's `{imageUrl}` payload, or
    /// fails exactly once with the transport/server error.
    pub async fn upload<F>(&self, file: &FileSelection, mut on_progress: F) -> Result<UploadedImage>
    where
        F: FnMut(u8),
    {
        let total = file.data.len();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<usize>();

        // Chunked body; each chunk pulled by the transport reports the
        // running byte count before it goes on the wire.
        let chunks: Vec<Bytes> = file
            .data
            .chunks(CHUNK_SIZE)
            .map(Bytes::copy_from_slice)
            .collect();
        let mut loaded = 0usize;
        let byte_stream = futures::stream::iter(chunks).map(move |chunk| {
            loaded += chunk.len();
            let _ = tx.send(loaded);
            Ok::<Bytes, std::io::Error>(chunk)
        });

        let part = Part::stream_with_length(Body::wrap_stream(byte_stream), total as u64)
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .context("Invalid content type for upload")?;
        let form = Form::new().part("image", part);

        let send_fut = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send();
        tokio::pin!(send_fut);

        let mut tracker = ProgressTracker::new();
        let mut channel_open = true;
        let send_result = loop {
            tokio::select! {
                maybe = rx.recv(), if channel_open => {
                    match maybe {
                        Some(loaded) => {
                            if let Some(pct) = tracker.observe(percent(loaded, total)) {
                                on_progress(pct);
                            }
                        }
                        None => channel_open = false,
                    }
                }
                result = &mut send_fut => break result,
            }
        };

        // Deliver progress that raced in just before the terminal result, so
        // nothing fires after resolution or rejection.
        while let Ok(loaded) = rx.try_recv() {
            if let Some(pct) = tracker.observe(percent(loaded, total)) {
                on_progress(pct);
            }
        }

        let response = send_result.context("Upload request failed")?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Upload failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json::<UploadedImage>()
            .await
            .context("Failed to parse upload response")
    }
}

/// Seam for the submit flow; lets tests script upload outcomes.
#[async_trait]
pub trait UploadClient: Send + Sync {
    async fn upload_file(
        &self,
        file: &FileSelection,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> Result<UploadedImage>;
}

#[async_trait]
impl UploadClient for Uploader {
    async fn upload_file(
        &self,
        file: &FileSelection,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> Result<UploadedImage> {
        self.upload(file, |pct| on_progress(pct)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest_integer() {
        assert_eq!(percent(0, 1000), 0);
        assert_eq!(percent(1, 1000), 0); // 0.1% rounds down
        assert_eq!(percent(5, 1000), 1); // 0.5% rounds up
        assert_eq!(percent(333, 1000), 33);
        assert_eq!(percent(335, 1000), 34);
        assert_eq!(percent(1000, 1000), 100);
    }

    #[test]
    fn percent_handles_empty_payload() {
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn tracker_is_non_decreasing_and_deduplicated() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.observe(0), Some(0));
        assert_eq!(tracker.observe(0), None);
        assert_eq!(tracker.observe(10), Some(10));
        assert_eq!(tracker.observe(7), None); // regression suppressed
        assert_eq!(tracker.observe(10), None);
        assert_eq!(tracker.observe(100), Some(100));
        assert_eq!(tracker.observe(100), None);
    }

    #[test]
    fn chunked_counts_reach_exactly_total() {
        let data = vec![0u8; CHUNK_SIZE * 2 + 17];
        let mut loaded = 0usize;
        let mut seen = Vec::new();
        for chunk in data.chunks(CHUNK_SIZE) {
            loaded += chunk.len();
            seen.push(percent(loaded, data.len()));
        }
        assert_eq!(*seen.last().unwrap(), 100);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}
