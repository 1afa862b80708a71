//! Video duration probing via ffprobe

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::error;
use vidnest_core::AppError;

#[derive(Debug, Deserialize)]
struct FFprobeOutput {
    format: Option<FFprobeFormat>,
    streams: Option<Vec<FFprobeStream>>,
}

#[derive(Debug, Deserialize)]
struct FFprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FFprobeStream {
    codec_type: Option<String>,
    duration: Option<String>,
}

/// Something that can tell how long a piece of media plays.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    /// Duration in seconds of the media at `url` (a URL or local path).
    async fn duration_seconds(&self, url: &str) -> Result<f64, AppError>;
}

pub struct FfprobeDurationProbe {
    ffprobe_path: String,
}

impl FfprobeDurationProbe {
    pub fn new(ffprobe_path: String) -> Self {
        Self { ffprobe_path }
    }
}

#[async_trait]
impl DurationProbe for FfprobeDurationProbe {
    #[tracing::instrument(skip(self), fields(service = "video"))]
    async fn duration_seconds(&self, url: &str) -> Result<f64, AppError> {
        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-show_format",
                "-show_streams",
                "-of",
                "json",
                url,
            ])
            .output()
            .await
            .map_err(|e| AppError::MediaProcessing(format!("Failed to run ffprobe: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("ffprobe failed: {}", stderr);
            return Err(AppError::MediaProcessing(format!(
                "ffprobe failed: {}",
                stderr.trim()
            )));
        }

        parse_ffprobe_duration(&output.stdout).map_err(|e| AppError::MediaProcessing(e.to_string()))
    }
}

/// Extract the duration from ffprobe's JSON output.
///
/// The container duration wins; without one, the longest video stream is
/// used.
pub fn parse_ffprobe_duration(stdout: &[u8]) -> Result<f64> {
    let output: FFprobeOutput = serde_json::from_slice(stdout)
        .map_err(|e| anyhow!("Failed to parse ffprobe output: {}", e))?;

    let from_format = output
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok());

    let from_streams = || {
        output
            .streams
            .iter()
            .flatten()
            .filter(|s| s.codec_type.as_deref() == Some("video"))
            .filter_map(|s| s.duration.as_deref()?.parse::<f64>().ok())
            .fold(None, |max: Option<f64>, d| Some(max.map_or(d, |m| m.max(d))))
    };

    from_format
        .or_else(from_streams)
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| anyhow!("ffprobe output has no duration"))
}
