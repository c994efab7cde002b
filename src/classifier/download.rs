// Model download helper for ONNX classifiers.
//
// Fetches HuggingFace ONNX exports on first use:
// 1. toxic-bert: toxicity classification (~110MB quantized)
// 2. distilbert-sst2: sentiment analysis (~65MB quantized), only when the
//    trust score is derived from sentiment
//
// Files are stored in a platform-appropriate directory
// (~/.local/share/toxcheck/models/ on Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Default HuggingFace endpoint.
pub const DEFAULT_HF_ENDPOINT: &str = "https://huggingface.co";

/// ONNX port of unitary/toxic-bert.
pub const DEFAULT_TOXICITY_MODEL: &str = "Xenova/toxic-bert";

/// ONNX port of the default sentiment-analysis pipeline model.
pub const DEFAULT_SENTIMENT_MODEL: &str = "Xenova/distilbert-base-uncased-finetuned-sst-2-english";

/// Files every classifier directory must contain, relative to the model dir.
pub const MODEL_FILE: &str = "onnx/model_quantized.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const CONFIG_FILE: &str = "config.json";

/// Returns the default directory for storing model files.
/// Uses the platform data directory: ~/.local/share/toxcheck/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toxcheck")
        .join("models")
}

/// Directory within `base` for a given HuggingFace repo id.
///
/// `Xenova/toxic-bert` becomes `<base>/Xenova--toxic-bert`.
pub fn repo_dir(base: &Path, repo_id: &str) -> PathBuf {
    base.join(repo_id.replace('/', "--"))
}

/// Check whether all required files for a classifier exist.
pub fn model_files_present(dir: &Path) -> bool {
    [MODEL_FILE, TOKENIZER_FILE, CONFIG_FILE]
        .iter()
        .all(|file| dir.join(file).exists())
}

/// Make sure a classifier's files are present in `dir`, downloading any
/// that are missing from `<endpoint>/<repo_id>/resolve/main`.
///
/// Shows a progress bar for the model file. Skips files that already exist.
pub async fn ensure_model(endpoint: &str, repo_id: &str, dir: &Path) -> Result<()> {
    if model_files_present(dir) {
        return Ok(());
    }

    std::fs::create_dir_all(dir.join("onnx"))
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    eprintln!("Fetching {repo_id} into {}", dir.display());

    let base_url = format!("{}/{}/resolve/main", endpoint.trim_end_matches('/'), repo_id);

    for (file, show_progress) in [(CONFIG_FILE, false), (TOKENIZER_FILE, false), (MODEL_FILE, true)] {
        let dest = dir.join(file);
        if dest.exists() {
            info!("{} already exists, skipping", dest.display());
            continue;
        }
        download_file(&format!("{base_url}/{file}"), &dest, show_progress).await?;
    }

    Ok(())
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar on stderr.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let total_size = response.content_length();

    let pb = if show_progress {
        let pb = match total_size {
            Some(size) => {
                let pb = ProgressBar::new(size);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                        .context("Invalid progress bar template")?
                        .progress_chars("=> "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("    {spinner} {bytes}")
                        .context("Invalid progress bar template")?,
                );
                pb
            }
        };
        Some(pb)
    } else {
        None
    };

    let mut bytes = Vec::with_capacity(total_size.unwrap_or(0) as usize);
    while let Some(chunk) = response
        .chunk()
        .await
        .context("Failed to read response body")?
    {
        bytes.extend_from_slice(&chunk);
        if let Some(ref pb) = pb {
            pb.set_position(bytes.len() as u64);
        }
    }

    // Stage as .partial; model_files_present() must never see a truncated file
    let partial = dest.with_extension("partial");
    std::fs::write(&partial, &bytes)
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    std::fs::rename(&partial, dest)
        .with_context(|| format!("Failed to move {} into place", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}
