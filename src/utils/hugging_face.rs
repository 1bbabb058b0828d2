use std::path::PathBuf;

use hf_hub::api::tokio;
use tokenizers::Tokenizer;

/// Download a tokenizer definition from Hugging Face Hub
/// If file exists in cache, it will not be downloaded again
pub async fn download_hf_tokenizer(model_name: &str) -> anyhow::Result<PathBuf> {
    let api = tokio::Api::new()
        .map_err(|e| anyhow!("Unable to reach the Hugging Face Hub: {}", e))?;
    let repo = api.model(model_name.to_string());

    let tokenizer_filepath = repo.get("tokenizer.json").await.map_err(|e| {
        anyhow!(
            "Failed to download: {} tokenizer with name: tokenizer.json from HuggingFace Hub: {}",
            model_name,
            e
        )
    })?;

    Ok(tokenizer_filepath)
}

/// Download and load a pre-trained tokenizer
pub async fn load_hf_tokenizer(model_name: &str) -> anyhow::Result<Tokenizer> {
    let path = download_hf_tokenizer(model_name).await?;

    Tokenizer::from_file(&path)
        .map_err(|e| anyhow!("Unable to load tokenizer from {}: {}", path.display(), e))
}
