use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub index: IndexConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
}

#[derive(Debug, Deserialize)]
pub struct IndexConfig {
    pub qdrant_url: String,
    pub collection: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub batch_size: usize,
    pub sample_size: usize,
    pub sample_seed: u64,
    pub top_k: usize,
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PLAINT_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("PLAINT_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("PLAINT_LLM_EMBEDDING_MODEL") {
            self.llm.embedding_model = v;
        }
        if let Ok(v) = std::env::var("PLAINT_QDRANT_URL") {
            self.index.qdrant_url = v;
        }
        if let Ok(v) = std::env::var("PLAINT_COLLECTION") {
            self.index.collection = v;
        }
    }

    fn default() -> Self {
        Self {
            llm: LlmConfig {
                base_url: "http://localhost:11434".into(),
                model: "llama3.2".into(),
                embedding_model: "nomic-embed-text".into(),
            },
            index: IndexConfig {
                qdrant_url: "http://localhost:6334".into(),
                collection: "complaints".into(),
                chunk_size: 500,
                chunk_overlap: 50,
                batch_size: 128,
                sample_size: 10_000,
                sample_seed: 42,
                top_k: 5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/plaint.toml")).unwrap();
        assert_eq!(config.index.collection, "complaints");
        assert_eq!(config.index.chunk_size, 500);
        assert_eq!(config.index.chunk_overlap, 50);
        assert_eq!(config.index.top_k, 5);
    }

    #[test]
    fn toml_file_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[llm]
base_url = "http://ollama:11434"
model = "mistral:7b"
embedding_model = "all-minilm"

[index]
qdrant_url = "http://qdrant:6334"
collection = "cfpb"
chunk_size = 400
chunk_overlap = 40
batch_size = 64
sample_size = 5000
sample_seed = 7
top_k = 3
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.llm.model, "mistral:7b");
        assert_eq!(config.index.collection, "cfpb");
        assert_eq!(config.index.batch_size, 64);
        assert_eq!(config.index.sample_seed, 7);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not valid toml [").unwrap();
        assert!(Config::load(file.path()).is_err());
    }
}
