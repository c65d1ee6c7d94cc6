//! Shared LLM service with two active profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - Both underlying HTTP clients are built eagerly from validated configs;
//!   there are no lazily-initialized globals.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::profiles::LlmProfiles;
//! use llm_service::config::llm_model_config::LlmModelConfig;
//! use llm_service::config::llm_provider::LlmProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm_service::LlmError> {
//!     let chat = LlmModelConfig {
//!         provider: LlmProvider::OpenAiCompatible,
//!         model: "gpt-4o-mini".into(),
//!         endpoint: "https://models.example.com".into(),
//!         api_key: Some("sk-...".into()),
//!         max_tokens: Some(1024),
//!         temperature: Some(0.0),
//!         top_p: None,
//!         timeout_secs: Some(60),
//!     };
//!     let embedding = LlmModelConfig {
//!         model: "text-embedding-3-small".into(),
//!         ..chat.clone()
//!     };
//!
//!     let svc = Arc::new(LlmProfiles::new(chat, embedding)?);
//!
//!     let txt = svc.generate("Hello world", None).await?;
//!     println!("answer: {txt}");
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("embedding dim = {}", emb.len());
//!
//!     Ok(())
//! }
//! ```

use crate::{
    config::{default_config, llm_model_config::LlmModelConfig},
    error_handler::LlmError,
    health_service::{HealthService, HealthStatus},
    services::open_ai_service::OpenAiService,
};

/// Shared service that manages the two logical LLM profiles of the RAG
/// path: **chat** (answer generation) and **embedding** (query vectors).
pub struct LlmProfiles {
    chat: OpenAiService,
    embedding: OpenAiService,
    health: HealthService,
}

impl LlmProfiles {
    /// Creates a new service from the two profile configs.
    ///
    /// Both clients are validated and constructed immediately, so a
    /// misconfigured profile fails at startup rather than on the first
    /// request.
    ///
    /// # Errors
    /// Returns [`LlmError`] if either client cannot be built.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, LlmError> {
        Ok(Self {
            chat: OpenAiService::new(chat)?,
            embedding: OpenAiService::new(embedding)?,
            health: HealthService::new(Some(10))?,
        })
    }

    /// Builds both profiles from environment variables.
    ///
    /// See [`default_config::config_chat`] and
    /// [`default_config::config_embedding`] for the variables involved.
    ///
    /// # Errors
    /// Returns [`LlmError::Config`] for missing or malformed variables.
    pub fn from_env() -> Result<Self, LlmError> {
        let chat = default_config::config_chat()?;
        let embedding = default_config::config_embedding()?;
        Self::new(chat, embedding)
    }

    /// Generates text using the **chat** profile.
    ///
    /// # Arguments
    /// - `prompt`: input text prompt.
    /// - `system`: optional system instruction.
    ///
    /// # Errors
    /// Returns [`LlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        self.chat.generate(prompt, system).await
    }

    /// Computes an embedding vector using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmError> {
        self.embedding.embeddings(input).await
    }

    /// Returns a health snapshot for all distinct profiles.
    ///
    /// If the embedding profile targets the same endpoint and model as
    /// the chat profile, it is probed only once.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let chat_cfg = self.chat.config();
        let emb_cfg = self.embedding.config();

        let mut out = vec![self.health.check(chat_cfg).await];
        if chat_cfg.endpoint != emb_cfg.endpoint || chat_cfg.model != emb_cfg.model {
            out.push(self.health.check(emb_cfg).await);
        }
        out
    }
}
