//! OpenAI-compatible LLM access for the RAG backend.
//!
//! The crate exposes two logical profiles — **chat** (completions at a
//! pinned temperature) and **embedding** (vector generation) — behind
//! [`profiles::LlmProfiles`]. Clients are constructed eagerly from
//! validated configs and shared via `Arc` by the application.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod profiles;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use profiles::LlmProfiles;
