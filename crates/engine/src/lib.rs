//! # docbot Engine
//!
//! Ties the pipeline together: ingestion (extract → chunk → embed → store)
//! and question answering (retrieve → rank → assemble → summarize history →
//! build prompt → complete).
//!
//! Execution is sequential per request and the engine holds no per-request
//! state, so independent questions can run concurrently against the shared
//! store and completion services.

mod config;
mod engine;
mod error;

pub use config::{EngineConfig, RetrievalConfig};
pub use engine::{Answer, Engine, IngestReport};
pub use error::{EngineError, Result};
