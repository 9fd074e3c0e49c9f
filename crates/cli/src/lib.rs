//! # docbot CLI
//!
//! Two subcommands over the engine: `ingest` extracts, chunks, embeds, and
//! stores PDF documents; `ask` answers a question against the indexed
//! documents, optionally with per-session conversation history.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::OpenAiConfig;
use docbot_chunker::{DocumentSource, PdfDocument};
use docbot_engine::{Answer, Engine, EngineConfig};
use docbot_llm::{Completion, OpenAiClient};
use docbot_session::{SessionStore, SessionTurn};
use docbot_vector_store::{Embedder, MemoryVectorStore, OpenAiEmbedder, StubEmbedder};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "docbot", version, about = "Chat with your PDF documents")]
struct Cli {
    /// Vector store file
    #[arg(long, global = true, default_value = "docbot-store.json")]
    store: PathBuf,

    /// Embedding backend
    #[arg(long, global = true, value_enum, default_value_t = EmbedMode::Openai)]
    embeddings: EmbedMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract, chunk, embed, and store PDF documents
    Ingest {
        /// PDF files to ingest
        paths: Vec<PathBuf>,

        /// Re-ingest documents that are already stored
        #[arg(long)]
        force: bool,
    },

    /// Ask a question against the indexed documents
    Ask {
        /// The question
        question: String,

        /// Print the context passages that grounded the answer
        #[arg(long)]
        show_context: bool,

        /// Session history file; enables conversation memory
        #[arg(long)]
        history: Option<PathBuf>,

        /// Session name within the history file
        #[arg(long, default_value = "default")]
        session: String,

        /// Keyword that boosts matching passages during ranking (repeatable)
        #[arg(long = "boost-term")]
        boost_terms: Vec<String>,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum EmbedMode {
    /// OpenAI embeddings endpoint (needs OPENAI_API_KEY)
    Openai,
    /// Deterministic offline embeddings, for tests and smoke runs
    Stub,
}

/// CLI entry point, called from the `docbot` binary
pub async fn main_entry() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let openai = OpenAiConfig::from_env();

    let embedder: Arc<dyn Embedder> = match cli.embeddings {
        EmbedMode::Stub => Arc::new(StubEmbedder::default()),
        EmbedMode::Openai => {
            let Some(api_key) = openai.api_key.clone() else {
                bail!("OPENAI_API_KEY is not set; use --embeddings stub for offline runs");
            };
            Arc::new(OpenAiEmbedder::with_base_url(api_key, &openai.base_url))
        }
    };

    let completion: Option<Arc<dyn Completion>> = openai
        .api_key
        .as_ref()
        .map(|key| Arc::new(OpenAiClient::with_base_url(key, &openai.base_url)) as _);

    let store = MemoryVectorStore::load_or_new(&cli.store, embedder)
        .await
        .context("load vector store")?;

    let mut engine_config = EngineConfig {
        model: openai.chat_model.clone(),
        ..EngineConfig::default()
    };
    engine_config.summarizer.model = openai.chat_model;

    match cli.command {
        Command::Ingest { paths, force } => {
            let engine = Engine::new(engine_config, store, completion)?;
            run_ingest(engine, paths, force).await
        }
        Command::Ask {
            question,
            show_context,
            history,
            session,
            boost_terms,
        } => {
            engine_config.retrieval.boost_terms = boost_terms;
            let engine = Engine::new(engine_config, store, completion)?;
            run_ask(engine, &question, show_context, history, &session).await
        }
    }
}

async fn run_ingest(
    mut engine: Engine<MemoryVectorStore>,
    paths: Vec<PathBuf>,
    force: bool,
) -> Result<()> {
    if paths.is_empty() {
        bail!("no PDF files given");
    }

    let names: Vec<String> = paths
        .iter()
        .map(|path| PdfDocument::new(path).name().to_string())
        .collect();

    let wanted: Vec<PathBuf> = if force {
        paths
    } else {
        let fresh = engine.new_sources(&names).await?;
        let kept: Vec<PathBuf> = paths
            .into_iter()
            .filter(|path| fresh.contains(&PdfDocument::new(path).name().to_string()))
            .collect();
        if kept.is_empty() {
            println!("All documents are already stored; nothing to do.");
            return Ok(());
        }
        kept
    };

    let sources: Vec<Box<dyn DocumentSource>> = wanted
        .iter()
        .map(|path| Box::new(PdfDocument::new(path)) as Box<dyn DocumentSource>)
        .collect();

    let report = engine.ingest(&sources).await?;
    engine.store().save().await.context("save vector store")?;

    println!("Stored {} chunks.", report.stored_chunks);
    for (document, reason) in &report.failed_documents {
        println!("Skipped {document}: {reason}");
    }
    Ok(())
}

async fn run_ask(
    engine: Engine<MemoryVectorStore>,
    question: &str,
    show_context: bool,
    history_path: Option<PathBuf>,
    session: &str,
) -> Result<()> {
    let mut history = match &history_path {
        Some(path) => SessionStore::load_or_new(path).context("load session history")?,
        None => SessionStore::new(),
    };

    let answer = engine.ask(question, history.turns(session)).await?;

    match answer {
        Answer::NoContext => {
            println!("No relevant information found in the indexed documents.");
        }
        Answer::Reply { text, context } => {
            println!("{text}");

            if show_context {
                println!();
                for chunk in &context {
                    println!("--- {} – page {} ---", chunk.source, chunk.page);
                    println!("{}", chunk.text);
                }
            }

            if let Some(path) = history_path {
                history.append(session, SessionTurn::new(question, text));
                history.set_active(session);
                history.save(path).context("save session history")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ask_with_boost_terms() {
        let cli = Cli::try_parse_from([
            "docbot",
            "ask",
            "which options are there?",
            "--boost-term",
            "master",
            "--boost-term",
            "bachelor",
        ])
        .unwrap();

        let Command::Ask {
            question,
            boost_terms,
            session,
            ..
        } = cli.command
        else {
            panic!("expected the ask subcommand");
        };
        assert_eq!(question, "which options are there?");
        assert_eq!(boost_terms, vec!["master", "bachelor"]);
        assert_eq!(session, "default");
    }

    #[test]
    fn parses_ingest_with_store_override() {
        let cli = Cli::try_parse_from([
            "docbot",
            "--store",
            "custom.json",
            "ingest",
            "a.pdf",
            "b.pdf",
        ])
        .unwrap();

        assert_eq!(cli.store, PathBuf::from("custom.json"));
        let Command::Ingest { paths, force } = cli.command else {
            panic!("expected the ingest subcommand");
        };
        assert_eq!(paths.len(), 2);
        assert!(!force);
    }
}
