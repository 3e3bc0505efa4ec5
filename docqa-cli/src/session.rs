//! Wiring between command-line options, the QA pipeline, and the terminal.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use docqa::{
    DocumentSource, EmbeddingProvider, HashedTokenEmbedder, IndexedDocument, QaConfig, QaPipeline,
    render_response_text,
};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

use crate::cli::{Cli, EmbedderKind};
use crate::history::ChatHistory;

/// Load the embedding backend once for the whole process.
pub fn build_provider(cli: &Cli) -> Result<Arc<dyn EmbeddingProvider>> {
    match cli.embedder {
        EmbedderKind::Hashed => Ok(Arc::new(HashedTokenEmbedder::default())),
        EmbedderKind::Minilm => load_minilm(cli),
        EmbedderKind::Auto => {
            if cfg!(feature = "minilm") {
                load_minilm(cli)
            } else {
                warn!(
                    "built without the `minilm` feature, falling back to lexical hashed token embeddings"
                );
                Ok(Arc::new(HashedTokenEmbedder::default()))
            }
        }
    }
}

#[cfg(feature = "minilm")]
fn load_minilm(cli: &Cli) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider = docqa::FastEmbedProvider::load(cli.model_cache.clone(), true)
        .context("loading all-MiniLM-L6-v2")?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "minilm"))]
fn load_minilm(_cli: &Cli) -> Result<Arc<dyn EmbeddingProvider>> {
    anyhow::bail!("this binary was built without the `minilm` feature; use --embedder hashed")
}

pub fn build_pipeline(cli: &Cli, provider: Arc<dyn EmbeddingProvider>) -> Result<QaPipeline> {
    let config = QaConfig::builder()
        .num_responses(cli.top_k)
        .min_sentence_chars(cli.min_sentence_chars)
        .embed_batch_size(cli.batch_size)
        .build()?;
    Ok(QaPipeline::builder().config(config).embedding_provider(provider).build()?)
}

pub async fn load_document(pipeline: &QaPipeline, file: &Path) -> Result<IndexedDocument> {
    let document = pipeline
        .load_source(&DocumentSource::from_path(file))
        .await
        .with_context(|| format!("could not load '{}'", file.display()))?;
    if document.corpus().is_empty() {
        warn!(file = %file.display(), "no sentences found; every question will return no answers");
    }
    Ok(document)
}

/// Answer one question and append the rendered answer to `history`.
///
/// Returns the rendered text, or `None` when nothing matched.
pub async fn answer_and_record(
    pipeline: &QaPipeline,
    document: &IndexedDocument,
    history: &mut ChatHistory,
    question: &str,
) -> Result<Option<String>> {
    let responses = pipeline.ask(document, question).await?;
    if responses.is_empty() {
        return Ok(None);
    }
    let text = render_response_text(&responses);
    history.record(question, text.clone());
    Ok(Some(text))
}

pub async fn run_ask(pipeline: &QaPipeline, file: &Path, question: &str, json: bool) -> Result<()> {
    let document = load_document(pipeline, file).await?;
    let responses = pipeline.ask(&document, question).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&responses)?);
    } else if responses.is_empty() {
        println!("No answers found.");
    } else {
        println!("{}", render_response_text(&responses));
    }
    Ok(())
}

const HELP: &str = "Commands:\n  :history      show this session's questions and answers\n  :load <file>  replace the current document\n  :quit         exit";

/// Add a line to the readline history; a failure only costs arrow-key recall.
fn remember_line(editor: &mut DefaultEditor, line: &str) -> bool {
    match editor.add_history_entry(line) {
        Ok(added) => added,
        Err(e) => {
            warn!(error = %e, "could not add line to readline history");
            false
        }
    }
}

pub async fn run_chat(pipeline: &QaPipeline, file: &Path) -> Result<()> {
    let mut document = load_document(pipeline, file).await?;
    println!("Loaded '{}' ({} sentences).", file.display(), document.corpus().len());
    println!("Ask a question, or type :help.");

    let mut history = ChatHistory::new();
    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline("? ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        remember_line(&mut editor, input);

        match input {
            ":quit" | ":exit" | ":q" => break,
            ":help" => println!("{HELP}"),
            ":history" => {
                if history.is_empty() {
                    println!("(no questions yet)");
                } else {
                    println!("{}", history.render());
                }
            }
            _ if input.starts_with(":load ") => {
                let path = Path::new(input.trim_start_matches(":load ").trim());
                match load_document(pipeline, path).await {
                    Ok(loaded) => {
                        document = loaded;
                        println!(
                            "Loaded '{}' ({} sentences).",
                            path.display(),
                            document.corpus().len()
                        );
                    }
                    Err(e) => eprintln!("Error: {e:#}"),
                }
            }
            question => match answer_and_record(pipeline, &document, &mut history, question).await {
                Ok(Some(text)) => println!("{text}\n"),
                Ok(None) => println!("No answers found.\n"),
                Err(e) => eprintln!("Error: {e:#}"),
            },
        }
    }
    Ok(())
}
