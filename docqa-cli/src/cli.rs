use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Ask questions about a document and get matching sentences with context", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Number of answers per question
    #[arg(short = 'k', long, default_value_t = 3, global = true)]
    pub top_k: usize,

    /// Drop sentences whose length is at most this many characters
    #[arg(long, default_value_t = 10, global = true)]
    pub min_sentence_chars: usize,

    /// Sentences embedded per model call when loading a document
    #[arg(long, default_value_t = 32, global = true)]
    pub batch_size: usize,

    /// Embedding backend
    #[arg(long, value_enum, default_value_t = EmbedderKind::Auto, global = true)]
    pub embedder: EmbedderKind,

    /// Directory for downloaded model files
    #[arg(long, env = "DOCQA_MODEL_CACHE", global = true)]
    pub model_cache: Option<PathBuf>,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer one question and exit
    Ask {
        /// Document to load (.pdf, or plain text)
        file: PathBuf,

        /// The question to ask
        question: String,

        /// Print answers as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Interactive question session over a document
    Chat {
        /// Document to load (.pdf, or plain text)
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedderKind {
    /// all-MiniLM-L6-v2 when built with the `minilm` feature, hashed tokens otherwise
    Auto,
    /// Local all-MiniLM-L6-v2 sentence embeddings
    Minilm,
    /// Model-free hashed bag-of-words embeddings
    Hashed,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}
