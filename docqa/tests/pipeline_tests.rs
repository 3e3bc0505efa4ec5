//! End-to-end tests for document loading and query answering.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docqa::{
    Corpus, DocQaError, DocumentSource, EmbeddingProvider, HashedTokenEmbedder, IndexedDocument,
    PlainTextExtractor, QaConfig, QaPipeline, render_response_text,
};

/// Counts provider calls and refuses any text containing "poison".
#[derive(Default)]
struct InstrumentedEmbedder {
    inner: HashedTokenEmbedder,
    single_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    fail_queries: bool,
}

#[async_trait]
impl EmbeddingProvider for InstrumentedEmbedder {
    async fn embed(&self, text: &str) -> docqa::Result<Vec<f32>> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("poison") || self.fail_queries {
            return Err(DocQaError::EmbeddingError {
                provider: "Instrumented".into(),
                message: "refused".into(),
            });
        }
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> docqa::Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if texts.iter().any(|t| t.contains("poison")) {
            return Err(DocQaError::EmbeddingError {
                provider: "Instrumented".into(),
                message: "batch refused".into(),
            });
        }
        self.inner.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}

fn pipeline_with(provider: Arc<dyn EmbeddingProvider>, k: usize) -> QaPipeline {
    QaPipeline::builder()
        .config(QaConfig::builder().num_responses(k).embed_batch_size(2).build().unwrap())
        .embedding_provider(provider)
        .extractor(Arc::new(PlainTextExtractor))
        .build()
        .unwrap()
}

const CAT_CORPUS: [&str; 3] = [
    "The cat sat on the mat today.",
    "Dogs are loyal companions indeed.",
    "The mat was very soft and warm.",
];

#[tokio::test]
async fn cat_question_finds_first_sentence_with_following_context() {
    let pipeline = pipeline_with(Arc::new(HashedTokenEmbedder::default()), 1);
    let corpus = Corpus::from_sentences(CAT_CORPUS.iter().map(|s| (*s).to_string()));
    let document =
        IndexedDocument::build(corpus, pipeline.embedding_provider().as_ref(), 32).await;

    let answers = pipeline.ask(&document, "Where did the cat sit?").await.unwrap();

    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].answer, CAT_CORPUS[0]);
    assert_eq!(answers[0].context, format!("{} {}", CAT_CORPUS[0], CAT_CORPUS[1]));
    assert!(answers[0].similarity > 0.0);
}

#[tokio::test]
async fn empty_corpus_returns_no_answers() {
    let pipeline = pipeline_with(Arc::new(HashedTokenEmbedder::default()), 3);
    let document = pipeline.load_text("").await.unwrap();

    assert!(document.corpus().is_empty());
    let answers = pipeline.ask(&document, "anything at all?").await.unwrap();
    assert!(answers.is_empty());
}

#[tokio::test]
async fn single_sentence_document_answers_with_itself() {
    let pipeline = pipeline_with(Arc::new(HashedTokenEmbedder::default()), 3);
    let document =
        pipeline.load_text("Only this sentence is long enough to keep. Tiny.").await.unwrap();

    assert_eq!(document.corpus().len(), 1);
    let answers = pipeline.ask(&document, "which sentence is long").await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].answer, "Only this sentence is long enough to keep");
    assert_eq!(answers[0].context, answers[0].answer);
}

#[tokio::test]
async fn loads_plain_text_source_with_duplicates_removed() {
    let pipeline = pipeline_with(Arc::new(HashedTokenEmbedder::default()), 5);
    let text = "Rust guarantees memory safety. The borrow checker enforces ownership.\x0C\
                Rust guarantees memory safety. Cargo builds and tests every crate.";
    let source = DocumentSource::from_bytes("notes.txt", text.as_bytes());
    let document = pipeline.load_source(&source).await.unwrap();

    assert_eq!(
        document.corpus().sentences(),
        [
            "Rust guarantees memory safety",
            "The borrow checker enforces ownership",
            "Cargo builds and tests every crate.",
        ]
    );

    let answers = pipeline.ask(&document, "memory safety in Rust").await.unwrap();
    assert_eq!(answers.len(), 3);
    assert_eq!(answers[0].answer, "Rust guarantees memory safety");
    assert_eq!(
        answers[0].context,
        "Rust guarantees memory safety The borrow checker enforces ownership"
    );
}

#[tokio::test]
async fn query_is_embedded_once_and_sentences_are_not_re_embedded() {
    let provider = Arc::new(InstrumentedEmbedder::default());
    let pipeline = pipeline_with(provider.clone(), 2);
    let document = pipeline
        .load_text("First sentence about apples. Second sentence about pears. Third one is plums.")
        .await
        .unwrap();

    // Three sentences in batches of two.
    assert_eq!(provider.batch_calls.load(Ordering::SeqCst), 2);
    assert_eq!(provider.single_calls.load(Ordering::SeqCst), 0);

    pipeline.ask(&document, "apples").await.unwrap();
    pipeline.ask(&document, "pears").await.unwrap();

    assert_eq!(provider.single_calls.load(Ordering::SeqCst), 2);
    assert_eq!(provider.batch_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn sentence_that_fails_to_embed_is_skipped_but_kept_for_context() {
    let provider = Arc::new(InstrumentedEmbedder::default());
    let pipeline = pipeline_with(provider, 5);
    let document = pipeline
        .load_text("Apples grow on tall trees. This poison sentence cannot embed. Pears ripen late.")
        .await
        .unwrap();

    assert_eq!(document.corpus().len(), 3);
    assert_eq!(document.embedded_count(), 2);

    let answers = pipeline.ask(&document, "apples trees").await.unwrap();
    assert_eq!(answers.len(), 2);
    assert!(answers.iter().all(|a| !a.answer.contains("poison")));
    assert_eq!(
        answers[0].context,
        "Apples grow on tall trees This poison sentence cannot embed"
    );
}

#[tokio::test]
async fn query_embedding_failure_fails_only_that_query() {
    let provider = Arc::new(InstrumentedEmbedder { fail_queries: true, ..Default::default() });
    let pipeline = pipeline_with(provider, 3);
    let document = pipeline.load_text("A perfectly ordinary sentence here.").await.unwrap();

    let err = pipeline.ask(&document, "ordinary").await.unwrap_err();
    assert!(matches!(err, DocQaError::PipelineError(_)));
    assert_eq!(document.corpus().len(), 1);
}

#[tokio::test]
async fn top_k_override_limits_answers() {
    let pipeline = pipeline_with(Arc::new(HashedTokenEmbedder::default()), 3);
    let document = pipeline
        .load_text("Alpha sentence number one. Beta sentence number two. Gamma sentence number three.")
        .await
        .unwrap();

    assert_eq!(pipeline.ask(&document, "sentence").await.unwrap().len(), 3);
    assert_eq!(pipeline.ask_top_k(&document, "sentence", 1).await.unwrap().len(), 1);
    assert_eq!(pipeline.ask_top_k(&document, "sentence", 10).await.unwrap().len(), 3);
}

#[tokio::test]
async fn malformed_text_document_fails_the_load() {
    let pipeline = pipeline_with(Arc::new(HashedTokenEmbedder::default()), 3);
    let source = DocumentSource::from_bytes("broken.txt", vec![0xc3, 0x28]);
    let err = pipeline.load_source(&source).await.unwrap_err();
    assert!(matches!(err, DocQaError::ExtractionError { .. }));
}

#[tokio::test]
async fn rendered_text_lists_answer_then_context() {
    let pipeline = pipeline_with(Arc::new(HashedTokenEmbedder::default()), 1);
    let document = pipeline.load_text("The lighthouse keeper lit the lamp.").await.unwrap();
    let answers = pipeline.ask(&document, "who lit the lamp").await.unwrap();

    assert_eq!(
        render_response_text(&answers),
        "📌 The lighthouse keeper lit the lamp.\n💡 Context: The lighthouse keeper lit the lamp."
    );
}

#[test]
fn builder_requires_embedding_provider() {
    let err = QaPipeline::builder().build().err().unwrap();
    assert!(matches!(err, DocQaError::ConfigError(_)));
}

#[test]
fn builder_rejects_config_that_skipped_validation() {
    let config = QaConfig { num_responses: 0, ..QaConfig::default() };
    let err = QaPipeline::builder()
        .config(config)
        .embedding_provider(Arc::new(HashedTokenEmbedder::default()))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, DocQaError::ConfigError(_)));
}
