#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use summarmuse::SummarizeError;
use summarmuse::ai::CompletionClient;
use summarmuse::extract::{Extractor, OcrEngine, PdfParser};

/// Extractor double that counts calls and records whether the stored upload
/// was present on disk while it ran.
pub struct FakeExtractor {
    text: Option<String>,
    calls: AtomicUsize,
    saw_file: AtomicBool,
    media_type: Mutex<Option<String>>,
}

impl FakeExtractor {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            saw_file: AtomicBool::new(false),
            media_type: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            ..Self::returning("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn saw_file(&self) -> bool {
        self.saw_file.load(Ordering::SeqCst)
    }

    pub fn last_media_type(&self) -> Option<String> {
        self.media_type.lock().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn extract(&self, path: &Path, media_type: &str) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.saw_file.store(path.exists(), Ordering::SeqCst);
        *self.media_type.lock().unwrap() = Some(media_type.to_string());
        self.text
            .clone()
            .ok_or_else(|| SummarizeError::ExtractionFailed("corrupted fixture".to_string()))
    }
}

/// Completion client double that records prompts.
pub struct FakeCompletion {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or_else(|| {
            SummarizeError::SummaryGenerationFailed("provider returned 503".to_string())
        })
    }
}

/// PDF parser / OCR double returning fixed text and counting calls.
#[derive(Default)]
pub struct CountingEngine {
    pub text: String,
    calls: AtomicUsize,
}

impl CountingEngine {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PdfParser for CountingEngine {
    async fn parse_pdf(&self, _path: &Path) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

#[async_trait]
impl OcrEngine for CountingEngine {
    async fn recognize(&self, _path: &Path) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

#[async_trait]
impl PdfParser for &CountingEngine {
    async fn parse_pdf(&self, path: &Path) -> Result<String, SummarizeError> {
        (**self).parse_pdf(path).await
    }
}

#[async_trait]
impl OcrEngine for &CountingEngine {
    async fn recognize(&self, path: &Path) -> Result<String, SummarizeError> {
        (**self).recognize(path).await
    }
}

/// Writes a PDF with one page per entry of `pages`, each showing its text.
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
