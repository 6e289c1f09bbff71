#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use race_handicapper::application::ports::{
    Catalog, CompletionRequest, LlmClient, LlmClientError, Resolved,
};
use race_handicapper::domain::{ModelOption, PromptKind, PromptTemplate};

/// Builds a PDF with one page per entry, each page showing its text in Courier.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("save fixture pdf");
    out
}

/// Records every request and answers with a fixed reply or error.
pub struct MockLlmClient {
    reply: Result<String, fn() -> LlmClientError>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: fn() -> LlmClientError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

/// Catalog serving the built-in defaults, with optional overrides.
#[derive(Default)]
pub struct StaticCatalog {
    pub models: Option<Vec<ModelOption>>,
    pub template: Option<PromptTemplate>,
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn models(&self) -> Resolved<Vec<ModelOption>> {
        match &self.models {
            Some(models) => Resolved::from_file(models.clone(), "models.json"),
            None => Resolved::builtin(ModelOption::builtin(), "no models file in tests"),
        }
    }

    async fn prompt_template(&self, kind: PromptKind) -> Resolved<PromptTemplate> {
        match &self.template {
            Some(template) => Resolved::from_file(template.clone(), "prompt.txt"),
            None => Resolved::builtin(kind.builtin_template(), "no template file in tests"),
        }
    }
}

pub fn static_catalog() -> Arc<dyn Catalog> {
    Arc::new(StaticCatalog::default())
}
