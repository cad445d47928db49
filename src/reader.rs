//! Root-level detection and normalization for corpus files.
//!
//! A corpus JSON file may hold a full corpus, a single document, or a single
//! sentence. The reader sniffs which by the root object's marker key —
//! `document` ⇒ corpus, `sentence` ⇒ document, `form` ⇒ sentence — and
//! returns the result as an explicit [`RootLevel`] / [`Root`] pair rather
//! than leaving callers to duck-type the tree.
//!
//! This is the only file-touching component of the crate; everything below
//! it operates on already-parsed JSON values.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::corpus::{assign_document_sentence_ids, Corpus, Document};
use crate::error::{Error, Result};
use crate::object::{json_kind, JsonRecord};

/// Hierarchy level of a file's root object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootLevel {
    /// The root is a full corpus (`document` key present).
    Corpus,
    /// The root is a single document (`sentence` key present).
    Document,
    /// The root is a single sentence (`form` key present).
    Sentence,
}

impl RootLevel {
    /// Human-readable label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RootLevel::Corpus => "corpus",
            RootLevel::Document => "document",
            RootLevel::Sentence => "sentence",
        }
    }
}

impl std::fmt::Display for RootLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constructed root entity of a file.
///
/// Sentence-level files are normalized into a synthetic single-sentence
/// document, so the variants mirror the two core entry points.
#[derive(Debug)]
pub enum Root {
    /// A full corpus.
    Corpus(Corpus),
    /// A single document (possibly synthesized around a lone sentence).
    Document(Document),
}

/// Reader over one corpus JSON file (or value): detects the root level and
/// constructs the corresponding entities on demand.
///
/// The reader keeps the raw value; each accessor constructs a fresh tree, so
/// the reader itself stays cheap to hold.
#[derive(Debug)]
pub struct NiklansonReader {
    data: Value,
    level: RootLevel,
}

impl NiklansonReader {
    /// Wrap an already-parsed JSON value, detecting its root level.
    ///
    /// Fails with a type error if the value is not an object, and with a
    /// structural error if no marker key identifies the level.
    pub fn from_value(data: Value) -> Result<Self> {
        let level = detect_level(&data)?;
        Ok(Self { data, level })
    }

    /// Parse JSON text, then wrap as [`NiklansonReader::from_value`].
    pub fn from_json_text(text: &str) -> Result<Self> {
        let data: Value =
            serde_json::from_str(text).map_err(|err| Error::parse("corpus file", err))?;
        Self::from_value(data)
    }

    /// Read and parse a UTF-8 JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_text(&text)
    }

    /// The detected root level.
    #[must_use]
    pub fn level(&self) -> RootLevel {
        self.level
    }

    /// Construct the root entity for the detected level.
    ///
    /// Sentence-level input is wrapped into a synthetic document with an
    /// empty id, as a lone sentence has no document of its own.
    pub fn root(&self) -> Result<Root> {
        match self.level {
            RootLevel::Corpus => Corpus::from_value(&self.data).map(Root::Corpus),
            RootLevel::Document => Document::from_value(&self.data).map(Root::Document),
            RootLevel::Sentence => self.wrapped_sentence().map(Root::Document),
        }
    }

    /// The corpus at the root. Fails unless the root level is corpus.
    pub fn corpus(&self) -> Result<Corpus> {
        if self.level != RootLevel::Corpus {
            return Err(Error::structural(
                "reader",
                format!("root object is a {}, not a corpus", self.level),
            ));
        }
        Corpus::from_value(&self.data)
    }

    /// The document at the root. Fails unless the root level is document.
    pub fn document(&self) -> Result<Document> {
        if self.level != RootLevel::Document {
            return Err(Error::structural(
                "reader",
                format!("root object is a {}, not a document", self.level),
            ));
        }
        Document::from_value(&self.data)
    }

    /// Normalize any root level to a list of documents, with document-local
    /// sentence ids already assigned.
    pub fn document_list(&self) -> Result<Vec<Document>> {
        let documents = match self.root()? {
            Root::Corpus(corpus) => corpus.into_documents(),
            Root::Document(document) => vec![document],
        };
        for document in &documents {
            assign_document_sentence_ids(document);
        }
        Ok(documents)
    }

    fn wrapped_sentence(&self) -> Result<Document> {
        let wrapper = json!({
            "id": "",
            "metadata": {},
            "sentence": [self.data.clone()]
        });
        Document::from_value(&wrapper)
    }
}

fn detect_level(data: &Value) -> Result<RootLevel> {
    let object = data
        .as_object()
        .ok_or_else(|| Error::expected("corpus file", "object", json_kind(data)))?;

    let mut detected = None;
    for (key, level) in [
        ("document", RootLevel::Corpus),
        ("sentence", RootLevel::Document),
        ("form", RootLevel::Sentence),
    ] {
        if object.contains_key(key) {
            match detected {
                None => detected = Some(level),
                Some(kept) => {
                    log::warn!(
                        "root object carries both {kept} and {level} marker keys; reading as {kept}"
                    );
                }
            }
        }
    }

    detected.ok_or_else(|| {
        Error::structural(
            "reader",
            "root object has none of the document/sentence/form marker keys",
        )
    })
}
