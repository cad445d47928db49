//! Corpus and document levels of the hierarchy.
//!
//! A [`Corpus`] owns an ordered list of [`Document`]s; a document owns its
//! sentences plus the two document-scoped annotation lists (cross-reference
//! chains and zero-anaphora records, whose mentions may span sentences).
//!
//! Construction wires parent back-references down the tree: every sentence
//! learns its document id, every word its sentence id. The references are
//! plain id strings, so no ownership cycle exists and a fully built tree can
//! be traversed from any number of threads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::layers::{CRList, ZAList, CR, ZA};
use crate::object::{decode, json_kind, ExtraFields, JsonRecord, TypedList};
use crate::sentence::Sentence;

/// Ordered documents of a corpus.
pub type DocumentList = TypedList<Document>;
/// Ordered sentences of a document.
pub type SentenceList = TypedList<Sentence>;

// =============================================================================
// Metadata
// =============================================================================

/// Corpus-wide metadata. Every field is optional; absent keys stay absent
/// through a round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusMetadata {
    /// Corpus title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Institution that created the corpus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Institution that distributes the corpus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor: Option<String>,
    /// Publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Corpus category (e.g. newspaper, spoken).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Annotation layers present in the corpus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_level: Option<Vec<String>>,
    /// Sampling description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling: Option<String>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for CorpusMetadata {
    const KIND: &'static str = "corpus metadata";
}

/// Per-document metadata. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publisher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Publication date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Topic classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Source URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for DocumentMetadata {
    const KIND: &'static str = "document metadata";
}

// =============================================================================
// Document
// =============================================================================

/// An annotated document: ordered sentences plus the document-scoped CR and
/// ZA annotation lists.
#[derive(Debug, Serialize, Deserialize)]
pub struct Document {
    /// Document id, unique within its corpus.
    pub id: String,
    /// Per-document metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sentence: Option<SentenceList>,
    #[serde(rename = "CR", default, skip_serializing_if = "Option::is_none")]
    cr: Option<CRList>,
    #[serde(rename = "ZA", default, skip_serializing_if = "Option::is_none")]
    za: Option<ZAList>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Document {
    /// The sentences of the document, in source order.
    #[must_use]
    pub fn sentence_list(&self) -> &[Sentence] {
        self.sentence.as_deref().unwrap_or(&[])
    }

    /// The cross-reference chains, empty if the layer is absent.
    #[must_use]
    pub fn cr_list(&self) -> &[CR] {
        self.cr.as_deref().unwrap_or(&[])
    }

    /// The zero-anaphora annotations, empty if the layer is absent.
    #[must_use]
    pub fn za_list(&self) -> &[ZA] {
        self.za.as_deref().unwrap_or(&[])
    }

    /// Wire every contained sentence (and its words) to this document.
    pub(crate) fn attach(&mut self) {
        let id = self.id.clone();
        if let Some(sentences) = &mut self.sentence {
            for sentence in sentences.items_mut() {
                sentence.attach(Some(id.as_str()));
            }
        }
    }
}

impl JsonRecord for Document {
    const KIND: &'static str = "document";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(_) => {
                let mut document: Document = decode(Self::KIND, value)?;
                document.attach();
                Ok(document)
            }
            other => Err(Error::expected(Self::KIND, "object", json_kind(other))),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_text().map_err(|_| fmt::Error)?)
    }
}

// =============================================================================
// Corpus
// =============================================================================

/// The top-level object: corpus id, metadata, and the ordered document list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// Corpus id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Corpus-wide metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CorpusMetadata>,
    #[serde(rename = "document", default, skip_serializing_if = "Option::is_none")]
    document: Option<DocumentList>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Corpus {
    /// An empty corpus: no id, no metadata, no documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the corpus id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the corpus metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: CorpusMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the document list.
    #[must_use]
    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.document = Some(documents.into());
        self
    }

    /// The documents of the corpus, in source order.
    #[must_use]
    pub fn document_list(&self) -> &[Document] {
        self.document.as_deref().unwrap_or(&[])
    }

    /// Consume the corpus, yielding its documents.
    #[must_use]
    pub fn into_documents(self) -> Vec<Document> {
        self.document.map(TypedList::into_vec).unwrap_or_default()
    }
}

impl JsonRecord for Corpus {
    const KIND: &'static str = "corpus";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(_) => {
                let mut corpus: Corpus = decode(Self::KIND, value)?;
                if let Some(documents) = &mut corpus.document {
                    for document in documents.items_mut() {
                        document.attach();
                    }
                }
                Ok(corpus)
            }
            other => Err(Error::expected(Self::KIND, "object", json_kind(other))),
        }
    }
}

// =============================================================================
// Document-local sentence numbering
// =============================================================================

/// Assign document-local sentence labels (`s1`, `s2`, …) across a document.
///
/// Run once per document after construction; it populates the `dsid` of every
/// sentence and the `dswid` support of every word. Re-running is a no-op.
pub fn assign_document_sentence_ids(document: &Document) {
    for (position, sentence) in document.sentence_list().iter().enumerate() {
        if !sentence.assign_dsid(&format!("s{}", position + 1)) {
            log::debug!(
                "sentence ids for document {} already assigned",
                document.id
            );
            return;
        }
    }
}
