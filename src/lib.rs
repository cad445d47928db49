//! # niklanson
//!
//! Typed object model for NIKL annotated-corpus JSON ("Niklanson"): the
//! seven-layer Korean-language annotation format distributed by the National
//! Institute of Korean Language.
//!
//! | Layer | Meaning |
//! |-------|---------|
//! | MP | Morphology (형태) |
//! | LS | Lexical semantics — word senses (어휘 의미) |
//! | NE | Named entities (개체명) |
//! | DP | Dependency parse (구문 분석) |
//! | SRL | Semantic roles (의미역) |
//! | ZA | Zero anaphora (무형 대용어) |
//! | CR | Cross reference (상호 참조) |
//!
//! The crate turns raw corpus JSON into an immutable tree of typed entities:
//!
//! ```text
//! Corpus
//!   CorpusMetadata
//!   Document*
//!     DocumentMetadata
//!     Sentence*
//!       Word*  Morpheme*  WSD*  NE*  DP*  SRL*
//!     CR*  ZA*
//! ```
//!
//! Construction is strict about structure (a sentence without `form` is an
//! error, a scalar where a mapping belongs is an error) but open about
//! content: undeclared keys ride along in an extras map and round-trip
//! verbatim, and an absent annotation layer reads as an empty list. After
//! construction the tree is read-only; the handful of derived views — the
//! character-offset word index, composite identifiers, dependency heads —
//! are computed on first use and memoized behind one-time-initialization
//! cells, so a built tree can be shared across threads.
//!
//! ## Quick start
//!
//! ```
//! use niklanson::{JsonRecord, Document, assign_document_sentence_ids};
//!
//! let document = Document::from_json_text(
//!     r#"{
//!         "id": "X200818",
//!         "sentence": [
//!             {
//!                 "id": "X200818.1",
//!                 "form": "아이들이 책을 읽는다.",
//!                 "word": [
//!                     {"id": 1, "form": "아이들이", "begin": 0, "end": 4},
//!                     {"id": 2, "form": "책을", "begin": 5, "end": 7},
//!                     {"id": 3, "form": "읽는다.", "begin": 8, "end": 12}
//!                 ]
//!             }
//!         ]
//!     }"#,
//! )?;
//!
//! let sentence = &document.sentence_list()[0];
//! assert_eq!(sentence.word_at(5)?.form, "책을");
//! assert_eq!(sentence.fwid()?, "X200818-0001-00001-00001");
//!
//! // Document-local sentence numbering is a one-time post-construction pass.
//! assign_document_sentence_ids(&document);
//! assert_eq!(sentence.word_list()[0].dswid()?, "s1_1");
//! # Ok::<(), niklanson::Error>(())
//! ```
//!
//! ## Reading files
//!
//! A corpus file's root object may be a corpus, a single document, or a
//! single sentence; [`NiklansonReader`] sniffs which and normalizes:
//!
//! ```no_run
//! use niklanson::{NiklansonReader, Root};
//!
//! let reader = NiklansonReader::from_path("corpus.json")?;
//! match reader.root()? {
//!     Root::Corpus(corpus) => println!("{} documents", corpus.document_list().len()),
//!     Root::Document(document) => println!("document {}", document.id),
//! }
//! # Ok::<(), niklanson::Error>(())
//! ```

#![warn(missing_docs)]

mod corpus;
pub mod error;
mod layers;
mod object;
pub mod reader;
mod sentence;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use niklanson::prelude::*;
    //!
    //! let corpus = Corpus::new();
    //! assert!(corpus.document_list().is_empty());
    //! ```
    pub use crate::corpus::{assign_document_sentence_ids, Corpus, Document};
    pub use crate::error::{Error, Result};
    pub use crate::layers::{CR, DP, NE, SRL, WSD, ZA};
    pub use crate::object::{ExtraFieldsExt, JsonRecord, Span, TypedList};
    pub use crate::reader::{NiklansonReader, Root, RootLevel};
    pub use crate::sentence::{Sentence, Word};
}

// Re-exports
pub use corpus::{
    assign_document_sentence_ids, Corpus, CorpusMetadata, Document, DocumentList,
    DocumentMetadata, SentenceList,
};
pub use error::{Error, Result};
pub use layers::{
    CRList, CRMention, DPList, Morpheme, MorphemeList, NEList, SRLArgument, SRLList,
    SRLPredicate, WSDList, ZAAntecedent, ZAList, ZAPredicate, CR, DP, NE, SRL, WSD, ZA,
};
pub use object::{ExtraFields, ExtraFieldsExt, JsonRecord, Span, TypedList};
pub use reader::{NiklansonReader, Root, RootLevel};
pub use sentence::{Sentence, Word, WordList};
