//! Sentence level of the hierarchy: the sentence record, its words, and the
//! derived views over them.
//!
//! A [`Sentence`] owns every annotation list over its span. Offsets in those
//! annotations are **character** indices into `form`, not byte indices —
//! Korean text makes the two wildly different, and the corpus format counts
//! characters. [`Sentence::word_at`] resolves a character position to the
//! word covering it via a per-character index built lazily and memoized for
//! the lifetime of the sentence.
//!
//! Three composite identifiers address sentences and words across corpora:
//!
//! - `fwid` — frame-wide sentence id, derived from the dotted sentence id
//!   (`"ABC.3.2.17"` → `"ABC-0003-00002-00017"`).
//! - `gid` — global word id, `{fwid}_{word id padded to 3}`.
//! - `dswid` — document-scoped word id, `{dsid}_{word id}`, where `dsid` is
//!   the document-local sentence label (`s1`, `s2`, …) assigned by
//!   [`assign_document_sentence_ids`](crate::assign_document_sentence_ids).

use std::fmt;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::layers::{DPList, Morpheme, MorphemeList, NEList, SRLList, WSDList, NE, SRL, WSD};
use crate::object::{decode, json_kind, ExtraFields, JsonRecord, Span, TypedList};

/// Ordered word annotations of a sentence.
pub type WordList = TypedList<Word>;

static EMPTY_DP: DPList = DPList::empty();

/// Format a dotted sentence id as a frame-wide id.
///
/// Two components are `docId.sentNum` (document and paragraph numbers default
/// to 1); four are `corpusId.docNum.paraNum.sentNum`. Anything else is a
/// format error.
pub(crate) fn format_fwid(id: &str) -> Result<String> {
    let numeric = |part: &str| -> Result<u32> {
        part.parse()
            .map_err(|_| Error::sentence_id(id, format!("component `{part}` is not numeric")))
    };
    let parts: Vec<&str> = id.split('.').collect();
    match parts.as_slice() {
        [prefix, sent] => Ok(format!("{}-{:04}-{:05}-{:05}", prefix, 1, 1, numeric(sent)?)),
        [prefix, doc, para, sent] => Ok(format!(
            "{}-{:04}-{:05}-{:05}",
            prefix,
            numeric(doc)?,
            numeric(para)?,
            numeric(sent)?
        )),
        parts => Err(Error::sentence_id(
            id,
            format!(
                "expected 2 or 4 dot-separated components, found {}",
                parts.len()
            ),
        )),
    }
}

// =============================================================================
// Word
// =============================================================================

/// A word (eojeol) of a sentence: 1-based sentence-local id, surface form,
/// and the character span it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Word id, 1-based and sentence-local.
    pub id: u32,
    /// Surface form.
    pub form: String,
    /// Start character offset into the sentence form.
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
    #[serde(skip)]
    sentence_id: Option<String>,
    #[serde(skip)]
    dsid: OnceCell<String>,
}

impl Word {
    /// Id of the owning sentence, if this word was built inside one.
    #[must_use]
    pub fn sentence_id(&self) -> Option<&str> {
        self.sentence_id.as_deref()
    }

    /// Global word id: `{sentence fwid}_{id:03}`.
    ///
    /// Fails with a lookup error on a word constructed without a parent
    /// sentence, and with a format error if the sentence id does not
    /// decompose.
    pub fn gid(&self) -> Result<String> {
        let sentence_id = self
            .sentence_id
            .as_deref()
            .ok_or_else(|| Error::lookup(format!("word {} has no parent sentence", self.id)))?;
        Ok(format!("{}_{:03}", format_fwid(sentence_id)?, self.id))
    }

    /// Document-scoped word id: `{sentence dsid}_{id}`.
    ///
    /// Requires [`assign_document_sentence_ids`](crate::assign_document_sentence_ids)
    /// to have run over the owning document first.
    pub fn dswid(&self) -> Result<String> {
        let dsid = self.dsid.get().ok_or_else(|| {
            Error::lookup(format!(
                "word {} has no document sentence id; run assign_document_sentence_ids first",
                self.id
            ))
        })?;
        Ok(format!("{}_{}", dsid, self.id))
    }

    pub(crate) fn attach(&mut self, sentence_id: &str) {
        self.sentence_id = Some(sentence_id.to_string());
    }

    pub(crate) fn set_dsid(&self, dsid: &str) -> bool {
        self.dsid.set(dsid.to_string()).is_ok()
    }
}

impl JsonRecord for Word {
    const KIND: &'static str = "word";
}

impl Span for Word {
    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }
}

// =============================================================================
// Sentence
// =============================================================================

/// A sentence: raw text plus the six annotation lists over its span.
///
/// Annotation-layer keys are all optional in the source format — real corpus
/// files omit empty layers — and an absent layer reads as an empty list. The
/// underlying option is kept so an absent key stays absent when serialized.
///
/// # Example
///
/// ```
/// use niklanson::{JsonRecord, Sentence};
///
/// let sentence = Sentence::from_json_text(
///     r#"{
///         "id": "X200818.1",
///         "form": "아이들이 책을 읽는다.",
///         "word": [
///             {"id": 1, "form": "아이들이", "begin": 0, "end": 4},
///             {"id": 2, "form": "책을", "begin": 5, "end": 7},
///             {"id": 3, "form": "읽는다.", "begin": 8, "end": 12}
///         ]
///     }"#,
/// )?;
///
/// assert_eq!(sentence.word_at(2)?.form, "아이들이");
/// assert_eq!(sentence.word_at(5)?.form, "책을");
/// assert!(sentence.word_at(4).is_err()); // the space between words
/// assert_eq!(sentence.fwid()?, "X200818-0001-00001-00001");
/// # Ok::<(), niklanson::Error>(())
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence id: dotted, document- or corpus-scoped.
    pub id: String,
    /// The raw sentence text.
    pub form: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    word: Option<WordList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    morpheme: Option<MorphemeList>,
    #[serde(rename = "WSD", default, skip_serializing_if = "Option::is_none")]
    wsd: Option<WSDList>,
    #[serde(rename = "NE", default, skip_serializing_if = "Option::is_none")]
    ne: Option<NEList>,
    #[serde(rename = "DP", default, skip_serializing_if = "Option::is_none")]
    dp: Option<DPList>,
    #[serde(rename = "SRL", default, skip_serializing_if = "Option::is_none")]
    srl: Option<SRLList>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
    #[serde(skip)]
    document_id: Option<String>,
    #[serde(skip)]
    dsid: OnceCell<String>,
    #[serde(skip)]
    fwid: OnceCell<String>,
    #[serde(skip)]
    char_index: OnceCell<Vec<Option<usize>>>,
}

impl Sentence {
    /// The words of the sentence, in span order.
    #[must_use]
    pub fn word_list(&self) -> &[Word] {
        self.word.as_deref().unwrap_or(&[])
    }

    /// The morpheme annotations, empty if the layer is absent.
    #[must_use]
    pub fn morpheme_list(&self) -> &[Morpheme] {
        self.morpheme.as_deref().unwrap_or(&[])
    }

    /// The word-sense annotations, empty if the layer is absent.
    #[must_use]
    pub fn wsd_list(&self) -> &[WSD] {
        self.wsd.as_deref().unwrap_or(&[])
    }

    /// The named-entity annotations, empty if the layer is absent.
    #[must_use]
    pub fn ne_list(&self) -> &[NE] {
        self.ne.as_deref().unwrap_or(&[])
    }

    /// The dependency parse, empty if the layer is absent.
    #[must_use]
    pub fn dp_list(&self) -> &DPList {
        self.dp.as_ref().unwrap_or(&EMPTY_DP)
    }

    /// The semantic-role annotations, empty if the layer is absent.
    #[must_use]
    pub fn srl_list(&self) -> &[SRL] {
        self.srl.as_deref().unwrap_or(&[])
    }

    /// Id of the owning document, if this sentence was built inside one.
    #[must_use]
    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// The word whose span covers character position `char_index`.
    ///
    /// Positions are character indices into `form`. A position outside
    /// `0..form.chars().count()`, or one covered by no word (whitespace
    /// between words), fails with a lookup error — there is no default word.
    ///
    /// The per-character index is built on first use and cached; the second
    /// lookup does no recomputation.
    pub fn word_at(&self, char_index: usize) -> Result<&Word> {
        let index = self.char_index();
        match index.get(char_index) {
            Some(Some(position)) => Ok(&self.word_list()[*position]),
            Some(None) => Err(Error::lookup(format!(
                "no word at position {char_index} of sentence {}",
                self.id
            ))),
            None => Err(Error::lookup(format!(
                "position {char_index} outside sentence {} (form is {} characters)",
                self.id,
                index.len()
            ))),
        }
    }

    pub(crate) fn char_index(&self) -> &[Option<usize>] {
        self.char_index.get_or_init(|| {
            let mut index = vec![None; self.form.chars().count()];
            for (position, word) in self.word_list().iter().enumerate() {
                for covered in word.begin..word.end {
                    if let Some(slot) = index.get_mut(covered) {
                        *slot = Some(position);
                    }
                }
            }
            index
        })
    }

    /// The frame-wide sentence id, formatted from the dotted `id` on first
    /// access and cached.
    ///
    /// `"X200818.1"` → `"X200818-0001-00001-00001"`;
    /// `"ABC.3.2.17"` → `"ABC-0003-00002-00017"`. An id with any other arity
    /// is a format error.
    pub fn fwid(&self) -> Result<&str> {
        self.fwid
            .get_or_try_init(|| format_fwid(&self.id))
            .map(String::as_str)
    }

    /// The document-local sentence label (`s1`, `s2`, …).
    ///
    /// Fails with a lookup error until
    /// [`assign_document_sentence_ids`](crate::assign_document_sentence_ids)
    /// has run over the owning document.
    pub fn dsid(&self) -> Result<&str> {
        self.dsid
            .get()
            .map(String::as_str)
            .ok_or_else(|| {
                Error::lookup(format!(
                    "sentence {} has no document sentence id; run assign_document_sentence_ids first",
                    self.id
                ))
            })
    }

    /// Wire the sentence into its parent context: remember the owning
    /// document id and hand every word a back-reference to this sentence.
    pub(crate) fn attach(&mut self, document_id: Option<&str>) {
        self.document_id = document_id.map(str::to_string);
        let id = self.id.clone();
        if let Some(words) = &mut self.word {
            for word in words.items_mut() {
                word.attach(&id);
            }
        }
    }

    /// Set the document-local label on this sentence and its words.
    /// Returns `false` if the label was already assigned.
    pub(crate) fn assign_dsid(&self, dsid: &str) -> bool {
        let fresh = self.dsid.set(dsid.to_string()).is_ok();
        for word in self.word_list() {
            word.set_dsid(dsid);
        }
        fresh
    }
}

impl JsonRecord for Sentence {
    const KIND: &'static str = "sentence";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(_) => {
                let mut sentence: Sentence = decode(Self::KIND, value)?;
                sentence.attach(None);
                Ok(sentence)
            }
            other => Err(Error::expected(Self::KIND, "object", json_kind(other))),
        }
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_text().map_err(|_| fmt::Error)?)
    }
}
