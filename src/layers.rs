//! Annotation-layer records.
//!
//! Words — the base segmentation — live with [`Sentence`](crate::Sentence);
//! every other layer's records are defined here. Sentence-scoped layers are
//! owned by their sentence, while CR and ZA attach to the owning
//! [`Document`](crate::Document) because their mentions cross sentences:
//!
//! | Layer | Records |
//! |-------|---------|
//! | MP — morphology | [`Morpheme`] |
//! | LS — lexical semantics | [`WSD`] |
//! | NE — named entities | [`NE`] |
//! | DP — dependency parse | [`DP`], [`DPList`] |
//! | SRL — semantic roles | [`SRL`], [`SRLPredicate`], [`SRLArgument`] |
//! | CR — cross-reference | [`CR`], [`CRMention`] |
//! | ZA — zero anaphora | [`ZA`], [`ZAPredicate`], [`ZAAntecedent`] |
//!
//! All records are immutable value types constructed from raw JSON; every one
//! carries an extras map for undeclared keys. Only [`DPList`] holds derived
//! state (the cached head sequence), which is why it is a concrete type
//! rather than a [`TypedList`] alias.

use std::fmt;
use std::ops::{Deref, Index};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::object::{json_kind, ExtraFields, JsonRecord, Span, TypedList};

/// Ordered morpheme annotations of a sentence.
pub type MorphemeList = TypedList<Morpheme>;
/// Ordered word-sense annotations of a sentence.
pub type WSDList = TypedList<WSD>;
/// Ordered named-entity annotations of a sentence.
pub type NEList = TypedList<NE>;
/// Ordered semantic-role annotations of a sentence.
pub type SRLList = TypedList<SRL>;
/// Ordered cross-reference chains of a document.
pub type CRList = TypedList<CR>;
/// Ordered zero-anaphora annotations of a document.
pub type ZAList = TypedList<ZA>;

// =============================================================================
// MP: Morphology
// =============================================================================

/// A morpheme: the smallest meaningful unit of a word, with its POS label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Morpheme {
    /// Morpheme id, sentence-local.
    pub id: u32,
    /// Surface form.
    pub form: String,
    /// Part-of-speech label (e.g. `NNG`, `JKS`).
    pub label: String,
    /// Id of the word this morpheme belongs to.
    pub word_id: u32,
    /// Order of this morpheme within its word.
    pub position: u32,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
    #[serde(skip)]
    tagged: OnceCell<String>,
}

impl Morpheme {
    /// The `form/label` rendering, computed once.
    pub fn tagged(&self) -> &str {
        self.tagged
            .get_or_init(|| format!("{}/{}", self.form, self.label))
    }
}

impl JsonRecord for Morpheme {
    const KIND: &'static str = "morpheme";
}

impl fmt::Display for Morpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tagged())
    }
}

// =============================================================================
// LS: Word Sense Disambiguation
// =============================================================================

/// A word-sense annotation over a span of the sentence form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WSD {
    /// Surface form of the disambiguated word.
    pub word: String,
    /// Sense number in the reference dictionary.
    pub sense_id: i32,
    /// Part of speech of the disambiguated word.
    pub pos: String,
    /// Start character offset into the sentence form.
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for WSD {
    const KIND: &'static str = "WSD";
}

impl Span for WSD {
    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }
}

impl fmt::Display for WSD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{:03}/{}", self.word, self.sense_id, self.pos)
    }
}

// =============================================================================
// NE: Named Entity
// =============================================================================

/// A named-entity span annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NE {
    /// Entity id, sentence-local.
    pub id: u32,
    /// Surface form of the entity.
    pub form: String,
    /// Entity class label (e.g. `PS_NAME`, `LC_OTHERS`).
    pub label: String,
    /// Start character offset into the sentence form.
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for NE {
    const KIND: &'static str = "NE";
}

impl Span for NE {
    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }
}

impl fmt::Display for NE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.form, self.label)
    }
}

// =============================================================================
// DP: Dependency Parse
// =============================================================================

/// One edge of the dependency parse: a word, its governor, and the relation
/// label. `head == -1` marks the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DP {
    /// Id of the dependent word.
    pub word_id: u32,
    /// Surface form of the dependent word.
    pub word_form: String,
    /// Id of the governing word, or `-1` for the root.
    pub head: i32,
    /// Dependency relation label (e.g. `NP_SBJ`, `VP`).
    pub label: String,
    /// Ids of the words that depend on this one.
    pub dependent: Vec<u32>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for DP {
    const KIND: &'static str = "DP";
}

/// The dependency parse of one sentence: an ordered edge list forming a tree
/// over the sentence's words.
///
/// Unlike the other layer lists this type carries derived state: the head
/// sequence is computed once on first access and memoized, and the root word
/// is checked for uniqueness.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DPList {
    items: Vec<DP>,
    #[serde(skip)]
    heads: OnceCell<Vec<i32>>,
}

impl DPList {
    /// An empty parse, usable as a shared static.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            heads: OnceCell::new(),
        }
    }

    /// Construct from a raw JSON array, one edge per entry.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(entries) => {
                let mut items = Vec::with_capacity(entries.len());
                for (index, entry) in entries.iter().enumerate() {
                    let item =
                        DP::from_value(entry).map_err(|err| Error::element(DP::KIND, index, err))?;
                    items.push(item);
                }
                Ok(Self {
                    items,
                    heads: OnceCell::new(),
                })
            }
            other => Err(Error::expected(DP::KIND, "array", json_kind(other))),
        }
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the parse has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the edges in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DP> {
        self.items.iter()
    }

    /// The ordered sequence of head values, one per edge, cached after the
    /// first computation.
    pub fn heads(&self) -> &[i32] {
        self.heads
            .get_or_init(|| self.items.iter().map(|dp| dp.head).collect())
    }

    /// The word id of the single root edge (`head == -1`).
    ///
    /// A well-formed parse has exactly one root; zero or multiple roots is a
    /// structural error rather than a silent pick.
    pub fn root_word_id(&self) -> Result<u32> {
        let mut roots = self.items.iter().filter(|dp| dp.head == -1);
        match (roots.next(), roots.next()) {
            (Some(root), None) => Ok(root.word_id),
            (None, _) => Err(Error::structural(
                DP::KIND,
                "no root entry (head = -1) in dependency list",
            )),
            (Some(_), Some(_)) => Err(Error::structural(
                DP::KIND,
                "multiple root entries (head = -1) in dependency list",
            )),
        }
    }
}

impl Deref for DPList {
    type Target = [DP];

    fn deref(&self) -> &[DP] {
        &self.items
    }
}

impl Index<usize> for DPList {
    type Output = DP;

    fn index(&self, index: usize) -> &DP {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a DPList {
    type Item = &'a DP;
    type IntoIter = std::slice::Iter<'a, DP>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// SRL: Semantic Role Labeling
// =============================================================================

/// The predicate of a semantic-role annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SRLPredicate {
    /// Surface form of the predicate.
    pub form: String,
    /// Start character offset into the sentence form.
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Lemma of the predicate.
    pub lemma: String,
    /// Predicate sense number.
    pub sense_id: i32,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for SRLPredicate {
    const KIND: &'static str = "SRL predicate";
}

impl Span for SRLPredicate {
    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }
}

/// One argument of a semantic-role annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SRLArgument {
    /// Surface form of the argument.
    pub form: String,
    /// Role label (e.g. `ARG0`, `ARGM-TMP`).
    pub label: String,
    /// Start character offset into the sentence form.
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for SRLArgument {
    const KIND: &'static str = "SRL argument";
}

impl Span for SRLArgument {
    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }
}

/// A semantic-role annotation: one predicate and its ordered arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SRL {
    /// The predicate span.
    pub predicate: SRLPredicate,
    /// The argument spans, in source order.
    pub argument: Vec<SRLArgument>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for SRL {
    const KIND: &'static str = "SRL";
}

// =============================================================================
// CR: Cross Reference
// =============================================================================

/// One mention in a coreference chain. Mentions may live in different
/// sentences of the same document, so they carry the sentence id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CRMention {
    /// Surface form of the mention.
    pub form: String,
    /// Id of the sentence the mention occurs in.
    pub sentence_id: String,
    /// Start character offset into that sentence's form.
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Id of the NE annotation this mention corresponds to, or `-1`.
    #[serde(rename = "NE_id")]
    pub ne_id: i32,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for CRMention {
    const KIND: &'static str = "CR mention";
}

impl Span for CRMention {
    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }
}

/// A coreference chain: the ordered mentions of one entity across a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CR {
    /// The mentions of the chain, in source order.
    pub mention: Vec<CRMention>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for CR {
    const KIND: &'static str = "CR";
}

// =============================================================================
// ZA: Zero Anaphora
// =============================================================================

/// The predicate whose argument was elided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZAPredicate {
    /// Surface form of the predicate.
    pub form: String,
    /// Id of the sentence the predicate occurs in.
    pub sentence_id: String,
    /// Start character offset into that sentence's form.
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for ZAPredicate {
    const KIND: &'static str = "ZA predicate";
}

impl Span for ZAPredicate {
    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }
}

/// An antecedent of an elided argument. The type field distinguishes subject
/// from object ellipsis and the like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZAAntecedent {
    /// Antecedent type (e.g. `subject`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Surface form of the antecedent.
    pub form: String,
    /// Id of the sentence the antecedent occurs in.
    pub sentence_id: String,
    /// Start character offset into that sentence's form.
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for ZAAntecedent {
    const KIND: &'static str = "ZA antecedent";
}

impl Span for ZAAntecedent {
    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }
}

/// A zero-anaphora annotation: an elided argument's predicate plus the
/// ordered antecedents it resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZA {
    /// The predicate span.
    pub predicate: ZAPredicate,
    /// The antecedent spans, in source order.
    pub antecedent: Vec<ZAAntecedent>,
    /// Undeclared keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl JsonRecord for ZA {
    const KIND: &'static str = "ZA";
}
