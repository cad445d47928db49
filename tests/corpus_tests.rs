//! Full-tree construction and traversal over a two-sentence annotated
//! document, exercising all seven annotation layers.

use niklanson::{
    assign_document_sentence_ids, Corpus, Document, Error, JsonRecord, Span,
};
use serde_json::{json, Value};

fn annotated_corpus() -> Value {
    json!({
        "id": "NIKL2020",
        "metadata": {
            "title": "국립국어원 통합 말뭉치",
            "creator": "국립국어원",
            "distributor": "국립국어원",
            "year": "2020",
            "category": "신문",
            "annotation_level": ["형태", "어휘 의미", "개체명", "구문", "의미역", "무형대용어", "상호참조"],
            "sampling": "부분 추출"
        },
        "document": [
            {
                "id": "X200818",
                "metadata": {
                    "title": "독서 기사",
                    "author": "기자",
                    "publisher": "신문사",
                    "date": "20200818",
                    "topic": "문화",
                    "url": "https://example.com/x200818"
                },
                "sentence": [
                    {
                        "id": "X200818.1",
                        "form": "아이들이 책을 읽는다.",
                        "word": [
                            {"id": 1, "form": "아이들이", "begin": 0, "end": 4},
                            {"id": 2, "form": "책을", "begin": 5, "end": 7},
                            {"id": 3, "form": "읽는다.", "begin": 8, "end": 12}
                        ],
                        "morpheme": [
                            {"id": 1, "form": "아이", "label": "NNG", "word_id": 1, "position": 1},
                            {"id": 2, "form": "들", "label": "XSN", "word_id": 1, "position": 2},
                            {"id": 3, "form": "이", "label": "JKS", "word_id": 1, "position": 3},
                            {"id": 4, "form": "책", "label": "NNG", "word_id": 2, "position": 1},
                            {"id": 5, "form": "을", "label": "JKO", "word_id": 2, "position": 2},
                            {"id": 6, "form": "읽", "label": "VV", "word_id": 3, "position": 1},
                            {"id": 7, "form": "는다", "label": "EF", "word_id": 3, "position": 2},
                            {"id": 8, "form": ".", "label": "SF", "word_id": 3, "position": 3}
                        ],
                        "WSD": [
                            {"word": "아이", "sense_id": 1, "pos": "NNG", "begin": 0, "end": 2},
                            {"word": "책", "sense_id": 1, "pos": "NNG", "begin": 5, "end": 6}
                        ],
                        "DP": [
                            {"word_id": 1, "word_form": "아이들이", "head": 3, "label": "NP_SBJ", "dependent": []},
                            {"word_id": 2, "word_form": "책을", "head": 3, "label": "NP_OBJ", "dependent": []},
                            {"word_id": 3, "word_form": "읽는다.", "head": -1, "label": "VP", "dependent": [1, 2]}
                        ],
                        "SRL": [
                            {
                                "predicate": {"form": "읽는다", "begin": 8, "end": 11, "lemma": "읽다", "sense_id": 1},
                                "argument": [
                                    {"form": "아이들이", "label": "ARG0", "begin": 0, "end": 4},
                                    {"form": "책을", "label": "ARG1", "begin": 5, "end": 7}
                                ]
                            }
                        ]
                    },
                    {
                        "id": "X200818.2",
                        "form": "철수는 그 책을 읽었다.",
                        "word": [
                            {"id": 1, "form": "철수는", "begin": 0, "end": 3},
                            {"id": 2, "form": "그", "begin": 4, "end": 5},
                            {"id": 3, "form": "책을", "begin": 6, "end": 8},
                            {"id": 4, "form": "읽었다.", "begin": 9, "end": 13}
                        ],
                        "NE": [
                            {"id": 1, "form": "철수", "label": "PS_NAME", "begin": 0, "end": 2}
                        ]
                    }
                ],
                "CR": [
                    {
                        "mention": [
                            {"form": "책", "sentence_id": "X200818.1", "begin": 5, "end": 6, "NE_id": -1},
                            {"form": "책", "sentence_id": "X200818.2", "begin": 6, "end": 7, "NE_id": -1}
                        ]
                    }
                ],
                "ZA": [
                    {
                        "predicate": {"form": "읽었다", "sentence_id": "X200818.2", "begin": 9, "end": 12},
                        "antecedent": [
                            {"type": "subject", "form": "철수", "sentence_id": "X200818.2", "begin": 0, "end": 2}
                        ]
                    }
                ]
            }
        ]
    })
}

// =============================================================================
// Construction and traversal
// =============================================================================

#[test]
fn corpus_materializes_the_full_hierarchy() {
    let corpus = Corpus::from_value(&annotated_corpus()).unwrap();

    assert_eq!(corpus.id.as_deref(), Some("NIKL2020"));
    let metadata = corpus.metadata.as_ref().unwrap();
    assert_eq!(metadata.creator.as_deref(), Some("국립국어원"));
    assert_eq!(
        metadata.annotation_level.as_ref().map(Vec::len),
        Some(7)
    );

    let document = &corpus.document_list()[0];
    assert_eq!(document.id, "X200818");
    assert_eq!(
        document.metadata.as_ref().unwrap().date.as_deref(),
        Some("20200818")
    );
    assert_eq!(document.sentence_list().len(), 2);
}

#[test]
fn sentence_layers_are_populated_in_order() {
    let corpus = Corpus::from_value(&annotated_corpus()).unwrap();
    let sentence = &corpus.document_list()[0].sentence_list()[0];

    assert_eq!(sentence.word_list().len(), 3);
    assert_eq!(sentence.morpheme_list().len(), 8);
    assert_eq!(sentence.wsd_list().len(), 2);
    assert_eq!(sentence.srl_list().len(), 1);
    assert!(sentence.ne_list().is_empty(), "layer absent in sentence 1");

    let tagged: Vec<_> = sentence
        .morpheme_list()
        .iter()
        .take(3)
        .map(|m| m.tagged().to_string())
        .collect();
    assert_eq!(tagged, ["아이/NNG", "들/XSN", "이/JKS"]);

    let srl = &sentence.srl_list()[0];
    assert_eq!(srl.predicate.lemma, "읽다");
    assert_eq!(srl.argument[0].label, "ARG0");
    assert_eq!(srl.argument[0].range(), 0..4);
}

#[test]
fn dependency_parse_derives_root_and_heads() {
    let corpus = Corpus::from_value(&annotated_corpus()).unwrap();
    let sentence = &corpus.document_list()[0].sentence_list()[0];

    let dp = sentence.dp_list();
    assert_eq!(dp.len(), 3);
    assert_eq!(dp.heads(), [3, 3, -1]);
    assert_eq!(dp.root_word_id().unwrap(), 3);
    assert_eq!(dp[2].dependent, [1, 2]);
}

#[test]
fn document_level_layers_cross_sentences() {
    let corpus = Corpus::from_value(&annotated_corpus()).unwrap();
    let document = &corpus.document_list()[0];

    let chain = &document.cr_list()[0];
    assert_eq!(chain.mention.len(), 2);
    assert_eq!(chain.mention[0].sentence_id, "X200818.1");
    assert_eq!(chain.mention[1].sentence_id, "X200818.2");

    let za = &document.za_list()[0];
    assert_eq!(za.predicate.form, "읽었다");
    assert_eq!(za.antecedent[0].kind, "subject");
    assert_eq!(za.antecedent[0].form, "철수");
}

#[test]
fn named_entities_live_on_their_sentence() {
    let corpus = Corpus::from_value(&annotated_corpus()).unwrap();
    let sentence = &corpus.document_list()[0].sentence_list()[1];

    let ne = &sentence.ne_list()[0];
    assert_eq!(ne.to_string(), "철수/PS_NAME");
    assert_eq!(sentence.word_at(ne.begin()).unwrap().form, "철수는");
}

// =============================================================================
// Back-references and composite identifiers
// =============================================================================

#[test]
fn construction_wires_parent_references() {
    let corpus = Corpus::from_value(&annotated_corpus()).unwrap();
    let document = &corpus.document_list()[0];

    for sentence in document.sentence_list() {
        assert_eq!(sentence.document_id(), Some("X200818"));
        for word in sentence.word_list() {
            assert_eq!(word.sentence_id(), Some(sentence.id.as_str()));
        }
    }
}

#[test]
fn composite_identifiers_address_words_across_the_document() {
    let corpus = Corpus::from_value(&annotated_corpus()).unwrap();
    let document = &corpus.document_list()[0];
    assign_document_sentence_ids(document);

    let first = &document.sentence_list()[0];
    let second = &document.sentence_list()[1];

    assert_eq!(first.fwid().unwrap(), "X200818-0001-00001-00001");
    assert_eq!(second.fwid().unwrap(), "X200818-0001-00001-00002");

    assert_eq!(first.word_list()[1].gid().unwrap(), "X200818-0001-00001-00001_002");
    assert_eq!(second.word_list()[3].gid().unwrap(), "X200818-0001-00001-00002_004");

    assert_eq!(first.dsid().unwrap(), "s1");
    assert_eq!(second.dsid().unwrap(), "s2");
    assert_eq!(second.word_list()[2].dswid().unwrap(), "s2_3");
}

#[test]
fn word_at_works_on_every_sentence_of_the_tree() {
    let corpus = Corpus::from_value(&annotated_corpus()).unwrap();
    let second = &corpus.document_list()[0].sentence_list()[1];

    assert_eq!(second.word_at(0).unwrap().form, "철수는");
    assert_eq!(second.word_at(4).unwrap().form, "그");
    assert_eq!(second.word_at(7).unwrap().form, "책을");
    assert!(second.word_at(3).is_err(), "space between words");
}

// =============================================================================
// Error paths
// =============================================================================

#[test]
fn nested_structural_errors_name_the_missing_field() {
    let mut value = annotated_corpus();
    value["document"][0]["sentence"][0]["word"][1]
        .as_object_mut()
        .unwrap()
        .remove("begin");

    let err = Corpus::from_value(&value).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, Error::Structural { kind: "corpus", .. }));
    assert!(message.contains("begin"), "{message}");
}

#[test]
fn scalar_root_is_a_type_error() {
    let err = Document::from_value(&json!("document")).unwrap_err();
    assert!(matches!(err, Error::Type { found: "string", .. }));
}
