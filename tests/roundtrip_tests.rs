//! Round-trip guarantees: everything read from a corpus file — declared
//! fields, undeclared extras, absent keys, Korean text — comes back out
//! structurally identical.

use niklanson::{Corpus, Document, JsonRecord, Sentence};
use serde_json::{json, Value};

fn document_value() -> Value {
    json!({
        "id": "X200818",
        "metadata": {
            "title": "독서 기사",
            "topic": "문화"
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
                "NE": [
                    {"id": 1, "form": "아이들", "label": "CV_RELATION", "begin": 0, "end": 3}
                ]
            },
            {
                "id": "X200818.2",
                "form": "책이 좋다.",
                "word": [
                    {"id": 1, "form": "책이", "begin": 0, "end": 2},
                    {"id": 2, "form": "좋다.", "begin": 3, "end": 6}
                ]
            }
        ],
        "CR": [],
        "ZA": []
    })
}

#[test]
fn document_round_trips_structurally() {
    let original = document_value();
    let document = Document::from_value(&original).unwrap();
    assert_eq!(document.to_value().unwrap(), original);
}

#[test]
fn corpus_round_trips_structurally() {
    let original = json!({
        "id": "NIKL2020",
        "metadata": {"title": "말뭉치", "year": "2020"},
        "document": [document_value()]
    });
    let corpus = Corpus::from_value(&original).unwrap();
    assert_eq!(corpus.to_value().unwrap(), original);
}

#[test]
fn text_round_trip_parses_back_to_the_same_value() {
    let original = document_value();
    let document = Document::from_value(&original).unwrap();
    let text = document.to_json_text().unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, original);
}

#[test]
fn korean_text_is_never_escaped() {
    let document = Document::from_value(&document_value()).unwrap();
    let text = document.to_json_text().unwrap();
    assert!(text.contains("아이들이 책을 읽는다."), "{text}");
    assert!(!text.contains("\\u"), "non-ASCII must stay literal: {text}");
}

#[test]
fn undeclared_keys_survive_at_every_level() {
    let mut original = document_value();
    original["revision"] = json!(3);
    original["sentence"][0]["speaker"] = json!("나레이터");
    original["sentence"][0]["word"][0]["space"] = json!(true);

    let document = Document::from_value(&original).unwrap();
    assert_eq!(document.extra.get("revision"), Some(&json!(3)));

    let sentence = &document.sentence_list()[0];
    assert_eq!(sentence.extra.get("speaker"), Some(&json!("나레이터")));
    assert_eq!(
        sentence.word_list()[0].extra.get("space"),
        Some(&json!(true))
    );

    assert_eq!(document.to_value().unwrap(), original);
}

#[test]
fn absent_keys_stay_absent() {
    let original = json!({
        "id": "X200818.9",
        "form": "책이 좋다."
    });
    let sentence = Sentence::from_value(&original).unwrap();

    // Reads as empty…
    assert!(sentence.word_list().is_empty());
    assert!(sentence.ne_list().is_empty());

    // …but serializes without inventing keys.
    assert_eq!(sentence.to_value().unwrap(), original);
}

#[test]
fn present_empty_lists_are_kept() {
    let original = document_value();
    let document = Document::from_value(&original).unwrap();

    // "CR": [] was present in the input, so it must be present on output.
    let out = document.to_value().unwrap();
    assert_eq!(out["CR"], json!([]));
    assert_eq!(out["ZA"], json!([]));
}

#[test]
fn derived_state_does_not_leak_into_serialization() {
    let document = Document::from_value(&document_value()).unwrap();
    niklanson::assign_document_sentence_ids(&document);
    let sentence = &document.sentence_list()[0];
    sentence.word_at(0).unwrap();
    sentence.fwid().unwrap();

    // Caches and back-references are invisible on the wire.
    assert_eq!(document.to_value().unwrap(), document_value());
}
