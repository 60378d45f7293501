use pretty_assertions::assert_eq;
use serde_json::json;
use zenpack_model::{
    LEVELS_KEY, ModelError, Pack, denormalize, normalize, parse_pack, to_pretty_json,
};

fn ids(pack: &Pack) -> Vec<u32> {
    pack.levels.iter().map(|l| l.level_id).collect()
}

// ── Accepted shapes ──────────────────────────────────────────────

#[test]
fn bare_array_is_wrapped_and_sorted() {
    let pack = normalize(json!([
        {"level_id": 2, "category": "Animals", "puzzles": []},
        {"level_id": 1, "category": "Food", "puzzles": []}
    ]))
    .unwrap();

    assert_eq!(ids(&pack), vec![1, 2]);
    assert_eq!(pack.levels[0].category, "Food");
    assert!(pack.extra.is_empty());
}

#[test]
fn wrapped_object_passes_through() {
    let pack = normalize(json!({
        "Levels": [
            {"level_id": 3, "category": "C", "subcategory": "c", "grid_size": 30,
             "puzzles": [{"word": "CAT", "riddle": "meows", "riddle_hard": "feline"}]}
        ]
    }))
    .unwrap();

    let level = &pack.levels[0];
    assert_eq!(level.level_id, 3);
    assert_eq!(level.subcategory(), "c");
    assert_eq!(level.grid_size(), Some(30));
    assert_eq!(level.puzzles[0].word, "CAT");
    assert_eq!(level.puzzles[0].riddle_hard, "feline");
}

#[test]
fn lowercase_levels_key_is_accepted() {
    let pack = normalize(json!({"levels": [{"level_id": 1}]})).unwrap();
    assert_eq!(ids(&pack), vec![1]);
    assert!(!pack.extra.contains_key("levels"));
}

#[test]
fn empty_array_yields_empty_pack() {
    let pack = normalize(json!([])).unwrap();
    assert!(pack.levels.is_empty());
}

#[test]
fn optional_fields_default() {
    let pack = normalize(json!([{"level_id": 7}])).unwrap();
    let level = &pack.levels[0];
    assert_eq!(level.category, "");
    assert_eq!(level.subcategory, None);
    assert_eq!(level.grid_size(), None);
    assert!(level.puzzles.is_empty());
}

#[test]
fn entry_without_hard_riddle_defaults_to_empty() {
    let pack = normalize(json!([
        {"level_id": 1, "puzzles": [{"word": "OWL", "riddle": "hoots"}]}
    ]))
    .unwrap();
    assert_eq!(pack.levels[0].puzzles[0].riddle_hard, "");
}

#[test]
fn null_hard_riddle_reads_as_empty() {
    let pack = normalize(json!([
        {"level_id": 1, "category": "A",
         "puzzles": [{"word": "CAT", "riddle": "meow", "riddle_hard": null}]}
    ]))
    .unwrap();
    let entry = &pack.levels[0].puzzles[0];
    assert_eq!(entry.word, "CAT");
    assert_eq!(entry.riddle_hard, "");
}

#[test]
fn null_category_and_puzzles_read_as_empty() {
    let pack = normalize(json!([
        {"level_id": 2, "category": null, "puzzles": null}
    ]))
    .unwrap();
    let level = &pack.levels[0];
    assert_eq!(level.category, "");
    assert!(level.puzzles.is_empty());
}

#[test]
fn entry_without_word_reads_as_empty() {
    let pack = normalize(json!([
        {"level_id": 1, "puzzles": [{"riddle": "x"}, {"word": null, "riddle": null}]}
    ]))
    .unwrap();
    let puzzles = &pack.levels[0].puzzles;
    assert_eq!(puzzles[0].word, "");
    assert_eq!(puzzles[0].riddle, "x");
    assert_eq!(puzzles[1].word, "");
    assert_eq!(puzzles[1].riddle, "");
}

#[test]
fn null_subcategory_and_grid_size_are_written_back() {
    let pack = parse_pack(
        r#"[{"level_id":1,"category":"A","subcategory":null,"grid_size":null,"puzzles":[]}]"#,
    )
    .unwrap();
    let level = &pack.levels[0];
    assert_eq!(level.subcategory(), "");
    assert_eq!(level.grid_size(), None);

    let value = denormalize(&pack).unwrap();
    let written = value[LEVELS_KEY][0].as_object().unwrap();
    assert_eq!(written.get("subcategory"), Some(&serde_json::Value::Null));
    assert_eq!(written.get("grid_size"), Some(&serde_json::Value::Null));
}

#[test]
fn absent_subcategory_and_grid_size_stay_absent() {
    let pack = parse_pack(r#"[{"level_id":1,"category":"A","puzzles":[]}]"#).unwrap();
    let value = denormalize(&pack).unwrap();
    let written = value[LEVELS_KEY][0].as_object().unwrap();
    assert!(!written.contains_key("subcategory"));
    assert!(!written.contains_key("grid_size"));
}

#[test]
fn unknown_keys_survive_round_trip() {
    let pack = normalize(json!({
        "Levels": [{"level_id": 1, "theme": "night", "puzzles": [{"word": "MOON", "riddle": "", "hint": 2}]}],
        "PackName": "Starter"
    }))
    .unwrap();

    assert_eq!(pack.extra["PackName"], "Starter");
    assert_eq!(pack.levels[0].extra["theme"], "night");
    assert_eq!(pack.levels[0].puzzles[0].extra["hint"], 2);

    let value = denormalize(&pack).unwrap();
    assert_eq!(value["PackName"], "Starter");
    assert_eq!(value["Levels"][0]["theme"], "night");
    assert_eq!(value["Levels"][0]["puzzles"][0]["hint"], 2);
}

#[test]
fn duplicate_ids_keep_relative_order() {
    let pack = normalize(json!([
        {"level_id": 2, "category": "first"},
        {"level_id": 1},
        {"level_id": 2, "category": "second"}
    ]))
    .unwrap();

    assert_eq!(ids(&pack), vec![1, 2, 2]);
    assert_eq!(pack.levels[1].category, "first");
    assert_eq!(pack.levels[2].category, "second");
}

// ── Rejected shapes ──────────────────────────────────────────────

#[test]
fn scalar_is_shape_error() {
    let err = normalize(json!(42)).unwrap_err();
    assert!(matches!(err, ModelError::Shape(_)));
}

#[test]
fn object_without_levels_is_shape_error() {
    let err = normalize(json!({"Packs": []})).unwrap_err();
    assert!(matches!(err, ModelError::Shape(_)));
    assert!(err.to_string().contains(LEVELS_KEY));
}

#[test]
fn levels_not_array_is_shape_error() {
    let err = normalize(json!({"Levels": {"level_id": 1}})).unwrap_err();
    assert!(matches!(err, ModelError::Shape(_)));
}

#[test]
fn record_without_id_is_shape_error() {
    let err = normalize(json!([{"category": "x"}])).unwrap_err();
    assert!(matches!(err, ModelError::Shape(_)));
}

#[test]
fn zero_id_is_shape_error() {
    let err = normalize(json!([{"level_id": 0}])).unwrap_err();
    assert!(matches!(err, ModelError::Shape(_)));
}

#[test]
fn negative_id_is_shape_error() {
    let err = normalize(json!([{"level_id": -3}])).unwrap_err();
    assert!(matches!(err, ModelError::Shape(_)));
}

// ── Text parsing and rendering ───────────────────────────────────

#[test]
fn invalid_json_text_is_parse_error() {
    let err = parse_pack("[{\"level_id\": 1,").unwrap_err();
    assert!(matches!(err, ModelError::Parse(_)));
}

#[test]
fn parse_pack_accepts_bare_array_text() {
    let pack = parse_pack(r#"[{"level_id":2},{"level_id":1}]"#).unwrap();
    assert_eq!(ids(&pack), vec![1, 2]);
}

#[test]
fn denormalize_always_wraps() {
    let pack = parse_pack(r#"[{"level_id":1}]"#).unwrap();
    let value = denormalize(&pack).unwrap();
    assert!(value.is_object());
    assert!(value[LEVELS_KEY].is_array());
}

#[test]
fn pretty_json_uses_two_space_indent() {
    let pack = parse_pack(r#"[{"level_id":1,"category":"A","puzzles":[]}]"#).unwrap();
    let text = to_pretty_json(&pack).unwrap();
    assert!(text.starts_with("{\n  \"Levels\": ["));
    assert!(text.contains("\n      \"level_id\": 1,"));
}

#[test]
fn pretty_json_field_order_matches_record_layout() {
    let pack = parse_pack(
        r#"{"Levels":[{"puzzles":[],"grid_size":25,"subcategory":"s","category":"c","level_id":1}]}"#,
    )
    .unwrap();
    let text = to_pretty_json(&pack).unwrap();
    let positions: Vec<usize> = ["level_id", "category", "subcategory", "grid_size", "puzzles"]
        .iter()
        .map(|k| text.find(&format!("\"{k}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}
