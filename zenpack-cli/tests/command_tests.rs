use pretty_assertions::assert_eq;
use std::sync::Arc;
use zenpack_cli::{Command, run};
use zenpack_model::EntryField;
use zenpack_sync::{Credential, MemoryStore, PackLocation, PackSync, SyncConfig};

const PACK: &str = "en/pack_1.json";

const SEED: &str = r#"{"Levels":[
    {"level_id":2,"category":"Sea","subcategory":"Fish","puzzles":[]},
    {"level_id":1,"category":"Animals","subcategory":"Birds","puzzles":[
        {"word":"OWL","riddle":"Hoots at night","riddle_hard":"Athena's bird"}
    ]}
]}"#;

async fn setup() -> (Arc<MemoryStore>, PackSync) {
    let store = Arc::new(MemoryStore::new());
    store.seed_text(PACK, SEED).await;
    let engine = PackSync::new(store.clone(), SyncConfig::default());
    (store, engine)
}

async fn exec(engine: &PackSync, command: Command) -> anyhow::Result<String> {
    let mut out = Vec::new();
    run(
        &command,
        engine,
        PackLocation::new("en", "pack_1.json"),
        &Credential::new("secret"),
        &mut out,
    )
    .await?;
    Ok(String::from_utf8(out).unwrap())
}

fn stored(text: Option<String>) -> serde_json::Value {
    serde_json::from_str(&text.unwrap()).unwrap()
}

// ── Read-only commands ───────────────────────────────────────────

#[tokio::test]
async fn levels_lists_sorted() {
    let (store, engine) = setup().await;
    let out = exec(&engine, Command::Levels).await.unwrap();

    assert_eq!(
        out,
        "1\tAnimals/Birds\t1 puzzles\n2\tSea/Fish\t0 puzzles\n"
    );
    assert!(store.commits().await.is_empty());
}

#[tokio::test]
async fn show_prints_puzzles() {
    let (_store, engine) = setup().await;
    let out = exec(&engine, Command::Show { level: 1 }).await.unwrap();

    assert_eq!(
        out,
        "1\tAnimals/Birds\t1 puzzles\n  [0] OWL | Hoots at night | Athena's bird\n"
    );
}

#[tokio::test]
async fn show_missing_level_fails() {
    let (_store, engine) = setup().await;
    let err = exec(&engine, Command::Show { level: 7 }).await.unwrap_err();
    assert!(err.to_string().contains('7'));
}

#[tokio::test]
async fn packs_falls_back_to_default() {
    let (_store, engine) = setup().await;
    let out = exec(&engine, Command::Packs).await.unwrap();
    assert_eq!(out, "pack_1.json\n");
}

// ── Edits ────────────────────────────────────────────────────────

#[tokio::test]
async fn set_entry_commits_pack_and_version() {
    let (store, engine) = setup().await;
    let out = exec(
        &engine,
        Command::SetEntry {
            level: 1,
            index: 0,
            field: EntryField::Word,
            value: "raven".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("set word of entry 0 in level 1\nsaved at revision "));
    assert!(out.ends_with("version 1\n"));

    let pack = stored(store.read_text(PACK).await);
    assert_eq!(pack["Levels"][0]["level_id"], 1);
    assert_eq!(pack["Levels"][0]["puzzles"][0]["word"], "RAVEN");
    assert_eq!(store.read_text("version.txt").await.as_deref(), Some("1"));
}

#[tokio::test]
async fn create_level_keeps_order() {
    let (store, engine) = setup().await;
    exec(&engine, Command::CreateLevel { level: 5 }).await.unwrap();
    exec(&engine, Command::CreateLevel { level: 3 }).await.unwrap();

    let pack = stored(store.read_text(PACK).await);
    let ids: Vec<u64> = pack["Levels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["level_id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 5]);
    assert_eq!(pack["Levels"][2]["category"], "New");
    assert_eq!(store.read_text("version.txt").await.as_deref(), Some("2"));
}

#[tokio::test]
async fn duplicate_level_writes_nothing() {
    let (store, engine) = setup().await;
    let err = exec(&engine, Command::CreateLevel { level: 2 }).await.unwrap_err();

    assert!(err.to_string().contains('2'));
    assert!(store.commits().await.is_empty());
}

#[tokio::test]
async fn add_then_remove_entry() {
    let (store, engine) = setup().await;
    let out = exec(&engine, Command::AddEntry { level: 2 }).await.unwrap();
    assert!(out.starts_with("added entry 0 to level 2\n"));

    let out = exec(&engine, Command::RemoveEntry { level: 2, index: 0 })
        .await
        .unwrap();
    assert!(out.starts_with("removed entry 0 (NEW) from level 2\n"));

    let pack = stored(store.read_text(PACK).await);
    assert_eq!(pack["Levels"][1]["puzzles"], serde_json::json!([]));
}

#[tokio::test]
async fn remove_out_of_range_fails() {
    let (store, engine) = setup().await;
    assert!(
        exec(&engine, Command::RemoveEntry { level: 1, index: 4 })
            .await
            .is_err()
    );
    assert!(store.commits().await.is_empty());
}

#[tokio::test]
async fn set_meta_updates_category() {
    let (store, engine) = setup().await;
    let out = exec(
        &engine,
        Command::SetMeta {
            level: 2,
            category: "Ocean".to_string(),
            subcategory: "Whales".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(out.starts_with("level 2 is now Ocean/Whales\n"));

    let pack = stored(store.read_text(PACK).await);
    assert_eq!(pack["Levels"][1]["category"], "Ocean");
    assert_eq!(pack["Levels"][1]["subcategory"], "Whales");
}

#[tokio::test]
async fn version_failure_is_a_warning() {
    let (store, engine) = setup().await;
    store.seed_text("version.txt", "abc").await;

    let out = exec(&engine, Command::AddEntry { level: 1 }).await.unwrap();
    assert!(out.contains("warning: version not updated"));
    assert_eq!(store.read_text("version.txt").await.as_deref(), Some("abc"));
}

#[tokio::test]
async fn bump_version_alone() {
    let (store, engine) = setup().await;
    store.seed_text("version.txt", "41").await;

    let out = exec(&engine, Command::BumpVersion).await.unwrap();
    assert_eq!(out, "version 42\n");
    assert_eq!(store.commits().await, vec!["Update version to 42".to_string()]);
}

#[tokio::test]
async fn missing_token_fails_before_any_write() {
    let (store, engine) = setup().await;
    let mut out = Vec::new();
    let result = run(
        &Command::AddEntry { level: 1 },
        &engine,
        PackLocation::new("en", "pack_1.json"),
        &Credential::default(),
        &mut out,
    )
    .await;

    assert!(result.is_err());
    assert!(store.commits().await.is_empty());
}
