use storage::{JsonFileStore, SessionRecord, SessionStore};
use tempfile::TempDir;

fn record(points: u64) -> SessionRecord {
    SessionRecord {
        user_id: Some("user_f00".into()),
        display_name: Some("Sam".into()),
        team: Some("Liverpool".into()),
        points: Some(points),
    }
}

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join("session.json"))
}

#[tokio::test]
async fn missing_file_loads_as_no_session() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&record(42)).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(record(42)));
}

#[tokio::test]
async fn save_replaces_the_whole_record() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(&record(42)).await.unwrap();
    store.save(&record(77)).await.unwrap();

    assert_eq!(store.load().await.unwrap(), Some(record(77)));
    // only the target file remains, no stray temp file
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["session.json"]);
}

#[tokio::test]
async fn unparseable_file_loads_as_no_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, b"{not json at all").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn missing_fields_load_but_do_not_restore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, br#"{"user_id":"user_f00","points":10}"#).unwrap();

    let store = JsonFileStore::new(&path);
    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.user_id.as_deref(), Some("user_f00"));
    assert!(loaded.into_session().is_none());
}

#[tokio::test]
async fn clear_removes_the_file_and_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.clear().await.unwrap();

    store.save(&record(42)).await.unwrap();
    store.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested").join("deep").join("session.json"));

    store.save(&record(1)).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(record(1)));
}
