use search_cli::{
    build_server, collect_files, load_documents, resolve_stop_words, run_find, run_ids, run_match, Filter, STOP_WORDS_ENV,
};
use search_core::DocumentStatus;
use std::fs;
use tempfile::tempdir;

fn write_corpus(dir: &std::path::Path) {
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(
        dir.join("a.jsonl"),
        concat!(
            r#"{"id": 12, "text": "белый кот и модный ошейник", "ratings": [1]}"#,
            "\n\n",
            r#"{"id": 4, "text": "пушистый кот пушистый хвост", "status": "ACTUAL", "ratings": [12, 1, 5]}"#,
            "\n",
        ),
    )
    .unwrap();
    fs::write(
        dir.join("nested/b.json"),
        r#"[{"id": 42, "text": "ухоженный пёс выразительные глаза", "status": "BANNED", "ratings": [-2, 5, 3]}]"#,
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "not a corpus file").unwrap();
}

#[test]
fn loads_corpus_directory() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());

    let files = collect_files(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    let docs = load_documents(dir.path()).unwrap();
    assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![12, 4, 42]);
    assert_eq!(docs[0].status, DocumentStatus::Actual);
    assert_eq!(docs[2].status, DocumentStatus::Banned);
}

#[test]
fn find_match_and_ids() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let docs = load_documents(dir.path()).unwrap();
    let server = build_server("и в на", &docs).unwrap();

    let resp = run_find(&server, "пушистый ухоженный кот", None).unwrap();
    assert_eq!(resp.results.iter().map(|d| d.id).collect::<Vec<_>>(), vec![4, 12]);

    let resp = run_find(&server, "пушистый ухоженный кот", Some(Filter::Status(DocumentStatus::Banned))).unwrap();
    assert_eq!(resp.results.iter().map(|d| d.id).collect::<Vec<_>>(), vec![42]);

    let resp = run_find(&server, "пушистый ухоженный кот", Some(Filter::MinRating(2))).unwrap();
    assert_eq!(resp.results.iter().map(|d| d.id).collect::<Vec<_>>(), vec![4, 42]);

    let m = run_match(&server, "кот -хвост белый", 12).unwrap();
    assert_eq!(m.words, vec!["белый", "кот"]);
    assert_eq!(m.status, DocumentStatus::Actual);

    let ids = run_ids(&server).unwrap();
    assert_eq!(ids.document_count, 3);
    assert_eq!(ids.ids, vec![12, 4, 42]);

    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["status"], "ACTUAL");
}

#[test]
fn engine_errors_surface() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("dup.jsonl");
    fs::write(&file, "{\"id\": 1, \"text\": \"a\"}\n{\"id\": 1, \"text\": \"b\"}\n").unwrap();
    let docs = load_documents(&file).unwrap();
    let err = build_server("", &docs).unwrap_err();
    assert!(format!("{err:#}").contains("already exists"));

    let server = build_server("", &docs[..1]).unwrap();
    assert!(run_find(&server, "--a", None).is_err());
    assert!(run_match(&server, "a", 7).is_err());
}

#[test]
fn rejects_malformed_json() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad.jsonl");
    fs::write(&file, "{\"id\": \"x\"}\n").unwrap();
    assert!(load_documents(&file).is_err());
}

#[test]
fn missing_input_path_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-corpus");
    let err = collect_files(&missing).unwrap_err();
    assert!(err.to_string().contains("neither a file nor a directory"));
    assert!(load_documents(&missing).is_err());
}

#[test]
fn unreadable_line_reports_location() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("latin1.jsonl");
    fs::write(&file, b"{\"id\": 1, \"text\": \"a\"}\n\xff\xfe\n").unwrap();
    let err = load_documents(&file).unwrap_err();
    assert!(format!("{err:#}").contains("latin1.jsonl:2"), "{err:#}");
}

// Only test touching SEARCH_STOP_WORDS, so no other test races on it.
#[test]
fn stop_words_from_flag_or_env() {
    std::env::set_var(STOP_WORDS_ENV, "in the");
    assert_eq!(resolve_stop_words(Some("и в на".to_string())), "и в на");
    let from_env = resolve_stop_words(None);
    assert_eq!(from_env, "in the");

    std::env::remove_var(STOP_WORDS_ENV);
    assert_eq!(resolve_stop_words(None), "");

    let dir = tempdir().unwrap();
    let file = dir.path().join("docs.jsonl");
    fs::write(&file, "{\"id\": 42, \"text\": \"cat in the city\"}\n").unwrap();
    let docs = load_documents(&file).unwrap();

    let server = build_server(&from_env, &docs).unwrap();
    assert!(run_find(&server, "in the", None).unwrap().results.is_empty());
    assert_eq!(run_find(&server, "cat", None).unwrap().results.len(), 1);

    let server = build_server(&resolve_stop_words(None), &docs).unwrap();
    assert_eq!(run_find(&server, "in", None).unwrap().results.len(), 1);
}
