use jmdict_sqlite::{
    ConvertOptions, Converter, DbStats, DictionaryDocument, DictionaryStore, EncodedList, Error,
};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "version": "3.5.0",
    "languages": ["eng", "ger"],
    "commonOnly": false,
    "dictDate": "2024-05-01",
    "dictRevisions": ["1.09", "1.08"],
    "tags": {"v1": "Ichidan verb", "vt": "transitive verb", "n": "noun (common) (futsuumeishi)"},
    "words": [
        {
            "id": "1358280",
            "kanji": [{"common": true, "text": "食べる", "tags": []}, {"common": false, "text": "喰べる", "tags": ["iK"]}],
            "kana": [{"common": true, "text": "たべる", "tags": [], "appliesToKanji": ["*"]}],
            "sense": [
                {"partOfSpeech": ["v1", "vt"], "gloss": [
                    {"lang": "eng", "gender": null, "type": null, "text": "to eat"},
                    {"lang": "ger", "gender": null, "type": null, "text": "essen"}
                ]},
                {"partOfSpeech": ["v1", "vt"], "misc": ["col"], "gloss": [
                    {"lang": "eng", "type": "figurative", "text": "to live on (e.g. a salary)"}
                ]}
            ]
        },
        {
            "id": "1467640",
            "kanji": [{"common": true, "text": "猫", "tags": []}],
            "kana": [{"common": true, "text": "ねこ", "tags": [], "appliesToKanji": []}],
            "sense": [{"partOfSpeech": ["n"], "related": [["猫車", 1]], "gloss": [{"lang": "eng", "text": "cat"}]}]
        }
    ]
}"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn write_input(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("jmdict.db")
    }
}

fn convert(db: &Path, input: &Path, options: ConvertOptions) -> jmdict_sqlite::Result<()> {
    let mut store = DictionaryStore::open(db)?;
    let doc = DictionaryDocument::from_path(input)?;
    Converter::new(options).convert(&mut store, &doc)?;
    Ok(())
}

fn stats(db: &Path) -> DbStats {
    DictionaryStore::open(db).unwrap().stats().unwrap()
}

#[test]
fn test_convert_to_file_and_reopen() {
    let fixture = Fixture::new();
    let input = fixture.write_input("jmdict.json", SNAPSHOT);
    let db = fixture.db_path();

    convert(&db, &input, ConvertOptions::default()).unwrap();

    let stats = stats(&db);
    assert_eq!(stats.dictionary_info, 1);
    assert_eq!(stats.tags, 3);
    assert_eq!(stats.words, 2);
    assert_eq!(stats.kanji, 3);
    assert_eq!(stats.kana, 2);
    assert_eq!(stats.senses, 3);
    assert_eq!(stats.glosses, 4);

    let store = DictionaryStore::open(&db).unwrap();
    let (languages, revisions): (EncodedList<String>, EncodedList<String>) = store
        .connection()
        .query_row("SELECT languages, dict_revisions FROM dictionary_info WHERE id = 1", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(languages.into_inner(), vec!["eng", "ger"]);
    assert_eq!(revisions.into_inner(), vec!["1.09", "1.08"]);

    let kind: Option<String> = store
        .connection()
        .query_row("SELECT type FROM gloss WHERE text LIKE 'to live on%'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(kind.as_deref(), Some("figurative"));
}

#[test]
fn test_rerun_without_fresh_fails_and_keeps_data() {
    let fixture = Fixture::new();
    let input = fixture.write_input("jmdict.json", SNAPSHOT);
    let db = fixture.db_path();

    convert(&db, &input, ConvertOptions::default()).unwrap();
    let before = stats(&db);

    let err = convert(&db, &input, ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::DuplicateWord(ref id) if id == "1358280"));
    assert_eq!(stats(&db), before);
}

#[test]
fn test_fresh_rerun_against_existing_file() {
    let fixture = Fixture::new();
    let input = fixture.write_input("jmdict.json", SNAPSHOT);
    let db = fixture.db_path();

    convert(&db, &input, ConvertOptions::default()).unwrap();
    let before = stats(&db);

    convert(&db, &input, ConvertOptions { fresh: true }).unwrap();
    assert_eq!(stats(&db), before);
}

#[test]
fn test_malformed_document_writes_nothing() {
    let fixture = Fixture::new();
    let broken = SNAPSHOT.replace(r#""text": "猫", "#, "");
    let input = fixture.write_input("broken.json", &broken);
    let db = fixture.db_path();

    let err = convert(&db, &input, ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Document(_)));

    let stats = stats(&db);
    assert_eq!(stats, DbStats::default());
}

#[test]
fn test_missing_gloss_lang_writes_nothing() {
    let fixture = Fixture::new();
    let broken = SNAPSHOT.replace(r#"{"lang": "eng", "text": "cat"}"#, r#"{"text": "cat"}"#);
    assert_ne!(broken, SNAPSHOT);
    let input = fixture.write_input("broken.json", &broken);
    let db = fixture.db_path();

    let err = convert(&db, &input, ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Document(_)));
    assert!(err.to_string().contains("lang"));
    assert_eq!(stats(&db), DbStats::default());
}

#[test]
fn test_null_tag_description_is_stored_as_null() {
    let fixture = Fixture::new();
    let nullable = SNAPSHOT.replace(r#""vt": "transitive verb""#, r#""vt": null"#);
    let input = fixture.write_input("jmdict.json", &nullable);
    let db = fixture.db_path();

    convert(&db, &input, ConvertOptions::default()).unwrap();

    let store = DictionaryStore::open(&db).unwrap();
    let description: Option<String> = store
        .connection()
        .query_row("SELECT description FROM tags WHERE key = 'vt'", [], |row| row.get(0))
        .unwrap();
    assert!(description.is_none());
    assert_eq!(store.stats().unwrap().tags, 3);
}

#[test]
fn test_missing_input_file() {
    let fixture = Fixture::new();
    let err = DictionaryDocument::from_path(&fixture.dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_cascade_survives_reopen() {
    let fixture = Fixture::new();
    let input = fixture.write_input("jmdict.json", SNAPSHOT);
    let db = fixture.db_path();
    convert(&db, &input, ConvertOptions::default()).unwrap();

    // Foreign keys are per connection; a fresh connection must still cascade.
    let store = DictionaryStore::open(&db).unwrap();
    assert!(store.delete_word("1358280").unwrap());

    let stats = store.stats().unwrap();
    assert_eq!(stats.words, 1);
    assert_eq!(stats.kanji, 1);
    assert_eq!(stats.kana, 1);
    assert_eq!(stats.senses, 1);
    assert_eq!(stats.glosses, 1);
}

// ========== Command line ==========

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jmdict-sqlite"))
}

#[test]
fn test_cli_requires_two_arguments() {
    let output = cli().arg("only-one.json").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_cli_converts() {
    let fixture = Fixture::new();
    let input = fixture.write_input("jmdict.json", SNAPSHOT);
    let db = fixture.dir.path().join("out").join("jmdict.db");

    let output = cli()
        .current_dir(fixture.dir.path())
        .arg("--quiet")
        .arg(&input)
        .arg(&db)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stats(&db).words, 2);
}

#[test]
fn test_cli_reports_failure() {
    let fixture = Fixture::new();
    let duplicated = SNAPSHOT.replace("1467640", "1358280");
    let input = fixture.write_input("dup.json", &duplicated);
    let db = fixture.db_path();

    let output = cli()
        .current_dir(fixture.dir.path())
        .arg("--quiet")
        .arg(&input)
        .arg(&db)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stats(&db), DbStats::default());
}

#[test]
fn test_cli_failure_is_reported_once() {
    let fixture = Fixture::new();
    let duplicated = SNAPSHOT.replace("1467640", "1358280");
    let input = fixture.write_input("dup.json", &duplicated);
    let db = fixture.db_path();

    let output = cli()
        .current_dir(fixture.dir.path())
        .env_remove("JMDICT_SQLITE_QUIET")
        .env_remove("RUST_LOG")
        .arg(&input)
        .arg(&db)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Error converting").count(), 1);
}
