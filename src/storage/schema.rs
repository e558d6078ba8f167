//! Database schema definitions

/// Child rows are cleaned up by cascading deletes, so this must run first
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON";

/// Fixed primary key of the single dictionary_info row
pub const DICTIONARY_INFO_ID: i64 = 1;

/// SQL to create the dictionary_info table
pub const CREATE_DICTIONARY_INFO_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS dictionary_info (
    id INTEGER PRIMARY KEY,
    version TEXT,
    languages TEXT,
    common_only INTEGER,
    dict_date TEXT,
    dict_revisions TEXT
)
"#;

/// SQL to create the tags table
pub const CREATE_TAGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tags (
    key TEXT PRIMARY KEY,
    description TEXT
)
"#;

/// SQL to create the words table
pub const CREATE_WORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS words (
    id TEXT PRIMARY KEY
)
"#;

/// SQL to create the kanji table
pub const CREATE_KANJI_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS kanji (
    kanji_id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_id TEXT NOT NULL,
    common INTEGER,
    text TEXT NOT NULL,
    tags TEXT NOT NULL,
    FOREIGN KEY (word_id) REFERENCES words(id) ON DELETE CASCADE
)
"#;

/// SQL to create the kana table
pub const CREATE_KANA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS kana (
    kana_id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_id TEXT NOT NULL,
    common INTEGER,
    text TEXT NOT NULL,
    tags TEXT NOT NULL,
    applies_to_kanji TEXT NOT NULL,
    FOREIGN KEY (word_id) REFERENCES words(id) ON DELETE CASCADE
)
"#;

/// SQL to create the sense table
/// Every list column holds an encoded list, `[]` when empty
pub const CREATE_SENSE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sense (
    sense_id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_id TEXT NOT NULL,
    part_of_speech TEXT NOT NULL,
    applies_to_kanji TEXT NOT NULL,
    applies_to_kana TEXT NOT NULL,
    related TEXT NOT NULL,
    antonym TEXT NOT NULL,
    field TEXT NOT NULL,
    dialect TEXT NOT NULL,
    misc TEXT NOT NULL,
    info TEXT NOT NULL,
    language_source TEXT NOT NULL,
    FOREIGN KEY (word_id) REFERENCES words(id) ON DELETE CASCADE
)
"#;

/// SQL to create the gloss table
pub const CREATE_GLOSS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS gloss (
    gloss_id INTEGER PRIMARY KEY AUTOINCREMENT,
    sense_id INTEGER NOT NULL,
    lang TEXT NOT NULL,
    gender TEXT,
    type TEXT,
    text TEXT NOT NULL,
    FOREIGN KEY (sense_id) REFERENCES sense(sense_id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_words_id ON words(id)",
    "CREATE INDEX IF NOT EXISTS idx_kanji_word_id ON kanji(word_id)",
    "CREATE INDEX IF NOT EXISTS idx_kana_word_id ON kana(word_id)",
    "CREATE INDEX IF NOT EXISTS idx_sense_word_id ON sense(word_id)",
    "CREATE INDEX IF NOT EXISTS idx_gloss_sense_id ON gloss(sense_id)",
];

/// Tables in creation order (parents before children)
pub const TABLES: &[&str] = &[
    "dictionary_info",
    "tags",
    "words",
    "kanji",
    "kana",
    "sense",
    "gloss",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_DICTIONARY_INFO_TABLE,
        CREATE_TAGS_TABLE,
        CREATE_WORDS_TABLE,
        CREATE_KANJI_TABLE,
        CREATE_KANA_TABLE,
        CREATE_SENSE_TABLE,
        CREATE_GLOSS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
