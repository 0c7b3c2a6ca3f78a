use moslingva_core::{Archive, ArchiveConfig, ArchiveError, EntryFields, GlyphKind, Point, Polyline};
use std::path::Path;

fn archive_exporting_to(dir: &Path) -> Archive {
    let config = ArchiveConfig {
        export_dir: dir.to_path_buf(),
        ..ArchiveConfig::default()
    };
    Archive::open(config).unwrap()
}

#[test]
fn lexicon_json_export_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let archive = archive_exporting_to(dir.path());
    archive
        .save_word(&EntryFields::new("Dua", "deux", "two", "DU-A").with_category("Nombres"))
        .unwrap();
    archive
        .save_word(&EntryFields::new("Cink", "cinq", "five", "CINK").with_category("Nombres"))
        .unwrap();

    let words = archive.load_words().unwrap();
    let path = archive.export_to_json("lexique", &words).unwrap();
    assert_eq!(path, dir.path().join("lexique.json"));

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let headwords = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["headword"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(headwords, vec!["Cink", "Dua"]);
}

#[test]
fn svg_export_writes_document_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let archive = archive_exporting_to(dir.path());
    let polyline = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]).unwrap();
    let document = archive
        .save_drawn_character(GlyphKind::Vowel, "OU", &polyline)
        .unwrap();

    let path = archive.export_to_svg(&document, "glyph OU").unwrap();
    assert_eq!(path.file_name().unwrap(), "glyph_OU.svg");
    assert_eq!(std::fs::read_to_string(path).unwrap(), document);
}

#[test]
fn non_svg_document_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let archive = archive_exporting_to(dir.path());

    let err = archive.export_to_svg("<html></html>", "page").unwrap_err();
    assert!(matches!(err, ArchiveError::Validation(_)));
    assert!(!dir.path().join("page.svg").exists());
}

#[test]
fn pdf_export_produces_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let archive = archive_exporting_to(dir.path());
    archive
        .add_grammar_note("Pluriel", "Ajouter -ai.", Some("Noms"))
        .unwrap();

    let notes = archive.list_grammar_notes().unwrap();
    let path = archive.export_to_pdf("grammaire.pdf", &notes).unwrap();
    assert_eq!(path.file_name().unwrap(), "grammaire.pdf");

    let bytes = std::fs::read(path).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("%PDF-1.4"));
    assert!(text.contains("Pluriel"));
    assert!(text.trim_end().ends_with("%%EOF"));
}

#[test]
fn unwritable_export_directory_reports_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let archive = archive_exporting_to(&blocker);

    let err = archive.export_to_json("lexique", &Vec::<u8>::new()).unwrap_err();
    assert_eq!(err.code(), "storage_unavailable");
}
