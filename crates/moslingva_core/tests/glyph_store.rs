use moslingva_core::db::open_db_in_memory;
use moslingva_core::{
    CanvasSize, GlyphDraft, GlyphKind, GlyphRepository, GlyphService, GlyphServiceError, Point,
    Polyline, RepoError, SqliteGlyphRepository, StrokeError,
};

const DOC_1: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 400 400"><path d="M 0 0 L 10 10"/></svg>"#;
const DOC_2: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 400 400"><path d="M 5 5 L 20 40"/></svg>"#;

fn draft(kind: GlyphKind, symbol: &str, doc: &str) -> GlyphDraft {
    GlyphDraft::new(kind, symbol, doc).unwrap()
}

#[test]
fn upsert_with_identical_input_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGlyphRepository::try_new(&conn).unwrap();

    repo.upsert_glyph(&draft(GlyphKind::Consonant, "B", DOC_1))
        .unwrap();
    conn.execute("UPDATE glyphs SET updated_at = 1000, created_at = 1000;", [])
        .unwrap();
    let first = repo.list_glyphs().unwrap();

    repo.upsert_glyph(&draft(GlyphKind::Consonant, "B", DOC_1))
        .unwrap();
    let second = repo.list_glyphs().unwrap();

    assert_eq!(first, second);
    assert_eq!(second.len(), 1);
}

#[test]
fn resaving_symbol_with_other_kind_replaces_single_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGlyphRepository::try_new(&conn).unwrap();

    repo.upsert_glyph(&draft(GlyphKind::Consonant, "B", DOC_1))
        .unwrap();
    repo.upsert_glyph(&draft(GlyphKind::Vowel, "B", DOC_2)).unwrap();

    let glyphs = repo.list_glyphs().unwrap();
    let matching = glyphs
        .iter()
        .filter(|glyph| glyph.symbol == "B")
        .collect::<Vec<_>>();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].kind, GlyphKind::Vowel);
    assert_eq!(matching[0].vector_document, DOC_2);
}

#[test]
fn changed_upsert_refreshes_updated_at_and_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGlyphRepository::try_new(&conn).unwrap();

    repo.upsert_glyph(&draft(GlyphKind::Digit, "7", DOC_1)).unwrap();
    conn.execute("UPDATE glyphs SET updated_at = 5, created_at = 5;", [])
        .unwrap();

    repo.upsert_glyph(&draft(GlyphKind::Digit, "7", DOC_2)).unwrap();

    let glyph = repo.get_glyph("7").unwrap().unwrap();
    assert_eq!(glyph.created_at, 5);
    assert!(glyph.updated_at > 5);
    assert_eq!(glyph.vector_document, DOC_2);
}

#[test]
fn list_orders_by_kind_then_symbol() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGlyphRepository::try_new(&conn).unwrap();

    for (kind, symbol) in [
        (GlyphKind::Vowel, "OU"),
        (GlyphKind::Digit, "7"),
        (GlyphKind::Consonant, "Z"),
        (GlyphKind::Vowel, "A"),
        (GlyphKind::Consonant, "B"),
        (GlyphKind::Digit, "0"),
    ] {
        repo.upsert_glyph(&draft(kind, symbol, DOC_1)).unwrap();
    }

    let order = repo
        .list_glyphs()
        .unwrap()
        .into_iter()
        .map(|glyph| glyph.symbol)
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["B", "Z", "0", "7", "A", "OU"]);
}

#[test]
fn service_rejects_blank_input_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGlyphRepository::try_new(&conn).unwrap();
    let service = GlyphService::new(repo, CanvasSize::default());

    let err = service.save_glyph(GlyphKind::Vowel, "  ", DOC_1).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    let err = service.save_glyph(GlyphKind::Vowel, "A", "").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert!(service.list_glyphs().unwrap().is_empty());
}

#[test]
fn save_stroke_serializes_with_configured_canvas() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGlyphRepository::try_new(&conn).unwrap();
    let canvas = CanvasSize {
        width: 200,
        height: 100,
    };
    let service = GlyphService::new(repo, canvas);
    let stroke = Polyline::new(vec![Point::new(10.0, 10.0), Point::new(190.0, 90.0)]).unwrap();

    let document = service
        .save_stroke(GlyphKind::Consonant, "K", &stroke)
        .unwrap();
    assert!(document.contains(r#"viewBox="0 0 200 100""#));
    assert!(document.contains(r#"d="M 10 10 L 190 90""#));

    let stored = service.get_glyph("K").unwrap().unwrap();
    assert_eq!(stored.vector_document, document);
}

#[test]
fn save_stroke_rejects_zero_canvas_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGlyphRepository::try_new(&conn).unwrap();
    let service = GlyphService::new(
        repo,
        CanvasSize {
            width: 0,
            height: 0,
        },
    );
    let stroke = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap();

    let err = service
        .save_stroke(GlyphKind::Digit, "1", &stroke)
        .unwrap_err();
    assert!(matches!(
        err,
        GlyphServiceError::Stroke(StrokeError::InvalidCanvas { .. })
    ));
    assert!(service.get_glyph("1").unwrap().is_none());
}

#[test]
fn alphabet_progress_counts_catalog_symbols_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGlyphRepository::try_new(&conn).unwrap();
    let service = GlyphService::new(repo, CanvasSize::default());

    service.save_glyph(GlyphKind::Consonant, "B", DOC_1).unwrap();
    service.save_glyph(GlyphKind::Vowel, "OU", DOC_1).unwrap();
    service.save_glyph(GlyphKind::Consonant, "Q", DOC_1).unwrap();

    let progress = service.alphabet_progress().unwrap();
    assert_eq!(progress.total, 32);
    assert_eq!(progress.completed, 2);
    assert_eq!(progress.missing.len(), 30);
    assert_eq!(progress.missing[0], (GlyphKind::Consonant, "D".to_string()));
    assert!(!progress
        .missing
        .iter()
        .any(|(_, symbol)| symbol == "OU" || symbol == "B"));
}
