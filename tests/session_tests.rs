use docsim::similarity::PairScore;
use docsim::{
    AnalysisEngine, AppConfig, Error, ExportFormat, IncomingFile, Session, SessionManager,
    SilentReporter, SimilarityReport,
};
use std::sync::Arc;

fn text_file(name: &str, body: &str) -> IncomingFile {
    IncomingFile {
        name: name.to_string(),
        mime: "text/plain".to_string(),
        bytes: body.as_bytes().to_vec(),
    }
}

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(AppConfig::default())
}

fn compute(session: &Session, engine: &AnalysisEngine) -> Arc<SimilarityReport> {
    session.compute_similarity(engine, &SilentReporter).unwrap()
}

#[test]
fn test_add_documents_empty_submission_is_no_files() {
    let session = Session::new();
    let err = session.add_documents(Vec::new()).unwrap_err();
    assert!(matches!(err, Error::NoFiles));
}

#[test]
fn test_duplicate_filename_rejected_batch_unchanged() {
    let session = Session::new();
    session
        .add_documents(vec![text_file("a.txt", "first version")])
        .unwrap();

    let outcome = session
        .add_documents(vec![text_file("a.txt", "second version")])
        .unwrap();
    assert!(outcome.accepted.is_empty());
    assert_eq!(outcome.rejected.len(), 1);
    assert!(matches!(
        outcome.rejected[0].1,
        Error::DuplicateFilename { .. }
    ));
    assert_eq!(session.filenames(), vec!["a.txt".to_string()]);
}

#[test]
fn test_rejection_does_not_abort_rest_of_submission() {
    let session = Session::new();
    let outcome = session
        .add_documents(vec![
            text_file("a.txt", "alpha"),
            IncomingFile {
                name: "pic.png".to_string(),
                mime: "image/png".to_string(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            },
            text_file("b.txt", "beta"),
        ])
        .unwrap();

    assert_eq!(outcome.accepted, vec!["a.txt".to_string(), "b.txt".to_string()]);
    assert_eq!(outcome.rejected.len(), 1);
    assert!(matches!(
        outcome.rejected[0].1,
        Error::UnsupportedFormat { .. }
    ));
}

#[test]
fn test_compute_on_empty_session_is_no_files() {
    let session = Session::new();
    let err = session
        .compute_similarity(&engine(), &SilentReporter)
        .unwrap_err();
    assert!(matches!(err, Error::NoFiles));
}

#[test]
fn test_unchanged_batch_returns_cached_allocation() {
    let session = Session::new();
    session
        .add_documents(vec![
            text_file("a.txt", "the cat sat on the mat"),
            text_file("b.txt", "the dog sat on the rug"),
        ])
        .unwrap();

    let engine = engine();
    let first = compute(&session, &engine);
    let second = compute(&session, &engine);

    // Cache hit: the very same allocation, not merely an equal matrix.
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_adding_a_document_invalidates_cache() {
    let session = Session::new();
    session
        .add_documents(vec![text_file("a.txt", "alpha beta gamma")])
        .unwrap();

    let engine = engine();
    let first = compute(&session, &engine);
    assert_eq!(first.files.len(), 1);

    session
        .add_documents(vec![text_file("b.txt", "alpha beta gamma")])
        .unwrap();
    let second = compute(&session, &engine);

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.files.len(), 2);
    assert_eq!(second.matrix.get(0, 1), PairScore::Percent(100));
}

#[test]
fn test_removing_a_document_invalidates_cache() {
    let session = Session::new();
    session
        .add_documents(vec![
            text_file("a.txt", "alpha beta gamma"),
            text_file("b.txt", "delta epsilon zeta"),
        ])
        .unwrap();

    let engine = engine();
    let first = compute(&session, &engine);
    assert_eq!(first.files.len(), 2);

    assert!(session.remove_document("b.txt"));
    let second = compute(&session, &engine);
    assert_eq!(second.files, vec!["a.txt".to_string()]);
    assert_eq!(second.matrix.size(), 1);
}

#[test]
fn test_remove_unknown_document_reports_false() {
    let session = Session::new();
    session
        .add_documents(vec![text_file("a.txt", "alpha")])
        .unwrap();
    assert!(!session.remove_document("missing.txt"));
    // Nothing changed, so the cache survives.
    let engine = engine();
    let first = compute(&session, &engine);
    assert!(!session.remove_document("missing.txt"));
    let second = compute(&session, &engine);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_export_before_compute_is_no_data() {
    let session = Session::new();
    session
        .add_documents(vec![text_file("a.txt", "alpha beta gamma")])
        .unwrap();

    let err = session.export(ExportFormat::Spreadsheet).unwrap_err();
    assert!(matches!(err, Error::NoData));
}

#[test]
fn test_export_after_mutation_is_no_data() {
    let session = Session::new();
    session
        .add_documents(vec![text_file("a.txt", "alpha beta gamma")])
        .unwrap();
    compute(&session, &engine());

    session
        .add_documents(vec![text_file("b.txt", "delta epsilon zeta")])
        .unwrap();
    let err = session.export(ExportFormat::Csv).unwrap_err();
    assert!(matches!(err, Error::NoData));
}

#[test]
fn test_reset_clears_everything_and_is_idempotent() {
    let session = Session::new();
    session
        .add_documents(vec![text_file("a.txt", "alpha beta gamma")])
        .unwrap();
    compute(&session, &engine());

    session.reset();
    assert!(session.is_empty());
    assert!(matches!(
        session.export(ExportFormat::Spreadsheet),
        Err(Error::NoData)
    ));

    // Reset of an already-empty session is fine.
    session.reset();
    assert!(session.is_empty());
}

#[test]
fn test_sessions_are_isolated() {
    let manager = SessionManager::new();
    let left = manager.session("left");
    let right = manager.session("right");

    left.add_documents(vec![text_file("a.txt", "alpha")]).unwrap();
    assert_eq!(left.filenames().len(), 1);
    assert!(right.is_empty());

    // Same id returns the same session.
    let left_again = manager.session("left");
    assert_eq!(left_again.filenames().len(), 1);

    manager.destroy("left");
    assert!(manager.session("left").is_empty());
}
