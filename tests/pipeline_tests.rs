use docx_rs::{Docx, Paragraph, Run};
use docsim::similarity::PairScore;
use docsim::{
    AnalysisEngine, AppConfig, IncomingFile, Session, SilentReporter, SimilarityReport,
};
use std::fs;
use std::io::Cursor;
use std::sync::Arc;

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

fn text_file(name: &str, body: &str) -> IncomingFile {
    IncomingFile {
        name: name.to_string(),
        mime: "text/plain".to_string(),
        bytes: body.as_bytes().to_vec(),
    }
}

fn docx_file(name: &str, paragraphs: &[&str]) -> IncomingFile {
    let mut docx = Docx::new();
    for paragraph in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*paragraph)));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).unwrap();

    IncomingFile {
        name: name.to_string(),
        mime: DOCX_MIME.to_string(),
        bytes: buffer.into_inner(),
    }
}

fn compute(files: Vec<IncomingFile>) -> Arc<SimilarityReport> {
    compute_with(files, AppConfig::default())
}

fn compute_with(files: Vec<IncomingFile>, config: AppConfig) -> Arc<SimilarityReport> {
    let session = Session::new();
    session.add_documents(files).unwrap();
    session
        .compute_similarity(&AnalysisEngine::new(config), &SilentReporter)
        .unwrap()
}

#[test]
fn test_identical_text_documents_score_100() {
    let report = compute(vec![
        text_file("A.txt", "the cat sat"),
        text_file("B.txt", "the cat sat"),
    ]);

    assert_eq!(report.files, vec!["A.txt".to_string(), "B.txt".to_string()]);
    for row in 0..2 {
        for col in 0..2 {
            assert_eq!(report.matrix.get(row, col), PairScore::Percent(100));
        }
    }
    assert!(report.failures.is_empty());
}

#[test]
fn test_disjoint_vocabularies_score_0() {
    let report = compute(vec![
        text_file("A.txt", "alpha beta gamma"),
        text_file("B.txt", "delta epsilon zeta"),
    ]);

    assert_eq!(report.matrix.get(0, 0), PairScore::Percent(100));
    assert_eq!(report.matrix.get(1, 1), PairScore::Percent(100));
    assert_eq!(report.matrix.get(0, 1), PairScore::Percent(0));
    assert_eq!(report.matrix.get(1, 0), PairScore::Percent(0));
}

#[test]
fn test_matrix_diagonal_and_symmetry() {
    let report = compute(vec![
        text_file("a.txt", "the quick brown fox jumps over the lazy dog"),
        text_file("b.txt", "the quick brown fox naps beside the lazy dog"),
        text_file("c.txt", "entirely unrelated words about cooking pasta"),
    ]);

    let n = report.files.len();
    for i in 0..n {
        assert_eq!(report.matrix.get(i, i), PairScore::Percent(100));
        for j in 0..n {
            assert_eq!(report.matrix.get(i, j), report.matrix.get(j, i));
        }
    }
}

#[test]
fn test_case_and_punctuation_do_not_affect_scores() {
    let report = compute(vec![
        text_file("plain.txt", "the cat sat on the mat"),
        text_file("shouty.txt", "THE CAT... SAT, ON THE MAT!!!"),
    ]);
    assert_eq!(report.matrix.get(0, 1), PairScore::Percent(100));
}

#[test]
fn test_punctuation_only_documents_are_trivially_identical() {
    // Extraction sees non-whitespace characters, so these are not empty
    // documents; they normalize to empty shingle sets, which score 100
    // against each other and 0 against anything with content.
    let report = compute(vec![
        text_file("stars.txt", "*** *** ***"),
        text_file("dashes.txt", "--- --- ---"),
        text_file("words.txt", "actual words in here"),
    ]);

    assert_eq!(report.matrix.get(0, 1), PairScore::Percent(100));
    assert_eq!(report.matrix.get(0, 2), PairScore::Percent(0));
    assert_eq!(report.matrix.get(1, 2), PairScore::Percent(0));
    assert!(report.failures.is_empty());
}

#[test]
fn test_docx_and_plain_text_with_same_words_score_100() {
    let report = compute(vec![
        docx_file("essay.docx", &["the cat sat", "on the mat"]),
        text_file("essay.txt", "the cat sat on the mat"),
    ]);

    assert!(report.failures.is_empty(), "failures: {:?}", report.failures);
    assert_eq!(report.matrix.get(0, 1), PairScore::Percent(100));
}

#[test]
fn test_corrupt_pdf_degrades_to_unavailable_not_zero() {
    let report = compute(vec![
        IncomingFile {
            name: "broken.pdf".to_string(),
            mime: "application/pdf".to_string(),
            bytes: b"this is not a pdf at all".to_vec(),
        },
        text_file("a.txt", "alpha beta gamma"),
        text_file("b.txt", "alpha beta gamma"),
    ]);

    // The bad file degrades its own pairs only.
    assert_eq!(report.matrix.get(0, 1), PairScore::Unavailable);
    assert_eq!(report.matrix.get(0, 2), PairScore::Unavailable);
    assert_eq!(report.matrix.get(1, 2), PairScore::Percent(100));
    // Diagonal stays fixed at 100 even for the failed document.
    assert_eq!(report.matrix.get(0, 0), PairScore::Percent(100));

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file, "broken.pdf");
}

#[test]
fn test_whitespace_only_document_fails_as_empty() {
    let report = compute(vec![
        text_file("blank.txt", "   \n\t  "),
        text_file("a.txt", "alpha beta gamma"),
    ]);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file, "blank.txt");
    assert_eq!(report.matrix.get(0, 1), PairScore::Unavailable);
}

#[test]
fn test_oversized_document_fails_with_resource_exceeded() {
    let config = AppConfig {
        max_file_bytes: 16,
        ..AppConfig::default()
    };
    let report = compute_with(
        vec![
            text_file("big.txt", "this body is definitely longer than sixteen bytes"),
            text_file("small.txt", "tiny"),
        ],
        config,
    );

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file, "big.txt");
    assert!(report.failures[0].error.contains("size limit"));
    assert_eq!(report.matrix.get(0, 1), PairScore::Unavailable);
}

#[test]
fn test_shingle_size_affects_overlap() {
    // Shared vocabulary but no shared three-word phrase: n=3 scores 0,
    // n=1 (bag of words) scores above 0.
    let files = || {
        vec![
            text_file("a.txt", "red green blue"),
            text_file("b.txt", "blue red green purple"),
        ]
    };

    let trigram = compute_with(files(), AppConfig::default());
    assert_eq!(trigram.matrix.get(0, 1), PairScore::Percent(0));

    let unigram_config = AppConfig {
        shingle_size: 1,
        ..AppConfig::default()
    };
    let unigram = compute_with(files(), unigram_config);
    assert_eq!(unigram.matrix.get(0, 1), PairScore::Percent(75));
}

#[test]
fn test_batch_loaded_from_disk() {
    use std::io::Write;

    let tmp = tempfile::tempdir().unwrap();
    let path_a = tmp.path().join("a.txt");
    let path_b = tmp.path().join("b.txt");
    fs::File::create(&path_a)
        .unwrap()
        .write_all(b"the cat sat on the mat")
        .unwrap();
    fs::File::create(&path_b)
        .unwrap()
        .write_all(b"the cat sat on the mat")
        .unwrap();

    let files: Vec<IncomingFile> = [&path_a, &path_b]
        .iter()
        .map(|path| IncomingFile {
            name: path.file_name().unwrap().to_string_lossy().into_owned(),
            mime: "text/plain".to_string(),
            bytes: fs::read(path).unwrap(),
        })
        .collect();

    let report = compute(files);
    assert_eq!(report.matrix.get(0, 1), PairScore::Percent(100));
}

#[test]
fn test_json_shape_of_report() {
    let report = compute(vec![
        IncomingFile {
            name: "broken.pdf".to_string(),
            mime: "application/pdf".to_string(),
            bytes: b"nope".to_vec(),
        },
        text_file("a.txt", "alpha beta gamma"),
    ]);

    let json = serde_json::to_value(report.as_ref()).unwrap();
    assert_eq!(json["files"][0], "broken.pdf");
    // Unavailable serializes as null, distinct from 0.
    assert!(json["matrix"][0][1].is_null());
    assert_eq!(json["matrix"][0][0], 100);
    assert_eq!(json["failures"][0]["file"], "broken.pdf");
}
