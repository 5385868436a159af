use crate::batch::{Batch, Document, IncomingFile};
use crate::engine::AnalysisEngine;
use crate::error::Error;
use crate::matrix::SimilarityMatrix;
use crate::progress::ProgressReporter;
use crate::report::{self, ExportFormat};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// The result returned to the client layer: filenames in batch order plus
/// the matrix, with per-document failures surfaced alongside.
#[derive(Debug, Serialize)]
pub struct SimilarityReport {
    pub files: Vec<String>,
    pub matrix: SimilarityMatrix,
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub file: String,
    pub error: String,
}

/// Per-file outcome of an upload. Rejections never abort the rest of the
/// submission.
#[derive(Debug)]
pub struct AddOutcome {
    pub accepted: Vec<String>,
    pub rejected: Vec<(String, Error)>,
}

struct CachedReport {
    fingerprint: u64,
    report: Arc<SimilarityReport>,
}

struct SessionState {
    batch: Batch,
    cache: Option<CachedReport>,
}

/// One client's analysis session: the current batch and the most recently
/// computed matrix. All mutations serialize through the state lock; a
/// computation snapshots the batch, runs unlocked, and revalidates the
/// fingerprint before caching so a cached matrix always corresponds to the
/// batch it was computed from.
pub struct Session {
    state: Mutex<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Session {
        Session {
            state: Mutex::new(SessionState {
                batch: Batch::default(),
                cache: None,
            }),
        }
    }

    /// Append documents to the current batch. Files with an unsupported
    /// MIME type or a filename already in the batch are rejected
    /// individually; accepted files invalidate any cached matrix.
    pub fn add_documents(&self, files: Vec<IncomingFile>) -> Result<AddOutcome, Error> {
        if files.is_empty() {
            return Err(Error::NoFiles);
        }

        let mut state = self.lock();
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for file in files {
            let name = file.name.clone();
            let result = Document::admit(file).and_then(|doc| state.batch.add(doc));
            match result {
                Ok(()) => accepted.push(name),
                Err(err) => rejected.push((name, err)),
            }
        }

        if !accepted.is_empty() {
            state.cache = None;
        }

        Ok(AddOutcome { accepted, rejected })
    }

    /// Remove a document by filename, invalidating any cached matrix.
    /// Returns whether a document was removed.
    pub fn remove_document(&self, name: &str) -> bool {
        let mut state = self.lock();
        let removed = state.batch.remove(name);
        if removed {
            state.cache = None;
        }
        removed
    }

    /// Run the full pipeline over the current batch, or return the cached
    /// report when the batch fingerprint is unchanged. A cache hit returns
    /// the identical allocation, with no re-extraction or re-scoring.
    pub fn compute_similarity(
        &self,
        engine: &AnalysisEngine,
        reporter: &dyn ProgressReporter,
    ) -> Result<Arc<SimilarityReport>, Error> {
        let (snapshot, fingerprint) = {
            let state = self.lock();
            if state.batch.is_empty() {
                return Err(Error::NoFiles);
            }
            let fingerprint = state.batch.fingerprint();
            if let Some(cached) = &state.cache {
                if cached.fingerprint == fingerprint {
                    debug!("Returning cached matrix for fingerprint {:016x}", fingerprint);
                    return Ok(Arc::clone(&cached.report));
                }
            }
            (state.batch.snapshot(), fingerprint)
        };

        // Compute without holding the lock so mutations stay responsive.
        let outcome = engine.analyze(&snapshot, reporter)?;
        let report = Arc::new(SimilarityReport {
            files: outcome.files,
            matrix: outcome.matrix,
            failures: outcome
                .failures
                .into_iter()
                .map(|(file, error)| DocumentFailure {
                    file,
                    error: error.to_string(),
                })
                .collect(),
        });

        let mut state = self.lock();
        if state.batch.fingerprint() == fingerprint {
            state.cache = Some(CachedReport {
                fingerprint,
                report: Arc::clone(&report),
            });
        } else {
            // The batch changed while we were computing; the result is
            // still valid for its snapshot but must not be cached.
            debug!("Batch mutated during computation; result not cached");
        }

        Ok(report)
    }

    /// Render the last computed matrix for the current batch. Fails with
    /// `NoData` when nothing has been computed or the batch has changed
    /// since.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, Error> {
        let report = {
            let state = self.lock();
            if state.batch.is_empty() {
                return Err(Error::NoData);
            }
            let fingerprint = state.batch.fingerprint();
            match &state.cache {
                Some(cached) if cached.fingerprint == fingerprint => Arc::clone(&cached.report),
                _ => return Err(Error::NoData),
            }
        };

        report::render(&report, format)
    }

    /// Clear batch, cached matrix, and all derived artifacts. Idempotent.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.batch.clear();
        state.cache = None;
    }

    pub fn filenames(&self) -> Vec<String> {
        self.lock().batch.filenames()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().batch.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // A poisoned lock means a panic mid-mutation; propagating the
        // panic is the only sound option for in-memory state.
        self.state.lock().expect("session lock poisoned")
    }
}

/// Registry of independent client sessions. Each session's state is
/// isolated; the map only hands out handles.
#[derive(Default)]
pub struct SessionManager {
    sessions: DashMap<String, Arc<Session>>,
}

impl SessionManager {
    pub fn new() -> SessionManager {
        SessionManager {
            sessions: DashMap::new(),
        }
    }

    /// Fetch a session handle, creating the session on first use.
    pub fn session(&self, id: &str) -> Arc<Session> {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Session::new()))
            .clone()
    }

    /// Destroy a session outright. Unknown ids are a no-op.
    pub fn destroy(&self, id: &str) {
        self.sessions.remove(id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
