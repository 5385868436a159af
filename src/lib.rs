pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod logging;
pub mod matrix;
pub mod normalize;
pub mod progress;
pub mod report;
pub mod session;
pub mod similarity;

pub use batch::IncomingFile;
pub use config::AppConfig;
pub use engine::{AnalysisEngine, AnalysisOutcome};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use report::ExportFormat;
pub use session::{Session, SessionManager, SimilarityReport};
