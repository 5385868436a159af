use crate::error::Error;
use crate::extract::DocumentFormat;
use std::hash::Hasher as _;
use std::sync::Arc;
use twox_hash::XxHash64;

/// A raw file as submitted by the client layer: declared name, declared
/// MIME type, raw bytes.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// An admitted document. Identity is the original filename, unique within
/// its batch. The content hash is computed once at admission so batch
/// fingerprints stay cheap to recompute on every mutation.
#[derive(Debug)]
pub struct Document {
    pub name: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
    pub content_hash: u64,
}

impl Document {
    /// Admit a raw file, rejecting MIME types outside the accepted set.
    pub fn admit(file: IncomingFile) -> Result<Document, Error> {
        let format =
            DocumentFormat::from_mime(&file.mime).ok_or_else(|| Error::UnsupportedFormat {
                name: file.name.clone(),
                mime: file.mime.clone(),
            })?;

        let content_hash = hash_bytes(&file.bytes);
        Ok(Document {
            name: file.name,
            format,
            bytes: file.bytes,
            content_hash,
        })
    }
}

/// The ordered set of documents submitted together. Order is stable and
/// determines matrix row/column order.
#[derive(Debug, Default)]
pub struct Batch {
    docs: Vec<Arc<Document>>,
}

impl Batch {
    pub fn add(&mut self, doc: Document) -> Result<(), Error> {
        if self.docs.iter().any(|existing| existing.name == doc.name) {
            return Err(Error::DuplicateFilename { name: doc.name });
        }
        self.docs.push(Arc::new(doc));
        Ok(())
    }

    /// Remove by filename. Returns whether a document was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.docs.len();
        self.docs.retain(|doc| doc.name != name);
        self.docs.len() != before
    }

    pub fn clear(&mut self) {
        self.docs.clear();
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn filenames(&self) -> Vec<String> {
        self.docs.iter().map(|doc| doc.name.clone()).collect()
    }

    /// Cheap snapshot of the current membership for an unlocked computation.
    pub fn snapshot(&self) -> Vec<Arc<Document>> {
        self.docs.clone()
    }

    /// Content fingerprint of the batch: one hash over the ordered
    /// (filename, byte length, content hash) list. Any membership or
    /// content change produces a different fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        for doc in &self.docs {
            hasher.write(doc.name.as_bytes());
            hasher.write_u8(0xff);
            hasher.write_u64(doc.bytes.len() as u64);
            hasher.write_u64(doc.content_hash);
        }
        hasher.finish()
    }
}

fn hash_bytes(data: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(data);
    hasher.finish()
}
