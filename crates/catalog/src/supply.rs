// ABOUTME: Document supply: discovers saved listing pages on disk and decodes them to text.
// ABOUTME: Layout is <root>/<marketplace>/*.html; charset comes from BOM, UTF-8 check, meta tag, or detection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::error::{CatalogError, DocumentFailure};
use crate::marketplace::Marketplace;

/// Bytes scanned for a `<meta charset>` declaration.
const META_SNIFF_LEN: usize = 4096;

static META_CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).unwrap()
});

/// A snapshot file located on disk but not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub marketplace: Marketplace,
    pub path: PathBuf,
}

/// A snapshot decoded to text, ready for extraction.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub marketplace: Marketplace,
    pub path: PathBuf,
    pub html: String,
}

impl SourceDocument {
    /// Wraps in-memory HTML, e.g. for tests or stdin input.
    pub fn from_html(
        marketplace: Marketplace,
        path: impl Into<PathBuf>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            marketplace,
            path: path.into(),
            html: html.into(),
        }
    }
}

/// Lists `<root>/<dir_name>/*.html` for each marketplace, sorted by path.
///
/// A missing marketplace directory is skipped.
pub fn discover(root: &Path, marketplaces: &[Marketplace]) -> Result<Vec<DocumentRef>, CatalogError> {
    let mut refs = Vec::new();
    for &marketplace in marketplaces {
        let dir = root.join(marketplace.dir_name());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(%marketplace, dir = %dir.display(), "no snapshot directory, skipping");
                continue;
            }
            Err(e) => return Err(CatalogError::document(dir, e)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CatalogError::document(&dir, e))?.path();
            if !path.is_dir() && is_html(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        info!(%marketplace, files = paths.len(), "discovered snapshots");
        refs.extend(paths.into_iter().map(|path| DocumentRef { marketplace, path }));
    }
    Ok(refs)
}

/// Reads and decodes one snapshot.
pub fn load(doc: &DocumentRef) -> Result<SourceDocument, CatalogError> {
    let bytes = fs::read(&doc.path).map_err(|e| CatalogError::document(&doc.path, e))?;
    Ok(SourceDocument {
        marketplace: doc.marketplace,
        path: doc.path.clone(),
        html: decode_html(&bytes),
    })
}

/// Loads every snapshot, returning the loaded documents and the failures separately.
pub fn load_all(refs: &[DocumentRef]) -> (Vec<SourceDocument>, Vec<DocumentFailure>) {
    let mut docs = Vec::with_capacity(refs.len());
    let mut failures = Vec::new();
    for doc in refs {
        match load(doc) {
            Ok(loaded) => docs.push(loaded),
            Err(e) => {
                warn!(path = %doc.path.display(), error = %e, "skipping unreadable snapshot");
                failures.push(DocumentFailure {
                    path: doc.path.clone(),
                    error: e,
                });
            }
        }
    }
    (docs, failures)
}

/// Decodes HTML bytes: BOM first, then UTF-8, then a `<meta charset>` label, then detection.
pub fn decode_html(bytes: &[u8]) -> String {
    if let Some((encoding, _)) = encoding_rs::Encoding::for_bom(bytes) {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    if let Some(encoding) = meta_charset(bytes).and_then(|l| encoding_rs::Encoding::for_label(l.as_bytes())) {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(META_SNIFF_LEN)]);
    META_CHARSET_RE
        .captures(&head)
        .map(|caps| caps[1].to_string())
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html"))
        .unwrap_or(false)
}
