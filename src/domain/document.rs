use regex::bytes::Regex;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;
use thiserror::Error;

pub const MIN_ZOOM: u16 = 50;
pub const MAX_ZOOM: u16 = 200;
pub const ZOOM_STEP: u16 = 10;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Please select a PDF file: {0}")]
    NotPdf(PathBuf),
    #[error("Could not read document: {0}")]
    Io(#[from] std::io::Error),
}

/// An opened PDF plus its viewer state
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub pages: u32,
    pub page: u32,
    pub zoom: u16,
    pub rotation: u16,
}

impl Document {
    fn same_file(&self, name: &str, size: u64, modified: Option<SystemTime>) -> bool {
        self.name == name && self.size == size && self.modified == modified
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page.clamp(1, self.pages.max(1));
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = (self.rotation + 90) % 360;
    }

    pub fn reset_view(&mut self) {
        self.zoom = 100;
        self.rotation = 0;
    }
}

/// Documents opened this session
#[derive(Debug, Default)]
pub struct DocumentShelf {
    pub documents: Vec<Document>,
    pub current: Option<usize>,
}

impl DocumentShelf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a PDF, re-selecting it if the same file is already on the shelf
    pub fn open(&mut self, path: &Path) -> Result<usize, DocumentError> {
        if !path.is_file() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }
        let meta = fs::metadata(path)?;
        let has_pdf_ext = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !has_pdf_ext && !has_pdf_header(path)? {
            return Err(DocumentError::NotPdf(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let size = meta.len();
        let modified = meta.modified().ok();

        if let Some(idx) = self
            .documents
            .iter()
            .position(|d| d.same_file(&name, size, modified))
        {
            self.current = Some(idx);
            return Ok(idx);
        }

        let pages = count_pages(&fs::read(path)?);
        self.documents.push(Document {
            path: path.to_path_buf(),
            name,
            size,
            modified,
            pages,
            page: 1,
            zoom: 100,
            rotation: 0,
        });
        let idx = self.documents.len() - 1;
        self.current = Some(idx);
        Ok(idx)
    }

    pub fn current(&self) -> Option<&Document> {
        self.current.and_then(|i| self.documents.get(i))
    }

    pub fn current_mut(&mut self) -> Option<&mut Document> {
        self.current.and_then(move |i| self.documents.get_mut(i))
    }

    pub fn select(&mut self, index: usize) {
        if index < self.documents.len() {
            self.current = Some(index);
        }
    }

    /// Stop viewing; the shelf keeps its documents
    pub fn close(&mut self) {
        self.current = None;
    }
}

fn has_pdf_header(path: &Path) -> Result<bool, DocumentError> {
    let mut buf = [0u8; 5];
    let mut file = fs::File::open(path)?;
    let n = file.read(&mut buf)?;
    Ok(n == 5 && &buf == b"%PDF-")
}

static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/Type\s*/Page\b").unwrap());

/// Estimate the page count from `/Type /Page` objects (at least 1)
pub fn count_pages(bytes: &[u8]) -> u32 {
    (PAGE_RE.find_iter(bytes).count() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const TWO_PAGES: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n\
2 0 obj << /Type /Pages /Kids [3 0 R 4 0 R] /Count 2 >> endobj\n\
3 0 obj << /Type /Page /Parent 2 0 R >> endobj\n\
4 0 obj << /Type/Page /Parent 2 0 R >> endobj\n%%EOF";

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_count_pages() {
        assert_eq!(count_pages(TWO_PAGES), 2);
        assert_eq!(count_pages(b"not a pdf"), 1);
    }

    #[test]
    fn test_open_rejects_missing_and_non_pdf() {
        let dir = tempdir().unwrap();
        let mut shelf = DocumentShelf::new();
        assert!(matches!(
            shelf.open(&dir.path().join("nope.pdf")),
            Err(DocumentError::NotFound(_))
        ));
        let txt = write_file(dir.path(), "notes.txt", b"hello");
        assert!(matches!(shelf.open(&txt), Err(DocumentError::NotPdf(_))));
    }

    #[test]
    fn test_open_accepts_pdf_header_without_extension() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "paper", TWO_PAGES);
        let mut shelf = DocumentShelf::new();
        shelf.open(&path).unwrap();
        assert_eq!(shelf.current().unwrap().pages, 2);
    }

    #[test]
    fn test_open_same_file_is_deduplicated() {
        let dir = tempdir().unwrap();
        let a = write_file(dir.path(), "a.pdf", TWO_PAGES);
        let b = write_file(dir.path(), "b.pdf", b"%PDF-1.4 /Type /Page");
        let mut shelf = DocumentShelf::new();
        assert_eq!(shelf.open(&a).unwrap(), 0);
        assert_eq!(shelf.open(&b).unwrap(), 1);
        assert_eq!(shelf.open(&a).unwrap(), 0);
        assert_eq!(shelf.documents.len(), 2);
        assert_eq!(shelf.current, Some(0));

        shelf.close();
        assert!(shelf.current().is_none());
        assert_eq!(shelf.documents.len(), 2);
    }

    #[test]
    fn test_viewer_controls() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "a.pdf", TWO_PAGES);
        let mut shelf = DocumentShelf::new();
        shelf.open(&path).unwrap();
        let doc = shelf.current_mut().unwrap();

        doc.prev_page();
        assert_eq!(doc.page, 1);
        doc.next_page();
        doc.next_page();
        assert_eq!(doc.page, 2);

        for _ in 0..20 {
            doc.zoom_in();
        }
        assert_eq!(doc.zoom, MAX_ZOOM);
        for _ in 0..20 {
            doc.zoom_out();
        }
        assert_eq!(doc.zoom, MIN_ZOOM);

        doc.rotate_clockwise();
        doc.rotate_clockwise();
        doc.rotate_clockwise();
        assert_eq!(doc.rotation, 270);
        doc.rotate_clockwise();
        assert_eq!(doc.rotation, 0);
    }
}
