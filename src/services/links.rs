//! Outbound links and the resume download
//!
//! Every clickable thing in the portfolio resolves to a [`LinkTarget`]. URLs
//! and mail addresses are handed to the system opener (a new browser window
//! or the mail client); the resume is copied out of the asset directory into
//! the user's downloads under its suggested file name.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Something a link row or button points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// External page, opened in a new browsing context
    Url(String),
    /// Mail address, opened through `mailto:`
    Mail(String),
    /// The resume asset download
    Resume,
}

impl LinkTarget {
    /// The URI handed to the system opener, if this target is opened rather
    /// than downloaded.
    pub fn uri(&self) -> Option<String> {
        match self {
            LinkTarget::Url(url) => Some(url.clone()),
            LinkTarget::Mail(address) => Some(format!("mailto:{address}")),
            LinkTarget::Resume => None,
        }
    }
}

/// Opens URIs outside the application.
pub trait LinkOpener: std::fmt::Debug {
    fn open(&self, uri: &str) -> std::io::Result<()>;
}

/// Opens URIs with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, uri: &str) -> std::io::Result<()> {
        tracing::info!("Opening {}", uri);
        open::that_detached(uri)
    }
}

/// Records opened URIs instead of launching anything.
#[derive(Debug, Default, Clone)]
pub struct RecordingLinkOpener {
    opened: Rc<RefCell<Vec<String>>>,
}

impl RecordingLinkOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// URIs opened so far (shared between clones).
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl LinkOpener for RecordingLinkOpener {
    fn open(&self, uri: &str) -> std::io::Result<()> {
        self.opened.borrow_mut().push(uri.to_string());
        Ok(())
    }
}

/// Copies the resume asset into a downloads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDownload {
    pub source: PathBuf,
    pub dest_dir: PathBuf,
    pub file_name: String,
}

impl ResumeDownload {
    pub fn new(source: PathBuf, dest_dir: PathBuf, file_name: impl Into<String>) -> Self {
        Self {
            source,
            dest_dir,
            file_name: file_name.into(),
        }
    }

    /// Save the resume and return where it landed.
    ///
    /// An existing file is never overwritten; the copy gets a numbered name
    /// (`Resume (1).pdf`) instead.
    pub fn save(&self) -> Result<PathBuf> {
        if !self.source.is_file() {
            anyhow::bail!("resume asset not found at {}", self.source.display());
        }

        std::fs::create_dir_all(&self.dest_dir)
            .with_context(|| format!("creating {}", self.dest_dir.display()))?;

        let dest = unique_destination(&self.dest_dir, &self.file_name);
        std::fs::copy(&self.source, &dest).with_context(|| {
            format!(
                "copying {} to {}",
                self.source.display(),
                dest.display()
            )
        })?;

        tracing::info!("Saved resume to {}", dest.display());
        Ok(dest)
    }
}

/// First free path for `file_name` in `dir`, numbering duplicates.
fn unique_destination(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| dir.join(format!("{stem} ({n}){extension}")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
