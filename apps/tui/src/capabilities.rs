//! Optional host features, injected so screens can check availability first.

use crate::api::LegalNotice;
use crate::domain::Issue;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("{0} is not supported in this terminal")]
    Unavailable(&'static str),

    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait VoiceInput: Send + Sync {
    fn is_available(&self) -> bool;

    /// Blocks until a transcript is available.
    fn listen(&self) -> Result<String, CapabilityError>;
}

/// Terminals have no microphone access.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVoiceInput;

impl VoiceInput for NoVoiceInput {
    fn is_available(&self) -> bool {
        false
    }

    fn listen(&self) -> Result<String, CapabilityError> {
        Err(CapabilityError::Unavailable("Voice input"))
    }
}

pub trait NoticeExporter: Send + Sync {
    fn is_available(&self) -> bool;

    fn export(&self, issue: &Issue, notice: &LegalNotice) -> Result<PathBuf, CapabilityError>;
}

/// Writes legal notices as markdown files under `dir`.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn content(issue: &Issue, notice: &LegalNotice, date: &str) -> String {
        format!(
            r#"---
issue_id: "{}"
title: "{}"
category: "{}"
department: "{}"
source_file: "{}"
date: {}
---

# Legal Notice: {}

**Location**: {}
**Severity**: {}/10

{}
"#,
            issue.id,
            issue.title,
            issue.category,
            issue.department,
            notice.filename,
            date,
            issue.title,
            issue.location.address,
            issue.severity,
            notice.preview_text
        )
    }
}

impl NoticeExporter for MarkdownExporter {
    fn is_available(&self) -> bool {
        true
    }

    fn export(&self, issue: &Issue, notice: &LegalNotice) -> Result<PathBuf, CapabilityError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let sanitized_id = issue.id.replace(['/', '\\', ' '], "-");
        let path = self.dir.join(format!("{date}-issue-{sanitized_id}.md"));

        let mut file = fs::File::create(&path)?;
        file.write_all(Self::content(issue, notice, &date).as_bytes())?;

        log::info!("legal notice for issue {} written to {}", issue.id, path.display());
        Ok(path)
    }
}

/// What this host can do beyond plain rendering.
pub struct Capabilities {
    pub voice: Box<dyn VoiceInput>,
    pub exporter: Box<dyn NoticeExporter>,
}

impl Capabilities {
    pub fn detect(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            voice: Box::new(NoVoiceInput),
            exporter: Box::new(MarkdownExporter::new(export_dir)),
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("voice", &self.voice.is_available())
            .field("exporter", &self.exporter.is_available())
            .finish()
    }
}
