//! Reading and patching a document's frontmatter.
//!
//! [`MetadataStore`] is how the rest of the crate sees document metadata:
//! a parsed mapping plus the block's line extent, and an atomic
//! read-modify-write. [`FsMetadataStore`] implements it on top of any
//! [`AsyncFileSystem`] holding markdown files.

use std::path::{Path, PathBuf};

use crate::error::{CursorError, Result};
use crate::frontmatter::{self, Frontmatter};
use crate::fs::{AsyncFileSystem, BoxFuture};

/// Parsed frontmatter of one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    /// Frontmatter fields, in file order.
    pub frontmatter: Frontmatter,
    /// Lines taken by the block including both delimiters, 0 when there is no block.
    pub block_line_count: u32,
}

/// A mutation applied to a document's frontmatter during [`MetadataStore::update_metadata`].
pub type MetadataPatchFn<'a> = Box<dyn FnOnce(&mut Frontmatter) + Send + 'a>;

/// Source of document frontmatter.
pub trait MetadataStore: Send + Sync {
    /// Read the frontmatter of the document at `path`.
    fn read_metadata<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<DocumentMetadata>>;

    /// Apply `patch` to the document's frontmatter and write it back.
    ///
    /// Fields the patch does not touch are preserved.
    fn update_metadata<'a>(
        &'a self,
        path: &'a Path,
        patch: MetadataPatchFn<'a>,
    ) -> BoxFuture<'a, Result<()>>;
}

/// [`MetadataStore`] over markdown files with YAML frontmatter.
#[derive(Debug, Clone)]
pub struct FsMetadataStore<FS: AsyncFileSystem> {
    fs: FS,
    root: Option<PathBuf>,
}

impl<FS: AsyncFileSystem> FsMetadataStore<FS> {
    /// Create a store resolving document paths as given.
    pub fn new(fs: FS) -> Self {
        Self { fs, root: None }
    }

    /// Create a store resolving relative document paths against `root` (the vault directory).
    pub fn with_root(fs: FS, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: Some(root.into()),
        }
    }

    /// Get a reference to the underlying filesystem.
    pub fn fs(&self) -> &FS {
        &self.fs
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    async fn read_parsed(&self, path: &Path) -> Result<(String, frontmatter::ParsedFile)> {
        let content = self.read_content(path).await?;
        match frontmatter::parse_or_empty(&content) {
            Ok(parsed) => Ok((content, parsed)),
            Err(e) => {
                log::warn!("Invalid frontmatter in '{}': {}", path.display(), e);
                Err(CursorError::InvalidFrontmatter(path.to_path_buf()))
            }
        }
    }

    async fn read_content(&self, path: &Path) -> Result<String> {
        self.fs
            .read_to_string(path)
            .await
            .map_err(|e| CursorError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })
    }
}

impl<FS: AsyncFileSystem> MetadataStore for FsMetadataStore<FS> {
    fn read_metadata<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<DocumentMetadata>> {
        Box::pin(async move {
            let path = self.resolve(path);
            let (_, parsed) = self.read_parsed(&path).await?;
            Ok(DocumentMetadata {
                frontmatter: parsed.frontmatter,
                block_line_count: parsed.block_line_count,
            })
        })
    }

    fn update_metadata<'a>(
        &'a self,
        path: &'a Path,
        patch: MetadataPatchFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let path = self.resolve(path);
            let (content, mut parsed) = self.read_parsed(&path).await?;

            patch(&mut parsed.frontmatter);

            let updated = parsed.to_content()?;
            if updated == content {
                return Ok(());
            }

            self.fs
                .write_file(&path, &updated)
                .await
                .map_err(|e| CursorError::FileWrite {
                    path: path.clone(),
                    source: e,
                })?;
            log::debug!("Updated frontmatter of '{}'", path.display());
            Ok(())
        })
    }
}
