// starter-rs: environment-driven config templating and process starter
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Template file discovery and rendering.
//!
//! ```text
//! find_template_files(dir)      names ending in ".tmpl", sorted by name
//!
//! process_template(dir, "app.conf.tmpl", vars, force)
//!   strip suffix           --> "app.conf"      (InvalidTemplateName)
//!   follow symlink         --> the file the link points to is written
//!   destination exists?    --> !force: DestinationExists / force: warn
//!   read + compile         --> Read / Parse    (destination untouched)
//!   read-only destination  --> Create
//!   NamedTempFile in dir   --> Create
//!   render into temp       --> Unresolved / Render (temp removed)
//!   persist onto target    --> Write
//! ```

use bon::Builder;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use super::engine::Renderer;
use crate::core::vars::table::VarTable;
use crate::error::{FileError, StarterResult};

/// Suffix that marks a template file.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Renders the templates of one directory.
#[derive(Debug, Clone, Builder)]
pub struct TemplateProcessor {
    #[builder(into)]
    dir: PathBuf,
    #[builder(into, default = TEMPLATE_SUFFIX.to_string())]
    suffix: String,
    #[builder(default = false)]
    force: bool,
}

impl TemplateProcessor {
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    #[must_use]
    pub const fn force(&self) -> bool {
        self.force
    }

    /// The output name for `filename`, or `None` if it is not a template.
    #[must_use]
    pub fn target_name<'f>(&self, filename: &'f str) -> Option<&'f str> {
        filename
            .strip_suffix(self.suffix.as_str())
            .filter(|target| !target.is_empty())
    }

    /// Lists template file names in the directory, sorted by name.
    ///
    /// Every entry ending in the suffix is listed, including one named just
    /// the suffix, which [`Self::process_template`] then rejects.
    ///
    /// # Errors
    ///
    /// Returns `FileError::ReadDir` if the directory cannot be listed.
    pub fn find_template_files(&self) -> StarterResult<Vec<String>> {
        let read_dir_error = |source: std::io::Error| {
            error!(dir = %self.dir.display(), error = %source, "cannot read dir");
            FileError::ReadDir {
                path: self.dir.display().to_string(),
                source,
            }
        };

        let mut result = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(self.suffix.as_str()) {
                info!(template = %name, "found template");
                result.push(name);
            }
        }
        result.sort_unstable();
        Ok(result)
    }

    /// Renders `filename` into its target file next to it.
    ///
    /// The target is replaced atomically: output goes to a temporary file in
    /// the same directory, which is renamed onto the target only after a
    /// complete render.
    ///
    /// # Errors
    ///
    /// Returns a `FileError` for naming, existence and I/O failures and a
    /// `TemplateError` for parse and render failures.
    pub fn process_template(&self, filename: &str, vars: &VarTable) -> StarterResult<()> {
        let Some(target_name) = self.target_name(filename) else {
            error!(template = %filename, "error processing template: invalid template name");
            return Err(FileError::InvalidTemplateName {
                name: filename.to_string(),
            }
            .into());
        };

        let source_path = self.dir.join(filename);
        let target_path = self.dir.join(target_name);

        let write_path = resolve_destination(&target_path);
        let existing = fs::metadata(&write_path).ok();
        if existing.is_some() {
            if !self.force {
                error!(path = %target_path.display(), "error processing template: destination exists");
                return Err(FileError::DestinationExists {
                    path: target_path.display().to_string(),
                }
                .into());
            }
            warn!(path = %target_path.display(), "overwriting existing file");
        }

        let source = fs::read_to_string(&source_path).map_err(|source| {
            error!(path = %source_path.display(), error = %source, "error processing template");
            FileError::Read {
                path: source_path.display().to_string(),
                source,
            }
        })?;

        let mut renderer = Renderer::new(vars);
        renderer.compile(filename, &source).inspect_err(|e| {
            error!(template = %filename, error = %e, "error processing template");
        })?;

        if let Some(meta) = &existing
            && meta.permissions().readonly()
        {
            let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
            error!(path = %target_path.display(), error = %source, "error creating file");
            return Err(FileError::Create {
                path: target_path.display().to_string(),
                source,
            }
            .into());
        }

        let create_error = |source: std::io::Error| {
            error!(path = %target_path.display(), error = %source, "error creating file");
            FileError::Create {
                path: target_path.display().to_string(),
                source,
            }
        };

        let write_dir = write_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(self.dir.as_path());
        let mut temp = NamedTempFile::new_in(write_dir).map_err(create_error)?;
        renderer
            .render_to_write(filename, &source, temp.as_file_mut())
            .inspect_err(|e| {
                error!(template = %filename, error = %e, "error rendering template");
            })?;
        temp.as_file_mut().flush().map_err(create_error)?;

        let permissions = match &existing {
            Some(meta) => meta.permissions(),
            None => default_permissions(temp.as_file())?,
        };
        fs::set_permissions(temp.path(), permissions).map_err(create_error)?;

        temp.persist(&write_path).map_err(|e| {
            error!(path = %target_path.display(), error = %e.error, "cannot write file");
            FileError::Write {
                path: target_path.display().to_string(),
                source: e.error,
            }
        })?;

        debug!(template = %filename, target = %target_path.display(), "rendered");
        Ok(())
    }
}

/// The file actually written for `target`: the end of a symlink chain, or
/// the path itself when it is not a link.
///
/// A dangling link resolves to the file it names, which is then created.
fn resolve_destination(target: &Path) -> PathBuf {
    let is_link = fs::symlink_metadata(target).is_ok_and(|m| m.file_type().is_symlink());
    if !is_link {
        return target.to_path_buf();
    }

    fs::canonicalize(target).unwrap_or_else(|_| match fs::read_link(target) {
        Ok(link) => target.parent().map_or_else(|| link.clone(), |parent| parent.join(&link)),
        Err(_) => target.to_path_buf(),
    })
}

#[cfg(unix)]
fn default_permissions(_: &fs::File) -> StarterResult<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(file: &fs::File) -> StarterResult<fs::Permissions> {
    Ok(file.metadata()?.permissions())
}

/// Lists `*.tmpl` files in `dir`.
///
/// # Errors
///
/// Returns `FileError::ReadDir` if `dir` cannot be listed.
pub fn find_template_files(dir: impl AsRef<Path>) -> StarterResult<Vec<String>> {
    TemplateProcessor::builder()
        .dir(dir.as_ref())
        .build()
        .find_template_files()
}

/// Renders `dir/filename` (a `*.tmpl` file) into `dir/<filename without suffix>`.
///
/// # Errors
///
/// See [`TemplateProcessor::process_template`].
pub fn process_template(
    dir: impl AsRef<Path>,
    filename: &str,
    vars: &VarTable,
    force: bool,
) -> StarterResult<()> {
    TemplateProcessor::builder()
        .dir(dir.as_ref())
        .force(force)
        .build()
        .process_template(filename, vars)
}
