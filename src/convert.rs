//! File-level conversion of text inputs into numbered PDF outputs.
//!
//! Output files are named after the output path with a one-based index inserted before the
//! extension: `report.pdf` becomes `report.1.pdf`, `report.2.pdf`, and so on.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::cleanup::{self, CleanupOptions};
use crate::error::{Error, Result};
use crate::model::Document;
use crate::paginator::Paginator;
use crate::render::{PdfRenderer, Renderer};

const PDF_EXTENSION: &str = "pdf";
const TEXT_EXTENSION: &str = "txt";

/// A file written by the converter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenFile {
    /// Destination path.
    pub path: PathBuf,
    /// Number of pages in the file.
    pub pages: usize,
    /// Size of the file in bytes.
    pub bytes: usize,
}

/// Result of converting a single input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The input was converted into the listed files.
    Written(Vec<WrittenFile>),
    /// Some targets already existed and overwriting was disabled; nothing was written.
    Skipped {
        /// The targets that were found on disk.
        existing: Vec<PathBuf>,
    },
}

/// Counters collected while converting a directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Inputs considered.
    pub total: usize,
    /// Inputs converted successfully.
    pub succeeded: usize,
    /// Inputs skipped because their outputs existed.
    pub skipped: usize,
    /// Inputs that failed.
    pub failed: usize,
}

/// Result of [`Converter::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunReport {
    /// A single file was processed.
    File(Outcome),
    /// A directory was processed.
    Directory(BatchSummary),
}

/// Drives pagination and rendering for files on disk.
pub struct Converter<R = PdfRenderer> {
    paginator: Paginator,
    renderer: R,
    overwrite: bool,
    cleanup: Option<CleanupOptions>,
}

impl Converter<PdfRenderer> {
    /// Creates a converter rendering PDFs with the paginator's geometry.
    pub fn new(paginator: Paginator) -> Self {
        let renderer = PdfRenderer::new(paginator.geometry().clone());
        Self::with_renderer(paginator, renderer)
    }
}

impl<R: Renderer> Converter<R> {
    /// Creates a converter with a custom renderer.
    pub fn with_renderer(paginator: Paginator, renderer: R) -> Self {
        Self {
            paginator,
            renderer,
            overwrite: false,
            cleanup: None,
        }
    }

    /// Allows replacing existing output files.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Enables text cleanup before pagination.
    pub fn with_cleanup(mut self, cleanup: impl Into<Option<CleanupOptions>>) -> Self {
        self.cleanup = cleanup.into();
        self
    }

    /// Converts a file or every text file of a directory.
    pub fn run(&self, input: &Path, output: Option<&Path>) -> Result<RunReport> {
        if input.is_file() {
            let output = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| default_output_path(input));
            self.convert_file(input, &output).map(RunReport::File)
        } else if input.is_dir() {
            self.convert_directory(input, output)
                .map(RunReport::Directory)
        } else {
            Err(Error::FileNotFound {
                path: input.to_path_buf(),
            })
        }
    }

    /// Converts `input` into `output.1.pdf`, `output.2.pdf`, ...
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<Outcome> {
        let text = read_text(input)?;
        let text = match &self.cleanup {
            Some(options) => cleanup::clean_text(&text, options),
            None => text,
        };

        let document = Document::from_text(&text);
        let files = self.paginator.paginate(&document, &self.renderer)?;
        let targets: Vec<PathBuf> = (1..=files.len())
            .map(|index| numbered_path(output, index))
            .collect();

        if !self.overwrite {
            let existing: Vec<PathBuf> = targets
                .iter()
                .filter(|path| path.exists())
                .cloned()
                .collect();
            if !existing.is_empty() {
                warn!(
                    "Skipping '{}': output '{}' already exists (use overwrite to replace it)",
                    input.display(),
                    existing[0].display()
                );
                return Ok(Outcome::Skipped { existing });
            }
        }

        let mut written = Vec::with_capacity(files.len());
        for (file, path) in files.iter().zip(targets) {
            fs::write(&path, file.bytes()).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            debug!("Wrote {} ({} bytes)", path.display(), file.size());
            written.push(WrittenFile {
                path,
                pages: file.pages().len(),
                bytes: file.size(),
            });
        }

        let stale = stale_outputs(output, written.len());
        if !stale.is_empty() {
            warn!(
                "{} numbered file(s) from an earlier run of '{}' remain: {}",
                stale.len(),
                input.display(),
                stale
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        info!(
            "Converted '{}' into {} file(s) with prefix '{}'",
            input.display(),
            written.len(),
            output.with_extension("").display()
        );
        Ok(Outcome::Written(written))
    }

    /// Converts every `*.txt` file in `input_dir`, in name order.
    ///
    /// Outputs go to `output_dir`, or next to the inputs when it is `None`.  A failing input
    /// is logged and counted without stopping the batch.
    pub fn convert_directory(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
    ) -> Result<BatchSummary> {
        let output_dir = output_dir.unwrap_or(input_dir);
        if !output_dir.is_dir() {
            return Err(Error::NotADirectory {
                path: output_dir.to_path_buf(),
            });
        }

        let mut summary = BatchSummary::default();
        for input in text_files(input_dir)? {
            summary.total += 1;
            let output = output_dir.join(default_output_name(&input));
            match self.convert_file(&input, &output) {
                Ok(Outcome::Written(_)) => summary.succeeded += 1,
                Ok(Outcome::Skipped { .. }) => summary.skipped += 1,
                Err(err) => {
                    error!("Failed to convert '{}': {}", input.display(), err);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Processed {} file(s): {} converted, {} skipped, {} failed",
            summary.total, summary.succeeded, summary.skipped, summary.failed
        );
        Ok(summary)
    }
}

/// Returns the input path with a `.pdf` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(PDF_EXTENSION)
}

fn default_output_name(input: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_else(|| OsStr::new("output"));
    Path::new(name).with_extension(PDF_EXTENSION)
}

/// Inserts a one-based index before the extension of `base`.
///
/// A missing extension defaults to `pdf`.
pub fn numbered_path(base: &Path, index: usize) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());
    let extension = base
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| PDF_EXTENSION.to_owned());
    base.with_file_name(format!("{stem}.{index}.{extension}"))
}

/// Lists numbered outputs past `count` that exist on disk, stopping at the first gap.
pub fn stale_outputs(base: &Path, count: usize) -> Vec<PathBuf> {
    (count + 1..)
        .map(|index| numbered_path(base, index))
        .take_while(|path| path.exists())
        .collect()
}

fn read_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|err| {
        Error::InvalidInput(format!(
            "{} is not valid UTF-8 (first invalid byte at offset {})",
            path.display(),
            err.utf8_error().valid_up_to()
        ))
    })
}

fn text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_text = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_EXTENSION));
        if is_text && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_path_inserts_index_before_extension() {
        assert_eq!(
            numbered_path(Path::new("out/report.pdf"), 3),
            PathBuf::from("out/report.3.pdf")
        );
    }

    #[test]
    fn numbered_path_defaults_to_pdf_extension() {
        assert_eq!(
            numbered_path(Path::new("out/report"), 1),
            PathBuf::from("out/report.1.pdf")
        );
    }

    #[test]
    fn default_output_replaces_extension() {
        assert_eq!(
            default_output_path(Path::new("notes/todo.txt")),
            PathBuf::from("notes/todo.pdf")
        );
    }

    #[test]
    fn directory_outputs_are_named_after_inputs() {
        assert_eq!(
            default_output_name(Path::new("/data/chapter-1.txt")),
            PathBuf::from("chapter-1.pdf")
        );
    }
}
