//! Batch generation over a directory tree.
//!
//! Every `*.swagger.json` file directly inside a first-level subdirectory of
//! the root is translated into a sibling `.ts` file. Files are handled one at
//! a time; the first failure stops the batch but leaves already written
//! outputs in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::GenError;
use crate::mapper::{IdPolicy, TypeMapper};
use crate::parser::{generate_ts_from_swagger, parse_swagger_file};

pub const SWAGGER_SUFFIX: &str = ".swagger.json";

/// Directory names that are never scanned.
pub const DEFAULT_EXCLUDES: [&str; 4] = ["node_modules", ".DS_Store", ".vscode", ".idea"];

#[derive(Debug, Clone, Default)]
pub struct GenOptions {
    /// Directory to scan; the current directory when `None`
    pub root: Option<PathBuf>,
    /// Module the request collaborator is imported from, used verbatim
    pub request_path: String,
    /// Extra names skipped on top of [`DEFAULT_EXCLUDES`]
    pub exclude_dirs: Vec<String>,
    pub id_policy: IdPolicy,
    /// Print generated code instead of writing files
    pub dry_run: bool,
}

impl GenOptions {
    fn is_excluded(&self, name: &str) -> bool {
        DEFAULT_EXCLUDES.contains(&name) || self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Outputs produced by a run, in the order they were generated.
#[derive(Debug, Default)]
pub struct GenReport {
    pub generated: Vec<PathBuf>,
}

/// Scans the root and translates every schema file found.
pub fn generate_all(options: &GenOptions) -> Result<GenReport, GenError> {
    let base_dir = match &options.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().map_err(|e| GenError::ReadError {
            path: ".".to_string(),
            source: e,
        })?,
    };
    if !base_dir.is_dir() {
        return Err(GenError::RootNotFound(base_dir.display().to_string()));
    }
    info!(root = %base_dir.display(), "scanning for schema files");

    let mut report = GenReport::default();
    for dir in list_sorted(&base_dir)? {
        let name = file_name(&dir);
        if options.is_excluded(&name) {
            debug!(dir = %name, "excluded");
            continue;
        }
        if !dir.is_dir() {
            debug!(entry = %name, "not a directory, skipped");
            continue;
        }

        for file in list_sorted(&dir)? {
            let Some(stem) = file_name(&file).strip_suffix(SWAGGER_SUFFIX).map(str::to_string)
            else {
                continue;
            };
            if !file.is_file() {
                continue;
            }
            let target = dir.join(format!("{}.ts", stem));
            translate_file(&file, &target, options)?;
            report.generated.push(target);
        }
    }
    Ok(report)
}

/// Translates a single schema file into `output`.
pub fn translate_file(input: &Path, output: &Path, options: &GenOptions) -> Result<(), GenError> {
    debug!(input = %input.display(), "translating");
    let mapper = TypeMapper::new(options.id_policy);
    let ts = parse_swagger_file(input)
        .and_then(|doc| generate_ts_from_swagger(&doc, &options.request_path, &mapper))
        .map_err(|e| GenError::Translate {
            path: input.display().to_string(),
            source: Box::new(e),
        })?;

    if options.dry_run {
        println!("// {}\n{}", output.display(), ts);
        return Ok(());
    }
    write_atomic(output, &ts)?;
    info!(output = %output.display(), "file generated");
    Ok(())
}

/// Default output path for a schema file: `name.swagger.json` -> `name.ts`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = file_name(input);
    let stem = name.strip_suffix(SWAGGER_SUFFIX).unwrap_or_else(|| {
        input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&name)
    });
    input.with_file_name(format!("{}.ts", stem))
}

/// Writes content to a file atomically using temp file + rename.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GenError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| GenError::WriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }

    let temp_path = path.with_extension("ts.tmp");
    fs::write(&temp_path, content).map_err(|e| GenError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GenError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

fn list_sorted(dir: &Path) -> Result<Vec<PathBuf>, GenError> {
    let read_error = |e| GenError::ReadError {
        path: dir.display().to_string(),
        source: e,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<PathBuf>, _>>()
        .map_err(read_error)?;
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
