use std::{
    collections::HashSet,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Error, Debug)]
#[error("could not read ROM directory {}", .path.display())]
pub struct DirectoryAccessError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetFile {
    pub relative_path: String,
    pub identifier: String,
}

impl AssetFile {
    pub fn new(relative_path: String) -> Self {
        let identifier = identifier(&relative_path);
        Self {
            relative_path,
            identifier,
        }
    }
}

/// Uppercases `name` (ASCII only) and turns every `.` into `_`.
pub fn identifier(name: &str) -> String {
    name.to_ascii_uppercase().replace('.', "_")
}

/// Lists the regular files directly inside `root`. Symlinks are followed,
/// so a link to a file is kept and a link to a directory is not. Dangling
/// links and names that are not UTF-8 are skipped with a warning; any other
/// filesystem error aborts.
pub fn enumerate_files(root: &Path, sort: bool) -> Result<Vec<AssetFile>, DirectoryAccessError> {
    let access_error = |source| DirectoryAccessError {
        path: root.to_path_buf(),
        source,
    };

    let mut files = vec![];
    for entry in fs::read_dir(root).map_err(access_error)? {
        let path = entry.map_err(access_error)?.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound && path.is_symlink() => {
                log::warn!("skipping dangling link {}", path.display());
                continue;
            }
            Err(err) => return Err(access_error(err)),
        };
        if !metadata.is_file() {
            log::debug!("skipping {}", path.display());
            continue;
        }
        let Some(name) = path.file_name() else {
            continue;
        };
        let Some(name) = name.to_str() else {
            log::warn!("skipping {}: file name is not UTF-8", path.display());
            continue;
        };
        let file = AssetFile::new(name.to_string());
        log::debug!("found {} as {}", file.relative_path, file.identifier);
        files.push(file);
    }
    if sort {
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    }
    for problem in identifier_problems(&files) {
        log::warn!("{problem}");
    }
    Ok(files)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentifierProblem {
    /// The identifier has characters outside `[A-Z0-9_]`.
    Invalid(AssetFile),
    /// The identifier was already produced by an earlier file.
    Collision(AssetFile),
}

impl fmt::Display for IdentifierProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(file) => write!(
                f,
                "{} does not produce a valid Rust identifier ({})",
                file.relative_path, file.identifier
            ),
            Self::Collision(file) => write!(
                f,
                "{} collides with another file as {}",
                file.relative_path, file.identifier
            ),
        }
    }
}

/// Files whose identifiers will not compile, in input order.
pub fn identifier_problems(files: &[AssetFile]) -> Vec<IdentifierProblem> {
    let mut problems = vec![];
    let mut seen = HashSet::new();
    for file in files {
        let valid = file
            .identifier
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            problems.push(IdentifierProblem::Invalid(file.clone()));
        }
        if !seen.insert(file.identifier.as_str()) {
            problems.push(IdentifierProblem::Collision(file.clone()));
        }
    }
    problems
}
