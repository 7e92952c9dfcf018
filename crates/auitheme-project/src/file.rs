use std::path::{Component, Path, PathBuf};

use auitheme_section::{LoadConfig, ReadStats};

use crate::document::{decode_with_config, to_bytes};
use crate::error::{ProjectError, Result};
use crate::project::Project;

/// File extension of project files.
pub const PROJECT_EXTENSION: &str = "tui";

/// A project bound to its location on disk.
///
/// The project name (file stem) and directory come from the path and are
/// not stored in the file.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    project: Project,
}

impl ProjectFile {
    /// Start a new, empty project that will be saved at `path`.
    ///
    /// The `.tui` extension is added when `path` has none.
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self::with_project(path, Project::new())
    }

    /// Bind an existing in-memory project to `path`.
    pub fn with_project(path: impl Into<PathBuf>, project: Project) -> Self {
        Self {
            path: with_default_extension(path.into()),
            project,
        }
    }

    /// Load a project file.
    pub fn load(path: impl AsRef<Path>, config: &LoadConfig) -> Result<Self> {
        Self::load_with_stats(path, config).map(|(file, _)| file)
    }

    /// Load a project file, also returning how much of it had to be defaulted.
    pub fn load_with_stats(
        path: impl AsRef<Path>,
        config: &LoadConfig,
    ) -> Result<(Self, ReadStats)> {
        let path = path.as_ref();
        let bytes = read_project_bytes(path, config)?;
        let (project, stats) = decode_with_config(&bytes, config);
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            records = project.record_count(),
            "loaded project"
        );
        Ok((
            Self {
                path: path.to_path_buf(),
                project,
            },
            stats,
        ))
    }

    /// Write the project to its path, replacing any existing file.
    pub fn save(&self) -> Result<()> {
        let bytes = to_bytes(&self.project)?;
        std::fs::write(&self.path, &bytes).map_err(|source| io_error(&self.path, source))?;
        tracing::info!(
            path = %self.path.display(),
            bytes = bytes.len(),
            records = self.project.record_count(),
            "saved project"
        );
        Ok(())
    }

    /// Move the project to `path` and save it there.
    ///
    /// The asset directory is stored relative to the project, so it is
    /// rewritten to keep pointing at the same place.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let assets = self.asset_root();
        self.path = with_default_extension(path.into());
        self.set_asset_directory(&assets);
        self.save()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The project name: the file name without its extension.
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }

    /// The directory containing the project file.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut Project {
        &mut self.project
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    /// The asset directory resolved against the project directory.
    pub fn asset_root(&self) -> PathBuf {
        self.directory().join(&self.project.asset_directory)
    }

    /// Point the project at an asset directory, stored relative to the project.
    pub fn set_asset_directory(&mut self, asset_dir: &Path) {
        self.project.asset_directory = relative_asset_directory(self.directory(), asset_dir);
    }
}

/// Read the raw bytes of a project file.
///
/// Files larger than `config.max_file_size` are rejected before reading.
pub fn read_project_bytes(path: &Path, config: &LoadConfig) -> Result<Vec<u8>> {
    let size = std::fs::metadata(path)
        .map_err(|source| io_error(path, source))?
        .len();
    if size > config.max_file_size as u64 {
        return Err(ProjectError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: config.max_file_size,
        });
    }
    std::fs::read(path).map_err(|source| io_error(path, source))
}

/// Express `asset_dir` relative to `project_dir`.
///
/// The result uses `/` separators and ends with `/`, e.g. `../shared/svg/`.
/// It is empty when both name the same directory. If the two paths share
/// no root (different drives, or one relative and one absolute), the
/// asset directory is returned as given.
pub fn relative_asset_directory(project_dir: &Path, asset_dir: &Path) -> String {
    let project: Vec<Component<'_>> = normalized(project_dir);
    let asset: Vec<Component<'_>> = normalized(asset_dir);

    let common = project
        .iter()
        .zip(&asset)
        .take_while(|(a, b)| a == b)
        .count();

    let rooted = |c: &Component<'_>| matches!(c, Component::Prefix(_) | Component::RootDir);
    if asset[common..].iter().any(rooted) || project[common..].iter().any(rooted) {
        let mut absolute = asset_dir.to_string_lossy().replace('\\', "/");
        if !absolute.ends_with('/') {
            absolute.push('/');
        }
        return absolute;
    }

    let mut relative = String::new();
    for _ in common..project.len() {
        relative.push_str("../");
    }
    for component in &asset[common..] {
        relative.push_str(&component.as_os_str().to_string_lossy());
        relative.push('/');
    }
    relative
}

fn normalized(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(PROJECT_EXTENSION)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ProjectError {
    ProjectError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_directory_is_empty() {
        assert_eq!(
            relative_asset_directory(Path::new("/work/theme"), Path::new("/work/theme")),
            ""
        );
    }

    #[test]
    fn subdirectory() {
        assert_eq!(
            relative_asset_directory(Path::new("/work/theme"), Path::new("/work/theme/svg/icons")),
            "svg/icons/"
        );
    }

    #[test]
    fn sibling_directory_climbs() {
        assert_eq!(
            relative_asset_directory(Path::new("/work/theme/a"), Path::new("/work/shared/svg")),
            "../../shared/svg/"
        );
    }

    #[test]
    fn ancestor_directory() {
        assert_eq!(
            relative_asset_directory(Path::new("/work/theme"), Path::new("/work")),
            "../"
        );
    }

    #[test]
    fn unrelated_roots_stay_absolute() {
        assert_eq!(
            relative_asset_directory(Path::new("theme"), Path::new("/opt/svg")),
            "/opt/svg/"
        );
    }

    #[test]
    fn create_adds_extension() {
        let file = ProjectFile::create("/work/dark");
        assert_eq!(file.path(), Path::new("/work/dark.tui"));
        assert_eq!(file.name(), "dark");
        assert_eq!(file.directory(), Path::new("/work"));
        assert!(file.project().is_empty());
    }

    #[test]
    fn asset_root_joins_relative_directory() {
        let mut file = ProjectFile::create("/work/theme/dark.tui");
        file.set_asset_directory(Path::new("/work/shared/svg"));
        assert_eq!(file.project().asset_directory, "../shared/svg/");
        assert_eq!(file.asset_root(), Path::new("/work/theme/../shared/svg/"));
    }
}
