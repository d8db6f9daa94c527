//! Loading and saving documents on the local file system

use crate::error::{RepositoryError, RepositoryResult};
use crate::file_system::LocalFileSystem;
use pipefile_core::{FileSystemProbe, Pipeline, PipelineWriter, PosixShellEncoder, ShellEncoder};
use pipefile_parser::{LoadOptions, LoadedPipeline, PipelineLoader};
use std::fs;
use std::path::Path;

/// Entry point for reading and writing pipeline documents
///
/// # Example
/// ```no_run
/// use pipefile_parser::LoadOptions;
/// use pipefile_repository::PipelineRepository;
///
/// let repo = PipelineRepository::with_options(LoadOptions::default().with_default_parallel(true));
/// if repo.is_pipe_file("deploy.pipe") {
///     let loaded = repo.load("deploy.pipe").unwrap();
///     assert!(loaded.pipeline.default_block().is_parallel());
/// }
/// ```
pub struct PipelineRepository {
    options: LoadOptions,
    probe: Box<dyn FileSystemProbe>,
    encoder: Box<dyn ShellEncoder + Send + Sync>,
}

impl PipelineRepository {
    /// Repository with default options on the local file system
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            probe: Box::new(LocalFileSystem),
            encoder: Box::new(PosixShellEncoder),
        }
    }

    /// Replace the file system probe
    pub fn with_probe(mut self, probe: impl FileSystemProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Replace the encoder used to quote procedure arguments on save
    pub fn with_encoder(mut self, encoder: impl ShellEncoder + Send + Sync + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load a document, its includes and `.conf` sibling, then promote
    /// procedure calls
    pub fn load(&self, path: impl AsRef<Path>) -> RepositoryResult<LoadedPipeline> {
        let path = path.as_ref();
        log::info!("Loading pipeline {}", path.display());

        let result = self.load_inner(path);
        if let Err(e) = &result {
            log::error!("Failed to load pipeline {}: {}", path.display(), e);
        }
        result
    }

    fn load_inner(&self, path: &Path) -> RepositoryResult<LoadedPipeline> {
        let loader = PipelineLoader::new(self.options.clone(), self.probe.as_ref());
        let mut loaded = loader.load(path)?;
        loaded.pipeline.final_check_after_load()?;
        loaded.pipeline.dump();
        Ok(loaded)
    }

    /// Text a pipeline would be saved as
    pub fn render(&self, pipeline: &Pipeline) -> String {
        PipelineWriter::new(pipeline, self.encoder.as_ref()).render()
    }

    /// Write a pipeline to `path`, replacing the file
    pub fn save(&self, pipeline: &Pipeline, path: impl AsRef<Path>) -> RepositoryResult<()> {
        let path = path.as_ref();
        fs::write(path, self.render(pipeline)).map_err(|source| {
            let err = RepositoryError::Write {
                path: path.display().to_string(),
                source,
            };
            log::error!("{}", err);
            err
        })?;
        log::info!("Saved pipeline to {}", path.display());
        Ok(())
    }

    /// Whether `path` looks like a pipeline document
    ///
    /// It must exist, be text and not be executable; executables are
    /// scripts meant to be run rather than loaded.
    pub fn is_pipe_file(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.probe.exists(path) && !self.probe.is_executable(path) && self.probe.is_text_file(path)
    }
}

impl Default for PipelineRepository {
    fn default() -> Self {
        Self::new()
    }
}
