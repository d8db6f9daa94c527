//! Repository layer for pipefile documents
//!
//! Ties the parser and the serializer to the local file system:
//!
//! ```no_run
//! use pipefile_repository::PipelineRepository;
//!
//! fn main() -> anyhow::Result<()> {
//!     let repo = PipelineRepository::new();
//!     let loaded = repo.load("ci.pipe")?;
//!     for name in loaded.pipeline.procedure_names() {
//!         println!("procedure {}", name);
//!     }
//!     repo.save(&loaded.pipeline, "ci.pipe.out")?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod file_system;
pub mod repository;

pub use error::{RepositoryError, RepositoryResult};
pub use file_system::LocalFileSystem;
pub use repository::PipelineRepository;
