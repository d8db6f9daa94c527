//! Document loader
//!
//! Drives the top level of a document: includes, procedure declarations,
//! default-block commands, global variables and attribute comments. Block
//! bodies are handed to [`BlockParser`].

use crate::block_parser::BlockParser;
use crate::conf::{self, ConfigVars};
use crate::config::LoadOptions;
use crate::error::{ParseError, Result};
use crate::line::{self, LineKind};
use crate::source::LineSource;
use pipefile_core::{BracketKind, FileSystemProbe, Pipeline, Procedure, SourcePos};
use std::path::{Path, PathBuf};

/// Everything read from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPipeline {
    pub pipeline: Pipeline,

    /// Global variables from the document, its includes and `.conf` sibling
    pub variables: ConfigVars,
}

/// Loads documents into pipelines
///
/// The loaded pipeline still holds calls to procedures as plain shell items;
/// run [`Pipeline::final_check_after_load`] on it to promote them.
pub struct PipelineLoader<'p> {
    options: LoadOptions,
    probe: &'p dyn FileSystemProbe,
}

/// Mutable state of one top-level pass
struct LoadState {
    pipeline: Pipeline,
    variables: ConfigVars,
    pending_attributes: Vec<(String, String)>,
}

impl<'p> PipelineLoader<'p> {
    pub fn new(options: LoadOptions, probe: &'p dyn FileSystemProbe) -> Self {
        Self { options, probe }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load a document file and, when enabled, its `.conf` sibling
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedPipeline> {
        let path = path.as_ref();
        let mut source = LineSource::open(path)?;
        let mut loaded = self.load_source(&mut source)?;

        if self.options.load_sibling_conf {
            let conf_path = PathBuf::from(format!("{}{}", path.display(), self.options.conf_suffix));
            if self.probe.exists(&conf_path) {
                log::info!("Loading configuration {}", conf_path.display());
                conf::load_conf_file(&conf_path, &mut loaded.variables)?;
            } else {
                log::debug!("No configuration file at {}", conf_path.display());
            }
        }

        Ok(loaded)
    }

    /// Load a document from an already opened source
    ///
    /// Includes are resolved against the directory of the source's file name.
    pub fn load_source(&self, source: &mut LineSource) -> Result<LoadedPipeline> {
        let mut state = LoadState {
            pipeline: Pipeline::with_default_parallel(self.options.default_parallel),
            variables: ConfigVars::new(),
            pending_attributes: Vec::new(),
        };

        while source.read_line() {
            let kind = line::classify(source.current_line());

            if !state.pending_attributes.is_empty()
                && !matches!(
                    kind,
                    LineKind::FunctionHeader { .. }
                        | LineKind::Attribute
                        | LineKind::Comment
                        | LineKind::Empty
                )
            {
                log::warn!(
                    "{} attribute line(s) before {} do not precede a procedure, dropped",
                    state.pending_attributes.len(),
                    source.pos()
                );
                state.pending_attributes.clear();
            }

            match kind {
                LineKind::Include(target) => {
                    self.include(source, &target, &mut state.variables)?;
                }
                LineKind::FunctionHeader { name, bracket } => {
                    self.procedure(source, name, bracket, &mut state)?;
                }
                LineKind::LeftBracket(bracket) => {
                    let block = BlockParser::new(source, &mut state.pipeline).parse_block(bracket)?;
                    let index = state.pipeline.append_block(block);
                    state.pipeline.default_block_mut().append_block(index);
                }
                LineKind::RightBracket(found) => {
                    return Err(ParseError::UnmatchedRightBracket {
                        pos: source.pos(),
                        found: found.close().to_string(),
                    });
                }
                LineKind::Empty | LineKind::Comment => {}
                LineKind::Attribute => match line::parse_attribute(source.current_line()) {
                    Some(attribute) => state.pending_attributes.push(attribute),
                    None => log::warn!(
                        "Ignoring malformed attribute line at {}: {}",
                        source.pos(),
                        source.current_line().trim()
                    ),
                },
                LineKind::Variable { name, value } => {
                    state.variables.insert(name, value);
                }
                LineKind::Command => {
                    let parallel = state.pipeline.default_block().is_parallel();
                    let items = BlockParser::new(source, &mut state.pipeline).read_command(parallel)?;
                    for item in items {
                        state.pipeline.default_block_mut().push(item);
                    }
                }
            }
        }

        if !state.pending_attributes.is_empty() {
            log::warn!(
                "{} attribute line(s) at end of {} do not precede a procedure, dropped",
                state.pending_attributes.len(),
                source.filename()
            );
        }

        Ok(LoadedPipeline {
            pipeline: state.pipeline,
            variables: state.variables,
        })
    }

    fn include(&self, source: &LineSource, target: &str, vars: &mut ConfigVars) -> Result<()> {
        let path = self.probe.dir_name(Path::new(source.filename())).join(target);
        if !self.probe.exists(&path) {
            if self.options.strict_includes {
                return Err(ParseError::IncludeNotFound {
                    path: path.display().to_string(),
                    pos: source.pos(),
                });
            }
            log::warn!("Included file {} not found at {}, skipped", path.display(), source.pos());
            return Ok(());
        }

        log::info!("Loading module '{}'", target);
        conf::load_conf_file(&path, vars)
    }

    fn procedure(
        &self,
        source: &mut LineSource,
        name: String,
        bracket: Option<BracketKind>,
        state: &mut LoadState,
    ) -> Result<()> {
        let pos = source.pos();
        if let Some(previous) = state.pipeline.declared_at(&name) {
            return Err(ParseError::DuplicateProcedure {
                name,
                pos,
                previous: previous.clone(),
            });
        }
        state.pipeline.record_declaration(name.clone(), pos.clone());

        let bracket = match bracket {
            Some(bracket) => bracket,
            None => find_left_bracket(source, &pos)?,
        };
        let block = BlockParser::new(source, &mut state.pipeline).parse_block(bracket)?;
        let index = state.pipeline.append_block(block);

        let attributes = std::mem::take(&mut state.pending_attributes);
        log::debug!("Procedure '{}' declared at {} uses block {}", name, pos, index);
        state
            .pipeline
            .add_procedure(Procedure::new(name, index).with_attributes(attributes));
        Ok(())
    }
}

/// Move to the opening bracket of a procedure whose header has none
///
/// Blank lines and plain comments may come first.
fn find_left_bracket(source: &mut LineSource, header: &SourcePos) -> Result<BracketKind> {
    while source.read_line() {
        let current = source.current_line();
        if line::is_empty_line(current) {
            continue;
        }
        if line::is_attribute_line(current) {
            return Err(ParseError::UnexpectedAttribute { pos: source.pos() });
        }
        if line::is_comment_line(current) {
            continue;
        }
        return line::left_bracket(current)
            .ok_or_else(|| ParseError::ExpectedLeftBracket { pos: source.pos() });
    }
    Err(ParseError::MissingLeftBracket {
        pos: header.clone(),
    })
}
