//! Extract tags use case

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::TagsConfig;
use crate::features::parsing::infrastructure::TreeSitterParser;
use crate::features::parsing::plugins::create_registry;
use crate::features::parsing::ports::{
    ExtractOptions, ExtractionContext, ExtractionResult, LanguageRegistry, Parser,
};
use crate::shared::models::{Result, TagsError};

/// Outcome of tagging a set of paths
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Successful files, sorted by path
    pub results: Vec<ExtractionResult>,
    /// Files that could not be tagged
    pub failures: Vec<(PathBuf, TagsError)>,
}

impl BatchResult {
    pub fn tag_count(&self) -> usize {
        self.results.iter().map(|r| r.tags.len()).sum()
    }

    pub fn issue_count(&self) -> usize {
        self.results.iter().map(|r| r.issues.len()).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Extract tags use case
pub struct ExtractTagsUseCase {
    config: TagsConfig,
    options: ExtractOptions,
    registry: LanguageRegistry,
}

impl ExtractTagsUseCase {
    /// Fails when the configured kind letters are invalid
    pub fn new(config: TagsConfig) -> Result<Self> {
        let options = config.extract_options()?;
        Ok(Self {
            config,
            options,
            registry: create_registry(),
        })
    }

    pub fn config(&self) -> &TagsConfig {
        &self.config
    }

    /// Tag in-memory source; `file_path` selects the language by extension
    pub fn extract_source(&self, source: &str, file_path: &str) -> Result<ExtractionResult> {
        let ext = Path::new(file_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let plugin = self
            .registry
            .get_by_extension(ext)
            .ok_or_else(|| TagsError::UnsupportedFile(file_path.to_string()))?;

        let mut ctx = ExtractionContext::new(source, file_path, plugin.language_id())
            .with_options(self.options.clone());
        let mut result = plugin.extract(&mut ctx)?;

        if self.config.validate_syntax {
            let tree = TreeSitterParser::for_plugin(plugin).parse(source, file_path)?;
            debug!(
                file = %tree.file_path,
                language = %tree.language,
                grammar_issues = tree.issues.len(),
                "Validated syntax"
            );
            result.merge_issues(tree.issues);
        }

        if let Some(first) = result.issues.first() {
            warn!(
                file = file_path,
                line = first.span.start_line,
                issues = result.issues.len(),
                "{}",
                first.message
            );
            if self.config.strict {
                return Err(TagsError::Syntax {
                    path: file_path.to_string(),
                    line: first.span.start_line,
                    message: first.message.clone(),
                    count: result.issues.len(),
                });
            }
        }

        debug!(
            file = file_path,
            tags = result.tags.len(),
            issues = result.issues.len(),
            "Extracted tags"
        );
        Ok(result)
    }

    /// Tag a file on disk; invalid UTF-8 is replaced, not rejected
    pub fn extract_file(&self, path: &Path) -> Result<ExtractionResult> {
        let display = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| TagsError::file(&display, e))?;
        let source = String::from_utf8_lossy(&bytes);
        self.extract_source(&source, &display)
    }

    /// Expand directories into supported files, sorted and deduplicated
    pub fn collect_files<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> (Vec<PathBuf>, Vec<(PathBuf, TagsError)>) {
        let mut files = Vec::new();
        let mut failures = Vec::new();

        for path in paths {
            let path = path.as_ref();
            if path.is_file() {
                if self.is_supported(path) {
                    files.push(path.to_path_buf());
                } else {
                    let err = TagsError::UnsupportedFile(path.display().to_string());
                    failures.push((path.to_path_buf(), err));
                }
                continue;
            }
            if !path.exists() {
                let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
                failures.push((path.to_path_buf(), TagsError::file(path.display().to_string(), err)));
                continue;
            }

            for entry in WalkDir::new(path).follow_links(false) {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && self.is_supported(entry.path()) => {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => warn!(path = %path.display(), "Skipping unreadable entry: {}", e),
                }
            }
        }

        files.sort();
        files.dedup();
        (files, failures)
    }

    /// Tag every supported file under `paths` in parallel
    pub fn extract_paths<P: AsRef<Path>>(&self, paths: &[P]) -> BatchResult {
        let (files, mut failures) = self.collect_files(paths);
        debug!(files = files.len(), "Collected source files");

        let outcomes: Vec<(PathBuf, Result<ExtractionResult>)> = files
            .par_iter()
            .map(|path| (path.clone(), self.extract_file(path)))
            .collect();

        let mut results = Vec::with_capacity(outcomes.len());
        for (path, outcome) in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(path = %path.display(), "Failed to tag file: {}", e);
                    failures.push((path, e));
                }
            }
        }

        let batch = BatchResult { results, failures };
        info!(
            files = batch.results.len(),
            tags = batch.tag_count(),
            failures = batch.failures.len(),
            "Tagging complete"
        );
        batch
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.registry.supports(ext))
    }
}
