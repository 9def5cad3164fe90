//! Worker command synthesis
//!
//! Builds the full invocation for one worker: resolved executable, optional
//! runtime-logging flags, the file/scenario list, and trailing framework
//! options with auto-detection of a `parallel` profile.

mod probe;

pub use probe::{DiskProbe, FsProbe};

#[cfg(test)]
pub(crate) use probe::mem::MemProbe;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ShardError;
use crate::models::{TestUnitId, WorkerCommand, WorkerOptions};

/// Formatter plugged into the worker run to record per-file runtimes.
pub const RUNTIME_LOG_FORMATTER: &str = "CukeShard::RuntimeLogger";

/// Interpreter used to wrap project-local launcher scripts.
const INTERPRETER: &str = "ruby";

/// Synthesizes worker commands for one test framework (`cucumber` by
/// default). Filesystem access goes through the injected probe.
pub struct CommandSynthesizer<P: FsProbe> {
    name: String,
    probe: P,
    search_path: Option<OsString>,
}

impl<P: FsProbe> CommandSynthesizer<P> {
    pub fn new(name: impl Into<String>, probe: P) -> Self {
        Self {
            name: name.into(),
            probe,
            search_path: None,
        }
    }

    /// Override the `PATH` searched for the bare executable fallback.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// Base command name of the test framework.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the recorded per-file runtime log.
    pub fn runtime_log(&self) -> PathBuf {
        PathBuf::from(format!("tmp/parallel_runtime_{}.log", self.name))
    }

    /// Build one worker's full invocation. Token order is fixed: executable,
    /// logging flags, specifiers, trailing framework options.
    pub fn build(
        &self,
        units: &[TestUnitId],
        options: &WorkerOptions,
    ) -> Result<WorkerCommand, ShardError> {
        let mut tokens = self.resolve_executable()?;
        tokens.extend(self.runtime_logging());
        tokens.extend(units.iter().map(|u| u.as_str().to_string()));
        tokens.extend(self.framework_opts(&options.test_args));
        Ok(WorkerCommand::new(tokens))
    }

    /// Resolve the worker's base executable, first match wins:
    /// project-local `bin/<name>` (interpreter-wrapped), bundler when a
    /// `Gemfile.lock` is present, legacy `script/<name>`, then the bare name
    /// looked up on `PATH`.
    fn resolve_executable(&self) -> Result<Vec<String>, ShardError> {
        let local = format!("bin/{}", self.name);
        if self.probe.is_file(Path::new(&local)) {
            return Ok(vec![INTERPRETER.to_string(), local]);
        }

        if self.probe.is_file(Path::new("Gemfile.lock")) {
            return Ok(vec![
                "bundle".to_string(),
                "exec".to_string(),
                self.name.clone(),
            ]);
        }

        let legacy = format!("script/{}", self.name);
        if self.probe.is_file(Path::new(&legacy)) {
            return Ok(vec![INTERPRETER.to_string(), legacy]);
        }

        if self.on_search_path() {
            return Ok(vec![self.name.clone()]);
        }

        Err(ShardError::ExecutableNotFound {
            name: self.name.clone(),
        })
    }

    fn on_search_path(&self) -> bool {
        let paths = match self.search_path.clone().or_else(|| std::env::var_os("PATH")) {
            Some(paths) => paths,
            None => return false,
        };
        std::env::split_paths(&paths).any(|dir| self.probe.is_file(&dir.join(&self.name)))
    }

    /// Runtime-logging flag pair, present only while the log's parent
    /// directory exists on disk.
    fn runtime_logging(&self) -> Vec<String> {
        let log = self.runtime_log();
        let parent = log.parent().unwrap_or_else(|| Path::new("."));
        if !self.probe.is_dir(parent) {
            return Vec::new();
        }
        vec![
            "--format".to_string(),
            RUNTIME_LOG_FORMATTER.to_string(),
            "--out".to_string(),
            log.to_string_lossy().into_owned(),
        ]
    }

    /// Trailing framework options: the user's args verbatim when they already
    /// request a profile, otherwise the user's args plus an auto-detected
    /// `--profile parallel` pair.
    fn framework_opts(&self, given: &[String]) -> Vec<String> {
        if given.iter().any(|arg| arg == "--profile" || arg == "-p") {
            return given.to_vec();
        }

        let mut opts = given.to_vec();
        opts.extend(self.profile_from_config());
        opts
    }

    /// Scan the fixed config candidates for the framework; the first file
    /// found decides. A `parallel:` profile declaration selects the pair.
    fn profile_from_config(&self) -> Vec<String> {
        for candidate in self.config_candidates() {
            let Some(contents) = self.probe.read_to_string(&candidate) else {
                continue;
            };
            if contents.lines().any(|line| line.starts_with("parallel:")) {
                debug!(
                    "Auto-selected parallel profile from {}",
                    candidate.display()
                );
                return vec!["--profile".to_string(), "parallel".to_string()];
            }
            return Vec::new();
        }
        Vec::new()
    }

    /// Candidate config locations, in probe order:
    /// `<name>.yml`, `<name>.yaml`, then the same under `.config/` and
    /// `config/`.
    fn config_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        for prefix in ["", ".config/", "config/"] {
            for ext in ["yml", "yaml"] {
                candidates.push(PathBuf::from(format!("{prefix}{}.{ext}", self.name)));
            }
        }
        candidates
    }
}
