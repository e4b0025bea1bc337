use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::AppDirectoriesSource;
use crate::Guard;
use crate::LoaderOptions;
use crate::Preprocessor;
use crate::RcmError;
use crate::RcmResult;
use crate::TemplateSource;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["rcm.toml", ".rcm.toml", ".config/rcm.toml"];

/// Configuration loaded from an `rcm.toml` file.
///
/// ```toml
/// debug = true
/// render_comments = true
/// guard = "django"
///
/// [templates]
/// dirs = ["templates"]
/// apps = ["blog", "shop"]
/// patterns = ["**/*.html"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RcmConfig {
	/// Development mode. Comments are only rewritten while this is `true`.
	#[serde(default)]
	pub debug: bool,
	/// Opt-out switch for comment rewriting while `debug` is on. Defaults to
	/// `true`.
	#[serde(default = "default_render_comments")]
	pub render_comments: bool,
	/// Which guard tags wrap converted comments.
	#[serde(default)]
	pub guard: Guard,
	/// Where templates are searched for.
	#[serde(default)]
	pub templates: TemplatesConfig,
}

/// Configuration for template search directories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatesConfig {
	/// Directories searched for templates, in order. Relative to the project
	/// root.
	#[serde(default)]
	pub dirs: Vec<PathBuf>,
	/// Application directories. Each contributes its `templates`
	/// subdirectory, searched after `dirs`.
	#[serde(default)]
	pub apps: Vec<PathBuf>,
	/// Glob patterns selecting which files count as templates when listing
	/// them. Every file is a template when empty.
	#[serde(default)]
	pub patterns: Vec<String>,
}

fn default_render_comments() -> bool {
	true
}

impl Default for RcmConfig {
	fn default() -> Self {
		Self {
			debug: false,
			render_comments: default_render_comments(),
			guard: Guard::default(),
			templates: TemplatesConfig::default(),
		}
	}
}

impl RcmConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> RcmResult<Option<RcmConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: RcmConfig =
			toml::from_str(&content).map_err(|e| RcmError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Whether template comments should be rewritten at all.
	pub fn should_preprocess(&self) -> bool {
		self.debug && self.render_comments
	}

	/// The explicit loader parameters derived from this config.
	pub fn loader_options(&self) -> LoaderOptions {
		LoaderOptions {
			preprocess: self.should_preprocess(),
			preprocessor: Preprocessor::new(self.guard),
		}
	}

	/// All search directories resolved against `root`: `dirs` first, then the
	/// `templates` directory of every app that has one.
	pub fn search_dirs(&self, root: &Path) -> Vec<PathBuf> {
		let apps = AppDirectoriesSource::new(self.templates.apps.iter().map(|app| root.join(app)));

		self.templates
			.dirs
			.iter()
			.map(|dir| root.join(dir))
			.chain(apps.search_dirs())
			.collect()
	}
}
