use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::WalkBuilder;
use serde::Serialize;

use crate::Preprocessor;
use crate::RcmError;
use crate::RcmResult;

/// The subdirectory of an application that holds its templates.
pub const APP_TEMPLATES_DIR: &str = "templates";

/// Where a template candidate lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Origin {
	/// The file path of the candidate.
	pub name: PathBuf,
	/// The name the template was requested by.
	pub template_name: String,
}

/// A capability that knows where templates are searched for and how their
/// raw text is read.
pub trait TemplateSource {
	/// The directories searched for templates, in order.
	fn search_dirs(&self) -> Vec<PathBuf>;

	/// Read the raw text of a candidate.
	///
	/// A missing file must be reported as [`RcmError::TemplateNotFound`] so
	/// that the next search directory is tried.
	fn read_raw(&self, origin: &Origin) -> RcmResult<String> {
		read_template_file(origin)
	}
}

/// Templates stored in an explicit list of directories.
#[derive(Debug, Clone, Default)]
pub struct FilesystemSource {
	dirs: Vec<PathBuf>,
}

impl FilesystemSource {
	pub fn new(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
		Self {
			dirs: dirs.into_iter().map(Into::into).collect(),
		}
	}
}

impl TemplateSource for FilesystemSource {
	fn search_dirs(&self) -> Vec<PathBuf> {
		self.dirs.clone()
	}
}

/// Templates stored in the `templates` directory of each application.
/// Applications without one are skipped.
#[derive(Debug, Clone, Default)]
pub struct AppDirectoriesSource {
	apps: Vec<PathBuf>,
}

impl AppDirectoriesSource {
	pub fn new(apps: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
		Self {
			apps: apps.into_iter().map(Into::into).collect(),
		}
	}
}

impl TemplateSource for AppDirectoriesSource {
	fn search_dirs(&self) -> Vec<PathBuf> {
		self.apps
			.iter()
			.map(|app| app.join(APP_TEMPLATES_DIR))
			.filter(|dir| dir.is_dir())
			.collect()
	}
}

/// Read a template file, mapping a missing file to
/// [`RcmError::TemplateNotFound`].
pub fn read_template_file(origin: &Origin) -> RcmResult<String> {
	let bytes = match std::fs::read(&origin.name) {
		Ok(bytes) => bytes,
		Err(e) if e.kind() == ErrorKind::NotFound => {
			return Err(RcmError::TemplateNotFound {
				name: origin.template_name.clone(),
				tried: vec![origin.name.clone()],
			});
		}
		Err(e) => return Err(e.into()),
	};

	String::from_utf8(bytes).map_err(|_| {
		RcmError::InvalidEncoding {
			path: origin.name.display().to_string(),
		}
	})
}

/// Explicit switches for a [`Loader`], usually built with
/// [`RcmConfig::loader_options`](crate::RcmConfig::loader_options).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
	/// Rewrite comments in loaded templates. When `false` templates are
	/// returned exactly as stored.
	pub preprocess: bool,
	pub preprocessor: Preprocessor,
}

/// A template found by [`Loader::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTemplate {
	pub origin: Origin,
	pub source: String,
}

/// Loads templates from a [`TemplateSource`] and rewrites their comments.
#[derive(Debug, Clone)]
pub struct Loader<S> {
	source: S,
	options: LoaderOptions,
}

impl<S: TemplateSource> Loader<S> {
	pub fn new(source: S, options: LoaderOptions) -> Self {
		Self { source, options }
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	pub fn options(&self) -> LoaderOptions {
		self.options
	}

	/// One candidate per search directory, in search order.
	pub fn get_template_sources(&self, template_name: &str) -> RcmResult<Vec<Origin>> {
		let relative = checked_template_path(template_name)?;

		Ok(self
			.source
			.search_dirs()
			.into_iter()
			.map(|dir| {
				Origin {
					name: dir.join(relative),
					template_name: template_name.to_string(),
				}
			})
			.collect())
	}

	/// Read a candidate and rewrite its comments when enabled.
	pub fn get_contents(&self, origin: &Origin) -> RcmResult<String> {
		let contents = self.source.read_raw(origin)?;

		if !self.options.preprocess {
			return Ok(contents);
		}

		tracing::debug!(
			template = %origin.template_name,
			path = %origin.name.display(),
			"rewriting template comments"
		);

		Ok(self.options.preprocessor.process(&contents))
	}

	/// Find the first candidate that exists and return its raw text.
	pub fn find(&self, template_name: &str) -> RcmResult<LoadedTemplate> {
		self.first_existing(template_name, |origin| self.source.read_raw(origin))
	}

	/// Find the first candidate that exists and return its contents, with
	/// comments rewritten when enabled.
	pub fn load(&self, template_name: &str) -> RcmResult<LoadedTemplate> {
		self.first_existing(template_name, |origin| self.get_contents(origin))
	}

	fn first_existing(
		&self,
		template_name: &str,
		read: impl Fn(&Origin) -> RcmResult<String>,
	) -> RcmResult<LoadedTemplate> {
		let mut tried = Vec::new();

		for origin in self.get_template_sources(template_name)? {
			match read(&origin) {
				Ok(source) => return Ok(LoadedTemplate { origin, source }),
				Err(e) if e.is_not_found() => {
					tracing::trace!(path = %origin.name.display(), "template candidate does not exist");
					tried.push(origin.name);
				}
				Err(e) => return Err(e),
			}
		}

		Err(RcmError::TemplateNotFound {
			name: template_name.to_string(),
			tried,
		})
	}

	/// Names of all templates in the search directories, sorted and without
	/// duplicates. Only files matching `patterns` are listed; every file
	/// matches when `patterns` is empty.
	pub fn templates(&self, patterns: &[String]) -> RcmResult<Vec<String>> {
		let include = build_glob_set(patterns)?;
		let mut names = BTreeSet::new();

		for dir in self.source.search_dirs() {
			if !dir.is_dir() {
				continue;
			}

			for entry in WalkBuilder::new(&dir).build() {
				let entry = entry.map_err(|e| RcmError::Io(std::io::Error::other(e)))?;
				if !entry.file_type().is_some_and(|kind| kind.is_file()) {
					continue;
				}

				let Ok(relative) = entry.path().strip_prefix(&dir) else {
					continue;
				};

				if !patterns.is_empty() && !include.is_match(relative) {
					continue;
				}

				names.insert(template_name_of(relative));
			}
		}

		Ok(names.into_iter().collect())
	}
}

/// Reject names that would resolve outside of a search directory.
fn checked_template_path(template_name: &str) -> RcmResult<&Path> {
	let path = Path::new(template_name);
	let is_contained = !template_name.is_empty()
		&& path
			.components()
			.all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

	if is_contained {
		Ok(path)
	} else {
		Err(RcmError::InvalidTemplateName(template_name.to_string()))
	}
}

/// Template names always use `/`, whatever the platform separator.
fn template_name_of(relative: &Path) -> String {
	relative
		.components()
		.map(|component| component.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/")
}

fn build_glob_set(patterns: &[String]) -> RcmResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern)
			.map_err(|e| RcmError::ConfigParse(format!("invalid template pattern `{pattern}`: {e}")))?;
		builder.add(glob);
	}
	builder
		.build()
		.map_err(|e| RcmError::ConfigParse(format!("failed to build template patterns: {e}")))
}
