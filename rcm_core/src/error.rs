use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum RcmError {
	#[error(transparent)]
	#[diagnostic(code(rcm::io_error))]
	Io(#[from] std::io::Error),

	#[error("template does not exist: `{name}`")]
	#[diagnostic(
		code(rcm::template_not_found),
		help("no search directory contains `{name}`; add one with `--dir` or `[templates] dirs` in rcm.toml")
	)]
	TemplateNotFound { name: String, tried: Vec<PathBuf> },

	#[error("invalid template name: `{0}`")]
	#[diagnostic(
		code(rcm::invalid_template_name),
		help("template names must be relative and must not contain `..`")
	)]
	InvalidTemplateName(String),

	#[error("template `{path}` is not valid UTF-8")]
	#[diagnostic(code(rcm::invalid_encoding))]
	InvalidEncoding { path: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(rcm::config_parse),
		help("check that rcm.toml is valid TOML with top-level flags and a [templates] section")
	)]
	ConfigParse(String),

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(rcm::template_render))]
	TemplateRender(String),
}

impl RcmError {
	/// Returns true for the not-found signal that lets callers fall through to
	/// the next template location.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::TemplateNotFound { .. })
	}
}

pub type RcmResult<T> = Result<T, RcmError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
