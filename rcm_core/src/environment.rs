use minijinja::Environment;
use minijinja::ErrorKind;
use serde::Serialize;

use crate::Guard;
use crate::Loader;
use crate::RcmError;
use crate::RcmResult;
use crate::TemplateSource;

/// Build a minijinja environment that loads templates through `loader`.
///
/// Use [`Guard::Jinja`] in the loader options: minijinja does not know the
/// Django `{% verbatim %}` tag. Hidden inline comments are left as `{# ... #}`
/// and minijinja strips them like any other comment.
pub fn environment<S>(loader: Loader<S>) -> Environment<'static>
where
	S: TemplateSource + Send + Sync + 'static,
{
	let options = loader.options();
	if options.preprocess && options.preprocessor.guard() != Guard::Jinja {
		tracing::warn!(
			guard = ?options.preprocessor.guard(),
			"minijinja only understands the jinja guard; converted comments may fail to compile"
		);
	}

	let mut env = Environment::new();
	env.set_loader(move |name| {
		match loader.load(name) {
			Ok(template) => Ok(Some(template.source)),
			Err(e) if e.is_not_found() => Ok(None),
			Err(e) => Err(minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string())),
		}
	});

	env
}

/// Render the template `name` from `env` with the given context.
pub fn render<C: Serialize>(env: &Environment<'_>, name: &str, context: C) -> RcmResult<String> {
	let template = env.get_template(name).map_err(|e| {
		if e.kind() == ErrorKind::TemplateNotFound {
			RcmError::TemplateNotFound {
				name: name.to_string(),
				tried: Vec::new(),
			}
		} else {
			RcmError::TemplateRender(e.to_string())
		}
	})?;

	template
		.render(context)
		.map_err(|e| RcmError::TemplateRender(e.to_string()))
}
