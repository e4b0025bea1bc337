use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use rcm_core::Guard;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "See your template comments in the browser while developing.",
	long_about = "rcm (render comments) rewrites Django template comments into HTML comments so \
	              they show up in the browser's developer tools.\n\n`{# note #}` becomes `{% \
	              verbatim %}<!-- note -->{% endverbatim %}`, `{# !render {{ x }} #}` becomes \
	              `<!-- {{ x }} -->` and `{# !hide note #}` is left alone.\n\nQuick start:\n  rcm \
	              transform page.html   Print a file with its comments rewritten\n  rcm list        \
	              List templates in the search directories\n  rcm --debug render NAME   Load a \
	              template the way a debug server would"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct RcmCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Additional template search directory, searched before those from
	/// `rcm.toml`. May be repeated.
	#[arg(long = "dir", short = 'd', global = true)]
	pub dirs: Vec<PathBuf>,

	/// Run as if `debug = true` were set in `rcm.toml`.
	#[arg(long, global = true, default_value_t = false)]
	pub debug: bool,

	/// Run as if `render_comments = false` were set in `rcm.toml`.
	#[arg(long, global = true, default_value_t = false)]
	pub no_render_comments: bool,

	/// The tag pair wrapped around converted comments. Overrides `guard` in
	/// `rcm.toml`.
	#[arg(long, global = true, value_enum)]
	pub guard: Option<GuardArg>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Print a template with its comments rewritten.
	///
	/// Reads FILE, or standard input when FILE is omitted or `-`. Comments are
	/// always rewritten, whatever `debug` and `render_comments` say.
	Transform {
		/// The file to transform.
		file: Option<PathBuf>,
	},
	/// Load a template by name and print it.
	///
	/// Searches the template directories in order, the way the template
	/// engine would. Comments are only rewritten when `debug` is on and
	/// `render_comments` is not turned off.
	Render {
		/// The template name, relative to a search directory.
		name: String,
	},
	/// Show how a template's comments would be rewritten.
	///
	/// Prints a line diff between the template as stored and the template
	/// with its comments rewritten.
	Diff {
		/// The template name, relative to a search directory.
		name: String,
	},
	/// List all templates in the search directories.
	///
	/// Only files matching `[templates] patterns` from `rcm.toml` are listed.
	/// A name found in several directories is listed once.
	List,
	/// List the comments in a template.
	///
	/// Shows each comment's position, syntax, marker, note and content without
	/// rewriting anything.
	Inspect {
		/// The template name, relative to a search directory.
		name: String,

		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = InspectFormat::Text)]
		format: InspectFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GuardArg {
	/// `{% verbatim %}...{% endverbatim %}`
	Django,
	/// `{% raw %}...{% endraw %}`
	Jinja,
}

impl From<GuardArg> for Guard {
	fn from(value: GuardArg) -> Self {
		match value {
			GuardArg::Django => Guard::Django,
			GuardArg::Jinja => Guard::Jinja,
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InspectFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
