use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use rcm_cli::Commands;
use rcm_cli::InspectFormat;
use rcm_cli::RcmCli;
use rcm_core::CommentForm;
use rcm_core::FilesystemSource;
use rcm_core::Loader;
use rcm_core::Marker;
use rcm_core::Occurrence;
use rcm_core::Preprocessor;
use rcm_core::RcmConfig;
use rcm_core::inspect;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
	let args = RcmCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Transform { file }) => run_transform(&args, file.as_deref()),
		Some(Commands::Render { name }) => run_render(&args, name),
		Some(Commands::Diff { name }) => run_diff(&args, name),
		Some(Commands::List) => run_list(&args),
		Some(Commands::Inspect { name, format }) => run_inspect(&args, name, *format),
		None => {
			eprintln!("No subcommand specified. Run `rcm --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<rcm_core::RcmError>() {
			Ok(rcm_err) => {
				let report: miette::Report = (*rcm_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &RcmCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// The config from `rcm.toml` with command line overrides applied.
fn resolve_config(args: &RcmCli, root: &Path) -> Result<RcmConfig, Box<dyn std::error::Error>> {
	let mut config = RcmConfig::load(root)?.unwrap_or_default();

	if args.debug {
		config.debug = true;
	}
	if args.no_render_comments {
		config.render_comments = false;
	}
	if let Some(guard) = args.guard {
		config.guard = guard.into();
	}

	tracing::debug!(
		debug = config.debug,
		render_comments = config.render_comments,
		guard = ?config.guard,
		"resolved config"
	);

	Ok(config)
}

fn build_loader(
	args: &RcmCli,
) -> Result<(Loader<FilesystemSource>, RcmConfig), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = resolve_config(args, &root)?;

	let mut dirs: Vec<PathBuf> = args.dirs.iter().map(|dir| root.join(dir)).collect();
	dirs.extend(config.search_dirs(&root));
	tracing::debug!(?dirs, "template search directories");

	let loader = Loader::new(FilesystemSource::new(dirs), config.loader_options());
	Ok((loader, config))
}

fn run_transform(args: &RcmCli, file: Option<&Path>) -> CliResult {
	let source = match file {
		Some(path) if path != Path::new("-") => {
			let bytes = std::fs::read(path)?;
			String::from_utf8(bytes).map_err(|_| {
				rcm_core::RcmError::InvalidEncoding {
					path: path.display().to_string(),
				}
			})?
		}
		_ => {
			let mut source = String::new();
			std::io::stdin().read_to_string(&mut source)?;
			source
		}
	};

	let root = resolve_root(args);
	let config = resolve_config(args, &root)?;
	print!("{}", Preprocessor::new(config.guard).process(&source));

	Ok(())
}

fn run_render(args: &RcmCli, name: &str) -> CliResult {
	let (loader, _) = build_loader(args)?;
	let template = loader.load(name)?;

	if !loader.options().preprocess {
		tracing::info!("comments are not rewritten; pass --debug to enable");
	}

	print!("{}", template.source);
	Ok(())
}

fn run_diff(args: &RcmCli, name: &str) -> CliResult {
	let (loader, config) = build_loader(args)?;
	let template = loader.find(name)?;
	let transformed = Preprocessor::new(config.guard).process(&template.source);

	if transformed == template.source {
		println!("No comments to rewrite in {name}.");
		return Ok(());
	}

	println!("{}", colored!(format!("--- {name}"), red));
	println!("{}", colored!(format!("+++ {name} (rewritten)"), green));
	print_diff(&template.source, &transformed);

	Ok(())
}

fn run_list(args: &RcmCli) -> CliResult {
	let (loader, config) = build_loader(args)?;
	let names = loader.templates(&config.templates.patterns)?;

	if names.is_empty() {
		println!("No templates found.");
		return Ok(());
	}

	for name in &names {
		println!("{name}");
	}
	println!("\n{} template(s)", names.len());

	Ok(())
}

#[derive(Serialize)]
struct InspectReport<'a> {
	template: &'a str,
	path: &'a Path,
	comments: &'a [Occurrence],
}

fn run_inspect(args: &RcmCli, name: &str, format: InspectFormat) -> CliResult {
	let (loader, _) = build_loader(args)?;
	let template = loader.find(name)?;
	let occurrences = inspect(&template.source);

	match format {
		InspectFormat::Json => {
			let report = InspectReport {
				template: name,
				path: &template.origin.name,
				comments: &occurrences,
			};
			println!("{}", serde_json::to_string_pretty(&report)?);
		}
		InspectFormat::Text => {
			println!(
				"{} {}",
				colored!(name, bold),
				colored!(format!("({})", template.origin.name.display()), dimmed)
			);

			if occurrences.is_empty() {
				println!("  No comments found.");
				return Ok(());
			}

			for occurrence in &occurrences {
				println!("  {}", describe(occurrence));
			}
			println!("\n{} comment(s)", occurrences.len());
		}
	}

	Ok(())
}

/// One line summary of an occurrence, e.g. `3:5 inline render {{ x }}`.
fn describe(occurrence: &Occurrence) -> String {
	let form = match occurrence.form {
		CommentForm::Inline => "inline",
		CommentForm::Block => "block",
	};
	let start = occurrence.position.start;
	let marker = match occurrence.marker {
		Marker::Default => colored!(occurrence.marker.as_str(), dimmed),
		Marker::Hide => colored!(occurrence.marker.as_str(), red),
		Marker::Render => colored!(occurrence.marker.as_str(), green),
	};
	let note = occurrence
		.note
		.as_deref()
		.map(|note| format!(" [{note}]"))
		.unwrap_or_default();

	format!(
		"{}:{} {form} {marker}{note} {}",
		start.line,
		start.column,
		preview(&occurrence.content)
	)
}

/// The first line of `content`, with an ellipsis when anything was cut.
fn preview(content: &str) -> String {
	const MAX_CHARS: usize = 60;

	let first_line = content.lines().next().unwrap_or_default();
	let mut preview: String = first_line.chars().take(MAX_CHARS).collect();
	if preview.len() < content.len() {
		preview.push('…');
	}
	preview
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		let line = match change.tag() {
			ChangeTag::Delete => colored!(format!("-{change}"), red),
			ChangeTag::Insert => colored!(format!("+{change}"), green),
			ChangeTag::Equal => format!(" {change}"),
		};
		print!("{line}");
		if change.missing_newline() {
			println!();
		}
	}
}
