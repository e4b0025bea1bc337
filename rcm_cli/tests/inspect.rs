mod common;

use clap::Parser;
use rcm_cli::Commands;
use rcm_cli::InspectFormat;
use rcm_cli::RcmCli;
use rcm_core::AnyEmptyResult;
use serde_json::Value;
use similar_asserts::assert_eq;

const PAGE: &str = "<p>{# a #}</p>\n{% comment \"todo\" %}fix{% endcomment %}\n{# !render {{ x }} #}\n";

#[test]
fn inspect_lists_comments() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path(), "")?;
	common::write_file(tmp.path(), "templates/page.html", PAGE)?;

	let output = common::rcm_cmd()
		.arg("inspect")
		.arg("page.html")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let template_path = tmp.path().join("templates").join("page.html");
	let stdout = String::from_utf8(output.stdout)?
		.replace(&template_path.display().to_string(), "[TEMPLATE]");

	insta::assert_snapshot!(stdout, @r"
	page.html ([TEMPLATE])
	  2:1 block default [todo] fix
	  1:4 inline default a
	  3:1 inline render {{ x }}

	3 comment(s)
	");

	Ok(())
}

#[test]
fn inspect_lists_inline_comments_inside_hidden_blocks() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path(), "")?;
	common::write_file(
		tmp.path(),
		"templates/page.html",
		"{% comment \"!hide\" %}{# inner #}{% endcomment %}",
	)?;

	common::rcm_cmd()
		.arg("inspect")
		.arg("page.html")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("  1:1 block hide [!hide] {# inner #}\n"))
		.stdout(predicates::str::contains("  1:22 inline default inner\n"))
		.stdout(predicates::str::contains("2 comment(s)"));

	Ok(())
}

#[test]
fn inspect_without_comments() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path(), "")?;
	common::write_file(tmp.path(), "templates/page.html", "<p>plain</p>")?;

	common::rcm_cmd()
		.arg("inspect")
		.arg("page.html")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No comments found."));

	Ok(())
}

#[test]
fn inspect_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path(), "")?;
	common::write_file(tmp.path(), "templates/page.html", PAGE)?;

	let output = common::rcm_cmd()
		.arg("inspect")
		.arg("page.html")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout)?;

	assert_eq!(json["template"], "page.html");
	let comments = json["comments"].as_array().ok_or("comments is not an array")?;
	assert_eq!(comments.len(), 3);

	assert_eq!(comments[0]["form"], "block");
	assert_eq!(comments[0]["marker"], "default");
	assert_eq!(comments[0]["note"], "todo");
	assert_eq!(comments[0]["content"], "fix");
	assert_eq!(comments[0]["position"]["start"]["line"], 2);

	assert_eq!(comments[1]["form"], "inline");
	assert_eq!(comments[1]["note"], Value::Null);
	assert_eq!(comments[1]["position"]["start"]["column"], 4);

	assert_eq!(comments[2]["marker"], "render");
	assert_eq!(comments[2]["content"], "{{ x }}");

	Ok(())
}

#[test]
fn inspect_missing_template_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path(), "")?;

	common::rcm_cmd()
		.arg("inspect")
		.arg("missing.html")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("rcm::template_not_found"));

	Ok(())
}

#[test]
fn inspect_format_defaults_to_text() {
	let cli = RcmCli::parse_from(["rcm", "inspect", "page.html"]);
	match cli.command {
		Some(Commands::Inspect { name, format }) => {
			assert_eq!(name, "page.html");
			assert!(matches!(format, InspectFormat::Text));
		}
		_ => panic!("expected Inspect command"),
	}

	let cli = RcmCli::parse_from(["rcm", "inspect", "page.html", "--format", "json"]);
	match cli.command {
		Some(Commands::Inspect { format, .. }) => {
			assert!(matches!(format, InspectFormat::Json));
		}
		_ => panic!("expected Inspect command"),
	}
}
