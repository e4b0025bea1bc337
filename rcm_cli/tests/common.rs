use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn rcm_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("rcm"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write `contents` to `root/relative`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, contents: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, contents)
}

/// A project whose `rcm.toml` searches `templates/`.
#[allow(dead_code)]
pub fn write_project(root: &Path, config: &str) -> std::io::Result<()> {
	write_file(
		root,
		"rcm.toml",
		&format!("{config}\n[templates]\ndirs = [\"templates\"]\n"),
	)
}
