//! The binary refuses to start while another instance holds the lock file.

use std::path::PathBuf;
use std::process::Command;

fn lcu_binary() -> PathBuf {
	let mut path = std::env::current_exe().unwrap();
	path.pop();
	path.pop();
	path.push(format!("lcu{}", std::env::consts::EXE_SUFFIX));
	path
}

#[test]
fn existing_lock_file_fails_fast() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	let lock = dir.path().join("lcu.lock");
	std::fs::write(&lock, "4242\n")?;

	let output = Command::new(lcu_binary())
		.current_dir(dir.path())
		.args(["--process-name", "definitely-not-a-real-process", "watch", "--search-interval", "1"])
		.env("RUST_LOG", "off")
		.output()?;

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(!output.status.success(), "expected failure, stderr: {stderr}");
	assert_eq!(output.status.code(), Some(1));
	assert!(stderr.contains("already running"), "stderr: {stderr}");
	assert_eq!(std::fs::read_to_string(&lock)?, "4242\n");
	Ok(())
}

#[test]
fn explicit_lock_path_is_honoured() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	let lock = dir.path().join("custom.lock");
	std::fs::write(&lock, "1\n")?;

	let output = Command::new(lcu_binary())
		.args(["watch", "--lock-file"])
		.arg(&lock)
		.env("RUST_LOG", "off")
		.output()?;

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("already running"));
	assert_eq!(std::fs::read_to_string(&lock)?, "1\n");
	Ok(())
}

#[test]
fn version_flag_prints_version() -> anyhow::Result<()> {
	let output = Command::new(lcu_binary()).arg("--version").output()?;
	assert!(output.status.success());
	assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
	Ok(())
}
