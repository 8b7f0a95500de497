//! Embeds the git commit and build date for the startup banner.

use std::process::Command;

fn main() {
	println!("cargo:rerun-if-changed=build.rs");
	println!("cargo:rerun-if-changed=../../.git/HEAD");
	println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

	let commit = Command::new("git")
		.args(["rev-parse", "--short", "HEAD"])
		.output()
		.ok()
		.filter(|output| output.status.success())
		.and_then(|output| String::from_utf8(output.stdout).ok())
		.map(|sha| sha.trim().to_string())
		.filter(|sha| !sha.is_empty())
		.unwrap_or_else(|| "unknown".to_string());
	println!("cargo:rustc-env=LCU_GIT_COMMIT={commit}");

	// SOURCE_DATE_EPOCH wins when set
	let built = std::env::var("SOURCE_DATE_EPOCH")
		.ok()
		.and_then(|secs| secs.trim().parse::<i64>().ok())
		.and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
		.unwrap_or_else(chrono::Utc::now);
	println!("cargo:rustc-env=LCU_BUILD_DATE={}", built.format("%Y-%m-%d"));
}
