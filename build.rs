use std::path::Path;
use std::process::Command;

fn main() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!(
        "cargo:rustc-env=BT_DUALBOOT_PROFILE={}",
        if profile == "release" { "release" } else { "development" }
    );
    println!("cargo:rustc-env=BT_DUALBOOT_GIT_HASH={}", git_hash);

    // A missing path would force a rerun on every build
    if Path::new(".git/HEAD").exists() {
        println!("cargo:rerun-if-changed=.git/HEAD");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
