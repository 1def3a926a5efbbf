use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=BUILD_VERSION");

    // Explicit BUILD_VERSION wins (CI, container builds without .git)
    if let Ok(version) = std::env::var("BUILD_VERSION") {
        println!("cargo:rustc-env=BUILD_VERSION={}", version);
        return;
    }

    let hash = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| !o.stdout.is_empty())
        .unwrap_or(false);

    let version = if hash.is_empty() {
        "unknown".to_string()
    } else if dirty {
        format!("{}-dirty", hash)
    } else {
        hash
    };

    println!("cargo:rustc-env=BUILD_VERSION={}", version);
}
