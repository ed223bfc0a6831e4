//! Build script for FitCal
//!
//! Bumps the build counter in `build_number.txt` and exposes it, along with the
//! build time, as compile-time environment variables.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

fn read_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let path = Path::new(BUILD_NUMBER_FILE);
    let build = read_build_number(path) + 1;
    if let Err(e) = fs::write(path, build.to_string()) {
        println!("cargo:warning=Could not write {}: {}", BUILD_NUMBER_FILE, e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    println!("cargo:rustc-env=FITCAL_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=FITCAL_BUILD_TIMESTAMP={}", timestamp);
}
