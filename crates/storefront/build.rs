//! Build script for storefront crate.
//!
//! Generates a content-based hash for the stylesheet and script so templates
//! can reference them with a cache-busting query string.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    let mut hasher = Sha256::new();
    for asset in ["css/main.css", "js/storefront.js"] {
        let path = static_dir.join(asset);

        // Tell Cargo to rerun if the asset changes
        println!("cargo:rerun-if-changed={}", path.display());

        match fs::read(&path) {
            Ok(content) => hasher.update(&content),
            Err(e) => println!("cargo:warning=Could not read {asset}: {e}"),
        }
    }

    // First 8 chars of SHA256 over all assets
    let hash = format!("{:x}", hasher.finalize());
    let short_hash = &hash[..8];

    // Set environment variable for compile-time access
    println!("cargo:rustc-env=ASSET_HASH={short_hash}");
}
