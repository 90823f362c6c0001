//! Build script: content hash for the stylesheet.
//!
//! Templates link `main.<hash>.css` so the stylesheet can be served with an
//! immutable cache policy; the hash is exposed as `CSS_HASH` for
//! `env!("CSS_HASH")` in the `css_hash` template filter.

use std::path::Path;
use std::{env, fs};

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    // The stylesheet may not exist yet on a fresh checkout.
    let Ok(content) = fs::read(&css_path) else {
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or_default();
    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    // Copy to a derived path carrying the hash, which is what templates link.
    let derived_dir = Path::new(&manifest_dir).join("static/css/derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived CSS directory");
    fs::copy(&css_path, derived_dir.join(format!("main.{short_hash}.css")))
        .expect("Failed to copy CSS to derived directory");
}
