//! A build script to install the C header of `quadrule`.
//!
//! When `CARGO_C_QUADRULE_INSTALL_PREFIX` is set, `include/quadrule.h` is
//! copied to `<prefix>/include/quadrule_capi/quadrule.h`.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=include/quadrule.h");

    if let Ok(prefix) = env::var("CARGO_C_QUADRULE_INSTALL_PREFIX") {
        let prefix_path = PathBuf::from(prefix);
        let include_path = prefix_path.join("include").join("quadrule_capi");

        fs::create_dir_all(&include_path).expect("Failed to create include directory.");

        let source_header = PathBuf::from("include/quadrule.h");
        let dest_header = include_path.join("quadrule.h");

        fs::copy(&source_header, &dest_header).expect("Failed to copy header file.");
    }
}
