// Generates include/ldrsim.h with `cbindgen` when it is on PATH, otherwise
// copies the checked-in header into $OUT_DIR.
//
// Consumers can include either:
//   - <repo>/ldrsim-ffi/include/ldrsim.h   (checked-in)
//   - $OUT_DIR/ldrsim.h

use std::{env, fs, path::PathBuf, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=include/ldrsim.h");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let header_repo = crate_dir.join("include").join("ldrsim.h");
    let header_out = out_dir.join("ldrsim.h");

    let have_cbindgen = Command::new("cbindgen")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    if have_cbindgen {
        let generated = Command::new("cbindgen")
            .args(["--crate", "ldrsim-ffi", "--lang", "C", "--output"])
            .arg(&header_out)
            .current_dir(&crate_dir)
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if generated {
            println!("cargo:warning=ldrsim-ffi: generated header with cbindgen -> {}", header_out.display());
            return;
        }
        println!("cargo:warning=ldrsim-ffi: cbindgen failed; using checked-in header");
    }

    if let Err(e) = fs::copy(&header_repo, &header_out) {
        println!("cargo:warning=ldrsim-ffi: could not copy {}: {e}", header_repo.display());
    }
}
