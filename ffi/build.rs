use std::env;
use std::path::PathBuf;

/// Generates `httpcodec.h` into `OUT_DIR`. Set `HTTPCODEC_HEADER_DIR` to also
/// place a copy somewhere a C build can pick it up.
fn main() {
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")).unwrap_or_default();

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-env-changed=HTTPCODEC_HEADER_DIR");

    let bindings = match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => bindings,
        Err(e) => {
            println!("cargo:warning=header not generated: {e}");
            return;
        }
    };

    bindings.write_to_file(out_dir.join("httpcodec.h"));

    if let Some(dir) = env::var_os("HTTPCODEC_HEADER_DIR").map(PathBuf::from) {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            println!("cargo:warning=cannot create {}: {e}", dir.display());
            return;
        }
        bindings.write_to_file(dir.join("httpcodec.h"));
    }
}
