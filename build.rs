use std::fs;
use std::process::Command;

const WASM_CRATE_NAME: &str = "wasm-bursary-portal";

fn main() {
    println!("cargo::rerun-if-changed=wasm/src");
    println!("cargo::rerun-if-changed=wasm/Cargo.toml");
    println!("cargo::rerun-if-changed=dto/src");
    let compilation_path = "target-wasm";
    let pkg_path = "public/static/pkg";
    delete_entity(compilation_path);
    delete_entity(pkg_path);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "debug".to_owned());
    let profile = profile.as_str();
    let wasm_file_path = &format!(
        "{compilation_path}/wasm32-unknown-unknown/{profile}/{}.wasm",
        WASM_CRATE_NAME.replace('-', "_")
    );
    if compile_wasm(compilation_path, profile) {
        generate_bindings(wasm_file_path, pkg_path);
    }
}

/// Compile the frontend. A failure doesn't stop the server build,
/// the pages are then served without their behaviour.
fn compile_wasm(compilation_path: &str, profile: &str) -> bool {
    let target_dir = format!("--target-dir={compilation_path}");
    let mut build_args = vec![
        "build",
        "--target=wasm32-unknown-unknown",
        target_dir.as_str(),
        "--manifest-path=./wasm/Cargo.toml",
    ];
    if profile == "release" {
        build_args.push("--release");
    }
    match Command::new("cargo").args(build_args).output() {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last_line = stderr.lines().last().unwrap_or_default();
            println!("cargo::warning=Could not compile `{WASM_CRATE_NAME}`: {last_line}");
            false
        }
        Err(e) => {
            println!("cargo::warning=Failed to compile frontend: {e}");
            false
        }
    }
}

/// Generate JS & TS bindings
fn generate_bindings(wasm_file_path: &str, pkg_path: &str) {
    let out_dir_param = format!("--out-dir={pkg_path}");
    let wasm_bindgen_args = ["--target=web", out_dir_param.as_str(), wasm_file_path];
    match Command::new("wasm-bindgen").args(wasm_bindgen_args).output() {
        Ok(output) if output.status.success() => {}
        Ok(output) => println!(
            "cargo::warning=Failed to generate WASM wrappers: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ),
        Err(e) => println!("cargo::warning=Failed to generate WASM wrappers, is `wasm-bindgen` installed? {e}"),
    }
}

fn delete_entity(path: &str) {
    let result = match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(_) => Ok(()),
    };
    if let Err(e) = result {
        println!("cargo::warning=Couldn't delete {path}: {e}");
    }
}
