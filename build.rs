use std::env;
use std::path::PathBuf;

fn main() {
    // Only compile macOS specific code on macOS
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() == "macos" {
        let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

        // Create output paths
        let swift_obj_path = out_dir.join("microphone.o");
        let lib_path = out_dir.join("libfisiomap_microphone.a");

        // Compile Swift to object file
        let output = std::process::Command::new("swiftc")
            .args(&[
                "-c",
                "-module-name", "microphone",
                "-o", swift_obj_path.to_str().unwrap(),
                "src/macos/microphone.swift"
            ])
            .output()
            .expect("Failed to execute Swift compiler");

        if !output.status.success() {
            println!("cargo:warning=Swift compilation failed");
            println!("cargo:warning=stdout: {}", String::from_utf8_lossy(&output.stdout));
            println!("cargo:warning=stderr: {}", String::from_utf8_lossy(&output.stderr));
            panic!("Failed to compile Swift code");
        }

        // Remove existing library if it exists
        let _ = std::fs::remove_file(&lib_path);

        // Create static library from the object file
        let ar_output = std::process::Command::new("ar")
            .args(&[
                "rcs",
                lib_path.to_str().unwrap(),
                swift_obj_path.to_str().unwrap()
            ])
            .output()
            .expect("Failed to create static library");

        if !ar_output.status.success() {
            println!("cargo:warning=Failed to create static library");
            println!("cargo:warning=stderr: {}", String::from_utf8_lossy(&ar_output.stderr));
            panic!("Failed to create static library");
        }

        // Link the library
        println!("cargo:rustc-link-search=native={}", out_dir.display());
        println!("cargo:rustc-link-lib=static=fisiomap_microphone");

        // Link required macOS frameworks
        println!("cargo:rustc-link-lib=framework=Foundation");
        println!("cargo:rustc-link-lib=framework=AVFoundation");

        // Link Swift runtime
        println!("cargo:rustc-link-search=native=/usr/lib/swift");
        println!("cargo:rustc-link-lib=dylib=swiftCore");
        println!("cargo:rustc-link-lib=dylib=swiftFoundation");

        println!("cargo:rerun-if-changed=src/macos/microphone.swift");
    }

    tauri_build::build()
}
