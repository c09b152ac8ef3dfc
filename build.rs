//! Build script for zmq-context.
//!
//! Only does work when the `libzmq` feature is enabled: points the linker
//! at a custom libzmq location and picks static or dynamic linkage.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=LIBZMQ_LIB_DIR");
    println!("cargo:rerun-if-env-changed=LIBZMQ_STATIC");

    if env::var_os("CARGO_FEATURE_LIBZMQ").is_none() {
        return;
    }

    if let Some(dir) = env::var_os("LIBZMQ_LIB_DIR") {
        let dir = PathBuf::from(dir);
        if !dir.exists() {
            println!(
                "cargo:warning=LIBZMQ_LIB_DIR={} does not exist, falling back to system paths",
                dir.display()
            );
        } else {
            println!("cargo:rustc-link-search=native={}", dir.display());
        }
    }

    let statik = env::var("LIBZMQ_STATIC").map(|v| v == "1").unwrap_or(false);
    if statik {
        println!("cargo:rustc-link-lib=static=zmq");

        // A static libzmq is C++ and pulls in the platform's C++ runtime.
        #[cfg(target_os = "macos")]
        {
            println!("cargo:rustc-link-lib=c++");
        }

        #[cfg(target_os = "linux")]
        {
            println!("cargo:rustc-link-lib=stdc++");
            println!("cargo:rustc-link-lib=pthread");
        }

        #[cfg(target_os = "windows")]
        {
            println!("cargo:rustc-link-lib=ws2_32");
            println!("cargo:rustc-link-lib=iphlpapi");
            println!("cargo:rustc-link-lib=advapi32");
        }
    } else {
        println!("cargo:rustc-link-lib=dylib=zmq");
    }
}
