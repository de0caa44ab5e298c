// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Build script for the deskbot firmware
//!
//! Only bare-metal builds need linker setup. Host builds (the navigation
//! library and its tests) skip everything below.
//!
//! For `target_os = "none"` this script:
//! - Copies `memory.x` into `OUT_DIR` and adds it to the linker search path
//! - Passes `-Tlink.x` (cortex-m-rt) and `-Tdefmt.x` (defmt) to the binary only
//!
//! # Memory Layout
//! The `memory.x` file defines the RP2350's memory regions:
//! - **FLASH**: 4MB starting at 0x10000000
//! - **RAM**: 512KB starting at 0x20000000
//! - **SRAM8**: 4KB starting at 0x20080000
//! - **SRAM9**: 4KB starting at 0x20081000

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
