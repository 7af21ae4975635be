//! Build script of the TinyBlink firmware.
//!
//! The STM32F769NI memory map is kept once for the whole workspace, in
//! `<workspace>/config/memory.x`, next to the `.cargo/config.toml` that selects the
//! probe-rs runner. `cortex-m-rt`'s `link.x` includes `memory.x` by name, so the file
//! is staged into `OUT_DIR` and that directory goes on the link search path.
//!
//! Host builds of the workspace (`cargo test` of the kernel) never link this crate, but
//! a host `cargo check --workspace` does run this script: the cortex-m-rt linker script
//! is therefore only requested for `thumb*` targets.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Memory map location, relative to the workspace root.
const K_MEMORY_MAP: &str = "config/memory.x";

fn workspace_root(p_crate_dir: &Path) -> &Path {
    // crates/tinyblink -> crates -> workspace root
    p_crate_dir
        .ancestors()
        .nth(2)
        .expect("tinyblink must stay at <workspace>/crates/tinyblink")
}

fn main() {
    let l_crate_dir =
        PathBuf::from(env::var_os("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let l_memory_map = workspace_root(&l_crate_dir).join(K_MEMORY_MAP);
    let l_out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR not set"));

    if let Err(l_err) = fs::copy(&l_memory_map, l_out_dir.join("memory.x")) {
        panic!("cannot stage the STM32F769NI memory map {:?}: {}", l_memory_map, l_err);
    }
    println!("cargo:rustc-link-search={}", l_out_dir.display());
    println!("cargo:rerun-if-changed={}", l_memory_map.display());

    let l_is_cortex_m = env::var("TARGET").is_ok_and(|l_target| l_target.starts_with("thumb"));
    if l_is_cortex_m {
        // no page alignment of output sections, it would waste flash
        println!("cargo:rustc-link-arg=--nmagic");
        println!("cargo:rustc-link-arg=-Tlink.x");
    }
}
