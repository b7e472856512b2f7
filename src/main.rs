//! # Blockscape Entry Point
//!
//! Calls into the library's `run()` and turns a failure into a non-zero exit.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    if let Err(err) = blockscape::run() {
        log::error!("{err}");
        eprintln!("blockscape: {err}");
        std::process::exit(1);
    }
}
