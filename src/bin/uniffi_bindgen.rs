//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generates the Swift and Kotlin sources a mobile host app compiles
//! against the mealdb-browse library.
//!
//! ## Usage
//!
//! Swift, for the iOS recipe screen:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libmealdb_browse.a --language swift --out-dir ./bindings/ios
//! ```
//!
//! Kotlin, for Android:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libmealdb_browse.so --language kotlin --out-dir ./bindings/android
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
