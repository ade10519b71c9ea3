//! Embeds the build timestamp as `BUILD_DATE`.

use chrono::{SecondsFormat, Utc};

fn main() {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-env=BUILD_DATE={stamp}");
}
