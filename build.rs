use std::env;
use std::fs;
use std::path::Path;

/// Files placed next to the executable when present under assets/
const ASSETS: [&str; 3] = ["icon.ico", "icon.png", "settings.toml"];

fn main() {
    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    // OUT_DIR is target/<profile>/build/selfnote-xxx/out; the exe sits in target/<profile>/
    let Some(profile_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        return;
    };

    for name in ASSETS {
        let src = Path::new("assets").join(name);
        println!("cargo:rerun-if-changed={}", src.display());
        if !src.exists() {
            continue;
        }
        let dst = profile_dir.join(name);
        if let Err(e) = fs::copy(&src, &dst) {
            println!("cargo:warning=Failed to copy {}: {}", name, e);
        }
    }
}
