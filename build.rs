fn main() {
    #[cfg(feature = "native")]
    native::build();
}

#[cfg(feature = "native")]
mod native {
    use std::env;
    use std::path::PathBuf;

    /// Vendored OpenZL checkout, used when `OPENZL_DIR` is not set.
    const VENDORED_SOURCE: &str = "third_party/openzl";

    pub fn build() {
        println!("cargo:rerun-if-changed=src/native/mod.rs");
        println!("cargo:rerun-if-changed=src/native/openzl_bridge.h");
        println!("cargo:rerun-if-changed=src/native/openzl_bridge.cc");
        println!("cargo:rerun-if-env-changed=OPENZL_DIR");

        let (include_dir, lib_dir) = match env::var_os("OPENZL_DIR") {
            Some(prefix) => {
                let prefix = PathBuf::from(prefix);
                (prefix.join("include"), prefix.join("lib"))
            }
            None => {
                println!("cargo:rerun-if-changed={VENDORED_SOURCE}");
                let dst = cmake::Config::new(VENDORED_SOURCE)
                    .define("BUILD_TESTING", "OFF")
                    .define("OPENZL_BUILD_TESTS", "OFF")
                    .define("OPENZL_BUILD_BENCHMARKS", "OFF")
                    .build();
                (dst.join("include"), dst.join("lib"))
            }
        };

        cxx_build::bridge("src/native/mod.rs")
            .file("src/native/openzl_bridge.cc")
            .include("src/native")
            .include(&include_dir)
            .std("c++17")
            .compile("openzl_bridge");

        println!("cargo:rustc-link-search=native={}", lib_dir.display());
        println!("cargo:rustc-link-lib=static=openzl");
    }
}
