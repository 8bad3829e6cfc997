//! Version and build information for jobnet

/// Full version line: "jobnet {version} ({commit} {date}) rustc {rustc_version}"
pub fn version() -> String {
    format!(
        "jobnet {} ({} {}) rustc {}",
        package_version(),
        build_commit(),
        build_date(),
        rustc_version()
    )
}

/// Package version (e.g., "0.3.0")
pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Short commit SHA, or "unknown" outside a git checkout
pub fn build_commit() -> &'static str {
    option_env!("JOBNET_COMMIT_SHA").unwrap_or("unknown")
}

/// Build date, or "unknown"
pub fn build_date() -> &'static str {
    option_env!("JOBNET_BUILD_DATE").unwrap_or("unknown")
}

/// Rust compiler version used for the build, or "unknown"
pub fn rustc_version() -> &'static str {
    option_env!("JOBNET_RUSTC_VERSION").unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_names_tool_and_package_version() {
        let line = version();
        assert!(line.starts_with("jobnet "));
        assert!(line.contains(package_version()));
        assert!(line.contains("rustc"));
    }
}
