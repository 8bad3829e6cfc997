use std::process::Command;

/// Run a command and return its trimmed stdout, if it succeeded.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn main() {
    let commit_sha =
        command_stdout("git", &["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());
    let build_date = command_stdout("date", &["+%Y-%m-%d"]).unwrap_or_else(|| "unknown".into());

    // "rustc 1.92.0 (abc 2025-01-01)" -> "1.92.0"
    let rustc_version = command_stdout("rustc", &["--version"])
        .and_then(|s| {
            s.strip_prefix("rustc ")
                .and_then(|v| v.split_whitespace().next())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=JOBNET_COMMIT_SHA={}", commit_sha);
    println!("cargo:rustc-env=JOBNET_BUILD_DATE={}", build_date);
    println!("cargo:rustc-env=JOBNET_RUSTC_VERSION={}", rustc_version);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=JOBNET_COMMIT_SHA");
}
