use std::env;
use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

fn main() {
    let opt_level = env::var("OPT_LEVEL").unwrap_or_else(|_| "0".to_string());
    let is_optimized = opt_level != "0";

    // Release builds are stamped with the commit they were built from, when there is one
    let version = if is_optimized {
        match (git(&["status", "--porcelain"]), git(&["rev-parse", "HEAD"])) {
            (Some(status), Some(hash)) if status.trim().is_empty() => hash,
            (Some(_), Some(hash)) => format!("{} (dirty)", hash.trim()),
            _ => "Untracked build".into(),
        }
    } else {
        "Development build".into()
    };

    println!("cargo:rustc-env=RELEASE={}", version.trim());
}
