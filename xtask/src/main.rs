use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const EXTENSION_PACKAGE: &str = "wplace-overlay-extension";
const BACKGROUND_BIN: &str = "background";
const WASM_TARGET: &str = "wasm32-unknown-unknown";
const WASM_OUT_NAME: &str = "background_wasm";
const DIST_DIR: &str = "dist";
const STATIC_DIR: &str = "extension/static";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Wplace overlay extension task runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the background worker and assemble an unpacked extension in dist/
    Build {
        /// Build with the release profile
        #[arg(short, long)]
        release: bool,
    },

    /// Run all Rust tests
    Test,

    /// Run clippy linter
    Clippy,

    /// Remove dist/ and build artifacts
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { release } => build(release),
        Commands::Test => test(),
        Commands::Clippy => clippy(),
        Commands::Clean => clean(),
    }
}

fn build(release: bool) -> Result<()> {
    let profile = if release { "release" } else { "debug" };

    println!("🔨 Building background worker ({})...", profile);
    let mut args = vec![
        "build",
        "--package",
        EXTENSION_PACKAGE,
        "--bin",
        BACKGROUND_BIN,
        "--target",
        WASM_TARGET,
    ];
    if release {
        args.push("--release");
    }
    run_cmd("cargo", &args)?;

    let wasm_path = wasm_artifact(profile);
    if !wasm_path.exists() {
        anyhow::bail!("Expected wasm artifact at {}", wasm_path.display());
    }

    println!("🧩 Generating JavaScript bindings...");
    let wasm_path = wasm_path.to_string_lossy().to_string();
    run_cmd(
        "wasm-bindgen",
        &[
            "--target",
            "no-modules",
            "--no-typescript",
            "--out-dir",
            DIST_DIR,
            "--out-name",
            WASM_OUT_NAME,
            &wasm_path,
        ],
    )
    .context("wasm-bindgen CLI is required: cargo install wasm-bindgen-cli")?;

    println!("📦 Copying extension assets...");
    copy_static(Path::new(STATIC_DIR), Path::new(DIST_DIR))?;

    println!();
    println!("✅ Unpacked extension ready in {}/", DIST_DIR);
    println!("Load it from chrome://extensions with \"Load unpacked\"");

    Ok(())
}

fn wasm_artifact(profile: &str) -> PathBuf {
    Path::new("target")
        .join(WASM_TARGET)
        .join(profile)
        .join(format!("{}.wasm", BACKGROUND_BIN))
}

fn copy_static(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;

    for entry in fs::read_dir(from).with_context(|| format!("Failed to read {}", from.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let target = to.join(entry.file_name());
        fs::copy(entry.path(), &target)
            .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        println!("  ✅ {}", target.display());
    }

    Ok(())
}

fn test() -> Result<()> {
    println!("🧪 Running all tests...");
    run_cmd("cargo", &["test", "--workspace"])?;
    Ok(())
}

fn clippy() -> Result<()> {
    println!("🔍 Running clippy on workspace (warnings as errors)...");
    run_cmd(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    Ok(())
}

fn clean() -> Result<()> {
    println!("🧹 Removing {}/...", DIST_DIR);
    // Ignore error if dist/ doesn't exist
    let _ = fs::remove_dir_all(DIST_DIR);

    println!("🗑️  Running cargo clean...");
    run_cmd("cargo", &["clean"])?;

    Ok(())
}

fn run_cmd(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to run: {} {}", program, args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("Command failed: {} {}", program, args.join(" "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_artifact_path() {
        assert_eq!(
            wasm_artifact("release"),
            Path::new("target/wasm32-unknown-unknown/release/background.wasm")
        );
    }

    #[test]
    fn test_cli_parses_build_flags() {
        let cli = Cli::try_parse_from(["xtask", "build", "--release"]).unwrap();
        assert!(matches!(cli.command, Commands::Build { release: true }));

        let cli = Cli::try_parse_from(["xtask", "build"]).unwrap();
        assert!(matches!(cli.command, Commands::Build { release: false }));
    }

    #[test]
    fn test_static_assets_present() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(STATIC_DIR);
        assert!(dir.join("manifest.json").is_file());
        assert!(dir.join("background.js").is_file());
    }
}
