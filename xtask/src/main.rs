use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "items_api_lambda";
const DIST_DIR: &str = "infra/items_api/dist";

/// Lambda binary and the zip the provisioning layer deploys it from.
const LAMBDA_ARTIFACTS: [(&str, &str); 7] = [
    ("hello_lambda", "hello.zip"),
    ("create_item_lambda", "create_item.zip"),
    ("list_items_lambda", "list_items.zip"),
    ("get_item_lambda", "get_item.zip"),
    ("update_item_lambda", "update_item.zip"),
    ("delete_item_lambda", "delete_item.zip"),
    ("items_runtime", "items_runtime.zip"),
];

#[derive(Parser)]
#[command(name = "xtask", about = "Test, check and package the items API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test suites of both crates
    Test,
    /// Run a CI job
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build the Lambda binaries and zip each one as `bootstrap`
    ServerlessPackage {
        /// Target triple; the host toolchain is used when omitted
        #[arg(long)]
        target: Option<String>,
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// fmt, clippy and tests
    Check,
    /// Debug build of every artifact
    Package,
    /// check, then package
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

/// Failure of a task step, reported once by `main`.
#[derive(Debug)]
struct TaskError(String);

impl std::fmt::Display for TaskError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

fn io_error<'a>(context: &str, path: &'a Path) -> impl FnOnce(std::io::Error) -> TaskError + 'a {
    let context = context.to_string();
    move |error| TaskError(format!("{context} '{}': {error}", path.display()))
}

fn cargo(args: &[&str]) -> Result<(), TaskError> {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .map_err(|error| TaskError(format!("could not start cargo: {error}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(TaskError(format!("`cargo {}` exited with {status}", args.join(" "))))
    }
}

fn test_all() -> Result<(), TaskError> {
    cargo(&["test", "-p", "items_api_core"])?;
    cargo(&["test", "-p", LAMBDA_PACKAGE])
}

fn check() -> Result<(), TaskError> {
    cargo(&["fmt", "--all", "--", "--check"])?;
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    test_all()
}

fn build_dir(target: Option<&str>, profile: BuildProfile) -> PathBuf {
    let profile_dir = match profile {
        BuildProfile::Debug => "debug",
        BuildProfile::Release => "release",
    };
    match target {
        Some(triple) => Path::new("target").join(triple).join(profile_dir),
        None => Path::new("target").join(profile_dir),
    }
}

fn package(target: Option<&str>, profile: BuildProfile) -> Result<(), TaskError> {
    let mut args = vec!["build", "-p", LAMBDA_PACKAGE, "--bins"];
    if let Some(triple) = target {
        args.extend(["--target", triple]);
    }
    if matches!(profile, BuildProfile::Release) {
        args.push("--release");
    }
    cargo(&args)?;

    let binaries = build_dir(target, profile);
    let dist = Path::new(DIST_DIR);
    fs::create_dir_all(dist).map_err(io_error("could not create", dist))?;

    for (binary, artifact) in LAMBDA_ARTIFACTS {
        let zip_path = dist.join(artifact);
        write_bootstrap_zip(&binaries.join(binary), &zip_path)?;
        eprintln!("packaged {}", zip_path.display());
    }
    Ok(())
}

fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) -> Result<(), TaskError> {
    let binary = fs::read(binary_path).map_err(io_error("could not read binary", binary_path))?;
    let file = fs::File::create(zip_path).map_err(io_error("could not create", zip_path))?;

    let zip_error = |error: zip::result::ZipError| {
        TaskError(format!("could not write '{}': {error}", zip_path.display()))
    };
    let mut archive = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    archive.start_file("bootstrap", options).map_err(zip_error)?;
    archive
        .write_all(&binary)
        .map_err(io_error("could not write", zip_path))?;
    archive.finish().map_err(zip_error)?;
    Ok(())
}

fn run(command: Commands) -> Result<(), TaskError> {
    match command {
        Commands::Test => test_all(),
        Commands::Ci { job } => match job {
            CiJob::Check => check(),
            CiJob::Package => package(None, BuildProfile::Debug),
            CiJob::All => {
                check()?;
                package(None, BuildProfile::Debug)
            }
        },
        Commands::ServerlessPackage { target, profile } => package(target.as_deref(), profile),
    }
}

fn main() {
    if let Err(error) = run(Cli::parse().command) {
        eprintln!("error: {error}");
        exit(1);
    }
}
