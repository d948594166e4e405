use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use clap_complete_nushell::Nushell;
use clap_mangen::Man;
use incubator_prebuild::cli::Args; // Import Args from the library

use std::io::Write;
use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct XtaskArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate man page and shell completions.
    GenerateDocs,
    /// Run cargo check.
    Check,
    /// Run cargo test.
    Test,
    /// Run cargo clippy.
    Clippy,
    /// Run cargo fmt --check.
    FmtCheck,
}

fn main() -> Result<()> {
    let args = XtaskArgs::parse();

    match args.command {
        Commands::GenerateDocs => generate_docs().context("Failed to generate docs"),
        Commands::Check => run_cargo("check", &[]).context("cargo check failed"),
        Commands::Test => run_cargo("test", &[]).context("cargo test failed"),
        Commands::Clippy => {
            run_cargo("clippy", &["--", "-D", "warnings"]).context("cargo clippy failed")
        }
        Commands::FmtCheck => run_cargo("fmt", &["--", "--check"]).context("cargo fmt failed"),
    }
}

fn run_cargo(command: &str, args: &[&str]) -> Result<()> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let mut cmd = Command::new(cargo);
    cmd.arg(command);
    cmd.args(args);
    cmd.current_dir(project_root()?);

    let status = cmd
        .status()
        .with_context(|| format!("Failed to execute cargo {command}"))?;

    if !status.success() {
        anyhow::bail!("cargo {} command failed", command);
    }
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(&env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask manifest has no parent directory")
}

fn generate_docs() -> Result<()> {
    let docs_dir = project_root()?.join("docs");
    let man_dir = docs_dir.join("man");
    let completions_dir = docs_dir.join("completions");

    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;
    fs::create_dir_all(&completions_dir).context("Failed to create completions directory")?;

    let cmd = Args::command().name("incubator-prebuild");
    let bin_name = cmd.get_name().to_string();

    let man_path = man_dir.join(format!("{bin_name}.1"));
    println!("Generating man page: {}", man_path.display());
    generate_man_page(&cmd, &man_path)?;

    generate_completions(&cmd, &completions_dir)?;

    println!(
        "Successfully generated man page and completions in: {}",
        docs_dir.display()
    );
    Ok(())
}

// --- Man Page Content Constants ---
// Note: Using roff formatting. \fB...\fR = bold, \fI...\fR = italic, \- = hyphen, \(bu = bullet

const MAN_FILES: &str = r#"
.TP
\fBsrc/include/build_info.h\fR
Generated on every run. Defines \fBBUILD_DATE\fR (local time, \fIYYYY\-MM\-DD HH:MM:SS\fR) and \fBBUILD_NUMBER\fR.
The previous number is read back from the first \fB#define BUILD_NUMBER\fR line and incremented. A missing file, a missing define or a non-numeric value restarts the counter at 1.
.TP
\fBdata/profiles.json\fR
Default incubation profile list. Written only when absent.
.TP
\fBdata/system.json\fR
Default system settings (setpoints, PID gains, motor timing, alarm thresholds). Written only when absent.
.PP
Existing seed files are never read, validated or overwritten. Delete one to have \fB{bin_name}\fR recreate its default on the next build.
"#;

const MAN_EXAMPLES: &str = r#"
.PP
.B Run by hand:
.IP
.nf
{bin_name} /path/to/firmware
.fi
.PP
.B From a PlatformIO extra script (pre:):
.IP
.nf
env.Execute("{bin_name} $PROJECT_DIR")
.fi
.PP
.B Verbose diagnostics:
.IP
.nf
{bin_name} \-v /path/to/firmware
.fi
"#;

const MAN_EXIT_STATUS: &str = r#"
.TP
\fB0\fR
Header stamped and all seed files present.
.TP
\fB2\fR
The build header could not be written (seeding is skipped), or invalid command line usage.
.TP
\fB3\fR
One or more seed files could not be created. Every seed file is still attempted.
"#;

const MAN_ENVIRONMENT: &str = r#"
.TP
\fBPROJECT_DIR\fR
Project root, used when no positional argument is given.
.TP
\fBRUST_LOG\fR
Log filter in \fBtracing_subscriber::EnvFilter\fR format. Same as \fB\-\-log\-filter\fR.
.TP
\fBNO_COLOR\fR
Disables colored status output.
"#;

/// Generates the man page with custom sections.
fn generate_man_page(cmd: &clap::Command, path: &Path) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    // Format date like 'Month Day, Year' e.g., "July 18, 2024"
    let date = chrono::Local::now().format("%B %d, %Y").to_string();
    let app_name_uppercase = cmd.get_name().to_uppercase();
    let bin_name = cmd.get_name();

    let mut buffer: Vec<u8> = Vec::new();

    writeln!(buffer, r#".TH "{}" 1 "{}" "{}" "User Commands""#, app_name_uppercase, date, version)?;
    Man::new(cmd.clone()).render(&mut buffer)?;

    let custom_sections = [
        ("FILES", MAN_FILES),
        ("EXAMPLES", MAN_EXAMPLES),
        ("EXIT STATUS", MAN_EXIT_STATUS),
        ("ENVIRONMENT", MAN_ENVIRONMENT),
    ];

    for (title, content_template) in custom_sections {
        writeln!(buffer, ".SH {}", title)?;
        let formatted_content = content_template.replace("{bin_name}", bin_name);
        writeln!(buffer, "{}", formatted_content)?;
    }

    fs::write(path, buffer).with_context(|| format!("Failed to write man page to {}", path.display()))?;
    Ok(())
}

/// Generates shell completion files.
fn generate_completions(cmd: &clap::Command, completions_dir: &Path) -> Result<()> {
    let bin_name = cmd.get_name().to_string();
    let shells = [
        (Shell::Bash, "bash"),
        (Shell::Elvish, "elv"),
        (Shell::Fish, "fish"),
        (Shell::PowerShell, "ps1"),
        (Shell::Zsh, "zsh"),
    ];

    for (shell, ext) in shells {
        let completions_path = completions_dir.join(format!("{bin_name}.{ext}"));
        println!("Generating completion file: {}", completions_path.display());
        let mut file = fs::File::create(&completions_path).with_context(|| {
            format!("Failed to create completion file: {}", completions_path.display())
        })?;
        generate(shell, &mut cmd.clone(), bin_name.clone(), &mut file);
    }

    let nu_path = completions_dir.join(format!("{bin_name}.nu"));
    println!("Generating Nushell completion file: {}", nu_path.display());
    let mut nu_file = fs::File::create(&nu_path)
        .with_context(|| format!("Failed to create Nushell completion file: {}", nu_path.display()))?;
    generate(Nushell, &mut cmd.clone(), bin_name, &mut nu_file);

    Ok(())
}
