use apksize::cmd::{self, ReportConfig, TypeFilter};
use apksize::export::ExportTarget;
use clap::Parser;
use std::path::PathBuf;
use std::process;

/// APK/AAB size breakdown per module
///
/// apksize attributes every byte of an Android package to an asset bundle,
/// a native library or the App residual, and renders the result as a
/// Markdown, CSV or Excel report.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the .apk or .aab file
    archive: PathBuf,

    /// List entry paths under lib/ and assets/, then exit
    #[arg(long)]
    show_structure: bool,

    /// Print the inferred module mapping before the report
    #[arg(long)]
    gen: bool,

    /// Restrict aggregation to one module kind
    #[arg(long, value_enum, default_value = "all")]
    r#type: TypeFilter,

    /// Export to an Excel workbook
    #[arg(long, value_name = "FILE.xlsx", group = "export")]
    excel: Option<PathBuf>,

    /// Export to a CSV file
    #[arg(long, value_name = "FILE.csv", group = "export")]
    csv: Option<PathBuf>,

    /// Export to a Markdown file
    #[arg(long, value_name = "FILE.md", group = "export")]
    md: Option<PathBuf>,
}

impl Cli {
    fn export_target(&self) -> ExportTarget {
        if let Some(path) = &self.excel {
            ExportTarget::Excel(path.clone())
        } else if let Some(path) = &self.csv {
            ExportTarget::Csv(path.clone())
        } else if let Some(path) = &self.md {
            ExportTarget::Markdown(path.clone())
        } else {
            ExportTarget::Stdout
        }
    }
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    let config = ReportConfig {
        archive_path: cli.archive.clone(),
        show_structure: cli.show_structure,
        generate_mapping: cli.gen,
        type_filter: cli.r#type,
        export_target: cli.export_target(),
    };

    let result = if config.show_structure {
        cmd::cmd_show_structure(&config.archive_path)
    } else {
        cmd::cmd_report(&config)
    };

    if let Err(e) = result {
        use apksize::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
