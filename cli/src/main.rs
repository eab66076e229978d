//! draftpress CLI - export drafted documents

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use draftpress::{
    Document, DocumentKind, DocxOptions, ExportArtifact, ExportFormat, ExportOptions,
    ExportRequest, ExportedFile, Exporter, HttpDocumentCollaborator, JsonFormat, LayoutOptions,
    PageSize,
};

#[derive(Parser)]
#[command(name = "draftpress")]
#[command(version)]
#[command(about = "Export drafted documents to PDF, DOCX and remote documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export to a paginated PDF
    Pdf {
        #[command(flatten)]
        draft: DraftArgs,

        #[command(flatten)]
        file: FileArgs,
    },

    /// Export to a DOCX document
    #[command(alias = "word")]
    Docx {
        #[command(flatten)]
        draft: DraftArgs,

        #[command(flatten)]
        file: FileArgs,
    },

    /// Create a plain-text document on the remote service
    #[command(alias = "gdocs")]
    Remote {
        #[command(flatten)]
        draft: DraftArgs,

        #[command(flatten)]
        remote: RemoteArgs,

        /// Open the created document in the browser
        #[arg(long)]
        open: bool,

        /// Print the created document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export to a format given by name (pdf, docx, remote, ...)
    Export {
        /// Target format
        #[arg(short, long)]
        format: String,

        #[command(flatten)]
        draft: DraftArgs,

        #[command(flatten)]
        file: FileArgs,

        #[command(flatten)]
        remote: RemoteArgs,

        /// Open a created remote document in the browser
        #[arg(long)]
        open: bool,

        /// Print a created remote document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the formatting-free text
    Text {
        /// Input file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump parsed blocks or laid-out pages as JSON
    Json {
        /// Input file (stdin if omitted or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Dump laid-out pages instead of blocks
        #[arg(long)]
        pages: bool,

        /// Page size used with --pages
        #[arg(long, value_enum, default_value = "a4")]
        page_size: PageSizeArg,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct DraftArgs {
    /// Input file (stdin if omitted or "-")
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Document title (defaults to the input file name or first heading)
    #[arg(short, long)]
    title: Option<String>,

    /// Kind of document, used as a filename prefix
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,
}

#[derive(Args)]
struct FileArgs {
    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Page size
    #[arg(long, value_enum, default_value = "a4")]
    page_size: PageSizeArg,

    /// Record the current time as the creation date
    #[arg(long)]
    timestamp: bool,
}

#[derive(Args)]
struct RemoteArgs {
    /// Document service endpoint
    #[arg(long, env = "DRAFTPRESS_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer token for the document service
    #[arg(long, env = "DRAFTPRESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Email,
    Resume,
    CoverLetter,
    Blog,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Email => DocumentKind::Email,
            KindArg::Resume => DocumentKind::Resume,
            KindArg::CoverLetter => DocumentKind::CoverLetter,
            KindArg::Blog => DocumentKind::BlogPost,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    /// ISO A4 (210 x 297 mm)
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(size: PageSizeArg) -> Self {
        match size {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pdf { draft, file } => cmd_file(ExportFormat::Print, &draft, &file),
        Commands::Docx { draft, file } => cmd_file(ExportFormat::WordProcessor, &draft, &file),
        Commands::Remote {
            draft,
            remote,
            open,
            json,
        } => cmd_remote(&draft, &remote, open, json),
        Commands::Export {
            format,
            draft,
            file,
            remote,
            open,
            json,
        } => cmd_export(&format, &draft, &file, &remote, open, json),
        Commands::Text { input, output } => cmd_text(input.as_deref(), output.as_deref()),
        Commands::Json {
            input,
            output,
            pages,
            page_size,
            compact,
        } => cmd_json(input.as_deref(), output.as_deref(), pages, page_size, compact),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_file(
    format: ExportFormat,
    draft: &DraftArgs,
    file: &FileArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = build_request(format, draft)?;
    let exporter = Exporter::new().with_options(export_options(file));
    let exported = exporter.export_file(&request)?;
    save(&exported, file.output.as_deref())
}

fn cmd_remote(
    draft: &DraftArgs,
    remote: &RemoteArgs,
    open_browser: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = build_request(ExportFormat::Remote, draft)?;
    let exporter = Exporter::new().with_collaborator(collaborator(remote)?);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Creating remote document...");

    let rt = tokio::runtime::Runtime::new()?;
    let artifact = rt.block_on(exporter.export(&request));
    pb.finish_and_clear();

    let document = match artifact? {
        ExportArtifact::Remote(document) => document,
        ExportArtifact::File(_) => return Err("remote export returned a file".into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        println!("{} {}", "Created".green(), document.document_url);
    }

    if open_browser {
        open::that(&document.document_url)?;
    }

    Ok(())
}

fn cmd_export(
    format: &str,
    draft: &DraftArgs,
    file: &FileArgs,
    remote: &RemoteArgs,
    open_browser: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: ExportFormat = format.parse()?;
    if format.is_remote() {
        cmd_remote(draft, remote, open_browser, json)
    } else {
        cmd_file(format, draft, file)
    }
}

fn cmd_text(input: Option<&Path>, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = draftpress::to_plain_text(&read_input(input)?);
    emit(&text, output)
}

fn cmd_json(
    input: Option<&Path>,
    output: Option<&Path>,
    pages: bool,
    page_size: PageSizeArg,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_input(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if pages {
        let laid_out = draftpress::Draftpress::new()
            .with_page_size(page_size.into())
            .parse(&content)
            .layout();
        draftpress::render::to_json(&laid_out, format)?
    } else {
        draftpress::to_json(&content, format)?
    };

    emit(&json, output)
}

fn cmd_version() {
    println!("{} {}", "draftpress".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Drafted document export tool");
    println!();
    println!("License: MIT");
}

fn build_request(
    format: ExportFormat,
    draft: &DraftArgs,
) -> Result<ExportRequest, Box<dyn std::error::Error>> {
    let content = read_input(draft.input.as_deref())?;
    let title = resolve_title(draft, &content);

    let mut request = ExportRequest::new(content, format, title);
    if let Some(kind) = draft.kind {
        request = request.with_kind(kind.into());
    }
    Ok(request)
}

fn export_options(file: &FileArgs) -> ExportOptions {
    let page_size: PageSize = file.page_size.into();
    let mut options = ExportOptions::new()
        .with_layout(LayoutOptions::new().with_page_size(page_size))
        .with_docx(DocxOptions::new().with_page_size(page_size));
    if file.timestamp {
        options = options.with_created(Utc::now());
    }
    options
}

fn collaborator(
    remote: &RemoteArgs,
) -> Result<Arc<HttpDocumentCollaborator>, Box<dyn std::error::Error>> {
    let endpoint = remote
        .endpoint
        .as_deref()
        .ok_or("no endpoint given (use --endpoint or DRAFTPRESS_ENDPOINT)")?;
    let token = remote
        .token
        .as_deref()
        .ok_or("no token given (use --token or DRAFTPRESS_TOKEN)")?;

    let client = HttpDocumentCollaborator::new(endpoint, token)
        .with_timeout(Duration::from_secs(remote.timeout))?;
    Ok(Arc::new(client))
}

/// Title precedence: explicit flag, input file stem, first heading.
fn resolve_title(draft: &DraftArgs, content: &str) -> String {
    if let Some(title) = &draft.title {
        return title.clone();
    }

    let from_file = draft
        .input
        .as_deref()
        .filter(|p| !is_stdin(p))
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned());

    from_file
        .or_else(|| Document::parse(content).first_heading().map(str::to_string))
        .unwrap_or_default()
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if !is_stdin(path) => fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn save(file: &ExportedFile, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = output.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let path = file.write_to(dir)?;
    println!(
        "{} {} ({} bytes)",
        "Saved to".green(),
        path.display(),
        file.len()
    );
    Ok(())
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(input: Option<&str>, title: Option<&str>) -> DraftArgs {
        DraftArgs {
            input: input.map(PathBuf::from),
            title: title.map(str::to_string),
            kind: None,
        }
    }

    #[test]
    fn test_title_from_flag() {
        let args = draft(Some("notes.txt"), Some("Cover Letter"));
        assert_eq!(resolve_title(&args, "# Heading"), "Cover Letter");
    }

    #[test]
    fn test_title_from_file_stem() {
        let args = draft(Some("drafts/jane_resume.txt"), None);
        assert_eq!(resolve_title(&args, "# Heading"), "jane_resume");
    }

    #[test]
    fn test_title_from_heading_on_stdin() {
        let args = draft(Some("-"), None);
        assert_eq!(resolve_title(&args, "\n## Weekly Update\nbody"), "Weekly Update");

        let args = draft(None, None);
        assert_eq!(resolve_title(&args, "no heading"), "");
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        fs::write(&path, "# Title\n* item").unwrap();

        let content = read_input(Some(&path)).unwrap();
        assert_eq!(content, "# Title\n* item");
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let exporter = Exporter::new();
        let request = ExportRequest::new("Hello", ExportFormat::Print, "hello");
        let file = exporter.export_file(&request).unwrap();

        save(&file, Some(&out)).unwrap();
        assert!(out.join("hello.pdf").exists());
    }

    #[test]
    fn test_cli_parses_export() {
        let cli = Cli::try_parse_from([
            "draftpress",
            "export",
            "--format",
            "docx",
            "draft.txt",
            "--kind",
            "cover-letter",
        ])
        .unwrap();
        match cli.command {
            Commands::Export { format, draft, .. } => {
                assert_eq!(format, "docx");
                assert!(draft.kind == Some(KindArg::CoverLetter));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_cli_parses_export_remote_open() {
        let cli = Cli::try_parse_from([
            "draftpress",
            "export",
            "--format",
            "gdocs",
            "draft.txt",
            "--endpoint",
            "https://docs.example.com/api/documents",
            "--open",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Export {
                format, open, json, ..
            } => {
                assert_eq!(format, "gdocs");
                assert!(open);
                assert!(json);
            }
            _ => panic!("expected export"),
        }
    }
}
