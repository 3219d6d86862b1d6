use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use docsum::client::{HttpClient, RemoteApi};
use docsum::config::ClientConfig;
use docsum::notice::{surface, Level, Notice};
use docsum::screens::auth::AuthFlow;
use docsum::screens::dashboard::Dashboard;
use docsum::screens::file_detail::FileDetail;
use docsum::screens::files::FilesScreen;
use docsum::screens::profile::ProfileScreen;
use docsum::screens::summaries::SummariesScreen;
use docsum::screens::format_size;
use docsum::session::SessionStore;
use docsum::{AppError, FileId, ProfileUpdate, Registration, SummaryId, UploadFile};

#[derive(Parser)]
#[command(name = "docsum-cli")]
#[command(about = "Upload PDFs and read their AI summaries", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides DOCSUM_API_URL)
    #[arg(short, long)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides DOCSUM_TIMEOUT_SECS)
    #[arg(short, long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and keep the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the session token
    Logout,

    /// Show whether a session is stored
    Status,

    /// Totals and most recent items
    Dashboard,

    /// List uploaded files
    Files,

    /// Upload one or more PDFs
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Download a file into a directory
    Download {
        #[arg(short = 'i', long = "file-id")]
        file_id: FileId,

        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Show a file and its summary
    Show {
        #[arg(short = 'i', long = "file-id")]
        file_id: FileId,
    },

    /// Summarize a single file
    Summarize {
        #[arg(short = 'i', long = "file-id")]
        file_id: FileId,
    },

    /// One consolidated summary over several files
    Consolidate {
        #[arg(required = true)]
        file_ids: Vec<FileId>,

        /// What the summary should focus on
        #[arg(short, long, default_value = "")]
        focus: String,
    },

    /// List summaries, newest first
    Summaries,

    /// Print a summary in full
    Read {
        #[arg(short = 'i', long = "summary-id")]
        summary_id: SummaryId,
    },

    /// Show the profile
    Profile,

    /// Replace full name and description
    UpdateProfile {
        #[arg(long)]
        full_name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

struct DocsumCli {
    api: Arc<dyn RemoteApi>,
    session: SessionStore,
    base_url: String,
}

impl DocsumCli {
    async fn new(config: ClientConfig) -> Result<Self, AppError> {
        let session = SessionStore::open(&config.token_path).await?;
        let client = HttpClient::new(&config, session.clone())?;
        Ok(DocsumCli {
            api: Arc::new(client),
            session,
            base_url: config.base_url,
        })
    }

    async fn run(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Login { username, password } => {
                AuthFlow::new(Arc::clone(&self.api), self.session.clone())
                    .login(&username, &password)
                    .await?;
                print_notice(&Notice::success("Welcome!", "Logged in."));
            }
            Commands::Register { full_name, username, email, password } => {
                let user = AuthFlow::new(Arc::clone(&self.api), self.session.clone())
                    .register(&Registration { full_name, username, email, password })
                    .await?;
                println!("Account created for {} (id {}). You can log in now.", user.username, user.id);
            }
            Commands::Logout => {
                AuthFlow::new(Arc::clone(&self.api), self.session.clone()).logout().await?;
                print_notice(&Notice::success("Goodbye!", "Logged out."));
            }
            Commands::Status => {
                if self.session.is_authenticated().await {
                    println!("Logged in ({})", self.base_url);
                } else {
                    println!("Not logged in");
                }
            }
            Commands::Dashboard => {
                let mut dashboard = Dashboard::new(Arc::clone(&self.api));
                dashboard.load().await?;
                if let Some(stats) = dashboard.stats() {
                    println!("Files: {}    Summaries: {}", stats.total_files, stats.total_summaries);
                }
                println!("\nRecent files:");
                for file in dashboard.recent_files() {
                    println!("  {:>5}  {}  {}", file.id, file.upload_date.format("%Y-%m-%d %H:%M"), file.file_name);
                }
                println!("\nRecent summaries:");
                for summary in dashboard.recent_summaries() {
                    println!("  {:>5}  {}  files {:?}", summary.id, summary.created_at.format("%Y-%m-%d %H:%M"), summary.file_ids);
                }
            }
            Commands::Files => {
                let mut screen = FilesScreen::new(Arc::clone(&self.api));
                screen.load().await?;
                if screen.files().is_empty() {
                    println!("No files yet. Upload a PDF to get started.");
                }
                for file in screen.files() {
                    println!(
                        "{:>5}  {:<40} {:>10}  {}",
                        file.id,
                        file.file_name,
                        format_size(file.size_bytes),
                        file.upload_date.format("%Y-%m-%d %H:%M")
                    );
                }
            }
            Commands::Upload { files } => {
                let mut screen = FilesScreen::new(Arc::clone(&self.api));
                screen.load().await?;
                let mut candidates = Vec::with_capacity(files.len());
                for path in &files {
                    candidates.push(UploadFile::from_path(path).await?);
                }
                let report = screen.upload(candidates).await?;
                for file in &report.uploaded {
                    println!("uploaded  {:>5}  {}", file.id, file.file_name);
                }
                for name in &report.duplicates {
                    println!("skipped   duplicate  {}", name);
                }
                for name in &report.invalid {
                    println!("skipped   not a PDF or too large  {}", name);
                }
                for failure in &report.failed {
                    println!("failed    {}  {}", failure.name, failure.error);
                }
                print_notice(&report.notice());
            }
            Commands::Download { file_id, output } => {
                let mut screen = FilesScreen::new(Arc::clone(&self.api));
                screen.load().await?;
                let download = screen.download(file_id).await?;
                let path = download.save_to(&output).await?;
                println!("File downloaded to {}", path.display());
            }
            Commands::Show { file_id } => {
                let mut detail = FileDetail::new(Arc::clone(&self.api), file_id);
                detail.load().await?;
                if let Some(data) = detail.state().data() {
                    println!("{}", data.file.file_name);
                    println!("Size:     {}", format_size(data.file.size_bytes));
                    println!("Uploaded: {}", data.file.upload_date.format("%Y-%m-%d %H:%M"));
                    match &data.summary {
                        Some(summary) => println!("\n{}", summary.summary_text),
                        None => println!("\nNo summary yet. Run `docsum-cli summarize -i {}`.", file_id),
                    }
                }
            }
            Commands::Summarize { file_id } => {
                let mut detail = FileDetail::new(Arc::clone(&self.api), file_id);
                detail.load().await?;
                let existing = detail.summary().cloned();
                let summary = match existing {
                    Some(existing) => existing,
                    None => detail.generate_summary().await?,
                };
                println!("{}", summary.summary_text);
            }
            Commands::Consolidate { file_ids, focus } => {
                let mut screen = FilesScreen::new(Arc::clone(&self.api));
                screen.load().await?;
                for id in file_ids {
                    if screen.selection().contains(id) {
                        continue;
                    }
                    screen.toggle(id);
                    if !screen.selection().contains(id) {
                        tracing::warn!(file_id = id, "not in the file list, ignored");
                    }
                }
                let summary = screen.summarize_selected(&focus).await?;
                println!("{}", summary.summary_text);
            }
            Commands::Summaries => {
                let mut screen = SummariesScreen::new(Arc::clone(&self.api));
                screen.load().await?;
                let entries = screen.entries();
                if entries.is_empty() {
                    println!("Your summaries will show up here.");
                }
                for entry in entries {
                    let kind = if entry.consolidated { "consolidated" } else { "single" };
                    let preview: String = entry.preview.chars().take(80).collect();
                    println!("{:>5}  [{}] {}\n       {}", entry.id, kind, entry.title, preview);
                }
            }
            Commands::Read { summary_id } => {
                let summary = self.api.get_summary(summary_id).await?;
                println!("{}", summary.summary_text);
            }
            Commands::Profile => {
                let mut screen = ProfileScreen::new(Arc::clone(&self.api), self.session.clone());
                screen.load().await?;
                if let Some(data) = screen.state().data() {
                    let profile = &data.profile;
                    println!("[{}] {} (@{})", profile.initials(), profile.full_name, profile.username);
                    println!("Email: {}", profile.email);
                    if !profile.description.is_empty() {
                        println!("{}", profile.description);
                    }
                    if let Some(url) = profile.image_url(&self.base_url) {
                        println!("Image: {}", url);
                    }
                    println!("Files: {}    Summaries: {}", data.total_files, data.total_summaries);
                }
            }
            Commands::UpdateProfile { full_name, description } => {
                let mut screen = ProfileScreen::new(Arc::clone(&self.api), self.session.clone());
                screen.load().await?;
                let profile = screen.update(ProfileUpdate { full_name, description }).await?;
                print_notice(&Notice::success("Profile updated", format!("Saved {}.", profile.full_name)));
            }
        }
        Ok(())
    }
}

fn print_notice(notice: &Notice) {
    match notice.level {
        Level::Success => println!("{}: {}", notice.title, notice.message),
        Level::Error => eprintln!("{}: {}", notice.title, notice.message),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let docsum = DocsumCli::new(config).await?;
    match docsum.run(cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            let notice = surface(&err, &docsum.session).await;
            print_notice(&notice);
            Ok(ExitCode::FAILURE)
        }
    }
}
