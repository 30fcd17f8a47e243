use clap::{Parser, Subcommand};
use dialogbind::{Config, Dialogs, Sound};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "dialogbind")]
#[command(about = "Show native dialogs from scripts using whatever dialog tool is installed")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Window title
    #[arg(short, long, global = true)]
    title: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Dialog(DialogCommand),
    /// Write a default config file to the user config directory
    Init,
}

#[derive(Subcommand)]
enum DialogCommand {
    /// Show an informational message
    Message { text: String },
    /// Ask a yes/no question; exits 0 on yes
    YesNo { text: String },
    /// Show an error message
    Error { text: String },
    /// Show a progress box or notification
    Progress { text: Option<String> },
    /// Show a license file; exits 0 if accepted
    License { file: PathBuf },
    /// Choose one entry; prints the selection
    Choose {
        /// Prompt shown above the entries
        #[arg(long)]
        text: Option<String>,
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Pick a file; prints its path
    PickFile {
        /// Pattern list such as "*.png *.jpg"; may be repeated
        #[arg(short, long)]
        filter: Vec<String>,
    },
    /// Pick a directory; prints its path
    PickDir,
    /// Read a line of text; prints it
    Entry { prompt: Option<String> },
    /// Play a notification sound (none, success, error, attention)
    Sound { sound: Sound },
    /// Print the active backend
    Backend,
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn print_nonempty(value: &str) -> ExitCode {
    println!("{}", value);
    exit_code(!value.is_empty())
}

fn init() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let path = Config::user_path().ok_or("no config directory on this system")?;
    Config::default().save(&path)?;
    println!("Created default config: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn run_dialog(
    command: DialogCommand,
    title: Option<&str>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let dialogs = Dialogs::from_env()?;

    let code = match command {
        DialogCommand::Message { text } => exit_code(dialogs.message(&text, title)?),
        DialogCommand::YesNo { text } => exit_code(dialogs.yes_no(&text, title)?),
        DialogCommand::Error { text } => exit_code(dialogs.error(&text, title)?),
        DialogCommand::Progress { text } => exit_code(dialogs.progress(text.as_deref(), title)?),
        DialogCommand::License { file } => exit_code(dialogs.license(&file, title)?),
        DialogCommand::Choose { text, entries } => {
            let entries: Vec<&str> = entries.iter().map(String::as_str).collect();
            match dialogs.choose(&entries, text.as_deref(), title)? {
                Some(selected) => print_nonempty(&selected),
                None => ExitCode::FAILURE,
            }
        }
        DialogCommand::PickFile { filter } => {
            let filters: Vec<&str> = filter.iter().map(String::as_str).collect();
            print_nonempty(&dialogs.pick_file(&filters, title)?)
        }
        DialogCommand::PickDir => print_nonempty(&dialogs.pick_directory(title)?),
        DialogCommand::Entry { prompt } => {
            println!("{}", dialogs.text_entry(prompt.as_deref(), title)?);
            ExitCode::SUCCESS
        }
        DialogCommand::Sound { sound } => {
            dialogs.play_sound(sound);
            ExitCode::SUCCESS
        }
        DialogCommand::Backend => {
            println!("{}", dialogs.backend());
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries dialog results
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let result = match cli.command {
        Commands::Init => init(),
        Commands::Dialog(command) => run_dialog(command, cli.title.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}
