use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use gemini_assistant::llm::{GeminiClient, LlmError};
use gemini_assistant::notice::Notice;
use gemini_assistant::prompt::ProcessingMode;
use gemini_assistant::repl::{self, Command, LineBuffer};
use gemini_assistant::services::assistant::{Assistant, BUSY_TEXT, Status, SubmitOutcome};
use gemini_assistant::state::{ConversationStore, StateError};
use gemini_assistant::store::{FileStore, StoreError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gemini-assistant", about = "Explain, summarize or shorten text with Gemini")]
struct Cli {
    /// Directory holding saved chats and the API key.
    #[arg(long, env = "ASSISTANT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Initial processing mode.
    #[arg(long, default_value = "explain")]
    mode: ProcessingMode,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = cli.data_dir.unwrap_or_else(FileStore::default_root);
    let backend = FileStore::open(&root)?;
    let store = ConversationStore::load(Arc::new(backend))?;

    let llm = GeminiClient::from_env()?;
    tracing::info!(model = llm.model(), data_dir = %root.display(), "gemini-assistant starting");

    let mut assistant = Assistant::new(store, Arc::new(llm));
    assistant.set_mode(cli.mode);
    spawn_busy_indicator(&assistant);

    println!("{}", repl::welcome_text());
    if !assistant.store().has_credential() {
        println!("No API key stored yet. Set one with /key <your Gemini API key>.");
    }
    run(&mut assistant).await
}

/// Print the busy line whenever a request goes out.
fn spawn_busy_indicator(assistant: &Assistant) {
    let mut rx = assistant.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            if *rx.borrow_and_update() == Status::Submitting {
                eprintln!("{BUSY_TEXT}");
            }
        }
    });
}

async fn run(assistant: &mut Assistant) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = LineBuffer::new();

    loop {
        prompt_marker(assistant, &buffer)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(input) = buffer.push_line(&line) else {
            continue;
        };
        let command = match repl::parse_input(&input) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", repl::render_notice(&Notice::from_error(&e)));
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        dispatch(assistant, command).await;
    }
    Ok(())
}

fn prompt_marker(assistant: &Assistant, buffer: &LineBuffer) -> std::io::Result<()> {
    let marker = if buffer.in_block() {
        "... ".to_string()
    } else {
        format!("[{}]> ", assistant.mode())
    };
    let mut stdout = std::io::stdout();
    stdout.write_all(marker.as_bytes())?;
    stdout.flush()
}

async fn dispatch(assistant: &mut Assistant, command: Command) {
    match command {
        Command::New => {
            assistant.new_conversation();
            if let Some(conversation) = assistant.active() {
                println!("Started {}", conversation.title);
            }
        }
        Command::List => println!("{}", repl::render_conversation_list(assistant.store())),
        Command::Select(target) => {
            let id = repl::resolve_target(assistant.store(), &target);
            assistant.select_conversation(&id);
            match assistant.active() {
                Some(conversation) => println!("{}", repl::render_conversation(conversation)),
                None => println!("No such chat: {target}"),
            }
        }
        Command::Delete(target) => {
            let id = match target {
                Some(target) => repl::resolve_target(assistant.store(), &target),
                None => match assistant.store().active_id() {
                    Some(id) => id.to_string(),
                    None => {
                        println!("No active chat to delete");
                        return;
                    }
                },
            };
            assistant.delete_conversation(&id);
            println!("{}", repl::render_conversation_list(assistant.store()));
        }
        Command::Mode(mode) => {
            assistant.set_mode(mode);
            println!("{}", repl::render_modes(mode));
        }
        Command::Key(key) => {
            assistant.set_credential(key);
            println!("{}", repl::render_notice(&Notice::info("Saved", "API key stored")));
        }
        Command::Show => match assistant.active() {
            Some(conversation) => println!("{}", repl::render_conversation(conversation)),
            None => println!("{}", repl::welcome_text()),
        },
        Command::Help => {
            println!("{}", repl::HELP_TEXT);
            println!("{}", repl::render_modes(assistant.mode()));
        }
        Command::Submit(text) => submit(assistant, text).await,
        Command::Quit => {}
    }
}

async fn submit(assistant: &mut Assistant, text: String) {
    match assistant.submit_text(text).await {
        SubmitOutcome::Replied(message) => println!("{}", repl::render_message(&message)),
        SubmitOutcome::Failed(notice) => eprintln!("{}", repl::render_notice(&notice)),
        SubmitOutcome::Ignored => {
            if assistant.active().is_none() {
                println!("{}", repl::welcome_text());
            }
        }
    }
}
