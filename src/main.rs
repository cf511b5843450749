use std::io::{IsTerminal, Write};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use doc_chat::api::HttpBackend;
use doc_chat::config::ClientConfig;
use doc_chat::markdown::{self, terminal::{self, Highlighting}};
use doc_chat::models::Sender;
use doc_chat::service::chat_service::ChatService;
use doc_chat::state::Session;

const HELP: &str = "\
Commands:
  /docs               list available document collections
  /use <name|number>  select a collection
  /clear-doc          clear the selection
  /help               show this help
  /quit               exit
Anything else is sent as a question about the selected collection.";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Docs,
    Use(&'a str),
    ClearDoc,
    Help,
    Quit,
    Ask(&'a str),
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Ask(line);
    };
    let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    match name {
        "docs" => Command::Docs,
        "use" => Command::Use(arg.trim()),
        "clear-doc" => Command::ClearDoc,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(name),
    }
}

/// Resolves `/use` input as a 1-based index or an exact collection name.
fn resolve_document<'a>(available: &'a [String], arg: &str) -> Option<&'a String> {
    if let Ok(n) = arg.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| available.get(i));
    }
    available.iter().find(|doc| doc.as_str() == arg)
}

/// Prints every message after `printed` and returns the new count.
fn print_new_messages(session: &Session, printed: usize, highlighting: Highlighting) -> usize {
    // The user's own lines are already on screen.
    for message in session.messages[printed..].iter().filter(|m| m.sender == Sender::Ai) {
        let text = terminal::render_with(&markdown::parse(&message.text), highlighting);
        println!("[ai]\n{text}\n");
    }
    session.messages.len()
}

fn print_documents(session: &Session) {
    if session.is_document_list_loading {
        println!("Načítání...");
        return;
    }
    if session.available_documents.is_empty() {
        println!("No document collections available.");
        return;
    }
    for (i, doc) in session.available_documents.iter().enumerate() {
        let selected = session.selected_document.as_deref() == Some(doc.as_str());
        let marker = if selected { "*" } else { " " };
        println!("{marker} {}. {doc}", i + 1);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_chat=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().context("Failed to read client configuration")?;
    let backend = HttpBackend::new(&config).context("Failed to create HTTP backend")?;
    info!("Using document backend at {}", backend.base_url());

    let highlighting =
        if std::io::stdout().is_terminal() { Highlighting::Ansi } else { Highlighting::Off };

    let service = ChatService::new(backend);
    let mut session = Session::new();
    let mut printed = print_new_messages(&session, 0, highlighting);

    service.load_documents(&mut session).await;
    printed = print_new_messages(&session, printed, highlighting);
    print_documents(&session);
    println!("{HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Docs => print_documents(&session),
            Command::ClearDoc => session.set_selected_document(""),
            Command::Use(arg) => {
                match resolve_document(&session.available_documents, arg).cloned() {
                    Some(doc) => session.set_selected_document(doc),
                    None => println!("Unknown document collection '{arg}'. Try /docs."),
                }
            }
            Command::Unknown(name) => println!("Unknown command /{name}. Try /help."),
            Command::Ask(text) => {
                service.send_message(&mut session, text).await;
            }
        }
        printed = print_new_messages(&session, printed, highlighting);
    }

    info!("Bye");
    Ok(())
}
