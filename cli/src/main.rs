use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use sitefiles::{ExportError, FileSet, NO_FILES_WARNING, Session, SessionError, SessionMessage};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Server(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "wallah", about = "Generate small websites through the wallah relay")]
struct Cli {
    #[arg(long, env = "WALLAH_BASE_URL", default_value = "http://127.0.0.1:4000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the relay is up.
    Ping,
    /// Send one prompt and save the resulting files.
    Generate(GenerateArgs),
    /// Split a saved model response into files without contacting the relay.
    Split(SplitArgs),
    /// Interactive session; files accumulate across prompts.
    Chat,
}

#[derive(Args, Debug)]
struct OutputArgs {
    #[arg(long, help = "Directory to write the extracted files into")]
    out: Option<PathBuf>,

    #[arg(long, help = "Write the assembled single-page preview here")]
    preview: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    prompt: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SplitArgs {
    #[arg(default_value = "-", help = "Input file path, or - for stdin")]
    input: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, http: reqwest::Client::new() };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Generate(args) => run_generate(&ctx, args).await,
        Command::Split(args) => run_split(args),
        Command::Chat => run_chat(&ctx).await,
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let response = ctx.http.get(url(ctx, "/health")).send().await?;
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    if !status.is_success() {
        return Err(CliError::Server(server_error_message(status, &body)));
    }
    print_json(&body)
}

async fn run_generate(ctx: &CliContext, args: GenerateArgs) -> Result<(), CliError> {
    let mut session = Session::new();
    let outcome = exchange(ctx, &mut session, &args.prompt).await;
    print_messages(session.messages());
    outcome?;
    write_outputs(&session, &args.output)
}

fn run_split(args: SplitArgs) -> Result<(), CliError> {
    let text = read_input(&args.input)?;
    let files = sitefiles::split_response(&text);
    if files.is_empty() {
        eprintln!("{NO_FILES_WARNING}");
        println!("{text}");
        return Ok(());
    }
    print_file_list(&files);

    let mut session = Session::new();
    session.complete(&text);
    write_outputs(&session, &args.output)
}

async fn run_chat(ctx: &CliContext) -> Result<(), CliError> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut printed = 0_usize;

    prompt_marker();
    for line in stdin.lock().lines() {
        let line = line.map_err(|source| CliError::Io { path: "stdin".to_owned(), source })?;
        match parse_chat_line(&line) {
            ChatInput::Empty => {}
            ChatInput::Quit => break,
            ChatInput::Files => print_file_list(session.files()),
            ChatInput::Show(name) => match session.files().get(name) {
                Some(content) => println!("{content}"),
                None => eprintln!("no such file: {name}"),
            },
            ChatInput::Clear => {
                session.clear();
                printed = 0;
                println!("session cleared");
            }
            ChatInput::Preview(path) => report(write_preview(&session, &path)),
            ChatInput::Export(dir) => report(export(&session, &dir)),
            ChatInput::Usage(command) => eprintln!("usage: {command}"),
            ChatInput::Unknown(command) => eprintln!("unknown command: {command}"),
            ChatInput::Prompt(prompt) => {
                // Failures are already recorded in the session log.
                let _ = exchange(ctx, &mut session, prompt).await;
            }
        }
        let messages = session.messages();
        print_messages(&messages[printed.min(messages.len())..]);
        printed = messages.len();
        prompt_marker();
    }
    Ok(())
}

// =============================================================================
// SESSION ROUND TRIP
// =============================================================================

/// Run one prompt through `session` and the relay. Request failures are
/// recorded as error messages and also returned.
async fn exchange(ctx: &CliContext, session: &mut Session, input: &str) -> Result<(), CliError> {
    let prompt = session.begin(input)?;
    match request_generation(ctx, &prompt).await {
        Ok(text) => {
            session.complete(&text);
            Ok(())
        }
        Err(error) => {
            session.fail(error.to_string());
            Err(error)
        }
    }
}

async fn request_generation(ctx: &CliContext, prompt: &str) -> Result<String, CliError> {
    let response = ctx
        .http
        .post(url(ctx, "/api/generate"))
        .json(&serde_json::json!({ "prompt": prompt }))
        .send()
        .await?;
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    if !status.is_success() {
        return Err(CliError::Server(server_error_message(status, &body)));
    }
    Ok(response_text(&body))
}

/// The `text` field of a successful relay body. A missing or non-string
/// field reads as empty, which the session reports as "no files detected".
fn response_text(body: &Value) -> String {
    body.get("text").and_then(Value::as_str).unwrap_or_default().to_owned()
}

/// The `error` field of a relay error body, or the status reason when the
/// body has none.
fn server_error_message(status: reqwest::StatusCode, body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(
            || status.canonical_reason().unwrap_or(status.as_str()).to_owned(),
            str::to_owned,
        )
}

fn url(ctx: &CliContext, path: &str) -> String {
    format!("{}{path}", ctx.base_url.trim_end_matches('/'))
}

// =============================================================================
// CHAT INPUT
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
enum ChatInput<'a> {
    Empty,
    Prompt(&'a str),
    Files,
    Show(&'a str),
    Preview(&'a str),
    Export(&'a str),
    Clear,
    Quit,
    Usage(&'static str),
    Unknown(&'a str),
}

fn parse_chat_line(line: &str) -> ChatInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ChatInput::Empty;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return ChatInput::Prompt(trimmed);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match (name, arg) {
        ("files", _) => ChatInput::Files,
        ("show", "") => ChatInput::Usage("/show NAME"),
        ("show", name) => ChatInput::Show(name),
        ("clear", _) => ChatInput::Clear,
        ("quit" | "exit", _) => ChatInput::Quit,
        ("preview", "") => ChatInput::Usage("/preview FILE"),
        ("preview", path) => ChatInput::Preview(path),
        ("export", "") => ChatInput::Usage("/export DIR"),
        ("export", dir) => ChatInput::Export(dir),
        _ => ChatInput::Unknown(trimmed),
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn write_outputs(session: &Session, output: &OutputArgs) -> Result<(), CliError> {
    if let Some(dir) = &output.out {
        export(session, dir)?;
    }
    if let Some(path) = &output.preview {
        write_preview(session, path)?;
    }
    Ok(())
}

fn export(session: &Session, dir: impl AsRef<Path>) -> Result<(), CliError> {
    for path in sitefiles::write_files(dir.as_ref(), session.files())? {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn write_preview(session: &Session, path: impl AsRef<Path>) -> Result<(), CliError> {
    let path = path.as_ref();
    std::fs::write(path, session.preview())
        .map_err(|source| CliError::Io { path: path.display().to_string(), source })?;
    eprintln!("wrote preview {}", path.display());
    Ok(())
}

fn read_input(input: &str) -> Result<String, CliError> {
    let mut reader: Box<dyn Read> = if input == "-" {
        Box::new(io::stdin())
    } else {
        let file = File::open(input).map_err(|source| CliError::Io { path: input.to_owned(), source })?;
        Box::new(BufReader::new(file))
    };
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| CliError::Io { path: input.to_owned(), source })?;
    Ok(text)
}

fn report(result: Result<(), CliError>) {
    if let Err(error) = result {
        eprintln!("{error}");
    }
}

fn print_messages(messages: &[SessionMessage]) {
    for message in messages {
        println!("[{}] {}", message.kind.as_str(), message.text);
    }
}

fn print_file_list(files: &FileSet) {
    if files.is_empty() {
        println!("no files");
        return;
    }
    for (name, content) in files.iter() {
        println!("{name}\t{}\t{} bytes", sitefiles::mime_type(name), content.len());
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn prompt_marker() {
    print!("> ");
    let _ = io::stdout().flush();
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
