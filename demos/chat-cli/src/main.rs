//! Terminal chat client.
//!
//! ```text
//! chat-cli create <room> <user>
//! chat-cli join <room> <user>
//! ```
//!
//! `ROOMCHAT_HTTP_BASE` and `ROOMCHAT_WS_BASE` override the service
//! endpoints; `RUST_LOG` controls log output (default `info`).

use roomchat::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Say(String),
    Reply { quoted: String, reply: String },
    Pm { user: String, text: String },
    Image(String),
    Kick(String),
    Close,
    Ping,
    Leave,
}

const HELP: &str = "\
commands:
  <text>                   broadcast
  /reply <quoted> | <text> reply to a message
  /pm <user> <text>        private message
  /image <base64>          send an image
  /kick <user>             remove a participant (creator only)
  /close                   close the room (creator only)
  /ping                    keep-alive
  /leave                   leave and exit";

/// Parses one input line. Blank lines yield `Ok(None)`.
fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Say(line.to_string())));
    };

    let (name, args) = rest.split_once(' ').unwrap_or((rest, ""));
    let args = args.trim();
    let cmd = match name {
        "reply" => {
            let (quoted, reply) = args
                .split_once('|')
                .ok_or("usage: /reply <quoted> | <text>")?;
            Command::Reply {
                quoted: quoted.trim().to_string(),
                reply: reply.trim().to_string(),
            }
        }
        "pm" => {
            let (user, text) = args
                .split_once(' ')
                .filter(|(user, _)| !user.is_empty())
                .ok_or("usage: /pm <user> <text>")?;
            Command::Pm {
                user: user.to_string(),
                text: text.trim().to_string(),
            }
        }
        "image" if !args.is_empty() => Command::Image(args.to_string()),
        "image" => return Err("usage: /image <base64>".into()),
        "kick" if !args.is_empty() => Command::Kick(args.to_string()),
        "kick" => return Err("usage: /kick <user>".into()),
        "close" => Command::Close,
        "ping" => Command::Ping,
        "leave" | "quit" => Command::Leave,
        other => return Err(format!("unknown command /{other}\n{HELP}")),
    };
    Ok(Some(cmd))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

struct PrintListener;

impl EventListener for PrintListener {
    fn on_message(&self, from: &str, text: &str) {
        println!("{from}: {text}");
    }

    fn on_image(&self, from: &str, base64: &str) {
        println!("{from} sent an image ({} base64 chars)", base64.len());
    }

    fn on_join(&self, user: &str) {
        println!("* {user} joined");
    }

    fn on_leave(&self, user: &str) {
        println!("* {user} left");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

/// Builds the registry config, overriding endpoints from `lookup`
/// (`std::env::var` in the binary).
fn registry_config_from(lookup: impl Fn(&str) -> Option<String>) -> RegistryConfig {
    let mut config = RegistryConfig::default();
    if let Some(base) = lookup("ROOMCHAT_HTTP_BASE") {
        config = config.http_base(base);
    }
    if let Some(base) = lookup("ROOMCHAT_WS_BASE") {
        config = config.ws_base(base);
    }
    config
}

/// Runs one command. Returns `false` when the loop should stop.
async fn execute(
    chat: &Chatroom,
    session: &Session,
    admin: Option<&AdminCredential>,
    cmd: Command,
) -> Result<bool, ChatroomError> {
    match cmd {
        Command::Say(text) => session.broadcast(&text).await?,
        Command::Reply { quoted, reply } => session.reply(&quoted, &reply).await?,
        Command::Pm { user, text } => session.send_private(&user, &text).await?,
        Command::Image(base64) => session.send_image(&base64).await?,
        Command::Ping => session.ping().await?,
        Command::Kick(user) => match admin {
            Some(admin) if chat.kick_user(admin, user.as_str()).await => {
                println!("* kicked {user}");
            }
            Some(_) => println!("* kick of {user} was refused"),
            None => println!("* only the room creator can kick"),
        },
        Command::Close => match admin {
            Some(admin) if chat.close_room(admin).await => {
                println!("* room closed");
            }
            Some(_) => println!("* close was refused"),
            None => println!("* only the room creator can close the room"),
        },
        Command::Leave => {
            session.leave().await;
            return Ok(false);
        }
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [mode, room, user] = args.as_slice() else {
        eprintln!("usage: chat-cli <create|join> <room> <user>");
        std::process::exit(2);
    };

    let chat = Chatroom::builder()
        .registry_config(registry_config_from(|key| std::env::var(key).ok()))
        .build()?;

    let (admin, session) = match mode.as_str() {
        "create" => {
            let (admin, session) = chat.create_and_join(room.as_str(), user.as_str()).await?;
            (Some(admin), session)
        }
        "join" => (None, chat.join_room(room.as_str(), user.as_str()).await?),
        other => {
            eprintln!("unknown mode {other:?}, expected create or join");
            std::process::exit(2);
        }
    };
    session.set_listener(PrintListener);
    tracing::info!(%room, %user, admin = admin.is_some(), "connected");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            reason = session.closed() => {
                println!("* disconnected: {reason}");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    session.leave().await;
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(cmd)) => {
                        if !execute(&chat, &session, admin.as_ref(), cmd).await? {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(msg) => eprintln!("{msg}"),
                }
            }
        }
    }
    Ok(())
}
