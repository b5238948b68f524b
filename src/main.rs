use clap::Parser;
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use wardrobe_chat::backend::{chat_channel_url, BackendClient};
use wardrobe_chat::cli::{resolve_server, Args};
use wardrobe_chat::session::ChannelSession;
use wardrobe_chat::StylistApp;

fn print_banner(server: &str) {
    println!("{}", "WARDROBE STYLIST CHAT".bright_cyan().bold());
    println!("{}: {}", "Server".bright_yellow(), server.bright_white());
    println!("{}", "=".repeat(50).bright_blue());
    println!(
        "{}",
        "Commands: /upload <files…>  /process  /wardrobe  /save <n>  /quit".dimmed()
    );
    println!("{}", "Anything else is sent to the stylist.".dimmed());
    println!();
}

fn print_error(err: &dyn std::error::Error) {
    eprintln!("{} {}", "error:".bright_red().bold(), err);
}

/// Handle one REPL line. Returns `false` when the loop should end.
async fn dispatch(app: &mut StylistApp, line: &str) -> bool {
    let line = line.trim();

    if line == "/upload" || line.starts_with("/upload ") {
        let paths: Vec<std::path::PathBuf> = line
            .trim_start_matches("/upload")
            .split_whitespace()
            .map(std::path::PathBuf::from)
            .collect();
        if let Err(err) = app.upload(&paths).await {
            print_error(&err);
        }
    } else if line == "/process" {
        if let Err(err) = app.process().await {
            print_error(&err);
        }
    } else if line == "/wardrobe" {
        if let Err(err) = app.wardrobe_listing().await {
            print_error(&err);
        }
    } else if line == "/save" || line.starts_with("/save ") {
        match line.trim_start_matches("/save").trim().parse::<usize>() {
            Ok(index) => {
                if let Err(err) = app.save_image(index).await {
                    print_error(&err);
                }
            }
            Err(_) => eprintln!("{}", "usage: /save <number>".dimmed()),
        }
    } else if line == "/quit" || line == "/exit" {
        return false;
    } else if let Err(err) = app.send_chat_message(line).await {
        print_error(&err);
    }

    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let server = resolve_server(args.server);
    let ws_url = chat_channel_url(&server)?;

    print_banner(&server);

    let backend = BackendClient::new(server);
    let (session, mut events) = ChannelSession::new(ws_url);
    let mut app = StylistApp::new(backend, session, args.save_dir);

    if !args.upload.is_empty() {
        if let Err(err) = app.upload(&args.upload).await {
            print_error(&err);
        }
    }
    if args.process {
        if let Err(err) = app.process().await {
            print_error(&err);
        }
    }

    // Open the channel up front so the backend greeting arrives before the
    // first message; later sends re-ensure it lazily.
    if let Err(err) = app.session.ensure_open().await {
        print_error(&err);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => app.handle_event(event),
                None => break,
            },
            line = lines.next_line() => match line? {
                Some(line) => {
                    if !dispatch(&mut app, &line).await {
                        break;
                    }
                }
                None => break, // stdin closed
            },
        }
    }

    Ok(())
}
