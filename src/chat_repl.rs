//! Terminal session over the real conversation widget.
//!
//! Lines typed at the prompt go through the widget's submit path and the
//! reply arrives after the configured typing delay, exactly as on the page.

use anyhow::Result;
use folio_chat::{Screen, SubmitOutcome};
use folio_core::{browser::MemoryNavigator, config::Config, language::LanguageCode};
use folio_storage::MemoryStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::page::default_page;
use crate::site::{analytics_sink, Site};

/// Session commands typed with a leading `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Topic(Screen),
    Back,
    Close,
    Open,
    Quit,
}

impl ReplCommand {
    /// Parse a `/command` line. Returns `None` for ordinary messages and
    /// `Some(Err)` for unknown commands.
    pub fn parse(line: &str) -> Option<Result<Self, String>> {
        let rest = line.trim().strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let command = match parts.next().unwrap_or_default() {
            "topic" => match parts.next().and_then(Screen::from_topic) {
                Some(screen) => Ok(Self::Topic(screen)),
                None => Err("usage: /topic about|contact|project|expertise|rates".to_string()),
            },
            "back" => Ok(Self::Back),
            "close" => Ok(Self::Close),
            "open" => Ok(Self::Open),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: /{other}")),
        };
        Some(command)
    }
}

pub async fn run(config: Config, lang: Option<LanguageCode>) -> Result<()> {
    let url = match lang {
        Some(lang) => format!("/{lang}"),
        None => "/".to_string(),
    };
    let analytics = analytics_sink(&config);
    let (mut site, mut replies) = Site::new(
        config,
        default_page(),
        MemoryNavigator::new(&url),
        MemoryStore::new(),
        analytics,
    )?;
    let resolution = site.load();
    info!("Chat session in {} ({})", resolution.language, resolution.source);

    site.open_conversation(None);
    if let Some(greeting) = site.widget().session().messages().first() {
        println!("< {}", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut site, &line) {
                    break;
                }
            }
            Some(pending) = replies.recv() => {
                let text = pending.reply.text.clone();
                if site.deliver(pending) {
                    println!("< {text}");
                }
            }
        }
    }

    site.close_conversation();
    Ok(())
}

type ReplSite = Site<MemoryNavigator, MemoryStore>;

/// Returns false when the session should end.
fn handle_line(site: &mut ReplSite, line: &str) -> bool {
    match ReplCommand::parse(line) {
        Some(Ok(ReplCommand::Quit)) => return false,
        Some(Ok(ReplCommand::Topic(screen))) => {
            if site.select_topic(screen) {
                print_screen(site, screen);
            } else {
                println!("! topics are only reachable from the main screen");
            }
        }
        Some(Ok(ReplCommand::Back)) => {
            site.back();
        }
        Some(Ok(ReplCommand::Close)) => {
            site.close_conversation();
            println!("! closed; /open to start again");
        }
        Some(Ok(ReplCommand::Open)) => {
            if site.open_conversation(None) {
                if let Some(greeting) = site.widget().session().messages().first() {
                    println!("< {}", greeting.text);
                }
            }
        }
        Some(Err(usage)) => println!("! {usage}"),
        None => match site.send(line) {
            SubmitOutcome::Sent => println!("  ..."),
            SubmitOutcome::Ignored(reason) => println!("! not sent ({reason:?})"),
        },
    }
    true
}

fn print_screen(site: &ReplSite, screen: Screen) {
    let Some(el) = site.widget().bindings().screen(screen) else {
        return;
    };
    let doc = site.doc();
    for child in doc.children(el) {
        let text = doc.text_content(child);
        let text = text.trim();
        if !text.is_empty() {
            println!("  {text}");
        }
    }
}
