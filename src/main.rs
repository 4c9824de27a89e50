mod chat_repl;
mod page;
mod site;

use clap::{Parser, Subcommand};
use folio_channels::{ChannelCopy, ChannelKind, ContactHandoff};
use folio_chat::ResponseEngine;
use folio_core::{
    browser::MemoryNavigator, config, language::LanguageCode, location::Location,
    message::PendingOutboundMessage,
};
use folio_i18n::{resolve::prefixed_url, TranslationTable};
use folio_storage::JsonFileStore;

#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Folio: portfolio site runtime with language management and scripted chat"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "folio.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the page language for a URL, as on first load.
    Resolve {
        /// Page URL, e.g. `/en/portfolio-website?lang=nl`.
        #[arg(long, default_value = "/")]
        url: String,
        /// Runtime locale, e.g. `nl-NL`.
        #[arg(long)]
        locale: Option<String>,
        /// Previously stored preference.
        #[arg(long)]
        stored: Option<String>,
    },
    /// Load the page at a URL and print the resulting document.
    Render {
        #[arg(long, default_value = "/")]
        url: String,
        #[arg(long)]
        locale: Option<String>,
    },
    /// Ask the response engine a single question.
    Reply {
        #[arg(short, long)]
        lang: Option<LanguageCode>,
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Print the hand-off URI for a message.
    Contact {
        /// `whatsapp` or `email`.
        #[arg(long)]
        channel: ChannelKind,
        #[arg(short, long)]
        lang: Option<LanguageCode>,
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Verify every language has every translation key.
    Check,
    /// Talk to the conversation widget from the terminal.
    Chat {
        #[arg(short, long)]
        lang: Option<LanguageCode>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.site.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve {
            url,
            locale,
            stored,
        } => {
            let location = Location::parse(&url);
            let resolution = folio_i18n::resolve(
                &location,
                &cfg.i18n.query_param,
                stored.as_deref(),
                locale.as_deref(),
                cfg.i18n.default_language,
            );
            let out = serde_json::json!({
                "language": resolution.language.as_str(),
                "source": resolution.source.as_str(),
                "url": prefixed_url(&location, resolution.language),
                "persist": resolution.source.should_persist(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Render { url, locale } => {
            let mut nav = MemoryNavigator::new(&url);
            if let Some(locale) = locale {
                nav = nav.with_locale(&locale);
            }
            let store = JsonFileStore::in_data_dir(&cfg.site.data_dir)?;
            let analytics = site::analytics_sink(&cfg);
            let (mut site, _replies) =
                site::Site::new(cfg, page::default_page(), nav, store, analytics)?;
            let resolution = site.load();
            tracing::info!("Rendered {} ({})", resolution.language, resolution.source);
            println!("{}", site.render());
        }
        Commands::Reply { lang, message } => {
            if message.is_empty() {
                anyhow::bail!("no message provided. Usage: folio reply <message>");
            }
            let lang = lang.unwrap_or(cfg.i18n.default_language);
            let engine = ResponseEngine::load(
                cfg.chat.rules_dir.as_deref(),
                &cfg.site,
                &cfg.contact,
                cfg.i18n.default_language,
            )?;
            let reply = engine.reply(lang, &message.join(" "));
            println!("[{}]", reply.topic.as_deref().unwrap_or("default"));
            println!("{}", reply.text);
        }
        Commands::Contact {
            channel,
            lang,
            message,
        } => {
            let message = PendingOutboundMessage::new(message.join(" "));
            if message.is_empty() {
                anyhow::bail!("no message provided. Usage: folio contact <channel> <message>");
            }
            let lang = lang.unwrap_or(cfg.i18n.default_language);
            let table = TranslationTable::load(cfg.i18n.translations_dir.as_deref())?;
            let copy = ChannelCopy::from_lookup(&cfg.site.owner_name, |key| {
                table
                    .get(lang, key)
                    .or_else(|| table.get(cfg.i18n.default_language, key))
            });
            let handoff = ContactHandoff::from_config(&cfg.contact);
            println!("{}", handoff.uri(channel, &message, &copy)?);
        }
        Commands::Check => {
            let table = TranslationTable::load(cfg.i18n.translations_dir.as_deref())?;
            let mut missing_total = 0;
            for lang in table.languages() {
                let missing = table.missing_keys(lang);
                println!("  {lang}: {} keys, {} missing", table.len(lang), missing.len());
                for key in &missing {
                    println!("    - {key}");
                }
                missing_total += missing.len();
            }
            if missing_total > 0 {
                anyhow::bail!("{missing_total} translation keys missing");
            }
            println!("All translation tables complete.");
        }
        Commands::Chat { lang } => {
            chat_repl::run(cfg, lang).await?;
        }
    }

    Ok(())
}
