//! Telegram Channel Sync Tool
//!
//! Collects posts from the configured e-commerce channels through the Bot
//! API and appends them to the raw records table that `preprocess` and
//! `make_template` consume.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{info, warn};

use negade_corpus::records::{read_records, MessageRecord, RecordWriter};

/// Bot API endpoint
const API_BASE: &str = "https://api.telegram.org";

/// Channels collected for the corpus (usernames without `@`).
const DEFAULT_CHANNELS: &[&str] = &[
    "EthioMarketPlace",
    "MerttEka",
    "Shewabrand",
    "ethio_brand_collection",
    "ZemenExpress",
];

/// Default records directory
fn default_records_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("negade")
        .join("telegram_messages.tsv")
}

/// CLI arguments
#[derive(Parser)]
#[command(name = "telegram-sync")]
#[command(about = "Fetch channel posts into the raw records table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bot token
    #[arg(short, long, env = "TELEGRAM_BOT_TOKEN")]
    token: Option<String>,

    /// API base URL
    #[arg(short, long, env = "TELEGRAM_API_BASE", default_value = API_BASE)]
    api_base: String,

    /// Channel username to keep (repeatable; defaults to the corpus list)
    #[arg(short, long = "channel")]
    channels: Vec<String>,

    /// Records file
    #[arg(short, long, env = "NEGADE_RECORDS_FILE")]
    records: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll for new channel posts and append them to the records table
    Fetch {
        /// Stop after this many messages
        #[arg(short, long, default_value_t = 200)]
        limit: usize,

        /// Long-poll timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
    /// Show the records file location and row count
    Status,
}

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    channel_post: Option<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    message_id: i64,
    date: i64,
    text: Option<String>,
    chat: Chat,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
    username: Option<String>,
}

/// Handle on the Bot API. Constructed once and passed where needed;
/// dropping it closes the underlying connection pool.
pub struct TelegramClient {
    http: reqwest::Client,
    base: String,
}

impl TelegramClient {
    /// Create a client for the given endpoint and bot token.
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("{api_base}/bot{token}"),
        }
    }

    /// Fetch one page of updates at the given offset.
    async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>> {
        let url = format!("{}/getUpdates", self.base);
        let response: ApiResponse<Vec<Update>> = self
            .http
            .get(&url)
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout.to_string()),
                ("allowed_updates", r#"["channel_post"]"#.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.ok {
            anyhow::bail!(
                "getUpdates failed: {}",
                response
                    .description
                    .unwrap_or_else(|| "no description".to_string())
            );
        }
        Ok(response.result.unwrap_or_default())
    }
}

/// Convert a channel post into a record if it carries text from one of the
/// wanted channels.
fn record_from_update(update: &Update, channels: &[String]) -> Option<MessageRecord> {
    let post = update.channel_post.as_ref()?;
    let text = post.text.as_deref()?;
    let username = post.chat.username.as_deref()?;
    if !channels.iter().any(|c| c.eq_ignore_ascii_case(username)) {
        return None;
    }
    Some(MessageRecord {
        channel: username.to_string(),
        id: post.message_id,
        sender_id: post.chat.id,
        date: post.date,
        text: text.to_string(),
    })
}

/// Drain pending updates page by page until the limit is reached or a poll
/// comes back empty.
async fn fetch(
    client: &TelegramClient,
    channels: &[String],
    writer: &mut RecordWriter<impl Write>,
    limit: usize,
    timeout: u64,
) -> Result<usize> {
    let mut offset = 0i64;
    let mut fetched = 0usize;

    while fetched < limit {
        let updates = client.get_updates(offset, timeout).await?;
        if updates.is_empty() {
            break;
        }

        for update in &updates {
            offset = offset.max(update.update_id + 1);
            match record_from_update(update, channels) {
                Some(record) => {
                    writer.write_record(&record)?;
                    fetched += 1;
                    if fetched >= limit {
                        break;
                    }
                }
                None => {
                    if update.channel_post.is_some() {
                        warn!(update_id = update.update_id, "skipping unwanted channel post");
                    }
                }
            }
        }
        info!(fetched, offset, "fetch progress");
    }

    Ok(fetched)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let records_path = cli.records.clone().unwrap_or_else(default_records_path);
    let channels: Vec<String> = if cli.channels.is_empty() {
        DEFAULT_CHANNELS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.channels.clone()
    };

    match cli.command {
        Commands::Fetch { limit, timeout } => {
            let token = cli
                .token
                .context("a bot token is required (--token or TELEGRAM_BOT_TOKEN)")?;

            if let Some(parent) = records_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let fresh = !records_path.exists();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&records_path)
                .with_context(|| format!("failed to open {}", records_path.display()))?;
            let mut writer = RecordWriter::new(BufWriter::new(file));
            if fresh {
                writer.write_header()?;
            }

            let client = TelegramClient::new(&cli.api_base, &token);
            info!(channels = channels.len(), limit, "starting fetch");
            let fetched = fetch(&client, &channels, &mut writer, limit, timeout).await?;
            println!("Fetched {fetched} messages into {}", records_path.display());
        }
        Commands::Status => {
            if !records_path.exists() {
                println!("No records file at {}", records_path.display());
                return Ok(());
            }
            let file = File::open(&records_path)?;
            let records = read_records(BufReader::new(file))?;
            println!("{} records in {}", records.len(), records_path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wanted() -> Vec<String> {
        vec!["ZemenExpress".to_string(), "MerttEka".to_string()]
    }

    fn post_update(id: i64, username: Option<&str>, text: Option<&str>) -> Update {
        Update {
            update_id: id,
            channel_post: Some(Post {
                message_id: id * 10,
                date: 1_718_000_000 + id,
                text: text.map(str::to_string),
                chat: Chat {
                    id: -100_200,
                    username: username.map(str::to_string),
                },
            }),
        }
    }

    #[test]
    fn test_default_records_path() {
        let path = default_records_path();
        assert!(path.to_string_lossy().contains("negade"));
    }

    #[test]
    fn test_record_from_update_maps_fields() {
        let update = post_update(3, Some("ZemenExpress"), Some("ሴቶች ጫማ"));
        let record = record_from_update(&update, &wanted()).unwrap();

        assert_eq!(record.channel, "ZemenExpress");
        assert_eq!(record.id, 30);
        assert_eq!(record.sender_id, -100_200);
        assert_eq!(record.text, "ሴቶች ጫማ");
    }

    #[test]
    fn test_record_from_update_filters() {
        // Wrong channel
        let update = post_update(1, Some("SomeOtherShop"), Some("hi"));
        assert!(record_from_update(&update, &wanted()).is_none());

        // No text (photo-only post)
        let update = post_update(2, Some("ZemenExpress"), None);
        assert!(record_from_update(&update, &wanted()).is_none());

        // Not a channel post at all
        let update = Update {
            update_id: 5,
            channel_post: None,
        };
        assert!(record_from_update(&update, &wanted()).is_none());
    }

    #[test]
    fn test_channel_match_is_case_insensitive() {
        let update = post_update(4, Some("zemenexpress"), Some("hi"));
        assert!(record_from_update(&update, &wanted()).is_some());
    }

    #[test]
    fn test_envelope_deserializes() {
        let body = r#"{
            "ok": true,
            "result": [
                {
                    "update_id": 7,
                    "channel_post": {
                        "message_id": 70,
                        "date": 1718000007,
                        "text": "ዋጋ 500 ብር",
                        "chat": {"id": -100, "username": "ZemenExpress", "type": "channel"}
                    }
                },
                {"update_id": 8, "message": {"message_id": 1}}
            ]
        }"#;

        let parsed: ApiResponse<Vec<Update>> = serde_json::from_str(body).unwrap();
        assert!(parsed.ok);
        let updates = parsed.result.unwrap();
        assert_eq!(updates.len(), 2);
        assert!(updates[0].channel_post.is_some());
        assert!(updates[1].channel_post.is_none());
    }
}
