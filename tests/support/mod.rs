//! In-memory NNTP server for integration tests
//!
//! Speaks just enough RFC 3977 for the rescuer: GROUP, STAT, ARTICLE,
//! MODE READER, AUTHINFO USER/PASS and QUIT. Every command received is
//! recorded so tests can assert on the exact conversation.

#![allow(dead_code)]

use gmane_rescue::{NntpClient, ServerConfig};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};

/// A stored article
#[derive(Clone)]
pub struct FakeArticle {
    pub message_id: String,
    pub lines: Vec<String>,
}

/// Newsgroups and articles the fake server knows
#[derive(Clone, Default)]
pub struct FakeServer {
    groups: HashMap<String, HashMap<u64, FakeArticle>>,
    credentials: Option<(String, String)>,
    greeting: String,
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            greeting: "200 news.example.test InterNetNews NNRP server ready".to_string(),
            ..Self::default()
        }
    }

    pub fn with_article(mut self, group: &str, number: u64, message_id: &str, lines: &[&str]) -> Self {
        self.groups.entry(group.to_string()).or_default().insert(
            number,
            FakeArticle {
                message_id: message_id.to_string(),
                lines: lines.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.groups.entry(group.to_string()).or_default();
        self
    }

    pub fn with_credentials(mut self, user: &str, pass: &str) -> Self {
        self.credentials = Some((user.to_string(), pass.to_string()));
        self
    }

    pub fn with_greeting(mut self, greeting: &str) -> Self {
        self.greeting = greeting.to_string();
        self
    }

    /// Start serving one connection; returns the client end and the command log
    pub fn spawn(self) -> (DuplexStream, Arc<Mutex<Vec<String>>>) {
        let (client_io, server_io) = tokio::io::duplex(64 * 1024);
        let log = Arc::new(Mutex::new(Vec::new()));
        let task_log = Arc::clone(&log);
        tokio::spawn(async move {
            let _ = self.serve(server_io, task_log).await;
        });
        (client_io, log)
    }

    /// Start serving and connect an `NntpClient` to it
    pub async fn connect(self, config: ServerConfig) -> (NntpClient, Arc<Mutex<Vec<String>>>) {
        let (io, log) = self.spawn();
        let client = NntpClient::from_stream(io, Arc::new(config))
            .await
            .expect("fake server greeting");
        (client, log)
    }

    async fn serve(self, io: DuplexStream, log: Arc<Mutex<Vec<String>>>) -> std::io::Result<()> {
        let (read_half, mut write_half) = tokio::io::split(io);
        let mut reader = BufReader::new(read_half);

        write_half
            .write_all(format!("{}\r\n", self.greeting).as_bytes())
            .await?;

        let mut current: Option<String> = None;
        let mut pending_user: Option<String> = None;
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                return Ok(());
            }
            let command = line.trim_end().to_string();
            log.lock().unwrap().push(command.clone());

            let mut words = command.splitn(3, ' ');
            let verb = words.next().unwrap_or_default().to_ascii_uppercase();
            let arg = words.next().unwrap_or_default().to_string();
            let rest = words.next().unwrap_or_default().to_string();

            let reply = match verb.as_str() {
                "MODE" => "201 reader mode, posting prohibited\r\n".to_string(),
                "AUTHINFO" if arg.eq_ignore_ascii_case("USER") => {
                    pending_user = Some(rest);
                    "381 password required\r\n".to_string()
                }
                "AUTHINFO" if arg.eq_ignore_ascii_case("PASS") => {
                    let ok = match (&self.credentials, &pending_user) {
                        (Some((user, pass)), Some(given)) => user == given && *pass == rest,
                        _ => false,
                    };
                    if ok {
                        "281 authentication accepted\r\n".to_string()
                    } else {
                        "481 authentication failed\r\n".to_string()
                    }
                }
                "GROUP" => match self.groups.get(&arg) {
                    Some(articles) => {
                        let first = articles.keys().min().copied().unwrap_or(0);
                        let last = articles.keys().max().copied().unwrap_or(0);
                        current = Some(arg.clone());
                        format!("211 {} {} {} {}\r\n", articles.len(), first, last, arg)
                    }
                    None => "411 no such group\r\n".to_string(),
                },
                "STAT" | "ARTICLE" => match self.lookup(current.as_deref(), &arg) {
                    Err(reply) => reply.to_string(),
                    Ok((number, article)) if verb == "STAT" => {
                        format!("223 {} {} status\r\n", number, article.message_id)
                    }
                    Ok((number, article)) => {
                        let mut reply = format!("220 {} {} article\r\n", number, article.message_id);
                        for body_line in &article.lines {
                            if body_line.starts_with('.') {
                                reply.push('.');
                            }
                            reply.push_str(body_line);
                            reply.push_str("\r\n");
                        }
                        reply.push_str(".\r\n");
                        reply
                    }
                },
                "QUIT" => {
                    write_half.write_all(b"205 bye\r\n").await?;
                    return Ok(());
                }
                _ => "500 command not recognized\r\n".to_string(),
            };

            write_half.write_all(reply.as_bytes()).await?;
        }
    }

    fn lookup(&self, group: Option<&str>, arg: &str) -> Result<(u64, &FakeArticle), &'static str> {
        let group = group.ok_or("412 no newsgroup selected\r\n")?;
        let articles = &self.groups[group];
        let number: u64 = arg.parse().map_err(|_| "430 no such article\r\n")?;
        articles
            .get(&number)
            .map(|article| (number, article))
            .ok_or("423 no article with that number\r\n")
    }
}
