use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;
use gmane_rescue::{
    GMANE_NEWS_HOST, GmaneUrl, LookupService, Mode, NNTP_PORT, NNTPS_PORT, NntpClient, Rescuer,
    ServerConfig, TEST_CASES, UrlTemplate, Verifier, run_self_test,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "rescue-gmane-url")]
#[command(about = "Rescue broken gmane URLs")]
#[command(version)]
struct Cli {
    /// Output whole article rather than new URL
    #[arg(short, long, conflicts_with = "test")]
    article: bool,

    /// Rescue the built-in sample URLs and check them over HTTP
    #[arg(short, long)]
    test: bool,

    /// The broken gmane URL to rescue
    #[arg(required_unless_present = "test", conflicts_with = "test")]
    url: Option<String>,

    /// NNTP server
    #[arg(long, env = "NNTP_HOST", default_value = GMANE_NEWS_HOST)]
    server: String,

    /// NNTP port (119, or 563 with --tls)
    #[arg(long, env = "NNTP_PORT")]
    port: Option<u16>,

    /// Use NNTP over TLS
    #[arg(long, env = "NNTP_TLS")]
    tls: bool,

    /// Accept any TLS certificate
    #[arg(long, requires = "tls")]
    insecure_tls: bool,

    /// AUTHINFO username
    #[arg(long, env = "NNTP_USER", requires = "password")]
    user: Option<String>,

    /// AUTHINFO password
    #[arg(long, env = "NNTP_PASS", hide_env_values = true, requires = "user")]
    password: Option<String>,

    /// Send MODE READER after connecting
    #[arg(long)]
    mode_reader: bool,

    /// Message-ID lookup service
    #[arg(long, value_enum, default_value_t = LookupService::PublicInbox)]
    service: LookupService,

    /// Custom lookup URL with one %s
    #[arg(long, conflicts_with = "service")]
    template: Option<String>,
}

/// What this run does, decided once from the arguments
enum RunMode {
    RescueUrl(GmaneUrl),
    FetchArticle(GmaneUrl),
    SelfTest,
}

/// Report a usage problem through clap and exit
fn usage_error(kind: ErrorKind, message: impl std::fmt::Display) -> ! {
    Cli::command().error(kind, message).exit()
}

impl Cli {
    /// Pick the mode, validating the URL before any connection is made
    fn run_mode(&self) -> RunMode {
        if self.test {
            return RunMode::SelfTest;
        }

        let Some(url) = self.url.as_deref() else {
            usage_error(
                ErrorKind::MissingRequiredArgument,
                "a URL is required unless in test mode",
            );
        };
        let url = GmaneUrl::parse(url)
            .unwrap_or_else(|e| usage_error(ErrorKind::ValueValidation, e));

        if self.article {
            RunMode::FetchArticle(url)
        } else {
            RunMode::RescueUrl(url)
        }
    }

    fn template(&self) -> UrlTemplate {
        match self.template.as_deref() {
            Some(template) => UrlTemplate::new(template)
                .unwrap_or_else(|e| usage_error(ErrorKind::ValueValidation, e)),
            None => self.service.template(),
        }
    }

    fn server_config(&self) -> ServerConfig {
        let default_port = if self.tls { NNTPS_PORT } else { NNTP_PORT };
        let mut config = ServerConfig::new(
            self.server.clone(),
            self.port.unwrap_or(default_port),
            self.tls,
        );
        config.allow_insecure_tls = self.insecure_tls;
        config.reader_mode = self.mode_reader;
        if let (Some(user), Some(pass)) = (&self.user, &self.password) {
            config = config.with_credentials(user.clone(), pass.clone());
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = cli.run_mode();
    let rescuer = Rescuer::new(cli.template());

    let mut client = NntpClient::open(Arc::new(cli.server_config())).await?;

    match mode {
        RunMode::RescueUrl(url) => {
            let rescued = rescuer.rescue(&mut client, &url, Mode::RescueUrl).await?;
            println!("{}", rescued);
        }
        RunMode::FetchArticle(url) => {
            let rescued = rescuer.rescue(&mut client, &url, Mode::FetchArticle).await?;
            println!("{}", rescued);
        }
        RunMode::SelfTest => {
            let verifier = Verifier::new();
            let mut stdout = std::io::stdout().lock();
            run_self_test(
                &mut client,
                &rescuer,
                Some(&verifier),
                TEST_CASES,
                &mut stdout,
            )
            .await?;
        }
    }

    if let Err(e) = client.quit().await {
        debug!("QUIT failed: {}", e);
    }

    Ok(())
}
