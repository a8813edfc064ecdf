use aegis::config::Config;
use aegis::reputation::Reputation;
use aegis::scoring::UrlScorer;
use aegis::server::{self, AppState};
use aegis::text::TextScorer;
use aegis::url_classifier::UrlClassifier;
use aegis::{ClassifyRequest, Engine, Payload};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// URL, listing, video and terms-of-service risk classifier.
#[derive(Debug, Parser)]
#[command(name = "aegis")]
#[command(about = "Classify URLs and content as benign or suspicious", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service (default).
    Serve {
        /// Bind address, overrides AEGIS_HOST.
        #[arg(long)]
        host: Option<String>,
        /// Bind port, overrides AEGIS_PORT.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Classify one item and print the JSON result.
    Classify {
        /// Content type: url, ebay, youtube or tos.
        kind: String,
        /// Payload field, repeatable.
        #[arg(long = "field", short = 'f', value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))
}

/// Load the domain table and score model, degrading where they are missing.
fn build_engine(config: &Config) -> Engine {
    let reputation = Reputation::load_or_unavailable(&config.phishing_csv);
    let scorer = UrlScorer::load_or_heuristic(&config.onnx_options());
    Engine::new(UrlClassifier::new(reputation, scorer), TextScorer::new())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aegis=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let mut config = Config::from_env();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Command::Classify { kind, fields } => classify_once(&config, kind, fields),
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("aegis {} starting", env!("CARGO_PKG_VERSION"));

    let engine = build_engine(&config);
    let app = server::router(AppState::new(engine));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn classify_once(
    config: &Config,
    kind: String,
    fields: Vec<(String, String)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(config);
    let payload = fields
        .into_iter()
        .fold(Payload::new(), |payload, (key, value)| payload.with(&key, value));
    let request = ClassifyRequest::new(&kind, payload);

    match engine.classify(&request) {
        Ok(result) => {
            println!("{}", serde_json::to_string(&result)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string(&e.to_classification())?);
            std::process::exit(1);
        }
    }
}
