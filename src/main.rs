// Concierge operator CLI.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not the terminal the result prints on)
// 2. Load config
// 3. Build the gateway (Active or Disabled depending on credentials)
// 4. Run the requested operation and print its result
//
// Usage:
//   concierge consult "<message>"
//   concierge visual "<theme>" [output.png]
//   concierge reviews [business-name]

use githui_concierge::config;
use githui_concierge::gateway::ConciergeGateway;
use githui_concierge::protocol::{ConsultationRequest, ReviewQuery};

use anyhow::{bail, Context};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::info;

const USAGE: &str = "usage: concierge consult \"<message>\"\n\
       concierge visual \"<theme>\" [output.png]\n\
       concierge reviews [business-name]";

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Concierge gateway starting up");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{USAGE}");
    };

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: studio={}, text_model={}, image_model={}",
        config.studio.name, config.gateway.text_model, config.gateway.image_model
    );

    // 3. Build the gateway from config
    let gateway = ConciergeGateway::from_config(&config);
    match &gateway {
        ConciergeGateway::Active(_) => info!("Gateway active (API key configured)"),
        ConciergeGateway::Disabled => info!("Gateway disabled (no API key)"),
    }

    // 4. Dispatch
    match command.as_str() {
        "consult" => {
            let Some(message) = args.get(1) else {
                bail!("consult requires a message\n{USAGE}");
            };
            let reply = gateway
                .consultation_reply(&ConsultationRequest::new(message.clone()))
                .await;
            println!("{}", reply.text);
        }
        "visual" => {
            let Some(theme) = args.get(1) else {
                bail!("visual requires a theme\n{USAGE}");
            };
            let asset = gateway
                .generate_visual(theme)
                .await
                .context("visual generation failed")?;
            match args.get(2) {
                Some(path) => {
                    let encoded = asset
                        .data_uri
                        .strip_prefix(DATA_URI_PREFIX)
                        .context("unexpected data URI prefix")?;
                    let bytes = BASE64
                        .decode(encoded)
                        .context("failed to decode image payload")?;
                    std::fs::write(path, &bytes)
                        .with_context(|| format!("failed to write {path}"))?;
                    info!("Visual written to {path} ({} bytes)", bytes.len());
                    println!("wrote {path}");
                }
                None => println!("{}", asset.data_uri),
            }
        }
        "reviews" => {
            let business_name = args
                .get(1)
                .map(String::as_str)
                .unwrap_or_else(|| config.studio.listing_name())
                .to_string();
            let summary = gateway
                .verified_reviews(&ReviewQuery {
                    business_name,
                    coordinates: None,
                })
                .await;
            println!("{}", summary.text);
            for link in &summary.links {
                println!("  {} — {}", link.title, link.uri);
            }
        }
        other => bail!("unknown command `{other}`\n{USAGE}"),
    }

    info!("Concierge gateway done");
    Ok(())
}

/// Initialize tracing to log to a file so stdout stays clean for results.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("concierge.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("githui_concierge=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
