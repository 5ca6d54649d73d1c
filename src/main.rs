use qc_relay::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use qc_relay::models::{AppState, ExtractionRequest, ProductRow};
use qc_relay::relay::Relay;
use qc_relay::routes::build_router;
use qc_relay::utils::{mask_secret, mime_type_for_path};

use base64::Engine;
use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn build_relay_from_env(env_file: Option<&str>) -> Relay {
    config::load_env_file(env_file);
    let settings = config::RelaySettings::from_env();
    match Relay::with_http(settings) {
        Ok(relay) => relay,
        Err(e) => {
            tracing::error!(%e, "Failed to build relay");
            eprintln!("{}: {}", yansi::Paint::new("Failed to build relay").red(), e);
            process::exit(1);
        }
    }
}

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    let relay = build_relay_from_env(env_file);
    AppState {
        relay: Arc::new(relay),
        static_dir: config::get_static_dir(),
        max_body_bytes: config::get_max_body_bytes(),
    }
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, host, port, "Cannot parse listen address");
            eprintln!("{} {}:{}: {}", yansi::Paint::red("Cannot listen on"), host, port, e);
            process::exit(1);
        }
    };
    if !state.key_configured() {
        tracing::warn!("GEMINI_API_KEY is not set; callers must supply apiKey");
    }
    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%e, %addr, "Listen socket unavailable");
            eprintln!(
                "{} {}: {}\n{}",
                yansi::Paint::new("Could not open").red(),
                addr,
                e,
                yansi::Paint::new("Pick another --port or free this one, then retry.").yellow()
            );
            process::exit(1);
        }
    };

    tracing::info!(%addr, "QC relay listening");
    println!("{} {}", yansi::Paint::new("Upload reports at").green(), yansi::Paint::new(format!("http://{}", addr)).cyan());
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(%e, "Relay server stopped");
        eprintln!("{}: {}", yansi::Paint::new("Relay server stopped").red(), e);
        process::exit(1);
    }
}

fn print_rows(rows: &[serde_json::Value]) {
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(ProductRow::FIELDS.to_vec());

    let mut skipped = 0;
    for value in rows {
        match ProductRow::from_value(value) {
            Some(row) => {
                table.add_row(row.cells().to_vec());
            }
            None => skipped += 1,
        }
    }

    println!("\n{table}\n");
    if skipped > 0 {
        println!("{}", yansi::Paint::new(format!("{} non-object row(s) omitted; use --json to see them", skipped)).yellow());
    }
}

async fn run_extract(relay: &Relay, image: PathBuf, mime_type: Option<String>, api_key: Option<String>, as_json: bool) {
    let bytes = match tokio::fs::read(&image).await {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{} {}: {}", yansi::Paint::red("Failed to read image at"), image.display(), e);
            process::exit(1);
        }
    };
    let mime_type = mime_type.unwrap_or_else(|| mime_type_for_path(&image).to_string());
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    let request = ExtractionRequest::new(encoded, mime_type, api_key);

    match relay.extract(request).await {
        Ok(rows) => {
            if as_json {
                let out = serde_json::json!({ "rows": rows });
                println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
            } else {
                print_rows(&rows);
            }
        }
        Err(e) => {
            eprintln!("{} ({}): {}", yansi::Paint::new("Extraction failed").red(), e.status_code(), e);
            process::exit(1);
        }
    }
}

#[derive(Parser)]
#[command(
    name = "qc-relay",
    author,
    version,
    about = "QC report extraction relay",
    long_about = r#"qc-relay turns photos of Quality Control pre-dispatch reports into structured rows.

It runs a small web server that forwards uploaded images to the Gemini API and returns the
extracted table as JSON, and can run the same extraction once from the command line.
Use the `--env-file` option or environment variables (GEMINI_API_KEY, GEMINI_MODEL, ...) to configure it.

Examples:
  1) Run the server:
      qc-relay serve --host 0.0.0.0 --port 8080
  2) Extract one image:
      qc-relay extract report.jpg
"#,
    after_help = "Use `qc-relay <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to a .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    #[command(about = "Show the resolved configuration.", long_about = "Print the upstream model, endpoint, timeout and token limit, and whether a server-side GEMINI_API_KEY is configured. Exits with status 1 when no key is set.")]
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
    },
    #[command(about = "Extract rows from a local image.", long_about = "Read an image file, send it through the same relay the server uses, and print the extracted rows as a table (or JSON with --json).")]
    Extract {
        /// Image file to read
        image: PathBuf,
        /// MIME type; inferred from the file extension when omitted
        #[arg(long)]
        mime_type: Option<String>,
        /// API key to use when GEMINI_API_KEY is not set
        #[arg(long)]
        api_key: Option<String>,
        /// Print raw JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("qc_relay=info,tower_http=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    // No subcommand: serve with defaults
    let Some(command) = cli.command else {
        let state = build_state_from_env(None);
        start_server(state, DEFAULT_HOST, DEFAULT_PORT).await;
        return;
    };

    match command {
        Commands::Serve { host, port, env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            start_server(state, &host, port).await;
        }
        Commands::CheckConfig { env_file } => {
            let relay = build_relay_from_env(env_file.as_deref());
            let settings = relay.settings();
            println!("{:<18} {}", "Model:", settings.model);
            println!("{:<18} {}", "API base URL:", settings.api_base_url);
            println!("{:<18} {}s", "Timeout:", settings.timeout.as_secs());
            println!("{:<18} {}", "Max output tokens:", settings.max_output_tokens);
            println!("{:<18} {}", "Static dir:", config::get_static_dir());
            match settings.api_key.as_deref() {
                Some(key) => {
                    println!("{:<18} {}", "API key:", yansi::Paint::new(mask_secret(key)).green());
                }
                None => {
                    eprintln!("{}", yansi::Paint::new("GEMINI_API_KEY is not configured").red());
                    process::exit(1);
                }
            }
        }
        Commands::Extract { image, mime_type, api_key, json, env_file } => {
            let relay = build_relay_from_env(env_file.as_deref());
            run_extract(&relay, image, mime_type, api_key, json).await;
        }
    }
}
