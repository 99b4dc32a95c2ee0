use clap::{Parser, Subcommand};
use convai_snapshot::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const TRACING_TARGET: &str = "convai_snapshot::cli";

/// Decomposes conversational-agent configurations into inspectable chunks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decompose a payload file into config chunks and print them as JSON
    Decompose {
        /// Path to the agent configuration JSON file
        payload: PathBuf,

        /// Snapshot timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,

        /// Emit chunks with string content and string timestamps
        #[arg(long)]
        legacy: bool,

        /// Print compact JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the node transfer map of a payload file
    Map {
        /// Path to the agent configuration JSON file
        payload: PathBuf,

        /// Print the map as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch a live agent configuration and decompose it
    #[cfg(feature = "fetch")]
    Fetch {
        /// Agent to fetch; falls back to the agent id found in the environment
        #[arg(long, env = "MJRVS_ELEVENLABS_AGENT_ID")]
        agent_id: Option<String>,

        /// API key; falls back to the key found in the environment
        #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Base URL of the provider API
        #[arg(long, env = "ELEVENLABS_BASE_URL")]
        base_url: Option<String>,

        /// Print the transfer map instead of the snapshot
        #[arg(long)]
        map: bool,
    },
}

fn main() {
    let dotenv_error = dotenvy::dotenv().err().filter(|err| !err.not_found());
    let cli = Cli::parse();
    init_tracing();

    if let Some(err) = dotenv_error {
        tracing::warn!(target: TRACING_TARGET, error = %err, "Failed to load .env file");
    }

    match cli.command {
        Command::Decompose {
            payload,
            at,
            legacy,
            compact,
        } => run_decompose(&payload, at.as_deref(), legacy, compact),
        Command::Map { payload, json } => run_map(&payload, json),
        #[cfg(feature = "fetch")]
        Command::Fetch {
            agent_id,
            api_key,
            base_url,
            map,
        } => run_fetch(agent_id, api_key, base_url, map),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_decompose(path: &Path, at: Option<&str>, legacy: bool, compact: bool) {
    let snapshot_at = match at {
        Some(raw) => parse_timestamp(raw),
        None => Utc::now(),
    };
    let chunks = load_chunks(path, snapshot_at);

    if legacy {
        let legacy_chunks: Vec<LegacyChunk> = chunks.iter().map(ConfigChunk::to_legacy).collect();
        print_json(&legacy_chunks, compact);
    } else {
        print_json(&chunks, compact);
    }
}

fn run_map(path: &Path, json: bool) {
    let chunks = load_chunks(path, Utc::now());
    let map = TransferMap::build(&chunks);

    if json {
        print_json(&map, false);
    } else {
        print!("{}", TransferMapFormatter::format(&map));
    }
}

#[cfg(feature = "fetch")]
fn run_fetch(
    agent_id: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    map: bool,
) {
    use convai_snapshot::source::ElevenLabsSource;

    let mut settings = ProviderSettings::from_env();
    if api_key.is_some() {
        settings.api_key = api_key;
    }
    if agent_id.is_some() {
        settings.agent_id = agent_id;
    }
    if let Some(base_url) = base_url {
        settings.base_url = base_url;
    }

    let source = ElevenLabsSource::from_settings(&settings)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let cache = SnapshotCache::new();
    let result = cache
        .get_or_refresh(settings.agent_id.as_deref(), &source)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    if map {
        print!(
            "{}",
            TransferMapFormatter::format(&TransferMap::build(&result.snapshot.chunks))
        );
    } else {
        print_json(&result, false);
    }
}

fn load_chunks(path: &Path, snapshot_at: DateTime<Utc>) -> Vec<ConfigChunk> {
    let payload = read_payload_file(path).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let chunks = decompose(&payload, snapshot_at);

    let groups = ChunkGroups::new(&chunks);
    for (component_type, members) in groups.iter() {
        tracing::debug!(
            target: TRACING_TARGET,
            component_type = component_type.as_str(),
            count = members.len(),
            "Decomposed chunks"
        );
    }
    chunks
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid --at timestamp '{}': {}", raw, e)))
}

fn print_json<T: Serialize>(value: &T, compact: bool) {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    let rendered =
        rendered.unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize output: {}", e)));
    println!("{}", rendered);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
