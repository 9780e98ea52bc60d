pub mod analytics;
pub mod api;
pub mod dashboards;
pub mod datasets;
pub mod shared;

use std::path::PathBuf;
use std::sync::Arc;

use contracts::analytics::{AggregateRequest, Reduce};
use datasets::Dataset;

/// Shared application state: the immutable dataset snapshot loaded at
/// startup. Handlers receive it through axum's `State` extractor.
pub struct AppState {
    pub dataset: Dataset,
}

#[derive(Debug, PartialEq)]
enum Command {
    /// Load the dataset and start the HTTP server (the default)
    Serve {
        data: Option<PathBuf>,
        port: Option<u16>,
    },
    /// Load and validate a dataset directory, print its summary, exit
    LoadDataset { dir: PathBuf },
    /// Run one aggregation against the dataset and print the result
    Aggregate {
        data: Option<PathBuf>,
        request: AggregateRequest,
    },
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut args = args.iter();
    let subcommand = args.next().map(String::as_str).unwrap_or("serve");

    match subcommand {
        "serve" => {
            let mut data = None;
            let mut port = None;
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--data" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow::anyhow!("--data requires a directory"))?;
                        data = Some(PathBuf::from(value));
                    }
                    "--port" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow::anyhow!("--port requires a number"))?;
                        port = Some(value.parse()?);
                    }
                    other => anyhow::bail!("unknown argument '{other}'"),
                }
            }
            Ok(Command::Serve { data, port })
        }
        "load-dataset" => {
            let dir = args
                .next()
                .ok_or_else(|| anyhow::anyhow!("load-dataset requires a directory"))?;
            Ok(Command::LoadDataset {
                dir: PathBuf::from(dir),
            })
        }
        "aggregate" => {
            // aggregate <table> <group_by> <reduce> [--filter f=v] [--data dir]
            let table = args
                .next()
                .ok_or_else(|| anyhow::anyhow!("aggregate requires a table name"))?
                .clone();
            let group_by = args
                .next()
                .ok_or_else(|| anyhow::anyhow!("aggregate requires a group-by field"))?
                .clone();
            let reduce = args
                .next()
                .ok_or_else(|| anyhow::anyhow!("aggregate requires a reduce spec (count, sum:field, mean:field)"))?;
            let reduce = Reduce::parse(reduce)
                .ok_or_else(|| anyhow::anyhow!("bad reduce spec '{reduce}'"))?;

            let mut filter = None;
            let mut data = None;
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--filter" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow::anyhow!("--filter requires field=value"))?;
                        filter = Some(value.clone());
                    }
                    "--data" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow::anyhow!("--data requires a directory"))?;
                        data = Some(PathBuf::from(value));
                    }
                    other => anyhow::bail!("unknown argument '{other}'"),
                }
            }
            Ok(Command::Aggregate {
                data,
                request: AggregateRequest {
                    table,
                    group_by,
                    reduce,
                    filter,
                },
            })
        }
        other => anyhow::bail!(
            "unknown subcommand '{other}' (expected serve, load-dataset or aggregate)"
        ),
    }
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

/// Resolve the dataset directory: CLI flag first, then config.toml
fn resolve_data_dir(cli: Option<PathBuf>, config: &shared::config::Config) -> anyhow::Result<PathBuf> {
    match cli {
        Some(dir) => Ok(dir),
        None => shared::config::get_data_path(config),
    }
}

fn print_summary(dataset: &Dataset) {
    let summary = dataset.summary();
    for table in &summary.tables {
        println!("{:<40} {:>10} rows", table.table, table.rows);
    }
    println!("{:<40} {:>10} rows", "total", summary.total_rows());
    if let (Some(first), Some(last)) = (summary.first_purchase, summary.last_purchase) {
        println!("purchases from {first} to {last}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    let config = shared::config::load_config()?;

    match command {
        Command::LoadDataset { dir } => {
            let dataset = Dataset::load(&dir)?;
            print_summary(&dataset);
            Ok(())
        }
        Command::Aggregate { data, request } => {
            let dir = resolve_data_dir(data, &config)?;
            let dataset = Dataset::load(&dir)?;
            let response = analytics::query::run_aggregate(&dataset, &request)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Serve { data, port } => {
            let dir = resolve_data_dir(data, &config)?;
            tracing::info!("Loading dataset from {}", dir.display());
            let dataset = Dataset::load(&dir)?;
            let summary = dataset.summary();
            tracing::info!(
                "Dataset loaded: {} tables, {} rows",
                summary.tables.len(),
                summary.total_rows()
            );

            let state = Arc::new(AppState { dataset });

            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

            let app = Router::new()
                .route("/health", get(|| async { "ok" }))
                .route("/api/datasets/summary", get(api::handlers::datasets::get_summary))
                .route("/api/schemas", get(api::handlers::aggregate::get_schemas))
                .route("/api/aggregate", post(api::handlers::aggregate::post_aggregate))
                .route("/api/d401/overview", get(api::handlers::d401_overview::get_overview))
                .route("/api/d402/sales", get(api::handlers::d402_sales::get_sales))
                .route("/api/d403/customers", get(api::handlers::d403_customers::get_customers))
                .route("/api/d404/products", get(api::handlers::d404_products::get_products))
                .route("/api/d405/geography", get(api::handlers::d405_geography::get_geography))
                .layer(cors)
                .with_state(state);

            let port = port.unwrap_or(config.server.port);
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            tracing::info!("Backend listening on http://{addr}");

            let listener = TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}
