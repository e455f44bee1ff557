use super::*;

#[derive(Parser)]
#[command(name = "subtrack-docstore")]
#[command(about = "Subtrack document store (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8090")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Data directory; one subdirectory per collection
    #[arg(long, default_value = "./subtrack-data")]
    data_dir: PathBuf,

    /// Bearer token clients must present
    #[arg(long, default_value = "dev")]
    token: String,

    /// JSON file with initial documents (`{collection: {key: fields}}`); existing keys are kept
    #[arg(long)]
    seed: Option<PathBuf>,
}

pub(super) async fn run() -> Result<()> {
    subtrack::logging::init("info");

    let args = Args::parse();
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let loaded = load_collections_from_disk(&args.data_dir).context("load documents from disk")?;
    let state = Arc::new(AppState {
        data_dir: args.data_dir.clone(),
        token: args.token.clone(),
        collections: Arc::new(RwLock::new(loaded)),
    });

    if let Some(seed_path) = &args.seed {
        let seed = read_seed(seed_path)?;
        let mut collections = state.collections.write().await;
        let added = apply_seed(state.as_ref(), &mut collections, seed).context("apply seed")?;
        tracing::info!(added, seed = %seed_path.display(), "seeded documents");
    }

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(authed_router(state.clone()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(addr = %local_addr, data_dir = %args.data_dir.display(), "listening");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
