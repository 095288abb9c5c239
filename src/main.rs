use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use log::info;

use playtennis::{router, TennisPredictor};

#[derive(Parser, Debug)]
#[command(name = "playtennis_server", about = "Play-tennis prediction web demo")]
struct Args {
    /// Path to the training dataset CSV
    #[arg(long, default_value = "data/play_tennis.csv")]
    dataset: String,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    playtennis::init_logger();
    let args = Args::parse();

    info!("Building predictor from {}", args.dataset);
    let predictor = TennisPredictor::builder()
        .with_dataset_file(&args.dataset)?
        .build()?;
    let predictor_info = predictor.info();
    info!(
        "Predictor ready: {} rows, labels {:?}",
        predictor_info.num_rows, predictor_info.labels
    );

    let app = router(Arc::new(predictor));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
