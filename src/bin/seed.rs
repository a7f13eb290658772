use regionscore_backend::{
    config::Config,
    database::{seed::run_seed, Database},
    utils::logging::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let db = Database::connect(&config).await?;
    db.migrate().await?;

    let result = run_seed(&db).await;
    db.close().await;
    result?;

    println!("seed completed");
    Ok(())
}
