use ai::AdviceOrchestrator;
use ai_client::{build_provider, AiClientConfig};
use backend_api::{run_server, AppState, FileResultRepository};
use std::{env, path::PathBuf, sync::Arc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply
    let dotenv = dotenvy::dotenv().ok();
    logger::init(logger::DEFAULT_SERVER_DIRECTIVES);

    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let settings = settings_loader::load_from_env(settings_path.as_ref())?;

    let ai_config = AiClientConfig::from_settings(&settings.ai, env::var("AI_API_KEY").ok());
    let provider = match build_provider(&ai_config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("[WARN] AI provider disabled: {e}");
            None
        }
    };
    let advice_mode = provider
        .as_ref()
        .map(|p| format!("{} (timeout {}s)", p.name(), ai_config.timeout.as_secs()))
        .unwrap_or_else(|| "rule-based only (no AI credentials configured)".to_string());

    let data_dir = PathBuf::from(&settings.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    println!("Finance Coach API Server");
    println!("========================");
    println!("Env file: {}", dotenv.map(|p| p.display().to_string()).unwrap_or_else(|| "none".to_string()));
    println!("Data dir: {}", data_dir.display());
    println!("Advice: {}", advice_mode);
    println!("Listening on: {}:{}", settings.server.host, settings.server.port);
    println!();

    let repo = Arc::new(FileResultRepository::new(&data_dir));
    let advisor = AdviceOrchestrator::new(provider, ai_config.timeout);

    run_server(AppState::new(repo, advisor), &settings.server.host, settings.server.port).await?;

    Ok(())
}
