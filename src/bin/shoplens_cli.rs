use std::env;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use shoplens::{
    ConstraintProvider, InMemoryCatalog, Lexicon, ProviderWithFallback, RankingPipeline,
    RemoteProvider, RuleBasedProvider, ShopLensConfig,
};

fn usage() -> ! {
    eprintln!("Usage: shoplens-cli <catalog.json> <query...>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SHOPLENS_LEXICON          path to a lexicon JSON override");
    eprintln!("  SHOPLENS_RESULT_LIMIT     number of products to return (default 3)");
    eprintln!("  SHOPLENS_REMOTE_PROVIDER  set to 1 to extract via the remote LLM provider");
    eprintln!("  SHOPLENS_REMOTE_URL       remote provider endpoint");
    eprintln!("  SHOPLENS_REMOTE_MODEL     remote provider model name");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        usage();
    }
    let catalog_path = &args[0];
    let query = args[1..].join(" ");

    let config = ShopLensConfig::from_env();

    let lexicon = match &config.lexicon_path {
        Some(path) => Arc::new(
            Lexicon::from_path(path).with_context(|| format!("loading lexicon from {path}"))?,
        ),
        None => Arc::new(Lexicon::default()),
    };

    let catalog = InMemoryCatalog::from_path(catalog_path)
        .with_context(|| format!("loading catalog from {catalog_path}"))?;
    if catalog.is_empty() {
        bail!("catalog {catalog_path} contains no products");
    }

    let pipeline = if config.remote_provider_enabled {
        let remote = RemoteProvider::new(
            config.remote_url.clone(),
            config.remote_model.clone(),
            config.remote_api_key.clone(),
            config.remote_temperature,
            Arc::clone(&lexicon),
        )
        .context("initializing remote provider")?;
        let provider: Arc<dyn ConstraintProvider> = Arc::new(ProviderWithFallback::new(
            Arc::new(remote),
            Arc::clone(&lexicon),
            config.fallback_enabled,
        ));
        RankingPipeline::new(provider, Arc::new(catalog), lexicon, &config)
    } else {
        let provider: Arc<dyn ConstraintProvider> =
            Arc::new(RuleBasedProvider::new(Arc::clone(&lexicon)));
        RankingPipeline::new(provider, Arc::new(catalog), lexicon, &config)
    };

    let result = pipeline.process(&query).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
