use anyhow::Result;
use clap::Parser;
use tracing::info;

use toxcheck::checker::ToxicityChecker;
use toxcheck::classifier::download;
use toxcheck::classifier::onnx::OnnxClassifier;
use toxcheck::config::Config;
use toxcheck::scoring::trust::TrustMode;

/// Toxcheck: classify text as toxic or non-toxic.
///
/// Pass the text as arguments, or run with none to be prompted for it.
/// You'll then be asked whether to use the default trust score or derive
/// one from a sentiment model.
#[derive(Parser)]
#[command(name = "toxcheck", version, about)]
struct Cli {
    /// Text to check (words are joined with spaces)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    text: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the result lines
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("toxcheck=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    let (text, trust_mode) = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        let text = toxcheck::prompt::read_text(&cli.text, &mut input, &mut output)?;
        let trust_mode = toxcheck::prompt::read_trust_mode(&mut input, &mut output)?;
        (text, trust_mode)
    };

    let checker = create_checker(&config, trust_mode).await?;
    let result = checker.check_detailed(&text).await?;

    toxcheck::output::terminal::display_result(&result);
    Ok(())
}

/// Fetch any missing model files and load the classifiers the trust mode needs.
async fn create_checker(config: &Config, trust_mode: TrustMode) -> Result<ToxicityChecker> {
    let toxicity_dir = config.toxicity_model_dir();
    download::ensure_model(&config.hf_endpoint, &config.toxicity_model, &toxicity_dir).await?;
    info!(model = %config.toxicity_model, "Loading toxicity classifier");
    let toxicity = Box::new(OnnxClassifier::load(&toxicity_dir)?);

    match trust_mode {
        TrustMode::Default => Ok(ToxicityChecker::new(toxicity)),
        TrustMode::Sentiment => {
            let sentiment_dir = config.sentiment_model_dir();
            download::ensure_model(&config.hf_endpoint, &config.sentiment_model, &sentiment_dir)
                .await?;
            info!(model = %config.sentiment_model, "Loading sentiment classifier");
            let sentiment = Box::new(OnnxClassifier::load(&sentiment_dir)?);
            Ok(ToxicityChecker::with_sentiment(toxicity, sentiment))
        }
    }
}
