//! `wellspring run` - drive one exhaustion session and print the report

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;
use wellspring_core::config::SessionConfig;
use wellspring_core::session::{ExhaustionController, SessionReport};

use crate::ollama::{OllamaEmbedder, OllamaGenerator};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// The prompt to explore
    pub prompt: String,

    /// Items requested per generation batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Maximum number of generation batches
    #[arg(long)]
    pub max_batches: Option<usize>,

    /// Exhaustion fraction in (0, 1] at which to stop
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Minimum cosine similarity for joining an existing cluster
    #[arg(long)]
    pub join_threshold: Option<f64>,

    /// Items required before the stop threshold is considered
    #[arg(long)]
    pub min_items: Option<u64>,

    /// Cap on prior items passed back to the generator
    #[arg(long)]
    pub prior_limit: Option<usize>,

    /// Load session settings from a TOML file (flags override it)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ollama base URL
    #[arg(long, default_value = "http://localhost:11434")]
    pub base_url: String,

    /// Ollama chat model used for generation
    #[arg(long, default_value = "llama3.2")]
    pub model: String,

    /// Ollama model used for embeddings
    #[arg(long, default_value = "nomic-embed-text")]
    pub embed_model: String,

    /// Print the full session report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the exhaustion session
pub async fn execute(args: RunArgs) -> Result<()> {
    let config = build_config(&args)?;

    info!(base_url = %args.base_url, model = %args.model, embed_model = %args.embed_model, "using Ollama collaborators");
    let generator = Arc::new(OllamaGenerator::with_base_url(&args.base_url, &args.model));
    let embedder = Arc::new(OllamaEmbedder::with_base_url(&args.base_url, &args.embed_model));

    let controller = ExhaustionController::new(generator, embedder, config);
    let report = controller.run(&args.prompt).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// Merge the optional config file with flag overrides.
fn build_config(args: &RunArgs) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(max_batches) = args.max_batches {
        config.max_batches = max_batches;
    }
    if let Some(threshold) = args.threshold {
        config.stop_threshold = threshold;
    }
    if let Some(join_threshold) = args.join_threshold {
        config.join_threshold = join_threshold;
    }
    if let Some(min_items) = args.min_items {
        config.minimum_items = min_items;
    }
    if let Some(prior_limit) = args.prior_limit {
        config.prior_context_limit = Some(prior_limit);
    }
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<SessionConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn print_summary(report: &SessionReport) {
    println!("Session {}", report.session_id);
    println!("  items (N):           {}", report.total_items);
    println!("  clusters (u):        {}", report.observed_clusters);
    println!("  singletons (f1):     {}", report.singletons);
    println!("  doubletons (f2):     {}", report.doubletons);
    println!("  estimated total:     {:.2}", report.estimated_total);
    println!("  exhaustion:          {:.2}%", report.exhaustion_pct);
    println!("  stopped by:          {}", report.stop_reason.as_str());
    println!();
    for (index, item) in report.items.iter().enumerate() {
        println!("{:>3}. [cluster {}] {}", index + 1, item.cluster, item.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(prompt: &str) -> RunArgs {
        RunArgs {
            prompt: prompt.to_string(),
            batch_size: None,
            max_batches: None,
            threshold: None,
            join_threshold: None,
            min_items: None,
            prior_limit: None,
            config: None,
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            json: false,
        }
    }

    #[test]
    fn defaults_apply_without_config_file_or_flags() {
        let config = build_config(&args("p")).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn flags_override_config_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "batch_size = 5\nmax_batches = 3").unwrap();

        let mut run_args = args("p");
        run_args.config = Some(file.path().to_path_buf());
        run_args.batch_size = Some(7);

        let config = build_config(&run_args).unwrap();
        assert_eq!(config.batch_size, 7);
        assert_eq!(config.max_batches, 3);
        assert_eq!(config.stop_threshold, 0.95);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let mut run_args = args("p");
        run_args.config = Some(PathBuf::from("/nonexistent/wellspring.toml"));
        assert!(build_config(&run_args).is_err());
    }
}
