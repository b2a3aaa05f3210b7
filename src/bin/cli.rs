//! Compilo CLI
//!
//! Command-line access to the playground: serve the UI, list models, run
//! code remotely, or review a file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use compilo::config::Config;
use compilo::execution::{CodeExecutor, ExecutionRequest, JDoodleExecutor, Language};
use compilo::review::{
    GeminiClient, GenerativeBackend, ReviewOutcome, ReviewRequest, ReviewResolver,
};
use compilo::telemetry::init_tracing;
use compilo::VERSION;
use console::style;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "compilo",
    version = VERSION,
    about = "Compilo - online code playground with AI review",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address
        #[arg(long)]
        bind: Option<String>,
        /// Port
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// List models and mark the ones usable for reviews
    Models,

    /// Execute a source file remotely
    Run {
        /// Language key (c, cpp, java, python, ...)
        language: String,
        /// Source file
        file: PathBuf,
        /// File whose contents are passed as stdin
        #[arg(long)]
        stdin: Option<PathBuf>,
    },

    /// Ask the AI to review a source file
    Review {
        /// Source file
        file: PathBuf,
        /// Language label shown to the model
        #[arg(short, long)]
        language: Option<String>,
        /// Model to request
        #[arg(short, long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    init_tracing(&config.log);

    match cli.command {
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            compilo::server::serve(&config).await
        }
        Commands::Models => list_models(&config).await,
        Commands::Run {
            language,
            file,
            stdin,
        } => run_code(&config, &language, &file, stdin.as_deref()).await,
        Commands::Review {
            file,
            language,
            model,
        } => review_file(&config, &file, language, model).await,
    }
}

/// Read a source file, naming it in the error
fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// List models from the generative API
async fn list_models(config: &Config) -> anyhow::Result<()> {
    let client = GeminiClient::new(&config.gemini)?;

    println!("\n{}", style("Loading available models...").dim());
    let models = client.list_models().await?;

    println!(
        "\n   {} models available\n",
        style(models.len()).green().bold()
    );
    for model in &models {
        if model.supports_generation {
            println!("   {} {}", style("✓").green(), model.name);
        } else {
            println!("   {} {}", style("·").dim(), style(&model.name).dim());
        }
    }
    Ok(())
}

/// Run code through the execution API
async fn run_code(
    config: &Config,
    language: &str,
    file: &Path,
    stdin: Option<&Path>,
) -> anyhow::Result<()> {
    let executor = JDoodleExecutor::new(config.jdoodle.clone())?;

    let language: Language = language.parse()?;
    let mut request = ExecutionRequest::new(read_source(file)?, language);
    if let Some(path) = stdin {
        request = request.with_stdin(read_source(path)?);
    }

    println!("Executing {} code...\n", style(language.label()).cyan());

    let result = executor.execute(request).await?;
    println!("Output:\n{}", result.output);

    if let (Some(memory), Some(cpu)) = (result.memory, result.cpu_time) {
        println!("\n{}", style(format!("Memory: {}  CPU: {}", memory, cpu)).dim());
    }
    Ok(())
}

/// Review a file and print the verdict
async fn review_file(
    config: &Config,
    file: &Path,
    language: Option<String>,
    model: Option<String>,
) -> anyhow::Result<()> {
    let client = GeminiClient::new(&config.gemini)?;
    let resolver = ReviewResolver::new(Arc::new(client));

    let model = model.or_else(|| config.gemini.default_model.clone());
    let request = ReviewRequest::new(read_source(file)?, language, model)?;
    let report = resolver.resolve(&request).await?;

    let via = if report.fell_back {
        format!("{} (fallback)", report.model)
    } else {
        report.model.clone()
    };
    println!("{}", style(format!("Reviewed with {}", via)).dim());

    if let ReviewOutcome::Unstructured { .. } = report.outcome {
        println!("{}", style("AI response was not structured.").yellow());
    }

    let verdict = report.outcome.verdict_or_fallback();
    if verdict.is_correct {
        println!("\n{} Code is right.", style("✅").green());
        return Ok(());
    }

    if !verdict.summary.is_empty() {
        println!("\n{}", style(&verdict.summary).bold());
    }
    for issue in &verdict.issues {
        println!("  - {}", issue);
    }
    if !verdict.corrected_code.is_empty() {
        println!("\n{}\n{}", style("Corrected code:").cyan(), verdict.corrected_code);
    }
    Ok(())
}
