use clap::Parser;
use seo_blog_gen::core::ConfigProvider;
use seo_blog_gen::utils::{logger, validation::Validate};
use seo_blog_gen::{
    rng_from_seed, BlogEngine, BlogGenerationService, BlogPipeline, GenerationReport,
    HttpClientConfig, LocalStorage, SuggestionKeywordSource, TemplateComposer, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-blog")]
#[command(about = "Batch SEO blog generation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "blog-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - show what would be generated without any request or file write
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置 (日誌格式由配置決定，所以先載入)
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let verbose = args.verbose || config.verbose();
    if config.json_logging() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based blog generator");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(seed) = args.seed {
        config.generator.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests or files will be made");
        perform_dry_run(&config);
        return Ok(());
    }

    match run(config).await {
        Ok(report) => display_report(&report),
        Err(e) => {
            tracing::error!(
                "❌ Blog generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

async fn run(config: TomlConfig) -> seo_blog_gen::Result<GenerationReport> {
    let seed = config.seed();
    let http = HttpClientConfig::from_provider(&config);
    let keyword_source = SuggestionKeywordSource::new(http, rng_from_seed(seed, 0))?;
    let composer = TemplateComposer::new(rng_from_seed(seed, 1));
    let service = BlogGenerationService::new(keyword_source, composer);

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = BlogPipeline::new(storage, config, service);

    let mut engine = BlogEngine::new(pipeline);
    engine.run().await
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Generator: {}", config.generator.name);
    if let Some(description) = &config.generator.description {
        println!("  Description: {}", description);
    }
    println!("  Keyword endpoint: {}", config.keyword_endpoint());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Summary CSV: {}", config.write_summary());

    match config.seed() {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Keyword Lookup:");
    println!("  Endpoint: {}", config.keyword_endpoint());
    println!("  Timeout: {:?}", config.request_timeout());
    println!("  Delay before each request: {:?}", config.request_delay());
    let headers = config.extra_headers();
    if !headers.is_empty() {
        println!("  Headers: {} custom headers", headers.len());
    }

    println!();
    println!("📦 Products:");
    for product in config.products() {
        println!("  - {}", product);
    }
    if let Some(file) = config.products_file() {
        println!("  + product names from file: {}", file);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}

fn display_report(report: &GenerationReport) {
    println!("✅ Generated {} blog posts", report.posts.len());

    for (i, saved) in report.posts.iter().enumerate() {
        let post = &saved.post;
        println!();
        println!("--- Blog Post {} ---", i + 1);
        println!("Product: {}", post.product_name());
        println!("Word Count: {}", post.word_count());
        println!(
            "Keywords ({}): {}",
            post.keyword_origin(),
            post.keywords().join(", ")
        );
        for path in &saved.paths {
            println!("Local File: {}", path);
        }
    }

    if let Some(summary) = &report.summary_path {
        println!();
        println!("📈 CSV Export: {}", summary);
    }
}
