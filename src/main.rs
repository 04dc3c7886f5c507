use clap::Parser;
use seo_blog_gen::utils::{logger, validation::Validate};
use seo_blog_gen::{
    rng_from_seed, BlogEngine, BlogGenerationService, BlogPipeline, CliConfig, GenerationReport,
    HttpClientConfig, LocalStorage, SuggestionKeywordSource, TemplateComposer,
};
use std::io::{self, BufRead, Write};

const RULE_WIDTH: usize = 50;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting seo-blog-gen CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 沒有指定產品時改為互動輸入
    if config.products.is_empty() && config.products_file.is_none() {
        let product_name = prompt_product_name()?;
        if product_name.is_empty() {
            eprintln!("❌ Product name cannot be empty!");
            std::process::exit(1);
        }
        config.products.push(product_name);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(config).await {
        Ok(report) => print_report(&report),
        Err(e) => {
            tracing::error!(
                "❌ Blog generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}

async fn run(config: CliConfig) -> seo_blog_gen::Result<GenerationReport> {
    let http = HttpClientConfig::from_provider(&config);
    let keyword_source = SuggestionKeywordSource::new(http, rng_from_seed(config.seed, 0))?;
    let composer = TemplateComposer::new(rng_from_seed(config.seed, 1));
    let service = BlogGenerationService::new(keyword_source, composer);

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = BlogPipeline::new(storage, config, service);

    let mut engine = BlogEngine::new(pipeline);
    engine.run().await
}

fn prompt_product_name() -> io::Result<String> {
    print!("Enter the product name: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_report(report: &GenerationReport) {
    let rule = "=".repeat(RULE_WIDTH);
    let thin_rule = "-".repeat(RULE_WIDTH);

    for saved in &report.posts {
        let post = &saved.post;
        println!();
        println!("{}", rule);
        println!("🎉 GENERATED SEO BLOG POST");
        println!("{}", rule);
        println!("Product: {}", post.product_name());
        println!("Keywords: {}", post.keywords().join(", "));
        println!("Word Count: {}", post.word_count());
        println!();
        println!("{}", thin_rule);
        println!("BLOG POST CONTENT:");
        println!("{}", thin_rule);
        println!("{}", post.body());
        println!();
        println!("{}", rule);

        for path in &saved.paths {
            println!("💾 Blog post saved to: {}", path);
        }
    }

    if let Some(summary) = &report.summary_path {
        println!("📈 Summary saved to: {}", summary);
    }
}
