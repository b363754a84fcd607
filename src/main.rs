use clap::Parser;
use colored::Colorize;

use shortmark::cli::{Cli, Commands};
use shortmark::config::{StaticConfig, get_config, init_config_from};
use shortmark::errors::ShortmarkError;
use shortmark::runtime::modes::run_server;
use shortmark::system::init_logging;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command() {
        Commands::GenerateConfig { output } => generate_config(&output),
        Commands::Serve => serve(&cli.config).await,
    };

    if let Err(e) = result {
        match e.downcast_ref::<ShortmarkError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("{} {:#}", "[ERROR]".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn generate_config(output: &str) -> anyhow::Result<()> {
    StaticConfig::default()
        .save_to_file(output)
        .map_err(|e| ShortmarkError::file_operation(format!("{}: {}", output, e)))?;
    println!("{} Configuration written to {}", "[OK]".green().bold(), output);
    Ok(())
}

async fn serve(config_path: &str) -> anyhow::Result<()> {
    init_config_from(config_path);
    let config = get_config();

    // 保持 guard 存活直到进程退出，确保日志刷盘
    let _log_guard = init_logging(&config)?;

    run_server().await
}
