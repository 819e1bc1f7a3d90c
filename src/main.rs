//! Главный исполняемый файл TableSQL

use anyhow::Context;
use clap::Parser;
use tablesql::cli::{Cli, Commands};
use tablesql::common::CompilerConfig;
use tablesql::parser::{ParserSettings, QueryParser};
use tablesql::{QueryTranslator, SchemaMap};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CompilerConfig::from_file(path)
            .with_context(|| format!("Не удалось загрузить конфигурацию: {}", path.display()))?,
        None => CompilerConfig::default(),
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level);

    match &cli.command {
        Commands::Translate { sql, schema, json } => {
            let content = std::fs::read_to_string(schema)
                .with_context(|| format!("Не удалось прочитать схему: {}", schema.display()))?;
            let schema: SchemaMap = serde_json::from_str(&content)
                .with_context(|| "Некорректный файл схемы".to_string())?;

            let translator = QueryTranslator::with_config(sql, &schema, &config)?;

            if *json {
                let translated = translator.into_translated();
                println!("{}", serde_json::to_string_pretty(&translated)?);
            } else {
                println!("{}", translator.output_sql());
                for parameter in translator.parameters() {
                    println!(":{} = {}", parameter.name, parameter.value);
                }
            }
        }
        Commands::Parse { sql } => {
            let mut parser = QueryParser::with_settings(sql, ParserSettings::from(&config))?;
            let query = parser.parse()?;
            println!("{}", query.borrow().to_sql());
        }
    }

    Ok(())
}

/// Инициализирует подписчика трассировки
///
/// Переменная окружения RUST_LOG имеет приоритет над конфигурацией.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
