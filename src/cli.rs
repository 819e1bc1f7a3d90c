//! CLI интерфейс для tablesql
//!
//! Предоставляет командную строку для трансляции запросов и проверки
//! их разбора без обращения к хранилищу

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TableSQL - Компилятор SQL запросов для виртуальных таблиц на Rust
#[derive(Parser)]
#[command(name = "tablesql")]
#[command(about = "TableSQL - A SQL query compiler for virtual tables in Rust")]
#[command(version)]
pub struct Cli {
    /// Конфигурационный файл
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Уровень детализации логирования
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Транслирует запрос в физический SQL с параметрами
    Translate {
        /// Текст запроса
        sql: String,

        /// Файл карты схемы в формате JSON
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,

        /// Вывести результат в формате JSON
        #[arg(long)]
        json: bool,
    },

    /// Разбирает запрос и печатает канонический SQL
    Parse {
        /// Текст запроса
        sql: String,
    },
}
