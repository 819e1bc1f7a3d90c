//! Тесты для транслятора запросов

pub mod renderer_tests;
pub mod translator_tests;
