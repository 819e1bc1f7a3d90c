//! Тесты для общих типов и конфигурации
