//! Тесты для обхода дерева
