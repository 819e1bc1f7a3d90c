//! Тесты для семантического анализатора
