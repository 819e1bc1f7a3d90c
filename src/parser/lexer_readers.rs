// Методы чтения составных токенов

impl Lexer {
    /// Читает строковый литерал в одинарных кавычках
    ///
    /// Удвоенная кавычка ('') внутри литерала означает одиночную кавычку.
    fn read_string_literal(&mut self, start_position: &Position) -> Result<Token> {
        self.advance(); // открывающая кавычка
        let mut value = String::new();

        loop {
            if self.position >= self.input.len() {
                return Err(Error::parse("unterminated string literal", start_position));
            }
            let c = self.advance();
            if c == '\'' {
                // '' -> экранированная кавычка
                if self.input.get(self.position) == Some(&'\'') {
                    self.advance();
                    value.push('\'');
                } else {
                    break;
                }
            } else {
                value.push(c);
            }
        }

        Ok(Token::new(
            TokenType::StringLiteral,
            value,
            start_position.clone(),
        ))
    }

    /// Читает идентификатор в двойных кавычках
    fn read_quoted_identifier(&mut self, start_position: &Position) -> Result<Token> {
        self.advance(); // открывающая кавычка
        let mut value = String::new();

        loop {
            if self.position >= self.input.len() {
                return Err(Error::parse("unterminated quoted identifier", start_position));
            }
            let c = self.advance();
            if c == '"' {
                // "" -> экранированная кавычка
                if self.input.get(self.position) == Some(&'"') {
                    self.advance();
                    value.push('"');
                } else {
                    break;
                }
            } else {
                value.push(c);
            }
        }

        Ok(Token::new(
            TokenType::QuotedIdentifier,
            value,
            start_position.clone(),
        ))
    }

    /// Читает числовой литерал (целый или с плавающей точкой)
    fn read_number(&mut self, start_position: &Position) -> Result<Token> {
        let mut value = String::new();
        let mut is_float = false;

        while self.position < self.input.len() {
            let c = self.input[self.position];
            if c.is_ascii_digit() {
                value.push(self.advance());
            } else if c == '.'
                && !is_float
                && self
                    .peek_char()
                    .map(|n| n.is_ascii_digit())
                    .unwrap_or(false)
            {
                is_float = true;
                value.push(self.advance());
            } else if c == 'e' || c == 'E' {
                // Экспоненциальная запись: 1e5, 1.5E-3
                let mut lookahead = self.position + 1;
                if matches!(self.input.get(lookahead).copied(), Some('+') | Some('-')) {
                    lookahead += 1;
                }
                if self
                    .input
                    .get(lookahead)
                    .map(|n| n.is_ascii_digit())
                    .unwrap_or(false)
                {
                    is_float = true;
                    value.push(self.advance());
                    if matches!(self.input.get(self.position).copied(), Some('+') | Some('-')) {
                        value.push(self.advance());
                    }
                } else {
                    break;
                }
            } else {
                break;
            }
        }

        let token_type = if is_float {
            TokenType::FloatLiteral
        } else {
            TokenType::IntegerLiteral
        };
        Ok(Token::new(token_type, value, start_position.clone()))
    }

    /// Читает идентификатор или ключевое слово
    fn read_identifier_or_keyword(&mut self, start_position: &Position) -> Token {
        let mut value = String::new();

        while self.position < self.input.len() {
            let c = self.input[self.position];
            if c.is_ascii_alphanumeric() || c == '_' {
                value.push(self.advance());
            } else {
                break;
            }
        }

        // Ключевые слова распознаются без учета регистра
        let token_type = self
            .keywords
            .get(value.to_uppercase().as_str())
            .copied()
            .unwrap_or(TokenType::Identifier);

        Token::new(token_type, value, start_position.clone())
    }

    /// Пропускает однострочный комментарий (-- до конца строки)
    fn skip_single_line_comment(&mut self) {
        while self.position < self.input.len() && self.input[self.position] != '\n' {
            self.advance();
        }
    }

    /// Пропускает многострочный комментарий (/* ... */)
    fn skip_multi_line_comment(&mut self, start_position: &Position) -> Result<()> {
        self.advance(); // '/'
        self.advance(); // '*'
        loop {
            if self.position >= self.input.len() {
                return Err(Error::parse("unterminated comment", start_position));
            }
            let c = self.advance();
            if c == '*' && self.input.get(self.position) == Some(&'/') {
                self.advance();
                return Ok(());
            }
        }
    }
}
