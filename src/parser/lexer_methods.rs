// Методы лексического анализатора

impl Lexer {
    /// Возвращает следующий токен
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            // Пропускаем пробелы
            self.skip_whitespace();

            // Проверяем конец файла
            if self.position >= self.input.len() {
                return Ok(Token::new(
                    TokenType::Eof,
                    String::new(),
                    self.current_position.clone(),
                ));
            }

            let start_position = self.current_position.clone();
            let current_char = self.input[self.position];

            // Комментарии пропускаем целиком и продолжаем со следующего токена
            if current_char == '-' && self.peek_char() == Some('-') {
                self.skip_single_line_comment();
                continue;
            }
            if current_char == '/' && self.peek_char() == Some('*') {
                self.skip_multi_line_comment(&start_position)?;
                continue;
            }

            // Определяем тип токена по первому символу
            let token = match current_char {
                // Строковые литералы
                '\'' => self.read_string_literal(&start_position)?,
                '"' => self.read_quoted_identifier(&start_position)?,

                // Числовые литералы
                '0'..='9' => self.read_number(&start_position)?,

                // Идентификаторы и ключевые слова
                'a'..='z' | 'A'..='Z' | '_' => self.read_identifier_or_keyword(&start_position),

                // Операторы сравнения
                '=' => self.read_single_char_token(TokenType::Equal),
                '<' => self.read_comparison_operator(),
                '>' => self.read_comparison_operator(),
                '!' if self.peek_char() == Some('=') => {
                    self.read_two_char_token(TokenType::NotEqual)
                }

                // Разделители
                '(' => self.read_single_char_token(TokenType::LeftParen),
                ')' => self.read_single_char_token(TokenType::RightParen),
                ',' => self.read_single_char_token(TokenType::Comma),
                ';' => self.read_single_char_token(TokenType::Semicolon),
                '.' => self.read_single_char_token(TokenType::Dot),
                '*' => self.read_single_char_token(TokenType::Asterisk),

                // Неизвестный символ
                _ => {
                    let unknown_char = self.advance();
                    Token::new(TokenType::Unknown, unknown_char.to_string(), start_position)
                }
            };

            return Ok(token);
        }
    }

    /// Пропускает пробельные символы, отслеживая позицию
    fn skip_whitespace(&mut self) {
        while self.position < self.input.len() && self.input[self.position].is_whitespace() {
            self.advance();
        }
    }

    /// Переходит к следующему символу и возвращает текущий
    fn advance(&mut self) -> char {
        let c = self.input[self.position];
        self.position += 1;
        self.current_position.offset += 1;
        if c == '\n' {
            self.current_position.line += 1;
            self.current_position.column = 1;
        } else {
            self.current_position.column += 1;
        }
        c
    }

    /// Смотрит на следующий символ без продвижения
    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Читает токен из одного символа
    fn read_single_char_token(&mut self, token_type: TokenType) -> Token {
        let start_position = self.current_position.clone();
        let c = self.advance();
        Token::new(token_type, c.to_string(), start_position)
    }

    /// Читает токен из двух символов
    fn read_two_char_token(&mut self, token_type: TokenType) -> Token {
        let start_position = self.current_position.clone();
        let first = self.advance();
        let second = self.advance();
        Token::new(token_type, format!("{}{}", first, second), start_position)
    }

    /// Читает оператор сравнения, начинающийся с '<' или '>'
    fn read_comparison_operator(&mut self) -> Token {
        let start_position = self.current_position.clone();
        let first = self.advance();
        let (token_type, value) = match (first, self.input.get(self.position).copied()) {
            ('<', Some('=')) => {
                self.advance();
                (TokenType::LessEqual, "<=".to_string())
            }
            ('<', Some('>')) => {
                self.advance();
                (TokenType::NotEqual, "<>".to_string())
            }
            ('<', _) => (TokenType::Less, "<".to_string()),
            ('>', Some('=')) => {
                self.advance();
                (TokenType::GreaterEqual, ">=".to_string())
            }
            ('>', _) => (TokenType::Greater, ">".to_string()),
            _ => (TokenType::Unknown, first.to_string()),
        };
        Token::new(token_type, value, start_position)
    }
}
