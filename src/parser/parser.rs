//! Parser implementation
//!
//! Recursive descent with one procedure per grammar nonterminal and a single
//! token of lookahead. There is no error recovery: the first error aborts the
//! parse.
//!
//! Errors are classified as follows:
//! - a missing closing token (`;`, `end`, `)`, `]`, `self`), an empty parameter
//!   list, or running out of input is a `StructuralError`
//! - any other token that does not fit the current position is a `SyntaxError`
//! - a parameter shape outside the grammar's alternatives is an `InvalidParameter`

use crate::error::{SierraError, SierraResult, SourceLocation};
use crate::lexer::{Token, TokenType, Keyword};
use super::ast::*;
use super::nonterminal::Nonterminal;

/// Parser for Sierra source code
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Create a new parser from tokens
    ///
    /// An `Eof` token is appended if the sequence does not already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(token) if token.token_type == TokenType::Eof) {
            let location = tokens
                .last()
                .map(|token| token.location.clone())
                .unwrap_or_else(|| SourceLocation::at(1, 1, 0));
            tokens.push(Token::new(TokenType::Eof, String::new(), location));
        }

        Self {
            tokens,
            current: 0,
        }
    }

    /// Parse tokens into a complete source file
    #[tracing::instrument(skip_all, fields(token_count = self.tokens.len()))]
    pub fn parse(&mut self) -> SierraResult<SourceFile> {
        self.source_file()
    }

    /// Run the procedure for a single nonterminal at the current position
    pub fn parse_nonterminal(&mut self, nonterminal: Nonterminal) -> SierraResult<SyntaxNode> {
        tracing::trace!(%nonterminal, position = self.current, "dispatch");

        let node = match nonterminal {
            Nonterminal::SourceFile => SyntaxNode::SourceFile(self.source_file()?),
            Nonterminal::SyntaxUnit => SyntaxNode::SyntaxUnit(self.syntax_unit()?),
            Nonterminal::UseStatement => SyntaxNode::UseStatement(self.use_statement()?),
            Nonterminal::ProgramStatement => {
                SyntaxNode::ProgramStatement(self.program_statement()?)
            }
            Nonterminal::TypeDefinition => SyntaxNode::TypeDefinition(self.type_definition()?),
            Nonterminal::ImplementationBlock => {
                SyntaxNode::ImplementationBlock(self.implementation_block()?)
            }
            Nonterminal::FunctionDefinition => {
                SyntaxNode::FunctionDefinition(self.function_definition()?)
            }
            Nonterminal::ParameterList => SyntaxNode::ParameterList(self.parameter_list()?),
            Nonterminal::Parameter => SyntaxNode::Parameter(self.parameter()?),
            Nonterminal::Block => SyntaxNode::Block(self.block()?),
            Nonterminal::Statement => SyntaxNode::Statement(self.statement()?),
            Nonterminal::Expression => SyntaxNode::Expression(self.expression()?),
            Nonterminal::QualifiedIdentifier => {
                SyntaxNode::QualifiedIdentifier(self.qualified_identifier()?)
            }
        };

        Ok(node)
    }

    /// Parse the whole token stream as exactly one `nonterminal`
    pub fn parse_fragment(&mut self, nonterminal: Nonterminal) -> SierraResult<SyntaxNode> {
        let node = self.parse_nonterminal(nonterminal)?;

        if !self.is_at_end() {
            return Err(SierraError::syntax_error(
                format!("Unexpected {} after {}", self.peek().describe(), nonterminal),
                nonterminal,
                self.peek().location.clone(),
            ));
        }

        Ok(node)
    }

    // ===== Module level =====

    fn source_file(&mut self) -> SierraResult<SourceFile> {
        let mut units = Vec::new();

        while !self.is_at_end() {
            units.push(self.syntax_unit()?);
        }

        tracing::debug!(unit_count = units.len(), "parsed source file");
        Ok(SourceFile { units })
    }

    fn syntax_unit(&mut self) -> SierraResult<SyntaxUnit> {
        match self.peek().token_type {
            TokenType::Keyword(Keyword::Use) => Ok(SyntaxUnit::Use(self.use_statement()?)),
            TokenType::Keyword(Keyword::Program) => {
                Ok(SyntaxUnit::Program(self.program_statement()?))
            }
            TokenType::Keyword(Keyword::Type) => Ok(SyntaxUnit::Type(self.type_definition()?)),
            TokenType::Keyword(Keyword::Implementation) => {
                Ok(SyntaxUnit::Implementation(self.implementation_block()?))
            }
            _ => Err(self.unexpected(
                "Expected 'use', 'program', 'type' or 'implementation'",
                Nonterminal::SyntaxUnit,
            )),
        }
    }

    fn use_statement(&mut self) -> SierraResult<UseStatement> {
        let nt = Nonterminal::UseStatement;
        let location = self.consume_keyword(Keyword::Use, "Expected 'use'", nt)?.location.clone();
        let path = self.qualified_identifier()?;
        self.expect_closing(TokenType::Semicolon, "Expected ';' after use path", nt)?;

        Ok(UseStatement { path, location })
    }

    fn program_statement(&mut self) -> SierraResult<ProgramStatement> {
        let nt = Nonterminal::ProgramStatement;
        let location = self
            .consume_keyword(Keyword::Program, "Expected 'program'", nt)?
            .location
            .clone();
        let name = self.identifier("Expected program name", nt)?;
        self.expect_closing(TokenType::Semicolon, "Expected ';' after program name", nt)?;

        Ok(ProgramStatement { name, location })
    }

    fn type_definition(&mut self) -> SierraResult<TypeDefinition> {
        let nt = Nonterminal::TypeDefinition;
        let location = self.consume_keyword(Keyword::Type, "Expected 'type'", nt)?.location.clone();
        let name = self.identifier("Expected type name", nt)?;
        self.consume(TokenType::Equals, "Expected '=' after type name", nt)?;
        let value = self.expression()?;
        self.expect_closing(TokenType::Semicolon, "Expected ';' after type definition", nt)?;

        Ok(TypeDefinition {
            name,
            value,
            location,
        })
    }

    fn implementation_block(&mut self) -> SierraResult<ImplementationBlock> {
        let nt = Nonterminal::ImplementationBlock;
        let location = self
            .consume_keyword(Keyword::Implementation, "Expected 'implementation'", nt)?
            .location
            .clone();
        let name = self.identifier("Expected implementation name", nt)?;

        let mut functions = Vec::new();
        while !self.check_keyword(Keyword::End) {
            if self.is_at_end() {
                return Err(self.missing("Expected 'end' to close implementation block", nt));
            }
            functions.push(self.function_definition()?);
        }
        self.expect_closing_keyword(
            Keyword::End,
            "Expected 'end' to close implementation block",
            nt,
        )?;

        Ok(ImplementationBlock {
            name,
            functions,
            location,
        })
    }

    // ===== Functions =====

    fn function_definition(&mut self) -> SierraResult<FunctionDefinition> {
        let nt = Nonterminal::FunctionDefinition;
        let location = self.peek().location.clone();

        let visibility = if self.match_keyword(Keyword::Public) {
            Some(Visibility::Public)
        } else if self.match_keyword(Keyword::Private) {
            Some(Visibility::Private)
        } else {
            None
        };

        self.consume_keyword(Keyword::Function, "Expected 'function'", nt)?;
        let name = self.identifier("Expected function name", nt)?;

        let parameters = if self.check(TokenType::LeftParen) {
            Some(self.parameter_list()?)
        } else {
            None
        };

        let return_type = if self.match_token(TokenType::Colon) {
            Some(self.qualified_identifier()?)
        } else {
            None
        };

        let body = self.block()?;

        Ok(FunctionDefinition {
            visibility,
            name,
            parameters,
            return_type,
            body,
            location,
        })
    }

    fn parameter_list(&mut self) -> SierraResult<ParameterList> {
        let nt = Nonterminal::ParameterList;
        let location = self.consume(TokenType::LeftParen, "Expected '('", nt)?.location.clone();

        if self.check(TokenType::RightParen) {
            return Err(SierraError::structural_error(
                "Parameter list requires at least one parameter",
                nt,
                self.peek().location.clone(),
            ));
        }

        let mut parameters = vec![self.parameter()?];
        while self.match_token(TokenType::Comma) {
            parameters.push(self.parameter()?);
        }

        self.expect_closing(TokenType::RightParen, "Expected ')' after parameters", nt)?;

        Ok(ParameterList {
            parameters,
            location,
        })
    }

    /// `[const|mutable] (identifier | ':') self`
    fn parameter(&mut self) -> SierraResult<Parameter> {
        let nt = Nonterminal::Parameter;
        let location = self.peek().location.clone();

        let mutability = if self.match_keyword(Keyword::Const) {
            Some(Mutability::Const)
        } else if self.match_keyword(Keyword::Mutable) {
            Some(Mutability::Mutable)
        } else {
            None
        };

        let specifier = match self.peek().token_type.clone() {
            TokenType::Identifier => {
                let name = self.identifier("Expected parameter name", nt)?;
                if self.check(TokenType::Colon) {
                    return Err(SierraError::invalid_parameter(
                        format!(
                            "Typed parameter '{} : <type> self' is not supported; \
                             a parameter is either '{} self' or ': self'",
                            name.name, name.name
                        ),
                        self.peek().location.clone(),
                    ));
                }
                ParameterSpecifier::Named(name)
            }
            TokenType::Colon => {
                self.advance();
                if self.check(TokenType::Identifier) {
                    return Err(SierraError::invalid_parameter(
                        format!(
                            "Type name '{}' after ':' is not supported; expected ': self'",
                            self.peek().lexeme
                        ),
                        self.peek().location.clone(),
                    ));
                }
                ParameterSpecifier::Colon
            }
            TokenType::Keyword(Keyword::SelfKw) => {
                return Err(SierraError::invalid_parameter(
                    "Expected parameter name or ':' before 'self'",
                    self.peek().location.clone(),
                ));
            }
            _ => return Err(self.unexpected("Expected parameter name or ':'", nt)),
        };

        self.expect_closing_keyword(Keyword::SelfKw, "Expected 'self' to close parameter", nt)?;

        Ok(Parameter {
            mutability,
            specifier,
            location,
        })
    }

    // ===== Blocks and statements =====

    fn block(&mut self) -> SierraResult<Block> {
        let nt = Nonterminal::Block;
        let location = self
            .consume_keyword(Keyword::Begin, "Expected 'begin'", nt)?
            .location
            .clone();

        let mut statements = Vec::new();
        let mut tail = None;

        while !self.check_keyword(Keyword::End) {
            if self.is_at_end() {
                return Err(self.missing("Expected 'end' to close block", nt));
            }

            let expression = self.expression()?;

            // An expression directly before 'end' is the block's value
            if self.check_keyword(Keyword::End) {
                tail = Some(expression);
                break;
            }

            statements.push(self.finish_statement(expression)?);
        }

        self.expect_closing_keyword(Keyword::End, "Expected 'end' to close block", nt)?;

        Ok(Block {
            statements,
            tail,
            location,
        })
    }

    fn statement(&mut self) -> SierraResult<Statement> {
        let expression = self.expression()?;
        self.finish_statement(expression)
    }

    /// Optional `:= expression`, then the terminating ';'
    fn finish_statement(&mut self, expression: Expression) -> SierraResult<Statement> {
        let nt = Nonterminal::Statement;
        let location = expression.location().clone();

        let assignment = if self.match_token(TokenType::ColonAssign) {
            Some(self.expression()?)
        } else {
            None
        };

        self.expect_closing(TokenType::Semicolon, "Expected ';' after statement", nt)?;

        Ok(Statement {
            expression,
            assignment,
            location,
        })
    }

    // ===== Expressions =====

    fn expression(&mut self) -> SierraResult<Expression> {
        let mut expr = self.primary()?;

        while self.match_token(TokenType::DotDot) {
            let right = self.primary()?;
            let location = expr.location().clone();
            expr = Expression::Range {
                left: Box::new(expr),
                right: Box::new(right),
                location,
            };
        }

        Ok(expr)
    }

    fn primary(&mut self) -> SierraResult<Expression> {
        let nt = Nonterminal::Expression;

        match self.peek().token_type {
            TokenType::Number => {
                let token = self.advance();
                Ok(Expression::NumberLiteral {
                    text: token.lexeme.clone(),
                    location: token.location.clone(),
                })
            }
            TokenType::Identifier => {
                let base = self.identifier("Expected identifier", nt)?;

                if !self.match_token(TokenType::LeftBracket) {
                    return Ok(Expression::Identifier(base));
                }

                let index = self.identifier("Expected index name after '['", nt)?;
                self.expect_closing(TokenType::RightBracket, "Expected ']' after index name", nt)?;
                self.consume_keyword(Keyword::Of, "Expected 'of' after ']'", nt)?;
                let element = self.identifier("Expected element type after 'of'", nt)?;
                let location = base.location.clone();

                Ok(Expression::ArrayType {
                    base,
                    index,
                    element,
                    location,
                })
            }
            _ => Err(self.unexpected("Expected expression", nt)),
        }
    }

    fn qualified_identifier(&mut self) -> SierraResult<QualifiedIdentifier> {
        let nt = Nonterminal::QualifiedIdentifier;
        let mut segments = vec![self.identifier("Expected identifier", nt)?];

        while self.match_token(TokenType::Dot) {
            segments.push(self.identifier("Expected identifier after '.'", nt)?);
        }

        Ok(QualifiedIdentifier { segments })
    }

    // ===== Helper Methods =====

    fn match_token(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek().token_type == token_type
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check(TokenType::Keyword(keyword))
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Error for a token that does not fit here; truncated input is structural
    fn unexpected(&self, message: &str, nonterminal: Nonterminal) -> SierraError {
        let token = self.peek();
        let message = format!("{}, found {}", message, token.describe());

        if self.is_at_end() {
            SierraError::structural_error(message, nonterminal, token.location.clone())
        } else {
            SierraError::syntax_error(message, nonterminal, token.location.clone())
        }
    }

    /// Error for a missing closing or terminating token
    fn missing(&self, message: &str, nonterminal: Nonterminal) -> SierraError {
        let token = self.peek();
        SierraError::structural_error(
            format!("{}, found {}", message, token.describe()),
            nonterminal,
            token.location.clone(),
        )
    }

    fn consume(
        &mut self,
        token_type: TokenType,
        message: &str,
        nonterminal: Nonterminal,
    ) -> SierraResult<&Token> {
        if self.check(token_type) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(message, nonterminal))
        }
    }

    fn consume_keyword(
        &mut self,
        keyword: Keyword,
        message: &str,
        nonterminal: Nonterminal,
    ) -> SierraResult<&Token> {
        self.consume(TokenType::Keyword(keyword), message, nonterminal)
    }

    fn expect_closing(
        &mut self,
        token_type: TokenType,
        message: &str,
        nonterminal: Nonterminal,
    ) -> SierraResult<&Token> {
        if self.check(token_type) {
            Ok(self.advance())
        } else {
            Err(self.missing(message, nonterminal))
        }
    }

    fn expect_closing_keyword(
        &mut self,
        keyword: Keyword,
        message: &str,
        nonterminal: Nonterminal,
    ) -> SierraResult<&Token> {
        self.expect_closing(TokenType::Keyword(keyword), message, nonterminal)
    }

    fn identifier(&mut self, message: &str, nonterminal: Nonterminal) -> SierraResult<Identifier> {
        if self.check(TokenType::Identifier) {
            let token = self.advance();
            Ok(Identifier {
                name: token.lexeme.clone(),
                location: token.location.clone(),
            })
        } else {
            Err(self.unexpected(message, nonterminal))
        }
    }
}
