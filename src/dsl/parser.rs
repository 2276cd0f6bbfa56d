//! Parser for the diagram DSL.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{Result, VoltflowError};

/// Parser for diagram DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire diagram description.
    pub fn parse(&mut self) -> Result<DiagramAst> {
        let mut ast = DiagramAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match &self.current.kind {
                TokenKind::Directive => {
                    self.parse_directive(&mut ast)?;
                }
                TokenKind::Word => {
                    let component = self.parse_component()?;
                    ast.components.push(component);
                }
                _ => {
                    return Err(VoltflowError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(VoltflowError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    /// Take the current token's text and move on. Lexer errors from the
    /// advance are passed through.
    fn take_current(&mut self) -> Result<String> {
        let text = std::mem::take(&mut self.current.text);
        self.advance()?;
        Ok(text)
    }

    fn expect_word(&mut self, what: &str) -> Result<String> {
        if self.current.kind == TokenKind::Word {
            self.take_current()
        } else {
            Err(VoltflowError::parse(
                self.current.line,
                format!("expected {}, got {:?}", what, self.current.kind),
            ))
        }
    }

    fn parse_directive(&mut self, ast: &mut DiagramAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".wire" => {
                let id = self.expect_word("wire id")?;
                let voltage_level = self.expect_word("voltage level")?;
                let from = self.expect_word("from component id")?;
                let to = self.expect_word("to component id")?;
                ast.wires.push(WireDef {
                    id,
                    voltage_level,
                    from,
                    to,
                    line,
                });
            }
            ".control" | ".power" => {
                if self.at_line_end() {
                    return Err(VoltflowError::parse(
                        line,
                        format!("{} needs at least one voltage class", directive),
                    ));
                }
                let classes = if directive.eq_ignore_ascii_case(".control") {
                    &mut ast.control_classes
                } else {
                    &mut ast.power_classes
                };
                while !self.at_line_end() {
                    classes.push(self.expect_word("voltage class")?);
                }
            }
            _ => {
                return Err(VoltflowError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let keyword = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        // Short keywords first, then full type tags
        let (component_type, implied_flag) = match ComponentType::from_keyword(&keyword) {
            Some(ct) => (ct, None),
            None => ComponentType::from_tag(&keyword).ok_or_else(|| {
                VoltflowError::UnknownComponentKind {
                    kind: keyword.clone(),
                    line,
                }
            })?,
        };

        let id = self.expect_word("component id")?;
        // Designations may be quoted, e.g. "=A1+L2-K1"
        let designation = match self.current.kind {
            TokenKind::Word | TokenKind::Str => self.take_current()?,
            _ => return Err(VoltflowError::invalid_component(&id, line, "missing designation")),
        };
        let voltage_class = match self.current.kind {
            TokenKind::Word => self.take_current()?,
            _ => {
                return Err(VoltflowError::invalid_component(
                    &id,
                    line,
                    "missing voltage class",
                ))
            }
        };

        let mut flags: Vec<String> = implied_flag.into_iter().collect();
        let mut params = HashMap::new();
        let mut description = None;

        // Flags, parameters and description until end of line
        while !self.at_line_end() {
            match self.current.kind {
                TokenKind::Word => {
                    let text = self.expect_word("flag")?;

                    // Check for key=value syntax
                    if self.current.kind == TokenKind::Equals {
                        self.advance()?;
                        let value = match self.current.kind {
                            TokenKind::Word | TokenKind::Str => {
                                let value = std::mem::take(&mut self.current.text);
                                self.advance()?;
                                value
                            }
                            _ => {
                                return Err(VoltflowError::invalid_component(
                                    &id,
                                    line,
                                    format!("missing value for '{}'", text),
                                ));
                            }
                        };
                        params.insert(text.to_lowercase(), value);
                    } else {
                        flags.push(text);
                    }
                }
                TokenKind::Str => {
                    if description.is_some() {
                        return Err(VoltflowError::invalid_component(
                            &id,
                            line,
                            "more than one description",
                        ));
                    }
                    description = Some(std::mem::take(&mut self.current.text));
                    self.advance()?;
                }
                _ => {
                    return Err(VoltflowError::parse(
                        line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ComponentDef {
            component_type,
            id,
            designation,
            voltage_class,
            flags,
            params,
            description,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sensor() {
        let input = "SENSOR S1 -B1 24VDC proximity nc state=on \"Door closed\"";
        let ast = super::super::parse(input).unwrap();
        assert_eq!(ast.components.len(), 1);
        let def = &ast.components[0];
        assert_eq!(def.component_type, ComponentType::Sensor);
        assert_eq!(def.id, "S1");
        assert_eq!(def.designation, "-B1");
        assert_eq!(def.voltage_class, "24VDC");
        assert_eq!(def.flags, vec!["proximity", "nc"]);
        assert_eq!(def.params["state"], "on");
        assert_eq!(def.description.as_deref(), Some("Door closed"));
    }

    #[test]
    fn test_parse_wire_and_classes() {
        let input = ".control 24VDC 12VDC\n.power 400VAC\n.wire W1 24VDC P1 S1\n";
        let ast = super::super::parse(input).unwrap();
        assert_eq!(ast.control_classes, vec!["24VDC", "12VDC"]);
        assert_eq!(ast.power_classes, vec!["400VAC"]);
        assert_eq!(
            ast.wires,
            vec![WireDef {
                id: "W1".into(),
                voltage_level: "24VDC".into(),
                from: "P1".into(),
                to: "S1".into(),
                line: 3
            }]
        );
    }

    #[test]
    fn test_parse_type_tag() {
        let ast = super::super::parse("SENSOR_LIMIT S1 -S1 24VDC").unwrap();
        assert_eq!(ast.components[0].component_type, ComponentType::Sensor);
        assert_eq!(ast.components[0].flags, vec!["LIMIT"]);
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# Start circuit\nCONTACTOR K1 -K1 24VDC ; coil\n\n";
        let ast = super::super::parse(input).unwrap();
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_unknown_kind() {
        let err = super::super::parse("RESISTOR R1 -R1 24VDC").unwrap_err();
        assert!(matches!(
            err,
            VoltflowError::UnknownComponentKind { line: 1, .. }
        ));
    }

    #[test]
    fn test_missing_voltage_class() {
        let err = super::super::parse("MOTOR M1 -M1\n").unwrap_err();
        assert!(matches!(err, VoltflowError::InvalidComponent { .. }));
    }

    #[test]
    fn test_iec_designations() {
        let input = "CONTACTOR K1 =A1-K1 24VDC state=off\nCONTACTOR K2 \"=A1+L2-K2\" 24VDC\n";
        let ast = super::super::parse(input).unwrap();
        assert_eq!(ast.components[0].designation, "=A1-K1");
        assert_eq!(ast.components[0].params["state"], "off");
        assert_eq!(ast.components[1].designation, "=A1+L2-K2");
    }

    #[test]
    fn test_lexer_error_is_not_masked() {
        let err = super::super::parse("MOTOR M1 -M1 \"Conveyor drive\n").unwrap_err();
        assert!(matches!(err, VoltflowError::LexerError { line: 1, .. }));

        let err = super::super::parse("MOTOR M1 \"-M1\n").unwrap_err();
        assert!(matches!(err, VoltflowError::LexerError { line: 1, .. }));
    }

    #[test]
    fn test_wire_trailing_token() {
        assert!(super::super::parse(".wire W1 24VDC P1 S1 extra").is_err());
    }
}
