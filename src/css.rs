//! Stylesheet parsing and exact-selector lookup.
//!
//! Google Docs exports put every style into one `<style>` block of flat
//! class rules (`.c1{font-weight:700;color:#000}`). The resolver keeps the
//! selector and declaration text verbatim so that a class can be flattened
//! back into an inline `style` attribute without any cascade computation.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser,
};

use crate::dom::ArenaDom;
use crate::error::{Error, Result};

/// A parsed CSS stylesheet: rules in source order.
#[derive(Debug, Default, Clone)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

/// A CSS rule with its selector text and declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// A CSS declaration (property: value), value kept as source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl CssRule {
    /// Flatten the declarations to `name:value;name:value`.
    pub fn inline_style(&self) -> String {
        self.declarations
            .iter()
            .map(|d| format!("{}:{}", d.name, d.value))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl Stylesheet {
    /// Parse a CSS stylesheet from a string.
    ///
    /// At-rules are skipped. Any malformed rule or declaration is an error.
    pub fn parse(css: &str) -> Result<Self> {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rules = Vec::new();

        let mut rule_parser = TopLevelRuleParser { rules: &mut rules };
        let stylesheet_parser = StyleSheetParser::new(&mut parser, &mut rule_parser);

        for result in stylesheet_parser {
            if let Err((err, slice)) = result {
                return Err(to_error(err, slice));
            }
        }

        Ok(Self { rules })
    }

    /// Parse the first `<style>` element of a document.
    ///
    /// A document without one yields an empty stylesheet.
    pub fn from_document(dom: &ArenaDom) -> Result<Self> {
        match dom.find_by_tag("style") {
            Some(style) => Self::parse(&dom.collect_text(style)),
            None => {
                log::debug!("document has no <style> element");
                Ok(Self::default())
            }
        }
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve a selector to an inline style string.
    ///
    /// Only exact selector text matches. When several rules share the
    /// selector, the last one in source order wins.
    pub fn inline_style(&self, selector: &str) -> Result<String> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.selector == selector)
            .map(CssRule::inline_style)
            .ok_or_else(|| Error::StyleLookup(selector.to_string()))
    }

    /// Resolve a class name (without the leading dot).
    pub fn class_style(&self, class: &str) -> Result<String> {
        self.inline_style(&format!(".{class}"))
    }
}

fn to_error(err: ParseError<'_, String>, slice: &str) -> Error {
    let message = match err.kind {
        ParseErrorKind::Custom(message) => message,
        ParseErrorKind::Basic(_) => format!("invalid rule `{}`", slice.trim()),
    };
    Error::Css {
        // cssparser lines are 0-based, columns 1-based
        line: err.location.line + 1,
        column: err.location.column,
        message,
    }
}

/// Consume the rest of the input.
fn skip_all(input: &mut Parser<'_, '_>) {
    while input.next().is_ok() {}
}

/// Parser for top-level stylesheet rules.
struct TopLevelRuleParser<'a> {
    rules: &'a mut Vec<CssRule>,
}

impl<'i> AtRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = String;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        log::trace!("skipping @{name}");
        skip_all(input);
        Ok(())
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        skip_all(input);
        Ok(())
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = String;
    type QualifiedRule = ();
    type Error = String;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        skip_all(input);
        let selector = input.slice_from(start).trim();
        if selector.is_empty() {
            return Err(input.new_custom_error("empty selector".to_string()));
        }
        Ok(selector.to_string())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut declarations = Vec::new();
        let mut decl_parser = DeclarationListParser {
            declarations: &mut declarations,
        };

        for result in RuleBodyParser::new(input, &mut decl_parser) {
            if let Err((err, slice)) = result {
                let message = match err.kind {
                    ParseErrorKind::Custom(message) => message,
                    ParseErrorKind::Basic(_) => {
                        format!("invalid declaration `{}` in `{prelude}`", slice.trim())
                    }
                };
                return Err(err.location.new_custom_error(message));
            }
        }

        self.rules.push(CssRule {
            selector: prelude,
            declarations,
        });

        Ok(())
    }
}

struct DeclarationListParser<'a> {
    declarations: &'a mut Vec<Declaration>,
}

impl<'i> AtRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = String;

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        skip_all(input);
        Ok(())
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        skip_all(input);
        Ok(())
    }
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = String;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error("nested rules are not supported".to_string()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error("nested rules are not supported".to_string()))
    }
}

impl<'i> DeclarationParser<'i> for DeclarationListParser<'_> {
    type Declaration = ();
    type Error = String;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        skip_all(input);
        let value = input.slice_from(start).trim();

        self.declarations.push(Declaration {
            name: name.to_string(),
            value: value.to_string(),
        });

        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), String> for DeclarationListParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
