//! N-Triples serialization.
//!
//! Lines are written in graph order (subject, predicate, object), so the same
//! graph always serializes to the same bytes. Plain `xsd:string` literals are
//! written without a datatype. The reader accepts what the writer produces
//! plus comments, blank lines and the standard escapes; blank nodes are not
//! supported.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use pow_model::{Datatype, Graph, Iri, Literal, Term, Triple};

use crate::error::{OutputError, Result};

fn push_uchar(out: &mut String, c: char) {
    let code = c as u32;
    if code <= 0xFFFF {
        let _ = write!(out, "\\u{code:04X}");
    } else {
        let _ = write!(out, "\\U{code:08X}");
    }
}

fn push_iri(out: &mut String, iri: &Iri) {
    out.push('<');
    for c in iri.as_str().chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => push_uchar(out, c),
            c if c <= ' ' => push_uchar(out, c),
            c => out.push(c),
        }
    }
    out.push('>');
}

fn push_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => push_uchar(out, c),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_literal(out: &mut String, literal: &Literal) {
    push_string(out, literal.lexical());
    match (literal.datatype(), literal.language()) {
        (_, Some(language)) => {
            out.push('@');
            out.push_str(language);
        }
        (Datatype::String, None) => {}
        (datatype, None) => {
            out.push_str("^^<");
            out.push_str(&datatype.iri());
            out.push('>');
        }
    }
}

/// One triple as an N-Triples line, without the trailing newline.
pub fn format_triple(triple: &Triple) -> String {
    let mut line = String::new();
    push_iri(&mut line, &triple.subject);
    line.push(' ');
    push_iri(&mut line, &triple.predicate);
    line.push(' ');
    match &triple.object {
        Term::Iri(iri) => push_iri(&mut line, iri),
        Term::Literal(literal) => push_literal(&mut line, literal),
    }
    line.push_str(" .");
    line
}

/// Serialize a whole graph.
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::new();
    for triple in graph.iter() {
        out.push_str(&format_triple(triple));
        out.push('\n');
    }
    out
}

pub fn write_ntriples<W: Write>(graph: &Graph, writer: &mut W) -> io::Result<()> {
    for triple in graph.iter() {
        writeln!(writer, "{}", format_triple(triple))?;
    }
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write a graph to `path`, creating parent directories as needed.
pub fn write_ntriples_file(path: &Path, graph: &Graph) -> Result<()> {
    crate::ensure_parent_dir(path)?;
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    write_ntriples(graph, &mut writer).map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))?;
    debug!(path = %path.display(), triples = graph.len(), "wrote graph");
    Ok(())
}

pub fn read_ntriples_file(path: &Path) -> Result<Graph> {
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    parse_ntriples(&content)
}

/// Parse an N-Triples document.
pub fn parse_ntriples(input: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    for (index, line) in input.lines().enumerate() {
        let mut parser = LineParser {
            rest: line,
            line: index + 1,
        };
        if let Some(triple) = parser.triple()? {
            graph.insert(triple);
        }
    }
    Ok(graph)
}

struct LineParser<'a> {
    rest: &'a str,
    line: usize,
}

impl LineParser<'_> {
    fn error(&self, message: impl Into<String>) -> OutputError {
        OutputError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start_matches([' ', '\t']);
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.rest.is_empty() || self.rest.starts_with('#')
    }

    fn expect(&mut self, c: char) -> Result<()> {
        self.skip_whitespace();
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(self.error(format!("expected '{c}'"))),
        }
    }

    fn triple(&mut self) -> Result<Option<Triple>> {
        if self.at_end() {
            return Ok(None);
        }
        let subject = self.iri()?;
        let predicate = self.iri()?;
        self.skip_whitespace();
        let object = if self.rest.starts_with('"') {
            Term::Literal(self.literal()?)
        } else {
            Term::Iri(self.iri()?)
        };
        self.expect('.')?;
        if !self.at_end() {
            return Err(self.error("unexpected content after '.'"));
        }
        Ok(Some(Triple::new(subject, predicate, object)))
    }

    fn iri(&mut self) -> Result<Iri> {
        self.expect('<')?;
        let end = self
            .rest
            .find('>')
            .ok_or_else(|| self.error("unterminated IRI"))?;
        let raw = &self.rest[..end];
        self.rest = &self.rest[end + 1..];
        let value = unescape(raw).map_err(|m| self.error(m))?;
        Iri::new(value).map_err(|e| self.error(e.to_string()))
    }

    fn literal(&mut self) -> Result<Literal> {
        self.expect('"')?;
        let mut end = None;
        let mut escaped = false;
        for (index, c) in self.rest.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    end = Some(index);
                    break;
                }
                _ => {}
            }
        }
        let end = end.ok_or_else(|| self.error("unterminated literal"))?;
        let lexical = unescape(&self.rest[..end]).map_err(|m| self.error(m))?;
        self.rest = &self.rest[end + 1..];

        if let Some(rest) = self.rest.strip_prefix('@') {
            let len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(rest.len());
            if len == 0 {
                return Err(self.error("empty language tag"));
            }
            let language = &rest[..len];
            self.rest = &rest[len..];
            return Ok(Literal::lang(lexical, language));
        }
        if let Some(rest) = self.rest.strip_prefix("^^") {
            self.rest = rest;
            let datatype = self.iri()?;
            return Literal::typed(lexical, Datatype::from_iri(datatype.as_str()))
                .map_err(|e| self.error(e.to_string()));
        }
        Ok(Literal::string(lexical))
    }
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape = chars.next().ok_or("dangling escape")?;
        let decoded = match escape {
            't' => '\t',
            'b' => '\u{8}',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{c}',
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            'u' | 'U' => {
                let len = if escape == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(len).collect();
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == len)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid escape \\{escape}{hex}"))?
            }
            other => return Err(format!("unknown escape \\{other}")),
        };
        out.push(decoded);
    }
    Ok(out)
}
