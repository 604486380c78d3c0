// src/source.rs

//! Line-oriented text scanning of task source files.
//!
//! Nothing here is a real parser. The scanners recognise the conventional
//! layout of a task file:
//!
//! ```ruby
//! module Billing
//!   class InvoiceJob
//!     include Sidekiq::Job
//!
//!     # @param account_id [Integer] the account
//!     def perform(account_id, dry_run = false)
//!     end
//!   end
//! end
//! ```
//!
//! Multi-line declarations, heredocs or metaprogrammed classes may not be
//! recognised; callers treat an unrecognised file as "nothing found".

use crate::catalog::{EntryParam, ParamKind};

/// Derive the fully-qualified class name a file declares.
///
/// Every `module X` line seen before the first `class Y` line contributes a
/// namespace segment. Returns `None` when the file has no class line.
pub fn class_name_from_source(text: &str) -> Option<String> {
    let mut name = String::new();
    for line in text.lines() {
        let line = strip_comment(line).trim();
        if let Some(rest) = line.strip_prefix("module ") {
            if let Some(segment) = first_token(rest) {
                name.push_str(segment);
                name.push_str("::");
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix("class ") {
            let segment = first_token(rest)?;
            if segment == "<<" {
                // `class << self` opens the singleton class, not a new class.
                continue;
            }
            name.push_str(segment);
            return Some(name);
        }
    }
    None
}

/// A class found while scanning a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedClass {
    /// Fully-qualified name, e.g. `"Billing::InvoiceJob"`.
    pub name: String,
    /// Names passed to `include` inside the class body.
    pub includes: Vec<String>,
    pub entry_point: Option<ScannedEntryPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedEntryPoint {
    pub params: Vec<EntryParam>,
    /// 1-based line of the `def` line.
    pub line: usize,
}

#[derive(Debug)]
enum Scope {
    Module(String),
    /// Index into the result list.
    Class(usize),
    Other,
}

/// Scan a whole file for classes, their `include`s and the instance method
/// named `entry_point`.
pub fn scan_classes(text: &str, entry_point: &str) -> Vec<ScannedClass> {
    let lines: Vec<&str> = text.lines().collect();
    let mut classes: Vec<ScannedClass> = Vec::new();
    let mut stack: Vec<Scope> = Vec::new();

    let mut idx = 0;
    while idx < lines.len() {
        let line = strip_visibility(strip_comment(lines[idx]).trim());
        let lineno = idx + 1;
        idx += 1;

        if line.is_empty() {
            continue;
        }

        if is_end(line) {
            stack.pop();
            continue;
        }

        if let Some(rest) = line.strip_prefix("module ") {
            if let Some(segment) = first_token(rest) {
                if !closes_inline(line) {
                    stack.push(Scope::Module(segment.to_string()));
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("class ") {
            let Some(segment) = first_token(rest) else {
                continue;
            };
            if closes_inline(line) {
                continue;
            }
            if segment == "<<" {
                stack.push(Scope::Other);
                continue;
            }
            let mut name = namespace_of(&stack, &classes);
            name.push_str(segment);
            classes.push(ScannedClass {
                name,
                includes: Vec::new(),
                entry_point: None,
            });
            stack.push(Scope::Class(classes.len() - 1));
            continue;
        }

        let current_class = match stack.last() {
            Some(Scope::Class(i)) => Some(*i),
            _ => None,
        };

        if let Some(rest) = line.strip_prefix("include ") {
            if let Some(i) = current_class {
                for included in rest.split(',') {
                    let included = included.trim();
                    if !included.is_empty() {
                        classes[i].includes.push(included.to_string());
                    }
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("def ") {
            let rest = rest.trim_start();
            if let (Some(i), Some(after_name)) = (current_class, strip_method_name(rest, entry_point))
            {
                // Gather continuation lines until the parameter list closes.
                let mut decl = after_name.to_string();
                while after_name.trim_start().starts_with('(')
                    && !balanced(&decl)
                    && idx < lines.len()
                {
                    decl.push(' ');
                    decl.push_str(strip_comment(lines[idx]).trim());
                    idx += 1;
                }
                if classes[i].entry_point.is_none() {
                    classes[i].entry_point = Some(ScannedEntryPoint {
                        params: parse_parameter_list(&param_text(&decl)),
                        line: lineno,
                    });
                }
            }
            if !is_single_line_def(line) {
                stack.push(Scope::Other);
            }
            continue;
        }

        if opens_block(line) {
            stack.push(Scope::Other);
        }
    }

    classes
}

/// 1-based line number of the first `def <entry_point>` declaration.
pub fn find_declaration_line(text: &str, entry_point: &str) -> Option<usize> {
    text.lines().enumerate().find_map(|(i, line)| {
        let rest = strip_visibility(line.trim()).strip_prefix("def ")?;
        strip_method_name(rest.trim_start(), entry_point).map(|_| i + 1)
    })
}

/// Classify a Ruby-style parameter list (without the surrounding parens).
pub fn parse_parameter_list(text: &str) -> Vec<EntryParam> {
    split_top_level(text, ',')
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(classify_param)
        .collect()
}

fn classify_param(raw: &str) -> EntryParam {
    let (kind, rest) = if let Some(rest) = raw.strip_prefix('&') {
        (Some(ParamKind::Block), rest)
    } else if let Some(rest) = raw.strip_prefix("**") {
        (Some(ParamKind::KeywordRest), rest)
    } else if let Some(rest) = raw.strip_prefix('*') {
        (Some(ParamKind::Rest), rest)
    } else {
        (None, raw)
    };

    let name_len = rest
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map_or(rest.len(), |(i, _)| i);
    let name = &rest[..name_len];
    let after = &rest[name_len..];

    let kind = kind.unwrap_or_else(|| {
        if let Some(default) = after.strip_prefix(':') {
            if default.trim().is_empty() {
                ParamKind::KeywordRequired
            } else {
                ParamKind::Keyword
            }
        } else if after.trim_start().starts_with('=') {
            ParamKind::Optional
        } else {
            ParamKind::Required
        }
    });

    let name = if name.is_empty() {
        // Anonymous splats keep their sigil as a name.
        raw.trim_end_matches(|c: char| c.is_whitespace()).to_string()
    } else {
        name.to_string()
    };

    EntryParam { name, kind }
}

/// Split on `sep` outside of brackets, braces, parens and quotes.
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut prev = '\0';

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) => {
                if c == q && prev != '\\' {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' | '{' | '<' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                '>' if prev != '-' && prev != '=' => depth -= 1,
                c if c == sep && depth <= 0 => {
                    parts.push(&text[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            },
        }
        prev = c;
    }
    parts.push(&text[start..]);
    parts
}

/// If `rest` starts with the method name `name` (as a whole word), return
/// what follows it.
fn strip_method_name<'a>(rest: &'a str, name: &str) -> Option<&'a str> {
    let after = rest.strip_prefix(name)?;
    match after.chars().next() {
        None => Some(after),
        Some(c) if c == '(' || c.is_whitespace() || c == ';' => Some(after),
        _ => None,
    }
}

/// Text of the parameter list following a method name: the contents of the
/// parenthesised group, or the rest of the line for paren-less definitions.
fn param_text(after_name: &str) -> String {
    let trimmed = after_name.trim_start();
    if let Some(inner) = trimmed.strip_prefix('(') {
        let mut depth = 1;
        for (i, c) in inner.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return inner[..i].to_string();
                    }
                }
                _ => {}
            }
        }
        return inner.to_string();
    }
    if trimmed.starts_with('=') {
        // Endless method without parameters.
        return String::new();
    }
    trimmed.split(';').next().unwrap_or_default().to_string()
}

fn balanced(text: &str) -> bool {
    let open = text.matches('(').count();
    let close = text.matches(')').count();
    close >= open
}

fn namespace_of(stack: &[Scope], classes: &[ScannedClass]) -> String {
    // The innermost class already carries its full path.
    let mut name = String::new();
    for scope in stack {
        match scope {
            Scope::Module(m) => {
                name.push_str(m);
                name.push_str("::");
            }
            Scope::Class(i) => {
                name = classes[*i].name.clone();
                name.push_str("::");
            }
            Scope::Other => {}
        }
    }
    name
}

fn first_token(text: &str) -> Option<&str> {
    text.split(|c: char| c.is_whitespace() || c == ';')
        .find(|t| !t.is_empty())
}

/// Drop a trailing `#` comment, ignoring `#` inside string literals.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    for (i, c) in line.char_indices() {
        match quote {
            Some(q) if c == q && prev != '\\' => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => return &line[..i],
            None => {}
        }
        prev = c;
    }
    line
}

/// `private def helper` and friends declare a method like a bare `def`.
fn strip_visibility(line: &str) -> &str {
    const MODIFIERS: [&str; 5] = [
        "private",
        "protected",
        "public",
        "module_function",
        "private_class_method",
    ];

    let Some(modifier) = first_token(line) else {
        return line;
    };
    if !MODIFIERS.contains(&modifier) {
        return line;
    }
    let rest = line[modifier.len()..].trim_start();
    if rest.starts_with("def ") { rest } else { line }
}

fn is_end(line: &str) -> bool {
    first_token(line).is_some_and(|t| t == "end" || t.starts_with("end.") || t.starts_with("end#"))
}

fn closes_inline(line: &str) -> bool {
    line.ends_with("; end") || line.ends_with(";end")
}

fn is_single_line_def(line: &str) -> bool {
    if closes_inline(line) {
        return true;
    }
    // Endless definitions: `def name = expr` or `def name(args) = expr`.
    let Some(rest) = line.strip_prefix("def ") else {
        return false;
    };
    let rest = rest.trim_start();
    let after_sig = match rest.find('(') {
        Some(open) if !rest[..open].contains(char::is_whitespace) => {
            rest.rfind(')').map_or(rest.len(), |i| i + 1)
        }
        _ => rest.find(char::is_whitespace).unwrap_or(rest.len()),
    };
    let tail = rest[after_sig..].trim_start();
    tail.starts_with('=') && !tail.starts_with("==")
}

fn opens_block(line: &str) -> bool {
    const OPENERS: [&str; 7] = ["if", "unless", "while", "until", "case", "for", "begin"];
    const ASSIGNED: [&str; 4] = ["= if ", "= unless ", "= case ", "= begin"];

    if closes_inline(line) {
        return false;
    }
    if first_token(line).is_some_and(|t| OPENERS.contains(&t)) {
        return true;
    }
    if ASSIGNED.iter().any(|form| line.contains(form)) {
        return true;
    }
    line.ends_with(" do") || (line.contains(" do |") && line.ends_with('|'))
}
