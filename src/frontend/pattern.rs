//! Pattern library for C function declarations
//!
//! Each recognizer takes the text and a byte offset and reports where it can
//! stop. Recognizers with more than one way to match return every candidate
//! end, most preferred first (greedy repetitions longest first, alternations
//! in declaration order). Composite patterns walk those candidates with
//! nested loops and accept the first combination that completes, which gives
//! ordinary backtracking without a regex engine.
//!
//! # Grammar
//!
//! ```text
//! function  ::= ["const" ws+] type ws* pointer ws* ident ws* "(" inner ")" ws* [";"]
//! parameter ::= ws* ["const" ws+] ws* type pointer ident ws* array* ws* ("," | end)
//! pointer   ::= (ws* "*" ws* | ws* "*" ws* "const" ws+)+ | ws+
//! array     ::= "[" ws* ["static"] ws* digit* ws* "]" ws*
//! type      ::= <standard scalar spelling> | ident
//! inner     ::= <any text without "(" or ")">
//! ```

use crate::types::C_SCALAR_TYPES;
use crate::utils::Span;

/// Captures of one function declaration. All spans index the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionCaptures {
    /// The whole match, including a trailing `;` if present
    pub span: Span,
    /// Leading `const` and the whitespace after it
    pub return_const: Option<Span>,
    pub return_type: Span,
    /// Stars, `const`s and whitespace between the type and the name
    pub return_ptr: Span,
    pub fn_name: Span,
    /// Raw parameter-list text between the parentheses
    pub inner: Span,
}

/// Captures of one parameter inside a parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamCaptures {
    /// The whole match, including the separating `,`
    pub span: Span,
    pub param_const: Option<Span>,
    pub param_type: Span,
    pub param_ptr: Span,
    pub param_name: Span,
    /// Zero or more `[...]` groups
    pub param_array: Span,
    /// The `,` separator, or an empty span at the end of the list
    pub end_sep: Span,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// End of the whitespace run starting at `pos`
fn skip_ws(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(text.len(), |(i, _)| pos + i)
}

/// `ws*`: every stopping point of the run, longest first
fn ws0(text: &str, pos: usize) -> Vec<usize> {
    let end = skip_ws(text, pos);
    let mut ends: Vec<usize> = text[pos..end]
        .char_indices()
        .map(|(i, _)| pos + i)
        .collect();
    ends.push(end);
    ends.reverse();
    ends
}

/// `ws+`: like [`ws0`] but at least one character
fn ws1(text: &str, pos: usize) -> Vec<usize> {
    let mut ends = ws0(text, pos);
    ends.pop();
    ends
}

fn literal(text: &str, pos: usize, lit: &str) -> Option<usize> {
    text[pos..].starts_with(lit).then(|| pos + lit.len())
}

fn push_unique(ends: &mut Vec<usize>, end: usize) {
    if !ends.contains(&end) {
        ends.push(end);
    }
}

/// Identifier: `[A-Za-z_][A-Za-z0-9_]*`.
///
/// Only the longest match is returned. Everything that may follow an
/// identifier in these patterns starts with whitespace or punctuation, so a
/// shorter identifier can never lead to a match.
pub fn identifier(text: &str, pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if !bytes.get(pos).copied().is_some_and(is_ident_start) {
        return None;
    }
    let len = bytes[pos + 1..]
        .iter()
        .take_while(|b| is_ident_continue(**b))
        .count();
    Some(pos + 1 + len)
}

/// Pointer declarator fragment: one or more stars, each optionally followed
/// by `const`, or plain whitespace when there is no star at all.
///
/// Only the number of stars is used later on. A `const` after a star is
/// accepted and otherwise ignored.
pub fn pointer(text: &str, pos: usize) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut explored = Vec::new();
    pointer_levels(text, pos, &mut ends, &mut explored);
    for end in ws1(text, pos) {
        push_unique(&mut ends, end);
    }
    ends
}

fn pointer_levels(text: &str, pos: usize, ends: &mut Vec<usize>, explored: &mut Vec<usize>) {
    if explored.contains(&pos) {
        return;
    }
    explored.push(pos);
    for end in pointer_level(text, pos) {
        pointer_levels(text, end, ends, explored);
        push_unique(ends, end);
    }
}

/// A single `*` with surrounding whitespace and an optional `const`
fn pointer_level(text: &str, pos: usize) -> Vec<usize> {
    let star = skip_ws(text, pos);
    let Some(after_star) = literal(text, star, "*") else {
        return Vec::new();
    };
    let mut ends = ws0(text, after_star);
    if let Some(after_const) = literal(text, skip_ws(text, after_star), "const") {
        ends.extend(ws1(text, after_const));
    }
    ends
}

/// A standard scalar spelling with any whitespace between its words
fn scalar_spelling(text: &str, pos: usize, spelling: &str) -> Option<usize> {
    let mut at = pos;
    for (i, word) in spelling.split(' ').enumerate() {
        if i > 0 {
            let next = skip_ws(text, at);
            if next == at {
                return None;
            }
            at = next;
        }
        at = literal(text, at, word)?;
    }
    Some(at)
}

/// Type name: every standard scalar spelling in table order, then any
/// identifier (typedef names, struct tags, `void`).
pub fn standard_type(text: &str, pos: usize) -> Vec<usize> {
    let mut ends = Vec::new();
    for (spelling, _) in C_SCALAR_TYPES {
        if let Some(end) = scalar_spelling(text, pos, spelling) {
            push_unique(&mut ends, end);
        }
    }
    if let Some(end) = identifier(text, pos) {
        push_unique(&mut ends, end);
    }
    ends
}

/// `const ws+` or nothing, paired with where the rest of the pattern resumes
fn optional_const(text: &str, pos: usize) -> Vec<(Option<Span>, usize)> {
    let mut options: Vec<(Option<Span>, usize)> = match literal(text, pos, "const") {
        Some(after) => ws1(text, after)
            .into_iter()
            .map(|end| (Some(Span::new(pos, end)), end))
            .collect(),
        None => Vec::new(),
    };
    options.push((None, pos));
    options
}

/// One `[ static 3 ]` group including trailing whitespace
fn array_group(text: &str, pos: usize) -> Option<usize> {
    let mut at = literal(text, pos, "[")?;
    at = skip_ws(text, at);
    if let Some(after) = literal(text, at, "static") {
        at = after;
    }
    at = skip_ws(text, at);
    at += text[at..].bytes().take_while(u8::is_ascii_digit).count();
    at = skip_ws(text, at);
    at = literal(text, at, "]")?;
    Some(skip_ws(text, at))
}

fn array_groups(text: &str, pos: usize) -> usize {
    let mut at = pos;
    while let Some(next) = array_group(text, at) {
        at = next;
    }
    at
}

/// Match a function declaration starting exactly at `start`.
pub fn function(text: &str, start: usize) -> Option<FunctionCaptures> {
    for (return_const, type_start) in optional_const(text, start) {
        for type_end in standard_type(text, type_start) {
            for ptr_start in ws0(text, type_end) {
                for ptr_end in pointer(text, ptr_start) {
                    for name_start in ws0(text, ptr_end) {
                        let Some(name_end) = identifier(text, name_start) else {
                            continue;
                        };
                        let Some(inner_start) = literal(text, skip_ws(text, name_end), "(") else {
                            continue;
                        };
                        let inner_end = text[inner_start..]
                            .find(|c: char| c == '(' || c == ')')
                            .map_or(text.len(), |i| inner_start + i);
                        let Some(close) = literal(text, inner_end, ")") else {
                            continue;
                        };
                        let tail = skip_ws(text, close);
                        let end = literal(text, tail, ";").unwrap_or(tail);

                        return Some(FunctionCaptures {
                            span: Span::new(start, end),
                            return_const,
                            return_type: Span::new(type_start, type_end),
                            return_ptr: Span::new(ptr_start, ptr_end),
                            fn_name: Span::new(name_start, name_end),
                            inner: Span::new(inner_start, inner_end),
                        });
                    }
                }
            }
        }
    }
    None
}

/// Match one parameter starting exactly at `start`. `text` must be the
/// parameter list alone, since the last parameter is anchored to its end.
pub fn parameter(text: &str, start: usize) -> Option<ParamCaptures> {
    for lead_end in ws0(text, start) {
        for (param_const, after_const) in optional_const(text, lead_end) {
            for type_start in ws0(text, after_const) {
                for type_end in standard_type(text, type_start) {
                    for ptr_end in pointer(text, type_end) {
                        let Some(name_end) = identifier(text, ptr_end) else {
                            continue;
                        };
                        let array_start = skip_ws(text, name_end);
                        let array_end = array_groups(text, array_start);
                        let sep = skip_ws(text, array_end);
                        let end_sep = if sep == text.len() {
                            Span::empty(sep)
                        } else if let Some(after) = literal(text, sep, ",") {
                            Span::new(sep, after)
                        } else {
                            continue;
                        };

                        return Some(ParamCaptures {
                            span: Span::new(start, end_sep.end),
                            param_const,
                            param_type: Span::new(type_start, type_end),
                            param_ptr: Span::new(type_end, ptr_end),
                            param_name: Span::new(ptr_end, name_end),
                            param_array: Span::new(array_start, array_end),
                            end_sep,
                        });
                    }
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(text: &'a str, start: usize, ends: &[usize]) -> Vec<&'a str> {
        ends.iter().map(|end| &text[start..*end]).collect()
    }

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("foo_1(", 0), Some(5));
        assert_eq!(identifier("_x", 0), Some(2));
        assert_eq!(identifier("1abc", 0), None);
        assert_eq!(identifier("a b", 1), None);
        assert_eq!(identifier("", 0), None);
    }

    #[test]
    fn test_whitespace_candidates() {
        assert_eq!(ws0("a  b", 1), vec![3, 2, 1]);
        assert_eq!(ws1("a  b", 1), vec![3, 2]);
        assert!(ws1("ab", 1).is_empty());
    }

    #[test]
    fn test_pointer_plain_whitespace() {
        let text = "int x";
        assert_eq!(texts(text, 3, &pointer(text, 3)), vec![" "]);
        assert!(pointer("intx", 3).is_empty());
    }

    #[test]
    fn test_pointer_stars() {
        let text = "char ** data";
        let ends = pointer(text, 4);
        assert_eq!(ends[0], 8);
        assert!(ends.contains(&7));
        assert!(ends.contains(&5));
    }

    #[test]
    fn test_pointer_with_const() {
        let text = "int * const x";
        let ends = pointer(text, 3);
        assert!(ends.contains(&12));
        assert_eq!(&text[12..], "x");
    }

    #[test]
    fn test_standard_type_order() {
        let text = "unsigned long long int x";
        let ends = standard_type(text, 0);
        assert_eq!(
            texts(text, 0, &ends),
            vec![
                "unsigned",
                "unsigned long",
                "unsigned long long",
                "unsigned long long int",
            ]
        );
    }

    #[test]
    fn test_standard_type_falls_back_to_identifier() {
        let text = "integer_t x";
        assert_eq!(texts(text, 0, &standard_type(text, 0)), vec!["int", "integer_t"]);
    }

    #[test]
    fn test_function_captures() {
        let text = "const unsigned long long int* foo(int a);";
        let caps = function(text, 0).unwrap();
        assert_eq!(caps.span.text(text), text);
        assert_eq!(caps.return_const.map(|s| s.text(text)), Some("const "));
        assert_eq!(caps.return_type.text(text), "unsigned long long int");
        assert_eq!(caps.return_ptr.text(text), "* ");
        assert_eq!(caps.fn_name.text(text), "foo");
        assert_eq!(caps.inner.text(text), "int a");
    }

    #[test]
    fn test_function_by_value() {
        let text = "int foo()";
        let caps = function(text, 0).unwrap();
        assert_eq!(caps.return_const, None);
        assert_eq!(caps.return_type.text(text), "int");
        assert_eq!(caps.return_ptr.text(text), " ");
        assert_eq!(caps.fn_name.text(text), "foo");
        assert!(caps.inner.is_empty());
    }

    #[test]
    fn test_function_rejects() {
        assert_eq!(function("static int foo(int x)", 0), None);
        assert!(function("static int foo(int x)", 7).is_some());
        assert_eq!(function("foo(int x)", 0), None);
        assert_eq!(function("int foo(int (*cb)(void))", 0), None);
        assert_eq!(function("int foo", 0), None);
    }

    #[test]
    fn test_parameter_captures() {
        let text = "const char data[static 3], int n";
        let caps = parameter(text, 0).unwrap();
        assert_eq!(caps.param_const.map(|s| s.text(text)), Some("const "));
        assert_eq!(caps.param_type.text(text), "char");
        assert_eq!(caps.param_ptr.text(text), " ");
        assert_eq!(caps.param_name.text(text), "data");
        assert_eq!(caps.param_array.text(text), "[static 3]");
        assert_eq!(caps.end_sep.text(text), ",");

        let next = parameter(text, caps.span.end).unwrap();
        assert_eq!(next.param_type.text(text), "int");
        assert_eq!(next.param_name.text(text), "n");
        assert!(next.end_sep.is_empty());
    }

    #[test]
    fn test_parameter_pointer_const() {
        let text = "const unsigned long long int * const x";
        let caps = parameter(text, 0).unwrap();
        assert_eq!(caps.param_type.text(text), "unsigned long long int");
        assert_eq!(caps.param_ptr.text(text), " * const ");
        assert_eq!(caps.param_name.text(text), "x");
    }

    #[test]
    fn test_parameter_needs_name() {
        assert_eq!(parameter("void", 0), None);
        assert_eq!(parameter("int", 0), None);
        assert_eq!(parameter("int x y", 0), None);
    }
}
