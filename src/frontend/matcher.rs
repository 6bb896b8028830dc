//! Declaration matcher
//!
//! Scans normalized source for function declarations, left to right and
//! without overlap, and exposes each match's parameters as a second lazy
//! scan over its parameter list. Text that matches nothing is skipped.

use log::{debug, trace};

use crate::frontend::normalize::NormalizedSource;
use crate::frontend::pattern::{self, FunctionCaptures, ParamCaptures};
use crate::utils::Span;

/// Try `recognize` at every character boundary from `from` onward and
/// return the first hit. Neither pattern can match empty text, so the end
/// of the input is never tried.
fn find_from<T, F>(text: &str, from: usize, recognize: F) -> Option<T>
where
    F: Fn(&str, usize) -> Option<T>,
{
    let mut pos = from;
    while pos < text.len() {
        if let Some(found) = recognize(text, pos) {
            return Some(found);
        }
        pos += text[pos..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Every function declaration in `source`, in textual order
pub fn declarations(source: &NormalizedSource) -> Declarations<'_> {
    Declarations {
        source: source.as_str(),
        pos: 0,
    }
}

/// Lazy iterator over [`FunctionMatch`]es. Cloning restarts from the clone
/// point.
#[derive(Debug, Clone)]
pub struct Declarations<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Iterator for Declarations<'a> {
    type Item = FunctionMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let captures = find_from(self.source, self.pos, pattern::function)?;
        self.pos = captures.span.end;
        let found = FunctionMatch {
            source: self.source,
            captures,
        };
        debug!("matched declaration `{}`", found.as_str());
        Some(found)
    }
}

/// One located function declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionMatch<'a> {
    source: &'a str,
    captures: FunctionCaptures,
}

impl<'a> FunctionMatch<'a> {
    pub fn captures(&self) -> &FunctionCaptures {
        &self.captures
    }

    pub fn span(&self) -> Span {
        self.captures.span
    }

    /// The matched text, trailing `;` included
    pub fn as_str(&self) -> &'a str {
        self.captures.span.text(self.source)
    }

    /// Whether the return type carries a leading `const`
    pub fn return_const(&self) -> bool {
        self.captures.return_const.is_some()
    }

    pub fn return_type(&self) -> &'a str {
        self.captures.return_type.text(self.source)
    }

    pub fn return_ptr(&self) -> &'a str {
        self.captures.return_ptr.text(self.source)
    }

    pub fn name(&self) -> &'a str {
        self.captures.fn_name.text(self.source)
    }

    /// Raw parameter-list text
    pub fn inner(&self) -> &'a str {
        self.captures.inner.text(self.source)
    }

    /// Parameters in textual order.
    ///
    /// A list spelled exactly `(void)` is C's way of writing "no parameters"
    /// and yields nothing.
    pub fn params(&self) -> Parameters<'a> {
        let inner = self.inner();
        let pos = if inner.trim() == "void" { inner.len() } else { 0 };
        Parameters {
            inner,
            offset: self.captures.inner.start,
            source: self.source,
            pos,
        }
    }
}

/// Lazy iterator over the [`ParamMatch`]es of one declaration
#[derive(Debug, Clone)]
pub struct Parameters<'a> {
    source: &'a str,
    inner: &'a str,
    offset: usize,
    pos: usize,
}

impl<'a> Iterator for Parameters<'a> {
    type Item = ParamMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let local = find_from(self.inner, self.pos, pattern::parameter)?;
        self.pos = local.span.end;
        let found = ParamMatch {
            source: self.source,
            captures: shift_param(local, self.offset),
        };
        trace!("  parameter `{}`", found.as_str());
        Some(found)
    }
}

fn shift_param(caps: ParamCaptures, offset: usize) -> ParamCaptures {
    ParamCaptures {
        span: caps.span.offset(offset),
        param_const: caps.param_const.map(|s| s.offset(offset)),
        param_type: caps.param_type.offset(offset),
        param_ptr: caps.param_ptr.offset(offset),
        param_name: caps.param_name.offset(offset),
        param_array: caps.param_array.offset(offset),
        end_sep: caps.end_sep.offset(offset),
    }
}

/// One located parameter. Spans index the full normalized source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamMatch<'a> {
    source: &'a str,
    captures: ParamCaptures,
}

impl<'a> ParamMatch<'a> {
    pub fn captures(&self) -> &ParamCaptures {
        &self.captures
    }

    pub fn as_str(&self) -> &'a str {
        self.captures.span.text(self.source)
    }

    /// Whether the parameter's base type carries a leading `const`
    pub fn is_const(&self) -> bool {
        self.captures.param_const.is_some()
    }

    pub fn param_type(&self) -> &'a str {
        self.captures.param_type.text(self.source)
    }

    pub fn ptr(&self) -> &'a str {
        self.captures.param_ptr.text(self.source)
    }

    pub fn name(&self) -> &'a str {
        self.captures.param_name.text(self.source)
    }

    /// Bracket groups after the name, `""` when there are none
    pub fn array(&self) -> &'a str {
        self.captures.param_array.text(self.source)
    }
}
