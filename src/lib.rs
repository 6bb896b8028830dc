//! # cfn2rs
//!
//! Translates C function prototypes into Rust FFI declarations, as a helper
//! for writing bindings to a C library by hand.
//!
//! ```text
//! raw text → normalize → declarations → parameters → pub fn ...;
//! ```
//!
//! 1. [`frontend`] collapses whitespace, recognizes declarations and their
//!    parameters, and exposes the captured pieces.
//! 2. [`types`] maps standard C scalar spellings to `c_int`, `c_ulonglong`, ...
//! 3. [`backend`] builds the Rust declaration and renders the tool's output.
//!
//! Extraction is best effort: text that does not look like a declaration is
//! skipped silently, so compare the number of results with what you expected.
//!
//! ```
//! let out = cfn2rs::translate("const char *getenv(const char *name);");
//! assert_eq!(out.rust_functions, ["pub fn getenv(name: *const c_char) -> *const c_char;"]);
//! ```

pub mod backend;
pub mod config;
pub mod frontend;
pub mod input;
pub mod types;
pub mod utils;

use serde::Serialize;

use backend::{translate_function, RustFunction};
use frontend::{declarations, normalize, NormalizedSource};
use types::{c_type_to_rust, TypeMap};

/// Parallel lists of matched C declarations and their translations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Normalized text of each matched declaration
    pub c_functions: Vec<String>,
    /// `pub fn ...;` for each entry of `c_functions`
    pub rust_functions: Vec<String>,
}

impl Translation {
    pub fn len(&self) -> usize {
        self.rust_functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rust_functions.is_empty()
    }

    /// `(c, rust)` pairs in source order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.c_functions
            .iter()
            .map(String::as_str)
            .zip(self.rust_functions.iter().map(String::as_str))
    }
}

/// Translate every declaration in `source` with the built-in type table
pub fn translate(source: &str) -> Translation {
    translate_with(source, &c_type_to_rust)
}

/// Translate every declaration in `source` with a custom type map
pub fn translate_with<M: TypeMap + ?Sized>(source: &str, type_map: &M) -> Translation {
    let source = NormalizedSource::new(source);
    let mut translation = Translation::default();
    for (c, rust) in translate_iter(&source, type_map) {
        translation.c_functions.push(c);
        translation.rust_functions.push(rust.to_string());
    }
    translation
}

/// Lazily translate the declarations of an already normalized source
pub fn translate_iter<'a, M>(
    source: &'a NormalizedSource,
    type_map: &'a M,
) -> impl Iterator<Item = (String, RustFunction)> + 'a
where
    M: TypeMap + ?Sized + 'a,
{
    declarations(source).map(move |decl| {
        let rust = translate_function(&decl, type_map);
        (normalize(decl.as_str()), rust)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(c_fn: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut start = None;
        for (i, ch) in c_fn.char_indices() {
            let word = ch.is_ascii_alphanumeric() || ch == '_';
            match (word, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    out.push(&c_fn[s..i]);
                    start = None;
                }
                _ => {}
            }
            if matches!(ch, '*' | '(' | ')' | ',' | '[' | ']') {
                out.push(&c_fn[i..i + 1]);
            }
        }
        if let Some(s) = start {
            out.push(&c_fn[s..]);
        }
        out
    }

    fn is_word(token: &str) -> bool {
        token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    }

    /// Two spaces between every token
    fn add_whitespace(c_fn: &str) -> String {
        format!("  {}  ", tokens(c_fn).join("  "))
    }

    /// Only the spaces that separate two words
    fn collapse_whitespace(c_fn: &str) -> String {
        let mut out = String::new();
        let mut last_word = false;
        for token in tokens(c_fn) {
            let word = is_word(token);
            if word && last_word {
                out.push(' ');
            }
            out.push_str(token);
            last_word = word;
        }
        out
    }

    fn check(c_fn: &str, rust_fn: &str) {
        let variants = [
            c_fn.to_string(),
            add_whitespace(c_fn),
            collapse_whitespace(c_fn),
        ];
        for variant in &variants {
            let out = translate(variant);
            assert_eq!(out.rust_functions.first().map(String::as_str), Some(rust_fn), "{}", variant);
        }
        assert_eq!(collapse_whitespace(c_fn), collapse_whitespace(&add_whitespace(c_fn)));
        assert_eq!(add_whitespace(c_fn), add_whitespace(&collapse_whitespace(c_fn)));
    }

    #[test]
    fn test_basic() {
        check("int foo()", "pub fn foo() -> c_int;");
        check("int foo(int a)", "pub fn foo(a: c_int) -> c_int;");
        check("int foo(int a, int b)", "pub fn foo(a: c_int, b: c_int) -> c_int;");
        check("object_t foo(object_t a)", "pub fn foo(a: object_t) -> object_t;");
    }

    #[test]
    fn test_void() {
        check("void foo()", "pub fn foo();");
        check("void foo(void)", "pub fn foo();");
        check("void foo(int x)", "pub fn foo(x: c_int);");
    }

    #[test]
    fn test_pointers() {
        check("int* foo()", "pub fn foo() -> *mut c_int;");
        check("void foo(const int* x)", "pub fn foo(x: *const c_int);");
        check(
            "void foo(const int* x, const int* y)",
            "pub fn foo(x: *const c_int, y: *const c_int);",
        );
        check("const int* foo()", "pub fn foo() -> *const c_int;");
    }

    #[test]
    fn test_multi_pointers() {
        check("void foo(const char **data)", "pub fn foo(data: *const *const c_char);");
        check("void foo(char **data)", "pub fn foo(data: *mut *mut c_char);");
        check("int** foo()", "pub fn foo() -> *mut *mut c_int;");
        check("const int** foo()", "pub fn foo() -> *const *const c_int;");
    }

    #[test]
    fn test_arrays() {
        check("void foo(const char data[])", "pub fn foo(data: *const c_char);");
        check("void foo(const char data[][])", "pub fn foo(data: *const *const c_char);");
        check("void foo(const char data[3])", "pub fn foo(data: *const c_char);");
        check("void foo(const char data[static 3])", "pub fn foo(data: *const c_char);");
    }

    #[test]
    fn test_types() {
        check("unsigned int* foo()", "pub fn foo() -> *mut c_uint;");
        check("void foo(unsigned int *x)", "pub fn foo(x: *mut c_uint);");
        check(
            "void foo(const unsigned long long int *x)",
            "pub fn foo(x: *const c_ulonglong);",
        );
        check(
            "void foo(const unsigned long long int * const x)",
            "pub fn foo(x: *const c_ulonglong);",
        );
        check("const unsigned long long int* foo()", "pub fn foo() -> *const c_ulonglong;");
    }

    #[test]
    fn test_parallel_outputs() {
        let source = "
            /* a small header */
            int    open_db(const char *path,
                           unsigned flags);
            void   close_db(db_t *db);
            long double mean(const double xs[], size_t n);
        ";
        let out = translate(source);
        assert_eq!(
            out.c_functions,
            vec![
                "int open_db(const char *path, unsigned flags);",
                "void close_db(db_t *db);",
                "long double mean(const double xs[], size_t n);",
            ]
        );
        assert_eq!(
            out.rust_functions,
            vec![
                "pub fn open_db(path: *const c_char, flags: c_uint) -> c_int;",
                "pub fn close_db(db: *mut db_t);",
                "pub fn mean(xs: *const c_double, n: size_t) -> c_double;",
            ]
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out.pairs().count(), 3);
    }

    #[test]
    fn test_nothing_found() {
        assert!(translate("").is_empty());
        assert!(translate("#define FOO 1\nstruct s { int a; };").is_empty());
    }

    #[test]
    fn test_translate_with_table() {
        let table = types::TypeTable::new().with("size_t", "usize");
        let out = translate_with("size_t strlen(const char *s);", &table);
        assert_eq!(out.rust_functions, vec!["pub fn strlen(s: *const c_char) -> usize;"]);
    }

    #[test]
    fn test_translate_iter() {
        let source = NormalizedSource::new("int a(); void b(int x) { }");
        let pairs: Vec<_> = translate_iter(&source, &c_type_to_rust)
            .map(|(c, rust)| (c, rust.to_string()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("int a();".to_string(), "pub fn a() -> c_int;".to_string()),
                ("void b(int x)".to_string(), "pub fn b(x: c_int);".to_string()),
            ]
        );
    }
}
