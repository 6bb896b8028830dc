//! Type table for C scalar types
//!
//! Maps the standard C95/C99 scalar spellings onto the platform-stable
//! `std::ffi` / `libc` aliases. Anything not in the table (typedef names,
//! struct tags) passes through unchanged.

use std::collections::HashMap;

use crate::frontend::normalize::normalize;

/// Standard scalar spellings and their FFI names.
///
/// The order is significant: the pattern library tries these spellings in
/// this order before falling back to a plain identifier.
pub const C_SCALAR_TYPES: &[(&str, &str)] = &[
    ("char", "c_char"),
    ("signed char", "c_schar"),
    ("unsigned char", "c_uchar"),
    ("short", "c_short"),
    ("short int", "c_short"),
    ("signed short", "c_short"),
    ("signed short int", "c_short"),
    ("unsigned short", "c_ushort"),
    ("unsigned short int", "c_ushort"),
    ("int", "c_int"),
    ("signed int", "c_int"),
    ("unsigned", "c_uint"),
    ("unsigned int", "c_uint"),
    ("long", "c_long"),
    ("long int", "c_long"),
    ("signed long", "c_long"),
    ("signed long int", "c_long"),
    ("unsigned long", "c_ulong"),
    ("unsigned long int", "c_ulong"),
    ("long long", "c_longlong"),
    ("long long int", "c_longlong"),
    ("signed long long", "c_longlong"),
    ("signed long long int", "c_longlong"),
    ("unsigned long long", "c_ulonglong"),
    ("unsigned long long int", "c_ulonglong"),
    ("float", "c_float"),
    ("double", "c_double"),
    ("long double", "c_double"),
];

/// Maps a normalized C type spelling to the Rust type emitted for it.
///
/// Implemented for [`TypeTable`] and for any `Fn(&str) -> String`, so callers
/// can pass a closure to extend or replace the built-in table.
pub trait TypeMap {
    /// Translate one C type spelling
    fn map_type(&self, c_type: &str) -> String;
}

impl<F> TypeMap for F
where
    F: Fn(&str) -> String,
{
    fn map_type(&self, c_type: &str) -> String {
        self(c_type)
    }
}

/// Translate a C type with the built-in table only.
pub fn c_type_to_rust(c_type: &str) -> String {
    let c_type = normalize(c_type);
    C_SCALAR_TYPES
        .iter()
        .find(|(c, _)| *c == c_type)
        .map(|(_, rust)| rust.to_string())
        .unwrap_or(c_type)
}

/// An owned, extendable type table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTable {
    entries: HashMap<String, String>,
}

impl TypeTable {
    /// Table with the standard scalar types
    pub fn new() -> Self {
        let entries = C_SCALAR_TYPES
            .iter()
            .map(|(c, rust)| (c.to_string(), rust.to_string()))
            .collect();
        Self { entries }
    }

    /// Table with no entries; every spelling passes through
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace a mapping, returning the previous Rust type if any.
    /// The C spelling is normalized first, so `"unsigned   int"` and
    /// `"unsigned int"` are the same key.
    pub fn insert(&mut self, c_type: &str, rust_type: &str) -> Option<String> {
        self.entries
            .insert(normalize(c_type), rust_type.trim().to_string())
    }

    /// Builder form of [`TypeTable::insert`]
    pub fn with(mut self, c_type: &str, rust_type: &str) -> Self {
        self.insert(c_type, rust_type);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for TypeTable
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (c_type, rust_type) in iter {
            self.insert(c_type.as_ref(), rust_type.as_ref());
        }
    }
}

impl TypeMap for TypeTable {
    fn map_type(&self, c_type: &str) -> String {
        let c_type = normalize(c_type);
        match self.entries.get(&c_type) {
            Some(rust) => rust.clone(),
            None => c_type,
        }
    }
}
