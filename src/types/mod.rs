//! C type spellings and their FFI equivalents

pub mod type_table;

pub use type_table::{c_type_to_rust, TypeMap, TypeTable, C_SCALAR_TYPES};
