//! Backend module - Rust declaration generation and output

pub mod translator;
pub mod render;

pub use render::{ExternBlockRenderer, JsonRenderer, PlainRenderer, Render};
pub use translator::{
    pointer_decoration, pointer_mutability, translate_function, Mutability, RustFunction,
    RustParam, RustType,
};
