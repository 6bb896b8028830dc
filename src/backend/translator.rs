//! Declaration translator
//!
//! Builds the Rust FFI declaration for one matched C declaration.

use std::fmt;

use log::trace;

use crate::frontend::{normalize, FunctionMatch, ParamMatch};
use crate::types::TypeMap;

/// Mutability of a raw pointer level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Const,
    Mut,
}

impl Mutability {
    fn as_prefix(self) -> &'static str {
        match self {
            Self::Const => "*const ",
            Self::Mut => "*mut ",
        }
    }
}

/// Pointer policy: a declarator's outer `const` applies to every pointer
/// level. `char * const *` and `const char **` are therefore not told apart.
pub fn pointer_mutability(outer_const: bool) -> Mutability {
    if outer_const {
        Mutability::Const
    } else {
        Mutability::Mut
    }
}

/// Pointer levels of a declarator: one per `*` plus one per array group
pub fn pointer_depth(ptr: &str, array: &str) -> usize {
    ptr.matches('*').count() + array.matches('[').count()
}

fn pointer_prefix(mutability: Mutability, depth: usize) -> String {
    mutability.as_prefix().repeat(depth)
}

/// The `*const `/`*mut ` prefix for a declarator, empty for by-value types
pub fn pointer_decoration(ptr: &str, outer_const: bool, array: &str) -> String {
    pointer_prefix(pointer_mutability(outer_const), pointer_depth(ptr, array))
}

/// A Rust type with its raw-pointer wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustType {
    pub pointers: usize,
    pub mutability: Mutability,
    pub name: String,
}

impl RustType {
    fn from_declarator<M>(c_type: &str, ptr: &str, outer_const: bool, array: &str, type_map: &M) -> Self
    where
        M: TypeMap + ?Sized,
    {
        Self {
            pointers: pointer_depth(ptr, array),
            mutability: pointer_mutability(outer_const),
            name: type_map.map_type(&normalize(c_type)),
        }
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", pointer_prefix(self.mutability, self.pointers), self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustParam {
    pub name: String,
    pub ty: RustType,
}

impl fmt::Display for RustParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// A translated declaration. Displays as
/// `pub fn name(a: T, b: *mut U) -> R;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustFunction {
    pub name: String,
    pub params: Vec<RustParam>,
    /// `None` when the C function returns `void`
    pub ret: Option<RustType>,
}

impl fmt::Display for RustFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pub fn {}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(")")?;
        if let Some(ret) = &self.ret {
            write!(f, " -> {}", ret)?;
        }
        f.write_str(";")
    }
}

fn translate_param<M: TypeMap + ?Sized>(param: &ParamMatch<'_>, type_map: &M) -> RustParam {
    RustParam {
        name: param.name().to_string(),
        ty: RustType::from_declarator(
            param.param_type(),
            param.ptr(),
            param.is_const(),
            param.array(),
            type_map,
        ),
    }
}

/// Translate one matched declaration.
///
/// The return clause is dropped when the C return type is exactly `void`,
/// whatever pointer decoration follows it.
pub fn translate_function<M: TypeMap + ?Sized>(decl: &FunctionMatch<'_>, type_map: &M) -> RustFunction {
    let params = decl
        .params()
        .map(|param| translate_param(&param, type_map))
        .collect();

    let ret = if normalize(decl.return_type()) == "void" {
        None
    } else {
        Some(RustType::from_declarator(
            decl.return_type(),
            decl.return_ptr(),
            decl.return_const(),
            "",
            type_map,
        ))
    };

    let function = RustFunction {
        name: decl.name().to_string(),
        params,
        ret,
    };
    trace!("translated `{}` -> `{}`", decl.as_str(), function);
    function
}
