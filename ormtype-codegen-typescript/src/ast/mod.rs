//! Syntax nodes for the declarations the TypeScript writers emit.

mod alias;
mod enums;
mod modules;
mod shape;

pub use alias::{TypeAlias, Union};
pub use enums::{EnumBlock, EnumCase, EnumForm};
pub use modules::{ReExport, TypeImport};
pub use shape::{Field, Member, ModelStyle, Shape};
