mod attribute_processing;
mod code_visitor;
mod type_processing;

pub(crate) use code_visitor::{CodeVisitor, Discovered};
