//! Baseline declaration front end: parse declaration sources and extract
//! normalized member bags from them.

pub mod members;
pub mod source;

pub use members::{class_bag_from_syntax, enum_bag_from_syntax, BaselineExtraction};
pub use source::{
    parse_declarations, ClassMemberSyntax, DeclarationSyntax, MemberKey, MemberKind,
};
