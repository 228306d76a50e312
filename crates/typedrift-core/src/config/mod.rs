//! Declaration-check configuration.

pub mod check_config;

pub use check_config::{
    CategoryIgnore, CheckConfig, DeclarationConfig, IgnoreSet, KeyMapper,
};
