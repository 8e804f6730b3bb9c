pub mod format_registry;
pub mod schema_resolver;

pub use format_registry::FormatRegistry;
pub use schema_resolver::{
    GenDefinition, GenSchema, HostType, ResolvedType, SharedValidations, resolve_definition,
    resolve_definitions,
};
