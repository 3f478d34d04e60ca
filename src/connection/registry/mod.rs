//! Static connection type registry and spec catalog.
//!
//! Connection types are declared once, as an explicit data table, rather
//! than discovered by inspecting runtime state. The registry is read-only
//! after construction and feeds both payload validation and the
//! self-documenting catalog endpoint.

mod catalog;
mod schema;
mod table;

pub use catalog::{ConnectionConfigSpec, ConnectionSpec, build_catalog};
pub use schema::{ConnectionTypeSchema, DISCRIMINATOR_FIELD, FieldSpec, MODULE_FIELD};
pub use table::TypeRegistry;
