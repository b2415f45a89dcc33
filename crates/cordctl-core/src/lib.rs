pub mod error;
pub mod exec;
pub mod paths;
pub mod registry;
pub mod render;
pub mod schema;
pub mod slot;
pub mod template;
pub mod validate;

pub use error::{CordError, Result};
pub use registry::{LoadFailure, Registry};
pub use render::{Bindings, Value};
pub use schema::{Parameter, ValueType};
pub use slot::{Slot, SlotKind};
pub use template::{CompiledTemplate, TemplateSource, ERROR_PREFIX};
