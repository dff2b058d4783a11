//! Runtime values exchanged with resolvers.

mod object_value;
#[allow(clippy::module_inception)]
mod value;

pub use object_value::ObjectValue;
pub use value::Value;
