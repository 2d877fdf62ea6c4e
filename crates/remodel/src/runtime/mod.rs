pub mod value;

pub use value::{Instance, Number, Object, Value};
