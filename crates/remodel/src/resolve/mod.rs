pub mod resolver;
pub mod overlay;
pub mod mapper;

pub use mapper::{GetterSetterMapper, MappedAccessorPair};
pub use overlay::MappingOverlay;
pub use resolver::ConverterResolver;
