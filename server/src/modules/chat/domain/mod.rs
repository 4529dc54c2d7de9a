// Chat Domain Layer - 领域层
// 包含实体和值对象，不依赖任何外部基础设施

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
