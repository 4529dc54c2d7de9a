// Chat Infrastructure Layer - 基础设施层
// 端口的具体适配器实现

pub mod adapters;
pub mod repositories;

pub use adapters::*;
pub use repositories::*;
