// 业务模块
//
// 每个模块按六边形架构组织，通过模块容器对外提供能力

pub mod chat;
