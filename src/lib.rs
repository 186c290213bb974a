//! webcode - 浏览器代码编辑器的无界面工作区
//!
//! 模块结构：
//! - models: 数据模型（VfsTree, NodeSnapshot, Selection, 剪贴板）
//! - kernel: 状态/动作/副作用（Store, TabRegistry, ExecutionLog, 持久化）
//! - kernel::services: 端口与适配器（键值存储, 目录句柄, 设置）

pub mod kernel;
pub mod models;
