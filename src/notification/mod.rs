//! 通知模块
//!
//! 提供 Matrix 聊天消息发送功能

pub mod matrix;
pub mod sender;

// 重新导出主要类型
pub use matrix::MatrixSender;
pub use sender::{ChatMessage, ChatSender, DryRunSender, SendReceipt};
