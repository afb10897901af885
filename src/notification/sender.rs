//! 通知发送器模块
//!
//! 定义通知发送的trait和基础实现

use crate::config::types::MatrixConfig;
use crate::error::Result;
use async_trait::async_trait;

/// 聊天消息
///
/// 每次调用由配置构造一次，发送后即丢弃。
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// 服务器主机名
    pub server: String,
    /// 房间ID
    pub room_id: String,
    /// 访问令牌
    pub access_token: String,
    /// 消息正文
    pub body: String,
}

impl ChatMessage {
    /// 从 Matrix 配置构造消息
    pub fn from_config(config: &MatrixConfig) -> Self {
        Self {
            server: config.server.clone(),
            room_id: config.room_id.clone(),
            access_token: config.access_token.clone(),
            body: config.message.clone(),
        }
    }
}

/// 发送回执
#[derive(Debug, Clone, PartialEq)]
pub struct SendReceipt {
    /// HTTP状态码（未实际发送时为 `None`）
    pub status: Option<u16>,
    /// 原始响应内容
    pub body: String,
}

impl SendReceipt {
    /// 是否为成功响应
    pub fn is_success(&self) -> bool {
        self.status.is_none_or(|s| (200..300).contains(&s))
    }
}

/// 通知发送器trait
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// 发送聊天消息
    ///
    /// # 参数
    /// * `message` - 聊天消息
    ///
    /// # 返回
    /// * `Result<SendReceipt>` - 服务器的原始响应
    async fn send_message(&self, message: &ChatMessage) -> Result<SendReceipt>;
}

/// 试运行发送器，只输出将要发送的消息体
pub struct DryRunSender;

#[async_trait]
impl ChatSender for DryRunSender {
    async fn send_message(&self, message: &ChatMessage) -> Result<SendReceipt> {
        let body = crate::notification::matrix::MatrixSender::build_message_body(message);
        tracing::info!("试运行模式，跳过发送到房间 {}", message.room_id);
        Ok(SendReceipt {
            status: None,
            body: serde_json::to_string(&body)?,
        })
    }
}
