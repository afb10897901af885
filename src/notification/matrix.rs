//! Matrix 通知发送器模块
//!
//! 通过 Matrix 客户端-服务器 API 向房间发送消息

use crate::config::types::DeliveryPolicy;
use crate::error::{NotificationError, Result};
use crate::notification::sender::{ChatMessage, ChatSender, SendReceipt};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

/// 发送房间消息的路径片段
const SEND_PATH: [&str; 3] = ["_matrix", "client", "r0"];

/// Matrix 通知发送器
pub struct MatrixSender {
    /// HTTP客户端
    client: Client,
    /// 覆盖 `https://{server}` 的服务地址
    base_url: Option<String>,
    /// 投递策略
    policy: DeliveryPolicy,
}

impl MatrixSender {
    /// 创建新的 Matrix 发送器
    ///
    /// # 参数
    /// * `policy` - 投递策略，决定超时和重试行为
    ///
    /// # 返回
    /// * `Result<Self>` - 发送器实例
    pub fn new(policy: DeliveryPolicy) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = policy.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| NotificationError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: None,
            policy,
        })
    }

    /// 使用指定的服务地址代替 `https://{server}`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// 构建消息发送地址（不含访问令牌）
    pub fn message_url(&self, message: &ChatMessage) -> Result<Url> {
        let origin = match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", message.server),
        };

        let mut url = Url::parse(&origin)
            .map_err(|e| NotificationError::InvalidUrl(format!("{origin}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| NotificationError::InvalidUrl(origin.clone()))?
            .pop_if_empty()
            .extend(SEND_PATH)
            .extend(["rooms", message.room_id.as_str(), "send", "m.room.message"]);

        Ok(url)
    }

    /// 构建 Matrix 消息体
    ///
    /// 消息正文同时作为纯文本和 HTML 格式内容发送。
    pub fn build_message_body(message: &ChatMessage) -> Value {
        json!({
            "msgtype": "m.text",
            "body": message.body,
            "format": "org.matrix.custom.html",
            "formatted_body": message.body,
        })
    }

    /// 执行一次POST请求
    async fn post_once(&self, url: &Url, access_token: &str, body: &Value) -> Result<SendReceipt> {
        let response = self
            .client
            .post(url.clone())
            .query(&[("access_token", access_token)])
            .json(body)
            .send()
            .await
            .map_err(|e| NotificationError::Request(e.without_url()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| NotificationError::Request(e.without_url()))?;

        Ok(SendReceipt {
            status: Some(status),
            body: text,
        })
    }

    /// 根据投递策略处理响应状态码
    fn check_status(&self, receipt: SendReceipt) -> Result<SendReceipt> {
        if receipt.is_success() {
            info!("Matrix 消息发送成功");
            return Ok(receipt);
        }

        let status = receipt.status.unwrap_or_default();
        if self.policy.fail_on_http_error {
            error!("Matrix 消息发送失败: {} - {}", status, receipt.body);
            Err(NotificationError::HttpStatus {
                status,
                body: receipt.body,
            }
            .into())
        } else {
            warn!("Matrix 服务器返回状态码 {}，按原样输出响应", status);
            Ok(receipt)
        }
    }
}

/// 是否值得重试的状态码
fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

#[async_trait]
impl ChatSender for MatrixSender {
    async fn send_message(&self, message: &ChatMessage) -> Result<SendReceipt> {
        let url = self.message_url(message)?;
        let body = Self::build_message_body(message);
        let max_attempts = self.policy.retry_attempts.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!("发送消息到 Matrix: {} (第 {}/{} 次)", url, attempt, max_attempts);

            let result = self.post_once(&url, &message.access_token, &body).await;
            let retryable = match &result {
                Ok(receipt) => receipt.status.is_some_and(is_retryable_status),
                Err(_) => true,
            };

            if retryable && attempt < max_attempts {
                match &result {
                    Ok(receipt) => warn!(
                        "Matrix 服务器返回状态码 {:?}，{:?} 后重试",
                        receipt.status, self.policy.retry_delay
                    ),
                    Err(e) => warn!("Matrix 请求失败: {}，{:?} 后重试", e, self.policy.retry_delay),
                }
                tokio::time::sleep(self.policy.retry_delay).await;
                continue;
            }

            return self.check_status(result?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ChatMessage {
        ChatMessage {
            server: "matrix.example.org".to_string(),
            room_id: "!abc:example.org".to_string(),
            access_token: "tok123".to_string(),
            body: "hello".to_string(),
        }
    }

    #[test]
    fn test_message_url_has_no_token() {
        let sender = MatrixSender::new(DeliveryPolicy::default()).unwrap();
        let url = sender.message_url(&message()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://matrix.example.org/_matrix/client/r0/rooms/!abc:example.org/send/m.room.message"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn test_message_url_with_base_override() {
        let sender = MatrixSender::new(DeliveryPolicy::default())
            .unwrap()
            .with_base_url("http://127.0.0.1:8008/");
        let url = sender.message_url(&message()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8008/_matrix/client/r0/rooms/!abc:example.org/send/m.room.message"
        );
    }

    #[test]
    fn test_room_id_is_single_path_segment() {
        let mut msg = message();
        msg.room_id = "!a/b?c:example.org".to_string();
        let sender = MatrixSender::new(DeliveryPolicy::default()).unwrap();
        let url = sender.message_url(&msg).unwrap();
        assert_eq!(url.path_segments().unwrap().count(), 7);
        assert!(url.query().is_none());
    }

    #[test]
    fn test_body_with_quotes_and_control_chars() {
        let mut msg = message();
        msg.body = "say \"hi\"\n\t<b>now</b>".to_string();
        let body = MatrixSender::build_message_body(&msg);

        let encoded = serde_json::to_string(&body).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded["body"], msg.body.as_str());
        assert_eq!(decoded["formatted_body"], msg.body.as_str());
    }

    #[test]
    fn test_retryable_status() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(502));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(200));
    }
}
