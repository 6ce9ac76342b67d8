//! 远程调用错误类型
//!
//! 对应后端 REST 接口的三类失败：传输层失败、HTTP 状态码失败、响应体解码失败。

use thiserror::Error;

/// 远程调用错误
#[derive(Debug, Error)]
pub enum RemoteError {
    /// 网络/传输层失败（含获取访问令牌失败）
    #[error("网络请求失败: {0}")]
    Transport(String),

    /// 非 2xx 状态码，message 优先取响应体中的 message/error 字段
    #[error("HTTP 错误 {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx 响应但 body 不是合法的结构化数据
    #[error("无效的服务器响应: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        RemoteError::Transport(e.to_string())
    }
}

impl RemoteError {
    /// 从非 2xx 响应构造 Http 错误
    ///
    /// body 为 JSON 且带 message/error 字段时优先使用，
    /// 否则合成状态码对应的标准描述。
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
        RemoteError::Http {
            status: status.as_u16(),
            message,
        }
    }

    /// 从非 2xx 响应构造 Http 错误，body 非空时原样携带
    ///
    /// toggle 接口约定直接把响应体当错误信息返回给调用方。
    pub fn from_raw_body(status: reqwest::StatusCode, body: &str) -> Self {
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("Unknown").to_string()
        } else {
            body.to_string()
        };
        RemoteError::Http {
            status: status.as_u16(),
            message,
        }
    }
}
