//! 视图上下文
//!
//! 持有后端客户端与会话存储，以引用方式注入每个视图。

use crate::clients::UniRegClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{FileStore, HttpTransport, KeyValueStore, SessionStore, Transport};
use tracing::warn;

/// 视图共享的上下文
pub struct AppContext<T: Transport, S: KeyValueStore> {
    pub client: UniRegClient<T>,
    pub session: SessionStore<S>,
}

/// 生产环境使用的上下文
pub type HttpContext = AppContext<HttpTransport, FileStore>;

impl<T: Transport, S: KeyValueStore> AppContext<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self {
            client: UniRegClient::new(transport),
            session: SessionStore::new(store),
        }
    }

    /// 读取 token；存储读取失败按未登录处理
    pub fn token(&self) -> Option<String> {
        match self.session.get() {
            Ok(token) => token,
            Err(e) => {
                warn!("⚠️ 读取会话失败，按未登录处理: {}", e);
                None
            }
        }
    }

    /// 清除 token；失败只记录日志
    pub fn drop_session(&self) {
        if let Err(e) = self.session.clear() {
            warn!("⚠️ 清除会话失败: {}", e);
        }
    }
}

impl HttpContext {
    /// 按配置创建 HTTP 上下文
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(
            HttpTransport::new(config)?,
            FileStore::new(&config.session_file),
        ))
    }
}
