//! 基础设施层
//!
//! 持有稀缺资源（HTTP 连接、会话文件），只暴露能力。

pub mod http_transport;
pub mod session_store;
pub mod transport;

pub use http_transport::HttpTransport;
pub use session_store::{FileStore, KeyValueStore, MemoryStore, SessionStore, TOKEN_KEY};
pub use transport::{ApiRequest, ApiResponse, FormPart, Method, RequestBody, Transport};
