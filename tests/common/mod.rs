//! 集成测试共用的脚本化传输层

#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use unireg_client::error::{ApiError, AppResult};
use unireg_client::infrastructure::{ApiRequest, ApiResponse, MemoryStore, Transport};
use unireg_client::models::FeeReceipt;
use unireg_client::AppContext;

enum Scripted {
    Respond(ApiResponse),
    Unavailable,
}

/// 按顺序返回预设响应，并记录所有收到的请求
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    sent: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(ApiResponse::new(status, body)));
        self
    }

    pub fn unavailable(self) -> Self {
        self.script.lock().unwrap().push_back(Scripted::Unavailable);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let endpoint = request.path.clone();
        self.sent.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Unavailable) => Err(ApiError::Unavailable { endpoint }.into()),
            None => panic!("no scripted response left for {}", endpoint),
        }
    }
}

pub type TestContext = AppContext<ScriptedTransport, MemoryStore>;

/// 创建上下文，同时返回传输层的句柄用于检查请求
pub fn context(transport: ScriptedTransport) -> (TestContext, ScriptedTransport) {
    let handle = transport.clone();
    (AppContext::new(transport, MemoryStore::new()), handle)
}

pub fn signed_in(transport: ScriptedTransport, token: &str) -> (TestContext, ScriptedTransport) {
    let (ctx, handle) = context(transport);
    ctx.session.set(token).unwrap();
    (ctx, handle)
}

pub fn receipt() -> FeeReceipt {
    FeeReceipt::new("receipt.pdf", b"%PDF-1.4 paid".to_vec())
}

/// `GET /form/submissions` 响应体中的一条记录
pub fn submission_json(student_id: &str, first: &str, usn: &str, subjects: &[&str]) -> Value {
    json!({
        "_id": format!("id-{}", student_id),
        "user": { "studentId": student_id },
        "firstName": first,
        "lastName": "Kumar",
        "usn": usn,
        "email": format!("{}@example.com", first.to_lowercase()),
        "phone": "9876543210",
        "scheme": "2024",
        "semester": 3,
        "subjects": subjects,
        "address": {
            "street": "12 MG Road",
            "city": "Bengaluru",
            "state": "KA",
            "pincode": "560001"
        },
        "submittedAt": "2024-07-01T10:00:00Z"
    })
}
