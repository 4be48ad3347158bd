use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub enum ResponseBody {
    #[default]
    Empty,
    Text(String),
    Binary(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct ResponseState {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: ResponseBody,
    pub size_bytes: usize,
    pub elapsed_ms: u64,
    pub received_at: DateTime<Utc>,
    pub scroll_offset: u16,
}

impl Default for ResponseState {
    fn default() -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: Vec::new(),
            body: ResponseBody::Empty,
            size_bytes: 0,
            elapsed_ms: 0,
            received_at: Utc::now(),
            scroll_offset: 0,
        }
    }
}
