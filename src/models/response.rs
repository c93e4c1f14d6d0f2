use serde::{Deserialize, Serialize};

/// Standard success envelope: `{"status": "success", "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}

/// List envelope with an element count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub status: String,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            status: "success".to_string(),
            count: data.len(),
            data,
        }
    }
}
