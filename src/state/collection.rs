use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level container for saved requests. Collections own folders,
/// requests and sockets; folders nest arbitrarily below them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub requests: Vec<CollectionRequest>,
    #[serde(default)]
    pub sockets: Vec<CollectionSocket>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            folders: Vec::new(),
            requests: Vec::new(),
            sockets: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.folders.is_empty() || !self.requests.is_empty() || !self.sockets.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub requests: Vec<CollectionRequest>,
    #[serde(default)]
    pub sockets: Vec<CollectionSocket>,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            folders: Vec::new(),
            requests: Vec::new(),
            sockets: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.folders.is_empty() || !self.requests.is_empty() || !self.sockets.is_empty()
    }
}

/// A saved HTTP request template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionRequest {
    pub id: String,
    pub name: String,
    pub method: String,
    pub url: String,
}

impl CollectionRequest {
    pub fn new(name: impl Into<String>, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            method: method.into(),
            url: url.into(),
        }
    }
}

/// A saved WebSocket session template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSocket {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl CollectionSocket {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            url: url.into(),
        }
    }
}
