use crate::domain::errors::SyncError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Blocking byte fetcher; one request completes before the next starts.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Vec<u8>, SyncError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, SyncError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SyncError::Config(format!("http client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SyncError::fetch(url, e))?;
        let body = resp.bytes().map_err(|e| SyncError::fetch(url, e))?;
        Ok(body.to_vec())
    }
}

/// Serves a site from a directory snapshot, one file per request.
pub struct MirrorTransport {
    base: String,
    dir: PathBuf,
}

impl MirrorTransport {
    pub fn new(base: &str, dir: &Path) -> Self {
        Self {
            base: base.to_string(),
            dir: dir.to_path_buf(),
        }
    }
}

/// File name a site-relative URL is stored under in a mirror directory.
pub fn mirror_file_name(relative: &str) -> String {
    relative.replace(['?', '&', '='], "_")
}

impl Transport for MirrorTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let relative = url.strip_prefix(&self.base).unwrap_or(url);
        let path = self.dir.join(mirror_file_name(relative));
        std::fs::read(&path).map_err(|e| SyncError::fetch(url, e))
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn with_trailing_slash(source: &str) -> String {
    if source.ends_with('/') {
        source.to_string()
    } else {
        format!("{}/", source)
    }
}

/// The catalog site: URL layout plus the transport that reaches it.
pub struct Site {
    base: String,
    transport: Box<dyn Transport>,
}

impl Site {
    pub fn new(base: &str, transport: Box<dyn Transport>) -> Self {
        Self {
            base: with_trailing_slash(base),
            transport,
        }
    }

    /// Opens `source` as a remote site (http/https) or a local mirror directory.
    pub fn open(source: &str, timeout_secs: u64) -> Result<Self, SyncError> {
        if is_remote(source) {
            return Ok(Self::new(source, Box::new(HttpTransport::new(timeout_secs)?)));
        }
        let dir = Path::new(source);
        if !dir.is_dir() {
            return Err(SyncError::Config(format!(
                "site must be an http(s) URL or a mirror directory: {}",
                source
            )));
        }
        let base = with_trailing_slash(source);
        Ok(Self::new(&base, Box::new(MirrorTransport::new(&base, dir))))
    }

    pub fn category_url(&self, category_id: u64) -> String {
        format!("{}viewsimfilecategory.php?categoryid={}", self.base, category_id)
    }

    pub fn item_url(&self, item_id: &str) -> String {
        format!("{}viewsimfile.php?simfileid={}", self.base, item_id)
    }

    /// Resolves a link from a page against the site base.
    pub fn resolve(&self, href: &str) -> String {
        if is_remote(href) {
            href.to_string()
        } else {
            format!("{}{}", self.base, href.trim_start_matches('/'))
        }
    }

    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        self.transport.get(url)
    }

    pub fn fetch_text(&self, url: &str) -> Result<String, SyncError> {
        let bytes = self.fetch_bytes(url)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
pub mod testing {
    use super::Transport;
    use crate::domain::errors::SyncError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory transport that records every requested URL.
    #[derive(Default)]
    pub struct FakeTransport {
        pub pages: HashMap<String, Vec<u8>>,
        pub requests: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.pages.insert(url.to_string(), body.into());
            self
        }
    }

    impl Transport for std::rc::Rc<FakeTransport> {
        fn get(&self, url: &str) -> Result<Vec<u8>, SyncError> {
            self.requests.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| SyncError::fetch(url, "404 Not Found"))
        }
    }
}
