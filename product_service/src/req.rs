use anyhow::{Context, Result};
use std::collections::HashMap;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::constant::MAX_REQUEST_SIZE;

#[derive(Debug, PartialEq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    OPTIONS,
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "OPTIONS" => Method::OPTIONS,
            other => Method::Other(other.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Option<HashMap<String, String>>,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub async fn new<Reader: AsyncRead + Unpin>(mut reader: Reader) -> Result<Self> {
        let mut raw = Vec::with_capacity(1024);
        let mut buffer = [0; 1024];

        // Head
        let head_end = loop {
            if let Some(pos) = find_head_end(&raw) {
                break pos;
            }
            let size = reader
                .read(&mut buffer)
                .await
                .context("Failed to read stream")?;
            if size == 0 {
                return Err(anyhow::anyhow!("Connection closed before end of headers"));
            }
            raw.extend_from_slice(&buffer[..size]);
            if raw.len() > MAX_REQUEST_SIZE {
                return Err(anyhow::anyhow!("Request too large"));
            }
        };
        let head = String::from_utf8_lossy(&raw[..head_end]).to_string();

        // Method and path
        let mut head_line = head.lines();
        let first: &str = head_line.next().context("Empty Request")?;
        let mut request_parts = first.split_whitespace();
        let method: Method = request_parts.next().context("Missing Method")?.into();
        let url = request_parts.next().context("No Path")?;
        let (path, params) = Self::extract_query_param(url);

        // Headers
        let mut headers = HashMap::new();
        for line in head_line {
            if let Some((k, v)) = line.split_once(':') {
                headers.insert(k.trim().to_lowercase(), v.trim().to_string());
            }
        }

        // Body
        let content_length = match headers.get("content-length") {
            Some(len) => len.parse::<usize>().context("Invalid Content-Length")?,
            None => 0,
        };
        let body_start = head_end + 4;
        let body_end = body_start
            .checked_add(content_length)
            .filter(|end| *end <= MAX_REQUEST_SIZE)
            .context("Request too large")?;
        while raw.len() < body_end {
            let size = reader
                .read(&mut buffer)
                .await
                .context("Failed to read body")?;
            if size == 0 {
                return Err(anyhow::anyhow!("Body shorter than Content-Length"));
            }
            raw.extend_from_slice(&buffer[..size]);
        }
        // decoding is left to the handler
        let body = if content_length > 0 {
            Some(raw[body_start..body_end].to_vec())
        } else {
            None
        };

        Ok(Request {
            method,
            path,
            headers,
            body,
            params,
        })
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    fn extract_query_param(url: &str) -> (String, Option<HashMap<String, String>>) {
        // Find the query string
        if let Some(pos) = url.find('?') {
            let path = &url[0..pos];
            let query_string = &url[pos + 1..];

            let params: HashMap<_, _> = query_string
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| {
                    let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                    (decode_component(k), decode_component(v))
                })
                .collect();

            (path.to_string(), Some(params))
        } else {
            (url.to_string(), None)
        }
    }
}

fn find_head_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
