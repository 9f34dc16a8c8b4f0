//! Blocking HTTP transport shared by the gateway and adapters.
//!
//! Uses the curl crate (libcurl) with header/write callbacks to capture the
//! status line, response headers, and body of each request. Runs in the
//! current thread; call from `spawn_blocking` if used from async code.

use serde::de::DeserializeOwned;
use std::str;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request method. Only the verbs the hosted store and adapters need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Head,
}

/// Captured response: status code, raw header lines, and body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub header_lines: Vec<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive lookup of a response header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        for line in &self.header_lines {
            if let Some((n, v)) = line.split_once(':') {
                if n.trim().eq_ignore_ascii_case(name) {
                    return Some(v.trim());
                }
            }
        }
        None
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

fn configure(easy: &mut curl::easy::Easy, url: &str, method: Method) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;
    easy.timeout(REQUEST_TIMEOUT)?;
    match method {
        Method::Get => easy.get(true)?,
        Method::Post => easy.post(true)?,
        Method::Patch => easy.custom_request("PATCH")?,
        Method::Head => easy.nobody(true)?,
    }
    Ok(())
}

fn header_list(headers: &[(&str, String)]) -> Result<curl::easy::List, curl::Error> {
    let mut list = curl::easy::List::new();
    for (name, value) in headers {
        list.append(&format!("{}: {}", name, value.trim()))?;
    }
    Ok(list)
}

fn collect(easy: &mut curl::easy::Easy) -> Result<HttpResponse, curl::Error> {
    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let status = easy.response_code()?;
    Ok(HttpResponse {
        status,
        header_lines,
        body,
    })
}

/// Performs a request with optional body and returns the captured response.
///
/// Non-2xx statuses are returned as-is; classification is the caller's job.
pub fn request(
    method: Method,
    url: &str,
    headers: &[(&str, String)],
    body: Option<&[u8]>,
) -> Result<HttpResponse, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, method)?;
    if !headers.is_empty() {
        easy.http_headers(header_list(headers)?)?;
    }
    if let Some(bytes) = body {
        easy.post_fields_copy(bytes)?;
    }
    collect(&mut easy)
}

/// Performs a multipart form POST (media uploads).
pub fn post_form(
    url: &str,
    form: curl::easy::Form,
    headers: &[(&str, String)],
) -> Result<HttpResponse, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, Method::Post)?;
    if !headers.is_empty() {
        easy.http_headers(header_list(headers)?)?;
    }
    easy.httppost(form)?;
    collect(&mut easy)
}
