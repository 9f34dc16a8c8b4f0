//! Minimal HTTP/1.1 stub of the hosted backend for integration tests.
//!
//! Emulates the REST surface the gateway talks to (`/rest/v1/<table>` with
//! filter/order/limit query params, insert, patch, exact counts), the auth
//! endpoints the session guard uses, the media host's upload route, and both
//! email providers' send routes. State lives in a shared in-memory table map
//! so tests can seed rows and assert on mutations.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

pub const VALID_EMAIL: &str = "nurse@example.com";
pub const VALID_PASSWORD: &str = "correct-horse";
pub const ACCESS_TOKEN: &str = "test-access-token";
pub const USER_ID: &str = "7f8e4a2b-3c5d-4e6f-8a9b-0c1d2e3f4a5b";

#[derive(Debug, Default)]
pub struct StoreState {
    /// Table name -> rows.
    pub tables: HashMap<String, Vec<Value>>,
    /// When true, every /rest request answers HTTP 500.
    pub fail_rest: bool,
    /// When true, media uploads answer HTTP 500.
    pub fail_uploads: bool,
    /// Media uploads served so far.
    pub uploads: u32,
    /// Bodies of email sends, per provider route.
    pub emails: Vec<(String, Value)>,
    /// Rows inserted since start, for id generation.
    inserted: u32,
}

impl StoreState {
    pub fn seed(&mut self, table: &str, rows: Vec<Value>) {
        self.tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.get(table).cloned().unwrap_or_default()
    }
}

pub struct StoreServer {
    pub base_url: String,
    pub state: Arc<Mutex<StoreState>>,
}

/// Starts the stub in a background thread. Runs until the process exits.
pub fn start() -> StoreServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(Mutex::new(StoreState::default()));
    let shared = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &state));
        }
    });
    StoreServer {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
    }
}

struct Request {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Request {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn bearer(&self) -> Option<&str> {
        self.header("authorization")?.strip_prefix("Bearer ")
    }

    fn json_body(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

fn handle(mut stream: TcpStream, state: &Arc<Mutex<StoreState>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };

    let response = route(&request, state);
    let _ = stream.write_all(&response);
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > 1 << 20 {
            return None;
        }
    };

    let head = std::str::from_utf8(&buf[..header_end]).ok()?.to_string();
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let content_length: usize = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);

    let mut body: Vec<u8> = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), parse_query(q)),
        None => (target, Vec::new()),
    };

    Some(Request {
        method,
        path,
        query,
        headers,
        body,
    })
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Decode one application/x-www-form-urlencoded query string.
fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(k), decode(v))
        })
        .collect()
}

fn decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                match u8::from_str_radix(hex, 16) {
                    Ok(b) => {
                        out.push(b);
                        i += 3;
                    }
                    Err(_) => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn route(request: &Request, state: &Arc<Mutex<StoreState>>) -> Vec<u8> {
    if let Some(table) = request.path.strip_prefix("/rest/v1/") {
        return rest(request, table, state);
    }
    if request.path.starts_with("/auth/v1/") {
        return auth(request);
    }
    if request.path.contains("/image/upload") {
        return upload(state);
    }
    if request.path == "/v3/mail/send" || request.path == "/emails" {
        return email(request, state);
    }
    respond(404, &[], b"")
}

fn rest(request: &Request, table: &str, state: &Arc<Mutex<StoreState>>) -> Vec<u8> {
    let mut state = state.lock().unwrap();
    if state.fail_rest {
        return respond_json(500, &json!({"message": "injected failure"}));
    }

    match request.method.as_str() {
        "GET" | "HEAD" => {
            let mut rows = apply_query(state.rows(table), &request.query);
            if request.method == "HEAD" {
                let range = format!("Content-Range: */{}", rows.len());
                respond(200, &[range.as_str()], b"")
            } else {
                if let Some(select) = get_param(&request.query, "select") {
                    if select.contains("clients(") {
                        let clients = state.rows("clients");
                        embed_clients(&mut rows, &clients);
                    }
                }
                respond_json(200, &Value::Array(rows))
            }
        }
        "POST" => {
            let Some(mut row) = request.json_body() else {
                return respond_json(400, &json!({"message": "bad payload"}));
            };
            state.inserted += 1;
            let obj = row.as_object_mut().unwrap();
            if !obj.contains_key("id") {
                obj.insert(
                    "id".to_string(),
                    json!(format!("00000000-0000-4000-8000-{:012}", state.inserted)),
                );
            }
            if !obj.contains_key("created_at") {
                obj.insert("created_at".to_string(), json!("2025-06-01T12:00:00Z"));
            }
            state
                .tables
                .entry(table.to_string())
                .or_default()
                .push(row.clone());
            respond_json(201, &Value::Array(vec![row]))
        }
        "PATCH" => {
            let Some(patch) = request.json_body() else {
                return respond_json(400, &json!({"message": "bad payload"}));
            };
            let query = request.query.clone();
            if let Some(rows) = state.tables.get_mut(table) {
                for row in rows.iter_mut() {
                    if matches_filters(row, &query) {
                        if let (Some(target), Some(fields)) =
                            (row.as_object_mut(), patch.as_object())
                        {
                            for (k, v) in fields {
                                target.insert(k.clone(), v.clone());
                            }
                        }
                    }
                }
            }
            respond(204, &[], b"")
        }
        _ => respond(405, &[], b""),
    }
}

/// Filters, order, and limit over a row set, honoring the query-string
/// dialect the gateway emits. Embedded `clients(...)` projections are
/// resolved against the clients table by `client_id`.
fn apply_query(rows: Vec<Value>, query: &[(String, String)]) -> Vec<Value> {
    let mut rows: Vec<Value> = rows
        .into_iter()
        .filter(|row| matches_filters(row, query))
        .collect();

    if let Some(order) = get_param(query, "order") {
        let (field, dir) = order.rsplit_once('.').unwrap_or((order, "asc"));
        let field = field.to_string();
        rows.sort_by(|a, b| compare(&a[&field], &b[&field]));
        if dir == "desc" {
            rows.reverse();
        }
    }

    if let Some(limit) = get_param(query, "limit").and_then(|l| l.parse::<usize>().ok()) {
        rows.truncate(limit);
    }

    rows
}

/// Resolve an embedded `clients(...)` projection: attach the full client row
/// under `clients`, matched by `client_id` (serde ignores extra columns).
fn embed_clients(rows: &mut [Value], clients: &[Value]) {
    for row in rows.iter_mut() {
        let wanted = row.get("client_id").cloned().unwrap_or(Value::Null);
        let matched = clients
            .iter()
            .find(|c| c.get("id") == Some(&wanted))
            .cloned()
            .unwrap_or(Value::Null);
        if let Some(obj) = row.as_object_mut() {
            obj.insert("clients".to_string(), matched);
        }
    }
}

fn get_param<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn matches_filters(row: &Value, query: &[(String, String)]) -> bool {
    for (field, predicate) in query {
        if field == "select" || field == "order" || field == "limit" {
            continue;
        }
        let Some((op, wanted)) = predicate.split_once('.') else {
            continue;
        };
        let actual = match row.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => return false,
        };
        let ord = compare(&Value::String(actual), &Value::String(wanted.to_string()));
        let ok = match op {
            "eq" => ord == std::cmp::Ordering::Equal,
            "gt" => ord == std::cmp::Ordering::Greater,
            "gte" => ord != std::cmp::Ordering::Less,
            "lt" => ord == std::cmp::Ordering::Less,
            _ => false,
        };
        if !ok {
            return false;
        }
    }
    true
}

/// Timestamp-aware comparison: RFC 3339 values compare as instants (the
/// gateway sends `+00:00` offsets while seeded rows use `Z`), everything
/// else as strings.
fn compare(a: &Value, b: &Value) -> std::cmp::Ordering {
    let (a, b) = (value_text(a), value_text(b));
    match (
        chrono::DateTime::parse_from_rfc3339(&a),
        chrono::DateTime::parse_from_rfc3339(&b),
    ) {
        (Ok(ta), Ok(tb)) => ta.cmp(&tb),
        _ => a.cmp(&b),
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn auth(request: &Request) -> Vec<u8> {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/auth/v1/token") => {
            let body = request.json_body().unwrap_or(Value::Null);
            if body["email"] == VALID_EMAIL && body["password"] == VALID_PASSWORD {
                respond_json(
                    200,
                    &json!({
                        "access_token": ACCESS_TOKEN,
                        "token_type": "bearer",
                        "user": { "id": USER_ID, "email": VALID_EMAIL },
                    }),
                )
            } else {
                respond_json(400, &json!({"message": "Invalid login credentials"}))
            }
        }
        ("GET", "/auth/v1/user") => {
            if request.bearer() == Some(ACCESS_TOKEN) {
                respond_json(200, &json!({ "id": USER_ID, "email": VALID_EMAIL }))
            } else {
                respond_json(401, &json!({"message": "invalid token"}))
            }
        }
        ("POST", "/auth/v1/logout") => respond(204, &[], b""),
        _ => respond(404, &[], b""),
    }
}

fn upload(state: &Arc<Mutex<StoreState>>) -> Vec<u8> {
    let mut state = state.lock().unwrap();
    if state.fail_uploads {
        return respond_json(500, &json!({"error": {"message": "injected upload failure"}}));
    }
    state.uploads += 1;
    let url = format!("https://media.test/upload-{}.jpg", state.uploads);
    respond_json(200, &json!({ "secure_url": url }))
}

fn email(request: &Request, state: &Arc<Mutex<StoreState>>) -> Vec<u8> {
    let provider = if request.path == "/v3/mail/send" {
        "sendgrid"
    } else {
        "resend"
    };
    let body = request.json_body().unwrap_or(Value::Null);
    state
        .lock()
        .unwrap()
        .emails
        .push((provider.to_string(), body));
    respond(202, &[], b"")
}

fn respond_json(status: u32, body: &Value) -> Vec<u8> {
    respond(
        status,
        &["Content-Type: application/json"],
        body.to_string().as_bytes(),
    )
}

fn respond(status: u32, extra_headers: &[&str], body: &[u8]) -> Vec<u8> {
    let reason = match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    };
    let mut head = format!("HTTP/1.1 {} {}\r\nContent-Length: {}\r\n", status, reason, body.len());
    for h in extra_headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("Connection: close\r\n\r\n");
    let mut out = head.into_bytes();
    out.extend_from_slice(body);
    out
}
