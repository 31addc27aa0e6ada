//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers GET requests from a script of canned responses (the last one is
//! repeated once the script runs out) and records each raw request head.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: &'static str,
    pub body: String,
    /// Delay before answering (to provoke client timeouts).
    pub delay: Option<Duration>,
}

impl CannedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: "200 OK",
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            body: String::new(),
            delay: None,
        }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self {
            status: "200 OK",
            body: String::new(),
            delay: Some(delay),
        }
    }
}

pub struct PlaylistServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl PlaylistServer {
    /// Raw request heads received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
/// `url` points at `/tv/list.txt` on it.
pub fn start(script: Vec<CannedResponse>) -> PlaylistServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        let mut script = script.into_iter();
        let mut last: Option<CannedResponse> = None;
        for stream in listener.incoming().flatten() {
            if let Some(next) = script.next() {
                last = Some(next);
            }
            let response = last.clone().unwrap_or_else(|| CannedResponse::status("404 Not Found"));
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &response, &seen));
        }
    });
    PlaylistServer {
        url: format!("http://127.0.0.1:{}/tv/list.txt", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, response: &CannedResponse, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let head = match read_head(&mut stream) {
        Some(h) => h,
        None => return,
    };
    seen.lock().unwrap().push(head);

    if let Some(delay) = response.delay {
        thread::sleep(delay);
    }
    let reply = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.body.len()
    );
    let _ = stream.write_all(reply.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
}

fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8(buf).ok()
}

/// Header value from a raw request head, matched case-insensitively.
pub fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().skip(1).find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
    })
}
