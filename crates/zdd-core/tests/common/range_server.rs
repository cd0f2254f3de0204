//! Minimal HTTP/1.1 server for transfer tests.
//!
//! Serves fixed bodies per path, answers `Range: bytes=N-` with 206 Partial
//! Content, and can be configured per route to ignore ranges or fail the
//! first N requests with a 500. Records hit counts and the last Range header
//! seen so tests can assert on request behavior.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOptions {
    /// If true, GET ignores Range and always returns 200 with the full body.
    pub ignore_ranges: bool,
    /// Respond 500 to the first N requests for this path.
    pub fail_first: usize,
}

struct Route {
    body: Vec<u8>,
    opts: RouteOptions,
    hits: AtomicUsize,
    last_range: Mutex<Option<String>>,
}

/// Server handle. The listener thread runs until the process exits.
pub struct TestServer {
    base_url: String,
    routes: Arc<HashMap<String, Route>>,
}

impl TestServer {
    /// Start a server serving the given `(path, body, options)` routes.
    /// Paths must start with `/`.
    pub fn start(routes: Vec<(&str, Vec<u8>, RouteOptions)>) -> Self {
        let routes: HashMap<String, Route> = routes
            .into_iter()
            .map(|(path, body, opts)| {
                (
                    path.to_string(),
                    Route {
                        body,
                        opts,
                        hits: AtomicUsize::new(0),
                        last_range: Mutex::new(None),
                    },
                )
            })
            .collect();
        let routes = Arc::new(routes);

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let accept_routes = Arc::clone(&routes);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&accept_routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });

        TestServer {
            base_url: format!("http://127.0.0.1:{}", port),
            routes,
        }
    }

    /// Full URL for a route path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of requests this route has received.
    pub fn hits(&self, path: &str) -> usize {
        self.routes[path].hits.load(Ordering::SeqCst)
    }

    /// Raw value of the last `Range` header seen for this route, if any.
    pub fn last_range(&self, path: &str) -> Option<String> {
        self.routes[path].last_range.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let (method, path, range) = parse_request(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    let Some(route) = routes.get(path) else {
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
        return;
    };

    let hit = route.hits.fetch_add(1, Ordering::SeqCst) + 1;
    *route.last_range.lock().unwrap() = range.map(str::to_string);

    if hit <= route.opts.fail_first {
        let _ = stream
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    let total = route.body.len() as u64;
    let start = if route.opts.ignore_ranges {
        None
    } else {
        range.and_then(parse_range_start)
    };

    let (status, extra, slice) = match start {
        Some(start) if start >= total => (
            "416 Range Not Satisfiable",
            format!("Content-Range: bytes */{}\r\n", total),
            &route.body[0..0],
        ),
        Some(start) => (
            "206 Partial Content",
            format!(
                "Content-Range: bytes {}-{}/{}\r\n",
                start,
                total - 1,
                total
            ),
            &route.body[start as usize..],
        ),
        None => ("200 OK", String::new(), &route.body[..]),
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}\r\n",
        status,
        slice.len(),
        extra
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(slice);
}

/// Returns (method, path, raw Range header value).
fn parse_request(request: &str) -> (&str, &str, Option<&str>) {
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");

    let mut range = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("range") {
                range = Some(value.trim());
            }
        }
    }
    (method, path, range)
}

/// Parse the start offset of a `bytes=N-` range value (the only form the
/// transfer engine sends).
fn parse_range_start(value: &str) -> Option<u64> {
    let rest = value.strip_prefix("bytes=")?;
    let (start, _) = rest.split_once('-')?;
    start.trim().parse().ok()
}
