use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

const READ_TIMEOUT: Duration = Duration::from_secs(5);
const ACCEPT_POLL: Duration = Duration::from_millis(5);

/// What the mock server does with one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockReply {
    Status(u16),
    /// Close the connection without writing a response.
    Hangup,
}

type Responder = dyn Fn(usize, &str) -> MockReply + Send + Sync;

/// One request as the mock server saw it.
#[derive(Debug, Clone)]
pub(crate) struct SeenRequest {
    pub(crate) head: String,
    pub(crate) body: Vec<u8>,
}

impl SeenRequest {
    pub(crate) fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    pub(crate) fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_owned())
        })
    }
}

pub(crate) struct MockServer {
    url: String,
    hits: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

impl MockServer {
    /// Answers every request with `status`.
    pub(crate) fn with_status(status: u16) -> Result<Self, String> {
        Self::spawn(Duration::ZERO, move |_, _| MockReply::Status(status))
    }

    /// Answers every request with `status` after sleeping `delay`.
    pub(crate) fn with_delay(status: u16, delay: Duration) -> Result<Self, String> {
        Self::spawn(delay, move |_, _| MockReply::Status(status))
    }

    /// `responder` receives the zero-based connection index and the raw
    /// request head.
    pub(crate) fn spawn<F>(delay: Duration, responder: F) -> Result<Self, String>
    where
        F: Fn(usize, &str) -> MockReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind mock server failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("mock server addr failed: {}", err))?;
        listener
            .set_nonblocking(true)
            .map_err(|err| format!("set_nonblocking failed: {}", err))?;

        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let responder: Arc<Responder> = Arc::new(responder);
        let (shutdown_tx, shutdown_rx) = mpsc::channel();

        let thread_hits = Arc::clone(&hits);
        let thread_seen = Arc::clone(&seen);
        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let index = thread_hits.fetch_add(1, Ordering::SeqCst);
                        let connection = Connection {
                            index,
                            delay,
                            responder: Arc::clone(&responder),
                            seen: Arc::clone(&thread_seen),
                        };
                        thread::spawn(move || connection.serve(stream));
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(ACCEPT_POLL);
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            url: format!("http://{}", addr),
            hits,
            seen,
            shutdown: shutdown_tx,
            thread: Some(handle),
        })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    /// Connections accepted so far.
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn seen(&self) -> Vec<SeenRequest> {
        self.seen
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

struct Connection {
    index: usize,
    delay: Duration,
    responder: Arc<Responder>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Connection {
    fn serve(self, mut stream: TcpStream) {
        if stream.set_nonblocking(false).is_err()
            || stream.set_read_timeout(Some(READ_TIMEOUT)).is_err()
        {
            return;
        }
        let Some(request) = read_request(&mut stream) else {
            return;
        };
        let reply = (self.responder)(self.index, &request.head);
        if let Ok(mut guard) = self.seen.lock() {
            guard.push(request);
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match reply {
            MockReply::Status(status) => {
                let response = format!(
                    "HTTP/1.1 {} Mock\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
                    status
                );
                if stream.write_all(response.as_bytes()).is_err() || stream.flush().is_err() {
                    return;
                }
            }
            MockReply::Hangup => {}
        }
        drop(stream.shutdown(Shutdown::Both));
    }
}

fn read_request(stream: &mut TcpStream) -> Option<SeenRequest> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = find(&raw, b"\r\n\r\n") {
            break pos;
        }
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        raw.extend_from_slice(chunk.get(..read)?);
    };
    let head = String::from_utf8_lossy(raw.get(..head_end)?).into_owned();
    let mut body = raw.get(head_end.saturating_add(4)..)?.to_vec();
    let request = SeenRequest {
        head,
        body: Vec::new(),
    };

    if let Some(length) = request
        .header("content-length")
        .and_then(|value| value.parse::<usize>().ok())
    {
        while body.len() < length {
            let read = stream.read(&mut chunk).ok()?;
            if read == 0 {
                break;
            }
            body.extend_from_slice(chunk.get(..read)?);
        }
    } else if request
        .header("transfer-encoding")
        .is_some_and(|value| value.eq_ignore_ascii_case("chunked"))
    {
        while !body.ends_with(b"0\r\n\r\n") {
            let read = stream.read(&mut chunk).ok()?;
            if read == 0 {
                break;
            }
            body.extend_from_slice(chunk.get(..read)?);
        }
    }

    Some(SeenRequest { body, ..request })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
