//! One-shot loopback listener for the authorization redirect.
//!
//! After the user approves access in the browser, Strava redirects to
//! `http://localhost:<port>/callback?code=...`. A dedicated listener
//! thread accepts exactly one request, answers it with a plain-text page,
//! and hands the code to the waiting caller over a single-slot channel.
//! The wait is bounded: no code within the timeout fails the
//! authorization instead of blocking forever.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::debug;
use url::Url;

/// Errors from waiting for the authorization redirect.
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("could not listen on 127.0.0.1:{port}: {source}")]
    Bind {
        port: u16,
        source: std::io::Error,
    },

    #[error("no authorization code received within {0:?}")]
    Timeout(Duration),

    #[error("authorization redirect carried no code parameter")]
    MissingCode,
}

/// Blocks until the redirect delivers an authorization code or the
/// timeout elapses.
pub fn wait_for_code(port: u16, timeout: Duration) -> Result<String, CallbackError> {
    let listener =
        TcpListener::bind(("127.0.0.1", port)).map_err(|source| CallbackError::Bind {
            port,
            source,
        })?;
    let (tx, rx) = mpsc::channel::<Option<String>>();

    // One-shot: the thread accepts a single connection and exits. On the
    // timeout path it stays parked in accept until the process ends.
    thread::spawn(move || {
        if let Ok((stream, peer)) = listener.accept() {
            debug!("authorization redirect from {peer}");
            let _ = tx.send(handle_redirect(stream));
        }
    });

    match rx.recv_timeout(timeout) {
        Ok(Some(code)) => Ok(code),
        Ok(None) => Err(CallbackError::MissingCode),
        Err(_) => Err(CallbackError::Timeout(timeout)),
    }
}

/// Reads the request line, answers the browser, and returns the code.
fn handle_redirect(mut stream: TcpStream) -> Option<String> {
    let mut request_line = String::new();
    {
        let mut reader = BufReader::new(stream.try_clone().ok()?);
        reader.read_line(&mut request_line).ok()?;
    }
    let code = parse_code(&request_line);

    let (status, body) = match code {
        Some(_) => ("200 OK", "Authorization received. You can close this tab."),
        None => ("400 Bad Request", "Authorization failed: no code provided."),
    };
    let _ = write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    code
}

/// Pulls the `code` query parameter out of an HTTP request line
/// (`GET /callback?code=...&scope=... HTTP/1.1`).
fn parse_code(request_line: &str) -> Option<String> {
    let target = request_line.split_whitespace().nth(1)?;
    let url = Url::parse(&format!("http://localhost{target}")).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
}
