//! In-memory fetchers for tests.

use std::{
    collections::HashMap,
    io::{self, BufRead, Cursor, Read},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use futures::{future::BoxFuture, FutureExt};
use reqwest::StatusCode;

use super::{Body, Error, Fetch, Stream};

/// A stream over fixed bytes that records how often it was closed.
pub struct TrackedStream {
    inner: Cursor<Vec<u8>>,
    closes: Arc<AtomicUsize>,
    fail_close: bool,
}

impl Read for TrackedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for TrackedStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

impl Stream for TrackedStream {
    fn close(self: Box<Self>) -> io::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"))
        } else {
            Ok(())
        }
    }
}

/// Serves documents from memory. Unknown locations answer `404`.
#[derive(Debug, Default)]
pub struct MemoryFetch {
    documents: HashMap<String, Vec<u8>>,
    closes: Arc<AtomicUsize>,
    fail_close: bool,
}

impl MemoryFetch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, location: &str, document: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(location.to_owned(), document.into());
        self
    }

    /// Makes closing any served body fail.
    #[must_use]
    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Number of bodies closed so far.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Fetch for MemoryFetch {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<Body, Error>> {
        let found = self.documents.get(location).map(|document| TrackedStream {
            inner: Cursor::new(document.clone()),
            closes: Arc::clone(&self.closes),
            fail_close: self.fail_close,
        });
        async move { found.map(Body::new).ok_or(Error::Status(StatusCode::NOT_FOUND)) }.boxed()
    }
}
