//! Getting raw documents from vendors' sites, the holiday API or local files.
//!
//! Whoever receives a [`Body`] owns it and must [`Body::close`] it, also when
//! parsing it failed. Reading a body may block on the network, so bodies are
//! read off the async runtime (see `tokio::task::spawn_blocking`).

#[cfg(test)]
pub mod testing;

use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
    fs::File,
    io::{self, BufRead, BufReader, Read},
};

use futures::{
    executor::{block_on_stream, BlockingStream},
    future::BoxFuture,
    FutureExt,
};
use reqwest::{Client, StatusCode};
use tracing::Instrument;

/// A readable document that has to be released after use.
pub trait Stream: BufRead + Send {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

impl Stream for BufReader<File> {}

pub struct Body(Box<dyn Stream>);

impl Body {
    pub fn new(stream: impl Stream + 'static) -> Self {
        Self(Box::new(stream))
    }

    pub fn close(self) -> io::Result<()> {
        self.0.close()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Body")
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl BufRead for Body {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.0.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.0.consume(amt);
    }
}

/// Gets the document at a location, be it a URL or a path.
pub trait Fetch: Send + Sync {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<Body, Error>>;
}

#[derive(Debug)]
pub enum Error {
    Request(reqwest::Error),
    Status(StatusCode),
    Open { path: String, source: io::Error },
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "issuing a GET request: {e}"),
            Self::Status(status) => write!(f, "status code {}", status.as_u16()),
            Self::Open { path, source } => write!(f, "opening file {path:?}: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(e) => Some(e),
            Self::Open { source, .. } => Some(source),
            Self::Status(_) => None,
        }
    }
}

pub fn make_client() -> Client {
    Client::builder()
        .gzip(true)
        .build()
        .expect("client creation should succeed")
}

/// A response body handed out chunk by chunk as the server sends it.
/// Dropping it drops the connection.
struct ChunkedBody<S: futures::Stream + Unpin, B> {
    chunks: BlockingStream<S>,
    chunk: B,
    pos: usize,
}

impl<S, B> ChunkedBody<S, B>
where
    S: futures::Stream<Item = reqwest::Result<B>> + Unpin,
    B: AsRef<[u8]> + Default,
{
    fn new(chunks: S) -> Self {
        Self {
            chunks: block_on_stream(chunks),
            chunk: B::default(),
            pos: 0,
        }
    }
}

impl<S, B> Read for ChunkedBody<S, B>
where
    S: futures::Stream<Item = reqwest::Result<B>> + Unpin,
    B: AsRef<[u8]> + Default,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<S, B> BufRead for ChunkedBody<S, B>
where
    S: futures::Stream<Item = reqwest::Result<B>> + Unpin,
    B: AsRef<[u8]> + Default,
{
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.pos >= self.chunk.as_ref().len() {
            let Some(chunk) = self.chunks.next() else {
                return Ok(&[]);
            };
            self.chunk = chunk.map_err(io::Error::other)?;
            self.pos = 0;
        }
        Ok(&self.chunk.as_ref()[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos += amt;
    }
}

impl<S, B> Stream for ChunkedBody<S, B>
where
    S: futures::Stream<Item = reqwest::Result<B>> + Unpin + Send,
    B: AsRef<[u8]> + Default + Send,
{
}

/// GETs a URL. Anything but `200 OK` is an error.
#[derive(Debug, Clone)]
pub struct HttpFetch {
    client: Client,
}

impl HttpFetch {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetch {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<Body, Error>> {
        let span = tracing::trace_span!("http_fetch", %location);
        async move {
            let response = self.client.get(location).send().await?;
            if response.status() != StatusCode::OK {
                return Err(Error::Status(response.status()));
            }
            log::trace!("Streaming {location} ({:?} bytes)", response.content_length());
            Ok(Body::new(ChunkedBody::new(Box::pin(response.bytes_stream()))))
        }
        .instrument(span)
        .boxed()
    }
}

/// Opens a local file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetch;

impl Fetch for FileFetch {
    fn fetch<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<Body, Error>> {
        async move {
            let file = File::open(location).map_err(|source| Error::Open {
                path: location.to_owned(),
                source,
            })?;
            Ok(Body::new(BufReader::new(file)))
        }
        .boxed()
    }
}

/// `http` for http(s) URLs, a [`FileFetch`] for anything else.
pub fn for_location(location: &str, http: &Arc<dyn Fetch>) -> Arc<dyn Fetch> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::clone(http)
    } else {
        Arc::new(FileFetch)
    }
}
