use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::files::RequestHandler;
use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

const READ_BUFFER_SIZE: usize = 4096;

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    handler: Arc<RequestHandler>,
    state: ConnectionState,
}

/// What a read attempt produced.
pub enum ReadOutcome {
    Request(Request),
    Malformed(ParseError),
    Eof,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<RequestHandler>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_BUFFER_SIZE),
            handler,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await? {
                        ReadOutcome::Request(req) => {
                            self.state = ConnectionState::Processing(req);
                        }
                        ReadOutcome::Malformed(err) => {
                            tracing::warn!(error = ?err, "Rejecting malformed request");
                            let writer = ResponseWriter::new(&Response::bad_request(), true);
                            self.state = ConnectionState::Writing(writer, false);
                        }
                        ReadOutcome::Eof => {
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let keep_alive = req.keep_alive();
                    let mut response = self.handler.handle(req).await;

                    tracing::info!(
                        method = ?req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        bytes = response.body.len(),
                        "Served request"
                    );

                    if !keep_alive {
                        response
                            .headers
                            .insert("Connection".to_string(), "close".to_string());
                    }

                    let include_body = req.method != Method::HEAD;
                    let writer = ResponseWriter::new(&response, include_body);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    self.buffer.clear();
                    return Ok(ReadOutcome::Malformed(e));
                }
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if !self.buffer.is_empty() {
                    tracing::debug!(
                        pending = self.buffer.len(),
                        "Client closed connection mid-request"
                    );
                }
                return Ok(ReadOutcome::Eof);
            }
        }
    }
}
