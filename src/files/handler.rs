//! Request handling with not-found fallback.
//!
//! ```text
//!   ResolvingPrimary ──ok──▶ RespondingOk (200)
//!         │ err
//!         ▼
//!   ResolvingFallback ──ok──▶ RespondingNotFound (404, custom page)
//!         │ err / none configured
//!         ▼
//!   RespondingDefaultNotFound (404, "Page Not Found")
//! ```

use crate::config::ServerConfig;
use crate::files::loader::{Content, ContentLoader, ReadError};
use crate::files::resolver::PathResolver;
use crate::http::mime::DEFAULT_CONTENT_TYPE;
use crate::http::request::Request;
use crate::http::response::Response;

pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "Page Not Found";

enum HandlerState {
    ResolvingPrimary(String),
    ResolvingFallback(ReadError),
    RespondingOk(Content),
    RespondingNotFound(Content),
    RespondingDefaultNotFound,
}

/// Turns every request into exactly one response.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    loader: ContentLoader,
    index_file: String,
    not_found_file: Option<String>,
}

impl RequestHandler {
    pub fn new(
        loader: ContentLoader,
        index_file: impl Into<String>,
        not_found_file: Option<String>,
    ) -> Self {
        Self {
            loader,
            index_file: index_file.into(),
            not_found_file,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let loader = ContentLoader::new(
            PathResolver::new(config.root_dir()),
            config.mime_types().clone(),
        );
        Self::new(
            loader,
            config.index_file(),
            config.not_found_file().map(str::to_string),
        )
    }

    /// File name a request maps to: the target path minus its first character,
    /// or the index file when that is empty. `*` therefore maps to the index.
    pub fn requested_file<'a>(&'a self, request: &'a Request) -> &'a str {
        let mut chars = request.target_path().chars();
        chars.next();
        let file = chars.as_str();

        if file.is_empty() {
            &self.index_file
        } else {
            file
        }
    }

    pub async fn handle(&self, request: &Request) -> Response {
        let mut state = HandlerState::ResolvingPrimary(self.requested_file(request).to_string());

        loop {
            state = match state {
                HandlerState::ResolvingPrimary(file) => match self.loader.load(&file).await {
                    Ok(content) => HandlerState::RespondingOk(content),
                    Err(e) => HandlerState::ResolvingFallback(e),
                },

                HandlerState::ResolvingFallback(cause) => {
                    tracing::debug!(
                        path = %cause.path().display(),
                        error = %cause,
                        "Primary lookup failed, trying not-found file"
                    );

                    match self.not_found_file.as_deref() {
                        Some(file) => match self.loader.load(file).await {
                            Ok(content) => HandlerState::RespondingNotFound(content),
                            Err(e) => {
                                tracing::debug!(
                                    path = %e.path().display(),
                                    error = %e,
                                    "Not-found file unavailable"
                                );
                                HandlerState::RespondingDefaultNotFound
                            }
                        },
                        None => HandlerState::RespondingDefaultNotFound,
                    }
                }

                HandlerState::RespondingOk(content) => {
                    return Response::ok(content.content_type, content.bytes);
                }

                HandlerState::RespondingNotFound(content) => {
                    return Response::not_found(content.content_type, content.bytes);
                }

                HandlerState::RespondingDefaultNotFound => {
                    return Response::not_found(
                        DEFAULT_CONTENT_TYPE,
                        DEFAULT_NOT_FOUND_MESSAGE.as_bytes(),
                    );
                }
            };
        }
    }
}
