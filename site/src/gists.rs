//! The gist feed block.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, warn};

use trama_fetch::{parse_records, JsonSource};
use trama_render::{Bodies, BlockHelper, DeferredChunk, Params, RenderContext, RenderError};

/// Streams one user's public gists into its reserved section.
///
/// The user is not fixed here; it comes from the `user` parameter at the
/// template invocation site. One outbound fetch per invocation, no
/// retries.
pub struct GistFeed {
    source: Arc<dyn JsonSource>,
    base_url: String,
}

impl GistFeed {
    /// Create a feed over `source`, rooted at `base_url`.
    pub fn new(source: Arc<dyn JsonSource>, base_url: impl Into<String>) -> Self {
        Self {
            source,
            base_url: base_url.into(),
        }
    }
}

impl BlockHelper for GistFeed {
    fn invoke(
        &self,
        chunk: DeferredChunk,
        context: RenderContext,
        bodies: Bodies,
        params: Params,
    ) -> BoxFuture<'static, Result<(), RenderError>> {
        let source = Arc::clone(&self.source);
        let base_url = self.base_url.clone();

        Box::pin(async move {
            let user = params
                .get("user")
                .ok_or_else(|| RenderError::MissingParam("user".into()))?;
            let url = format!("{base_url}/users/{user}/gists");

            let body = match source.get_text(&url).await {
                Ok(body) => body,
                Err(err) => {
                    // Transport trouble loses only this section; the rest
                    // of the page still renders.
                    warn!(%url, error = %err, "gist feed unavailable, skipping section");
                    chunk.end();
                    return Ok(());
                }
            };

            // A body that is not a JSON array fails the whole section.
            let records =
                parse_records(&body).map_err(|err| RenderError::helper(chunk.name(), err))?;
            debug!(user = %user, count = records.len(), "rendering gist feed");

            for record in records {
                chunk.render(&bodies.block, &context.push(record))?;
            }
            chunk.end();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use futures::StreamExt;
    use trama_fetch::FetchError;
    use trama_render::{ContextBuilder, Renderer, Template};

    /// Upstream stub serving a canned body after a fixed delay.
    struct StubUpstream {
        body: &'static str,
        delay: Duration,
        fail_transport: bool,
    }

    impl StubUpstream {
        fn ok(body: &'static str) -> Self {
            Self {
                body,
                delay: Duration::ZERO,
                fail_transport: false,
            }
        }

        fn slow(body: &'static str, delay_ms: u64) -> Self {
            Self {
                body,
                delay: Duration::from_millis(delay_ms),
                fail_transport: false,
            }
        }

        fn unreachable() -> Self {
            Self {
                body: "",
                delay: Duration::ZERO,
                fail_transport: true,
            }
        }
    }

    #[async_trait::async_trait]
    impl JsonSource for StubUpstream {
        async fn get_text(&self, url: &str) -> Result<String, FetchError> {
            tokio::time::sleep(self.delay).await;
            if self.fail_transport {
                return Err(FetchError::Http {
                    status: 503,
                    url: url.to_string(),
                });
            }
            Ok(self.body.to_string())
        }
    }

    fn page() -> Template {
        Template::builder()
            .text("<ul>")
            .block_with(
                "gists",
                &[("user", "alan")],
                Template::builder()
                    .text("<li>")
                    .var("id")
                    .text("</li>")
                    .build(),
            )
            .text("</ul>")
            .build()
    }

    fn render_page(upstream: StubUpstream) -> trama_render::RenderStream {
        let renderer = Renderer::new().with_template("page", page());
        let context = ContextBuilder::new()
            .helper(
                "gists",
                Arc::new(GistFeed::new(
                    Arc::new(upstream),
                    "https://api.example.com",
                )),
            )
            .build();
        renderer.render("page", context).expect("render")
    }

    #[tokio::test]
    async fn renders_one_block_per_record_in_feed_order() {
        let out = render_page(StubUpstream::ok(r#"[{"id":1},{"id":2}]"#))
            .into_string()
            .await
            .expect("stream");
        assert_eq!(out, "<ul><li>1</li><li>2</li></ul>");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_upstream_yields_identical_output() {
        let body = r#"[{"id":1},{"id":2},{"id":3}]"#;
        let fast = render_page(StubUpstream::slow(body, 0))
            .into_string()
            .await
            .expect("stream");
        let slow = render_page(StubUpstream::slow(body, 500))
            .into_string()
            .await
            .expect("stream");
        assert_eq!(fast, slow);
    }

    #[tokio::test]
    async fn transport_failure_skips_only_the_section() {
        let out = render_page(StubUpstream::unreachable())
            .into_string()
            .await
            .expect("stream");
        assert_eq!(out, "<ul></ul>");
    }

    #[tokio::test]
    async fn non_json_body_fails_the_section_after_preceding_output() {
        let good = render_page(StubUpstream::ok(r#"[{"id":1}]"#))
            .into_string()
            .await
            .expect("stream");

        let mut stream = render_page(StubUpstream::ok("<!DOCTYPE html>"));
        let mut flushed = String::new();
        let mut failure = None;
        while let Some(item) = stream.next().await {
            match item {
                Ok(bytes) => flushed.push_str(&String::from_utf8_lossy(&bytes)),
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        assert!(matches!(failure, Some(RenderError::Helper { .. })));
        // Bytes flushed before the section are identical to the success
        // run; the failure truncates from the section's position only.
        assert_eq!(flushed, "<ul>");
        assert!(good.starts_with(&flushed));
    }

    #[tokio::test]
    async fn missing_user_param_fails_the_section() {
        let template = Template::builder()
            .block("gists", Template::default())
            .build();
        let renderer = Renderer::new().with_template("page", template);
        let context = ContextBuilder::new()
            .helper(
                "gists",
                Arc::new(GistFeed::new(
                    Arc::new(StubUpstream::ok("[]")),
                    "https://api.example.com",
                )),
            )
            .build();

        let err = renderer
            .render("page", context)
            .expect("render")
            .into_string()
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingParam(p) if p == "user"));
    }
}
