//! Route handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;

use trama_render::RenderContext;

use crate::app::AppState;
use crate::data;
use crate::error::SiteError;

/// `GET /`: people roster plus the streamed gist feed.
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Response, SiteError> {
    let context = RenderContext::builder()
        .records("pessoas", data::people_records())
        .helper("gists", Arc::clone(&state.gists))
        .build();
    page(&state, "index", context, StatusCode::OK)
}

/// `GET /contato`: static contact page.
pub async fn contato(State(state): State<Arc<AppState>>) -> Result<Response, SiteError> {
    page(&state, "contato", RenderContext::empty(), StatusCode::OK)
}

/// Everything unrouted: the rendered 404 page.
pub async fn not_found(State(state): State<Arc<AppState>>) -> Result<Response, SiteError> {
    page(&state, "404", RenderContext::empty(), StatusCode::NOT_FOUND)
}

fn page(
    state: &AppState,
    name: &str,
    context: RenderContext,
    status: StatusCode,
) -> Result<Response, SiteError> {
    let stream = state.renderer.render(name, context)?;
    Ok(Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from_stream(stream))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::to_bytes;
    use axum::http::Request;
    use tower::ServiceExt;

    use trama_fetch::{FetchError, JsonSource};

    use crate::gists::GistFeed;
    use crate::{app, templates};

    /// Upstream stub serving a canned listing body.
    struct StubUpstream(&'static str);

    #[async_trait::async_trait]
    impl JsonSource for StubUpstream {
        async fn get_text(&self, _url: &str) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    fn test_state(feed_body: &'static str) -> Arc<AppState> {
        Arc::new(AppState {
            renderer: templates::renderer(),
            gists: Arc::new(GistFeed::new(
                Arc::new(StubUpstream(feed_body)),
                "https://api.example.com",
            )),
        })
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf-8")
    }

    #[tokio::test]
    async fn unrouted_requests_get_the_rendered_404_page() {
        let router = app::router(test_state("[]"));

        // Unknown paths with any method, and known paths with the wrong
        // method, all land on the same rendered page.
        for (method, path) in [
            ("GET", "/nope"),
            ("POST", "/"),
            ("DELETE", "/contato"),
            ("GET", "/contato/arquivo"),
        ] {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(path)
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {path}");
            let body = body_string(response).await;
            assert!(body.contains("Página não encontrada"), "{method} {path}");
        }
    }

    #[tokio::test]
    async fn contato_renders_independently_of_the_upstream() {
        let router = app::router(test_state("not json at all"));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/contato")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Contato"));
    }

    #[tokio::test]
    async fn homepage_lists_people_in_roster_order() {
        let router = app::router(test_state("[]"));

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;

        let alan = body.find("Alan Hoffmeister").expect("first person");
        let john = body.find("John Levitt").expect("second person");
        let lorem = body.find("Lorem Ipsum").expect("third person");
        assert!(alan < john && john < lorem);
    }

    #[tokio::test]
    async fn homepage_streams_feed_items_at_the_section_position() {
        let router = app::router(test_state(
            r#"[
                {"id":1,"html_url":"https://gists.example/1","description":"primeiro"},
                {"id":2,"html_url":"https://gists.example/2","description":"segundo"}
            ]"#,
        ));

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let body = body_string(response).await;

        let section_open = body.find(r#"<ul class="gists">"#).expect("section start");
        let first = body.find("primeiro").expect("first item");
        let second = body.find("segundo").expect("second item");
        let section_close = body[section_open..]
            .find("</ul>")
            .map(|i| section_open + i)
            .expect("section end");

        // Both items, in feed order, inside the section's list.
        assert!(section_open < first && first < second && second < section_close);
        assert_eq!(body.matches("gists.example").count(), 2);
    }

    #[tokio::test]
    async fn responses_carry_a_request_id_header() {
        let router = app::router(test_state("[]"));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/contato")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert!(response.headers().contains_key("x-request-id"));
    }
}
