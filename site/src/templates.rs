//! Page templates.
//!
//! Structure lives in code, in document order: the same order the
//! response body streams in. The gist section is the only deferred block;
//! everything before it flushes while the upstream fetch is in flight.

use trama_render::{Renderer, Template};

/// Feed owner for the homepage gist section.
const FEED_USER: &str = "alanhoffmeister";

/// Registry with every page this site serves.
pub fn renderer() -> Renderer {
    Renderer::new()
        .with_template("index", index())
        .with_template("contato", contato())
        .with_template("404", not_found())
}

fn index() -> Template {
    Template::builder()
        .text(head("Página inicial"))
        .text("<h1>Pessoas</h1>\n<ul class=\"pessoas\">\n")
        .block(
            "pessoas",
            Template::builder()
                .text("  <li>")
                .var("given_name")
                .text(" ")
                .var("family_name")
                .text("</li>\n")
                .build(),
        )
        .text("</ul>\n<h2>Últimos gists</h2>\n<ul class=\"gists\">\n")
        .block_with("gists", &[("user", FEED_USER)], gist_item())
        .text("</ul>\n")
        .text(FOOT)
        .build()
}

/// Body rendered once per gist record.
fn gist_item() -> Template {
    Template::builder()
        .text("  <li><a href=\"")
        .var("html_url")
        .text("\">")
        .var("description")
        .text("</a></li>\n")
        .build()
}

fn contato() -> Template {
    Template::builder()
        .text(head("Contato"))
        .text(concat!(
            "<h1>Contato</h1>\n",
            "<p>Escreva para <a href=\"mailto:oi@example.com\">oi@example.com</a>.</p>\n",
        ))
        .text(FOOT)
        .build()
}

fn not_found() -> Template {
    Template::builder()
        .text(head("Página não encontrada"))
        .text("<h1>404</h1>\n<p>Página não encontrada.</p>\n")
        .text(FOOT)
        .build()
}

fn head(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLES}</style>\n</head>\n<body>\n<main>\n"
    )
}

const FOOT: &str = "</main>\n</body>\n</html>\n";

const STYLES: &str = "\
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }\n\
ul.pessoas, ul.gists { padding-left: 1.25rem; }\n\
a { color: #0366d6; }";
