//! HTML rendering with maud
//!
//! Every dynamic value goes through maud's escaping; nothing here emits
//! pre-escaped user text.

use blog_core::Post;
use maud::{html, Markup, DOCTYPE};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::handlers::CreatePostForm;

/// One or more blank lines, `\n` and `\r\n` mixed freely
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n){2,}").expect("paragraph break pattern is valid"));

/// Render text as `<p>` blocks, single newlines becoming `<br>`
pub fn paragraphs(text: &str) -> Markup {
    html! {
        @for para in PARAGRAPH_BREAK.split(text.trim()) {
            @if !para.trim().is_empty() {
                p {
                    @for (i, line) in para.lines().enumerate() {
                        @if i > 0 {
                            br;
                        }
                        (line)
                    }
                }
            }
        }
    }
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                nav {
                    a href="/" { "Home" }
                    " | "
                    a href="/create" { "New post" }
                }
                main { (body) }
            }
        }
    }
}

pub fn index_page(posts: &[Post]) -> Markup {
    layout(
        "Blog",
        html! {
            h1 { "Blog" }
            @if posts.is_empty() {
                p.empty { "No posts yet." }
            } @else {
                ul.posts {
                    @for post in posts {
                        li.post id={ "post-" (post.id) } {
                            h2 { (post.title) }
                            @if let Some(author) = &post.author {
                                p.author { "by " (author) }
                            }
                            div.content { (paragraphs(&post.content)) }
                        }
                    }
                }
            }
        },
    )
}

pub fn create_page(form: &CreatePostForm, error: Option<&str>) -> Markup {
    layout(
        "New post",
        html! {
            h1 { "New post" }
            @if let Some(error) = error {
                p.error role="alert" { (error) }
            }
            form method="post" action="/create" {
                p {
                    label for="title" { "Title" }
                    br;
                    input type="text" id="title" name="title" value=(form.title);
                }
                p {
                    label for="author" { "Author" }
                    br;
                    input type="text" id="author" name="author" value=(form.author);
                }
                p {
                    label for="content" { "Content" }
                    br;
                    textarea id="content" name="content" rows="10" { (form.content) }
                }
                button type="submit" { "Publish" }
            }
        },
    )
}

pub fn error_page(message: &str) -> Markup {
    layout(
        "Error",
        html! {
            h1 { "Something went wrong" }
            p { (message) }
        },
    )
}
