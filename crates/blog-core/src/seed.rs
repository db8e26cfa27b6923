//! Initial posts for an empty persisted store

use blog_types::NewPost;

/// The three posts inserted the first time a persisted store starts empty
pub fn seed_posts() -> Vec<NewPost> {
    vec![
        NewPost::new(
            "Welcome to my blog",
            "This is the first post. Nice to meet you!",
        ),
        NewPost::new(
            "About axum and SQLite",
            "A strong pairing for building web applications quickly.",
        ),
        NewPost::new(
            "RESTful API design",
            "A well designed API lets frontend and backend evolve separately.",
        ),
    ]
}
