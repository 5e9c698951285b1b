//! Post entity <-> model mapper

use chrono::{DateTime, Utc};
use portfolio_core::{DomainError, ImageRef, Post, PostId, PostStatus};

use crate::models::PostModel;

use super::corrupt_row;

/// Convert PostModel to Post entity
impl TryFrom<PostModel> for Post {
    type Error = DomainError;

    fn try_from(model: PostModel) -> Result<Self, Self::Error> {
        let status =
            PostStatus::parse(&model.status).map_err(|_| corrupt_row("status", &model.status))?;

        Ok(Post {
            id: PostId::new(model.id),
            title: model.title,
            body: model.body,
            images: model.images.into_iter().map(ImageRef::from_normalized).collect(),
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert Post entity reference to values for database insertion
pub struct PostInsert<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    pub images: Vec<&'a str>,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.as_str(),
            title: &post.title,
            body: &post.body,
            images: post.images.iter().map(ImageRef::as_str).collect(),
            status: post.status.as_str(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Convert Post entity reference to values for database update
pub struct PostUpdate<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    pub images: Vec<&'a str>,
    pub status: &'static str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PostUpdate<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.as_str(),
            title: &post.title,
            body: &post.body,
            images: post.images.iter().map(ImageRef::as_str).collect(),
            status: post.status.as_str(),
            updated_at: post.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(status: &str) -> PostModel {
        PostModel {
            id: "p1".to_string(),
            title: "Nocturne".to_string(),
            body: "Ink on paper".to_string(),
            images: vec!["https://cdn.example.com/a.jpg".to_string()],
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let post = Post::try_from(model("draft")).unwrap();
        assert_eq!(post.id.as_str(), "p1");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.images[0].as_str(), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = Post::try_from(model("archived")).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[test]
    fn test_insert_borrows_entity() {
        let post = Post::try_from(model("published")).unwrap();
        let insert = PostInsert::new(&post);
        assert_eq!(insert.id, "p1");
        assert_eq!(insert.status, "published");
        assert_eq!(insert.images, vec!["https://cdn.example.com/a.jpg"]);
    }
}
