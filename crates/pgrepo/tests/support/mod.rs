//! Shared entity definitions for integration and unit tests: a small blog
//! schema exercising all three relation shapes (`Profile` one-to-one,
//! `Post` one-to-many, `Tag` many-to-many).

use std::any::Any;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pgrepo::{Entity, FieldValue, ManyToMany, OneToMany, OneToOne, Repository, RepositoryError, RepositoryResult};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub profile: Option<Profile>,
    #[sqlx(skip)]
    pub posts: Vec<Post>,
}

impl Entity for User {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "email", "created_at", "updated_at"]
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Uuid(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "email" => Some(FieldValue::Text(self.email.clone())),
            _ => None,
        }
    }

    fn set_one(&mut self, name: &str, value: Box<dyn Any + Send>) -> RepositoryResult<()> {
        if name != "profile" {
            return Err(RepositoryError::field_not_found("User", name));
        }
        match value.downcast::<Profile>() {
            Ok(profile) => {
                self.profile = Some(*profile);
                Ok(())
            }
            Err(_) => Err(RepositoryError::field_not_found("User", name)),
        }
    }

    fn append_many(&mut self, name: &str, values: Box<dyn Any + Send>) -> RepositoryResult<()> {
        if name != "posts" {
            return Err(RepositoryError::field_not_found("User", name));
        }
        match values.downcast::<Vec<Post>>() {
            Ok(posts) => {
                self.posts = *posts;
                Ok(())
            }
            Err(_) => Err(RepositoryError::field_not_found("User", name)),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Profile {
    fn columns() -> &'static [&'static str] {
        &["id", "user_id", "bio", "created_at", "updated_at"]
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Uuid(self.id)),
            "user_id" => Some(FieldValue::Uuid(self.user_id)),
            _ => None,
        }
    }

    fn set_one(&mut self, name: &str, _value: Box<dyn Any + Send>) -> RepositoryResult<()> {
        Err(RepositoryError::field_not_found("Profile", name))
    }

    fn append_many(&mut self, name: &str, _values: Box<dyn Any + Send>) -> RepositoryResult<()> {
        Err(RepositoryError::field_not_found("Profile", name))
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    pub tags: Vec<Tag>,
}

impl Entity for Post {
    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "author_id",
            "title",
            "content",
            "created_at",
            "updated_at",
            "deleted_at",
        ]
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Uuid(self.id)),
            "author_id" => Some(FieldValue::Uuid(self.author_id)),
            "title" => Some(FieldValue::Text(self.title.clone())),
            _ => None,
        }
    }

    fn set_one(&mut self, name: &str, _value: Box<dyn Any + Send>) -> RepositoryResult<()> {
        Err(RepositoryError::field_not_found("Post", name))
    }

    fn append_many(&mut self, name: &str, values: Box<dyn Any + Send>) -> RepositoryResult<()> {
        if name != "tags" {
            return Err(RepositoryError::field_not_found("Post", name));
        }
        match values.downcast::<Vec<Tag>>() {
            Ok(tags) => {
                self.tags = *tags;
                Ok(())
            }
            Err(_) => Err(RepositoryError::field_not_found("Post", name)),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Tag {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "created_at", "updated_at"]
    }

    fn get_field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Uuid(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            _ => None,
        }
    }

    fn set_one(&mut self, name: &str, _value: Box<dyn Any + Send>) -> RepositoryResult<()> {
        Err(RepositoryError::field_not_found("Tag", name))
    }

    fn append_many(&mut self, name: &str, _values: Box<dyn Any + Send>) -> RepositoryResult<()> {
        Err(RepositoryError::field_not_found("Tag", name))
    }
}

/// Build a `users` repository with its `profile` and `posts` relations wired
/// up, plus the `posts` repository with its `tags` relation wired up, so
/// tests can eager-load `"profile"`, `"posts"`, and `"posts.tags"` in one call.
pub fn build_repositories(pool: sqlx::PgPool) -> (Repository<User>, Repository<Post>) {
    let tags_repo: Repository<Tag> = Repository::new(pool.clone(), "tags");

    let mut posts_repo: Repository<Post> = Repository::new(pool.clone(), "posts")
        .with_order_columns(["id", "title", "created_at"])
        .with_soft_delete("deleted_at");
    posts_repo
        .add_relation(
            "tags",
            Arc::new(ManyToMany::new(
                "tags",
                tags_repo,
                "post_tags",
                "post_id",
                "tag_id",
                "id",
                "id",
            )),
        )
        .expect("tags relation registers once");

    let profiles_repo: Repository<Profile> = Repository::new(pool.clone(), "profiles");

    let mut users_repo: Repository<User> =
        Repository::new(pool, "users").with_order_columns(["id", "name", "email", "created_at"]);
    users_repo
        .add_relation(
            "profile",
            Arc::new(OneToOne::new("profile", profiles_repo, "id", "user_id")),
        )
        .expect("profile relation registers once");
    users_repo
        .add_relation(
            "posts",
            Arc::new(OneToMany::new("posts", posts_repo.clone(), "id", "author_id")),
        )
        .expect("posts relation registers once");

    (users_repo, posts_repo)
}
