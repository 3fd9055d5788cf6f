//! In-memory post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use forum_core::domain::{Comment, Post};
use forum_core::error::RepoError;
use forum_core::ports::{BaseRepository, PostFilter, PostRepository};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Every mutation happens under the write lock, so likes and comments are
/// applied atomically. Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&entity.id) {
            return Err(RepoError::Constraint(format!(
                "post {} already exists",
                entity.id
            )));
        }
        store.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.remove(&id))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self, filter: PostFilter) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        posts.sort_by_key(|p| (p.date_created, p.id));
        Ok(posts)
    }

    async fn update(&self, post: &Post) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let stored = store.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        stored.title.clone_from(&post.title);
        stored.content.clone_from(&post.content);
        stored.tags.clone_from(&post.tags);
        Ok(())
    }

    async fn increment_likes(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let post = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.likes += 1;
        Ok(())
    }

    async fn push_comment(&self, id: Uuid, comment: Comment) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.comments.push(comment);
        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn post(author: &str, tags: &[&str]) -> Post {
        Post::new(
            author.into(),
            "title".into(),
            "content".into(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryPostRepository::new();
        let p = post("alice", &["intro"]);
        let saved = repo.insert(p.clone()).await.unwrap();

        assert_eq!(saved, p);
        assert_eq!(repo.find_by_id(p.id).await.unwrap(), Some(p));
    }

    #[tokio::test]
    async fn test_insert_same_id_twice_is_rejected() {
        let repo = InMemoryPostRepository::new();
        let p = post("alice", &[]);
        repo.insert(p.clone()).await.unwrap();

        let err = repo.insert(p).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_post() {
        let repo = InMemoryPostRepository::new();
        let p = post("alice", &[]);
        repo.insert(p.clone()).await.unwrap();

        assert_eq!(repo.delete(p.id).await.unwrap(), Some(p.clone()));
        assert_eq!(repo.delete(p.id).await.unwrap(), None);
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_find_all_orders_by_creation_time() {
        let repo = InMemoryPostRepository::new();
        let now = Utc::now();
        let mut late = post("alice", &[]);
        late.date_created = now;
        let mut early = post("alice", &[]);
        early.date_created = now - Duration::minutes(5);
        repo.insert(late.clone()).await.unwrap();
        repo.insert(early.clone()).await.unwrap();

        let ids: Vec<_> = repo
            .find_all(PostFilter::all())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn test_find_all_by_tags() {
        let repo = InMemoryPostRepository::new();
        let with_x = post("a", &["x", "y"]);
        let without_x = post("b", &["y"]);
        repo.insert(with_x.clone()).await.unwrap();
        repo.insert(without_x).await.unwrap();

        let found = repo
            .find_all(PostFilter::by_tags(vec!["x".into()]))
            .await
            .unwrap();
        assert_eq!(found, vec![with_x]);
    }

    #[tokio::test]
    async fn test_update_leaves_likes_and_comments() {
        let repo = InMemoryPostRepository::new();
        let p = post("alice", &["a"]);
        repo.insert(p.clone()).await.unwrap();
        repo.increment_likes(p.id).await.unwrap();
        repo.push_comment(p.id, Comment::new("bob", "hi")).await.unwrap();

        // stale copy, as read before the like and comment landed
        let mut stale = p.clone();
        stale.title = "changed".into();
        repo.update(&stale).await.unwrap();

        let stored = repo.find_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "changed");
        assert_eq!(stored.likes, 1);
        assert_eq!(stored.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_mutating_missing_post_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let id = Uuid::new_v4();

        assert!(matches!(
            repo.increment_likes(id).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            repo.push_comment(id, Comment::new("bob", "hi")).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            repo.update(&post("a", &[])).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_likes_are_not_lost() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let p = post("alice", &[]);
        let id = p.id;
        repo.insert(p).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_likes(id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().likes, 50);
    }
}
