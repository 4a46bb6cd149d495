use std::cmp::Reverse;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::posts::domain::{CreatePostInput, ListQuery, Post, SearchQuery, SortDirection, UpdatePostInput};
use crate::posts::repository::PostRepository;

/// Application service encapsulating post query and mutation rules.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self { Self { repo } }

    /// All posts, in insertion order or ordered by the requested field.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Post>, ServiceError> {
        let spec = query.sort_spec()?;
        let mut posts = self.repo.list().await;
        if let Some(spec) = spec {
            match spec.direction {
                SortDirection::Asc => posts.sort_by_cached_key(|p| spec.field.key(p).to_lowercase()),
                SortDirection::Desc => {
                    posts.sort_by_cached_key(|p| Reverse(spec.field.key(p).to_lowercase()))
                }
            }
        }
        Ok(posts)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Post>, ServiceError> {
        query.ensure_present()?;
        let posts = self.repo.list().await;
        Ok(posts.into_iter().filter(|p| query.matches(p)).collect())
    }

    pub async fn get(&self, id: u64) -> Result<Post, ServiceError> {
        self.repo.get(id).await.ok_or_else(|| ServiceError::not_found(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreatePostInput) -> Result<Post, ServiceError> {
        let new_post = input.validate()?;
        let post = self.repo.create(new_post).await;
        info!(post_id = post.id, "post created");
        Ok(post)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: u64, input: UpdatePostInput) -> Result<Post, ServiceError> {
        let post = self.repo.update(id, input).await?;
        info!(post_id = id, "post updated");
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await {
            return Err(ServiceError::not_found(id));
        }
        info!(post_id = id, "post deleted");
        Ok(())
    }

    /// Existence check without cloning the post out.
    pub async fn exists(&self, id: u64) -> bool {
        self.repo.get(id).await.is_some()
    }

    pub async fn count(&self) -> usize {
        self.repo.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::domain::NewPost;
    use crate::posts::repository::PostStore;

    async fn service_with(titles: &[&str]) -> PostService {
        let store = PostStore::new();
        for t in titles {
            store.create(NewPost { title: (*t).into(), content: format!("{t} body") }).await;
        }
        PostService::new(store)
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    fn sort(field: &str, direction: &str) -> ListQuery {
        ListQuery { sort: Some(field.into()), direction: Some(direction.into()) }
    }

    #[tokio::test]
    async fn list_without_sort_keeps_insertion_order() -> anyhow::Result<()> {
        let svc = service_with(&["Banana", "apple", "Cherry"]).await;
        let posts = svc.list(&ListQuery::default()).await?;
        assert_eq!(titles(&posts), vec!["Banana", "apple", "Cherry"]);
        Ok(())
    }

    #[tokio::test]
    async fn list_sorts_case_insensitively() -> anyhow::Result<()> {
        let svc = service_with(&["Banana", "apple"]).await;
        let asc = svc.list(&sort("title", "asc")).await?;
        assert_eq!(titles(&asc), vec!["apple", "Banana"]);

        let desc = svc.list(&sort("title", "desc")).await?;
        assert_eq!(titles(&desc), vec!["Banana", "apple"]);

        // sorting a copy leaves storage order alone
        let plain = svc.list(&ListQuery::default()).await?;
        assert_eq!(titles(&plain), vec!["Banana", "apple"]);
        Ok(())
    }

    #[tokio::test]
    async fn list_sorts_by_content() -> anyhow::Result<()> {
        let svc = service_with(&["b", "C", "a"]).await;
        let posts = svc.list(&sort("content", "asc")).await?;
        assert_eq!(titles(&posts), vec!["a", "b", "C"]);
        Ok(())
    }

    #[tokio::test]
    async fn descending_sort_keeps_ties_in_insertion_order() -> anyhow::Result<()> {
        let svc = service_with(&["Same", "b", "same"]).await;
        let posts = svc.list(&sort("title", "desc")).await?;
        assert_eq!(titles(&posts), vec!["Same", "same", "b"]);
        Ok(())
    }

    #[tokio::test]
    async fn list_rejects_partial_or_unknown_sort() {
        let svc = service_with(&["a"]).await;
        let only_sort = ListQuery { sort: Some("title".into()), direction: None };
        assert!(matches!(svc.list(&only_sort).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.list(&sort("id", "asc")).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn search_is_or_across_supplied_fields() -> anyhow::Result<()> {
        let svc = service_with(&["Flask API", "Rust notes"]).await;
        let hits = svc.search(&SearchQuery { title: Some("flask".into()), content: None }).await?;
        assert_eq!(titles(&hits), vec!["Flask API"]);

        let hits = svc
            .search(&SearchQuery { title: Some("flask".into()), content: Some("rust".into()) })
            .await?;
        assert_eq!(titles(&hits), vec!["Flask API", "Rust notes"]);

        let none = svc.search(&SearchQuery { title: None, content: Some("nonexistent".into()) }).await?;
        assert!(none.is_empty());

        assert!(svc.search(&SearchQuery::default()).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_and_leaves_store_untouched_on_error() -> anyhow::Result<()> {
        let svc = service_with(&["a"]).await;
        let err = svc.create(CreatePostInput { title: Some("T".into()), content: None }).await;
        assert!(matches!(err, Err(ServiceError::Validation(_))));
        assert_eq!(svc.count().await, 1);

        let before: Vec<u64> = svc.list(&ListQuery::default()).await?.iter().map(|p| p.id).collect();
        let created = svc
            .create(CreatePostInput { title: Some("T".into()), content: Some("C".into()) })
            .await?;
        assert!(!before.contains(&created.id));
        assert_eq!(svc.get(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() -> anyhow::Result<()> {
        let svc = service_with(&["a", "b"]).await;
        svc.delete(1).await?;
        assert!(!svc.exists(1).await);
        assert_eq!(svc.delete(1).await, Err(ServiceError::not_found(1)));
        assert_eq!(svc.get(1).await, Err(ServiceError::not_found(1)));
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let svc = service_with(&[]).await;
        let err = svc.update(9999, UpdatePostInput::default()).await;
        assert_eq!(err, Err(ServiceError::not_found(9999)));
    }
}
