use crate::services::view::ViewInvalidator;
use dashmap::DashMap;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    pub body: String,
    pub rendered_at: OffsetDateTime,
}

/// In-process cache of rendered pages keyed by request path.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: DashMap<String, CachedPage>,
}

impl PageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached page for `path`, rendering and storing it on a miss.
    pub fn get_or_render(&self, path: &str, render: impl FnOnce(OffsetDateTime) -> String) -> CachedPage {
        self.pages
            .entry(path.to_string())
            .or_insert_with(|| {
                let rendered_at = OffsetDateTime::now_utc();
                tracing::debug!(path = %path, "Rendering page");
                CachedPage { body: render(rendered_at), rendered_at }
            })
            .clone()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.pages.contains_key(path)
    }
}

impl ViewInvalidator for PageCache {
    fn invalidate(&self, path: &str) {
        if self.pages.remove(path).is_some() {
            tracing::debug!(path = %path, "Page cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_once_until_invalidated() {
        let cache = PageCache::new();
        let mut renders = 0;

        let first = cache.get_or_render("/", |_| {
            renders += 1;
            "page".to_string()
        });
        let second = cache.get_or_render("/", |_| {
            renders += 1;
            "other".to_string()
        });
        assert_eq!(renders, 1);
        assert_eq!(first, second);

        cache.invalidate("/");
        assert!(!cache.contains("/"));

        let third = cache.get_or_render("/", |_| "fresh".to_string());
        assert_eq!(third.body, "fresh");
    }

    #[test]
    fn test_invalidate_is_scoped_to_path() {
        let cache = PageCache::new();
        cache.get_or_render("/", |_| "home".to_string());
        cache.get_or_render("/about", |_| "about".to_string());

        cache.invalidate("/about");
        cache.invalidate("/missing");

        assert!(cache.contains("/"));
        assert!(!cache.contains("/about"));
    }
}
