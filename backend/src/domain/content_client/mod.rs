//! Read and submit operations against the content repository.
//!
//! [`ContentClient`] turns typed requests into repository calls, routes every
//! outcome through the classifier and applies the public-visibility rules
//! locally as well as through repository filters: callers never see an item
//! whose publish timestamp is after "now", and list ordering and limits hold
//! even when the repository ignores a directive.

use std::cmp::Reverse;
use std::sync::Arc;

use mockable::Clock;
use pagination::PageRequest;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use super::classify::{classify_outcome, decode_list, decode_single};
use super::content::{
    AboutSection, BlogPost, BrandStory, CaseStudy, ContactInquiry, ContactSubmission, JobListing,
    Page, Publishable, SiteSettings, Sluggable,
};
use super::envelope::ContentList;
use super::error::ContentError;
use super::ports::{ContentTransport, TransportRequest};
use super::query::{ContentQuery, PUBLISHED_AT_FIELD, SortDirection};
use super::slug::Slug;


/// Marketing pages collection.
pub const PAGES_PATH: &str = "/api/pages";
/// About sections collection.
pub const ABOUT_SECTIONS_PATH: &str = "/api/about-sections";
/// Blog posts collection.
pub const BLOG_POSTS_PATH: &str = "/api/blog-posts";
/// Case studies collection.
pub const CASE_STUDIES_PATH: &str = "/api/case-studies";
/// Job listings collection.
pub const JOB_LISTINGS_PATH: &str = "/api/job-listings";
/// Site settings singleton.
pub const SITE_SETTINGS_PATH: &str = "/api/site-setting";
/// Brand stories collection.
pub const BRAND_STORIES_PATH: &str = "/api/brand-stories";
/// Contact inquiries collection; write-only for the public role.
pub const CONTACT_INQUIRIES_PATH: &str = "/api/contact-inquiries";

/// Optional narrowing applied to the blog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostFilters {
    /// Keep only posts in this category.
    pub category: Option<String>,
    /// Keep only posts carrying a tag with this name.
    pub tag: Option<String>,
    /// Return at most this many posts (`1..=100`).
    pub limit: Option<u32>,
}

impl BlogPostFilters {
    /// No narrowing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow to `category`.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Narrow to posts tagged `tag`.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Cap the number of posts returned.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn page_request(&self) -> Result<Option<PageRequest>, ContentError> {
        self.limit
            .map(|limit| {
                PageRequest::offset(0, limit)
                    .map_err(|error| ContentError::invalid_request(error.to_string()))
            })
            .transpose()
    }
}

/// Typed access to the content repository's public API.
///
/// The client holds no mutable state; clones share the transport and clock
/// and concurrent calls are independent.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use agency_content::domain::ContentClient;
/// use agency_content::domain::ports::FixtureContentTransport;
/// use mockable::DefaultClock;
///
/// let client = ContentClient::new(Arc::new(FixtureContentTransport), Arc::new(DefaultClock));
/// # let _ = client;
/// ```
#[derive(Clone)]
pub struct ContentClient {
    transport: Arc<dyn ContentTransport>,
    clock: Arc<dyn Clock>,
}

impl ContentClient {
    /// Create a client over `transport`, reading "now" from `clock`.
    pub fn new(transport: Arc<dyn ContentTransport>, clock: Arc<dyn Clock>) -> Self {
        Self { transport, clock }
    }

    /// Fetch the published page addressed by `slug`.
    ///
    /// # Errors
    ///
    /// `ClientError` 400 for an empty or invalid slug (no request is sent),
    /// `NotFound` when no published page matches, otherwise whatever the
    /// classifier reports.
    pub async fn get_page_by_slug(&self, slug: &str) -> Result<Page, ContentError> {
        self.find_by_slug(PAGES_PATH, slug, &["image"]).await
    }

    /// Fetch the published About sections in ascending `order`.
    pub async fn get_about_sections(&self) -> Result<ContentList<AboutSection>, ContentError> {
        let query = ContentQuery::new()
            .published_before(self.clock.utc())
            .populate("image")
            .sort("order", SortDirection::Asc);
        let mut sections = self.fetch_published(ABOUT_SECTIONS_PATH, &query).await?;
        sections.items_mut().sort_by_key(AboutSection::order);
        Ok(sections)
    }

    /// Fetch published blog posts, newest first, narrowed by `filters`.
    ///
    /// # Errors
    ///
    /// `ClientError` 400 when `filters.limit` is outside `1..=100`.
    pub async fn get_blog_posts(
        &self,
        filters: &BlogPostFilters,
    ) -> Result<ContentList<BlogPost>, ContentError> {
        let page_request = filters.page_request()?;
        let mut query = ContentQuery::new().published_before(self.clock.utc());
        if let Some(category) = &filters.category {
            query = query.filter_eq(&["category"], category.as_str());
        }
        if let Some(tag) = &filters.tag {
            query = query.filter_eq(&["tags", "name"], tag.as_str());
        }
        query = query
            .populate("coverImage")
            .populate("tags")
            .sort(PUBLISHED_AT_FIELD, SortDirection::Desc);
        if let Some(page) = page_request {
            query = query.paginate(page);
        }

        let mut posts: ContentList<BlogPost> =
            self.fetch_published(BLOG_POSTS_PATH, &query).await?;
        let items = posts.items_mut();
        if let Some(category) = &filters.category {
            items.retain(|post| post.category() == Some(category.as_str()));
        }
        if let Some(tag) = &filters.tag {
            items.retain(|post| post.has_tag(tag));
        }
        items.sort_by_key(|post| Reverse(post.published_at()));
        if let Some(page) = page_request {
            items.truncate(usize::try_from(page.limit()).unwrap_or(usize::MAX));
        }
        Ok(posts)
    }

    /// Fetch the published blog post addressed by `slug`.
    pub async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, ContentError> {
        self.find_by_slug(BLOG_POSTS_PATH, slug, &["coverImage", "tags"])
            .await
    }

    /// Fetch every published case study.
    pub async fn get_case_studies(&self) -> Result<ContentList<CaseStudy>, ContentError> {
        let query = ContentQuery::new()
            .published_before(self.clock.utc())
            .populate("coverImage")
            .populate("gallery");
        self.fetch_published(CASE_STUDIES_PATH, &query).await
    }

    /// Fetch the published case study addressed by `slug`.
    pub async fn get_case_study_by_slug(&self, slug: &str) -> Result<CaseStudy, ContentError> {
        self.find_by_slug(CASE_STUDIES_PATH, slug, &["coverImage", "gallery"])
            .await
    }

    /// Fetch published job listings, newest first.
    pub async fn get_job_listings(&self) -> Result<ContentList<JobListing>, ContentError> {
        let query = ContentQuery::new()
            .published_before(self.clock.utc())
            .sort(PUBLISHED_AT_FIELD, SortDirection::Desc);
        let mut listings: ContentList<JobListing> =
            self.fetch_published(JOB_LISTINGS_PATH, &query).await?;
        listings
            .items_mut()
            .sort_by_key(|listing| Reverse(listing.published_at()));
        Ok(listings)
    }

    /// Fetch the site-wide settings singleton.
    ///
    /// # Errors
    ///
    /// `NotFound` when the singleton has not been created.
    pub async fn get_site_settings(&self) -> Result<SiteSettings, ContentError> {
        let query = ContentQuery::new().populate("logo").populate("socialLinks");
        let body = self
            .send(TransportRequest::get(
                SITE_SETTINGS_PATH,
                query.to_query_pairs(),
            ))
            .await?;
        decode_single(&body)?.ok_or_else(ContentError::not_found)
    }

    /// Fetch the published brand story addressed by `slug`.
    pub async fn get_brand_story_by_slug(&self, slug: &str) -> Result<BrandStory, ContentError> {
        self.find_by_slug(BRAND_STORIES_PATH, slug, &[]).await
    }

    /// Validate and store a contact-form submission.
    ///
    /// The stored inquiry is stamped with status `New` and the current time.
    ///
    /// # Errors
    ///
    /// `ClientError` 400 when a required field is blank or the e-mail address
    /// is malformed; nothing is sent in that case.
    pub async fn submit_contact_form(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContentError> {
        submission.validate().map_err(|error| {
            ContentError::invalid_request(error.to_string())
                .with_details(json!({ "field": error.field() }))
        })?;
        let inquiry = ContactInquiry::received(submission, self.clock.utc());
        let body = json!({ "data": inquiry });
        self.send(TransportRequest::post(CONTACT_INQUIRIES_PATH, body))
            .await?;
        Ok(())
    }

    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, ContentError> {
        debug!(
            method = ?request.method,
            path = %request.path,
            query = request.query.len(),
            "sending content request"
        );
        classify_outcome(self.transport.send(request).await)
    }

    async fn fetch_published<T>(
        &self,
        path: &str,
        query: &ContentQuery,
    ) -> Result<ContentList<T>, ContentError>
    where
        T: DeserializeOwned + Publishable,
    {
        let body = self
            .send(TransportRequest::get(path, query.to_query_pairs()))
            .await?;
        let mut list: ContentList<T> = decode_list(&body)?;
        let now = self.clock.utc();
        list.items_mut().retain(|item| item.is_published_at(now));
        Ok(list)
    }

    async fn find_by_slug<T>(
        &self,
        path: &str,
        slug: &str,
        populate: &[&str],
    ) -> Result<T, ContentError>
    where
        T: DeserializeOwned + Publishable + Sluggable,
    {
        let valid_slug = Slug::new(slug).map_err(|error| {
            ContentError::invalid_request(error.to_string())
                .with_details(json!({ "field": "slug" }))
        })?;
        let query = populate.iter().fold(
            ContentQuery::new()
                .filter_eq(&["slug"], valid_slug.as_str())
                .published_before(self.clock.utc()),
            |query, relation| query.populate(*relation),
        );
        let matches: ContentList<T> = self.fetch_published(path, &query).await?;
        let count = matches.len();
        let mut items = matches
            .into_iter()
            .filter(|item| item.slug() == slug);
        let first = items.next().ok_or_else(ContentError::not_found)?;
        if count > 1 {
            warn!(
                path,
                slug,
                matches = count,
                "slug matched more than one item; using the first"
            );
        }
        Ok(first)
    }
}

impl std::fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentClient").finish_non_exhaustive()
    }
}
