//! Blog post read model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media_asset::MediaAsset;
use super::validation::{blank_to_none, validate_non_empty_field, validate_slug};
use super::{ContentValidationError, Publishable, Sluggable, deserialize_via_draft};
use crate::domain::slug::Slug;

/// Tag relation attached to a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag label, matched exactly by tag filters.
    pub name: String,
}

/// Input payload for [`BlogPost::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDraft {
    /// Repository identifier.
    pub id: u64,
    /// Unique slug.
    pub slug: String,
    /// Headline.
    pub title: String,
    /// Teaser shown on listing cards.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Rich-text body.
    #[serde(default)]
    pub content: Option<String>,
    /// Editorial category, e.g. `News`.
    #[serde(default)]
    pub category: Option<String>,
    /// Tag relations.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Byline.
    #[serde(default)]
    pub author: Option<String>,
    /// Listing and header image.
    #[serde(default)]
    pub cover_image: Option<MediaAsset>,
    /// Publish timestamp; absent for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Blog post rendered on the insights pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    id: u64,
    slug: Slug,
    title: String,
    excerpt: Option<String>,
    content: Option<String>,
    category: Option<String>,
    tags: Vec<Tag>,
    author: Option<String>,
    cover_image: Option<MediaAsset>,
    published_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// Validate and construct a blog post.
    pub fn new(draft: BlogPostDraft) -> Result<Self, ContentValidationError> {
        Self::try_from(draft)
    }

    /// Repository identifier.
    pub fn id(&self) -> u64 {
        self.id
    }
    /// Post title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
    /// Listing excerpt.
    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }
    /// Rich-text body.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
    /// Editorial category.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
    /// Attached tags.
    pub fn tags(&self) -> &[Tag] {
        self.tags.as_slice()
    }
    /// Byline.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
    /// Cover image.
    pub fn cover_image(&self) -> Option<&MediaAsset> {
        self.cover_image.as_ref()
    }

    /// Return `true` when one of the post's tags is named `name`.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

impl Sluggable for BlogPost {
    fn slug(&self) -> &str {
        self.slug.as_str()
    }
}

impl Publishable for BlogPost {
    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

impl TryFrom<BlogPostDraft> for BlogPost {
    type Error = ContentValidationError;

    fn try_from(draft: BlogPostDraft) -> Result<Self, Self::Error> {
        let tags = draft
            .tags
            .into_iter()
            .map(|tag| {
                validate_non_empty_field(tag.name, "blog_post.tags.name").map(|name| Tag { name })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: draft.id,
            slug: validate_slug(draft.slug, "blog_post.slug")?,
            title: validate_non_empty_field(draft.title, "blog_post.title")?,
            excerpt: draft.excerpt,
            content: draft.content,
            category: blank_to_none(draft.category),
            tags,
            author: blank_to_none(draft.author),
            cover_image: draft.cover_image,
            published_at: draft.published_at,
        })
    }
}

deserialize_via_draft!(BlogPost, BlogPostDraft);
