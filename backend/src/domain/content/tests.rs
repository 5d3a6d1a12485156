//! Decoding and validation coverage for content kinds.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::WorkflowStage;
use crate::domain::envelope::normalize_item;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(normalize_item(value))
}

#[rstest]
fn wrapped_blog_post_decodes_with_relations() {
    let post: BlogPost = decode(json!({
        "id": 4,
        "attributes": {
            "slug": "rebrand-launch",
            "title": "Rebrand launch",
            "category": "News",
            "tags": { "data": [{ "id": 1, "attributes": { "name": "branding" } }] },
            "coverImage": { "data": { "id": 2, "attributes": { "url": "/uploads/cover.jpg", "alternativeText": "Cover" } } },
            "publishedAt": "2024-04-01T09:00:00.000Z"
        }
    }))
    .expect("wrapped post decodes");

    assert_eq!(post.slug(), "rebrand-launch");
    assert!(post.has_tag("branding"));
    assert!(!post.has_tag("Branding"));
    let cover = post.cover_image().expect("cover image");
    assert_eq!(cover.url, "/uploads/cover.jpg");
    assert_eq!(cover.alternative_text.as_deref(), Some("Cover"));
}

#[rstest]
fn flat_case_study_decodes_with_gallery() {
    let study: CaseStudy = decode(json!({
        "id": 8,
        "slug": "harbour-rebrand",
        "title": "Harbour rebrand",
        "client": "Harbour Co",
        "gallery": [{ "url": "/uploads/1.jpg" }, { "url": "/uploads/2.jpg" }],
        "publishedAt": "2024-03-01T00:00:00Z"
    }))
    .expect("flat case study decodes");

    assert_eq!(study.client(), Some("Harbour Co"));
    assert_eq!(study.gallery().len(), 2);
}

#[rstest]
fn brand_story_keeps_workflow_stage_as_metadata() {
    let story: BrandStory = decode(json!({
        "id": 1,
        "slug": "our-story",
        "title": "Our story",
        "values": ["Craft", "Candour"],
        "workflowStage": "brand_review"
    }))
    .expect("brand story decodes");

    assert_eq!(story.workflow_stage(), Some(WorkflowStage::BrandReview));
    assert_eq!(story.values(), ["Craft", "Candour"]);
    assert!(story.published_at().is_none());
}

#[rstest]
fn site_settings_decode_social_links() {
    let settings: SiteSettings = decode(json!({
        "id": 1,
        "siteName": "Studio North",
        "socialLinks": [{ "platform": "LinkedIn", "url": "https://linkedin.example/studio" }]
    }))
    .expect("settings decode");

    assert_eq!(settings.site_name(), "Studio North");
    assert_eq!(settings.social_links()[0].platform, "LinkedIn");
}

#[rstest]
#[case(json!({ "id": 1, "slug": "", "title": "Home" }), "slug must not be empty")]
#[case(json!({ "id": 1, "slug": "home page", "title": "Home" }), "unsupported character")]
#[case(json!({ "id": 1, "slug": "home", "title": "  " }), "page.title must not be empty")]
#[case(json!({ "id": 1, "title": "Home" }), "missing field `slug`")]
fn invalid_pages_are_rejected(#[case] payload: Value, #[case] expected: &str) {
    let error = decode::<Page>(payload).expect_err("invalid page");
    assert!(
        error.to_string().contains(expected),
        "{error} should mention {expected}"
    );
}

#[rstest]
fn media_without_url_is_rejected() {
    let error = decode::<MediaAsset>(json!({ "id": 1, "url": "" })).expect_err("empty url");
    assert!(error.to_string().contains("media.url"));
}

#[rstest]
fn job_listings_have_no_slug_requirement() {
    let listing: JobListing = decode(json!({
        "id": 3,
        "title": "Designer",
        "employmentType": "Full-time",
        "publishedAt": "2024-02-01T00:00:00Z"
    }))
    .expect("listing decodes");

    assert_eq!(listing.employment_type(), Some("Full-time"));
}

#[rstest]
#[case(Some("2024-05-01T12:00:00Z"), true)]
#[case(Some("2024-04-30T00:00:00Z"), true)]
#[case(Some("2024-05-01T12:00:01Z"), false)]
#[case(None, false)]
fn publish_visibility_is_inclusive_of_now(
    now: DateTime<Utc>,
    #[case] published_at: Option<&str>,
    #[case] visible: bool,
) {
    let page: Page = decode(json!({
        "id": 1,
        "slug": "home",
        "title": "Home",
        "publishedAt": published_at,
    }))
    .expect("page decodes");

    assert_eq!(page.is_published_at(now), visible);
}

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        company: None,
        phone: None,
        message: "We need a new identity.".to_owned(),
    }
}

#[rstest]
#[case("ada@example.com", true)]
#[case("  ada@example.com  ", true)]
#[case("not-an-email", false)]
#[case("ada@example", false)]
#[case("ada lovelace@example.com", false)]
fn contact_email_shape_is_checked(#[case] email: &str, #[case] valid: bool) {
    let candidate = ContactSubmission {
        email: email.to_owned(),
        ..submission()
    };
    assert_eq!(candidate.validate().is_ok(), valid);
}

#[rstest]
fn blank_required_contact_fields_are_reported() {
    let candidate = ContactSubmission {
        message: " ".to_owned(),
        ..submission()
    };
    let error = candidate.validate().expect_err("blank message");
    assert_eq!(
        error,
        ContentValidationError::EmptyField {
            field: "contact.message"
        }
    );
}

#[rstest]
fn received_inquiries_are_trimmed_and_stamped(now: DateTime<Utc>) {
    let inquiry = ContactInquiry::received(
        ContactSubmission {
            name: "  Ada ".to_owned(),
            company: Some("   ".to_owned()),
            phone: Some(" 0123 ".to_owned()),
            ..submission()
        },
        now,
    );

    assert_eq!(inquiry.name, "Ada");
    assert!(inquiry.company.is_none());
    assert_eq!(inquiry.phone.as_deref(), Some("0123"));
    assert_eq!(inquiry.status, InquiryStatus::New);
    assert_eq!(inquiry.submitted_at, now);
    assert!(inquiry.id.is_none());
}
