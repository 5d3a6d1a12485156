//! Singleton site-wide settings record.

use serde::{Deserialize, Serialize};

use super::media_asset::MediaAsset;
use super::validation::{blank_to_none, validate_non_empty_field};
use super::{ContentValidationError, deserialize_via_draft};

/// Social profile link shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Network name, e.g. `LinkedIn`.
    pub platform: String,
    /// Profile URL.
    pub url: String,
}

/// Input payload for [`SiteSettings::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsDraft {
    /// Repository identifier.
    pub id: u64,
    /// Site name used in titles and the header.
    pub site_name: String,
    /// Strapline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Public contact address.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Header logo.
    #[serde(default)]
    pub logo: Option<MediaAsset>,
    /// Footer social links in display order.
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// Site-wide settings; exactly one record exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    id: u64,
    site_name: String,
    tagline: Option<String>,
    contact_email: Option<String>,
    logo: Option<MediaAsset>,
    social_links: Vec<SocialLink>,
}

impl SiteSettings {
    /// Validate and construct the settings record.
    pub fn new(draft: SiteSettingsDraft) -> Result<Self, ContentValidationError> {
        Self::try_from(draft)
    }

    /// Repository identifier.
    pub fn id(&self) -> u64 {
        self.id
    }
    /// Site name shown in headers and titles.
    pub fn site_name(&self) -> &str {
        self.site_name.as_str()
    }
    /// Site tagline.
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }
    /// Public contact address.
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }
    /// Site logo.
    pub fn logo(&self) -> Option<&MediaAsset> {
        self.logo.as_ref()
    }
    /// Social profile links.
    pub fn social_links(&self) -> &[SocialLink] {
        self.social_links.as_slice()
    }
}

impl TryFrom<SiteSettingsDraft> for SiteSettings {
    type Error = ContentValidationError;

    fn try_from(draft: SiteSettingsDraft) -> Result<Self, Self::Error> {
        let social_links = draft
            .social_links
            .into_iter()
            .map(|link| {
                Ok(SocialLink {
                    platform: validate_non_empty_field(
                        link.platform,
                        "site_settings.social_links.platform",
                    )?,
                    url: validate_non_empty_field(link.url, "site_settings.social_links.url")?,
                })
            })
            .collect::<Result<Vec<_>, ContentValidationError>>()?;

        Ok(Self {
            id: draft.id,
            site_name: validate_non_empty_field(draft.site_name, "site_settings.site_name")?,
            tagline: blank_to_none(draft.tagline),
            contact_email: blank_to_none(draft.contact_email),
            logo: draft.logo,
            social_links,
        })
    }
}

deserialize_via_draft!(SiteSettings, SiteSettingsDraft);
