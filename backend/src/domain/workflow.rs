//! Editorial workflow stages for brand stories.
//!
//! The stage list documents the review path editors follow. It is metadata
//! only: no code validates or performs transitions between stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named stage of the editorial workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Being written.
    Draft,
    /// Awaiting copy review.
    ContentReview,
    /// Awaiting brand-team review.
    BrandReview,
    /// Awaiting sign-off.
    FinalApproval,
    /// Live on the site.
    Published,
}

impl WorkflowStage {
    /// Every stage in the order editors move through them.
    pub const ALL: [Self; 5] = [
        Self::Draft,
        Self::ContentReview,
        Self::BrandReview,
        Self::FinalApproval,
        Self::Published,
    ];

    /// Stable identifier used in repository payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::ContentReview => "content_review",
            Self::BrandReview => "brand_review",
            Self::FinalApproval => "final_approval",
            Self::Published => "published",
        }
    }

    /// Permission string editors need to move content into this stage.
    pub fn permission(self) -> &'static str {
        match self {
            Self::Draft => "brand-story.create",
            Self::ContentReview => "brand-story.review-content",
            Self::BrandReview => "brand-story.review-brand",
            Self::FinalApproval => "brand-story.approve",
            Self::Published => "brand-story.publish",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_serialise_to_their_identifiers() {
        for stage in WorkflowStage::ALL {
            let encoded = serde_json::to_value(stage).expect("stage serialises");
            assert_eq!(encoded, stage.as_str());
        }
    }

    #[test]
    fn stages_are_listed_in_review_order() {
        let mut sorted = WorkflowStage::ALL;
        sorted.sort();
        assert_eq!(sorted, WorkflowStage::ALL);
        assert_eq!(WorkflowStage::ALL.last(), Some(&WorkflowStage::Published));
    }
}
