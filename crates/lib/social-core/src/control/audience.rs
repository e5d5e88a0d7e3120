use serde::{Deserialize, Serialize};
use social_store::{DataSource, Platform};

use crate::features::audience::{
    self,
    AudienceReport,
    Demographics,
    EngagementInsights,
    FollowerGrowth,
};
use crate::params::{InsightType, parse_platform};

use super::{ControlError, SocialControlPlane, keyword_or, required};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudienceRequest {
    pub platform: String,
    #[serde(default)]
    pub insight_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AudienceSection {
    Demographics { demographics: Demographics },
    Growth { growth: FollowerGrowth },
    Engagement { engagement: EngagementInsights },
    Report(AudienceReport),
}

#[derive(Debug, Clone, Serialize)]
pub struct AudienceInsightsReport {
    pub platform: Platform,
    pub insight_type: InsightType,
    pub source: DataSource,
    #[serde(flatten)]
    pub section: AudienceSection,
}

impl SocialControlPlane {
    /// Audience figures for a platform. Always mocked.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for a missing or unknown platform
    /// or insight type.
    #[allow(clippy::unused_self)]
    pub fn get_audience_insights(
        &self,
        request: &AudienceRequest,
    ) -> Result<AudienceInsightsReport, ControlError> {
        let platform = parse_platform(required("platform", Some(request.platform.as_str()))?)?;
        let insight_type = keyword_or(request.insight_type.as_deref(), InsightType::Report)?;

        let section = match insight_type {
            InsightType::Demographics => AudienceSection::Demographics {
                demographics: audience::demographics(platform),
            },
            InsightType::Growth => AudienceSection::Growth {
                growth: audience::follower_growth(platform),
            },
            InsightType::Engagement => AudienceSection::Engagement {
                engagement: audience::engagement(platform),
            },
            InsightType::Report => AudienceSection::Report(audience::report(platform)),
        };
        Ok(AudienceInsightsReport {
            platform,
            insight_type,
            source: DataSource::Mocked,
            section,
        })
    }
}
