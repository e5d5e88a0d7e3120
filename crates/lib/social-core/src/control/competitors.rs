use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use social_store::{Competitor, CompetitorsDocument, Platform};
use tracing::info;

use crate::features::competitors::{
    ComparisonRow,
    CompetitorAnalysis,
    MIN_COMPARED,
    analyze,
    compare,
};
use crate::params::{CompetitorAction, parse_platform};
use crate::store::DocumentKind;

use super::{ControlError, SocialControlPlane, non_blank, required};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitorRequest {
    pub action: String,
    #[serde(default)]
    pub competitor_name: Option<String>,
    #[serde(default)]
    pub platforms: Option<String>,
    #[serde(default)]
    pub competitors_to_compare: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum CompetitorReport {
    Add {
        competitor: Competitor,
        already_tracked: bool,
    },
    Remove {
        name: String,
    },
    List {
        competitors: Vec<Competitor>,
        total: usize,
    },
    Analyze {
        competitor: String,
        platforms: BTreeMap<Platform, String>,
        analysis: CompetitorAnalysis,
    },
    Compare {
        competitors: Vec<ComparisonRow>,
        not_found: Vec<String>,
    },
}

/// Parses `twitter:@acme,instagram:@acme_official`. Entries without a handle
/// are rejected.
fn parse_handles(raw: Option<&str>) -> Result<BTreeMap<Platform, String>, ControlError> {
    let mut handles = BTreeMap::new();
    let Some(raw) = non_blank(raw) else {
        return Ok(handles);
    };
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (platform, handle) = entry
            .split_once(':')
            .map(|(platform, handle)| (platform.trim(), handle.trim()))
            .filter(|(_, handle)| !handle.is_empty())
            .ok_or_else(|| {
                ControlError::Validation(format!(
                    "invalid platforms entry '{entry}'. Use platform:handle, e.g. twitter:@acme"
                ))
            })?;
        handles.insert(parse_platform(platform)?, handle.to_string());
    }
    Ok(handles)
}

fn not_tracked(name: &str) -> ControlError {
    ControlError::NotFound(format!("competitor '{name}' is not tracked"))
}

impl SocialControlPlane {
    /// Adds, removes, lists, analyzes or compares tracked competitors.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for missing or malformed
    /// parameters, `ControlError::NotFound` for an untracked competitor, and
    /// `ControlError::Store` if a change cannot be persisted.
    pub async fn manage_competitors(
        &self,
        request: &CompetitorRequest,
    ) -> Result<CompetitorReport, ControlError> {
        let action: CompetitorAction = required("action", Some(request.action.as_str()))?.parse()?;
        match action {
            CompetitorAction::Add => {
                let name = required("competitor_name", request.competitor_name.as_deref())?;
                let handles = parse_handles(request.platforms.as_deref())?;
                self.add_competitor(name, handles).await
            }
            CompetitorAction::Remove => {
                let name = required("competitor_name", request.competitor_name.as_deref())?;
                self.remove_competitor(name).await
            }
            CompetitorAction::List => {
                let competitors: CompetitorsDocument =
                    self.store.load(DocumentKind::Competitors).await;
                Ok(CompetitorReport::List {
                    total: competitors.len(),
                    competitors,
                })
            }
            CompetitorAction::Analyze => {
                let name = required("competitor_name", request.competitor_name.as_deref())?;
                self.analyze_competitor(name).await
            }
            CompetitorAction::Compare => {
                let names = required(
                    "competitors_to_compare",
                    request.competitors_to_compare.as_deref(),
                )?;
                self.compare_competitors(names).await
            }
        }
    }

    async fn add_competitor(
        &self,
        name: &str,
        handles: BTreeMap<Platform, String>,
    ) -> Result<CompetitorReport, ControlError> {
        let (competitor, already_tracked) = self
            .store
            .update(DocumentKind::Competitors, |competitors: &mut CompetitorsDocument| {
                if let Some(existing) = competitors.iter_mut().find(|c| c.matches_name(name)) {
                    existing.platforms.extend(handles);
                    return Ok::<_, ControlError>((existing.clone(), true));
                }
                let competitor = Competitor {
                    name: name.to_string(),
                    platforms: handles,
                    added_on: Utc::now(),
                    last_analyzed: None,
                    metrics: BTreeMap::new(),
                };
                competitors.push(competitor.clone());
                Ok((competitor, false))
            })
            .await?;
        info!(competitor = %competitor.name, already_tracked, "competitor added");
        Ok(CompetitorReport::Add {
            competitor,
            already_tracked,
        })
    }

    async fn remove_competitor(&self, name: &str) -> Result<CompetitorReport, ControlError> {
        let removed = self
            .store
            .update(DocumentKind::Competitors, |competitors: &mut CompetitorsDocument| {
                let index = competitors
                    .iter()
                    .position(|c| c.matches_name(name))
                    .ok_or_else(|| not_tracked(name))?;
                Ok::<_, ControlError>(competitors.remove(index))
            })
            .await?;
        info!(competitor = %removed.name, "competitor removed");
        Ok(CompetitorReport::Remove { name: removed.name })
    }

    /// Runs the analysis and stores its metrics on the competitor.
    async fn analyze_competitor(&self, name: &str) -> Result<CompetitorReport, ControlError> {
        let (competitor, analysis) = self
            .store
            .update(DocumentKind::Competitors, |competitors: &mut CompetitorsDocument| {
                let competitor = competitors
                    .iter_mut()
                    .find(|c| c.matches_name(name))
                    .ok_or_else(|| not_tracked(name))?;
                let analysis = analyze(competitor);
                competitor.metrics = analysis.metrics.clone();
                competitor.last_analyzed = Some(Utc::now());
                Ok::<_, ControlError>((competitor.clone(), analysis))
            })
            .await?;
        info!(competitor = %competitor.name, "competitor analyzed");
        Ok(CompetitorReport::Analyze {
            competitor: competitor.name,
            platforms: competitor.platforms,
            analysis,
        })
    }

    async fn compare_competitors(&self, names: &str) -> Result<CompetitorReport, ControlError> {
        let requested: Vec<&str> = names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if requested.len() < MIN_COMPARED {
            return Err(ControlError::Validation(format!(
                "competitors_to_compare needs at least {MIN_COMPARED} names"
            )));
        }

        let tracked: CompetitorsDocument = self.store.load(DocumentKind::Competitors).await;
        let mut found: Vec<Competitor> = Vec::new();
        let mut not_found = Vec::new();
        for name in requested {
            match tracked.iter().find(|c| c.matches_name(name)) {
                Some(competitor) if !found.iter().any(|f| f.matches_name(name)) => {
                    found.push(competitor.clone());
                }
                Some(_) => {}
                None => not_found.push(name.to_string()),
            }
        }

        if found.len() < MIN_COMPARED {
            return Err(ControlError::NotFound(format!(
                "need at least {MIN_COMPARED} tracked competitors to compare; not tracked: {}",
                if not_found.is_empty() {
                    "none".to_string()
                } else {
                    not_found.join(", ")
                }
            )));
        }

        Ok(CompetitorReport::Compare {
            competitors: compare(&found),
            not_found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_parse_per_platform() {
        let handles = parse_handles(Some("twitter:@acme, Instagram: @acme_ig")).expect("valid handles");
        assert_eq!(handles.get(&Platform::Twitter).map(String::as_str), Some("@acme"));
        assert_eq!(handles.get(&Platform::Instagram).map(String::as_str), Some("@acme_ig"));
        assert!(parse_handles(None).expect("empty is fine").is_empty());
    }

    #[test]
    fn malformed_handles_are_rejected() {
        assert!(matches!(
            parse_handles(Some("twitter")),
            Err(ControlError::Validation(message)) if message.contains("platform:handle")
        ));
        assert!(matches!(
            parse_handles(Some("myspace:@acme")),
            Err(ControlError::Validation(message)) if message.contains("Valid options")
        ));
    }
}
