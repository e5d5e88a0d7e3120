use std::collections::BTreeSet;
use std::time::Duration;

use social_core::ai::CompletionConfig;
use social_core::control::analytics::AnalyticsRequest;
use social_core::control::competitors::{CompetitorReport, CompetitorRequest};
use social_core::control::posts::{ManagePostsReport, ManagePostsRequest, SchedulePostRequest};
use social_core::control::{
    AdvancedHashtagRequest,
    AudienceRequest,
    ContentCalendarRequest,
    ContentSuggestionRequest,
    ControlError,
    HashtagRequest,
    SocialControlPlane,
    TrendsRequest,
};
use social_core::features::GeneratedBy;
use social_core::platforms::{GraphCredentials, PlatformCredentials, PlatformEndpoints};
use social_core::services::{ServicesConfig, build_control_plane};
use social_core::store::DocumentKind;
use social_store::schema::DOC_SCHEDULED_POSTS;
use social_store::{AnalyticsCache, DataSource, Platform};

/// Nothing listens on the discard port, so every live call fails fast.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn control_plane(dir: &tempfile::TempDir) -> SocialControlPlane {
    let config = ServicesConfig::new(dir.path()).with_upstream_timeout(Duration::from_secs(2));
    build_control_plane(config).unwrap_or_else(|err| panic!("failed to build control plane: {err}"))
}

fn unreachable_control_plane(dir: &tempfile::TempDir) -> SocialControlPlane {
    let credentials = PlatformCredentials {
        twitter_bearer_token: Some("token".to_string()),
        facebook: Some(GraphCredentials {
            access_token: "token".to_string(),
            account_id: "1234".to_string(),
        }),
        ..PlatformCredentials::default()
    };
    let config = ServicesConfig::new(dir.path())
        .with_upstream_timeout(Duration::from_secs(2))
        .with_credentials(credentials)
        .with_endpoints(PlatformEndpoints::uniform(UNREACHABLE))
        .with_completion(CompletionConfig::new("key").with_base_url(UNREACHABLE));
    build_control_plane(config).unwrap_or_else(|err| panic!("failed to build control plane: {err}"))
}

fn schedule_request(content: &str, schedule_time: &str) -> SchedulePostRequest {
    SchedulePostRequest {
        content: content.to_string(),
        platforms: "twitter, linkedin".to_string(),
        schedule_time: schedule_time.to_string(),
        media_url: None,
    }
}

async fn list_posts(control: &SocialControlPlane) -> Vec<String> {
    let report = control
        .manage_scheduled_posts(ManagePostsRequest::default())
        .await
        .expect("list should succeed");
    match report {
        ManagePostsReport::List { posts, total } => {
            assert_eq!(posts.len(), total);
            posts.into_iter().map(|pending| pending.post.id).collect()
        }
        other => panic!("expected list report, got {other:?}"),
    }
}

fn competitor_request(action: &str, name: Option<&str>) -> CompetitorRequest {
    CompetitorRequest {
        action: action.to_string(),
        competitor_name: name.map(ToString::to_string),
        ..CompetitorRequest::default()
    }
}

#[tokio::test]
async fn scheduled_post_is_listed_with_unique_id() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);

    let first = control
        .schedule_post(schedule_request("Launch day!", "2099-01-01 09:00"))
        .await
        .expect("schedule should succeed");
    let second = control
        .schedule_post(schedule_request("Follow-up", "2099-01-02 09:00"))
        .await
        .expect("schedule should succeed");

    assert_ne!(first.post.id, second.post.id);
    assert_eq!(first.post.platforms, vec![Platform::Twitter, Platform::Linkedin]);
    let listed = list_posts(&control).await;
    assert!(listed.contains(&first.post.id));
    assert!(listed.contains(&second.post.id));
}

#[tokio::test]
async fn cancelled_posts_leave_the_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);
    let scheduled = control
        .schedule_post(schedule_request("Launch day!", "2099-01-01 09:00"))
        .await
        .expect("schedule should succeed");

    let cancel = ManagePostsRequest {
        action: Some("cancel".to_string()),
        post_id: Some(scheduled.post.id.clone()),
        schedule_time: None,
    };
    control
        .manage_scheduled_posts(cancel.clone())
        .await
        .expect("cancel should succeed");
    assert!(list_posts(&control).await.is_empty());

    assert!(matches!(
        control.manage_scheduled_posts(cancel).await,
        Err(ControlError::Validation(message)) if message.contains("cancelled")
    ));
}

#[tokio::test]
async fn reschedule_rejects_the_past_and_unknown_ids() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);
    let scheduled = control
        .schedule_post(schedule_request("Launch day!", "2099-01-01 09:00"))
        .await
        .expect("schedule should succeed");

    let past = ManagePostsRequest {
        action: Some("modify".to_string()),
        post_id: Some(scheduled.post.id.clone()),
        schedule_time: Some("2000-01-01 09:00".to_string()),
    };
    assert!(matches!(
        control.manage_scheduled_posts(past).await,
        Err(ControlError::Validation(_))
    ));

    let unknown = ManagePostsRequest {
        action: Some("reschedule".to_string()),
        post_id: Some("nope".to_string()),
        schedule_time: Some("2099-02-01 09:00".to_string()),
    };
    assert!(matches!(
        control.manage_scheduled_posts(unknown).await,
        Err(ControlError::NotFound(_))
    ));

    let later = ManagePostsRequest {
        action: Some("reschedule".to_string()),
        post_id: Some(scheduled.post.id),
        schedule_time: Some("2099-02-01T10:30".to_string()),
    };
    match control.manage_scheduled_posts(later).await {
        Ok(ManagePostsReport::Reschedule {
            post,
            previous_schedule_time,
            ..
        }) => {
            assert_eq!(post.schedule_time, "2099-02-01 10:30");
            assert_eq!(previous_schedule_time, "2099-01-01 09:00");
        }
        other => panic!("expected reschedule report, got {other:?}"),
    }
}

#[tokio::test]
async fn corrupt_posts_document_reads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(DOC_SCHEDULED_POSTS), b"{ not json").expect("write");
    let control = control_plane(&dir);

    assert!(list_posts(&control).await.is_empty());
    control
        .schedule_post(schedule_request("Fresh start", "2099-01-01 09:00"))
        .await
        .expect("schedule should replace the corrupt document");
    assert_eq!(list_posts(&control).await.len(), 1);

    let backup = std::fs::read(dir.path().join(format!("{DOC_SCHEDULED_POSTS}.corrupt")))
        .expect("corrupt document kept aside");
    assert_eq!(backup, b"{ not json");
}

#[tokio::test]
async fn posts_saved_with_naive_timestamps_survive_new_writes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let legacy = r#"[
  {
    "id": "ab12cd34",
    "content": "Spring launch",
    "platforms": ["twitter", "instagram"],
    "schedule_time": "2099-05-01 09:30",
    "media_url": "",
    "status": "scheduled",
    "created_at": "2024-05-01T10:11:12.123456",
    "posted_at": null
  }
]"#;
    std::fs::write(dir.path().join(DOC_SCHEDULED_POSTS), legacy).expect("write");
    let control = control_plane(&dir);

    assert_eq!(list_posts(&control).await, vec!["ab12cd34".to_string()]);

    let fresh = control
        .schedule_post(schedule_request("Summer teaser", "2099-06-01 12:00"))
        .await
        .expect("schedule should succeed");
    let ids = list_posts(&control).await;
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"ab12cd34".to_string()));
    assert!(ids.contains(&fresh.post.id));

    let on_disk = std::fs::read_to_string(dir.path().join(DOC_SCHEDULED_POSTS)).expect("read");
    assert!(on_disk.contains("ab12cd34"));
    assert!(!dir.path().join(format!("{DOC_SCHEDULED_POSTS}.corrupt")).exists());
}

#[tokio::test]
async fn hashtags_fall_back_to_rules_with_exact_count() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = unreachable_control_plane(&dir);

    let report = control
        .generate_hashtags(HashtagRequest {
            content: "AI tools".to_string(),
            platform: Some("instagram".to_string()),
            count: Some(5),
        })
        .await
        .expect("hashtags should succeed");

    assert_eq!(report.hashtags.len(), 5);
    assert!(report.hashtags.iter().all(|tag| tag.starts_with('#')));
    assert_eq!(report.generated_by, GeneratedBy::Rules);

    assert!(matches!(
        control
            .generate_hashtags(HashtagRequest {
                content: "AI tools".to_string(),
                platform: None,
                count: Some(21),
            })
            .await,
        Err(ControlError::Validation(_))
    ));
}

#[tokio::test]
async fn advanced_hashtags_carry_analysis() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);
    let report = control
        .generate_advanced_hashtags(&AdvancedHashtagRequest {
            content: "Our new fitness workout plan is amazing".to_string(),
            platform: Some("instagram".to_string()),
            count: Some(12),
            strategy: Some("niche".to_string()),
        })
        .expect("advanced hashtags should succeed");

    assert!(!report.result.hashtags.is_empty());
    assert!(report.result.hashtags.len() <= 12);
    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["strategy"], "niche");
    assert!(value["analysis"]["keywords"].is_array());
}

#[tokio::test]
async fn repeated_trend_lookups_are_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);
    let request = TrendsRequest {
        platform: Some("twitter".to_string()),
        category: Some("technology".to_string()),
        location: Some("US".to_string()),
    };

    let first = control.get_trending_topics(&request).await.expect("trends");
    let second = control.get_trending_topics(&request).await.expect("trends");
    assert_eq!(first.source, DataSource::Mocked);
    assert_eq!(
        serde_json::to_vec(&first).expect("serialize"),
        serde_json::to_vec(&second).expect("serialize")
    );
    assert!(dir.path().join(DocumentKind::Trends.file_name()).exists());
}

#[tokio::test]
async fn analytics_for_all_covers_each_platform_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);
    let report = control
        .get_analytics(&AnalyticsRequest {
            platform: "all".to_string(),
            timeframe: Some("30d".to_string()),
            metric_type: None,
        })
        .await
        .expect("analytics should succeed");

    let platforms: BTreeSet<Platform> = report.platforms.iter().map(|row| row.platform).collect();
    assert_eq!(report.platforms.len(), Platform::ALL.len());
    assert_eq!(platforms.len(), Platform::ALL.len());
    let totals = report.totals.expect("totals for several platforms");
    assert_eq!(totals.platforms, Platform::ALL.len());
    assert_eq!(
        totals.followers,
        report.platforms.iter().filter_map(|row| row.followers).sum::<u64>()
    );

    let cache: AnalyticsCache = control.store().load(DocumentKind::Analytics).await;
    assert_eq!(cache.len(), Platform::ALL.len());
    assert!(cache.contains_key("twitter|30d|all"));
}

#[tokio::test]
async fn unreachable_platforms_yield_mocked_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = unreachable_control_plane(&dir);
    let report = control
        .get_analytics(&AnalyticsRequest {
            platform: "facebook".to_string(),
            timeframe: Some("7d".to_string()),
            metric_type: Some("reach".to_string()),
        })
        .await
        .expect("analytics should degrade, not fail");

    assert_eq!(report.platforms.len(), 1);
    assert_eq!(report.platforms[0].source, DataSource::Mocked);
    assert!(report.platforms[0].reach.is_some());
    assert!(report.platforms[0].engagement.is_none());
    assert!(report.totals.is_none());

    let trends = control
        .get_trending_topics(&TrendsRequest {
            platform: Some("twitter".to_string()),
            ..TrendsRequest::default()
        })
        .await
        .expect("trends should degrade, not fail");
    assert_eq!(trends.source, DataSource::Mocked);
}

#[tokio::test]
async fn competitors_are_unique_by_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);

    let first = control
        .manage_competitors(&competitor_request("add", Some("Acme")))
        .await
        .expect("add");
    assert!(matches!(first, CompetitorReport::Add { already_tracked: false, .. }));
    let second = control
        .manage_competitors(&CompetitorRequest {
            platforms: Some("twitter:@acme".to_string()),
            ..competitor_request("add", Some("acme"))
        })
        .await
        .expect("add again");
    match second {
        CompetitorReport::Add {
            competitor,
            already_tracked,
        } => {
            assert!(already_tracked);
            assert_eq!(competitor.name, "Acme");
            assert_eq!(competitor.platforms.len(), 1);
        }
        other => panic!("expected add report, got {other:?}"),
    }

    match control
        .manage_competitors(&competitor_request("list", None))
        .await
        .expect("list")
    {
        CompetitorReport::List { competitors, total } => {
            assert_eq!(total, 1);
            assert_eq!(competitors[0].name, "Acme");
        }
        other => panic!("expected list report, got {other:?}"),
    }
}

#[tokio::test]
async fn competitor_analysis_and_comparison() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);
    for (name, handles) in [("Acme", "twitter:@acme,instagram:@acme"), ("Globex", "linkedin:globex")] {
        control
            .manage_competitors(&CompetitorRequest {
                platforms: Some(handles.to_string()),
                ..competitor_request("add", Some(name))
            })
            .await
            .expect("add");
    }

    let analyzed = control
        .manage_competitors(&competitor_request("analyze", Some("ACME")))
        .await
        .expect("analyze");
    assert!(matches!(analyzed, CompetitorReport::Analyze { ref analysis, .. } if analysis.metrics.len() == 2));

    let compared = control
        .manage_competitors(&CompetitorRequest {
            competitors_to_compare: Some("Acme, Globex, Initech".to_string()),
            ..competitor_request("compare", None)
        })
        .await
        .expect("compare");
    match compared {
        CompetitorReport::Compare {
            competitors,
            not_found,
        } => {
            assert_eq!(competitors.len(), 2);
            assert!(competitors[0].analyzed);
            assert!(!competitors[1].analyzed);
            assert_eq!(not_found, vec!["Initech".to_string()]);
        }
        other => panic!("expected compare report, got {other:?}"),
    }

    assert!(matches!(
        control
            .manage_competitors(&competitor_request("remove", Some("Initech")))
            .await,
        Err(ControlError::NotFound(_))
    ));
    control
        .manage_competitors(&competitor_request("remove", Some("globex")))
        .await
        .expect("remove");
    assert!(matches!(
        control
            .manage_competitors(&CompetitorRequest {
                competitors_to_compare: Some("Acme, Globex".to_string()),
                ..competitor_request("compare", None)
            })
            .await,
        Err(ControlError::NotFound(_))
    ));
}

#[tokio::test]
async fn content_tools_use_templates_without_ai() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);

    let suggestion = control
        .create_content_suggestion(&ContentSuggestionRequest {
            platform: "linkedin".to_string(),
            content_type: "informative".to_string(),
            topic: "remote work".to_string(),
        })
        .await
        .expect("suggestion");
    assert_eq!(suggestion.suggestions.len(), 3);
    assert_eq!(suggestion.generated_by, GeneratedBy::Template);

    let calendar = control
        .create_content_calendar(&ContentCalendarRequest {
            platform: "twitter".to_string(),
            days: Some(10),
            focus_topics: Some("rust, async".to_string()),
        })
        .await
        .expect("calendar");
    assert_eq!(calendar.entries.len(), 10);
    assert_eq!(calendar.total_days, 10);
    assert!(
        calendar
            .entries
            .iter()
            .all(|entry| entry.topic == "rust" || entry.topic == "async")
    );

    assert!(matches!(
        control
            .create_content_calendar(&ContentCalendarRequest {
                platform: "twitter".to_string(),
                days: Some(31),
                focus_topics: None,
            })
            .await,
        Err(ControlError::Validation(_))
    ));
}

#[tokio::test]
async fn audience_insights_select_a_section() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_plane(&dir);
    let report = control
        .get_audience_insights(&AudienceRequest {
            platform: "instagram".to_string(),
            insight_type: Some("growth".to_string()),
        })
        .expect("audience");
    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["source"], "mocked");
    assert!(value["growth"]["follower_count"].is_number());
    assert!(value.get("demographics").is_none());

    assert!(matches!(
        control.get_audience_insights(&AudienceRequest {
            platform: "myspace".to_string(),
            insight_type: None,
        }),
        Err(ControlError::Validation(message)) if message.contains("Valid options")
    ));
}
