use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use social_store::schema::{POST_ID_LEN, SCHEDULE_TIME_FORMAT};
use social_store::{Platform, PostStatus, PostsDocument, ScheduledPost};
use tracing::info;
use uuid::Uuid;

use crate::params::{PostAction, parse_platform_list};
use crate::store::DocumentKind;

use super::{ControlError, SocialControlPlane, keyword_or, non_blank, required};

/// Formats accepted for `schedule_time`, tried in order.
const ACCEPTED_FORMATS: [&str; 3] = [SCHEDULE_TIME_FORMAT, "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulePostRequest {
    pub content: String,
    pub platforms: String,
    pub schedule_time: String,
    #[serde(default)]
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduledPostReport {
    pub post: ScheduledPost,
    pub time_until: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagePostsRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub schedule_time: Option<String>,
}

/// A pending post with its countdown.
#[derive(Debug, Clone, Serialize)]
pub struct PendingPost {
    #[serde(flatten)]
    pub post: ScheduledPost,
    pub time_until: String,
    pub overdue: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ManagePostsReport {
    List {
        posts: Vec<PendingPost>,
        total: usize,
    },
    Cancel {
        post: ScheduledPost,
    },
    Reschedule {
        post: ScheduledPost,
        previous_schedule_time: String,
        time_until: String,
    },
}

impl SocialControlPlane {
    /// Records a post for later publication. Nothing is ever published.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for empty content, unknown
    /// platforms or a malformed or past `schedule_time`, and
    /// `ControlError::Store` if the post cannot be persisted.
    pub async fn schedule_post(
        &self,
        request: SchedulePostRequest,
    ) -> Result<ScheduledPostReport, ControlError> {
        let content = required("content", Some(request.content.as_str()))?.to_string();
        let platforms: Vec<Platform> = parse_platform_list(&request.platforms)?;
        let now = Local::now().naive_local();
        let scheduled_at = parse_future_time(&request.schedule_time, now)?;
        let media_url = non_blank(request.media_url.as_deref()).map(ToString::to_string);

        let post = self
            .store
            .update(DocumentKind::Posts, |posts: &mut PostsDocument| {
                let post = ScheduledPost {
                    id: fresh_post_id(posts),
                    content,
                    platforms,
                    schedule_time: scheduled_at.format(SCHEDULE_TIME_FORMAT).to_string(),
                    media_url,
                    status: PostStatus::Pending,
                    created_at: Utc::now(),
                    updated_at: None,
                    cancelled_at: None,
                    posted_at: None,
                };
                posts.push(post.clone());
                Ok::<_, ControlError>(post)
            })
            .await?;

        info!(post_id = %post.id, schedule_time = %post.schedule_time, "post scheduled");
        Ok(ScheduledPostReport {
            time_until: describe_until(scheduled_at - now),
            post,
        })
    }

    /// Lists, cancels or reschedules posts. `list` defaults when no action is
    /// given.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for bad parameters or a post that
    /// is no longer pending, `ControlError::NotFound` for an unknown id, and
    /// `ControlError::Store` if the change cannot be persisted.
    pub async fn manage_scheduled_posts(
        &self,
        request: ManagePostsRequest,
    ) -> Result<ManagePostsReport, ControlError> {
        let action = keyword_or(request.action.as_deref(), PostAction::List)?;
        match action {
            PostAction::List => Ok(self.list_pending_posts().await),
            PostAction::Cancel => {
                let post_id = required("post_id", request.post_id.as_deref())?;
                self.cancel_post(post_id).await
            }
            PostAction::Reschedule => {
                let post_id = required("post_id", request.post_id.as_deref())?;
                let schedule_time = required("schedule_time", request.schedule_time.as_deref())?;
                self.reschedule_post(post_id, schedule_time).await
            }
        }
    }

    async fn list_pending_posts(&self) -> ManagePostsReport {
        let posts: PostsDocument = self.store.load(DocumentKind::Posts).await;
        let now = Local::now().naive_local();
        let posts: Vec<PendingPost> = posts
            .into_iter()
            .filter(|post| post.status.is_pending())
            .map(|post| {
                let remaining = post.scheduled_at().map(|at| at - now);
                let overdue = remaining.is_none_or(|delta| delta <= TimeDelta::zero());
                PendingPost {
                    time_until: remaining
                        .filter(|_| !overdue)
                        .map_or_else(|| "overdue".to_string(), describe_until),
                    overdue,
                    post,
                }
            })
            .collect();
        ManagePostsReport::List {
            total: posts.len(),
            posts,
        }
    }

    async fn cancel_post(&self, post_id: &str) -> Result<ManagePostsReport, ControlError> {
        let post = self
            .store
            .update(DocumentKind::Posts, |posts: &mut PostsDocument| {
                let post = pending_post_mut(posts, post_id, "cancelled")?;
                let now = Utc::now();
                post.status = PostStatus::Cancelled;
                post.cancelled_at = Some(now);
                post.updated_at = Some(now);
                Ok::<_, ControlError>(post.clone())
            })
            .await?;
        info!(post_id, "post cancelled");
        Ok(ManagePostsReport::Cancel { post })
    }

    async fn reschedule_post(
        &self,
        post_id: &str,
        schedule_time: &str,
    ) -> Result<ManagePostsReport, ControlError> {
        let now = Local::now().naive_local();
        let scheduled_at = parse_future_time(schedule_time, now)?;
        let (post, previous) = self
            .store
            .update(DocumentKind::Posts, |posts: &mut PostsDocument| {
                let post = pending_post_mut(posts, post_id, "rescheduled")?;
                let previous = std::mem::replace(
                    &mut post.schedule_time,
                    scheduled_at.format(SCHEDULE_TIME_FORMAT).to_string(),
                );
                post.updated_at = Some(Utc::now());
                Ok::<_, ControlError>((post.clone(), previous))
            })
            .await?;
        info!(post_id, schedule_time = %post.schedule_time, "post rescheduled");
        Ok(ManagePostsReport::Reschedule {
            post,
            previous_schedule_time: previous,
            time_until: describe_until(scheduled_at - now),
        })
    }
}

fn pending_post_mut<'a>(
    posts: &'a mut PostsDocument,
    post_id: &str,
    verb: &str,
) -> Result<&'a mut ScheduledPost, ControlError> {
    let post = posts
        .iter_mut()
        .find(|post| post.id == post_id)
        .ok_or_else(|| ControlError::NotFound(format!("no scheduled post found with id {post_id}")))?;
    if !post.status.is_pending() {
        return Err(ControlError::Validation(format!(
            "post {post_id} is {} and cannot be {verb}",
            status_label(post.status)
        )));
    }
    Ok(post)
}

const fn status_label(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Pending => "pending",
        PostStatus::Posted => "posted",
        PostStatus::Failed => "failed",
        PostStatus::Cancelled => "cancelled",
    }
}

fn fresh_post_id(posts: &PostsDocument) -> String {
    loop {
        let id: String = Uuid::new_v4().simple().to_string().chars().take(POST_ID_LEN).collect();
        if !posts.iter().any(|post| post.id == id) {
            return id;
        }
    }
}

/// Parses a local wall-clock time (or an RFC 3339 timestamp, converted to
/// local time) and requires it to be after `now`.
pub(crate) fn parse_future_time(raw: &str, now: NaiveDateTime) -> Result<NaiveDateTime, ControlError> {
    let raw = raw.trim();
    let parsed = ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|at| at.with_timezone(&Local).naive_local())
        })
        .ok_or_else(|| {
            ControlError::Validation(format!(
                "invalid schedule_time '{raw}'. Use YYYY-MM-DD HH:MM (e.g. 2030-12-25 14:30)"
            ))
        })?;
    if parsed <= now {
        return Err(ControlError::Validation(
            "schedule_time must be in the future".to_string(),
        ));
    }
    Ok(parsed)
}

/// Renders a positive duration as `2d 3h 15m`, or `<1m`.
pub(crate) fn describe_until(delta: TimeDelta) -> String {
    let days = delta.num_days();
    let hours = delta.num_hours() % 24;
    let minutes = delta.num_minutes() % 60;
    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();
    if parts.is_empty() {
        "<1m".to_string()
    } else {
        parts.join(" ")
    }
}
