//! Keyword parameters accepted by the tools.
//!
//! Every enum parses case-insensitively and reports the accepted values when
//! parsing fails.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use social_store::Platform;

/// A parameter value outside its accepted set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidParam {
    pub name: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl InvalidParam {
    #[must_use]
    pub fn new(name: &'static str, value: &str, expected: &'static [&'static str]) -> Self {
        Self {
            name,
            value: value.trim().to_string(),
            expected,
        }
    }
}

impl fmt::Display for InvalidParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} '{}'. Valid options: {}",
            self.name,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl Error for InvalidParam {}

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $param:literal {
            $($variant:ident => $text:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = InvalidParam;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_lowercase();
                $(
                    if normalized == $text.to_lowercase() $(|| normalized == $alias)* {
                        return Ok(Self::$variant);
                    }
                )+
                Err(InvalidParam::new($param, value, Self::NAMES))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Analytics lookback window.
    Timeframe, "timeframe" {
        Week => "7d",
        Month => "30d",
        Quarter => "90d",
    }
}

impl Timeframe {
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }
}

keyword_enum! {
    MetricType, "metric_type" {
        Engagement => "engagement",
        Reach => "reach",
        Impressions => "impressions",
        Followers => "followers",
        All => "all",
    }
}

impl MetricType {
    #[must_use]
    pub const fn includes(self, other: Self) -> bool {
        matches!(self, Self::All) || self as u8 == other as u8
    }
}

keyword_enum! {
    /// Where trending topics are sourced from.
    TrendPlatform, "platform" {
        Twitter => "twitter" | "x",
        Instagram => "instagram",
        General => "general",
    }
}

keyword_enum! {
    TrendCategory, "category" {
        Technology => "technology",
        Business => "business",
        Entertainment => "entertainment",
        Sports => "sports",
        All => "all",
    }
}

keyword_enum! {
    TrendLocation, "location" {
        Us => "US",
        Uk => "UK",
        In => "IN",
        Global => "global",
    }
}

impl TrendLocation {
    /// Yahoo "where on earth" id used by the Twitter trends endpoint.
    #[must_use]
    pub const fn woeid(self) -> u32 {
        match self {
            Self::Us => 23_424_977,
            Self::Uk => 23_424_975,
            Self::In => 23_424_848,
            Self::Global => 1,
        }
    }
}

keyword_enum! {
    ContentType, "content_type" {
        Engagement => "engagement",
        Informative => "informative",
        Promotional => "promotional",
        Trending => "trending",
    }
}

keyword_enum! {
    InsightType, "insight_type" {
        Demographics => "demographics",
        Growth => "growth",
        Engagement => "engagement",
        Report => "report",
    }
}

keyword_enum! {
    HashtagStrategy, "strategy" {
        Trending => "trending",
        Niche => "niche",
        Mixed => "mixed",
        Branded => "branded",
    }
}

keyword_enum! {
    PostAction, "action" {
        List => "list",
        Cancel => "cancel",
        Reschedule => "reschedule" | "modify",
    }
}

keyword_enum! {
    CompetitorAction, "action" {
        Add => "add",
        Remove => "remove",
        List => "list",
        Analyze => "analyze",
        Compare => "compare",
    }
}

const PLATFORM_NAMES: &[&str] = &["twitter", "facebook", "instagram", "linkedin"];
const ANALYTICS_TARGET_NAMES: &[&str] = &["twitter", "facebook", "instagram", "linkedin", "all"];

/// Parses a single platform name.
///
/// # Errors
/// Returns `InvalidParam` when the name is not a supported platform.
pub fn parse_platform(value: &str) -> Result<Platform, InvalidParam> {
    value
        .parse::<Platform>()
        .map_err(|_| InvalidParam::new("platform", value, PLATFORM_NAMES))
}

/// Parses a comma-separated platform list, dropping duplicates while keeping
/// the caller's order.
///
/// # Errors
/// Returns `InvalidParam` naming every unknown entry, or when the list is empty.
pub fn parse_platform_list(value: &str) -> Result<Vec<Platform>, InvalidParam> {
    let mut platforms = Vec::new();
    let mut invalid = Vec::new();
    for raw in value.split(',').map(str::trim).filter(|raw| !raw.is_empty()) {
        match raw.parse::<Platform>() {
            Ok(platform) => {
                if !platforms.contains(&platform) {
                    platforms.push(platform);
                }
            }
            Err(_) => invalid.push(raw.to_string()),
        }
    }

    if !invalid.is_empty() {
        return Err(InvalidParam::new("platforms", &invalid.join(", "), PLATFORM_NAMES));
    }
    if platforms.is_empty() {
        return Err(InvalidParam::new("platforms", value, PLATFORM_NAMES));
    }
    Ok(platforms)
}

/// Resolves an analytics target: one platform, or every platform for `all`.
///
/// # Errors
/// Returns `InvalidParam` for anything else.
pub fn parse_analytics_target(value: &str) -> Result<Vec<Platform>, InvalidParam> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(Platform::ALL.to_vec());
    }
    value
        .parse::<Platform>()
        .map(|platform| vec![platform])
        .map_err(|_| InvalidParam::new("platform", value, ANALYTICS_TARGET_NAMES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_enums_parse_case_insensitively() {
        assert_eq!("30D".parse::<Timeframe>(), Ok(Timeframe::Month));
        assert_eq!("us".parse::<TrendLocation>(), Ok(TrendLocation::Us));
        assert_eq!("Modify".parse::<PostAction>(), Ok(PostAction::Reschedule));
    }

    #[test]
    fn invalid_keyword_lists_options() {
        let err = "yearly".parse::<Timeframe>().expect_err("should reject");
        assert_eq!(err.name, "timeframe");
        assert_eq!(err.to_string(), "invalid timeframe 'yearly'. Valid options: 7d, 30d, 90d");
    }

    #[test]
    fn platform_list_dedupes_and_reports_unknowns() {
        let platforms =
            parse_platform_list("Twitter, linkedin,twitter").expect("valid list should parse");
        assert_eq!(platforms, vec![Platform::Twitter, Platform::Linkedin]);

        let err = parse_platform_list("twitter, myspace, orkut").expect_err("should reject");
        assert_eq!(err.value, "myspace, orkut");

        assert!(parse_platform_list(" , ").is_err());
    }

    #[test]
    fn analytics_target_expands_all_once() {
        let platforms = parse_analytics_target("ALL").expect("all should parse");
        assert_eq!(platforms, Platform::ALL.to_vec());
    }

    #[test]
    fn metric_type_all_includes_everything() {
        assert!(MetricType::All.includes(MetricType::Reach));
        assert!(MetricType::Reach.includes(MetricType::Reach));
        assert!(!MetricType::Reach.includes(MetricType::Followers));
    }
}
