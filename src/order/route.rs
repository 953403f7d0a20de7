use crate::error::AppError;
use crate::order::extract::{extract_username, extract_video_id};

const INVALID_TIKTOK_VIDEO: &str = "Invalid TikTok URL / could not extract video id";
const INVALID_TIKTOK_ACCOUNT: &str = "Invalid TikTok account URL / could not extract username";
const MISSING_URL: &str = "Missing url";

/// How a route derives the extra form fields sent alongside the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `videoId` extracted from the post URL.
    VideoId,
    /// `username` extracted from the account URL.
    Username,
    /// A constant `username` value.
    FixedUsername(&'static str),
    /// No extra fields; the link alone identifies the target.
    Link,
}

#[derive(Debug)]
pub struct OrderRoute {
    pub platform: &'static str,
    pub action: &'static str,
    /// Upstream service code
    pub service: u32,
    pub target: Target,
    pub invalid_message: &'static str,
}

pub static ROUTES: &[OrderRoute] = &[
    OrderRoute {
        platform: "tiktok",
        action: "views",
        service: 229,
        target: Target::VideoId,
        invalid_message: INVALID_TIKTOK_VIDEO,
    },
    OrderRoute {
        platform: "tiktok",
        action: "likes",
        service: 232,
        target: Target::VideoId,
        invalid_message: INVALID_TIKTOK_VIDEO,
    },
    OrderRoute {
        platform: "tiktok",
        action: "followers",
        service: 228,
        target: Target::Username,
        invalid_message: INVALID_TIKTOK_ACCOUNT,
    },
    OrderRoute {
        platform: "instagram",
        action: "views",
        service: 237,
        target: Target::Link,
        invalid_message: MISSING_URL,
    },
    OrderRoute {
        platform: "youtube",
        action: "views",
        service: 245,
        target: Target::Link,
        invalid_message: MISSING_URL,
    },
    OrderRoute {
        platform: "twitter",
        action: "views",
        service: 231,
        target: Target::Link,
        invalid_message: MISSING_URL,
    },
    OrderRoute {
        platform: "facebook",
        action: "boost",
        service: 244,
        target: Target::FixedUsername("share"),
        invalid_message: MISSING_URL,
    },
    OrderRoute {
        platform: "telegram",
        action: "views",
        service: 248,
        target: Target::Link,
        invalid_message: MISSING_URL,
    },
];

pub fn find_route(platform: &str, action: &str) -> Option<&'static OrderRoute> {
    ROUTES
        .iter()
        .find(|route| route.platform == platform && route.action == action)
}

impl OrderRoute {
    pub fn path(&self) -> String {
        format!("/api/{}/{}", self.platform, self.action)
    }

    /// Derive the extra form fields for `url`, rejecting empty or
    /// unrecognised links with the route's client error.
    pub fn extra_fields(&self, url: &str) -> Result<Vec<(&'static str, String)>, AppError> {
        if url.is_empty() {
            return Err(self.invalid());
        }

        let fields = match self.target {
            Target::VideoId => {
                let video_id = extract_video_id(url).ok_or_else(|| self.invalid())?;
                vec![("videoId", video_id)]
            }
            Target::Username => {
                let username = extract_username(url).ok_or_else(|| self.invalid())?;
                vec![("username", username)]
            }
            Target::FixedUsername(username) => vec![("username", username.to_string())],
            Target::Link => Vec::new(),
        };

        Ok(fields)
    }

    fn invalid(&self) -> AppError {
        AppError::BadRequest(self.invalid_message.to_string())
    }
}
