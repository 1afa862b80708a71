use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The single entity a like points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    pub fn id(&self) -> Uuid {
        match self {
            LikeTarget::Video(id) | LikeTarget::Comment(id) | LikeTarget::Tweet(id) => *id,
        }
    }

    /// Column of the `likes` table holding this kind of target.
    pub fn column(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "video",
            LikeTarget::Comment(_) => "comment",
            LikeTarget::Tweet(_) => "tweet",
        }
    }
}

/// Exactly one of `video`, `comment` and `tweet` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet: Option<Uuid>,
    pub liked_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Like {
    pub fn target(&self) -> Option<LikeTarget> {
        match (self.video, self.comment, self.tweet) {
            (Some(id), None, None) => Some(LikeTarget::Video(id)),
            (None, Some(id), None) => Some(LikeTarget::Comment(id)),
            (None, None, Some(id)) => Some(LikeTarget::Tweet(id)),
            _ => None,
        }
    }

    pub fn targets(&self, target: &LikeTarget) -> bool {
        self.target().as_ref() == Some(target)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub is_liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_requires_exactly_one_reference() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut like = Like {
            id: Uuid::new_v4(),
            video: Some(id),
            comment: None,
            tweet: None,
            liked_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(like.target(), Some(LikeTarget::Video(id)));
        assert!(like.targets(&LikeTarget::Video(id)));
        assert!(!like.targets(&LikeTarget::Comment(id)));

        like.comment = Some(Uuid::new_v4());
        assert_eq!(like.target(), None);
    }
}
