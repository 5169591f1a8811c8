use serde::{Deserialize, Serialize};

use crate::error::{PetcareError, PetcareResult};
use crate::models::de_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(alias = "_id", deserialize_with = "de_id")]
    pub id: String,
    #[serde(deserialize_with = "de_id")]
    pub pet_id: String,
    #[serde(deserialize_with = "de_id")]
    pub user_id: String,
    pub comment_text: String,
    #[serde(default)]
    pub likes_count: u64,
}

/// Body of `POST /api/comments/comment`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub pet_id: String,
    pub user_id: String,
    pub comment_text: String,
}

impl NewComment {
    pub fn validate(&self) -> PetcareResult<()> {
        if self.comment_text.trim().is_empty() {
            return Err(PetcareError::Validation("Comment cannot be empty".into()));
        }
        Ok(())
    }
}

/// Body of `POST /api/comments/like/:commentId`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub user_id: String,
}
