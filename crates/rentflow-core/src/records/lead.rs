//! Lead records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;

/// Contact request submitted by the public site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LeadRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl LeadRequest {
    /// Validates the request and converts it into an unsaved lead.
    pub fn into_lead(self, created_at: DateTime<Utc>) -> AppResult<Lead> {
        self.validate()?;

        Ok(Lead {
            id: None,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            message: self.message,
            vehicle_id: self.vehicle_id,
            source: self
                .source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(default_source),
            status: default_status(),
            created_at,
        })
    }
}

/// A persisted lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

fn default_source() -> String {
    "website".to_string()
}

fn default_status() -> String {
    "new".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let request = LeadRequest {
            name: Some("Jane".to_string()),
            email: Some("jane@x.com".to_string()),
            ..Default::default()
        };

        let lead = request.into_lead(Utc::now()).unwrap();
        assert_eq!(lead.source, "website");
        assert_eq!(lead.status, "new");
        assert!(lead.phone.is_none());
    }

    #[test]
    fn test_missing_email_rejected() {
        let request = LeadRequest {
            name: Some("Jane".to_string()),
            ..Default::default()
        };

        let err = request.into_lead(Utc::now()).unwrap_err();
        assert_eq!(err.message, "Missing required fields: email");
    }
}
