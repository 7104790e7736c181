use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Severity of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }
}

/// An append-only audit record of a sensitive administrative action.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct SystemLog {
    pub id: Uuid,
    pub level: LogLevel,
    pub action: String,
    pub actor_email: String,
    pub target: Option<String>,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LogQuery {
    pub limit: Option<i64>,
    pub level: Option<LogLevel>,
    pub search: Option<String>,
}

/// Dashboard counters the audit view renders alongside the entries.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogStats {
    pub total_events: i64,
    pub security_alerts: i64,
    pub critical_failures: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogsResponse {
    pub items: Vec<SystemLog>,
    pub stats: LogStats,
}
