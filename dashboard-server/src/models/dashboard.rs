//! Dashboard request/response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use remediation_core::logic::refresh::RefreshTrigger;
use remediation_core::logic::session::{ParamsChange, ParamsUpdate};
use remediation_core::logic::view::{ActiveView, DashboardParams};

use crate::{AppError, AppResult};

/// Partial parameter update; absent fields stay as they are
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateParamsRequest {
    #[validate(range(min = 1, max = 365))]
    pub days: Option<u32>,

    #[validate(length(max = 256))]
    pub filter_text: Option<String>,

    pub active_view: Option<String>,

    pub auto_refresh_enabled: Option<bool>,

    #[validate(range(min = 5, max = 3600))]
    pub refresh_interval_secs: Option<u64>,
}

impl UpdateParamsRequest {
    pub fn into_update(self) -> AppResult<ParamsUpdate> {
        self.validate()?;

        let active_view = self
            .active_view
            .as_deref()
            .map(parse_view)
            .transpose()?;

        Ok(ParamsUpdate {
            days: self.days,
            filter_text: self.filter_text,
            active_view,
            auto_refresh_enabled: self.auto_refresh_enabled,
            refresh_interval_secs: self.refresh_interval_secs,
        })
    }
}

pub fn parse_view(view: &str) -> AppResult<ActiveView> {
    ActiveView::parse(view)
        .ok_or_else(|| AppError::ValidationError(format!("Unknown view: {}", view)))
}

#[derive(Debug, Serialize)]
pub struct UpdateParamsResponse {
    pub params: DashboardParams,
    pub refresh_requested: bool,
    pub schedule_changed: bool,
}

impl UpdateParamsResponse {
    pub fn new(params: DashboardParams, change: ParamsChange) -> Self {
        Self {
            params,
            refresh_requested: change.data_changed,
            schedule_changed: change.schedule_changed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshAccepted {
    pub accepted: bool,
    #[serde(flatten)]
    pub trigger: RefreshTrigger,
}
