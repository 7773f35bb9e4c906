//! Hook points, typed hook payloads, and dispatch outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rentflow_core::error::{AppError, AppResult};
use rentflow_core::records::{AdTrack, Booking, Lead, Message, Payment, Task, VehicleUpdate};

/// The fixed set of lifecycle events plugins may subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookPoint {
    /// A booking was persisted.
    OnBooking,
    /// A lead was persisted.
    OnLead,
    /// A payment was recorded.
    OnPayment,
    /// A chat message was sent or received.
    OnMessage,
    /// An advertising conversion should be tracked.
    OnAdTrack,
    /// A dashboard task was created.
    OnTaskCreate,
    /// A fleet vehicle changed.
    OnVehicleUpdate,
}

impl HookPoint {
    /// Every hook point, in declaration order.
    pub const ALL: [HookPoint; 7] = [
        Self::OnBooking,
        Self::OnLead,
        Self::OnPayment,
        Self::OnMessage,
        Self::OnAdTrack,
        Self::OnTaskCreate,
        Self::OnVehicleUpdate,
    ];

    /// Returns the wire name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnBooking => "onBooking",
            Self::OnLead => "onLead",
            Self::OnPayment => "onPayment",
            Self::OnMessage => "onMessage",
            Self::OnAdTrack => "onAdTrack",
            Self::OnTaskCreate => "onTaskCreate",
            Self::OnVehicleUpdate => "onVehicleUpdate",
        }
    }

    /// Looks up a hook point by wire name. Matching is exact.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|hook| hook.as_str() == name)
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookPoint {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::validation(format!("Unknown hook '{s}'")))
    }
}

/// Data passed to the handlers of one hook.
///
/// Each hook point has exactly one payload variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HookPayload {
    Booking(Booking),
    Lead(Lead),
    Payment(Payment),
    Message(Message),
    AdTrack(AdTrack),
    Task(Task),
    VehicleUpdate(VehicleUpdate),
}

impl HookPayload {
    /// The hook point this payload belongs to.
    pub fn hook(&self) -> HookPoint {
        match self {
            Self::Booking(_) => HookPoint::OnBooking,
            Self::Lead(_) => HookPoint::OnLead,
            Self::Payment(_) => HookPoint::OnPayment,
            Self::Message(_) => HookPoint::OnMessage,
            Self::AdTrack(_) => HookPoint::OnAdTrack,
            Self::Task(_) => HookPoint::OnTaskCreate,
            Self::VehicleUpdate(_) => HookPoint::OnVehicleUpdate,
        }
    }

    /// Decodes untyped JSON into the payload schema of `hook`.
    pub fn from_json(hook: HookPoint, data: Value) -> AppResult<Self> {
        let payload = match hook {
            HookPoint::OnBooking => Self::Booking(decode(hook, data)?),
            HookPoint::OnLead => Self::Lead(decode(hook, data)?),
            HookPoint::OnPayment => Self::Payment(decode(hook, data)?),
            HookPoint::OnMessage => Self::Message(decode(hook, data)?),
            HookPoint::OnAdTrack => Self::AdTrack(decode(hook, data)?),
            HookPoint::OnTaskCreate => Self::Task(decode(hook, data)?),
            HookPoint::OnVehicleUpdate => Self::VehicleUpdate(decode(hook, data)?),
        };
        Ok(payload)
    }

    /// Returns the payload as JSON.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn decode<T: serde::de::DeserializeOwned>(hook: HookPoint, data: Value) -> AppResult<T> {
    serde_json::from_value(data)
        .map_err(|e| AppError::validation(format!("Invalid {hook} payload: {e}")))
}

impl From<Booking> for HookPayload {
    fn from(booking: Booking) -> Self {
        Self::Booking(booking)
    }
}

impl From<Lead> for HookPayload {
    fn from(lead: Lead) -> Self {
        Self::Lead(lead)
    }
}

/// What happened when one plugin handled a hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The handler's return value.
    Result(Value),
    /// The handler's error or panic message.
    Error(String),
}

/// One entry of a trigger result: `{plugin, result}` or `{plugin, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookOutcome {
    pub plugin: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl HookOutcome {
    pub fn success(plugin: &str, value: Value) -> Self {
        Self {
            plugin: plugin.to_string(),
            outcome: Outcome::Result(value),
        }
    }

    pub fn failure(plugin: &str, message: impl Into<String>) -> Self {
        Self {
            plugin: plugin.to_string(),
            outcome: Outcome::Error(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

/// Ordered outcomes of one trigger, in subscription order.
pub type TriggerResult = Vec<HookOutcome>;
