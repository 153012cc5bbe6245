//! Tools the voice agent can invoke. Each tool shapes a request for the
//! Calendar API and flattens the response into an [`Envelope`].
//!
//! Tools never fail from the caller's point of view: upstream errors,
//! transport errors and bad arguments all come back as
//! `{"success": false, "error": "..."}`.

pub mod appointments;
pub mod availability;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::calendar::{ApiError, CalendarApiClient};

pub use appointments::{
    BookAppointmentTool, CancelAppointmentTool, MarkNoShowTool, MarkReminderSentTool,
    RescheduleAppointmentTool, UpcomingAppointmentsTool,
};
pub use availability::{CheckAvailabilityRangeTool, CheckAvailabilityTool};

/// Flat success/error response handed back to the agent.
#[derive(Debug, Serialize, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            data: None,
        }
    }

    /// A failure that still carries a (usually empty) payload so callers
    /// can read the same fields regardless of outcome.
    pub fn failed_with(error: impl ToString, data: T) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            data: Some(data),
        }
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn into_value(self) -> Value {
        serde_json::to_value(self)
            .unwrap_or_else(|err| json!({"success": false, "error": err.to_string()}))
    }
}

/// Deserialize a Calendar API body into the typed shape a tool expects.
pub(crate) fn parse_response<R: DeserializeOwned>(value: Value) -> Result<R, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

pub(crate) fn parse_args<A: DeserializeOwned>(args: Value) -> Result<A, String> {
    serde_json::from_value(args).map_err(|err| format!("Invalid arguments: {}", err))
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn non_zero(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

// Tool definitions, serialized as JSON-schema function declarations

#[derive(Serialize)]
pub struct Property {
    pub r#type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,
}

impl Property {
    pub fn string(description: &str) -> Self {
        Self {
            r#type: String::from("string"),
            description: description.to_string(),
            items: None,
        }
    }

    pub fn integer(description: &str) -> Self {
        Self {
            r#type: String::from("integer"),
            description: description.to_string(),
            items: None,
        }
    }

    pub fn string_array(description: &str) -> Self {
        Self {
            r#type: String::from("array"),
            description: description.to_string(),
            items: Some(Box::new(Self::string("A date expression"))),
        }
    }
}

#[derive(Serialize)]
pub struct Parameters<Props: Serialize> {
    pub r#type: String,
    pub properties: Props,
    pub required: Vec<String>,
    #[serde(rename = "additionalProperties")]
    pub additional_properties: bool,
}

#[derive(Serialize)]
pub struct Function<Props: Serialize> {
    pub name: String,
    pub description: String,
    pub parameters: Parameters<Props>,
}

impl<Props: Serialize> Function<Props> {
    pub fn new(name: &str, description: &str, properties: Props, required: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters: Parameters {
                r#type: String::from("object"),
                properties,
                required: required.iter().map(|r| r.to_string()).collect(),
                additional_properties: false,
            },
        }
    }
}

#[derive(Serialize)]
pub enum ToolType {
    #[serde(rename = "function")]
    Function,
}

/// Props for tools that only take an appointment id.
#[derive(Serialize)]
pub struct AppointmentIdProps {
    pub appointment_id: Property,
}

impl AppointmentIdProps {
    fn new() -> Self {
        Self {
            appointment_id: Property::string("The appointment ID returned when it was booked."),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppointmentIdArgs {
    pub appointment_id: String,
}

// `serde::Serialize` is not object safe, `erased_serde` lets the tool
// list be serialized while still dispatching dynamically.
#[async_trait]
pub trait AgentTool: erased_serde::Serialize {
    /// Run the tool with a JSON object of arguments and return its envelope.
    async fn call(&self, args: Value) -> Value;
    fn function_name(&self) -> String;
}
erased_serde::serialize_trait_object!(AgentTool);

pub type BoxedAgentTool = Box<dyn AgentTool + Send + Sync + 'static>;

/// Every tool exposed to the agent, all talking to the same Calendar API.
pub fn all_tools(client: &CalendarApiClient) -> Vec<BoxedAgentTool> {
    vec![
        Box::new(CheckAvailabilityTool::new(client.clone())),
        Box::new(CheckAvailabilityRangeTool::new(client.clone())),
        Box::new(BookAppointmentTool::new(client.clone())),
        Box::new(CancelAppointmentTool::new(client.clone())),
        Box::new(RescheduleAppointmentTool::new(client.clone())),
        Box::new(MarkReminderSentTool::new(client.clone())),
        Box::new(MarkNoShowTool::new(client.clone())),
        Box::new(UpcomingAppointmentsTool::new(client.clone())),
    ]
}

pub fn find_tool<'a>(tools: &'a [BoxedAgentTool], name: &str) -> Option<&'a BoxedAgentTool> {
    tools.iter().find(|tool| tool.function_name() == name)
}
