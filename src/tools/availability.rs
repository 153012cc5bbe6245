use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AgentTool, Envelope, Function, Property, ToolType, non_zero, parse_args, parse_response};
use crate::calendar::CalendarApiClient;
use crate::calendar::types::{AvailabilityRangeResponse, AvailabilityResponse, Slot};

const CHECK_AVAILABILITY_PATH: &str = "/api/calendar/check-availability";
const CHECK_AVAILABILITY_RANGE_PATH: &str = "/api/calendar/check-availability-range";

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AvailabilityRequest {
    /// `YYYY-MM-DD` or natural language such as "tomorrow"
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AvailabilityRangeRequest {
    pub dates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OpenSlot {
    pub time: String,
    pub start: String,
}

impl From<Slot> for OpenSlot {
    fn from(slot: Slot) -> Self {
        Self {
            time: slot.formatted_time,
            start: slot.start,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Availability {
    pub date: Option<String>,
    pub formatted_date: Option<String>,
    pub available_slots: Vec<OpenSlot>,
    pub total_slots: usize,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DateAvailability {
    pub date: Option<String>,
    pub formatted_date: Option<String>,
    pub available_slots: Vec<OpenSlot>,
    pub total_slots: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RangeAvailability {
    pub dates: Vec<DateAvailability>,
    pub total_slots: usize,
    pub message: Option<String>,
}

fn open_slots(slots: Vec<Slot>) -> Vec<OpenSlot> {
    slots.into_iter().map(OpenSlot::from).collect()
}

/// Check the doctor's open slots on a single day. Past dates come back
/// as a successful, empty result.
pub async fn check_availability(
    client: &CalendarApiClient,
    req: AvailabilityRequest,
) -> Envelope<Availability> {
    let body = AvailabilityRequest {
        duration_minutes: non_zero(req.duration_minutes),
        ..req
    };

    let resp = client
        .post(CHECK_AVAILABILITY_PATH, &body)
        .await
        .and_then(parse_response::<AvailabilityResponse>);

    match resp {
        Ok(resp) => {
            let available_slots = open_slots(resp.available_slots);
            Envelope::ok(Availability {
                date: resp.date,
                formatted_date: resp.formatted_date,
                total_slots: available_slots.len(),
                available_slots,
                message: resp.message,
            })
        }
        Err(err) => Envelope::failed(err),
    }
}

/// Check several days at once, grouped per day.
pub async fn check_availability_range(
    client: &CalendarApiClient,
    req: AvailabilityRangeRequest,
) -> Envelope<RangeAvailability> {
    let body = AvailabilityRangeRequest {
        duration_minutes: non_zero(req.duration_minutes),
        ..req
    };

    let resp = client
        .post(CHECK_AVAILABILITY_RANGE_PATH, &body)
        .await
        .and_then(parse_response::<AvailabilityRangeResponse>);

    match resp {
        Ok(resp) => {
            let dates: Vec<DateAvailability> = resp
                .dates
                .into_iter()
                .map(|day| {
                    let available_slots = open_slots(day.available_slots);
                    DateAvailability {
                        date: day.date,
                        formatted_date: day.formatted_date,
                        total_slots: available_slots.len(),
                        available_slots,
                    }
                })
                .collect();
            let total_slots = resp
                .total_slots
                .unwrap_or_else(|| dates.iter().map(|d| d.total_slots).sum());

            Envelope::ok(RangeAvailability {
                dates,
                total_slots,
                message: resp.message,
            })
        }
        Err(err) => Envelope::failed(err),
    }
}

#[derive(Serialize)]
pub struct CheckAvailabilityProps {
    pub date: Property,
    pub duration_minutes: Property,
}

#[derive(Serialize)]
pub struct CheckAvailabilityTool {
    pub r#type: ToolType,
    pub function: Function<CheckAvailabilityProps>,
    #[serde(skip)]
    client: CalendarApiClient,
}

#[async_trait]
impl AgentTool for CheckAvailabilityTool {
    async fn call(&self, args: Value) -> Value {
        match parse_args::<AvailabilityRequest>(args) {
            Ok(req) => check_availability(&self.client, req).await.into_value(),
            Err(err) => Envelope::<Availability>::failed(err).into_value(),
        }
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

impl CheckAvailabilityTool {
    pub fn new(client: CalendarApiClient) -> Self {
        let function = Function::new(
            "check_availability",
            "Check the doctor's available appointment slots on a given date.",
            CheckAvailabilityProps {
                date: Property::string(
                    "The date to check, as YYYY-MM-DD or natural language like 'tomorrow' or 'next monday'.",
                ),
                duration_minutes: Property::integer("Optional appointment length in minutes."),
            },
            &["date"],
        );
        Self {
            r#type: ToolType::Function,
            function,
            client,
        }
    }
}

#[derive(Serialize)]
pub struct CheckAvailabilityRangeProps {
    pub dates: Property,
    pub duration_minutes: Property,
}

#[derive(Serialize)]
pub struct CheckAvailabilityRangeTool {
    pub r#type: ToolType,
    pub function: Function<CheckAvailabilityRangeProps>,
    #[serde(skip)]
    client: CalendarApiClient,
}

#[async_trait]
impl AgentTool for CheckAvailabilityRangeTool {
    async fn call(&self, args: Value) -> Value {
        match parse_args::<AvailabilityRangeRequest>(args) {
            Ok(req) => check_availability_range(&self.client, req).await.into_value(),
            Err(err) => Envelope::<RangeAvailability>::failed(err).into_value(),
        }
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

impl CheckAvailabilityRangeTool {
    pub fn new(client: CalendarApiClient) -> Self {
        let function = Function::new(
            "check_availability_range",
            "Check the doctor's available appointment slots across several dates.",
            CheckAvailabilityRangeProps {
                dates: Property::string_array(
                    "Dates to check, e.g. [\"tomorrow\", \"next monday\", \"2026-02-20\"].",
                ),
                duration_minutes: Property::integer("Optional appointment length in minutes."),
            },
            &["dates"],
        );
        Self {
            r#type: ToolType::Function,
            function,
            client,
        }
    }
}
