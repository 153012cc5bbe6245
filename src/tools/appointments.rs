use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    AgentTool, AppointmentIdArgs, AppointmentIdProps, Envelope, Function, Property, ToolType,
    non_empty, non_zero, parse_args, parse_response,
};
use crate::calendar::CalendarApiClient;
use crate::calendar::types::{AppointmentResponse, AppointmentsResponse, MessageResponse};

const APPOINTMENTS_PATH: &str = "/api/calendar/appointments";
const DEFAULT_APPOINTMENT_TYPE: &str = "checkup";

fn appointment_path(appointment_id: &str) -> String {
    format!("{}/{}", APPOINTMENTS_PATH, urlencoding::encode(appointment_id))
}

fn default_appointment_type() -> String {
    DEFAULT_APPOINTMENT_TYPE.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingRequest {
    pub patient_name: String,
    pub patient_phone: String,
    /// ISO 8601 with offset, e.g. `2026-02-15T14:00:00-05:00`
    pub appointment_datetime: String,
    /// Missing, null or blank all mean the default type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Booking {
    pub confirmation_id: Option<String>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub message: Option<String>,
}

pub async fn book_appointment(client: &CalendarApiClient, req: BookingRequest) -> Envelope<Booking> {
    let body = BookingRequest {
        appointment_type: Some(
            non_empty(req.appointment_type).unwrap_or_else(default_appointment_type),
        ),
        patient_email: non_empty(req.patient_email),
        notes: non_empty(req.notes),
        ..req
    };

    match client
        .post(APPOINTMENTS_PATH, &body)
        .await
        .and_then(parse_response::<AppointmentResponse>)
    {
        Ok(resp) => Envelope::ok(Booking {
            confirmation_id: resp.confirmation_id,
            appointment_date: resp.appointment.formatted_date,
            appointment_time: resp.appointment.formatted_time,
            message: resp.message,
        }),
        Err(err) => Envelope::failed(err),
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StatusMessage {
    pub message: Option<String>,
}

pub async fn cancel_appointment(
    client: &CalendarApiClient,
    appointment_id: &str,
) -> Envelope<StatusMessage> {
    match client
        .delete(&appointment_path(appointment_id))
        .await
        .and_then(parse_response::<MessageResponse>)
    {
        Ok(resp) => Envelope::ok(StatusMessage {
            message: Some(
                resp.message
                    .unwrap_or_else(|| String::from("Appointment cancelled successfully")),
            ),
        }),
        Err(err) => Envelope::failed(err),
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RescheduleRequest {
    pub appointment_id: String,
    pub new_datetime: String,
}

#[derive(Serialize)]
struct RescheduleBody<'a> {
    new_datetime: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Rescheduled {
    pub new_date: Option<String>,
    pub new_time: Option<String>,
    pub message: Option<String>,
}

pub async fn reschedule_appointment(
    client: &CalendarApiClient,
    req: RescheduleRequest,
) -> Envelope<Rescheduled> {
    let body = RescheduleBody {
        new_datetime: &req.new_datetime,
    };

    match client
        .patch(&appointment_path(&req.appointment_id), Some(&body))
        .await
        .and_then(parse_response::<AppointmentResponse>)
    {
        Ok(resp) => Envelope::ok(Rescheduled {
            new_date: resp.appointment.formatted_date,
            new_time: resp.appointment.formatted_time,
            message: resp.message,
        }),
        Err(err) => Envelope::failed(err),
    }
}

pub async fn mark_reminder_sent(
    client: &CalendarApiClient,
    appointment_id: &str,
) -> Envelope<StatusMessage> {
    let path = format!("{}/remind", appointment_path(appointment_id));
    match client
        .patch::<Value>(&path, None)
        .await
        .and_then(parse_response::<MessageResponse>)
    {
        Ok(resp) => Envelope::ok(StatusMessage {
            message: resp.message,
        }),
        Err(err) => Envelope::failed(err),
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NoShow {
    pub status: String,
    pub message: Option<String>,
}

pub async fn mark_no_show(client: &CalendarApiClient, appointment_id: &str) -> Envelope<NoShow> {
    let path = format!("{}/no-show", appointment_path(appointment_id));
    match client
        .patch::<Value>(&path, None)
        .await
        .and_then(parse_response::<MessageResponse>)
    {
        Ok(resp) => Envelope::ok(NoShow {
            status: String::from("no_show"),
            message: resp.message,
        }),
        Err(err) => Envelope::failed(err),
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpcomingRequest {
    #[serde(default)]
    pub hours_ahead: Option<u32>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AppointmentSummary {
    pub id: Option<String>,
    pub patient_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct UpcomingAppointments {
    pub appointments: Vec<AppointmentSummary>,
    pub total: usize,
}

pub async fn get_upcoming_appointments(
    client: &CalendarApiClient,
    req: UpcomingRequest,
) -> Envelope<UpcomingAppointments> {
    let query: Vec<(&str, String)> = non_zero(req.hours_ahead)
        .map(|hours| vec![("hours_ahead", hours.to_string())])
        .unwrap_or_default();

    match client
        .get(APPOINTMENTS_PATH, &query)
        .await
        .and_then(parse_response::<AppointmentsResponse>)
    {
        Ok(resp) => {
            let appointments: Vec<AppointmentSummary> = resp
                .appointments
                .into_iter()
                .map(|apt| AppointmentSummary {
                    id: apt.id,
                    patient_name: apt.patient.name,
                    date: apt.formatted_date,
                    time: apt.formatted_time,
                    status: apt.status,
                })
                .collect();
            Envelope::ok(UpcomingAppointments {
                total: appointments.len(),
                appointments,
            })
        }
        Err(err) => Envelope::failed_with(err, UpcomingAppointments::default()),
    }
}

// Agent tool wrappers

#[derive(Serialize)]
pub struct BookAppointmentProps {
    pub patient_name: Property,
    pub patient_phone: Property,
    pub appointment_datetime: Property,
    pub appointment_type: Property,
    pub patient_email: Property,
    pub notes: Property,
}

#[derive(Serialize)]
pub struct BookAppointmentTool {
    pub r#type: ToolType,
    pub function: Function<BookAppointmentProps>,
    #[serde(skip)]
    client: CalendarApiClient,
}

#[async_trait]
impl AgentTool for BookAppointmentTool {
    async fn call(&self, args: Value) -> Value {
        match parse_args::<BookingRequest>(args) {
            Ok(req) => book_appointment(&self.client, req).await.into_value(),
            Err(err) => Envelope::<Booking>::failed(err).into_value(),
        }
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

impl BookAppointmentTool {
    pub fn new(client: CalendarApiClient) -> Self {
        let function = Function::new(
            "book_appointment",
            "Book an appointment with the doctor in an available slot.",
            BookAppointmentProps {
                patient_name: Property::string("The patient's full name."),
                patient_phone: Property::string("The patient's phone number."),
                appointment_datetime: Property::string(
                    "Start of the slot in ISO 8601 format, e.g. 2026-02-15T14:00:00-05:00.",
                ),
                appointment_type: Property::string(
                    "One of checkup, consultation or follow_up (default is checkup).",
                ),
                patient_email: Property::string("Optional email address of the patient."),
                notes: Property::string("Optional notes about the visit."),
            },
            &["patient_name", "patient_phone", "appointment_datetime"],
        );
        Self {
            r#type: ToolType::Function,
            function,
            client,
        }
    }
}

#[derive(Serialize)]
pub struct CancelAppointmentTool {
    pub r#type: ToolType,
    pub function: Function<AppointmentIdProps>,
    #[serde(skip)]
    client: CalendarApiClient,
}

#[async_trait]
impl AgentTool for CancelAppointmentTool {
    async fn call(&self, args: Value) -> Value {
        match parse_args::<AppointmentIdArgs>(args) {
            Ok(args) => cancel_appointment(&self.client, &args.appointment_id)
                .await
                .into_value(),
            Err(err) => Envelope::<StatusMessage>::failed(err).into_value(),
        }
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

impl CancelAppointmentTool {
    pub fn new(client: CalendarApiClient) -> Self {
        Self {
            r#type: ToolType::Function,
            function: Function::new(
                "cancel_appointment",
                "Cancel an existing appointment.",
                AppointmentIdProps::new(),
                &["appointment_id"],
            ),
            client,
        }
    }
}

#[derive(Serialize)]
pub struct RescheduleAppointmentProps {
    pub appointment_id: Property,
    pub new_datetime: Property,
}

#[derive(Serialize)]
pub struct RescheduleAppointmentTool {
    pub r#type: ToolType,
    pub function: Function<RescheduleAppointmentProps>,
    #[serde(skip)]
    client: CalendarApiClient,
}

#[async_trait]
impl AgentTool for RescheduleAppointmentTool {
    async fn call(&self, args: Value) -> Value {
        match parse_args::<RescheduleRequest>(args) {
            Ok(req) => reschedule_appointment(&self.client, req).await.into_value(),
            Err(err) => Envelope::<Rescheduled>::failed(err).into_value(),
        }
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

impl RescheduleAppointmentTool {
    pub fn new(client: CalendarApiClient) -> Self {
        Self {
            r#type: ToolType::Function,
            function: Function::new(
                "reschedule_appointment",
                "Move an existing appointment to a new time.",
                RescheduleAppointmentProps {
                    appointment_id: Property::string("The appointment ID to reschedule."),
                    new_datetime: Property::string(
                        "New start time in ISO 8601 format, e.g. 2026-02-18T10:00:00-05:00.",
                    ),
                },
                &["appointment_id", "new_datetime"],
            ),
            client,
        }
    }
}

#[derive(Serialize)]
pub struct MarkReminderSentTool {
    pub r#type: ToolType,
    pub function: Function<AppointmentIdProps>,
    #[serde(skip)]
    client: CalendarApiClient,
}

#[async_trait]
impl AgentTool for MarkReminderSentTool {
    async fn call(&self, args: Value) -> Value {
        match parse_args::<AppointmentIdArgs>(args) {
            Ok(args) => mark_reminder_sent(&self.client, &args.appointment_id)
                .await
                .into_value(),
            Err(err) => Envelope::<StatusMessage>::failed(err).into_value(),
        }
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

impl MarkReminderSentTool {
    pub fn new(client: CalendarApiClient) -> Self {
        Self {
            r#type: ToolType::Function,
            function: Function::new(
                "mark_reminder_sent",
                "Record that a reminder call was made for an appointment.",
                AppointmentIdProps::new(),
                &["appointment_id"],
            ),
            client,
        }
    }
}

#[derive(Serialize)]
pub struct MarkNoShowTool {
    pub r#type: ToolType,
    pub function: Function<AppointmentIdProps>,
    #[serde(skip)]
    client: CalendarApiClient,
}

#[async_trait]
impl AgentTool for MarkNoShowTool {
    async fn call(&self, args: Value) -> Value {
        match parse_args::<AppointmentIdArgs>(args) {
            Ok(args) => mark_no_show(&self.client, &args.appointment_id)
                .await
                .into_value(),
            Err(err) => Envelope::<NoShow>::failed(err).into_value(),
        }
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

impl MarkNoShowTool {
    pub fn new(client: CalendarApiClient) -> Self {
        Self {
            r#type: ToolType::Function,
            function: Function::new(
                "mark_no_show",
                "Mark an appointment as a no-show.",
                AppointmentIdProps::new(),
                &["appointment_id"],
            ),
            client,
        }
    }
}

#[derive(Serialize)]
pub struct UpcomingAppointmentsProps {
    pub hours_ahead: Property,
}

#[derive(Serialize)]
pub struct UpcomingAppointmentsTool {
    pub r#type: ToolType,
    pub function: Function<UpcomingAppointmentsProps>,
    #[serde(skip)]
    client: CalendarApiClient,
}

#[async_trait]
impl AgentTool for UpcomingAppointmentsTool {
    async fn call(&self, args: Value) -> Value {
        // The agent may call this with no arguments at all
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args
        };

        match parse_args::<UpcomingRequest>(args) {
            Ok(req) => get_upcoming_appointments(&self.client, req)
                .await
                .into_value(),
            Err(err) => Envelope::failed_with(err, UpcomingAppointments::default()).into_value(),
        }
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

impl UpcomingAppointmentsTool {
    pub fn new(client: CalendarApiClient) -> Self {
        Self {
            r#type: ToolType::Function,
            function: Function::new(
                "get_upcoming_appointments",
                "List the doctor's upcoming appointments.",
                UpcomingAppointmentsProps {
                    hours_ahead: Property::integer(
                        "Only include appointments starting within this many hours.",
                    ),
                },
                &[],
            ),
            client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn booking() -> BookingRequest {
        BookingRequest {
            patient_name: String::from("Jane Doe"),
            patient_phone: String::from("+15555550100"),
            appointment_datetime: String::from("2026-02-15T14:00:00-05:00"),
            appointment_type: None,
            patient_email: Some(String::new()),
            notes: Some(String::from("First visit")),
        }
    }

    #[tokio::test]
    async fn it_books_an_appointment() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", APPOINTMENTS_PATH)
            .match_body(Matcher::Json(json!({
                "patient_name": "Jane Doe",
                "patient_phone": "+15555550100",
                "appointment_datetime": "2026-02-15T14:00:00-05:00",
                "appointment_type": "checkup",
                "notes": "First visit"
            })))
            .with_status(201)
            .with_body(
                json!({
                    "success": true,
                    "confirmation_id": "evt_abc123",
                    "appointment": {
                        "id": "evt_abc123",
                        "formatted_date": "Sunday, February 15",
                        "formatted_time": "2:00 PM"
                    },
                    "message": "Appointment booked"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();
        let actual = book_appointment(&client, booking()).await;

        assert_eq!(
            actual,
            Envelope::ok(Booking {
                confirmation_id: Some(String::from("evt_abc123")),
                appointment_date: Some(String::from("Sunday, February 15")),
                appointment_time: Some(String::from("2:00 PM")),
                message: Some(String::from("Appointment booked")),
            })
        );
    }

    #[tokio::test]
    async fn it_rejects_double_booked_slots() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", APPOINTMENTS_PATH)
            .with_status(409)
            .with_body(r#"{"detail": "Time slot is no longer available"}"#)
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();
        let actual = book_appointment(&client, booking()).await;

        assert_eq!(actual, Envelope::failed("Time slot is no longer available"));
    }

    #[tokio::test]
    async fn it_defaults_a_missing_null_or_blank_appointment_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", APPOINTMENTS_PATH)
            .match_body(Matcher::PartialJson(json!({"appointment_type": "checkup"})))
            .with_status(201)
            .with_body(r#"{"confirmation_id": "evt_abc123", "appointment": {}}"#)
            .expect(3)
            .create_async()
            .await;

        let tool = BookAppointmentTool::new(CalendarApiClient::new(&server.url()).unwrap());
        let base = json!({
            "patient_name": "Jane Doe",
            "patient_phone": "+15555550100",
            "appointment_datetime": "2026-02-15T14:00:00-05:00"
        });

        for appointment_type in [None, Some(Value::Null), Some(json!("  "))] {
            let mut args = base.clone();
            if let Some(value) = appointment_type {
                args["appointment_type"] = value;
            }
            let actual = tool.call(args).await;
            assert_eq!(actual["success"], true, "{}", actual);
            assert_eq!(actual["confirmation_id"], "evt_abc123");
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_passes_an_explicit_appointment_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", APPOINTMENTS_PATH)
            .match_body(Matcher::PartialJson(json!({"appointment_type": "follow_up"})))
            .with_status(201)
            .with_body(r#"{"confirmation_id": "evt_abc123"}"#)
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();
        let req = BookingRequest {
            appointment_type: Some(String::from("follow_up")),
            ..booking()
        };
        assert!(book_appointment(&client, req).await.success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_fails_to_cancel_unknown_appointments() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/api/calendar/appointments/fake-id-12345")
            .with_status(404)
            .with_body(r#"{"detail": "Appointment not found"}"#)
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();
        let actual = cancel_appointment(&client, "fake-id-12345").await;

        assert!(!actual.success);
        assert_eq!(actual.error.as_deref(), Some("Appointment not found"));
    }

    #[tokio::test]
    async fn it_cancels_twice_when_upstream_is_idempotent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/calendar/appointments/evt_abc123")
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .expect(2)
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();
        let first = cancel_appointment(&client, "evt_abc123").await;
        let second = cancel_appointment(&client, "evt_abc123").await;

        assert_eq!(first, second);
        assert_eq!(
            first.into_value(),
            json!({"success": true, "message": "Appointment cancelled successfully"})
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_marks_no_show_twice_when_upstream_is_idempotent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/calendar/appointments/evt_abc123/no-show")
            .with_status(200)
            .with_body(r#"{"message": "Marked as no-show"}"#)
            .expect(2)
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();
        let first = mark_no_show(&client, "evt_abc123").await;
        let second = mark_no_show(&client, "evt_abc123").await;

        assert_eq!(first, second);
        assert_eq!(
            first.into_value(),
            json!({"success": true, "status": "no_show", "message": "Marked as no-show"})
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_accepts_bodiless_successes() {
        let mut server = mockito::Server::new_async().await;
        let _cancel = server
            .mock("DELETE", "/api/calendar/appointments/evt1")
            .with_status(204)
            .create_async()
            .await;
        let _remind = server
            .mock("PATCH", "/api/calendar/appointments/evt1/remind")
            .with_status(204)
            .create_async()
            .await;
        let _no_show = server
            .mock("PATCH", "/api/calendar/appointments/evt1/no-show")
            .with_status(204)
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();

        assert_eq!(
            cancel_appointment(&client, "evt1").await.into_value(),
            json!({"success": true, "message": "Appointment cancelled successfully"})
        );
        assert_eq!(
            mark_reminder_sent(&client, "evt1").await.into_value(),
            json!({"success": true, "message": null})
        );
        assert_eq!(
            mark_no_show(&client, "evt1").await.into_value(),
            json!({"success": true, "status": "no_show", "message": null})
        );
    }

    #[test]
    fn it_escapes_appointment_ids_in_paths() {
        assert_eq!(
            appointment_path("abc/../def"),
            "/api/calendar/appointments/abc%2F..%2Fdef"
        );
    }

    #[tokio::test]
    async fn it_reschedules_an_appointment() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PATCH", "/api/calendar/appointments/evt_abc123")
            .match_body(Matcher::Json(json!({"new_datetime": "2026-02-18T10:00:00-05:00"})))
            .with_status(200)
            .with_body(
                r#"{"appointment": {"formatted_date": "Wednesday, February 18", "formatted_time": "10:00 AM"}, "message": "Rescheduled"}"#,
            )
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();
        let actual = reschedule_appointment(
            &client,
            RescheduleRequest {
                appointment_id: String::from("evt_abc123"),
                new_datetime: String::from("2026-02-18T10:00:00-05:00"),
            },
        )
        .await;

        assert_eq!(
            actual.into_value(),
            json!({
                "success": true,
                "new_date": "Wednesday, February 18",
                "new_time": "10:00 AM",
                "message": "Rescheduled"
            })
        );
    }

    #[tokio::test]
    async fn it_marks_reminders_and_no_shows() {
        let mut server = mockito::Server::new_async().await;
        let _remind = server
            .mock("PATCH", "/api/calendar/appointments/evt_abc123/remind")
            .with_status(200)
            .with_body(r#"{"message": "Reminder marked as sent"}"#)
            .create_async()
            .await;
        let _no_show = server
            .mock("PATCH", "/api/calendar/appointments/evt_abc123/no-show")
            .with_status(200)
            .with_body(r#"{"message": "Marked as no-show"}"#)
            .create_async()
            .await;

        let client = CalendarApiClient::new(&server.url()).unwrap();

        let reminded = mark_reminder_sent(&client, "evt_abc123").await;
        assert_eq!(
            reminded.into_value(),
            json!({"success": true, "message": "Reminder marked as sent"})
        );

        let no_show = mark_no_show(&client, "evt_abc123").await;
        assert_eq!(
            no_show.into_value(),
            json!({"success": true, "status": "no_show", "message": "Marked as no-show"})
        );
    }

    #[tokio::test]
    async fn it_lists_upcoming_appointments() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", APPOINTMENTS_PATH)
            .match_query(Matcher::UrlEncoded("hours_ahead".into(), "48".into()))
            .with_status(200)
            .with_body(
                json!({
                    "appointments": [{
                        "id": "evt_abc123",
                        "patient": {"name": "Jane Doe", "phone": "+15555550100"},
                        "formatted_date": "Sunday, February 15",
                        "formatted_time": "2:00 PM",
                        "status": "confirmed"
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let tool = UpcomingAppointmentsTool::new(CalendarApiClient::new(&server.url()).unwrap());
        let actual = tool.call(json!({"hours_ahead": 48})).await;

        assert_eq!(
            actual,
            json!({
                "success": true,
                "appointments": [{
                    "id": "evt_abc123",
                    "patient_name": "Jane Doe",
                    "date": "Sunday, February 15",
                    "time": "2:00 PM",
                    "status": "confirmed"
                }],
                "total": 1
            })
        );
    }

    #[tokio::test]
    async fn it_keeps_an_empty_list_on_failure() {
        let client = CalendarApiClient::new("http://127.0.0.1:1").unwrap();
        let actual = get_upcoming_appointments(&client, UpcomingRequest::default()).await;

        let value = actual.into_value();
        assert_eq!(value["success"], false);
        assert_eq!(value["appointments"], json!([]));
        assert!(
            value["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to connect to Calendar API")
        );
    }
}
