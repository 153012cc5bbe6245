//! Response bodies of the Calendar API. Only the fields the tools read
//! are modelled; everything defaults so partial responses still parse.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Slot {
    pub start: String,
    pub end: Option<String>,
    pub formatted_time: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AvailabilityResponse {
    pub date: Option<String>,
    pub formatted_date: Option<String>,
    pub available_slots: Vec<Slot>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AvailabilityRangeResponse {
    pub dates: Vec<AvailabilityResponse>,
    pub total_slots: Option<usize>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Appointment {
    pub id: Option<String>,
    pub patient: Patient,
    pub formatted_date: Option<String>,
    pub formatted_time: Option<String>,
    pub status: Option<String>,
}

/// Returned by booking and rescheduling.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppointmentResponse {
    pub confirmation_id: Option<String>,
    pub appointment: Appointment,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

/// Cancel, remind and no-show only return a message.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: Option<String>,
}
