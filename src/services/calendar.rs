use chrono::Duration;

use crate::models::catalog::parse_slot_time;
use crate::models::Appointment;

pub const APPOINTMENT_MINUTES: i64 = 60;

// RFC 5545 text escaping
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

pub fn generate_ics(appt: &Appointment, clinic_name: &str) -> anyhow::Result<String> {
    let start_time = parse_slot_time(&appt.time_slot)
        .ok_or_else(|| anyhow::anyhow!("invalid time slot on appointment: {}", appt.time_slot))?;
    let start = appt.date.and_time(start_time);
    let end = start + Duration::minutes(APPOINTMENT_MINUTES);

    let dtstart = start.format("%Y%m%dT%H%M%S");
    let dtend = end.format("%Y%m%dT%H%M%S");
    let dtstamp = appt.created_at.format("%Y%m%dT%H%M%S");
    let uid = format!("{}@pawsandcare", appt.id);

    let summary = escape(&format!(
        "{} for {} at {}",
        appt.service_type, appt.pet_name, clinic_name
    ));
    let description = escape(appt.notes.as_deref().unwrap_or("No additional notes"));

    Ok(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Paws & Care//Appointments//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    ))
}
