use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Appointment, AppointmentStatus};

const COLUMNS: &str = "id, pet_type, service_type, owner_name, pet_name, email, phone, notes, date, time_slot, status, created_at, updated_at";

// ── Appointments ──

pub fn create_appointment(conn: &Connection, appt: &Appointment) -> anyhow::Result<()> {
    let date = appt.date.format("%Y-%m-%d").to_string();
    let created_at = appt.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let updated_at = appt.updated_at.format("%Y-%m-%d %H:%M:%S").to_string();

    conn.execute(
        "INSERT INTO appointments (id, pet_type, service_type, owner_name, pet_name, email, phone, notes, date, time_slot, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            appt.id,
            appt.pet_type.as_str(),
            appt.service_type.as_str(),
            appt.owner_name,
            appt.pet_name,
            appt.email,
            appt.phone,
            appt.notes,
            date,
            appt.time_slot,
            appt.status.as_str(),
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

/// Slot labels held by confirmed appointments on `date`.
pub fn get_booked_slots(conn: &Connection, date: &NaiveDate) -> anyhow::Result<Vec<String>> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let mut stmt = conn.prepare(
        "SELECT time_slot FROM appointments WHERE date = ?1 AND status = 'confirmed' ORDER BY time_slot ASC",
    )?;

    let rows = stmt.query_map(params![date_str], |row| row.get::<_, String>(0))?;

    let mut slots = vec![];
    for row in rows {
        slots.push(row?);
    }
    Ok(slots)
}

pub fn is_slot_booked(conn: &Connection, date: &NaiveDate, time_slot: &str) -> anyhow::Result<bool> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let booked: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM appointments WHERE date = ?1 AND time_slot = ?2 AND status = 'confirmed'",
        params![date_str, time_slot],
        |row| row.get(0),
    )?;
    Ok(booked)
}

pub fn update_appointment_status(
    conn: &Connection,
    id: &str,
    status: &AppointmentStatus,
) -> anyhow::Result<bool> {
    let now = Utc::now()
        .naive_utc()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let count = conn.execute(
        "UPDATE appointments SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

pub fn get_all_appointments(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Appointment>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status_filter {
        Some(status) => (
            format!(
                "SELECT {COLUMNS} FROM appointments WHERE status = ?1 ORDER BY date DESC, time_slot ASC LIMIT ?2"
            ),
            vec![
                Box::new(status.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            format!("SELECT {COLUMNS} FROM appointments ORDER BY date DESC, time_slot ASC LIMIT ?1"),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_appointment_row(row)))?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn get_appointment_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Appointment>> {
    let result = conn.query_row(
        &format!("SELECT {COLUMNS} FROM appointments WHERE id = ?1"),
        params![id],
        |row| Ok(parse_appointment_row(row)),
    );

    match result {
        Ok(appt) => Ok(Some(appt?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_appointment_row(row: &rusqlite::Row) -> anyhow::Result<Appointment> {
    let pet_type: String = row.get(1)?;
    let service_type: String = row.get(2)?;
    let date_str: String = row.get(8)?;
    let status_str: String = row.get(10)?;
    let created_at_str: String = row.get(11)?;
    let updated_at_str: String = row.get(12)?;

    Ok(Appointment {
        id: row.get(0)?,
        pet_type: pet_type.parse()?,
        service_type: service_type.parse()?,
        owner_name: row.get(3)?,
        pet_name: row.get(4)?,
        email: row.get(5)?,
        phone: row.get(6)?,
        notes: row.get(7)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")?,
        time_slot: row.get(9)?,
        status: AppointmentStatus::from_str(&status_str),
        created_at: NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")?,
        updated_at: NaiveDateTime::parse_from_str(&updated_at_str, "%Y-%m-%d %H:%M:%S")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{PetType, ServiceType};

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn appointment(id: &str, date: &str, slot: &str) -> Appointment {
        let now = Utc::now().naive_utc();
        Appointment {
            id: id.to_string(),
            pet_type: PetType::Cat,
            service_type: ServiceType::Grooming,
            owner_name: "Alice".to_string(),
            pet_name: "Luna".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0100".to_string(),
            notes: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time_slot: slot.to_string(),
            status: AppointmentStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_create_and_load() {
        let conn = setup_db();
        let mut appt = appointment("a-1", "2025-06-17", "09:00 AM");
        appt.notes = Some("First visit".to_string());
        create_appointment(&conn, &appt).unwrap();

        let loaded = get_appointment_by_id(&conn, "a-1").unwrap().unwrap();
        assert_eq!(loaded.pet_type, PetType::Cat);
        assert_eq!(loaded.service_type, ServiceType::Grooming);
        assert_eq!(loaded.notes.as_deref(), Some("First visit"));
        assert_eq!(loaded.time_slot, "09:00 AM");
        assert_eq!(loaded.status, AppointmentStatus::Confirmed);

        assert!(get_appointment_by_id(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_booked_slots_ignore_cancelled_and_other_days() {
        let conn = setup_db();
        create_appointment(&conn, &appointment("a-1", "2025-06-17", "09:00 AM")).unwrap();
        create_appointment(&conn, &appointment("a-2", "2025-06-17", "02:00 PM")).unwrap();
        create_appointment(&conn, &appointment("a-3", "2025-06-18", "10:00 AM")).unwrap();
        update_appointment_status(&conn, "a-2", &AppointmentStatus::Cancelled).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();
        assert_eq!(get_booked_slots(&conn, &date).unwrap(), vec!["09:00 AM"]);
        assert!(is_slot_booked(&conn, &date, "09:00 AM").unwrap());
        assert!(!is_slot_booked(&conn, &date, "02:00 PM").unwrap());
    }

    #[test]
    fn test_list_with_status_filter() {
        let conn = setup_db();
        create_appointment(&conn, &appointment("a-1", "2025-06-17", "09:00 AM")).unwrap();
        create_appointment(&conn, &appointment("a-2", "2025-06-19", "10:00 AM")).unwrap();
        update_appointment_status(&conn, "a-1", &AppointmentStatus::Cancelled).unwrap();

        let all = get_all_appointments(&conn, None, 50).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "a-2");

        let cancelled = get_all_appointments(&conn, Some("cancelled"), 50).unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, "a-1");

        assert_eq!(get_all_appointments(&conn, None, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_appointment() {
        let conn = setup_db();
        assert!(!update_appointment_status(&conn, "nope", &AppointmentStatus::Cancelled).unwrap());
    }
}
