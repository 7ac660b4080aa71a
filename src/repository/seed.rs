//! Demo fixtures for the in-memory store

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{Equipment, EquipmentStatus, User, UserRole},
};

use super::Repository;

/// Load a small set of users and equipment so a freshly started server can
/// be exercised by hand. Gated behind `seed.demo_data`.
pub async fn seed_demo_data(repository: &Repository) -> AppResult<()> {
    let now = Utc::now();

    let users = vec![
        User {
            id: "user-admin".to_string(),
            name: "Alice Nguyen".to_string(),
            email: "alice.nguyen@lab.example".to_string(),
            phone: None,
            role: UserRole::Admin,
            department: "Lab Operations".to_string(),
            violation_count: 0,
            is_locked: false,
        },
        User {
            id: "user-staff".to_string(),
            name: "Ben Tran".to_string(),
            email: "ben.tran@lab.example".to_string(),
            phone: Some("+84 90 000 0001".to_string()),
            role: UserRole::Staff,
            department: "Materials Science".to_string(),
            violation_count: 0,
            is_locked: false,
        },
        User {
            id: "user-student".to_string(),
            name: "Chi Le".to_string(),
            email: "chi.le@student.example".to_string(),
            phone: None,
            role: UserRole::Student,
            department: "Materials Science".to_string(),
            violation_count: 0,
            is_locked: false,
        },
    ];

    for user in users {
        repository.users.insert(user).await?;
    }

    let equipment = vec![
        Equipment {
            id: "eq-sem".to_string(),
            name: "Scanning Electron Microscope".to_string(),
            code: "SEM-01".to_string(),
            model: Some("JSM-IT800".to_string()),
            serial: Some("JE-48812".to_string()),
            manager_id: "user-staff".to_string(),
            location: "Building B, Room 203".to_string(),
            status: EquipmentStatus::Available,
            is_restricted: true,
            notes: Some("SOP briefing required before first use".to_string()),
            created_at: now,
            updated_at: now,
        },
        Equipment {
            id: "eq-centrifuge".to_string(),
            name: "Refrigerated Centrifuge".to_string(),
            code: "CF-02".to_string(),
            model: Some("5910 Ri".to_string()),
            serial: None,
            manager_id: "user-staff".to_string(),
            location: "Building B, Room 105".to_string(),
            status: EquipmentStatus::Available,
            is_restricted: false,
            notes: None,
            created_at: now,
            updated_at: now,
        },
        Equipment {
            id: "eq-oscilloscope".to_string(),
            name: "Digital Oscilloscope".to_string(),
            code: "OSC-07".to_string(),
            model: Some("MSO44".to_string()),
            serial: Some("TK-77120".to_string()),
            manager_id: "user-admin".to_string(),
            location: "Building A, Room 310".to_string(),
            status: EquipmentStatus::Maintenance,
            is_restricted: false,
            notes: Some("Probe calibration scheduled".to_string()),
            created_at: now,
            updated_at: now,
        },
    ];

    for item in equipment {
        repository.equipment.insert(item).await?;
    }

    tracing::info!("Demo data seeded (3 users, 3 equipment)");
    Ok(())
}
