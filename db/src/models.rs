//! Row models and write-side field sets for the five entities.
//!
//! Responses keep the UPPERCASE column keys the previous backend exposed —
//! every existing client sorts and filters on those names, so the casing is
//! a compatibility surface, not a style choice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::dates;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct Employee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct Doctor {
    pub doctor_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

/// A patient row with its free-text columns already materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct Patient {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    pub bday: NaiveDate,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    pub allergies: String,
    pub medical_history: String,
}

/// A medicine row with its free-text columns already materialized.
///
/// Expiry is carried in the legacy `DD-MON-YY` form on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct Medicine {
    pub med_id: i64,
    pub name: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    pub description: String,
    pub restrictions: String,
    pub stock: i64,
    pub price: f64,
    #[serde(with = "dates::legacy")]
    #[schema(value_type = Option<String>, example = "29-NOV-24")]
    pub expiry: Option<NaiveDate>,
    pub reorder: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct Prescription {
    pub prescription_id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub med_id: i64,
    pub quantity: i64,
    pub date_of_filling: Option<NaiveDate>,
    pub dosage: String,
}

/// Row of the read-only joined projection behind
/// `/patients-with-prescriptions`. No write path exists for this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct PrescriptionDetails {
    pub prescription_id: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub doctor_first_name: String,
    pub doctor_last_name: String,
    pub medication_name: String,
    pub quantity: i64,
    pub dosage: String,
    pub date_of_filling: Option<NaiveDate>,
}

/// Mutable employee columns, as bound by the insert and replace statements.
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct DoctorFields {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct PatientFields {
    pub first_name: String,
    pub last_name: String,
    pub bday: NaiveDate,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    pub allergies: Option<String>,
    pub medical_history: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MedicineFields {
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub restrictions: Option<String>,
    pub stock: i64,
    pub price: f64,
    pub expiry: Option<NaiveDate>,
    pub reorder: i64,
}

#[derive(Debug, Clone)]
pub struct PrescriptionFields {
    pub doctor_id: String,
    pub patient_id: String,
    pub med_id: i64,
    pub quantity: i64,
    pub date_of_filling: Option<NaiveDate>,
    pub dosage: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn employee_serializes_with_uppercase_keys() {
        let employee = Employee {
            employee_id: "E100".to_string(),
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            phone_number: "555-0100".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&employee).unwrap(),
            json!({
                "EMPLOYEE_ID": "E100",
                "FIRST_NAME": "John",
                "LAST_NAME": "Smith",
                "PHONE_NUMBER": "555-0100",
            })
        );
    }

    #[test]
    fn medicine_expiry_uses_the_legacy_form() {
        let medicine = Medicine {
            med_id: 7,
            name: "Aspirin".to_string(),
            kind: "Analgesic".to_string(),
            description: "No description available".to_string(),
            restrictions: "No restrictions".to_string(),
            stock: 120,
            price: 4.5,
            expiry: NaiveDate::from_ymd_opt(2024, 11, 29),
            reorder: 20,
        };

        let value = serde_json::to_value(&medicine).unwrap();
        assert_eq!(value["EXPIRY"], json!("29-NOV-24"));
        assert_eq!(value["TYPE"], json!("Analgesic"));

        let back: Medicine = serde_json::from_value(value).unwrap();
        assert_eq!(back, medicine);
    }

    #[test]
    fn medicine_expiry_may_be_null() {
        let value = json!({
            "MED_ID": 1,
            "NAME": "Saline",
            "TYPE": "Solution",
            "DESCRIPTION": "No description available",
            "RESTRICTIONS": "No restrictions",
            "STOCK": 3,
            "PRICE": 1.0,
            "EXPIRY": null,
            "REORDER": 1,
        });

        let medicine: Medicine = serde_json::from_value(value).unwrap();
        assert_eq!(medicine.expiry, None);
    }

    #[test]
    fn prescription_dates_stay_iso() {
        let prescription = Prescription {
            prescription_id: "RX1".to_string(),
            doctor_id: "D1".to_string(),
            patient_id: "P1".to_string(),
            med_id: 7,
            quantity: 2,
            date_of_filling: NaiveDate::from_ymd_opt(2024, 12, 1),
            dosage: "N/A".to_string(),
        };

        let value = serde_json::to_value(&prescription).unwrap();
        assert_eq!(value["DATE_OF_FILLING"], json!("2024-12-01"));
    }
}
