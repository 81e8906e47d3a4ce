//! Typed HTTP client for the hospital-pharmacy API.
//!
//! One method per route, mirroring the wrapper list the web panels use.
//! Mutation methods return the server's confirmation text.

use api::routes::{
    doctors::{CreateDoctor, UpdateDoctor},
    employees::{CreateEmployee, UpdateEmployee},
    medicines::{CreateMedicine, UpdateMedicine},
    patients::{CreatePatient, UpdatePatient},
    prescriptions::{CreatePrescription, UpdatePrescription},
};
use db::models::{Doctor, Employee, Medicine, Patient, Prescription, PrescriptionDetails};
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed")]
    Http(
        #[source]
        #[from]
        reqwest::Error,
    ),

    /// The server answered with a non-success status.
    #[error("server responded {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Client bound to one API server.
#[derive(Debug, Clone)]
pub struct PharmacyClient {
    http: reqwest::Client,
    base_url: String,
}

impl PharmacyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.url(path)).send().await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<String> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Ok(Self::checked(response).await?.text().await?)
    }

    async fn put_json(&self, path: &str, body: &impl Serialize) -> Result<String> {
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Ok(Self::checked(response).await?.text().await?)
    }

    async fn delete(&self, path: &str) -> Result<String> {
        let response = self.http.delete(self.url(path)).send().await?;
        Ok(Self::checked(response).await?.text().await?)
    }

    async fn delete_json(&self, path: &str, body: &impl Serialize) -> Result<String> {
        let response = self.http.delete(self.url(path)).json(body).send().await?;
        Ok(Self::checked(response).await?.text().await?)
    }

    pub async fn liveness(&self) -> Result<String> {
        let response = self.http.get(self.url("/")).send().await?;
        Ok(Self::checked(response).await?.text().await?)
    }

    // Employee routes

    pub async fn employees(&self) -> Result<Vec<Employee>> {
        self.get_json("/employees").await
    }

    pub async fn search_employees(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Employee>> {
        let response = self
            .http
            .get(self.url("/employees/search"))
            .query(&[("first_name", first_name), ("last_name", last_name)])
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub async fn add_employee(&self, employee: &CreateEmployee) -> Result<String> {
        self.post_json("/employees", employee).await
    }

    pub async fn update_employee(&self, id: &str, employee: &UpdateEmployee) -> Result<String> {
        self.put_json(&format!("/employees/{id}"), employee).await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<String> {
        self.delete(&format!("/employees/{id}")).await
    }

    // Doctor routes

    pub async fn doctors(&self) -> Result<Vec<Doctor>> {
        self.get_json("/doctors").await
    }

    pub async fn search_doctors(&self, first_name: &str, last_name: &str) -> Result<Vec<Doctor>> {
        let response = self
            .http
            .get(self.url("/doctors/search"))
            .query(&[("first_name", first_name), ("last_name", last_name)])
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    pub async fn add_doctor(&self, doctor: &CreateDoctor) -> Result<String> {
        self.post_json("/doctors", doctor).await
    }

    pub async fn update_doctor(&self, id: &str, doctor: &UpdateDoctor) -> Result<String> {
        self.put_json(&format!("/doctors/{id}"), doctor).await
    }

    pub async fn delete_doctor(&self, id: &str) -> Result<String> {
        self.delete(&format!("/doctors/{id}")).await
    }

    // Patient routes

    pub async fn patients(&self) -> Result<Vec<Patient>> {
        self.get_json("/patients").await
    }

    pub async fn patient(&self, id: &str) -> Result<Patient> {
        self.get_json(&format!("/patients/{id}")).await
    }

    pub async fn add_patient(&self, patient: &CreatePatient) -> Result<String> {
        self.post_json("/patients", patient).await
    }

    pub async fn update_patient(&self, id: &str, patient: &UpdatePatient) -> Result<String> {
        self.put_json(&format!("/patients/{id}"), patient).await
    }

    pub async fn delete_patient(&self, id: &str) -> Result<String> {
        self.delete(&format!("/patients/{id}")).await
    }

    // Medicine routes

    pub async fn medicines(&self) -> Result<Vec<Medicine>> {
        self.get_json("/medicines").await
    }

    pub async fn add_medicine(&self, medicine: &CreateMedicine) -> Result<String> {
        self.post_json("/medicines", medicine).await
    }

    pub async fn update_medicine(&self, id: i64, medicine: &UpdateMedicine) -> Result<String> {
        self.put_json(&format!("/medicines/{id}"), medicine).await
    }

    pub async fn delete_medicines(&self, ids: &[i64]) -> Result<String> {
        self.delete_json("/medicines", &json!({ "ids": ids })).await
    }

    // Prescription routes

    pub async fn prescriptions(&self) -> Result<Vec<Prescription>> {
        self.get_json("/prescriptions").await
    }

    pub async fn add_prescription(&self, prescription: &CreatePrescription) -> Result<String> {
        self.post_json("/prescriptions", prescription).await
    }

    pub async fn update_prescription(
        &self,
        id: &str,
        prescription: &UpdatePrescription,
    ) -> Result<String> {
        self.put_json(&format!("/prescriptions/{id}"), prescription)
            .await
    }

    pub async fn delete_prescriptions(&self, ids: &[String]) -> Result<String> {
        self.delete_json("/prescriptions", &json!({ "ids": ids }))
            .await
    }

    pub async fn patients_with_prescriptions(&self) -> Result<Vec<PrescriptionDetails>> {
        self.get_json("/patients-with-prescriptions").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = PharmacyClient::new("http://localhost:5000/");
        assert_eq!(client.url("/employees"), "http://localhost:5000/employees");
    }

    #[test]
    fn paths_append_verbatim() {
        let client = PharmacyClient::new("http://localhost:5000");
        assert_eq!(
            client.url("/patients-with-prescriptions"),
            "http://localhost:5000/patients-with-prescriptions"
        );
    }
}
