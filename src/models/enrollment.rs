use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub name: String,
    pub class: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Enrollment {
    #[must_use]
    pub fn from_new(new: NewEnrollment) -> Self {
        Self {
            id: super::new_id(),
            name: new.name,
            class: new.class,
            phone: new.phone,
            whatsapp: new.whatsapp,
            address: new.address,
            created_at: super::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub name: String,
    pub class: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPatch {
    pub name: Option<String>,
    pub class: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
}

impl EnrollmentPatch {
    pub fn apply(self, enrollment: &mut Enrollment) {
        if let Some(name) = self.name {
            enrollment.name = name;
        }
        if let Some(class) = self.class {
            enrollment.class = class;
        }
        if let Some(phone) = self.phone {
            enrollment.phone = phone;
        }
        if let Some(whatsapp) = self.whatsapp {
            enrollment.whatsapp = whatsapp;
        }
        if let Some(address) = self.address {
            enrollment.address = address;
        }
    }
}
