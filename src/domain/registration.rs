use crate::routes::RegistrationForm;

use super::{RegistrantEmail, Region};

/// 校验通过的注册请求
#[derive(Debug)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: RegistrantEmail,
    pub company: String,
    pub job_title: String,
    pub event_id: String,
    pub city: String,
    pub state: String,
    pub region: Region,
    pub zip_code: String,
    pub phone: String,
}

impl TryFrom<RegistrationForm> for Registration {
    type Error = ValidationError;

    fn try_from(form: RegistrationForm) -> Result<Self, Self::Error> {
        // 必填字段缺失与传空串等价
        let required = [
            &form.first_name,
            &form.last_name,
            &form.email,
            &form.company,
            &form.job_title,
            &form.event_id,
            &form.city,
            &form.state,
            &form.region,
            &form.zip_code,
            &form.phone,
        ];
        if required.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::MissingFields);
        }

        let email =
            RegistrantEmail::parse(&form.email).map_err(|_| ValidationError::InvalidEmail)?;
        let region = Region::parse(&form.region);

        Ok(Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email,
            company: form.company,
            job_title: form.job_title,
            event_id: form.event_id,
            city: form.city,
            state: form.state,
            region,
            zip_code: form.zip_code,
            phone: form.phone,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}
