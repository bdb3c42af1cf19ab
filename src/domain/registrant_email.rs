use validator::ValidateEmail;

#[derive(Debug)]
pub struct RegistrantEmail(String);

impl RegistrantEmail {
    pub fn parse(s: &str) -> Result<RegistrantEmail, String> {
        if s.validate_email() {
            Ok(Self(s.into()))
        } else {
            tracing::error!("`{s}` is not a valid registrant email.");
            Err(format!("`{s}` is not a valid registrant email."))
        }
    }
}

impl AsRef<str> for RegistrantEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
