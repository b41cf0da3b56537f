use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationStatus {
    Authorized,
    NonAuthorized,
}

/// Registry answer for a motor-carrier (MC) number lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierAuthorization {
    pub mc_number: String,
    pub status: AuthorizationStatus,
    pub carrier_name: String,
    pub operation: String,
}

impl CarrierAuthorization {
    pub fn is_authorized(&self) -> bool {
        self.status == AuthorizationStatus::Authorized
    }
}

#[cfg(test)]
mod tests {
    use super::AuthorizationStatus;

    #[test]
    fn status_uses_kebab_case_wire_form() {
        assert_eq!(
            serde_json::to_string(&AuthorizationStatus::NonAuthorized)
                .expect("status should serialize"),
            "\"non-authorized\""
        );
    }
}
