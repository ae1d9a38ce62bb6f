/// Identifiers required by the email delivery provider.
///
/// Only constructed when all three values are present, so holding one means
/// the delivery service is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl DeliveryCredentials {
    /// Combines the individually configured values. Returns `None` if any of
    /// them is missing or empty.
    pub fn from_parts(
        service_id: Option<String>,
        template_id: Option<String>,
        public_key: Option<String>,
    ) -> Option<Self> {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        Some(Self {
            service_id: present(service_id)?,
            template_id: present(template_id)?,
            public_key: present(public_key)?,
        })
    }
}
