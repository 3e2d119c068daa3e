use crate::domain::model::ContactInfo;
use crate::domain::ports::{ContactGateway, SubmissionReceipt};
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const MISSING_FIELDS_MESSAGE: &str = "Моля, попълнете име, телефон и имейл.";
pub const SUBMITTED_MESSAGE: &str = "Благодарим! Ще се свържем с вас скоро.";

pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1_000);

/// All three fields are required; blank counts as missing.
pub fn validate_contact(contact: &ContactInfo) -> Result<()> {
    let missing: Vec<&str> = [
        ("name", contact.name.as_str()),
        ("phone", contact.phone.as_str()),
        ("email", contact.email.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        tracing::debug!("Contact form incomplete, missing: {}", missing.join(", "));
        Err(QuoteError::validation(MISSING_FIELDS_MESSAGE))
    }
}

/// Validates locally, then hands the form to the gateway.
/// Nothing is sent when validation fails.
pub async fn submit_contact<G>(gateway: &G, contact: &ContactInfo) -> Result<SubmissionReceipt>
where
    G: ContactGateway + ?Sized,
{
    validate_contact(contact)?;

    tracing::info!("📨 Submitting contact request for {}", contact.name.trim());
    let receipt = gateway.submit(contact).await?;
    tracing::info!("✅ Contact request accepted ({})", receipt.reference);

    Ok(receipt)
}

/// Stand-in transport: waits, then reports success.
#[derive(Debug)]
pub struct SimulatedContactGateway {
    delay: Duration,
    sequence: AtomicU64,
}

impl SimulatedContactGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sequence: AtomicU64::new(0),
        }
    }
}

impl Default for SimulatedContactGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

#[async_trait]
impl ContactGateway for SimulatedContactGateway {
    async fn submit(&self, _contact: &ContactInfo) -> Result<SubmissionReceipt> {
        tokio::time::sleep(self.delay).await;
        let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(SubmissionReceipt {
            reference: format!("SIM-{:04}", n),
        })
    }
}
