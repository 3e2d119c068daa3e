use crate::domain::model::ContactInfo;
use crate::utils::error::Result;
use async_trait::async_trait;

/// "Save to local device" capability for the generated offer.
pub trait DocumentSink: Send + Sync {
    /// 回傳實際儲存位置
    fn save(
        &self,
        filename: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub reference: String,
}

/// Transport for the contact form. Callers validate before calling.
#[async_trait]
pub trait ContactGateway: Send + Sync {
    async fn submit(&self, contact: &ContactInfo) -> Result<SubmissionReceipt>;
}
