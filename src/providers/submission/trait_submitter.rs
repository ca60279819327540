//! Contrato de los backends que reciben el registro de un paso del wizard.
//! El controlador sólo ve la `SubmitResponse`; cualquier `Err` se muestra
//! como mensaje de estado y el wizard permanece en el paso.
use async_trait::async_trait;

use cert_core::{FormRecord, StepIndex, SubmitResponse};

pub type SubmitError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait StepSubmitter: Send + Sync {
    fn get_name(&self) -> &str;

    async fn submit(&self, step: StepIndex, record: &FormRecord) -> Result<SubmitResponse, SubmitError>;
}
