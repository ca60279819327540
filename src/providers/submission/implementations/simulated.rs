use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use cert_core::{FormRecord, StepIndex, SubmitResponse};

use crate::config::{WizardConfig, DEFAULT_SUBMIT_DELAY_MS};
use crate::providers::submission::trait_submitter::{StepSubmitter, SubmitError};

/// Backend simulado: espera un retardo fijo y confirma siempre.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &WizardConfig) -> Self {
        Self::new(config.submit_delay())
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS))
    }
}

#[async_trait]
impl StepSubmitter for SimulatedSubmitter {
    fn get_name(&self) -> &str {
        "simulated"
    }

    async fn submit(&self, step: StepIndex, record: &FormRecord) -> Result<SubmitResponse, SubmitError> {
        debug!("simulated submit of step {step} ({} fields, {:?})", record.len(), self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(SubmitResponse { success: true, message: format!("Step {step} data saved successfully") })
    }
}
