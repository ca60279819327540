//! Wizard interactivo por stdin. Cada paso pide sus campos en orden; una
//! línea vacía conserva el valor actual.
use std::io::Write;
use std::sync::Arc;

use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

use cert_core::{FieldKind, FieldSpec, FormStepDefinition, StepStatus, WizardError, WizardState};
use cert_persistence::FileKeyValueStore;
use qualinova::{CertificateWizard, CoreError, SimulatedSubmitter, CONFIG};

const BACK: &str = ":back";
const QUIT: &str = ":quit";

enum Answer {
    Value(String),
    Keep,
    Back,
    Quit,
}

pub async fn run(store: Arc<FileKeyValueStore>) -> Result<(), CoreError> {
    let submitter = Arc::new(SimulatedSubmitter::from_config(&CONFIG.wizard));
    let mut wizard = CertificateWizard::new(store, submitter);
    if let WizardState::Editing(step) = wizard.restore()? {
        if step.get() > 1 {
            println!("Draft found, resuming at step {step}.");
            print_progress(&wizard);
        }
    }
    println!("Enter '{BACK}' to go to the previous step or '{QUIT}' to stop (drafts are kept).");

    let mut lines = BufReader::new(stdin()).lines();
    'steps: while let Some(step) = wizard.current_step() {
        let (title, description, fields) = match wizard.controller().current_definition() {
            Some(def) => (def.title().to_string(), def.description().to_string(), def.fields().to_vec()),
            None => break,
        };
        println!("\n== Step {step}/{}: {title} ==\n{description}", wizard.controller().step_count());

        for field in &fields {
            let current = wizard.controller()
                                .current_record()
                                .map(|r| r.value(&field.name).to_string())
                                .unwrap_or_default();
            match ask(&mut lines, field, &current).await? {
                Answer::Keep => {}
                Answer::Value(v) => wizard.edit_field(&field.name, &v)?,
                Answer::Back => match wizard.previous() {
                    Ok(_) => continue 'steps,
                    Err(e) => println!("{e}"),
                },
                Answer::Quit => return Ok(()),
            }
        }

        println!("Saving...");
        match wizard.submit_step().await {
            Ok(_) => {}
            Err(CoreError::Wizard(WizardError::ValidationFailed(_))) => {
                for (field, message) in wizard.controller().errors().iter() {
                    println!("  - {field}: {message}");
                }
            }
            Err(e) => return Err(e),
        }
        if let Some(status) = wizard.controller().status() {
            println!("{}", status.message);
        }
        print_progress(&wizard);
    }

    if let Some(cert) = wizard.issued() {
        println!("\nCertificate {} issued to {} ({}).", cert.id, cert.recipient, cert.status);
    }
    Ok(())
}

/// Una línea por paso: estado, intentos y último error.
fn print_progress(wizard: &CertificateWizard) {
    let progress = wizard.progress();
    for (i, slot) in progress.steps.iter().enumerate() {
        let marker = if i + 1 == progress.cursor && !progress.submitted { ">" } else { " " };
        let status = match slot.status {
            StepStatus::Pending => "pending",
            StepStatus::Saving => "saving",
            StepStatus::Saved => "saved",
            StepStatus::Failed => "failed",
        };
        match &slot.last_error {
            Some(err) if slot.status == StepStatus::Failed => {
                println!(" {marker} {} {:<9} {status} (attempts: {}, last error: {err})", i + 1, slot.step_id, slot.attempts)
            }
            _ => println!(" {marker} {} {:<9} {status} (attempts: {})", i + 1, slot.step_id, slot.attempts),
        }
    }
}

async fn ask(lines: &mut Lines<BufReader<Stdin>>, field: &FieldSpec, current: &str) -> Result<Answer, CoreError> {
    let hint = match (&field.kind, field.options()) {
        (FieldKind::Checkbox, _) => " (y/n)".to_string(),
        (FieldKind::Date, _) => " (YYYY-MM-DD)".to_string(),
        (_, Some(opts)) => format!(" ({})", opts.join("/")),
        _ => String::new(),
    };
    match (current.is_empty(), &field.placeholder) {
        (false, _) => print!("{}{hint} [{current}]: ", field.label),
        (true, Some(example)) => print!("{}{hint} <{example}>: ", field.label),
        (true, None) => print!("{}{hint}: ", field.label),
    }
    std::io::stdout().flush()?;

    let line = lines.next_line()
                    .await?
                    .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed"))?;
    let answer = match line.trim() {
        "" => Answer::Keep,
        BACK => Answer::Back,
        QUIT => Answer::Quit,
        v if field.kind == FieldKind::Checkbox => {
            let yes = matches!(v.to_ascii_lowercase().as_str(), "y" | "yes" | "true");
            Answer::Value(yes.to_string())
        }
        v => Answer::Value(v.to_string()),
    };
    Ok(answer)
}
