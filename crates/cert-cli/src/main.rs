use std::process::exit;
use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use cert_persistence::FileKeyValueStore;
use cert_rpc::{ContractClient, ContractQuery, GreetingQuery, HttpContractClient, MockContractClient, QueryAdapter,
               QueryError, VerifyCertificateQuery};
use qualinova::data::certificate::DISPLAY_DATE_FORMAT;
use qualinova::{CatalogQuery, CertificateCatalog, CertificateStatus, CoreError, CONFIG};

mod wizard_prompt;

const USAGE: &str = "Uso:
  qualinova hello <name> [--offline]
  qualinova verify <cert-id> [--offline]
  qualinova wizard
  qualinova list [--search <TXT>] [--status <active|pending|expired>] [--page <N>]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env())
                             .with_writer(std::io::stderr)
                             .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("");
    let rest: &[String] = args.get(2..).unwrap_or(&[]);

    let result = match command {
        "hello" => query_command(rest, GreetingQuery, |greeting| println!("{greeting}")).await,
        "verify" => query_command(rest, VerifyCertificateQuery, |report| match report {
                        Some(r) => println!("{}: {:?}", r.cert_id, r.status),
                        None => println!("sin respuesta"),
                    }).await,
        "wizard" => wizard_command().await,
        "list" => list_command(rest),
        _ => {
            eprintln!("{USAGE}");
            exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        exit(if e.is_user_error() { 4 } else { 5 });
    }
}

/// `hello` / `verify`: un argumento posicional y `--offline` opcional.
async fn query_command<Q, F>(args: &[String], query: Q, print: F) -> Result<(), CoreError>
    where Q: ContractQuery,
          F: FnOnce(Q::Output)
{
    let offline = args.iter().any(|a| a == "--offline");
    let input = match args.iter().find(|a| !a.starts_with("--")) {
        Some(v) => v.clone(),
        None => {
            eprintln!("{USAGE}");
            exit(2);
        }
    };
    let output = if offline {
        run_query(Arc::new(MockContractClient::new()), query, &input).await?
    } else {
        let client = HttpContractClient::from_config(&CONFIG.rpc)?;
        run_query(Arc::new(client), query, &input).await?
    };
    print(output);
    Ok(())
}

async fn run_query<C, Q>(client: Arc<C>, query: Q, input: &str) -> Result<Q::Output, QueryError>
    where C: ContractClient + 'static,
          Q: ContractQuery
{
    let adapter = QueryAdapter::new(client, query).with_timeout(CONFIG.rpc.timeout());
    let state = adapter.run(input).await;
    adapter.close();
    match state.error {
        Some(err) => Err(err),
        None => Ok(state.result),
    }
}

async fn wizard_command() -> Result<(), CoreError> {
    let store = Arc::new(FileKeyValueStore::open(&CONFIG.storage.path)?);
    wizard_prompt::run(store).await
}

fn list_command(args: &[String]) -> Result<(), CoreError> {
    let mut query = CatalogQuery { page_size: CONFIG.catalog.page_size, ..CatalogQuery::default() };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--search" => { i += 1; query.search = args.get(i).cloned(); }
            "--status" => {
                i += 1;
                let raw = args.get(i).map(String::as_str).unwrap_or("");
                match CertificateStatus::parse(raw) {
                    Some(s) => query.status = Some(s),
                    None if raw.eq_ignore_ascii_case("all") => query.status = None,
                    None => { eprintln!("estado desconocido: {raw}"); exit(4); }
                }
            }
            "--page" => { i += 1; query.page = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(1); }
            _ => {}
        }
        i += 1;
    }

    let store = Arc::new(FileKeyValueStore::open(&CONFIG.storage.path)?);
    let catalog = CertificateCatalog::new(store);
    let page = catalog.query(&query, Local::now().date_naive())?;

    println!("{:<20} {:<32} {:<24} {:<11} {:<11} {}", "ID", "Name", "Recipient", "Issue Date", "Expiry Date", "Status");
    for c in &page.items {
        println!("{:<20} {:<32} {:<24} {:<11} {:<11} {}",
                 c.id,
                 c.name,
                 c.recipient,
                 c.issue_date.format(DISPLAY_DATE_FORMAT),
                 c.expiry_date.format(DISPLAY_DATE_FORMAT),
                 c.status);
    }
    println!("{}  (page {}/{})", page.summary(), page.page, page.page_count);
    Ok(())
}
