//! Submit an event and look up its user.
//!
//! Run with: cargo run -p notiboost --example ingest_event
//!
//! Set the NOTIBOOST_API_KEY environment variable before running.
//! NOTIBOOST_BASE_URL optionally points the client at another server.

use notiboost::{Event, NotiboostClient, RequestOptions, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let client = NotiboostClient::from_env()?;

    println!("=== Ingest ===");
    let event = Event::new("order_created", "evt_001", "u_123")
        .property("order_id", "A001")
        .property("amount", 350_000);
    let options = RequestOptions::new().idempotency_key("order-A001");
    let resp = client.events().ingest_with_options(event, &options).await?;
    println!("Accepted: {:?}", resp.success);
    println!("Trace ID: {:?}", resp.trace_id);
    println!();

    println!("=== User u_123 ===");
    match client.users().get("u_123").await {
        Ok(user) => {
            println!("Name: {}", user["name"]);
            println!("Email: {}", user["email"]);
        }
        Err(e) if e.status_code() == Some(404) => println!("Not registered yet"),
        Err(e) => return Err(e),
    }

    Ok(())
}
