//! Charge a base64-wrapped wallet token
//!
//! Reads the merchant credentials from `CLOUDPAYMENTS_PUBLIC_ID` and
//! `CLOUDPAYMENTS_API_SECRET`, then charges 0.01 RUB with a test token.
//!
//! ```sh
//! CLOUDPAYMENTS_PUBLIC_ID=pk_... CLOUDPAYMENTS_API_SECRET=... \
//!     cargo run --example encoded_token_payment
//! ```

use rust_cloudpayments::CloudPaymentsClient;
use serde_json::json;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::ERROR)
        .init();

    let public_id = env::var("CLOUDPAYMENTS_PUBLIC_ID")?;
    let api_secret = env::var("CLOUDPAYMENTS_API_SECRET")?;

    let client = CloudPaymentsClient::new(public_id, api_secret)?;

    let data = json!({
        "Amount": 0.01,
        "Currency": "RUB",
        "InvoiceId": "1234567",
        "Description": "Payment for goods on example.com",
        "AccountId": "user_x",
        "Token": "c3VjY2Vzc18xMTExYTNlMC0yNDI4LTQ4ZmItYTUzMC0xMjgxNWQ5MGQwZTg=",
    });

    let result = client.pay_with_encoded_token(&data, Some("charge")).await;
    client.close();

    let response = result?;
    println!("Success: {}", response.success);
    println!("Message: {:?}", response.message);
    println!("Transaction: {:?}", response.transaction_id());

    Ok(())
}
