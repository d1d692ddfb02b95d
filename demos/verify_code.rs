use std::io;

use digits_client::{BrowserIdentity, Credentials, DigitsClient, VerificationOutcome, VerifyCode};

fn required_var(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let consumer_key = required_var("DIGITS_CONSUMER_KEY")?;
    let host = required_var("DIGITS_HOST")?;
    let registration_token = required_var("DIGITS_TOKEN")?;
    let code = required_var("DIGITS_CODE")?;

    let client = DigitsClient::new(Credentials::new(consumer_key, host));
    let identity = BrowserIdentity::new(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/57.0.2987.98 Safari/537.36",
        "en-US",
    );

    match client
        .verify_code(VerifyCode::new(registration_token, code, identity))
        .await
    {
        Ok(VerificationOutcome::Verified {
            success,
            phone_number,
        }) => println!("success: {success}, phone: {phone_number}"),
        Ok(VerificationOutcome::Rejected { phone, errors }) => {
            println!("rejected for {phone}:");
            for error in errors {
                println!("  {}: {}", error.code, error.message);
            }
        }
        Err(err) => println!("failed ({}): {err}", err.status_code()),
    }

    Ok(())
}
