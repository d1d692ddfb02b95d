use std::io;

use digits_client::{BrowserIdentity, Credentials, DigitsClient, SendVerificationCode};

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
    let phone_number = required_var("DIGITS_PHONE")?;
    let country_code = required_var("DIGITS_COUNTRY")?;

    let client = DigitsClient::new(Credentials::new(consumer_key, host));
    let identity = BrowserIdentity::new(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/57.0.2987.98 Safari/537.36",
        "en-US",
    );

    match client
        .send_verification_code(SendVerificationCode::new(phone_number, country_code, identity))
        .await
    {
        Ok(token) => println!("registration token: {token}"),
        Err(err) => println!("failed ({}): {err}", err.status_code()),
    }

    Ok(())
}
