//! End-to-end demo: enroll, register, and log in against a Keygate server.
//!
//! ```bash
//! cargo run --example login_flow -- http://localhost:5000 alice
//! ```
//!
//! The key store file (`keygate-demo.db`) persists between runs, so a second
//! invocation reuses the enrolled identity instead of generating new keys.

use std::sync::Arc;

use keygate_core::{enrollment, AuthClient, KeyStore};

#[tokio::main]
async fn main() -> keygate_core::Result<()> {
    let mut args = std::env::args().skip(1);
    let (origin, username) = match (args.next(), args.next()) {
        (Some(origin), Some(username)) => (origin, username),
        _ => {
            eprintln!("usage: login_flow <server-origin> <username>");
            std::process::exit(2);
        }
    };

    let store = Arc::new(KeyStore::open(Some("keygate-demo.db"))?);

    if enrollment::is_enrolled(&store)? {
        println!("Already enrolled, reusing stored keys");
    } else {
        println!("Enrolling (generating two RSA-4096 key pairs)...");
        enrollment::enroll(&store)?;
        println!("Enrollment complete");
    }

    let client = AuthClient::new(Arc::clone(&store))?;

    print!("Registering '{}' at {} ... ", username, origin);
    if client.register(&username, &origin).await? {
        println!("accepted");
    } else {
        println!("rejected (maybe already registered)");
    }

    print!("Logging in as '{}' ... ", username);
    if client.login(&username, &origin).await? {
        println!("success");
    } else {
        println!("rejected");
    }

    Ok(())
}
