use colored::*;
use eyre::{Context, Result};
use std::io::{self, BufRead, Write};

use super::fail;
use crate::closet::Closet;

/// Password from the flag, then WARDROBE_PASSWORD, then a prompt on stdin
fn resolve_password(flag: Option<String>) -> Result<String> {
    if let Some(password) = flag {
        return Ok(password);
    }
    if let Ok(password) = std::env::var("WARDROBE_PASSWORD") {
        return Ok(password);
    }

    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn signup(closet: &Closet, username: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;

    if !closet.signup(username, &password)? {
        if username.trim().is_empty() {
            fail("Username must not be empty");
        }
        fail(&format!("Account {} already exists", username));
    }

    println!("{} Signed up and logged in as {}", "✓".green(), username.cyan());
    Ok(())
}

pub fn login(closet: &Closet, username: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;

    if !closet.login(username, &password)? {
        fail("Invalid username or password");
    }

    println!("{} Logged in as {}", "✓".green(), username.cyan());
    Ok(())
}

pub fn logout(closet: &Closet) -> Result<()> {
    closet.logout()?;
    println!("{} Logged out", "✓".green());
    Ok(())
}

pub fn whoami(closet: &Closet) -> Result<()> {
    match closet.current_user()? {
        Some(user) => println!("{}", user),
        None => fail("Not logged in"),
    }
    Ok(())
}
