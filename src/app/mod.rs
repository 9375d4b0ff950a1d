//! Presentation Layer
//!
//! One-shot analysis report and a live terminal code view. Thin plumbing
//! only; all code generation happens in the recovery engine.

pub mod clipboard;

use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};

use crate::db::{AccountRecord, ExtractorConfig, KeychainDb};
use crate::otp::{time_remaining, totp, Code};
use crate::recover::{evaluate, CodeResult, PARAMETER_MATRIX, PERIOD};

/// Current wall-clock time in whole seconds since the UNIX epoch.
pub fn epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ============================================================================
// Analyze mode
// ============================================================================

/// Dump every account, every secret field, every decoding and every matrix
/// cell in one pass, for side-by-side comparison with the vendor app.
pub fn run_analyze(config: &ExtractorConfig, json: bool) -> Result<()> {
    let db = KeychainDb::open(&config.db_path)?;
    let accounts = db.accounts(&config.access_group)?;

    if json {
        return print_json(&accounts);
    }

    println!("Checking DB: {}", config.db_path.display());
    if accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    let now = epoch_seconds();
    println!(
        "Found {} accounts at {}.",
        accounts.len(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    for (index, account) in accounts.iter().enumerate() {
        println!("\n{}", "=".repeat(50));
        println!("Account {}: {}", index + 1, account.name);
        println!("{}", "=".repeat(50));
        println!("{}", account.declared.describe());

        for (field, token) in &account.tokens {
            println!("\n[Key: {}]", field);
            println!(
                "  Raw value (masked): {} (len {})",
                mask_token(token),
                token.chars().count()
            );

            let results = evaluate(&account.name, field, token, now);
            // evaluate() walks candidates in order, one full matrix each.
            for per_candidate in results.chunks(PARAMETER_MATRIX.len()) {
                let first = &per_candidate[0];
                println!(
                    "  -- Decoding: {} ({} bytes) --",
                    first.encoding, first.byte_len
                );
                for result in per_candidate {
                    println!("     {:<14} {}", format!("{}:", result.params.label()), result.code);
                }
            }
        }
    }
    Ok(())
}

fn print_json(accounts: &[AccountRecord]) -> Result<()> {
    let now = epoch_seconds();
    let results: Vec<CodeResult> = accounts
        .iter()
        .flat_map(|account| {
            account.tokens.iter().flat_map(move |(field, token)| {
                evaluate(&account.name, field, token, now)
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Mask a token for display, keeping only the first and last few characters.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 10 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{}...{}", head, tail)
}

// ============================================================================
// Watch mode
// ============================================================================

/// Live view refreshing once per second, showing each account's code under
/// the interpretation the vendor app itself uses (raw bytes, 6 digits).
pub fn run_watch(config: &ExtractorConfig) -> Result<()> {
    let db = KeychainDb::open(&config.db_path)?;
    let mut accounts = db.accounts(&config.access_group)?;

    enable_raw_mode()?;
    let result = watch_loop(&db, config, &mut accounts);
    disable_raw_mode()?;
    result
}

fn watch_loop(
    db: &KeychainDb,
    config: &ExtractorConfig,
    accounts: &mut Vec<AccountRecord>,
) -> Result<()> {
    let mut stdout = io::stdout();

    loop {
        let now = epoch_seconds();
        let mut lines = vec![
            "OTP Recovery (watch mode)".to_string(),
            "-".repeat(40),
        ];

        if accounts.is_empty() {
            lines.push("No accounts found.".to_string());
        }
        for (index, account) in accounts.iter().enumerate() {
            lines.push(format!(
                "{}) {}: {}",
                index + 1,
                account.name,
                format_code(&live_code(account, now))
            ));
        }
        lines.push(String::new());
        lines.push(format!("Refreshes in {}s", time_remaining(PERIOD, now)));
        lines.push("q quit | r reload | 1-9 copy code".to_string());

        queue!(stdout, Clear(ClearType::All))?;
        for (y, line) in lines.iter().enumerate() {
            queue!(stdout, MoveTo(0, y as u16))?;
            write!(stdout, "{}", line)?;
        }
        stdout.flush()?;

        if !event::poll(Duration::from_secs(1))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Char('r') => {
                *accounts = db.accounts(&config.access_group)?;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(account) = accounts.get(index) {
                    if let Code::Digits(code) = live_code(account, epoch_seconds()) {
                        clipboard::copy_with_timeout(&code, Duration::from_secs(45));
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn live_code(account: &AccountRecord, now: u64) -> Code {
    match account.primary_token() {
        Some(token) => totp(token.as_bytes(), 6, PERIOD, "SHA1", 0, now),
        None => Code::EmptySecret,
    }
}

/// `123456` displays as `123 456`; sentinels display as-is.
fn format_code(code: &Code) -> String {
    match code {
        Code::Digits(digits) if digits.len() == 6 => {
            format!("{} {}", &digits[..3], &digits[3..])
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("ABCDEFGHIJKLMNOP"), "ABCDE...LMNOP");
    }

    #[test]
    fn test_format_code_groups_six_digits() {
        assert_eq!(format_code(&Code::Digits("287082".to_string())), "287 082");
        assert_eq!(
            format_code(&Code::Digits("94287082".to_string())),
            "94287082"
        );
        assert_eq!(format_code(&Code::EmptySecret), "EMPTY");
    }

    #[test]
    fn test_live_code_uses_raw_six_digit_interpretation() {
        let account = AccountRecord::from_json(
            r#"{"displayLabel": "A", "otpSecretKeyNew": "12345678901234567890"}"#,
        )
        .unwrap();
        assert_eq!(
            live_code(&account, 59),
            Code::Digits("287082".to_string())
        );
    }

    #[test]
    fn test_live_code_without_tokens_is_empty_sentinel() {
        let account = AccountRecord::from_json(r#"{"displayLabel": "A"}"#).unwrap();
        assert_eq!(live_code(&account, 59), Code::EmptySecret);
    }
}
