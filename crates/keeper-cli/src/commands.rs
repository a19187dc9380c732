//! Non-interactive subcommands.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};
use keeper_core::OwnerId;
use keeper_store::{RowStore, WalletService};
use zeroize::Zeroizing;

use crate::menu::DELETE_CONFIRMATION;

/// Read the PIN from here instead of the terminal when set.
pub const PIN_ENV: &str = "KEYKEEPER_PIN";

pub fn read_pin() -> Result<Zeroizing<String>> {
    if let Ok(pin) = std::env::var(PIN_ENV) {
        return Ok(Zeroizing::new(pin));
    }
    let pin = rpassword::prompt_password("Enter PIN: ")?;
    Ok(Zeroizing::new(pin.trim().to_string()))
}

pub fn list<S: RowStore>(svc: &WalletService<S>, json: bool, out: &mut impl Write) -> Result<()> {
    let wallets = svc.list()?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&wallets)?)?;
        return Ok(());
    }
    if wallets.is_empty() {
        writeln!(out, "No wallets.")?;
    }
    for w in wallets {
        writeln!(
            out,
            "{}) {}  {} words  ({})",
            w.id,
            w.name,
            w.phrase_len,
            w.created_at.format("%Y-%m-%d %H:%M UTC")
        )?;
    }
    Ok(())
}

pub fn view<S: RowStore>(
    svc: &WalletService<S>,
    id: OwnerId,
    pin: &str,
    out: &mut impl Write,
) -> Result<()> {
    for (i, word) in svc.ordered_words(id, pin)?.iter().enumerate() {
        writeln!(out, "{:2}: {}", i + 1, word)?;
    }
    Ok(())
}

pub fn export<S: RowStore>(
    svc: &WalletService<S>,
    id: OwnerId,
    pin: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if json {
        let wallet = svc.wallet(id)?;
        let words = Zeroizing::new(svc.ordered_words(id, pin)?);
        let doc = serde_json::json!({
            "id": wallet.id,
            "name": wallet.name,
            "words": *words,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else {
        let line = Zeroizing::new(svc.export(id, pin)?);
        writeln!(out, "{}", *line)?;
    }
    Ok(())
}

pub fn delete<S: RowStore>(
    svc: &WalletService<S>,
    id: OwnerId,
    confirmed: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let wallet = svc.wallet(id)?;
    if !confirmed {
        write!(
            out,
            "Delete wallet {} ({})? Type {DELETE_CONFIRMATION} to confirm: ",
            wallet.id, wallet.name
        )?;
        out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        if line.trim() != DELETE_CONFIRMATION {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
    }
    svc.delete(id)?;
    writeln!(out, "Wallet deleted.")?;
    Ok(())
}

pub fn delete_word<S: RowStore>(
    svc: &WalletService<S>,
    id: OwnerId,
    pin: &str,
    index: usize,
    out: &mut impl Write,
) -> Result<()> {
    if svc.delete_word_at(id, pin, index)? {
        writeln!(out, "Word deleted.")?;
        Ok(())
    } else {
        Err(anyhow!("word {index} was already deleted"))
    }
}
