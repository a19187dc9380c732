//! Interactive text menu.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Result};
use chrono::Local;
use keeper_core::phrase::validate_pin;
use keeper_core::OwnerId;
use keeper_store::{RowStore, WalletService};
use zeroize::Zeroizing;

use crate::input::{parse_index, parse_length, parse_wallet_id, parse_words};

pub const DELETE_CONFIRMATION: &str = "DELETE";

pub struct Menu<'a, S, R, W> {
    service: &'a WalletService<S>,
    input: R,
    out: W,
    /// Read PINs from the terminal without echo instead of from `input`.
    hide_pins: bool,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
    S: RowStore,
    R: BufRead,
    W: Write,
{
    pub fn new(service: &'a WalletService<S>, input: R, out: W, hide_pins: bool) -> Self {
        Self {
            service,
            input,
            out,
            hide_pins,
        }
    }

    /// Loop until the user quits or input ends. Failed flows are reported and
    /// the menu is shown again.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "Offline PhraseVault - Menu")?;
            writeln!(self.out, "1) Add wallet")?;
            writeln!(self.out, "2) List wallets")?;
            writeln!(self.out, "3) View wallet")?;
            writeln!(self.out, "4) Delete wallet")?;
            writeln!(self.out, "5) Delete word in wallet")?;
            writeln!(self.out, "6) Export wallet")?;
            writeln!(self.out, "7) Quit")?;
            write!(self.out, "Choose: ")?;
            self.out.flush()?;

            let Some(choice) = self.read_line()? else {
                return Ok(());
            };
            let outcome = match choice.as_str() {
                "1" => self.add_wallet(),
                "2" => self.list_wallets(),
                "3" => self.view_wallet(),
                "4" => self.delete_wallet(),
                "5" => self.delete_word(),
                "6" => self.export_wallet(),
                "7" => return Ok(()),
                _ => {
                    writeln!(self.out, "Invalid choice")?;
                    Ok(())
                }
            };
            if let Err(err) = outcome {
                writeln!(self.out, "Error: {err}")?;
            }
        }
    }

    /// Trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        self.read_line()?
            .ok_or_else(|| anyhow!("unexpected end of input"))
    }

    fn prompt_secret(&mut self, label: &str) -> Result<Zeroizing<String>> {
        if self.hide_pins {
            let pin = rpassword::prompt_password(label)?;
            return Ok(Zeroizing::new(pin.trim().to_string()));
        }
        self.prompt(label).map(Zeroizing::new)
    }

    /// Ask until the PIN is digits only and typed the same way twice.
    fn prompt_new_pin(&mut self) -> Result<Zeroizing<String>> {
        loop {
            let pin = self.prompt_secret("Enter numeric PIN: ")?;
            if validate_pin(&pin).is_err() {
                writeln!(self.out, "PIN must be digits only")?;
                continue;
            }
            let confirm = self.prompt_secret("Confirm PIN: ")?;
            if *confirm == *pin {
                return Ok(pin);
            }
            writeln!(self.out, "PINs do not match")?;
        }
    }

    fn add_wallet(&mut self) -> Result<()> {
        let name = self.prompt("Wallet name: ")?;
        let pin = self.prompt_new_pin()?;
        writeln!(self.out, "Choose phrase length: 12 / 18 / 24")?;
        let len = parse_length(&self.prompt("Length: ")?)?;
        writeln!(
            self.out,
            "Enter {len} words in order (comma or space separated):"
        )?;
        let line = Zeroizing::new(
            self.read_line()?
                .ok_or_else(|| anyhow!("unexpected end of input"))?,
        );
        let words: Vec<Zeroizing<String>> =
            parse_words(&line).into_iter().map(Zeroizing::new).collect();
        if words.len() != len.words() {
            bail!("expected {} words, got {}", len.words(), words.len());
        }
        let refs: Vec<&str> = words.iter().map(|w| w.as_str()).collect();
        self.service.create(&name, &pin, &refs)?;
        writeln!(self.out, "Wallet added.")?;
        Ok(())
    }

    fn list_wallets(&mut self) -> Result<()> {
        let wallets = self.service.list()?;
        if wallets.is_empty() {
            writeln!(self.out, "No wallets.")?;
            return Ok(());
        }
        for w in wallets {
            writeln!(
                self.out,
                "{}) {}  ({})",
                w.id,
                w.name,
                w.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            )?;
        }
        Ok(())
    }

    fn select_wallet(&mut self) -> Result<OwnerId> {
        self.list_wallets()?;
        parse_wallet_id(&self.prompt("Enter wallet ID: ")?)
    }

    fn view_wallet(&mut self) -> Result<()> {
        let id = self.select_wallet()?;
        let pin = self.prompt_secret("Enter PIN: ")?;
        let words = self.service.ordered_words(id, &pin)?;
        for (i, word) in words.iter().enumerate() {
            writeln!(self.out, "{:2}: {}", i + 1, word)?;
        }
        Ok(())
    }

    fn delete_wallet(&mut self) -> Result<()> {
        let id = self.select_wallet()?;
        let confirm = self.prompt(&format!("Type {DELETE_CONFIRMATION} to confirm: "))?;
        if confirm != DELETE_CONFIRMATION {
            writeln!(self.out, "Cancelled.")?;
            return Ok(());
        }
        self.service.delete(id)?;
        writeln!(self.out, "Wallet deleted.")?;
        Ok(())
    }

    fn delete_word(&mut self) -> Result<()> {
        let id = self.select_wallet()?;
        let phrase_len = self.service.wallet(id)?.phrase_len;
        let pin = self.prompt_secret("Enter PIN: ")?;
        let index = parse_index(&self.prompt(&format!("Index to delete (1-{phrase_len}): "))?)?;
        if self.service.delete_word_at(id, &pin, index)? {
            writeln!(self.out, "Word deleted.")?;
        } else {
            writeln!(self.out, "Word was already deleted.")?;
        }
        Ok(())
    }

    fn export_wallet(&mut self) -> Result<()> {
        let id = self.select_wallet()?;
        let pin = self.prompt_secret("Enter PIN: ")?;
        let line = self.service.export(id, &pin)?;
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}
